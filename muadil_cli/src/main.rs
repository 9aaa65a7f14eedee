//! # Muadil CLI
//!
//! Command-line front end over `muadil_core`: list the catalog, run a
//! substitute study for a catalog profile or a manual flat bar, and print the
//! result as tables or JSON.
//!
//! ```text
//! muadil study ipe 200 --tolerance 0.05
//! muadil flat-bar --height 80 --thickness 7 --json
//! muadil --catalog shop.json list pipe
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;

use muadil_core::catalog::{self, Catalog};
use muadil_core::file_io::{load_catalog, load_settings, save_catalog};
use muadil_core::illustrations::illustration_for;
use muadil_core::profiles::{self, ProfileFamily};
use muadil_core::search::CandidateRecord;
use muadil_core::settings::SearchSettings;
use muadil_core::study::{MatchList, Reference, Study, StudyResult};
use muadil_core::Material;

#[derive(Parser)]
#[command(name = "muadil")]
#[command(version, about = "Find substitute profiles by section modulus")]
struct Cmd {
    /// Search settings file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Profile catalog to use instead of the built-in tables (JSON)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Directory holding the reference illustrations
    #[arg(long, global = true, default_value = "assets")]
    assets: PathBuf,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// List profile families and the dimensions each one needs
    Families,
    /// List the catalog rows of one family with their section moduli
    List {
        /// Family tag or alias (pipe, rhs, ipe, hea, upn, round, ...)
        family: String,
    },
    /// Find substitutes for a catalog profile
    Study {
        /// Family tag or alias
        family: String,
        /// Profile name, e.g. "IPE 200" or: 200 (spaces optional)
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
        #[command(flatten)]
        opts: StudyOpts,
    },
    /// Find substitutes for a flat bar of given dimensions
    FlatBar {
        /// Height h (mm)
        #[arg(long)]
        height: f64,
        /// Thickness t (mm)
        #[arg(long)]
        thickness: f64,
        #[command(flatten)]
        opts: StudyOpts,
    },
    /// Write the catalog in use to a JSON file, as a starting point for edits
    ExportCatalog {
        /// Output path
        out: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
struct StudyOpts {
    /// steel, stainless or aluminium
    #[arg(long, default_value = "steel")]
    material: String,

    /// Custom density in g/cm³ (overrides --material)
    #[arg(long)]
    density: Option<f64>,

    /// Member length (mm)
    #[arg(long, default_value_t = muadil_core::study::DEFAULT_LENGTH_MM)]
    length_mm: f64,

    /// Relative tolerance band, e.g. 0.10 for ±10%
    #[arg(long)]
    tolerance: Option<f64>,

    /// Skip the flat-bar sweep
    #[arg(long)]
    no_flat_bar: bool,

    /// Skip the T-section sweep
    #[arg(long)]
    no_tee: bool,

    /// Show at most this many candidates per list
    #[arg(long)]
    max_results: Option<usize>,

    /// Print the full result as JSON
    #[arg(long)]
    json: bool,
}

impl StudyOpts {
    fn material(&self) -> Result<Material> {
        match self.density {
            Some(d) => Ok(Material::custom(d)?),
            None => Ok(self.material.parse()?),
        }
    }

    fn apply(&self, mut settings: SearchSettings) -> SearchSettings {
        if let Some(t) = self.tolerance {
            settings.tolerance = t;
        }
        if self.no_flat_bar {
            settings.flat_bar.enabled = false;
        }
        if self.no_tee {
            settings.tee.enabled = false;
        }
        if self.max_results.is_some() {
            settings.max_results = self.max_results;
        }
        settings
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    SubscriberBuilder::default()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    init_logging(cmd.verbose);

    let settings = match &cmd.config {
        Some(path) => load_settings(path).with_context(|| format!("loading settings from {}", path.display()))?,
        None => SearchSettings::default(),
    };
    let loaded;
    let catalog: &Catalog = match &cmd.catalog {
        Some(path) => {
            loaded = load_catalog(path).with_context(|| format!("loading catalog from {}", path.display()))?;
            &loaded
        }
        None => catalog::builtin(),
    };
    tracing::debug!(rows = catalog.len(), version = ?catalog.version, "catalog ready");

    match cmd.action {
        Action::Families => families(catalog),
        Action::List { family } => list(catalog, &family),
        Action::Study { family, name, opts } => {
            let family: ProfileFamily = family.parse()?;
            let reference = Reference::catalog(family, name.join(" "));
            study(reference, &opts, settings, catalog, &cmd.assets)
        }
        Action::FlatBar {
            height,
            thickness,
            opts,
        } => study(Reference::flat_bar(height, thickness), &opts, settings, catalog, &cmd.assets),
        Action::ExportCatalog { out } => {
            save_catalog(catalog, &out)?;
            println!("Wrote {} rows to {}", catalog.len(), out.display());
            Ok(())
        }
    }
}

fn families(catalog: &Catalog) -> Result<()> {
    println!("{:<10} {:<26} {:<16} {:>5}", "TAG", "FAMILY", "FIELDS", "ROWS");
    for family in ProfileFamily::ALL {
        let fields = profiles::lookup(family)
            .map(|s| s.required_fields().join(", "))
            .unwrap_or_default();
        let rows = if family.has_catalog_table() {
            catalog.rows_of(family).len().to_string()
        } else {
            "-".to_string()
        };
        println!("{:<10} {:<26} {:<16} {:>5}", family.tag(), family.display_name(), fields, rows);
    }
    Ok(())
}

fn list(catalog: &Catalog, family: &str) -> Result<()> {
    let family: ProfileFamily = family.parse()?;
    let rows = catalog.rows_of(family);
    if rows.is_empty() {
        println!("No {} rows in this catalog", family.tag());
        return Ok(());
    }

    println!("{:<22} {:>14} {:>14}  {}", "NAME", "Wx (mm³)", "Wy (mm³)", "DIMENSIONS");
    for row in rows {
        let dims = row
            .dims
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ");
        match row.try_moduli() {
            Ok(w) => println!("{:<22} {:>14.0} {:>14.0}  {}", row.name, w.wx_mm3, w.wy_mm3, dims),
            Err(e) => println!("{:<22} {:>14} {:>14}  {}  ({})", row.name, "undefined", "undefined", dims, e),
        }
    }
    Ok(())
}

fn study(
    reference: Reference,
    opts: &StudyOpts,
    settings: SearchSettings,
    catalog: &Catalog,
    assets: &Path,
) -> Result<()> {
    let settings = opts.apply(settings);
    let result = Study::new(reference)
        .with_material(opts.material()?)
        .with_length_mm(opts.length_mm)
        .run(&settings, catalog)?;

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result, assets);
    }
    Ok(())
}

fn print_result(result: &StudyResult, assets: &Path) {
    let reference = &result.reference;
    println!("═══════════════════════════════════════");
    println!("  {} [{}]", reference.name, reference.family.tag());
    println!("═══════════════════════════════════════");
    println!("  Material: {} ({} g/cm³)", result.material, result.material.density().0);
    println!("  Length:   {:.0} mm", result.length_mm);
    println!("  Area:     {:.2} mm²", result.area_mm2);
    println!("  Weight:   {:.2} kg", result.weight_kg);
    println!("  Wx ≈ {} mm³", group_thousands(result.moduli.wx_mm3));
    println!("  Wy ≈ {} mm³", group_thousands(result.moduli.wy_mm3));
    println!("  Tolerance: ±{:.0}%", result.tolerance * 100.0);

    print_matches("Catalog profiles", &result.catalog_matches);
    print_matches(
        &format!("Flat bars, h = {} mm", result.search_height_mm),
        &result.flat_bar_matches,
    );
    let (t_min, t_max) = result.tee_thickness_mm;
    print_matches(
        &format!(
            "T-sections, H = {} mm, plates {}-{} mm",
            result.search_height_mm, t_min, t_max
        ),
        &result.tee_matches,
    );

    if let Some(path) = illustration_for(reference.family, assets) {
        println!();
        println!("Illustration: {}", path.display());
    }
}

fn print_matches(title: &str, list: &MatchList) {
    println!();
    println!("── {} ──", title);
    if !list.enabled {
        println!("  (disabled)");
        return;
    }
    if list.is_empty() {
        println!("  no candidates found");
        return;
    }
    println!(
        "  {:<34} {:<10} {:>12} {:>12} {:>10} {:>10} {:>10}",
        "PROFILE", "TYPE", "Wx", "Wy", "ΔWx", "ΔWy", "SCORE"
    );
    for c in &list.candidates {
        println!("  {}", candidate_row(c));
    }
    if list.total > list.candidates.len() {
        println!("  ... showing {} of {}", list.candidates.len(), list.total);
    }
}

fn candidate_row(c: &CandidateRecord) -> String {
    format!(
        "{:<34} {:<10} {:>12.0} {:>12.0} {:>10.0} {:>10.0} {:>10.0}",
        c.label, c.tag, c.wx_mm3, c.wy_mm3, c.delta_wx_mm3, c.delta_wy_mm3, c.score
    )
}

/// 9175.69 -> "9,176"
fn group_thousands(value: f64) -> String {
    let rounded = format!("{:.0}", value.abs());
    let mut out = String::with_capacity(rounded.len() + rounded.len() / 3);
    for (i, ch) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if value < 0.0 && rounded != "0" {
        out.insert(0, '-');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cmd::command().debug_assert();
    }

    #[test]
    fn test_parse_study() {
        let cmd = Cmd::try_parse_from([
            "muadil", "study", "ipe", "IPE", "200", "--tolerance", "0.05", "--no-tee", "--json",
        ])
        .unwrap();
        match cmd.action {
            Action::Study { family, name, opts } => {
                assert_eq!(family, "ipe");
                assert_eq!(name.join(" "), "IPE 200");
                assert_eq!(opts.tolerance, Some(0.05));
                assert!(opts.no_tee);
                assert!(!opts.no_flat_bar);
                assert!(opts.json);
                assert_eq!(opts.length_mm, 6000.0);
            }
            _ => panic!("expected study"),
        }
    }

    #[test]
    fn test_parse_flat_bar_with_globals() {
        let cmd = Cmd::try_parse_from([
            "muadil", "flat-bar", "--height", "80", "--thickness", "7", "--catalog", "shop.json", "-vv",
        ])
        .unwrap();
        assert_eq!(cmd.verbose, 2);
        assert_eq!(cmd.catalog, Some(PathBuf::from("shop.json")));
        assert!(matches!(cmd.action, Action::FlatBar { height, thickness, .. } if height == 80.0 && thickness == 7.0));
    }

    #[test]
    fn test_opts_override_settings() {
        let cmd = Cmd::try_parse_from([
            "muadil", "flat-bar", "--height", "80", "--thickness", "7", "--no-flat-bar", "--max-results", "5",
            "--density", "8.96",
        ])
        .unwrap();
        let Action::FlatBar { opts, .. } = cmd.action else {
            panic!("expected flat-bar");
        };
        let settings = opts.apply(SearchSettings::default());
        assert!(!settings.flat_bar.enabled);
        assert!(settings.tee.enabled);
        assert_eq!(settings.max_results, Some(5));
        assert_eq!(settings.tolerance, 0.10);
        assert_eq!(opts.material().unwrap().density().0, 8.96);
    }

    #[test]
    fn test_unknown_material_rejected() {
        let cmd = Cmd::try_parse_from(["muadil", "flat-bar", "--height", "80", "--thickness", "7", "--material", "oak"])
            .unwrap();
        let Action::FlatBar { opts, .. } = cmd.action else {
            panic!("expected flat-bar");
        };
        assert!(opts.material().is_err());
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(9175.69), "9,176");
        assert_eq!(group_thousands(653.3), "653");
        assert_eq!(group_thousands(1234567.0), "1,234,567");
        assert_eq!(group_thousands(-1000.0), "-1,000");
    }
}
