//! Built-in profile tables
//!
//! Nominal dimensions in millimeters. Rolled sections follow EN 10365,
//! hollow sections EN 10219, pipes ASME B36.10M, bulb flats EN 10067.

use super::Catalog;
use crate::profiles::family::fields::*;
use crate::profiles::{Dimensions, ProfileFamily, ProfileRow};

/// (DN, schedule, OD, wall)
const PIPES: &[(u32, &str, f64, f64)] = &[
    (15, "10", 21.3, 2.11),
    (15, "40", 21.3, 2.77),
    (15, "80", 21.3, 3.73),
    (20, "10", 26.7, 2.11),
    (20, "40", 26.7, 2.87),
    (20, "80", 26.7, 3.91),
    (25, "10", 33.4, 2.77),
    (25, "40", 33.4, 3.38),
    (25, "80", 33.4, 4.55),
    (32, "10", 42.2, 2.77),
    (32, "40", 42.2, 3.56),
    (32, "80", 42.2, 4.85),
    (40, "10", 48.3, 2.77),
    (40, "40", 48.3, 3.68),
    (40, "80", 48.3, 5.08),
    (50, "10", 60.3, 2.77),
    (50, "40", 60.3, 3.91),
    (50, "80", 60.3, 5.54),
    (65, "10", 73.0, 3.05),
    (65, "40", 73.0, 5.16),
    (65, "80", 73.0, 7.01),
    (80, "10", 88.9, 3.05),
    (80, "40", 88.9, 5.49),
    (80, "80", 88.9, 7.62),
    (100, "10", 114.3, 3.05),
    (100, "40", 114.3, 6.02),
    (100, "80", 114.3, 8.56),
    (125, "10", 141.3, 3.40),
    (125, "40", 141.3, 6.55),
    (125, "80", 141.3, 9.53),
    (150, "10", 168.3, 3.40),
    (150, "40", 168.3, 7.11),
    (150, "80", 168.3, 10.97),
    (200, "10", 219.1, 3.76),
    (200, "40", 219.1, 8.18),
    (200, "80", 219.1, 12.70),
    (250, "10", 273.0, 4.19),
    (250, "40", 273.0, 9.27),
    (250, "80", 273.0, 15.09),
    (300, "10", 323.8, 4.57),
    (300, "40", 323.8, 10.31),
    (300, "80", 323.8, 17.48),
];

/// (A height, B width, wall)
const HOLLOW_SECTIONS: &[(f64, f64, f64)] = &[
    (20.0, 20.0, 2.0),
    (25.0, 25.0, 2.0),
    (30.0, 30.0, 2.0),
    (40.0, 40.0, 3.0),
    (50.0, 50.0, 3.0),
    (60.0, 60.0, 4.0),
    (70.0, 70.0, 4.0),
    (80.0, 80.0, 4.0),
    (90.0, 90.0, 5.0),
    (100.0, 100.0, 5.0),
    (120.0, 120.0, 6.0),
    (150.0, 150.0, 8.0),
    (40.0, 20.0, 2.0),
    (50.0, 30.0, 3.0),
    (60.0, 40.0, 3.0),
    (80.0, 40.0, 4.0),
    (100.0, 50.0, 4.0),
    (120.0, 60.0, 5.0),
    (120.0, 80.0, 5.0),
    (150.0, 100.0, 6.0),
    (200.0, 100.0, 6.0),
];

/// (leg, thickness)
const EQUAL_ANGLES: &[(f64, f64)] = &[
    (20.0, 3.0),
    (25.0, 3.0),
    (30.0, 3.0),
    (35.0, 4.0),
    (40.0, 4.0),
    (45.0, 5.0),
    (50.0, 5.0),
    (60.0, 6.0),
    (70.0, 7.0),
    (80.0, 8.0),
    (90.0, 9.0),
    (100.0, 10.0),
    (120.0, 12.0),
    (150.0, 15.0),
];

/// (long leg a, short leg b, thickness)
const UNEQUAL_ANGLES: &[(f64, f64, f64)] = &[
    (30.0, 20.0, 3.0),
    (40.0, 25.0, 4.0),
    (50.0, 30.0, 5.0),
    (60.0, 40.0, 5.0),
    (75.0, 50.0, 6.0),
    (80.0, 40.0, 6.0),
    (100.0, 50.0, 8.0),
    (100.0, 65.0, 7.0),
    (120.0, 80.0, 8.0),
    (150.0, 90.0, 10.0),
    (150.0, 100.0, 10.0),
    (200.0, 100.0, 10.0),
];

/// (size, h, b, tw, tf)
const IPE: &[(u32, f64, f64, f64, f64)] = &[
    (80, 80.0, 46.0, 3.8, 5.2),
    (100, 100.0, 55.0, 4.1, 5.7),
    (120, 120.0, 64.0, 4.4, 6.3),
    (140, 140.0, 73.0, 4.7, 6.9),
    (160, 160.0, 82.0, 5.0, 7.4),
    (180, 180.0, 91.0, 5.3, 8.0),
    (200, 200.0, 100.0, 5.6, 8.5),
    (220, 220.0, 110.0, 5.9, 9.2),
    (240, 240.0, 120.0, 6.2, 9.8),
    (270, 270.0, 135.0, 6.6, 10.2),
    (300, 300.0, 150.0, 7.1, 10.7),
    (330, 330.0, 160.0, 7.5, 11.5),
    (360, 360.0, 170.0, 8.0, 12.7),
    (400, 400.0, 180.0, 8.6, 13.5),
    (450, 450.0, 190.0, 9.4, 14.6),
    (500, 500.0, 200.0, 10.2, 16.0),
    (550, 550.0, 210.0, 11.1, 17.2),
    (600, 600.0, 220.0, 12.0, 19.0),
];

const HEA: &[(u32, f64, f64, f64, f64)] = &[
    (100, 96.0, 100.0, 5.0, 8.0),
    (120, 114.0, 120.0, 5.0, 8.0),
    (140, 133.0, 140.0, 5.5, 8.5),
    (160, 152.0, 160.0, 6.0, 9.0),
    (180, 171.0, 180.0, 6.0, 9.5),
    (200, 190.0, 200.0, 6.5, 10.0),
    (220, 210.0, 220.0, 7.0, 11.0),
    (240, 230.0, 240.0, 7.5, 12.0),
    (260, 250.0, 260.0, 7.5, 12.5),
    (280, 270.0, 280.0, 8.0, 13.0),
    (300, 290.0, 300.0, 8.5, 14.0),
    (320, 310.0, 300.0, 9.0, 15.5),
    (340, 330.0, 300.0, 9.5, 16.5),
    (360, 350.0, 300.0, 10.0, 17.5),
    (400, 390.0, 300.0, 11.0, 19.0),
];

const HEB: &[(u32, f64, f64, f64, f64)] = &[
    (100, 100.0, 100.0, 6.0, 10.0),
    (120, 120.0, 120.0, 6.5, 11.0),
    (140, 140.0, 140.0, 7.0, 12.0),
    (160, 160.0, 160.0, 8.0, 13.0),
    (180, 180.0, 180.0, 8.5, 14.0),
    (200, 200.0, 200.0, 9.0, 15.0),
    (220, 220.0, 220.0, 9.5, 16.0),
    (240, 240.0, 240.0, 10.0, 17.0),
    (260, 260.0, 260.0, 10.0, 17.5),
    (280, 280.0, 280.0, 10.5, 18.0),
    (300, 300.0, 300.0, 11.0, 19.0),
    (320, 320.0, 300.0, 11.5, 20.5),
    (340, 340.0, 300.0, 12.0, 21.5),
    (360, 360.0, 300.0, 12.5, 22.5),
    (400, 400.0, 300.0, 13.5, 24.0),
];

const UPN: &[(u32, f64, f64, f64, f64)] = &[
    (50, 50.0, 38.0, 5.0, 7.0),
    (65, 65.0, 42.0, 5.5, 7.5),
    (80, 80.0, 45.0, 6.0, 8.0),
    (100, 100.0, 50.0, 6.0, 8.5),
    (120, 120.0, 55.0, 7.0, 9.0),
    (140, 140.0, 60.0, 7.0, 10.0),
    (160, 160.0, 65.0, 7.5, 10.5),
    (180, 180.0, 70.0, 8.0, 11.0),
    (200, 200.0, 75.0, 8.5, 11.5),
    (220, 220.0, 80.0, 9.0, 12.5),
    (240, 240.0, 85.0, 9.5, 13.0),
    (260, 260.0, 90.0, 10.0, 14.0),
    (280, 280.0, 95.0, 10.0, 15.0),
    (300, 300.0, 100.0, 10.0, 16.0),
];

/// Solid round diameters
const ROUNDS: &[f64] = &[
    10.0, 12.0, 14.0, 16.0, 20.0, 25.0, 30.0, 35.0, 40.0, 45.0, 50.0, 60.0, 70.0, 80.0, 100.0,
];

/// Solid square sides
const SQUARES: &[f64] = &[
    10.0, 12.0, 14.0, 16.0, 20.0, 25.0, 30.0, 35.0, 40.0, 50.0, 60.0, 80.0, 100.0,
];

/// (B height, t web)
const BULB_FLATS: &[(f64, f64)] = &[
    (80.0, 5.0),
    (80.0, 6.0),
    (100.0, 6.0),
    (100.0, 7.0),
    (120.0, 6.0),
    (120.0, 7.0),
    (140.0, 7.0),
    (140.0, 8.0),
    (160.0, 8.0),
    (160.0, 9.0),
    (180.0, 9.0),
    (180.0, 10.0),
    (200.0, 10.0),
    (200.0, 11.0),
    (220.0, 10.0),
    (240.0, 11.0),
];

/// Format a millimeter value for labels: at most three decimals, no trailing ".0"
pub(crate) fn mm(value: f64) -> String {
    format!("{}", (value * 1000.0).round() / 1000.0)
}

fn rolled(catalog: &mut Catalog, family: ProfileFamily, table: &[(u32, f64, f64, f64, f64)]) {
    for &(size, h, b, tw, tf) in table {
        catalog.insert(ProfileRow::new(
            family,
            format!("{} {}", family.tag(), size),
            Dimensions::new()
                .with(HEIGHT, h)
                .with(WIDTH, b)
                .with(WEB, tw)
                .with(FLANGE, tf),
        ));
    }
}

/// Every built-in table, in family order
pub fn builtin_catalog() -> Catalog {
    let mut catalog = Catalog::new();

    for &(dn, sch, od, t) in PIPES {
        catalog.insert(ProfileRow::new(
            ProfileFamily::Pipe,
            format!("DN {} SCH {}", dn, sch),
            Dimensions::new().with(OUTER_DIAMETER, od).with(WALL, t),
        ));
    }

    for &(a, b, t) in HOLLOW_SECTIONS {
        let prefix = if a == b { "SHS" } else { "RHS" };
        catalog.insert(ProfileRow::new(
            ProfileFamily::RectangularHollow,
            format!("{} {}x{}x{}", prefix, mm(a), mm(b), mm(t)),
            Dimensions::new().with(HEIGHT_A, a).with(WIDTH_B, b).with(WALL, t),
        ));
    }

    for &(leg, t) in EQUAL_ANGLES {
        catalog.insert(ProfileRow::new(
            ProfileFamily::EqualAngle,
            format!("L {}x{}x{}", mm(leg), mm(leg), mm(t)),
            Dimensions::new().with(LEG_A, leg).with(LEG_B, leg).with(THICKNESS, t),
        ));
    }

    for &(a, b, t) in UNEQUAL_ANGLES {
        catalog.insert(ProfileRow::new(
            ProfileFamily::UnequalAngle,
            format!("L {}x{}x{}", mm(a), mm(b), mm(t)),
            Dimensions::new().with(LEG_A, a).with(LEG_B, b).with(THICKNESS, t),
        ));
    }

    rolled(&mut catalog, ProfileFamily::IBeam, IPE);
    rolled(&mut catalog, ProfileFamily::WideFlangeA, HEA);
    rolled(&mut catalog, ProfileFamily::WideFlangeB, HEB);
    rolled(&mut catalog, ProfileFamily::Channel, UPN);

    for &d in ROUNDS {
        catalog.insert(ProfileRow::new(
            ProfileFamily::SolidRound,
            format!("Ø{}", mm(d)),
            Dimensions::new().with(DIAMETER, d),
        ));
    }

    for &a in SQUARES {
        catalog.insert(ProfileRow::new(
            ProfileFamily::SolidSquare,
            format!("□{}", mm(a)),
            Dimensions::new().with(SIDE, a),
        ));
    }

    for &(b, t) in BULB_FLATS {
        catalog.insert(ProfileRow::new(
            ProfileFamily::BulbFlat,
            format!("HP {}x{}", mm(b), mm(t)),
            Dimensions::new().with(WIDTH_B, b).with(THICKNESS, t),
        ));
    }

    catalog.version = Some("builtin".to_string());
    catalog
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mm_formatting() {
        assert_eq!(mm(80.0), "80");
        assert_eq!(mm(60.3), "60.3");
        assert_eq!(mm(60.3 - 4.0), "56.3");
    }

    #[test]
    fn test_every_builtin_row_is_defined() {
        let catalog = builtin_catalog();
        for row in catalog.rows() {
            assert!(row.moduli().is_some(), "{} has undefined moduli", row);
            assert!(row.area_mm2().is_some(), "{} has undefined area", row);
            assert!(row.search_basis().is_some(), "{} has no search basis", row);
        }
    }

    #[test]
    fn test_table_sizes() {
        let catalog = builtin_catalog();
        assert_eq!(catalog.rows_of(ProfileFamily::Pipe).len(), PIPES.len());
        assert_eq!(catalog.rows_of(ProfileFamily::IBeam).len(), IPE.len());
        assert_eq!(catalog.rows_of(ProfileFamily::BulbFlat).len(), BULB_FLATS.len());
        assert!(catalog.rows_of(ProfileFamily::FlatBar).is_empty());
    }

    #[test]
    fn test_row_names() {
        let catalog = builtin_catalog();
        assert!(catalog.lookup(ProfileFamily::Pipe, "DN 50 SCH 40").is_ok());
        assert!(catalog.lookup(ProfileFamily::RectangularHollow, "RHS 100x50x4").is_ok());
        assert!(catalog.lookup(ProfileFamily::RectangularHollow, "SHS 80x80x4").is_ok());
        assert!(catalog.lookup(ProfileFamily::EqualAngle, "L 50x50x5").is_ok());
        assert!(catalog.lookup(ProfileFamily::WideFlangeB, "HEB 200").is_ok());
        assert!(catalog.lookup(ProfileFamily::SolidRound, "Ø40").is_ok());
        assert!(catalog.lookup(ProfileFamily::BulbFlat, "HP 120x7").is_ok());
    }
}
