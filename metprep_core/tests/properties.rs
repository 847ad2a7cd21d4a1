//! End-to-end checks of the calculators through the public API.

use approx::assert_relative_eq;

use metprep_core::calculations::grain_size::{self, diameter_to_number, intercept, number_to_diameter, planimetric};
use metprep_core::calculations::mold_compatibility::{self, SampleBox};
use metprep_core::calculations::polishing_time::lookup;
use metprep_core::calculations::procedure_time::{estimate, ProcedureSelection};
use metprep_core::materials::{AbrasiveSize, GrindingGrit, MaterialClass, MoldSize};
use metprep_core::units::TimeRange;
use metprep_core::{run, CalculationItem, Worksheet};

const RANGE_MSG: &str = "Calculated grain size number is outside ASTM E112 range (0-14)";

#[test]
fn grain_size_round_trip_below_unit_threshold() {
    // Produced diameters stay below 0.1 mm, so they are read back as mm
    for m in [100.0, 200.0, 500.0, 1000.0] {
        for tenth in 80..=140 {
            let g = tenth as f64 / 10.0;
            let forward = number_to_diameter(g, m).unwrap();
            let d = forward.diameter_mm.unwrap();
            assert!(d < 0.1);
            let back = diameter_to_number(d, m).unwrap();
            assert_relative_eq!(back.astm_number, g, epsilon = 1e-9);
        }
    }
}

#[test]
fn grain_size_five_at_100x() {
    let r = number_to_diameter(5.0, 100.0).unwrap();
    assert_eq!(r.grains_per_in2, 16.0);
    let lines = r.lines();
    assert_eq!(lines[0].value, "5.0");
    assert_eq!(lines[1].value, "16");
    assert_eq!(lines[2].value, "0.250 mm");
}

#[test]
fn grain_size_results_never_clamped() {
    let err = intercept(100.0, 25.0, 100.0).unwrap_err();
    assert_eq!(err.user_message(), RANGE_MSG);

    let err = planimetric(50.0, 0.5, 100.0).unwrap_err();
    assert_eq!(err.user_message(), RANGE_MSG);
    assert_eq!(err.to_result_line().label, "Error");
}

#[test]
fn grain_size_successful_results_in_range() {
    let inputs = [
        r#"{ "method": "diameter-to-number", "diameter": 0.03 }"#,
        r#"{ "method": "diameter-to-number", "diameter": 45, "magnification": 200 }"#,
        r#"{ "method": "intercept", "intercept_count": 40, "intercept_length_mm": 500 }"#,
        r#"{ "method": "planimetric", "grain_count": 300, "test_area_mm2": 5000, "magnification": 400 }"#,
    ];
    for json in inputs {
        let input: grain_size::GrainSizeInput = serde_json::from_str(json).unwrap();
        let r = grain_size::calculate(&input).unwrap();
        assert!((0.0..=14.0).contains(&r.astm_number), "{json}: {}", r.astm_number);
        assert_relative_eq!(r.grains_per_in2, 2f64.powf(r.astm_number - 1.0), max_relative = 1e-12);
    }
}

#[test]
fn mold_check_three_four_five() {
    let sample = SampleBox {
        label: String::new(),
        length_mm: 20.0,
        width_mm: 15.0,
        height_mm: 10.0,
    };
    let r = mold_compatibility::calculate(&sample).unwrap();
    assert_relative_eq!(r.diagonal_mm, 25.0);
    assert!(!r.fits[0].fits);
    assert_relative_eq!(r.fits[0].clearance_mm, -3.6, epsilon = 1e-9);
    assert!(r.fits[1].fits);
    assert_relative_eq!(r.fits[1].clearance_mm, 2.75, epsilon = 1e-9);
    assert_eq!(r.recommended, Some(MoldSize::OneAndQuarterInch));
}

#[test]
fn polishing_lookup_is_exact() {
    assert!(lookup(MaterialClass::Soft, AbrasiveSize::Micron9).is_none());
    let rec = lookup(MaterialClass::Hard, AbrasiveSize::Micron1).unwrap();
    assert_eq!(rec.time_range, TimeRange::new(2.0, 4.0));
    assert_eq!(rec.cloth_type, "GOLD PAD or ATLANTIS");
}

#[test]
fn procedure_totals_are_sums() {
    let sel = ProcedureSelection {
        label: String::new(),
        material: MaterialClass::Hard,
        start_grit: GrindingGrit::Grit240,
        include_optional_grinding: false,
        include_mounting: false,
        include_etching: false,
        include_cleaning: true,
    };
    let est = estimate(&sel);
    assert_eq!(est.grinding, TimeRange::new(120.0, 240.0));
    assert_eq!(est.polishing, TimeRange::new(16.0, 27.0));
    assert_eq!(est.total, TimeRange::new(141.0, 272.0));

    for material in MaterialClass::ALL {
        for start_grit in GrindingGrit::SEQUENCE {
            let sel = ProcedureSelection {
                material,
                start_grit,
                include_optional_grinding: true,
                include_mounting: true,
                include_etching: true,
                include_cleaning: true,
                ..sel.clone()
            };
            let est = estimate(&sel);
            assert_relative_eq!(est.total.min, est.grinding.min + est.polishing.min + 17.0);
            assert_relative_eq!(est.total.max, est.grinding.max + est.polishing.max + 17.0);
            assert!(est.total.min <= est.total.max);
        }
    }
}

#[test]
fn worksheet_from_json_file_shape() {
    let json = r#"{
        "version": "0.1.0",
        "title": "Mixed",
        "items": [
            { "type": "MoldCompatibility", "label": "tall", "length_mm": 10, "width_mm": 10, "height_mm": 16 },
            { "type": "MountingMaterial", "mounting_type": "castable", "mold": { "diameter_mm": 40, "height_mm": 25 } },
            { "type": "GritConversion", "scale": "micron", "value": "46" }
        ]
    }"#;
    let sheet: Worksheet = serde_json::from_str(json).unwrap();
    let report = sheet.evaluate();
    assert_eq!(report.failed(), 0);

    // No standard mold fits a 16 mm tall sample
    let lines = report.entries[0].lines();
    assert_eq!(lines[0].label, "Sample Too Large");
}

#[test]
fn procedure_starting_at_optional_grit_skips_grinding() {
    let item: CalculationItem = serde_json::from_str(
        r#"{ "type": "ProcedureTime", "material": "soft", "start_grit": "800" }"#,
    )
    .unwrap();
    let out = run(&item).unwrap();
    assert_eq!(out.lines()[2].value, "0 sec - 0 sec");
}
