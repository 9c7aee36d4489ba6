use std::io::Write;

use assert_float_eq::*;
use tempfile::NamedTempFile;

use lunch_picker_rs::catalog::{Catalog, load_catalog};
use lunch_picker_rs::models::{CrowdType, Preferences};
use lunch_picker_rs::simulate::{SimulationConfig, run_simulation};

#[test]
fn test_shares_sum_to_one() {
    let catalog = Catalog::builtin();
    let config = SimulationConfig {
        spins: 2000,
        seed: 9,
        ..SimulationConfig::default()
    };
    let report = run_simulation(&catalog, &config).unwrap();

    let total: f64 = report.counts.iter().map(|c| c.share).sum();
    assert_float_absolute_eq!(total, 1.0, 1e-9);
    assert_eq!(report.history.len(), 5);
}

#[test]
fn test_draw_is_roughly_uniform() {
    let catalog = Catalog::builtin();
    let config = SimulationConfig {
        spins: 30_000,
        seed: 2024,
        preferences: Preferences::new(false, &["spicy"]),
        ..SimulationConfig::default()
    };
    let report = run_simulation(&catalog, &config).unwrap();

    assert_eq!(report.counts.len(), report.eligible);
    // Expected share is about 4%; a uniform draw stays well within 1.5 points.
    assert!(report.max_deviation() < 0.015, "deviation {}", report.max_deviation());
}

#[test]
fn test_crowd_filter_applies_to_simulation() {
    let catalog = Catalog::builtin();
    let config = SimulationConfig {
        spins: 500,
        crowd: Some(CrowdType::FatLoss),
        ..SimulationConfig::default()
    };
    let report = run_simulation(&catalog, &config).unwrap();

    for count in &report.counts {
        let item = catalog
            .items()
            .iter()
            .find(|i| i.name == count.name)
            .unwrap();
        assert!(item.suits(CrowdType::FatLoss));
    }
}

#[test]
fn test_simulation_over_loaded_catalog() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(
        r#"[
            {"name": "A", "emoji": "🥗", "category": "Salad", "isVegetarian": true, "tags": []},
            {"name": "B", "emoji": "🌶️", "category": "Hot pot", "isVegetarian": false, "tags": ["spicy"]},
            {"name": "C", "emoji": "🍜", "category": "Noodles", "isVegetarian": false, "tags": []}
        ]"#
        .as_bytes(),
    )
    .unwrap();

    let catalog = load_catalog(file.path()).unwrap();
    let config = SimulationConfig {
        spins: 1000,
        preferences: Preferences::new(false, &["spicy"]),
        ..SimulationConfig::default()
    };
    let report = run_simulation(&catalog, &config).unwrap();

    let names: Vec<&str> = report.counts.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(report.eligible, 2);
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"A") && names.contains(&"C"));
    assert_float_absolute_eq!(report.counts[0].share + report.counts[1].share, 1.0, 1e-9);
}
