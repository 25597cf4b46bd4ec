// Test ruler layout: tick density, label selection and label text

use gobotany_widgets::models::units::{UnitSpec, UnitSystem};
use gobotany_widgets::ruler::layout::{LabelRow, RulerConfig, RulerLayout, RulerLayoutEngine, RulerRange, RulerRow};
use gobotany_widgets::ruler::format::label_precision;
use gobotany_widgets::ruler::RulerError;

/// Engine with the standard pixel thresholds
fn engine(min_mm: f64, max_mm: f64, pixel_width: f64) -> RulerLayoutEngine {
    let range = RulerRange::new(min_mm, max_mm, pixel_width).expect("valid range");
    RulerLayoutEngine::new(range, RulerConfig::default())
}

fn tick_counts(rows: &[RulerRow]) -> Vec<f64> {
    rows.iter().filter_map(|r| r.as_ticks()).map(|t| t.count).collect()
}

fn label_rows(rows: &[RulerRow]) -> Vec<&LabelRow> {
    rows.iter().filter_map(|r| r.as_labels()).collect()
}

#[test]
fn test_one_metre_over_500px() {
    let engine = engine(0.0, 1000.0, 500.0);
    let rows = engine
        .compute_ruler(&UnitSystem::Metric.unit_specs(), false)
        .expect("metric layout");

    // 125 ticks fit: every centimetre and coarser
    assert_eq!(tick_counts(&rows), vec![100.0, 20.0, 10.0, 2.0, 1.0]);

    // 20 labels fit: every 5 cm
    let labels = label_rows(&rows);
    assert_eq!(labels.len(), 2);
    let unit = labels[1].labels.last().cloned().unwrap_or_default();
    assert!(unit == "cm" || unit == "m", "label unit was {}", unit);
    assert_eq!(unit, "cm");
    assert_eq!(labels[0].labels.len(), 21);
    assert_eq!(labels[0].labels[0], "");
    assert_eq!(labels[0].labels[1], "5");
    assert_eq!(labels[0].labels[20], "100");
    assert_eq!(labels[0].pixel_width, 500.0);
}

#[test]
fn test_one_metre_english_half_feet() {
    let engine = engine(0.0, 1000.0, 500.0);
    let rows = engine
        .compute_ruler(&UnitSystem::English.unit_specs(), true)
        .expect("english layout");

    let labels = label_rows(&rows);
    assert_eq!(labels[0].labels, vec!["", "½", "1", "½", "2", "½", "3"]);
    assert_eq!(labels[1].labels.last().map(String::as_str), Some("ft"));
    assert!((labels[0].pixel_width - 457.2).abs() < 1e-9);
}

#[test]
fn test_short_range_uses_millimetres() {
    // 0..20 mm over 600px: 24 labels fit, so every millimetre is labelled
    let engine = engine(0.0, 20.0, 600.0);
    let rows = engine
        .compute_ruler(&UnitSystem::Metric.unit_specs(), false)
        .expect("metric layout");
    let labels = label_rows(&rows);
    assert_eq!(labels[1].labels.last().map(String::as_str), Some("mm"));
    assert_eq!(labels[0].labels.len(), 21);
    assert_eq!(labels[0].labels[3], "3");
}

#[test]
fn test_offset_range_labels_count_from_origin() {
    // Labels count distance from the minimum, not absolute values
    let engine = engine(100.0, 150.0, 400.0);
    let rows = engine
        .compute_ruler(&UnitSystem::Metric.unit_specs(), false)
        .expect("metric layout");
    let labels = label_rows(&rows);
    assert_eq!(labels[0].labels[1], "5");
    assert_eq!(labels[1].labels.last().map(String::as_str), Some("mm"));
}

#[test]
fn test_no_label_when_nothing_fits() {
    // 30px holds a single label: the coarsest unit still yields floor(span) > 1
    let engine = engine(0.0, 5000.0, 30.0);
    let rows = engine
        .compute_ruler(&UnitSystem::Metric.unit_specs(), false)
        .expect("metric layout");
    assert!(label_rows(&rows).is_empty());
    // The tick pass is independent of the label pass
    assert!(!tick_counts(&rows).is_empty());
}

#[test]
fn test_tick_rows_never_below_one() {
    for (max, width) in [(1.0, 50.0), (10.0, 300.0), (250.0, 120.0), (1000.0, 500.0), (3000.0, 900.0)] {
        for system in [UnitSystem::Metric, UnitSystem::English] {
            let specs = system.unit_specs();
            let rows = engine(0.0, max, width)
                .compute_ruler(&specs, system.uses_vulgar_fractions())
                .expect("layout");
            let ticks = tick_counts(&rows);
            assert!(ticks.iter().all(|c| *c >= 1.0), "{:?}", ticks);
            assert!(ticks.iter().all(|c| *c <= width / 4.0), "{:?}", ticks);
            assert!(ticks.len() <= specs.len());
            assert!(label_rows(&rows).len() == 0 || label_rows(&rows).len() == 2);
        }
    }
}

#[test]
fn test_label_width_grows_with_pixel_width() {
    for system in [UnitSystem::Metric, UnitSystem::English] {
        let mut previous = 0.0;
        let mut width = 40.0;
        while width < 3000.0 {
            let rows = engine(0.0, 1000.0, width)
                .compute_ruler(&system.unit_specs(), system.uses_vulgar_fractions())
                .expect("layout");
            let total: f64 = label_rows(&rows).iter().map(|r| r.pixel_width).sum();
            assert!(total + 1e-9 >= previous, "{:?} at {}px: {} < {}", system, width, total, previous);
            previous = total;
            width += 37.0;
        }
    }
}

#[test]
fn test_metric_labels_parse_back() {
    for (max, width) in [(5.0, 400.0), (20.0, 600.0), (300.0, 500.0), (1000.0, 500.0), (4000.0, 900.0)] {
        let rows = engine(0.0, max, width)
            .compute_ruler(&UnitSystem::Metric.unit_specs(), false)
            .expect("layout");
        let labels = label_rows(&rows);
        if labels.is_empty() {
            continue;
        }
        // Find the granularity that produced the row from its width
        let count = (labels[0].labels.len() - 1) as f64;
        let spec = UnitSystem::Metric
            .unit_specs()
            .into_iter()
            .filter(|s| s.label.is_some())
            .find(|s| ((max / s.interval_length_mm).floor() - count).abs() < 1e-9)
            .expect("matching spec");
        let tolerance = 0.5 * 10f64.powi(-(label_precision(spec.label_step_multiplier) as i32));
        for (j, text) in labels[0].labels.iter().enumerate().skip(1) {
            let parsed: f64 = text.parse().expect("decimal label");
            let expected = j as f64 * spec.label_step_multiplier;
            assert!((parsed - expected).abs() <= tolerance, "{} vs {}", text, expected);
        }
    }
}

#[test]
fn test_custom_spec_labels_round_ties_up() {
    let engine = engine(0.0, 100.0, 500.0);

    let rows = engine
        .compute_ruler(&[UnitSpec::new(25.0, Some("cm"), 2.5)], false)
        .expect("layout");
    assert_eq!(label_rows(&rows)[0].labels, vec!["", "3", "5", "8", "10"]);

    let rows = engine
        .compute_ruler(&[UnitSpec::new(25.0, Some("cm"), 0.25)], false)
        .expect("layout");
    assert_eq!(label_rows(&rows)[0].labels, vec!["", "0.3", "0.5", "0.8", "1.0"]);
}

#[test]
fn test_zero_interval_rejected() {
    let engine = engine(0.0, 1000.0, 500.0);
    let specs = vec![
        UnitSpec::new(10.0, Some("cm"), 1.0),
        UnitSpec::new(0.0, Some("mm"), 1.0),
    ];
    match engine.compute_ruler(&specs, false) {
        Err(RulerError::InvalidUnitSpec { index, .. }) => assert_eq!(index, 1),
        other => panic!("expected InvalidUnitSpec, got {:?}", other),
    }
    let negative = vec![UnitSpec::new(-1.0, None, 1.0)];
    assert!(matches!(
        engine.compute_ruler(&negative, true),
        Err(RulerError::InvalidUnitSpec { .. })
    ));
}

#[test]
fn test_full_layout_threshold_config() {
    let range = RulerRange::new(0.0, 1000.0, 500.0).expect("valid range");
    let sparse = RulerConfig {
        min_pixels_per_tick: 50.0,
        min_pixels_per_label: 100.0,
    };
    let layout = RulerLayout::compute(range, sparse).expect("layout");
    // 10 ticks and 5 labels fit
    assert_eq!(tick_counts(&layout.metric), vec![10.0, 2.0, 1.0]);
    let labels = label_rows(&layout.metric);
    assert_eq!(labels[1].labels.last().map(String::as_str), Some("m"));
    assert_eq!(labels[0].labels, vec!["", "0.5", "1.0"]);
}
