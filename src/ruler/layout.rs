//! Ruler layout computation
//!
//! Given the slider's millimetre range and its pixel width, decides which
//! tick densities and which single label granularity fit on screen for a
//! unit system. Nothing here touches the DOM; see `crate::dom` for that.

use serde::{Deserialize, Serialize};
use crate::models::units::{UnitSpec, UnitSystem};
use super::errors::RulerError;
use super::format::number_label;

/// Pixel density limits for ruler rows
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct RulerConfig {
    /// Closest two ticks may be drawn, in pixels
    pub min_pixels_per_tick: f64,

    /// Closest two labels may be drawn, in pixels
    pub min_pixels_per_label: f64,
}

impl Default for RulerConfig {
    fn default() -> Self {
        Self {
            min_pixels_per_tick: 4.0,
            min_pixels_per_label: 25.0,
        }
    }
}

/// Slider range and on-screen width; fixed for the life of a ruler
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct RulerRange {
    pub min_mm: f64,
    pub max_mm: f64,
    pub pixel_width: f64,
}

impl RulerRange {
    pub fn new(min_mm: f64, max_mm: f64, pixel_width: f64) -> Result<Self, RulerError> {
        if !min_mm.is_finite() || !max_mm.is_finite() {
            return Err(RulerError::InvalidRange(format!(
                "bounds must be finite (min {}, max {})",
                min_mm, max_mm
            )));
        }
        if max_mm <= min_mm {
            return Err(RulerError::InvalidRange(format!(
                "max {} mm must exceed min {} mm",
                max_mm, min_mm
            )));
        }
        if !(pixel_width.is_finite() && pixel_width > 0.0) {
            return Err(RulerError::InvalidRange(format!(
                "pixel width {} must be positive",
                pixel_width
            )));
        }
        Ok(Self { min_mm, max_mm, pixel_width })
    }

    pub fn span_mm(&self) -> f64 {
        self.max_mm - self.min_mm
    }

    /// Clamp a value into the slider range
    pub fn clamp(&self, value_mm: f64) -> f64 {
        if value_mm.is_nan() {
            return self.min_mm;
        }
        value_mm.clamp(self.min_mm, self.max_mm)
    }

    /// Position of a value along the track, in percent of the width
    pub fn percent(&self, value_mm: f64) -> f64 {
        (self.clamp(value_mm) - self.min_mm) / self.span_mm() * 100.0
    }
}

/// Percent offsets of `marks` evenly spread marks, first at 0% and last at 100%.
///
/// `marks` may be fractional: the inner marks keep the exact unit spacing
/// and the final mark is pinned to the right edge.
pub fn rule_positions(marks: f64) -> Vec<f64> {
    if marks <= 1.0 {
        return vec![50.0];
    }
    let interval = 100.0 / (marks - 1.0);
    let mut positions = vec![0.0];
    let mut i = 1;
    while (i as f64) < marks - 1.0 {
        positions.push(interval * i as f64);
        i += 1;
    }
    positions.push(100.0);
    positions
}

/// A row of equally spaced ticks across the whole ruler
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct TickRow {
    /// Number of unit intervals across the span (may be fractional)
    pub count: f64,
}

impl TickRow {
    /// Marks drawn, counting the one at the origin
    pub fn mark_count(&self) -> f64 {
        self.count + 1.0
    }

    pub fn positions(&self) -> Vec<f64> {
        rule_positions(self.mark_count())
    }
}

/// A strip of text labels, left to right, one per unit subdivision
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LabelRow {
    /// Width of the strip; shorter than the ruler when the span is not a
    /// whole number of units
    pub pixel_width: f64,
    pub labels: Vec<String>,
}

impl LabelRow {
    pub fn positions(&self) -> Vec<f64> {
        rule_positions(self.labels.len() as f64)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RulerRow {
    Ticks(TickRow),
    Labels(LabelRow),
}

impl RulerRow {
    pub fn as_ticks(&self) -> Option<&TickRow> {
        match self {
            RulerRow::Ticks(row) => Some(row),
            RulerRow::Labels(_) => None,
        }
    }

    pub fn as_labels(&self) -> Option<&LabelRow> {
        match self {
            RulerRow::Labels(row) => Some(row),
            RulerRow::Ticks(_) => None,
        }
    }
}

/// Computes tick and label rows for one ruler
pub struct RulerLayoutEngine {
    range: RulerRange,
    config: RulerConfig,
}

impl RulerLayoutEngine {
    pub fn new(range: RulerRange, config: RulerConfig) -> Self {
        Self { range, config }
    }

    pub fn range(&self) -> &RulerRange {
        &self.range
    }

    /// Most ticks the width can hold
    pub fn max_ticks(&self) -> f64 {
        self.range.pixel_width / self.config.min_pixels_per_tick
    }

    /// Most labels the width can hold
    pub fn max_labels(&self) -> f64 {
        self.range.pixel_width / self.config.min_pixels_per_label
    }

    /// Compute the rows for one unit system.
    ///
    /// `unit_specs` must be ordered finest to coarsest. Tick rows come first,
    /// in that order, followed by at most one pair of label rows (numbers,
    /// then the unit name under the last number).
    pub fn compute_ruler(
        &self,
        unit_specs: &[UnitSpec],
        use_vulgar_fractions: bool,
    ) -> Result<Vec<RulerRow>, RulerError> {
        if let Some((index, spec)) = unit_specs.iter().enumerate().find(|(_, s)| !s.is_valid()) {
            return Err(RulerError::InvalidUnitSpec {
                index,
                interval_length_mm: spec.interval_length_mm,
            });
        }

        let span = self.range.span_mm();
        let max_ticks = self.max_ticks();
        let max_labels = self.max_labels();
        let mut rows = Vec::new();

        for spec in unit_specs {
            let count = span / spec.interval_length_mm;
            if count > max_ticks {
                continue;
            }
            // Coarser units fit even fewer ticks
            if count < 1.0 {
                break;
            }
            rows.push(RulerRow::Ticks(TickRow { count }));
        }

        for spec in unit_specs {
            let Some(unit) = spec.label.as_deref() else {
                continue;
            };
            let count = (span / spec.interval_length_mm).floor();
            if count > max_labels {
                continue;
            }

            let steps = count as u64;
            let mut numbers = Vec::with_capacity(steps as usize + 1);
            numbers.push(String::new());
            numbers.extend(
                (1..=steps).map(|j| number_label(j, spec.label_step_multiplier, use_vulgar_fractions)),
            );
            let mut units = vec![String::new(); steps as usize];
            units.push(unit.to_string());

            let pixel_width = self.range.pixel_width * count * spec.interval_length_mm / span;
            log::debug!(
                "ruler labels: {} x {} {} over {:.1}px",
                steps,
                spec.label_step_multiplier,
                unit,
                pixel_width
            );
            rows.push(RulerRow::Labels(LabelRow { pixel_width, labels: numbers }));
            rows.push(RulerRow::Labels(LabelRow { pixel_width, labels: units }));
            break;
        }

        Ok(rows)
    }
}

/// Both halves of a dual-scale ruler
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RulerLayout {
    pub range: RulerRange,

    /// Drawn above the slider track, finest ticks first
    pub metric: Vec<RulerRow>,

    /// Drawn below the metric rows, reversed so labels sit at the bottom
    pub english: Vec<RulerRow>,
}

impl RulerLayout {
    /// Lay out the metric and English halves with the standard unit tables
    pub fn compute(range: RulerRange, config: RulerConfig) -> Result<Self, RulerError> {
        let engine = RulerLayoutEngine::new(range, config);
        let metric = engine.compute_ruler(
            &UnitSystem::Metric.unit_specs(),
            UnitSystem::Metric.uses_vulgar_fractions(),
        )?;
        let mut english = engine.compute_ruler(
            &UnitSystem::English.unit_specs(),
            UnitSystem::English.uses_vulgar_fractions(),
        )?;
        english.reverse();
        Ok(Self { range, metric, english })
    }

    pub fn rows_for(&self, system: UnitSystem) -> &[RulerRow] {
        match system {
            UnitSystem::Metric => &self.metric,
            UnitSystem::English => &self.english,
        }
    }
}
