//! Length units and ruler granularities
//!
//! Every length handled by the widgets is carried in millimetres. This module
//! defines the display units a length can be rendered in and the ordered
//! tables of tick/label granularities the ruler chooses from.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// Millimetres per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Millimetres per foot
pub const MM_PER_FOOT: f64 = 304.8;

/// Display units understood by `pretty_length`
#[wasm_bindgen]
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde_repr::Serialize_repr, serde_repr::Deserialize_repr)]
pub enum LengthUnit {
    Millimetre = 0,
    Centimetre = 1,
    Metre = 2,
    Inch = 3,
    Foot = 4,
}

impl LengthUnit {
    /// Millimetres in one of this unit
    pub fn mm_per_unit(&self) -> f64 {
        match self {
            LengthUnit::Millimetre => 1.0,
            LengthUnit::Centimetre => 10.0,
            LengthUnit::Metre => 1000.0,
            LengthUnit::Inch => MM_PER_INCH,
            LengthUnit::Foot => MM_PER_FOOT,
        }
    }

    /// Short symbol shown next to values ("mm", "in", ...)
    pub fn symbol(&self) -> &'static str {
        match self {
            LengthUnit::Millimetre => "mm",
            LengthUnit::Centimetre => "cm",
            LengthUnit::Metre => "m",
            LengthUnit::Inch => "in",
            LengthUnit::Foot => "ft",
        }
    }

    /// Parse a unit symbol as used in page templates
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "mm" => Some(LengthUnit::Millimetre),
            "cm" => Some(LengthUnit::Centimetre),
            "m" => Some(LengthUnit::Metre),
            "in" => Some(LengthUnit::Inch),
            "ft" => Some(LengthUnit::Foot),
            _ => None,
        }
    }

    /// Whether this unit is part of the English (imperial) system
    pub fn is_english(&self) -> bool {
        matches!(self, LengthUnit::Inch | LengthUnit::Foot)
    }

    /// Convert a millimetre length into this unit
    pub fn convert_mm(&self, value_mm: f64) -> f64 {
        value_mm / self.mm_per_unit()
    }
}

/// One candidate tick/label granularity of a ruler
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UnitSpec {
    /// Distance between two adjacent ticks, in millimetres
    pub interval_length_mm: f64,

    /// Unit string written under the last label, `None` for granularities
    /// too fine to label (tenths of a millimetre, sixty-fourths)
    pub label: Option<String>,

    /// Value added per label step, in the labelled unit
    pub label_step_multiplier: f64,
}

impl UnitSpec {
    pub fn new(interval_length_mm: f64, label: Option<&str>, label_step_multiplier: f64) -> Self {
        Self {
            interval_length_mm,
            label: label.map(str::to_string),
            label_step_multiplier,
        }
    }

    /// A granularity is usable only with a finite, positive interval
    pub fn is_valid(&self) -> bool {
        self.interval_length_mm.is_finite() && self.interval_length_mm > 0.0
    }
}

/// The two unit systems drawn on a ruler
#[wasm_bindgen]
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde_repr::Serialize_repr, serde_repr::Deserialize_repr)]
pub enum UnitSystem {
    Metric = 0,
    English = 1,
}

impl UnitSystem {
    /// Granularities ordered from finest to coarsest
    pub fn unit_specs(&self) -> Vec<UnitSpec> {
        match self {
            UnitSystem::Metric => vec![
                UnitSpec::new(0.1, None, 0.1),
                UnitSpec::new(0.5, Some("mm"), 0.5),
                UnitSpec::new(1.0, Some("mm"), 1.0),
                UnitSpec::new(5.0, Some("mm"), 5.0),
                UnitSpec::new(10.0, Some("cm"), 1.0),
                UnitSpec::new(50.0, Some("cm"), 5.0),
                UnitSpec::new(100.0, Some("cm"), 10.0),
                UnitSpec::new(500.0, Some("m"), 0.5),
                UnitSpec::new(1000.0, Some("m"), 1.0),
            ],
            UnitSystem::English => vec![
                UnitSpec::new(0.396875, None, 0.0625), // sixty-fourths
                UnitSpec::new(3.175, Some("in"), 0.125), // eighths
                UnitSpec::new(6.35, Some("in"), 0.25),
                UnitSpec::new(25.4, Some("in"), 1.0),
                UnitSpec::new(152.4, Some("ft"), 0.5),
                UnitSpec::new(304.8, Some("ft"), 1.0),
            ],
        }
    }

    /// English labels are written with vulgar fractions
    pub fn uses_vulgar_fractions(&self) -> bool {
        matches!(self, UnitSystem::English)
    }
}
