//! Text formatting for ruler labels and the live value readout

use serde::{Deserialize, Serialize};
use crate::models::units::LengthUnit;

/// Glyphs for eighths of a unit, indexed by the number of eighths.
/// Index 0 is empty: a whole number is shown instead.
pub const VULGAR_EIGHTHS: [&str; 8] = ["", "⅛", "¼", "⅜", "½", "⅝", "¾", "⅞"];

/// Fraction glyph for `eighths` (taken modulo 8)
pub fn vulgar_fraction(eighths: u32) -> &'static str {
    VULGAR_EIGHTHS[(eighths % 8) as usize]
}

/// Nearest eighth of `value`, reduced to `0..8`
pub fn nearest_eighth(value: f64) -> u32 {
    (8.0 * value).round().rem_euclid(8.0) as u32
}

/// Decimal places used for metric labels with the given step
pub fn label_precision(label_step_multiplier: f64) -> usize {
    if label_step_multiplier < 1.0 {
        1
    } else {
        0
    }
}

/// Text of the `step`-th number label of a ruler row.
///
/// English rows show a fraction glyph whenever the value is not a whole
/// number of units (to the nearest eighth) and the whole part otherwise.
/// Metric rows use a fixed decimal point, with ties rounded away from zero.
pub fn number_label(step: u64, label_step_multiplier: f64, use_vulgar_fractions: bool) -> String {
    let value = step as f64 * label_step_multiplier;
    if use_vulgar_fractions {
        match nearest_eighth(value) {
            0 => format!("{}", value.floor() as i64),
            eighths => vulgar_fraction(eighths).to_string(),
        }
    } else {
        let precision = label_precision(label_step_multiplier);
        let scale = 10f64.powi(precision as i32);
        format!("{:.*}", precision, (value * scale).round() / scale)
    }
}

/// Strip trailing zeros (and a dangling decimal point) from a fixed-point string
fn trim_decimal(mut text: String) -> String {
    if text.contains('.') {
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }
    if text == "-0" {
        text = "0".to_string();
    }
    text
}

fn decimals_for(unit: LengthUnit) -> usize {
    match unit {
        LengthUnit::Metre => 2,
        _ => 1,
    }
}

/// Human readable length, e.g. `"1.25 m"`, `"3⅜ in"`
pub fn pretty_length(unit: LengthUnit, value_mm: f64) -> String {
    let amount = unit.convert_mm(value_mm);
    let number = if unit == LengthUnit::Inch {
        let mut whole = amount.floor();
        let mut eighths = ((amount - whole) * 8.0).round() as u32;
        if eighths == 8 {
            whole += 1.0;
            eighths = 0;
        }
        let fraction = vulgar_fraction(eighths);
        if whole == 0.0 && eighths != 0 {
            fraction.to_string()
        } else {
            format!("{}{}", whole as i64, fraction)
        }
    } else {
        trim_decimal(format!("{:.*}", decimals_for(unit), amount))
    };
    format!("{} {}", number, unit.symbol())
}

/// Text shown next to the slider handles for the current value
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ValueDisplay {
    /// Metres, centimetres and millimetres, one per line
    pub metric_lines: Vec<String>,

    /// `metric_lines` joined with newlines
    pub metric_text: String,

    /// Inches with eighth fractions
    pub english_text: String,
}

/// Format the current slider value. Pure: the caller updates the DOM.
pub fn bind_value_display(current_value_mm: f64) -> ValueDisplay {
    let metric_lines: Vec<String> = [LengthUnit::Metre, LengthUnit::Centimetre, LengthUnit::Millimetre]
        .iter()
        .map(|unit| pretty_length(*unit, current_value_mm))
        .collect();
    ValueDisplay {
        metric_text: metric_lines.join("\n"),
        metric_lines,
        english_text: pretty_length(LengthUnit::Inch, current_value_mm),
    }
}
