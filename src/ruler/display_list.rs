//! Display list for ruler rendering
//!
//! Flattens a `RulerLayout` into the rows a renderer draws top to bottom,
//! with every height, width, offset and class already decided. The DOM
//! binding in `crate::dom` and plain JavaScript callers consume the same
//! structure.

use serde::{Deserialize, Serialize};
use crate::models::units::UnitSystem;
use super::layout::{RulerLayout, RulerRow};

/// Container name the rows are attached to, above the slider track
pub const DECORATION_CONTAINER: &str = "topDecoration";

/// Tick height for the outermost tick row of each half
pub const LONG_TICK_HEIGHT_PX: f64 = 6.0;

/// Tick height for every other tick row
pub const SHORT_TICK_HEIGHT_PX: f64 = 4.0;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RenderRowKind {
    Ticks,
    Labels,
}

/// One row of the ruler, ready to be turned into a `div`
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RenderRow {
    pub system: UnitSystem,
    pub kind: RenderRowKind,

    /// Row width in pixels
    pub width: f64,

    /// Percent offsets of each tick or label within the row
    pub positions: Vec<f64>,

    /// Label text, parallel to `positions` (empty for tick rows)
    #[serde(default)]
    pub labels: Vec<String>,

    /// CSS class names to apply
    pub classes: Vec<String>,

    /// Inline style
    pub style: String,
}

/// All rows of a dual-scale ruler
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RulerDisplayList {
    pub container: String,
    pub pixel_width: f64,
    pub rows: Vec<RenderRow>,
}

fn system_class(system: UnitSystem) -> &'static str {
    match system {
        UnitSystem::Metric => "metric",
        UnitSystem::English => "english",
    }
}

fn render_rows(system: UnitSystem, rows: &[RulerRow], pixel_width: f64) -> Vec<RenderRow> {
    let last = rows.len().saturating_sub(1);
    rows.iter()
        .enumerate()
        .map(|(i, row)| match row {
            RulerRow::Ticks(ticks) => {
                // The outermost rows at either end of a system's block get longer ticks
                let height = if i == 0 || i == last {
                    LONG_TICK_HEIGHT_PX
                } else {
                    SHORT_TICK_HEIGHT_PX
                };
                RenderRow {
                    system,
                    kind: RenderRowKind::Ticks,
                    width: pixel_width,
                    positions: ticks.positions(),
                    labels: Vec::new(),
                    classes: vec!["ruler-ticks".to_string(), system_class(system).to_string()],
                    style: format!("height: {}px;", height),
                }
            }
            RulerRow::Labels(labels) => RenderRow {
                system,
                kind: RenderRowKind::Labels,
                width: labels.pixel_width,
                positions: labels.positions(),
                labels: labels.labels.clone(),
                classes: vec!["ruler-labels".to_string(), system_class(system).to_string()],
                style: format!(
                    "height:1em; font-size:75%; color:#000; width: {}px;",
                    labels.pixel_width
                ),
            },
        })
        .collect()
}

impl RulerDisplayList {
    pub fn from_layout(layout: &RulerLayout) -> Self {
        let pixel_width = layout.range.pixel_width;
        let mut rows = render_rows(UnitSystem::Metric, &layout.metric, pixel_width);
        rows.extend(render_rows(UnitSystem::English, &layout.english, pixel_width));
        Self {
            container: DECORATION_CONTAINER.to_string(),
            pixel_width,
            rows,
        }
    }
}
