//! Ruler slider layout
//!
//! A length slider drawn like a ruler: metric ticks and labels above the
//! track, English ones below it. This module computes the rows and the live
//! value text; `crate::dom::ruler_slider` puts them on the page.

pub mod errors;
pub mod format;
pub mod layout;
pub mod display_list;

pub use errors::RulerError;
pub use format::{bind_value_display, pretty_length, ValueDisplay};
pub use layout::{LabelRow, RulerConfig, RulerLayout, RulerLayoutEngine, RulerRange, RulerRow, TickRow};
pub use display_list::{RenderRow, RenderRowKind, RulerDisplayList};
