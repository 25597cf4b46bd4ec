//! Conservation restrictions for sightings
//!
//! Rare plants must not be shown publicly. The restrictions endpoint answers
//! with one record per taxon matching the name the user typed (common names
//! can match several plants); this module folds those records into one
//! status and decides how the visibility controls change.

use serde::{Deserialize, Serialize};
use super::errors::SightingError;

/// Endpoint answering restriction queries
pub const RESTRICTIONS_ENDPOINT: &str = "/plantshare/api/restrictions/";

/// Used in the dialog when the record names no state
pub const DEFAULT_REGION: &str = "New England";

/// Restriction dialog size in pixels (width, height)
pub const DIALOG_SIZE: (u32, u32) = (320, 400);

const DIALOG_TEMPLATE: &str = include_str!("templates/restricted_dialog.html.mustache");

/// One taxon record from the restrictions endpoint
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct TaxonRestriction {
    #[serde(default)]
    pub sightings_restricted: bool,

    #[serde(default)]
    pub sightings_flagged: bool,

    #[serde(default)]
    pub covered_state: Option<String>,
}

/// Combined restriction state for a plant name and location
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct RestrictionStatus {
    pub is_restricted: bool,
    pub is_flagged: bool,

    /// The name matched no plant in the database
    pub is_unknown: bool,

    /// State in which the plant is rare; empty when not known
    pub state: String,
}

impl RestrictionStatus {
    /// Status for an empty identification or location
    pub fn cleared() -> Self {
        Self::default()
    }

    /// Fold the taxon records for one lookup.
    ///
    /// No records means an unknown plant, which is kept private and
    /// flagged for review. Otherwise any restricted record restricts the
    /// sighting and any flagged record flags it.
    pub fn evaluate(records: &[TaxonRestriction]) -> Self {
        if records.is_empty() {
            return Self {
                is_restricted: true,
                is_flagged: true,
                is_unknown: true,
                state: String::new(),
            };
        }

        let mut status = Self::default();
        if let Some(restricted) = records.iter().find(|r| r.sightings_restricted) {
            status.is_restricted = true;
            status.is_flagged = restricted.sightings_flagged;
            status.state = restricted.covered_state.clone().unwrap_or_default();
        }
        if records.iter().any(|r| r.sightings_flagged) {
            status.is_flagged = true;
        }
        status
    }

    /// Parse and fold a raw JSON response body
    pub fn from_json(body: &str) -> Result<Self, SightingError> {
        let records: Vec<TaxonRestriction> = serde_json::from_str(body)?;
        Ok(Self::evaluate(&records))
    }
}

/// Sighting visibility choices
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Visibility {
    Public,
    Private,
}

/// Modal dialog explaining a restriction
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RestrictionDialog {
    pub html: String,
    pub width: u32,
    pub height: u32,
}

/// Changes to apply to the visibility controls and hidden fields
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct VisibilityUpdate {
    /// Show the "restricted" notices next to the form
    pub show_restriction_notice: bool,

    /// New value for the visibility select, `None` to leave it alone
    pub visibility: Option<Visibility>,

    /// Whether options other than PRIVATE may be chosen
    pub non_private_options_enabled: bool,

    /// New value of the hidden "approved" field, `None` to leave it alone
    pub approved: Option<bool>,

    /// Value of the hidden "flagged" field
    pub flagged: bool,

    pub dialog: Option<RestrictionDialog>,
}

#[derive(Serialize)]
struct DialogContext<'a> {
    unknown: bool,
    state: &'a str,
}

/// Render the dialog shown when a sighting becomes restricted
pub fn render_dialog(status: &RestrictionStatus) -> Result<RestrictionDialog, SightingError> {
    let state = if status.state.is_empty() {
        DEFAULT_REGION
    } else {
        status.state.as_str()
    };
    let template = mustache::compile_str(DIALOG_TEMPLATE)?;
    let html = template.render_to_string(&DialogContext {
        unknown: status.is_unknown,
        state,
    })?;
    Ok(RestrictionDialog {
        html,
        width: DIALOG_SIZE.0,
        height: DIALOG_SIZE.1,
    })
}

/// Decide how the form reacts to a restriction status.
///
/// A restricted sighting is forced private; showing the dialog also means
/// the plant or location was edited, so a previous approval is withdrawn.
/// Lifting a restriction only resets visibility on new sightings, leaving
/// saved choices of edited sightings alone.
pub fn visibility_update(
    status: &RestrictionStatus,
    show_dialog: bool,
    is_new_sighting: bool,
) -> Result<VisibilityUpdate, SightingError> {
    let update = if status.is_restricted {
        let dialog = if show_dialog {
            Some(render_dialog(status)?)
        } else {
            None
        };
        VisibilityUpdate {
            show_restriction_notice: true,
            visibility: Some(Visibility::Private),
            non_private_options_enabled: false,
            approved: show_dialog.then_some(false),
            flagged: status.is_flagged,
            dialog,
        }
    } else {
        VisibilityUpdate {
            show_restriction_notice: false,
            visibility: is_new_sighting.then_some(Visibility::Public),
            non_private_options_enabled: true,
            approved: Some(false),
            flagged: status.is_flagged,
            dialog: None,
        }
    };
    Ok(update)
}

/// Percent-encode a query value the way browsers' `encodeURIComponent` does
pub fn encode_uri_component(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9'
            | b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

/// Query URL for the restrictions on a plant at a location
pub fn restrictions_url(plant_name: &str, location: &str) -> String {
    format!(
        "{}?plant={}&location={}",
        RESTRICTIONS_ENDPOINT,
        encode_uri_component(plant_name),
        encode_uri_component(location)
    )
}
