//! New/edit sighting form behaviour
//!
//! `SightingForm` tracks the identification and location fields and turns
//! page events into `FormAction`s. The page performs the actions (AJAX,
//! geocoding, DOM updates) and feeds results back in through
//! `on_restrictions_result` and `on_geocoded`.

use serde::{Deserialize, Serialize};
use super::coordinates::{offset_point, parse_lat_long, Coordinates};
use super::errors::SightingError;
use super::restrictions::{visibility_update, RestrictionStatus, TaxonRestriction, VisibilityUpdate};

/// Something the page must do in response to a form event
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FormAction {
    SetSubmitEnabled { enabled: bool },
    CheckRestrictions { plant: String, location: String, show_dialog: bool },
    Geocode { location: String },
    SetCoordinates { latitude: f64, longitude: f64 },
    ApplyVisibility { update: VisibilityUpdate },
    PreventDefault,
}

impl FormAction {
    fn coordinates(point: Coordinates) -> Self {
        FormAction::SetCoordinates {
            latitude: point.latitude,
            longitude: point.longitude,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct SightingForm {
    identification: String,
    location: String,

    /// Last identification that was checked; re-checking it shows no dialog
    initial_identification: String,

    /// Last location that was geocoded
    initial_location: String,

    is_new_sighting: bool,
    status: RestrictionStatus,
}

impl SightingForm {
    pub fn new(is_new_sighting: bool) -> Self {
        Self {
            is_new_sighting,
            ..Default::default()
        }
    }

    pub fn status(&self) -> &RestrictionStatus {
        &self.status
    }

    pub fn is_complete(&self) -> bool {
        !self.identification.is_empty() && !self.location.is_empty()
    }

    /// Submit button change, if any. Typing may disable the button but
    /// never enables it; a blur or restriction check does that.
    fn submit_action(&self, allow_enable: bool) -> Option<FormAction> {
        if self.is_complete() {
            allow_enable.then_some(FormAction::SetSubmitEnabled { enabled: true })
        } else {
            Some(FormAction::SetSubmitEnabled { enabled: false })
        }
    }

    fn push_submit(&self, actions: &mut Vec<FormAction>, allow_enable: bool) {
        actions.extend(self.submit_action(allow_enable));
    }

    fn check(&self, show_dialog: bool) -> FormAction {
        FormAction::CheckRestrictions {
            plant: self.identification.clone(),
            location: self.location.clone(),
            show_dialog,
        }
    }

    /// Use typed coordinates directly, otherwise ask the geocoder
    fn locate(&self) -> FormAction {
        match parse_lat_long(&self.location) {
            Some(point) => FormAction::coordinates(point),
            None => FormAction::Geocode {
                location: self.location.clone(),
            },
        }
    }

    /// Apply a status and re-evaluate the submit button
    fn apply_status(
        &mut self,
        status: RestrictionStatus,
        show_dialog: bool,
    ) -> Result<Vec<FormAction>, SightingError> {
        let update = visibility_update(&status, show_dialog, self.is_new_sighting)?;
        self.status = status;
        let mut actions = vec![FormAction::ApplyVisibility { update }];
        self.push_submit(&mut actions, true);
        Ok(actions)
    }

    fn clear_restrictions(&mut self) -> Result<Vec<FormAction>, SightingError> {
        self.apply_status(RestrictionStatus::cleared(), true)
    }

    /// Page finished loading with the fields' saved values
    pub fn on_load(&mut self, identification: &str, location: &str) -> Vec<FormAction> {
        self.identification = identification.to_string();
        self.location = location.to_string();
        self.initial_identification = self.identification.clone();
        self.initial_location = self.location.clone();
        if self.is_complete() {
            vec![self.check(false)]
        } else {
            Vec::new()
        }
    }

    pub fn on_identification_blur(&mut self, value: &str) -> Vec<FormAction> {
        self.identification = value.to_string();
        let mut actions = Vec::new();
        self.push_submit(&mut actions, true);
        if !self.location.is_empty() {
            actions.push(self.check(value != self.initial_identification));
        }
        if !value.is_empty() {
            self.initial_identification = value.to_string();
        }
        actions
    }

    pub fn on_identification_keyup(
        &mut self,
        value: &str,
        enter: bool,
    ) -> Result<Vec<FormAction>, SightingError> {
        self.identification = value.to_string();
        let mut actions = Vec::new();
        self.push_submit(&mut actions, false);
        if value.is_empty() {
            actions.extend(self.clear_restrictions()?);
        } else if enter && !self.location.is_empty() {
            actions.push(self.check(true));
        }
        Ok(actions)
    }

    pub fn on_location_blur(&mut self, value: &str) -> Result<Vec<FormAction>, SightingError> {
        self.location = value.to_string();
        let mut actions = Vec::new();
        self.push_submit(&mut actions, true);
        if value.is_empty() {
            actions.extend(self.clear_restrictions()?);
            actions.push(FormAction::SetSubmitEnabled { enabled: false });
            return Ok(actions);
        }

        let changed = value != self.initial_location;
        if changed {
            actions.push(self.locate());
        }
        actions.push(self.check(changed));
        self.initial_location = value.to_string();
        Ok(actions)
    }

    pub fn on_location_keyup(&mut self, value: &str, enter: bool) -> Vec<FormAction> {
        self.location = value.to_string();
        let mut actions = Vec::new();
        self.push_submit(&mut actions, false);
        // Enter updates the map instead of submitting the form
        if enter && !value.is_empty() {
            actions.push(FormAction::PreventDefault);
            actions.push(self.locate());
            actions.push(self.check(true));
        }
        actions
    }

    /// The restrictions endpoint answered a `CheckRestrictions`
    pub fn on_restrictions_result(
        &mut self,
        records: &[TaxonRestriction],
        show_dialog: bool,
    ) -> Result<Vec<FormAction>, SightingError> {
        self.apply_status(RestrictionStatus::evaluate(records), show_dialog)
    }

    /// The geocoder answered a `Geocode`; the point is offset so markers of
    /// the same place stay distinguishable
    pub fn on_geocoded(&self, point: Coordinates) -> Result<Vec<FormAction>, SightingError> {
        Ok(vec![FormAction::coordinates(offset_point(point)?)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submit_states(actions: &[FormAction]) -> Vec<bool> {
        actions
            .iter()
            .filter_map(|a| match a {
                FormAction::SetSubmitEnabled { enabled } => Some(*enabled),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_load_checks_saved_values_quietly() {
        let mut form = SightingForm::new(false);
        let actions = form.on_load("Trillium", "Concord, MA");
        assert_eq!(
            actions,
            vec![FormAction::CheckRestrictions {
                plant: "Trillium".to_string(),
                location: "Concord, MA".to_string(),
                show_dialog: false,
            }]
        );
        assert!(SightingForm::new(true).on_load("", "Concord, MA").is_empty());
    }

    #[test]
    fn test_typing_never_enables_submit() {
        let mut form = SightingForm::new(true);
        form.on_load("", "Concord, MA");
        let actions = form.on_identification_keyup("Tri", false).unwrap();
        assert!(submit_states(&actions).is_empty());

        let actions = form.on_identification_blur("Trillium");
        assert_eq!(submit_states(&actions), vec![true]);
    }

    #[test]
    fn test_clearing_identification_disables_and_clears() {
        let mut form = SightingForm::new(true);
        form.on_load("Trillium", "Concord, MA");
        let actions = form.on_identification_keyup("", false).unwrap();
        assert_eq!(submit_states(&actions), vec![false, false]);
        assert!(actions.iter().any(|a| matches!(
            a,
            FormAction::ApplyVisibility { update } if !update.show_restriction_notice
        )));
    }

    #[test]
    fn test_blur_with_same_identification_hides_dialog() {
        let mut form = SightingForm::new(true);
        form.on_load("Trillium", "Concord, MA");
        let actions = form.on_identification_blur("Trillium");
        assert!(actions.contains(&FormAction::CheckRestrictions {
            plant: "Trillium".to_string(),
            location: "Concord, MA".to_string(),
            show_dialog: false,
        }));
        let actions = form.on_identification_blur("Lady's slipper");
        assert!(actions.iter().any(|a| matches!(a, FormAction::CheckRestrictions { show_dialog: true, .. })));
    }

    #[test]
    fn test_location_blur_geocodes_changes_only() {
        let mut form = SightingForm::new(true);
        form.on_load("Trillium", "Concord, MA");
        let actions = form.on_location_blur("Concord, MA").unwrap();
        assert!(!actions.iter().any(|a| matches!(a, FormAction::Geocode { .. })));

        let actions = form.on_location_blur("Lincoln, MA").unwrap();
        assert!(actions.contains(&FormAction::Geocode { location: "Lincoln, MA".to_string() }));

        let actions = form.on_location_blur("42.5, -71.25").unwrap();
        assert!(actions.contains(&FormAction::SetCoordinates { latitude: 42.5, longitude: -71.25 }));
    }

    #[test]
    fn test_empty_location_blur() {
        let mut form = SightingForm::new(true);
        form.on_load("Trillium", "Concord, MA");
        let actions = form.on_location_blur("").unwrap();
        assert_eq!(submit_states(&actions).last(), Some(&false));
        assert!(!actions.iter().any(|a| matches!(a, FormAction::CheckRestrictions { .. })));
    }

    #[test]
    fn test_location_enter_prevents_submit() {
        let mut form = SightingForm::new(true);
        form.on_load("Trillium", "");
        let actions = form.on_location_keyup("Lincoln, MA", true);
        assert_eq!(actions[0], FormAction::PreventDefault);
        assert!(actions.contains(&FormAction::Geocode { location: "Lincoln, MA".to_string() }));
        assert!(form.on_location_keyup("", true).iter().all(|a| *a != FormAction::PreventDefault));
    }

    #[test]
    fn test_restriction_result_forces_private() {
        let mut form = SightingForm::new(true);
        form.on_load("Trillium", "Concord, MA");
        let records = vec![TaxonRestriction {
            sightings_restricted: true,
            sightings_flagged: true,
            covered_state: Some("MA".to_string()),
        }];
        let actions = form.on_restrictions_result(&records, true).unwrap();
        assert!(form.status().is_restricted);
        match &actions[0] {
            FormAction::ApplyVisibility { update } => {
                assert!(update.flagged);
                assert!(update.dialog.as_ref().unwrap().html.contains("rare in MA"));
            }
            other => panic!("unexpected action {:?}", other),
        }
        assert_eq!(submit_states(&actions), vec![true]);
    }

    #[test]
    fn test_geocoded_point_is_offset() {
        let form = SightingForm::new(true);
        let actions = form
            .on_geocoded(Coordinates { latitude: 42.0, longitude: -71.0 })
            .unwrap();
        match actions[0] {
            FormAction::SetCoordinates { latitude, longitude } => {
                assert!((latitude - 42.0).abs() > 0.0);
                assert!((longitude + 71.0).abs() <= 0.0021 + 1e-9);
            }
            ref other => panic!("unexpected action {:?}", other),
        }
    }
}
