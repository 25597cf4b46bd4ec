//! PlantShare sighting form
//!
//! Decision logic for posting a sighting: when the form may be submitted,
//! how conservation restrictions change its visibility, where the sighting
//! is on the map, and which photos go with it.

pub mod errors;
pub mod restrictions;
pub mod coordinates;
pub mod upload;
pub mod form;

pub use errors::SightingError;
pub use restrictions::{restrictions_url, visibility_update, RestrictionStatus, TaxonRestriction, Visibility, VisibilityUpdate};
pub use coordinates::{offset_coordinate, parse_lat_long, Coordinates};
pub use upload::{dispatch, PhotoGallery, PhotoInfo, UploadEvent, UploadHandler};
pub use form::{FormAction, SightingForm};
