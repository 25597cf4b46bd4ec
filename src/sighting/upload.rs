//! Photo uploads for a sighting
//!
//! The upload dialog reports progress through an `UploadHandler`. The form's
//! own handler, `PhotoGallery`, keeps the thumbnail strip, the list of photo
//! ids submitted with the sighting, and picks up a location from photos that
//! carry GPS data.

use serde::{Deserialize, Serialize};

/// Endpoint that rejects (deletes) an uploaded photo
pub const IMAGE_REJECT_ENDPOINT: &str = "/plantshare/api/image-reject/";

/// Shown in a gallery frame while its upload is in progress
pub const UPLOAD_SPINNER: &str = "/static/images/icons/preloaders-dot-net-lg.gif";

/// Metadata of a photo the server accepted
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PhotoInfo {
    pub id: u32,
    pub thumb: String,
    pub url: String,

    #[serde(default)]
    pub latitude: Option<f64>,

    #[serde(default)]
    pub longitude: Option<f64>,
}

impl PhotoInfo {
    /// `"lat, long"` when the photo was geotagged
    pub fn location(&self) -> Option<String> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(long)) => Some(format!("{}, {}", lat, long)),
            _ => None,
        }
    }
}

/// Notifications from the upload dialog
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum UploadEvent {
    Started,
    Completed(PhotoInfo),
    Error(String),
}

/// Receiver of upload notifications
pub trait UploadHandler {
    fn on_start_upload(&mut self);
    fn on_upload_complete(&mut self, info: &PhotoInfo);
    fn on_error(&mut self, message: &str);
}

/// Route one event to the matching handler method
pub fn dispatch<H: UploadHandler + ?Sized>(handler: &mut H, event: &UploadEvent) {
    match event {
        UploadEvent::Started => handler.on_start_upload(),
        UploadEvent::Completed(info) => handler.on_upload_complete(info),
        UploadEvent::Error(message) => handler.on_error(message),
    }
}

/// One frame of the thumbnail strip
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GalleryFrame {
    Uploading { spinner: String },
    Photo { id: u32, thumb_url: String, full_url: String },
}

impl GalleryFrame {
    fn photo_id(&self) -> Option<u32> {
        match self {
            GalleryFrame::Photo { id, .. } => Some(*id),
            GalleryFrame::Uploading { .. } => None,
        }
    }
}

/// Thumbnails and attached photo ids of the sighting being edited
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct PhotoGallery {
    pub frames: Vec<GalleryFrame>,

    /// Ids submitted with the form, in upload order
    pub attached: Vec<u32>,

    /// Location taken from the most recent geotagged photo, not yet applied
    pending_location: Option<String>,

    pub errors: Vec<String>,
}

impl PhotoGallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Location from a geotagged upload, handed out once
    pub fn take_location(&mut self) -> Option<String> {
        self.pending_location.take()
    }

    /// URL that rejects the photo on the server
    pub fn reject_url(id: u32) -> String {
        format!("{}{}", IMAGE_REJECT_ENDPOINT, id)
    }

    /// Drop a photo once the server confirmed the reject. Returns whether
    /// the photo was in the gallery.
    pub fn remove(&mut self, id: u32) -> bool {
        let before = self.frames.len();
        self.frames.retain(|frame| frame.photo_id() != Some(id));
        self.attached.retain(|attached| *attached != id);
        self.frames.len() != before
    }

    pub fn uploads_in_progress(&self) -> usize {
        self.frames
            .iter()
            .filter(|f| matches!(f, GalleryFrame::Uploading { .. }))
            .count()
    }
}

impl UploadHandler for PhotoGallery {
    fn on_start_upload(&mut self) {
        self.frames.push(GalleryFrame::Uploading {
            spinner: UPLOAD_SPINNER.to_string(),
        });
    }

    fn on_upload_complete(&mut self, info: &PhotoInfo) {
        log::debug!("uploaded sighting photo {} ({})", info.id, info.url);
        let frame = GalleryFrame::Photo {
            id: info.id,
            thumb_url: info.thumb.clone(),
            full_url: info.url.clone(),
        };
        // The newest spinner turns into the finished photo
        match self
            .frames
            .iter()
            .rposition(|f| matches!(f, GalleryFrame::Uploading { .. }))
        {
            Some(index) => self.frames[index] = frame,
            None => self.frames.push(frame),
        }
        self.attached.push(info.id);
        if let Some(location) = info.location() {
            self.pending_location = Some(location);
        }
    }

    fn on_error(&mut self, message: &str) {
        log::warn!("sighting photo upload failed: {}", message);
        self.errors.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(id: u32, geotagged: bool) -> PhotoInfo {
        PhotoInfo {
            id,
            thumb: format!("/thumbs/{}.jpg", id),
            url: format!("/photos/{}.jpg", id),
            latitude: geotagged.then_some(42.5),
            longitude: geotagged.then_some(-71.25),
        }
    }

    #[test]
    fn test_upload_replaces_spinner() {
        let mut gallery = PhotoGallery::new();
        dispatch(&mut gallery, &UploadEvent::Started);
        assert_eq!(gallery.uploads_in_progress(), 1);

        dispatch(&mut gallery, &UploadEvent::Completed(photo(7, false)));
        assert_eq!(gallery.uploads_in_progress(), 0);
        assert_eq!(gallery.frames.len(), 1);
        assert_eq!(gallery.attached, vec![7]);
        assert_eq!(gallery.take_location(), None);
    }

    #[test]
    fn test_geotagged_photo_sets_location_once() {
        let mut gallery = PhotoGallery::new();
        dispatch(&mut gallery, &UploadEvent::Started);
        dispatch(&mut gallery, &UploadEvent::Completed(photo(3, true)));
        assert_eq!(gallery.take_location().as_deref(), Some("42.5, -71.25"));
        assert_eq!(gallery.take_location(), None);
    }

    #[test]
    fn test_remove_photo() {
        let mut gallery = PhotoGallery::new();
        for id in [1, 2] {
            dispatch(&mut gallery, &UploadEvent::Started);
            dispatch(&mut gallery, &UploadEvent::Completed(photo(id, false)));
        }
        assert!(gallery.remove(1));
        assert!(!gallery.remove(1));
        assert_eq!(gallery.attached, vec![2]);
        assert_eq!(PhotoGallery::reject_url(2), "/plantshare/api/image-reject/2");
    }

    #[test]
    fn test_error_is_recorded() {
        let mut gallery = PhotoGallery::new();
        dispatch(&mut gallery, &UploadEvent::Error("too large".to_string()));
        assert_eq!(gallery.errors, vec!["too large".to_string()]);
        assert!(gallery.frames.is_empty());
    }

    #[test]
    fn test_event_json_shape() {
        let event: UploadEvent = serde_json::from_str(
            r#"{"event": "completed", "data": {"id": 9, "thumb": "t", "url": "u"}}"#,
        )
        .unwrap();
        assert!(matches!(event, UploadEvent::Completed(ref info) if info.id == 9 && info.latitude.is_none()));
    }

    #[test]
    fn test_photo_ids_are_32_bit() {
        let too_large = r#"{"event": "completed", "data": {"id": 4294967296, "thumb": "t", "url": "u"}}"#;
        assert!(serde_json::from_str::<UploadEvent>(too_large).is_err());

        let mut gallery = PhotoGallery::new();
        dispatch(&mut gallery, &UploadEvent::Started);
        dispatch(&mut gallery, &UploadEvent::Completed(photo(u32::MAX, false)));
        assert_eq!(gallery.attached, vec![u32::MAX]);
        assert!(gallery.remove(u32::MAX));
        assert!(gallery.attached.is_empty());
    }
}
