//! Location coordinates for sightings
//!
//! A location typed as a latitude/longitude pair is used directly; anything
//! else goes to the geocoder. Geocoded points are nudged by a small random
//! amount so that markers for the same town do not stack on the map.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use super::errors::SightingError;

/// Decimal places kept for stored coordinates
pub const DECIMAL_PLACES: i32 = 6;

/// Smallest marker offset in degrees (about 25 ft)
pub const MIN_OFFSET_DEGREES: f64 = 0.0001;

/// Random part of the marker offset in degrees (about 500 ft)
pub const MAX_OFFSET_DEGREES: f64 = 0.002;

static LAT_LONG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(-?\d{1,3}(?:\.\d{0,6})?) ?([nNsS]?)[, ]+(-?\d{1,3}(?:\.\d{0,6})?) ?([wWeE]?)$")
        .expect("latitude/longitude pattern is valid")
});

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

fn signed(value: &str, hemisphere: &str, negative: &[&str]) -> Option<f64> {
    let magnitude: f64 = value.trim_start_matches('-').parse().ok()?;
    let is_negative = value.starts_with('-')
        || negative.iter().any(|h| h.eq_ignore_ascii_case(hemisphere));
    Some(if is_negative { -magnitude } else { magnitude })
}

/// Recognise a typed `latitude, longitude` pair such as `42.36, -71.06`
/// or `42.36 N 71.06 W`. Returns `None` for place names.
pub fn parse_lat_long(text: &str) -> Option<Coordinates> {
    let captures = LAT_LONG.captures(text.trim())?;
    let latitude = signed(&captures[1], &captures[2], &["s"])?;
    let longitude = signed(&captures[3], &captures[4], &["w"])?;
    Some(Coordinates { latitude, longitude })
}

/// Round to the stored number of decimal places
pub fn round_coordinate(value: f64) -> f64 {
    let scale = 10f64.powi(DECIMAL_PLACES);
    (value * scale).round() / scale
}

/// Offset `coordinate` by `MIN + unit * MAX` degrees, `unit` in `[0, 1)`
pub fn offset_coordinate_with(coordinate: f64, unit: f64, negative: bool) -> f64 {
    let offset = round_coordinate(unit * MAX_OFFSET_DEGREES + MIN_OFFSET_DEGREES);
    let offset = if negative { -offset } else { offset };
    round_coordinate(coordinate + offset)
}

fn random_bytes() -> Result<[u8; 9], SightingError> {
    let mut buf = [0u8; 9];
    getrandom::getrandom(&mut buf).map_err(|e| SightingError::Random(e.to_string()))?;
    Ok(buf)
}

/// Offset a geocoded coordinate by a random amount in a random direction
pub fn offset_coordinate(coordinate: f64) -> Result<f64, SightingError> {
    let bytes = random_bytes()?;
    let mut word = [0u8; 8];
    word.copy_from_slice(&bytes[..8]);
    // 53 random bits give a uniform float in [0, 1)
    let unit = (u64::from_le_bytes(word) >> 11) as f64 / (1u64 << 53) as f64;
    let negative = bytes[8] & 1 == 1;
    Ok(offset_coordinate_with(coordinate, unit, negative))
}

/// Offset both halves of a geocoded point
pub fn offset_point(point: Coordinates) -> Result<Coordinates, SightingError> {
    Ok(Coordinates {
        latitude: offset_coordinate(point.latitude)?,
        longitude: offset_coordinate(point.longitude)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal_pair() {
        assert_eq!(
            parse_lat_long("42.3601, -71.0589"),
            Some(Coordinates { latitude: 42.3601, longitude: -71.0589 })
        );
        assert_eq!(
            parse_lat_long("42,71"),
            Some(Coordinates { latitude: 42.0, longitude: 71.0 })
        );
    }

    #[test]
    fn test_parse_hemispheres() {
        assert_eq!(
            parse_lat_long("42.36 N, 71.06 W"),
            Some(Coordinates { latitude: 42.36, longitude: -71.06 })
        );
        assert_eq!(
            parse_lat_long("33.9s 151.2e"),
            Some(Coordinates { latitude: -33.9, longitude: 151.2 })
        );
    }

    #[test]
    fn test_place_names_are_not_coordinates() {
        assert_eq!(parse_lat_long("Concord, MA"), None);
        assert_eq!(parse_lat_long("1234.5, 10"), None);
        assert_eq!(parse_lat_long("12345, 10"), None);
        assert_eq!(parse_lat_long(""), None);
    }

    #[test]
    fn test_offset_bounds() {
        let low = offset_coordinate_with(42.0, 0.0, false);
        assert!((low - 42.0001).abs() < 1e-9);
        let high = offset_coordinate_with(42.0, 0.999_999, true);
        assert!((high - (42.0 - 0.0021)).abs() < 1e-6);
    }

    #[test]
    fn test_random_offset_within_range() {
        for _ in 0..50 {
            let moved = offset_coordinate(-71.0).unwrap();
            let distance = (moved + 71.0).abs();
            assert!(distance >= MIN_OFFSET_DEGREES - 1e-9);
            assert!(distance <= MIN_OFFSET_DEGREES + MAX_OFFSET_DEGREES + 1e-9);
            assert_eq!(round_coordinate(moved), moved);
        }
    }
}
