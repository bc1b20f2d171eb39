use serde_json::{Map, Value};

use crate::models::UNKNOWN;

use super::gps::GpsFix;

/// Coarse country/region/city attribution for a coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPlace {
    pub country: String,
    pub region: String,
    pub city: String,
}

/// Turns a coordinate into a place. The built-in implementation is a
/// hard-coded bounding-box table; a real reverse geocoder can be swapped
/// in here without touching the rest of the parser.
pub trait LocationResolver: Send + Sync {
    fn resolve(&self, latitude: f64, longitude: f64) -> Option<ResolvedPlace>;
}

/// One rectangular region and the place it maps to.
#[derive(Debug, Clone)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lng_min: f64,
    pub lng_max: f64,
    pub country: &'static str,
    pub region: &'static str,
    pub city: &'static str,
}

impl BoundingBox {
    fn contains(&self, lat: f64, lng: f64) -> bool {
        lat >= self.lat_min && lat <= self.lat_max && lng >= self.lng_min && lng <= self.lng_max
    }
}

/// First-match-wins lookup over a fixed box list. Only the two deployment
/// regions are recognized; everything else resolves to no place.
pub struct BoundingBoxResolver {
    boxes: Vec<BoundingBox>,
}

impl Default for BoundingBoxResolver {
    fn default() -> Self {
        Self {
            boxes: vec![
                BoundingBox {
                    lat_min: -18.0,
                    lat_max: -15.0,
                    lng_min: 30.0,
                    lng_max: 33.0,
                    country: "Zimbabwe",
                    region: "Harare Province",
                    city: "Harare",
                },
                BoundingBox {
                    lat_min: -40.0,
                    lat_max: -35.0,
                    lng_min: 140.0,
                    lng_max: 150.0,
                    country: "Australia",
                    region: "Victoria",
                    city: "Melbourne",
                },
            ],
        }
    }
}

impl LocationResolver for BoundingBoxResolver {
    fn resolve(&self, latitude: f64, longitude: f64) -> Option<ResolvedPlace> {
        self.boxes
            .iter()
            .find(|b| b.contains(latitude, longitude))
            .map(|b| ResolvedPlace {
                country: b.country.to_string(),
                region: b.region.to_string(),
                city: b.city.to_string(),
            })
    }
}

/// The location block of a parsed submission.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationSummary {
    pub location: String,
    pub country: String,
    pub region: String,
    pub city: String,
}

impl Default for LocationSummary {
    fn default() -> Self {
        Self {
            location: UNKNOWN.to_string(),
            country: UNKNOWN.to_string(),
            region: UNKNOWN.to_string(),
            city: UNKNOWN.to_string(),
        }
    }
}

/// Best-effort location, in priority order: a GPS fix, then an explicit
/// `metadata.location` string, then a `district` form field (deployments
/// without GPS are all in Zimbabwe).
pub fn infer(
    fix: Option<&GpsFix>,
    metadata: Option<&Map<String, Value>>,
    data: Option<&Map<String, Value>>,
    resolver: &dyn LocationResolver,
) -> LocationSummary {
    if let Some(fix) = fix {
        let location = fix.coordinates();
        return match resolver.resolve(fix.latitude, fix.longitude) {
            Some(place) => LocationSummary {
                location,
                country: place.country,
                region: place.region,
                city: place.city,
            },
            None => LocationSummary {
                location,
                ..LocationSummary::default()
            },
        };
    }

    if let Some(location) = clean_str(metadata, "location") {
        return LocationSummary {
            location,
            ..LocationSummary::default()
        };
    }

    if let Some(district) = clean_str(data, "district") {
        return LocationSummary {
            location: district.clone(),
            country: "Zimbabwe".to_string(),
            region: district,
            city: UNKNOWN.to_string(),
        };
    }

    tracing::debug!("No location source in submission");
    LocationSummary::default()
}

fn clean_str(obj: Option<&Map<String, Value>>, key: &str) -> Option<String> {
    obj?.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
