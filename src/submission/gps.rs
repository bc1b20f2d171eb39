use serde_json::{Map, Value};

use crate::models::{GpsSource, RawSubmission};

/// A usable coordinate pair and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct GpsFix {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: Option<f64>,
    pub source: GpsSource,
}

impl GpsFix {
    /// Display form, fixed to six decimal places.
    pub fn coordinates(&self) -> String {
        format!("{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// Walk the known coordinate sources in priority order; the first rung
/// with both coordinates populated wins and is recorded as provenance.
pub fn extract(raw: &RawSubmission) -> Option<GpsFix> {
    if let Some(fix) = from_columns(raw) {
        return Some(fix);
    }

    let data = raw.data_object()?;
    if let Some(fix) = from_object(data.get("gps_location"), "lat", "lng") {
        return Some(fix);
    }
    from_object(data.get("gps"), "latitude", "longitude")
}

/// Top-level latitude/longitude columns, as written by the ingestion store.
fn from_columns(raw: &RawSubmission) -> Option<GpsFix> {
    let latitude = coordinate(raw.latitude.as_ref()?)?;
    let longitude = coordinate(raw.longitude.as_ref()?)?;
    Some(GpsFix {
        latitude,
        longitude,
        accuracy: accuracy_of(&raw.extra, "gps_accuracy"),
        source: GpsSource::Database,
    })
}

fn from_object(value: Option<&Value>, lat_key: &str, lng_key: &str) -> Option<GpsFix> {
    let obj = value?.as_object()?;
    let latitude = coordinate(obj.get(lat_key)?)?;
    let longitude = coordinate(obj.get(lng_key)?)?;
    Some(GpsFix {
        latitude,
        longitude,
        accuracy: accuracy_of(obj, "accuracy"),
        source: GpsSource::FormData,
    })
}

fn accuracy_of(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    obj.get(key).and_then(coordinate)
}

/// Accept JSON numbers and numeric strings; anything else, including
/// non-finite values, does not match the rung.
fn coordinate(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}
