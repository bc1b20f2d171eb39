use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default placeholder for any field the source record did not populate.
pub const UNKNOWN: &str = "Unknown";

/// Which of the possible coordinate sources supplied the GPS fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GpsSource {
    Database,
    #[serde(rename = "Form Data")]
    FormData,
    None,
}

impl std::fmt::Display for GpsSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            GpsSource::Database => "Database",
            GpsSource::FormData => "Form Data",
            GpsSource::None => "None",
        };
        write!(f, "{label}")
    }
}

/// Device details inferred from the submission's user agent and
/// `device_info` bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    pub platform: String,
    pub browser: String,
    pub os: String,
    pub user_agent: String,
    pub language: String,
    pub screen_resolution: String,
    pub timezone: String,
    pub connection_type: String,
    pub is_mobile: bool,
    pub is_tablet: bool,
}

impl Default for DeviceInfo {
    fn default() -> Self {
        Self {
            platform: UNKNOWN.to_string(),
            browser: UNKNOWN.to_string(),
            os: UNKNOWN.to_string(),
            user_agent: UNKNOWN.to_string(),
            language: UNKNOWN.to_string(),
            screen_resolution: UNKNOWN.to_string(),
            timezone: UNKNOWN.to_string(),
            connection_type: UNKNOWN.to_string(),
            is_mobile: false,
            is_tablet: false,
        }
    }
}

/// The display-ready projection of a raw submission.
///
/// Every field is populated even from a maximally sparse input: strings
/// default to "Unknown", counts to zero, the size to "0 KB". Constructed
/// fresh on every parse call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedSubmission {
    pub id: String,
    pub form_name: String,
    pub project_name: String,
    pub submitted_at: String,
    pub submitted_by: String,
    pub ip_address: String,
    pub location: String,
    pub country: String,
    pub region: String,
    pub city: String,
    pub coordinates: Option<String>,
    pub gps_accuracy: Option<f64>,
    pub gps_source: GpsSource,
    pub device: DeviceInfo,
    pub attachments: usize,
    pub attachment_types: Vec<String>,
    pub attachment_size: String,
    pub form_data: Map<String, Value>,
}

impl Default for ParsedSubmission {
    fn default() -> Self {
        Self {
            id: UNKNOWN.to_string(),
            form_name: UNKNOWN.to_string(),
            project_name: UNKNOWN.to_string(),
            submitted_at: UNKNOWN.to_string(),
            submitted_by: "Anonymous".to_string(),
            ip_address: UNKNOWN.to_string(),
            location: UNKNOWN.to_string(),
            country: UNKNOWN.to_string(),
            region: UNKNOWN.to_string(),
            city: UNKNOWN.to_string(),
            coordinates: None,
            gps_accuracy: None,
            gps_source: GpsSource::None,
            device: DeviceInfo::default(),
            attachments: 0,
            attachment_types: Vec::new(),
            attachment_size: "0 KB".to_string(),
            form_data: Map::new(),
        }
    }
}
