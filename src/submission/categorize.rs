use serde::Serialize;
use serde_json::{Map, Value};

/// The eight display buckets a submission's form fields are sorted into.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormCategories {
    pub personal: Map<String, Value>,
    pub contact: Map<String, Value>,
    pub location: Map<String, Value>,
    pub demographic: Map<String, Value>,
    pub assessment: Map<String, Value>,
    pub technical: Map<String, Value>,
    pub attachments: Map<String, Value>,
    pub other: Map<String, Value>,
}

impl FormCategories {
    /// Buckets in display order, with their section labels.
    pub fn sections(&self) -> [(&'static str, &Map<String, Value>); 8] {
        [
            ("Personal", &self.personal),
            ("Contact", &self.contact),
            ("Location", &self.location),
            ("Demographic", &self.demographic),
            ("Assessment", &self.assessment),
            ("Technical", &self.technical),
            ("Attachments", &self.attachments),
            ("Other", &self.other),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.sections().iter().all(|(_, fields)| fields.is_empty())
    }
}

/// Membership table driving the bucketing. Keys are matched
/// case-insensitively, top to bottom; anything unmatched lands in `other`.
const CATEGORY_TABLE: &[(&str, &[&str])] = &[
    (
        "personal",
        &[
            "name",
            "first_name",
            "last_name",
            "full_name",
            "middle_name",
            "surname",
            "date_of_birth",
            "dob",
            "age",
            "national_id",
            "id_number",
        ],
    ),
    (
        "contact",
        &[
            "email",
            "email_address",
            "phone",
            "phone_number",
            "mobile",
            "telephone",
            "whatsapp",
            "address",
            "postal_address",
        ],
    ),
    (
        "location",
        &[
            "district",
            "province",
            "region",
            "ward",
            "village",
            "city",
            "country",
            "location",
            "gps",
            "gps_location",
            "latitude",
            "longitude",
        ],
    ),
    (
        "demographic",
        &[
            "gender",
            "sex",
            "marital_status",
            "disability",
            "ethnicity",
            "nationality",
            "education_level",
            "employment_status",
            "household_size",
        ],
    ),
    (
        "assessment",
        &[
            "score",
            "rating",
            "feedback",
            "comments",
            "satisfaction",
            "recommendation",
            "assessment",
            "evaluation",
            "outcome",
        ],
    ),
    (
        "technical",
        &[
            "user_agent",
            "device",
            "browser",
            "platform",
            "os",
            "screen_resolution",
            "timezone",
            "ip_address",
            "app_version",
            "form_version",
        ],
    ),
    (
        "attachments",
        &[
            "photo",
            "image",
            "document",
            "file",
            "attachment",
            "signature",
            "upload",
        ],
    ),
];

/// Partition a form-data bag into the fixed display buckets. Pure and
/// stateless: the same input always yields the same buckets, and values
/// pass through untouched.
pub fn categorize_form_data(data: &Map<String, Value>) -> FormCategories {
    let mut categories = FormCategories::default();

    for (key, value) in data {
        let bucket = match bucket_for(key) {
            "personal" => &mut categories.personal,
            "contact" => &mut categories.contact,
            "location" => &mut categories.location,
            "demographic" => &mut categories.demographic,
            "assessment" => &mut categories.assessment,
            "technical" => &mut categories.technical,
            "attachments" => &mut categories.attachments,
            _ => &mut categories.other,
        };
        bucket.insert(key.clone(), value.clone());
    }

    categories
}

fn bucket_for(key: &str) -> &'static str {
    let key = key.to_ascii_lowercase();
    for (bucket, fields) in CATEGORY_TABLE {
        if fields.contains(&key.as_str()) {
            return bucket;
        }
    }
    "other"
}
