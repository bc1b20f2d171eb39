#![allow(dead_code)]

use meal_submissions::{ParsedSubmission, RawSubmission, SubmissionParser};
use serde_json::{json, Value};

/// Parse an arbitrary JSON value through a default parser.
pub fn parse(raw: Value) -> ParsedSubmission {
    SubmissionParser::new().parse(&RawSubmission::from_value(raw))
}

/// Android 14 phone, Chrome.
pub const ANDROID_UA: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Mobile Safari/537.36";

/// iPhone on iOS 18, Safari.
pub const IPHONE_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 18_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/18.0 Mobile/15E148 Safari/604.1";

/// iPad on iOS 17, Safari.
pub const IPAD_UA: &str = "Mozilla/5.0 (iPad; CPU OS 17_5 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.5 Mobile/15E148 Safari/604.1";

/// Windows 10 desktop, Chrome.
pub const WINDOWS_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// A realistic, fully-populated submission as the read API returns it.
pub fn full_submission() -> Value {
    json!({
        "id": "sub-2041",
        "form_name": "Household Baseline Survey",
        "project_name": "Community Resilience 2025",
        "user_email": "enumerator@saywhat.org",
        "submitted_at": "2025-03-14T09:45:30Z",
        "metadata": {
            "ip": "197.155.64.10",
            "completion_seconds": 312
        },
        "device_info": {
            "user_agent": ANDROID_UA,
            "language": "en-ZW",
            "screen_resolution": "1080x2400",
            "timezone": "Africa/Harare",
            "connection_type": "4g"
        },
        "data": {
            "first_name": "Tariro",
            "last_name": "Moyo",
            "email": "tariro@example.org",
            "district": "Harare",
            "gender": "female",
            "score": 82,
            "comments": "water point works, queue is long",
            "gps_location": { "lat": -17.829, "lng": 31.054, "accuracy": 12.5 },
            "photo": "data:image/jpeg;base64,/9j/4AAQSkZJRg=="
        },
        "attachments": [
            { "filename": "consent.pdf", "size": 48230 }
        ]
    })
}
