use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::{Map, Value};

use crate::models::{DeviceInfo, UNKNOWN};

type OsLabel = fn(&Captures) -> String;

/// Ordered platform rules; first match wins.
static PLATFORM_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (Regex::new(r"(?i)iPhone|iPad|iPod").unwrap(), "iOS"),
        (Regex::new(r"(?i)Android").unwrap(), "Android"),
        (Regex::new(r"(?i)Windows").unwrap(), "Windows"),
        (Regex::new(r"(?i)Macintosh|Mac OS X").unwrap(), "macOS"),
        (Regex::new(r"(?i)Linux|X11").unwrap(), "Linux"),
    ]
});

/// Ordered browser rules. Chromium-family browsers embed each other's
/// tokens, so the most specific token is checked first.
static BROWSER_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (Regex::new(r"Edg(e|A|iOS)?/").unwrap(), "Edge"),
        (Regex::new(r"OPR/|Opera").unwrap(), "Opera"),
        (Regex::new(r"Firefox/|FxiOS").unwrap(), "Firefox"),
        (Regex::new(r"Chrome/|CriOS").unwrap(), "Chrome"),
        (Regex::new(r"Safari/").unwrap(), "Safari"),
    ]
});

/// Ordered OS rules, version-carrying rules before their generic fallback.
static OS_RULES: LazyLock<Vec<(Regex, OsLabel)>> = LazyLock::new(|| {
    vec![
        (
            Regex::new(r"(?:iPhone OS|CPU OS) (\d+)").unwrap(),
            |c: &Captures| format!("iOS {}", &c[1]),
        ),
        (
            Regex::new(r"(?i)iPhone|iPad|iPod").unwrap(),
            |_: &Captures| "iOS".to_string(),
        ),
        (
            Regex::new(r"Android (\d+(?:\.\d+)?)").unwrap(),
            |c: &Captures| format!("Android {}", &c[1]),
        ),
        (
            Regex::new(r"(?i)Android").unwrap(),
            |_: &Captures| "Android".to_string(),
        ),
        (
            Regex::new(r"Windows NT 10\.0").unwrap(),
            |_: &Captures| "Windows 10".to_string(),
        ),
        (
            Regex::new(r"Windows NT 6\.3").unwrap(),
            |_: &Captures| "Windows 8.1".to_string(),
        ),
        (
            Regex::new(r"Windows NT 6\.1").unwrap(),
            |_: &Captures| "Windows 7".to_string(),
        ),
        (
            Regex::new(r"(?i)Windows").unwrap(),
            |_: &Captures| "Windows".to_string(),
        ),
        (
            Regex::new(r"Mac OS X (\d+)[_.](\d+)").unwrap(),
            |c: &Captures| format!("macOS {}.{}", &c[1], &c[2]),
        ),
        (
            Regex::new(r"(?i)Macintosh|Mac OS X").unwrap(),
            |_: &Captures| "macOS".to_string(),
        ),
        (
            Regex::new(r"(?i)Linux|X11").unwrap(),
            |_: &Captures| "Linux".to_string(),
        ),
    ]
});

static MOBILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Mobi|iPhone|iPod|Android").unwrap());
static TABLET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)iPad|Tablet").unwrap());
static ANDROID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)Android").unwrap());
static MOBILE_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)Mobi").unwrap());

/// Derive device details from the `device_info` bag, falling back to the
/// request metadata for the user agent. No user agent anywhere yields
/// "Unknown" for every derived field and false for both flags.
pub fn extract(
    device_info: Option<&Map<String, Value>>,
    metadata: Option<&Map<String, Value>>,
) -> DeviceInfo {
    let mut info = DeviceInfo {
        language: string_field(device_info, &["language"]),
        screen_resolution: string_field(device_info, &["screen_resolution", "screenResolution"]),
        timezone: string_field(device_info, &["timezone", "time_zone"]),
        connection_type: string_field(device_info, &["connection_type", "connectionType"]),
        ..DeviceInfo::default()
    };

    let ua = user_agent(device_info).or_else(|| user_agent(metadata));
    let Some(ua) = ua else {
        return info;
    };

    info.platform = first_match(&PLATFORM_RULES, &ua);
    info.browser = first_match(&BROWSER_RULES, &ua);
    info.os = os_label(&ua);
    info.is_mobile = MOBILE_RE.is_match(&ua);
    info.is_tablet =
        TABLET_RE.is_match(&ua) || (ANDROID_RE.is_match(&ua) && !MOBILE_TOKEN_RE.is_match(&ua));
    info.user_agent = ua;

    info
}

fn user_agent(obj: Option<&Map<String, Value>>) -> Option<String> {
    let ua = string_field(obj, &["user_agent", "userAgent"]);
    (ua != UNKNOWN).then_some(ua)
}

fn first_match(rules: &[(Regex, &'static str)], ua: &str) -> String {
    rules
        .iter()
        .find(|(re, _)| re.is_match(ua))
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

fn os_label(ua: &str) -> String {
    for (re, label) in OS_RULES.iter() {
        if let Some(caps) = re.captures(ua) {
            return label(&caps);
        }
    }
    UNKNOWN.to_string()
}

/// First non-empty string under any of the given keys, else "Unknown".
fn string_field(obj: Option<&Map<String, Value>>, keys: &[&str]) -> String {
    obj.and_then(|obj| {
        keys.iter()
            .filter_map(|key| obj.get(*key).and_then(Value::as_str))
            .map(str::trim)
            .find(|s| !s.is_empty())
    })
    .unwrap_or(UNKNOWN)
    .to_string()
}
