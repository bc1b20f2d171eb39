use std::fmt::Write;

use serde_json::Value;

use crate::models::{ExportOptions, ParsedSubmission};
use crate::submission::categorize::categorize_form_data;

/// Self-contained styled HTML report for one submission.
///
/// The original UI labels this export "PDF"; the artifact has always been
/// an HTML document and is named accordingly here.
pub fn render(submission: &ParsedSubmission, options: &ExportOptions) -> String {
    let categories = categorize_form_data(&submission.form_data);

    let mut sections = String::new();
    for (label, fields) in categories.sections() {
        if fields.is_empty() {
            continue;
        }
        sections.push_str(&section(label, fields, options.include_photos));
    }
    if sections.is_empty() {
        sections.push_str("<p class=\"empty\">No form data recorded.</p>");
    }

    let metadata = if options.include_metadata {
        metadata_section(submission)
    } else {
        String::new()
    };

    let title = html_escape(&submission.form_name);
    let id = html_escape(&submission.id);
    let overview = overview_section(submission);

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Submission {id} - {title}</title>
<style>
    body {{ font-family: sans-serif; max-width: 800px; margin: 0 auto; padding: 24px; color: #222; }}
    h1 {{ font-size: 22px; border-bottom: 2px solid #0070f3; padding-bottom: 8px; }}
    h2 {{ font-size: 16px; margin-top: 28px; color: #0070f3; }}
    table {{ width: 100%; border-collapse: collapse; }}
    td {{ padding: 6px 8px; border-bottom: 1px solid #eee; vertical-align: top; }}
    td.key {{ width: 35%; color: #666; }}
    img {{ max-width: 240px; border: 1px solid #ddd; border-radius: 4px; }}
    .empty {{ color: #888; }}
    footer {{ margin-top: 32px; color: #888; font-size: 12px; }}
</style>
</head>
<body>
    <h1>Submission Report</h1>
{overview}
{sections}{metadata}
    <footer>Submission {id} &middot; {title}</footer>
</body>
</html>"#
    )
}

fn overview_section(submission: &ParsedSubmission) -> String {
    let mut rows = String::new();
    push_row(&mut rows, "Submission ID", &submission.id);
    push_row(&mut rows, "Form", &submission.form_name);
    push_row(&mut rows, "Project", &submission.project_name);
    push_row(&mut rows, "Submitted at", &submission.submitted_at);
    push_row(&mut rows, "Submitted by", &submission.submitted_by);
    push_row(&mut rows, "Location", &submission.location);
    push_row(
        &mut rows,
        "Place",
        &format!(
            "{}, {}, {}",
            submission.city, submission.region, submission.country
        ),
    );
    if let Some(coordinates) = &submission.coordinates {
        push_row(
            &mut rows,
            "Coordinates",
            &format!("{} ({})", coordinates, submission.gps_source),
        );
    }
    push_row(
        &mut rows,
        "Attachments",
        &format!(
            "{} ({})",
            submission.attachments,
            if submission.attachment_types.is_empty() {
                "none".to_string()
            } else {
                submission.attachment_types.join(", ")
            }
        ),
    );

    format!("    <h2>Overview</h2>\n    <table>\n{rows}    </table>\n")
}

fn metadata_section(submission: &ParsedSubmission) -> String {
    let device = &submission.device;
    let mut rows = String::new();
    push_row(&mut rows, "IP address", &submission.ip_address);
    push_row(&mut rows, "Platform", &device.platform);
    push_row(&mut rows, "Browser", &device.browser);
    push_row(&mut rows, "Operating system", &device.os);
    push_row(&mut rows, "Language", &device.language);
    push_row(&mut rows, "Screen resolution", &device.screen_resolution);
    push_row(&mut rows, "Timezone", &device.timezone);
    push_row(&mut rows, "Connection", &device.connection_type);
    push_row(&mut rows, "User agent", &device.user_agent);

    format!("    <h2>Technical Metadata</h2>\n    <table>\n{rows}    </table>\n")
}

fn section(label: &str, fields: &serde_json::Map<String, Value>, include_photos: bool) -> String {
    let mut rows = String::new();
    for (key, value) in fields {
        let _ = writeln!(
            rows,
            "        <tr><td class=\"key\">{}</td><td>{}</td></tr>",
            html_escape(key),
            render_value(value, include_photos),
        );
    }
    format!("    <h2>{label}</h2>\n    <table>\n{rows}    </table>\n")
}

fn render_value(value: &Value, include_photos: bool) -> String {
    match value {
        Value::String(s) if s.starts_with("data:image") => {
            if include_photos {
                format!("<img src=\"{}\" alt=\"attachment\">", attribute_escape(s))
            } else {
                "<em>photo omitted</em>".to_string()
            }
        }
        Value::String(s) => html_escape(s),
        Value::Null => String::new(),
        other => html_escape(&other.to_string()),
    }
}

fn push_row(rows: &mut String, key: &str, value: &str) {
    let _ = writeln!(
        rows,
        "        <tr><td class=\"key\">{}</td><td>{}</td></tr>",
        html_escape(key),
        html_escape(value),
    );
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn attribute_escape(s: &str) -> String {
    html_escape(s).replace('"', "&quot;")
}
