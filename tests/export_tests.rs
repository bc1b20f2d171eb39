mod common;

use meal_submissions::{export, ExportFormat, ExportOptions};
use serde_json::{json, Value};

use common::parse;

fn options(format: ExportFormat) -> ExportOptions {
    ExportOptions::new(format)
}

// ── JSON export ─────────────────────────────────────────────────

#[test]
fn json_export_contains_curated_fields() {
    let parsed = parse(common::full_submission());
    let artifact = export::render(&parsed, &options(ExportFormat::Json)).unwrap();

    assert_eq!(artifact.content_type, "application/json");
    let doc: Value = serde_json::from_slice(&artifact.bytes).unwrap();

    assert_eq!(doc["id"], "sub-2041");
    assert_eq!(doc["formName"], "Household Baseline Survey");
    assert_eq!(doc["location"]["country"], "Zimbabwe");
    assert_eq!(doc["attachments"]["count"], 2);
    assert_eq!(doc["metadata"]["ipAddress"], "197.155.64.10");
    assert_eq!(doc["metadata"]["gpsSource"], "Form Data");
    assert_eq!(doc["metadata"]["device"]["platform"], "Android");
    assert_eq!(doc["formData"]["first_name"], "Tariro");
}

#[test]
fn json_without_metadata_omits_the_block() {
    let parsed = parse(common::full_submission());
    let opts = ExportOptions {
        include_metadata: false,
        ..options(ExportFormat::Json)
    };
    let artifact = export::render(&parsed, &opts).unwrap();
    let doc: Value = serde_json::from_slice(&artifact.bytes).unwrap();

    assert!(doc.get("metadata").is_none());
    assert_eq!(doc["id"], "sub-2041");
}

#[test]
fn json_without_photos_replaces_large_strings() {
    let big_photo = format!("data:image/jpeg;base64,{}", "A".repeat(11 * 1024));
    let parsed = parse(json!({
        "id": "p1",
        "data": {
            "photo": big_photo,
            "essay": "B".repeat(12 * 1024),
            "note": "short text stays"
        }
    }));

    let opts = ExportOptions {
        include_photos: false,
        ..options(ExportFormat::Json)
    };
    let artifact = export::render(&parsed, &opts).unwrap();
    let doc: Value = serde_json::from_slice(&artifact.bytes).unwrap();

    let photo = doc["formData"]["photo"].as_str().unwrap();
    assert!(photo.starts_with('['), "got: {photo}");
    assert!(photo.contains("removed"));
    assert!(photo.ends_with("KB]"));

    let essay = doc["formData"]["essay"].as_str().unwrap();
    assert!(essay.contains("removed"));

    assert_eq!(doc["formData"]["note"], "short text stays");
}

#[test]
fn json_with_photos_keeps_data_uris_verbatim() {
    let parsed = parse(json!({
        "data": { "photo": "data:image/png;base64,iVBORw0KGgo=" }
    }));

    let artifact = export::render(&parsed, &options(ExportFormat::Json)).unwrap();
    let doc: Value = serde_json::from_slice(&artifact.bytes).unwrap();
    assert_eq!(doc["formData"]["photo"], "data:image/png;base64,iVBORw0KGgo=");
}

// ── CSV export ──────────────────────────────────────────────────

#[test]
fn csv_is_one_header_and_one_data_row() {
    let parsed = parse(common::full_submission());
    let artifact = export::render(&parsed, &options(ExportFormat::Csv)).unwrap();

    assert_eq!(artifact.content_type, "text/csv");
    let text = artifact.as_text();
    let lines: Vec<&str> = text.trim_end().lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("id,form_name,"));
    assert!(lines[1].starts_with("sub-2041,"));
}

#[test]
fn csv_quotes_values_containing_commas() {
    let parsed = parse(json!({
        "id": "c1",
        "data": { "comments": "good, thanks" }
    }));
    let artifact = export::render(&parsed, &options(ExportFormat::Csv)).unwrap();
    let text = artifact.as_text();

    assert!(text.contains("\"good, thanks\""));
}

#[test]
fn csv_escapes_embedded_quotes() {
    let parsed = parse(json!({
        "data": { "comments": "she said \"fine\"" }
    }));
    let artifact = export::render(&parsed, &options(ExportFormat::Csv)).unwrap();
    let text = artifact.as_text();

    assert!(text.contains("\"she said \"\"fine\"\"\""));
}

#[test]
fn csv_header_and_row_have_same_arity() {
    // No commas in any value, so a plain split is a faithful cell count.
    let parsed = parse(json!({
        "id": "c2",
        "data": { "ward": "12", "score": 9 }
    }));
    let artifact = export::render(&parsed, &options(ExportFormat::Csv)).unwrap();
    let text = artifact.as_text();
    let lines: Vec<&str> = text.trim_end().lines().collect();

    assert_eq!(
        lines[0].split(',').count(),
        lines[1].split(',').count()
    );
}

#[test]
fn csv_skips_binary_like_fields() {
    let parsed = parse(json!({
        "data": {
            "photo": "data:image/png;base64,AAAA",
            "village": "Gutu"
        }
    }));
    let artifact = export::render(&parsed, &options(ExportFormat::Csv)).unwrap();
    let text = artifact.as_text();

    assert!(!text.contains("data:image"));
    assert!(text.contains("village"));
    assert!(text.contains("Gutu"));
}

#[test]
fn csv_without_metadata_drops_device_columns() {
    let parsed = parse(common::full_submission());
    let opts = ExportOptions {
        include_metadata: false,
        ..options(ExportFormat::Csv)
    };
    let artifact = export::render(&parsed, &opts).unwrap();
    let header = artifact.as_text().lines().next().unwrap().to_string();

    assert!(!header.contains("platform"));
    assert!(!header.contains("ip_address"));
    assert!(header.contains("country"));
}

// ── HTML report ─────────────────────────────────────────────────

#[test]
fn html_report_renders_sections_per_bucket() {
    let parsed = parse(common::full_submission());
    let artifact = export::render(&parsed, &options(ExportFormat::HtmlReport)).unwrap();

    assert_eq!(artifact.content_type, "text/html");
    let text = artifact.as_text();
    assert!(text.starts_with("<!DOCTYPE html>"));
    assert!(text.contains("<h2>Overview</h2>"));
    assert!(text.contains("<h2>Personal</h2>"));
    assert!(text.contains("<h2>Contact</h2>"));
    assert!(text.contains("<h2>Assessment</h2>"));
    assert!(text.contains("<h2>Technical Metadata</h2>"));
    assert!(text.contains("Tariro"));
}

#[test]
fn html_report_escapes_markup_in_values() {
    let parsed = parse(json!({
        "data": { "comments": "<script>alert(1)</script> & more" }
    }));
    let artifact = export::render(&parsed, &options(ExportFormat::HtmlReport)).unwrap();
    let text = artifact.as_text();

    assert!(!text.contains("<script>alert"));
    assert!(text.contains("&lt;script&gt;alert(1)&lt;/script&gt; &amp; more"));
}

#[test]
fn html_report_inlines_photos_only_when_asked() {
    let raw = json!({
        "data": { "photo": "data:image/png;base64,iVBORw0KGgo=" }
    });

    let parsed = parse(raw);
    let with_photos = export::render(&parsed, &options(ExportFormat::HtmlReport)).unwrap();
    assert!(with_photos.as_text().contains("<img src=\"data:image/png"));

    let opts = ExportOptions {
        include_photos: false,
        ..options(ExportFormat::HtmlReport)
    };
    let without = export::render(&parsed, &opts).unwrap();
    assert!(!without.as_text().contains("<img"));
    assert!(without.as_text().contains("photo omitted"));
}

#[test]
fn html_report_without_metadata_omits_technical_section() {
    let parsed = parse(common::full_submission());
    let opts = ExportOptions {
        include_metadata: false,
        ..options(ExportFormat::HtmlReport)
    };
    let artifact = export::render(&parsed, &opts).unwrap();

    assert!(!artifact.as_text().contains("Technical Metadata"));
}

// ── Filenames ───────────────────────────────────────────────────

#[test]
fn default_filename_carries_id_and_extension() {
    let parsed = parse(json!({ "id": "sub-9" }));

    let json_name = export::render(&parsed, &options(ExportFormat::Json))
        .unwrap()
        .filename;
    assert!(json_name.starts_with("submission_sub-9_"), "got: {json_name}");
    assert!(json_name.ends_with(".json"));

    let html_name = export::render(&parsed, &options(ExportFormat::HtmlReport))
        .unwrap()
        .filename;
    assert!(html_name.ends_with(".html"));
}

#[test]
fn custom_filename_is_used_and_extension_appended() {
    let parsed = parse(json!({ "id": "sub-9" }));

    let opts = ExportOptions {
        filename: Some("field-visit".to_string()),
        ..options(ExportFormat::Csv)
    };
    assert_eq!(export::render(&parsed, &opts).unwrap().filename, "field-visit.csv");

    let opts = ExportOptions {
        filename: Some("field-visit.csv".to_string()),
        ..options(ExportFormat::Csv)
    };
    assert_eq!(export::render(&parsed, &opts).unwrap().filename, "field-visit.csv");
}

#[test]
fn blank_filename_is_rejected() {
    let parsed = parse(json!({ "id": "sub-9" }));
    let opts = ExportOptions {
        filename: Some("   ".to_string()),
        ..options(ExportFormat::Json)
    };

    let err = export::render(&parsed, &opts).unwrap_err();
    assert!(err.to_string().contains("Invalid export options"));
}
