use super::*;
use serde_json::json;

#[test]
fn page_row_parses() {
    let rows = json!([
        {
            "id": 3,
            "path": "/guides/database",
            "meta_title": "Database",
            "meta_description": "Working with Postgres",
            "type": "markdown",
            "source": "guide",
            "checksum": "abc123",
            "last_refresh": "2024-03-01T12:00:00Z"
        }
    ]);

    let pages: Vec<Page> = serde_json::from_value(rows).expect("Failed to parse page rows");

    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].path, "/guides/database");
    assert_eq!(pages[0].content_type.as_deref(), Some("markdown"));
    assert!(pages[0].last_refresh.is_some());
}

#[test]
fn page_row_with_nulls_parses() {
    let row = json!({
        "id": 4,
        "path": "/guides/auth",
        "meta_title": null,
        "meta_description": null,
        "type": null,
        "source": null,
        "checksum": null,
        "last_refresh": null
    });

    let page: Page = serde_json::from_value(row).expect("Failed to parse page row");

    assert_eq!(page.meta_title, None);
    assert_eq!(page.last_refresh, None);
}

#[test]
fn page_section_row_parses() {
    let row = json!({
        "id": 11,
        "page_id": 3,
        "slug": "connecting",
        "heading": "Connecting to your database",
        "content": "Use the connection string from the dashboard."
    });

    let section: PageSection = serde_json::from_value(row).expect("Failed to parse section row");

    assert_eq!(section.page_id, 3);
    assert_eq!(section.slug.as_deref(), Some("connecting"));
}
