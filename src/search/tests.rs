use super::*;
use serde_json::json;

#[test]
fn embedding_serializes_as_numeric_array() {
    let args = SearchContentArgs::new(vec![0.1, 0.2, 0.3]);
    let value = serde_json::to_value(&args).expect("Failed to serialize args");

    let embedding = value
        .get("embedding")
        .and_then(|v| v.as_array())
        .expect("embedding must be a JSON array");
    assert_eq!(embedding.len(), 3);
    assert!(embedding.iter().all(serde_json::Value::is_number));
}

#[test]
fn unset_tuning_parameters_are_omitted() {
    let args = SearchContentArgs::new(vec![0.5]);
    let value = serde_json::to_value(&args).expect("Failed to serialize args");

    let object = value.as_object().expect("args must serialize to an object");
    assert_eq!(object.len(), 1, "only the embedding should be present");
    assert!(object.contains_key("embedding"));
}

#[test]
fn set_tuning_parameters_are_present() {
    let mut args = SearchContentArgs::new(vec![0.5]);
    args.match_threshold = Some(0.78);
    args.max_result_count = Some(10);

    let value = serde_json::to_value(&args).expect("Failed to serialize args");
    assert_eq!(value["match_threshold"], json!(0.78));
    assert_eq!(value["max_result_count"], json!(10));
}

#[test]
fn hybrid_args_carry_text_and_embedding() {
    let mut args = HybridSearchArgs::new("create a bucket", vec![0.1, 0.9]);
    args.rrf_k = Some(50);

    let value = serde_json::to_value(&args).expect("Failed to serialize args");
    assert_eq!(value["query_text"], json!("create a bucket"));
    assert_eq!(value["query_embedding"], json!([0.1, 0.9]));
    assert_eq!(value["rrf_k"], json!(50));
    assert!(value.get("semantic_weight").is_none());
}

#[test]
fn fully_populated_metadata_round_trips_unchanged() {
    let row = json!({
        "id": 42,
        "page_title": "Storage",
        "type": "reference",
        "href": "/docs/reference/storage",
        "content": "Buckets hold objects.",
        "metadata": {
            "subtitle": "Object storage",
            "language": "js",
            "methodName": "createBucket",
            "platform": "web"
        },
        "subsections": [
            { "title": "Usage", "href": "#usage", "content": "Call createBucket." }
        ]
    });

    let parsed: SearchResult =
        serde_json::from_value(row.clone()).expect("Failed to parse result row");

    assert_eq!(parsed.metadata.subtitle.as_deref(), Some("Object storage"));
    assert_eq!(parsed.metadata.language.as_deref(), Some("js"));
    assert_eq!(parsed.metadata.method_name.as_deref(), Some("createBucket"));
    assert_eq!(parsed.metadata.platform.as_deref(), Some("web"));
    assert_eq!(parsed.subsections.len(), 1);
    assert_eq!(parsed.subsections[0].title.as_deref(), Some("Usage"));
    assert_eq!(parsed.subsections[0].href.as_deref(), Some("#usage"));
    assert_eq!(
        parsed.subsections[0].content.as_deref(),
        Some("Call createBucket.")
    );

    // No field may be dropped, renamed, or coerced on the way back out.
    let reserialized = serde_json::to_value(&parsed).expect("Failed to serialize result row");
    assert_eq!(reserialized, row);
}

#[test]
fn unrecognized_metadata_fields_are_discarded() {
    let row = json!({
        "id": 7,
        "page_title": "Auth",
        "type": "guide",
        "href": "/docs/guides/auth",
        "content": null,
        "metadata": {
            "subtitle": "Sign-in flows",
            "topics": ["oauth", "magic-link"],
            "internal_rank": 3
        },
        "subsections": [
            { "title": "OAuth", "anchor_depth": 2 }
        ]
    });

    let parsed: SearchResult = serde_json::from_value(row).expect("Failed to parse result row");

    assert_eq!(parsed.metadata.subtitle.as_deref(), Some("Sign-in flows"));
    assert_eq!(parsed.metadata.language, None);
    assert_eq!(parsed.subsections[0].title.as_deref(), Some("OAuth"));
    assert_eq!(parsed.subsections[0].content, None);
}

#[test]
fn absent_metadata_and_subsections_default() {
    let row = json!({
        "id": 1,
        "page_title": "FAQ",
        "type": "markdown",
        "href": "/docs/faq",
        "content": "Answers."
    });

    let parsed: SearchResult = serde_json::from_value(row).expect("Failed to parse result row");

    assert_eq!(parsed.metadata, SectionMetadata::default());
    assert!(parsed.subsections.is_empty());
}

#[test]
fn method_name_uses_wire_name() {
    let metadata = SectionMetadata {
        method_name: Some("rpc".to_string()),
        ..SectionMetadata::default()
    };

    let value = serde_json::to_value(&metadata).expect("Failed to serialize metadata");
    assert_eq!(value, json!({ "methodName": "rpc" }));
}
