//! Sequences, nested records and the serialized error-map shape.

use pretty_assertions::assert_eq;
use serde_json::json;
use validata::prelude::*;
use validata::schema::RecordSchema;

fn validator() -> Validator {
    Validator::new().unwrap()
}

#[tokio::test]
async fn every_element_reports_its_own_failure() {
    let record = record! {
        "emails": "email" => vec!["kofi@mail.gh", "nope", "ama@mail.gh", "also nope"],
    };
    let result = validator().validate(&record, None).await.unwrap().unwrap();

    assert_eq!(
        result.get("emails"),
        Some(&FieldError::Elements(vec![
            None,
            Some("The emails (2) field must be a valid email address.".into()),
            None,
            Some("The emails (4) field must be a valid email address.".into()),
        ]))
    );
    assert_eq!(result.error_count(), 2);
}

#[tokio::test]
async fn first_failure_wins_within_an_element() {
    let record = record! { "codes": "alpha|min:3" => vec!["abc", "a1", "ab"] };
    let result = validator().validate(&record, None).await.unwrap().unwrap();

    assert_eq!(
        result.get("codes"),
        Some(&FieldError::Elements(vec![
            None,
            Some("The codes (2) field may only contain letters.".into()),
            Some("The codes (3) field must be at least 3 characters.".into()),
        ]))
    );
}

#[tokio::test]
async fn clean_sequence_passes() {
    let record = record! { "scores": "min:1|max:10" => vec![1_u8, 5, 10] };
    assert_eq!(validator().validate(&record, None).await.unwrap(), None);
}

#[tokio::test]
async fn slice_bounds_apply_to_the_whole_list() {
    let record = record! {
        "tags": "slice:min:2|alpha" => vec!["rust"],
        "more": "slice:max:2|alpha" => vec!["a", "b", "c"],
        "exact": "slice:between:1,3" => vec!["a", "b"],
    };
    let result = validator().validate(&record, None).await.unwrap().unwrap();

    assert_eq!(result.message("tags"), Some("The tags field must have at least 2 items."));
    assert_eq!(result.message("more"), Some("The more field must not have more than 2 items."));
    assert!(result.passed("exact"));
}

#[tokio::test]
async fn required_empty_list() {
    let record = record! { "tags": "required|alpha" => Vec::<String>::new() };
    let result = validator().validate(&record, None).await.unwrap().unwrap();
    assert_eq!(result.message("tags"), Some("The tags field is required."));
}

#[tokio::test]
async fn record_sequences_are_keyed_by_failing_index() {
    let contacts = vec![
        record! { "phone": "required|phone" => "0241234567" },
        record! { "phone": "required|phone" => "12" },
        record! { "phone": "required|phone" => "" },
    ];
    let record = record! {
        "name": "required" => "Ama",
        "contacts": "slice:min:1" => contacts,
    };

    let result = validator().validate(&record, None).await.unwrap().unwrap();
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({
            "name": null,
            "contacts": {
                "1": { "phone": "The phone field must be a valid phone number." },
                "2": { "phone": "The phone field is required." }
            }
        })
    );
}

#[tokio::test]
async fn nested_record_serializes_as_object() {
    let record = record! {
        "address": "required" => record! {
            "city": "required|alpha" => "Accra",
            "gps": "gh_gps" => "bad",
        },
    };
    let result = validator().validate(&record, None).await.unwrap().unwrap();
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({
            "address": {
                "city": null,
                "gps": "The gps field must be a valid Ghana digital address."
            }
        })
    );
}

#[tokio::test]
async fn json_payloads_through_a_schema() {
    let schema = RecordSchema::from_json_str(
        r#"{ "fields": [
            { "name": "email", "rules": "required|email", "kind": "text" },
            { "name": "tags", "rules": "alpha", "kind": "list", "items": "text" },
            { "name": "items", "rules": "required", "kind": "records",
              "schema": { "fields": [ { "name": "qty", "rules": "required|min:1", "kind": "uint" } ] } }
        ] }"#,
    )
    .unwrap();

    let payload = json!({
        "email": "kofi@mail.gh",
        "tags": ["ok", "n0"],
        "items": [ { "qty": 2 }, { "qty": 0 } ]
    });
    let result = validator()
        .validate_json(&schema, &payload, Some("fr"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({
            "email": null,
            "tags": [null, "Le champ tags (2) ne peut contenir que des lettres."],
            "items": { "1": { "qty": "Le champ qty est requis." } }
        })
    );
}

#[tokio::test]
async fn schema_rejects_non_object_payloads() {
    let err = validator()
        .validate_json(&RecordSchema::default(), &json!("text"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, ValidataError::NotARecord { .. }));
}

#[tokio::test]
async fn absent_boolean_fails_as_not_true() {
    let schema = RecordSchema::from_json_str(
        r#"{ "fields": [ { "name": "terms", "rules": "required", "kind": "bool" } ] }"#,
    )
    .unwrap();

    for payload in [json!({}), json!({ "terms": null }), json!({ "terms": "yes" })] {
        let result = validator()
            .validate_json(&schema, &payload, None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(result.message("terms"), Some("The terms field must be true."), "{payload}");
    }

    let accepted = validator()
        .validate_json(&schema, &json!({ "terms": true }), None)
        .await
        .unwrap();
    assert!(accepted.is_none());
}

#[tokio::test]
async fn record_list_failures_keep_payload_positions() {
    let schema = RecordSchema::from_json_str(
        r#"{ "fields": [
            { "name": "items", "kind": "records",
              "schema": { "fields": [ { "name": "qty", "rules": "required|min:1", "kind": "uint" } ] } }
        ] }"#,
    )
    .unwrap();

    let payload = json!({ "items": [ "junk", { "qty": 2 }, { "qty": 0 } ] });
    let result = validator()
        .validate_json(&schema, &payload, None)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({
            "items": {
                "0": { "qty": "The qty field is required." },
                "2": { "qty": "The qty field is required." }
            }
        })
    );
}
