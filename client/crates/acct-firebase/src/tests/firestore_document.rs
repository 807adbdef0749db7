use crate::firestore_document::{FirestoreDocument, ListDocumentsResponse};

use acct_core::ProfileRecord;

use googletest::assert_that;
use googletest::prelude::{eq, none, ok, some};

fn record(name: &str) -> ProfileRecord {
    ProfileRecord {
        name_primary: name.to_string(),
        name_secondary: String::from("علي"),
        birth_date: String::from("1990-01-01"),
        phone_number: String::from("0501234567"),
        email: String::from("a@x.com"),
    }
}

#[test]
fn given_record_when_encoded_then_fields_use_document_names() {
    // When
    let document = FirestoreDocument::from_record(&record("Ali")).unwrap();

    // Then
    let name = document
        .fields
        .get("fullNameEnglish")
        .and_then(|value| value.string_value.clone());
    assert_that!(name, some(eq("Ali")));
    assert_that!(document.fields.len(), eq(5));
}

#[test]
fn given_encoded_document_when_serialized_then_create_time_is_omitted() {
    // Given
    let document = FirestoreDocument::from_record(&record("Ali")).unwrap();

    // When
    let json = serde_json::to_value(&document).unwrap();

    // Then
    assert!(json.get("createTime").is_none());
    assert!(json.get("name").is_none());
    assert_that!(
        json["fields"]["mobileNumber"]["stringValue"].as_str(),
        some(eq("0501234567"))
    );
}

#[test]
fn given_document_missing_fields_when_decoded_then_missing_fields_are_empty() {
    // Given
    let document: FirestoreDocument = serde_json::from_value(serde_json::json!({
        "name": "projects/p/databases/(default)/documents/users/u1/data/d1",
        "fields": { "fullNameEnglish": { "stringValue": "Ali" } }
    }))
    .unwrap();

    // When
    let decoded = document.to_record();

    // Then
    assert_that!(
        decoded,
        ok(eq(&ProfileRecord {
            name_primary: String::from("Ali"),
            ..ProfileRecord::default()
        }))
    );
}

#[test]
fn given_several_documents_when_latest_then_newest_create_time_wins() {
    // Given
    let listing: ListDocumentsResponse = serde_json::from_value(serde_json::json!({
        "documents": [
            { "fields": { "fullNameEnglish": { "stringValue": "Newest" } },
              "createTime": "2026-03-01T10:00:00Z" },
            { "fields": { "fullNameEnglish": { "stringValue": "Oldest" } },
              "createTime": "2025-01-01T10:00:00Z" }
        ]
    }))
    .unwrap();

    // When
    let latest = listing.latest().map(|document| document.to_record().unwrap());

    // Then
    assert_that!(latest.map(|r| r.name_primary), some(eq("Newest")));
}

#[test]
fn given_equal_create_times_when_latest_then_last_listed_wins() {
    // Given
    let listing: ListDocumentsResponse = serde_json::from_value(serde_json::json!({
        "documents": [
            { "fields": { "fullNameEnglish": { "stringValue": "First" } } },
            { "fields": { "fullNameEnglish": { "stringValue": "Second" } } }
        ]
    }))
    .unwrap();

    // When
    let latest = listing.latest().map(|document| document.to_record().unwrap());

    // Then
    assert_that!(latest.map(|r| r.name_primary), some(eq("Second")));
}

#[test]
fn given_empty_collection_when_latest_then_none() {
    let listing: ListDocumentsResponse = serde_json::from_str("{}").unwrap();

    assert_that!(listing.latest().map(|_| ()), none());
}
