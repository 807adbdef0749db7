//! Profile records as Firestore REST documents.
//!
//! Every profile field is stored as a `stringValue` under the record's
//! serialized field name (`fullNameEnglish`, `birthDate`, ...).

use acct_core::ProfileRecord;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FirestoreValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub string_value: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FirestoreDocument {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default)]
    pub fields: HashMap<String, FirestoreValue>,
    #[serde(default, skip_serializing)]
    pub create_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListDocumentsResponse {
    #[serde(default)]
    pub documents: Vec<FirestoreDocument>,
}

impl FirestoreDocument {
    pub fn from_record(record: &ProfileRecord) -> serde_json::Result<Self> {
        let Value::Object(map) = serde_json::to_value(record)? else {
            return Ok(Self::empty());
        };

        let fields = map
            .into_iter()
            .map(|(key, value)| {
                let string_value = match value {
                    Value::String(text) => text,
                    other => other.to_string(),
                };
                (
                    key,
                    FirestoreValue {
                        string_value: Some(string_value),
                    },
                )
            })
            .collect();

        Ok(Self {
            name: String::new(),
            fields,
            create_time: None,
        })
    }

    /// Decode into a record. Missing or non-string fields read back as empty.
    pub fn to_record(&self) -> serde_json::Result<ProfileRecord> {
        let map: Map<String, Value> = self
            .fields
            .iter()
            .filter_map(|(key, value)| {
                value
                    .string_value
                    .as_ref()
                    .map(|text| (key.clone(), Value::String(text.clone())))
            })
            .collect();

        serde_json::from_value(Value::Object(map))
    }

    fn empty() -> Self {
        Self {
            name: String::new(),
            fields: HashMap::new(),
            create_time: None,
        }
    }
}

impl ListDocumentsResponse {
    /// Most recently created document; list order breaks ties.
    pub fn latest(&self) -> Option<&FirestoreDocument> {
        self.documents
            .iter()
            .enumerate()
            .max_by_key(|(index, document)| (document.create_time, *index))
            .map(|(_, document)| document)
    }
}
