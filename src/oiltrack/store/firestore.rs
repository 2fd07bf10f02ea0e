//! Firestore REST v1 backend.
//!
//! Records are documents in one collection:
//! `{base}/projects/{project}/databases/(default)/documents/{collection}`.
//! Every field is written as a `stringValue`, which is how the existing
//! vehicle collections are laid out; `integerValue` is accepted on read.
//! Updates only touch the fields below, anything else on a document is kept.
//!
//! | record field        | document field  |
//! |---------------------|-----------------|
//! | `label`             | `make`          |
//! | `last_service_date` | `lastOilChange` |
//! | `current_mileage`   | `mileage`       |
//! | `due_at_mileage`    | `nextChangeAt`  |

use super::RecordStore;
use crate::error::{Result, TrackerError};
use crate::model::{RecordId, VehicleFields, VehicleRecord};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com/v1";

const FIELD_LABEL: &str = "make";
const FIELD_LABEL_ALT: &str = "name";
const FIELD_LAST_SERVICE: &str = "lastOilChange";
const FIELD_MILEAGE: &str = "mileage";
const FIELD_DUE: &str = "nextChangeAt";

/// Fields this adapter writes. Updates are masked to these so other fields
/// on a document survive an edit.
const MANAGED_FIELDS: [&str; 4] = [FIELD_LABEL, FIELD_LAST_SERVICE, FIELD_MILEAGE, FIELD_DUE];

#[derive(Debug, Clone)]
pub struct FirestoreSettings {
    pub base_url: String,
    pub project_id: String,
    pub api_key: String,
    pub collection: String,
    pub timeout: Duration,
}

pub struct FirestoreStore {
    client: Client,
    settings: FirestoreSettings,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default)]
    fields: HashMap<String, FieldValue>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    string_value: Option<String>,
    // int64 values arrive as JSON strings, but be lenient about numbers too
    #[serde(default, skip_serializing_if = "Option::is_none")]
    integer_value: Option<serde_json::Value>,
}

impl FieldValue {
    fn string(value: impl Into<String>) -> Self {
        Self {
            string_value: Some(value.into()),
            integer_value: None,
        }
    }

    fn as_text(&self) -> Option<String> {
        if let Some(s) = &self.string_value {
            return Some(s.clone());
        }
        match &self.integer_value {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(serde_json::Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ListResponse {
    #[serde(default)]
    documents: Vec<Document>,
}

fn transport(err: reqwest::Error) -> TrackerError {
    TrackerError::Transport(err.to_string())
}

impl FirestoreStore {
    pub fn new(settings: FirestoreSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(transport)?;
        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &FirestoreSettings {
        &self.settings
    }

    fn collection_url(&self) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents/{}",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.project_id,
            self.settings.collection
        )
    }

    fn document_url(&self, id: &RecordId) -> String {
        format!("{}/{}", self.collection_url(), id)
    }

    fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request
            .query(&[("key", self.settings.api_key.as_str())])
            .send()
            .map_err(transport)?;
        let status = response.status();
        debug!(%status, url = %response.url().path(), "firestore response");
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        Err(TrackerError::RemoteRejected {
            status: status.as_u16(),
            body,
        })
    }

    /// Like `send`, but a 404 means the document does not exist.
    fn send_existing(&self, id: &RecordId, request: RequestBuilder) -> Result<Response> {
        match self.send(request.query(&[("currentDocument.exists", "true")])) {
            Err(TrackerError::RemoteRejected { status, .. })
                if status == StatusCode::NOT_FOUND.as_u16() =>
            {
                Err(TrackerError::NotFound(id.clone()))
            }
            other => other,
        }
    }
}

impl RecordStore for FirestoreStore {
    fn list(&self) -> Result<Vec<VehicleRecord>> {
        let response = self.send(self.client.get(self.collection_url()))?;
        let listing: ListResponse = response.json().map_err(transport)?;
        Ok(listing
            .documents
            .into_iter()
            .filter_map(decode_document)
            .collect())
    }

    fn create(&mut self, fields: &VehicleFields) -> Result<RecordId> {
        let body = encode_fields(fields);
        let response = self.send(self.client.post(self.collection_url()).json(&body))?;
        let created: Document = response.json().map_err(transport)?;
        created
            .name
            .as_deref()
            .and_then(document_id)
            .ok_or_else(|| TrackerError::RemoteRejected {
                status: 200,
                body: "created document has no name".to_string(),
            })
    }

    fn update(&mut self, id: &RecordId, fields: &VehicleFields) -> Result<()> {
        let body = encode_fields(fields);
        let mask: Vec<(&str, &str)> = MANAGED_FIELDS
            .iter()
            .map(|field| ("updateMask.fieldPaths", *field))
            .collect();
        let request = self
            .client
            .patch(self.document_url(id))
            .query(&mask)
            .json(&body);
        self.send_existing(id, request)?;
        Ok(())
    }

    fn delete(&mut self, id: &RecordId) -> Result<()> {
        let request = self.client.delete(self.document_url(id));
        self.send_existing(id, request)?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!(
            "firestore {}/{}",
            self.settings.project_id, self.settings.collection
        )
    }
}

/// The document id is the last segment of the full resource name.
fn document_id(name: &str) -> Option<RecordId> {
    name.rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .map(RecordId::from)
}

fn encode_fields(fields: &VehicleFields) -> Document {
    let mut map = HashMap::new();
    map.insert(FIELD_LABEL.to_string(), FieldValue::string(&fields.label));
    map.insert(
        FIELD_LAST_SERVICE.to_string(),
        FieldValue::string(&fields.last_service_date),
    );
    map.insert(
        FIELD_MILEAGE.to_string(),
        FieldValue::string(fields.current_mileage.to_string()),
    );
    map.insert(
        FIELD_DUE.to_string(),
        FieldValue::string(fields.due_at_mileage.to_string()),
    );
    Document {
        name: None,
        fields: map,
    }
}

fn decode_document(doc: Document) -> Option<VehicleRecord> {
    let Some(id) = doc.name.as_deref().and_then(document_id) else {
        warn!("skipping firestore document without a name");
        return None;
    };
    let text = |key: &str| doc.fields.get(key).and_then(FieldValue::as_text);

    let label = text(FIELD_LABEL)
        .or_else(|| text(FIELD_LABEL_ALT))
        .unwrap_or_default();
    let fields = VehicleFields {
        label,
        last_service_date: text(FIELD_LAST_SERVICE).unwrap_or_default(),
        current_mileage: decode_mileage(&id, FIELD_MILEAGE, text(FIELD_MILEAGE)),
        due_at_mileage: decode_mileage(&id, FIELD_DUE, text(FIELD_DUE)),
    };
    Some(VehicleRecord::new(id, fields))
}

/// Unreadable mileages count as 0 so one bad document does not hide the rest.
fn decode_mileage(id: &RecordId, key: &str, raw: Option<String>) -> i64 {
    let Some(raw) = raw else {
        return 0;
    };
    match raw.trim().parse::<i64>() {
        Ok(n) => n,
        Err(_) => {
            warn!(%id, field = key, value = %raw, "unreadable mileage, using 0");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Answers a single HTTP request with `status` and `body`; the handle
    /// yields the request line that was received.
    fn serve_once(status: u16, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            let mut content_length = 0usize;
            loop {
                let mut header = String::new();
                reader.read_line(&mut header).unwrap();
                if header.trim().is_empty() {
                    break;
                }
                if let Some((name, value)) = header.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().unwrap();
                    }
                }
            }
            let mut request_body = vec![0u8; content_length];
            reader.read_exact(&mut request_body).unwrap();

            let response = format!(
                "HTTP/1.1 {} Stub\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            request_line
        });
        (format!("http://{}/v1", addr), handle)
    }

    fn store_at(base_url: &str) -> FirestoreStore {
        FirestoreStore::new(settings_for(base_url)).unwrap()
    }

    fn sample_fields() -> VehicleFields {
        VehicleFields {
            label: "Hilux".into(),
            last_service_date: "2024-06-01".into(),
            current_mileage: 1000,
            due_at_mileage: 6000,
        }
    }

    fn settings() -> FirestoreSettings {
        settings_for("https://example.test/v1/")
    }

    fn settings_for(base_url: &str) -> FirestoreSettings {
        FirestoreSettings {
            base_url: base_url.to_string(),
            project_id: "fleet".to_string(),
            api_key: "k".to_string(),
            collection: "vehicles".to_string(),
            timeout: Duration::from_secs(1),
        }
    }

    #[test]
    fn builds_collection_and_document_urls() {
        let store = FirestoreStore::new(settings()).unwrap();
        assert_eq!(
            store.collection_url(),
            "https://example.test/v1/projects/fleet/databases/(default)/documents/vehicles"
        );
        assert!(store
            .document_url(&RecordId::from("abc"))
            .ends_with("/documents/vehicles/abc"));
    }

    #[test]
    fn decodes_string_typed_documents() {
        let listing: ListResponse = serde_json::from_value(json!({
            "documents": [{
                "name": "projects/fleet/databases/(default)/documents/vehicles/Xk2",
                "fields": {
                    "make": {"stringValue": "Toyota Hilux"},
                    "lastOilChange": {"stringValue": "2024-05-01"},
                    "mileage": {"stringValue": "49500"},
                    "nextChangeAt": {"integerValue": "50000"}
                }
            }]
        }))
        .unwrap();

        let records: Vec<_> = listing
            .documents
            .into_iter()
            .filter_map(decode_document)
            .collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, RecordId::from("Xk2"));
        assert_eq!(records[0].label(), "Toyota Hilux");
        assert_eq!(records[0].fields.current_mileage, 49500);
        assert_eq!(records[0].fields.due_at_mileage, 50000);
    }

    #[test]
    fn empty_collection_has_no_documents_key() {
        let listing: ListResponse = serde_json::from_value(json!({})).unwrap();
        assert!(listing.documents.is_empty());
    }

    #[test]
    fn unreadable_mileage_decodes_as_zero() {
        let doc: Document = serde_json::from_value(json!({
            "name": "a/b/vehicles/v1",
            "fields": {
                "name": {"stringValue": "Fleet van"},
                "mileage": {"stringValue": "lots"}
            }
        }))
        .unwrap();
        let record = decode_document(doc).unwrap();
        assert_eq!(record.label(), "Fleet van");
        assert_eq!(record.fields.current_mileage, 0);
        assert_eq!(record.fields.due_at_mileage, 0);
    }

    #[test]
    fn encodes_every_field_as_string_value() {
        let doc = encode_fields(&VehicleFields {
            label: "Ranger".into(),
            last_service_date: "2024-06-01".into(),
            current_mileage: -5,
            due_at_mileage: 10000,
        });
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["fields"]["make"]["stringValue"], "Ranger");
        assert_eq!(value["fields"]["mileage"]["stringValue"], "-5");
        assert_eq!(value["fields"]["nextChangeAt"]["stringValue"], "10000");
        assert!(value.get("name").is_none());
    }

    #[test]
    fn document_id_takes_last_segment() {
        assert_eq!(
            document_id("projects/p/databases/(default)/documents/vehicles/abc"),
            Some(RecordId::from("abc"))
        );
        assert_eq!(document_id("trailing/"), None);
    }
    #[test]
    fn update_is_masked_to_managed_fields() {
        let (base, server) = serve_once(200, "{}");
        let mut store = store_at(&base);
        store.update(&RecordId::from("abc"), &sample_fields()).unwrap();

        let line = server.join().unwrap();
        assert!(line.starts_with("PATCH /v1/projects/fleet/"));
        assert!(line.contains("/documents/vehicles/abc?"));
        for field in MANAGED_FIELDS {
            assert!(
                line.contains(&format!("updateMask.fieldPaths={}", field)),
                "missing mask for {} in {}",
                field,
                line
            );
        }
        assert!(line.contains("currentDocument.exists=true"));
        assert!(line.contains("key=k"));
    }

    #[test]
    fn update_of_missing_document_is_not_found() {
        let (base, server) = serve_once(404, r#"{"error":{"code":404}}"#);
        let mut store = store_at(&base);
        let result = store.update(&RecordId::from("gone"), &sample_fields());
        server.join().unwrap();

        assert!(matches!(result, Err(TrackerError::NotFound(id)) if id == RecordId::from("gone")));
    }

    #[test]
    fn delete_of_missing_document_is_not_found() {
        let (base, server) = serve_once(404, "{}");
        let mut store = store_at(&base);
        let result = store.delete(&RecordId::from("gone"));
        let line = server.join().unwrap();

        assert!(line.starts_with("DELETE "));
        assert!(matches!(result, Err(TrackerError::NotFound(_))));
    }

    #[test]
    fn server_error_is_remote_rejected_with_body() {
        let (base, server) = serve_once(500, "boom");
        let mut store = store_at(&base);
        let result = store.create(&sample_fields());
        server.join().unwrap();

        match result {
            Err(TrackerError::RemoteRejected { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected RemoteRejected, got {:?}", other),
        }
    }

    #[test]
    fn create_returns_id_from_document_name() {
        let (base, server) = serve_once(
            200,
            r#"{"name":"projects/fleet/databases/(default)/documents/vehicles/new1","fields":{}}"#,
        );
        let mut store = store_at(&base);
        let id = store.create(&sample_fields()).unwrap();
        let line = server.join().unwrap();

        assert!(line.starts_with("POST "));
        assert_eq!(id, RecordId::from("new1"));
    }

    #[test]
    fn unreachable_server_is_a_transport_error() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let store = store_at(&format!("http://127.0.0.1:{}/v1", port));
        let result = store.list();
        assert!(matches!(result, Err(TrackerError::Transport(_))));
        assert!(result.unwrap_err().is_store_failure());
    }
}
