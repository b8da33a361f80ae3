//! Admin Resource Client.
//!
//! The dashboard-side half of the content contract: a locally cached list,
//! a single draft buffer for the open create/edit dialog, and the four CRUD
//! calls against one resource endpoint. The transport is a trait so the
//! state machine tests run against an in-memory fake.

pub mod transport;

pub use transport::{ContentTransport, HttpTransport};

use serde_json::{json, Map, Value};
use std::collections::VecDeque;
use url::Url;

/// Explicit session handed to every call; there is no ambient auth state.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub base_url: Url,
    pub token: Option<String>,
}

impl AdminSession {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ClientError::InvalidInput(format!("invalid server url: {}", e)))?;
        Ok(Self { base_url, token })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The endpoint answered with `{success:false, error}`; the message is
    /// surfaced to the user verbatim.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("no record with id {0} in the local list")]
    MissingRecord(String),

    #[error("no draft is open")]
    NoDraft,

    #[error("{0}")]
    InvalidInput(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient user-facing notification (toast-equivalent)
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// One content type's admin view: cached list + draft buffer + notices.
pub struct ResourceClient<T: ContentTransport> {
    resource: String,
    session: AdminSession,
    transport: T,
    /// Partition fields pre-filled on Begin Create (page context)
    partition_context: Map<String, Value>,
    cache: Vec<Value>,
    draft: Option<Map<String, Value>>,
    notices: VecDeque<Notice>,
}

impl<T: ContentTransport> ResourceClient<T> {
    pub fn new(resource: impl Into<String>, session: AdminSession, transport: T) -> Self {
        Self {
            resource: resource.into(),
            session,
            transport,
            partition_context: Map::new(),
            cache: Vec::new(),
            draft: None,
            notices: VecDeque::new(),
        }
    }

    /// Fix a partition field for every record created from this client,
    /// e.g. a page scoped to one program.
    pub fn with_partition_context(mut self, field: &str, value: Value) -> Self {
        self.partition_context.insert(field.to_string(), value);
        self
    }

    pub fn records(&self) -> &[Value] {
        &self.cache
    }

    pub fn draft(&self) -> Option<&Map<String, Value>> {
        self.draft.as_ref()
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    fn notify(&mut self, kind: NoticeKind, message: impl Into<String>) {
        self.notices.push_back(Notice {
            kind,
            message: message.into(),
        });
    }

    /// Fetch the admin view (`all=true`). On failure the previous cache
    /// stays intact - the view degrades to stale, never to blank.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        match self
            .transport
            .list(&self.session, &self.resource, true)
            .await
        {
            Ok(records) => {
                self.cache = records;
                Ok(())
            }
            Err(e) => {
                self.notify(NoticeKind::Error, format!("refresh failed: {}", e));
                Err(e)
            }
        }
    }

    /// Open the draft buffer with type-level defaults and page context.
    pub fn begin_create(&mut self) {
        let mut draft = Map::new();
        draft.insert("order".to_string(), json!(self.cache.len() as i64 + 1));
        draft.insert("isActive".to_string(), json!(true));
        for (field, value) in &self.partition_context {
            draft.insert(field.clone(), value.clone());
        }
        self.draft = Some(draft);
    }

    /// Open the draft buffer with a full copy of an existing record.
    pub fn begin_edit(&mut self, id: &str) -> Result<(), ClientError> {
        let record = self
            .cache
            .iter()
            .find(|r| r.get("_id").and_then(Value::as_str) == Some(id))
            .ok_or_else(|| ClientError::MissingRecord(id.to_string()))?;

        let copy = record
            .as_object()
            .cloned()
            .ok_or_else(|| ClientError::InvalidInput("cached record is not an object".into()))?;
        self.draft = Some(copy);
        Ok(())
    }

    /// Local-only field mutation; no network traffic per keystroke.
    pub fn set_field(&mut self, field: &str, value: Value) -> Result<(), ClientError> {
        let draft = self.draft.as_mut().ok_or(ClientError::NoDraft)?;
        draft.insert(field.to_string(), value);
        Ok(())
    }

    /// Discard the draft without saving.
    pub fn cancel(&mut self) {
        self.draft = None;
    }

    /// Submit the draft: Create when it has no identifier, Update otherwise.
    /// Success closes the draft and re-fetches; failure keeps the draft open
    /// and surfaces the endpoint's message verbatim.
    pub async fn save(&mut self) -> Result<(), ClientError> {
        let draft = self.draft.clone().ok_or(ClientError::NoDraft)?;
        let is_update = draft.contains_key("_id");
        let mut body = draft;
        // Timestamps are server-owned; an edited copy must not echo them back
        body.remove("createdAt");
        body.remove("updatedAt");

        let result = if is_update {
            self.transport
                .update(&self.session, &self.resource, Value::Object(body))
                .await
        } else {
            self.transport
                .create(&self.session, &self.resource, Value::Object(body))
                .await
        };

        match result {
            Ok(_) => {
                self.draft = None;
                self.notify(NoticeKind::Success, "saved");
                // Replace the optimistic view with the server's
                let _ = self.refresh().await;
                Ok(())
            }
            Err(e) => {
                self.notify(NoticeKind::Error, e.to_string());
                Err(e)
            }
        }
    }

    /// Delete after confirmation. Returns Ok(false) when the user cancels.
    /// Success removes the record from the local cache without a re-fetch;
    /// failure leaves the cache unchanged.
    pub async fn delete_record<F>(&mut self, id: &str, confirm: F) -> Result<bool, ClientError>
    where
        F: FnOnce(&str) -> bool,
    {
        let prompt = format!("Delete record {} from {}? This cannot be undone.", id, self.resource);
        if !confirm(&prompt) {
            return Ok(false);
        }

        match self.transport.delete(&self.session, &self.resource, id).await {
            Ok(()) => {
                self.cache
                    .retain(|r| r.get("_id").and_then(Value::as_str) != Some(id));
                self.notify(NoticeKind::Success, "deleted");
                Ok(true)
            }
            Err(e) => {
                self.notify(NoticeKind::Error, e.to_string());
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// In-memory endpoint double: a Vec of records plus a switch that makes
    /// the next call fail with a given API error.
    struct FakeTransport {
        records: Mutex<Vec<Value>>,
        fail_next: Mutex<Option<(u16, String)>>,
        next_id: Mutex<u32>,
    }

    impl FakeTransport {
        fn new(records: Vec<Value>) -> Self {
            Self {
                records: Mutex::new(records),
                fail_next: Mutex::new(None),
                next_id: Mutex::new(100),
            }
        }

        fn fail_next(&self, status: u16, message: &str) {
            *self.fail_next.lock().unwrap() = Some((status, message.to_string()));
        }

        fn take_failure(&self) -> Result<(), ClientError> {
            if let Some((status, message)) = self.fail_next.lock().unwrap().take() {
                return Err(ClientError::Api { status, message });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl<'a> ContentTransport for &'a FakeTransport {
        async fn list(
            &self,
            _session: &AdminSession,
            _resource: &str,
            _all: bool,
        ) -> Result<Vec<Value>, ClientError> {
            self.take_failure()?;
            Ok(self.records.lock().unwrap().clone())
        }

        async fn create(
            &self,
            _session: &AdminSession,
            _resource: &str,
            body: Value,
        ) -> Result<Value, ClientError> {
            self.take_failure()?;
            let mut record = body;
            let mut next_id = self.next_id.lock().unwrap();
            record["_id"] = json!(format!("fake-{}", *next_id));
            *next_id += 1;
            self.records.lock().unwrap().push(record.clone());
            Ok(record)
        }

        async fn update(
            &self,
            _session: &AdminSession,
            _resource: &str,
            body: Value,
        ) -> Result<Value, ClientError> {
            self.take_failure()?;
            let id = body["_id"].as_str().unwrap().to_string();
            let mut records = self.records.lock().unwrap();
            let record = records
                .iter_mut()
                .find(|r| r["_id"] == json!(id))
                .ok_or(ClientError::Api {
                    status: 404,
                    message: format!("record {} not found", id),
                })?;
            for (k, v) in body.as_object().unwrap() {
                record[k.as_str()] = v.clone();
            }
            Ok(record.clone())
        }

        async fn delete(
            &self,
            _session: &AdminSession,
            _resource: &str,
            id: &str,
        ) -> Result<(), ClientError> {
            self.take_failure()?;
            let mut records = self.records.lock().unwrap();
            let before = records.len();
            records.retain(|r| r["_id"] != json!(id));
            if records.len() == before {
                return Err(ClientError::Api {
                    status: 404,
                    message: format!("record {} not found", id),
                });
            }
            Ok(())
        }
    }

    fn session() -> AdminSession {
        AdminSession::new("http://localhost:3000", Some("token".into())).unwrap()
    }

    fn client<'a>(fake: &'a FakeTransport) -> ResourceClient<&'a FakeTransport> {
        ResourceClient::new("partners", session(), fake)
    }

    #[tokio::test]
    async fn test_refresh_replaces_cache() {
        let fake = FakeTransport::new(vec![json!({"_id": "a", "name": "Acme"})]);
        let mut client = client(&fake);

        client.refresh().await.unwrap();
        assert_eq!(client.records().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_stale_cache() {
        let fake = FakeTransport::new(vec![json!({"_id": "a", "name": "Acme"})]);
        let mut client = client(&fake);
        client.refresh().await.unwrap();

        fake.fail_next(503, "database unavailable");
        assert!(client.refresh().await.is_err());

        // Stale but available
        assert_eq!(client.records().len(), 1);
        let notices = client.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].kind, NoticeKind::Error);
    }

    #[tokio::test]
    async fn test_begin_create_defaults() {
        let fake = FakeTransport::new(vec![json!({"_id": "a"}), json!({"_id": "b"})]);
        let mut client =
            client(&fake).with_partition_context("category", json!("strategic"));
        client.refresh().await.unwrap();

        client.begin_create();
        let draft = client.draft().unwrap();
        assert_eq!(draft["order"], json!(3));
        assert_eq!(draft["isActive"], json!(true));
        assert_eq!(draft["category"], json!("strategic"));
    }

    #[tokio::test]
    async fn test_save_create_closes_draft_and_refreshes() {
        let fake = FakeTransport::new(vec![]);
        let mut client = client(&fake);
        client.refresh().await.unwrap();

        client.begin_create();
        client.set_field("name", json!("Acme Mediation")).unwrap();
        client.save().await.unwrap();

        assert!(client.draft().is_none());
        assert_eq!(client.records().len(), 1);
        assert!(client
            .take_notices()
            .iter()
            .any(|n| n.kind == NoticeKind::Success));
    }

    #[tokio::test]
    async fn test_failed_save_keeps_draft_open() {
        let fake = FakeTransport::new(vec![]);
        let mut client = client(&fake);

        client.begin_create();
        client.set_field("name", json!("")).unwrap();
        fake.fail_next(400, "field 'name' must be a non-empty string");

        assert!(client.save().await.is_err());
        assert!(client.draft().is_some());

        // The endpoint's message is surfaced verbatim
        let notices = client.take_notices();
        assert_eq!(notices[0].message, "field 'name' must be a non-empty string");
    }

    #[tokio::test]
    async fn test_begin_edit_copies_record() {
        let fake = FakeTransport::new(vec![json!({"_id": "a", "name": "Acme"})]);
        let mut client = client(&fake);
        client.refresh().await.unwrap();

        client.begin_edit("a").unwrap();
        assert_eq!(client.draft().unwrap()["name"], json!("Acme"));

        assert!(matches!(
            client.begin_edit("zzz"),
            Err(ClientError::MissingRecord(_))
        ));
    }

    #[tokio::test]
    async fn test_save_edit_routes_to_update() {
        let fake = FakeTransport::new(vec![json!({"_id": "a", "name": "Acme"})]);
        let mut client = client(&fake);
        client.refresh().await.unwrap();

        client.begin_edit("a").unwrap();
        client.set_field("name", json!("Acme Mediation")).unwrap();
        client.save().await.unwrap();

        assert_eq!(client.records()[0]["name"], json!("Acme Mediation"));
    }

    #[tokio::test]
    async fn test_cancel_discards_draft() {
        let fake = FakeTransport::new(vec![]);
        let mut client = client(&fake);
        client.begin_create();
        client.cancel();
        assert!(client.draft().is_none());
        assert!(matches!(
            client.set_field("name", json!("x")),
            Err(ClientError::NoDraft)
        ));
    }

    #[tokio::test]
    async fn test_delete_confirmation_gate() {
        let fake = FakeTransport::new(vec![json!({"_id": "a", "name": "Acme"})]);
        let mut client = client(&fake);
        client.refresh().await.unwrap();

        // Declined: nothing happens
        let deleted = client.delete_record("a", |_| false).await.unwrap();
        assert!(!deleted);
        assert_eq!(client.records().len(), 1);

        // Confirmed: optimistic removal from the local cache
        let deleted = client.delete_record("a", |_| true).await.unwrap();
        assert!(deleted);
        assert!(client.records().is_empty());
    }

    #[tokio::test]
    async fn test_failed_delete_leaves_cache() {
        let fake = FakeTransport::new(vec![json!({"_id": "a", "name": "Acme"})]);
        let mut client = client(&fake);
        client.refresh().await.unwrap();

        fake.fail_next(404, "record a not found in partners");
        assert!(client.delete_record("a", |_| true).await.is_err());
        assert_eq!(client.records().len(), 1);
        assert!(client
            .take_notices()
            .iter()
            .any(|n| n.kind == NoticeKind::Error));
    }
}
