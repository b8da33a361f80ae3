//! HTTP transport for the admin client.

use async_trait::async_trait;
use serde_json::Value;

use super::{AdminSession, ClientError};

/// The four wire calls of the content contract, abstracted so the client
/// state machine can be exercised against an in-memory double.
#[async_trait]
pub trait ContentTransport: Send + Sync {
    async fn list(
        &self,
        session: &AdminSession,
        resource: &str,
        all: bool,
    ) -> Result<Vec<Value>, ClientError>;

    async fn create(
        &self,
        session: &AdminSession,
        resource: &str,
        body: Value,
    ) -> Result<Value, ClientError>;

    async fn update(
        &self,
        session: &AdminSession,
        resource: &str,
        body: Value,
    ) -> Result<Value, ClientError>;

    async fn delete(
        &self,
        session: &AdminSession,
        resource: &str,
        id: &str,
    ) -> Result<(), ClientError>;
}

/// reqwest-backed transport speaking the `{success, data}` envelope.
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    fn authorize(
        &self,
        request: reqwest::RequestBuilder,
        session: &AdminSession,
    ) -> reqwest::RequestBuilder {
        match &session.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Unwrap the `{success, data}` / `{success:false, error}` envelope.
    async fn unwrap_envelope(response: reqwest::Response) -> Result<Value, ClientError> {
        let status = response.status().as_u16();
        let body: Value = response.json().await?;

        if body.get("success").and_then(Value::as_bool).unwrap_or(false) {
            Ok(body.get("data").cloned().unwrap_or(Value::Null))
        } else {
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("request failed")
                .to_string();
            Err(ClientError::Api { status, message })
        }
    }

    /// Admin read of the audit trail; not part of the per-resource contract.
    pub async fn audit_list(
        &self,
        session: &AdminSession,
        resource: Option<&str>,
        action: Option<&str>,
        limit: Option<i64>,
    ) -> Result<Vec<Value>, ClientError> {
        let mut request = self.http.get(session.endpoint("api/audit"));
        if let Some(resource) = resource {
            request = request.query(&[("resource", resource)]);
        }
        if let Some(action) = action {
            request = request.query(&[("action", action)]);
        }
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit.to_string())]);
        }

        let response = self.authorize(request, session).send().await?;
        let data = Self::unwrap_envelope(response).await?;
        Ok(data.as_array().cloned().unwrap_or_default())
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentTransport for HttpTransport {
    async fn list(
        &self,
        session: &AdminSession,
        resource: &str,
        all: bool,
    ) -> Result<Vec<Value>, ClientError> {
        let mut request = self
            .http
            .get(session.endpoint(&format!("api/content/{}", resource)));
        if all {
            request = request.query(&[("all", "true")]);
        }

        let response = self.authorize(request, session).send().await?;
        let data = Self::unwrap_envelope(response).await?;
        Ok(data.as_array().cloned().unwrap_or_default())
    }

    async fn create(
        &self,
        session: &AdminSession,
        resource: &str,
        body: Value,
    ) -> Result<Value, ClientError> {
        let request = self
            .http
            .post(session.endpoint(&format!("api/content/{}", resource)))
            .json(&body);

        let response = self.authorize(request, session).send().await?;
        Self::unwrap_envelope(response).await
    }

    async fn update(
        &self,
        session: &AdminSession,
        resource: &str,
        body: Value,
    ) -> Result<Value, ClientError> {
        let request = self
            .http
            .put(session.endpoint(&format!("api/content/{}", resource)))
            .json(&body);

        let response = self.authorize(request, session).send().await?;
        Self::unwrap_envelope(response).await
    }

    async fn delete(
        &self,
        session: &AdminSession,
        resource: &str,
        id: &str,
    ) -> Result<(), ClientError> {
        let request = self
            .http
            .delete(session.endpoint(&format!("api/content/{}", resource)))
            .query(&[("id", id)]);

        let response = self.authorize(request, session).send().await?;
        Self::unwrap_envelope(response).await.map(|_| ())
    }
}
