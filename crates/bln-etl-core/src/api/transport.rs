//! HTTP seam between the client and the platform.

use crate::Result;
use reqwest::blocking::Client as HttpClient;
use reqwest::header::AUTHORIZATION;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde_json::Value;
use std::fs::File;
use std::path::Path;

/// A GraphQL request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest {
    /// Operation to run when the document defines several.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<&'static str>,

    /// GraphQL document.
    pub query: &'static str,

    /// Variables object.
    pub variables: Value,
}

impl GraphQlRequest {
    /// Creates a request with no variables.
    #[must_use]
    pub fn new(query: &'static str) -> Self {
        Self {
            operation_name: None,
            query,
            variables: Value::Object(serde_json::Map::new()),
        }
    }

    /// Sets the variables object.
    #[must_use]
    pub fn with_variables(mut self, variables: Value) -> Self {
        self.variables = variables;
        self
    }

    /// Sets the operation name.
    #[must_use]
    pub fn with_operation(mut self, name: &'static str) -> Self {
        self.operation_name = Some(name);
        self
    }
}

/// Sends requests to the platform.
///
/// [`HttpTransport`] is the production implementation; tests substitute a
/// mock to assert on requests and script responses.
#[cfg_attr(test, mockall::automock)]
pub trait Transport {
    /// Posts a GraphQL request and returns the decoded JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`](crate::Error::Http) on transport failure or a
    /// non-JSON body.
    fn post(&self, token: &str, request: &GraphQlRequest) -> Result<Value>;

    /// Uploads the file at `path` to a pre-signed `uri`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be opened and
    /// [`Error::Http`](crate::Error::Http) on a failed or rejected upload.
    fn put_file(&self, uri: &str, path: &Path) -> Result<()>;
}

/// Blocking `reqwest` transport bound to one endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: HttpClient,
    endpoint: String,
}

impl HttpTransport {
    /// Creates a transport for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`](crate::Error::Http) if the HTTP client cannot
    /// be built (TLS backend initialization).
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let http = HttpClient::builder()
            .user_agent(concat!("bln-etl/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    /// Endpoint requests are posted to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Transport for HttpTransport {
    fn post(&self, token: &str, request: &GraphQlRequest) -> Result<Value> {
        tracing::debug!(
            endpoint = %self.endpoint,
            operation = request.operation_name.unwrap_or("query"),
            "posting GraphQL request"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("JWT {token}"))
            .json(request)
            .send()?;

        let status = response.status();
        let body: Value = response.json()?;
        tracing::debug!(%status, "GraphQL response received");
        Ok(body)
    }

    fn put_file(&self, uri: &str, path: &Path) -> Result<()> {
        let file = File::open(path)?;
        let size = file.metadata()?.len();

        self.http
            .put(uri)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(file)
            .send()?
            .error_for_status()?;

        tracing::debug!(path = %path.display(), bytes = size, "uploaded file");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serializes_camel_case() {
        let request = GraphQlRequest::new("query { x }")
            .with_operation("DeleteFile")
            .with_variables(json!({"id": "abc"}));

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({
                "operationName": "DeleteFile",
                "query": "query { x }",
                "variables": {"id": "abc"},
            })
        );
    }

    #[test]
    fn test_request_omits_missing_operation() {
        let body = serde_json::to_value(GraphQlRequest::new("query { x }")).unwrap();
        assert!(body.get("operationName").is_none());
        assert_eq!(body["variables"], json!({}));
    }

    #[test]
    fn test_http_transport_keeps_endpoint() {
        let transport = HttpTransport::new("http://localhost:1/graphql").unwrap();
        assert_eq!(transport.endpoint(), "http://localhost:1/graphql");
    }
}
