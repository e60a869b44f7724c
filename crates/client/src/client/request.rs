//! Replayable request descriptor

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::error::ClientError;

/// Header carried by a request replayed after a credential refresh
pub const RETRY_HEADER: &str = "X-Retry";

/// An outbound request captured as owned data so it can be sent again
///
/// The descriptor is built once per call. If the first attempt is rejected
/// with 401 and the credential is refreshed, the same descriptor is marked
/// as a retry and sent once more. A descriptor that is already a retry is
/// never replayed.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Value>,
    retry: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            retry: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a JSON body
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ClientError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Append query parameters from a flat struct or map; `None` fields are skipped
    pub fn query<Q: Serialize + ?Sized>(mut self, params: &Q) -> Result<Self, ClientError> {
        match serde_json::to_value(params)? {
            Value::Object(map) => {
                for (key, value) in map {
                    match value {
                        Value::Null => {}
                        Value::String(s) => self.query.push((key, s)),
                        other => self.query.push((key, other.to_string())),
                    }
                }
                Ok(self)
            }
            Value::Null => Ok(self),
            other => Err(ClientError::Configuration(format!(
                "query parameters must serialize to an object, got {other}"
            ))),
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Whether this request is already the one permitted replay
    pub fn is_retry(&self) -> bool {
        self.retry
    }

    pub(crate) fn mark_retry(&mut self) {
        self.retry = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Filters {
        status: Option<&'static str>,
        page: Option<u32>,
        search: Option<String>,
    }

    #[test]
    fn test_query_skips_unset_fields() {
        let request = ApiRequest::get("/logs")
            .query(&Filters {
                status: Some("pending"),
                page: Some(2),
                search: None,
            })
            .unwrap();

        let mut pairs = request.query_pairs().to_vec();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("page".to_string(), "2".to_string()),
                ("status".to_string(), "pending".to_string()),
            ]
        );
    }

    #[test]
    fn test_query_rejects_non_object() {
        let result = ApiRequest::get("/logs").query(&[1, 2, 3]);
        assert!(matches!(result, Err(ClientError::Configuration(_))));
    }

    #[test]
    fn test_retry_marker_is_one_shot_state() {
        let mut request = ApiRequest::post("/rules")
            .json(&json!({"name": "greeting"}))
            .unwrap();
        assert!(!request.is_retry());

        request.mark_retry();
        let replay = request.clone();
        assert!(replay.is_retry());
        assert_eq!(replay.body(), Some(&json!({"name": "greeting"})));
    }
}
