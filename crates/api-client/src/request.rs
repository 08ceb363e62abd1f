//! Request descriptors
//!
//! Endpoint modules describe a call as an [`ApiRequest`] and leave sending it
//! to [`YotpoClient::send`](crate::client::YotpoClient::send). Keeping the
//! description separate from the transport makes every mapping a pure
//! function that can be inspected without a network.

use crate::payload::Payload;
use serde::Serialize;
use std::fmt;

/// HTTP verbs the transport exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// Parameters travel as a query string
    Get,
    /// Parameters travel as a JSON body
    Post,
    /// Parameters travel as a JSON body
    Put,
    /// Parameters travel as a query string
    Delete,
}

impl HttpMethod {
    /// Whether parameters for this verb go in the request body
    #[must_use]
    pub fn has_body(self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }

    pub(crate) fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// One outbound call: verb, path relative to the base URL, and parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiRequest {
    /// HTTP verb
    pub method: HttpMethod,
    /// Path exactly as the endpoint expects it
    pub path: String,
    /// Query (GET/DELETE) or body (POST/PUT); `None` sends neither
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Payload>,
}

impl ApiRequest {
    /// GET with a query string
    pub fn get(path: impl Into<String>, query: Payload) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            params: Some(query),
        }
    }

    /// GET with nothing but the path
    pub fn get_bare(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            params: None,
        }
    }

    /// POST with a JSON body
    pub fn post(path: impl Into<String>, body: Payload) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.into(),
            params: Some(body),
        }
    }

    /// PUT with a JSON body
    pub fn put(path: impl Into<String>, body: Payload) -> Self {
        Self {
            method: HttpMethod::Put,
            path: path.into(),
            params: Some(body),
        }
    }
}

impl fmt::Display for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::SparsePayload;
    use serde_json::json;

    #[test]
    fn test_body_verbs() {
        assert!(HttpMethod::Post.has_body());
        assert!(HttpMethod::Put.has_body());
        assert!(!HttpMethod::Get.has_body());
        assert!(!HttpMethod::Delete.has_body());
    }

    #[test]
    fn test_display() {
        let request = ApiRequest::get_bare("products/abc/yotpo_site_reviews/bottomline");
        assert_eq!(
            request.to_string(),
            "GET products/abc/yotpo_site_reviews/bottomline"
        );
    }

    #[test]
    fn test_serialize_skips_missing_params() {
        let bare = serde_json::to_value(ApiRequest::get_bare("reviews/1/vote/up")).unwrap();
        assert_eq!(bare, json!({"method": "GET", "path": "reviews/1/vote/up"}));

        let with_body = ApiRequest::put(
            "reviews/async_update",
            SparsePayload::new().required("sync", true).build(),
        );
        let value = serde_json::to_value(with_body).unwrap();
        assert_eq!(value["method"], "PUT");
        assert_eq!(value["params"], json!({"sync": true}));
    }
}
