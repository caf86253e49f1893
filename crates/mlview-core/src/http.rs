//! Generic HTTP helpers.
//!
//! `post` and `get` build an [`HttpRequest`] and hand it to an
//! [`HttpTransport`]. The transport is the only piece that touches the
//! network: the browser build plugs in gloo-net, the native binaries plug in
//! reqwest, and tests plug in a recorder.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{MlviewError, Result};
use crate::models::ErrorBody;

pub const APPLICATION_JSON: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request ready to be sent. `url` is whatever the caller passed, usually a
/// path relative to the page origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// JSON POST with `Accept` and `Content-Type` set to `application/json`.
    pub fn post_json<B: Serialize + ?Sized>(url: &str, data: &B) -> Result<Self> {
        let body = serde_json::to_string(data).map_err(MlviewError::Encode)?;
        Ok(Self {
            method: HttpMethod::Post,
            url: url.to_string(),
            headers: vec![
                ("Accept".to_string(), APPLICATION_JSON.to_string()),
                ("Content-Type".to_string(), APPLICATION_JSON.to_string()),
            ],
            body: Some(body),
        })
    }

    /// GET with `params` appended as a query string.
    pub fn get<I, K, V>(url: &str, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let query = encode_query(params);
        let url = if query.is_empty() {
            url.to_string()
        } else {
            format!("{}?{}", url, query)
        };
        Self {
            method: HttpMethod::Get,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Percent-encodes `key=value` pairs joined by `&`, in iteration order.
pub fn encode_query<I, K, V>(params: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    params
        .into_iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                urlencoding::encode(k.as_ref()),
                urlencoding::encode(v.as_ref())
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// A response whose body has not been decoded yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub url: String,
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status,
            body: body.into(),
        }
    }

    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Fails with [`MlviewError::Status`] on a non-2xx status, otherwise
    /// decodes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        if !self.ok() {
            return Err(MlviewError::Status {
                status: self.status,
                url: self.url.clone(),
                message: self.error_message(),
            });
        }
        serde_json::from_str(&self.body).map_err(MlviewError::Decode)
    }

    fn error_message(&self) -> String {
        match serde_json::from_str::<ErrorBody>(&self.body) {
            Ok(err) => match err.error_code {
                Some(code) => format!("{} ({})", err.message, code),
                None => err.message,
            },
            Err(_) if self.body.trim().is_empty() => "empty response body".to_string(),
            Err(_) => self.body.trim().to_string(),
        }
    }
}

/// Sends one request and returns the raw response. Implementations must not
/// retry or cache.
#[allow(async_fn_in_trait)]
pub trait HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Issues a JSON POST of `data` to `url`.
pub async fn post<T, B>(transport: &T, url: &str, data: &B) -> Result<HttpResponse>
where
    T: HttpTransport + ?Sized,
    B: Serialize + ?Sized,
{
    let request = HttpRequest::post_json(url, data)?;
    debug!("POST {}", request.url);
    transport.send(request).await
}

/// Issues a GET to `url` with `params` as the query string.
pub async fn get<T, I, K, V>(transport: &T, url: &str, params: I) -> Result<HttpResponse>
where
    T: HttpTransport + ?Sized,
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let request = HttpRequest::get(url, params);
    debug!("GET {}", request.url);
    transport.send(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_json_sets_headers_and_body() {
        let req = HttpRequest::post_json("/x", &serde_json::json!({"a": 1})).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.header("accept"), Some("application/json"));
        assert_eq!(req.header("Content-Type"), Some("application/json"));
        assert_eq!(req.body.as_deref(), Some(r#"{"a":1}"#));
    }

    #[test]
    fn test_get_encodes_query() {
        let req = HttpRequest::get("/runs/get", [("run_id", "a b&c")]);
        assert_eq!(req.url, "/runs/get?run_id=a%20b%26c");
        assert!(req.body.is_none());

        let req = HttpRequest::get("/plain", Vec::<(String, String)>::new());
        assert_eq!(req.url, "/plain");
    }

    #[test]
    fn test_status_error_uses_server_message() {
        let resp = HttpResponse::new(
            "/runs/get",
            404,
            r#"{"error_code":"RESOURCE_DOES_NOT_EXIST","message":"Run 'x' not found"}"#,
        );
        let err = resp.json::<serde_json::Value>().unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains("Run 'x' not found"));
    }

    #[test]
    fn test_malformed_body_is_decode_error() {
        let resp = HttpResponse::new("/x", 200, "<html>");
        let err = resp.json::<serde_json::Value>().unwrap_err();
        assert!(matches!(err, MlviewError::Decode(_)));
    }
}
