//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. The client builds `HttpRequest`
//! values and parses `HttpResponse` values; an `HttpTransport` supplied by the
//! caller does the actual network exchange. Query parameters are kept as raw
//! key/value pairs until the request is rendered, so the configured
//! `ParameterCodec` decides how they are escaped.

use serde_json::Value;

use crate::error::TransportError;
use crate::param::ParameterCodec;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// Ordered, multi-valued query parameters. Keys and values are stored
/// unescaped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Render as `k1=v1&k2=v2`, escaping through `codec`.
    pub fn encode(&self, codec: &dyn ParameterCodec) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", codec.encode_key(k), codec.encode_value(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Flatten `value` into query parameters under `key`.
///
/// Objects recurse with `parent.child` keys, arrays repeat the same key for
/// each element, and nulls are skipped. A scalar without a key is dropped.
pub fn add_to_query(params: &mut QueryParams, value: &Value, key: Option<&str>) {
    match value {
        Value::Null => {}
        Value::Object(fields) => {
            for (field, inner) in fields {
                let nested = match key {
                    Some(parent) => format!("{parent}.{field}"),
                    None => field.clone(),
                };
                add_to_query(params, inner, Some(&nested));
            }
        }
        Value::Array(items) => {
            for item in items {
                add_to_query(params, item, key);
            }
        }
        Value::String(s) => append_scalar(params, key, s.clone()),
        Value::Number(n) => append_scalar(params, key, n.to_string()),
        Value::Bool(b) => append_scalar(params, key, b.to_string()),
    }
}

fn append_scalar(params: &mut QueryParams, key: Option<&str>, value: String) {
    match key {
        Some(key) => params.append(key, value),
        None => log::warn!("dropping query value {value:?}: no parameter name given"),
    }
}

/// An HTTP request described as plain data.
///
/// Built by `GradeControllerClient::build_*` methods. The caller is
/// responsible for executing it and returning the matching `HttpResponse`.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    /// Query string already escaped by the configured codec, without `?`.
    pub query: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub with_credentials: bool,
}

impl HttpRequest {
    /// Full URL including the query string.
    pub fn url(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query)
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Executes requests on behalf of the client.
pub trait HttpTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::param::CustomParameterCodec;

    #[test]
    fn nested_objects_use_dotted_keys() {
        let mut params = QueryParams::new();
        add_to_query(&mut params, &json!({"filter": {"course": "math", "min": 3}}), None);
        assert_eq!(params.get_all("filter.course"), vec!["math"]);
        assert_eq!(params.get_all("filter.min"), vec!["3"]);
    }

    #[test]
    fn arrays_repeat_the_key() {
        let mut params = QueryParams::new();
        add_to_query(&mut params, &json!(["a", "b", null, true]), Some("tag"));
        assert_eq!(params.get_all("tag"), vec!["a", "b", "true"]);
    }

    #[test]
    fn scalar_without_key_is_dropped() {
        let mut params = QueryParams::new();
        add_to_query(&mut params, &json!("orphan"), None);
        assert!(params.is_empty());
    }

    #[test]
    fn encode_escapes_through_codec() {
        let mut params = QueryParams::new();
        params.append("q", "1+1 = 2");
        params.append("a b", "x");
        assert_eq!(params.encode(&CustomParameterCodec), "q=1%2B1%20%3D%202&a%20b=x");
    }

    #[test]
    fn url_appends_query_only_when_present() {
        let mut req = HttpRequest {
            method: HttpMethod::Get,
            path: "http://localhost/grades".to_string(),
            query: String::new(),
            headers: vec![("Accept".to_string(), "*/*".to_string())],
            body: None,
            with_credentials: false,
        };
        assert_eq!(req.url(), "http://localhost/grades");
        req.query = "id=1".to_string();
        assert_eq!(req.url(), "http://localhost/grades?id=1");
        assert_eq!(req.header("accept"), Some("*/*"));
    }
}
