//! Request builders and response parsers for the grade controller endpoints.
//!
//! # Design
//! `GradeControllerClient` holds a shared `Configuration` and the resolved
//! base path; it carries no mutable state between calls. Each endpoint is
//! split into a `build_*` method that produces an `HttpRequest` and a
//! `parse_*` method that consumes an `HttpResponse`. Header selection,
//! parameter encoding and query escaping all go through the configuration.
//!
//! `GradeControllerService` pairs a client with an `HttpTransport` for callers
//! that want one call per endpoint.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::configuration::Configuration;
use crate::error::ApiError;
use crate::http::{add_to_query, HttpMethod, HttpRequest, HttpResponse, HttpTransport, QueryParams};
use crate::param::{CustomParameterCodec, Param};
use crate::types::Grade;

/// Base path used when neither the configuration nor the caller provides one.
pub const DEFAULT_BASE_PATH: &str = "http://localhost:8080";

const ACCEPTS: &[&str] = &["*/*"];
const CONSUMES_JSON: &[&str] = &["application/json"];

/// Stateless builder/parser for the grade controller.
#[derive(Debug, Clone)]
pub struct GradeControllerClient {
    configuration: Arc<Configuration>,
    base_path: String,
    /// Headers added to every request before endpoint-specific ones.
    pub default_headers: Vec<(String, String)>,
}

impl GradeControllerClient {
    pub fn new(configuration: Arc<Configuration>) -> Self {
        Self::with_base_path(configuration, None)
    }

    /// The configuration's `base_path` wins over `base_path`; the default is
    /// used when neither is set.
    pub fn with_base_path(configuration: Arc<Configuration>, base_path: Option<&str>) -> Self {
        let resolved = configuration
            .base_path
            .as_deref()
            .or(base_path)
            .unwrap_or(DEFAULT_BASE_PATH)
            .trim_end_matches('/')
            .to_string();
        Self {
            configuration,
            base_path: resolved,
            default_headers: Vec::new(),
        }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn build_add_grade(&self, grade: &Grade) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(grade).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        let mut req = self.request(HttpMethod::Post, "/grades".to_string(), QueryParams::new());
        if let Some(content_type) = self.configuration.select_header_content_type(CONSUMES_JSON) {
            req.headers.push(("Content-Type".to_string(), content_type.to_string()));
        }
        req.body = Some(body);
        Ok(req)
    }

    pub fn build_get_form(&self, id: Option<&str>) -> HttpRequest {
        let mut query = QueryParams::new();
        if let Some(id) = id {
            add_to_query(&mut query, &serde_json::Value::from(id), Some("id"));
        }
        self.request(HttpMethod::Get, "/grades/form".to_string(), query)
    }

    pub fn build_get_grade(&self, id: &str) -> Result<HttpRequest, ApiError> {
        if id.is_empty() {
            return Err(ApiError::MissingParameter("id"));
        }
        let id = self.configuration.encode_param(&Param::path("id", id, "string"));
        Ok(self.request(HttpMethod::Get, format!("/grades/{id}"), QueryParams::new()))
    }

    pub fn build_get_grades(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/grades".to_string(), QueryParams::new())
    }

    pub fn parse_add_grade(&self, response: HttpResponse) -> Result<String, ApiError> {
        check_status(&response)?;
        Ok(response.body)
    }

    pub fn parse_get_form(&self, response: HttpResponse) -> Result<String, ApiError> {
        check_status(&response)?;
        Ok(response.body)
    }

    pub fn parse_get_grade(&self, response: HttpResponse) -> Result<Grade, ApiError> {
        check_status(&response)?;
        parse_json(&response)
    }

    pub fn parse_get_grades(&self, response: HttpResponse) -> Result<Vec<Grade>, ApiError> {
        check_status(&response)?;
        parse_json(&response)
    }

    fn request(&self, method: HttpMethod, path: String, query: QueryParams) -> HttpRequest {
        let mut headers = self.default_headers.clone();
        if let Some(accept) = self.configuration.select_header_accept(ACCEPTS) {
            headers.push(("Accept".to_string(), accept.to_string()));
        }
        let query = match &self.configuration.encoder {
            Some(codec) => query.encode(codec.as_ref()),
            None => query.encode(&CustomParameterCodec),
        };
        let req = HttpRequest {
            method,
            path: format!("{}{path}", self.base_path),
            query,
            headers,
            body: None,
            with_credentials: self.configuration.with_credentials.unwrap_or(false),
        };
        log::debug!("built {} {}", req.method.as_str(), req.url());
        req
    }
}

/// Map non-2xx status codes to the matching `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    match response.status {
        200..=299 => Ok(()),
        404 => Err(ApiError::NotFound),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}

fn parse_json<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Grade controller bound to a transport.
pub struct GradeControllerService<T> {
    client: GradeControllerClient,
    transport: T,
}

impl<T: HttpTransport> GradeControllerService<T> {
    pub fn new(client: GradeControllerClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &GradeControllerClient {
        &self.client
    }

    pub fn add_grade(&self, grade: &Grade) -> Result<String, ApiError> {
        let req = self.client.build_add_grade(grade)?;
        self.client.parse_add_grade(self.transport.execute(req)?)
    }

    pub fn get_form(&self, id: Option<&str>) -> Result<String, ApiError> {
        let req = self.client.build_get_form(id);
        self.client.parse_get_form(self.transport.execute(req)?)
    }

    pub fn get_grade(&self, id: &str) -> Result<Grade, ApiError> {
        let req = self.client.build_get_grade(id)?;
        self.client.parse_get_grade(self.transport.execute(req)?)
    }

    pub fn get_grades(&self) -> Result<Vec<Grade>, ApiError> {
        let req = self.client.build_get_grades();
        self.client.parse_get_grades(self.transport.execute(req)?)
    }
}
