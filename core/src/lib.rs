//! Synchronous API client core for the grade service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip through an `HttpTransport` of its choosing.
//!
//! # Design
//! - `Configuration` answers the per-request questions: content type and
//!   accept selection, credential lookup, parameter encoding.
//! - `param` holds the parameter descriptor and the percent-encoding codecs.
//! - `GradeControllerClient` splits each endpoint into `build_*` and
//!   `parse_*`; `GradeControllerService` adds a transport on top.
//! - `ApiModule` registers the single root configuration of an application.

pub mod client;
pub mod configuration;
pub mod error;
pub mod http;
pub mod module;
pub mod param;
pub mod types;

pub use client::{GradeControllerClient, GradeControllerService, DEFAULT_BASE_PATH};
pub use configuration::{
    is_json_mime, AccessToken, Configuration, ConfigurationParameters, Credential, CredentialProvider,
};
pub use error::{ApiError, ModuleError, TransportError};
pub use http::{add_to_query, HttpMethod, HttpRequest, HttpResponse, HttpTransport, QueryParams};
pub use module::ApiModule;
pub use param::{
    default_encode_param, CustomParameterCodec, DefaultParamEncoder, Param, ParamEncoder, ParamLocation,
    ParamStyle, ParamValue, ParameterCodec, DATE_TIME_FORMAT,
};
pub use types::Grade;
