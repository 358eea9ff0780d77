//! Connection settings shared by every endpoint of the grade API.
//!
//! # Design
//! `Configuration` is built once from `ConfigurationParameters` and then only
//! read. It answers the three questions every request builder asks: which
//! content type and accept header to send, how to encode a parameter, and
//! which credential belongs to a security scheme. None of these lookups fail;
//! an absent answer is `None`.
//!
//! Pluggable behavior is expressed as `Send + Sync` capability traits behind
//! `Arc`, so a configuration can be shared across threads as-is.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use regex::Regex;
use serde::Deserialize;

use crate::param::{DefaultParamEncoder, Param, ParamEncoder, ParameterCodec};

/// Produces a credential on demand, e.g. a token refreshed elsewhere.
pub trait CredentialProvider: Send + Sync {
    fn credential(&self) -> Option<String>;
}

impl<F> CredentialProvider for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn credential(&self) -> Option<String> {
        self()
    }
}

/// A secret bound to a named security scheme.
#[derive(Clone, Deserialize)]
#[serde(from = "String")]
pub enum Credential {
    Static(String),
    Provider(Arc<dyn CredentialProvider>),
}

impl Credential {
    pub fn provider(provider: impl CredentialProvider + 'static) -> Self {
        Credential::Provider(Arc::new(provider))
    }

    pub fn resolve(&self) -> Option<String> {
        match self {
            Credential::Static(secret) => Some(secret.clone()),
            Credential::Provider(provider) => provider.credential(),
        }
    }
}

impl From<String> for Credential {
    fn from(secret: String) -> Self {
        Credential::Static(secret)
    }
}

impl From<&str> for Credential {
    fn from(secret: &str) -> Self {
        Credential::Static(secret.to_string())
    }
}

// Secrets never end up in logs.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credential::Static(_) => f.write_str("Static(..)"),
            Credential::Provider(_) => f.write_str("Provider(..)"),
        }
    }
}

/// Legacy access token field.
///
/// Deprecated in favor of `credentials`; kept so older callers can still set
/// it. Nothing in this crate reads it.
pub type AccessToken = Credential;

/// Input for `Configuration::new`. Every field is optional.
///
/// The plain-data subset can be loaded from JSON with `from_json`; the
/// pluggable capabilities must be set in code.
#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigurationParameters {
    /// Deprecated: use `credentials`.
    pub api_keys: Option<HashMap<String, String>>,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Deprecated: use `credentials`.
    pub access_token: Option<AccessToken>,
    pub base_path: Option<String>,
    pub with_credentials: Option<bool>,
    /// Query-string key/value escaping.
    #[serde(skip)]
    pub encoder: Option<Arc<dyn ParameterCodec>>,
    /// Overrides the default path/query parameter encoding.
    #[serde(skip)]
    pub encode_param: Option<Arc<dyn ParamEncoder>>,
    /// Keys are the security scheme names of the API description; values are
    /// the raw secret without any `Basic`/`Bearer` prefix.
    pub credentials: Option<HashMap<String, Credential>>,
}

impl ConfigurationParameters {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Resolved client configuration.
#[derive(Clone)]
pub struct Configuration {
    /// Deprecated: use `credentials`.
    pub api_keys: Option<HashMap<String, String>>,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Deprecated: use `credentials`.
    pub access_token: Option<AccessToken>,
    pub base_path: Option<String>,
    pub with_credentials: Option<bool>,
    pub encoder: Option<Arc<dyn ParameterCodec>>,
    pub encode_param: Arc<dyn ParamEncoder>,
    pub credentials: HashMap<String, Credential>,
}

impl Configuration {
    pub fn new(params: ConfigurationParameters) -> Self {
        Self {
            api_keys: params.api_keys,
            username: params.username,
            password: params.password,
            access_token: params.access_token,
            base_path: params.base_path,
            with_credentials: params.with_credentials,
            encoder: params.encoder,
            encode_param: params
                .encode_param
                .unwrap_or_else(|| Arc::new(DefaultParamEncoder)),
            credentials: params.credentials.unwrap_or_default(),
        }
    }

    /// Pick the content type to send with a request body.
    ///
    /// Returns the first JSON MIME type among `content_types`, else the first
    /// entry, else `None` when the list is empty.
    pub fn select_header_content_type<'a, S: AsRef<str>>(
        &self,
        content_types: &'a [S],
    ) -> Option<&'a str> {
        select_json_first(content_types)
    }

    /// Pick the `Accept` header value. Same rule as
    /// `select_header_content_type`.
    pub fn select_header_accept<'a, S: AsRef<str>>(&self, accepts: &'a [S]) -> Option<&'a str> {
        select_json_first(accepts)
    }

    /// Check whether `mime` denotes JSON, e.g. `application/json`,
    /// `application/json; charset=UTF8`, `APPLICATION/JSON` or
    /// `application/vnd.company+json`.
    pub fn is_json_mime(&self, mime: &str) -> bool {
        is_json_mime(Some(mime))
    }

    /// Look up the credential for a security scheme. Providers are invoked on
    /// every call.
    pub fn lookup_credential(&self, key: &str) -> Option<String> {
        let credential = self.credentials.get(key);
        log::trace!("credential lookup for scheme {key:?}: configured={}", credential.is_some());
        credential.and_then(Credential::resolve)
    }

    pub fn encode_param(&self, param: &Param) -> String {
        self.encode_param.encode(param)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new(ConfigurationParameters::default())
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("base_path", &self.base_path)
            .field("with_credentials", &self.with_credentials)
            .field("username", &self.username)
            .field("credentials", &self.credentials)
            .field("custom_encoder", &self.encoder.is_some())
            .finish_non_exhaustive()
    }
}

fn select_json_first<S: AsRef<str>>(candidates: &[S]) -> Option<&str> {
    let mut mimes = candidates.iter().map(S::as_ref);
    let first = mimes.clone().next()?;
    Some(mimes.find(|mime| is_json_mime(Some(*mime))).unwrap_or(first))
}

/// Free-function form of `Configuration::is_json_mime` that also accepts an
/// absent value.
pub fn is_json_mime(mime: Option<&str>) -> bool {
    static JSON_MIME: OnceLock<Regex> = OnceLock::new();
    let Some(mime) = mime else {
        return false;
    };
    let re = JSON_MIME.get_or_init(|| {
        Regex::new(r"(?i)^(application/json|[^;/\s]+/[^;/\s]+\+json)\s*(;.*)?$").unwrap()
    });
    re.is_match(mime) || mime.to_lowercase() == "application/json-patch+json"
}
