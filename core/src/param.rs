//! Parameter descriptors and the codecs that turn them into URL text.
//!
//! # Design
//! A `Param` describes one endpoint parameter at call time: its raw value plus
//! the OpenAPI metadata (location, style, format) the generated endpoint knew
//! about. `ParamEncoder` turns a `Param` into the string placed in a path
//! segment or query value. `ParameterCodec` is the separate key/value escaping
//! capability used when a whole query string is rendered.
//!
//! Both encoders use the strict component rule: everything outside the
//! RFC 3986 unreserved set is percent-encoded, so `+`, `%` and space are
//! always escaped and never left to the transport's form encoding.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};

/// The format tag that enables ISO-8601 rendering of date-time values.
pub const DATE_TIME_FORMAT: &str = "date-time";

/// Where a parameter is placed in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamLocation {
    Path,
    Query,
    Header,
    Cookie,
}

/// OpenAPI serialization style of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamStyle {
    Simple,
    Form,
    Label,
    Matrix,
    DeepObject,
    PipeDelimited,
    SpaceDelimited,
}

/// The raw value of a parameter before encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    DateTime(DateTime<Utc>),
    Null,
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(s) => f.write_str(s),
            ParamValue::Integer(n) => write!(f, "{n}"),
            ParamValue::Float(n) => write!(f, "{n}"),
            ParamValue::Boolean(b) => write!(f, "{b}"),
            ParamValue::DateTime(dt) => write!(f, "{dt}"),
            ParamValue::Null => f.write_str("null"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Integer(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Boolean(value)
    }
}

impl From<DateTime<Utc>> for ParamValue {
    fn from(value: DateTime<Utc>) -> Self {
        ParamValue::DateTime(value)
    }
}

/// A single endpoint parameter, described at call time.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub value: ParamValue,
    pub location: ParamLocation,
    pub style: ParamStyle,
    pub explode: bool,
    pub data_type: String,
    pub data_format: Option<String>,
}

impl Param {
    /// A `simple`-style path parameter, the shape every generated path
    /// segment uses.
    pub fn path(name: &str, value: impl Into<ParamValue>, data_type: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
            location: ParamLocation::Path,
            style: ParamStyle::Simple,
            explode: false,
            data_type: data_type.to_string(),
            data_format: None,
        }
    }

    pub fn with_format(mut self, data_format: &str) -> Self {
        self.data_format = Some(data_format.to_string());
        self
    }
}

/// Turns a parameter into the string that belongs in the URL.
pub trait ParamEncoder: Send + Sync {
    fn encode(&self, param: &Param) -> String;
}

impl<F> ParamEncoder for F
where
    F: Fn(&Param) -> String + Send + Sync,
{
    fn encode(&self, param: &Param) -> String {
        self(param)
    }
}

/// Encoder used when the configuration does not supply one.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultParamEncoder;

impl ParamEncoder for DefaultParamEncoder {
    fn encode(&self, param: &Param) -> String {
        default_encode_param(param)
    }
}

/// Encode a parameter for the `simple` style.
///
/// Only `date-time` formatted values get special treatment: they are written
/// as ISO-8601 with millisecond precision in UTC. Every other style or format
/// (`pipeDelimited`, `deepObject`, plain `date`, ...) is rendered through the
/// value's plain text form and needs a custom `ParamEncoder` to be correct.
pub fn default_encode_param(param: &Param) -> String {
    let text = match (&param.value, param.data_format.as_deref()) {
        (ParamValue::DateTime(dt), Some(DATE_TIME_FORMAT)) => {
            dt.to_rfc3339_opts(SecondsFormat::Millis, true)
        }
        (value, _) => value.to_string(),
    };
    encode_component(&text)
}

/// Percent-encode `s` as a single URI component.
pub fn encode_component(s: &str) -> String {
    urlencoding::encode(s).into_owned()
}

/// Reverse of `encode_component`. Byte sequences that are not valid UTF-8
/// after decoding are replaced with U+FFFD.
pub fn decode_component(s: &str) -> String {
    String::from_utf8_lossy(&urlencoding::decode_binary(s.as_bytes())).into_owned()
}

/// Key/value escaping used when rendering query strings.
pub trait ParameterCodec: Send + Sync {
    fn encode_key(&self, key: &str) -> String;
    fn encode_value(&self, value: &str) -> String;
    fn decode_key(&self, key: &str) -> String;
    fn decode_value(&self, value: &str) -> String;
}

/// Codec that escapes keys and values with the strict component rule.
///
/// Form-style encoders leave `+` untouched and turn space into `+`, which
/// makes a literal plus in a value indistinguishable from a space on the
/// server. This codec escapes all three of `+`, `%` and space.
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomParameterCodec;

impl ParameterCodec for CustomParameterCodec {
    fn encode_key(&self, key: &str) -> String {
        encode_component(key)
    }

    fn encode_value(&self, value: &str) -> String {
        encode_component(value)
    }

    fn decode_key(&self, key: &str) -> String {
        decode_component(key)
    }

    fn decode_value(&self, value: &str) -> String {
        decode_component(value)
    }
}
