//! Error types for the FHIR codec

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("XML write error: {0}")]
    XmlWrite(#[from] quick_xml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("expected a JSON object for the resource")]
    ExpectedObject,

    #[error("missing resourceType property")]
    MissingResourceType,

    #[error("unknown resource type: {0}")]
    UnknownResourceType(String),

    #[error("expected resource type {expected}, found {found}")]
    UnexpectedResourceType { expected: String, found: String },

    #[error("field '{field}': expected {expected}")]
    TypeMismatch { field: String, expected: &'static str },

    #[error("field '{field}': '{value}' is not a valid {expected}")]
    InvalidPrimitive {
        field: String,
        value: String,
        expected: &'static str,
    },

    #[error("field '{field}' has multiple values")]
    MultipleValues { field: String },

    #[error("field '{field}' does not repeat but occurs more than once")]
    UnexpectedRepeat { field: String },

    #[error("unknown field '{field}' on {type_name}")]
    UnknownField { type_name: String, field: String },

    #[error("element '{element}' is in namespace {found:?}, expected {expected}")]
    Namespace {
        element: String,
        found: Option<String>,
        expected: &'static str,
    },

    #[error("unexpected attribute '{attribute}' on element '{element}'")]
    UnexpectedAttribute { element: String, attribute: String },

    #[error("field '{field}': node is not a {expected}")]
    Shape { field: String, expected: &'static str },
}

impl Error {
    pub fn type_mismatch(field: &str, expected: &'static str) -> Self {
        Error::TypeMismatch {
            field: field.to_string(),
            expected,
        }
    }

    pub fn shape(field: &str, expected: &'static str) -> Self {
        Error::Shape {
            field: field.to_string(),
            expected,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
