use serde::Deserialize;
use thiserror::Error;

/// The main error type for GNS3 operations.
///
/// This enum represents all possible errors that can occur while talking
/// to a GNS3 server: transport failures, error responses from the server,
/// malformed response bodies and local validation failures.
#[derive(Error, Debug)]
pub enum Gns3Error {
    /// Represents errors that occur while reaching the server
    ///
    /// # Fields
    /// * `0` - A description of what went wrong (refused connection, timeout, ...)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Represents any non-2xx answer from the server
    ///
    /// # Fields
    /// * `0` - The decoded error body
    #[error(transparent)]
    Server(#[from] ServerError),

    /// Represents a success response whose body could not be decoded
    ///
    /// # Fields
    /// * `0` - A description of the decoding failure
    #[error("Decode error: {0}")]
    Decode(String),

    /// Represents a request body that could not be encoded as JSON
    #[error("Encode error: {0}")]
    Encode(String),

    /// Represents local validation failures
    ///
    /// # Fields
    /// * `0` - The underlying validation error
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl Gns3Error {
    /// Returns the HTTP status carried by a server error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Gns3Error::Server(e) => Some(e.status),
            _ => None,
        }
    }

    /// Returns true if this error is a 404, whether reported by the server
    /// or produced locally when a lookup found no match.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Error body returned by the GNS3 server on any non-2xx response.
///
/// Only `status` and `message` take part in rendering; the other fields
/// are kept for callers that want to inspect the failing request.
#[derive(Error, Debug, Clone, PartialEq, Default, Deserialize)]
#[error("Server error #{status}: {message}")]
pub struct ServerError {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub request: serde_json::Value,
    #[serde(default)]
    pub status: u16,
}

impl ServerError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            ..Default::default()
        }
    }

    /// Builds the error for a failed response from its status and raw body.
    ///
    /// When the body is not the structured error shape, the HTTP status and
    /// the body text are used as-is.
    pub(crate) fn from_response(status: u16, body: &[u8]) -> Self {
        match serde_json::from_slice::<ServerError>(body) {
            Ok(mut error) => {
                if error.status == 0 {
                    error.status = status;
                }
                error
            }
            Err(_) => Self::new(status, String::from_utf8_lossy(body).trim().to_string()),
        }
    }
}

/// Specialized error type for validation failures.
///
/// This enum provides detailed context about why a validation
/// failed, including field-specific errors and format violations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Represents a validation failure for a specific field
    ///
    /// # Fields
    /// * `field` - The name of the field that failed validation
    /// * `message` - A detailed message about why validation failed
    #[error("Field '{field}' validation failed: {message}")]
    Field { field: String, message: String },

    /// Represents format/syntax validation failures
    ///
    /// # Fields
    /// * `0` - Description of the format violation
    #[error("Format error: {0}")]
    Format(String),

    /// Represents violations of domain constraints
    ///
    /// # Fields
    /// * `0` - Description of the constraint violation
    #[error("Domain constraint violation: {0}")]
    ConstraintViolation(String),
}

impl ValidationError {
    pub(crate) fn field(field: &str, message: &str) -> Self {
        ValidationError::Field {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Type alias for Results that may fail with a Gns3Error
pub type Gns3Result<T> = Result<T, Gns3Error>;
