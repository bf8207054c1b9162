//! Input validation for configuration values.

use thiserror::Error;
use url::Url;

/// Validation error types
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("URL contains potentially dangerous characters")]
    DangerousUrl,
}

/// Validate an upstream API base URL.
///
/// Only absolute `http`/`https` URLs without query or fragment are accepted.
/// Loopback hosts are allowed so the client can be pointed at a local mock.
/// A trailing slash is stripped so endpoint paths can be appended directly.
pub fn validate_api_base(url: &str) -> Result<String, ValidationError> {
    let url = url.trim();

    if url.is_empty() {
        return Err(ValidationError::InvalidUrl("empty URL".to_string()));
    }

    if url.contains('\0') || url.contains('\n') || url.contains('\r') {
        return Err(ValidationError::DangerousUrl);
    }

    let parsed = Url::parse(url).map_err(|e| ValidationError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ValidationError::InvalidUrl(format!(
                "invalid scheme: {}",
                other
            )))
        }
    }

    if parsed.host_str().is_none() {
        return Err(ValidationError::InvalidUrl("missing host".to_string()));
    }

    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(ValidationError::InvalidUrl(
            "base URL must not carry a query or fragment".to_string(),
        ));
    }

    Ok(url.trim_end_matches('/').to_string())
}
