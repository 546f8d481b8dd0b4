//! PTV client error types.

/// Errors from the PTV timetable client.
#[derive(Debug, thiserror::Error)]
pub enum PtvError {
    /// The provider could not be reached, timed out, or answered with a
    /// non-2xx status. `status` is `None` for transport failures.
    #[error("PTV API error: {reason}")]
    Upstream { status: Option<u16>, reason: String },

    /// The response body did not have the expected shape.
    #[error("malformed PTV response: {message}")]
    MalformedResponse {
        message: String,
        body: Option<String>,
    },

    /// The signing key was rejected when preparing the signer.
    #[error("invalid signing key: {0}")]
    InvalidKey(String),
}

impl PtvError {
    /// Build an upstream error from a non-2xx status.
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        PtvError::Upstream {
            status: Some(status.as_u16()),
            reason: status
                .canonical_reason()
                .map_or_else(|| status.as_str().to_string(), str::to_string),
        }
    }

    /// Build a malformed-response error, keeping a bounded snippet of the body.
    pub fn malformed(message: impl Into<String>, body: Option<&str>) -> Self {
        PtvError::MalformedResponse {
            message: message.into(),
            body: body.map(|b| b.chars().take(500).collect()),
        }
    }

    /// Whether this error came from the provider or the network.
    pub fn is_upstream(&self) -> bool {
        matches!(self, PtvError::Upstream { .. })
    }

    /// HTTP status reported by the provider, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            PtvError::Upstream { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for PtvError {
    fn from(err: reqwest::Error) -> Self {
        let reason = if err.is_timeout() {
            format!("request timed out: {err}")
        } else {
            err.to_string()
        };

        PtvError::Upstream {
            status: err.status().map(|s| s.as_u16()),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PtvError::from_status(reqwest::StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.to_string(), "PTV API error: Service Unavailable");
        assert_eq!(err.status(), Some(503));
        assert!(err.is_upstream());

        let err = PtvError::malformed("missing field `direction_id`", Some("{}"));
        assert!(err.to_string().contains("malformed PTV response"));
        assert!(err.to_string().contains("direction_id"));
        assert!(!err.is_upstream());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn malformed_truncates_body() {
        let body = "x".repeat(2000);
        let PtvError::MalformedResponse { body, .. } = PtvError::malformed("bad", Some(&body))
        else {
            panic!("expected MalformedResponse");
        };
        assert_eq!(body.map(|b| b.len()), Some(500));
    }
}
