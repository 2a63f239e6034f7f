use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of one simulated request.
///
/// Serialized flat, with a `success` flag derived from the variant:
/// `{"url", "status", "timestamp", "success": true}` or
/// `{"url", "error", "timestamp", "success": false}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "AttemptRecord", try_from = "AttemptRecord")]
pub enum AttemptResult {
    Success {
        url: String,
        status: u16,
        timestamp: String,
    },
    Failure {
        url: String,
        error: String,
        timestamp: String,
    },
}

impl AttemptResult {
    pub fn success(url: impl Into<String>, status: u16, timestamp: impl Into<String>) -> Self {
        Self::Success {
            url: url.into(),
            status,
            timestamp: timestamp.into(),
        }
    }

    pub fn failure(
        url: impl Into<String>,
        error: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self::Failure {
            url: url.into(),
            error: error.into(),
            timestamp: timestamp.into(),
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Self::Success { url, .. } | Self::Failure { url, .. } => url,
        }
    }

    pub fn timestamp(&self) -> &str {
        match self {
            Self::Success { timestamp, .. } | Self::Failure { timestamp, .. } => timestamp,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

#[derive(Serialize, Deserialize)]
struct AttemptRecord {
    url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    timestamp: String,
    success: bool,
}

impl From<AttemptResult> for AttemptRecord {
    fn from(result: AttemptResult) -> Self {
        match result {
            AttemptResult::Success {
                url,
                status,
                timestamp,
            } => Self {
                url,
                status: Some(status),
                error: None,
                timestamp,
                success: true,
            },
            AttemptResult::Failure {
                url,
                error,
                timestamp,
            } => Self {
                url,
                status: None,
                error: Some(error),
                timestamp,
                success: false,
            },
        }
    }
}

impl TryFrom<AttemptRecord> for AttemptResult {
    type Error = ValidationError;

    fn try_from(record: AttemptRecord) -> Result<Self, Self::Error> {
        match (record.success, record.status, record.error) {
            (true, Some(status), None) => Ok(Self::success(record.url, status, record.timestamp)),
            (false, None, Some(error)) => Ok(Self::failure(record.url, error, record.timestamp)),
            (true, _, _) => Err(ValidationError::new(
                "successful attempt must carry a status and no error",
            )),
            (false, _, _) => Err(ValidationError::new(
                "failed attempt must carry an error and no status",
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionSummary {
    pub message: String,
    pub s3_key: String,
    pub results: Vec<AttemptResult>,
}

impl SessionSummary {
    pub fn new(s3_key: impl Into<String>, results: Vec<AttemptResult>) -> Self {
        Self {
            message: format!("Generated {} fake traffic requests", results.len()),
            s3_key: s3_key.into(),
            results,
        }
    }
}

/// Payload handed back to the Lambda runtime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InvocationResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl InvocationResponse {
    pub fn ok(summary: &SessionSummary) -> Result<Self, serde_json::Error> {
        Ok(Self {
            status_code: 200,
            body: serde_json::to_string(summary)?,
        })
    }
}

/// ISO-8601 form of the capture instant shared by every attempt.
pub fn attempt_timestamp(captured_at: DateTime<Utc>) -> String {
    captured_at.to_rfc3339_opts(SecondsFormat::Micros, false)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}
