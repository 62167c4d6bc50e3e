//! Response contract and its interpretation.
//!
//! Both the submission engine and the connectivity probe read the final
//! response body through [`parse_response_body`] and [`ServerResponse::interpret`].

use serde::Deserialize;

use crate::config::{BODY_PREVIEW_CHARS, SUCCESS_STATUS, UNKNOWN_ERROR_MESSAGE};
use crate::error_handling::SubmitError;
use crate::utils::truncate_preview;

/// The JSON object returned by the endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServerResponse {
    /// `"success"` or anything else
    pub status: String,
    /// Sheet row written on success
    #[serde(default)]
    pub row: Option<i64>,
    /// Server-side processing time in seconds
    #[serde(default, rename = "executionTime")]
    pub execution_time: Option<f64>,
    /// Machine-readable rejection code
    #[serde(default)]
    pub code: Option<String>,
    /// Human-readable rejection message
    #[serde(default)]
    pub message: Option<String>,
}

/// What a parsed response means for the submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// The record was stored.
    Accepted {
        /// Sheet row the record landed in
        row: Option<i64>,
        /// Server-side processing time in seconds
        execution_time: Option<f64>,
    },
    /// The server refused the record.
    Rejected {
        /// Machine-readable error code, if any
        code: Option<String>,
        /// Human-readable reason
        message: String,
    },
}

impl ServerResponse {
    /// Classifies the response by its `status` field; a missing message becomes "Unknown error".
    pub fn interpret(self) -> Verdict {
        if self.status == SUCCESS_STATUS {
            Verdict::Accepted {
                row: self.row,
                execution_time: self.execution_time,
            }
        } else {
            Verdict::Rejected {
                code: self.code,
                message: self
                    .message
                    .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string()),
            }
        }
    }
}

/// Parses a final response body.
///
/// # Errors
///
/// Returns `SubmitError::InvalidBody` when the body is not a JSON object with
/// a string `status`; the detail carries a preview of what was received.
pub fn parse_response_body(body: &str) -> Result<ServerResponse, SubmitError> {
    serde_json::from_str::<ServerResponse>(body).map_err(|e| SubmitError::InvalidBody {
        detail: format!(
            "{e} (body starts with: {:?})",
            truncate_preview(body, BODY_PREVIEW_CHARS)
        ),
    })
}
