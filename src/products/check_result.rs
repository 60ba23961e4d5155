use crate::products::{expected::Expected, unexpected::Unexpected};
use serde::{Deserialize, Serialize};
use std::fmt;


#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
/// Outcome of a single site check
pub struct CheckResult {
    /// Check failed
    pub failed: bool,

    /// Human readable reason (success or failure)
    pub reason: String,
}


impl CheckResult {
    /// New success-result
    pub fn success(success: Expected) -> CheckResult {
        CheckResult {
            failed: false,
            reason: success.to_string(),
        }
    }


    /// New failure-result
    pub fn error(error: Unexpected) -> CheckResult {
        CheckResult {
            failed: true,
            reason: error.to_string(),
        }
    }
}


/// JSON serialization on .to_string():
impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(&self)
            .unwrap_or_else(|_| String::from("{\"status\": \"CheckResult serialization failure\"}"));
        write!(f, "{}", json)
    }
}
