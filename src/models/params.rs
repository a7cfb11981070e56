use std::time::Duration;

use url::form_urlencoded;

use crate::error::TriggerError;
use crate::utils::duration::duration_or_default;

/// Query parameters of one trigger call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerParams {
    pub url: String,
    pub duration: Duration,
}

impl TriggerParams {
    pub fn from_query(query: &str) -> Result<Self, TriggerError> {
        let pairs: Vec<(String, String)> = form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();
        if pairs.is_empty() {
            return Err(TriggerError::NoParams);
        }

        let url = pairs
            .iter()
            .find(|(k, _)| k == "url")
            .map(|(_, v)| v.clone())
            .filter(|v| !v.is_empty())
            .ok_or_else(TriggerError::missing_url)?;

        // A repeated duration is as unusable as a malformed one.
        let mut durations = pairs.iter().filter(|(k, _)| k == "duration");
        let duration = match (durations.next(), durations.next()) {
            (Some((_, raw)), None) => duration_or_default(Some(raw)),
            _ => duration_or_default(None),
        };

        Ok(Self { url, duration })
    }
}
