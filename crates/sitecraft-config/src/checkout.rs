//! Request body for the external checkout endpoint.
//!
//! The checkout service accepts the full configuration plus the two return
//! URLs and answers with an opaque session identifier. Only the request
//! shape lives here.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::model::AppConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub configuration: AppConfig,
    pub success_url: String,
    pub cancel_url: String,
}

impl CheckoutRequest {
    pub fn new(
        configuration: &AppConfig,
        success_url: impl Into<String>,
        cancel_url: impl Into<String>,
    ) -> Self {
        Self {
            configuration: configuration.clone(),
            success_url: success_url.into(),
            cancel_url: cancel_url.into(),
        }
    }

    /// Pretty-printed JSON body.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(ConfigError::Serialization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_field_names() {
        let request = CheckoutRequest::new(
            &AppConfig::default(),
            "https://example.com/ok",
            "https://example.com/cancel",
        );
        let value: serde_json::Value = serde_json::from_str(&request.to_json().unwrap()).unwrap();
        assert_eq!(value["successUrl"], "https://example.com/ok");
        assert_eq!(value["cancelUrl"], "https://example.com/cancel");
        assert_eq!(value["configuration"]["layout"]["mode"], "onepage");
    }
}
