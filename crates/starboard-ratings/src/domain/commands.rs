//! Commands for the ratings context.

use serde_json::Value;
use uuid::Uuid;

/// Sentinel stored when a client address or user-agent is not available.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Audit metadata captured from the submitting request.
///
/// Stored with the rating and never read back by any other code path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientMetadata {
    /// Client network address.
    pub address: String,
    /// Client user-agent.
    pub agent: String,
}

impl ClientMetadata {
    /// Builds the metadata from raw header values.
    ///
    /// The address is the first non-empty of `forwarded_for` and `real_ip`;
    /// missing values fall back to [`UNKNOWN_CLIENT`].
    #[must_use]
    pub fn from_headers(
        forwarded_for: Option<&str>,
        real_ip: Option<&str>,
        user_agent: Option<&str>,
    ) -> Self {
        Self {
            address: present(forwarded_for)
                .or_else(|| present(real_ip))
                .unwrap_or(UNKNOWN_CLIENT)
                .to_owned(),
            agent: present(user_agent).unwrap_or(UNKNOWN_CLIENT).to_owned(),
        }
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl Default for ClientMetadata {
    fn default() -> Self {
        Self::from_headers(None, None, None)
    }
}

/// Command to record one rating for a service provider.
///
/// Carries the request fields as received; the handler validates them.
#[derive(Debug, Clone)]
pub struct SubmitRating {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The service provider being rated.
    pub service_provider_id: Option<String>,
    /// The raw rating value from the request body.
    pub rating: Option<Value>,
    /// Audit metadata of the submitting client.
    pub client: ClientMetadata,
}
