use reqwest::StatusCode;

/// All failure classes at the gateway boundary. Page controllers collapse
/// every variant into the single "failed to load" render state; the variants
/// exist for the diagnostic log line.
#[derive(thiserror::Error, Debug)]
pub enum GatewayError {
    /// The gateway is not usable for this call (no key, bad base URL).
    /// Raised before any network attempt is made.
    #[error("gateway not configured for {endpoint}: {reason}")]
    Config { endpoint: String, reason: String },

    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("request failed for {url}: {source}")]
    Transport {
        url: String,
        source: reqwest::Error,
    },

    /// The provider answered with a non-success HTTP status.
    #[error("upstream status {status} for {url}: {reason}")]
    Upstream {
        url: String,
        status: StatusCode,
        reason: String,
    },

    /// A success response whose envelope carried no usable payload.
    #[error("bad envelope from {url}: {reason}")]
    Envelope { url: String, reason: String },
}

pub type Result<T> = std::result::Result<T, GatewayError>;
