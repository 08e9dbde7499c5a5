use std::time::Duration;

/// Configuration for a [`MirrorBuilder`](crate::MirrorBuilder).
#[derive(Debug, Clone)]
pub struct MirrorConfig {
    /// User agent sent with every request.
    pub user_agent: String,
    /// Per-request timeout covering the full response body.
    pub fetch_timeout: Duration,
    /// Reject manifest bodies that do not begin with the `#EXTM3U` header.
    pub strict: bool,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("hls-mirror/{}", env!("CARGO_PKG_VERSION")),
            fetch_timeout: Duration::from_secs(30),
            strict: true,
        }
    }
}
