use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum MirrorError {
    #[error("build cancelled")]
    Cancelled,

    #[error("invalid URL `{input}`: {reason}")]
    InvalidUrl { input: String, reason: String },

    #[error("HTTP request failed: {source}")]
    Network {
        #[from]
        source: reqwest::Error,
    },

    #[error("request failed with HTTP {status} for {url}")]
    HttpStatus { status: StatusCode, url: String },

    #[error("playlist error for {url}: {reason}")]
    Playlist { url: String, reason: String },

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("cipher error: {reason}")]
    Cipher { reason: String },
}

impl MirrorError {
    pub fn invalid_url(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            input: input.into(),
            reason: reason.into(),
        }
    }

    pub fn http_status(status: StatusCode, url: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            url: url.into(),
        }
    }

    pub fn playlist(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Playlist {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn cipher(reason: impl Into<String>) -> Self {
        Self::Cipher {
            reason: reason.into(),
        }
    }
}
