use std::path::PathBuf;

use thiserror::Error;

/// Failures talking to the inference server.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Server answered with a non-2xx status.
    #[error("HTTP {0}")]
    Http(u16),

    /// Transport failure (connect, DNS, TLS, body read).
    #[error("Network error: {0}")]
    Network(String),

    /// Body was not the JSON we expected.
    #[error("Invalid response: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of one analysis run.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Please choose an image first.")]
    NoFileSelected,
}

/// Failures loading the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Error, Debug)]
#[error("unknown zone '{0}' (expected 'brain' or 'lung')")]
pub struct ZoneParseError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_mentions_status() {
        assert_eq!(ClientError::Http(500).to_string(), "HTTP 500");
    }

    #[test]
    fn missing_file_message_is_the_user_prompt() {
        assert_eq!(AnalysisError::NoFileSelected.to_string(), "Please choose an image first.");
    }
}
