use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Reqwest Error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("Couldn't fetch {identifier}, server answered with status {status}")]
    FetchStatus { identifier: String, status: u16 },
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Malformed coordinate row ({reason}): {row}")]
    MalformedCoordinate { row: String, reason: &'static str },

    #[error("The selector you are trying to scrape for is invalid. Selector: {0}")]
    ParseMissingSelector(String),
    #[error("Invalid link pattern: {0}")]
    InvalidLinkPattern(#[from] regex::Error),

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Tokio Join Error, couldn't await a task! {0}")]
    RuntimeJoin(#[from] tokio::task::JoinError),
}

impl Error {
    /// True for every way a document can fail to be retrieved.
    pub fn is_fetch(&self) -> bool {
        matches!(
            self,
            Error::Reqwest(_) | Error::FetchStatus { .. } | Error::InvalidUrl(_)
        )
    }

    pub(crate) fn malformed(row: &str, reason: &'static str) -> Self {
        Error::MalformedCoordinate {
            row: row.trim().to_string(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_errors_are_grouped() {
        let status = Error::FetchStatus {
            identifier: "/wiki/A".into(),
            status: 404,
        };
        assert!(status.is_fetch());
        assert!(Error::InvalidUrl(url::ParseError::EmptyHost).is_fetch());
        assert!(!Error::malformed("北緯", "no seconds marker").is_fetch());
    }

    #[test]
    fn malformed_message_names_the_row() {
        let err = Error::malformed("  北緯31度 ", "no minute marker");
        assert_eq!(
            err.to_string(),
            "Malformed coordinate row (no minute marker): 北緯31度"
        );
    }
}
