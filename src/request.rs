use std::future::Future;
use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Client;
use url::Url;

use crate::config::Config;
use crate::{Error, Result};

/// Everything but unreserved characters and `/` is escaped in an article path.
const ARTICLE_PATH: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Source of raw article markup, keyed by article path (e.g. `/wiki/東京駅`).
pub trait Fetch {
    fn fetch(&self, identifier: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Fetches articles over HTTP from a wiki installation.
#[derive(Debug, Clone)]
pub struct WikiClient {
    // Client uses Arc so we can clone cheaply
    client: Client,
    base_url: Url,
}

impl WikiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: Url::parse(&config.wiki_url)?,
        })
    }

    /// Percent-encodes the decoded article path and joins it onto the base URL.
    /// `?`, `#` and `%` are part of the title, never a query, fragment or escape.
    pub fn article_url(&self, identifier: &str) -> Result<Url> {
        let path = utf8_percent_encode(identifier, ARTICLE_PATH).to_string();
        Ok(self.base_url.join(&path)?)
    }
}

impl Fetch for WikiClient {
    /// Requests an article and returns the HTML.
    async fn fetch(&self, identifier: &str) -> Result<String> {
        let url = self.article_url(identifier)?;
        tracing::debug!(%url, "requesting article");

        let res = self.client.get(url).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(Error::FetchStatus {
                identifier: identifier.to_string(),
                status: status.as_u16(),
            });
        }
        let html = res.text().await?;
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> WikiClient {
        WikiClient::new(&Config::default()).unwrap()
    }

    #[test]
    fn article_url_encodes_path() {
        let url = client().article_url("/wiki/東京駅").unwrap();
        assert_eq!(
            url.as_str(),
            "https://ja.wikipedia.org/wiki/%E6%9D%B1%E4%BA%AC%E9%A7%85"
        );
    }

    #[test]
    fn article_url_encodes_spaces() {
        let url = client().article_url("/wiki/扇町駅 (大阪府)").unwrap();
        assert!(url.path().ends_with("%20%28%E5%A4%A7%E9%98%AA%E5%BA%9C%29"));
    }

    #[test]
    fn article_url_keeps_reserved_characters_in_the_path() {
        let url = client().article_url("/wiki/What?_Station").unwrap();
        assert_eq!(url.path(), "/wiki/What%3F_Station");
        assert_eq!(url.query(), None);

        let url = client().article_url("/wiki/C#_Stop").unwrap();
        assert_eq!(url.path(), "/wiki/C%23_Stop");
        assert_eq!(url.fragment(), None);

        let url = client().article_url("/wiki/100%_Line").unwrap();
        assert_eq!(url.path(), "/wiki/100%25_Line");
    }

    #[test]
    fn decoded_link_round_trips_to_the_same_url() {
        let href = "/wiki/What%3F_Station";
        let decoded = percent_encoding::percent_decode_str(href).decode_utf8_lossy();
        let url = client().article_url(&decoded).unwrap();
        assert_eq!(url.path(), href);
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let config = Config {
            wiki_url: "not a url".into(),
            ..Config::default()
        };
        assert!(matches!(WikiClient::new(&config), Err(Error::InvalidUrl(_))));
    }
}
