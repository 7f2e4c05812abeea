use std::time::Duration;

use async_trait::async_trait;
use html_escape::decode_html_entities;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION, CONTENT_TYPE, ORIGIN,
    REFERER, USER_AGENT,
};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::app::{Result, WatchError};
use crate::domain::ContentItem;
use crate::fetcher::Fetcher;

/// Latest Premier League article tagged `fixtures`.
pub const DEFAULT_ENDPOINT: &str = "https://footballapi.pulselive.com/content/PremierLeague/text/EN/?sort=timestamp%20desc&limit=1&offset=0&tagNames=fixtures&fullObjectResponse=false";

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/18.0 Safari/605.1.15";

pub struct HttpFetcher {
    client: Client,
    endpoint: Url,
}

impl HttpFetcher {
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .default_headers(browser_headers())
            .build()?;

        Ok(Self { client, endpoint })
    }
}

/// The API only answers requests that look like they come from the
/// premierleague.com front end.
fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-GB,en;q=0.9"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("application/x-www-form-urlencoded; charset=UTF-8"),
    );
    headers.insert(ORIGIN, HeaderValue::from_static("https://www.premierleague.com"));
    headers.insert(REFERER, HeaderValue::from_static("https://www.premierleague.com/"));
    headers.insert(
        HeaderName::from_static("sec-fetch-dest"),
        HeaderValue::from_static("empty"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-mode"),
        HeaderValue::from_static("cors"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-site"),
        HeaderValue::from_static("cross-site"),
    );
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers
}

#[derive(Debug, Deserialize)]
struct ContentPage {
    #[serde(default)]
    content: Option<Vec<ContentEntry>>,
}

#[derive(Debug, Deserialize)]
struct ContentEntry {
    id: EntryId,
    title: String,
}

/// The API sends numeric ids; strings are accepted too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EntryId {
    Number(serde_json::Number),
    Text(String),
}

impl EntryId {
    fn into_string(self) -> String {
        match self {
            EntryId::Number(n) => n.to_string(),
            EntryId::Text(s) => s,
        }
    }
}

/// Extract the first element of the `content` array from a response body.
pub fn parse_latest(body: &[u8]) -> Result<ContentItem> {
    let page: ContentPage =
        serde_json::from_slice(body).map_err(|e| WatchError::Parse(e.to_string()))?;

    let entry = page
        .content
        .and_then(|entries| entries.into_iter().next())
        .ok_or(WatchError::EmptyContent)?;

    Ok(ContentItem {
        id: entry.id.into_string(),
        title: decode_html_entities(&entry.title).to_string(),
    })
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_latest(&self) -> Result<ContentItem> {
        let response = self.client.get(self.endpoint.clone()).send().await?;

        response.error_for_status_ref()?;

        let body = response.bytes().await?;
        parse_latest(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "pageInfo": {"page": 0, "numPages": 812, "pageSize": 1, "numEntries": 812},
        "content": [
            {
                "id": 4123987,
                "type": "text",
                "title": "Matchweek 12 fixtures &amp; kick-off times confirmed",
                "date": "2024-10-18T10:00:00Z"
            },
            {"id": 4123000, "title": "Older article"}
        ]
    }"#;

    #[test]
    fn test_parse_first_entry() {
        let item = parse_latest(SAMPLE.as_bytes()).unwrap();
        assert_eq!(item.id, "4123987");
        assert_eq!(item.title, "Matchweek 12 fixtures & kick-off times confirmed");
    }

    #[test]
    fn test_parse_string_id() {
        let body = r#"{"content": [{"id": "abc-1", "title": "Fixtures"}]}"#;
        let item = parse_latest(body.as_bytes()).unwrap();
        assert_eq!(item.id, "abc-1");
    }

    #[test]
    fn test_empty_content_is_error() {
        let body = r#"{"content": []}"#;
        assert!(matches!(
            parse_latest(body.as_bytes()),
            Err(WatchError::EmptyContent)
        ));
    }

    #[test]
    fn test_missing_content_is_error() {
        let body = r#"{"pageInfo": {}}"#;
        assert!(matches!(
            parse_latest(body.as_bytes()),
            Err(WatchError::EmptyContent)
        ));
    }

    #[test]
    fn test_null_content_is_error() {
        let body = r#"{"content": null}"#;
        assert!(matches!(
            parse_latest(body.as_bytes()),
            Err(WatchError::EmptyContent)
        ));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(
            parse_latest(b"<html>blocked</html>"),
            Err(WatchError::Parse(_))
        ));
    }

    #[test]
    fn test_entry_without_title_is_parse_error() {
        let body = r#"{"content": [{"id": 1}]}"#;
        let err = parse_latest(body.as_bytes()).unwrap_err();
        assert!(matches!(err, WatchError::Parse(_)));
        assert!(err.is_fetch_error());
    }

    #[test]
    fn test_browser_headers() {
        let headers = browser_headers();
        assert_eq!(headers.get(ORIGIN).unwrap(), "https://www.premierleague.com");
        assert_eq!(headers.get("sec-fetch-mode").unwrap(), "cors");
        assert!(headers
            .get(USER_AGENT)
            .unwrap()
            .to_str()
            .unwrap()
            .contains("Safari"));
    }
}
