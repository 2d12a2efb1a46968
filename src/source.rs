use crate::error::{Error, Result};
use crate::normalize::normalize_members;
use crate::types::{Member, MemberDocument};
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;

/// Where a member document is fetched from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// A local file, usually relative to the site root
    File(PathBuf),
    /// An `http://` or `https://` URL
    Http(String),
}

impl DataSource {
    /// Interpret a locator string: URLs with an HTTP scheme are fetched over
    /// the network, everything else is treated as a file path
    pub fn parse(locator: &str) -> Self {
        let locator = locator.trim();
        if locator.starts_with("http://") || locator.starts_with("https://") {
            DataSource::Http(locator.to_string())
        } else {
            DataSource::File(PathBuf::from(locator))
        }
    }

    /// Fetch the raw document text
    pub async fn fetch_text(&self) -> Result<String> {
        match self {
            DataSource::File(path) => {
                tracing::debug!("Reading member document from {}", path.display());
                Ok(tokio::fs::read_to_string(path).await?)
            }
            DataSource::Http(url) => {
                tracing::debug!("Fetching member document from {}", url);
                let response = reqwest::get(url.as_str()).await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(Error::Status {
                        status: status.as_u16(),
                        url: url.clone(),
                    });
                }
                Ok(response.text().await?)
            }
        }
    }

    /// Fetch, unwrap and normalize the member collection.
    ///
    /// A document that parses but holds no member sequence yields
    /// [`Error::Shape`]; callers treat it as "no data" rather than a fault.
    pub async fn fetch_members(&self) -> Result<Vec<Member>> {
        let text = self.fetch_text().await?;
        let entries = parse_document(&text)?;
        Ok(normalize_members(&entries))
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Http(url) => write!(f, "{}", url),
        }
    }
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::File(PathBuf::from("data/members.json"))
    }
}

/// Unwrap a bare array or a `{ "members": [...] }` document
pub fn unwrap_collection(document: Value) -> Option<Vec<Value>> {
    serde_json::from_value::<MemberDocument>(document)
        .ok()
        .map(MemberDocument::into_entries)
}

/// Parse document text into its member entries
pub fn parse_document(text: &str) -> Result<Vec<Value>> {
    let document: Value = serde_json::from_str(text)?;
    unwrap_collection(document)
        .ok_or_else(|| Error::Shape("expected an array or an object with a \"members\" array".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_locator() {
        assert_eq!(
            DataSource::parse("https://example.com/members.json"),
            DataSource::Http("https://example.com/members.json".to_string())
        );
        assert_eq!(
            DataSource::parse("data/members.json"),
            DataSource::File(PathBuf::from("data/members.json"))
        );
    }

    #[test]
    fn test_unwrap_collection() {
        assert_eq!(unwrap_collection(json!([1, 2])).map(|v| v.len()), Some(2));
        assert_eq!(unwrap_collection(json!({"members": []})).map(|v| v.len()), Some(0));
        assert!(unwrap_collection(json!({"companies": []})).is_none());
        assert!(unwrap_collection(json!("members")).is_none());
        assert!(unwrap_collection(json!(null)).is_none());
    }

    #[test]
    fn test_parse_document_errors() {
        assert!(matches!(parse_document("{not json"), Err(Error::Json(_))));
        assert!(matches!(parse_document(r#"{"members": 3}"#), Err(Error::Shape(_))));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let source = DataSource::File(PathBuf::from("does/not/exist/members.json"));
        assert!(matches!(source.fetch_members().await, Err(Error::Io(_))));
    }
}
