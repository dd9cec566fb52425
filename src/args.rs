//! Query-string arguments of the current request.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::collections::HashMap;
use std::convert::Infallible;

/// Query-string parameters of one request, keeping the first value of each name.
///
/// An absent parameter (`get` returns `None`) is distinct from a present but
/// empty one (`Some("")`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestArgs {
    values: HashMap<String, String>,
}

impl RequestArgs {
    /// Parse a URL-encoded query string (without the leading `?`).
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        url::form_urlencoded::parse(query.as_bytes())
            .map(|(name, value)| (name.into_owned(), value.into_owned()))
            .collect()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RequestArgs
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = HashMap::new();
        for (name, value) in iter {
            values.entry(name.into()).or_insert_with(|| value.into());
        }
        Self { values }
    }
}

impl<S> FromRequestParts<S> for RequestArgs
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_query(parts.uri.query().unwrap_or_default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_and_empty_are_distinct() {
        let args = RequestArgs::from_query("name=&size=3");
        assert_eq!(args.get("name"), Some(""));
        assert_eq!(args.get("size"), Some("3"));
        assert_eq!(args.get("colour"), None);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let args = RequestArgs::from_query("name=Foo&name=Baz");
        assert_eq!(args.get("name"), Some("Foo"));
        assert_eq!(args.len(), 1);
    }

    #[test]
    fn test_percent_decoding() {
        let args = RequestArgs::from_query("name=Foo%2CBaz&sort=-size");
        assert_eq!(args.get("name"), Some("Foo,Baz"));
        assert_eq!(args.get("sort"), Some("-size"));
    }

    #[test]
    fn test_flag_without_value_is_empty() {
        let args = RequestArgs::from_query("name");
        assert!(args.contains("name"));
        assert_eq!(args.get("name"), Some(""));
    }

    #[tokio::test]
    async fn test_extractor_reads_uri_query() {
        let request = axum::http::Request::builder()
            .uri("/widgets?size=1&size=2")
            .body(())
            .unwrap();
        let (mut parts, ()) = request.into_parts();
        let args = RequestArgs::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(args.get("size"), Some("1"));
    }
}
