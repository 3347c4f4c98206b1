//! Query parameters for commercetools query endpoints.
//!
//! [`QueryInput`] describes filtering, sorting, expansion and pagination for a
//! query request and encodes itself into URL query pairs. [`PagedQueryResponse`]
//! is the page envelope those endpoints answer with.
//!
//! # Encoding Rules
//!
//! | Field        | Key         | Emitted when                 |
//! |--------------|-------------|------------------------------|
//! | `where`      | `where`     | `Some` and non-empty         |
//! | `sort`       | `sort`      | once per entry, in order     |
//! | `expand`     | `expand`    | `Some` and non-empty         |
//! | `limit`      | `limit`     | `Some` (including `Some(0)`) |
//! | `offset`     | `offset`    | `Some` (including `Some(0)`) |
//! | `with_total` | `withTotal` | `Some(true)` / `Some(false)` |
//!
//! # Example
//!
//! ```rust
//! use commercetools::QueryInput;
//!
//! let input = QueryInput::new()
//!     .with_where("name(en = \"shoe\")")
//!     .with_sort("createdAt desc")
//!     .with_limit(20)
//!     .with_total(false);
//!
//! let pairs = input.to_query_pairs();
//! assert_eq!(pairs[0], ("where".to_string(), "name(en = \"shoe\")".to_string()));
//! assert_eq!(pairs.len(), 4);
//! ```

use serde::{Deserialize, Serialize};
use url::Url;

/// Filtering, sorting, expansion and pagination for a query request.
///
/// Every field distinguishes "not set" from an explicit value, so
/// `limit: Some(0)` is sent while `limit: None` is omitted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryInput {
    /// Query predicate, sent verbatim as `where`.
    pub r#where: Option<String>,
    /// Sort expressions, one `sort` parameter each.
    pub sort: Vec<String>,
    /// Reference expansion path.
    pub expand: Option<String>,
    /// Maximum number of results.
    pub limit: Option<u32>,
    /// Number of results to skip.
    pub offset: Option<u32>,
    /// Whether the API should compute `total`.
    pub with_total: Option<bool>,
}

impl QueryInput {
    /// Creates an empty query input; it encodes to no parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the query predicate.
    #[must_use]
    pub fn with_where(mut self, predicate: impl Into<String>) -> Self {
        self.r#where = Some(predicate.into());
        self
    }

    /// Appends a sort expression.
    #[must_use]
    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort.push(sort.into());
        self
    }

    /// Sets the expansion path.
    #[must_use]
    pub fn with_expand(mut self, expand: impl Into<String>) -> Self {
        self.expand = Some(expand.into());
        self
    }

    /// Sets the page size.
    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the page offset.
    #[must_use]
    pub const fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Sets the `withTotal` flag.
    #[must_use]
    pub const fn with_total(mut self, with_total: bool) -> Self {
        self.with_total = Some(with_total);
        self
    }

    /// Encodes the input as ordered query pairs.
    ///
    /// Keys appear in a fixed order: `where`, `sort`, `expand`, `limit`,
    /// `offset`, `withTotal`. Values are not percent-encoded here.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        if let Some(predicate) = self.r#where.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("where".to_string(), predicate.to_string()));
        }
        for sort in &self.sort {
            pairs.push(("sort".to_string(), sort.clone()));
        }
        if let Some(expand) = self.expand.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("expand".to_string(), expand.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset".to_string(), offset.to_string()));
        }
        if let Some(with_total) = self.with_total {
            pairs.push(("withTotal".to_string(), with_total.to_string()));
        }

        pairs
    }

    /// Returns `true` if the input encodes to no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_query_pairs().is_empty()
    }

    /// Appends the encoded pairs to `url` using form encoding (space becomes `+`).
    ///
    /// The URL is left untouched when there is nothing to encode, so no
    /// dangling `?` is produced.
    pub fn append_to_url(&self, url: &mut Url) {
        let pairs = self.to_query_pairs();
        if pairs.is_empty() {
            return;
        }
        url.query_pairs_mut().extend_pairs(pairs);
    }
}

/// One page of results from a query endpoint.
///
/// `total` is only present when the request asked for it with `withTotal`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedQueryResponse<T> {
    /// The page size that was applied.
    pub limit: u32,
    /// Number of results in this page.
    pub count: u32,
    /// Total number of matching resources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    /// Number of results skipped.
    pub offset: u32,
    /// The results.
    pub results: Vec<T>,
}

impl<T> PagedQueryResponse<T> {
    /// Returns `true` if more results exist beyond this page.
    ///
    /// Without a `total` this guesses from whether the page is full.
    #[must_use]
    pub fn has_more(&self) -> bool {
        match self.total {
            Some(total) => u64::from(self.offset) + u64::from(self.count) < total,
            None => self.count > 0 && self.count >= self.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_query(input: &QueryInput) -> String {
        let mut url = Url::parse("https://api.example.com/unittest/tax-categories").unwrap();
        input.append_to_url(&mut url);
        url.query().unwrap_or_default().to_string()
    }

    #[test]
    fn test_empty_input_encodes_nothing() {
        let input = QueryInput::new();
        assert!(input.to_query_pairs().is_empty());
        assert!(input.is_empty());

        let mut url = Url::parse("https://api.example.com/unittest/tax-categories").unwrap();
        input.append_to_url(&mut url);
        assert_eq!(url.as_str(), "https://api.example.com/unittest/tax-categories");
    }

    #[test]
    fn test_where_is_form_encoded() {
        let input = QueryInput::new().with_where("not (name = 'Peter' and age < 42)");
        assert_eq!(
            input.to_query_pairs(),
            vec![(
                "where".to_string(),
                "not (name = 'Peter' and age < 42)".to_string()
            )]
        );
        assert_eq!(
            raw_query(&input),
            "where=not+%28name+%3D+%27Peter%27+and+age+%3C+42%29"
        );
    }

    #[test]
    fn test_sort_preserves_order() {
        let input = QueryInput::new()
            .with_sort("name desc")
            .with_sort("dog.age asc");
        assert_eq!(raw_query(&input), "sort=name+desc&sort=dog.age+asc");
    }

    #[test]
    fn test_expand() {
        let input = QueryInput::new().with_expand("taxCategory");
        assert_eq!(raw_query(&input), "expand=taxCategory");
    }

    #[test]
    fn test_empty_strings_are_omitted() {
        let input = QueryInput {
            r#where: Some(String::new()),
            expand: Some(String::new()),
            ..QueryInput::default()
        };
        assert!(input.is_empty());
    }

    #[test]
    fn test_limit_and_offset() {
        assert_eq!(raw_query(&QueryInput::new().with_limit(20)), "limit=20");
        assert_eq!(raw_query(&QueryInput::new().with_offset(20)), "offset=20");
    }

    #[test]
    fn test_explicit_zero_limit_and_offset_are_sent() {
        let input = QueryInput::new().with_limit(0).with_offset(0);
        assert_eq!(raw_query(&input), "limit=0&offset=0");
    }

    #[test]
    fn test_with_total_tri_state() {
        assert_eq!(raw_query(&QueryInput::new().with_total(true)), "withTotal=true");
        assert_eq!(raw_query(&QueryInput::new().with_total(false)), "withTotal=false");

        let unset = QueryInput {
            with_total: None,
            ..QueryInput::default()
        };
        assert_eq!(raw_query(&unset), "");
    }

    #[test]
    fn test_key_order_is_stable() {
        let input = QueryInput::new()
            .with_total(true)
            .with_offset(5)
            .with_limit(10)
            .with_expand("taxCategory")
            .with_sort("key asc")
            .with_where("key = \"a\"");

        let keys: Vec<String> = input.to_query_pairs().into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec!["where", "sort", "expand", "limit", "offset", "withTotal"]
        );
    }

    #[test]
    fn test_round_trip_recovers_set_fields() {
        let input = QueryInput::new()
            .with_where("version > 2")
            .with_sort("name desc")
            .with_sort("id asc")
            .with_limit(0)
            .with_total(false);

        let mut url = Url::parse("https://api.example.com/p/products").unwrap();
        input.append_to_url(&mut url);

        let mut parsed = QueryInput::new();
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "where" => parsed.r#where = Some(value.into_owned()),
                "sort" => parsed.sort.push(value.into_owned()),
                "expand" => parsed.expand = Some(value.into_owned()),
                "limit" => parsed.limit = value.parse().ok(),
                "offset" => parsed.offset = value.parse().ok(),
                "withTotal" => parsed.with_total = value.parse().ok(),
                other => panic!("unexpected key {other}"),
            }
        }

        assert_eq!(parsed, input);
    }

    #[test]
    fn test_paged_response_decodes_camel_case() {
        let body = r#"{
            "limit": 2,
            "offset": 0,
            "count": 2,
            "total": 5,
            "results": [{"id": "a"}, {"id": "b"}]
        }"#;

        let page: PagedQueryResponse<serde_json::Value> = serde_json::from_str(body).unwrap();
        assert_eq!(page.count, 2);
        assert_eq!(page.total, Some(5));
        assert_eq!(page.results[1]["id"], "b");
        assert!(page.has_more());
    }

    #[test]
    fn test_paged_response_without_total() {
        let body = r#"{"limit": 20, "offset": 0, "count": 3, "results": [1, 2, 3]}"#;

        let page: PagedQueryResponse<u32> = serde_json::from_str(body).unwrap();
        assert!(page.total.is_none());
        assert!(!page.has_more());
    }
}
