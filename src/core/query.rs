//! Query-string serialization for list endpoints.
//!
//! Filters are an ordered list of `(name, Option<value>)` pairs. Absent
//! values are dropped; present values are kept even when they are `0` or an
//! empty string. Output order follows insertion order.

use url::form_urlencoded;

/// An ordered set of optional query filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, Option<String>)>,
}

impl QueryParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a filter. `None` values are remembered but never serialized.
    pub fn push<V: ToString>(&mut self, name: impl Into<String>, value: Option<V>) {
        self.pairs
            .push((name.into(), value.map(|v| v.to_string())));
    }

    /// Appends a filter, builder style.
    pub fn with<V: ToString>(mut self, name: impl Into<String>, value: Option<V>) -> Self {
        self.push(name, value);
        self
    }

    /// Iterates over the present pairs, in insertion order.
    pub fn present(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .filter_map(|(k, v)| v.as_deref().map(|v| (k.as_str(), v)))
    }

    /// Returns `true` if no pair would be serialized.
    pub fn is_empty(&self) -> bool {
        self.present().next().is_none()
    }

    /// Serializes to `?k=v&k2=v2`, or `""` when nothing is present.
    pub fn to_query_string(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        // Pairs start after the `?`.
        let mut serializer = form_urlencoded::Serializer::for_suffix(String::from("?"), 1);
        for (name, value) in self.present() {
            serializer.append_pair(name, value);
        }
        serializer.finish()
    }
}

/// Types that can describe themselves as list-endpoint filters.
pub trait QueryFilters {
    /// Returns the filters in their canonical field order.
    fn query_params(&self) -> QueryParams;
}

impl QueryFilters for QueryParams {
    fn query_params(&self) -> QueryParams {
        self.clone()
    }
}

/// Serializes optional filters into a query string.
///
/// Absent filters and filters with no present values both produce `""`.
pub fn serialize_query<F: QueryFilters + ?Sized>(filters: Option<&F>) -> String {
    filters
        .map(|f| f.query_params().to_query_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_filters_serialize_empty() {
        assert_eq!(serialize_query::<QueryParams>(None), "");
        assert_eq!(serialize_query(Some(&QueryParams::new())), "");

        let all_absent = QueryParams::new()
            .with("from", None::<&str>)
            .with("limit", None::<u32>);
        assert_eq!(serialize_query(Some(&all_absent)), "");
    }

    #[test]
    fn test_drops_only_absent_values() {
        let params = QueryParams::new()
            .with("from", Some("2024-01-01"))
            .with("level", None::<&str>)
            .with("limit", Some(0u32))
            .with("to", Some(""));
        assert_eq!(params.to_query_string(), "?from=2024-01-01&limit=0&to=");
    }

    #[test]
    fn test_preserves_insertion_order() {
        let params = QueryParams::new()
            .with("offset", Some(20))
            .with("limit", Some(10))
            .with("from", Some("a"));
        assert_eq!(params.to_query_string(), "?offset=20&limit=10&from=a");
    }

    #[test]
    fn test_first_pair_has_no_separator() {
        let single = QueryParams::new()
            .with("from", Some("2024-01-01"))
            .with("level", None::<&str>);
        assert_eq!(single.to_query_string(), "?from=2024-01-01");

        let after_absent = QueryParams::new()
            .with("status", None::<&str>)
            .with("timeRange", Some("7d"));
        let rendered = after_absent.to_query_string();
        assert_eq!(rendered, "?timeRange=7d");
        assert!(!rendered.starts_with("?&"));
    }

    #[test]
    fn test_values_are_form_encoded() {
        let params = QueryParams::new().with("q", Some("a b&c=d"));
        assert_eq!(params.to_query_string(), "?q=a+b%26c%3Dd");
    }
}
