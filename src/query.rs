//! Query Builder
//!
//! Turns UI state into request descriptors and URLs. Pure functions, no I/O.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::models::QueryState;

/// Characters left unescaped in a query component (RFC 3986 unreserved)
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// The dashboard rejects longer search values, counted in UTF-16 units
pub const MAX_SEARCH_VALUE_CHARS: usize = 150;

pub const DASHBOARD_ENDPOINT: &str = "/dashboard";

/// Endpoint plus ordered, unencoded parameters
#[derive(Debug, Clone, PartialEq)]
pub struct FeedRequest {
    pub endpoint: &'static str,
    pub params: Vec<(&'static str, String)>,
}

impl FeedRequest {
    pub fn to_url(&self, base: &str) -> String {
        build_url(base, self.endpoint, &self.params)
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Build the dashboard request for `state`
pub fn build_query(state: &QueryState) -> FeedRequest {
    let cursor = state
        .cursor
        .as_ref()
        .map(|c| c.as_str().to_string())
        .unwrap_or_default();
    let search_value = truncate_utf16(&state.search_value, MAX_SEARCH_VALUE_CHARS);

    FeedRequest {
        endpoint: DASHBOARD_ENDPOINT,
        params: vec![
            ("cursor", cursor),
            ("searchValue", search_value),
            ("sortType", state.sort_type.as_str().to_string()),
        ],
    }
}

/// Longest prefix of `value` that fits in `max_units` UTF-16 code units
fn truncate_utf16(value: &str, max_units: usize) -> String {
    let mut units = 0;
    value
        .chars()
        .take_while(|c| {
            units += c.len_utf16();
            units <= max_units
        })
        .collect()
}

pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, QUERY_COMPONENT).to_string()
}

/// `key=value&...` with every key and value encoded independently
pub fn form_encode<K, V>(pairs: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", encode_component(k.as_ref()), encode_component(v.as_ref())))
        .collect::<Vec<_>>()
        .join("&")
}

/// `{base}{path}?{params}`; no `?` when there are no params
pub fn build_url<K, V>(base: &str, path: &str, params: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let base = base.trim_end_matches('/');
    if params.is_empty() {
        format!("{}{}", base, path)
    } else {
        format!("{}{}?{}", base, path, form_encode(params))
    }
}

/// Look up `name` in a `location.search` string ("?a=1&b=2")
pub fn url_param(search: &str, name: &str) -> Option<String> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| {
            let mut parts = pair.splitn(2, '=');
            let key = parts.next()?;
            let value = parts.next().unwrap_or("");
            Some((decode_component(key), decode_component(value)))
        })
        .find(|(key, _)| key == name)
        .map(|(_, value)| value)
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}
