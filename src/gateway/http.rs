//! HTTP request/response shapes handed between the server and a gateway.

use serde::{Deserialize, Serialize};

/// An ordered, case-insensitive list of HTTP headers.
///
/// Names are stored lowercased. A name may appear several times; [`get`]
/// joins the values with `", "`.
///
/// [`get`]: HeaderMap::get
///
/// # Examples
///
/// ```
/// use gateway_errors::gateway::HeaderMap;
///
/// let mut headers = HeaderMap::new();
/// headers.append("Accept", "application/json");
/// headers.append("accept", "text/plain");
/// assert_eq!(headers.get("ACCEPT").as_deref(), Some("application/json, text/plain"));
///
/// headers.set("accept", "*/*");
/// assert_eq!(headers.get("accept").as_deref(), Some("*/*"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeaderMap {
    entries: Vec<(String, String)>,
}

impl HeaderMap {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value, keeping any existing values for the name.
    pub fn append(&mut self, name: &str, value: &str) {
        self.entries.push((name.to_ascii_lowercase(), value.to_owned()));
    }

    /// Removes every value for the name.
    pub fn delete(&mut self, name: &str) {
        let name = name.to_ascii_lowercase();
        self.entries.retain(|(n, _)| *n != name);
    }

    /// All values for the name joined with `", "`, or `None` when absent.
    pub fn get(&self, name: &str) -> Option<String> {
        let mut values = self.values_of(name).peekable();
        values.peek()?;
        Some(values.collect::<Vec<_>>().join(", "))
    }

    pub fn has(&self, name: &str) -> bool {
        self.values_of(name).next().is_some()
    }

    /// Replaces every value for the name with a single value.
    pub fn set(&mut self, name: &str, value: &str) {
        self.delete(name);
        self.append(name, value);
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(_, v)| v.as_str())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn values_of<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a str> + 'a {
        let name = name.to_ascii_lowercase();
        self.entries.iter().filter(move |(n, _)| *n == name).map(|(_, v)| v.as_str())
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for HeaderMap {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut headers = HeaderMap::new();
        for (name, value) in iter {
            headers.append(name, value);
        }
        headers
    }
}

/// The HTTP request a query arrived on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpRequest {
    pub method: String,
    pub url: String,
    pub headers: HeaderMap,
}

/// The HTTP response a gateway wants the server to send.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpResponse {
    pub headers: HeaderMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}
