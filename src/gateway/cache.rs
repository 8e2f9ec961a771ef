//! Cache hints a gateway reports back to the hosting server.
//!
//! Only the shapes live here. Deciding an overall policy from the hints is
//! the host's job.

use serde::{Deserialize, Serialize};

/// Who may cache a response.
///
/// Provisional: the set of scopes may still change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CacheScope {
    Public,
    Private,
}

/// A partial cache hint; absent fields leave the policy unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheHint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<CacheScope>,
}

impl CacheHint {
    #[inline]
    pub const fn new(max_age: Option<u32>, scope: Option<CacheScope>) -> Self {
        Self { max_age, scope }
    }
}

/// A cache hint with every field decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedCacheHint {
    pub max_age: u32,
    pub scope: CacheScope,
}

/// The overall cache policy of a request, accumulated from hints.
pub trait CachePolicy: Send + Sync {
    /// The hint accumulated so far.
    fn hint(&self) -> CacheHint;

    /// Overwrites every field the given hint sets.
    fn replace(&mut self, hint: CacheHint);

    /// Narrows the policy: lower max-age wins, `Private` wins over `Public`.
    fn restrict(&mut self, hint: CacheHint);

    /// The resolved policy, or `None` when the response must not be cached.
    fn policy_if_cacheable(&self) -> Option<ResolvedCacheHint>;
}
