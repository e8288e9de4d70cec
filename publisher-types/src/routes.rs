//! Development-time routing table.
//!
//! Maps URL path prefixes to the backend origin that serves them while the
//! frontend runs from a local dev server. Matching is a plain string prefix
//! test, so `/auth` also claims `/authorize`. Because of that, no prefix may be
//! a string prefix of another; [`RouteTable::new`] enforces it.

use crate::error::RouteError;

/// Backend origin used by the development table.
pub const DEV_BACKEND_ORIGIN: &str = "http://localhost:8000";

/// Path prefixes forwarded to the backend during development.
pub const DEV_PREFIXES: [&str; 6] = ["/auth", "/files", "/kitsu", "/publish", "/logs", "/system"];

/// A single prefix → origin pairing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRule {
    prefix: String,
    target: String,
}

impl RouteRule {
    /// Create a validated rule.
    ///
    /// A trailing slash on the origin is dropped (`http://h:1/` → `http://h:1`).
    pub fn new(prefix: &str, target: &str) -> Result<Self, RouteError> {
        validate_prefix(prefix)?;
        let target = normalize_origin(target)?;
        Ok(Self {
            prefix: prefix.to_string(),
            target,
        })
    }

    /// The path prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The target origin (`scheme://host[:port]`).
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Whether `path` falls under this rule.
    pub fn matches(&self, path: &str) -> bool {
        path.starts_with(&self.prefix)
    }

    /// Absolute upstream URL for a request path (and optional query).
    pub fn upstream_url(&self, path_and_query: &str) -> String {
        format!("{}{}", self.target, path_and_query)
    }
}

/// An immutable set of disjoint [`RouteRule`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    rules: Vec<RouteRule>,
}

impl RouteTable {
    /// Build a table, rejecting overlapping prefixes.
    pub fn new(rules: Vec<RouteRule>) -> Result<Self, RouteError> {
        for (i, a) in rules.iter().enumerate() {
            for b in &rules[i + 1..] {
                if a.prefix.starts_with(&b.prefix) || b.prefix.starts_with(&a.prefix) {
                    return Err(RouteError::Overlapping {
                        first: a.prefix.clone(),
                        second: b.prefix.clone(),
                    });
                }
            }
        }
        Ok(Self { rules })
    }

    /// Build a table sending every prefix to the same origin.
    pub fn single_origin<S: AsRef<str>>(prefixes: &[S], origin: &str) -> Result<Self, RouteError> {
        let rules = prefixes
            .iter()
            .map(|p| RouteRule::new(p.as_ref(), origin))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(rules)
    }

    /// The development table: [`DEV_PREFIXES`] → [`DEV_BACKEND_ORIGIN`].
    pub fn dev_default() -> Self {
        let rules = DEV_PREFIXES
            .iter()
            .map(|prefix| RouteRule {
                prefix: (*prefix).to_string(),
                target: DEV_BACKEND_ORIGIN.to_string(),
            })
            .collect();
        Self { rules }
    }

    /// Find the rule claiming `path`, if any.
    pub fn route(&self, path: &str) -> Option<&RouteRule> {
        self.rules.iter().find(|rule| rule.matches(path))
    }

    /// All rules in registration order.
    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn validate_prefix(prefix: &str) -> Result<(), RouteError> {
    if !prefix.starts_with('/') || prefix.len() < 2 || prefix.ends_with('/') {
        return Err(RouteError::InvalidPrefix(prefix.to_string()));
    }
    if prefix.contains(['?', '#']) {
        return Err(RouteError::InvalidPrefix(prefix.to_string()));
    }
    Ok(())
}

fn normalize_origin(origin: &str) -> Result<String, RouteError> {
    let invalid = || RouteError::InvalidOrigin(origin.to_string());
    let trimmed = origin.strip_suffix('/').unwrap_or(origin);
    let authority = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .ok_or_else(invalid)?;
    if authority.is_empty() || authority.contains(['/', '?', '#', ' ']) {
        return Err(invalid());
    }
    Ok(trimmed.to_string())
}
