//! Error types for route table construction.

use thiserror::Error;

/// Errors raised while building a [`RouteTable`](crate::RouteTable).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// Prefix is empty, lacks a leading slash, is `/`, or ends with a slash.
    #[error("invalid route prefix: {0:?}")]
    InvalidPrefix(String),

    /// Two prefixes overlap, so a path could match both.
    #[error("overlapping route prefixes: {first:?} and {second:?}")]
    Overlapping {
        /// The prefix registered first.
        first: String,
        /// The prefix that overlaps it.
        second: String,
    },

    /// Target is not a bare `http`/`https` origin.
    #[error("invalid target origin: {0:?}")]
    InvalidOrigin(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = RouteError::Overlapping {
            first: "/auth".to_string(),
            second: "/auth/v2".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "overlapping route prefixes: \"/auth\" and \"/auth/v2\""
        );
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RouteError>();
    }
}
