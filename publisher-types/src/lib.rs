//! # publisher-types
//!
//! Shared types for the Kitsu Publisher desktop host.
//!
//! This crate provides the types both halves of the host agree on:
//! - [`SessionRecord`] - Authentication tokens plus the backend host they belong to
//! - [`default_settings`] - The settings document written on first launch
//! - [`RouteRule`], [`RouteTable`] - Development-time path forwarding
//! - [`RouteError`] - Route table validation errors

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod routes;
mod session;
mod settings;

pub use error::RouteError;
pub use routes::{RouteRule, RouteTable, DEV_BACKEND_ORIGIN, DEV_PREFIXES};
pub use session::SessionRecord;
pub use settings::{
    default_settings, is_reserved_key, SettingsDocument, LAST_DIRECTORY_KEY, SESSION_KEY,
};
