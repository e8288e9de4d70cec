//! # publisher-devproxy
//!
//! Development server for the Kitsu Publisher frontend.
//!
//! While the frontend is developed on its own, API calls still have to reach
//! the backend. This server:
//! - Forwards requests under `/auth`, `/files`, `/kitsu`, `/publish`, `/logs`
//!   and `/system` to the backend origin (default `http://localhost:8000`)
//! - Serves everything else from the frontend build directory
//! - Never consults the routing table in production mode, where the backend
//!   serves the frontend from the same origin
//!
//! ## Architecture
//!
//! ```text
//!  webview / browser
//!         │
//!  ┌──────┴───────────────────────┐
//!  │        publisher-devproxy    │
//!  │  /kitsu/shows ──────────────────────► backend :8000
//!  │  /static/app.js ──► build/   │
//!  └──────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod http;
pub mod proxy;
pub mod server;
pub mod statics;

pub use config::{Config, ServeMode};
pub use error::{ConfigError, DevProxyError};
pub use server::DevServer;
