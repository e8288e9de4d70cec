//! # publisher-bridge
//!
//! Native bridge between the Kitsu Publisher frontend and its desktop host.
//!
//! The frontend never implements anything here; it calls a fixed set of
//! asynchronous operations on a host-provided object:
//!
//! | Operation | Result |
//! |---|---|
//! | `select_folder` | absolute path, or `None` on cancel |
//! | `save_session` | `true` on success, `false` on a persistence failure |
//! | `get_session` | stored tokens, or `None` |
//! | `clear_session` | `true`/`false` |
//! | `save_setting` | `true`/`false` |
//! | `get_setting` | stored value, or `None` |
//!
//! ## Design
//!
//! - Expected negative outcomes are data (`None`, `false`), never `Err`
//! - `Err` is reserved for host failures (bridge not ready, dialog failure)
//! - The bridge is obtained once through a [`BridgeSlot`], not as an ambient global
//! - Payloads are opaque `serde_json::Value`s, passed through untouched
//!
//! ## Ordering
//!
//! [`HostBridge`] serializes every persistence operation behind one lock, so
//! each call is atomic. Calls issued concurrently without awaiting still land
//! in lock-acquisition order; callers must await `save_session` before a
//! `get_session` that expects to observe it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod api;
pub mod dispatch;
pub mod error;
pub mod handle;
pub mod host;
pub mod mock;
pub mod picker;
pub mod store;

pub use api::NativeBridge;
pub use dispatch::invoke;
pub use error::{BridgeError, StoreError};
pub use handle::{BridgeHandle, BridgeSlot};
pub use host::HostBridge;
pub use mock::MockBridge;
pub use picker::{FolderPicker, PickerError, PromptPicker};
pub use store::{SettingsStore, SETTINGS_FILE};
