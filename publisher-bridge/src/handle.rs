//! BridgeHandle and BridgeSlot: how callers obtain the bridge.
//!
//! The host installs its bridge into a [`BridgeSlot`] once initialization is
//! done. Callers either fail fast with [`BridgeError::Unavailable`] through
//! [`BridgeSlot::get`] or suspend on [`BridgeSlot::ready`].

use crate::api::NativeBridge;
use crate::error::BridgeError;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;
use tokio::sync::watch;

/// Shared reference to the host bridge.
///
/// Cheap to clone; all clones talk to the same host object.
#[derive(Clone)]
pub struct BridgeHandle {
    inner: Arc<dyn NativeBridge>,
}

impl BridgeHandle {
    /// Wrap a bridge implementation.
    pub fn new<B: NativeBridge + 'static>(bridge: B) -> Self {
        Self {
            inner: Arc::new(bridge),
        }
    }

    /// Wrap an already shared bridge.
    pub fn from_arc(inner: Arc<dyn NativeBridge>) -> Self {
        Self { inner }
    }
}

impl Deref for BridgeHandle {
    type Target = dyn NativeBridge;

    fn deref(&self) -> &Self::Target {
        self.inner.as_ref()
    }
}

impl fmt::Debug for BridgeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgeHandle").finish_non_exhaustive()
    }
}

/// Holds the bridge once the host has installed it.
#[derive(Debug)]
pub struct BridgeSlot {
    tx: watch::Sender<Option<BridgeHandle>>,
}

impl Default for BridgeSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl BridgeSlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Install the bridge. Only the first install succeeds.
    pub fn install(&self, handle: BridgeHandle) -> Result<(), BridgeError> {
        let installed = self.tx.send_if_modified(|slot| {
            if slot.is_some() {
                return false;
            }
            *slot = Some(handle);
            true
        });
        if installed {
            tracing::debug!("Native bridge installed");
            Ok(())
        } else {
            Err(BridgeError::AlreadyInstalled)
        }
    }

    /// Whether a bridge has been installed.
    pub fn is_ready(&self) -> bool {
        self.tx.borrow().is_some()
    }

    /// The installed bridge, or [`BridgeError::Unavailable`].
    pub fn get(&self) -> Result<BridgeHandle, BridgeError> {
        self.tx.borrow().clone().ok_or(BridgeError::Unavailable)
    }

    /// Wait until a bridge is installed.
    ///
    /// Has no timeout; wrap in `tokio::time::timeout` if one is needed.
    pub async fn ready(&self) -> Result<BridgeHandle, BridgeError> {
        let mut rx = self.tx.subscribe();
        let slot = rx
            .wait_for(Option::is_some)
            .await
            .map_err(|_| BridgeError::Unavailable)?;
        slot.clone().ok_or(BridgeError::Unavailable)
    }
}
