// Thread-safe controller handle
// Each operation takes the lock for its whole duration, so calls submitted
// concurrently are applied one after the other and never observe a partial
// effect of another call.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::asset::AssetPrimitive;
use crate::controller::{AssetController, ControllerResult};
use crate::crypto::Principal;
use crate::event::LoggedEvent;

/// Cloneable handle to one controller instance
pub struct SharedController<P> {
    inner: Arc<Mutex<AssetController<P>>>,
}

impl<P> Clone for SharedController<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P: AssetPrimitive> SharedController<P> {
    pub fn new(controller: AssetController<P>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(controller)),
        }
    }

    pub fn owner(&self) -> Principal {
        *self.inner.lock().owner()
    }

    pub fn paused(&self) -> bool {
        self.inner.lock().paused()
    }

    pub fn pause(&self, caller: &Principal) -> ControllerResult<()> {
        self.inner.lock().pause(caller)
    }

    pub fn unpause(&self, caller: &Principal) -> ControllerResult<()> {
        self.inner.lock().unpause(caller)
    }

    pub fn transfer_ownership(&self, caller: &Principal, new_owner: Principal) -> ControllerResult<()> {
        self.inner.lock().transfer_ownership(caller, new_owner)
    }

    pub fn mint(
        &self,
        caller: &Principal,
        recipient: &Principal,
        args: P::MintArgs,
    ) -> ControllerResult<P::Receipt> {
        self.inner.lock().mint(caller, recipient, args)
    }

    pub fn events(&self) -> Vec<LoggedEvent> {
        self.inner.lock().events().to_vec()
    }

    /// Run a read-only closure against a consistent view of the controller
    pub fn read<R>(&self, f: impl FnOnce(&AssetController<P>) -> R) -> R {
        f(&self.inner.lock())
    }
}
