//! Virtual fan — holds the last applied speed.

use std::sync::{Arc, Mutex, PoisonError};

use growbox_app::ports::Fan;
use growbox_domain::error::GrowboxError;

/// A simulated circulation fan.
#[derive(Clone, Default)]
pub struct VirtualFan {
    speed: Arc<Mutex<Option<u16>>>,
}

impl VirtualFan {
    /// The speed most recently applied; `None` before the first commit.
    #[must_use]
    pub fn speed(&self) -> Option<u16> {
        *self.speed.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Fan for VirtualFan {
    async fn set_speed(&self, speed: u16) -> Result<(), GrowboxError> {
        *self.speed.lock().unwrap_or_else(PoisonError::into_inner) = Some(speed);
        Ok(())
    }
}
