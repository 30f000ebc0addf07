use core::time::Duration;
use serde::{Deserialize, Serialize};

/// Identifies one game session; a fresh id is handed out every time the board is replaced.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(u32);

impl SessionId {
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Token handed to the [`Scheduler`] and given back to the controller when the delay is up.
///
/// Ticks from a replaced session are ignored, which makes stray timers harmless.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tick {
    pub session: SessionId,
}

/// Delay-then-invoke capability of the host.
///
/// At most one tick is pending at any time; scheduling a new one replaces it.
pub trait Scheduler {
    fn schedule(&mut self, delay: Duration, tick: Tick);
    fn cancel(&mut self);
}
