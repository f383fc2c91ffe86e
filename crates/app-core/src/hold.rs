//! Per-device hold timer state.
//!
//! A press arms the device's slot and hands back a [`HoldHandle`]; the
//! frontend schedules the handle with a real timeout and feeds it back on
//! expiry. Each arm bumps a generation counter, so a callback that outlives
//! its press (cancelled by release, superseded by a new press, or orphaned
//! by session teardown) is rejected instead of firing a stale grab.

use glam::Vec3;

/// Token identifying one scheduled hold timeout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HoldHandle {
    pub device: usize,
    pub generation: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum HoldState {
    Idle,
    Pending { press_pose: Vec3 },
}

/// One device's hold-disambiguation slot. At most one timeout is live per
/// device; arming implicitly invalidates the previous one.
#[derive(Clone, Copy, Debug)]
pub struct HoldSlot {
    generation: u32,
    state: HoldState,
}

impl Default for HoldSlot {
    fn default() -> Self {
        Self {
            generation: 0,
            state: HoldState::Idle,
        }
    }
}

impl HoldSlot {
    /// Arm the slot for a new press and return the handle to schedule.
    pub fn arm(&mut self, device: usize, press_pose: Vec3) -> HoldHandle {
        self.generation = self.generation.wrapping_add(1);
        self.state = HoldState::Pending { press_pose };
        HoldHandle {
            device,
            generation: self.generation,
        }
    }

    /// Cancel any pending timeout. Returns true if one was pending.
    pub fn cancel(&mut self) -> bool {
        let was_pending = matches!(self.state, HoldState::Pending { .. });
        self.state = HoldState::Idle;
        was_pending
    }

    /// Consume a fired handle. Yields the press-time pose only if the handle
    /// is current and the slot is still pending; stale or cancelled handles
    /// yield nothing.
    pub fn take_if_current(&mut self, handle: HoldHandle) -> Option<Vec3> {
        if handle.generation != self.generation {
            return None;
        }
        match self.state {
            HoldState::Pending { press_pose } => {
                self.state = HoldState::Idle;
                Some(press_pose)
            }
            HoldState::Idle => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, HoldState::Pending { .. })
    }
}
