//! Key input collaborator and key rebinding

pub mod keys;
mod rebind;

pub use rebind::{RebindController, RebindState};

use std::collections::HashSet;

/// Per-frame key state, addressed by legacy key-code name
pub trait KeyInput {
    /// Went down this frame
    fn key_down(&self, key: &str) -> bool;
}

/// Keys pressed this frame, filled in by the host
#[derive(Debug, Clone, Default)]
pub struct FrameKeys {
    down: HashSet<String>,
}

impl FrameKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pressed<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            down: keys.into_iter().map(Into::into).collect(),
        }
    }

    pub fn press(&mut self, key: impl Into<String>) {
        self.down.insert(key.into());
    }

    /// Forget this frame's presses
    pub fn clear(&mut self) {
        self.down.clear();
    }
}

impl KeyInput for FrameKeys {
    fn key_down(&self, key: &str) -> bool {
        self.down.contains(key)
    }
}
