//! Key rebinding protocol
//!
//! idle -> listening (one owner at a time) -> captured key shown
//! provisionally -> confirm (take the key) or cancel (discard it).

use super::keys::{is_pollable, legacy_key_type};
use super::KeyInput;
use crate::entry::EntryId;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RebindState {
    #[default]
    Idle,
    Listening {
        owner: EntryId,
        captured: Option<String>,
    },
}

#[derive(Debug, Default)]
pub struct RebindController {
    state: RebindState,
}

impl RebindController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RebindState {
        &self.state
    }

    pub fn is_listening(&self) -> bool {
        matches!(self.state, RebindState::Listening { .. })
    }

    pub fn owner(&self) -> Option<EntryId> {
        match self.state {
            RebindState::Listening { owner, .. } => Some(owner),
            RebindState::Idle => None,
        }
    }

    /// Start listening for `owner`; refused while another entry listens
    pub fn begin(&mut self, owner: EntryId) -> bool {
        match &self.state {
            RebindState::Listening { owner: current, .. } if *current != owner => {
                tracing::debug!("Rebind for {:?} refused, {:?} is listening", owner, current);
                false
            }
            _ => {
                self.state = RebindState::Listening {
                    owner,
                    captured: None,
                };
                tracing::debug!("Rebind listening for {:?}", owner);
                true
            }
        }
    }

    /// Scan this frame's keys; the first pressed key becomes the capture
    ///
    /// Returns the owner and key name when something was captured.
    pub fn poll(&mut self, input: &dyn KeyInput) -> Option<(EntryId, String)> {
        let RebindState::Listening { owner, captured } = &mut self.state else {
            return None;
        };

        let ty = legacy_key_type();
        let pressed = ty
            .members
            .iter()
            .map(|m| m.name.as_str())
            .filter(|name| is_pollable(name))
            .find(|name| input.key_down(name))?;

        *captured = Some(pressed.to_string());
        Some((*owner, pressed.to_string()))
    }

    /// Finish listening and hand back the captured key, if any
    pub fn confirm(&mut self, owner: EntryId) -> Option<String> {
        match std::mem::take(&mut self.state) {
            RebindState::Listening {
                owner: current,
                captured,
            } if current == owner => captured,
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Finish listening and discard the capture
    pub fn cancel(&mut self, owner: EntryId) {
        if self.owner() == Some(owner) {
            self.state = RebindState::Idle;
            tracing::debug!("Rebind cancelled for {:?}", owner);
        }
    }

    /// Drop a listener that is going away
    pub fn release(&mut self, owner: EntryId) {
        self.cancel(owner);
    }
}
