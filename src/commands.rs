//! Command types for the Elm-style architecture
//!
//! Commands are side effects the host performs after an update.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// Widget state changed; repaint
    Redraw,
    /// Manager preferences changed; persist `ManagerConfig`
    SaveConfig,
    /// Several commands in order
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Combine two optional commands
    pub fn merge(a: Option<Cmd>, b: Option<Cmd>) -> Option<Cmd> {
        match (a, b) {
            (None, b) => b,
            (a, None) => a,
            (Some(a), Some(b)) if a == b => Some(a),
            (Some(a), Some(b)) => Some(Cmd::Batch(vec![a, b])),
        }
    }
}
