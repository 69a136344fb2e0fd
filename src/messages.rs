//! Message types for the Elm-style architecture
//!
//! Every state change of the coordinator flows through these messages.

use crate::entry::EntryId;
use crate::toolkit::WidgetEvent;

#[derive(Debug, Clone)]
pub enum Msg {
    /// Raw widget interaction, routed to the manager chrome or an entry
    Widget(WidgetEvent),
    /// A store queued change notifications; drain and resync
    StoreChanged,

    // === Entry actions ===
    /// Discard an entry's draft
    UndoEntry(EntryId),
    /// Write an entry's declared default
    RevertEntry(EntryId),

    // === Manager actions ===
    /// Commit every dirty entry
    Save,
    /// Select a category by id; the current one is deselected
    SelectCategory(String),
    ShowAdvanced(bool),
    /// Search text, matched case-insensitively
    Filter(String),
    SetAutoSave(bool),
    /// Open or close the manager
    ToggleMenu,
}
