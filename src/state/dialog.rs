//! Transient dialog state for the UI layer.

use super::player::PlayerId;

/// Whether a dialog is open, and the payload it was opened with.
///
/// The payload is present exactly while the dialog is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogState<T> {
    data: Option<T>,
}

impl<T> Default for DialogState<T> {
    fn default() -> Self {
        Self { data: None }
    }
}

impl<T> DialogState<T> {
    /// Create a closed dialog.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, data: T) {
        self.data = Some(data);
    }

    /// Close the dialog, returning its payload.
    pub fn close(&mut self) -> Option<T> {
        self.data.take()
    }

    pub fn is_open(&self) -> bool {
        self.data.is_some()
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Swap the payload of an open dialog. Does nothing while closed.
    pub fn replace(&mut self, data: T) {
        if self.is_open() {
            self.data = Some(data);
        }
    }
}

/// The cell edited by the score input dialog.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScoreInputTarget {
    pub player_id: PlayerId,
    pub round_number: u32,
}

impl ScoreInputTarget {
    pub fn new(player_id: PlayerId, round_number: u32) -> Self {
        Self {
            player_id,
            round_number,
        }
    }
}
