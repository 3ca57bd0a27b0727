use csvedit_engine::Coord;

/// Pointer/keyboard interaction state.
///
/// Only one gesture is live at a time: a drag selection or an in-place edit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InteractionMode {
    #[default]
    Idle,
    Selecting,    // Mouse held down: entering a cell extends the selection
    Editing {
        cell: Coord,
        buffer: String,
    },
}

impl InteractionMode {
    pub fn is_editing(&self) -> bool {
        matches!(self, InteractionMode::Editing { .. })
    }

    pub fn is_selecting(&self) -> bool {
        matches!(self, InteractionMode::Selecting)
    }

    /// Cell under edit, if any.
    pub fn editing_cell(&self) -> Option<Coord> {
        match self {
            InteractionMode::Editing { cell, .. } => Some(*cell),
            _ => None,
        }
    }
}
