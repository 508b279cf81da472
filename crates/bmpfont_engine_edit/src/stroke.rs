/// Pointer stroke state machine.
///
/// `Idle --press--> Active`, `Active --move--> Active`, `Active --release--> Idle`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StrokeState {
    #[default]
    Idle,
    /// A button is held down; `last_cell` is the last cell the stroke touched
    Active { last_cell: (i32, i32) },
}

impl StrokeState {
    pub fn is_active(&self) -> bool {
        matches!(self, StrokeState::Active { .. })
    }

    /// Start a stroke. The pressed cell is always painted.
    pub fn press(&mut self, cell: (i32, i32)) -> (i32, i32) {
        *self = StrokeState::Active { last_cell: cell };
        cell
    }

    /// The pointer entered `cell`. Returns the cell to paint, if any.
    ///
    /// Only a cell different from the last touched one is painted; cells the
    /// pointer skipped over are not interpolated.
    pub fn enter(&mut self, cell: (i32, i32)) -> Option<(i32, i32)> {
        match self {
            StrokeState::Idle => None,
            StrokeState::Active { last_cell } if *last_cell == cell => None,
            StrokeState::Active { last_cell } => {
                *last_cell = cell;
                Some(cell)
            }
        }
    }

    /// End the stroke. Returns whether a stroke was active.
    pub fn release(&mut self) -> bool {
        let was_active = self.is_active();
        *self = StrokeState::Idle;
        was_active
    }
}
