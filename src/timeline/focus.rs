use crate::core::aliases::UnitId;

/// Unit focus mode: one row stays lit, the rest are dimmed and ignore the
/// pointer. Presentation only; selection state is untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusState {
    focused: Option<UnitId>,
}

impl FocusState {
    pub fn focused(&self) -> Option<UnitId> {
        self.focused
    }

    /// Focusing the focused unit again exits focus mode.
    pub fn toggle(&mut self, unit_id: UnitId) -> Option<UnitId> {
        self.focused = match self.focused {
            Some(current) if current == unit_id => None,
            _ => Some(unit_id),
        };
        self.focused
    }

    pub fn clear(&mut self) {
        self.focused = None;
    }

    pub fn is_dimmed(&self, unit_id: UnitId) -> bool {
        self.focused.is_some_and(|f| f != unit_id)
    }

    pub fn accepts_pointer(&self, unit_id: UnitId) -> bool {
        !self.is_dimmed(unit_id)
    }
}
