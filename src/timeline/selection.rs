//! Two-click rectangular selection over units × dates.
//!
//! The first click stores an anchor, the second click is the opposite
//! corner. The rectangle is expanded into one [`SelectionRange`] per unit
//! between the two corners in the current row order. All transitions go
//! through [`transition`], which never mutates its input.

use crate::core::aliases::UnitId;
use crate::core::types::SelectionHistory;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Anchor {
    pub unit_id: UnitId,
    pub date: NaiveDate,
}

/// One row of a completed rectangle; `start <= end`, both inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectionRange {
    pub unit_id: UnitId,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl SelectionRange {
    pub fn contains(&self, unit_id: UnitId, date: NaiveDate) -> bool {
        self.unit_id == unit_id && self.start <= date && date <= self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SelectionPhase {
    #[default]
    Idle,
    Selecting { anchor: Anchor },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEvent {
    Click { unit_id: UnitId, date: NaiveDate },
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SelectionEdge {
    Start,
    End,
    /// Single-day range.
    Both,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    phase: SelectionPhase,
    ranges: Vec<SelectionRange>,
}

impl SelectionState {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SelectionPhase {
        self.phase
    }

    pub fn ranges(&self) -> &[SelectionRange] {
        &self.ranges
    }

    pub fn is_selecting(&self) -> bool {
        matches!(self.phase, SelectionPhase::Selecting { .. })
    }

    pub fn anchor(&self) -> Option<Anchor> {
        match self.phase {
            SelectionPhase::Selecting { anchor } => Some(anchor),
            SelectionPhase::Idle => None,
        }
    }

    /// Cell highlight.
    pub fn is_selected(&self, unit_id: UnitId, date: NaiveDate) -> bool {
        self.ranges.iter().any(|r| r.contains(unit_id, date))
    }

    /// Edge styling for the first/last day of a range on `unit_id`.
    pub fn edge(&self, unit_id: UnitId, date: NaiveDate) -> Option<SelectionEdge> {
        let mut start = false;
        let mut end = false;
        for r in self.ranges.iter().filter(|r| r.unit_id == unit_id) {
            start |= r.start == date;
            end |= r.end == date;
        }
        match (start, end) {
            (true, true) => Some(SelectionEdge::Both),
            (true, false) => Some(SelectionEdge::Start),
            (false, true) => Some(SelectionEdge::End),
            (false, false) => None,
        }
    }

    /// The live anchor of an in-progress selection.
    pub fn is_anchor(&self, unit_id: UnitId, date: NaiveDate) -> bool {
        self.anchor()
            .is_some_and(|a| a.unit_id == unit_id && a.date == date)
    }
}

/// Next state for `event`. `unit_order` is the current row order of the
/// board; a unit missing from it aborts the selection instead of failing.
pub fn transition(
    state: &SelectionState,
    event: SelectionEvent,
    unit_order: &[UnitId],
    history: SelectionHistory,
) -> SelectionState {
    let (unit_id, date) = match event {
        SelectionEvent::Clear => return SelectionState::idle(),
        SelectionEvent::Click { unit_id, date } => (unit_id, date),
    };
    let index_of = |id: UnitId| unit_order.iter().position(|u| *u == id);

    match state.phase {
        SelectionPhase::Idle => {
            if index_of(unit_id).is_none() {
                return state.clone();
            }
            let ranges = match history {
                SelectionHistory::Replace => Vec::new(),
                SelectionHistory::Accumulate => state.ranges.clone(),
            };
            SelectionState {
                phase: SelectionPhase::Selecting {
                    anchor: Anchor { unit_id, date },
                },
                ranges,
            }
        }
        SelectionPhase::Selecting { anchor } => {
            let mut ranges = state.ranges.clone();
            if let (Some(a), Some(b)) = (index_of(anchor.unit_id), index_of(unit_id)) {
                let (first, last) = (a.min(b), a.max(b));
                let (start, end) = (anchor.date.min(date), anchor.date.max(date));
                ranges.extend(unit_order[first..=last].iter().map(|&unit_id| {
                    SelectionRange {
                        unit_id,
                        start,
                        end,
                    }
                }));
            }
            SelectionState {
                phase: SelectionPhase::Idle,
                ranges,
            }
        }
    }
}

/// Stateful wrapper the host keeps between events.
#[derive(Debug, Clone, Default)]
pub struct DateSelectionEngine {
    state: SelectionState,
    history: SelectionHistory,
}

impl DateSelectionEngine {
    pub fn new(history: SelectionHistory) -> Self {
        Self {
            state: SelectionState::idle(),
            history,
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn history(&self) -> SelectionHistory {
        self.history
    }

    pub fn click(
        &mut self,
        unit_id: UnitId,
        date: NaiveDate,
        unit_order: &[UnitId],
    ) -> &SelectionState {
        self.apply(SelectionEvent::Click { unit_id, date }, unit_order)
    }

    pub fn clear(&mut self) -> &SelectionState {
        self.apply(SelectionEvent::Clear, &[])
    }

    fn apply(&mut self, event: SelectionEvent, unit_order: &[UnitId]) -> &SelectionState {
        self.state = transition(&self.state, event, unit_order, self.history);
        &self.state
    }
}
