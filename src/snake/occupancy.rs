use std::collections::HashMap;

use crate::basic::Cell;
use crate::snake::SegmentId;

/// Which segment (if any) sits on each cell of the board
#[derive(Default, Debug, Clone)]
pub struct Occupancy {
    cells: HashMap<Cell, SegmentId>,
}

impl Occupancy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, cell: Cell, segment: SegmentId) {
        let previous = self.cells.insert(cell, segment);
        debug_assert!(
            previous.is_none(),
            "cell {:?} already occupied by segment {:?}, tried to insert {:?}",
            cell,
            previous,
            segment,
        );
    }

    pub fn remove(&mut self, cell: Cell) -> Option<SegmentId> {
        self.cells.remove(&cell)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains_key(&cell)
    }

    pub fn get(&self, cell: Cell) -> Option<SegmentId> {
        self.cells.get(&cell).copied()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
