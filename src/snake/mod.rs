use std::collections::VecDeque;

use itertools::Itertools;

pub use builder::{Builder, BuilderError};
pub use occupancy::Occupancy;

use crate::basic::{Cell, Dir, Grid};

pub mod builder;
mod occupancy;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct SegmentId(pub u64);

/// One occupied cell of the body, `handle` is whatever the
/// render surface returned when the cell was drawn
#[derive(Clone, Debug)]
pub struct Segment<H> {
    pub id: SegmentId,
    pub pos: Cell,
    pub handle: H,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Outcome {
    OutOfBounds,
    SelfCollision,
    Moved { grew: bool },
}

pub struct Snake<H> {
    /// Tail first, head last
    segments: VecDeque<Segment<H>>,
    /// Kept in sync with `segments` by `step`
    occupancy: Occupancy,

    /// Direction of the last step
    pub dir: Dir,

    /// The length the snake is growing towards, this is also the score
    target_len: usize,
    next_id: u64,
}

impl<H> Snake<H> {
    pub fn head(&self) -> &Segment<H> {
        // a snake is never built without a head and step never pops the last segment
        &self.segments[self.segments.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn target_len(&self) -> usize {
        self.target_len
    }

    pub fn segments(&self) -> impl DoubleEndedIterator<Item = &Segment<H>> + ExactSizeIterator {
        self.segments.iter()
    }

    pub fn occupancy(&self) -> &Occupancy {
        &self.occupancy
    }

    /// Tears the snake down, handing back every segment (tail first)
    /// so their handles can be released
    pub fn into_segments(self) -> impl Iterator<Item = Segment<H>> {
        self.segments.into_iter()
    }

    fn next_id(&mut self) -> SegmentId {
        let id = SegmentId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Advance the snake by one cell in `dir`
    ///
    /// Collisions are checked against the cells occupied *before* the
    /// tail moves, so the snake can never move into the cell its tail
    /// is about to leave. On a crash the body is left untouched.
    /// `draw` is called once with the new head cell when the snake moves.
    /// If the tail had to give up a cell, the removed segment is returned
    /// alongside the outcome.
    pub fn step(
        &mut self,
        dir: Dir,
        grid: Grid,
        food: Option<Cell>,
        draw: impl FnOnce(Cell) -> H,
    ) -> (Outcome, Option<Segment<H>>) {
        self.dir = dir;

        let new_head_pos = self.head().pos.translate(dir);
        if !grid.contains(new_head_pos) {
            return (Outcome::OutOfBounds, None);
        }
        if self.occupancy.contains(new_head_pos) {
            return (Outcome::SelfCollision, None);
        }

        let id = self.next_id();
        self.occupancy.insert(new_head_pos, id);
        self.segments.push_back(Segment {
            id,
            pos: new_head_pos,
            handle: draw(new_head_pos),
        });

        let grew = food == Some(new_head_pos);
        let shed = if grew {
            self.target_len += 1;
            None
        } else if self.segments.len() > self.target_len {
            self.segments.pop_front().map(|tail| {
                let freed = self.occupancy.remove(tail.pos);
                debug_assert_eq!(freed, Some(tail.id), "tail {:?} missing from occupancy", tail.pos);
                tail
            })
        } else {
            None
        };

        debug_assert!(self.is_consistent(), "occupancy diverged from segments");
        (Outcome::Moved { grew }, shed)
    }

    /// Every segment is on a distinct cell and the occupancy
    /// index has exactly one entry per segment
    pub fn is_consistent(&self) -> bool {
        self.segments.len() == self.occupancy.len()
            && self.segments.iter().map(|seg| seg.pos).all_unique()
            && self
                .segments
                .iter()
                .all(|seg| self.occupancy.get(seg.pos) == Some(seg.id))
    }
}
