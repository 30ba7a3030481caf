use super::*;
use std::fmt::{Display, Formatter};

#[derive(Debug, Error)]
#[must_use]
pub struct BuilderError(pub Box<Builder>, pub &'static str);

impl Display for BuilderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "snake builder error: {}", self.1)?;
        write!(f, "builder: {:?}", self.0)
    }
}

#[derive(Default, Clone, Debug)]
pub struct Builder {
    pub pos: Option<Cell>,
    pub dir: Option<Dir>,
    pub len: Option<usize>,
}

impl Builder {
    #[inline(always)]
    #[must_use]
    pub fn pos(mut self, value: Cell) -> Self {
        self.pos = Some(value);
        self
    }

    #[inline(always)]
    #[must_use]
    pub fn dir(mut self, value: Dir) -> Self {
        self.dir = Some(value);
        self
    }

    #[inline(always)]
    #[must_use]
    pub fn len(mut self, value: usize) -> Self {
        self.len = Some(value);
        self
    }

    /// The snake starts out as a single segment at `pos` and grows
    /// towards `len` as it moves
    pub fn build<H>(&self, draw: impl FnOnce(Cell) -> H) -> Result<Snake<H>, BuilderError> {
        let pos = self
            .pos
            .ok_or_else(|| BuilderError(Box::new(self.clone()), "missing field `pos`"))?;
        let dir = self
            .dir
            .ok_or_else(|| BuilderError(Box::new(self.clone()), "missing field `dir`"))?;
        let target_len = self
            .len
            .ok_or_else(|| BuilderError(Box::new(self.clone()), "missing field `len`"))?;
        if target_len == 0 {
            return Err(BuilderError(Box::new(self.clone()), "`len` must be at least 1"));
        }

        log::debug!("spawn snake at {:?} going {:?}", pos, dir);

        let head = Segment {
            id: SegmentId(0),
            pos,
            handle: draw(pos),
        };

        let mut occupancy = Occupancy::new();
        occupancy.insert(pos, head.id);

        let mut segments = VecDeque::new();
        segments.push_back(head);

        Ok(Snake {
            segments,
            occupancy,
            dir,
            target_len,
            next_id: 1,
        })
    }
}

#[test]
fn test_missing_fields() {
    let missing_dir = Builder::default().pos(Cell::new(0, 0)).len(1);
    let err = missing_dir.build(|_| ()).err().expect("dir is missing");
    assert_eq!(err.1, "missing field `dir`");

    let zero_len = Builder::default().pos(Cell::new(0, 0)).dir(Dir::U).len(0);
    assert!(zero_len.build(|_| ()).is_err());

    let snake = Builder::default()
        .pos(Cell::new(3, 4))
        .dir(Dir::L)
        .len(2)
        .build(|_| ())
        .expect("all fields set");
    assert_eq!(snake.head().pos, Cell::new(3, 4));
    assert_eq!(snake.dir, Dir::L);
    assert_eq!(snake.len(), 1);
    assert_eq!(snake.target_len(), 2);
    assert!(snake.is_consistent());
}
