use std::time::Instant;

use rand::Rng;

use crate::app::control::{State, Ticker};
use crate::app::prefs::{ConfigError, Prefs};
use crate::app::surface::{Status, Style, Surface};
use crate::basic::{Cell, Dir, Grid};
use crate::error::{Error, ErrorConversion, Result};
use crate::food;
use crate::snake::{self, Outcome, Snake};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Input {
    Turn(Dir),
    Start,
}

struct Game<H> {
    snake: Snake<H>,
    food: Option<(Cell, H)>,
}

/// One player's game: the snake, its food, the tick schedule and
/// everything the surface is currently showing for them
pub struct Session<S: Surface, R> {
    prefs: Prefs,
    grid: Grid,
    ticker: Ticker,
    state: State,
    game: Option<Game<S::Handle>>,

    surface: S,
    rng: R,
}

impl<S: Surface, R: Rng> Session<S, R> {
    pub fn new(prefs: Prefs, mut surface: S, rng: R) -> std::result::Result<Self, ConfigError> {
        let grid = prefs.grid()?;
        surface.show_status(Status::Title);
        Ok(Self {
            ticker: Ticker::new(prefs.tick_interval()),
            prefs,
            grid,
            state: State::Idle,
            game: None,

            surface,
            rng,
        })
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Target length of the snake, 0 before the first game
    pub fn score(&self) -> usize {
        self.game.as_ref().map_or(0, |game| game.snake.target_len())
    }

    pub fn snake(&self) -> Option<&Snake<S::Handle>> {
        self.game.as_ref().map(|game| &game.snake)
    }

    pub fn food(&self) -> Option<Cell> {
        self.game.as_ref()?.food.as_ref().map(|(cell, _)| *cell)
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn next_tick(&self) -> Option<Instant> {
        self.ticker.pending()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Removes the current game from the surface and hands the surface back
    pub fn into_surface(mut self) -> S {
        self.clear();
        self.surface
    }

    pub fn handle_input(&mut self, input: Input, now: Instant) -> Result<Option<Outcome>> {
        match input {
            Input::Start => self.new_game(now).map(|()| None),
            Input::Turn(dir) => Ok(self.turn(dir, now)),
        }
    }

    /// Throws away whatever game was going on and starts over
    pub fn new_game(&mut self, now: Instant) -> Result {
        self.ticker.cancel();
        self.clear();

        let grid = self.grid;
        let start = match self.prefs.start {
            Some(cell) => cell,
            None => Cell::new(self.rng.gen_range(0..grid.cols), self.rng.gen_range(0..grid.rows)),
        };

        let surface = &mut self.surface;
        let snake = snake::Builder::default()
            .pos(start)
            .dir(Dir::R)
            .len(1)
            .build(|cell| surface.create_cell(grid.to_pixel(cell), Style::Segment))
            .map_err(Error::from)
            .with_trace_step("Session::new_game")?;

        log::info!("new game on a {}x{} grid, snake at {:?}", grid.cols, grid.rows, start);

        let food = place_food(grid, &snake, surface, &mut self.rng);
        let no_space = food.is_none();
        self.game = Some(Game { snake, food });

        if no_space {
            self.win();
        } else {
            let score = self.score();
            self.state = State::Running;
            self.surface.show_status(Status::Score(score));
            self.ticker.schedule(now);
        }
        Ok(())
    }

    /// Changes direction and moves right away instead of waiting for the
    /// next tick, ignored unless a game is running
    pub fn turn(&mut self, dir: Dir, now: Instant) -> Option<Outcome> {
        if self.state != State::Running {
            log::trace!("ignoring turn {:?} while {:?}", dir, self.state);
            return None;
        }

        if let Some(snake) = self.snake() {
            if dir.is_reverse_of(snake.dir) {
                log::debug!("reversing from {:?} to {:?}", snake.dir, dir);
            }
        }

        self.ticker.cancel();
        self.tick(dir, now)
    }

    /// Call periodically, runs the pending tick once it is due
    pub fn update(&mut self, now: Instant) -> Option<Outcome> {
        if self.state != State::Running || !self.ticker.take_due(now) {
            return None;
        }
        let dir = self.snake()?.dir;
        self.tick(dir, now)
    }

    fn tick(&mut self, dir: Dir, now: Instant) -> Option<Outcome> {
        let grid = self.grid;
        let game = self.game.as_mut()?;
        let surface = &mut self.surface;

        let food = game.food.as_ref().map(|(cell, _)| *cell);
        let (outcome, shed) = game
            .snake
            .step(dir, grid, food, |cell| surface.create_cell(grid.to_pixel(cell), Style::Segment));
        if let Some(tail) = shed {
            surface.remove_cell(tail.handle);
        }

        let score = game.snake.target_len();
        log::trace!("tick {:?} -> {:?}", dir, outcome);

        match outcome {
            Outcome::OutOfBounds | Outcome::SelfCollision => {
                log::info!(
                    "game over ({:?}) at {:?}, score {}",
                    outcome,
                    game.snake.head().pos.translate(dir),
                    score
                );
                self.state = State::GameOver;
                self.ticker.cancel();
                surface.show_status(Status::GameOver { score });
            }
            Outcome::Moved { grew } => {
                surface.show_status(Status::Score(score));
                if grew {
                    if let Some((_, handle)) = game.food.take() {
                        surface.remove_cell(handle);
                    }
                    game.food = place_food(grid, &game.snake, surface, &mut self.rng);
                }

                if game.food.is_none() {
                    self.win();
                } else {
                    self.ticker.schedule(now);
                }
            }
        }

        Some(outcome)
    }

    fn win(&mut self) {
        let score = self.score();
        log::info!("the snake filled the board, score {}", score);
        self.state = State::Won;
        self.ticker.cancel();
        self.surface.show_status(Status::Won { score });
    }

    fn clear(&mut self) {
        if let Some(game) = self.game.take() {
            if let Some((_, handle)) = game.food {
                self.surface.remove_cell(handle);
            }
            for segment in game.snake.into_segments() {
                self.surface.remove_cell(segment.handle);
            }
        }
    }
}

fn place_food<S: Surface>(
    grid: Grid,
    snake: &Snake<S::Handle>,
    surface: &mut S,
    rng: &mut impl Rng,
) -> Option<(Cell, S::Handle)> {
    match food::spawn(grid, snake.occupancy(), rng) {
        Some(cell) => {
            log::debug!("food at {:?}", cell);
            Some((cell, surface.create_cell(grid.to_pixel(cell), Style::Food)))
        }
        None => {
            log::warn!("no space left for food");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic::Point;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;
    use std::time::Duration;
    use Dir::*;

    #[derive(Default)]
    struct Recorder {
        live: HashMap<u64, (Point, Style)>,
        next: u64,
        status: Option<Status>,
    }

    impl Recorder {
        fn count(&self, style: Style) -> usize {
            self.live.values().filter(|(_, s)| *s == style).count()
        }
    }

    impl Surface for Recorder {
        type Handle = u64;

        fn create_cell(&mut self, pos: Point, style: Style) -> u64 {
            self.next += 1;
            self.live.insert(self.next, (pos, style));
            self.next
        }

        fn remove_cell(&mut self, handle: u64) {
            assert!(self.live.remove(&handle).is_some(), "handle {} removed twice", handle);
        }

        fn show_status(&mut self, status: Status) {
            self.status = Some(status);
        }
    }

    type TestSession = Session<Recorder, StdRng>;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn session(prefs: Prefs) -> TestSession {
        Session::new(prefs, Recorder::default(), StdRng::seed_from_u64(3)).expect("valid prefs")
    }

    fn started_at(start: Cell, t0: Instant) -> TestSession {
        let mut session = session(Prefs::default().start(start));
        session.new_game(t0).expect("new game");
        session
    }

    /// Moves the food somewhere predictable so it doesn't get in the way
    fn put_food(session: &mut TestSession, cell: Cell) {
        let grid = session.grid;
        let game = session.game.as_mut().expect("game running");
        assert!(!game.snake.occupancy().contains(cell));
        if let Some((_, handle)) = game.food.take() {
            session.surface.remove_cell(handle);
        }
        let handle = session.surface.create_cell(grid.to_pixel(cell), Style::Food);
        game.food = Some((cell, handle));
    }

    fn head(session: &TestSession) -> Cell {
        session.snake().expect("snake").head().pos
    }

    fn assert_surface_in_sync(session: &TestSession) {
        let snake_len = session.snake().map_or(0, |snake| snake.len());
        assert_eq!(session.surface().count(Style::Segment), snake_len);
        assert_eq!(session.surface().count(Style::Food), session.food().iter().count());
    }

    #[test]
    fn starts_idle() {
        let mut session = session(Prefs::default());
        assert_eq!(session.state(), State::Idle);
        assert_eq!(session.surface().status, Some(Status::Title));
        assert_eq!(session.score(), 0);
        assert_eq!(session.update(Instant::now() + ms(10_000)), None);
        assert_eq!(session.turn(U, Instant::now()), None);
        assert!(session.surface().live.is_empty());
    }

    #[test]
    fn three_timed_ticks_to_the_right() {
        let t0 = Instant::now();
        let start = Prefs::default().grid().expect("grid").cell_at_pixel(100, 100);
        let mut session = started_at(start, t0);
        put_food(&mut session, Cell::new(0, 0));

        assert_eq!(session.state(), State::Running);
        assert_eq!(session.score(), 1);
        assert_eq!(session.surface().status, Some(Status::Score(1)));

        assert_eq!(session.update(t0 + ms(199)), None);
        for i in 1..=3 {
            let outcome = session.update(t0 + ms(200 * i));
            assert_eq!(outcome, Some(Outcome::Moved { grew: false }), "tick {}", i);
            assert_surface_in_sync(&session);
        }

        assert_eq!(session.grid().to_pixel(head(&session)), Point { x: 130., y: 100. });
        assert_eq!(session.score(), 1);
        assert_eq!(session.surface().status, Some(Status::Score(1)));
    }

    #[test]
    fn eating_grows_and_moves_the_food() {
        let t0 = Instant::now();
        let mut session = started_at(Cell::new(5, 5), t0);
        put_food(&mut session, Cell::new(6, 5));

        let outcome = session.update(t0 + ms(200));
        assert_eq!(outcome, Some(Outcome::Moved { grew: true }));
        assert_eq!(session.score(), 2);
        assert_eq!(session.surface().status, Some(Status::Score(2)));

        let food = session.food().expect("food respawned");
        assert!(!session.snake().expect("snake").occupancy().contains(food));
        assert_surface_in_sync(&session);
    }

    #[test]
    fn turning_ticks_immediately() {
        let t0 = Instant::now();
        let mut session = started_at(Cell::new(5, 5), t0);
        put_food(&mut session, Cell::new(0, 0));

        assert_eq!(session.turn(U, t0 + ms(50)), Some(Outcome::Moved { grew: false }));
        assert_eq!(head(&session), Cell::new(5, 4));
        assert_eq!(session.next_tick(), Some(t0 + ms(250)));

        // the tick originally due at 200ms was replaced
        assert_eq!(session.update(t0 + ms(200)), None);
        assert_eq!(session.update(t0 + ms(250)), Some(Outcome::Moved { grew: false }));
        assert_eq!(head(&session), Cell::new(5, 3));
    }

    #[test]
    fn wall_ends_the_game() {
        let t0 = Instant::now();
        let mut session = started_at(Cell::new(19, 3), t0);
        put_food(&mut session, Cell::new(0, 0));

        assert_eq!(session.update(t0 + ms(200)), Some(Outcome::OutOfBounds));
        assert_eq!(session.state(), State::GameOver);
        assert_eq!(session.next_tick(), None);
        assert_eq!(session.surface().status, Some(Status::GameOver { score: 1 }));

        // movement is ignored from now on
        assert_eq!(session.turn(D, t0 + ms(300)), None);
        assert_eq!(session.update(t0 + ms(10_000)), None);
        assert_eq!(head(&session), Cell::new(19, 3));
        assert_surface_in_sync(&session);
    }

    #[test]
    fn quick_reversal_hits_own_body() {
        let t0 = Instant::now();
        let mut session = started_at(Cell::new(5, 5), t0);
        put_food(&mut session, Cell::new(6, 5));
        assert_eq!(session.update(t0 + ms(200)), Some(Outcome::Moved { grew: true }));
        put_food(&mut session, Cell::new(0, 0));

        assert_eq!(session.turn(U, t0 + ms(250)), Some(Outcome::Moved { grew: false }));
        assert_eq!(session.turn(D, t0 + ms(260)), Some(Outcome::SelfCollision));
        assert_eq!(session.state(), State::GameOver);
        assert_eq!(session.surface().status, Some(Status::GameOver { score: 2 }));
    }

    #[test]
    fn new_game_twice_from_game_over() {
        let t0 = Instant::now();
        let mut session = started_at(Cell::new(5, 5), t0);
        put_food(&mut session, Cell::new(6, 5));
        session.update(t0 + ms(200));
        put_food(&mut session, Cell::new(0, 0));
        session.turn(U, t0 + ms(210));
        session.turn(D, t0 + ms(220));
        assert_eq!(session.state(), State::GameOver);
        assert_eq!(session.score(), 2);

        let t1 = t0 + ms(1_000);
        for _ in 0..2 {
            assert_eq!(session.handle_input(Input::Start, t1).expect("restart"), None);
        }

        assert_eq!(session.state(), State::Running);
        assert_eq!(session.score(), 1);
        let snake = session.snake().expect("snake");
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.target_len(), 1);
        assert_eq!(head(&session), Cell::new(5, 5));
        assert_eq!(session.next_tick(), Some(t1 + ms(200)));
        assert_eq!(session.surface().status, Some(Status::Score(1)));
        assert_eq!(session.surface().live.len(), 2);
        assert_surface_in_sync(&session);
    }

    #[test]
    fn start_while_running_restarts() {
        let t0 = Instant::now();
        let mut session = started_at(Cell::new(5, 5), t0);
        put_food(&mut session, Cell::new(0, 0));
        session.update(t0 + ms(200));
        assert_eq!(head(&session), Cell::new(6, 5));

        session.handle_input(Input::Start, t0 + ms(300)).expect("restart");
        assert_eq!(head(&session), Cell::new(5, 5));
        assert_eq!(session.next_tick(), Some(t0 + ms(500)));
        assert_surface_in_sync(&session);
    }

    #[test]
    fn filling_the_board_wins() {
        let t0 = Instant::now();
        let prefs = Prefs::default().size(20, 10).start(Cell::new(0, 0));
        let mut session = session(prefs);
        session.new_game(t0).expect("new game");

        // only one cell is left for the food
        assert_eq!(session.food(), Some(Cell::new(1, 0)));
        assert_eq!(session.update(t0 + ms(200)), Some(Outcome::Moved { grew: true }));
        assert_eq!(session.state(), State::Won);
        assert_eq!(session.food(), None);
        assert_eq!(session.next_tick(), None);
        assert_eq!(session.surface().status, Some(Status::Won { score: 2 }));
        assert_eq!(session.turn(L, t0 + ms(300)), None);
    }

    #[test]
    fn random_start_is_on_the_grid() {
        let t0 = Instant::now();
        let mut session = session(Prefs::default());
        for i in 0..20 {
            session.new_game(t0 + ms(i)).expect("new game");
            assert!(session.grid().contains(head(&session)));
            assert_ne!(session.food(), Some(head(&session)));
            assert_surface_in_sync(&session);
        }
    }

    #[test]
    fn invalid_prefs_fail_fast() {
        let result = Session::new(
            Prefs::default().size(200, 195),
            Recorder::default(),
            StdRng::seed_from_u64(0),
        );
        assert!(matches!(result, Err(ConfigError::Indivisible { field: "height", .. })));
    }

    #[test]
    fn teardown_removes_every_cell() {
        let t0 = Instant::now();
        let mut session = started_at(Cell::new(5, 5), t0);
        put_food(&mut session, Cell::new(6, 5));
        session.update(t0 + ms(200));
        session.update(t0 + ms(400));

        let surface = session.into_surface();
        assert!(surface.live.is_empty());
    }
}
