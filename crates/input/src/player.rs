use clickframe_grid::{plan_transition, ClickPlan, Grid};
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::{AbortSignal, Actuator, FramePacer, InputError, Pace, ScreenLayout, Sleeper, Timing};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PlaybackReport {
    pub frames_total: usize,
    pub frames_drawn: usize,
    pub clicks: u64,
    pub overruns: usize,
    pub aborted: bool,
}

/// Clicks grids onto the screen one frame at a time.
///
/// The display is assumed to start with every cell `Empty`. Each frame is
/// planned against the grid drawn before it, drawn cell by cell, and then
/// held until its slot in the frame interval ends.
pub struct Player<A, S> {
    actuator: A,
    sleeper: S,
    layout: ScreenLayout,
    timing: Timing,
}

impl<A: Actuator, S: Sleeper> Player<A, S> {
    pub fn new(actuator: A, sleeper: S, layout: ScreenLayout, timing: Timing) -> Self {
        Self { actuator, sleeper, layout, timing }
    }

    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    pub fn into_parts(self) -> (A, S) {
        (self.actuator, self.sleeper)
    }

    /// Performs one plan: visit each cell, click, park the pointer, pause.
    pub fn draw(&mut self, plan: &ClickPlan) -> Result<(), InputError> {
        let per_cell = self.timing.per_cell_delay();
        for cell in plan.cells() {
            let (screen_x, screen_y) = self.layout.cell_position(cell.x, cell.y);
            self.actuator.move_to(screen_x, screen_y)?;
            if cell.clicks > 0 {
                self.actuator.click(cell.clicks)?;
            }
            let (park_x, park_y) = self.layout.park;
            self.actuator.move_to(park_x, park_y)?;
            self.sleeper.sleep(per_cell);
        }
        Ok(())
    }

    pub fn play(
        &mut self,
        frames: &[Grid],
        abort: &mut dyn AbortSignal,
        mut on_frame: impl FnMut(usize, usize),
    ) -> Result<PlaybackReport, InputError> {
        let mut report = PlaybackReport { frames_total: frames.len(), ..PlaybackReport::default() };
        let Some(first) = frames.first() else {
            return Ok(report);
        };

        self.timing.validate(first.size().cell_count())?;
        let pacer = FramePacer::new(self.timing.frame_interval());
        let mut current = Grid::empty(first.size())?;
        let mut slot_start = Instant::now();

        info!(frames = frames.len(), "playing");
        for (position, goal) in frames.iter().enumerate() {
            if abort.should_abort() {
                info!(frames_drawn = report.frames_drawn, "playback aborted");
                report.aborted = true;
                return Ok(report);
            }

            let plan = plan_transition(&current, goal)?;
            debug!(frame = position + 1, clicks = plan.total_clicks(), "drawing frame");
            self.draw(&plan)?;
            current = goal.clone();

            report.frames_drawn += 1;
            report.clicks += plan.total_clicks() as u64;
            on_frame(position + 1, frames.len());

            match pacer.pace(slot_start.elapsed()) {
                Pace::Sleep(remaining) => self.sleeper.sleep(remaining),
                Pace::Overrun(by) => {
                    report.overruns += 1;
                    warn!(
                        frame = position + 1,
                        overrun_ms = by.as_millis() as u64,
                        "frames are not being given enough time to display"
                    );
                }
            }
            slot_start = Instant::now();
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AbortToken, Action, NeverAbort, RecordingActuator, RecordingSleeper};
    use clickframe_grid::{CellState, GridSize};
    use std::time::Duration;

    struct AbortAfter(usize);

    impl AbortSignal for AbortAfter {
        fn should_abort(&mut self) -> bool {
            if self.0 == 0 {
                return true;
            }
            self.0 -= 1;
            false
        }
    }

    fn layout() -> ScreenLayout {
        ScreenLayout { origin: (100, 200), cell_size: (10, 20), park: (-1, -1) }
    }

    fn timing() -> Timing {
        Timing { frame_interval_ms: 1_000, per_cell_delay_ms: 5 }
    }

    fn player() -> Player<RecordingActuator, RecordingSleeper> {
        Player::new(RecordingActuator::new(), RecordingSleeper::default(), layout(), timing())
    }

    fn size() -> GridSize {
        GridSize::new(2, 1).unwrap()
    }

    #[test]
    fn draw_visits_every_cell_and_parks() {
        let mut player = player();
        let goal = Grid::from_cells(size(), vec![CellState::Full, CellState::Empty]).unwrap();
        let plan = plan_transition(&Grid::empty(size()).unwrap(), &goal).unwrap();

        player.draw(&plan).unwrap();

        assert_eq!(
            player.actuator().actions(),
            &[
                Action::MoveTo(100, 200),
                Action::Click(2),
                Action::MoveTo(-1, -1),
                Action::MoveTo(110, 200),
                Action::MoveTo(-1, -1),
            ]
        );
        assert_eq!(player.sleeper().requests, vec![Duration::from_millis(5); 2]);
    }

    #[test]
    fn play_clicks_only_the_difference_between_frames() {
        let mut player = player();
        let frames = vec![
            Grid::from_cells(size(), vec![CellState::Half, CellState::Full]).unwrap(),
            Grid::from_cells(size(), vec![CellState::Empty, CellState::Full]).unwrap(),
        ];
        let mut progress = Vec::new();

        let report = player
            .play(&frames, &mut NeverAbort, |done, total| progress.push((done, total)))
            .unwrap();

        // Frame 1: 1 + 2 clicks from blank. Frame 2: Half -> Empty is 2 clicks.
        assert_eq!(report.clicks, 5);
        assert_eq!(player.actuator().total_clicks(), 5);
        assert_eq!(report.frames_drawn, 2);
        assert!(!report.aborted);
        assert_eq!(progress, vec![(1, 2), (2, 2)]);
    }

    #[test]
    fn play_holds_each_frame_for_the_interval() {
        let mut player = player();
        let frames = vec![Grid::empty(size()).unwrap(); 3];

        let report = player.play(&frames, &mut NeverAbort, |_, _| {}).unwrap();

        let (_, sleeper) = player.into_parts();
        let holds: Vec<_> =
            sleeper.requests.iter().filter(|d| **d > Duration::from_millis(5)).collect();
        assert_eq!(holds.len(), 3);
        assert!(holds.iter().all(|d| **d <= Duration::from_secs(1)));
        assert_eq!(report.overruns, 0);
    }

    #[test]
    fn abort_stops_before_next_frame() {
        let mut player = player();
        let frames = vec![Grid::filled(size(), CellState::Full).unwrap(); 4];

        let report = player.play(&frames, &mut AbortAfter(2), |_, _| {}).unwrap();

        assert!(report.aborted);
        assert_eq!(report.frames_drawn, 2);
        assert_eq!(report.frames_total, 4);
    }

    #[test]
    fn raised_token_draws_nothing() {
        let mut player = player();
        let mut token = AbortToken::new();
        token.abort();

        let report =
            player.play(&[Grid::empty(size()).unwrap()], &mut token, |_, _| {}).unwrap();

        assert!(report.aborted);
        assert!(player.actuator().actions().is_empty());
    }

    #[test]
    fn slow_timing_is_rejected_before_drawing() {
        let mut player = Player::new(
            RecordingActuator::new(),
            RecordingSleeper::default(),
            layout(),
            Timing { frame_interval_ms: 5, per_cell_delay_ms: 5 },
        );

        let err = player
            .play(&[Grid::empty(size()).unwrap()], &mut NeverAbort, |_, _| {})
            .expect_err("two cells at 5ms do not fit in 5ms");

        assert!(matches!(err, InputError::FrameTooSlow { .. }));
        assert!(player.actuator().actions().is_empty());
    }

    /// Takes longer than asked, like a busy machine.
    struct SlowSleeper;

    impl Sleeper for SlowSleeper {
        fn sleep(&mut self, duration: Duration) {
            std::thread::sleep(duration + Duration::from_millis(5));
        }
    }

    #[test]
    fn frame_that_outlasts_its_slot_counts_as_overrun() {
        let mut player = Player::new(
            RecordingActuator::new(),
            SlowSleeper,
            layout(),
            Timing { frame_interval_ms: 1, per_cell_delay_ms: 0 },
        );
        let frames = vec![
            Grid::filled(size(), CellState::Half).unwrap(),
            Grid::filled(size(), CellState::Full).unwrap(),
        ];

        let report = player.play(&frames, &mut NeverAbort, |_, _| {}).unwrap();

        assert_eq!(report.overruns, 2);
        assert_eq!(report.frames_drawn, 2);
        assert_eq!(report.clicks, 4);
        assert!(!report.aborted);
    }

    #[test]
    fn empty_playlist_is_a_no_op() {
        let mut player = player();
        let report = player.play(&[], &mut NeverAbort, |_, _| {}).unwrap();
        assert_eq!(report, PlaybackReport::default());
    }
}
