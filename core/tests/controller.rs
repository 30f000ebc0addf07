use std::collections::VecDeque;
use std::time::Duration;

use lightsout_core::*;

/// Keeps the last visual state pushed by the controller, plus a count of notifications.
#[derive(Debug, Default)]
struct RecordingRenderer {
    size: Coord,
    lights: Vec<Vec<bool>>,
    undo_enabled: bool,
    redo_enabled: bool,
    history_mode: bool,
    win_visible: bool,
    wins_shown: usize,
}

impl RecordingRenderer {
    fn lit(&self) -> Vec<Cell> {
        let mut lit = Vec::new();
        for (row, lights) in self.lights.iter().enumerate() {
            for (column, &on) in lights.iter().enumerate() {
                if on {
                    lit.push(Cell::new(row as Coord, column as Coord));
                }
            }
        }
        lit
    }

    fn shows(&self, grid: &Grid) -> bool {
        grid.iter()
            .all(|(cell, lit)| self.lights[cell.row as usize][cell.column as usize] == lit)
    }
}

impl Renderer for RecordingRenderer {
    fn set_board_size(&mut self, size: Coord) {
        self.size = size;
        self.lights = vec![vec![false; size as usize]; size as usize];
    }

    fn set_light(&mut self, cell: Cell, lit: bool) {
        self.lights[cell.row as usize][cell.column as usize] = lit;
    }

    fn set_undo_enabled(&mut self, enabled: bool) {
        self.undo_enabled = enabled;
    }

    fn set_redo_enabled(&mut self, enabled: bool) {
        self.redo_enabled = enabled;
    }

    fn set_history_mode(&mut self, active: bool) {
        self.history_mode = active;
    }

    fn show_win_notification(&mut self) {
        self.win_visible = true;
        self.wins_shown += 1;
    }

    fn hide_win_notification(&mut self) {
        self.win_visible = false;
    }
}

/// Fake clock: nothing fires until the test says so.
#[derive(Debug, Default)]
struct ManualClock {
    now: Duration,
    pending: VecDeque<(Duration, Tick)>,
    cancelled: usize,
}

impl ManualClock {
    fn fire_next(&mut self) -> Option<Tick> {
        let (due, tick) = self.pending.pop_front()?;
        self.now = due;
        Some(tick)
    }
}

impl Scheduler for ManualClock {
    fn schedule(&mut self, delay: Duration, tick: Tick) {
        self.pending.clear();
        self.pending.push_back((self.now + delay, tick));
    }

    fn cancel(&mut self) {
        self.pending.clear();
        self.cancelled += 1;
    }
}

type Controller = GameController<RecordingRenderer, ManualClock>;

fn controller(size: Coord) -> Controller {
    GameController::new(
        GameConfig::new(size),
        RecordingRenderer::default(),
        ManualClock::default(),
    )
}

fn run_clock(controller: &mut Controller) -> usize {
    let mut ticks = 0;
    while let Some(tick) = controller.scheduler_mut().fire_next() {
        assert!(controller.on_tick(tick));
        ticks += 1;
    }
    ticks
}

/// 1x1 boards are won by the first click.
fn won_single_cell() -> Controller {
    let mut controller = controller(1);
    assert_eq!(
        controller.on_cell_clicked(Cell::new(0, 0)),
        MoveOutcome::Won
    );
    controller
}

#[test]
fn new_game_draws_fully_lit_board() {
    let controller = controller(3);

    let renderer = controller.renderer();
    assert_eq!(renderer.size, 3);
    assert_eq!(renderer.lit().len(), 9);
    assert!(!renderer.undo_enabled);
    assert!(!renderer.redo_enabled);
    assert!(!controller.is_locked());
}

#[test]
fn center_click_on_3x3_leaves_four_corners() {
    let mut controller = controller(3);

    let outcome = controller.on_cell_clicked(Cell::new(1, 1));

    assert_eq!(outcome, MoveOutcome::Applied);
    assert_eq!(
        controller.renderer().lit(),
        vec![
            Cell::new(0, 0),
            Cell::new(0, 2),
            Cell::new(2, 0),
            Cell::new(2, 2),
        ]
    );
    assert!(controller.renderer().undo_enabled);
    assert!(!controller.renderer().redo_enabled);
}

#[test]
fn undo_then_redo_round_trips_the_board() {
    let mut controller = controller(4);
    controller.on_cell_clicked(Cell::new(0, 3));
    let before = controller.grid().clone();
    controller.on_cell_clicked(Cell::new(2, 1));
    let after = controller.grid().clone();

    assert_eq!(controller.undo_requested(), Some(Cell::new(2, 1)));
    assert_eq!(controller.grid(), &before);
    assert!(controller.renderer().redo_enabled);

    assert_eq!(controller.redo_requested(), Some(Cell::new(2, 1)));
    assert_eq!(controller.grid(), &after);
    assert!(controller.renderer().shows(&after));
    assert!(!controller.renderer().redo_enabled);
}

#[test]
fn fresh_move_after_undo_discards_redo() {
    let mut controller = controller(3);
    controller.on_cell_clicked(Cell::new(0, 0));
    controller.on_cell_clicked(Cell::new(2, 2));
    controller.undo_requested();
    controller.undo_requested();

    controller.on_cell_clicked(Cell::new(1, 1));

    assert_eq!(controller.redo_requested(), None);
    assert!(!controller.renderer().redo_enabled);
    assert_eq!(controller.history().past(), &[Cell::new(1, 1)]);
}

#[test]
fn undo_and_redo_never_celebrate() {
    let mut controller = won_single_cell();
    run_clock(&mut controller);
    assert!(controller.dismiss_win());

    assert_eq!(controller.undo_requested(), Some(Cell::new(0, 0)));
    assert_eq!(controller.redo_requested(), Some(Cell::new(0, 0)));

    assert!(controller.grid().is_all_off());
    assert!(!controller.is_celebrating());
    assert!(controller.scheduler().pending.is_empty());
    assert_eq!(controller.renderer().wins_shown, 1);
}

#[test]
fn out_of_bounds_click_is_ignored() {
    let mut controller = controller(3);

    assert_eq!(
        controller.on_cell_clicked(Cell::new(3, 0)),
        MoveOutcome::Ignored
    );
    assert_eq!(controller.grid(), &Grid::new(3));
    assert!(!controller.history().can_undo());
}

#[test]
fn win_locks_board_until_dismissed() {
    let mut controller = won_single_cell();

    assert!(controller.is_locked());
    assert_eq!(
        controller.on_cell_clicked(Cell::new(0, 0)),
        MoveOutcome::Ignored
    );
    assert_eq!(controller.undo_requested(), None);
    assert!(!controller.toggle_history_preview());
    assert!(!controller.reset(None));
    assert!(!controller.dismiss_win());
    assert!(!controller.renderer().undo_enabled);

    let ticks = run_clock(&mut controller);

    assert_eq!(ticks, 8 * 4 + 2 * 2);
    assert!(controller.renderer().win_visible);
    assert!(controller.grid().is_all_off());
    assert!(controller.renderer().lit().is_empty());
    assert!(controller.is_locked());

    assert!(controller.dismiss_win());
    assert!(!controller.renderer().win_visible);
    assert!(!controller.is_locked());
    assert!(controller.renderer().undo_enabled);
}

#[test]
fn celebration_runs_on_fake_clock_with_fixed_delays() {
    let mut controller = won_single_cell();

    assert_eq!(
        controller.scheduler().pending.front().map(|(due, _)| *due),
        Some(BEAM_STEP_DELAY)
    );
    run_clock(&mut controller);

    // 32 beam ticks at 75ms, two sweeps of two ring ticks at 125ms
    let expected = BEAM_STEP_DELAY * 32 + RING_STEP_DELAY * 4;
    assert_eq!(controller.scheduler().now, expected);
}

#[test]
fn clearing_a_larger_board_announces_after_celebration() {
    let mut controller = controller(2);
    let moves = [(0, 0), (0, 1), (1, 0)];
    for (row, column) in moves {
        assert_eq!(
            controller.on_cell_clicked(Cell::new(row, column)),
            MoveOutcome::Applied
        );
    }
    assert_eq!(
        controller.on_cell_clicked(Cell::new(1, 1)),
        MoveOutcome::Won
    );

    run_clock(&mut controller);

    assert!(controller.renderer().win_visible);
    assert!(controller.grid().is_all_off());
    assert!(controller.renderer().shows(controller.grid()));
}

#[test]
fn history_preview_shows_clicked_cells_and_restores_live_board() {
    let mut controller = controller(3);
    controller.on_cell_clicked(Cell::new(0, 0));
    controller.on_cell_clicked(Cell::new(1, 1));
    let live = controller.grid().clone();

    assert!(controller.toggle_history_preview());
    assert!(controller.is_previewing());
    assert!(controller.renderer().history_mode);
    assert_eq!(
        controller.renderer().lit(),
        vec![Cell::new(0, 0), Cell::new(1, 1)]
    );
    assert!(!controller.renderer().undo_enabled);
    assert_eq!(
        controller.on_cell_clicked(Cell::new(2, 2)),
        MoveOutcome::Ignored
    );

    assert!(controller.toggle_history_preview());
    assert!(!controller.is_previewing());
    assert!(!controller.renderer().history_mode);
    assert_eq!(controller.grid(), &live);
    assert!(controller.renderer().shows(&live));
    assert!(controller.renderer().undo_enabled);
}

#[test]
fn leaving_preview_does_not_celebrate_a_dark_board() {
    let mut controller = won_single_cell();
    run_clock(&mut controller);
    controller.dismiss_win();

    assert!(controller.toggle_history_preview());
    assert!(controller.toggle_history_preview());

    assert!(controller.grid().is_all_off());
    assert!(!controller.is_celebrating());
    assert_eq!(controller.renderer().wins_shown, 1);
}

#[test]
fn reset_keeps_size_and_drops_history() {
    let mut controller = controller(4);
    controller.on_cell_clicked(Cell::new(1, 1));

    assert!(controller.reset(None));

    assert_eq!(controller.grid(), &Grid::new(4));
    assert!(!controller.history().can_undo());
    assert_eq!(controller.renderer().lit().len(), 16);
    assert!(!controller.renderer().undo_enabled);
}

#[test]
fn resize_mid_celebration_cancels_and_ignores_stale_ticks() {
    let mut controller = won_single_cell();
    let stale = controller.scheduler_mut().fire_next().unwrap();
    let old_session = controller.session().id();

    assert!(controller.reset(Some(3)));

    assert_eq!(controller.scheduler().cancelled, 1);
    assert!(controller.scheduler().pending.is_empty());
    assert_ne!(controller.session().id(), old_session);
    assert!(!controller.on_tick(stale));
    assert_eq!(controller.grid(), &Grid::new(3));
    assert_eq!(controller.renderer().size, 3);
    assert!(!controller.is_locked());
}

#[test]
fn resize_clamps_and_leaves_preview() {
    let mut controller = controller(3);
    controller.on_cell_clicked(Cell::new(0, 0));
    controller.toggle_history_preview();

    assert!(controller.reset(Some(0)));

    assert_eq!(controller.grid().size(), MIN_SIZE);
    assert!(!controller.is_previewing());
    assert!(!controller.renderer().history_mode);
}

#[test]
fn celebrate_on_demand_clears_board_and_history() {
    let mut controller = controller(3);
    controller.on_cell_clicked(Cell::new(0, 0));

    assert!(controller.celebrate_requested());
    assert!(controller.is_celebrating());
    assert!(!controller.history().can_undo());
    assert!(controller.renderer().lit().is_empty());

    run_clock(&mut controller);
    assert!(controller.dismiss_win());

    assert!(controller.grid().is_all_off());
    assert!(!controller.renderer().undo_enabled);
}

#[test]
fn preview_after_celebrate_on_demand_restores_live_board() {
    let mut controller = controller(3);
    controller.on_cell_clicked(Cell::new(0, 0));
    assert!(controller.celebrate_requested());
    run_clock(&mut controller);
    assert!(controller.dismiss_win());
    controller.on_cell_clicked(Cell::new(1, 1));
    let live = controller.grid().clone();
    assert_eq!(live.lit_count(), 5);

    assert!(controller.toggle_history_preview());
    assert_eq!(controller.renderer().lit(), vec![Cell::new(1, 1)]);
    assert!(controller.toggle_history_preview());

    assert_eq!(controller.grid(), &live);
    assert!(controller.renderer().shows(&live));
}

#[test]
fn tick_without_celebration_is_ignored() {
    let mut controller = controller(3);
    let tick = Tick {
        session: controller.session().id(),
    };

    assert!(!controller.on_tick(tick));
}
