use crate::*;

#[derive(Clone, Debug, PartialEq)]
pub enum SessionMode {
    Playing,
    /// Showing the clicked cells instead of the live board.
    Previewing,
    Celebrating(Celebration),
}

/// One game from start to reset. Never patched across a resize, only replaced.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSession {
    id: SessionId,
    grid: Grid,
    /// Board the recorded history replays onto.
    base: Grid,
    history: History,
    mode: SessionMode,
}

impl GameSession {
    fn new(id: SessionId, config: GameConfig) -> Self {
        let grid = Grid::from_config(config);
        Self {
            id,
            base: grid.clone(),
            grid,
            history: History::new(),
            mode: SessionMode::Playing,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn mode(&self) -> &SessionMode {
        &self.mode
    }

    /// Input is refused while previewing history or celebrating.
    pub fn is_locked(&self) -> bool {
        !matches!(self.mode, SessionMode::Playing)
    }

    pub fn is_previewing(&self) -> bool {
        matches!(self.mode, SessionMode::Previewing)
    }

    pub fn is_celebrating(&self) -> bool {
        matches!(self.mode, SessionMode::Celebrating(_))
    }

    pub fn celebration(&self) -> Option<&Celebration> {
        match &self.mode {
            SessionMode::Celebrating(celebration) => Some(celebration),
            _ => None,
        }
    }
}

/// Routes input into the current session and mirrors every change onto the renderer.
#[derive(Debug)]
pub struct GameController<R, S> {
    session: GameSession,
    renderer: R,
    scheduler: S,
}

impl<R: Renderer, S: Scheduler> GameController<R, S> {
    pub fn new(config: GameConfig, renderer: R, scheduler: S) -> Self {
        let mut controller = Self {
            session: GameSession::new(SessionId::default(), config),
            renderer,
            scheduler,
        };
        controller.draw_session();
        controller
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn grid(&self) -> &Grid {
        &self.session.grid
    }

    pub fn history(&self) -> &History {
        &self.session.history
    }

    pub fn is_locked(&self) -> bool {
        self.session.is_locked()
    }

    pub fn is_previewing(&self) -> bool {
        self.session.is_previewing()
    }

    pub fn is_celebrating(&self) -> bool {
        self.session.is_celebrating()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn on_cell_clicked(&mut self, cell: Cell) -> MoveOutcome {
        if self.session.is_locked() {
            log::debug!("board locked, ignoring click at {}", cell);
            return MoveOutcome::Ignored;
        }
        let cell = match self.session.grid.validate_cell(cell) {
            Ok(cell) => cell,
            Err(err) => {
                log::warn!("ignoring click at {}: {}", cell, err);
                return MoveOutcome::Ignored;
            }
        };

        let toggled = apply_move(&mut self.session.grid, cell);
        self.session.history.record(cell);
        self.render_cells(toggled);
        log::debug!("move {}", cell);

        let outcome = if check_win(&self.session.grid) {
            self.start_celebration();
            MoveOutcome::Won
        } else {
            MoveOutcome::Applied
        };
        self.sync_history_buttons();
        outcome
    }

    /// Takes back the last move. Never celebrates, even if the board ends up dark.
    pub fn undo_requested(&mut self) -> Option<Move> {
        if self.session.is_locked() {
            return None;
        }
        let mv = self.session.history.undo()?;
        log::debug!("undo {}", mv);
        self.replay_move(mv);
        Some(mv)
    }

    pub fn redo_requested(&mut self) -> Option<Move> {
        if self.session.is_locked() {
            return None;
        }
        let mv = self.session.history.redo()?;
        log::debug!("redo {}", mv);
        self.replay_move(mv);
        Some(mv)
    }

    /// Enters or leaves history preview. Returns whether anything changed.
    pub fn toggle_history_preview(&mut self) -> bool {
        let size = self.session.grid.size();
        match self.session.mode {
            SessionMode::Playing => {
                log::debug!("showing history");
                self.session.grid = self.session.history.markers(size);
                self.session.mode = SessionMode::Previewing;
                self.renderer.set_history_mode(true);
            }
            SessionMode::Previewing => {
                log::debug!("hiding history");
                self.session.grid = self.session.history.rebuild(self.session.base.clone());
                self.session.mode = SessionMode::Playing;
                self.renderer.set_history_mode(false);
            }
            SessionMode::Celebrating(_) => return false,
        }
        self.renderer.draw_lights(&self.session.grid);
        self.sync_history_buttons();
        true
    }

    /// Starts over, on a board of `size` if given.
    ///
    /// A plain reset waits for the board to unlock; a resize always goes through and cuts short any
    /// preview or celebration.
    pub fn reset(&mut self, size: Option<Coord>) -> bool {
        let config = match size {
            None if self.session.is_locked() => {
                log::debug!("board locked, ignoring reset");
                return false;
            }
            None => GameConfig::new_unchecked(self.session.grid.size()),
            Some(size) => GameConfig::new(size),
        };
        self.replace_session(config);
        true
    }

    /// Darkens the board and plays the win celebration on demand.
    ///
    /// History is dropped along with the lights and the dark board becomes the base later moves replay
    /// onto.
    pub fn celebrate_requested(&mut self) -> bool {
        if self.session.is_locked() {
            return false;
        }
        self.session.grid.clear();
        self.session.history.clear();
        self.session.base = self.session.grid.clone();
        self.renderer.draw_lights(&self.session.grid);
        self.start_celebration();
        self.sync_history_buttons();
        true
    }

    /// Advances the celebration by one step.
    pub fn on_tick(&mut self, tick: Tick) -> bool {
        if tick.session != self.session.id {
            log::debug!("dropping tick from replaced session {:?}", tick.session);
            return false;
        }
        let SessionMode::Celebrating(celebration) = &mut self.session.mode else {
            log::debug!("dropping tick, nothing to animate");
            return false;
        };
        let Some(step) = celebration.advance(&mut self.session.grid) else {
            return false;
        };

        self.render_cells(step.toggled);
        match step.next {
            Next::After(delay) => self.scheduler.schedule(delay, tick),
            Next::Announce => self.renderer.show_win_notification(),
        }
        true
    }

    /// Closes the win notification and unlocks the board.
    pub fn dismiss_win(&mut self) -> bool {
        let announced = self
            .session
            .celebration()
            .is_some_and(|celebration| celebration.is_announced());
        if !announced {
            return false;
        }
        self.session.mode = SessionMode::Playing;
        self.renderer.hide_win_notification();
        self.sync_history_buttons();
        true
    }

    fn replace_session(&mut self, config: GameConfig) {
        if self.session.is_celebrating() {
            self.scheduler.cancel();
        }
        let id = self.session.id.next();
        log::debug!("new {}x{} board", config.size, config.size);
        self.session = GameSession::new(id, config);
        self.draw_session();
    }

    fn start_celebration(&mut self) {
        log::debug!("all lights out, celebrating");
        self.session.mode = SessionMode::Celebrating(Celebration::new(self.session.grid.size()));
        let tick = Tick {
            session: self.session.id,
        };
        self.scheduler.schedule(Celebration::FIRST_DELAY, tick);
    }

    fn replay_move(&mut self, mv: Move) {
        let toggled = apply_move(&mut self.session.grid, mv);
        self.render_cells(toggled);
        self.sync_history_buttons();
    }

    fn render_cells(&mut self, cells: impl IntoIterator<Item = Cell>) {
        for cell in cells {
            let lit = self.session.grid.is_lit(cell);
            self.renderer.set_light(cell, lit);
        }
    }

    fn draw_session(&mut self) {
        self.renderer.set_board_size(self.session.grid.size());
        self.renderer.draw_lights(&self.session.grid);
        self.renderer.set_history_mode(false);
        self.renderer.hide_win_notification();
        self.sync_history_buttons();
    }

    /// Buttons only light up while the board accepts input.
    fn sync_history_buttons(&mut self) {
        let playing = !self.session.is_locked();
        let history = &self.session.history;
        let (undo, redo) = (playing && history.can_undo(), playing && history.can_redo());
        self.renderer.set_undo_enabled(undo);
        self.renderer.set_redo_enabled(redo);
    }
}
