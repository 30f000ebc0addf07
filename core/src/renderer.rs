use crate::*;

/// Presentation side of the game. The controller pushes every visible change through it.
pub trait Renderer {
    /// A new board of `size`×`size` lights replaces the old one.
    fn set_board_size(&mut self, size: Coord);
    fn set_light(&mut self, cell: Cell, lit: bool);
    fn set_undo_enabled(&mut self, enabled: bool);
    fn set_redo_enabled(&mut self, enabled: bool);
    fn set_history_mode(&mut self, active: bool);
    fn show_win_notification(&mut self);
    fn hide_win_notification(&mut self);

    fn draw_lights(&mut self, grid: &Grid) {
        for (cell, lit) in grid.iter() {
            self.set_light(cell, lit);
        }
    }
}
