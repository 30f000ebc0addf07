use std::time::Duration;
use game::{Cell, Coord, ToNdIndex};
use gloo::timers::callback::Timeout;
use lightsout_core as game;
use ndarray::Array2;
use web_sys::HtmlInputElement;
use yew::html::Scope;
use yew::prelude::*;

/// Last visual state pushed by the controller, `view` draws from it.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct BoardView {
    lights: Array2<bool>,
    undo_enabled: bool,
    redo_enabled: bool,
    history_mode: bool,
    win_visible: bool,
}

impl BoardView {
    fn size(&self) -> Coord {
        self.lights.nrows().try_into().unwrap_or(Coord::MAX)
    }

    fn is_lit(&self, cell: Cell) -> bool {
        self.lights
            .get(cell.to_nd_index())
            .copied()
            .unwrap_or(false)
    }
}

impl game::Renderer for BoardView {
    fn set_board_size(&mut self, size: Coord) {
        self.lights = Array2::default(Cell::new(size, size).to_nd_index());
    }

    fn set_light(&mut self, cell: Cell, lit: bool) {
        match self.lights.get_mut(cell.to_nd_index()) {
            Some(light) => *light = lit,
            None => log::warn!("no light at {} to draw", cell),
        }
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
    }

    fn hide_win_notification(&mut self) {
        self.win_visible = false;
    }
}

/// Celebration clock backed by browser timeouts that post [`Msg::Tick`] back to the view.
pub(crate) struct TimerScheduler {
    link: Scope<GameView>,
    pending: Option<Timeout>,
}

impl TimerScheduler {
    fn new(link: Scope<GameView>) -> Self {
        Self {
            link,
            pending: None,
        }
    }
}

fn as_millis(delay: Duration) -> u32 {
    delay.as_millis().try_into().unwrap_or(u32::MAX)
}

impl game::Scheduler for TimerScheduler {
    fn schedule(&mut self, delay: Duration, tick: game::Tick) {
        let link = self.link.clone();
        log::trace!("tick in {:?}", delay);
        self.pending = Some(Timeout::new(as_millis(delay), move || {
            link.send_message(Msg::Tick(tick))
        }));
    }

    fn cancel(&mut self) {
        // dropping a gloo timeout clears it
        if self.pending.take().is_some() {
            log::debug!("cancelled pending tick");
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    CellClicked(Cell),
    Undo,
    Redo,
    Reset,
    Resize(Coord),
    ToggleHistory,
    Celebrate,
    DismissWin,
    Tick(game::Tick),
}

#[derive(Properties, Clone, PartialEq)]
struct LightProps {
    cell: Cell,
    lit: bool,
    callback: Callback<Cell>,
}

#[function_component(LightView)]
fn light_component(props: &LightProps) -> Html {
    let LightProps {
        cell,
        lit,
        callback,
    } = props.clone();

    let class = classes!("light", if lit { "on" } else { "off" });
    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("{} clicked", cell);
        callback.emit(cell);
    });

    html! {
        <td {class} {onclick}/>
    }
}

#[derive(Properties, PartialEq)]
struct WinDialogProps {
    ondismiss: Callback<MouseEvent>,
}

/// Win message, attached to document.body instead of in the place where it's used.
#[function_component(WinDialog)]
fn win_dialog(props: &WinDialogProps) -> Html {
    let dialog = html! {
        <dialog id="win-message" open={true}>
            <article>
                <h2>{"All lights out!"}</h2>
                <footer>
                    <button id="dismiss-win-message" onclick={props.ondismiss.clone()}>{"OK"}</button>
                </footer>
            </article>
        </dialog>
    };
    create_portal(dialog, gloo::utils::body().into())
}

#[derive(Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    pub size: Coord,
}

pub(crate) struct GameView {
    controller: game::GameController<BoardView, TimerScheduler>,
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let config = game::GameConfig::new(ctx.props().size);
        let scheduler = TimerScheduler::new(ctx.link().clone());
        Self {
            controller: game::GameController::new(config, BoardView::default(), scheduler),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        let controller = &mut self.controller;
        match msg {
            CellClicked(cell) => {
                let outcome = controller.on_cell_clicked(cell);
                if outcome.is_win() {
                    log::info!("won in {} moves", controller.history().past().len());
                }
                outcome.has_update()
            }
            Undo => controller.undo_requested().is_some(),
            Redo => controller.redo_requested().is_some(),
            Reset => controller.reset(None),
            Resize(size) => controller.reset(Some(size)),
            ToggleHistory => controller.toggle_history_preview(),
            Celebrate => controller.celebrate_requested(),
            DismissWin => controller.dismiss_win(),
            Tick(tick) => controller.on_tick(tick),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let board = self.controller.renderer();
        let size = board.size();
        let link = ctx.link();

        let cb_resize = link.batch_callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            input.value().parse::<Coord>().ok().map(Msg::Resize)
        });
        let history_label = if board.history_mode {
            "Hide History"
        } else {
            "Show History"
        };

        html! {
            <div class="lightsout">
                <nav>
                    <button id="undo" class={board.undo_enabled.then_some("enabled")} onclick={link.callback(|_| Msg::Undo)}>{"Undo"}</button>
                    <button id="redo" class={board.redo_enabled.then_some("enabled")} onclick={link.callback(|_| Msg::Redo)}>{"Redo"}</button>
                    <button id="history" class={board.history_mode.then_some("active")} onclick={link.callback(|_| Msg::ToggleHistory)}>{history_label}</button>
                    <button id="reset" onclick={link.callback(|_| Msg::Reset)}>{"Reset"}</button>
                    <button id="celebrate" onclick={link.callback(|_| Msg::Celebrate)}>{"Celebrate"}</button>
                    <input
                        id="sizeButton"
                        type="range"
                        min={game::MIN_SIZE.to_string()}
                        max={game::MAX_SIZE.to_string()}
                        value={size.to_string()}
                        oninput={cb_resize}
                    />
                </nav>
                <table class={board.history_mode.then_some("history")}>
                    {
                        for (0..size).map(|row| html! {
                            <tr>
                                {
                                    for (0..size).map(|column| {
                                        let cell = Cell::new(row, column);
                                        let lit = board.is_lit(cell);
                                        let callback = link.callback(Msg::CellClicked);
                                        html! {
                                            <LightView {cell} {lit} {callback}/>
                                        }
                                    })
                                }
                            </tr>
                        })
                    }
                </table>
                if board.win_visible {
                    <WinDialog ondismiss={link.callback(|_| Msg::DismissWin)}/>
                }
            </div>
        }
    }
}
