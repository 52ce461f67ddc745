use arboard::Clipboard;
use gridpath::action_log::{Action, ActionLog};
use gridpath::config::Config;
use gridpath::{CellId, CellState, Edit, Editor, Grid, GridView, Path, SearchEngine, SearchError, Step};
use macroquad::prelude::*;
use std::io::Write;
use std::sync::OnceLock;

static CONFIG: OnceLock<Config> = OnceLock::new();

fn config() -> &'static Config {
    CONFIG.get_or_init(Config::load)
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init()
        .ok();
}

fn window_conf() -> Conf {
    init_logging();
    let config = config();
    Conf {
        window_title: config.visual.window_title.clone(),
        window_width: config.grid.window_width as i32,
        window_height: config.grid.window_width as i32,
        window_resizable: false,
        ..Default::default()
    }
}

const TURQUOISE: Color = Color::new(64.0 / 255.0, 224.0 / 255.0, 208.0 / 255.0, 1.0);
const LIGHT_BLUE: Color = Color::new(173.0 / 255.0, 216.0 / 255.0, 230.0 / 255.0, 1.0);

/// Rendering is a pure projection of cell state
fn state_color(state: CellState) -> Color {
    match state {
        CellState::Free => WHITE,
        CellState::Barrier => BLACK,
        CellState::Start => ORANGE,
        CellState::End => TURQUOISE,
        CellState::Open => GREEN,
        CellState::Closed => RED,
        CellState::Path => LIGHT_BLUE,
    }
}

/// Visualization state
struct App {
    editor: Editor,
    view: GridView,
    engine: Option<SearchEngine>,
    steps_per_frame: usize,
    show_grid_lines: bool,
    window_width: usize,
    action_log: Option<ActionLog>,
    status: String,
}

impl App {
    fn new(config: &Config) -> Self {
        App {
            editor: Editor::new(config.grid.rows),
            view: GridView::new(config.grid.rows, config.grid.window_width),
            engine: None,
            steps_per_frame: config.animation.steps_per_frame,
            show_grid_lines: config.visual.show_grid_lines,
            window_width: config.grid.window_width,
            action_log: config.logging.enable_action_log.then(ActionLog::new),
            status: "Left: start/end/barrier  Right: erase  Space: search  C: clear".to_string(),
        }
    }

    fn record(&mut self, action: Action) {
        if let Some(log) = self.action_log.as_mut() {
            log.log_finish(action);
        }
    }

    /// Handle input while no search is running. Returns false to quit.
    fn handle_input(&mut self) -> bool {
        if is_key_pressed(KeyCode::Escape) {
            return false;
        }

        let (mouse_x, mouse_y) = mouse_position();
        if is_mouse_button_down(MouseButton::Left) {
            if let Some(id) = self.view.cell_at(mouse_x, mouse_y) {
                let edit = self.editor.paint(id);
                self.record_edit(edit);
            }
        } else if is_mouse_button_down(MouseButton::Right) {
            if let Some(id) = self.view.cell_at(mouse_x, mouse_y) {
                let edit = self.editor.erase(id);
                self.record_edit(edit);
            }
        }

        if is_key_pressed(KeyCode::Space) {
            self.launch();
        }
        if is_key_pressed(KeyCode::C) {
            self.editor.clear();
            self.record(Action::Clear);
            self.status = "Grid cleared".to_string();
        }
        if is_key_pressed(KeyCode::Y) {
            self.copy_to_clipboard();
        }
        if is_key_pressed(KeyCode::V) {
            self.paste_from_clipboard();
        }

        true
    }

    fn record_edit(&mut self, edit: Edit) {
        let action = match edit {
            Edit::PlacedStart(CellId { row, col }) => Action::SetStart { row, col },
            Edit::PlacedEnd(CellId { row, col }) => Action::SetEnd { row, col },
            Edit::PlacedBarrier(CellId { row, col }) => Action::SetBarrier { row, col },
            Edit::Erased(CellId { row, col }) => Action::Erase { row, col },
            Edit::Unchanged => return,
        };
        self.record(action);
    }

    fn launch(&mut self) {
        match self.editor.launch() {
            Ok(engine) => {
                if let Some(log) = self.action_log.as_mut() {
                    log.log_start(Action::run_search(engine.start(), engine.end()));
                }
                log::info!("search started: {} -> {}", engine.start(), engine.end());
                self.status = "Searching... (Esc aborts)".to_string();
                self.engine = Some(engine);
            }
            Err(e) => {
                log::warn!("cannot start search: {}", e);
                self.status = e.to_string();
            }
        }
    }

    /// Advance the running search. Escape aborts it.
    fn advance(&mut self) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };

        let outcome = if is_key_pressed(KeyCode::Escape) {
            engine.abort();
            Some(Err(SearchError::Aborted))
        } else {
            let mut outcome = None;
            for _ in 0..self.steps_per_frame {
                if let Step::Finished(result) = engine.step(self.editor.grid_mut()) {
                    outcome = Some(result);
                    break;
                }
            }
            outcome
        };

        if let Some(result) = outcome {
            let expansions = engine.expansions();
            self.engine = None;
            self.finish_run(result, expansions);
        }
    }

    fn finish_run(&mut self, result: Result<Path, SearchError>, expansions: usize) {
        self.record(Action::search_finished(&result, expansions));
        self.status = match &result {
            Ok(path) => {
                log::info!("path found: {} steps, {} expansions", path.edge_count(), expansions);
                format!("Path: {} steps ({} cells expanded)", path.edge_count(), expansions)
            }
            Err(SearchError::NoPathFound) => {
                log::info!("no path after {} expansions", expansions);
                format!("No path exists ({} cells expanded)", expansions)
            }
            Err(e) => {
                log::info!("search ended: {}", e);
                e.to_string()
            }
        };
    }

    fn copy_to_clipboard(&mut self) {
        let layout = self.editor.grid().to_layout();
        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(layout) {
                    log::warn!("Failed to copy to clipboard: {}", e);
                } else {
                    log::info!("Grid layout copied to clipboard");
                    self.status = "Layout copied".to_string();
                    // Keep clipboard alive for a moment to ensure clipboard managers can capture it
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
            Err(e) => log::warn!("Failed to access clipboard: {}", e),
        }
    }

    fn paste_from_clipboard(&mut self) {
        let text = match Clipboard::new().and_then(|mut clipboard| clipboard.get_text()) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("Failed to read clipboard: {}", e);
                return;
            }
        };
        match Grid::from_layout(&text) {
            Ok(grid) => {
                let size = grid.size();
                self.editor.load_layout(grid);
                self.view = GridView::new(size, self.window_width);
                self.record(Action::PasteLayout { size });
                self.status = format!("Pasted {}x{} layout", size, size);
            }
            Err(e) => {
                log::warn!("Clipboard does not hold a grid layout: {}", e);
                self.status = format!("Paste failed: {}", e);
            }
        }
    }

    fn draw(&self) {
        clear_background(WHITE);

        let cell_px = self.view.cell_px() as f32;
        for cell in self.editor.grid().cells() {
            let (x, y) = self.view.cell_origin(cell.id);
            draw_rectangle(x, y, cell_px, cell_px, state_color(cell.state));
        }

        if self.show_grid_lines {
            let extent = self.view.extent_px() as f32;
            for i in 0..=self.editor.grid().size() {
                let offset = i as f32 * cell_px;
                draw_line(0.0, offset, extent, offset, 1.0, GRAY);
                draw_line(offset, 0.0, offset, extent, 1.0, GRAY);
            }
        }

        let text_y = self.view.extent_px() as f32 - 8.0;
        draw_text(&self.status, 8.0, text_y, 20.0, DARKGRAY);
    }

    fn shutdown(&self, log_path: &str) {
        let Some(log) = self.action_log.as_ref() else {
            return;
        };
        log::info!("Session summary:\n{}", log.summary());
        match log.save_to_file(log_path) {
            Ok(()) => log::info!("Action log saved to {}", log_path),
            Err(e) => log::warn!("Failed to save action log: {}", e),
        }
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = config();
    let mut app = App::new(config);

    loop {
        if app.engine.is_some() {
            app.advance();
        } else if !app.handle_input() {
            break;
        }

        app.draw();

        next_frame().await
    }

    app.shutdown(&config.logging.action_log_path);
}
