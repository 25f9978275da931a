//! Edge Grid entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use edge_grid::platform::{FrameClock, InputState, KeyAction};
    use edge_grid::renderer::RenderState;
    use edge_grid::sim::{GamePhase, GameState, step_frame};
    use edge_grid::{Grid, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        grid: Grid,
        settings: Settings,
        clock: FrameClock,
        input: InputState,
        render_state: Option<RenderState>,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            Self {
                state: GameState::from_settings(seed, &settings),
                grid: Grid::new(settings.board_height, settings.board_width),
                clock: FrameClock::new(settings.max_elapsed_ms),
                input: InputState::default(),
                render_state: None,
                settings,
            }
        }

        /// Advance one frame
        fn update(&mut self, time: f64) {
            if self.input.take_restart() && self.state.phase == GamePhase::GameOver {
                self.restart(js_sys::Date::now() as u64);
            }

            let elapsed_ms = self.clock.advance(time);
            let input = self.input.sample();
            let before = self.state.phase;

            step_frame(
                &mut self.state,
                &mut self.grid,
                &input,
                elapsed_ms,
                &self.settings.palette,
            );

            if before != GamePhase::GameOver && self.state.phase == GamePhase::GameOver {
                log::info!("Press Enter to play again");
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.grid) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Fresh field, same settings
        fn restart(&mut self, seed: u64) {
            self.state = GameState::from_settings(seed, &self.settings);
            self.clock.reset();
            self.input.release_all();
            log::info!("Game restarted with seed: {}", seed);
        }

        fn auto_pause(&mut self, reason: &str) {
            self.input.release_all();
            if self.state.phase == GamePhase::Playing {
                self.input.press(KeyAction::Pause);
                log::info!("Auto-paused ({})", reason);
            }
        }
    }

    /// Backing-store size of the canvas in device pixels
    fn canvas_pixels(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        (width.max(1), height.max(1))
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Edge Grid starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("board")
            .expect("no #board canvas")
            .dyn_into()
            .expect("#board is not a canvas");

        let (width, height) = canvas_pixels(&window, &canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        // Write back the sanitized values so they can be edited in place
        settings.save();

        let seed = js_sys::Date::now() as u64;
        let board = (settings.board_height, settings.board_width);
        let background = settings.palette.background;
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));

        log::info!("Game initialized with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, board, background)
            .await
            .expect("Failed to create device");
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(game.clone());
        setup_resize_handler(&canvas, game.clone());
        setup_auto_pause(game.clone());

        request_animation_frame(game);

        log::info!("Edge Grid running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().input.key_down(&event.key()) {
                    // Arrows and space would otherwise scroll the page
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().input.key_up(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let canvas = canvas.clone();

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (width, height) = canvas_pixels(&window, &canvas);
            canvas.set_width(width);
            canvas.set_height(height);
            if let Some(ref mut render_state) = game.borrow_mut().render_state {
                render_state.resize(width, height);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().auto_pause("tab hidden");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().auto_pause("window blur");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use edge_grid::sim::GamePhase;

    env_logger::init();
    log::info!("Edge Grid (native) starting...");
    log::info!("Native mode runs headless - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);
    let settings = edge_grid::Settings::load();

    let (state, grid) = run_headless(seed, &settings, 600);

    println!("\n{}", ascii_board(&grid, 4));
    println!(
        "seed {}: {} ticks, phase {:?}, {} fields cleared, {} asteroids left",
        seed,
        state.time_ticks,
        state.phase,
        state.field_index,
        state.asteroids.len()
    );
    if state.phase == GamePhase::GameOver {
        println!("The plane was hit.");
    }
}

/// Fly a fixed pattern for `frames` frames at 60 Hz
#[cfg(not(target_arch = "wasm32"))]
fn run_headless(
    seed: u64,
    settings: &edge_grid::Settings,
    frames: u64,
) -> (edge_grid::sim::GameState, edge_grid::Grid) {
    use edge_grid::platform::{FrameClock, InputState, KeyAction};
    use edge_grid::sim::{GamePhase, GameState, step_frame};

    let mut state = GameState::from_settings(seed, settings);
    let mut grid = edge_grid::Grid::new(settings.board_height, settings.board_width);
    let mut clock = FrameClock::new(settings.max_elapsed_ms);
    let mut input = InputState::default();

    input.press(KeyAction::Left);
    for frame in 0..frames {
        if frame % 12 == 0 {
            input.press(KeyAction::Fire);
        }

        let elapsed_ms = clock.advance(frame as f64 * 1000.0 / 60.0);
        step_frame(&mut state, &mut grid, &input.sample(), elapsed_ms, &settings.palette);

        if frame % 60 == 0 {
            log::info!(
                "frame {}: {} asteroids, {} bullets, {} cells lit",
                frame,
                state.asteroids.len(),
                state.bullets.len(),
                grid.colored_count()
            );
        }
        if state.phase == GamePhase::GameOver {
            log::info!("Game over at frame {}", frame);
            break;
        }
    }

    (state, grid)
}

/// Downsampled text picture of the board; a block is `#` if any cell in it is lit
#[cfg(not(target_arch = "wasm32"))]
fn ascii_board(grid: &edge_grid::Grid, block: usize) -> String {
    use edge_grid::Surface;

    let block = block.max(1);
    let mut out = String::new();
    for by in (0..grid.height()).step_by(block) {
        for bx in (0..grid.width()).step_by(block) {
            let lit = (by..(by + block).min(grid.height()))
                .any(|row| (bx..(bx + block).min(grid.width())).any(|col| grid.is_colored(row, col)));
            out.push(if lit { '#' } else { '.' });
        }
        out.push('\n');
    }
    out
}
