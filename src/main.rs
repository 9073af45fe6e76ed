//! Obstacle Dodge entry point
//!
//! Handles platform-specific initialization and runs the game loop. The shell
//! owns the screen flow, input, timers, rendering, and high score
//! persistence; all gameplay rules live in `obstacle_dodge::sim`.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use obstacle_dodge::consts::*;
    use obstacle_dodge::fsm::{AppAction, AppFsm, AppPhase};
    use obstacle_dodge::highscore::HighScoreStore;
    use obstacle_dodge::sim::{self, GameEvent, GameState, RunStatus, TickInput};
    use obstacle_dodge::timer::Scheduler;

    const COLOR_BACKGROUND: &str = "#1a1a2e";
    const COLOR_PLAYER: &str = "#00ff00";
    const COLOR_OBSTACLE: &str = "#ff0000";
    const COLOR_WHITE: &str = "#ffffff";
    const COLOR_GREEN: &str = "#00ff00";
    const COLOR_RED: &str = "#ff0000";
    const COLOR_YELLOW: &str = "#ffff00";
    const COLOR_CYAN: &str = "#00ffff";

    /// Game instance holding all state
    struct Game {
        fsm: AppFsm,
        /// Present only between run start and run teardown
        state: Option<GameState>,
        timers: Scheduler,
        input: TickInput,
        /// One-shot confirm (click / space), cleared after processing
        confirm: bool,
        highscore: HighScoreStore,
        final_score: u32,
        new_best: bool,
        accumulator: f32,
        last_time: f64,
    }

    impl Game {
        fn new() -> Self {
            Self {
                fsm: AppFsm::new(),
                state: None,
                timers: Scheduler::new(),
                input: TickInput::default(),
                confirm: false,
                highscore: HighScoreStore::load(),
                final_score: 0,
                new_best: false,
                accumulator: 0.0,
                last_time: 0.0,
            }
        }

        /// Tear down whatever run came before and start a fresh one
        fn start_run(&mut self) {
            // Stale spawn or report timers from a previous run must not
            // mutate the new one
            self.timers.clear();
            self.accumulator = 0.0;
            self.new_best = false;

            let seed = js_sys::Date::now() as u64;
            let mut state = GameState::new(seed);
            state.start(&mut self.timers);
            self.state = Some(state);
        }

        /// Advance screens, timers and simulation for one frame
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);

            if self.confirm {
                self.confirm = false;
                match self.fsm.phase() {
                    AppPhase::MainMenu => {
                        if self.fsm.transition(AppAction::Start) {
                            self.start_run();
                        }
                    }
                    AppPhase::GameOver => {
                        if self.fsm.transition(AppAction::PlayAgain) {
                            self.start_run();
                        }
                    }
                    AppPhase::Running => {}
                }
            }

            if !self.fsm.is_running() {
                return;
            }

            // Timer callbacks land between frames, never inside a tick
            let due = self.timers.advance(f64::from(dt) * 1000.0);
            let mut ended = None;
            if let Some(state) = self.state.as_mut() {
                for task in due {
                    if let Some(GameEvent::RunEnded { score }) = sim::handle_timer(state, task) {
                        ended = Some(score);
                    }
                }
            }
            if let Some(score) = ended {
                self.end_run(score);
                return;
            }

            self.accumulator += dt;
            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                if let Some(state) = self.state.as_mut() {
                    sim::tick(state, &self.input, SIM_DT, &mut self.timers);
                }
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
        }

        /// Run teardown: persist the score, drop the field, switch screens
        fn end_run(&mut self, score: u32) {
            self.final_score = score;
            self.new_best = self.highscore.record(score);
            self.state = None;
            self.timers.clear();
            self.fsm.transition(AppAction::RunEnded);
            log::info!(
                "run ended: score {} (best {})",
                self.final_score,
                self.highscore.best
            );
        }

        fn render(&self, ctx: &CanvasRenderingContext2d) {
            ctx.set_fill_style_str(COLOR_BACKGROUND);
            ctx.fill_rect(0.0, 0.0, f64::from(GAME_WIDTH), f64::from(GAME_HEIGHT));

            match self.fsm.phase() {
                AppPhase::MainMenu => self.render_menu(ctx),
                AppPhase::Running => self.render_field(ctx),
                AppPhase::GameOver => self.render_game_over(ctx),
            }
        }

        fn render_menu(&self, ctx: &CanvasRenderingContext2d) {
            let cx = f64::from(GAME_WIDTH) / 2.0;
            ctx.set_text_align("center");

            ctx.set_fill_style_str(COLOR_CYAN);
            ctx.set_font("bold 36px sans-serif");
            ctx.fill_text("OBSTACLE DODGE", cx, 150.0).ok();

            ctx.set_fill_style_str(COLOR_WHITE);
            ctx.set_font("18px sans-serif");
            ctx.fill_text("Stay Alive!", cx, 200.0).ok();

            ctx.set_font("14px sans-serif");
            for (i, line) in [
                "Use Arrow Keys or A/D to move",
                "Dodge the red obstacles",
                "Survive as long as you can!",
            ]
            .iter()
            .enumerate()
            {
                ctx.fill_text(line, cx, 300.0 + i as f64 * 30.0).ok();
            }

            ctx.set_fill_style_str(COLOR_GREEN);
            ctx.set_font("bold 20px sans-serif");
            ctx.fill_text("CLICK TO START", cx, 500.0).ok();
        }

        fn render_field(&self, ctx: &CanvasRenderingContext2d) {
            let Some(state) = self.state.as_ref() else {
                return;
            };

            let player_box = state.player.aabb();
            ctx.set_fill_style_str(if state.player.alive {
                COLOR_PLAYER
            } else {
                COLOR_OBSTACLE
            });
            ctx.fill_rect(
                f64::from(player_box.min.x),
                f64::from(player_box.min.y),
                f64::from(PLAYER_WIDTH),
                f64::from(PLAYER_HEIGHT),
            );

            ctx.set_fill_style_str(COLOR_OBSTACLE);
            for obstacle in &state.obstacles {
                let aabb = obstacle.aabb();
                ctx.fill_rect(
                    f64::from(aabb.min.x),
                    f64::from(aabb.min.y),
                    f64::from(OBSTACLE_WIDTH),
                    f64::from(OBSTACLE_HEIGHT),
                );
            }

            // HUD
            ctx.set_text_align("left");
            ctx.set_fill_style_str(COLOR_WHITE);
            ctx.set_font("bold 24px sans-serif");
            ctx.fill_text(&format!("Score: {}", state.score), 16.0, 32.0)
                .ok();

            ctx.set_fill_style_str(COLOR_YELLOW);
            ctx.set_font("16px sans-serif");
            ctx.fill_text(&format!("High Score: {}", self.highscore.best), 16.0, 56.0)
                .ok();

            ctx.set_text_align("right");
            ctx.set_fill_style_str(COLOR_CYAN);
            let multiplier = state.obstacle_speed / OBSTACLE_SPEED_START;
            ctx.fill_text(
                &format!("Speed: {:.1}x", multiplier),
                f64::from(GAME_WIDTH) - 16.0,
                32.0,
            )
            .ok();

            if state.status == RunStatus::Over {
                ctx.set_text_align("center");
                ctx.set_fill_style_str(COLOR_RED);
                ctx.set_font("bold 32px sans-serif");
                ctx.fill_text("OUCH!", f64::from(GAME_WIDTH) / 2.0, 280.0).ok();
            }
        }

        fn render_game_over(&self, ctx: &CanvasRenderingContext2d) {
            let cx = f64::from(GAME_WIDTH) / 2.0;
            ctx.set_text_align("center");

            ctx.set_fill_style_str(COLOR_RED);
            ctx.set_font("bold 48px sans-serif");
            ctx.fill_text("GAME OVER", cx, 150.0).ok();

            ctx.set_fill_style_str(COLOR_WHITE);
            ctx.set_font("18px sans-serif");
            ctx.fill_text("Score", cx, 230.0).ok();

            ctx.set_fill_style_str(COLOR_CYAN);
            ctx.set_font("bold 36px sans-serif");
            ctx.fill_text(&self.final_score.to_string(), cx, 270.0).ok();

            let (label, color) = if self.new_best {
                ("NEW HIGH SCORE!", COLOR_GREEN)
            } else {
                ("High Score", COLOR_YELLOW)
            };
            ctx.set_fill_style_str(color);
            ctx.set_font("bold 18px sans-serif");
            ctx.fill_text(label, cx, 330.0).ok();
            ctx.set_font("28px sans-serif");
            ctx.fill_text(&self.highscore.best.to_string(), cx, 365.0).ok();

            ctx.set_fill_style_str(COLOR_GREEN);
            ctx.set_font("bold 24px sans-serif");
            ctx.fill_text("PLAY AGAIN", cx, 450.0).ok();

            ctx.set_fill_style_str("#888888");
            ctx.set_font("12px sans-serif");
            ctx.fill_text("SPACE or click to restart", cx, 560.0).ok();
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Obstacle Dodge starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(GAME_WIDTH as u32);
        canvas.set_height(GAME_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("no 2d context")
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let game = Rc::new(RefCell::new(Game::new()));

        setup_input_handlers(&canvas, game.clone());
        request_animation_frame(game, ctx);

        log::info!("Obstacle Dodge running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Held movement keys + one-shot confirm
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => g.input.left = true,
                    "ArrowRight" | "d" | "D" => g.input.right = true,
                    " " | "Enter" => g.confirm = true,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => g.input.left = false,
                    "ArrowRight" | "d" | "D" => g.input.right = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click anywhere on the canvas confirms
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().confirm = true;
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>, ctx: CanvasRenderingContext2d) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, ctx, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, ctx: CanvasRenderingContext2d, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render(&ctx);
        }

        request_animation_frame(game, ctx);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use obstacle_dodge::consts::*;
    use obstacle_dodge::sim::{self, GameState, RunStatus, TickInput};
    use obstacle_dodge::timer::Scheduler;

    env_logger::init();
    log::info!("Obstacle Dodge (native) starting...");
    log::info!("Native mode is a headless demo - run with `trunk serve` for the web version");

    // Drive a short unattended run so the sim can be smoke-tested natively
    let mut timers = Scheduler::new();
    let mut state = GameState::new(0xD0D6E);
    state.start(&mut timers);

    let input = TickInput::default();
    let frame_ms = f64::from(SIM_DT) * 1000.0;
    for _ in 0..(30.0 / SIM_DT) as u32 {
        for task in timers.advance(frame_ms) {
            sim::handle_timer(&mut state, task);
        }
        sim::tick(&mut state, &input, SIM_DT, &mut timers);
        if state.status == RunStatus::Over {
            break;
        }
    }

    println!(
        "demo run finished: score {} speed {:.0} interval {}ms status {:?}",
        state.score, state.obstacle_speed, state.spawn_interval_ms, state.status
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
