//! Piranha Dodge entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent, PageTransitionEvent,
        TouchEvent,
    };

    use piranha_dodge::{Preference, Settings};
    use piranha_dodge::platform::{Command, Direction, DirectionKeys, FrameHost, FrameLoop};
    use piranha_dodge::renderer::{Scene, Shape};
    use piranha_dodge::sim::{GameEvent, GamePhase, GameState, tick};

    type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

    /// requestAnimationFrame / cancelAnimationFrame
    struct BrowserFrames {
        window: web_sys::Window,
        callback: FrameCallback,
    }

    impl FrameHost for BrowserFrames {
        fn request_frame(&mut self) -> Option<i32> {
            let callback = self.callback.borrow();
            let callback = callback.as_ref()?;
            self.window
                .request_animation_frame(callback.as_ref().unchecked_ref())
                .ok()
        }

        fn cancel_frame(&mut self, handle: i32) {
            let _ = self.window.cancel_animation_frame(handle);
        }
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        keys: DirectionKeys,
        autopilot: bool,
        settings: Settings,
        frames: FrameLoop,
        host: BrowserFrames,
        document: Document,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        toast_until: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn now(&self) -> f64 {
            self.host
                .window
                .performance()
                .map(|p| p.now())
                .unwrap_or(0.0)
        }

        /// Match the canvas backing store to its CSS size and tell the sim
        fn measure(&mut self) {
            let w = self.canvas.client_width().max(0) as u32;
            let h = self.canvas.client_height().max(0) as u32;
            self.canvas.set_width(w);
            self.canvas.set_height(h);
            self.state.resize(w as f32, h as f32);
            if w == 0 || h == 0 {
                log::warn!("Play area not laid out yet ({}x{})", w, h);
            }
        }

        fn start_or_restart(&mut self) {
            let now = self.now();
            let began = match self.state.phase {
                GamePhase::Idle => self.state.start(now),
                GamePhase::GameOver => self.state.restart(now),
                GamePhase::Playing => false,
            };
            if began {
                self.show("start-screen", false);
                self.show("game-over", false);
                self.frames.schedule(&mut self.host);
            }
        }

        /// Stop ticking (game over or page hidden)
        fn stop(&mut self) {
            self.frames.cancel(&mut self.host);
        }

        /// Flip a preference, persist it and redraw with it
        fn toggle_preference(&mut self, pref: Preference) {
            let on = self.settings.toggle(pref);
            self.settings.save();
            log::info!("{:?}: {}", pref, on);
            let now = self.now();
            if !self.state.is_playing() {
                self.render(now);
            }
            self.update_hud(now);
        }

        /// Page came back from the back/forward cache
        fn resume(&mut self) {
            self.keys.release_all();
            let running = self.state.is_playing();
            self.frames.resume(&mut self.host, running);
        }

        /// One animation frame
        fn frame(&mut self, time: f64) {
            self.frames.on_frame();

            let input = self.keys.tick_input(self.autopilot);
            tick(&mut self.state, &input, time);

            for event in self.state.take_events() {
                self.notify(event, time);
            }

            self.track_fps(time);
            self.render(time);
            self.update_hud(time);

            if self.state.is_playing() {
                self.frames.schedule(&mut self.host);
            } else {
                self.stop();
            }
        }

        fn notify(&mut self, event: GameEvent, time: f64) {
            let toast_ms = self.settings.effective_toast_ms() as f64;
            match event {
                GameEvent::Started => {
                    self.toast("Game on! Eat the food, dodge the hooks!", time, toast_ms);
                }
                GameEvent::FoodCollected { .. } => {
                    self.toast("Food collected! +10", time, toast_ms / 2.0);
                }
                GameEvent::Grew { size } => {
                    log::info!("Fish is now {:.1}x", size);
                    self.toast("Your fish grew bigger!", time, toast_ms);
                }
                GameEvent::DifficultyIncreased { level } => {
                    self.toast(&format!("Level {}!", level), time, toast_ms);
                }
                GameEvent::GameOver {
                    cause,
                    score,
                    collected,
                } => {
                    self.set_text("final-score", &score.to_string());
                    self.set_text("final-food", &collected.to_string());
                    self.set_text("final-cause", &cause);
                    self.show("game-over", true);
                    self.toast_until = 0.0;
                }
            }
        }

        fn toast(&mut self, message: &str, time: f64, duration_ms: f64) {
            if !self.settings.notifications {
                return;
            }
            self.set_text("toast", message);
            self.toast_until = time + duration_ms;
        }

        fn track_fps(&mut self, time: f64) {
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            // Oldest sample is the one about to be overwritten
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        fn render(&self, time: f64) {
            let scene = Scene::build(&self.state, time, self.settings.reduced_motion);
            draw_scene(&self.ctx, &scene);
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, time: f64) {
            self.set_text("hud-score", &self.state.score.to_string());
            self.set_text("hud-level", &self.state.difficulty.to_string());
            self.set_text("hud-food", &self.state.food_collected.to_string());
            self.show("hud-fps", self.settings.show_fps);
            if self.settings.show_fps {
                self.set_text("hud-fps", &format!("{} fps", self.fps));
            }
            self.show("hud-demo", self.autopilot);
            self.show("toast", time < self.toast_until);
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn show(&self, id: &str, visible: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.class_list().toggle_with_force("hidden", !visible);
            }
        }
    }

    /// Replay a draw list onto the canvas
    fn draw_scene(ctx: &CanvasRenderingContext2d, scene: &Scene) {
        use std::f64::consts::TAU;

        for shape in &scene.shapes {
            match *shape {
                Shape::Rect { pos, size, fill } => {
                    ctx.set_fill_style_str(fill);
                    ctx.fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
                }
                Shape::Circle {
                    center,
                    radius,
                    fill,
                    stroke,
                } => {
                    ctx.begin_path();
                    let _ = ctx.arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU);
                    ctx.set_fill_style_str(fill);
                    ctx.fill();
                    if let Some(stroke) = stroke {
                        ctx.set_line_width(2.0);
                        ctx.set_stroke_style_str(stroke);
                        ctx.stroke();
                    }
                }
                Shape::Ellipse {
                    center,
                    radii,
                    fill,
                } => {
                    ctx.begin_path();
                    let _ = ctx.ellipse(
                        center.x as f64,
                        center.y as f64,
                        radii.x as f64,
                        radii.y as f64,
                        0.0,
                        0.0,
                        TAU,
                    );
                    ctx.set_fill_style_str(fill);
                    ctx.fill();
                }
                Shape::Triangle { points, fill } => {
                    ctx.begin_path();
                    ctx.move_to(points[0].x as f64, points[0].y as f64);
                    ctx.line_to(points[1].x as f64, points[1].y as f64);
                    ctx.line_to(points[2].x as f64, points[2].y as f64);
                    ctx.close_path();
                    ctx.set_fill_style_str(fill);
                    ctx.fill();
                }
                Shape::Line {
                    from,
                    to,
                    width,
                    color,
                } => {
                    ctx.begin_path();
                    ctx.move_to(from.x as f64, from.y as f64);
                    ctx.line_to(to.x as f64, to.y as f64);
                    ctx.set_line_width(width as f64);
                    ctx.set_stroke_style_str(color);
                    ctx.stroke();
                }
                Shape::Text {
                    pos,
                    text,
                    size,
                    color,
                } => {
                    ctx.set_font(&format!("bold {}px sans-serif", size));
                    ctx.set_text_align("center");
                    ctx.set_text_baseline("middle");
                    ctx.set_fill_style_str(color);
                    let _ = ctx.fill_text(text, pos.x as f64, pos.y as f64);
                }
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Piranha Dodge starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let settings = Settings::load();
        let has_touch = window.navigator().max_touch_points() > 0;

        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(seed),
            keys: DirectionKeys::default(),
            autopilot: false,
            settings,
            frames: FrameLoop::new(),
            host: BrowserFrames {
                window: window.clone(),
                callback: callback.clone(),
            },
            document: document.clone(),
            canvas,
            ctx,
            toast_until: 0.0,
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }));
        log::info!("Game initialized with seed: {}", seed);

        {
            let game = game.clone();
            *callback.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |time: f64| {
                game.borrow_mut().frame(time);
            }));
        }

        {
            let mut g = game.borrow_mut();
            g.measure();
            let touch = g.settings.touch_controls.visible(has_touch);
            g.show("touch-controls", touch);
            g.show("start-screen", true);
            g.show("game-over", false);
            g.render(0.0);
            g.update_hud(0.0);
        }

        setup_keyboard(&window, game.clone())?;
        setup_touch_controls(&document, game.clone())?;
        setup_buttons(&document, game.clone())?;
        setup_lifecycle(&window, game)?;

        log::info!("Piranha Dodge ready");
        Ok(())
    }

    fn setup_keyboard(window: &web_sys::Window, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        // Key down: latch directions, run commands
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                let mut g = game.borrow_mut();
                if let Some(dir) = Direction::from_key(&key) {
                    event.prevent_default();
                    g.keys.press(dir);
                } else if let Some(command) = Command::from_key(&key) {
                    event.prevent_default();
                    if event.repeat() {
                        return;
                    }
                    match command {
                        Command::StartOrRestart => g.start_or_restart(),
                        Command::ToggleAutopilot => {
                            g.autopilot = !g.autopilot;
                            log::info!("Demo mode: {}", g.autopilot);
                        }
                        Command::Toggle(pref) => g.toggle_preference(pref),
                    }
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up: release
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(dir) = Direction::from_key(&event.key()) {
                    event.prevent_default();
                    game.borrow_mut().keys.release(dir);
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_touch_controls(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        for dir in Direction::ALL {
            let Some(button) = document.get_element_by_id(dir.button_id()) else {
                log::warn!("Missing touch button #{}", dir.button_id());
                continue;
            };

            let press = {
                let game = game.clone();
                Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                    event.prevent_default();
                    game.borrow_mut().keys.press(dir);
                })
            };
            button.add_event_listener_with_callback("touchstart", press.as_ref().unchecked_ref())?;
            press.forget();

            let release = {
                let game = game.clone();
                Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                    event.prevent_default();
                    game.borrow_mut().keys.release(dir);
                })
            };
            button.add_event_listener_with_callback("touchend", release.as_ref().unchecked_ref())?;
            button.add_event_listener_with_callback(
                "touchcancel",
                release.as_ref().unchecked_ref(),
            )?;
            release.forget();
        }
        Ok(())
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        for id in ["start-btn", "restart-btn"] {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Missing button #{}", id);
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().start_or_restart();
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_lifecycle(window: &web_sys::Window, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        // Resize: re-measure, redraw if the loop is not running
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                g.measure();
                if !g.state.is_playing() {
                    let now = g.now();
                    g.render(now);
                }
            });
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Blur: keyup never arrives, so drop held keys
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().keys.release_all();
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Page hidden: no frame may fire after this
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().stop();
                log::info!("Frame loop cancelled (pagehide)");
            });
            window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Restored from the back/forward cache: pick the run back up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PageTransitionEvent| {
                if event.persisted() {
                    game.borrow_mut().resume();
                    log::info!("Frame loop resumed (pageshow)");
                }
            });
            window.add_event_listener_with_callback("pageshow", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Piranha Dodge (native) starting...");
    log::info!(
        "The game runs in the browser - use `trunk serve`. Running a headless demo instead."
    );

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    run_headless_demo(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Let the autopilot play one session at 60 Hz and print how it went
#[cfg(not(target_arch = "wasm32"))]
fn run_headless_demo(seed: u64) {
    use piranha_dodge::sim::{GameEvent, GameState, TickInput, tick};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    // Two minutes of play at most
    const MAX_FRAMES: u32 = 60 * 120;

    let mut state = GameState::with_area(seed, 800.0, 500.0);
    state.start(0.0);
    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };

    let mut now = 0.0;
    for _ in 0..MAX_FRAMES {
        now += FRAME_MS;
        tick(&mut state, &input, now);
        for event in state.take_events() {
            match event {
                GameEvent::FoodCollected { score, collected } => {
                    log::debug!("food #{} (score {})", collected, score)
                }
                other => log::info!("{:?}", other),
            }
        }
        if !state.is_playing() {
            break;
        }
    }

    println!("\nSeed {}: {:.1}s played", seed, now / 1000.0);
    println!(
        "Score {}, food {}, level {}, size {:.1}x",
        state.score, state.food_collected, state.difficulty, state.fish.size
    );
    match &state.caught_by {
        Some(cause) => println!("Caught by: {}", cause),
        None => println!("Survived the whole demo"),
    }
}
