//! Pixel Racer entry point
//!
//! Browser: wires the canvas, keyboard, buttons and DOM HUD to the frame
//! loop. Native: runs the autopilot headless for a fixed number of frames.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement};

    use pixel_racer::audio::web::WebAudio;
    use pixel_racer::frame_loop::FrameLoop;
    use pixel_racer::game::Game;
    use pixel_racer::persistence::LocalStorageStore;
    use pixel_racer::platform::input::{command_for_key, swallows_default};
    use pixel_racer::platform::web::RafScheduler;
    use pixel_racer::renderer::{RenderState, SceneRenderer};
    use pixel_racer::reward::{LocalLeaderboardRewards, RewardDispatcher};
    use pixel_racer::sim::GamePhase;
    use pixel_racer::{Settings, Tuning, logging};

    type Loop = FrameLoop<RafScheduler, SceneRenderer>;

    fn js_err(msg: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&msg.to_string())
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", hidden);
        }
    }

    /// Push the per-frame view into the DOM
    fn update_hud(lp: &Loop) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let game = lp.game();
        let view = game.view();
        let phase = game.state().phase;

        set_text(&document, "score", &view.score.to_string());
        set_text(&document, "high-score", &game.high_score().to_string());
        set_hidden(&document, "start-screen", phase != GamePhase::Idle);
        set_hidden(&document, "game-over", !view.is_game_over);
        if view.is_game_over {
            set_text(&document, "final-score", &view.final_score.to_string());
        }

        let show_fps = lp.renderer().settings().show_fps;
        set_hidden(&document, "hud-fps", !show_fps);
        if show_fps {
            set_text(&document, "fps", &lp.fps().to_string());
        }

        for notice in game.drain_reward_notices() {
            set_text(&document, "reward-notice", &notice.message());
            set_hidden(&document, "reward-notice", false);
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        logging::init(false);
        log::info!("Pixel Racer starting...");

        let window = web_sys::window().ok_or_else(|| js_err("no window"))?;
        let document = window.document().ok_or_else(|| js_err("no document"))?;

        set_hidden(&document, "loading", true);

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| js_err("no canvas"))?
            .dyn_into()?;

        let tuning = Tuning::default();
        let settings = Settings::load();

        // Backing store follows the device pixel ratio
        let dpr = window.device_pixel_ratio();
        let width = (tuning.canvas_width as f64 * dpr) as u32;
        let height = (tuning.canvas_height as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let rewards = RewardDispatcher::new(Arc::new(LocalLeaderboardRewards::persistent()));
        let game = Game::new(
            seed,
            tuning.clone(),
            Box::new(WebAudio::new(&settings)),
            Box::new(LocalStorageStore),
        )
        .with_rewards(rewards);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(js_err)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(js_err)?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(
            surface,
            &adapter,
            width,
            height,
            (tuning.canvas_width, tuning.canvas_height),
        )
        .await
        .map_err(js_err)?;
        let renderer = SceneRenderer::new(render_state, settings);

        let scheduler = RafScheduler::new(window.clone());
        let slot = scheduler.callback();
        let lp: Rc<RefCell<Loop>> = Rc::new(RefCell::new(FrameLoop::new(game, scheduler, renderer)));

        {
            let lp = Rc::clone(&lp);
            *slot.borrow_mut() = Some(Closure::new(move |time: f64| {
                let mut l = lp.borrow_mut();
                l.on_frame(time);
                update_hud(&l);
            }));
        }

        setup_keyboard(&window, Rc::clone(&lp))?;
        setup_buttons(&document, &lp)?;
        setup_teardown(&window, Rc::clone(&lp))?;

        set_hidden(&document, "hud", false);
        lp.borrow_mut().begin();

        log::info!("Pixel Racer running (seed {})", seed);
        Ok(())
    }

    fn setup_keyboard(window: &web_sys::Window, lp: Rc<RefCell<Loop>>) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let key = event.key();
            let mut l = lp.borrow_mut();
            let phase = l.game().state().phase;
            if let Some(cmd) = command_for_key(&key, phase) {
                if swallows_default(&key) {
                    event.prevent_default();
                }
                l.game_mut().push_command(cmd);
            }
        });
        window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    /// Start/restart buttons and the on-screen mobile controls
    fn setup_buttons(document: &Document, lp: &Rc<RefCell<Loop>>) -> Result<(), JsValue> {
        let bindings: [(&str, fn(&mut Game)); 5] = [
            ("start-btn", Game::start),
            ("restart-btn", Game::restart),
            ("btn-left", Game::move_left),
            ("btn-right", Game::move_right),
            ("btn-jump", Game::jump),
        ];
        for (id, action) in bindings {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };
            let lp = Rc::clone(lp);
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                action(lp.borrow_mut().game_mut());
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    /// Stop the loop and release audio when the page goes away
    fn setup_teardown(window: &web_sys::Window, lp: Rc<RefCell<Loop>>) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            lp.borrow_mut().stop();
        });
        window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Pixel Racer failed to start: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::time::Duration;

    use clap::Parser;

    use pixel_racer::audio::LogAudio;
    use pixel_racer::frame_loop::{FrameLoop, ManualScheduler, NullRenderer};
    use pixel_racer::game::Game;
    use pixel_racer::persistence::{HighScoreStore, JsonFileStore, MemoryStore};
    use pixel_racer::reward::{LocalLeaderboardRewards, RewardDispatcher};
    use pixel_racer::sim::{Command, GamePhase, autopilot};
    use pixel_racer::{HighScores, Tuning, logging};

    /// Run the racer headless with the autopilot at the wheel
    #[derive(Parser)]
    #[command(author, version, about, long_about = None)]
    pub struct Args {
        /// RNG seed for the session
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Frames to simulate (60 per second of game time)
        #[arg(long, default_value_t = 3600)]
        frames: u64,
        /// Tuning overrides as JSON
        #[arg(long)]
        tuning: Option<PathBuf>,
        /// JSON file holding the high score between runs
        #[arg(long)]
        store: Option<PathBuf>,
        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    }

    const FRAME_MS: f64 = 1000.0 / 60.0;

    pub fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
        logging::init(args.verbose);

        let tuning = match &args.tuning {
            Some(path) => Tuning::from_json(&std::fs::read_to_string(path)?)?,
            None => Tuning::default(),
        };
        let store: Box<dyn HighScoreStore> = match &args.store {
            Some(path) => Box::new(JsonFileStore::new(path)),
            None => Box::new(MemoryStore::default()),
        };
        let rewards =
            RewardDispatcher::new(Arc::new(LocalLeaderboardRewards::in_memory(HighScores::new())));
        let game = Game::new(args.seed, tuning, Box::new(LogAudio), store).with_rewards(rewards);

        let mut lp = FrameLoop::new(game, ManualScheduler::default(), NullRenderer);
        lp.begin();

        let mut runs = 0u32;
        let mut best = 0u64;
        for frame in 0..args.frames {
            let game = lp.game_mut();
            if game.state().phase == GamePhase::GameOver {
                runs += 1;
                best = best.max(game.view().final_score);
                game.push_command(Command::Restart);
            } else if let Some(cmd) = autopilot::plan(game.state(), game.tuning()) {
                game.push_command(cmd);
            }
            lp.on_frame(frame as f64 * FRAME_MS);
        }
        let view = lp.game().view();
        if view.is_game_over {
            runs += 1;
        }
        best = best.max(view.final_score).max(view.score);
        lp.stop();

        if let Some(rewards) = lp.game().rewards() {
            for _ in 0..rewards.dispatched() {
                match rewards.wait_notice(Duration::from_secs(2)) {
                    Some(notice) => log::info!("{}", notice.message().replace('\n', " | ")),
                    None => log::warn!("Reward worker did not report back"),
                }
            }
        }

        println!(
            "{} frames, {} finished runs, best score {}, high score {}",
            lp.frames(),
            runs,
            best,
            lp.game().high_score()
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use clap::Parser;
    headless::run(headless::Args::parse())
}
