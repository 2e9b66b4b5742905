//! Urchin Catcher entry point
//!
//! Native: runs one headless session with a simple autopilot diver.
//! Web: wires input to the game element and drives the session from
//! `requestAnimationFrame`; drawing is left to the page.

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    use urchin_catcher::highscores::LocalStorageStore;
    use urchin_catcher::platform::web::{attach_input, playfield_of};
    use urchin_catcher::sim::GamePhase;
    use urchin_catcher::Session;

    type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

    fn request_frame(callback: &FrameCallback) {
        if let (Some(window), Some(closure)) = (web_sys::window(), callback.borrow().as_ref()) {
            if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
                log::warn!("requestAnimationFrame failed: {:?}", e);
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
        log::info!("Urchin Catcher starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let element = document
            .get_element_by_id("game")
            .ok_or("missing #game element")?;

        let seed = js_sys::Date::now() as u64;
        let session = Rc::new(RefCell::new(Session::new(
            seed,
            Box::new(LocalStorageStore),
        )));
        log::info!("Session created with seed: {}", seed);
        attach_input(&element, session.clone())?;

        // Start on first click; restart on clicks after game over
        {
            let session = session.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut s = session.borrow_mut();
                match s.phase() {
                    GamePhase::Idle => s.start(),
                    GamePhase::Ended => s.restart(),
                    GamePhase::Playing => {}
                }
            });
            element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let next = callback.clone();
        let mut last_time: Option<f64> = None;
        *callback.borrow_mut() = Some(Closure::new(move |time: f64| {
            let elapsed = last_time.map(|t| (time - t).max(0.0)).unwrap_or(0.0);
            last_time = Some(time);
            {
                let mut s = session.borrow_mut();
                s.set_playfield(playfield_of(&element));
                s.advance(elapsed as u64);
                for event in s.drain_events() {
                    log::debug!("{:?}", event);
                }
            }
            request_frame(&next);
        }));
        request_frame(&callback);

        log::info!("Urchin Catcher running!");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), wasm_bindgen::JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use urchin_catcher::highscores::FileStore;
    use urchin_catcher::sim::{GameEvent, GamePhase, Playfield};
    use urchin_catcher::Session;

    env_logger::init();
    log::info!("Urchin Catcher (native) starting...");

    let seed = std::env::var("URCHIN_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        });
    let store = FileStore::new(std::env::temp_dir().join("urchin-catcher.json"));
    let mut session = Session::new(seed, Box::new(store));
    log::info!("Session created with seed: {}", seed);

    let field = Playfield::new(0.0, 400.0);
    session.set_playfield(field);
    session.start();

    // Autopilot: chase the lowest urchin not yet past the catch band, with a
    // capped step per frame so it can fall behind
    const STEP_PX: f32 = 6.0;
    const FRAME_MS: u64 = 16;
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    let mut pointer_px = field.width / 2.0;
    let mut frames = 0;
    while session.phase() == GamePhase::Playing && frames < MAX_FRAMES {
        let target = session
            .objects()
            .iter()
            .filter(|o| o.y() <= session.tuning().catch_line + session.tuning().catch_band_below)
            .max_by(|a, b| a.y().total_cmp(&b.y()))
            .map(|o| o.x() / 100.0 * field.width);
        if let Some(target) = target {
            pointer_px += (target - pointer_px).clamp(-STEP_PX, STEP_PX);
        }
        session.set_pointer(pointer_px);
        session.advance(FRAME_MS);

        for event in session.drain_events() {
            match event {
                GameEvent::LifeLost { lives } => log::info!("Missed! {} lives left", lives),
                GameEvent::Ended {
                    score,
                    new_high_score,
                } => {
                    println!(
                        "Game over: {} urchins caught{}",
                        score,
                        if new_high_score { " - new high score!" } else { "" }
                    );
                }
                _ => log::debug!("{:?}", event),
            }
        }
        frames += 1;
    }

    println!(
        "Final score {} (best {}) after {:.1}s",
        session.score(),
        session.high_score(),
        frames as f32 * FRAME_MS as f32 / 1000.0
    );
}
