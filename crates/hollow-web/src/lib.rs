#![cfg(target_arch = "wasm32")]
use hollow_core::{CancellationToken, Session, SessionConfig};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod dom;
mod events;
mod frame;
mod launch;
mod overlay;
mod render;

static STARTED: AtomicBool = AtomicBool::new(false);

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("hollow-web starting");

    let document = dom::window_document().ok_or_else(|| JsValue::from_str("no document"))?;
    audio::start_profile_music(&document);
    if !launch::wire_avatar_trigger(&document) {
        log::warn!("[launch] #profile-avatar missing, waiting for start_experience()");
    }
    Ok(())
}

/// Replace the profile page with the scene. Safe to call more than once.
#[wasm_bindgen]
pub fn start_experience() {
    if STARTED.swap(true, Ordering::SeqCst) {
        return;
    }
    spawn_local(async move {
        if let Err(e) = run().await {
            log::error!("run error: {:?}", e);
            if let Some(document) = dom::window_document() {
                launch::restore_profile(&document);
            }
            STARTED.store(false, Ordering::SeqCst);
        }
    });
}

/// Everything that can fail runs while the profile page is still up; the
/// page is only swapped for the scene once the session, audio and GPU exist.
async fn run() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::canvas_by_id(&document, "game-canvas")?;
    let _ = canvas.style().set_property("image-rendering", "pixelated");
    dom::sync_canvas_backing_size(&canvas);

    let config = SessionConfig {
        seed: rand::random(),
        ..SessionConfig::default()
    };
    let session = Rc::new(RefCell::new(Session::new(config)?));
    let deck = audio::AudioDeck::new(&document)?;
    // No handler touches the session yet, so the scene may stay borrowed
    // while the adapter is awaited.
    let gpu = render::GpuState::new(&canvas, session.borrow().scene()).await?;
    let hud = overlay::Hud::attach(&document, "game-container")?;

    dom::hide_selector(&document, ".page-layout");
    dom::hide_selector(&document, ".background-container");
    dom::remove_class(&document, "game-container", "hidden");
    dom::sync_canvas_backing_size(&canvas);
    if let Some(window) = web::window() {
        let canvas_resize = canvas.clone();
        dom::listen(&window, "resize", move |_: web::Event| {
            dom::sync_canvas_backing_size(&canvas_resize);
        });
    }

    let mut cues = Vec::new();
    session.borrow_mut().begin(&mut cues);
    deck.apply(&cues);

    events::wire_input(&document, &canvas, session.clone(), deck.clone());
    let token = CancellationToken::new();
    events::wire_pagehide(token.clone(), session.clone(), deck.clone());

    frame::start_loop(
        frame::FrameContext {
            session,
            deck,
            hud,
            canvas,
            gpu,
            last_instant: Instant::now(),
            cues,
        },
        token,
    );
    Ok(())
}
