use crate::audio::{pause_profile_music, start_profile_music};
use crate::dom::{add_class, add_click_listener, listen, remove_class, set_timeout};
use hollow_core::constants::{FADE_DELAY_MS, START_DELAY_MS};
use hollow_core::{CancellationToken, LaunchSequence, LaunchStep};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use web_sys as web;

static TRIGGERED: AtomicBool = AtomicBool::new(false);

/// Arm the profile avatar: the first click fades the page to white and then
/// hands over to the scene.
pub fn wire_avatar_trigger(document: &web::Document) -> bool {
    let doc = document.clone();
    add_click_listener(document, "profile-avatar", move || {
        if TRIGGERED.swap(true, Ordering::SeqCst) {
            return;
        }
        log::info!("[launch] avatar clicked");
        if let Err(e) = launch(&doc) {
            log::error!("[launch] {:?}", e);
        }
    })
}

fn launch(document: &web::Document) -> anyhow::Result<()> {
    pause_profile_music(document);

    let fade = document
        .create_element("div")
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    fade.set_class_name("fade-white");
    document
        .body()
        .ok_or_else(|| anyhow::anyhow!("no body"))?
        .append_child(&fade)
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    add_class(document, "username", "zoom-effect");

    let sequence = Rc::new(LaunchSequence::new(CancellationToken::new()));
    if let Some(window) = web::window() {
        let token = sequence.token().clone();
        listen(&window, "pagehide", move |_: web::Event| token.cancel());
    }

    {
        let sequence = sequence.clone();
        set_timeout(FADE_DELAY_MS, move || {
            if sequence.fire(LaunchStep::Fade) {
                let _ = fade.class_list().add_1("active");
            }
        });
    }
    set_timeout(START_DELAY_MS, move || {
        if sequence.fire(LaunchStep::Start) {
            crate::start_experience();
        }
    });
    Ok(())
}

/// Undo the launch effects after the scene failed to start, and re-arm the
/// avatar so the visitor can try again.
pub fn restore_profile(document: &web::Document) {
    if let Ok(fades) = document.query_selector_all(".fade-white") {
        for i in 0..fades.length() {
            if let Some(node) = fades.item(i) {
                if let Some(parent) = node.parent_node() {
                    let _ = parent.remove_child(&node);
                }
            }
        }
    }
    remove_class(document, "username", "zoom-effect");
    start_profile_music(document);
    TRIGGERED.store(false, Ordering::SeqCst);
    log::warn!("[launch] scene failed to start, profile restored");
}
