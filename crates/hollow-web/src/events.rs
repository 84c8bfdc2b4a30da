use crate::audio::AudioDeck;
use crate::dom::listen;
use hollow_core::{CancellationToken, Key, Session};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Keyboard, mouse-look and pointer-lock wiring for the scene canvas.
pub fn wire_input(
    document: &web::Document,
    canvas: &web::HtmlCanvasElement,
    session: Rc<RefCell<Session>>,
    deck: AudioDeck,
) {
    {
        let session = session.clone();
        let mut cues = Vec::new();
        listen(document, "keydown", move |ev: web::KeyboardEvent| {
            let Some(key) = Key::from_dom_key(&ev.key()) else {
                return;
            };
            cues.clear();
            session.borrow_mut().key_down(key, &mut cues);
            deck.apply(&cues);
        });
    }
    {
        let session = session.clone();
        listen(document, "keyup", move |ev: web::KeyboardEvent| {
            if let Some(key) = Key::from_dom_key(&ev.key()) {
                session.borrow_mut().key_up(key);
            }
        });
    }
    {
        let session = session.clone();
        listen(document, "mousemove", move |ev: web::MouseEvent| {
            session
                .borrow_mut()
                .mouse_move(ev.movement_x() as f32, ev.movement_y() as f32);
        });
    }
    {
        let canvas_lock = canvas.clone();
        listen(canvas, "click", move |_: web::MouseEvent| {
            canvas_lock.request_pointer_lock();
        });
    }
    {
        let canvas_lock = canvas.clone();
        let doc = document.clone();
        listen(document, "pointerlockchange", move |_: web::Event| {
            let locked = doc
                .pointer_lock_element()
                .map(|el| js_sys::Object::is(&el, &canvas_lock))
                .unwrap_or(false);
            log::debug!("[input] pointer lock {}", locked);
            session.borrow_mut().set_captured(locked);
        });
    }
}

/// Tear the session down when the page goes away: pending launch timers are
/// cancelled and both tracks are paused.
pub fn wire_pagehide(token: CancellationToken, session: Rc<RefCell<Session>>, deck: AudioDeck) {
    let Some(window) = web::window() else {
        return;
    };
    listen(&window, "pagehide", move |_: web::Event| {
        token.cancel();
        let mut cues = Vec::new();
        session.borrow_mut().end(&mut cues);
        deck.apply(&cues);
    });
}
