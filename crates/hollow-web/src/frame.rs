use crate::audio::AudioDeck;
use crate::overlay::Hud;
use crate::render::GpuState;
use hollow_core::{AudioCue, CancellationToken, Session};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub session: Rc<RefCell<Session>>,
    pub deck: AudioDeck,
    pub hud: Hud,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: GpuState,
    pub last_instant: Instant,
    pub cues: Vec<AudioCue>,
}

impl FrameContext {
    /// Advance the simulation and draw one frame. Returns false once the
    /// renderer can no longer continue.
    pub fn frame(&mut self) -> bool {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;

        self.cues.clear();
        let mut session = self.session.borrow_mut();
        session.advance(dt, &mut self.cues);
        self.deck.apply(&self.cues);
        self.hud.set_door_prompt(session.near_door());

        // Keep WebGPU surface sized to canvas backing size
        self.gpu
            .resize_if_needed(self.canvas.width(), self.canvas.height());
        let camera = session.camera();
        let view = camera.view_matrix();
        let proj = camera.projection_matrix(self.gpu.aspect());
        match self.gpu.render(session.scene(), view, proj) {
            Ok(()) => true,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.gpu.reconfigure();
                true
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("[gpu] out of memory, stopping");
                false
            }
            Err(e) => {
                log::warn!("[gpu] skipped frame: {:?}", e);
                true
            }
        }
    }
}

/// Drive `frame_ctx` from requestAnimationFrame until `token` is cancelled
/// or a frame reports failure.
pub fn start_loop(frame_ctx: FrameContext, token: CancellationToken) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let mut frame_ctx = frame_ctx;
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if token.is_cancelled() || !frame_ctx.frame() {
            log::info!("[session] frame loop stopped");
            // Dropping the closure here would free it while it runs.
            return;
        }
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
