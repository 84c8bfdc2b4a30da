use hollow_core::constants::PIXEL_RATIO;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Attach a listener for the lifetime of the page.
pub fn listen<E>(target: &web::EventTarget, event: &str, handler: impl FnMut(E) + 'static)
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        log::warn!("failed to listen for {}: {:?}", event, e);
    }
    closure.forget();
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) -> bool {
    match document.get_element_by_id(element_id) {
        Some(el) => {
            listen(&el, "click", move |_: web::Event| handler());
            true
        }
        None => false,
    }
}

/// Run `f` once after `ms` milliseconds.
pub fn set_timeout(ms: i32, f: impl FnOnce() + 'static) {
    let Some(window) = web::window() else {
        return;
    };
    let cb = Closure::once_into_js(f);
    if let Err(e) =
        window.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), ms)
    {
        log::warn!("setTimeout failed: {:?}", e);
    }
}

pub fn canvas_by_id(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("#{} is not a canvas: {:?}", id, e)))
}

/// Size the backing store at a fixed fraction of the CSS size, ignoring
/// devicePixelRatio; the browser upscales it for the chunky pixel look.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    let rect = canvas.get_bounding_client_rect();
    let w_px = (rect.width() * PIXEL_RATIO) as u32;
    let h_px = (rect.height() * PIXEL_RATIO) as u32;
    canvas.set_width(w_px.max(1));
    canvas.set_height(h_px.max(1));
}

pub fn hide_selector(document: &web::Document, selector: &str) {
    let el = document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok());
    if let Some(el) = el {
        let _ = el.style().set_property("display", "none");
    }
}

pub fn add_class(document: &web::Document, id: &str, class: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        let _ = el.class_list().add_1(class);
    }
}

pub fn remove_class(document: &web::Document, id: &str, class: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        let _ = el.class_list().remove_1(class);
    }
}
