use hollow_core::constants::PROFILE_MUSIC_VOLUME;
use hollow_core::{AudioCue, Track};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

const DISTRESS_URL: &str = "https://cdn.freesound.org/previews/367/367746_1622571-lq.mp3";

/// HTML media elements behind the two scene tracks.
#[derive(Clone)]
pub struct AudioDeck {
    score: Option<web::HtmlMediaElement>,
    distress: web::HtmlMediaElement,
}

impl AudioDeck {
    pub fn new(document: &web::Document) -> anyhow::Result<Self> {
        let score = document
            .get_element_by_id("sad-music")
            .and_then(|el| el.dyn_into::<web::HtmlMediaElement>().ok());
        match &score {
            Some(el) => el.set_loop(true),
            None => log::warn!("[audio] #sad-music missing, score disabled"),
        }
        let distress: web::HtmlMediaElement = web::HtmlAudioElement::new_with_src(DISTRESS_URL)
            .map_err(|e| anyhow::anyhow!(format!("audio element: {:?}", e)))?
            .unchecked_into();
        distress.set_loop(true);
        Ok(Self { score, distress })
    }

    fn element(&self, track: Track) -> Option<&web::HtmlMediaElement> {
        match track {
            Track::Score => self.score.as_ref(),
            Track::Distress => Some(&self.distress),
        }
    }

    pub fn apply(&self, cues: &[AudioCue]) {
        for cue in cues {
            match *cue {
                AudioCue::Play(track) => {
                    if let Some(el) = self.element(track) {
                        play(el, track);
                    }
                }
                AudioCue::Pause(track) => {
                    if let Some(el) = self.element(track) {
                        let _ = el.pause();
                    }
                }
                AudioCue::Volume(track, v) => {
                    if let Some(el) = self.element(track) {
                        el.set_volume(v.clamp(0.0, 1.0) as f64);
                    }
                }
            }
        }
    }
}

/// Start playback. A rejected promise (autoplay policy) is logged and dropped.
fn play(el: &web::HtmlMediaElement, what: impl std::fmt::Debug + 'static) {
    match el.play() {
        Ok(promise) => spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                log::warn!("[audio] {:?} play rejected: {:?}", what, e);
            }
        }),
        Err(e) => log::warn!("[audio] {:?} play failed: {:?}", what, e),
    }
}

fn profile_music(document: &web::Document) -> Option<web::HtmlMediaElement> {
    document
        .get_element_by_id("background-music")
        .and_then(|el| el.dyn_into::<web::HtmlMediaElement>().ok())
}

pub fn start_profile_music(document: &web::Document) {
    if let Some(el) = profile_music(document) {
        el.set_volume(PROFILE_MUSIC_VOLUME as f64);
        play(&el, "background-music");
    }
}

pub fn pause_profile_music(document: &web::Document) {
    if let Some(el) = profile_music(document) {
        let _ = el.pause();
    }
}
