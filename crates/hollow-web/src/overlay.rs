use wasm_bindgen::JsCast;
use web_sys as web;

const HUD_STYLE: &str = "position:absolute;top:20px;left:20px;color:white;\
font-family:Inter, sans-serif;padding:10px;background-color:rgba(0,0,0,0.5);border-radius:5px";
const HELP: &str = "Click to start<br>WASD to move<br>Mouse to look<br>Shift to run<br>";
const DOOR_HINT: &str = "E to open doors";
const DOOR_PROMPT: &str = "<strong style=\"color: yellow\">Press E to open door</strong>";

/// Instructions panel in the corner of the scene.
pub struct Hud {
    el: web::HtmlElement,
    prompting: bool,
}

impl Hud {
    pub fn attach(document: &web::Document, container_id: &str) -> anyhow::Result<Self> {
        let container = document
            .get_element_by_id(container_id)
            .ok_or_else(|| anyhow::anyhow!("missing #{}", container_id))?;
        let el = document
            .create_element("div")
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
            .dyn_into::<web::HtmlElement>()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        let _ = el.set_attribute("style", HUD_STYLE);
        container
            .append_child(&el)
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        let mut hud = Self {
            el,
            prompting: true,
        };
        hud.set_door_prompt(false);
        Ok(hud)
    }

    /// Swap the last line for the highlighted prompt while the door is in reach.
    pub fn set_door_prompt(&mut self, near_door: bool) {
        if near_door == self.prompting {
            return;
        }
        self.prompting = near_door;
        let tail = if near_door { DOOR_PROMPT } else { DOOR_HINT };
        self.el.set_inner_html(&format!("{}{}", HELP, tail));
    }
}
