//! WASM bindings for the circlefield-core library.
//!
//! All functions exposed to JavaScript via wasm-bindgen are defined here.
//! Every call returns JSON (see `output`) so the page script only has to
//! create, move and delete DOM elements.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::field::{CircleId, FieldConfig, Point};
use crate::output::{ChangeOutput, CircleOutput, ErrorInfo, FieldOutput};
use crate::session::{ClickOutcome, Session};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = error)]
    pub fn console_error(s: &str);
}

/// Route `log` records to the browser console. Safe to call more than once.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
    // Only the first call installs the logger.
    let _ = console_log::init_with_level(log::Level::Debug);
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        console_error(&format!("Error serializing output: {}", e));
        "{\"error\": {\"message\": \"Serialization error\"}}".to_string()
    })
}

#[wasm_bindgen]
pub struct CircleField {
    session: Session<StdRng>,
    /// Set when seeding failed; reported with the next snapshot.
    seed_error: Option<String>,
}

#[wasm_bindgen]
impl CircleField {
    /// Field with default settings, seeded with random circles.
    #[wasm_bindgen(constructor)]
    pub fn new() -> CircleField {
        Self::build(FieldConfig::default())
    }

    /// Like `new`, but reads settings from a (possibly partial) JSON object.
    /// Unparseable input falls back to defaults.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config_json: &str) -> CircleField {
        let config = match serde_json::from_str::<FieldConfig>(config_json) {
            Ok(config) => config,
            Err(e) => {
                console_error(&format!("Error parsing field config: {}", e));
                FieldConfig::default()
            }
        };
        Self::build(config)
    }

    /// Every live circle.
    pub fn snapshot(&mut self) -> String {
        let mut output = FieldOutput::from_field(self.session.field());
        output.error = self.seed_error.take().map(|message| ErrorInfo { message });
        to_json(&output)
    }

    /// Double-click on the field. `target` is the id of the circle under the
    /// pointer, or undefined for empty space.
    pub fn click(&mut self, x: f64, y: f64, target: Option<u32>) -> String {
        let outcome = self.session.click(Point::new(x, y), target.map(CircleId));
        to_json(&ChangeOutput::from_click(&outcome, self.radius()))
    }

    /// Returns false when `id` is not a live circle.
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, id: u32, x: f64, y: f64) -> bool {
        self.session.pointer_down(CircleId(id), Point::new(x, y))
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64, y: f64) -> String {
        let radius = self.radius();
        let change = match self.session.pointer_move(Point::new(x, y)) {
            Some(c) => ChangeOutput { moved: Some(CircleOutput::new(&c, radius)), ..ChangeOutput::default() },
            None => ChangeOutput::default(),
        };
        to_json(&change)
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self) -> String {
        let outcome = self.session.pointer_up();
        to_json(&ChangeOutput::from_drag(&outcome, self.radius()))
    }

    /// Add a circle at a random free spot.
    #[wasm_bindgen(js_name = addRandom)]
    pub fn add_random(&mut self) -> String {
        match self.session.add_random() {
            Ok(c) => to_json(&ChangeOutput::from_click(&ClickOutcome::Added(c), self.radius())),
            Err(e) => {
                console_error(&format!("Error placing circle: {}", e));
                to_json(&ChangeOutput::error(e.to_string()))
            }
        }
    }
}

impl CircleField {
    fn build(config: FieldConfig) -> CircleField {
        let mut session = Session::new(config, StdRng::from_entropy());
        let seed_error = match session.seed() {
            Ok(_) => None,
            Err(e) => {
                console_error(&format!("Error seeding field: {}", e));
                Some(e.to_string())
            }
        };
        CircleField { session, seed_error }
    }

    fn radius(&self) -> f64 {
        self.session.field().config().circle_radius
    }
}

impl Default for CircleField {
    fn default() -> Self {
        Self::new()
    }
}
