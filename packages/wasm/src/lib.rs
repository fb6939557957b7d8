//! Browser bindings
//!
//! Everything crosses the boundary as JSON strings. The `*_json` functions
//! hold the logic and are plain Rust so they can be tested natively; the
//! exported wrappers only convert errors to `JsValue`.
//!
//! There is no clock on this side: callers pass `new Date().toISOString()`.

use chrono::{DateTime, FixedOffset};
use letter_compiler_html::{compile_to_html, CompileOptions};
use letter_renderer::{
    css_variables, font_resources, render_document, resolve_style, DragConfig, DragSession,
    DragTarget, Modifiers, Operation, Point, RenderMode, RenderOptions,
};
use letter_schema::{EditorDocument, Geometry, StyleSystem};
use letter_store::adapter::document_from_record;
use letter_store::DocumentRecord;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn to_js(err: String) -> JsValue {
    JsValue::from_str(&err)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn parse_document(json: &str) -> Result<EditorDocument, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid document: {}", e))
}

fn parse_mode(mode: &str) -> Result<RenderMode, String> {
    mode.parse().map_err(|e| format!("{}", e))
}

fn parse_now(now_iso: &str) -> Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(now_iso).map_err(|e| format!("Invalid time '{}': {}", now_iso, e))
}

fn render_options(mode: &str, now_iso: &str) -> Result<RenderOptions, String> {
    Ok(RenderOptions::new(parse_mode(mode)?, parse_now(now_iso)?))
}

pub fn load_record_json(record_json: &str) -> Result<String, String> {
    let record: DocumentRecord =
        serde_json::from_str(record_json).map_err(|e| format!("Invalid record: {}", e))?;
    let document = document_from_record(record).map_err(|e| e.to_string())?;
    to_json(&document)
}

pub fn render_document_json(json: &str, mode: &str, now_iso: &str) -> Result<String, String> {
    let document = parse_document(json)?;
    let rendered = render_document(&document, &render_options(mode, now_iso)?)
        .map_err(|e| e.to_string())?;
    to_json(&rendered)
}

pub fn render_html(json: &str, mode: &str, now_iso: &str) -> Result<String, String> {
    let document = parse_document(json)?;
    let rendered = render_document(&document, &render_options(mode, now_iso)?)
        .map_err(|e| e.to_string())?;
    let title = (!document.meta.title.is_empty()).then(|| document.meta.title.clone());
    compile_to_html(
        &rendered,
        CompileOptions {
            title,
            ..Default::default()
        },
    )
    .map_err(|e| e.to_string())
}

pub fn resolve_style_json(style_json: &str) -> Result<String, String> {
    let style: StyleSystem =
        serde_json::from_str(style_json).map_err(|e| format!("Invalid style: {}", e))?;
    to_json(&resolve_style(&style))
}

pub fn css_variables_json(style_json: &str) -> Result<String, String> {
    let style: StyleSystem =
        serde_json::from_str(style_json).map_err(|e| format!("Invalid style: {}", e))?;
    to_json(&css_variables(&resolve_style(&style)))
}

pub fn font_resources_json(json: &str, mode: &str) -> Result<String, String> {
    let document = parse_document(json)?;
    let style = resolve_style(&document.effective_style());
    to_json(&font_resources(&style, parse_mode(mode)?))
}

/// Normalize a stored record (either style/data shape) into an editor document
#[wasm_bindgen(js_name = loadRecord)]
pub fn load_record_js(record_json: &str) -> Result<String, JsValue> {
    load_record_json(record_json).map_err(to_js)
}

/// Render a document and return the node tree as JSON
#[wasm_bindgen(js_name = renderDocument)]
pub fn render_document_js(json: &str, mode: &str, now_iso: &str) -> Result<String, JsValue> {
    render_document_json(json, mode, now_iso).map_err(to_js)
}

/// Render a document to a standalone HTML page
#[wasm_bindgen(js_name = renderHtml)]
pub fn render_html_js(json: &str, mode: &str, now_iso: &str) -> Result<String, JsValue> {
    render_html(json, mode, now_iso).map_err(to_js)
}

#[wasm_bindgen(js_name = resolveStyle)]
pub fn resolve_style_js(style_json: &str) -> Result<String, JsValue> {
    resolve_style_json(style_json).map_err(to_js)
}

#[wasm_bindgen(js_name = cssVariables)]
pub fn css_variables_js(style_json: &str) -> Result<String, JsValue> {
    css_variables_json(style_json).map_err(to_js)
}

#[wasm_bindgen(js_name = fontResources)]
pub fn font_resources_js(json: &str, mode: &str) -> Result<String, JsValue> {
    font_resources_json(json, mode).map_err(to_js)
}

/// Pointer-driven drag, resize and rotate for one element at a time
#[wasm_bindgen]
pub struct DragController {
    session: DragSession,
}

impl DragController {
    pub fn from_config_json(config_json: Option<String>) -> Result<DragController, String> {
        let config = match config_json.as_deref() {
            Some(json) if !json.trim().is_empty() => serde_json::from_str::<DragConfig>(json)
                .map_err(|e| format!("Invalid drag config: {}", e))?,
            _ => DragConfig::default(),
        };
        config.validate().map_err(|e| e.to_string())?;
        Ok(DragController {
            session: DragSession::new(config),
        })
    }

    pub fn start(
        &mut self,
        block_id: &str,
        element_id: &str,
        operation_json: &str,
        geometry_json: &str,
        x: f64,
        y: f64,
    ) -> Result<(), String> {
        let operation: Operation = serde_json::from_str(operation_json)
            .map_err(|e| format!("Invalid operation: {}", e))?;
        let geometry: Geometry = serde_json::from_str(geometry_json)
            .map_err(|e| format!("Invalid geometry: {}", e))?;
        self.session
            .pointer_down(
                DragTarget::new(block_id, element_id),
                operation,
                Point::new(x, y),
                geometry,
            )
            .map_err(|e| e.to_string())
    }

    pub fn update(&mut self, x: f64, y: f64, shift: bool) -> Result<String, String> {
        let modifiers = if shift {
            Modifiers::shift()
        } else {
            Modifiers::default()
        };
        let geometry = self
            .session
            .pointer_move(Point::new(x, y), modifiers)
            .map_err(|e| e.to_string())?;
        to_json(&geometry)
    }

    pub fn finish(&mut self) -> Result<String, String> {
        let change = self.session.pointer_up().map_err(|e| e.to_string())?;
        to_json(&change)
    }

    pub fn abort(&mut self) -> Result<String, String> {
        let geometry = self.session.cancel().map_err(|e| e.to_string())?;
        to_json(&geometry)
    }
}

#[wasm_bindgen]
impl DragController {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<DragController, JsValue> {
        DragController::from_config_json(config_json).map_err(to_js)
    }

    #[wasm_bindgen(js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.session.is_active()
    }

    /// `operation_json` is `{"kind":"move"}`, `{"kind":"resize","handle":"se"}`
    /// or `{"kind":"rotate","center":{"x":..,"y":..}}`
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(
        &mut self,
        block_id: &str,
        element_id: &str,
        operation_json: &str,
        geometry_json: &str,
        x: f64,
        y: f64,
    ) -> Result<(), JsValue> {
        self.start(block_id, element_id, operation_json, geometry_json, x, y)
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64, y: f64, shift: bool) -> Result<String, JsValue> {
        self.update(x, y, shift).map_err(to_js)
    }

    /// Returns the committed change as JSON
    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self) -> Result<String, JsValue> {
        self.finish().map_err(to_js)
    }

    /// Returns the original geometry as JSON
    #[wasm_bindgen(js_name = cancel)]
    pub fn cancel(&mut self) -> Result<String, JsValue> {
        self.abort().map_err(to_js)
    }
}
