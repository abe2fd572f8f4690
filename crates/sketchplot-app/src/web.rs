//! WASM entry point: HTML canvas surface and the JS-facing session handle.

use crate::app::App;
use crate::rows::{Row, RowList};
use kurbo::{BezPath, PathEl, Point, Size, Stroke};
use peniko::Color;
use sketchplot_core::color::Rgb;
use sketchplot_core::input::{KeyEvent, Modifiers, MouseButton, PointerEvent};
use sketchplot_core::options::ToolOptions;
use sketchplot_core::shapes::ShapeId;
use sketchplot_render::{Surface, SurfaceError, SurfaceResult};
use std::fmt::Display;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

fn js_error(err: impl Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn css_color(color: Color) -> String {
    let rgba = color.to_rgba8();
    format!("rgb({}, {}, {})", rgba.r, rgba.g, rgba.b)
}

/// Surface backed by a 2D canvas context. Snapshots are `ImageData` copies.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> SurfaceResult<Self> {
        let context = canvas
            .get_context("2d")
            .map_err(|err| SurfaceError::Unavailable(format!("{err:?}")))?
            .ok_or_else(|| SurfaceError::Unavailable("canvas has no 2d context".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SurfaceError::Unavailable("context is not a 2d context".into()))?;
        Ok(Self { canvas, context })
    }

    fn trace(&self, path: &BezPath) {
        let ctx = &self.context;
        ctx.begin_path();
        for el in path.elements() {
            match *el {
                PathEl::MoveTo(p) => ctx.move_to(p.x, p.y),
                PathEl::LineTo(p) => ctx.line_to(p.x, p.y),
                PathEl::QuadTo(a, p) => ctx.quadratic_curve_to(a.x, a.y, p.x, p.y),
                PathEl::CurveTo(a, b, p) => ctx.bezier_curve_to(a.x, a.y, b.x, b.y, p.x, p.y),
                PathEl::ClosePath => ctx.close_path(),
            }
        }
    }
}

impl Surface for CanvasSurface {
    type Snapshot = ImageData;

    fn size(&self) -> Size {
        Size::new(f64::from(self.canvas.width()), f64::from(self.canvas.height()))
    }

    fn clear(&mut self, background: Color) -> SurfaceResult<()> {
        let size = self.size();
        self.context.clear_rect(0.0, 0.0, size.width, size.height);
        self.context.set_fill_style_str(&css_color(background));
        self.context.fill_rect(0.0, 0.0, size.width, size.height);
        Ok(())
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) -> SurfaceResult<()> {
        self.context.set_fill_style_str(&css_color(color));
        self.trace(path);
        self.context.fill();
        Ok(())
    }

    fn stroke_path(&mut self, path: &BezPath, stroke: &Stroke, color: Color) -> SurfaceResult<()> {
        self.context.set_stroke_style_str(&css_color(color));
        self.context.set_line_width(stroke.width);
        self.trace(path);
        self.context.stroke();
        Ok(())
    }

    fn snapshot(&self) -> SurfaceResult<ImageData> {
        let size = self.size();
        self.context
            .get_image_data(0.0, 0.0, size.width, size.height)
            .map_err(|err| SurfaceError::Snapshot(format!("{err:?}")))
    }

    fn restore(&mut self, snapshot: &ImageData) -> SurfaceResult<()> {
        self.context
            .put_image_data(snapshot, 0.0, 0.0)
            .map_err(|err| SurfaceError::Draw(format!("{err:?}")))
    }
}

/// Forwards row changes to a JS callback as `(kind, payload)`.
///
/// `kind` is `"appended"` (payload: row JSON), `"removed"` (payload: id) or
/// `"moved"` (payload: `{"id", "index"}` JSON).
pub struct CallbackRowList {
    callback: js_sys::Function,
}

impl CallbackRowList {
    fn notify(&self, kind: &str, payload: String) {
        self.callback
            .call2(&JsValue::NULL, &JsValue::from_str(kind), &JsValue::from_str(&payload))
            .map_err(|err| log::warn!("row callback failed: {err:?}"))
            .ok();
    }
}

impl RowList for CallbackRowList {
    fn row_appended(&mut self, row: Row) {
        match serde_json::to_string(&row) {
            Ok(json) => self.notify("appended", json),
            Err(err) => log::warn!("failed to encode row: {err}"),
        }
    }

    fn row_removed(&mut self, id: ShapeId) {
        self.notify("removed", id.to_string());
    }

    fn row_moved(&mut self, id: ShapeId, index: usize) {
        let payload = serde_json::json!({ "id": id, "index": index });
        self.notify("moved", payload.to_string());
    }
}

fn parse_id(id: &str) -> Result<ShapeId, JsValue> {
    ShapeId::parse_str(id).map_err(js_error)
}

fn mouse_button(button: i16) -> MouseButton {
    match button {
        1 => MouseButton::Middle,
        2 => MouseButton::Right,
        _ => MouseButton::Left,
    }
}

fn shift(shift: bool) -> Modifiers {
    Modifiers {
        shift,
        ..Default::default()
    }
}

/// Session handle exported to JS. The page forwards DOM events to it.
#[wasm_bindgen]
pub struct WebApp {
    app: App<CanvasSurface, CallbackRowList>,
}

#[wasm_bindgen]
impl WebApp {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, on_row: js_sys::Function) -> Result<WebApp, JsValue> {
        let surface = CanvasSurface::new(canvas).map_err(js_error)?;
        let rows = CallbackRowList { callback: on_row };
        let app = App::new(surface, rows).map_err(js_error)?;
        Ok(WebApp { app })
    }

    pub fn pointer_down(&mut self, x: f64, y: f64, button: i16, shift_key: bool) -> Result<(), JsValue> {
        let event = PointerEvent::Down {
            position: Point::new(x, y),
            button: mouse_button(button),
            modifiers: shift(shift_key),
        };
        self.app.pointer(&event).map_err(js_error)
    }

    pub fn pointer_move(&mut self, x: f64, y: f64, shift_key: bool) -> Result<(), JsValue> {
        let event = PointerEvent::Move {
            position: Point::new(x, y),
            modifiers: shift(shift_key),
        };
        self.app.pointer(&event).map_err(js_error)
    }

    pub fn pointer_up(&mut self, x: f64, y: f64, button: i16) -> Result<(), JsValue> {
        let event = PointerEvent::Up {
            position: Point::new(x, y),
            button: mouse_button(button),
        };
        self.app.pointer(&event).map_err(js_error)
    }

    pub fn key_down(&mut self, key: String) -> Result<(), JsValue> {
        self.app.key(&KeyEvent::Pressed(key)).map_err(js_error)
    }

    /// Context menu on the canvas.
    pub fn cancel(&mut self) -> Result<(), JsValue> {
        self.app.cancel().map_err(js_error)
    }

    /// Replace the toolbar state from its JSON form.
    pub fn set_options(&mut self, json: &str) -> Result<(), JsValue> {
        let options = ToolOptions::from_json(json).map_err(js_error)?;
        self.app.set_options(options).map_err(js_error)
    }

    pub fn set_filled(&mut self, id: &str, filled: bool) -> Result<(), JsValue> {
        let id = parse_id(id)?;
        self.app.set_filled(id, filled).map_err(js_error)
    }

    /// Row color picker, as `#rrggbb`.
    pub fn set_color(&mut self, id: &str, color: &str) -> Result<(), JsValue> {
        let id = parse_id(id)?;
        let color: Rgb = color.parse().map_err(js_error)?;
        self.app.set_color(id, color).map_err(js_error)
    }

    pub fn set_hovered(&mut self, id: &str, hovered: bool) -> Result<(), JsValue> {
        let id = parse_id(id)?;
        self.app.set_hovered(id, hovered).map_err(js_error)
    }

    pub fn move_row(&mut self, id: &str, offset: i32) -> Result<(), JsValue> {
        let id = parse_id(id)?;
        self.app.move_row(id, offset as isize).map_err(js_error)
    }

    pub fn remove_row(&mut self, id: &str) -> Result<(), JsValue> {
        let id = parse_id(id)?;
        self.app.remove_row(id).map_err(js_error)
    }

    /// Call after changing the canvas element's width/height.
    pub fn resize(&mut self) -> Result<(), JsValue> {
        let size = self.app.surface().size();
        self.app.resize(size).map_err(js_error)
    }

    /// Octave code for the committed history; the page copies it to the clipboard.
    pub fn export(&self) -> String {
        self.app.export()
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&JsValue::from_str(&err.to_string()));
    }
    log::info!("SketchPlot loaded");
}
