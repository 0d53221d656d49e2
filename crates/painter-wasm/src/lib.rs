//! WASM bridge for Painter — binds the drawing controller to a browser canvas.
//!
//! Compiled via `wasm-pack build --target web`; JS constructs it with
//! `new Painter("canvasArea", 450, 407, { clearButton: "#clear" })`.

mod canvas;
mod controls;
mod export;
mod listeners;
mod logger;

use canvas::CanvasSurface;
use controls::Controls;
use listeners::ListenerRegistry;
use painter_core::{
    ConfigurationError, Painter, PainterConfig, PainterError, PointerEvent,
    SurfaceOrigin, SurfaceSpec, config::SURFACE_BORDER,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, HtmlCanvasElement, MouseEvent};

pub(crate) type SharedPainter = Rc<RefCell<Painter<CanvasSurface>>>;

/// The JS-facing drawing widget.
///
/// Owns the painter state and every listener it registered. Handlers share
/// the state through one private `Rc<RefCell<_>>`.
#[wasm_bindgen(js_name = Painter)]
pub struct WebPainter {
    painter: SharedPainter,
    canvas: HtmlCanvasElement,
    controls: Controls,
    listeners: ListenerRegistry,
}

#[wasm_bindgen(js_class = Painter)]
impl WebPainter {
    /// Bind to the `<canvas>` with id `surface_id`.
    ///
    /// `config` is an optional object of control selectors; see
    /// `PainterConfig` for keys and defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(surface_id: &str, width: u32, height: u32, config: JsValue) -> Result<WebPainter, JsError> {
        console_error_panic_hook_setup();
        logger::init(log::LevelFilter::Warn);

        Self::build(surface_id, width, height, &config).map_err(|e| {
            log::error!("{e}");
            JsError::new(&format!("[painter] {e}"))
        })
    }

    /// Erase the drawing and repaint the background.
    pub fn clear(&self) {
        self.painter.borrow_mut().clear();
    }

    /// Download the drawing as `drawImage.png`.
    pub fn download(&self) -> Result<(), JsValue> {
        export::download(&self.canvas)
    }

    /// Render the drawing into the preview area, if one is bound.
    pub fn preview(&self) -> Result<(), JsValue> {
        let Some(area) = &self.controls.preview_area else {
            return Ok(());
        };
        let painter = self.painter.borrow();
        export::preview(&self.canvas, area, painter.width(), painter.height())
    }

    /// Unregister every listener added at construction.
    pub fn destroy(&mut self) {
        self.listeners.detach_all();
        self.painter.borrow_mut().finish();
    }

    #[wasm_bindgen(getter)]
    pub fn color(&self) -> String {
        self.painter.borrow().pencil().color.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn size(&self) -> f64 {
        self.painter.borrow().pencil().size
    }

    #[wasm_bindgen(getter)]
    pub fn opacity(&self) -> f64 {
        self.painter.borrow().pencil().opacity
    }

    #[wasm_bindgen(js_name = isDrawing)]
    pub fn is_drawing(&self) -> bool {
        self.painter.borrow().is_drawing()
    }

    #[wasm_bindgen(js_name = listenerCount)]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

// ─── Construction ────────────────────────────────────────────────────────

impl WebPainter {
    fn build(surface_id: &str, width: u32, height: u32, config: &JsValue) -> Result<Self, PainterError> {
        let document = document()?;
        let spec = SurfaceSpec::new(surface_id, width, height);

        // Everything fallible happens before the first listener is attached.
        let element = document.get_element_by_id(surface_id);
        spec.validate(element.as_ref().map(|e| e.tag_name()).as_deref())?;
        let canvas = match element.map(|e| e.dyn_into::<HtmlCanvasElement>()) {
            Some(Ok(canvas)) => canvas,
            Some(Err(element)) => {
                return Err(ConfigurationError::WrongElementType {
                    id: surface_id.to_string(),
                    tag: element.tag_name().to_ascii_lowercase(),
                }
                .into());
            }
            None => {
                return Err(ConfigurationError::SurfaceNotFound {
                    id: surface_id.to_string(),
                }
                .into());
            }
        };
        let config = parse_config(config)?;
        let surface = CanvasSurface::new(canvas.clone(), surface_id)?;

        if let Err(err) = canvas.style().set_property("border", SURFACE_BORDER) {
            log::warn!("failed to style surface: {err:?}");
        }
        let painter = Painter::new(surface, width, height);
        let controls = Controls::resolve(&document, &config);
        controls.seed(painter.pencil(), config.preview_placeholder(), width, height);

        let painter: SharedPainter = Rc::new(RefCell::new(painter));
        let mut listeners = ListenerRegistry::new();
        // On failure `listeners` drops here and detaches what was added.
        wire_surface(&painter, &canvas, &mut listeners)
            .and_then(|()| controls.wire(&painter, &canvas, &mut listeners))
            .map_err(|err| ConfigurationError::InvalidConfig(format!("listener setup failed: {err:?}")))?;

        log::debug!(
            "painter bound to #{surface_id} with {} listeners",
            listeners.len()
        );
        Ok(Self {
            painter,
            canvas,
            controls,
            listeners,
        })
    }
}

fn document() -> Result<Document, ConfigurationError> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| ConfigurationError::InvalidConfig("no window.document available".into()))
}

fn parse_config(config: &JsValue) -> Result<PainterConfig, ConfigurationError> {
    if config.is_undefined() || config.is_null() {
        return Ok(PainterConfig::default());
    }
    match js_sys::JSON::stringify(config) {
        Ok(json) => PainterConfig::from_json(&String::from(json)),
        Err(_) => {
            log::warn!("config is not serializable, using defaults");
            Ok(PainterConfig::default())
        }
    }
}

fn wire_surface(
    painter: &SharedPainter,
    canvas: &HtmlCanvasElement,
    registry: &mut ListenerRegistry,
) -> Result<(), JsValue> {
    let pointer = |to_event: fn(&MouseEvent) -> PointerEvent| {
        let painter = painter.clone();
        let canvas = canvas.clone();
        move |event: Event| {
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let rect = canvas.get_bounding_client_rect();
            let origin = SurfaceOrigin {
                left: rect.left(),
                top: rect.top(),
            };
            painter
                .borrow_mut()
                .handle_pointer(&to_event(mouse), origin);
        }
    };

    registry.listen(
        canvas,
        "mousedown",
        pointer(|e| {
            let (x, y) = client_position(e);
            PointerEvent::down(x, y, e.button())
        }),
    )?;
    registry.listen(
        canvas,
        "mousemove",
        pointer(|e| {
            let (x, y) = client_position(e);
            PointerEvent::moved(x, y, Some(e.buttons()))
        }),
    )?;
    registry.listen(
        canvas,
        "mouseup",
        pointer(|e| {
            let (x, y) = client_position(e);
            PointerEvent::up(x, y)
        }),
    )?;
    registry.listen(
        canvas,
        "mouseout",
        pointer(|e| {
            let (x, y) = client_position(e);
            PointerEvent::leave(x, y)
        }),
    )?;
    Ok(())
}

/// `clientX`/`clientY` as doubles; the typed getters are `i32`.
fn client_position(event: &MouseEvent) -> (f64, f64) {
    let read = |key: &str, fallback: i32| {
        js_sys::Reflect::get(event, &JsValue::from_str(key))
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(fallback as f64)
    };
    (
        read("clientX", event.client_x()),
        read("clientY", event.client_y()),
    )
}

/// Set the console log level (`"off"`, `"error"`, ... `"trace"`).
#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) {
    logger::set_level(logger::parse_level(level));
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Painter WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
