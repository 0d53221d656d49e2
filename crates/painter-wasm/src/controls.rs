//! Optional control elements and their wiring.
//!
//! Each control is looked up on its own. A selector that matches nothing,
//! is malformed, or matches the wrong kind of element disables that
//! control only.

use crate::SharedPainter;
use crate::export;
use crate::listeners::ListenerRegistry;
use painter_core::{ControlName, PainterConfig, PencilState};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlCanvasElement, HtmlElement, HtmlImageElement, HtmlInputElement};

pub struct Controls {
    pub color_pencil: Option<HtmlInputElement>,
    pub color_palette: Option<HtmlElement>,
    pub pencil_size: Option<HtmlInputElement>,
    pub pencil_opacity: Option<HtmlInputElement>,
    pub clear_button: Option<Element>,
    pub download_button: Option<Element>,
    pub preview_button: Option<Element>,
    pub preview_area: Option<HtmlImageElement>,
}

impl Controls {
    pub fn resolve(document: &Document, config: &PainterConfig) -> Self {
        Self {
            color_pencil: find(document, config, ControlName::ColorPencil),
            color_palette: find(document, config, ControlName::ColorPalette),
            pencil_size: find(document, config, ControlName::PencilSize),
            pencil_opacity: find(document, config, ControlName::PencilOpacity),
            clear_button: find(document, config, ControlName::ClearButton),
            download_button: find(document, config, ControlName::DownloadButton),
            preview_button: find(document, config, ControlName::PreviewButton),
            preview_area: find(document, config, ControlName::PreviewArea),
        }
    }

    /// Show the pencil defaults and the preview placeholder.
    pub fn seed(&self, pencil: &PencilState, placeholder: Option<&str>, width: u32, height: u32) {
        if let Some(input) = &self.color_pencil {
            input.set_value(&pencil.color);
        }
        if let Some(palette) = &self.color_palette {
            set_swatch(palette, &pencil.color);
        }
        if let Some(input) = &self.pencil_size {
            input.set_value(&pencil.size.to_string());
        }
        if let Some(input) = &self.pencil_opacity {
            input.set_value(&pencil.opacity.to_string());
        }
        if let Some(area) = &self.preview_area {
            if let Some(src) = placeholder {
                area.set_src(src);
            }
            area.set_width(width);
            area.set_height(height);
        }
    }

    /// Attach listeners for every bound control.
    pub fn wire(
        &self,
        painter: &SharedPainter,
        canvas: &HtmlCanvasElement,
        registry: &mut ListenerRegistry,
    ) -> Result<(), JsValue> {
        self.wire_pencil(painter, registry)?;
        self.wire_actions(painter, canvas, registry)
    }

    fn wire_pencil(&self, painter: &SharedPainter, registry: &mut ListenerRegistry) -> Result<(), JsValue> {
        if let Some(input) = &self.color_pencil {
            let target = input.clone();
            registry.listen(input, "focus", move |_| target.set_type("color"))?;

            let target = input.clone();
            let palette = self.color_palette.clone();
            registry.listen(input, "blur", move |_| {
                target.set_type("text");
                if let Some(palette) = &palette {
                    set_swatch(palette, &target.value());
                }
            })?;

            let target = input.clone();
            let painter = painter.clone();
            registry.listen(input, "change", move |_| {
                painter.borrow_mut().set_color(&target.value());
            })?;
        }

        if let Some(input) = &self.pencil_size {
            let target = input.clone();
            let painter = painter.clone();
            registry.listen(input, "change", move |_| {
                // Rejections are logged by the painter.
                let _ = painter.borrow_mut().set_size(&target.value());
            })?;
        }

        if let Some(input) = &self.pencil_opacity {
            let target = input.clone();
            let painter = painter.clone();
            registry.listen(input, "change", move |_| {
                let _ = painter.borrow_mut().set_opacity(&target.value());
            })?;
        }
        Ok(())
    }

    fn wire_actions(
        &self,
        painter: &SharedPainter,
        canvas: &HtmlCanvasElement,
        registry: &mut ListenerRegistry,
    ) -> Result<(), JsValue> {
        if let Some(button) = &self.clear_button {
            let painter = painter.clone();
            registry.listen(button, "click", move |_| painter.borrow_mut().clear())?;
        }

        if let Some(button) = &self.download_button {
            let canvas = canvas.clone();
            registry.listen(button, "click", move |_| {
                if let Err(err) = export::download(&canvas) {
                    log::error!("export failed: {err:?}");
                }
            })?;
        }

        if let Some(button) = &self.preview_button {
            let canvas = canvas.clone();
            let area = self.preview_area.clone();
            let (width, height) = {
                let p = painter.borrow();
                (p.width(), p.height())
            };
            registry.listen(button, "click", move |_| {
                let Some(area) = &area else {
                    log::debug!("preview requested without a preview area");
                    return;
                };
                if let Err(err) = export::preview(&canvas, area, width, height) {
                    log::error!("preview failed: {err:?}");
                }
            })?;
        }
        Ok(())
    }
}

fn find<T: JsCast>(document: &Document, config: &PainterConfig, control: ControlName) -> Option<T> {
    let selector = config.selector(control)?;
    let element = match document.query_selector(selector) {
        Ok(Some(element)) => element,
        Ok(None) => {
            log::debug!("{}: nothing matches `{selector}`", control.key());
            return None;
        }
        Err(_) => {
            log::warn!("{}: invalid selector `{selector}`", control.key());
            return None;
        }
    };
    match element.dyn_into::<T>() {
        Ok(element) => Some(element),
        Err(element) => {
            log::warn!(
                "{}: `{selector}` matched an unsupported <{}>",
                control.key(),
                element.tag_name().to_ascii_lowercase()
            );
            None
        }
    }
}

fn set_swatch(palette: &HtmlElement, color: &str) {
    if let Err(err) = palette.style().set_property("background-color", color) {
        log::warn!("failed to paint palette swatch: {err:?}");
    }
}
