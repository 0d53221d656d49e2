//! Export and preview of the canvas pixels.

use painter_core::config::EXPORT_FILENAME;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Blob, HtmlAnchorElement, HtmlCanvasElement, HtmlImageElement, Url};

/// Serialize the canvas to a PNG blob and download it as `drawImage.png`.
///
/// The blob arrives asynchronously; its object URL is revoked inside the
/// same callback right after the download is triggered.
pub fn download(canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    let callback = Closure::once_into_js(move |blob: JsValue| {
        let Ok(blob) = blob.dyn_into::<Blob>() else {
            log::warn!("canvas produced no image blob, nothing to download");
            return;
        };
        if let Err(err) = save_blob(&blob) {
            log::error!("download failed: {err:?}");
        }
    });
    canvas.to_blob(callback.unchecked_ref())
}

fn save_blob(blob: &Blob) -> Result<(), JsValue> {
    with_transient(
        || Url::create_object_url_with_blob(blob),
        |url| Url::revoke_object_url(url),
        |url| click_download_link(url),
    )
}

/// Acquire a resource, run `body` on it, then release it whatever `body`
/// returned. A release failure only surfaces when `body` succeeded.
fn with_transient<R, T, E>(
    acquire: impl FnOnce() -> Result<R, E>,
    release: impl FnOnce(&R) -> Result<(), E>,
    body: impl FnOnce(&R) -> Result<T, E>,
) -> Result<T, E> {
    let resource = acquire()?;
    let outcome = body(&resource);
    let released = release(&resource);
    let value = outcome?;
    released?;
    Ok(value)
}

fn click_download_link(url: &str) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;

    let anchor = document
        .create_element("a")?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(JsValue::from)?;
    body.append_child(&anchor)?;
    anchor.set_download(EXPORT_FILENAME);
    anchor.set_href(url);
    anchor.click();
    anchor.remove();
    log::debug!("download triggered: {EXPORT_FILENAME}");
    Ok(())
}

/// Render the canvas into `area` at the configured dimensions.
pub fn preview(
    canvas: &HtmlCanvasElement,
    area: &HtmlImageElement,
    width: u32,
    height: u32,
) -> Result<(), JsValue> {
    area.set_src(&canvas.to_data_url()?);
    area.set_width(width);
    area.set_height(height);
    Ok(())
}
