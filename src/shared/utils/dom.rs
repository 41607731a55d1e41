//! Browser plumbing (WASM only): file input, blob URLs, scrolling,
//! textarea sizing, and the page-unload hook.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::domain::models::PdfFile;
use crate::shared::errors::{ApiError, Result};
use crate::shared::utils::input::textarea_size;

/// Convert a JS exception into an `ApiError`
pub fn js_error(value: JsValue) -> ApiError {
    ApiError::Browser(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

fn document() -> Result<web_sys::Document> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| ApiError::Browser("No document available".to_string()))
}

fn element<T: JsCast>(id: &str) -> Option<T> {
    document().ok()?.get_element_by_id(id)?.dyn_into::<T>().ok()
}

/// Copy bytes into a `Blob` of the given type
pub fn bytes_to_blob(bytes: &[u8], content_type: &str) -> Result<web_sys::Blob> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&array);

    let options = web_sys::BlobPropertyBag::new();
    options.set_type(content_type);

    web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_error)
}

/// `blob:` URL over the given bytes
pub fn create_object_url(bytes: &[u8], content_type: &str) -> Result<String> {
    let blob = bytes_to_blob(bytes, content_type)?;
    web_sys::Url::create_object_url_with_blob(&blob).map_err(js_error)
}

pub fn revoke_object_url(url: &str) {
    if url.starts_with("blob:") {
        let _ = web_sys::Url::revoke_object_url(url);
    }
}

/// Take the first file of a file input.
/// The input is cleared right away so the same file can be picked again,
/// whether or not reading it later succeeds.
pub fn take_selected_file(input_id: &str) -> Result<Option<web_sys::File>> {
    let input: web_sys::HtmlInputElement = element(input_id)
        .ok_or_else(|| ApiError::Browser(format!("No file input #{}", input_id)))?;

    let file = input.files().and_then(|files| files.get(0));
    input.set_value("");
    Ok(file)
}

/// Read a picked file into memory
pub async fn read_file(file: &web_sys::File) -> Result<PdfFile> {
    let buffer = JsFuture::from(file.array_buffer()).await.map_err(js_error)?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();

    Ok(PdfFile::new(file.name(), file.type_(), bytes))
}

/// Scroll a container so its last child is visible
pub fn scroll_to_bottom(id: &str) {
    if let Some(container) = element::<web_sys::Element>(id) {
        container.set_scroll_top(container.scroll_height());
    }
}

/// Fit a textarea to its content, up to the composer height cap
pub fn resize_textarea(id: &str) {
    let Some(textarea) = element::<web_sys::HtmlTextAreaElement>(id) else {
        return;
    };

    let style = textarea.style();
    // Collapse first so scrollHeight can shrink
    let _ = style.set_property("height", "auto");

    let size = textarea_size(textarea.scroll_height() as f64);
    let _ = style.set_property("height", &format!("{}px", size.height));
    let _ = style.set_property("overflow-y", if size.overflows { "auto" } else { "hidden" });
}

/// `beforeunload` listener, removed again on drop
pub struct BeforeUnloadGuard {
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl BeforeUnloadGuard {
    pub fn register(mut handler: impl FnMut() + 'static) -> Option<Self> {
        let window = web_sys::window()?;
        let callback = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            handler();
        }) as Box<dyn FnMut(web_sys::Event)>);

        window
            .add_event_listener_with_callback("beforeunload", callback.as_ref().unchecked_ref())
            .ok()?;

        Some(Self { callback })
    }
}

impl Drop for BeforeUnloadGuard {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            let _ = window.remove_event_listener_with_callback(
                "beforeunload",
                self.callback.as_ref().unchecked_ref(),
            );
        }
    }
}
