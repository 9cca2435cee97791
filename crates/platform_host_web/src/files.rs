//! File → data-URL conversion for wallpaper image uploads.
//!
//! This is the one asynchronous boundary in the desktop: the read completes on a later turn of
//! the browser event loop and its result is dispatched back into the runtime.

#[cfg(target_arch = "wasm32")]
use futures::channel::oneshot;
#[cfg(target_arch = "wasm32")]
use std::{cell::RefCell, rc::Rc};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

/// Returns whether a picked file's MIME type can be used as a wallpaper image.
pub fn is_wallpaper_image_mime(mime_type: &str) -> bool {
    let mime_type = mime_type.trim().to_ascii_lowercase();
    mime_type.starts_with("image/")
}

/// Reads `file` into a `data:` URL.
///
/// # Errors
///
/// Returns an error when the reader cannot start, fails, or yields a non-string result.
#[cfg(target_arch = "wasm32")]
pub async fn read_file_as_data_url(file: &web_sys::File) -> Result<String, String> {
    let reader = web_sys::FileReader::new().map_err(|err| format!("{err:?}"))?;
    let (tx, rx) = oneshot::channel::<Result<String, String>>();
    let sender = Rc::new(RefCell::new(Some(tx)));

    let reader_for_load = reader.clone();
    let load_sender = sender.clone();
    let on_load = Closure::<dyn FnMut(web_sys::ProgressEvent)>::wrap(Box::new(move |_| {
        let result = reader_for_load
            .result()
            .map_err(|err| format!("failed to read image file: {err:?}"))
            .and_then(|value| {
                value
                    .as_string()
                    .ok_or_else(|| "file reader returned non-string result".to_string())
            });
        if let Some(tx) = load_sender.borrow_mut().take() {
            let _ = tx.send(result);
        }
    }));
    reader.set_onload(Some(on_load.as_ref().unchecked_ref()));

    let error_sender = sender.clone();
    let on_error = Closure::<dyn FnMut(web_sys::ProgressEvent)>::wrap(Box::new(move |_| {
        if let Some(tx) = error_sender.borrow_mut().take() {
            let _ = tx.send(Err("failed to load image file".to_string()));
        }
    }));
    reader.set_onerror(Some(on_error.as_ref().unchecked_ref()));

    reader
        .read_as_data_url(file)
        .map_err(|err| format!("failed to start file read: {err:?}"))?;

    let result = rx
        .await
        .map_err(|_| "image file read was interrupted".to_string())?;
    on_load.forget();
    on_error.forget();
    result
}

/// Starts reading `file` and hands the outcome to `on_done` once the read settles.
#[cfg(target_arch = "wasm32")]
pub fn read_file_as_data_url_then<F>(file: web_sys::File, on_done: F)
where
    F: FnOnce(Result<String, String>) + 'static,
{
    wasm_bindgen_futures::spawn_local(async move {
        if !is_wallpaper_image_mime(&file.type_()) {
            on_done(Err(format!("unsupported image type `{}`", file.type_())));
            return;
        }
        on_done(read_file_as_data_url(&file).await);
    });
}
