// Cross-platform image picking. On desktop a native dialog returns a path; on wasm we create a
// hidden <input type=file> and read the bytes asynchronously. Either way the result is queued
// and collected by the app on its next frame with `take_picked_image`.

use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use crate::images::ImageRole;

/// An image chosen by the user, not yet decoded.
#[derive(Debug)]
pub enum PickedImage {
    Path(PathBuf),
    Bytes { name: String, bytes: Vec<u8> },
}

static PICKED: Mutex<Vec<(ImageRole, PickedImage)>> = Mutex::new(Vec::new());

fn push_picked(role: ImageRole, image: PickedImage) {
    PICKED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push((role, image));
}

/// Oldest pick that the app has not consumed yet.
pub fn take_picked_image() -> Option<(ImageRole, PickedImage)> {
    let mut picked = PICKED.lock().unwrap_or_else(PoisonError::into_inner);
    if picked.is_empty() {
        None
    } else {
        Some(picked.remove(0))
    }
}

#[cfg(all(not(target_arch = "wasm32"), not(target_os = "android")))]
pub fn open_image_picker(role: ImageRole) {
    let title = match role {
        ImageRole::Before => "Open before image",
        ImageRole::After => "Open after image",
    };
    if let Some(path) = rfd::FileDialog::new()
        .set_title(title)
        .add_filter("Image", &["png", "jpg", "jpeg", "gif", "bmp", "webp"])
        .pick_file()
    {
        push_picked(role, PickedImage::Path(path));
    }
}

#[cfg(target_os = "android")]
pub fn open_image_picker(role: ImageRole) {
    log::warn!("no file picker on android, cannot open {} image", role.label());
}

#[cfg(target_arch = "wasm32")]
pub fn open_image_picker(role: ImageRole) {
    web::open_image_picker(role);
}

#[cfg(target_arch = "wasm32")]
mod web {
    use js_sys::Uint8Array;
    use wasm_bindgen::JsCast as _;
    use wasm_bindgen::JsValue;
    use wasm_bindgen::closure::Closure;
    use web_sys::{FileReader, HtmlInputElement};

    use super::{PickedImage, push_picked};
    use crate::images::ImageRole;

    pub fn open_image_picker(role: ImageRole) {
        log::debug!("file_picker: opening picker for {} image", role.label());
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        let Some(input) = document
            .create_element("input")
            .ok()
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };

        input.set_type("file");
        input.set_accept("image/png,image/jpeg,image/gif,image/bmp,image/webp");
        // Off-screen rather than display:none, some browsers refuse to click hidden inputs
        input
            .set_attribute(
                "style",
                "position: fixed; left: -9999px; width: 1px; height: 1px; opacity: 0;",
            )
            .ok();

        if let Some(body) = document.body() {
            body.append_child(&input).ok();
        }

        let onchange = Closure::wrap(Box::new(move |ev: web_sys::Event| {
            let Some(input) = ev
                .target()
                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            else {
                return;
            };
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            let Ok(reader) = FileReader::new() else {
                log::warn!("file_picker: FileReader unavailable");
                return;
            };
            let reader_in_cb = reader.clone();
            let name = file.name();
            let onload = Closure::once(Box::new(move |_e: JsValue| {
                let Ok(result) = reader_in_cb.result() else {
                    log::warn!("file_picker: could not read {name}");
                    return;
                };
                let bytes = Uint8Array::new(&result).to_vec();
                push_picked(role, PickedImage::Bytes { name, bytes });
            }) as Box<dyn FnOnce(_)>);
            reader.set_onload(Some(onload.as_ref().unchecked_ref()));
            onload.forget();
            reader.read_as_array_buffer(&file).ok();
            input.remove();
        }) as Box<dyn FnMut(_)>);

        input.set_onchange(Some(onchange.as_ref().unchecked_ref()));
        onchange.forget(); // keep alive

        input.click();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_are_taken_in_order() {
        push_picked(ImageRole::Before, PickedImage::Path(PathBuf::from("a.png")));
        push_picked(
            ImageRole::After,
            PickedImage::Bytes {
                name: "b.png".to_owned(),
                bytes: vec![1, 2, 3],
            },
        );

        let (role, first) = take_picked_image().unwrap();
        assert_eq!(role, ImageRole::Before);
        assert!(matches!(first, PickedImage::Path(p) if p == PathBuf::from("a.png")));

        let (role, second) = take_picked_image().unwrap();
        assert_eq!(role, ImageRole::After);
        assert!(matches!(second, PickedImage::Bytes { bytes, .. } if bytes == [1, 2, 3]));

        assert!(take_picked_image().is_none());
    }
}
