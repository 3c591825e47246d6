//! Decoding the two images and turning them into textures.
//!
//! Each image has its own load signal: a one-shot channel that delivers the
//! decoded pixels (or the error) exactly once. The slider is only drawn once
//! both signals have resolved to ready textures.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};

use egui::{ColorImage, TextureHandle, TextureOptions, Vec2};

use crate::error::LoadError;

/// Which side of the comparison an image belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageRole {
    Before,
    After,
}

impl ImageRole {
    pub fn label(self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
        }
    }

    fn texture_name(self) -> &'static str {
        match self {
            Self::Before => "comparison_before",
            Self::After => "comparison_after",
        }
    }
}

/// Pixels decoded off the UI thread, waiting to be uploaded.
#[derive(Debug)]
pub struct DecodedImage {
    pub name: String,
    pub pixels: ColorImage,
}

impl DecodedImage {
    pub fn size(&self) -> [usize; 2] {
        self.pixels.size
    }
}

/// Decodes an encoded image (PNG, JPEG, ...) held in memory.
///
/// # Errors
/// Returns [`LoadError::Decode`] for unreadable data and [`LoadError::Empty`]
/// for images without pixels.
pub fn decode_bytes(name: &str, bytes: &[u8]) -> Result<DecodedImage, LoadError> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (w, h) = rgba.dimensions();
    if w == 0 || h == 0 {
        return Err(LoadError::Empty {
            name: name.to_owned(),
        });
    }
    Ok(DecodedImage {
        name: name.to_owned(),
        pixels: ColorImage::from_rgba_unmultiplied([w as usize, h as usize], rgba.as_raw()),
    })
}

/// Reads and decodes an image file.
///
/// # Errors
/// Returns [`LoadError::Io`] if the file cannot be read, otherwise the
/// errors of [`decode_bytes`].
pub fn decode_file(path: &Path) -> Result<DecodedImage, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_name()
        .map_or_else(|| path.to_string_lossy(), |n| n.to_string_lossy())
        .into_owned();
    decode_bytes(&name, &bytes)
}

/// An image uploaded to the GPU, ready to paint.
#[derive(Clone)]
pub struct LoadedImage {
    pub name: String,
    pub texture: TextureHandle,
    /// Pixel size of the source image.
    pub size: Vec2,
}

impl LoadedImage {
    pub fn upload(ctx: &egui::Context, role: ImageRole, decoded: DecodedImage) -> Self {
        let [w, h] = decoded.size();
        let texture = ctx.load_texture(role.texture_name(), decoded.pixels, TextureOptions::LINEAR);
        Self {
            name: decoded.name,
            texture,
            size: Vec2::new(w as f32, h as f32),
        }
    }
}

type LoadSignal = Receiver<Result<DecodedImage, LoadError>>;

/// Load state of one image.
#[derive(Default)]
pub enum ImageSlot {
    #[default]
    Empty,
    Loading {
        name: String,
        signal: LoadSignal,
    },
    Ready(LoadedImage),
    Failed(String),
}

impl ImageSlot {
    /// Starts decoding `job` and returns a slot waiting on its result.
    ///
    /// On native targets the job runs on its own thread and wakes the UI when
    /// done; on the web there are no threads, so it runs before returning.
    pub fn spawn<F>(ctx: &egui::Context, name: String, job: F) -> Self
    where
        F: FnOnce() -> Result<DecodedImage, LoadError> + Send + 'static,
    {
        let (tx, signal) = mpsc::channel();

        #[cfg(not(target_arch = "wasm32"))]
        {
            let ctx = ctx.clone();
            let spawned = std::thread::Builder::new()
                .name(format!("decode {name}"))
                .spawn(move || {
                    // the receiver may be gone if the slot was replaced meanwhile
                    tx.send(job()).ok();
                    ctx.request_repaint();
                });
            if let Err(err) = spawned {
                log::warn!("could not start decoder thread for {name}: {err}");
                return Self::Failed(err.to_string());
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            tx.send(job()).ok();
            ctx.request_repaint();
        }

        Self::Loading { name, signal }
    }

    pub fn load_path(ctx: &egui::Context, path: PathBuf) -> Self {
        let name = path.to_string_lossy().into_owned();
        log::info!("loading image {name}");
        Self::spawn(ctx, name, move || decode_file(&path))
    }

    pub fn load_bytes(ctx: &egui::Context, name: String, bytes: Vec<u8>) -> Self {
        log::info!("loading image {name} ({} bytes)", bytes.len());
        let job_name = name.clone();
        Self::spawn(ctx, name, move || decode_bytes(&job_name, &bytes))
    }

    /// Turns a finished decode into a slot, uploading the texture on success.
    pub fn from_decoded(
        ctx: &egui::Context,
        role: ImageRole,
        decoded: Result<DecodedImage, LoadError>,
    ) -> Self {
        match decoded {
            Ok(decoded) => {
                let [w, h] = decoded.size();
                log::info!("{} image {} ready ({w}x{h})", role.label(), decoded.name);
                Self::Ready(LoadedImage::upload(ctx, role, decoded))
            }
            Err(err) => {
                log::warn!("{} image failed: {err}", role.label());
                Self::Failed(err.to_string())
            }
        }
    }

    /// Resolves the load signal if it has fired.
    pub fn poll(&mut self, ctx: &egui::Context, role: ImageRole) {
        let Self::Loading { name, signal } = self else {
            return;
        };
        let result = match signal.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => Err(LoadError::Disconnected {
                name: std::mem::take(name),
            }),
        };
        *self = Self::from_decoded(ctx, role, result);
    }

    pub fn ready(&self) -> Option<&LoadedImage> {
        match self {
            Self::Ready(image) => Some(image),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }
}

/// The before/after image slots of one slider.
#[derive(Default)]
pub struct ImagePair {
    pub before: ImageSlot,
    pub after: ImageSlot,
}

impl ImagePair {
    pub fn slot_mut(&mut self, role: ImageRole) -> &mut ImageSlot {
        match role {
            ImageRole::Before => &mut self.before,
            ImageRole::After => &mut self.after,
        }
    }

    pub fn poll(&mut self, ctx: &egui::Context) {
        self.before.poll(ctx, ImageRole::Before);
        self.after.poll(ctx, ImageRole::After);
    }

    /// Both images, once both are ready.
    pub fn ready(&self) -> Option<(&LoadedImage, &LoadedImage)> {
        Some((self.before.ready()?, self.after.ready()?))
    }

    pub fn is_loading(&self) -> bool {
        self.before.is_loading() || self.after.is_loading()
    }

    pub fn errors(&self) -> impl Iterator<Item = (ImageRole, &str)> {
        [
            (ImageRole::Before, self.before.error()),
            (ImageRole::After, self.after.error()),
        ]
        .into_iter()
        .filter_map(|(role, err)| err.map(|err| (role, err)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 10, 10, 255]));
        let mut out = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut out, image::ImageOutputFormat::Png)
            .unwrap();
        out.into_inner()
    }

    fn decoded(width: u32, height: u32) -> DecodedImage {
        decode_bytes("test.png", &png_bytes(width, height)).unwrap()
    }

    #[test]
    fn decodes_png_bytes() {
        let image = decoded(4, 3);
        assert_eq!(image.size(), [4, 3]);
        assert_eq!(image.name, "test.png");
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let err = decode_bytes("junk", b"not an image").unwrap_err();
        assert!(matches!(err, LoadError::Decode(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = decode_file(Path::new("/nonexistent/before.png")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("before.png"));
    }

    #[test]
    fn pair_is_ready_only_with_both_images() {
        let ctx = egui::Context::default();
        let mut pair = ImagePair::default();
        assert!(pair.ready().is_none());

        pair.before = ImageSlot::from_decoded(&ctx, ImageRole::Before, Ok(decoded(8, 4)));
        assert!(pair.ready().is_none());

        pair.after = ImageSlot::from_decoded(&ctx, ImageRole::After, Ok(decoded(8, 4)));
        let (before, after) = pair.ready().unwrap();
        assert_eq!(before.size, Vec2::new(8.0, 4.0));
        assert_eq!(after.size, Vec2::new(8.0, 4.0));
    }

    #[test]
    fn failed_decode_is_reported_per_role() {
        let ctx = egui::Context::default();
        let mut pair = ImagePair::default();
        pair.after = ImageSlot::from_decoded(
            &ctx,
            ImageRole::After,
            decode_bytes("junk", b"nope"),
        );
        let errors: Vec<_> = pair.errors().collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].0, ImageRole::After);
        assert!(pair.ready().is_none());
    }

    #[test]
    fn load_signal_resolves_to_ready() {
        let ctx = egui::Context::default();
        let bytes = png_bytes(2, 2);
        let mut slot = ImageSlot::load_bytes(&ctx, "tiny.png".to_owned(), bytes);

        for _ in 0..500 {
            slot.poll(&ctx, ImageRole::Before);
            if !slot.is_loading() {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(10));
        }
        let image = slot.ready().unwrap();
        assert_eq!(image.name, "tiny.png");
    }

    #[test]
    fn dropped_sender_fails_the_slot() {
        let ctx = egui::Context::default();
        let (tx, signal) = mpsc::channel();
        drop(tx);
        let mut slot = ImageSlot::Loading {
            name: "lost.png".to_owned(),
            signal,
        };
        slot.poll(&ctx, ImageRole::Before);
        assert!(slot.error().unwrap().contains("lost.png"));
    }
}
