//! A before/after image comparison slider for egui.
//!
//! Two images are stacked; the before image is revealed up to a draggable
//! handle and the after image shows beyond it. Clicking near either end of
//! the image snaps to that full image.
//!
//! The pure core ([`SliderController`], [`Geometry`], [`Zone`]) knows nothing
//! about painting; [`ComparisonSlider`] wires it to egui input and painting,
//! and [`ComparisonApp`] hosts one slider in an eframe window.

#![warn(clippy::all, rust_2018_idioms)]

mod app;
pub mod config;
pub mod controller;
mod error;
pub mod file_picker;
pub mod geometry;
pub mod images;
pub mod orientation;
pub mod transition;
pub mod widget;
pub mod zone;

pub use app::{ComparisonApp, StartupOptions};
pub use config::SliderConfig;
pub use controller::SliderController;
pub use error::LoadError;
pub use geometry::{Dimensions, Geometry, HandleOffset, LabelState};
pub use images::{ImagePair, ImageRole, ImageSlot, LoadedImage};
pub use orientation::{AxisStrategy, Orientation};
pub use widget::ComparisonSlider;
pub use zone::{HIT_FRACTION, Zone};

#[cfg(not(target_arch = "wasm32"))]
use eframe::NativeOptions;

#[cfg(target_os = "android")]
use egui_winit::winit;

#[cfg(not(target_arch = "wasm32"))]
impl ComparisonApp {
    /// Run the app with provided NativeOptions.
    ///
    /// # Errors
    /// Returns the eframe error if the window or graphics context cannot be created.
    pub fn run(options: NativeOptions, startup: StartupOptions) -> Result<(), eframe::Error> {
        eframe::run_native(
            "Before / After",
            options,
            Box::new(|cc| Ok(Box::new(Self::new(cc, startup)))),
        )
    }
}

#[cfg(target_os = "android")]
#[allow(unsafe_code)]
#[unsafe(no_mangle)]
pub extern "C" fn android_main(app: winit::platform::android::activity::AndroidApp) {
    use eframe::Renderer;

    unsafe {
        std::env::set_var("RUST_BACKTRACE", "full");
    }
    android_logger::init_once(
        android_logger::Config::default().with_max_level(log::LevelFilter::Info),
    );

    let options = NativeOptions {
        android_app: Some(app),
        renderer: Renderer::Wgpu,
        ..Default::default()
    };

    if let Err(err) = ComparisonApp::run(options, StartupOptions::default()) {
        log::error!("before_after exited with an error: {err}");
    }
}
