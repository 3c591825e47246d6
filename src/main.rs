#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

#[cfg(all(not(target_arch = "wasm32"), not(target_os = "android")))]
mod cli {
    use std::path::PathBuf;

    use before_after::{Orientation, SliderConfig, StartupOptions};
    use clap::Parser;

    /// Compare two images with a draggable before/after slider.
    #[derive(Debug, Parser)]
    #[command(version)]
    pub struct Cli {
        /// Image revealed on the leading side of the handle
        #[arg(long)]
        pub before: Option<PathBuf>,

        /// Image revealed on the trailing side of the handle
        #[arg(long)]
        pub after: Option<PathBuf>,

        /// Split axis: horizontal or vertical
        #[arg(long)]
        pub orientation: Option<Orientation>,

        /// Starting handle position between 0 and 1
        #[arg(long, value_name = "PCT")]
        pub offset: Option<f32>,

        /// JSON file with slider settings
        #[arg(long, value_name = "JSON")]
        pub config: Option<PathBuf>,
    }

    impl Cli {
        pub fn into_startup(self) -> StartupOptions {
            let config = self.config.and_then(|path| {
                SliderConfig::from_json_file(&path)
                    .inspect_err(|err| log::error!("ignoring config: {err}"))
                    .ok()
            });
            StartupOptions {
                config,
                before: self.before,
                after: self.after,
                orientation: self.orientation,
                default_offset_pct: self.offset,
            }
        }
    }
}

// When compiling natively:
#[cfg(all(not(target_arch = "wasm32"), not(target_os = "android")))]
fn main() -> eframe::Result {
    use clap::Parser as _;

    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let startup = cli::Cli::parse().into_startup();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_min_inner_size([320.0, 240.0]),
        ..Default::default()
    };
    before_after::ComparisonApp::run(native_options, startup)
}

// Android starts through `android_main` in the library.
#[cfg(target_os = "android")]
fn main() {}

// When compiling to web using trunk:
#[cfg(target_arch = "wasm32")]
fn main() {
    use eframe::wasm_bindgen::JsCast as _;

    // Redirect `log` message to `console.log` and friends:
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("no document to attach to");
            return;
        };

        let Some(canvas) = document
            .get_element_by_id("the_canvas_id")
            .and_then(|el| el.dyn_into::<web_sys::HtmlCanvasElement>().ok())
        else {
            log::error!("the_canvas_id was not found or is not a canvas");
            return;
        };

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| {
                    Ok(Box::new(before_after::ComparisonApp::new(
                        cc,
                        before_after::StartupOptions::default(),
                    )))
                }),
            )
            .await;

        // Remove the loading text and spinner:
        if let Some(loading_text) = document.get_element_by_id("loading_text") {
            match start_result {
                Ok(_) => {
                    loading_text.remove();
                }
                Err(e) => {
                    loading_text.set_inner_html(
                        "<p> The app has crashed. See the developer console for details. </p>",
                    );
                    log::error!("Failed to start eframe: {e:?}");
                }
            }
        }
    });
}
