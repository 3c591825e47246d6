use std::path::PathBuf;

use crate::config::SliderConfig;
use crate::controller::SliderController;
use crate::file_picker::{self, PickedImage};
use crate::images::{ImagePair, ImageRole, ImageSlot};
use crate::orientation::Orientation;
use crate::widget::ComparisonSlider;

/// Settings given on launch that take precedence over restored state.
#[derive(Clone, Debug, Default)]
pub struct StartupOptions {
    pub config: Option<SliderConfig>,
    pub before: Option<PathBuf>,
    pub after: Option<PathBuf>,
    pub orientation: Option<Orientation>,
    pub default_offset_pct: Option<f32>,
}

/// We derive Deserialize/Serialize so we can persist app state on shutdown.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct ComparisonApp {
    config: SliderConfig,

    // Persist the last opened image paths
    before_path: Option<String>,
    after_path: Option<String>,

    #[serde(skip)] // This how you opt-out of serialization of a field
    images: ImagePair,

    #[serde(skip)]
    slider: SliderController,
}

impl Default for ComparisonApp {
    fn default() -> Self {
        Self {
            config: SliderConfig::default(),
            before_path: None,
            after_path: None,
            images: ImagePair::default(),
            slider: SliderController::default(),
        }
    }
}

impl ComparisonApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, startup: StartupOptions) -> Self {
        // Load previous app state (if any).
        let mut this: Self = if let Some(storage) = cc.storage {
            eframe::get_value(storage, eframe::APP_KEY).unwrap_or_default()
        } else {
            Default::default()
        };

        this.apply_startup(startup);
        this.slider = SliderController::new(&this.config);

        for (role, path) in [
            (ImageRole::Before, this.before_path.clone()),
            (ImageRole::After, this.after_path.clone()),
        ] {
            if let Some(path) = path {
                this.load_path(&cc.egui_ctx, role, PathBuf::from(path));
            }
        }

        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        this
    }

    fn apply_startup(&mut self, startup: StartupOptions) {
        if let Some(config) = startup.config {
            self.config = config;
        }
        if let Some(orientation) = startup.orientation {
            self.config.orientation = orientation;
        }
        if let Some(pct) = startup.default_offset_pct {
            self.config.default_offset_pct = pct;
        }
        if let Some(path) = startup.before {
            self.before_path = Some(path.to_string_lossy().into_owned());
        }
        if let Some(path) = startup.after {
            self.after_path = Some(path.to_string_lossy().into_owned());
        }
    }

    fn load_path(&mut self, ctx: &egui::Context, role: ImageRole, path: PathBuf) {
        let name = path.to_string_lossy().into_owned();
        match role {
            ImageRole::Before => self.before_path = Some(name),
            ImageRole::After => self.after_path = Some(name),
        }
        *self.images.slot_mut(role) = ImageSlot::load_path(ctx, path);
    }

    fn take_picked_images(&mut self, ctx: &egui::Context) {
        while let Some((role, picked)) = file_picker::take_picked_image() {
            match picked {
                PickedImage::Path(path) => self.load_path(ctx, role, path),
                PickedImage::Bytes { name, bytes } => {
                    // bytes from the browser cannot be reopened later, so no path is kept
                    match role {
                        ImageRole::Before => self.before_path = None,
                        ImageRole::After => self.after_path = None,
                    }
                    *self.images.slot_mut(role) = ImageSlot::load_bytes(ctx, name, bytes);
                }
            }
        }
    }

    /// Orientation is fixed per controller, so changing it starts over.
    fn rebuild_slider(&mut self) {
        log::debug!("rebuilding slider for {}", self.config.orientation);
        self.slider = SliderController::new(&self.config);
    }

    fn settings_ui(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            ui.label("Orientation:");
            let mut orientation = self.config.orientation;
            egui::ComboBox::from_id_salt("orientation")
                .selected_text(orientation.as_str())
                .show_ui(ui, |ui| {
                    for option in Orientation::ALL {
                        ui.selectable_value(&mut orientation, option, option.as_str());
                    }
                });
            if orientation != self.config.orientation {
                self.config.orientation = orientation;
                self.rebuild_slider();
            }

            ui.separator();

            ui.label("Start at:");
            ui.add(
                egui::DragValue::new(&mut self.config.default_offset_pct)
                    .range(0.0..=1.0)
                    .speed(0.01),
            );
            if ui.button("Reset").clicked() {
                self.slider.reset();
            }

            ui.separator();

            ui.label("Before:");
            ui.add(egui::TextEdit::singleline(&mut self.config.before_text).desired_width(80.0));
            ui.label("After:");
            ui.add(egui::TextEdit::singleline(&mut self.config.after_text).desired_width(80.0));

            ui.separator();

            ui.label("Snap time:");
            ui.add(
                egui::DragValue::new(&mut self.config.snap_animation_secs)
                    .range(0.0..=2.0)
                    .speed(0.01)
                    .suffix(" s"),
            );
        });

        ui.horizontal(|ui| {
            ui.label(format!(
                "Position: {:.0}%",
                self.slider.displayed_position() * 100.0
            ));
            ui.separator();
            for (role, slot) in [
                (ImageRole::Before, &self.images.before),
                (ImageRole::After, &self.images.after),
            ] {
                let status = match slot {
                    ImageSlot::Empty => "(none)".to_owned(),
                    ImageSlot::Loading { name, .. } => format!("loading {name}…"),
                    ImageSlot::Ready(image) => {
                        format!("{} ({}x{})", image.name, image.size.x, image.size.y)
                    }
                    ImageSlot::Failed(_) => "(failed)".to_owned(),
                };
                ui.label(format!("{}: {status}", role.label()));
            }
        });
    }
}

impl eframe::App for ComparisonApp {
    /// Called by the framework to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.take_picked_images(ctx);
        self.images.poll(ctx);
        self.slider.reconfigure(&self.config);

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open before image…").clicked() {
                        file_picker::open_image_picker(ImageRole::Before);
                    }
                    if ui.button("Open after image…").clicked() {
                        file_picker::open_image_picker(ImageRole::After);
                    }
                    // NOTE: no File->Quit on web pages!
                    if !cfg!(target_arch = "wasm32") {
                        ui.separator();
                        if ui.button("Quit").clicked() {
                            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    }
                });
                ui.add_space(16.0);

                egui::widgets::global_theme_preference_buttons(ui);
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.settings_ui(ui);
            ui.separator();

            for (role, err) in self.images.errors() {
                ui.colored_label(egui::Color32::RED, format!("{} image: {err}", role.label()));
            }

            if let Some((before, after)) = self.images.ready() {
                ui.vertical_centered(|ui| {
                    ui.add(
                        ComparisonSlider::new(&mut self.slider, before, after)
                            .labels(&self.config.before_text, &self.config.after_text),
                    );
                });
            } else if self.images.is_loading() {
                ui.vertical_centered(|ui| {
                    ui.spinner();
                });
            } else {
                ui.label("Open a before and an after image from the File menu to compare them.");
            }

            ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui| {
                powered_by_egui_and_eframe(ui);
                egui::warn_if_debug_build(ui);
            });
        });
    }
}

fn powered_by_egui_and_eframe(ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        ui.label("Powered by ");
        ui.hyperlink_to("egui", "https://github.com/emilk/egui");
        ui.label(" and ");
        ui.hyperlink_to(
            "eframe",
            "https://github.com/emilk/egui/tree/master/crates/eframe",
        );
        ui.label(".");
    });
}
