//! The comparison slider as an egui widget.

use egui::{
    Align2, Color32, FontId, Id, Painter, Pos2, Rect, Response, Sense, Shape, Stroke, Ui, Vec2,
    Widget, pos2, vec2,
};

use crate::controller::SliderController;
use crate::geometry::{Dimensions, Geometry, LabelState};
use crate::images::LoadedImage;
use crate::orientation::{Arrow, Orientation};

/// Half width of the band around the split line that belongs to the grip.
const GRIP_BAND: f32 = 16.0;
const GRIP_RADIUS: f32 = 19.0;
const ARROW_SIZE: f32 = 6.0;
const LINE_WIDTH: f32 = 3.0;
const LABEL_PADDING: Vec2 = vec2(10.0, 6.0);
const LABEL_MARGIN: f32 = 12.0;
const MAX_UPSCALE: f32 = 4.0;

const FULL_UV: Rect = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));

/// Two stacked images split by a draggable handle.
///
/// The before image is shown up to the handle, the after image beyond it.
/// Clicking near either end snaps to that full image.
pub struct ComparisonSlider<'a> {
    controller: &'a mut SliderController,
    before: &'a LoadedImage,
    after: &'a LoadedImage,
    before_text: &'a str,
    after_text: &'a str,
    id_salt: Id,
}

impl<'a> ComparisonSlider<'a> {
    pub fn new(
        controller: &'a mut SliderController,
        before: &'a LoadedImage,
        after: &'a LoadedImage,
    ) -> Self {
        Self {
            controller,
            before,
            after,
            before_text: "Before",
            after_text: "After",
            id_salt: Id::new("comparison_slider"),
        }
    }

    #[inline]
    pub fn labels(mut self, before_text: &'a str, after_text: &'a str) -> Self {
        self.before_text = before_text;
        self.after_text = after_text;
        self
    }

    #[inline]
    pub fn id_salt(mut self, id_salt: impl std::hash::Hash) -> Self {
        self.id_salt = Id::new(id_salt);
        self
    }
}

/// Largest size with the image's aspect ratio that fits `available`.
pub fn fit_size(image_size: Vec2, available: Vec2) -> Vec2 {
    if image_size.x <= 0.0 || image_size.y <= 0.0 {
        return Vec2::ZERO;
    }
    let scale = (available.x / image_size.x)
        .min(available.y / image_size.y)
        .clamp(0.0, MAX_UPSCALE);
    image_size * scale
}

impl Widget for ComparisonSlider<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let Self {
            controller,
            before,
            after,
            before_text,
            after_text,
            id_salt,
        } = self;

        let desired = fit_size(before.size, ui.available_size());
        let (rect, mut response) = ui.allocate_exact_size(desired, Sense::click_and_drag());
        let id = ui.id().with(id_salt);
        let dimensions = Dimensions::from(rect.size());

        controller.tick(ui.input(|i| i.time));

        let strategy = *controller.strategy();
        let handle_offset = controller.displayed_geometry(dimensions).handle.value();
        let near_handle = |pos: Pos2| (strategy.axis_offset(pos, rect.min) - handle_offset).abs() <= GRIP_BAND;

        // press origin is gone by the time a click is reported, so remember it
        let grip_key = id.with("pressed_on_grip");
        if ui.input(|i| i.pointer.any_pressed()) {
            let on_grip = ui.input(|i| i.pointer.press_origin()).is_some_and(near_handle);
            ui.data_mut(|d| d.insert_temp(grip_key, on_grip));
        }
        let pressed_on_grip = ui.data(|d| d.get_temp::<bool>(grip_key)).unwrap_or(false);

        if response.drag_started() && pressed_on_grip {
            controller.begin_drag();
        }
        if response.dragged() && controller.is_dragging() {
            if let Some(pointer) = response.interact_pointer_pos() {
                if controller.on_pointer_move(pointer, rect).is_some() {
                    response.mark_changed();
                }
            }
        }
        if response.drag_stopped() {
            controller.end_drag();
        }
        // the grip sits above the click zones
        if response.clicked() && !pressed_on_grip {
            if let Some(pointer) = response.interact_pointer_pos() {
                if controller.on_zone_click(pointer, rect) {
                    response.mark_changed();
                }
            }
        }

        let over_handle = controller.is_dragging()
            || response.hover_pos().is_some_and(near_handle);
        if over_handle {
            ui.ctx().set_cursor_icon(strategy.cursor());
        }

        if controller.is_animating() {
            ui.ctx().request_repaint();
        }

        let size_key = id.with("last_size");
        let last_size: Option<Vec2> = ui.data(|d| d.get_temp(size_key));
        let resized = last_size.is_some_and(|size| size != rect.size());
        if last_size != Some(rect.size()) {
            ui.data_mut(|d| d.insert_temp(size_key, rect.size()));
        }

        if ui.is_rect_visible(rect) {
            let geometry = if resized {
                controller.on_resize(dimensions)
            } else {
                controller.displayed_geometry(dimensions)
            };
            let painter = ui.painter_at(rect);
            paint_images(&painter, rect, &geometry, before, after);
            paint_handle(&painter, rect, &geometry, strategy.arrows(), over_handle);
            paint_labels(
                &painter,
                rect,
                strategy.orientation(),
                controller.label_state(),
                response.hovered(),
                (before_text, after_text),
            );
        }

        response
    }
}

fn paint_images(
    painter: &Painter,
    rect: Rect,
    geometry: &Geometry,
    before: &LoadedImage,
    after: &LoadedImage,
) {
    painter.image(after.texture.id(), rect, FULL_UV, Color32::WHITE);

    let clip = geometry.clip_at(rect.min).intersect(rect);
    if clip.is_positive() {
        painter
            .with_clip_rect(clip)
            .image(before.texture.id(), rect, FULL_UV, Color32::WHITE);
    }
}

fn paint_handle(
    painter: &Painter,
    rect: Rect,
    geometry: &Geometry,
    arrows: (Arrow, Arrow),
    highlighted: bool,
) {
    let color = if highlighted {
        Color32::WHITE
    } else {
        Color32::from_white_alpha(220)
    };
    let stroke = Stroke::new(LINE_WIDTH, color);
    let center = geometry.handle_center(rect);

    // split line, interrupted by the grip circle
    let [start, end] = geometry.handle_line(rect);
    let along = (end - start).normalized();
    painter.line_segment([start, center - along * GRIP_RADIUS], stroke);
    painter.line_segment([center + along * GRIP_RADIUS, end], stroke);

    painter.circle_filled(center, GRIP_RADIUS, Color32::from_black_alpha(60));
    painter.circle_stroke(center, GRIP_RADIUS, stroke);

    let (before_arrow, after_arrow) = arrows;
    for arrow in [before_arrow, after_arrow] {
        painter.add(arrow_shape(center, arrow, color));
    }
}

fn arrow_shape(center: Pos2, arrow: Arrow, color: Color32) -> Shape {
    let dir = arrow.direction();
    let normal = dir.rot90();
    let tip = center + dir * (ARROW_SIZE * 2.0);
    let base = center + dir * ARROW_SIZE;
    Shape::convex_polygon(
        vec![tip, base + normal * ARROW_SIZE, base - normal * ARROW_SIZE],
        color,
        Stroke::NONE,
    )
}

fn paint_labels(
    painter: &Painter,
    rect: Rect,
    orientation: Orientation,
    state: LabelState,
    hovered: bool,
    (before_text, after_text): (&str, &str),
) {
    let (before_anchor, before_align, after_anchor, after_align) = match orientation {
        Orientation::Horizontal => (
            rect.left_center() + vec2(LABEL_MARGIN, 0.0),
            Align2::LEFT_CENTER,
            rect.right_center() - vec2(LABEL_MARGIN, 0.0),
            Align2::RIGHT_CENTER,
        ),
        Orientation::Vertical => (
            rect.center_top() + vec2(0.0, LABEL_MARGIN),
            Align2::CENTER_TOP,
            rect.center_bottom() - vec2(0.0, LABEL_MARGIN),
            Align2::CENTER_BOTTOM,
        ),
    };

    let chips = [
        (before_text, before_anchor, before_align, state == LabelState::Before),
        (after_text, after_anchor, after_align, state == LabelState::After),
    ];
    for (text, anchor, align, emphasized) in chips {
        if hovered || emphasized {
            paint_chip(painter, text, anchor, align, emphasized);
        }
    }
}

fn paint_chip(painter: &Painter, text: &str, anchor: Pos2, align: Align2, emphasized: bool) {
    if text.is_empty() {
        return;
    }
    let (fill, text_color) = if emphasized {
        (Color32::from_white_alpha(230), Color32::BLACK)
    } else {
        (Color32::from_black_alpha(140), Color32::WHITE)
    };
    let galley = painter.layout_no_wrap(text.to_owned(), FontId::proportional(14.0), text_color);
    let chip = align.anchor_size(anchor, galley.size() + LABEL_PADDING * 2.0);
    painter.rect_filled(chip, 4.0, fill);
    painter.galley(chip.min + LABEL_PADDING, galley, text_color);
}
