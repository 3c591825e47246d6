//! State and input handling of one comparison slider.
//!
//! The controller owns the position and the derived label state. It never
//! touches egui directly: the widget feeds it pointer positions, container
//! rects and the frame clock, and paints whatever geometry it hands back.

use egui::{Pos2, Rect};

use crate::config::SliderConfig;
use crate::geometry::{Dimensions, Geometry, LabelState, clamp_position};
use crate::orientation::{AxisStrategy, Orientation};
use crate::transition::Transition;
use crate::zone::Zone;

#[derive(Clone, Debug)]
pub struct SliderController {
    position: f32,
    default_position: f32,
    strategy: AxisStrategy,
    label_state: LabelState,
    dragging: bool,
    transition: Option<Transition>,
    snap_secs: f32,
    now: f64,
}

impl Default for SliderController {
    fn default() -> Self {
        Self::new(&SliderConfig::default())
    }
}

impl SliderController {
    pub fn new(config: &SliderConfig) -> Self {
        let position = config.default_position();
        Self {
            position,
            default_position: position,
            strategy: config.orientation.strategy(),
            label_state: LabelState::from_position(position),
            dragging: false,
            transition: None,
            snap_secs: config.snap_secs(),
            now: 0.0,
        }
    }

    /// Builds a controller and renders its initial geometry for `dimensions`.
    pub fn initialize(config: &SliderConfig, dimensions: Dimensions) -> (Self, Geometry) {
        let controller = Self::new(config);
        let geometry = controller.geometry(dimensions);
        log::debug!(
            "slider initialized: {} at {:.3}",
            controller.orientation(),
            controller.position
        );
        (controller, geometry)
    }

    /// Picks up a new snap duration and default offset. Orientation is fixed
    /// for the controller's lifetime and is not read here.
    pub fn reconfigure(&mut self, config: &SliderConfig) {
        self.default_position = config.default_position();
        self.snap_secs = config.snap_secs();
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn orientation(&self) -> Orientation {
        self.strategy.orientation()
    }

    pub fn strategy(&self) -> &AxisStrategy {
        &self.strategy
    }

    pub fn label_state(&self) -> LabelState {
        self.label_state
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Advances the controller clock to `now` (seconds) and retires a
    /// finished transition.
    pub fn tick(&mut self, now: f64) {
        self.now = now;
        if self.transition.is_some_and(|t| t.is_finished(now)) {
            self.transition = None;
        }
    }

    /// Position currently on screen: the stored position, or the
    /// in-flight value of an animated snap.
    pub fn displayed_position(&self) -> f32 {
        self.transition
            .map_or(self.position, |t| t.value_at(self.now))
    }

    /// Clamps and stores `pct`, updating the label state. With `animate` the
    /// displayed position eases from where it is now to the new value.
    pub fn set_position(&mut self, pct: f32, animate: bool) {
        let target = clamp_position(pct);
        let shown = self.displayed_position();

        self.transition = if animate && self.snap_secs > 0.0 && shown != target {
            Some(Transition::new(shown, target, self.now, self.snap_secs))
        } else {
            None
        };
        self.position = target;
        self.label_state = LabelState::from_position(target);
    }

    /// Geometry at the stored position.
    pub fn geometry(&self, dimensions: Dimensions) -> Geometry {
        self.strategy.geometry(self.position, dimensions)
    }

    /// Geometry at the displayed position, which lags the stored one while
    /// a snap is animating.
    pub fn displayed_geometry(&self, dimensions: Dimensions) -> Geometry {
        self.strategy.geometry(self.displayed_position(), dimensions)
    }

    pub fn begin_drag(&mut self) {
        self.dragging = true;
        log::debug!("slider drag started at {:.3}", self.position);
    }

    pub fn end_drag(&mut self) {
        if self.dragging {
            log::debug!("slider drag ended at {:.3}", self.position);
        }
        self.dragging = false;
    }

    /// Moves the split under `pointer` while a drag is active.
    ///
    /// Returns the new position, or `None` when no drag is active or the
    /// container has no extent along the active axis.
    pub fn on_pointer_move(&mut self, pointer: Pos2, container: Rect) -> Option<f32> {
        if !self.dragging {
            return None;
        }
        let extent = self.strategy.axis_length(container.size());
        if extent <= 0.0 {
            return None;
        }
        let pct = self.strategy.axis_offset(pointer, container.min) / extent;
        self.set_position(pct, false);
        Some(self.position)
    }

    /// Snaps to a full image when a click lands in one of the end zones.
    ///
    /// Returns `true` if the click started a snap.
    pub fn on_zone_click(&mut self, pointer: Pos2, container: Rect) -> bool {
        let offset = self.strategy.axis_offset(pointer, container.min);
        let length = self.strategy.axis_length(container.size());
        let zone = Zone::classify(offset, length);

        let Some(target) = zone.snap_target() else {
            return false;
        };
        if zone.satisfied_by() == Some(self.label_state) {
            return false;
        }
        log::debug!("snapping to {zone:?} image");
        self.set_position(target, true);
        true
    }

    /// Recomputes geometry for a container whose size changed. The stored
    /// position is left as is.
    pub fn on_resize(&self, dimensions: Dimensions) -> Geometry {
        log::debug!(
            "slider resized to {:.0}x{:.0}",
            dimensions.width,
            dimensions.height
        );
        self.displayed_geometry(dimensions)
    }

    /// Animates back to the configured starting position.
    pub fn reset(&mut self) {
        self.set_position(self.default_position, true);
    }
}
