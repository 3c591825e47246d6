//! Pure geometry of the comparison split.
//!
//! Everything here is a function of `(position, orientation, dimensions)`;
//! nothing is cached between calls.

use egui::{Pos2, Rect, Vec2, pos2};

/// Clamps a requested position into `[0, 1]`. NaN maps to `0.0`.
pub fn clamp_position(position: f32) -> f32 {
    if position.is_nan() {
        0.0
    } else {
        position.clamp(0.0, 1.0)
    }
}

/// Rendered size of the before image, in points.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
}

impl Dimensions {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

impl From<Vec2> for Dimensions {
    fn from(size: Vec2) -> Self {
        Self::new(size.x, size.y)
    }
}

/// Where the handle sits, measured from the container's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HandleOffset {
    Left(f32),
    Top(f32),
}

impl HandleOffset {
    pub fn value(self) -> f32 {
        match self {
            Self::Left(v) | Self::Top(v) => v,
        }
    }
}

/// Clip rectangle of the before image plus the handle placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    /// Visible part of the before image, relative to the container origin.
    pub clip: Rect,
    pub handle: HandleOffset,
}

impl Geometry {
    pub fn horizontal(position: f32, dimensions: Dimensions) -> Self {
        let cw = position * dimensions.width;
        Self {
            clip: Rect::from_min_max(Pos2::ZERO, pos2(cw, dimensions.height)),
            handle: HandleOffset::Left(cw),
        }
    }

    pub fn vertical(position: f32, dimensions: Dimensions) -> Self {
        let ch = position * dimensions.height;
        Self {
            clip: Rect::from_min_max(Pos2::ZERO, pos2(dimensions.width, ch)),
            handle: HandleOffset::Top(ch),
        }
    }

    /// The clip as `[left, top, right, bottom]`.
    pub fn clip_edges(&self) -> [f32; 4] {
        [self.clip.min.x, self.clip.min.y, self.clip.max.x, self.clip.max.y]
    }

    /// Clip rectangle placed in screen space for a container at `origin`.
    pub fn clip_at(&self, origin: Pos2) -> Rect {
        self.clip.translate(origin.to_vec2())
    }

    /// End points of the split line across `container`.
    pub fn handle_line(&self, container: Rect) -> [Pos2; 2] {
        match self.handle {
            HandleOffset::Left(x) => {
                let x = container.left() + x;
                [pos2(x, container.top()), pos2(x, container.bottom())]
            }
            HandleOffset::Top(y) => {
                let y = container.top() + y;
                [pos2(container.left(), y), pos2(container.right(), y)]
            }
        }
    }

    /// Midpoint of the split line, where the grip is drawn.
    pub fn handle_center(&self, container: Rect) -> Pos2 {
        let [a, b] = self.handle_line(container);
        a.lerp(b, 0.5)
    }
}

/// Which label the overlay emphasizes, derived from the position alone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LabelState {
    /// Position is exactly `1.0`: the whole before image is shown.
    Before,

    /// Position is exactly `0.0`: the whole after image is shown.
    After,

    #[default]
    Neutral,
}

impl LabelState {
    pub fn from_position(position: f32) -> Self {
        if position == 0.0 {
            Self::After
        } else if position == 1.0 {
            Self::Before
        } else {
            Self::Neutral
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    fn approx_edges(actual: [f32; 4], expected: [f32; 4]) -> bool {
        actual.iter().zip(expected).all(|(a, b)| approx(*a, b))
    }

    #[test]
    fn clamps_out_of_range_positions() {
        assert_eq!(clamp_position(-0.5), 0.0);
        assert_eq!(clamp_position(1.7), 1.0);
        assert_eq!(clamp_position(0.25), 0.25);
        assert_eq!(clamp_position(f32::NAN), 0.0);
        assert_eq!(clamp_position(f32::INFINITY), 1.0);
        assert_eq!(clamp_position(f32::NEG_INFINITY), 0.0);
    }

    #[test]
    fn horizontal_geometry_clips_width() {
        let geometry = Geometry::horizontal(0.3, Dimensions::new(1000.0, 500.0));
        assert!(approx_edges(geometry.clip_edges(), [0.0, 0.0, 300.0, 500.0]));
        assert!(matches!(geometry.handle, HandleOffset::Left(_)));
        assert!(approx(geometry.handle.value(), 300.0));
    }

    #[test]
    fn vertical_geometry_clips_height() {
        let geometry = Geometry::vertical(0.3, Dimensions::new(1000.0, 500.0));
        assert!(approx_edges(geometry.clip_edges(), [0.0, 0.0, 1000.0, 150.0]));
        assert!(matches!(geometry.handle, HandleOffset::Top(_)));
        assert!(approx(geometry.handle.value(), 150.0));
    }

    #[test]
    fn geometry_is_deterministic() {
        let dims = Dimensions::new(640.0, 480.0);
        assert_eq!(Geometry::horizontal(0.42, dims), Geometry::horizontal(0.42, dims));
        assert_eq!(Geometry::vertical(0.42, dims), Geometry::vertical(0.42, dims));
    }

    #[test]
    fn extremes_cover_nothing_or_everything() {
        let dims = Dimensions::new(200.0, 100.0);
        assert_eq!(Geometry::horizontal(0.0, dims).clip.width(), 0.0);
        assert_eq!(Geometry::horizontal(1.0, dims).clip, Rect::from_min_size(Pos2::ZERO, dims.to_vec2()));
        assert_eq!(Geometry::vertical(0.0, dims).clip.height(), 0.0);
        assert_eq!(Geometry::vertical(1.0, dims).clip, Rect::from_min_size(Pos2::ZERO, dims.to_vec2()));
    }

    #[test]
    fn handle_line_spans_container() {
        let container = Rect::from_min_size(pos2(10.0, 20.0), Vec2::new(100.0, 50.0));
        let dims = Dimensions::from(container.size());

        let [top, bottom] = Geometry::horizontal(0.5, dims).handle_line(container);
        assert_eq!(top, pos2(60.0, 20.0));
        assert_eq!(bottom, pos2(60.0, 70.0));

        let [left, right] = Geometry::vertical(0.5, dims).handle_line(container);
        assert_eq!(left, pos2(10.0, 45.0));
        assert_eq!(right, pos2(110.0, 45.0));
        assert_eq!(Geometry::vertical(0.5, dims).handle_center(container), pos2(60.0, 45.0));
    }

    #[test]
    fn clip_follows_container_origin() {
        let geometry = Geometry::horizontal(0.5, Dimensions::new(100.0, 40.0));
        let placed = geometry.clip_at(pos2(5.0, 7.0));
        assert_eq!(placed, Rect::from_min_max(pos2(5.0, 7.0), pos2(55.0, 47.0)));
    }

    #[test]
    fn label_state_only_emphasizes_extremes() {
        assert_eq!(LabelState::from_position(0.0), LabelState::After);
        assert_eq!(LabelState::from_position(1.0), LabelState::Before);
        assert_eq!(LabelState::from_position(0.5), LabelState::Neutral);
        assert_eq!(LabelState::from_position(0.999), LabelState::Neutral);
    }
}
