//! Split orientation and the per-axis strategy chosen from it.
//!
//! Every orientation-dependent decision of the slider goes through an
//! [`AxisStrategy`], picked once when a controller is built, so the rest of
//! the crate never branches on [`Orientation`] again.

use std::fmt;
use std::str::FromStr;

use egui::{CursorIcon, Pos2, Vec2};

use crate::geometry::{Dimensions, Geometry};

/// Axis along which the two images are split.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Before image on the left, after image on the right.
    #[default]
    Horizontal,

    /// Before image on top, after image below.
    Vertical,
}

impl Orientation {
    pub const ALL: [Self; 2] = [Self::Horizontal, Self::Vertical];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }

    pub fn strategy(self) -> AxisStrategy {
        match self {
            Self::Horizontal => AxisStrategy {
                orientation: self,
                axis_length: |size| size.x,
                axis_component: |offset| offset.x,
                geometry: Geometry::horizontal,
                arrows: (Arrow::Left, Arrow::Right),
                cursor: CursorIcon::ResizeHorizontal,
            },
            Self::Vertical => AxisStrategy {
                orientation: self,
                axis_length: |size| size.y,
                axis_component: |offset| offset.y,
                geometry: Geometry::vertical,
                arrows: (Arrow::Down, Arrow::Up),
                cursor: CursorIcon::ResizeVertical,
            },
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" => Ok(Self::Horizontal),
            "vertical" => Ok(Self::Vertical),
            other => Err(format!("unknown orientation '{other}', expected horizontal or vertical")),
        }
    }
}

/// Direction of one of the two indicator arrows painted on the handle grip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arrow {
    Left,
    Right,
    Up,
    Down,
}

impl Arrow {
    /// Unit vector the arrow points along, in screen coordinates (y down).
    pub fn direction(self) -> Vec2 {
        match self {
            Self::Left => Vec2::new(-1.0, 0.0),
            Self::Right => Vec2::new(1.0, 0.0),
            Self::Up => Vec2::new(0.0, -1.0),
            Self::Down => Vec2::new(0.0, 1.0),
        }
    }
}

/// Orientation-specific pure functions used by the controller and widget.
#[derive(Clone, Copy, Debug)]
pub struct AxisStrategy {
    orientation: Orientation,
    axis_length: fn(Vec2) -> f32,
    axis_component: fn(Vec2) -> f32,
    geometry: fn(f32, Dimensions) -> Geometry,
    arrows: (Arrow, Arrow),
    cursor: CursorIcon,
}

impl AxisStrategy {
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Extent of `size` along the active axis.
    pub fn axis_length(&self, size: Vec2) -> f32 {
        (self.axis_length)(size)
    }

    /// Distance of `pointer` from `origin` along the active axis.
    pub fn axis_offset(&self, pointer: Pos2, origin: Pos2) -> f32 {
        (self.axis_component)(pointer - origin)
    }

    pub fn geometry(&self, position: f32, dimensions: Dimensions) -> Geometry {
        (self.geometry)(position, dimensions)
    }

    /// The (before, after) arrow pair drawn on the handle.
    pub fn arrows(&self) -> (Arrow, Arrow) {
        self.arrows
    }

    pub fn cursor(&self) -> CursorIcon {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_orientation_names() {
        assert_eq!("horizontal".parse::<Orientation>(), Ok(Orientation::Horizontal));
        assert_eq!(" Vertical ".parse::<Orientation>(), Ok(Orientation::Vertical));
        assert!("diagonal".parse::<Orientation>().is_err());
    }

    #[test]
    fn display_matches_config_spelling() {
        for orientation in Orientation::ALL {
            assert_eq!(orientation.to_string().parse::<Orientation>(), Ok(orientation));
        }
    }

    #[test]
    fn horizontal_strategy_reads_x_axis() {
        let strategy = Orientation::Horizontal.strategy();
        assert_eq!(strategy.axis_length(Vec2::new(800.0, 600.0)), 800.0);
        assert_eq!(
            strategy.axis_offset(Pos2::new(150.0, 90.0), Pos2::new(50.0, 40.0)),
            100.0
        );
        assert_eq!(strategy.arrows(), (Arrow::Left, Arrow::Right));
    }

    #[test]
    fn vertical_strategy_reads_y_axis() {
        let strategy = Orientation::Vertical.strategy();
        assert_eq!(strategy.axis_length(Vec2::new(800.0, 600.0)), 600.0);
        assert_eq!(
            strategy.axis_offset(Pos2::new(150.0, 90.0), Pos2::new(50.0, 40.0)),
            50.0
        );
        assert_eq!(strategy.arrows(), (Arrow::Down, Arrow::Up));
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Orientation::Vertical).unwrap();
        assert_eq!(json, "\"vertical\"");
        let parsed: Orientation = serde_json::from_str("\"horizontal\"").unwrap();
        assert_eq!(parsed, Orientation::Horizontal);
    }
}
