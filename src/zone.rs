//! Click zones of the overlay.

use crate::geometry::LabelState;

/// Share of the axis length, at each end, that snaps to a full image.
pub const HIT_FRACTION: f32 = 0.35;

/// Region of the comparison area a click landed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Zone {
    /// Leading part of the axis: reveals the whole before image.
    Before,
    Neutral,
    /// Trailing part of the axis: reveals the whole after image.
    After,
}

impl Zone {
    /// Classifies `offset`, measured from the leading edge, on an axis of `length`.
    pub fn classify(offset: f32, length: f32) -> Self {
        let hit = length * HIT_FRACTION;
        if offset < hit {
            Self::Before
        } else if length - hit < offset {
            Self::After
        } else {
            Self::Neutral
        }
    }

    /// Position a click in this zone snaps to, if any.
    pub fn snap_target(self) -> Option<f32> {
        match self {
            Self::Before => Some(1.0),
            Self::After => Some(0.0),
            Self::Neutral => None,
        }
    }

    /// Label state that is already satisfied by this zone's snap.
    pub fn satisfied_by(self) -> Option<LabelState> {
        match self {
            Self::Before => Some(LabelState::Before),
            Self::After => Some(LabelState::After),
            Self::Neutral => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_thousand_point_axis() {
        assert_eq!(Zone::classify(200.0, 1000.0), Zone::Before);
        assert_eq!(Zone::classify(500.0, 1000.0), Zone::Neutral);
        assert_eq!(Zone::classify(900.0, 1000.0), Zone::After);
    }

    #[test]
    fn zone_boundaries_belong_to_neutral() {
        assert_eq!(Zone::classify(349.9, 1000.0), Zone::Before);
        assert_eq!(Zone::classify(350.0, 1000.0), Zone::Neutral);
        assert_eq!(Zone::classify(650.0, 1000.0), Zone::Neutral);
        assert_eq!(Zone::classify(650.1, 1000.0), Zone::After);
    }

    #[test]
    fn neutral_zone_has_no_target() {
        assert_eq!(Zone::Neutral.snap_target(), None);
        assert_eq!(Zone::Before.snap_target(), Some(1.0));
        assert_eq!(Zone::After.snap_target(), Some(0.0));
    }

    #[test]
    fn empty_axis_classifies_as_neutral() {
        assert_eq!(Zone::classify(0.0, 0.0), Zone::Neutral);
    }
}
