use std::path::Path;

use crate::error::LoadError;
use crate::geometry::clamp_position;
use crate::orientation::Orientation;
use crate::transition::DEFAULT_SNAP_SECS;

/// Options recognized when a slider is created.
///
/// Unknown fields are ignored and missing ones fall back to their defaults,
/// so a config file only needs to name what it changes.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct SliderConfig {
    /// Initial position, clamped to `[0, 1]` when used.
    pub default_offset_pct: f32,
    pub orientation: Orientation,
    pub before_text: String,
    pub after_text: String,
    /// Duration of animated snaps, in seconds. Zero disables the animation.
    pub snap_animation_secs: f32,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            default_offset_pct: 0.5,
            orientation: Orientation::Horizontal,
            before_text: "Before".to_owned(),
            after_text: "After".to_owned(),
            snap_animation_secs: DEFAULT_SNAP_SECS,
        }
    }
}

impl SliderConfig {
    /// Parses a JSON object such as `{"orientation": "vertical"}`.
    ///
    /// # Errors
    /// Returns [`LoadError::Config`] when the text is not valid config JSON.
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON config file.
    ///
    /// # Errors
    /// Returns [`LoadError::Io`] if the file cannot be read and
    /// [`LoadError::Config`] if its contents do not parse.
    pub fn from_json_file(path: &Path) -> Result<Self, LoadError> {
        let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn default_position(&self) -> f32 {
        clamp_position(self.default_offset_pct)
    }

    /// Snap duration with negative or NaN values treated as "no animation".
    pub fn snap_secs(&self) -> f32 {
        if self.snap_animation_secs.is_nan() {
            0.0
        } else {
            self.snap_animation_secs.max(0.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_plugin_defaults() {
        let config = SliderConfig::default();
        assert_eq!(config.default_offset_pct, 0.5);
        assert_eq!(config.orientation, Orientation::Horizontal);
        assert_eq!(config.before_text, "Before");
        assert_eq!(config.after_text, "After");
        assert_eq!(config.snap_secs(), DEFAULT_SNAP_SECS);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config =
            SliderConfig::from_json_str(r#"{"orientation": "vertical", "after_text": "Later"}"#)
                .unwrap();
        assert_eq!(config.orientation, Orientation::Vertical);
        assert_eq!(config.after_text, "Later");
        assert_eq!(config.before_text, "Before");
        assert_eq!(config.default_offset_pct, 0.5);
    }

    #[test]
    fn invalid_json_is_a_config_error() {
        let err = SliderConfig::from_json_str(r#"{"orientation": "diagonal"}"#).unwrap_err();
        assert!(matches!(err, LoadError::Config(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = SliderConfig::from_json_file(Path::new("/nonexistent/slider.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("slider.json"));
    }

    #[test]
    fn default_position_is_clamped() {
        let config = SliderConfig {
            default_offset_pct: 3.0,
            ..SliderConfig::default()
        };
        assert_eq!(config.default_position(), 1.0);
    }

    #[test]
    fn negative_snap_duration_disables_animation() {
        let config = SliderConfig {
            snap_animation_secs: -1.0,
            ..SliderConfig::default()
        };
        assert_eq!(config.snap_secs(), 0.0);
    }
}
