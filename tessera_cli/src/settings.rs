// Run settings file: the grid config plus an optional knob bank.
//
// The grid fields sit at the top level, so a plain `GridConfig` file is also
// a valid settings file. `"knobs"` replaces the default bank when present.
//
//   { "tiles_x": 6, "method": "Wave", "knobs": [ { "label": "Colors", ... } ] }

use serde::{Deserialize, Serialize};
use std::path::Path;

use tessera_grid::{ConfigError, GridConfig};
use tessera_push::KnobConfig;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(flatten)]
    pub grid: GridConfig,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub knobs: Vec<KnobConfig>,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let settings = Self::from_json(&text)?;
        tracing::info!(
            path = %path.display(),
            knobs = settings.knobs.len(),
            "loaded settings"
        );
        Ok(settings)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.grid.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_grid::GridMethod;

    #[test]
    fn grid_fields_at_top_level() {
        let s = Settings::from_json(r#"{ "tiles_x": 4, "method": "Wave" }"#).unwrap();
        assert_eq!(s.grid.tiles_x, 4);
        assert_eq!(s.grid.method, GridMethod::Wave);
        assert_eq!(s.grid.tiles_y, GridConfig::default().tiles_y);
        assert!(s.knobs.is_empty());
    }

    #[test]
    fn knob_list_is_read() {
        let s = Settings::from_json(
            r#"{ "knobs": [ { "label": "Speed", "min": 0, "max": 5 }, {} ] }"#,
        )
        .unwrap();
        assert_eq!(s.knobs.len(), 2);
        assert_eq!(s.knobs[0].label, "Speed");
        assert_eq!(s.knobs[0].max, 5.0);
        assert_eq!(s.knobs[1], KnobConfig::default());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Settings::load(Path::new("/nonexistent/tessera.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/tessera.json"));
    }

    #[test]
    fn invalid_grid_is_rejected() {
        assert!(matches!(
            Settings::from_json(r#"{ "tiles_x": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
    }
}
