//! Runtime settings for the demo driver, read from a JSON file.
//!
//! Every field is optional in the file; missing ones take the defaults below.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::MapError;
use crate::factory::SpawnDefaults;
use crate::loader::source::DocumentSource;

/// Settings for the demo window, map and actors.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Window caption.
    pub window_title: String,
    /// Window width in pixels.
    pub window_width: i32,
    /// Window height in pixels.
    pub window_height: i32,
    /// Locator of the map document.
    pub map: String,
    /// Frame interval for actors that do not set `animspeed`.
    pub anim_speed_ms: u64,
    /// Player speed in pixels per tick for actors without `movespeed`.
    pub move_speed: f32,
    /// Camera pixels per tick while a scroll key is held.
    pub scroll_speed: f32,
    /// Outline object records on top of the map.
    pub debug_objects: bool,
    /// Sprite images registered before the map loads, name to locator.
    pub images: BTreeMap<String, String>,
    /// Optional button drawn over the map.
    pub button: Option<ButtonConfig>,
}

/// A clickable three-frame image drawn in screen space.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ButtonConfig {
    /// Registered under this locator.
    pub image: String,
    /// Screen x of the top-left corner.
    pub x: f32,
    /// Screen y of the top-left corner.
    pub y: f32,
    /// Width of a frame.
    pub width: f32,
    /// Height of a frame.
    pub height: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            window_title: "walkabout".to_owned(),
            window_width: 800,
            window_height: 600,
            map: "assets/map.json".to_owned(),
            anim_speed_ms: 133,
            move_speed: 1.4,
            scroll_speed: 4.0,
            debug_objects: false,
            images: BTreeMap::new(),
            button: None,
        }
    }
}

impl EngineConfig {
    /// Speeds for actors that leave them out.
    pub fn spawn_defaults(&self) -> SpawnDefaults {
        SpawnDefaults {
            anim_speed_ms: self.anim_speed_ms,
            move_speed: self.move_speed,
        }
    }

    /// Parses `text`; `locator` only labels errors.
    pub fn from_json_str(locator: &str, text: &str) -> Result<Self, MapError> {
        serde_json::from_str(text).map_err(|source| MapError::Json {
            locator: locator.to_owned(),
            source,
        })
    }

    /// Fetches and parses the config at `locator`.
    pub fn load(source: &impl DocumentSource, locator: &str) -> Result<Self, MapError> {
        let text = source.fetch_text(locator)?;
        let config = Self::from_json_str(locator, &text)?;
        log::info!("loaded config {}", locator);
        Ok(config)
    }

    /// Like [`EngineConfig::load`], but a missing file means defaults.
    /// Malformed files are still errors.
    pub fn load_or_default(source: &impl DocumentSource, locator: &str) -> Result<Self, MapError> {
        match Self::load(source, locator) {
            Err(MapError::Io { source: err, .. }) if err.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("no config at {}, using defaults", locator);
                Ok(Self::default())
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::loader::source::{FileSource, MemorySource};

    #[test]
    fn missing_fields_take_defaults() {
        let cfg = EngineConfig::from_json_str("cfg.json", r#"{"map":"levels/one.json","scroll_speed":8}"#)
            .unwrap();
        assert_eq!(cfg.map, "levels/one.json");
        assert_eq!(cfg.scroll_speed, 8.0);
        assert_eq!(cfg.anim_speed_ms, 133);
        assert_eq!(cfg.window_width, 800);
        assert!(cfg.button.is_none());
        assert!(cfg.images.is_empty());
    }

    #[test]
    fn image_manifest_keeps_names() {
        let cfg = EngineConfig::from_json_str(
            "cfg.json",
            r#"{"images":{"hero":"assets/hero.png","slime":"assets/slime.png"}}"#,
        )
        .unwrap();
        assert_eq!(cfg.images.get("hero").map(String::as_str), Some("assets/hero.png"));
        assert_eq!(cfg.images.len(), 2);
    }

    #[test]
    fn button_section_is_read() {
        let cfg = EngineConfig::from_json_str(
            "cfg.json",
            r#"{"button":{"image":"ui/start.png","x":10,"y":20,"width":64,"height":24}}"#,
        )
        .unwrap();
        let button = cfg.button.unwrap();
        assert_eq!((button.image.as_str(), button.width), ("ui/start.png", 64.0));
    }

    #[test]
    fn malformed_config_is_parse_error() {
        let src = MemorySource::new().with("cfg.json", r#"{"window_width":"wide"}"#);
        assert_eq!(EngineConfig::load(&src, "cfg.json").unwrap_err().kind(), ErrorKind::Parse);
        assert!(EngineConfig::load_or_default(&src, "cfg.json").is_err());
    }

    #[test]
    fn absent_file_falls_back_to_defaults() {
        let src = FileSource::new(std::env::temp_dir());
        let cfg = EngineConfig::load_or_default(&src, "walkabout_no_such_config.json").unwrap();
        assert_eq!(cfg, EngineConfig::default());
    }

    #[test]
    fn reads_config_from_disk() {
        let dir = std::env::temp_dir().join("walkabout_config_test");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("engine.json"), r#"{"window_title":"level one","debug_objects":true}"#)
            .unwrap();

        let cfg = EngineConfig::load(&FileSource::new(&dir), "engine.json").unwrap();
        assert_eq!(cfg.window_title, "level one");
        assert!(cfg.debug_objects);
    }
}
