//! Persistent application settings stored as `config.json` in the user config folder.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::constants::{
    DEFAULT_DISPLAY_HEIGHT, DEFAULT_DISPLAY_WIDTH, DEFAULT_FPS, DEFAULT_TIMELINE_HEIGHT,
};

const CONFIG_FILE: &str = "config.json";
const CONFIG_TMP_FILE: &str = "config.json.tmp";
const APP_DIR_NAME: &str = "video-annotator";

/// Which annotations a delete request removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteScope {
    /// Only the selected annotation.
    #[default]
    Annotation,
    /// Every annotation sharing the selected annotation's frame.
    Frame,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Width of the frame display box in pixels
    #[serde(default = "default_display_width")]
    pub display_width: u32,
    /// Height of the frame display box in pixels
    #[serde(default = "default_display_height")]
    pub display_height: u32,
    /// Height of the annotation timeline strip in pixels
    #[serde(default = "default_timeline_height")]
    pub timeline_height: u32,
    /// Frame rate used when a video does not report one
    #[serde(default = "default_fallback_fps")]
    pub fallback_fps: u32,
    #[serde(default)]
    pub delete_scope: DeleteScope,
    #[serde(default)]
    pub last_video_dir: Option<PathBuf>,
    #[serde(default)]
    pub last_annotation_dir: Option<PathBuf>,
}

fn default_display_width() -> u32 {
    DEFAULT_DISPLAY_WIDTH
}

fn default_display_height() -> u32 {
    DEFAULT_DISPLAY_HEIGHT
}

fn default_timeline_height() -> u32 {
    DEFAULT_TIMELINE_HEIGHT
}

fn default_fallback_fps() -> u32 {
    DEFAULT_FPS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            display_width: default_display_width(),
            display_height: default_display_height(),
            timeline_height: default_timeline_height(),
            fallback_fps: default_fallback_fps(),
            delete_scope: DeleteScope::default(),
            last_video_dir: None,
            last_annotation_dir: None,
        }
    }
}

impl AppConfig {
    /// Load the config from `folder`, returning defaults if none was saved yet.
    pub fn load(folder: &Path) -> io::Result<Self> {
        let path = folder.join(CONFIG_FILE);
        let tmp_path = folder.join(CONFIG_TMP_FILE);
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                match fs::read_to_string(&tmp_path) {
                    Ok(json) => json,
                    Err(_) => return Ok(Self::default()),
                }
            }
            Err(err) => return Err(err),
        };
        match serde_json::from_str::<Self>(&json) {
            Ok(config) => Ok(config.sanitized()),
            Err(err) => {
                let tmp_json = fs::read_to_string(&tmp_path)
                    .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, err))?;
                let config: Self = serde_json::from_str(&tmp_json)
                    .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
                Ok(config.sanitized())
            }
        }
    }

    /// Save through a temp file so a crash never leaves a truncated config.
    pub fn save(&self, folder: &Path) -> io::Result<()> {
        fs::create_dir_all(folder)?;
        let json = serde_json::to_string_pretty(self)
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
        let path = folder.join(CONFIG_FILE);
        let tmp_path = folder.join(CONFIG_TMP_FILE);
        fs::write(&tmp_path, json)?;
        if path.exists() {
            let _ = fs::remove_file(&path);
        }
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    /// Replace zero sizes and rates with defaults.
    pub(crate) fn sanitized(mut self) -> Self {
        if self.display_width == 0 {
            self.display_width = DEFAULT_DISPLAY_WIDTH;
        }
        if self.display_height == 0 {
            self.display_height = DEFAULT_DISPLAY_HEIGHT;
        }
        if self.timeline_height == 0 {
            self.timeline_height = DEFAULT_TIMELINE_HEIGHT;
        }
        if self.fallback_fps == 0 {
            self.fallback_fps = DEFAULT_FPS;
        }
        self
    }
}

/// Folder holding `config.json`.
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("VIDEO_ANNOTATOR_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    let base = std::env::var("APPDATA")
        .or_else(|_| std::env::var("XDG_CONFIG_HOME"))
        .map(PathBuf::from)
        .or_else(|_| std::env::var("HOME").map(|home| PathBuf::from(home).join(".config")))
        .unwrap_or_else(|_| std::env::temp_dir());
    base.join(APP_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(dir.path()).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.display_width, 640);
        assert_eq!(config.delete_scope, DeleteScope::Annotation);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.delete_scope = DeleteScope::Frame;
        config.last_video_dir = Some(PathBuf::from("/videos"));
        config.save(dir.path()).unwrap();

        let loaded = AppConfig::load(dir.path()).unwrap();
        assert_eq!(loaded, config);
        assert!(!dir.path().join(CONFIG_TMP_FILE).exists());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{ "delete_scope": "frame", "fallback_fps": 0 }"#,
        )
        .unwrap();
        let config = AppConfig::load(dir.path()).unwrap();
        assert_eq!(config.delete_scope, DeleteScope::Frame);
        assert_eq!(config.fallback_fps, 30);
        assert_eq!(config.timeline_height, 60);
    }

    #[test]
    fn test_corrupt_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "{ not json").unwrap();
        let err = AppConfig::load(dir.path()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
