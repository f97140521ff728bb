use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Top-level configuration, stored as TOML.
///
/// Every key is optional; missing keys take their defaults so an empty file
/// is a valid config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Folder of notes used by hosts to answer wikilink and embed lookups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes_path: Option<PathBuf>,
    pub preview: PreviewConfig,
}

/// How the live preview classifies and renders constructs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Fence languages rendered as diagrams instead of code.
    pub diagram_languages: Vec<String>,
    /// Embed target extensions rendered as images.
    pub image_extensions: Vec<String>,
    /// Embed target extensions rendered as video players.
    pub video_extensions: Vec<String>,
    /// Embed target extensions rendered in a document viewer.
    pub document_extensions: Vec<String>,
    /// How many levels of note-in-note embeds are expanded.
    pub max_embed_depth: usize,
}

/// What an embed target renders as, decided by its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Document,
    Note,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            diagram_languages: strings(&["mermaid"]),
            image_extensions: strings(&["png", "jpg", "jpeg", "gif", "svg", "webp", "bmp", "avif"]),
            video_extensions: strings(&["mp4", "webm", "mov", "ogv", "mkv"]),
            document_extensions: strings(&["pdf"]),
            max_embed_depth: 3,
        }
    }
}

impl PreviewConfig {
    /// Whether a fence info-string language is rendered as a diagram.
    pub fn is_diagram_language(&self, language: &str) -> bool {
        self.diagram_languages
            .iter()
            .any(|l| l.eq_ignore_ascii_case(language))
    }

    /// Classify an embed target by extension (without the dot).
    ///
    /// Anything not listed, including no extension at all, is a note.
    pub fn media_kind(&self, extension: Option<&str>) -> MediaKind {
        let Some(ext) = extension else {
            return MediaKind::Note;
        };
        let listed = |list: &[String]| list.iter().any(|e| e.eq_ignore_ascii_case(ext));

        if listed(&self.image_extensions) {
            MediaKind::Image
        } else if listed(&self.video_extensions) {
            MediaKind::Video
        } else if listed(&self.document_extensions) {
            MediaKind::Document
        } else {
            MediaKind::Note
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the notes folder
        config.notes_path = config
            .notes_path
            .map(|path| Self::expand_path(&path).unwrap_or(path));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// Write the config as pretty TOML, creating parent directories.
    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/livemark");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
