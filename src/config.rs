/// Startup configuration
///
/// Values come from the command line first, then from an optional TOML file
/// (`~/.config/declutter/config.toml` on Linux), then from defaults.

use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DeclutterError, Result};
use crate::preview::DEFAULT_MAX_EDGE;
use crate::state::KeyMode;

/// Target directory used when nothing else is configured
pub const DEFAULT_TARGET: &str = "kept";

#[derive(Parser, Debug, Default)]
#[command(
    name = "declutter",
    version,
    about = "Page through a folder of photos and keep the good ones",
    long_about = "Right/Left move between images, Down copies the current image into the \
                  target directory, Up removes that copy again."
)]
pub struct Cli {
    /// Folder to page through (asks with a folder picker when omitted)
    pub source: Option<PathBuf>,

    /// Folder that receives kept copies [default: ./kept]
    #[arg(short, long)]
    pub target: Option<PathBuf>,

    /// How kept copies are named
    #[arg(long, value_enum)]
    pub key_mode: Option<KeyMode>,

    /// Longest edge of the on-screen preview, in pixels
    #[arg(long, value_name = "PX")]
    pub preview_size: Option<u32>,

    /// Config file to read instead of the default location
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Debug logging (RUST_LOG still wins when set)
    #[arg(long)]
    pub debug: bool,
}

/// Contents of config.toml. Every key is optional.
#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub source: Option<PathBuf>,
    pub target: Option<PathBuf>,
    pub key_mode: Option<KeyMode>,
    pub preview_max_edge: Option<u32>,
}

impl FileConfig {
    /// Default config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("declutter").join("config.toml"))
    }

    /// Read and parse a config file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| DeclutterError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| DeclutterError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The file named on the command line, or the default one if it exists
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => {
                tracing::debug!("Using config file: {}", path.display());
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }
}

/// Fully resolved settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// None means "ask the user"
    pub source: Option<PathBuf>,
    pub target: PathBuf,
    pub key_mode: KeyMode,
    pub preview_max_edge: u32,
}

impl Settings {
    /// Merge command line over file config over defaults
    pub fn resolve(cli: &Cli, file: FileConfig) -> Self {
        Settings {
            source: cli.source.clone().or(file.source),
            target: cli
                .target
                .clone()
                .or(file.target)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TARGET)),
            key_mode: cli.key_mode.or(file.key_mode).unwrap_or_default(),
            preview_max_edge: cli
                .preview_size
                .or(file.preview_max_edge)
                .unwrap_or(DEFAULT_MAX_EDGE)
                .max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::resolve(&Cli::default(), FileConfig::default());

        assert_eq!(settings.source, None);
        assert_eq!(settings.target, PathBuf::from("kept"));
        assert_eq!(settings.key_mode, KeyMode::Basename);
        assert_eq!(settings.preview_max_edge, DEFAULT_MAX_EDGE);
    }

    #[test]
    fn test_cli_overrides_file() {
        let cli = Cli::parse_from([
            "declutter",
            "/photos",
            "--target",
            "/picked",
            "--key-mode",
            "relative-path",
        ]);
        let file = FileConfig {
            source: Some(PathBuf::from("/from-file")),
            target: Some(PathBuf::from("/file-target")),
            key_mode: Some(KeyMode::Basename),
            preview_max_edge: Some(800),
        };

        let settings = Settings::resolve(&cli, file);

        assert_eq!(settings.source, Some(PathBuf::from("/photos")));
        assert_eq!(settings.target, PathBuf::from("/picked"));
        assert_eq!(settings.key_mode, KeyMode::RelativePath);
        assert_eq!(settings.preview_max_edge, 800);
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "source = \"/photos\"\nkey_mode = \"relative-path\"\npreview_max_edge = 1024\n",
        )
        .unwrap();

        let file = FileConfig::load(&path).unwrap();

        assert_eq!(file.source, Some(PathBuf::from("/photos")));
        assert_eq!(file.target, None);
        assert_eq!(file.key_mode, Some(KeyMode::RelativePath));
        assert_eq!(file.preview_max_edge, Some(1024));
    }

    #[test]
    fn test_bad_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "key_mode = \"sideways\"\n").unwrap();

        let err = FileConfig::load(&path).unwrap_err();
        assert!(matches!(err, DeclutterError::ConfigParse { .. }));
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let err = FileConfig::discover(Some(&missing)).unwrap_err();
        assert!(matches!(err, DeclutterError::ConfigRead { .. }));
    }
}
