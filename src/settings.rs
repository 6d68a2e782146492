use crate::anchor::DEFAULT_DARKNESS_THRESHOLD;
use crate::error::{Error, Result};
use crate::record::Rect;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Target-frame policy: a fixed calibration for the blank face and
/// proportional estimates for every other face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramePolicy {
    pub blank_frame: Rect,
    pub x_ratio: f64,
    pub y_ratio: f64,
    pub width_ratio: f64,
    pub height_ratio: f64,
}

impl Default for FramePolicy {
    fn default() -> Self {
        Self {
            blank_frame: Rect {
                x: 110,
                y: 80,
                width: 110,
                height: 105,
            },
            x_ratio: 0.35,
            y_ratio: 0.31,
            width_ratio: 0.35,
            height_ratio: 0.41,
        }
    }
}

/// File naming convention for the faces directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingScheme {
    pub prefix: String,
    pub extension: String,
    pub blank_marker: String,
}

impl Default for NamingScheme {
    fn default() -> Self {
        Self {
            prefix: "facecam-".to_string(),
            extension: ".png".to_string(),
            blank_marker: "-blank".to_string(),
        }
    }
}

impl NamingScheme {
    pub fn matches(&self, filename: &str) -> bool {
        filename.starts_with(&self.prefix)
            && filename.ends_with(&self.extension)
            && !filename.contains(&self.blank_marker)
    }

    /// The part of `filename` between the prefix and the extension.
    pub fn suffix<'a>(&self, filename: &'a str) -> &'a str {
        let rest = filename.strip_prefix(&self.prefix).unwrap_or(filename);
        rest.strip_suffix(&self.extension).unwrap_or(rest)
    }
}

/// Everything a run needs. The four serialized fields are the options
/// accepted in a settings file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorSettings {
    pub faces_dir: PathBuf,
    pub blank_path: PathBuf,
    pub darkness_threshold: u8,
    pub output_path: PathBuf,

    #[serde(skip)]
    pub frames: FramePolicy,
    #[serde(skip)]
    pub naming: NamingScheme,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            faces_dir: PathBuf::from("faces"),
            blank_path: PathBuf::from("facecam-blank.png"),
            darkness_threshold: DEFAULT_DARKNESS_THRESHOLD,
            output_path: PathBuf::from("faces-config.json"),
            frames: FramePolicy::default(),
            naming: NamingScheme::default(),
        }
    }
}

/// Values given on the command line. Each `Some` replaces the setting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    pub faces_dir: Option<PathBuf>,
    pub blank_path: Option<PathBuf>,
    pub darkness_threshold: Option<u8>,
    pub output_path: Option<PathBuf>,
}

impl GeneratorSettings {
    /// Defaults, or `path` when given, with `overrides` applied on top.
    pub fn resolve(path: Option<&Path>, overrides: &SettingsOverrides) -> Result<Self> {
        let settings = match path {
            Some(path) => Self::from_json_file(path)?,
            None => Self::default(),
        };
        let settings = settings.with_overrides(overrides);
        settings.validate()?;
        Ok(settings)
    }

    pub fn with_overrides(mut self, overrides: &SettingsOverrides) -> Self {
        if let Some(dir) = &overrides.faces_dir {
            self.faces_dir = dir.clone();
        }
        if let Some(blank) = &overrides.blank_path {
            self.blank_path = blank.clone();
        }
        if let Some(threshold) = overrides.darkness_threshold {
            self.darkness_threshold = threshold;
        }
        if let Some(output) = &overrides.output_path {
            self.output_path = output.clone();
        }
        self
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let settings: Self =
            serde_json::from_str(s).map_err(|e| Error::InvalidSettings(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Settings {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.faces_dir.as_os_str().is_empty() {
            return Err(Error::InvalidSettings("faces_dir is empty".into()));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(Error::InvalidSettings("output_path is empty".into()));
        }
        let f = &self.frames;
        for (name, ratio) in [
            ("x_ratio", f.x_ratio),
            ("y_ratio", f.y_ratio),
            ("width_ratio", f.width_ratio),
            ("height_ratio", f.height_ratio),
        ] {
            if !(0.0..=1.0).contains(&ratio) {
                return Err(Error::InvalidSettings(format!(
                    "{name} must be within 0.0..=1.0, got {ratio}"
                )));
            }
        }
        Ok(())
    }
}
