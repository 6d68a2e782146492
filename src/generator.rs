//! Sequential pipeline: blank face, then the sorted directory matches,
//! then normalization.

use crate::anchor::{find_bottom_anchors, Anchors};
use crate::error::{Error, Result};
use crate::loader::{load_face_image, FaceImage};
use crate::normalize::normalize;
use crate::record::{blank_record, face_record, FaceRecord};
use crate::settings::GeneratorSettings;
use crate::writer::FacesConfig;
use std::path::Path;

/// Dimensions and resolved anchors of one image file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    pub width: u32,
    pub height: u32,
    pub anchors: Anchors,
}

/// Scan a decoded image. `source` names it in the log when a side window
/// has no dark pixel and the bottom-edge defaults are used.
pub fn measure_face(
    face: &FaceImage,
    darkness_threshold: u8,
    source: impl std::fmt::Display,
) -> Measurement {
    let scan = find_bottom_anchors(&face.pixels, darkness_threshold);
    if !scan.is_complete() {
        tracing::warn!(
            %source,
            left_found = scan.left.is_some(),
            right_found = scan.right.is_some(),
            "no dark pixel in one or both side windows, using bottom-edge defaults"
        );
    }
    Measurement {
        width: face.width,
        height: face.height,
        anchors: scan.resolve(),
    }
}

pub fn measure_image(path: &Path, darkness_threshold: u8) -> Result<Measurement> {
    let face = load_face_image(path)?;
    Ok(measure_face(&face, darkness_threshold, path.display()))
}

/// Result of a run: the normalized config and the shared baseline row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub config: FacesConfig,
    pub max_body_bottom: Option<u32>,
}

pub struct FaceConfigGenerator {
    settings: GeneratorSettings,
}

impl FaceConfigGenerator {
    pub fn new(settings: GeneratorSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    /// The blank reference face, if its file exists.
    pub fn process_blank(&self) -> Result<Option<FaceRecord>> {
        let path = &self.settings.blank_path;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no blank face, skipping");
            return Ok(None);
        }

        let m = measure_image(path, self.settings.darkness_threshold)?;
        let record = blank_record(
            path.to_string_lossy(),
            (m.width, m.height),
            m.anchors,
            &self.settings.frames,
        );
        tracing::info!("{}: {}", path.display(), record.summary());
        Ok(Some(record))
    }

    /// Matching file names in the faces directory, sorted.
    pub fn list_face_files(&self) -> Result<Vec<String>> {
        let dir = &self.settings.faces_dir;
        if !dir.exists() {
            tracing::debug!(dir = %dir.display(), "faces directory missing, skipping");
            return Ok(Vec::new());
        }

        let read_err = |source: std::io::Error| Error::ReadDir {
            path: dir.to_path_buf(),
            source,
        };

        let mut names = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(read_err)? {
            let entry = entry.map_err(read_err)?;
            let Ok(name) = entry.file_name().into_string() else {
                tracing::debug!(entry = ?entry.file_name(), "skipping non UTF-8 file name");
                continue;
            };
            if !self.settings.naming.matches(&name) {
                continue;
            }
            if !entry.path().is_file() {
                tracing::debug!(name = %name, "skipping non-file entry");
                continue;
            }
            names.push(name);
        }
        names.sort();
        Ok(names)
    }

    pub fn process_face(&self, filename: &str) -> Result<FaceRecord> {
        let path = self.settings.faces_dir.join(filename);
        let m = measure_image(&path, self.settings.darkness_threshold)?;
        let record = face_record(
            self.settings.naming.suffix(filename),
            path.to_string_lossy(),
            (m.width, m.height),
            m.anchors,
            &self.settings.frames,
        );
        tracing::info!("{filename}: {}", record.summary());
        Ok(record)
    }

    /// Build and normalize every record without writing anything.
    pub fn generate(&self) -> Result<GenerationReport> {
        let mut records = Vec::new();

        if let Some(blank) = self.process_blank()? {
            records.push(blank);
        }
        for filename in self.list_face_files()? {
            records.push(self.process_face(&filename)?);
        }

        let max_body_bottom = normalize(&mut records);
        match max_body_bottom {
            Some(max) => tracing::debug!(max, faces = records.len(), "normalized"),
            None => tracing::warn!(
                faces_dir = %self.settings.faces_dir.display(),
                blank = %self.settings.blank_path.display(),
                "no input images found, config will be empty"
            ),
        }

        Ok(GenerationReport {
            config: FacesConfig::new(records),
            max_body_bottom,
        })
    }

    /// `generate` and then overwrite the configured output file.
    pub fn run(&self) -> Result<GenerationReport> {
        let report = self.generate()?;
        report.config.write_to(&self.settings.output_path)?;
        Ok(report)
    }
}
