use crate::error::{Error, Result};
use crate::record::FaceRecord;
use serde::Serialize;
use std::path::Path;

/// Top-level document: `{"faces": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FacesConfig {
    pub faces: Vec<FaceRecord>,
}

impl FacesConfig {
    pub fn new(faces: Vec<FaceRecord>) -> Self {
        Self { faces }
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Pretty JSON, 2-space indent, no trailing newline.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Render the whole document first, then overwrite `path`.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let json = self.to_json_string()?;
        std::fs::write(path, json).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}
