//! Measure face-overlay images, detect bottom alignment anchors and emit a
//! `faces-config.json` that aligns every face to a common baseline row.

use std::path::Path;

pub mod anchor;
mod error;
pub mod generator;
pub mod loader;
pub mod normalize;
pub mod record;
pub mod settings;
pub mod writer;

pub use anchor::{find_bottom_anchors, Anchor, AnchorScan, Anchors, DEFAULT_DARKNESS_THRESHOLD};
pub use error::{Error, Result};
pub use generator::{measure_face, measure_image, FaceConfigGenerator, GenerationReport, Measurement};
pub use loader::{load_face_image, load_face_image_from_bytes, FaceImage};
pub use normalize::normalize;
pub use record::{blank_record, estimate_target_frame, face_record, FaceRecord, Rect};
pub use settings::{FramePolicy, GeneratorSettings, NamingScheme, SettingsOverrides};
pub use writer::FacesConfig;

/// Run the whole pipeline with `settings` and write the output file.
pub fn generate_faces_config(settings: GeneratorSettings) -> Result<GenerationReport> {
    FaceConfigGenerator::new(settings)?.run()
}

/// Measure an image file with the default threshold.
pub fn measure(path: &Path) -> Result<Measurement> {
    measure_image(path, DEFAULT_DARKNESS_THRESHOLD)
}

/// Measure encoded image bytes (png/jpg/webp/etc).
pub fn measure_encoded_bytes(bytes: &[u8], darkness_threshold: u8) -> Result<Measurement> {
    let face = load_face_image_from_bytes(bytes)?;
    Ok(measure_face(&face, darkness_threshold, "<memory>"))
}

/// Initializes the tracing subscriber, `info` level unless `RUST_LOG` says otherwise.
/// Logs go to stderr so stdout carries only the JSON in `--dry-run` mode.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
