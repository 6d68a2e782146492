use anyhow::{Context, Result};
use clap::Parser;
use faces_config::{FaceConfigGenerator, GeneratorSettings, SettingsOverrides};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Measure face overlays, detect bottom anchors and write faces-config.json"
)]
struct Args {
    /// JSON settings file (faces_dir, blank_path, darkness_threshold, output_path)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory containing facecam-*.png overlays
    #[arg(long)]
    faces_dir: Option<PathBuf>,

    /// Blank reference face
    #[arg(long)]
    blank: Option<PathBuf>,

    /// RGB average below this counts as dark (0-255)
    #[arg(short, long)]
    threshold: Option<u8>,

    /// Output JSON path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the JSON to stdout instead of writing the output file
    #[arg(long)]
    dry_run: bool,
}

impl Args {
    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            faces_dir: self.faces_dir.clone(),
            blank_path: self.blank.clone(),
            darkness_threshold: self.threshold,
            output_path: self.output.clone(),
        }
    }
}

fn main() -> Result<()> {
    faces_config::init_tracing();
    let args = Args::parse();

    let settings = GeneratorSettings::resolve(args.config.as_deref(), &args.overrides())
        .context("Failed to load settings")?;
    let output_path = settings.output_path.clone();
    let generator = FaceConfigGenerator::new(settings).context("Invalid settings")?;

    if args.dry_run {
        let report = generator.generate().context("Failed to generate faces config")?;
        println!("{}", report.config.to_json_string()?);
        return Ok(());
    }

    let report = generator
        .run()
        .with_context(|| format!("Failed to generate {}", output_path.display()))?;

    if let Some(max) = report.max_body_bottom {
        println!("Max body bottom: {max}");
        println!("All faces aligned to this baseline.");
    }
    println!(
        "Wrote: {} ({} faces)",
        output_path.display(),
        report.config.len()
    );
    Ok(())
}
