use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use svg_recenter::upload::{handle_upload, Upload};
use svg_recenter::{RecenterConfig, RecenterError, Recentered};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "svg-recenter",
    about = "Move SVG path artwork so its centroid sits at the canvas center"
)]
struct Cli {
    /// Input SVG file
    input: PathBuf,

    /// Output SVG path (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write a PNG preview of the output canvas
    #[arg(long)]
    preview: Option<PathBuf>,

    /// Preview pixels per canvas unit
    #[arg(long, default_value = "4")]
    scale: u32,

    /// Leave out the reference circle at the target point
    #[arg(long)]
    no_marker: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// PNG bytes for the preview, rendered before anything is written.
#[cfg(feature = "render")]
fn render_preview(
    result: &Recentered,
    config: &RecenterConfig,
    scale: u32,
) -> Result<Option<Vec<u8>>, RecenterError> {
    svg_recenter::render::render_preview(result, config, scale).map(Some)
}

#[cfg(not(feature = "render"))]
fn render_preview(
    _result: &Recentered,
    _config: &RecenterConfig,
    _scale: u32,
) -> Result<Option<Vec<u8>>, RecenterError> {
    eprintln!("  Preview     skipped (built without `render`)");
    Ok(None)
}

fn write_outputs(
    cli: &Cli,
    svg: &str,
    preview: Option<(&Path, Vec<u8>)>,
) -> std::io::Result<()> {
    if let Some((path, png)) = preview {
        std::fs::write(path, png)?;
        eprintln!("  Preview     {}", path.display());
    }
    match &cli.output {
        Some(path) => {
            std::fs::write(path, svg)?;
            eprintln!("  Output      {}", path.display());
        }
        None => println!("{svg}"),
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    let config = RecenterConfig {
        marker: !cli.no_marker,
        ..RecenterConfig::default()
    };

    let outcome = handle_upload(Upload::from_path(&cli.input), &config);
    let Some(result) = outcome.output else {
        eprintln!("  \u{2717} {}", outcome.status.message);
        return ExitCode::FAILURE;
    };

    let preview = match &cli.preview {
        Some(path) => match render_preview(&result, &config, cli.scale) {
            Ok(png) => png.map(|png| (path.as_path(), png)),
            Err(e) => {
                eprintln!("  \u{2717} {}", e.user_message());
                return ExitCode::FAILURE;
            }
        },
        None => None,
    };

    if let Err(e) = write_outputs(&cli, &result.to_svg(&config), preview) {
        eprintln!("  \u{2717} Error writing output: {e}");
        return ExitCode::FAILURE;
    }

    eprintln!("  \u{2713} {}", outcome.status.message);
    ExitCode::SUCCESS
}
