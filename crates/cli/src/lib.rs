mod config;

pub use config::{user_config_path, Config};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use clickframe_frames::{generate_grids, FileFrameLoader};
use clickframe_grid::{plan_transition, CellClicks, Grid, GridSize};
use clickframe_input::{
    EnigoActuator, KeyAbort, NeverAbort, PlaybackReport, Player, RecordingActuator,
    RecordingSleeper, ThreadSleeper,
};
use serde::Serialize;
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "clickframe")]
#[command(about = "Play a frame sequence as clicks on an on-screen grid")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Quantize every frame, then click it onto the screen.
    Play {
        #[command(flatten)]
        source: SourceArgs,
        /// Record clicks instead of moving the pointer, and skip all waits.
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the per-frame click plan as JSON.
    Plan {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Quantize a single image and print the grid as text.
    Preview {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Print the effective configuration as JSON.
    Config {
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Print CLI version.
    Version,
}

#[derive(Debug, Args)]
struct SourceArgs {
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Directory holding the numbered frames.
    #[arg(long, value_name = "DIR")]
    frames: Option<PathBuf>,
    #[arg(long)]
    first: Option<u32>,
    #[arg(long)]
    last: Option<u32>,
    /// Frame file extension, e.g. `png`.
    #[arg(long)]
    extension: Option<String>,
}

impl SourceArgs {
    fn resolve(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;
        if let Some(dir) = &self.frames {
            config.frames.dir = dir.clone();
        }
        if let Some(first) = self.first {
            config.frames.first = first;
        }
        if let Some(last) = self.last {
            config.frames.last = last;
        }
        if let Some(extension) = &self.extension {
            config.frames.extension = extension.clone();
        }
        if config.frames.is_empty() {
            anyhow::bail!(
                "frame range is empty (first={}, last={})",
                config.frames.first,
                config.frames.last
            );
        }
        Ok(config)
    }
}

#[derive(Debug, Serialize)]
struct PlanOutput {
    grid: GridSize,
    frames: Vec<FramePlanOutput>,
}

#[derive(Debug, Serialize)]
struct FramePlanOutput {
    index: u32,
    total_clicks: u32,
    cells: Vec<CellClicks>,
}

pub fn run<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    match cli.command {
        Commands::Play { source, dry_run } => run_play(&source.resolve()?, dry_run),
        Commands::Plan { source } => run_plan(&source.resolve()?),
        Commands::Preview { file, config } => {
            run_preview(&file, &Config::load(config.as_deref())?)
        }
        Commands::Config { config } => {
            let config = Config::load(config.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn generate(config: &Config, on_frame: impl FnMut(usize, usize)) -> Result<Vec<Grid>> {
    let loader = FileFrameLoader::new(config.frames.clone());
    let grids = generate_grids(&loader, config.frames.indices(), &config.quantization, on_frame)?;
    Ok(grids)
}

fn run_play(config: &Config, dry_run: bool) -> Result<()> {
    config
        .timing
        .validate(config.quantization.grid.cell_count())
        .context("time to draw a frame is longer than time to show a frame for")?;

    println!("# Generating");
    let grids = generate(config, |done, total| println!("{done} / {total}"))?;

    println!("# Playing");
    let report = if dry_run {
        let mut player = Player::new(
            RecordingActuator::new(),
            RecordingSleeper::default(),
            config.layout,
            config.timing,
        );
        player.play(&grids, &mut NeverAbort, |done, total| println!("{done} / {total}"))?
    } else {
        let actuator = EnigoActuator::new().context("failed to create pointer controller")?;
        let mut player = Player::new(actuator, ThreadSleeper, config.layout, config.timing);
        let mut abort = KeyAbort::new(config.abort_key).context("failed to watch keyboard")?;
        player.play(&grids, &mut abort, |done, total| {
            if let Err(err) = print_raw_line(&format!("{done} / {total}")) {
                warn!(error = %err, "failed to write progress");
            }
        })?
    };

    finish_play(&report)
}

fn finish_play(report: &PlaybackReport) -> Result<()> {
    if report.aborted {
        println!("Force quit");
    }
    info!(
        frames = report.frames_drawn,
        clicks = report.clicks,
        overruns = report.overruns,
        "playback finished"
    );
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

// The terminal is in raw mode while the abort key is watched.
fn print_raw_line(line: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{line}\r\n")?;
    stdout.flush()
}

fn run_plan(config: &Config) -> Result<()> {
    let grids = generate(config, |_, _| {})?;

    let mut current = Grid::empty(config.quantization.grid)?;
    let mut frames = Vec::with_capacity(grids.len());
    for (index, goal) in config.frames.indices().zip(&grids) {
        let plan = plan_transition(&current, goal)?;
        frames.push(FramePlanOutput {
            index,
            total_clicks: plan.total_clicks(),
            cells: plan.changes().copied().collect(),
        });
        current = goal.clone();
    }

    let payload = PlanOutput { grid: config.quantization.grid, frames };
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

fn run_preview(file: &Path, config: &Config) -> Result<()> {
    ensure_file_exists(file)?;

    let frame = image::open(file)
        .with_context(|| format!("failed to read image {}", file.display()))?
        .to_rgb8();
    let grid = config.quantization.grid_for(&frame)?;

    print!("{}", grid.to_text());
    Ok(())
}

fn ensure_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("file does not exist: {}", path.display());
    }

    if !path.is_file() {
        anyhow::bail!("path is not a file: {}", path.display());
    }

    Ok(())
}
