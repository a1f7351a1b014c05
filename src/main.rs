use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scanline::models::{AppConfig, ConvertOverrides, OutputConfig, CONFIG_ENV};
use scanline::rendering::{enabled_formats, ensure_decoders};
use scanline::services::{default_destination, ConversionPipeline};

#[derive(Parser)]
#[command(name = "scanline")]
#[command(version)]
#[command(about = "Scanline - turn images into CRT-style RGB stripe SVGs for pen plotters")]
struct Cli {
    /// Config file (YAML). Falls back to $SCANLINE_CONFIG, then the built-in defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert one or more images to stripe SVGs
    Convert {
        /// Input image files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output SVG file (only with a single input)
        #[arg(short, long, conflicts_with = "out_dir")]
        output: Option<PathBuf>,

        /// Directory for output files (default: next to each input)
        #[arg(short = 'd', long = "out-dir")]
        out_dir: Option<PathBuf>,

        /// Do not draw the black background rectangle
        #[arg(long)]
        no_background: bool,

        /// Gamma exponent applied to channel values
        #[arg(long)]
        gamma: Option<f64>,

        /// Dash slots per pixel stripe
        #[arg(long)]
        dash_steps: Option<u32>,

        /// Downscale images wider than this many pixels
        #[arg(long)]
        max_width: Option<u32>,
    },
    /// Write the built-in default config to a file for customization
    Init {
        /// Where to write the config (default: ./scanline.yaml)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scanline=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config_path = cli
        .config
        .or_else(|| std::env::var(CONFIG_ENV).ok().map(PathBuf::from));

    match cli.command {
        Some(Commands::Convert {
            inputs,
            output,
            out_dir,
            no_background,
            gamma,
            dash_steps,
            max_width,
        }) => run_convert_command(ConvertArgs {
            config_path: config_path.as_deref(),
            inputs: &inputs,
            output: output.as_deref(),
            out_dir: out_dir.as_deref(),
            overrides: ConvertOverrides {
                gamma,
                dash_steps,
                max_width_px: max_width,
                no_background,
            },
        }),
        Some(Commands::Init { path, force }) => run_init_command(path.as_deref(), force),
        None => {
            run_status_command(config_path.as_deref());
            Ok(())
        }
    }
}

struct ConvertArgs<'a> {
    config_path: Option<&'a Path>,
    inputs: &'a [PathBuf],
    output: Option<&'a Path>,
    out_dir: Option<&'a Path>,
    overrides: ConvertOverrides,
}

/// `--output` names a single file, so it needs exactly one input.
fn check_output_target(output: Option<&Path>, input_count: usize) -> anyhow::Result<()> {
    if output.is_some() && input_count != 1 {
        anyhow::bail!("--output can only be used with a single input file");
    }
    Ok(())
}

/// Convert every input, reporting failures and carrying on.
///
/// Returns the number of failed conversions.
fn convert_all(
    pipeline: &ConversionPipeline,
    inputs: &[PathBuf],
    output: Option<&Path>,
    out_dir: Option<&Path>,
    output_config: &OutputConfig,
) -> usize {
    let mut failed = 0usize;
    for input in inputs {
        let destination = match output {
            Some(path) => path.to_path_buf(),
            None => default_destination(input, out_dir, &output_config.suffix),
        };

        match pipeline.convert(input, &destination, output_config.background) {
            Ok(report) => {
                println!(
                    "Wrote {} ({}x{} px, {:.1} x {:.1} mm, {} segments, {} bytes)",
                    report.destination.display(),
                    report.raster_px.0,
                    report.raster_px.1,
                    report.size_mm.0,
                    report.size_mm.1,
                    report.total_segments(),
                    report.bytes_written
                );
            }
            Err(e) => {
                tracing::debug!(input = %input.display(), error = ?e, "Conversion failed");
                eprintln!("{}", e.report());
                failed += 1;
            }
        }
    }
    failed
}

fn run_convert_command(args: ConvertArgs<'_>) -> anyhow::Result<()> {
    check_output_target(args.output, args.inputs.len())?;

    if let Err(e) = ensure_decoders() {
        eprintln!("{}", e.report());
        std::process::exit(1);
    }

    // Command line flags win over the config file
    let config = AppConfig::load(args.config_path)?.with_overrides(&args.overrides);

    let settings = config
        .stripes
        .apply(crt_stripes::StripeSettings::default());
    let pipeline = match ConversionPipeline::new(settings) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            eprintln!("{}", e.report());
            std::process::exit(1);
        }
    };

    let failed = convert_all(
        &pipeline,
        args.inputs,
        args.output,
        args.out_dir,
        &config.output,
    );

    if failed > 0 {
        eprintln!("\n{failed} of {} conversions failed", args.inputs.len());
        std::process::exit(1);
    }

    Ok(())
}

/// Extract the embedded config to the filesystem
fn run_init_command(path: Option<&Path>, force: bool) -> anyhow::Result<()> {
    let report = scanline::assets::init_config(path, force)?;

    for f in &report.written {
        println!("Wrote default config to {f}");
    }
    for f in &report.skipped {
        println!("Skipped existing {f} (use --force to overwrite)");
    }

    Ok(())
}

/// Display version, effective settings and available decoders
fn run_status_command(config_path: Option<&Path>) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    println!("Scanline v{VERSION}");
    println!("CRT-style RGB stripe SVGs for pen plotters\n");

    println!("Environment Variables:");
    println!(
        "  {CONFIG_ENV} = {}",
        std::env::var(CONFIG_ENV)
            .ok()
            .as_deref()
            .unwrap_or("(not set)")
    );

    let source = config_path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "embedded".to_string());
    println!("\nConfig: {source}");

    match AppConfig::load(config_path).and_then(|c| c.settings().map(|s| (c, s))) {
        Ok((config, s)) => {
            println!("  max width        {} px", s.max_width_px);
            println!("  target width     {} mm", s.target_width_mm);
            println!("  margin           {} mm", s.margin_mm);
            println!("  stroke width     {} mm", s.stroke_width_mm);
            println!(
                "  subpixel offsets {} / {} / {}",
                s.subpixel_offsets[0], s.subpixel_offsets[1], s.subpixel_offsets[2]
            );
            println!("  dash steps       {}", s.dash_steps);
            println!("  dash fill        {}", s.dash_fill);
            println!("  channel cutoff   {}", s.min_channel_cutoff);
            println!("  gamma            {}", s.gamma);
            println!("  background       {}", config.output.background);
            println!("  suffix           {}", config.output.suffix);
        }
        Err(e) => println!("  error: {e}"),
    }

    let formats: Vec<String> = enabled_formats()
        .iter()
        .map(|f| format!("{f:?}").to_lowercase())
        .collect();
    if formats.is_empty() {
        println!("\nDecoders: none (conversion unavailable)");
    } else {
        println!("\nDecoders: {}", formats.join(", "));
    }

    println!("\nCommands:");
    println!("  scanline convert   Convert images to stripe SVGs");
    println!("  scanline init      Write the default config file");
    println!("\nRun 'scanline --help' for more details.");
}
