//! whitted-rt: recursive sphere ray tracer
//!
//! Renders the configured scene (or the built-in demo scene) with a fixed
//! pool of band workers and hands the finished frame to a PNG file or the
//! terminal.
//!
//! Usage:
//!   whitted-rt render --output frame.png
//!   whitted-rt preview
//!   whitted-rt animate --frames 30 --out-dir frames
//!   whitted-rt --config scene.yaml check-config

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Instant;

use whitted_rt::canvas::Canvas;
use whitted_rt::config::AppConfig;
use whitted_rt::raster;
use whitted_rt::renderer::Renderer;
use whitted_rt::scene::{Light, Scene};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

#[derive(Parser)]
#[command(name = "whitted-rt")]
#[command(version = "0.1.0")]
#[command(about = "Recursive Whitted-style sphere ray tracer")]
struct Cli {
    /// Path to scene config file (defaults to scene.yaml if present, else the demo scene)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Set logging level (trace, debug, info, warn, error)
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

/// Overrides for the `render` section of the config
#[derive(Args, Debug, Clone, Default)]
struct RenderOverrides {
    /// Canvas width in pixels
    #[arg(long)]
    width: Option<u32>,
    /// Canvas height in pixels
    #[arg(long)]
    height: Option<u32>,
    /// Maximum number of reflection bounces
    #[arg(short, long)]
    depth: Option<u32>,
    /// Number of worker threads (one row band each)
    #[arg(short, long)]
    workers: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one frame to an image file
    Render {
        #[command(flatten)]
        overrides: RenderOverrides,
        /// Output image path; format follows the extension
        #[arg(short, long, default_value = "frame.png")]
        output: PathBuf,
    },

    /// Render one frame sized to the terminal and print it
    Preview {
        #[command(flatten)]
        overrides: RenderOverrides,
        /// Print grayscale characters instead of colored half-blocks
        #[arg(long)]
        plain: bool,
    },

    /// Render a sequence of frames while the camera drifts
    Animate {
        #[command(flatten)]
        overrides: RenderOverrides,
        /// Number of frames (overrides animation.frames)
        #[arg(short, long)]
        frames: Option<u32>,
        /// Directory for frame_NNN.png files
        #[arg(long, default_value = "frames")]
        out_dir: PathBuf,
    },

    /// Draw the filled and wireframe triangle demo with the 2D rasterizer
    Raster {
        /// Output image path
        #[arg(short, long, default_value = "raster.png")]
        output: PathBuf,
    },

    /// Validate configuration file
    CheckConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level_filter = if let Some(level) = cli.log_level {
        level.to_string()
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
            .to_string()
    };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&level_filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Render { overrides, output } => {
            let config = load_config(cli.config.as_deref(), &overrides)?;
            render_frame(&config, &output)?;
        }
        Commands::Preview { overrides, plain } => {
            let mut config = load_config(cli.config.as_deref(), &overrides)?;
            if overrides.width.is_none() && overrides.height.is_none() {
                fit_to_terminal(&mut config);
            }
            preview(&config, plain)?;
        }
        Commands::Animate { overrides, frames, out_dir } => {
            let mut config = load_config(cli.config.as_deref(), &overrides)?;
            if let Some(frames) = frames {
                config.animation.frames = frames;
                config.validate()?;
            }
            animate(&config, &out_dir)?;
        }
        Commands::Raster { output } => {
            let config = load_config(cli.config.as_deref(), &RenderOverrides::default())?;
            draw_raster_demo(&config, &output)?;
        }
        Commands::CheckConfig => {
            check_config(cli.config.as_deref());
        }
    }

    Ok(())
}

/// Load configuration and apply CLI overrides
fn load_config(
    path: Option<&Path>,
    overrides: &RenderOverrides,
) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let mut config = AppConfig::load_or_default(path)?;

    if let Some(width) = overrides.width {
        config.render.width = width;
    }
    if let Some(height) = overrides.height {
        config.render.height = height;
    }
    if let Some(depth) = overrides.depth {
        config.render.recursion_depth = depth;
    }
    if let Some(workers) = overrides.workers {
        config.render.workers = Some(workers);
    }
    config.validate()?;

    tracing::info!(
        width = config.render.width,
        height = config.render.height,
        depth = config.render.recursion_depth,
        spheres = config.scene.spheres.len(),
        lights = config.scene.lights.len(),
        "Configuration loaded"
    );

    Ok(config)
}

/// Render `scene` and log how long the pass took
fn timed_render(renderer: &Renderer, scene: &Scene) -> Canvas {
    let started = Instant::now();
    let canvas = renderer.render(scene);
    tracing::info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        workers = renderer.settings().workers,
        "Frame rendered"
    );
    canvas
}

fn render_frame(config: &AppConfig, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let renderer = Renderer::new(config.render.settings())?;
    let canvas = timed_render(&renderer, &config.scene);
    canvas.save(output)?;
    tracing::info!("Wrote {}", output.display());
    Ok(())
}

/// Square canvas that fits the terminal, two pixel rows per character row
fn fit_to_terminal(config: &mut AppConfig) {
    let (cols, rows) = match crossterm::terminal::size() {
        Ok((w, h)) => (w as u32, h.saturating_sub(2) as u32),
        Err(e) => {
            tracing::warn!(error = %e, "Could not get terminal size, using 80x40");
            (80, 40)
        }
    };
    let side = cols.min(rows * 2).max(10);
    config.render.width = side;
    config.render.height = side;
}

fn preview(config: &AppConfig, plain: bool) -> Result<(), Box<dyn std::error::Error>> {
    let renderer = Renderer::new(config.render.settings())?;
    let canvas = timed_render(&renderer, &config.scene);

    if plain {
        print!("{}", canvas.to_ascii());
    } else {
        print!("{}", canvas.to_ansi_halfblock());
    }
    Ok(())
}

fn animate(config: &AppConfig, out_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(out_dir)?;
    let renderer = Renderer::new(config.render.settings())?;
    let total = config.animation.frames;

    // Every frame is an independent pass; nothing carries over
    for frame in 0..total {
        let scene = config.frame_scene(frame);
        let canvas = timed_render(&renderer, &scene);
        let path = out_dir.join(format!("frame_{frame:03}.png"));
        canvas.save(&path)?;
        tracing::info!("[{}/{}] Wrote {}", frame + 1, total, path.display());
    }

    Ok(())
}

fn draw_raster_demo(config: &AppConfig, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut canvas = Canvas::new(config.render.width, config.render.height, config.scene.background);
    raster::draw_demo(&mut canvas);
    canvas.save(output)?;
    tracing::info!("Wrote {}", output.display());
    Ok(())
}

fn check_config(path: Option<&Path>) {
    match AppConfig::load_or_default(path) {
        Ok(config) => {
            println!("✓ Configuration is valid\n");
            println!("Render:");
            println!("  Canvas: {}x{}", config.render.width, config.render.height);
            println!("  Recursion depth: {}", config.render.recursion_depth);
            println!("  Workers: {}", config.render.settings().workers);
            println!("\nCamera:");
            let p = config.scene.camera.position;
            println!("  Position: ({}, {}, {})", p.x, p.y, p.z);
            println!("  Rotation: {:?}", config.scene.camera.rotation.rows());
            println!("\nSpheres: {}", config.scene.spheres.len());
            for sphere in &config.scene.spheres {
                let c = sphere.center;
                println!(
                    "  center ({}, {}, {}) radius {} specular {} reflective {}",
                    c.x, c.y, c.z, sphere.radius, sphere.specular, sphere.reflective
                );
            }
            println!("\nLights: {}", config.scene.lights.len());
            for light in &config.scene.lights {
                match light {
                    Light::Ambient { intensity } => println!("  ambient {intensity}"),
                    Light::Point { intensity, position } => println!(
                        "  point {intensity} at ({}, {}, {})",
                        position.x, position.y, position.z
                    ),
                    Light::Directional { intensity, direction } => println!(
                        "  directional {intensity} along ({}, {}, {})",
                        direction.x, direction.y, direction.z
                    ),
                }
            }
            println!("\nAnimation:");
            println!("  Frames: {}", config.animation.frames);
        }
        Err(e) => {
            eprintln!("✗ Configuration error: {}", e);
            std::process::exit(1);
        }
    }
}
