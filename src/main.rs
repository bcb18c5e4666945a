use std::path::PathBuf;

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mandelbrot_explorer::core::data::point::Point;
use mandelbrot_explorer::core::fractals::mandelbrot::colour_mapping::palette::Palette;
use mandelbrot_explorer::core::fractals::mandelbrot::mandelbrot_config::{
    DEFAULT_COLOUR_LOOPS, DEFAULT_MAX_ITERATIONS,
};
use mandelbrot_explorer::{
    ExplorerCommand, GradientPreset, MandelbrotConfig, MandelbrotExplorer, ZoomDirection,
    parse_zoom_target, read_zoom_point, save_image,
};

#[derive(Parser, Debug)]
#[command(name = "mandelbrot-explorer", version, about = "Render and explore the Mandelbrot set")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one frame to a PNG or PPM file.
    Render(RenderArgs),
    /// Print the contents of a .mbz zoom-point file.
    Inspect {
        path: PathBuf,
    },
    /// Draw a palette as vertical stripes, one per colour.
    Palette(PaletteArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// JSON config file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Maximum iterations per pixel.
    #[arg(long)]
    iterations: Option<u32>,

    /// How many times the gradient repeats across the palette.
    #[arg(long)]
    loops: Option<u32>,

    /// Integer escape counts instead of smooth colouring.
    #[arg(long)]
    discrete: bool,

    /// Gradient preset: milky-way, sunset, radioactive or rainbow.
    #[arg(long)]
    preset: Option<GradientPreset>,

    /// Centre on X, Y at a magnification of AMOUNT.
    #[arg(long, num_args = 3, value_names = ["X", "Y", "AMOUNT"], allow_hyphen_values = true)]
    zoom: Option<Vec<String>>,

    /// Read AMOUNT as a reciprocal.
    #[arg(long, requires = "zoom")]
    invert_zoom: bool,

    /// Zoom one level in around a pixel; may be repeated.
    #[arg(long = "zoom-in", num_args = 2, value_names = ["PX", "PY"], action = ArgAction::Append)]
    zoom_in: Vec<i32>,

    /// Start from a saved .mbz zoom point.
    #[arg(long)]
    load_zoom_point: Option<PathBuf>,

    /// Save the final centre and zoom level as a .mbz zoom point.
    #[arg(long)]
    save_zoom_point: Option<PathBuf>,

    /// Output image; the extension picks PNG or PPM.
    #[arg(long, default_value = "mandelbrot.png")]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct PaletteArgs {
    #[arg(long, default_value_t = GradientPreset::default())]
    preset: GradientPreset,

    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    iterations: u32,

    #[arg(long, default_value_t = DEFAULT_COLOUR_LOOPS)]
    loops: u32,

    #[arg(long, default_value_t = 64)]
    height: u32,

    #[arg(long, default_value = "palette.png")]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Inspect { path } => cmd_inspect(&path),
        Command::Palette(args) => cmd_palette(&args),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &RenderArgs) -> anyhow::Result<MandelbrotConfig> {
    let mut config = match &args.config {
        Some(path) => MandelbrotConfig::from_json_file(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => MandelbrotConfig::default(),
    };

    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(iterations) = args.iterations {
        config.max_iterations = iterations;
    }
    if let Some(loops) = args.loops {
        config.colour_loops = loops;
    }
    if args.discrete {
        config.smooth = false;
    }
    if let Some(preset) = args.preset {
        config.gradient = preset;
    }

    Ok(config)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let config = load_config(&args)?;
    let mut explorer = MandelbrotExplorer::new(&config).context("set up explorer")?;

    if let Some(path) = &args.load_zoom_point {
        explorer
            .load_zoom_point(path)
            .with_context(|| format!("load zoom point '{}'", path.display()))?;
    }

    if let Some([x, y, amount]) = args.zoom.as_deref() {
        let target = parse_zoom_target(x, y, amount, args.invert_zoom).context("parse --zoom")?;
        explorer.apply(target.into_command())?;
    }

    for pixel in args.zoom_in.chunks_exact(2) {
        explorer.apply(ExplorerCommand::RelativeZoom {
            pixel: Point {
                x: pixel[0],
                y: pixel[1],
            },
            direction: ZoomDirection::In,
        })?;
    }

    explorer.render().context("render frame")?;
    save_image(explorer.image(), &args.out)?;

    if let Some(path) = &args.save_zoom_point {
        let written = explorer
            .save_zoom_point(path)
            .with_context(|| format!("save zoom point '{}'", path.display()))?;
        eprintln!("saved zoom point {}", written.display());
    }

    eprintln!("wrote {} ({})", args.out.display(), explorer.status());
    Ok(())
}

fn cmd_inspect(path: &std::path::Path) -> anyhow::Result<()> {
    let point = read_zoom_point(path).with_context(|| format!("read zoom point '{}'", path.display()))?;
    let magnification = 2_f64.powi(point.zoom_level.max(1) - 1);

    println!("x:          {}", point.x);
    println!("y:          {}", point.y);
    println!("zoom level: {}", point.zoom_level);
    println!("zoomed in:  {magnification}x");

    Ok(())
}

fn cmd_palette(args: &PaletteArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.loops > 0, "--loops must be greater than zero");

    let palette = Palette::generate(args.iterations as usize, &args.preset.gradient(), args.loops);
    let image = palette.stripe_image(args.height).context("draw palette")?;

    save_image(&image, &args.out)?;
    eprintln!("wrote {} ({} colours)", args.out.display(), palette.num_colours());

    Ok(())
}
