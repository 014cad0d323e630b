use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "pixblit", version)]
struct Cli {
    /// Log draw decisions to stderr.
    #[arg(long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a scene JSON to a PNG.
    Render(RenderArgs),
    /// Convert a raster image (PNG, JPEG, ...) to the binary image format.
    Convert(ConvertArgs),
    /// Print the header of a binary image.
    Info(InfoArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input raster image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Target color format, e.g. `indexed-4` or `true-color-alpha`.
    #[arg(long)]
    format: pixblit::ColorFormat,

    /// Storage depth of true-color pixels.
    #[arg(long, value_enum, default_value_t = DepthChoice::Rgb565)]
    depth: DepthChoice,

    /// Replace transparent pixels with this key color (`#rrggbb`).
    #[arg(long, value_parser = parse_color)]
    chroma_key: Option<pixblit::Color>,

    /// Output binary image path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct InfoArgs {
    /// Input binary image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Depth used to check the pixel data length.
    #[arg(long, value_enum, default_value_t = DepthChoice::Rgb565)]
    depth: DepthChoice,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DepthChoice {
    Rgb332,
    Rgb565,
    Argb8888,
}

impl From<DepthChoice> for pixblit::ColorDepth {
    fn from(d: DepthChoice) -> Self {
        match d {
            DepthChoice::Rgb332 => pixblit::ColorDepth::Rgb332,
            DepthChoice::Rgb565 => pixblit::ColorDepth::Rgb565,
            DepthChoice::Argb8888 => pixblit::ColorDepth::Argb8888,
        }
    }
}

fn parse_color(s: &str) -> Result<pixblit::Color, String> {
    serde_json::from_value::<pixblit::ColorDef>(serde_json::Value::String(s.to_owned()))
        .map(pixblit::Color::from)
        .map_err(|e| e.to_string())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Convert(args) => cmd_convert(args),
        Command::Info(args) => cmd_info(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let (frame, stats) = pixblit::render_scene_file(&args.in_path)
        .with_context(|| format!("render scene '{}'", args.in_path.display()))?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.to_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({} drawn, {} skipped)",
        args.out.display(),
        stats.drawn,
        stats.skipped
    );
    Ok(())
}

fn cmd_convert(args: ConvertArgs) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read image '{}'", args.in_path.display()))?;
    let opts = pixblit::ConvertOpts {
        format: args.format,
        depth: args.depth.into(),
        chroma_key: args.chroma_key,
    };
    let img = pixblit::convert_image_bytes(&bytes, &opts)
        .with_context(|| format!("convert '{}' to {}", args.in_path.display(), args.format))?;

    std::fs::write(&args.out, img.to_bytes())
        .with_context(|| format!("write image '{}'", args.out.display()))?;
    eprintln!(
        "wrote {} ({}x{} {})",
        args.out.display(),
        img.width(),
        img.height(),
        img.format()
    );
    Ok(())
}

fn cmd_info(args: InfoArgs) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read image '{}'", args.in_path.display()))?;
    let desc = pixblit::ImageDescriptor::from_bytes(&bytes)
        .with_context(|| format!("parse image '{}'", args.in_path.display()))?;
    let header = desc.header();
    let depth = pixblit::ColorDepth::from(args.depth);

    println!("format:       {}", desc.pixel_format()?);
    println!("size:         {}x{}", header.width(), header.height());
    println!("chroma keyed: {}", header.chroma_keyed());
    println!("alpha byte:   {}", header.alpha_byte());
    println!(
        "palette:      {}",
        desc.palette().map_or(0, pixblit::Palette::len)
    );
    println!("data bytes:   {}", desc.data().len());
    match desc.validate(depth) {
        Ok(_) => println!("valid for {depth:?}"),
        Err(e) => println!("invalid for {depth:?}: {e}"),
    }
    Ok(())
}
