use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use debander::{
    AlphaF32, ColumnExtent, DebandOpts, DebandSession, NeverAbort, Passes, PixelView,
    PixelViewMut, RectI, RenderArgs, RenderStats, RgbaF32,
};

#[derive(Parser, Debug)]
#[command(name = "debander", version, about = "Remove banding from an image")]
struct Cli {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output image. `.exr` keeps f32 samples, PNG/TIFF are written as 16-bit.
    #[arg(long)]
    out: PathBuf,

    /// JSON options file; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Worker threads (one horizontal strip each).
    #[arg(long)]
    threads: Option<usize>,

    /// Scan axes to run.
    #[arg(long, value_enum)]
    passes: Option<PassesArg>,

    /// How far column band detection reaches.
    #[arg(long, value_enum)]
    column_extent: Option<ExtentArg>,

    /// Deband only the alpha channel, leaving color untouched.
    #[arg(long, default_value_t = false)]
    alpha_only: bool,

    /// Log per-strip progress to stderr.
    #[arg(long, short, default_value_t = false)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PassesArg {
    Both,
    Rows,
    Columns,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ExtentArg {
    Strip,
    Window,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let opts = load_opts(&cli)?;
    let session = DebandSession::new(opts)?;

    let img = image::open(&cli.in_path)
        .with_context(|| format!("read image '{}'", cli.in_path.display()))?
        .into_rgba32f();
    let (width, height) = img.dimensions();
    let rect = RectI::from_size(width, height)?;
    let src: Vec<RgbaF32> = img.pixels().map(|p| RgbaF32::from(p.0)).collect();

    let (pixels, stats) = if cli.alpha_only {
        deband_alpha(&session, &src, rect)?
    } else {
        deband_rgba(&session, &src, rect)?
    };

    write_image(&cli.out, width, height, &pixels)?;
    eprintln!(
        "wrote {} ({} row bands, {} column bands)",
        cli.out.display(),
        stats.row_bands,
        stats.column_bands
    );
    Ok(())
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_opts(cli: &Cli) -> anyhow::Result<DebandOpts> {
    let mut opts = match &cli.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("read options '{}'", path.display()))?;
            DebandOpts::from_json_str(&json)?
        }
        None => DebandOpts::default(),
    };
    if let Some(threads) = cli.threads {
        opts.threads = threads;
    }
    if let Some(passes) = cli.passes {
        opts.passes = match passes {
            PassesArg::Both => Passes::Both,
            PassesArg::Rows => Passes::RowsOnly,
            PassesArg::Columns => Passes::ColumnsOnly,
        };
    }
    if let Some(extent) = cli.column_extent {
        opts.column_extent = match extent {
            ExtentArg::Strip => ColumnExtent::Strip,
            ExtentArg::Window => ColumnExtent::Window,
        };
    }
    Ok(opts)
}

fn deband_rgba(
    session: &DebandSession,
    src: &[RgbaF32],
    rect: RectI,
) -> anyhow::Result<(Vec<RgbaF32>, RenderStats)> {
    let mut dst = vec![RgbaF32::default(); src.len()];
    let args = RenderArgs::new(
        debander::ImageRef::Rgba(PixelView::packed(src, rect)?),
        debander::ImageMut::Rgba(PixelViewMut::packed(&mut dst, rect)?),
        rect,
    );
    let stats = session.render(args, &NeverAbort)?;
    Ok((dst, stats))
}

fn deband_alpha(
    session: &DebandSession,
    src: &[RgbaF32],
    rect: RectI,
) -> anyhow::Result<(Vec<RgbaF32>, RenderStats)> {
    let alpha: Vec<AlphaF32> = src.iter().map(|p| AlphaF32(p.a)).collect();
    let mut out = vec![AlphaF32::default(); alpha.len()];
    let args = RenderArgs::new(
        debander::ImageRef::Alpha(PixelView::packed(&alpha, rect)?),
        debander::ImageMut::Alpha(PixelViewMut::packed(&mut out, rect)?),
        rect,
    );
    let stats = session.render(args, &NeverAbort)?;

    let pixels = src
        .iter()
        .zip(&out)
        .map(|(p, a)| RgbaF32 { a: a.0, ..*p })
        .collect();
    Ok((pixels, stats))
}

fn write_image(path: &Path, width: u32, height: u32, pixels: &[RgbaF32]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let mut buf = image::Rgba32FImage::new(width, height);
    for (dst, src) in buf.pixels_mut().zip(pixels) {
        *dst = image::Rgba(src.to_array());
    }
    let img = image::DynamicImage::ImageRgba32F(buf);

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let saved = match ext.as_str() {
        "exr" => img.save(path),
        "jpg" | "jpeg" => img.to_rgb8().save(path),
        "png" | "tif" | "tiff" => img.to_rgba16().save(path),
        _ => img.to_rgba8().save(path),
    };
    saved.with_context(|| format!("write image '{}'", path.display()))
}
