use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{Rng as _, SeedableRng as _};

use cubestamp::{
    AssetSet, AssetSources, CubeDecorator, EventTranslator, Face, Modifiers, PlacementLog,
    SeededRandom, SurfaceHit,
};

#[derive(Parser, Debug)]
#[command(name = "cubestamp", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the decorated cube's six face textures as PNGs.
    Render(RenderArgs),
    /// Apply seeded-random stamps on top of an optional imported log, then render.
    Stamp(StampArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Asset manifest JSON ({"base_faces": [6 paths], "stamps": [paths]}),
    /// with image paths relative to the manifest's directory.
    #[arg(long)]
    manifest: PathBuf,

    /// Placement log JSON to seed from.
    #[arg(long)]
    log: Option<PathBuf>,

    /// Output directory for face_0.png .. face_5.png.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct StampArgs {
    /// Asset manifest JSON, as for `render`.
    #[arg(long)]
    manifest: PathBuf,

    /// Placement log JSON to seed from before stamping.
    #[arg(long)]
    log: Option<PathBuf>,

    /// Number of random placements to apply.
    #[arg(long, default_value_t = 16)]
    count: u32,

    /// RNG seed; the same seed over the same inputs reproduces the output.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Output directory for face_0.png .. face_5.png.
    #[arg(long)]
    out: PathBuf,

    /// Write the resulting placement log JSON here.
    #[arg(long)]
    export_log: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Stamp(args) => cmd_stamp(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let deco = build_decorator(&args.manifest, args.log.as_deref())?;
    write_faces(&deco, &args.out)
}

fn cmd_stamp(args: StampArgs) -> anyhow::Result<()> {
    let mut deco = build_decorator(&args.manifest, args.log.as_deref())?;

    let mut hits = StdRng::seed_from_u64(args.seed);
    let mut translator =
        EventTranslator::new(Box::new(SeededRandom::new(args.seed.wrapping_add(1))));
    for _ in 0..args.count {
        let face = Face::from_index(hits.gen_range(0..cubestamp::FACE_COUNT))
            .context("face index out of range (bug)")?;
        let hit = SurfaceHit {
            face,
            u: hits.r#gen::<f64>(),
            v: hits.r#gen::<f64>(),
            modifiers: Modifiers::NONE,
        };
        deco.handle(hit, &mut translator)?;
    }

    if let Some(path) = &args.export_log {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create log dir '{}'", parent.display()))?;
        }
        std::fs::write(path, deco.export_json()?)
            .with_context(|| format!("write log '{}'", path.display()))?;
        eprintln!("wrote {}", path.display());
    }

    write_faces(&deco, &args.out)
}

fn build_decorator(manifest: &Path, log: Option<&Path>) -> anyhow::Result<CubeDecorator> {
    let f = File::open(manifest).with_context(|| format!("open manifest '{}'", manifest.display()))?;
    let sources: AssetSources =
        serde_json::from_reader(BufReader::new(f)).context("parse asset manifest JSON")?;

    let root = manifest.parent().unwrap_or_else(|| Path::new("."));
    let assets = AssetSet::load(&sources, root)?;
    let mut deco = CubeDecorator::new(assets)?;

    if let Some(path) = log {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read log '{}'", path.display()))?;
        let placements = PlacementLog::parse_json(&json)?;
        let report = deco.seed(&placements)?;
        if !report.skipped.is_empty() {
            eprintln!(
                "skipped {} out-of-range log entries at positions {:?}",
                report.skipped.len(),
                report.skipped
            );
        }
    }

    Ok(deco)
}

fn write_faces(deco: &CubeDecorator, out: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(out)
        .with_context(|| format!("create output dir '{}'", out.display()))?;

    let size = deco.canvases().size();
    for face in Face::ALL {
        let path = out.join(format!("face_{}.png", face.index()));
        image::save_buffer_with_format(
            &path,
            deco.canvases().pixels(face),
            size,
            size,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}
