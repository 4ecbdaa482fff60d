use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "stampworks", version)]
struct Cli {
    /// Increase diagnostic verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Process every eligible file in the watch directory.
    Process(ProcessArgs),
    /// Show how filenames are parsed, without touching the filesystem.
    Inspect(InspectArgs),
    /// List the palette in fan-out order.
    Palette(PaletteArgs),
}

#[derive(Parser, Debug)]
struct ProcessArgs {
    /// Output shape.
    #[arg(long, value_enum)]
    shape: ShapeChoice,

    /// JSON config file. Built-in defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the watch directory.
    #[arg(long)]
    watch_dir: Option<PathBuf>,

    /// Override the worker pool size.
    #[arg(long)]
    workers: Option<usize>,

    /// Override the standardized circle side in pixels.
    #[arg(long)]
    standard_size: Option<u32>,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Raw filenames to parse.
    #[arg(required = true)]
    names: Vec<String>,

    /// JSON config file providing the palette.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PaletteArgs {
    /// JSON config file providing the palette.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ShapeChoice {
    Circle,
    Rectangle,
    Sticker,
}

impl From<ShapeChoice> for stampworks::Shape {
    fn from(c: ShapeChoice) -> Self {
        match c {
            ShapeChoice::Circle => Self::Circle,
            ShapeChoice::Rectangle => Self::Rectangle,
            ShapeChoice::Sticker => Self::CircleSticker,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Process(args) => cmd_process(args),
        Command::Inspect(args) => cmd_inspect(args),
        Command::Palette(args) => cmd_palette(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<stampworks::StampConfig> {
    match path {
        Some(p) => stampworks::StampConfig::load(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(stampworks::StampConfig::default()),
    }
}

fn cmd_process(args: ProcessArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(args.config.as_ref())?;
    if let Some(dir) = args.watch_dir {
        cfg.watch_dir = dir;
    }
    if let Some(n) = args.workers {
        cfg.workers = n;
    }
    if let Some(side) = args.standard_size {
        cfg.standard_size = Some(side);
    }

    let shape = stampworks::Shape::from(args.shape);
    let report = stampworks::dispatch(shape, &cfg)
        .with_context(|| format!("{} run over '{}'", shape.label(), cfg.watch_dir.display()))?;

    for f in &report.files {
        eprintln!("  {}: {:?}", f.file, f.outcome);
    }
    eprintln!(
        "processed {}, collided {}, rejected {}, failed {} (log: {})",
        report.processed(),
        report.collided(),
        report.rejected(),
        report.failed(),
        cfg.log_path.display()
    );
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_ref())?;
    for raw in &args.names {
        match stampworks::ParsedName::parse(raw) {
            Ok(p) => println!(
                "{raw}\tstem={}\tnormalized={}\tcode={}\tdirective={:?}",
                p.stem,
                p.normalized,
                p.directive_code.as_deref().unwrap_or("-"),
                p.directive(&cfg.palette)
            ),
            Err(e) => println!("{raw}\terror={e}"),
        }
    }
    Ok(())
}

fn cmd_palette(args: PaletteArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_ref())?;
    for entry in cfg.palette.iter() {
        let c = entry.rgba;
        let bucket = cfg
            .rectangle_subdirs
            .get(&entry.code)
            .map(String::as_str)
            .unwrap_or("-");
        println!("{}\t({}, {}, {}, {})\t{bucket}", entry.code, c.r, c.g, c.b, c.a);
    }
    Ok(())
}
