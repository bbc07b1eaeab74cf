use std::{
    collections::BTreeMap,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "reframe", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode a persisted settings document and print it normalized.
    Inspect(InspectArgs),
    /// Resolve a session fixture into the composite layer stack.
    Resolve(ResolveArgs),
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input settings JSON (unknown fields are tolerated).
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct ResolveArgs {
    /// Input session JSON: settings document, photos, measurements.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Editing canvas width in pixels.
    #[arg(long, default_value_t = 1080)]
    width: u32,

    /// Editing canvas height in pixels.
    #[arg(long, default_value_t = 1350)]
    height: u32,
}

/// On-disk session fixture consumed by `resolve`.
#[derive(Debug, serde::Deserialize)]
struct SessionFile {
    #[serde(default)]
    settings: reframe::SettingsDoc,
    photos: Vec<reframe::ProgressPhoto>,
    #[serde(default)]
    measurements: BTreeMap<reframe::MeasurementType, Vec<reframe::MeasurementEntry>>,
    #[serde(default)]
    strength: Option<reframe::StrengthSummary>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args),
        Command::Resolve(args) => cmd_resolve(args),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open '{}'", path.display()))?;
    let r = BufReader::new(f);
    serde_json::from_reader(r).with_context(|| format!("parse '{}'", path.display()))
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let doc: reframe::SettingsDoc = read_json(&args.in_path)?;
    let settings = reframe::decode(&doc);
    println!("{}", reframe::encode_json(&settings)?);
    Ok(())
}

fn cmd_resolve(args: ResolveArgs) -> anyhow::Result<()> {
    let file: SessionFile = read_json(&args.in_path)?;
    let canvas = reframe::Canvas::new(args.width, args.height)?;

    let settings = reframe::decode(&file.settings);
    let session = reframe::ComparisonSession::restore(
        canvas,
        reframe::SelectedPhotoSet::new(file.photos),
        settings,
    );

    let mut input = reframe::StatsInput::new(&file.measurements);
    input.strength = file.strength;
    let stats = session.stats(&input);

    let composite = reframe::resolve_composite(&session, stats)?;
    println!("{}", serde_json::to_string_pretty(&composite)?);

    eprintln!(
        "resolved {} slots, {} overlays",
        composite.slots.len(),
        composite.overlays.len()
    );
    Ok(())
}
