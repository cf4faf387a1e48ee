// File: crates/demo/src/main.rs
// Summary: Demo loads a JSON graph config (and optionally x,y CSV data) and renders it to PNG.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use linegraph_core::{DataValue, Datum, GraphConfig};
use linegraph_render_skia::SkiaRenderer;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "linegraph-demo", about = "Render a line graph to PNG")]
struct Args {
    /// Graph config (JSON)
    #[arg(long, value_name = "FILE")]
    config: PathBuf,

    /// CSV with `x,y` columns; replaces the config's data
    #[arg(long, value_name = "FILE")]
    data: Option<PathBuf>,

    /// Output PNG path
    #[arg(long, default_value = "target/out/linegraph.png")]
    out: PathBuf,

    /// Also dump the computed scene as JSON
    #[arg(long, value_name = "FILE")]
    scene: Option<PathBuf>,

    /// Skip text rendering
    #[arg(long)]
    no_text: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();
    let raw = std::fs::read_to_string(&args.config)
        .with_context(|| format!("reading config {}", args.config.display()))?;
    let mut config = GraphConfig::from_json_str(&raw)
        .with_context(|| format!("parsing config {}", args.config.display()))?;

    if let Some(csv_path) = &args.data {
        config.data = load_xy_csv(csv_path).with_context(|| format!("failed to load CSV '{}'", csv_path.display()))?;
        info!(rows = config.data.len(), path = %csv_path.display(), "loaded data");
    }
    if config.data.is_empty() {
        warn!("config has no data; using a sample series");
        config.data = sample_data();
    }

    let graph = config.into_graph()?;
    let scene = graph.render()?;

    if let Some(scene_path) = &args.scene {
        let json = serde_json::to_string_pretty(&scene)?;
        write_file(scene_path, json.as_bytes())?;
        info!(path = %scene_path.display(), "wrote scene");
    }

    let renderer = if args.no_text { SkiaRenderer::without_text() } else { SkiaRenderer::new() };
    renderer.render_to_png(&scene, &args.out)?;
    info!(path = %args.out.display(), "wrote png");
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
}

/// A number, or an RFC 3339 timestamp.
fn parse_cell(s: &str) -> Result<DataValue> {
    let s = s.trim();
    if let Ok(v) = s.parse::<f64>() {
        return Ok(DataValue::Number(v));
    }
    let date = DateTime::parse_from_rfc3339(s).with_context(|| format!("`{s}` is neither a number nor RFC 3339"))?;
    Ok(DataValue::Date(date.with_timezone(&Utc)))
}

/// Load `x,y` rows; falls back to the first two columns when the headers are named differently.
fn load_xy_csv(path: &Path) -> Result<Vec<Datum>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(|h| h.to_lowercase()).collect::<Vec<_>>();
    if headers.len() < 2 {
        bail!("expected at least two columns, found {:?}", headers);
    }
    let find = |name: &str, fallback: usize| headers.iter().position(|h| h == name).unwrap_or(fallback);
    let (xi, yi) = (find("x", 0), find("y", 1));

    let mut out = Vec::new();
    for (row, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let (Some(x), Some(y)) = (rec.get(xi), rec.get(yi)) else {
            bail!("row {} is missing a column", row + 1);
        };
        out.push(Datum { x: parse_cell(x)?, y: parse_cell(y)? });
    }
    Ok(out)
}

fn sample_data() -> Vec<Datum> {
    (0..24)
        .map(|i| {
            let x = i as f64;
            Datum::xy(x, (x * 0.45).sin() * 8.0 + 10.0 + x * 0.25)
        })
        .collect()
}
