//! Skin Studio
//!
//! Headless driver for the projection state controller.
//!
//! ```text
//! skin_studio <model.gltf|glb> <script.txt> [--settings settings.json] [--out canvas.png]
//! ```
//!
//! The script holds one command per line (see `mantle::studio::command`).
//! After the script has run, the hand-drawn canvas is saved as PNG and a
//! per-part UV summary is printed as JSON.

use std::path::PathBuf;

use anyhow::Context;
use mantle::{AssetServer, Command, ProjectionStateController, StudioSettings};

struct Args {
    model: String,
    script: PathBuf,
    settings: Option<PathBuf>,
    out: PathBuf,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut positional = Vec::new();
    let mut settings = None;
    let mut out = PathBuf::from("canvas.png");

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--settings" => settings = Some(PathBuf::from(args.next().context("--settings needs a path")?)),
            "--out" => out = PathBuf::from(args.next().context("--out needs a path")?),
            _ => positional.push(arg),
        }
    }

    let [model, script] = <[String; 2]>::try_from(positional).map_err(|_| {
        anyhow::anyhow!("usage: skin_studio <model> <script> [--settings settings.json] [--out canvas.png]")
    })?;

    Ok(Args {
        model,
        script: PathBuf::from(script),
        settings,
        out,
    })
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args()?;
    let summary = run(&args)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}

/// Runs the script and writes the canvas. A model that fails to load is
/// reported and the script runs without one.
fn run(args: &Args) -> anyhow::Result<serde_json::Value> {
    let settings = match &args.settings {
        Some(path) => StudioSettings::load(path)?,
        None => StudioSettings::default(),
    };

    let mut studio = ProjectionStateController::new(AssetServer::new(), settings);
    if let Err(e) = studio.load_model(&args.model) {
        log::error!("Continuing without a model: {e}");
    }

    let script = std::fs::read_to_string(&args.script)
        .with_context(|| format!("Failed to read script {}", args.script.display()))?;
    let commands = Command::parse_script(&script)?;
    log::info!("Running {} commands", commands.len());

    for command in commands {
        let name = command.name();
        // Failed uploads keep the previous texture; keep going.
        if let Err(e) = studio.execute(command) {
            log::warn!("'{name}' failed: {e}");
        }
    }

    studio
        .canvas()
        .to_rgba_image()
        .save(&args.out)
        .with_context(|| format!("Failed to write {}", args.out.display()))?;
    log::info!("Canvas written to {}", args.out.display());

    let parts: Vec<serde_json::Value> = studio
        .model()
        .map(|model| model.parts())
        .unwrap_or_default()
        .iter()
        .map(|part| {
            let uvs = part.geometry.uvs().unwrap_or_default();
            let (min, max) = uvs.iter().fold(([1.0f32; 2], [0.0f32; 2]), |(lo, hi), uv| {
                ([lo[0].min(uv[0]), lo[1].min(uv[1])], [hi[0].max(uv[0]), hi[1].max(uv[1])])
            });
            serde_json::json!({
                "name": part.name,
                "vertices": part.geometry.vertex_count(),
                "uv_min": min,
                "uv_max": max,
            })
        })
        .collect();

    Ok(serde_json::json!({
        "model": studio.model().map(|m| m.name.clone()),
        "projection": studio.kind().to_string(),
        "draw_mode": studio.draw_mode(),
        "texture_source": format!("{:?}", studio.active_source()),
        "proxy": studio.proxy().map(|p| p.kind.to_string()),
        "parts": parts,
    }))
}
