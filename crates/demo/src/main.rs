// File: crates/demo/src/main.rs
// Summary: Demo loads an annotation config, replays a CSV of pointer events with logged callbacks, and renders a PNG.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use annotation_core::types::Insets;
use annotation_core::{
    theme, AnnotationState, Chart, ChartArea, EventContext, Hook, LinearScale, PluginOptions, PointerEvent,
    PointerEventKind, Scale, ScaleConfig,
};
use annotation_render_skia::{render_to_png, RenderOptions};
use log::{info, warn, LevelFilter};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct DemoConfig {
    #[serde(default = "default_theme")]
    theme: String,
    width: i32,
    height: i32,
    scales: Vec<ScaleConfig>,
    plugin: PluginOptions,
}

fn default_theme() -> String {
    "light".to_string()
}

/// One replayed pointer event; `x`/`y` may be blank for `mouseout`.
#[derive(Debug, Deserialize)]
struct EventRow {
    t_ms: u64,
    #[serde(rename = "type")]
    kind: PointerEventKind,
    x: Option<f64>,
    y: Option<f64>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    let config_path = std::env::args().nth(1).map(PathBuf::from).unwrap_or_else(|| data.join("annotations.json"));
    let events_path = std::env::args().nth(2).map(PathBuf::from).unwrap_or_else(|| data.join("events.csv"));
    info!(path:? = config_path; "Using config");

    let raw = std::fs::read_to_string(&config_path)
        .with_context(|| format!("failed to read config '{}'", config_path.display()))?;
    let cfg: DemoConfig = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse config '{}'", config_path.display()))?;

    let theme = theme::find(&cfg.theme);
    let mut chart = Chart::new(ChartArea::from_insets(cfg.width, cfg.height, &Insets::default()));
    for scale in &cfg.scales {
        chart.add_scale(LinearScale::from_config(scale));
    }

    let options = with_logging_handlers(cfg.plugin);
    let mut state = AnnotationState::with_theme(theme);
    state.update(&mut chart, &options);
    info!(annotations = state.elements().len(), scales = cfg.scales.len(); "Chart updated");
    for scale in chart.scales() {
        info!(scale = scale.id(), min:? = scale.min(), max:? = scale.max(); "Scale bounds");
    }

    let events = load_events(&events_path)
        .with_context(|| format!("failed to load events '{}'", events_path.display()))?;
    info!(count = events.len(); "Replaying pointer events");
    let start = Instant::now();
    let mut last = start;
    for row in &events {
        let now = start + Duration::from_millis(row.t_ms);
        state.poll_timers(&chart, now);
        let event = PointerEvent { kind: row.kind, x: row.x.unwrap_or(f64::NAN), y: row.y.unwrap_or(f64::NAN) };
        state.handle_event(&chart, &event, now);
        last = now;
    }
    if let Some(deadline) = state.next_deadline() {
        state.poll_timers(&chart, deadline.max(last));
    }

    let out = out_name_with(&config_path, "annotations");
    let opts = RenderOptions { width: cfg.width, height: cfg.height, theme, ..Default::default() };
    render_to_png(&mut state, &chart, &opts, &out)?;
    info!(path:? = out; "Wrote PNG");
    Ok(())
}

/// Chart-wide fallbacks that log every hook.
fn with_logging_handlers(options: PluginOptions) -> PluginOptions {
    [Hook::Enter, Hook::Leave, Hook::Click, Hook::DblClick].into_iter().fold(options, |opts, hook| {
        opts.on(hook, move |ctx: &EventContext<'_>| {
            let el = ctx.element;
            let id = el.options().id.as_deref().unwrap_or("<unnamed>");
            info!(hook:? = hook, id = id, index = el.index(); "Annotation event");
        })
    })
}

fn load_events(path: &Path) -> Result<Vec<EventRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let mut out = Vec::new();
    for (i, rec) in rdr.deserialize::<EventRow>().enumerate() {
        match rec {
            Ok(row) => out.push(row),
            Err(err) => warn!(row = i + 1, err:% = err; "Skipping malformed event row"),
        }
    }
    Ok(out)
}

/// Produce output file name like target/out/<stem>_<suffix>.png
fn out_name_with(input: &Path, suffix: &str) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("chart");
    let mut out = PathBuf::from("target/out");
    out.push(format!("{stem}_{suffix}.png"));
    out
}
