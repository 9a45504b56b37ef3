// File: crates/demo/src/main.rs
// Summary: Demo host app. Loads OHLCV CSV (or synthesizes candles), mounts the host controller
// and the rendering sandbox on either side of the bridge, runs a short scripted session and
// writes a PNG frame after each step.
// Usage: constellation-demo [candles.csv] [engine.toml]

mod indicators;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chart_bridge::{channel, Candle, ChartDataset, Meta, OverlayKey};
use chart_host::{HostController, HostView, TimeRange};
use chart_sandbox::{EngineConfig, PaneId, PaneInput, Sandbox};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let csv_arg = args.next();
    let config = match args.next() {
        Some(path) => EngineConfig::from_file(&path).with_context(|| format!("loading engine config '{path}'"))?,
        None => EngineConfig::default(),
    };

    let (ticker, candles) = match csv_arg.as_deref() {
        Some(raw) => {
            let (path, used_alt) = resolve_path(raw)?;
            info!(path = %path.display(), used_alt, "loading candles");
            let candles = load_ohlcv_csv(&path).with_context(|| format!("failed to load CSV '{}'", path.display()))?;
            if candles.is_empty() {
                anyhow::bail!("no candles loaded; check headers/delimiter.");
            }
            (ticker_from(&path), candles)
        }
        None => {
            info!("no CSV given; using synthetic candles");
            ("DEMO".to_string(), synthetic_candles(2_000))
        }
    };
    info!(ticker = %ticker, candles = candles.len(), "candles ready");

    let out_dir = PathBuf::from("target/out");
    let frame = |sandbox: &Sandbox, name: &str| -> Result<()> {
        let path = out_dir.join(format!("panes_{}_{name}.png", ticker.to_lowercase()));
        sandbox.render_png(&path)?;
        info!(path = %path.display(), "wrote frame");
        Ok(())
    };

    let (tx, rx) = channel();
    let mut host = HostController::new(tx);
    host.receive_dataset(dataset_for(&ticker, &candles, host.range()));

    let HostView::Sandbox(init) = host.view()? else {
        anyhow::bail!("host still loading after receiving a dataset");
    };
    let mut sandbox = Sandbox::mount(&init, rx, config)?;
    frame(&sandbox, "01_initial")?;

    host.toggle_overlay(OverlayKey::Bb);
    host.set_overlay(OverlayKey::Sma200, true);
    host.toggle_overlay(OverlayKey::Sma50);
    let report = sandbox.pump();
    info!(applied = report.applied, dropped = report.dropped, "overlay commands");
    frame(&sandbox, "02_overlays")?;

    let cursor = sandbox.config().width as f64 * 0.75;
    sandbox.handle_input(PaneId::Oscillator, PaneInput::Zoom { wheel_lines: 4.0, cursor_x: cursor });
    sandbox.handle_input(PaneId::Divergence, PaneInput::Pan { dx_px: 120.0 });
    let mid = sandbox.config().width as f32 * 0.5;
    sandbox.handle_input(PaneId::Price, PaneInput::PointerMove { x: mid, y: 120.0 });
    match sandbox.tooltip() {
        Some(tip) => info!(t = tip.time, "{tip}"),
        None => warn!("no candle under the pointer"),
    }
    frame(&sandbox, "03_interactive")?;

    if host.select_range(TimeRange::OneYear) {
        host.receive_dataset(dataset_for(&ticker, &candles, host.range()));
    }
    let report = sandbox.pump();
    info!(applied = report.applied, range = %host.range(), "range change");
    frame(&sandbox, "04_range")?;

    sandbox.teardown();
    info!(emitted = host.emitted(), "done");
    Ok(())
}

/// Shape the candles that fall inside `range` (counted back from the last candle) into a dataset.
fn dataset_for(ticker: &str, all: &[Candle], range: TimeRange) -> ChartDataset {
    let candles: Vec<Candle> = match (range.days(), all.last()) {
        (Some(days), Some(last)) => {
            let start = last.t - i64::from(days) * 86_400;
            all.iter().filter(|c| c.t > start).copied().collect()
        }
        _ => all.to_vec(),
    };
    let resolution = match candles.windows(2).next() {
        Some(w) if w[1].t - w[0].t < 86_400 => format!("{}m", (w[1].t - w[0].t) / 60),
        _ => "1d".to_string(),
    };
    let meta = Meta { ticker: ticker.to_string(), resolution, range: range.label().to_string(), candle_count: 0 };
    let overlays = indicators::overlays(&candles);
    let indicators = indicators::indicators(&candles);
    ChartDataset::from_candles(meta, candles).with_overlays(overlays).with_indicators(indicators)
}

/// Deterministic random walk, one candle per day.
fn synthetic_candles(n: usize) -> Vec<Candle> {
    let mut price = 100.0_f64;
    let mut seed = 0x2545_f491_u64;
    (0..n)
        .map(|i| {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            let r = (seed % 10_000) as f64 / 10_000.0 - 0.5;
            let o = price;
            let c = (o * (1.0 + r * 0.04)).max(1.0);
            let h = o.max(c) * (1.0 + (seed % 97) as f64 / 4_000.0);
            let l = o.min(c) * (1.0 - (seed % 89) as f64 / 4_000.0);
            price = c;
            Candle { t: 1_500_000_000 + i as i64 * 86_400, o, h, l, c, v: 50_000.0 + (seed % 2_000_000) as f64 }
        })
        .collect()
}

/// Resolve path, trying .csv/.cvs swap if needed.
/// Returns (actual_path, used_alt)
fn resolve_path(raw: &str) -> Result<(PathBuf, bool)> {
    let p = Path::new(raw);
    if p.exists() {
        return Ok((p.to_path_buf(), false));
    }
    if let Some(alt) = swap_ext(p) {
        if alt.exists() {
            return Ok((alt, true));
        }
    }
    anyhow::bail!("file not found: {}", p.display());
}

fn swap_ext(p: &Path) -> Option<PathBuf> {
    let mut alt = p.to_path_buf();
    let ext = p.extension()?.to_string_lossy().to_lowercase();
    match ext.as_str() {
        "cvs" => alt.set_extension("csv"),
        "csv" => alt.set_extension("cvs"),
        _ => return None,
    };
    Some(alt)
}

/// Ticker guess from a Binance-style file name (`exchange_SYMBOL_...`).
fn ticker_from(path: &Path) -> String {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("chart");
    let mut parts = stem.split('_');
    match (parts.next(), parts.next()) {
        (Some(_), Some(symbol)) if !symbol.is_empty() => symbol.to_uppercase(),
        (Some(first), _) => first.to_uppercase(),
        _ => "CHART".to_string(),
    }
}

/// Load Binance-like OHLCV CSV. Rows without a usable time or OHLC are skipped; a missing
/// volume column reads as 0.
fn load_ohlcv_csv(path: &Path) -> Result<Vec<Candle>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(|h| h.trim().to_lowercase()).collect::<Vec<_>>();
    let idx = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));

    let i_time = idx(&["time", "timestamp", "open_time", "date", "datetime"]);
    let i_open = idx(&["open", "o"]);
    let i_high = idx(&["high", "h"]);
    let i_low = idx(&["low", "l"]);
    let i_close = idx(&["close", "c", "adj_close", "close_price"]);
    let i_volume = idx(&["volume", "vol", "v", "base_volume"]);

    if i_time.is_none() || i_open.is_none() || i_high.is_none() || i_low.is_none() || i_close.is_none() {
        warn!(?headers, "could not find one of time/open/high/low/close columns");
    }

    let mut out = Vec::new();
    let mut skipped = 0usize;
    for rec in rdr.records() {
        let rec = rec?;
        let parse = |i: Option<usize>| -> Option<f64> { i.and_then(|ix| rec.get(ix)).and_then(|s| s.trim().parse::<f64>().ok()) };
        let t = i_time.and_then(|ix| rec.get(ix)).and_then(parse_epoch_seconds);
        match (t, parse(i_open), parse(i_high), parse(i_low), parse(i_close)) {
            (Some(t), Some(o), Some(h), Some(l), Some(c)) => {
                out.push(Candle { t, o, h, l, c, v: parse(i_volume).unwrap_or(0.0) });
            }
            _ => skipped += 1,
        }
    }
    if skipped > 0 {
        warn!(skipped, "rows without time or OHLC skipped");
    }
    Ok(out)
}

fn parse_epoch_seconds(s: &str) -> Option<i64> {
    let n = s.trim().parse::<i64>().ok()?;
    // epoch ms -> sec
    Some(if n > 10_i64.pow(12) { n / 1000 } else { n })
}
