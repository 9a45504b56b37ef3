// File: crates/chart-sandbox/src/render.rs
// Summary: Composite rendering of the three panes stacked top to bottom on one raster
// surface, with the crosshair and tooltip drawn over the price pane.

use anyhow::{anyhow, Result};
use chart_core::chart::encode_png;
use chart_core::geometry::stack_rows;
use chart_core::{RectI32, Theme};
use skia_safe as skia;

use crate::config::EngineConfig;
use crate::pane::PaneId;
use crate::sandbox::Sandbox;
use crate::tooltip::{Direction, Tooltip};

pub(crate) fn composite_png(sandbox: &Sandbox) -> Result<Vec<u8>> {
    let config = sandbox.config();
    let (w, h) = (config.width, config.total_height());
    let mut surface = skia::surfaces::raster_n32_premul((w, h))
        .ok_or_else(|| anyhow!("failed to create {w}x{h} raster surface"))?;
    let canvas = surface.canvas();

    for (pane, row) in sandbox.panes().iter().zip(pane_rows(config)) {
        let mut opts = pane.options().clone();
        let is_price = pane.id() == PaneId::Price;
        if is_price {
            opts.crosshair = sandbox.crosshair();
        }
        canvas.save();
        canvas.translate((row.left as f32, row.top as f32));
        canvas.clip_rect(skia::Rect::from_wh(row.width() as f32, row.height() as f32), skia::ClipOp::Intersect, false);
        pane.chart().render_onto(canvas, &opts);
        if is_price {
            draw_legend(canvas, &opts.theme, opts.insets.left as f32, opts.insets.top as f32, sandbox);
        }
        canvas.restore();
    }
    encode_png(&mut surface)
}

/// Where each pane sits on the composite surface, in `PaneId::ALL` order.
pub(crate) fn pane_rows(config: &EngineConfig) -> Vec<RectI32> {
    stack_rows(config.width, &PaneId::ALL.map(|p| config.pane_height(p)))
}

/// Ticker on the first line, tooltip (if any) on the second.
fn draw_legend(canvas: &skia::Canvas, theme: &Theme, left: f32, top: f32, sandbox: &Sandbox) {
    let mut font = skia::Font::default();
    font.set_size(12.0);
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_color(theme.axis_label);

    let x = left + 8.0;
    let ticker = &sandbox.dataset().meta.ticker;
    if !ticker.is_empty() {
        canvas.draw_str(ticker, (x, top + 16.0), &font, &paint);
    }
    if let Some(tip) = sandbox.tooltip() {
        draw_tooltip(canvas, theme, &font, (x, top + 34.0), tip);
    }
}

fn draw_tooltip(canvas: &skia::Canvas, theme: &Theme, font: &skia::Font, origin: (f32, f32), tip: &Tooltip) {
    let close_color = match tip.direction {
        Direction::Up => theme.candle_up,
        Direction::Down => theme.candle_down,
    };
    let parts = [
        (format!("O {} H {} L {} C ", tip.open, tip.high, tip.low), theme.tooltip_text),
        (tip.close.clone(), close_color),
        (format!(" {}", tip.change), close_color),
        (format!(" Vol {}", tip.volume), theme.tooltip_text),
    ];

    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    let widths: Vec<f32> = parts.iter().map(|(text, _)| font.measure_str(text, Some(&paint)).0).collect();
    let total: f32 = widths.iter().sum();

    let (x0, baseline) = origin;
    let mut bg = skia::Paint::default();
    bg.set_color(theme.tooltip_background);
    canvas.draw_rect(skia::Rect::from_xywh(x0 - 4.0, baseline - 14.0, total + 8.0, 19.0), &bg);

    let mut x = x0;
    for ((text, color), w) in parts.iter().zip(widths) {
        paint.set_color(*color);
        canvas.draw_str(text, (x, baseline), font, &paint);
        x += w;
    }
}
