// File: crates/chart-core/src/chart.rs
// Summary: Pane-level chart: series store, logical time scale with range-change events,
// and the headless Skia raster rendering pipeline.

use anyhow::Result;
use skia_safe as skia;

use crate::axis::Axis;
use crate::grid::{bar_ticks, linspace};
use crate::scale::{TimeScale, ValueScale};
use crate::series::{Candle, PriceLine, Series, SeriesType};
use crate::theme::Theme;
use crate::types::{Insets, HEIGHT, VALUE_MARGIN, WIDTH};
use crate::view::{LogicalRange, TimeIndex};

#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub theme: Theme,
    pub draw_labels: bool,
    /// Crosshair position in pane pixels.
    pub crosshair: Option<(f32, f32)>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            theme: Theme::dark(),
            draw_labels: true,
            crosshair: None,
        }
    }
}

impl RenderOptions {
    pub fn plot_left(&self) -> f64 { self.insets.left as f64 }

    pub fn plot_width(&self) -> f64 { self.insets.inner_width(self.width) as f64 }
}

pub struct Chart {
    series: Vec<Series>,
    pub price_lines: Vec<PriceLine>,
    pub x_axis: Axis,
    pub y_axis: Axis,
    whitespace: Vec<f64>,
    time_index: TimeIndex,
    range: LogicalRange,
    pending_range_events: Vec<LogicalRange>,
    range_events_emitted: u64,
}

impl Default for Chart {
    fn default() -> Self { Self::new() }
}

impl Chart {
    pub fn new() -> Self {
        Self {
            series: Vec::new(),
            price_lines: Vec::new(),
            x_axis: Axis::default_x(),
            y_axis: Axis::default_y(),
            whitespace: Vec::new(),
            time_index: TimeIndex::default(),
            range: LogicalRange::full(0),
            pending_range_events: Vec::new(),
            range_events_emitted: 0,
        }
    }

    /// Add a series, replacing any existing series with the same id.
    pub fn add_series(&mut self, series: Series) {
        match self.series.iter_mut().find(|s| s.id == series.id) {
            Some(slot) => *slot = series,
            None => self.series.push(series),
        }
        self.reindex();
    }

    pub fn series(&self) -> &[Series] { &self.series }

    pub fn series_by_id(&self, id: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.id == id)
    }

    /// Replace the XY data of series `id`. Returns false when no such series exists.
    pub fn set_xy_data(&mut self, id: &str, data: Vec<(f64, f64)>) -> bool {
        self.set_xy_data_colored(id, data, Vec::new())
    }

    /// Replace XY data together with per-point colors (histograms).
    pub fn set_xy_data_colored(&mut self, id: &str, data: Vec<(f64, f64)>, colors: Vec<skia::Color>) -> bool {
        let Some(s) = self.series.iter_mut().find(|s| s.id == id) else { return false };
        s.data_xy = data;
        s.point_colors = colors;
        self.reindex();
        true
    }

    pub fn set_candle_data(&mut self, id: &str, candles: Vec<Candle>) -> bool {
        let Some(s) = self.series.iter_mut().find(|s| s.id == id) else { return false };
        s.data_ohlc = candles;
        self.reindex();
        true
    }

    pub fn set_series_visible(&mut self, id: &str, visible: bool) -> bool {
        let Some(s) = self.series.iter_mut().find(|s| s.id == id) else { return false };
        s.visible = visible;
        true
    }

    pub fn add_price_line(&mut self, line: PriceLine) {
        self.price_lines.push(line);
    }

    /// Timestamps that occupy a bar slot without carrying data, so panes can share
    /// one bar numbering.
    pub fn set_whitespace(&mut self, times: Vec<f64>) {
        self.whitespace = times;
        self.reindex();
    }

    pub fn time_index(&self) -> &TimeIndex { &self.time_index }

    pub fn bar_count(&self) -> usize { self.time_index.len() }

    /// Bar index of timestamp `t`.
    pub fn logical_of(&self, t: f64) -> Option<f64> {
        self.time_index.index_of(t).map(|i| i as f64)
    }

    fn reindex(&mut self) {
        let times = self
            .series
            .iter()
            .flat_map(|s| s.times())
            .chain(self.whitespace.iter().copied());
        self.time_index = TimeIndex::from_times(times);
    }

    // ---- time scale -----------------------------------------------------------

    pub fn visible_range(&self) -> LogicalRange { self.range }

    /// Show all bars. Not user-driven, so no range-change event is recorded.
    pub fn fit_content(&mut self) {
        self.range = LogicalRange::full(self.bar_count());
    }

    /// User-driven range assignment; recorded as a range-change event.
    pub fn set_visible_range(&mut self, range: LogicalRange) {
        self.range = range;
        self.emit_range_changed();
    }

    /// Assign the range without recording a range-change event.
    pub fn set_visible_range_silently(&mut self, range: LogicalRange) {
        self.range = range;
    }

    /// User drag by `dx_px` pixels.
    pub fn pan_by_pixels(&mut self, dx_px: f64, opts: &RenderOptions) -> LogicalRange {
        self.range = self.range.panned(dx_px, opts.plot_width());
        self.emit_range_changed();
        self.range
    }

    /// User wheel zoom around `cursor_x` (pane pixels).
    pub fn zoom_at_pixel(&mut self, scroll: f64, cursor_x: f64, opts: &RenderOptions) -> LogicalRange {
        self.range = self.range.zoomed(scroll, cursor_x, opts.plot_left(), opts.plot_width());
        self.emit_range_changed();
        self.range
    }

    fn emit_range_changed(&mut self) {
        self.pending_range_events.push(self.range);
        self.range_events_emitted += 1;
    }

    /// Drain the "visible range changed" notifications recorded since the last call.
    pub fn take_range_events(&mut self) -> Vec<LogicalRange> {
        std::mem::take(&mut self.pending_range_events)
    }

    /// Total range-change notifications ever recorded.
    pub fn range_events_emitted(&self) -> u64 { self.range_events_emitted }

    pub fn logical_at_pixel(&self, px: f32, opts: &RenderOptions) -> f64 {
        TimeScale::for_range(self.range, opts.plot_left() as f32, opts.plot_width() as f32).from_px(px)
    }

    /// Timestamp of the bar under pixel column `px`, if any.
    pub fn time_at_pixel(&self, px: f32, opts: &RenderOptions) -> Option<f64> {
        self.time_index.time_at(self.logical_at_pixel(px, opts))
    }

    // ---- value scale ----------------------------------------------------------

    /// Value range for the shared scale: fixed when the axis says so, else the visible
    /// data of visible series with a small margin, else the axis defaults.
    pub fn value_range(&self) -> (f64, f64) {
        if let Some(fixed) = self.y_axis.fixed {
            return fixed;
        }
        let shared = self.series.iter().filter(|s| s.visible && s.overlay_scale.is_none());
        match self.visible_extent(shared) {
            Some((lo, hi)) => {
                let m = (hi - lo).abs().max(1e-9) * VALUE_MARGIN;
                (lo - m, hi + m)
            }
            None => (self.y_axis.min, self.y_axis.max),
        }
    }

    fn visible_extent<'a>(&self, series: impl Iterator<Item = &'a Series>) -> Option<(f64, f64)> {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for s in series {
            match s.series_type {
                SeriesType::Line | SeriesType::Histogram => {
                    for &(x, y) in &s.data_xy {
                        if self.in_view(x) && y.is_finite() {
                            lo = lo.min(y);
                            hi = hi.max(y);
                        }
                    }
                    if s.series_type == SeriesType::Histogram && lo.is_finite() {
                        lo = lo.min(s.baseline_value());
                        hi = hi.max(s.baseline_value());
                    }
                }
                SeriesType::Candlestick => {
                    for c in &s.data_ohlc {
                        if self.in_view(c.t) {
                            lo = lo.min(c.l);
                            hi = hi.max(c.h);
                        }
                    }
                }
            }
        }
        (lo.is_finite() && hi.is_finite()).then_some((lo, hi))
    }

    fn in_view(&self, t: f64) -> bool {
        self.logical_of(t).is_some_and(|x| self.range.contains(x))
    }

    // ---- rendering ------------------------------------------------------------

    /// Draw the pane into `canvas` with its top-left corner at the canvas origin.
    pub fn render_onto(&self, canvas: &skia::Canvas, opts: &RenderOptions) {
        let theme = &opts.theme;
        let frame = self.frame(opts);

        let mut bg = skia::Paint::default();
        bg.set_color(theme.background);
        canvas.draw_rect(skia::Rect::from_wh(opts.width as f32, opts.height as f32), &bg);

        draw_grid(canvas, &frame, theme);
        for line in &self.price_lines {
            draw_price_line(canvas, &frame, theme, line, opts.draw_labels);
        }

        canvas.save();
        canvas.clip_rect(frame.rect(), skia::ClipOp::Intersect, true);
        for s in self.series.iter().filter(|s| s.visible && !s.is_empty()) {
            let vs = match s.overlay_scale {
                Some(m) => self.overlay_value_scale(&frame, s, m.top, m.bottom),
                None => frame.vs,
            };
            match s.series_type {
                SeriesType::Line => draw_line_series(canvas, self, &frame, &vs, theme, s),
                SeriesType::Histogram => draw_histogram_series(canvas, self, &frame, &vs, theme, s),
                SeriesType::Candlestick => draw_candle_series(canvas, self, &frame, &vs, theme, s),
            }
        }
        canvas.restore();

        draw_axes(canvas, &frame, theme, &self.x_axis, &self.y_axis);
        if opts.draw_labels {
            self.draw_tick_labels(canvas, &frame, theme);
        }

        if let Some((cx, cy)) = opts.crosshair {
            let mut paint = skia::Paint::default();
            paint.set_color(theme.crosshair);
            paint.set_stroke_width(1.0);
            paint.set_path_effect(skia::PathEffect::dash(&[4.0, 4.0], 0.0));
            canvas.draw_line((cx, frame.t), (cx, frame.b), &paint);
            canvas.draw_line((frame.l, cy), (frame.r, cy), &paint);
        }
    }

    /// Render the pane alone to PNG bytes using a CPU raster surface.
    pub fn render_to_png_bytes(&self, opts: &RenderOptions) -> Result<Vec<u8>> {
        let mut surface = skia::surfaces::raster_n32_premul((opts.width, opts.height))
            .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
        self.render_onto(surface.canvas(), opts);
        encode_png(&mut surface)
    }

    /// Render the chart to a PNG at `output_png_path`.
    pub fn render_to_png(
        &self,
        opts: &RenderOptions,
        output_png_path: impl AsRef<std::path::Path>,
    ) -> Result<()> {
        let data = self.render_to_png_bytes(opts)?;
        if let Some(parent) = output_png_path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output_png_path, data)?;
        Ok(())
    }

    fn frame(&self, opts: &RenderOptions) -> PlotFrame {
        let l = opts.insets.left as f32;
        let r = (opts.width - opts.insets.right as i32) as f32;
        let t = opts.insets.top as f32;
        let b = (opts.height - opts.insets.bottom as i32) as f32;
        let (vmin, vmax) = self.value_range();
        PlotFrame {
            l,
            t,
            r,
            b,
            ts: TimeScale::for_range(self.range, l, r - l),
            vs: ValueScale::new_linear(t, b, vmin, vmax),
        }
    }

    fn overlay_value_scale(&self, frame: &PlotFrame, s: &Series, top: f32, bottom: f32) -> ValueScale {
        let h = frame.b - frame.t;
        let (lo, hi) = self.visible_extent(std::iter::once(s)).unwrap_or((0.0, 1.0));
        ValueScale::new_linear(frame.t + h * top, frame.b - h * bottom, lo.min(0.0), hi)
    }

    fn draw_tick_labels(&self, canvas: &skia::Canvas, frame: &PlotFrame, theme: &Theme) {
        let mut paint = skia::Paint::default();
        paint.set_color(theme.axis_label);
        paint.set_anti_alias(true);
        let mut font = skia::Font::default();
        font.set_size(11.0);

        for v in linspace(frame.vs.vmin, frame.vs.vmax, 5) {
            let y = frame.vs.to_px(v);
            canvas.draw_str(format!("{v:.2}"), (2.0, y + 4.0), &font, &paint);
        }

        let times = self.time_index.times();
        let intraday = times.windows(2).next().is_some_and(|w| w[1] - w[0] < 86_400.0);
        for i in bar_ticks(self.range.from(), self.range.to(), times.len(), 6) {
            let x = frame.ts.to_px(i as f64);
            let label = format_time(times[i], intraday);
            canvas.draw_str(&label, (x - 28.0, frame.b + 16.0), &font, &paint);
        }
    }
}

/// Encode the current contents of `surface` as PNG.
pub fn encode_png(surface: &mut skia::Surface) -> Result<Vec<u8>> {
    let image = surface.image_snapshot();
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
    Ok(data.as_bytes().to_vec())
}

fn format_time(t: f64, intraday: bool) -> String {
    let fmt = if intraday { "%m-%d %H:%M" } else { "%Y-%m-%d" };
    chrono::DateTime::from_timestamp(t as i64, 0)
        .map(|d| d.format(fmt).to_string())
        .unwrap_or_else(|| format!("{t:.0}"))
}

// ---- helpers ----------------------------------------------------------------

struct PlotFrame {
    l: f32,
    t: f32,
    r: f32,
    b: f32,
    ts: TimeScale,
    vs: ValueScale,
}

impl PlotFrame {
    fn rect(&self) -> skia::Rect { skia::Rect::from_ltrb(self.l, self.t, self.r, self.b) }

    /// Body/bar width in pixels (roughly one bar slot).
    fn bar_px(&self) -> f32 { (self.ts.bar_spacing * 0.7).max(1.0) }
}

fn draw_grid(canvas: &skia::Canvas, f: &PlotFrame, theme: &Theme) {
    let mut paint = skia::Paint::default();
    paint.set_color(theme.grid);
    paint.set_anti_alias(true);
    paint.set_stroke_width(1.0);

    // verticals
    for x in linspace(f.l as f64, f.r as f64, 10) {
        canvas.draw_line((x as f32, f.t), (x as f32, f.b), &paint);
    }
    // horizontals
    for y in linspace(f.t as f64, f.b as f64, 5) {
        canvas.draw_line((f.l, y as f32), (f.r, y as f32), &paint);
    }
}

fn draw_axes(canvas: &skia::Canvas, f: &PlotFrame, theme: &Theme, x: &Axis, y: &Axis) {
    let mut axis_paint = skia::Paint::default();
    axis_paint.set_color(theme.axis_line);
    axis_paint.set_anti_alias(true);
    axis_paint.set_stroke_width(1.5);

    // X and Y axis lines
    canvas.draw_line((f.l, f.b), (f.r, f.b), &axis_paint);
    canvas.draw_line((f.l, f.t), (f.l, f.b), &axis_paint);

    // Labels
    let mut paint_text = skia::Paint::default();
    paint_text.set_color(theme.axis_label);
    let mut font = skia::Font::default();
    font.set_size(13.0);

    canvas.draw_str(&x.label, (f.r - 80.0, f.b + 32.0), &font, &paint_text);
    canvas.draw_str(&y.label, (f.l + 6.0, f.t + 14.0), &font, &paint_text);
}

fn draw_price_line(canvas: &skia::Canvas, f: &PlotFrame, theme: &Theme, line: &PriceLine, labels: bool) {
    let y = f.vs.to_px(line.value);
    if y < f.t || y > f.b { return; }
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_stroke_width(1.0);
    paint.set_color(line.color.unwrap_or(theme.reference_line));
    paint.set_path_effect(skia::PathEffect::dash(&[6.0, 4.0], 0.0));
    canvas.draw_line((f.l, y), (f.r, y), &paint);

    if labels && !line.label.is_empty() {
        let mut text = skia::Paint::default();
        text.set_color(theme.axis_label);
        let mut font = skia::Font::default();
        font.set_size(10.0);
        canvas.draw_str(&line.label, (f.r - 40.0, y - 3.0), &font, &text);
    }
}

fn draw_line_series(
    canvas: &skia::Canvas,
    chart: &Chart,
    f: &PlotFrame,
    vs: &ValueScale,
    theme: &Theme,
    series: &Series,
) {
    let window = chart.range;
    let pts: Vec<(f32, f32)> = series
        .data_xy
        .iter()
        .filter(|p| p.1.is_finite())
        .filter_map(|&(t, y)| chart.logical_of(t).map(|x| (x, y)))
        .filter(|&(x, _)| x >= window.from() - 1.0 && x <= window.to() + 1.0)
        .map(|(x, y)| (f.ts.to_px(x), vs.to_px(y)))
        .collect();
    if pts.len() < 2 {
        return;
    }

    let mut path = skia::Path::new();
    path.move_to(pts[0]);
    for &p in pts.iter().skip(1) {
        path.line_to(p);
    }

    let mut stroke = skia::Paint::default();
    stroke.set_anti_alias(true);
    stroke.set_style(skia::paint::Style::Stroke);
    stroke.set_stroke_width(series.line_width);
    stroke.set_color(series.color.unwrap_or(theme.line_stroke));

    canvas.draw_path(&path, &stroke);
}

fn draw_histogram_series(
    canvas: &skia::Canvas,
    chart: &Chart,
    f: &PlotFrame,
    vs: &ValueScale,
    theme: &Theme,
    series: &Series,
) {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);

    let half = f.bar_px() * 0.5;
    let y0 = vs.to_px(series.baseline_value());
    for (i, &(t, y)) in series.data_xy.iter().enumerate() {
        let Some(x) = chart.logical_of(t) else { continue };
        if !chart.range.contains(x) || !y.is_finite() { continue; }
        let color = series
            .point_colors
            .get(i)
            .copied()
            .or(series.color)
            .unwrap_or(theme.histogram);
        paint.set_color(color);
        let px = f.ts.to_px(x);
        let py = vs.to_px(y);
        let rect = skia::Rect::from_ltrb(px - half, py.min(y0), px + half, py.max(y0).max(py.min(y0) + 1.0));
        canvas.draw_rect(rect, &paint);
    }
}

fn draw_candle_series(
    canvas: &skia::Canvas,
    chart: &Chart,
    f: &PlotFrame,
    vs: &ValueScale,
    theme: &Theme,
    series: &Series,
) {
    // style
    let mut wick = skia::Paint::default();
    wick.set_anti_alias(true);
    wick.set_style(skia::paint::Style::Stroke);
    wick.set_stroke_width(1.0);

    let mut body = skia::Paint::default();
    body.set_anti_alias(true);
    body.set_style(skia::paint::Style::Fill);

    let half = f.bar_px() * 0.5;
    for c in &series.data_ohlc {
        let Some(xl) = chart.logical_of(c.t) else { continue };
        if !chart.range.contains(xl) { continue; }
        let x = f.ts.to_px(xl);
        let y_o = vs.to_px(c.o);
        let y_h = vs.to_px(c.h);
        let y_l = vs.to_px(c.l);
        let y_c = vs.to_px(c.c);

        let color = if c.is_up() { theme.candle_up } else { theme.candle_down };
        wick.set_color(color);
        body.set_color(color);

        // wick
        canvas.draw_line((x, y_h), (x, y_l), &wick);

        // body rect
        let top = y_o.min(y_c);
        let bot = y_o.max(y_c);
        let rect = skia::Rect::from_ltrb(x - half, top, x + half, bot.max(top + 1.0));
        canvas.draw_rect(rect, &body);
    }
}
