// File: crates/chart-core/src/grid.rs
// Summary: Grid/tick layout helpers.

pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 { return vec![start, end]; }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

/// Whole bar indices inside `[from, to]`, thinned to at most `max_ticks` entries.
pub fn bar_ticks(from: f64, to: f64, bar_count: usize, max_ticks: usize) -> Vec<usize> {
    if bar_count == 0 || max_ticks == 0 || !(to > from) { return Vec::new(); }
    let first = from.ceil().max(0.0) as usize;
    let last = to.floor().min((bar_count - 1) as f64);
    if last < first as f64 { return Vec::new(); }
    let last = last as usize;
    let visible = last - first + 1;
    let stride = visible.div_ceil(max_ticks).max(1);
    (first..=last).step_by(stride).collect()
}
