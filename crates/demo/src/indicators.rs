// File: crates/demo/src/indicators.rs
// Summary: Stand-in for the backend: simple SMA, Bollinger, RSI and MACD over closes so the
// demo has overlays and indicators to send. Points start once each window has warmed up.

use chart_bridge::{BandPoint, Candle, Indicators, LinePoint, MacdPoint, Overlays};

pub fn overlays(candles: &[Candle]) -> Overlays {
    Overlays {
        sma20: Some(sma(candles, 20)),
        sma50: Some(sma(candles, 50)),
        sma200: Some(sma(candles, 200)),
        bollinger_bands: Some(bollinger(candles, 20, 2.0)),
    }
}

pub fn indicators(candles: &[Candle]) -> Indicators {
    Indicators { rsi: Some(rsi(candles, 14)), macd: Some(macd(candles, 12, 26, 9)) }
}

fn sma(candles: &[Candle], period: usize) -> Vec<LinePoint> {
    if period == 0 || candles.len() < period {
        return Vec::new();
    }
    candles
        .windows(period)
        .map(|w| LinePoint { t: w[period - 1].t, v: w.iter().map(|c| c.c).sum::<f64>() / period as f64 })
        .collect()
}

fn bollinger(candles: &[Candle], period: usize, k: f64) -> Vec<BandPoint> {
    if period == 0 || candles.len() < period {
        return Vec::new();
    }
    candles
        .windows(period)
        .map(|w| {
            let mean = w.iter().map(|c| c.c).sum::<f64>() / period as f64;
            let var = w.iter().map(|c| (c.c - mean).powi(2)).sum::<f64>() / period as f64;
            let sd = var.sqrt();
            BandPoint { t: w[period - 1].t, upper: mean + k * sd, middle: mean, lower: mean - k * sd }
        })
        .collect()
}

/// Wilder-smoothed RSI.
fn rsi(candles: &[Candle], period: usize) -> Vec<LinePoint> {
    if period == 0 || candles.len() <= period {
        return Vec::new();
    }
    let deltas: Vec<f64> = candles.windows(2).map(|w| w[1].c - w[0].c).collect();
    let mut gain = deltas[..period].iter().map(|d| d.max(0.0)).sum::<f64>() / period as f64;
    let mut loss = deltas[..period].iter().map(|d| (-d).max(0.0)).sum::<f64>() / period as f64;
    let value = |gain: f64, loss: f64| if loss == 0.0 { 100.0 } else { 100.0 - 100.0 / (1.0 + gain / loss) };

    let mut out = vec![LinePoint { t: candles[period].t, v: value(gain, loss) }];
    for (i, d) in deltas.iter().enumerate().skip(period) {
        gain = (gain * (period - 1) as f64 + d.max(0.0)) / period as f64;
        loss = (loss * (period - 1) as f64 + (-d).max(0.0)) / period as f64;
        out.push(LinePoint { t: candles[i + 1].t, v: value(gain, loss) });
    }
    out
}

fn ema(values: &[f64], period: usize) -> Vec<f64> {
    let alpha = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut prev = match values.first() {
        Some(&v) => v,
        None => return out,
    };
    for &v in values {
        prev = alpha * v + (1.0 - alpha) * prev;
        out.push(prev);
    }
    out
}

fn macd(candles: &[Candle], fast: usize, slow: usize, signal: usize) -> Vec<MacdPoint> {
    if candles.len() < slow {
        return Vec::new();
    }
    let closes: Vec<f64> = candles.iter().map(|c| c.c).collect();
    let line: Vec<f64> = ema(&closes, fast).iter().zip(ema(&closes, slow)).map(|(f, s)| f - s).collect();
    let sig = ema(&line[slow - 1..], signal);
    candles[slow - 1..]
        .iter()
        .zip(&line[slow - 1..])
        .zip(sig)
        .map(|((c, &value), signal)| MacdPoint { t: c.t, value, signal, histogram: value - signal })
        .collect()
}
