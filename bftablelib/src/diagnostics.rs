//! Numeric diagnostics for MCMC parameter chains.
//!
//! The computation behind trace/histogram panels, with no rendering:
//! histogram binning with the Freedman–Diaconis width over a padded
//! domain, and kernel density estimation with a Silverman-rule
//! bandwidth. Bin heights are density-scaled so the KDE curve overlays
//! the bars directly.

use serde::{Deserialize, Serialize};

/// One histogram bin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    /// Left edge
    pub start: f64,
    /// Sample count
    pub count: usize,
    /// `(count / n) / width`, comparable to a density curve
    pub density: f64,
}

/// A density-scaled histogram over a padded sample domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
    pub bin_width: f64,
    /// Domain start: data minimum padded down by 20% of the range
    pub x_min: f64,
    /// Domain end: data maximum padded up by 20% of the range
    pub x_max: f64,
}

/// Smoothing kernel for density estimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Kernel {
    Gaussian,
    Epanechnikov,
}

impl Kernel {
    /// Kernel response at distance `u` with the given bandwidth.
    pub fn evaluate(&self, u: f64, bandwidth: f64) -> f64 {
        match self {
            Kernel::Gaussian => {
                let z = u / bandwidth;
                (1.0 / (2.0 * std::f64::consts::PI).sqrt()) * (-0.5 * z * z).exp() / bandwidth
            }
            Kernel::Epanechnikov => {
                let z = u / bandwidth;
                if z.abs() <= 1.0 {
                    0.75 * (1.0 - z * z) / bandwidth
                } else {
                    0.0
                }
            }
        }
    }
}

/// Build a histogram of a sample chain.
///
/// Bin width follows Freedman–Diaconis (`2·IQR/n^(1/3)`); the domain is
/// the data range padded by 20% on each side. Returns `None` for
/// samples too small or too degenerate to bin (fewer than two points,
/// zero range, or zero IQR).
pub fn histogram(samples: &[f64]) -> Option<Histogram> {
    if samples.len() < 2 {
        return None;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);

    let data_min = sorted[0];
    let data_max = sorted[sorted.len() - 1];
    let range = data_max - data_min;
    let (q1, _, q3) = quartiles(&sorted);
    let iqr = q3 - q1;
    let bin_width = 2.0 * iqr / (samples.len() as f64).powf(1.0 / 3.0);
    if !(bin_width > 0.0) || !(range > 0.0) {
        return None;
    }

    let x_min = data_min - range * 0.2;
    let x_max = data_max + range * 0.2;
    let n_bins = ((x_max - x_min) / bin_width).ceil() as usize;

    let mut counts = vec![0usize; n_bins];
    for &x in samples {
        let mut bin = ((x - x_min) / bin_width) as usize;
        if bin >= n_bins {
            bin = n_bins - 1;
        }
        counts[bin] += 1;
    }

    let n = samples.len() as f64;
    let bins = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: x_min + i as f64 * bin_width,
            count,
            density: (count as f64 / n) / bin_width,
        })
        .collect();

    Some(Histogram {
        bins,
        bin_width,
        x_min,
        x_max,
    })
}

/// Silverman's rule-of-thumb bandwidth: `1.06·sd·n^(-1/5)`.
pub fn silverman_bandwidth(samples: &[f64]) -> f64 {
    1.06 * stdev(samples) * (samples.len() as f64).powf(-0.2)
}

/// Evaluate a kernel density estimate over `points` evenly spaced grid
/// positions spanning the padded sample domain. Each estimate is the
/// mean kernel response across the whole sample.
pub fn kernel_density(
    samples: &[f64],
    kernel: Kernel,
    bandwidth: f64,
    points: usize,
) -> Vec<(f64, f64)> {
    if samples.is_empty() || points < 2 || !(bandwidth > 0.0) {
        return Vec::new();
    }
    let data_min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let data_max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = data_max - data_min;
    let x_min = data_min - range * 0.2;
    let x_max = data_max + range * 0.2;
    let step = (x_max - x_min) / (points - 1) as f64;
    let n = samples.len() as f64;

    (0..points)
        .map(|i| {
            let x = x_min + i as f64 * step;
            let density = samples.iter().map(|&v| kernel.evaluate(x - v, bandwidth)).sum::<f64>() / n;
            (x, density)
        })
        .collect()
}

/// First, second, and third quartiles of an already sorted slice,
/// by nearest-rank interpolation.
pub fn quartiles(sorted: &[f64]) -> (f64, f64, f64) {
    (
        quantile(sorted, 0.25),
        quantile(sorted, 0.5),
        quantile(sorted, 0.75),
    )
}

fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = pos - lo as f64;
        sorted[lo] * (1.0 - frac) + sorted[hi] * frac
    }
}

/// Sample standard deviation.
pub fn stdev(samples: &[f64]) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }
    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let ss = samples.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>();
    (ss / (n - 1.0)).sqrt()
}
