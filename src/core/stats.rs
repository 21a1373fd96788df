//! Batch descriptive statistics

use serde::{Deserialize, Serialize};

/// Mean and population standard deviation of a batch, rounded for reporting
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchStats {
    pub average: f64,
    pub std_dev: f64,
}

/// Compute rounded mean and population standard deviation
///
/// An empty batch yields zeros rather than NaN.
pub fn batch_stats(samples: &[f64]) -> BatchStats {
    if samples.is_empty() {
        return BatchStats::default();
    }

    let mean = mean(samples);
    let std_dev = population_std_dev(samples, mean);

    BatchStats {
        average: round2(mean),
        std_dev: round2(std_dev),
    }
}

/// Arithmetic mean, unrounded; `0.0` for an empty slice
///
/// Finite input always gives a finite mean, even when the plain sum
/// overflows.
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let n = samples.len() as f64;
    let sum: f64 = samples.iter().sum();
    if sum.is_finite() {
        sum / n
    } else {
        samples.iter().map(|x| x / n).sum()
    }
}

/// σ = sqrt(Σ(x - μ)² / n)
fn population_std_dev(samples: &[f64], mean: f64) -> f64 {
    let n = samples.len() as f64;
    let sum_sq: f64 = samples.iter().map(|x| (x - mean).powi(2)).sum();
    let std_dev = (sum_sq / n).sqrt();
    if std_dev.is_finite() {
        return std_dev;
    }

    // Squares overflowed; redo the computation on samples scaled into [-1, 1]
    let scale = samples.iter().fold(0.0_f64, |m, x| m.max(x.abs()));
    if scale == 0.0 || !scale.is_finite() {
        return std_dev;
    }
    let scaled: Vec<f64> = samples.iter().map(|x| x / scale).collect();
    let scaled_mean = self::mean(&scaled);
    let sum_sq: f64 = scaled.iter().map(|x| (x - scaled_mean).powi(2)).sum();
    scale * (sum_sq / n).sqrt()
}

/// Round to 2 decimal places, halves away from zero
///
/// Values too large to scale by 100 have no fractional digits and are
/// returned unchanged.
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / 100.0
}
