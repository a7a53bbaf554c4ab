//! Histogram binning and kernel density overlay for the GDP distribution.

use statrs::distribution::{Continuous, Normal};
use statrs::statistics::Statistics;

/// Equal-width histogram over the range of the data.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub min: f64,
    pub bin_width: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin `values` into `bins` equal-width bins spanning `[min, max]`.
    ///
    /// The last bin is closed on the right. Non-finite values are skipped.
    /// A constant sample is binned over `[v - 0.5, v + 0.5]`.
    pub fn from_values(values: &[f64], bins: usize) -> Self {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() || bins == 0 {
            return Self {
                min: 0.0,
                bin_width: 0.0,
                counts: Vec::new(),
            };
        }

        let mut lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let mut hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let bin_width = (hi - lo) / bins as f64;
        let mut counts = vec![0usize; bins];
        for v in &finite {
            let idx = (((v - lo) / bin_width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Self {
            min: lo,
            bin_width,
            counts,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn max(&self) -> f64 {
        self.min + self.bin_width * self.counts.len() as f64
    }

    pub fn bin_centers(&self) -> Vec<f64> {
        (0..self.counts.len())
            .map(|i| self.min + (i as f64 + 0.5) * self.bin_width)
            .collect()
    }

    /// Gaussian KDE of `values` (Scott's bandwidth), scaled to bar height so
    /// it can be drawn over this histogram. Evaluated at `points` positions
    /// across the histogram range.
    pub fn density_curve(&self, values: &[f64], points: usize) -> Vec<[f64; 2]> {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        let n = finite.len();
        if n < 2 || points < 2 || self.is_empty() {
            return Vec::new();
        }

        let std_dev = finite.iter().std_dev();
        if !(std_dev > 0.0) {
            return Vec::new();
        }
        let bandwidth = std_dev * (n as f64).powf(-0.2);
        let Ok(kernel) = Normal::new(0.0, bandwidth) else {
            return Vec::new();
        };

        let scale = self.bin_width;
        let step = (self.max() - self.min) / (points - 1) as f64;
        (0..points)
            .map(|i| {
                let x = self.min + i as f64 * step;
                let density: f64 = finite.iter().map(|v| kernel.pdf(x - v)).sum();
                [x, density * scale]
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_sum_to_number_of_values() {
        let values: Vec<f64> = (0..100).map(|i| i as f64 * 1.7).collect();
        let hist = Histogram::from_values(&values, 30);
        assert_eq!(hist.counts.len(), 30);
        assert_eq!(hist.total(), 100);
    }

    #[test]
    fn maximum_lands_in_last_bin() {
        let hist = Histogram::from_values(&[0.0, 1.0, 2.0, 10.0], 5);
        assert_eq!(hist.counts, vec![2, 1, 0, 0, 1]);
        assert!((hist.bin_width - 2.0).abs() < 1e-12);
        assert!((hist.max() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn constant_and_empty_samples() {
        let hist = Histogram::from_values(&[7.0, 7.0], 4);
        assert_eq!(hist.total(), 2);
        assert!((hist.min - 6.5).abs() < 1e-12);
        assert!(hist.density_curve(&[7.0, 7.0], 50).is_empty());

        let empty = Histogram::from_values(&[f64::NAN], 30);
        assert!(empty.is_empty());
        assert!(empty.density_curve(&[], 50).is_empty());
    }

    #[test]
    fn density_curve_is_non_negative_and_count_scaled() {
        let values: Vec<f64> = (0..200).map(|i| ((i * 37) % 101) as f64).collect();
        let hist = Histogram::from_values(&values, 20);
        let curve = hist.density_curve(&values, 100);
        assert_eq!(curve.len(), 100);
        assert!(curve.iter().all(|[_, y]| *y >= 0.0));

        // Area under the curve approximates the area of the bars.
        let step = curve[1][0] - curve[0][0];
        let area: f64 = curve.iter().map(|[_, y]| y * step).sum();
        let bars = hist.total() as f64 * hist.bin_width;
        assert!(area > 0.7 * bars && area < 1.05 * bars);
    }
}
