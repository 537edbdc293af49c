//! Band and linear scales with d3 semantics.

use std::collections::HashMap;

/// Maps discrete labels to evenly spaced, padded bands.
///
/// `padding` is used for both the inner (between bands) and outer (before the
/// first and after the last band) padding, with bands centered in the range.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: Vec<String>,
    index: HashMap<String, usize>,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    pub fn new<I, S>(domain: I, range: (f64, f64), padding: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut labels: Vec<String> = Vec::new();
        let mut index = HashMap::new();
        for label in domain {
            let label = label.into();
            if !index.contains_key(&label) {
                index.insert(label.clone(), labels.len());
                labels.push(label);
            }
        }

        let inner = padding.clamp(0.0, 1.0);
        let outer = padding.max(0.0);
        let n = labels.len() as f64;
        let (r0, r1) = if range.1 < range.0 {
            (range.1, range.0)
        } else {
            range
        };
        let step = (r1 - r0) / (n - inner + outer * 2.0).max(1.0);
        let start = r0 + (r1 - r0 - step * (n - inner)) * 0.5;

        Self {
            domain: labels,
            index,
            start,
            step,
            bandwidth: step * (1.0 - inner),
        }
    }

    /// Left edge of the band for `label`.
    pub fn position(&self, label: &str) -> Option<f64> {
        self.index.get(label).map(|&i| self.start + self.step * i as f64)
    }

    /// Center of the band for `label`.
    pub fn center(&self, label: &str) -> Option<f64> {
        self.position(label).map(|x| x + self.bandwidth / 2.0)
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }
}

/// Maps a continuous domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Domain `[min(0, min(values)), max(values) * headroom]`; empty input
    /// yields `[0, 0]`. Non-negative data always starts at zero.
    pub fn from_max<I>(values: I, headroom: f64, range: (f64, f64)) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let (lo, hi) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Self::new((lo, hi * headroom), range)
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Map `value` into the range. A zero-width domain maps everything to the
    /// start of the range, so an all-zero series draws on the baseline.
    pub fn scale(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 || !span.is_finite() {
            return r0;
        }
        r0 + (value - d0) / span * (r1 - r0)
    }

    /// Roughly `count` round tick values covering the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count)
    }
}

/// Round tick values between `start` and `stop` (1-2-5 steps, powers of ten).
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };

    let Some((i1, i2, inc)) = tick_spec(lo, hi, count as f64) else {
        return Vec::new();
    };
    let mut out: Vec<f64> = (i1..=i2)
        .map(|i| {
            if inc < 0.0 {
                i as f64 / -inc
            } else {
                i as f64 * inc
            }
        })
        .collect();
    if reverse {
        out.reverse();
    }
    out
}

// Returns the first/last tick multiples and the increment. A negative increment
// means "divide by" and keeps sub-unit ticks exact.
fn tick_spec(start: f64, stop: f64, count: f64) -> Option<(i64, i64, f64)> {
    let e10 = 50f64.sqrt();
    let e5 = 10f64.sqrt();
    let e2 = 2f64.sqrt();

    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= e10 {
        10.0
    } else if error >= e5 {
        5.0
    } else if error >= e2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let inv = 10f64.powf(-power) / factor;
        i1 = (start * inv).round() as i64;
        i2 = (stop * inv).round() as i64;
        if (i1 as f64) / inv < start {
            i1 += 1;
        }
        if (i2 as f64) / inv > stop {
            i2 -= 1;
        }
        inc = -inv;
    } else {
        let step = 10f64.powf(power) * factor;
        i1 = (start / step).round() as i64;
        i2 = (stop / step).round() as i64;
        if (i1 as f64) * step < start {
            i1 += 1;
        }
        if (i2 as f64) * step > stop {
            i2 -= 1;
        }
        inc = step;
    }

    if i2 < i1 {
        if (0.5..2.0).contains(&count) {
            return tick_spec(start, stop, count * 2.0);
        }
        return None;
    }
    Some((i1, i2, inc))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn band_scale_matches_d3_padding() {
        let s = BandScale::new(["a", "b", "c", "d", "e"], (0.0, 100.0), 0.2);
        let step = 100.0 / 5.2;
        assert!(close(s.step(), step));
        assert!(close(s.bandwidth(), step * 0.8));
        let first = (100.0 - step * 4.8) / 2.0;
        assert!(close(s.position("a").unwrap(), first));
        assert!(close(s.position("e").unwrap(), first + 4.0 * step));
        assert!(s.position("zzz").is_none());
    }

    #[test]
    fn linear_scale_inverts_pixels() {
        let s = LinearScale::new((0.0, 200.0), (620.0, 0.0));
        assert!(close(s.scale(0.0), 620.0));
        assert!(close(s.scale(200.0), 0.0));
        assert!(close(s.scale(100.0), 310.0));
    }

    #[test]
    fn degenerate_domain_sits_on_baseline() {
        let s = LinearScale::from_max(std::iter::empty(), 2.0, (620.0, 0.0));
        assert_eq!(s.domain(), (0.0, 0.0));
        assert_eq!(s.scale(0.0), 620.0);
        assert_eq!(s.ticks(10), vec![0.0]);
    }

    #[test]
    fn negative_values_extend_domain_below_zero() {
        let s = LinearScale::from_max([-500.0, 1000.0], 1.0, (600.0, 0.0));
        assert_eq!(s.domain(), (-500.0, 1000.0));
        assert!(close(s.scale(0.0), 400.0));
        let s = LinearScale::from_max([3.0, 5.0], 2.0, (600.0, 0.0));
        assert_eq!(s.domain(), (0.0, 10.0));
    }

    #[test]
    fn nice_ticks() {
        assert_eq!(
            ticks(0.0, 100.0, 10),
            vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0]
        );
        let t = ticks(0.0, 12345.0, 10);
        assert_eq!(t.first(), Some(&0.0));
        assert_eq!(t.last(), Some(&12000.0));
        assert_eq!(t.len(), 13);
        assert_eq!(ticks(0.0, 1.0, 5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    }
}
