//! Running statistics for the sampling loop.

/// `k!` as `f64`. Exact for every supported walk length.
pub fn factorial(k: usize) -> f64 {
    (1..=k).fold(1.0, |acc, i| acc * i as f64)
}

/// One-sided 99 % critical value of Student's t-distribution,
/// bucketed by degrees of freedom.
pub fn t_value(df: usize) -> f64 {
    match df {
        0..=4 => 3.747,
        5..=8 => 2.896,
        9..=16 => 2.583,
        17..=32 => 2.457,
        33..=64 => 2.390,
        65..=128 => 2.358,
        _ => 2.326,
    }
}

/// Welford's online mean/variance accumulator.
#[derive(Clone, Debug, Default)]
pub struct Welford {
    count: usize,
    mean: f64,
    m2: f64,
}

impl Welford {
    /// Empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold in one observation.
    #[inline]
    pub fn update(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        let delta2 = value - self.mean;
        self.m2 += delta * delta2;
    }

    /// Observations so far.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Running mean; `0.0` before the first update.
    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Population variance (`m2 / n`); zero before the first update.
    #[inline]
    pub fn variance(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.m2 / self.count as f64
    }

    /// Square root of [`Welford::variance`].
    #[inline]
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }
}

/// Samples of the estimator together with the statistics the stopping rule
/// reads.
///
/// The estimate is the running mean of the samples; its stability is judged
/// by the standard deviation of the sequence of running means.
#[derive(Clone, Debug, Default)]
pub struct SampleStats {
    samples: Vec<f64>,
    samples_acc: Welford,
    means_acc: Welford,
}

impl SampleStats {
    /// Empty statistics with room for `n` samples.
    pub fn with_capacity(n: usize) -> Self {
        SampleStats {
            samples: Vec::with_capacity(n),
            ..Self::default()
        }
    }

    /// Record one sample and update both running statistics.
    pub fn push(&mut self, x: f64) {
        self.samples.push(x);
        self.samples_acc.update(x);
        self.means_acc.update(self.samples_acc.mean());
    }

    /// Number of samples recorded so far.
    #[inline]
    pub fn step(&self) -> usize {
        self.samples.len()
    }

    /// Running mean of the samples. `None` until a sample exists.
    #[inline]
    pub fn mean(&self) -> Option<f64> {
        (self.step() > 0).then(|| self.samples_acc.mean())
    }

    /// Standard deviation of the running means. `None` until a sample exists.
    #[inline]
    pub fn std_dev_of_means(&self) -> Option<f64> {
        (self.step() > 0).then(|| self.means_acc.std_dev())
    }

    /// All samples in insertion order.
    #[inline]
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Consume the statistics, keeping only the samples.
    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }

    /// Confidence check: `mean − t·sd/√step > (1 − ε)·mean`.
    ///
    /// Never fires before the second sample (no degrees of freedom) or while
    /// the mean is zero.
    pub fn is_confident(&self, epsilon: f64) -> bool {
        let step = self.step();
        if step < 2 {
            return false;
        }
        let mean = self.samples_acc.mean();
        if mean <= 0.0 {
            return false;
        }
        let t = t_value(step - 1);
        let sd = self.means_acc.std_dev();
        mean - t * sd / (step as f64).sqrt() > (1.0 - epsilon) * mean
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn factorials() {
        assert_eq!(factorial(0), 1.0);
        assert_eq!(factorial(3), 6.0);
        assert_eq!(factorial(4), 24.0);
        assert_eq!(factorial(7), 5040.0);
        assert_eq!(factorial(10), 3628800.0);
        assert_eq!(factorial(15), 1307674368000.0);
    }

    #[test]
    fn t_table_buckets() {
        assert_eq!(t_value(0), 3.747);
        assert_eq!(t_value(4), 3.747);
        assert_eq!(t_value(5), 2.896);
        assert_eq!(t_value(16), 2.583);
        assert_eq!(t_value(32), 2.457);
        assert_eq!(t_value(64), 2.390);
        assert_eq!(t_value(128), 2.358);
        assert_eq!(t_value(129), 2.326);
    }

    #[test]
    fn welford_matches_two_pass() {
        let xs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let mut w = Welford::new();
        xs.iter().for_each(|&x| w.update(x));
        assert_eq!(w.count(), 8);
        assert_relative_eq!(w.mean(), 5.0, epsilon = 1e-12);
        assert_relative_eq!(w.std_dev(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn running_means() {
        let mut s = SampleStats::with_capacity(3);
        assert_eq!(s.mean(), None);
        assert_eq!(s.std_dev_of_means(), None);

        s.push(2.0);
        s.push(4.0);
        s.push(6.0);
        // running means: 2, 3, 4 → population sd sqrt(2/3)
        assert_relative_eq!(s.mean().unwrap(), 4.0, epsilon = 1e-12);
        assert_relative_eq!(
            s.std_dev_of_means().unwrap(),
            (2.0f64 / 3.0).sqrt(),
            epsilon = 1e-12
        );
        assert_eq!(s.samples(), &[2.0, 4.0, 6.0]);
    }

    #[test]
    fn confidence_rule() {
        let mut s = SampleStats::default();
        s.push(5.0);
        assert!(!s.is_confident(0.5), "one sample is never enough");
        s.push(5.0);
        assert!(s.is_confident(0.5), "identical samples have zero spread");

        let mut z = SampleStats::default();
        z.push(0.0);
        z.push(0.0);
        assert!(!z.is_confident(0.5), "zero mean never stops");

        let mut noisy = SampleStats::default();
        for x in [0.0, 10.0, 0.0, 10.0] {
            noisy.push(x);
        }
        assert!(!noisy.is_confident(0.1));
    }
}
