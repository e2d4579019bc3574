//! Moving average indicators.

use trendsignal_core::traits::Indicator;

/// Simple Moving Average (SMA).
///
/// Calculates the arithmetic mean of the last N values. The first N-1
/// positions are undefined.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    name: String,
}

impl Sma {
    /// Create a new SMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self {
            period,
            name: format!("sma_{}", period),
        }
    }
}

impl Indicator for Sma {
    fn calculate(&self, data: &[f64]) -> Vec<Option<f64>> {
        let mut result = vec![None; data.len()];
        if data.len() < self.period {
            return result;
        }

        let period_f64 = self.period as f64;

        // Initial sum
        let mut sum: f64 = data[..self.period].iter().sum();
        result[self.period - 1] = Some(sum / period_f64);

        // Sliding window
        for i in self.period..data.len() {
            sum = sum - data[i - self.period] + data[i];
            result[i] = Some(sum / period_f64);
        }

        result
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Exponential Moving Average (EMA).
///
/// Seeded with the first value and defined at every position:
/// `ema[0] = x[0]`, `ema[t] = α·x[t] + (1-α)·ema[t-1]` with `α = 2/(period+1)`.
#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    multiplier: f64,
    name: String,
}

impl Ema {
    /// Create a new EMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        let multiplier = 2.0 / (period as f64 + 1.0);
        Self {
            period,
            multiplier,
            name: format!("ema_{}", period),
        }
    }

    /// Calculate without the `Option` wrapping; every position is defined.
    pub fn calculate_dense(&self, data: &[f64]) -> Vec<f64> {
        let mut result = Vec::with_capacity(data.len());
        let Some(&seed) = data.first() else {
            return result;
        };

        let one_minus_mult = 1.0 - self.multiplier;
        let mut ema = seed;
        result.push(ema);

        for &price in &data[1..] {
            ema = price * self.multiplier + ema * one_minus_mult;
            result.push(ema);
        }

        result
    }
}

impl Indicator for Ema {
    fn calculate(&self, data: &[f64]) -> Vec<Option<f64>> {
        self.calculate_dense(data).into_iter().map(Some).collect()
    }

    /// One value is enough to seed the average.
    fn period(&self) -> usize {
        1
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma() {
        let sma = Sma::new(3);
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = sma.calculate(&data);

        assert_eq!(result.len(), 5);
        assert!(result[0].is_none() && result[1].is_none());
        assert!((result[2].unwrap() - 2.0).abs() < 1e-10); // (1+2+3)/3
        assert!((result[3].unwrap() - 3.0).abs() < 1e-10); // (2+3+4)/3
        assert!((result[4].unwrap() - 4.0).abs() < 1e-10); // (3+4+5)/3
    }

    #[test]
    fn test_sma_insufficient_data() {
        let sma = Sma::new(5);
        let data = vec![1.0, 2.0, 3.0];
        let result = sma.calculate(&data);

        assert_eq!(result, vec![None, None, None]);
        assert!(sma.validate_data(&data).is_err());
    }

    #[test]
    fn test_ema_seeded_with_first_value() {
        let ema = Ema::new(3);
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = ema.calculate_dense(&data);

        assert_eq!(result.len(), 5);
        // mult = 2/(3+1) = 0.5
        assert_eq!(result[0], 1.0);
        assert!((result[1] - 1.5).abs() < 1e-10); // 2*0.5 + 1*0.5
        assert!((result[2] - 2.25).abs() < 1e-10); // 3*0.5 + 1.5*0.5
    }

    #[test]
    fn test_ema_empty_input() {
        let ema = Ema::new(10);
        assert!(ema.calculate(&[]).is_empty());
        assert!(ema.validate_data(&[]).is_err());
    }

    #[test]
    fn test_constant_series_averages_equal_price() {
        let data = vec![42.5; 30];
        let sma = Sma::new(10).calculate(&data);
        let ema = Ema::new(10).calculate(&data);

        for (i, (s, e)) in sma.iter().zip(ema.iter()).enumerate().skip(9) {
            assert!((s.unwrap() - 42.5).abs() < 1e-9, "sma at {}", i);
            assert!((e.unwrap() - 42.5).abs() < 1e-9, "ema at {}", i);
        }
    }

    #[test]
    fn test_names() {
        assert_eq!(Sma::new(50).name(), "sma_50");
        assert_eq!(Ema::new(20).name(), "ema_20");
    }
}
