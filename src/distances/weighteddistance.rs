use crate::{cast, DistanceFunction, KMeansError, Primitive, Result};

/// Weighted squared euclidean distance: `sum(w_i * (a_i - b_i)^2)`.
///
/// Since the weights are constant per dimension, the arithmetic mean still is the point minimizing
/// the within-cluster distance, so this distance can be used with the lloyd update unchanged.
#[derive(Clone, Debug)]
pub struct WeightedEuclideanDistance<T: Primitive> {
    weights: Vec<T>,
}

impl<T: Primitive> WeightedEuclideanDistance<T> {
    /// Create a weighted distance from per-dimension weights.
    /// All weights have to be finite and non-negative, and at least one of them has to be positive.
    pub fn new(weights: Vec<T>) -> Result<Self> {
        if weights.is_empty() {
            return Err(KMeansError::invalid("weight vector must not be empty"));
        }
        if let Some(idx) = weights.iter().position(|w| !w.is_finite() || *w < T::zero()) {
            return Err(KMeansError::invalid(format!("weight {} must be finite and non-negative", idx)));
        }
        if weights.iter().all(|w| w.is_zero()) {
            return Err(KMeansError::invalid("at least one weight must be positive"));
        }
        Ok(Self { weights })
    }

    /// Perceptual distance for RGB colour samples, weighting the channels by their
    /// contribution to perceived luminance (ITU-R BT.601).
    pub fn perceptual_rgb() -> Self {
        Self { weights: vec![cast(0.299), cast(0.587), cast(0.114)] }
    }

    pub fn weights(&self) -> &[T] { &self.weights }
}

impl<T: Primitive> DistanceFunction<T> for WeightedEuclideanDistance<T> {
    #[inline(always)]
    fn distance(&self, a: &[T], b: &[T]) -> T {
        a.iter().zip(b.iter()).zip(self.weights.iter())
            .map(|((&av, &bv), &w)| {
                let d = av - bv;
                w * d * d
            })
            .sum()
    }

    fn check_dims(&self, sample_dims: usize) -> Result<()> {
        if self.weights.len() != sample_dims {
            return Err(KMeansError::invalid(format!(
                "distance has {} weights, but samples have {} dimensions", self.weights.len(), sample_dims)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weighted_distance() {
        let dist = WeightedEuclideanDistance::new(vec![1.0f64, 0.0, 2.0]).unwrap();
        assert_eq!(dist.distance(&[0.0, 0.0, 0.0], &[1.0, 5.0, 1.0]), 3.0);
        assert_eq!(dist.weights(), &[1.0, 0.0, 2.0]);
        assert!(dist.check_dims(3).is_ok());
        assert!(matches!(dist.check_dims(2), Err(KMeansError::InvalidInput(_))));
    }

    #[test]
    fn invalid_weights() {
        assert!(WeightedEuclideanDistance::<f64>::new(vec![]).is_err());
        assert!(WeightedEuclideanDistance::new(vec![1.0f64, -1.0]).is_err());
        assert!(WeightedEuclideanDistance::new(vec![f32::NAN]).is_err());
        assert!(WeightedEuclideanDistance::new(vec![0.0f64, 0.0]).is_err());
    }

    #[test]
    fn perceptual_rgb_prefers_green() {
        let dist = WeightedEuclideanDistance::<f64>::perceptual_rgb();
        assert_eq!(dist.weights().len(), 3);
        let black = [0.0, 0.0, 0.0];
        assert!(dist.distance(&black, &[0.0, 1.0, 0.0]) > dist.distance(&black, &[1.0, 0.0, 0.0]));
        assert!(dist.distance(&black, &[1.0, 0.0, 0.0]) > dist.distance(&black, &[0.0, 0.0, 1.0]));
    }
}
