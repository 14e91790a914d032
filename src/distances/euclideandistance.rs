use crate::{DistanceFunction, Primitive};

/// Squared euclidean distance: `sum((a_i - b_i)^2)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct EuclideanDistance;

impl<T: Primitive> DistanceFunction<T> for EuclideanDistance {
    #[inline(always)]
    fn distance(&self, a: &[T], b: &[T]) -> T {
        a.iter().zip(b.iter())
            .map(|(&av, &bv)| av - bv)  // <sample> - <centroid>
            .map(|v| v * v)             // <vec_components> ^2
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squared_distance() {
        assert_eq!(EuclideanDistance.distance(&[0.0f64, 0.0], &[3.0, 4.0]), 25.0);
        assert_eq!(EuclideanDistance.distance(&[1.5f32], &[1.5]), 0.0);
        assert_eq!(EuclideanDistance.distance(&[-1.0f64, 2.0, 0.5], &[1.0, 2.0, -0.5]), 5.0);
    }
}
