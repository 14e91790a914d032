use crate::memory::*;
use crate::{DistanceFunction, KMeans, KMeansConfig, KMeansState, Result};
use rand::prelude::*;
use std::ops::DerefMut;

pub(crate) fn calculate<T: Primitive, D: DistanceFunction<T>>(
    kmean: &KMeans<T, D>, state: &mut KMeansState<T>, config: &KMeansConfig<'_, T>,
) -> Result<()> {
    kmean.samples.chunks_exact(kmean.sample_dims)
        .choose_multiple(config.rnd.borrow_mut().deref_mut(), state.k).iter().cloned()
        .enumerate()
        .for_each(|(ci, c)| { // Copy randomly chosen centroids into state.centroids
            state.set_centroid_from_iter(ci, c.iter().cloned());
        });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EuclideanDistance;

    #[test]
    fn picks_samples_without_duplicate_check() {
        let kmean = KMeans::new(vec![2.0f64; 8], 4, 2, EuclideanDistance).unwrap();
        let conf = KMeansConfig::build().seed(7).build();
        let mut state = KMeansState::new(kmean.sample_cnt, kmean.sample_dims, 3);
        calculate(&kmean, &mut state, &conf).unwrap();
        assert_eq!(state.centroids, vec![2.0; 6]);
    }

    #[test]
    fn centroids_are_samples() {
        let samples: Vec<f64> = (0..20).map(|v| v as f64).collect();
        let kmean = KMeans::new(samples, 10, 2, EuclideanDistance).unwrap();
        let conf = KMeansConfig::build().seed(11).build();
        let mut state = KMeansState::new(kmean.sample_cnt, kmean.sample_dims, 4);
        calculate(&kmean, &mut state, &conf).unwrap();
        for c in state.centroid_rows() {
            assert!((0..kmean.sample_cnt).any(|s| kmean.sample(s) == &c[..]));
        }
    }
}
