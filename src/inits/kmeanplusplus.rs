use crate::memory::*;
use crate::{DistanceFunction, KMeans, KMeansConfig, KMeansState, Result};
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use std::ops::DerefMut;

pub(crate) fn calculate<T: Primitive, D: DistanceFunction<T>>(
    kmean: &KMeans<T, D>, state: &mut KMeansState<T>, config: &KMeansConfig<'_, T>,
) -> Result<()> {
    { // Randomly select first centroid
        let first_idx = config.rnd.borrow_mut().gen_range(0..kmean.sample_cnt);
        state.set_centroid_from_iter(0, kmean.sample(first_idx).iter().cloned());
    }
    for k in 1..state.k { // For each following centroid...
        // Calculate distances & update cluster-assignments
        kmean.update_cluster_assignments(state, Some(k))?;

        // Use rand's WeightedIndex to randomly draw a centroid, while respecting the distances as weights.
        // When every sample already sits on a centroid, all weights are zero -> fall back to a uniform draw.
        let mut rnd = config.rnd.borrow_mut();
        let sampled_centroid_id = match WeightedIndex::<T>::new(state.centroid_distances.iter()) {
            Ok(centroid_index) => centroid_index.sample(rnd.deref_mut()),
            Err(_) => rnd.gen_range(0..kmean.sample_cnt),
        };
        state.set_centroid_from_iter(k, kmean.sample(sampled_centroid_id).iter().cloned());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EuclideanDistance;

    #[test]
    fn spreads_centroids_over_separated_groups() {
        // Three tight groups, far apart from each other
        let mut samples = Vec::new();
        for &(x, y) in &[(0.0f64, 0.0), (100.0, 0.0), (0.0, 100.0)] {
            for i in 0..10 {
                samples.push(x + (i as f64) * 0.01);
                samples.push(y);
            }
        }
        let kmean = KMeans::new(samples, 30, 2, EuclideanDistance).unwrap();
        let conf = KMeansConfig::build().seed(1).build();
        let mut state = KMeansState::new(kmean.sample_cnt, kmean.sample_dims, 3);
        calculate(&kmean, &mut state, &conf).unwrap();

        let mut groups: Vec<usize> = state.centroid_rows().iter()
            .map(|c| if c[0] > 50.0 { 1 } else if c[1] > 50.0 { 2 } else { 0 })
            .collect();
        groups.sort();
        assert_eq!(groups, vec![0, 1, 2]);
    }

    #[test]
    fn identical_samples_do_not_fail() {
        let kmean = KMeans::new(vec![4.0f32; 10], 5, 2, EuclideanDistance).unwrap();
        let conf = KMeansConfig::build().seed(5).build();
        let mut state = KMeansState::new(kmean.sample_cnt, kmean.sample_dims, 3);
        calculate(&kmean, &mut state, &conf).unwrap();
        assert_eq!(state.centroids, vec![4.0; 6]);
    }
}
