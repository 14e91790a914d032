use crate::memory::*;
use crate::{DistanceFunction, KMeans, KMeansState, Result};

/// Pick the samples at `0, n/k, 2*n/k, ...` as initial centroids.
pub(crate) fn calculate<T: Primitive, D: DistanceFunction<T>>(kmean: &KMeans<T, D>, state: &mut KMeansState<T>) -> Result<()> {
    let stride = kmean.sample_cnt / state.k;
    for ci in 0..state.k {
        state.set_centroid_from_iter(ci, kmean.sample(ci * stride).iter().cloned());
    }
    Ok(())
}
