use crate::memory::*;
use crate::{DistanceFunction, KMeans, KMeansError, KMeansState, Result};

pub(crate) fn calculate<T: Primitive, D: DistanceFunction<T>>(
    kmean: &KMeans<T, D>, state: &mut KMeansState<T>, computed: &[T],
) -> Result<()> {
    if computed.len() != state.k * kmean.sample_dims {
        return Err(KMeansError::invalid(format!(
            "precomputed centroids contain {} values, expected {} ({} centroids with {} dimensions)",
            computed.len(), state.k * kmean.sample_dims, state.k, kmean.sample_dims)));
    }
    if let Some(idx) = computed.iter().position(|v| !v.is_finite()) {
        return Err(KMeansError::NumericFailure { stage: "precomputed centroids", index: idx / kmean.sample_dims });
    }
    computed.chunks_exact(kmean.sample_dims).enumerate().for_each(|(ci, c)| {
        state.set_centroid_from_iter(ci, c.iter().cloned());
    });
    Ok(())
}
