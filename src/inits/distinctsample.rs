use crate::memory::*;
use crate::{DistanceFunction, KMeans, KMeansConfig, KMeansError, KMeansState, Result};
use rand::prelude::*;
use std::ops::DerefMut;

/// Walk the samples in random order and take every sample whose coordinates differ from all
/// centroids selected so far, until k centroids were found.
pub(crate) fn calculate<T: Primitive, D: DistanceFunction<T>>(
    kmean: &KMeans<T, D>, state: &mut KMeansState<T>, config: &KMeansConfig<'_, T>,
) -> Result<()> {
    let mut order: Vec<usize> = (0..kmean.sample_cnt).collect();
    order.shuffle(config.rnd.borrow_mut().deref_mut());

    let mut chosen: Vec<usize> = Vec::with_capacity(state.k);
    for sample_id in order {
        let sample = kmean.sample(sample_id);
        if chosen.iter().all(|&c| kmean.sample(c) != sample) {
            chosen.push(sample_id);
            if chosen.len() == state.k {
                break;
            }
        }
    }
    // All samples were visited, so chosen now holds every distinct coordinate tuple
    if chosen.len() < state.k {
        return Err(KMeansError::DegenerateInitialization { requested: state.k, available: chosen.len() });
    }

    for (ci, sample_id) in chosen.into_iter().enumerate() {
        state.set_centroid_from_iter(ci, kmean.sample(sample_id).iter().cloned());
    }
    Ok(())
}
