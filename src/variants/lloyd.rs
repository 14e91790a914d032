use crate::abort_strategy::centroid_movement;
use crate::{inits, memory::*};
use crate::{DistanceFunction, EmptyClusterPolicy, KMeans, KMeansConfig, KMeansError, KMeansState, Result, Termination};
use log::{debug, info, warn};
use rayon::prelude::*;
use std::cmp::Ordering;

/// Amount of samples summed up per work packet during the centroid update.
/// The packet size is fixed, so the summation order does not depend on the amount of worker threads.
const UPDATE_PACKET_SIZE: usize = 4096;

pub(crate) struct Lloyd<T: Primitive> {
	_p: std::marker::PhantomData<T>
}
impl<T: Primitive> Lloyd<T> {
    /// Sum all samples in a cluster together, row-major per centroid.
    fn sum_clusters<D: DistanceFunction<T>>(data: &KMeans<T, D>, assignments: &[usize], k: usize) -> Vec<T> {
        let dims = data.sample_dims;
        let partial_sums: Vec<Vec<T>> = data.samples.par_chunks(UPDATE_PACKET_SIZE * dims)
            .zip(assignments.par_chunks(UPDATE_PACKET_SIZE))
            .map(|(samples, assignments)| {
                let mut sums = vec![T::zero(); k * dims];
                samples.chunks_exact(dims)
                    .zip(assignments.iter().cloned())
                    .for_each(|(s, centroid_id)| {
                        sums[centroid_id * dims..(centroid_id + 1) * dims].iter_mut()
                            .zip(s.iter())
                            .for_each(|(c, sv)| *c += sv);
                    });
                sums
            })
            .collect();

        // Merge in packet order
        let mut partial_sums = partial_sums.into_iter();
        let mut sums = partial_sums.next().unwrap_or_else(|| vec![T::zero(); k * dims]);
        for partial in partial_sums {
            sums.iter_mut().zip(partial.iter()).for_each(|(s, p)| *s += p);
        }
        sums
    }

    fn update_centroids<D: DistanceFunction<T>>(data: &KMeans<T, D>, state: &mut KMeansState<T>, policy: EmptyClusterPolicy) -> Result<T> {
        let dims = data.sample_dims;
        let k = state.k;

        let (centroid_frequency, assignments) = (&mut state.centroid_frequency, &state.assignments);
        let (used_centroids_cnt, mut new_centroids) = rayon::join(
            || data.update_cluster_frequencies(assignments, centroid_frequency),
            || Self::sum_clusters(data, assignments, k)
        );
        let mut new_distsum: T = state.centroid_distances.iter().cloned().sum();

        // Use used_centroids_cnt variable to check, whether there are empty clusters
        // When there are, assign bad samples to empty clusters
        if used_centroids_cnt != k && policy == EmptyClusterPolicy::FarthestSample {
            warn!("{} of {} clusters are empty, moving farthest samples into them", k - used_centroids_cnt, k);
            let mut distance_sorted_samples: Vec<usize> = (0..data.sample_cnt).collect();
            distance_sorted_samples.sort_by(
                |&i1, &i2| state.centroid_distances[i1].partial_cmp(&state.centroid_distances[i2]).unwrap_or(Ordering::Equal));

            // Assign empty clusters
            for i in 0..k {
                if state.centroid_frequency[i] != 0 {
                    continue;
                }
                // Find the sample with the highest distance to its centroid, that is not alone in its cluster.
                // With n >= k such a sample always exists.
                let sample_id = match distance_sorted_samples.iter().rev().cloned()
                        .find(|&s| state.centroid_frequency[state.assignments[s]] > 1) {
                    Some(sample_id) => sample_id,
                    None => break,
                };
                let prev_centroid_id = state.assignments[sample_id];
                // Re-Assign found sample to centroid without any samples
                state.centroid_frequency[prev_centroid_id] -= 1;
                state.centroid_frequency[i] += 1;
                new_distsum -= state.centroid_distances[sample_id];
                // Centroid is moved into the chosen point -> the points centroid distance is 0
                state.centroid_distances[sample_id] = T::zero();
                // new_centroids is a sum of all points within a centroid here.
                // Subtract chosen sample from its previous centroid
                new_centroids[prev_centroid_id * dims..(prev_centroid_id + 1) * dims].iter_mut()
                    .zip(data.sample(sample_id).iter().cloned())
                    .for_each(|(cv,sv)| { *cv -= sv; });
                // Chosen sample is single point in cluster -> set cluster's sum to chosen point
                new_centroids.set_row_from_iter(i, dims, data.sample(sample_id).iter().cloned());
                state.assignments[sample_id] = i;
            }
        }

        // Calculate new centroids from updated cluster_assignments.
        // Clusters that stayed empty keep their previous centroid.
        for (ci, ((c, nc), cfreq)) in state.centroids.chunks_exact_mut(dims)
                .zip(new_centroids.chunks_exact(dims))
                .zip(state.centroid_frequency.iter().cloned())
                .enumerate() {
            if cfreq == 0 {
                continue;
            }
            let cfreq: T = cast(cfreq as f64);
            c.iter_mut().zip(nc.iter()).for_each(|(c, &nc)| *c = nc / cfreq);
            if c.iter().any(|v| !v.is_finite()) {
                return Err(KMeansError::NumericFailure { stage: "centroid update", index: ci });
            }
        }
        Ok(new_distsum)
    }

    pub(crate) fn calculate<D: DistanceFunction<T>>(data: &KMeans<T, D>, k: usize, config: &KMeansConfig<'_, T>) -> Result<KMeansState<T>> {
        config.validate()?;
        if k == 0 {
            return Err(KMeansError::invalid("k must be at least 1"));
        }
        if k > data.sample_cnt {
            return Err(KMeansError::invalid(format!(
                "k ({}) must not exceed the amount of samples ({})", k, data.sample_cnt)));
        }

        let mut state = KMeansState::new(data.sample_cnt, data.sample_dims, k);
        state.distsum = T::infinity();

        // Initialize clusters and notify subscriber
        inits::initialize(data, &mut state, config)?;
        (config.init_done)(&state);
        let mut abort_strategy = config.abort_strategy.create_logic();
        let mut prev_centroids = state.centroids.clone();

        for i in 1..=config.max_iter {
            data.update_cluster_assignments(&mut state, None)?;
            prev_centroids.copy_from_slice(&state.centroids);
            let new_distsum = Self::update_centroids(data, &mut state, config.empty_cluster_policy)?;
            state.iterations = i;

            let movement = centroid_movement(&prev_centroids, &state.centroids, data.sample_dims);
            debug!("iteration {}: error {:e} -> {:e}, centroid movement {:e}", i, state.distsum, new_distsum, movement);

            // Notify subscriber about finished iteration
            (config.iteration_done)(&state, i, new_distsum);
            let converged = abort_strategy.converged(movement, new_distsum);
            state.distsum = new_distsum;
            if converged {
                state.termination = Termination::Converged;
                break;
            }
        }

        // Final assignment against the returned centroids, so labels are always nearest-centroid labels
        data.update_cluster_assignments(&mut state, None)?;
        data.update_cluster_frequencies(&state.assignments, &mut state.centroid_frequency);
        state.distsum = state.centroid_distances.iter().cloned().sum();
        info!("k-means (k={}) stopped after {} iterations ({:?}), error {:e}",
            k, state.iterations, state.termination, state.distsum);
        Ok(state)
    }
}
