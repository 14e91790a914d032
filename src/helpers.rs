#[cfg(test)]
macro_rules! assert_approx_eq {
	($left: expr, $right: expr, $tol: expr) => ({
		match ($left, $right, $tol) {
			(left_val , right_val, tol_val) => {
				let delta = (left_val - right_val).abs();
				if !(delta < tol_val) {
					panic!(
						"assertion failed: `(left ≈ right)` \
						(left: `{}`, right: `{}`) \
						with ∆={:1.1e} (allowed ∆={:e})",
						left_val , right_val, delta, tol_val
					)
				}
			}
		}
	});
	($left: expr, $right: expr) => (assert_approx_eq!(($left), ($right), 1e-15))
}

#[cfg(test)]
pub(crate) mod testing {
	use std::collections::HashMap;

	use crate::{cast, KMeansState, Primitive};

	pub struct KMeansShouldResult<T: Primitive> {
		pub distsum: T,
		pub sample_dims: usize,
		pub assignments: Vec<usize>,
		pub centroid_distances: Vec<T>,
		pub centroids: Vec<T>
	}

	/// Check that **should** and **actual** partition the samples the same way.
	/// Cluster ids may be permuted, the returned map translates should-ids into actual-ids.
	pub fn assert_same_partition(should: &[usize], actual: &[usize]) -> HashMap<usize, usize> {
		assert_eq!(should.len(), actual.len());
		let mut idmap = HashMap::new();
		let mut idrevmap = HashMap::new();
		for idx in 0..should.len() {
			let (should_id, actual_id) = (should[idx], actual[idx]);
			if !idmap.contains_key(&should_id) {
				assert_eq!(idrevmap.contains_key(&actual_id), false);
				idmap.insert(should_id, actual_id);
				idrevmap.insert(actual_id, should_id);
			}
			if idmap[&should_id] != actual_id {
				panic!(
					"Cluster assignments different at idx {}.\nMapping(should -> actual): {:?}\nActual: {:?}\nShould: {:?}",
					idx, idmap, actual, should
				);
			}
		}
		idmap
	}

	pub fn assert_kmeans_result_eq<T: Primitive>(should: KMeansShouldResult<T>, actual: &KMeansState<T>) {
		let cmp_epsilon: T = cast(0.01);
		assert_approx_eq!(should.distsum, actual.distsum, cmp_epsilon);

		// compare cluster assignments - and while doing so, generate sorting indices for the centroids
		let idmap = assert_same_partition(&should.assignments, &actual.assignments);
		let mut should_freq: HashMap<usize, usize> = HashMap::new();
		for &actual_id in actual.assignments.iter() {
			*should_freq.entry(actual_id).or_default() += 1;
		}
		// use idmap to compare should & actual in correct order
		for (should_idx, actual_idx) in idmap {
			assert_eq!(should_freq[&actual_idx], actual.centroid_frequency[actual_idx]);
			let should_spl_offset = should_idx * should.sample_dims;
			let actual_spl_offset = actual_idx * should.sample_dims;
			for d in 0..should.sample_dims {
				assert_approx_eq!(should.centroids[should_spl_offset + d], actual.centroids[actual_spl_offset + d], cmp_epsilon);
			}
		}
		for idx in 0..should.centroid_distances.len() {
			let (should_dist, actual_dist) = (should.centroid_distances[idx], actual.centroid_distances[idx]);
			if (should_dist - actual_dist).abs() > cmp_epsilon {
				panic!("Centroid distances mismatch at idx {}. Actual: {} but should have been: {}", idx, actual_dist, should_dist);
			}
		}
	}
}
