use crate::memory::*;

/// Enum with possible abort strategies.
/// These strategies specify when a running calculation is considered converged. Independent of the chosen
/// strategy, the calculation always stops once the configured iteration limit is reached.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AbortStrategy<T: Primitive> {
	/// This strategy aborts the calculation as soon as the centroids moved by at most `threshold` during one iteration.
	/// The movement is the sum over all centroids of the (unweighted, non-squared) euclidean distance between
	/// a centroid's position before and after the iteration.
	/// ## Fields:
	/// - **threshold**: Maximum movement, that is still considered converged (`movement <= threshold`)
	CentroidMovement { threshold: T },
	/// This strategy aborts the calculation as soon as the error (distsum) changed by at most `threshold`
	/// during one iteration.
	/// ## Fields:
	/// - **threshold**: Maximum change of the error, that is still considered converged (`|change| <= threshold`)
	ErrorImprovement { threshold: T },
}
impl<T: Primitive> AbortStrategy<T> {
	pub(crate) fn create_logic(&self) -> Box<dyn AbortStrategyLogic<T>> {
		match *self {
			AbortStrategy::CentroidMovement{threshold} => Box::new(CentroidMovementLogic {
				threshold
			}),
			AbortStrategy::ErrorImprovement{threshold} => Box::new(ErrorImprovementLogic {
				threshold,
				prev_error: T::infinity()
			})
		}
	}

	pub fn threshold(&self) -> T {
		match *self {
			AbortStrategy::CentroidMovement{threshold} | AbortStrategy::ErrorImprovement{threshold} => threshold
		}
	}

	pub(crate) fn with_threshold(self, threshold: T) -> Self {
		match self {
			AbortStrategy::CentroidMovement{..} => AbortStrategy::CentroidMovement{threshold},
			AbortStrategy::ErrorImprovement{..} => AbortStrategy::ErrorImprovement{threshold}
		}
	}
}

/// Sum over all centroids of the euclidean distance between their old and new position.
pub(crate) fn centroid_movement<T: Primitive>(prev_centroids: &[T], centroids: &[T], sample_dims: usize) -> T {
	prev_centroids.chunks_exact(sample_dims)
		.zip(centroids.chunks_exact(sample_dims))
		.map(|(p, c)| {
			p.iter().zip(c.iter())
				.map(|(&pv, &cv)| (pv - cv) * (pv - cv))
				.sum::<T>()
				.sqrt()
		})
		.sum()
}

pub(crate) trait AbortStrategyLogic<T: Primitive> {
	/// Function that has to be called once an iteration of the calculation ended.
	/// ## Arguments
	/// - **movement**: Total centroid movement of the iteration (see [`centroid_movement`])
	/// - **error**: The new error (distsum), after an iteration
	/// ## Returns
	/// - **true** if the calculation converged and should stop
	/// - **false** if the calculation should continue
	fn converged(&mut self, movement: T, error: T) -> bool;
}


pub(crate) struct CentroidMovementLogic<T: Primitive> {
	threshold: T
}
impl<T: Primitive> AbortStrategyLogic<T> for CentroidMovementLogic<T> {
	fn converged(&mut self, movement: T, _error: T) -> bool {
		movement <= self.threshold
	}
}


pub(crate) struct ErrorImprovementLogic<T: Primitive> {
	threshold: T,
	prev_error: T
}
impl<T: Primitive> AbortStrategyLogic<T> for ErrorImprovementLogic<T> {
	fn converged(&mut self, _movement: T, error: T) -> bool {
		let improvement = (self.prev_error - error).abs();
		self.prev_error = error;
		improvement <= self.threshold
	}
}


#[cfg(test)]
mod tests {
	use super::*;

	#[test] fn test_centroid_movement_f32() { test_centroid_movement::<f32>(); }
	#[test] fn test_centroid_movement_f64() { test_centroid_movement::<f64>(); }

	fn test_centroid_movement<T: Primitive>() {
		let prev: Vec<T> = [0.0, 0.0, 1.0, 1.0].iter().map(|&v| cast(v)).collect();
		let next: Vec<T> = [3.0, 4.0, 1.0, 1.0].iter().map(|&v| cast(v)).collect();
		assert_eq!(centroid_movement(&prev, &next, 2), cast(5.0));
		assert_eq!(centroid_movement(&prev, &prev, 2), T::zero());

		let mut abort_strategy = AbortStrategy::CentroidMovement { threshold: cast::<T>(0.0005) }.create_logic();
		assert_eq!(abort_strategy.converged(cast(5.0), cast(100.0)), false);
		assert_eq!(abort_strategy.converged(cast(0.0006), cast(100.0)), false);
		assert_eq!(abort_strategy.converged(cast(0.0005), cast(100.0)), true);
		assert_eq!(abort_strategy.converged(T::zero(), cast(100.0)), true);

		// zero threshold still detects an exact fixpoint
		let mut abort_strategy = AbortStrategy::CentroidMovement { threshold: T::zero() }.create_logic();
		assert_eq!(abort_strategy.converged(cast(1e-3), T::zero()), false);
		assert_eq!(abort_strategy.converged(T::zero(), T::zero()), true);
	}

	#[test] fn test_error_improvement_f32() { test_error_improvement::<f32>(); }
	#[test] fn test_error_improvement_f64() { test_error_improvement::<f64>(); }

	fn test_error_improvement<T: Primitive>() {
		{
			let mut abort_strategy = AbortStrategy::ErrorImprovement { threshold: cast::<T>(0.0005) }.create_logic();
			assert_eq!(abort_strategy.converged(T::zero(), cast(3000.0)), false);
			assert_eq!(abort_strategy.converged(T::zero(), cast(3000.0)), true);
		}
		{
			let mut abort_strategy = AbortStrategy::ErrorImprovement { threshold: cast::<T>(0.5) }.create_logic();
			assert_eq!(abort_strategy.converged(T::zero(), cast(3000.0)), false);
			assert_eq!(abort_strategy.converged(T::zero(), cast(2999.75)), true);
		}
		{
			let mut abort_strategy = AbortStrategy::ErrorImprovement { threshold: cast::<T>(0.5) }.create_logic();
			assert_eq!(abort_strategy.converged(T::zero(), cast(3000.0)), false);
			assert_eq!(abort_strategy.converged(T::zero(), cast(2000.0)), false);
			assert_eq!(abort_strategy.converged(T::zero(), cast(1999.0)), false);
			assert_eq!(abort_strategy.converged(T::zero(), cast(1998.75)), true);
		}
		{ // a worse error counts as change as well
			let mut abort_strategy = AbortStrategy::ErrorImprovement { threshold: cast::<T>(0.5) }.create_logic();
			assert_eq!(abort_strategy.converged(T::zero(), cast(3000.0)), false);
			assert_eq!(abort_strategy.converged(T::zero(), cast(3001.0)), false);
		}
	}

	#[test]
	fn threshold_replacement() {
		let strategy = AbortStrategy::ErrorImprovement { threshold: 1.0f64 }.with_threshold(2.0);
		assert_eq!(strategy, AbortStrategy::ErrorImprovement { threshold: 2.0 });
		assert_eq!(strategy.threshold(), 2.0);
		assert_eq!(AbortStrategy::CentroidMovement { threshold: 1.0f32 }.with_threshold(0.0).threshold(), 0.0);
	}
}
