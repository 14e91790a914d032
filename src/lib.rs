//! # ckmeans - API documentation
//!
//! ckmeans is a small rust library for the calculation of k-means-clustering, using Lloyd's algorithm.
//!
//! ## Design target
//! Samples are given using a plain row-major vector (or a list of rows), instead of
//! any high-level arithmetics / matrix crate such as nalgebra or ndarray. All buffers are owned by the
//! library for the duration of a calculation and handed back as part of the result.
//! The expensive steps (assigning samples to their nearest centroid and summing up the clusters)
//! are parallelized using rayon, while staying deterministic for a seeded random number generator.
//!
//! ## The algorithm
//! 1. **Initialization**: k centroids are selected from the samples (see [`InitMode`])
//! 2. **Assignment**: every sample is assigned to its nearest centroid (ties go to the lowest centroid index)
//! 3. **Update**: every centroid is moved to the mean of its assigned samples. Clusters without samples are
//!    handled as configured by [`EmptyClusterPolicy`].
//! 4. **Convergence check**: steps 2 & 3 are repeated until the [`AbortStrategy`] detects convergence, or
//!    the iteration limit is reached.
//!
//! ## Supported primitive types
//! - [`f32`]
//! - [`f64`]
//!
//! ## Example
//! ```rust
//! use ckmeans::*;
//!
//! let points = vec![[0.0f64, 0.0], [0.0, 1.0], [10.0, 0.0], [10.0, 1.0]];
//! let conf = KMeansConfig::build().threshold(0.001).max_iter(100).init_mode(InitMode::Strided).build();
//! let result = cluster(&points, 2, &conf).unwrap();
//!
//! assert!(result.converged());
//! assert_eq!(result.assignments[0], result.assignments[1]);
//! assert_ne!(result.assignments[0], result.assignments[2]);
//! println!("Centroids: {:?}", result.centroid_rows());
//! ```
//!
//! ## Example (using the status event callbacks)
//! ```rust
//! use ckmeans::*;
//!
//! let (sample_cnt, sample_dims, k) = (2000, 20, 4);
//!
//! // Generate some random data
//! let mut samples = vec![0.0f64;sample_cnt * sample_dims];
//! samples.iter_mut().for_each(|v| *v = rand::random());
//!
//! let conf = KMeansConfig::build()
//!     .init_done(&|_| println!("Initialization completed."))
//!     .iteration_done(&|s, nr, new_distsum|
//!         println!("Iteration {} - Error: {:.2} -> {:.2} | Improvement: {:.2}",
//!             nr, s.distsum, new_distsum, s.distsum - new_distsum))
//!     .init_mode(InitMode::KMeanPlusPlus)
//!     .build();
//!
//! let kmean = KMeans::new(samples, sample_cnt, sample_dims, EuclideanDistance).unwrap();
//! let result = kmean.kmeans_lloyd(k, &conf).unwrap();
//!
//! println!("Centroids: {:?}", result.centroids);
//! println!("Cluster-Assignments: {:?}", result.assignments);
//! println!("Error: {}", result.distsum);
//! ```
//!
//! ## Short API-Overview / Description
//! The simplest entry-point is [`cluster`], taking a list of points. For repeated calculations on the same
//! data, create a [`KMeans`] instance, which takes over the sample data into its ownership. This struct is
//! generic over the underlying primitive type and the [`DistanceFunction`] used for the assignment.
//!
//! Calling [`KMeans::kmeans_lloyd`] does not mutate the [`KMeans`] instance, so multiple runs can be
//! done in parallel. Internally, a new instance of [`KMeansState`] is used to store the state (and finally
//! the result) of a calculation.
//!
//! All options (initialization method, abort-strategy, iteration limit, random number generator, callbacks)
//! are collected in a [`KMeansConfig`], built using [`KMeansConfig::build`].
//!
//! Progress is additionally reported through the [`log`](https://docs.rs/log) facade.

#[macro_use] mod helpers;
mod memory;
mod error;
mod api;
mod distances;
mod variants;
mod inits;
mod abort_strategy;

pub use abort_strategy::AbortStrategy;
pub use api::{
    DistanceFunction, EmptyClusterPolicy, InitMode, KMeans, KMeansConfig, KMeansConfigBuilder, KMeansState,
    Termination,
};
pub use distances::{EuclideanDistance, WeightedEuclideanDistance};
pub use error::{KMeansError, Result};
pub use memory::Primitive;
pub(crate) use memory::cast;

/// Cluster **points** into **k** groups, using the squared euclidean distance.
///
/// ## Arguments
/// - **points**: List of samples, all with the same amount of dimensions
/// - **k**: Amount of clusters to search for (`1 <= k <= points.len()`)
/// - **config**: Options of the calculation. The defaults are a convergence threshold of `1e-4`,
///   `1000` iterations at most and [`InitMode::DistinctSample`] initialization.
///
/// ## Returns
/// The final [`KMeansState`], containing labels ([`KMeansState::assignments`]), centroids, the amount of
/// executed iterations and whether the calculation converged.
///
/// ## Local minima
/// Lloyd's algorithm only finds a local minimum, which depends on the initial centroids. With the
/// randomized default ([`InitMode::DistinctSample`]) different seeds may end in different partitions,
/// e.g. `[[0,0],[0,1],[10,0],[10,1]]` with `k = 2` is split into the left / right pair for most seeds,
/// but into the bottom / top pair (centroids `[5,0]` and `[5,1]`) for about a third of them.
/// Use a fixed seed for reproducible results, [`InitMode::KMeanPlusPlus`] for better starting points,
/// or [`InitMode::Strided`] / [`InitMode::Precomputed`] for a deterministic start.
pub fn cluster<T: Primitive, R: AsRef<[T]>>(points: &[R], k: usize, config: &KMeansConfig<'_, T>) -> Result<KMeansState<T>> {
    KMeans::from_rows(points, EuclideanDistance)?.kmeans_lloyd(k, config)
}
