use crate::{memory::*, AbortStrategy, KMeansError, Result};
use std::cell::RefCell;
use rayon::prelude::*;
use rand::prelude::*;

pub type InitDoneCallbackFn<'a, T> = &'a dyn Fn(&KMeansState<T>);
pub type IterationDoneCallbackFn<'a, T> = &'a dyn Fn(&KMeansState<T>, usize, T);

/// Distance function used to find the nearest centroid of each sample.
///
/// Implementations have to be cheap to call, since this is invoked `n * k` times per iteration.
/// The centroid update always uses the arithmetic mean, so only distances for which the mean is the
/// minimizer of the within-cluster distance sum (squared euclidean and per-dimension weighted variants)
/// make sense here.
pub trait DistanceFunction<T: Primitive>: Sync + Send {
    /// Distance between sample **a** and centroid **b** (both have the same length).
    fn distance(&self, a: &[T], b: &[T]) -> T;

    /// Check whether this distance function can be used for samples with **sample_dims** dimensions.
    fn check_dims(&self, _sample_dims: usize) -> Result<()> { Ok(()) }
}

/// Method used to select the k initial centroids.
#[derive(Clone, Debug, PartialEq)]
pub enum InitMode<T: Primitive> {
    /// Randomly sample samples, until k samples with *distinct* coordinates have been found.
    /// Fails with [`KMeansError::DegenerateInitialization`] if the dataset contains less than k distinct samples.
    ///
    /// The result depends on the drawn samples: two starting centroids inside the same natural group
    /// can leave the calculation in a worse local minimum. Seed the random number generator
    /// ([`KMeansConfigBuilder::seed`]) to make that choice reproducible.
    DistinctSample,
    /// Randomly sample k samples (a.k.a. Forgy), without checking their coordinates for duplicates.
    /// Faster, but duplicated centroids may leave clusters empty (see [`EmptyClusterPolicy`]).
    FastSample,
    /// Deterministically pick the samples at indices `0, n/k, 2*n/k, ...`. No randomness and no duplicate check.
    Strided,
    /// K-Means++ seeding: every following centroid is drawn with a probability proportional to the
    /// distance of a sample to its nearest, already selected, centroid.
    KMeanPlusPlus,
    /// Use the given centroids [row-major] = [<centroid0>,<centroid1>,...], e.g. the result of a previous run.
    Precomputed(Vec<T>),
}
impl<T: Primitive> Default for InitMode<T> {
    fn default() -> Self { InitMode::DistinctSample }
}

/// What happens with a cluster that did not get any sample assigned during an iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum EmptyClusterPolicy {
    /// Move the sample that is farthest away from its own centroid (taken from a cluster with more than one sample)
    /// into the empty cluster, and use that sample as the cluster's new centroid.
    #[default]
    FarthestSample,
    /// Keep the empty cluster's centroid at its position from the previous iteration.
    KeepPrevious,
}

/// Reason why a calculation stopped iterating.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// The configured [`AbortStrategy`] detected convergence.
    Converged,
    /// The maximum amount of iterations was reached before convergence.
    IterationLimit,
}

/// This is a structure holding various configuration options for the a k-means calculations, such as
/// the random number generator to use, or a couple of callbacks, that can be set to get status information from
/// a running k-means calculation.
///
/// For a more detailed information about all possible options, have a look at [`KMeansConfigBuilder`].
pub struct KMeansConfig<'a, T: Primitive> {
    /// Callback that is called, when the initialization phase finished
    /// ## Arguments
    /// - **state**: Current [`KMeansState`] after the initialization
    pub(crate) init_done: InitDoneCallbackFn<'a, T>,
    /// Callback that is called after each iteration
    /// ## Arguments
    /// - **state**: Current[`KMeansState`] after the iteration
    /// - **iteration_id**: Number of the current iteration
    /// - **distsum**: New distance sum (**state** contains the distsum from the previous iteration)
    pub(crate) iteration_done: IterationDoneCallbackFn<'a, T>,
    /// Random number generator to use
    pub(crate) rnd: Box<RefCell<dyn RngCore>>,
    /// The abort-strategy to use for the running calculation
    pub(crate) abort_strategy: AbortStrategy<T>,
    /// Upper limit for the amount of iterations
    pub(crate) max_iter: usize,
    pub(crate) init_mode: InitMode<T>,
    pub(crate) empty_cluster_policy: EmptyClusterPolicy,
}
impl<'a, T: Primitive> Default for KMeansConfig<'a, T> {
    fn default() -> Self {
        Self {
            init_done: &|_| {},
            iteration_done: &|_,_,_| {},
            rnd: Box::new(RefCell::new(rand::thread_rng())),
            abort_strategy: AbortStrategy::<T>::CentroidMovement {
                threshold: cast(1e-4)
            },
            max_iter: 1000,
            init_mode: InitMode::default(),
            empty_cluster_policy: EmptyClusterPolicy::default(),
        }
    }
}
impl<'a, T: Primitive> KMeansConfig<'a, T> {
    /// Use the [`KMeansConfigBuilder`] to build a [`KMeansConfig`] instance.
    pub fn build() -> KMeansConfigBuilder<'a, T> {
        KMeansConfigBuilder { config: KMeansConfig::default() }
    }

    pub fn max_iter(&self) -> usize { self.max_iter }
    pub fn init_mode(&self) -> &InitMode<T> { &self.init_mode }
    pub fn empty_cluster_policy(&self) -> EmptyClusterPolicy { self.empty_cluster_policy }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.max_iter == 0 {
            return Err(KMeansError::invalid("max_iter must be at least 1"));
        }
        let threshold = self.abort_strategy.threshold();
        if threshold.is_nan() || threshold < T::zero() {
            return Err(KMeansError::invalid(format!("threshold must be non-negative, got {}", threshold)));
        }
        Ok(())
    }
}
impl<'a, T: Primitive> std::fmt::Debug for KMeansConfig<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KMeansConfig")
            .field("abort_strategy", &self.abort_strategy)
            .field("max_iter", &self.max_iter)
            .field("init_mode", &self.init_mode)
            .field("empty_cluster_policy", &self.empty_cluster_policy)
            .finish()
    }
}

pub struct KMeansConfigBuilder<'a, T: Primitive> {
    config: KMeansConfig<'a, T>
}
impl<'a, T: Primitive> KMeansConfigBuilder<'a, T> {
    /// Set the callback that should be called after the centroid initialization, before the iteration starts.
    pub fn init_done(mut self, init_done: InitDoneCallbackFn<'a, T>) -> Self {
        self.config.init_done = init_done; self
    }
    /// Set the callback that should be called after each iteration during a running k-means calculation.
    pub fn iteration_done(mut self, iteration_done: IterationDoneCallbackFn<'a, T>) -> Self {
        self.config.iteration_done = iteration_done; self
    }
    /// Set the random number generator that should be used in the k-means calculation.
    /// Use a seeded generator for deterministically repeatable results.
    pub fn random_generator<R: RngCore + 'static>(mut self, rnd: R) -> Self {
        self.config.rnd = Box::new(RefCell::new(rnd)); self
    }
    /// Shortcut for [`KMeansConfigBuilder::random_generator`] with a [`StdRng`] seeded from **seed**.
    pub fn seed(self, seed: u64) -> Self {
        self.random_generator(StdRng::seed_from_u64(seed))
    }
    /// Set the abort-strategy to use during a running k-means calculation. For more information,
    /// see documentation of [`AbortStrategy`].
    /// ## Default
    /// [`AbortStrategy::CentroidMovement`] `{ threshold: 0.0001 }`
    pub fn abort_strategy(mut self, abort_strategy: AbortStrategy<T>) -> Self {
        self.config.abort_strategy = abort_strategy; self
    }
    /// Change the threshold of the currently set abort-strategy.
    pub fn threshold(mut self, threshold: T) -> Self {
        self.config.abort_strategy = self.config.abort_strategy.with_threshold(threshold); self
    }
    /// Limit the maximum amount of iterations.
    /// ## Default
    /// `1000`
    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.config.max_iter = max_iter; self
    }
    /// Set the centroid initialization method.
    /// ## Default
    /// [`InitMode::DistinctSample`]
    pub fn init_mode(mut self, init_mode: InitMode<T>) -> Self {
        self.config.init_mode = init_mode; self
    }
    /// Set the handling of clusters without samples.
    /// ## Default
    /// [`EmptyClusterPolicy::FarthestSample`]
    pub fn empty_cluster_policy(mut self, policy: EmptyClusterPolicy) -> Self {
        self.config.empty_cluster_policy = policy; self
    }
    /// Return the internally built configuration structure.
    pub fn build(self) -> KMeansConfig<'a, T> { self.config }
}


/// This is the internally used data-structure, storing the current state during calculation, as
/// well as the final result, as returned by the API.
/// All mutations are done in this structure, making [`KMeans`] immutable, and therefore allowing
/// it to be used in parallel, without having to duplicate the input-data.
///
/// ## Generics
/// - **T**: Underlying primitive type that was used for the calculation
///
/// ## Fields
/// - **k**: The amount of clusters that were requested when calculating this k-means result
/// - **distsum**: The total sum of distances from all samples to their respective centroids
/// - **centroids**: Calculated cluster centers [row-major] = [<centroid0>,<centroid1>,<centroid2>,...]
/// - **centroid_frequency**: Amount of samples in each centroid
/// - **assignments**: Vector mapping each sample to its respective nearest cluster (labels)
/// - **centroid_distances**: Vector containing each sample's distance to its centroid
/// - **iterations**: Amount of iterations that were executed
/// - **termination**: Why the calculation stopped iterating
#[derive(Clone, Debug)]
pub struct KMeansState<T: Primitive> {
    pub k: usize,
    pub distsum: T,
    pub centroids: Vec<T>,
    pub centroid_frequency: Vec<usize>,
    pub assignments: Vec<usize>,
    pub centroid_distances: Vec<T>,
    pub iterations: usize,
    pub termination: Termination,

    pub(crate) sample_dims: usize
}
impl<T: Primitive> KMeansState<T> {
    pub(crate) fn new(sample_cnt: usize, sample_dims: usize, k: usize) -> Self {
        Self {
            k,
            distsum: T::zero(),
            centroids: vec![T::zero(); sample_dims * k],
            centroid_frequency: vec![0usize;k],
            assignments: vec![0usize;sample_cnt],
            centroid_distances: vec![T::infinity();sample_cnt],
            iterations: 0,
            termination: Termination::IterationLimit,
            sample_dims
        }
    }
    pub(crate) fn set_centroid_from_iter(&mut self, idx: usize, src: impl Iterator<Item = T>) {
        self.centroids.set_row_from_iter(idx, self.sample_dims, src);
    }

    /// Dimensionality of the samples / centroids.
    pub fn sample_dims(&self) -> usize { self.sample_dims }

    /// Whether the calculation stopped because of convergence (instead of the iteration limit).
    pub fn converged(&self) -> bool { self.termination == Termination::Converged }

    /// Coordinates of the centroid with index **idx**.
    pub fn centroid(&self, idx: usize) -> &[T] {
        self.centroids.row(idx, self.sample_dims)
    }

    /// Centroids as one vector per centroid.
    pub fn centroid_rows(&self) -> Vec<Vec<T>> {
        self.centroids.chunks_exact(self.sample_dims).map(|c| c.to_vec()).collect()
    }
}




/// Entrypoint of this crate's API-Surface.
///
/// Create an instance of this struct, giving the samples you want to operate on. The primitive type
/// of the passed samples array will be the type used internaly for all calculations, as well as the result
/// as stored in the returned [`KMeansState`] structure.
///
/// The distance function **D** decides which centroid is the nearest for each sample.
///
/// ## Supported initialization methods
/// See [`InitMode`], which is selected through [`KMeansConfigBuilder::init_mode`].
pub struct KMeans<T: Primitive, D: DistanceFunction<T>> {
    pub(crate) sample_cnt: usize,
    pub(crate) sample_dims: usize,
    pub(crate) samples: Vec<T>,
    pub(crate) distance: D,
}
impl<T: Primitive, D: DistanceFunction<T>> KMeans<T, D> {
    /// Create a new instance of the [`KMeans`] structure.
    ///
    /// ## Arguments
    /// - **samples**: Vector of samples [row-major] = [<sample0>,<sample1>,<sample2>,...]
    /// - **sample_cnt**: Amount of samples, contained in the passed **samples** vector
    /// - **sample_dims**: Amount of dimensions each sample from the **sample** vector has
    /// - **distance**: Distance function to use for the cluster assignment
    pub fn new(samples: Vec<T>, sample_cnt: usize, sample_dims: usize, distance: D) -> Result<Self> {
        if sample_cnt == 0 {
            return Err(KMeansError::invalid("dataset must contain at least one sample"));
        }
        if sample_dims == 0 {
            return Err(KMeansError::invalid("samples must have at least one dimension"));
        }
        if samples.len() != sample_cnt * sample_dims {
            return Err(KMeansError::invalid(format!(
                "expected {} values for {} samples with {} dimensions, got {}",
                sample_cnt * sample_dims, sample_cnt, sample_dims, samples.len())));
        }
        distance.check_dims(sample_dims)?;
        if let Some(idx) = samples.iter().position(|v| !v.is_finite()) {
            return Err(KMeansError::NumericFailure { stage: "input samples", index: idx / sample_dims });
        }

        Ok(Self { sample_cnt, sample_dims, samples, distance })
    }

    /// Create a new instance of the [`KMeans`] structure from a list of rows, one per sample.
    /// All rows must have the same (non-zero) length.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R], distance: D) -> Result<Self> {
        let sample_dims = match rows.first() {
            Some(r) => r.as_ref().len(),
            None => return Err(KMeansError::invalid("dataset must contain at least one sample")),
        };
        let mut samples = Vec::with_capacity(rows.len() * sample_dims);
        for (idx, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != sample_dims {
                return Err(KMeansError::invalid(format!(
                    "sample {} has {} dimensions, expected {}", idx, row.len(), sample_dims)));
            }
            samples.extend_from_slice(row);
        }
        Self::new(samples, rows.len(), sample_dims, distance)
    }

    pub fn sample_cnt(&self) -> usize { self.sample_cnt }
    pub fn sample_dims(&self) -> usize { self.sample_dims }

    /// Coordinates of the sample with index **idx**.
    pub fn sample(&self, idx: usize) -> &[T] {
        self.samples.row(idx, self.sample_dims)
    }

    // rayon does not do static scheduling (which is more apropriate here), so pin the packet size
    fn work_packet_size(&self) -> usize {
        (self.sample_cnt / rayon::current_num_threads()).max(1)
    }

    /// Index and distance of the nearest centroid among the first **k** centroids.
    /// Ties resolve to the lowest centroid index.
    #[inline(always)]
    pub(crate) fn nearest_centroid(&self, sample: &[T], centroids: &[T], k: usize) -> (usize, T) {
        let mut best = (0, T::infinity());
        for (ci, c) in centroids.chunks_exact(self.sample_dims).take(k).enumerate() {
            let dist = self.distance.distance(sample, c);
            if ci == 0 || dist < best.1 {
                best = (ci, dist);
            }
        }
        best
    }

    pub(crate) fn update_cluster_assignments(&self, state: &mut KMeansState<T>, limit_k: Option<usize>) -> Result<()> {
        let centroids = &state.centroids;
        let k = limit_k.unwrap_or(state.k);

        self.samples.par_chunks_exact(self.sample_dims)
            .with_min_len(self.work_packet_size())
            .zip(state.assignments.par_iter_mut())
            .zip(state.centroid_distances.par_iter_mut())
            .enumerate()
            .try_for_each(|(idx, ((s, assignment), centroid_dist))| {
                let (best_idx, best_dist) = self.nearest_centroid(s, centroids, k);
                if !best_dist.is_finite() {
                    return Err(KMeansError::NumericFailure { stage: "cluster assignment", index: idx });
                }
                *assignment = best_idx;
                *centroid_dist = best_dist;
                Ok(())
            })
    }

    pub(crate) fn update_cluster_frequencies(&self, assignments: &[usize], centroid_frequency: &mut[usize]) -> usize {
        centroid_frequency.iter_mut().for_each(|v| *v = 0);
        let mut used_centroids_cnt = 0;
        assignments.iter().cloned()
            .for_each(|centroid_id| {
                if centroid_frequency[centroid_id] == 0 {
                    used_centroids_cnt += 1; // Count the amount of centroids with more than 0 samples
                }
                centroid_frequency[centroid_id] += 1;
            });
        used_centroids_cnt
    }



    /// Normal K-Means algorithm implementation (Lloyd).
    ///
    /// ## Arguments
    /// - **k**: Amount of clusters to search for
    /// - **config**: [`KMeansConfig`] instance, containing the initialization method, abort-strategy, iteration limit
    ///   and several other options for the calculation.
    ///
    /// ## Returns
    /// Instance of [`KMeansState`], containing the final state (result), or the error that prevented the calculation.
    ///
    /// ## Example
    /// ```rust
    /// use ckmeans::*;
    ///
    /// let (sample_cnt, sample_dims, k) = (2000, 20, 4);
    ///
    /// // Generate some random data
    /// let mut samples = vec![0.0f64;sample_cnt * sample_dims];
    /// samples.iter_mut().for_each(|v| *v = rand::random());
    ///
    /// let kmean = KMeans::new(samples, sample_cnt, sample_dims, EuclideanDistance).unwrap();
    /// let conf = KMeansConfig::build().seed(42).max_iter(100).build();
    /// let result = kmean.kmeans_lloyd(k, &conf).unwrap();
    ///
    /// println!("Centroids: {:?}", result.centroids);
    /// println!("Cluster-Assignments: {:?}", result.assignments);
    /// println!("Error: {}", result.distsum);
    /// ```
    pub fn kmeans_lloyd(&self, k: usize, config: &KMeansConfig<'_, T>) -> Result<KMeansState<T>> {
        crate::variants::Lloyd::calculate(self, k, config)
    }
}
