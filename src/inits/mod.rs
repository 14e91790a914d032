use crate::{InitMode, KMeans, KMeansConfig, KMeansState, DistanceFunction, Primitive, Result};

mod distinctsample;
mod kmeanplusplus;
mod precomputed;
mod randomsample;
mod strided;

/// Fill **state**'s centroids using the initialization method selected in **config**.
pub(crate) fn initialize<T: Primitive, D: DistanceFunction<T>>(
    kmean: &KMeans<T, D>, state: &mut KMeansState<T>, config: &KMeansConfig<'_, T>,
) -> Result<()> {
    match config.init_mode() {
        InitMode::DistinctSample => distinctsample::calculate(kmean, state, config),
        InitMode::FastSample => randomsample::calculate(kmean, state, config),
        InitMode::Strided => strided::calculate(kmean, state),
        InitMode::KMeanPlusPlus => kmeanplusplus::calculate(kmean, state, config),
        InitMode::Precomputed(centroids) => precomputed::calculate(kmean, state, centroids),
    }
}
