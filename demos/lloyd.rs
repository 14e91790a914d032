use ckmeans::*;

fn main() {
    let (sample_cnt, sample_dims, k) = (20000, 200, 4);

    // Generate some random data
    let mut samples = vec![0.0f64;sample_cnt * sample_dims];
    samples.iter_mut().for_each(|v| *v = rand::random());

    // Calculate kmeans, using distinct random samples as initial centroids
    let kmean = KMeans::new(samples, sample_cnt, sample_dims, EuclideanDistance).expect("valid samples");
    let conf = KMeansConfig::build().max_iter(100).build();
    let result = kmean.kmeans_lloyd(k, &conf).expect("k-means failed");

    println!("Centroids: {:?}", result.centroids);
    println!("Cluster-Assignments: {:?}", result.assignments);
    println!("Error: {}", result.distsum);
    println!("Iterations: {} ({:?})", result.iterations, result.termination);
}
