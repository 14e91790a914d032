use ckmeans::*;
use rand::prelude::*;

/// Reduce a set of random RGB colours to a small palette, comparing colours by perceived luminance.
fn main() {
    let mut rnd = StdRng::seed_from_u64(7);
    let pixels: Vec<[f32; 3]> = (0..10000)
        .map(|_| [rnd.gen_range(0.0..1.0), rnd.gen_range(0.0..1.0), rnd.gen_range(0.0..1.0)])
        .collect();

    let kmean = KMeans::from_rows(&pixels, WeightedEuclideanDistance::perceptual_rgb()).expect("valid pixels");
    let conf = KMeansConfig::build().seed(7).init_mode(InitMode::KMeanPlusPlus).build();
    let palette = kmean.kmeans_lloyd(8, &conf).expect("k-means failed");

    for (idx, colour) in palette.centroid_rows().iter().enumerate() {
        println!("#{} rgb({:.3}, {:.3}, {:.3}) used by {} pixels",
            idx, colour[0], colour[1], colour[2], palette.centroid_frequency[idx]);
    }
}
