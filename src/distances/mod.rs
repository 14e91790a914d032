mod euclideandistance;
mod weighteddistance;

pub use euclideandistance::EuclideanDistance;
pub use weighteddistance::WeightedEuclideanDistance;
