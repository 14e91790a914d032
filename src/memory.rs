use num::{Float, NumCast, Zero};
use rand::distributions::uniform::SampleUniform;
use std::{
    fmt::{Debug, Display, LowerExp},
    iter::Sum,
    ops::{Add, AddAssign, Sub, SubAssign},
};

pub trait Primitive: Add + AddAssign + Sum + Sub + SubAssign + Zero + Float + NumCast + SampleUniform
                + PartialOrd + Copy + Default + Display + Debug + Sync + Send + LowerExp + 'static
                + for<'a> AddAssign<&'a Self> {}
impl Primitive for f32 {}
impl Primitive for f64 {}

/// Cast helper for numeric constants. Every value used in this crate fits into [`f32`], so the
/// cast can not fail for the supported primitives.
#[inline(always)]
pub(crate) fn cast<T: Primitive>(v: f64) -> T {
    <T as NumCast>::from(v).unwrap_or_else(T::nan)
}

/// Row-major buffer of equally sized rows (samples or centroids).
pub(crate) trait RowBuffer<T> {
    fn row(&self, idx: usize, dims: usize) -> &[T];
    fn set_row_from_iter(&mut self, idx: usize, dims: usize, src: impl Iterator<Item = T>);
}
impl<T: Primitive> RowBuffer<T> for Vec<T> {
    #[inline(always)]
    fn row(&self, idx: usize, dims: usize) -> &[T] {
        &self[idx * dims..(idx + 1) * dims]
    }
    fn set_row_from_iter(&mut self, idx: usize, dims: usize, src: impl Iterator<Item = T>) {
        self[idx * dims..(idx + 1) * dims].iter_mut()
            .zip(src)
            .for_each(|(c, s)| *c = s);
    }
}
