//! Per-file fan-out for batch conversion.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[cfg(feature = "parallel")]
pub fn map_files<T, R, F>(files: &[T], func: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    files.par_iter().map(func).collect()
}

#[cfg(not(feature = "parallel"))]
pub fn map_files<T, R, F>(files: &[T], func: F) -> Vec<R>
where
    F: Fn(&T) -> R,
{
    files.iter().map(func).collect()
}
