/// Combines per-process partial sums into global sums
///
/// When the velocity cells above each spatial cell are spread over several cooperating
/// processes every process reduces only the cells it holds. The per-spatial-cell partial sums
/// are then summed element-wise across processes by the implementor, after which every
/// process holds identical global values. The transport behind this is supplied by the caller.
pub trait GlobalReduction<T>: Sync {
    fn all_reduce_sum(&self, values: &mut [T]);
}

impl<T, R: GlobalReduction<T>> GlobalReduction<T> for &R {
    fn all_reduce_sum(&self, values: &mut [T]) {
        (**self).all_reduce_sum(values)
    }
}

/// The whole coefficient array lives in this process, so local sums are already global
#[derive(Copy, Clone, Debug, Default)]
pub struct SingleProcess;

impl<T> GlobalReduction<T> for SingleProcess {
    fn all_reduce_sum(&self, _values: &mut [T]) {}
}
