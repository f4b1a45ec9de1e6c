//! Polymorphic vector argument

/// Input shape shared by vector constructors and mutators
///
/// A vector can be built or updated from another vector, from an ordered
/// sequence of scalars, or from a single scalar broadcast to every component.
/// Conversions exist for the common call-site forms:
///
/// - `Vec3` / `&Vec3` / `(x, y, z)` → [`VecArg::Vector`]
/// - `&[f64]` / `&[f64; N]` → [`VecArg::Sequence`]
/// - `f64` → [`VecArg::Splat`]
///
/// `resolve()` (implemented per vector type) turns the argument into a concrete
/// vector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VecArg<'a, V> {
    /// An existing vector, copied component-wise
    Vector(V),
    /// Components in order; missing entries default to 0, extra entries are ignored
    Sequence(&'a [f64]),
    /// One scalar broadcast to every component
    Splat(f64),
}

impl<V> VecArg<'_, V> {
    /// Component `index` of a sequence, or 0 if the sequence is too short
    #[inline]
    pub(crate) fn sequence_component(values: &[f64], index: usize) -> f64 {
        values.get(index).copied().unwrap_or(0.0)
    }
}

impl<'a, V> From<&'a [f64]> for VecArg<'a, V> {
    fn from(values: &'a [f64]) -> Self {
        VecArg::Sequence(values)
    }
}

impl<'a, V, const N: usize> From<&'a [f64; N]> for VecArg<'a, V> {
    fn from(values: &'a [f64; N]) -> Self {
        VecArg::Sequence(values.as_slice())
    }
}

impl<'a, V> From<&'a Vec<f64>> for VecArg<'a, V> {
    fn from(values: &'a Vec<f64>) -> Self {
        VecArg::Sequence(values.as_slice())
    }
}

impl<V> From<f64> for VecArg<'_, V> {
    fn from(value: f64) -> Self {
        VecArg::Splat(value)
    }
}
