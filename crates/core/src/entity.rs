//! Identity of domain records.

/// Anything addressed by a typed id: orders, line items and the computed
/// summary rows built from orders.
pub trait Entity {
    type Id: Copy + Eq + Ord + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> Self::Id;
}
