use thiserror::Error;

/// Errors surfaced by the timeline engine.
///
/// Expected "no match" outcomes (closest-time queries on empty layers,
/// collision checks without a selection) are represented as `Option`/`bool`
/// returns, not errors. Only genuine contract violations land here.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimelineError {
    /// Extent queries require at least one layer; callers should guard with
    /// [`LayerRegistry::is_empty`](crate::data::registry::LayerRegistry::is_empty).
    #[error("layer collection is empty")]
    NoLayers,
}
