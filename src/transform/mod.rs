//! Value transformers applied to metadata before it is written
//!
//! The [`Transformer`] trait is the seam between metadata construction and
//! serialization. The only transformer shipped today prunes null fields.

mod null_dropper;

pub use null_dropper::{NullDropper, drop_nones};

use eyre::Result;

/// Transformer trait for transforming data items
///
/// # Example
/// ```
/// use fmu_dataio::transform::Transformer;
/// use eyre::Result;
///
/// struct Uppercase;
///
/// impl Transformer for Uppercase {
///     type Input = String;
///     type Output = String;
///
///     fn transform(&self, input: Self::Input) -> Result<Self::Output> {
///         Ok(input.to_uppercase())
///     }
/// }
///
/// assert_eq!(Uppercase.transform("abc".to_string()).unwrap(), "ABC");
/// ```
pub trait Transformer: Send + Sync {
    /// Input item type
    type Input: Send;

    /// Output item type after transformation
    type Output: Send;

    /// Transform a single item
    fn transform(&self, input: Self::Input) -> Result<Self::Output>;

    /// Transform multiple items (default batch implementation)
    fn transform_many(&self, inputs: Vec<Self::Input>) -> Result<Vec<Self::Output>> {
        inputs.into_iter().map(|i| self.transform(i)).collect()
    }
}
