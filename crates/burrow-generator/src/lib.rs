//! Short key generators.
//!
//! A generator turns the current size of the store into a candidate key.
//! The store's conditional insert is what guarantees uniqueness; the
//! generator only has to propose good candidates so that the store's
//! retry loop converges quickly.

pub mod base58;
pub mod base62;

pub use base58::Base58Generator;
pub use base62::Base62Generator;

use burrow_core::ShortCode;

/// Trait for generating candidate short keys.
///
/// Implementations must be pure functions of `count`: the same input always
/// yields the same key. They should also be injective, so that a key taken
/// by a concurrent writer is never proposed again once the store has grown.
///
/// A generator with a tiny or colliding output space makes the store's
/// insert loop spin, since it retries until a free key turns up.
pub trait Generator: Send + Sync + 'static {
    /// Derives a candidate key from the number of entries in the store.
    fn generate(&self, count: u64) -> ShortCode;
}

impl<G: Generator + ?Sized> Generator for Box<G> {
    fn generate(&self, count: u64) -> ShortCode {
        (**self).generate(count)
    }
}
