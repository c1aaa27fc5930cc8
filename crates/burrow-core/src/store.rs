use crate::shortcode::ShortCode;
use async_trait::async_trait;

/// A concurrent mapping from short keys to URLs.
///
/// This is the contract the HTTP handlers consume. Lookups are pure
/// in-memory reads; [`KeyStore::put`] is the only externally visible write.
#[async_trait]
pub trait KeyStore: Send + Sync + 'static {
    /// Returns the URL stored under `key`, or `None` if the key is unknown.
    fn get(&self, key: &str) -> Option<String>;

    /// Installs `key -> url` only if `key` is not present yet.
    ///
    /// Returns `true` if the mapping was installed, `false` if the key was
    /// already taken, in which case the store is left unchanged.
    fn set(&self, key: &ShortCode, url: &str) -> bool;

    /// Number of entries currently mapped.
    ///
    /// Under concurrent writers the value may be stale by the time the
    /// caller uses it.
    fn count(&self) -> usize;

    /// Stores `url` under a freshly generated key and returns the key.
    ///
    /// Collisions with concurrent writers are retried internally and are
    /// never surfaced to the caller.
    async fn put(&self, url: &str) -> ShortCode;
}
