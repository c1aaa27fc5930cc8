use std::path::PathBuf;
use typed_builder::TypedBuilder;

/// Default number of records that may wait for the background writer.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1000;

/// Settings for opening a [`LogStore`](crate::LogStore).
///
/// ```ignore
/// let settings = StoreSettings::builder()
///     .path("store.json")
///     .queue_capacity(64)
///     .build();
/// ```
#[derive(Debug, Clone, TypedBuilder)]
pub struct StoreSettings {
    /// Location of the persisted log.
    #[builder(setter(into))]
    pub path: PathBuf,
    /// Capacity of the persistence queue. Producers block once it is full.
    /// Values below 1 are treated as 1.
    #[builder(default = DEFAULT_QUEUE_CAPACITY)]
    pub queue_capacity: usize,
    /// Call `sync_data` after every appended record.
    #[builder(default = false)]
    pub sync: bool,
}
