mod clock;
mod entry;
mod release_cache;
mod snapshot;

pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{BoundedTable, CacheEntry};
pub use release_cache::{ReleaseCache, DEFAULT_TTL_SECS, MAX_DETAIL_ENTRIES};
pub use snapshot::{Snapshot, SnapshotStore};

#[cfg(test)]
pub(crate) use release_cache::tests::FakeSource;
