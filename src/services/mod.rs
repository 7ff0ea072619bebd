// Service exports
pub mod appwrite;
pub mod cache;
pub mod snapshot;

pub use appwrite::{AppwriteClient, AppwriteCollections, AppwriteError};
pub use cache::{CacheKey, CachedSnapshotSource};
pub use snapshot::{load_role_snapshot, SnapshotError, SnapshotSource, StaticSnapshotSource};
