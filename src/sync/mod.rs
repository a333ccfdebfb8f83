pub mod fetcher;

pub use fetcher::{EventFetcher, FetchOutcome, FetchSequencer, SyncError};
