//! Services that drive the matcher: explorer fetches, key rotation, and the
//! sequential scan pipeline.

pub mod explorer;
pub mod keys;
pub mod pipeline;

pub use explorer::{ExplorerClient, FetchError, FetchedSource, SourceFetcher, SourceRequest};
pub use keys::{ApiKeyRing, KeyError};
pub use pipeline::{NetworkReport, RecordOutcome, ScanError, Scanner};
