//! Scan submissions and results.
//!
//! Content goes out as a [`ScanInput`] (or a list of [`BatchItem`]s) and
//! comes back as a [`ScanResult`] (or a [`BatchResult`]).

mod batch;
mod input;
mod result;

pub(crate) use batch::BatchRequest;
pub use batch::{BatchItem, BatchOptions, BatchResult};
pub use input::{ScanConfig, ScanInput, ScanSource};
pub use result::{
    FirewallResult, FragmentationResult, ScanResult, SensitivityResult, TrustResult, Usage,
};
