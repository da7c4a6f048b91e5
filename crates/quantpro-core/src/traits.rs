use crate::error::Result;
use crate::types::Record;

/// Supplies the records of one dataset, in storage order.
///
/// `dataset` is the identifier a domain schema declares (a file name for the
/// CSV store). Implementations are read-only; every call returns a fresh copy.
pub trait RecordSource: Send + Sync {
    fn load(&self, dataset: &str) -> Result<Vec<Record>>;
}
