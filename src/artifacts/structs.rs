//! The structs
//!
use std::collections::BTreeMap;

/// A generated environment file: a comment header and `KEY=VALUE` entries.
/// The entries are kept sorted by key, so the output is independent of insertion order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnvFile {
    pub header: String,
    pub entries: BTreeMap<String, String>,
}
