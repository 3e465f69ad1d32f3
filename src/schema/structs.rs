//! The structs
//!
use serde_yaml::Value;

/// A predicate over a key and its value.
pub type Validator = fn(&str, &Value) -> bool;

/// The declarative description of a mapping with a fixed set of keys.
///
/// ```text
/// const CLUSTER: Schema = Schema {
///     name: "cluster",
///     keys: &["external-domain", "internal-domain", ...],
///     validator: is_string,
/// };
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    /// The name of the block, used in error messages.
    pub name: &'static str,
    /// The expected keys, in the order the values are returned.
    pub keys: &'static [&'static str],
    pub validator: Validator,
}
