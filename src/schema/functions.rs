//! The impls and functions
//!
use log::*;
use serde_yaml::{Mapping, Sequence, Value};
use crate::error::SchemaError;
use crate::schema::{Schema, Validator};

impl Schema {
    /// A schema that accepts any value for its keys.
    pub const fn new(
        name: &'static str,
        keys: &'static [&'static str],
    ) -> Self
    {
        Schema { name, keys, validator: any_value }
    }
    pub const fn with_validator(
        name: &'static str,
        keys: &'static [&'static str],
        validator: Validator,
    ) -> Self
    {
        Schema { name, keys, validator }
    }
    /// Check `value` is a mapping, and perform [keycheck] on it.
    pub fn check<'a>(
        &self,
        value: &'a Value,
    ) -> Result<Vec<&'a Value>, SchemaError>
    {
        let mapping = as_mapping(value, self.name)?;
        debug!("keycheck {}: {} keys", self.name, mapping.len());
        keycheck(mapping, self.keys, self.validator)
    }
}

/// The default predicate: every value is accepted.
pub fn any_value(
    _key: &str,
    _value: &Value,
) -> bool
{
    true
}

/// Predicate that only accepts string values.
pub fn is_string(
    _key: &str,
    value: &Value,
) -> bool
{
    value.is_string()
}

/// Validate the keys of `kvs` are exactly `keys`, and every pair satisfies `validator`.
/// The values are returned in the order of `keys`.
pub fn keycheck<'a>(
    kvs: &'a Mapping,
    keys: &[&str],
    validator: Validator,
) -> Result<Vec<&'a Value>, SchemaError>
{
    for key in kvs.keys() {
        match key.as_str() {
            Some(key) if keys.contains(&key) => {},
            _ => return Err(SchemaError::UnexpectedKey(display_value(key))),
        }
    }
    for key in keys {
        if !kvs.contains_key(*key) {
            return Err(SchemaError::MissingKey(key.to_string()));
        }
    }
    for (key, value) in kvs {
        // every key is a string at this point
        let key = key.as_str().unwrap_or_default();
        if !validator(key, value) {
            return Err(SchemaError::ValidationFailed { key: key.to_string(), value: display_value(value) });
        }
    }
    Ok(keys
        .iter()
        .filter_map(|key| kvs.get(*key))
        .collect())
}

pub fn as_mapping<'a>(
    value: &'a Value,
    name: &str,
) -> Result<&'a Mapping, SchemaError>
{
    value.as_mapping()
        .ok_or_else(|| SchemaError::NotAMapping(name.to_string()))
}

pub fn as_sequence<'a>(
    value: &'a Value,
    name: &str,
) -> Result<&'a Sequence, SchemaError>
{
    value.as_sequence()
        .ok_or_else(|| SchemaError::NotAList(name.to_string()))
}

/// Read a list of strings; `null` is not a list.
pub fn as_string_list(
    value: &Value,
    name: &str,
) -> Result<Vec<String>, SchemaError>
{
    as_sequence(value, name)?
        .iter()
        .map(|element| element.as_str()
            .map(str::to_string)
            .ok_or_else(|| SchemaError::NotAString(name.to_string())))
        .collect()
}

/// Render a yaml value for use in an error message.
pub fn display_value(
    value: &Value,
) -> String
{
    match value {
        Value::String(string) => string.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(boolean) => boolean.to_string(),
        Value::Null => "null".to_string(),
        other => serde_yaml::to_string(other)
            .map(|rendered| rendered.trim_end().to_string())
            .unwrap_or_else(|_| format!("{:?}", other)),
    }
}
