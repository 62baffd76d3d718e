//! Operations on the YAML tree held by [`Config`](crate::Config)
//!
//! Keys are compared lower-cased; every function here works on a plain
//! `Value` so it can be tested without touching the disk.

use anyhow::{anyhow, bail, Result};
use serde_yaml::{Mapping, Value};
use tracing::warn;

fn key(name: &str) -> Value {
    Value::String(name.to_lowercase())
}

/// Node at `path`, `root` itself for an empty path
pub(crate) fn lookup<'a>(root: &'a Value, path: &[&str]) -> Result<&'a Value> {
    path.iter()
        .enumerate()
        .try_fold(root, |node, (depth, name)| {
            let section = node
                .as_mapping()
                .ok_or_else(|| anyhow!("{} is not a section", path[..depth].join(".")))?;
            section
                .get(&key(name))
                .ok_or_else(|| anyhow!("No setting at {}", path[..=depth].join(".")))
        })
}

/// Stores `value` at `path`, creating the intermediate sections
pub(crate) fn assign(root: &mut Value, path: &[&str], value: Value) -> Result<()> {
    let Some((leaf, parents)) = path.split_last() else {
        *root = value;
        return Ok(());
    };

    let mut node = root;
    for name in parents {
        node = match node {
            Value::Mapping(section) => section
                .entry(key(name))
                .or_insert(Value::Mapping(Mapping::new())),
            _ => bail!("Cannot create {} below a scalar", name),
        };
    }

    match node {
        Value::Mapping(section) => {
            section.insert(key(leaf), value);
            Ok(())
        }
        _ => bail!("Cannot set {} below a scalar", leaf),
    }
}

/// Lays `patch` over `base`: sections merge key by key, anything else
/// replaces the base value
pub(crate) fn overlay(base: &mut Value, patch: Value) {
    match (base, patch) {
        (Value::Mapping(base_section), Value::Mapping(patch_section)) => {
            for (k, v) in patch_section {
                match base_section.get_mut(&k) {
                    Some(slot) => overlay(slot, v),
                    None => {
                        base_section.insert(k, v);
                    }
                }
            }
        }
        (slot, v) => *slot = v,
    }
}

pub(crate) fn lowercase_keys(value: Value) -> Value {
    match value {
        Value::Mapping(section) => Value::Mapping(
            section
                .into_iter()
                .map(|(k, v)| {
                    let k = match k {
                        Value::String(s) => Value::String(s.to_lowercase()),
                        other => other,
                    };
                    (k, lowercase_keys(v))
                })
                .collect(),
        ),
        Value::Sequence(items) => Value::Sequence(items.into_iter().map(lowercase_keys).collect()),
        other => other,
    }
}

/// YAML reading of an environment value: `42` is a number, `true` a bool,
/// anything unparsable stays a string
pub(crate) fn parse_scalar(raw: &str) -> Value {
    serde_yaml::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Applies `PREFIX_SECTION__KEY=value` variables to the tree
pub(crate) fn apply_env<I>(root: &mut Value, prefix: &str, vars: I)
where
    I: IntoIterator<Item = (String, String)>,
{
    for (name, raw) in vars {
        let Some(rest) = name.strip_prefix(prefix) else {
            continue;
        };
        let path: Vec<&str> = rest.split("__").collect();
        if let Err(e) = assign(root, &path, parse_scalar(&raw)) {
            warn!(variable = %name, "Ignoring environment override: {}", e);
        }
    }
}
