//! Loading declared option defaults from the scaffold manifest.
//!
//! The manifest (`copier.yml` / `copier.yaml`) enumerates the options a
//! scaffold exposes. A top-level entry is either a direct scalar default or
//! a question object carrying `default` and/or `placeholder` fields.
//! Entries whose name starts with `_` are internal settings and excluded.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::value::{Context, ScalarValue};

/// Candidate manifest filenames, checked in order under the template root.
pub const MANIFEST_CANDIDATES: [&str; 2] = ["copier.yml", "copier.yaml"];

/// Locate the manifest under a template root, if any candidate exists.
pub fn find_manifest(template_root: &Path) -> Option<PathBuf> {
    MANIFEST_CANDIDATES
        .iter()
        .map(|name| template_root.join(name))
        .find(|path| path.exists())
}

/// Load the flat option-name to default-value mapping from a manifest.
///
/// Never fails: a missing, unreadable, unparsable, or empty manifest
/// degrades to an empty mapping. Unreadable and unparsable manifests are
/// logged at warning level.
pub fn load_defaults(manifest_path: &Path) -> Context {
    if !manifest_path.exists() {
        debug!("manifest does not exist: {}", manifest_path.display());
        return Context::new();
    }

    let content = match fs::read_to_string(manifest_path) {
        Ok(content) => content,
        Err(err) => {
            warn!("could not read manifest {}: {}", manifest_path.display(), err);
            return Context::new();
        }
    };

    let entries = match serde_yaml::from_str::<ManifestEntries>(&content) {
        Ok(entries) => entries.0,
        Err(err) => {
            warn!("malformed manifest {}: {}", manifest_path.display(), err);
            return Context::new();
        }
    };

    let mut defaults = Context::new();
    for (key, value) in entries {
        let Some(name) = key.as_str() else {
            debug!("skipping non-string manifest key in {}", manifest_path.display());
            continue;
        };
        // Keys starting with the reserved marker are internal settings.
        if name.starts_with('_') {
            continue;
        }

        let default = match &value {
            serde_yaml::Value::Mapping(question) => question
                .get("default")
                .or_else(|| question.get("placeholder"))
                .and_then(scalar_from_yaml),
            other => scalar_from_yaml(other),
        };

        // Later entries replace earlier ones wholesale, so a duplicate
        // without a usable default clears the key.
        match default {
            Some(scalar) => {
                defaults.insert(name.to_string(), scalar);
            }
            None => {
                debug!("option '{}' carries no scalar default", name);
                defaults.remove(name);
            }
        }
    }

    defaults
}

/// Top-level manifest entries in document order.
///
/// Deserialized through a streaming visitor instead of a
/// `serde_yaml::Mapping` so that a duplicate key overwrites the earlier
/// entry rather than failing the whole parse.
struct ManifestEntries(Vec<(serde_yaml::Value, serde_yaml::Value)>);

impl<'de> Deserialize<'de> for ManifestEntries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = ManifestEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a key/value document")
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(ManifestEntries(Vec::new()))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::new();
                while let Some(entry) =
                    map.next_entry::<serde_yaml::Value, serde_yaml::Value>()?
                {
                    entries.push(entry);
                }
                Ok(ManifestEntries(entries))
            }
        }

        deserializer.deserialize_any(EntriesVisitor)
    }
}

/// Map a YAML scalar onto a [`ScalarValue`]. Sequences and mappings have no
/// scalar representation and yield `None`.
fn scalar_from_yaml(value: &serde_yaml::Value) -> Option<ScalarValue> {
    match value {
        serde_yaml::Value::Null => Some(ScalarValue::Null),
        serde_yaml::Value::Bool(b) => Some(ScalarValue::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(ScalarValue::Int(i))
            } else {
                n.as_f64().map(ScalarValue::Float)
            }
        }
        serde_yaml::Value::String(s) => Some(ScalarValue::String(s.clone())),
        _ => None,
    }
}
