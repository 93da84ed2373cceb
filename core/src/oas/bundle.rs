#![deny(missing_docs)]

//! # Relative File References
//!
//! Pulls `$ref` targets that live in sibling files into the main document so
//! the rest of the pipeline only ever sees local references.
//!
//! - Schema targets are added to `components.schemas` under a fresh name, so
//!   they resolve lazily like any other component schema.
//! - Other targets (parameters, responses, path items) are parked under
//!   [`EXTERNAL_KEY`] and inlined by the dereferencer.
//! - References inside a pulled file are rewritten relative to that file.
//!
//! Remote (`http:`, `https:`) references are never fetched.

use crate::oas::ref_utils::{component_schema_name, is_literal, local_pointer};
use percent_encoding::percent_decode_str;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use url::Url;

/// Root key holding non-schema targets pulled from other files.
pub(crate) const EXTERNAL_KEY: &str = "x-apisheet-external";

/// What kind of value sits at a position in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Schema,
    SchemaMap,
    SchemaList,
    Other,
}

impl Slot {
    fn of_child(key: &str) -> Slot {
        match key {
            "schema" | "items" | "additionalProperties" | "not" | "contains"
            | "propertyNames" | "if" | "then" | "else" => Slot::Schema,
            "properties" | "patternProperties" | "dependentSchemas" | "$defs"
            | "definitions" | "schemas" => Slot::SchemaMap,
            "allOf" | "oneOf" | "anyOf" | "prefixItems" => Slot::SchemaList,
            _ => Slot::Other,
        }
    }
}

/// Rewrites every relative-file `$ref` in `root`, reading files next to `origin`.
///
/// Unreadable files and missing targets are logged and their references kept.
pub fn bundle_external_refs(root: &mut Value, origin: &Path) {
    let main = std::fs::canonicalize(origin).unwrap_or_else(|_| origin.to_path_buf());
    let mut bundler = Bundler::new(root, main.clone());
    bundler.rewrite(root, &main, true, Slot::Other);
    bundler.finish(root);
}

struct Bundler {
    main: PathBuf,
    files: HashMap<PathBuf, Option<Value>>,
    pulled: HashMap<(PathBuf, String), String>,
    taken: HashSet<String>,
    schemas: Vec<(String, Value)>,
    others: Vec<(String, Value)>,
}

impl Bundler {
    fn new(root: &Value, main: PathBuf) -> Self {
        let taken = root
            .pointer("/components/schemas")
            .and_then(Value::as_object)
            .map(|schemas| schemas.keys().cloned().collect())
            .unwrap_or_default();
        Self {
            main,
            files: HashMap::new(),
            pulled: HashMap::new(),
            taken,
            schemas: Vec::new(),
            others: Vec::new(),
        }
    }

    /// Walks `node`, which belongs to the document at `file`.
    fn rewrite(&mut self, node: &mut Value, file: &Path, is_main: bool, slot: Slot) {
        match node {
            Value::Object(map) => {
                if slot != Slot::SchemaMap {
                    if let Some(reference) = map.get("$ref").and_then(Value::as_str) {
                        let reference = reference.to_string();
                        let schema = slot == Slot::Schema;
                        if let Some(local) = self.localize(&reference, file, is_main, schema) {
                            map.insert("$ref".into(), Value::String(local));
                        }
                        return;
                    }
                }
                for (key, value) in map.iter_mut() {
                    let child = match slot {
                        Slot::SchemaMap => Slot::Schema,
                        _ if is_literal(key, value) => continue,
                        _ => Slot::of_child(key),
                    };
                    self.rewrite(value, file, is_main, child);
                }
            }
            Value::Array(items) => {
                let child = if slot == Slot::SchemaList {
                    Slot::Schema
                } else {
                    Slot::Other
                };
                for item in items {
                    self.rewrite(item, file, is_main, child);
                }
            }
            _ => {}
        }
    }

    /// The local reference replacing `reference`, when it points into a file.
    fn localize(
        &mut self,
        reference: &str,
        file: &Path,
        is_main: bool,
        schema: bool,
    ) -> Option<String> {
        let (document, fragment) = match reference.split_once('#') {
            Some((document, fragment)) => (document, fragment),
            None => (reference, ""),
        };

        let target_file = if document.is_empty() {
            if is_main {
                return None;
            }
            file.to_path_buf()
        } else {
            resolve_file(document, file)?
        };

        let target_file = std::fs::canonicalize(&target_file).unwrap_or(target_file);
        if target_file == self.main {
            return Some(format!("#{}", fragment));
        }
        self.pull(target_file, fragment, schema)
    }

    /// Copies one target into the main document and returns its new reference.
    fn pull(&mut self, file: PathBuf, fragment: &str, schema: bool) -> Option<String> {
        let key = (file.clone(), fragment.to_string());
        if let Some(local) = self.pulled.get(&key) {
            return Some(local.clone());
        }

        let mut target = self.target(&file, fragment)?;
        let as_schema = schema || component_schema_name(&format!("#{}", fragment)).is_some();

        let (entry, local) = if as_schema {
            let name = self.fresh_name(&file, fragment);
            let local = format!("#/components/schemas/{}", name);
            (name, local)
        } else {
            let index = self.pulled.len().to_string();
            let local = format!("#/{}/{}", EXTERNAL_KEY, index);
            (index, local)
        };
        self.pulled.insert(key, local.clone());
        debug!(file = %file.display(), fragment, local = %local, "Pulled external reference");

        let slot = if as_schema { Slot::Schema } else { Slot::Other };
        self.rewrite(&mut target, &file, false, slot);

        if as_schema {
            self.schemas.push((entry, target));
        } else {
            self.others.push((entry, target));
        }
        Some(local)
    }

    fn target(&mut self, file: &Path, fragment: &str) -> Option<Value> {
        let document = self
            .files
            .entry(file.to_path_buf())
            .or_insert_with(|| read_document(file))
            .as_ref()?;

        let pointer = local_pointer(&format!("#{}", fragment))?;
        let found = document.pointer(&pointer).cloned();
        if found.is_none() {
            warn!(file = %file.display(), fragment, "Reference target not found");
        }
        found
    }

    /// A component name not used yet, derived from the fragment or the file stem.
    fn fresh_name(&mut self, file: &Path, fragment: &str) -> String {
        let base = fragment
            .rsplit('/')
            .find(|segment| !segment.is_empty())
            .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
            .or_else(|| {
                file.file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| "External".to_string());
        let base: String = base
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                    c
                } else {
                    '_'
                }
            })
            .collect();

        let mut name = base.clone();
        let mut n = 2;
        while self.taken.contains(&name) {
            name = format!("{}_{}", base, n);
            n += 1;
        }
        self.taken.insert(name.clone());
        name
    }

    fn finish(self, root: &mut Value) {
        let Some(root) = root.as_object_mut() else {
            return;
        };

        if !self.schemas.is_empty() {
            let components = root
                .entry("components")
                .or_insert_with(|| Value::Object(Map::new()));
            if let Some(components) = components.as_object_mut() {
                let schemas = components
                    .entry("schemas")
                    .or_insert_with(|| Value::Object(Map::new()));
                if let Some(schemas) = schemas.as_object_mut() {
                    schemas.extend(self.schemas);
                }
            }
        }

        if !self.others.is_empty() {
            root.insert(
                EXTERNAL_KEY.into(),
                Value::Object(self.others.into_iter().collect()),
            );
        }
    }
}

/// The file a document part refers to. `None` for remote URLs.
fn resolve_file(document: &str, from: &Path) -> Option<PathBuf> {
    match Url::parse(document) {
        Ok(url) if url.scheme() == "file" => url.to_file_path().ok(),
        // A single letter scheme is a Windows drive, not a URL.
        Ok(url) if url.scheme().len() > 1 => None,
        _ => {
            let relative = percent_decode_str(document).decode_utf8_lossy();
            let dir = from.parent().unwrap_or_else(|| Path::new("."));
            Some(dir.join(relative.as_ref()))
        }
    }
}

fn read_document(file: &Path) -> Option<Value> {
    let content = match std::fs::read_to_string(file) {
        Ok(content) => content,
        Err(e) => {
            warn!(file = %file.display(), error = %e, "Referenced file could not be read");
            return None;
        }
    };
    match serde_yaml::from_str(&content) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(file = %file.display(), error = %e, "Referenced file could not be parsed");
            None
        }
    }
}
