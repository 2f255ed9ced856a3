use std::collections::HashMap;

use serde_json::{Map, Value};
use tracing::debug;

use super::LoadError;

const MAX_REF_DEPTH: usize = 64;
const MAX_INLINED_NODES: usize = 2_000_000;

/// Parses JSON or YAML text, validates it as an OpenAPI/Swagger document, and
/// inlines its internal `$ref`s.
///
/// # Errors
/// Returns `LoadError::Parse` for unreadable text and `LoadError::InvalidSpec`
/// when the document lacks an `openapi`/`swagger` version field or its
/// `$ref`s expand too far.
pub fn prepare_spec(text: &str) -> Result<Value, LoadError> {
    let document = parse_document(text)?;
    validate_spec(&document)?;
    resolve_refs(&document)
}

/// Parses JSON, falling back to YAML.
///
/// # Errors
/// Returns `LoadError::Parse` when the text is neither.
pub fn parse_document(text: &str) -> Result<Value, LoadError> {
    match serde_json::from_str(text) {
        Ok(value) => Ok(value),
        Err(json_err) => serde_yaml::from_str(text).map_err(|yaml_err| {
            LoadError::Parse(format!("not JSON ({json_err}) or YAML ({yaml_err})"))
        }),
    }
}

/// Checks the discriminator fields every spec must carry.
///
/// # Errors
/// Returns `LoadError::InvalidSpec` when the document is not an object or has
/// neither `openapi` nor `swagger`.
pub fn validate_spec(document: &Value) -> Result<(), LoadError> {
    let Some(object) = document.as_object() else {
        return Err(LoadError::InvalidSpec(
            "document is not an object".to_string(),
        ));
    };
    let has_version = ["openapi", "swagger"]
        .iter()
        .filter_map(|key| object.get(*key))
        .any(|value| value.is_string() || value.is_number());
    if has_version {
        Ok(())
    } else {
        Err(LoadError::InvalidSpec(
            "missing `openapi` or `swagger` version field".to_string(),
        ))
    }
}

/// Returns a copy of `root` with every internal `$ref` replaced by its target.
///
/// Cyclic, unresolvable, and external references are kept as `$ref` objects.
/// Each target is resolved once and reused.
///
/// # Errors
/// Returns `LoadError::InvalidSpec` when inlining would produce more than
/// `MAX_INLINED_NODES` JSON nodes.
pub fn resolve_refs(root: &Value) -> Result<Value, LoadError> {
    RefResolver::new(root).resolve(root).map(|inlined| inlined.value)
}

/// A resolved subtree with its node count.
///
/// `cut` marks subtrees that kept a `$ref` because of the current resolution
/// stack; those depend on where they were reached from and are not cached.
#[derive(Clone)]
struct Inlined {
    value: Value,
    nodes: usize,
    cut: bool,
}

enum RefTarget {
    Inlined(Inlined),
    Kept { cut: bool },
}

struct RefResolver<'a> {
    root: &'a Value,
    stack: Vec<&'a str>,
    cache: HashMap<&'a str, Inlined>,
    nodes: usize,
}

impl<'a> RefResolver<'a> {
    fn new(root: &'a Value) -> Self {
        Self {
            root,
            stack: Vec::new(),
            cache: HashMap::new(),
            nodes: 0,
        }
    }

    fn charge(&mut self, nodes: usize) -> Result<(), LoadError> {
        self.nodes = self.nodes.saturating_add(nodes);
        if self.nodes > MAX_INLINED_NODES {
            return Err(LoadError::InvalidSpec(format!(
                "inlined $refs expand past {MAX_INLINED_NODES} nodes"
            )));
        }
        Ok(())
    }

    fn resolve(&mut self, value: &'a Value) -> Result<Inlined, LoadError> {
        match value {
            Value::Object(object) => {
                let mut cut = false;
                if let Some(reference) = object.get("$ref").and_then(Value::as_str) {
                    match self.resolve_reference(reference)? {
                        RefTarget::Inlined(inlined) => return Ok(inlined),
                        RefTarget::Kept { cut: kept } => cut = kept,
                    }
                }
                self.charge(1)?;
                let mut nodes = 1;
                let mut resolved = Map::with_capacity(object.len());
                for (key, child) in object {
                    let child = self.resolve(child)?;
                    nodes += child.nodes;
                    cut |= child.cut;
                    resolved.insert(key.clone(), child.value);
                }
                Ok(Inlined {
                    value: Value::Object(resolved),
                    nodes,
                    cut,
                })
            }
            Value::Array(items) => {
                self.charge(1)?;
                let mut nodes = 1;
                let mut cut = false;
                let mut resolved = Vec::with_capacity(items.len());
                for item in items {
                    let item = self.resolve(item)?;
                    nodes += item.nodes;
                    cut |= item.cut;
                    resolved.push(item.value);
                }
                Ok(Inlined {
                    value: Value::Array(resolved),
                    nodes,
                    cut,
                })
            }
            _ => {
                self.charge(1)?;
                Ok(Inlined {
                    value: value.clone(),
                    nodes: 1,
                    cut: false,
                })
            }
        }
    }

    fn resolve_reference(&mut self, reference: &'a str) -> Result<RefTarget, LoadError> {
        let Some(pointer) = reference.strip_prefix('#') else {
            return Ok(RefTarget::Kept { cut: false });
        };
        if let Some(nodes) = self.cache.get(reference).map(|cached| cached.nodes) {
            self.charge(nodes)?;
            if let Some(cached) = self.cache.get(reference) {
                return Ok(RefTarget::Inlined(cached.clone()));
            }
        }
        if self.stack.len() >= MAX_REF_DEPTH || self.stack.contains(&reference) {
            debug!(reference, "leaving cyclic $ref unresolved");
            return Ok(RefTarget::Kept { cut: true });
        }
        let Some(target) = self.root.pointer(pointer) else {
            debug!(reference, "leaving dangling $ref unresolved");
            return Ok(RefTarget::Kept { cut: false });
        };

        self.stack.push(reference);
        let resolved = self.resolve(target);
        self.stack.pop();
        let resolved = resolved?;
        if !resolved.cut {
            self.cache.insert(reference, resolved.clone());
        }
        Ok(RefTarget::Inlined(resolved))
    }
}
