//! Include specifications and their parsed association form.
//!
//! # Responsibility
//! - Model the caller-declared tree of child collections to eagerly attach.
//! - Normalize each tree node into `{name, deps}` for the resolver.
//!
//! # Invariants
//! - Depth is caller-bounded; include specs are authored trees, so no cycle
//!   detection is needed or performed.
//! - Malformed JSON entries are dropped, not rejected.

use serde_json::Value;

/// One node of an include specification tree.
///
/// A bare name attaches the child collection with no further nesting; a
/// nested node carries further include specs resolved one level deeper.
#[derive(Debug, Clone, PartialEq)]
pub enum IncludeSpec {
    Name(String),
    Nested(String, Vec<IncludeSpec>),
}

impl IncludeSpec {
    /// Creates a bare include of one child collection.
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Creates a nested include carrying further specs.
    pub fn nested(name: impl Into<String>, deps: Vec<IncludeSpec>) -> Self {
        Self::Nested(name.into(), deps)
    }

    /// Parses one spec from a JSON value: a string, or a mapping whose first
    /// key is the child name and whose value is a list of further specs.
    ///
    /// Non-string, non-object values yield `None`. A mapping value that is
    /// not a list reads as no further nesting.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(name) => Some(Self::Name(name.clone())),
            Value::Object(map) => {
                let (name, deps) = map.iter().next()?;
                let deps = deps
                    .as_array()
                    .map(|entries| entries.iter().filter_map(Self::from_value).collect())
                    .unwrap_or_default();
                Some(Self::Nested(name.clone(), deps))
            }
            _ => None,
        }
    }

    /// Parses a whole include list from JSON text, dropping malformed
    /// entries.
    pub fn parse_list(payload: &str) -> serde_json::Result<Vec<Self>> {
        let entries: Vec<Value> = serde_json::from_str(payload)?;
        Ok(entries.iter().filter_map(Self::from_value).collect())
    }
}

/// Parsed association: one include node normalized to name plus nested deps.
#[derive(Debug, Clone, PartialEq)]
pub struct Association {
    pub name: String,
    pub deps: Vec<IncludeSpec>,
}

/// Normalizes include specs into associations.
///
/// Bare names yield empty deps; nested nodes carry their child specs through
/// unchanged for the next resolution level.
pub fn parse_associations(includes: &[IncludeSpec]) -> Vec<Association> {
    includes
        .iter()
        .map(|spec| match spec {
            IncludeSpec::Name(name) => Association {
                name: name.clone(),
                deps: Vec::new(),
            },
            IncludeSpec::Nested(name, deps) => Association {
                name: name.clone(),
                deps: deps.clone(),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{parse_associations, IncludeSpec};
    use serde_json::json;

    #[test]
    fn bare_name_parses_with_empty_deps() {
        let specs = vec![IncludeSpec::name("nested")];
        let associations = parse_associations(&specs);
        assert_eq!(associations.len(), 1);
        assert_eq!(associations[0].name, "nested");
        assert!(associations[0].deps.is_empty());
    }

    #[test]
    fn nested_spec_carries_deps_through() {
        let specs = vec![IncludeSpec::nested(
            "nested",
            vec![IncludeSpec::name("deeply_nested")],
        )];
        let associations = parse_associations(&specs);
        assert_eq!(associations[0].name, "nested");
        assert_eq!(
            associations[0].deps,
            vec![IncludeSpec::name("deeply_nested")]
        );
    }

    #[test]
    fn from_value_accepts_strings_and_single_key_maps() {
        assert_eq!(
            IncludeSpec::from_value(&json!("comments")),
            Some(IncludeSpec::name("comments"))
        );
        assert_eq!(
            IncludeSpec::from_value(&json!({"comments": ["authors"]})),
            Some(IncludeSpec::nested(
                "comments",
                vec![IncludeSpec::name("authors")]
            ))
        );
    }

    #[test]
    fn from_value_takes_first_key_and_drops_malformed_entries() {
        assert_eq!(IncludeSpec::from_value(&json!(42)), None);
        assert_eq!(IncludeSpec::from_value(&json!({})), None);

        let spec = IncludeSpec::from_value(&json!({"comments": "not a list"})).unwrap();
        assert_eq!(spec, IncludeSpec::nested("comments", vec![]));
    }

    #[test]
    fn parse_list_reads_arbitrary_depth_from_json_text() {
        let specs =
            IncludeSpec::parse_list(r#"["tags", {"comments": [{"authors": ["roles"]}]}]"#).unwrap();
        assert_eq!(
            specs,
            vec![
                IncludeSpec::name("tags"),
                IncludeSpec::nested(
                    "comments",
                    vec![IncludeSpec::nested(
                        "authors",
                        vec![IncludeSpec::name("roles")]
                    )]
                ),
            ]
        );
    }
}
