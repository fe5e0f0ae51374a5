//! Context document: the project's long-lived structured memory.
//!
//! Fixed fields (project metadata, brain timestamps, configuration options)
//! are typed with explicit defaults. Genuinely free-form parts (tech stack,
//! user preferences, extra state) are kept as `serde_yaml` values so nothing a
//! user writes by hand is lost on the next save.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

pub const BRAIN_VERSION: &str = "0.1.0";

/// The context document stored at `memory/context.yaml`.
///
/// `brain_meta` and `current_state` carry no serde default: a document that
/// lacks either fails to deserialize and is reported as corrupt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextDocument {
    #[serde(default)]
    pub project: ProjectInfo,

    #[serde(default = "default_brain_version")]
    pub brain_version: String,

    pub brain_meta: BrainMeta,

    pub current_state: CurrentState,

    /// Category → decided value, plus the `decided` sub-mapping.
    #[serde(default)]
    pub tech_stack: Mapping,

    #[serde(default)]
    pub configuration: Configuration,

    /// Pattern category → number of learned patterns.
    #[serde(default)]
    pub patterns_learned: Mapping,

    #[serde(default)]
    pub user_preferences: Mapping,

    /// Unrecognized top-level keys, preserved verbatim.
    #[serde(flatten)]
    pub extra: Mapping,
}

fn default_brain_version() -> String {
    BRAIN_VERSION.into()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInfo {
    #[serde(default)]
    pub name: String,

    #[serde(rename = "type", default = "default_project_type")]
    pub kind: String,

    #[serde(default = "default_phase")]
    pub phase: String,

    /// Start date, `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started: Option<NaiveDate>,
}

fn default_project_type() -> String {
    "application".into()
}
fn default_phase() -> String {
    "initial-development".into()
}

impl Default for ProjectInfo {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: default_project_type(),
            phase: default_phase(),
            started: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrainMeta {
    #[serde(default)]
    pub last_active: Option<DateTime<Utc>>,

    #[serde(default)]
    pub last_checkpoint: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_on: Option<String>,

    #[serde(flatten)]
    pub extra: Mapping,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default = "default_explanation_level")]
    pub explanation_level: String,

    #[serde(default = "default_true")]
    pub auto_checkpoint: bool,

    #[serde(default = "default_sync_interval")]
    pub vendor_sync_interval: String,

    #[serde(default, skip_serializing_if = "Mapping::is_empty")]
    pub user_preferences: Mapping,

    #[serde(flatten)]
    pub extra: Mapping,
}

fn default_explanation_level() -> String {
    "medium".into()
}
fn default_true() -> bool {
    true
}
fn default_sync_interval() -> String {
    "daily".into()
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            explanation_level: default_explanation_level(),
            auto_checkpoint: true,
            vendor_sync_interval: default_sync_interval(),
            user_preferences: Mapping::new(),
            extra: Mapping::new(),
        }
    }
}

impl ContextDocument {
    /// The skeleton written on first-time initialization.
    pub fn skeleton(project_name: &str, today: NaiveDate) -> Self {
        Self {
            project: ProjectInfo {
                name: project_name.into(),
                started: Some(today),
                ..ProjectInfo::default()
            },
            brain_version: default_brain_version(),
            brain_meta: BrainMeta::default(),
            current_state: CurrentState::default(),
            tech_stack: Mapping::new(),
            configuration: Configuration::default(),
            patterns_learned: Mapping::new(),
            user_preferences: Mapping::new(),
            extra: Mapping::new(),
        }
    }

    /// The document as a generic YAML value.
    pub fn to_value(&self) -> Result<Value, serde_yaml::Error> {
        serde_yaml::to_value(self)
    }

    /// Deep-merge `patch` into a copy of this document and re-read it through
    /// the typed structure.
    pub fn merged(&self, patch: &Value) -> Result<Self, serde_yaml::Error> {
        let mut value = self.to_value()?;
        deep_merge(&mut value, patch);
        serde_yaml::from_value(value)
    }

    pub fn working_on(&self) -> Option<&str> {
        self.current_state
            .working_on
            .as_deref()
            .filter(|s| !s.trim().is_empty())
    }

    /// `tech_stack.decided` as (category, choice) pairs, in document order.
    pub fn decided_stack(&self) -> Vec<(String, String)> {
        let Some(Value::Mapping(decided)) = self.tech_stack.get("decided") else {
            return Vec::new();
        };
        decided
            .iter()
            .filter_map(|(k, v)| Some((scalar_to_string(k)?, scalar_to_string(v)?)))
            .collect()
    }
}

/// Recursively merge `patch` into `target`.
///
/// Mappings merge key by key; any other combination (including sequences,
/// and mapping ↔ scalar) replaces the target value wholesale.
pub fn deep_merge(target: &mut Value, patch: &Value) {
    match (target, patch) {
        (Value::Mapping(target), Value::Mapping(patch)) => {
            for (key, patch_value) in patch {
                match target.get_mut(key) {
                    Some(existing) if existing.is_mapping() && patch_value.is_mapping() => {
                        deep_merge(existing, patch_value);
                    }
                    _ => {
                        target.insert(key.clone(), patch_value.clone());
                    }
                }
            }
        }
        (target, patch) => *target = patch.clone(),
    }
}

/// Build a nested patch from a dotted path: `a.b` + `v` → `{a: {b: v}}`.
pub fn patch_from_path(path: &str, value: Value) -> Option<Value> {
    let segments: Vec<&str> = path.split('.').map(str::trim).collect();
    if segments.iter().any(|s| s.is_empty()) {
        return None;
    }
    Some(segments.iter().rev().fold(value, |acc, segment| {
        let mut map = Mapping::new();
        map.insert(Value::String((*segment).to_string()), acc);
        Value::Mapping(map)
    }))
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn yaml(s: &str) -> Value {
        serde_yaml::from_str(s).unwrap()
    }

    fn sample() -> ContextDocument {
        ContextDocument::skeleton("demo", NaiveDate::from_ymd_opt(2026, 1, 5).unwrap())
    }

    #[test]
    fn merge_with_empty_patch_is_identity() {
        let mut doc = yaml("a: 1\nb: {c: [1, 2], d: x}");
        let before = doc.clone();
        deep_merge(&mut doc, &Value::Mapping(Mapping::new()));
        assert_eq!(doc, before);
    }

    fn arbitrary_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| Value::Number(n.into())),
            "[a-z]{0,8}".prop_map(Value::String),
        ];
        leaf.prop_recursive(3, 32, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Sequence),
                mapping_of(inner),
            ]
        })
    }

    // Few distinct keys, so patches and targets overlap often.
    fn mapping_of(values: impl Strategy<Value = Value>) -> impl Strategy<Value = Value> {
        prop::collection::btree_map("[a-d]{1,2}", values, 0..5).prop_map(|entries| {
            Value::Mapping(
                entries
                    .into_iter()
                    .map(|(k, v)| (Value::String(k), v))
                    .collect(),
            )
        })
    }

    proptest! {
        #[test]
        fn prop_merge_with_empty_patch_is_identity(doc in mapping_of(arbitrary_value())) {
            let mut merged = doc.clone();
            deep_merge(&mut merged, &Value::Mapping(Mapping::new()));
            prop_assert_eq!(merged, doc);
        }

        #[test]
        fn prop_merge_is_idempotent(
            doc in mapping_of(arbitrary_value()),
            patch in mapping_of(arbitrary_value())
        ) {
            let mut once = doc;
            deep_merge(&mut once, &patch);
            let mut twice = once.clone();
            deep_merge(&mut twice, &patch);
            prop_assert_eq!(twice, once);
        }
    }

    #[test]
    fn merge_recurses_into_mappings() {
        let mut doc = yaml("tech_stack: {decided: {db: postgres}}\nproject: {name: a}");
        deep_merge(&mut doc, &yaml("tech_stack: {decided: {ui: react}}"));
        assert_eq!(
            doc,
            yaml("tech_stack: {decided: {db: postgres, ui: react}}\nproject: {name: a}")
        );
    }

    #[test]
    fn merge_replaces_sequences_and_mixed_kinds() {
        let mut doc = yaml("list: [1, 2, 3]\nnested: {x: 1}\nscalar: 5");
        deep_merge(&mut doc, &yaml("list: [9]\nnested: gone\nscalar: {now: map}"));
        assert_eq!(doc, yaml("list: [9]\nnested: gone\nscalar: {now: map}"));
    }

    #[test]
    fn merge_is_idempotent() {
        let patch = yaml("current_state: {working_on: auth, extra: [a]}\nnew_key: 1");
        let mut once = yaml("current_state: {working_on: setup}\nproject: {name: p}");
        deep_merge(&mut once, &patch);
        let mut twice = once.clone();
        deep_merge(&mut twice, &patch);
        assert_eq!(once, twice);
    }

    #[test]
    fn skeleton_roundtrips_through_yaml() {
        let doc = sample();
        let text = serde_yaml::to_string(&doc).unwrap();
        let parsed: ContextDocument = serde_yaml::from_str(&text).unwrap();
        assert_eq!(parsed, doc);
        assert!(text.contains("brain_meta"));
        assert!(text.contains("current_state"));
    }

    #[test]
    fn missing_required_sections_fail_to_parse() {
        let err = serde_yaml::from_str::<ContextDocument>("project: {name: x}\nbrain_meta: {}")
            .unwrap_err();
        assert!(err.to_string().contains("current_state"));
    }

    #[test]
    fn unknown_keys_are_preserved() {
        let text = "brain_meta: {}\ncurrent_state: {working_on: api, blockers: [ci]}\ncustom: {keep: me}\n";
        let doc: ContextDocument = serde_yaml::from_str(text).unwrap();
        assert_eq!(doc.working_on(), Some("api"));
        assert!(doc.current_state.extra.contains_key("blockers"));

        let out = serde_yaml::to_string(&doc).unwrap();
        assert!(out.contains("custom"));
        assert!(out.contains("blockers"));
    }

    #[test]
    fn merged_updates_typed_fields() {
        let doc = sample()
            .merged(&yaml("project: {phase: beta}\ncurrent_state: {working_on: billing}"))
            .unwrap();
        assert_eq!(doc.project.phase, "beta");
        assert_eq!(doc.project.name, "demo");
        assert_eq!(doc.working_on(), Some("billing"));
    }

    #[test]
    fn merged_rejects_patch_that_breaks_structure() {
        assert!(sample().merged(&yaml("brain_meta: 3")).is_err());
    }

    #[test]
    fn decided_stack_reads_scalars_in_order() {
        let doc = sample()
            .merged(&yaml("tech_stack: {decided: {frontend: nextjs, db: supabase, port: 3000}}"))
            .unwrap();
        assert_eq!(
            doc.decided_stack(),
            vec![
                ("frontend".to_string(), "nextjs".to_string()),
                ("db".to_string(), "supabase".to_string()),
                ("port".to_string(), "3000".to_string()),
            ]
        );
    }

    #[test]
    fn patch_from_dotted_path() {
        let patch = patch_from_path("current_state.working_on", Value::String("x".into())).unwrap();
        assert_eq!(patch, yaml("current_state: {working_on: x}"));
        assert!(patch_from_path("a..b", Value::Null).is_none());
    }
}
