//! Mod namespace opt-in registry and record filtering.
//!
//! Content modules that want the simulator to pick up their captured
//! registrations opt in by name. Filtering is deferred until bootstrap, when
//! the opt-in set is known to be complete.

use crate::capture::{DataPackageRecord, SkillRecord};

/// Set of namespaces that explicitly opted in, kept lowercase.
///
/// Append-only: namespaces are never removed for the lifetime of the
/// process.
#[derive(Debug, Clone, Default)]
pub struct NamespaceRegistry {
    names: Vec<String>,
}

impl NamespaceRegistry {
    /// Register a namespace. Empty or whitespace-only input is silently
    /// ignored, a deliberate leniency for third-party callers. Names are
    /// case-folded to lowercase; duplicates are kept once.
    pub fn register(&mut self, raw: &str) {
        let name = raw.trim().to_lowercase();

        if name.is_empty() {
            return;
        }

        if !self.names.contains(&name) {
            self.names.push(name);
        }
    }

    pub fn contains(&self, namespace: &str) -> bool {
        let lowered = namespace.to_lowercase();
        self.names.iter().any(|name| *name == lowered)
    }

    /// Defensive copy of the registered names.
    pub fn snapshot(&self) -> Vec<String> {
        self.names.clone()
    }
}

/// Keep only packages whose namespace is in the allowed set.
///
/// Pure: same input, same output, regardless of record order. `allowed` is
/// expected lowercase (as produced by `NamespaceRegistry::snapshot`);
/// record namespaces are folded before comparison.
pub fn filter_data_packages(
    records: Vec<DataPackageRecord>,
    allowed: &[String],
) -> Vec<DataPackageRecord> {
    records
        .into_iter()
        .filter(|record| allowed.contains(&record.namespace.to_lowercase()))
        .collect()
}

/// Keep only skill registrations whose namespace is in the allowed set.
pub fn filter_skills(records: Vec<SkillRecord>, allowed: &[String]) -> Vec<SkillRecord> {
    records
        .into_iter()
        .filter(|record| allowed.contains(&record.namespace.name.to_lowercase()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::NamespaceInfo;
    use serde_json::json;

    fn package(namespace: &str) -> DataPackageRecord {
        DataPackageRecord {
            namespace: namespace.to_string(),
            package: json!({}),
        }
    }

    fn skill(name: &str, namespace: &str) -> SkillRecord {
        SkillRecord {
            name: name.to_string(),
            namespace: NamespaceInfo {
                name: namespace.to_string(),
                is_modded: true,
            },
            media: String::new(),
        }
    }

    #[test]
    fn test_register_folds_case_and_dedupes() {
        let mut registry = NamespaceRegistry::default();
        registry.register("SomeMod");
        registry.register("somemod");
        registry.register("OtherMod");

        assert_eq!(registry.snapshot(), vec!["somemod", "othermod"]);
    }

    #[test]
    fn test_register_ignores_blank_input() {
        let mut registry = NamespaceRegistry::default();
        registry.register("");
        registry.register("   ");

        assert!(registry.snapshot().is_empty());
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        let mut registry = NamespaceRegistry::default();
        registry.register("SomeMod");

        assert!(registry.contains("somemod"));
        assert!(registry.contains("SOMEMOD"));
        assert!(!registry.contains("other"));
    }

    #[test]
    fn test_snapshot_is_a_defensive_copy() {
        let mut registry = NamespaceRegistry::default();
        registry.register("somemod");

        let mut snapshot = registry.snapshot();
        snapshot.push("injected".to_string());

        assert_eq!(registry.snapshot(), vec!["somemod"]);
    }

    #[test]
    fn test_filter_keeps_only_allowed_namespaces() {
        let allowed = vec!["somemod".to_string()];
        let records = vec![package("SomeMod"), package("otherMod"), package("somemod")];

        let kept = filter_data_packages(records, &allowed);
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|r| r.namespace.to_lowercase() == "somemod"));
    }

    #[test]
    fn test_filter_matches_across_casing() {
        // "Foo" in records vs "foo" in the allowed set must match.
        let allowed = vec!["foo".to_string()];
        let kept = filter_data_packages(vec![package("Foo")], &allowed);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_filter_is_idempotent_and_order_independent() {
        let allowed = vec!["a".to_string(), "b".to_string()];
        let forward = vec![package("a"), package("b"), package("c")];
        let reversed = vec![package("c"), package("b"), package("a")];

        let once = filter_data_packages(forward, &allowed);
        let twice = filter_data_packages(once.clone(), &allowed);
        assert_eq!(once.len(), twice.len());

        let mut kept: Vec<String> = filter_data_packages(reversed, &allowed)
            .into_iter()
            .map(|r| r.namespace)
            .collect();
        kept.sort();
        assert_eq!(kept, vec!["a", "b"]);
    }

    #[test]
    fn test_filter_skills_uses_namespace_name() {
        let allowed = vec!["somemod".to_string()];
        let records = vec![skill("Harvesting", "SomeMod"), skill("Mining", "other")];

        let kept = filter_skills(records, &allowed);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "Harvesting");
    }
}
