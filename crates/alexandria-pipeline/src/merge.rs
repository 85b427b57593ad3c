//! Merging the static document with the scanned fragment.
//!
//! The merge is keyed on path, then method. A key present in only one
//! source is taken as-is. For a key present in both, precedence is
//! asymmetric: the scanned operation wins structurally (it reflects
//! current code reality) while the static document's top-level metadata
//! — `info`, servers, components, tags — is authoritative and is never
//! overwritten by scan output. The scanner produces no `info` block, so
//! the asymmetry cannot be violated from the scan side.

use indexmap::IndexMap;

use alexandria_model::{Document, PathItem};

use crate::error::MergeError;

/// Which source wins when static and scanned both define the same
/// path+method operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePolicy {
    /// The scanned operation replaces the static one. The default.
    #[default]
    PreferScanned,
    /// The static operation is kept; the scanned one is dropped.
    PreferStatic,
}

/// Merge the scanned fragment into the static document.
///
/// # Errors
///
/// Returns `MergeError::ReferenceConflict` if a scanned path collides
/// with a `$ref` path item in the static document: a referenced path
/// item holds no inline operations, so the two cannot be reconciled.
pub fn merge_documents(
    static_doc: Document,
    scanned: IndexMap<String, PathItem>,
    policy: MergePolicy,
) -> Result<Document, MergeError> {
    let mut merged = static_doc;

    for (path, scanned_item) in scanned {
        match merged.paths.entry(path) {
            indexmap::map::Entry::Vacant(slot) => {
                slot.insert(scanned_item);
            }
            indexmap::map::Entry::Occupied(mut slot) => {
                if slot.get().reference.is_some() {
                    return Err(MergeError::ReferenceConflict {
                        path: slot.key().clone(),
                    });
                }
                for (method, operation) in scanned_item.operations() {
                    let statically_defined = slot.get().operation(method).is_some();
                    if statically_defined && policy == MergePolicy::PreferStatic {
                        tracing::debug!(
                            path = %slot.key(),
                            method = %method,
                            "keeping static operation over scanned"
                        );
                        continue;
                    }
                    slot.get_mut().set_operation(method, operation.clone());
                }
            }
        }
    }

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alexandria_model::{Info, Method, Operation};

    fn item_with(method: Method, operation_id: &str) -> PathItem {
        let mut item = PathItem::default();
        item.set_operation(
            method,
            Operation {
                operation_id: Some(operation_id.to_string()),
                ..Operation::default()
            },
        );
        item
    }

    fn static_doc() -> Document {
        let mut doc = Document::new(Info {
            title: "Districts API".to_string(),
            version: "1.0.0".to_string(),
            ..Info::default()
        });
        doc.paths.insert(
            "/districts/all".to_string(),
            item_with(Method::Get, "staticAllDistricts"),
        );
        doc
    }

    #[test]
    fn test_disjoint_keys_taken_as_is() {
        let mut scanned = IndexMap::new();
        scanned.insert("/info/fqdn".to_string(), item_with(Method::Get, "getFqdn"));

        let merged = merge_documents(static_doc(), scanned, MergePolicy::default()).unwrap();
        assert!(merged.paths.contains_key("/districts/all"));
        assert!(merged.paths.contains_key("/info/fqdn"));
    }

    #[test]
    fn test_scanned_wins_structurally_by_default() {
        let mut scanned = IndexMap::new();
        scanned.insert(
            "/districts/all".to_string(),
            item_with(Method::Get, "scannedAllDistricts"),
        );

        let merged = merge_documents(static_doc(), scanned, MergePolicy::default()).unwrap();
        let op = merged.operation("/districts/all", Method::Get).unwrap();
        assert_eq!(op.operation_id.as_deref(), Some("scannedAllDistricts"));
    }

    #[test]
    fn test_prefer_static_policy_keeps_static_operation() {
        let mut scanned = IndexMap::new();
        scanned.insert(
            "/districts/all".to_string(),
            item_with(Method::Get, "scannedAllDistricts"),
        );

        let merged =
            merge_documents(static_doc(), scanned, MergePolicy::PreferStatic).unwrap();
        let op = merged.operation("/districts/all", Method::Get).unwrap();
        assert_eq!(op.operation_id.as_deref(), Some("staticAllDistricts"));
    }

    #[test]
    fn test_methods_merge_within_shared_path() {
        let mut scanned = IndexMap::new();
        scanned.insert(
            "/districts/all".to_string(),
            item_with(Method::Post, "createDistrict"),
        );

        let merged = merge_documents(static_doc(), scanned, MergePolicy::default()).unwrap();
        let item = merged.path_item("/districts/all").unwrap();
        assert_eq!(
            item.operation(Method::Get).unwrap().operation_id.as_deref(),
            Some("staticAllDistricts")
        );
        assert_eq!(
            item.operation(Method::Post).unwrap().operation_id.as_deref(),
            Some("createDistrict")
        );
    }

    #[test]
    fn test_info_never_overwritten_by_merge() {
        let mut scanned = IndexMap::new();
        scanned.insert("/info/fqdn".to_string(), item_with(Method::Get, "getFqdn"));

        let merged = merge_documents(static_doc(), scanned, MergePolicy::default()).unwrap();
        assert_eq!(merged.info.title, "Districts API");
        assert_eq!(merged.info.version, "1.0.0");
    }

    #[test]
    fn test_reference_conflict_is_fatal() {
        let mut doc = static_doc();
        doc.paths.insert(
            "/legacy".to_string(),
            PathItem {
                reference: Some("#/components/pathItems/legacy".to_string()),
                ..PathItem::default()
            },
        );

        let mut scanned = IndexMap::new();
        scanned.insert("/legacy".to_string(), item_with(Method::Get, "legacyOp"));

        let result = merge_documents(doc, scanned, MergePolicy::default());
        assert!(matches!(
            result,
            Err(MergeError::ReferenceConflict { path }) if path == "/legacy"
        ));
    }

    #[test]
    fn test_merge_is_idempotent_for_same_inputs() {
        let mut scanned = IndexMap::new();
        scanned.insert("/info/fqdn".to_string(), item_with(Method::Get, "getFqdn"));

        let a = merge_documents(static_doc(), scanned.clone(), MergePolicy::default()).unwrap();
        let b = merge_documents(static_doc(), scanned, MergePolicy::default()).unwrap();
        assert_eq!(a, b);
    }
}
