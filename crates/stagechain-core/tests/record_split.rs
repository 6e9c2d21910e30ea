//! Partición carry / artifact de records.

use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::json;
use stagechain_core::{record, CoreEngineError, FieldClass, FieldDescriptor, Record};
use std::collections::BTreeSet;

record! {
    /// Todos los campos sobreviven.
    struct AllCarried {
        a: String => Carried,
        b: String => Carried,
    }
}

record! {
    struct Mixed {
        a: String => Carried,
        b: String => Residual,
    }
}

record! {
    struct OnlyResidual {
        a: String => Residual,
        b: Vec<u32> => Residual,
    }
}

record! {
    #[schema = "Renamed"]
    pub struct WithSchemaName {
        pub id: u64 => Carried,
    }
}

record! {
    struct Nothing {}
}

record! {
    struct Wide {
        name: String => Carried,
        score: i64 => Residual,
        tags: Vec<String> => Carried,
        note: Option<String> => Residual,
    }
}

fn names(it: impl IntoIterator<Item = String>) -> BTreeSet<String> {
    it.into_iter().collect()
}

#[test]
fn fields_keep_declared_classification() {
    assert_eq!(Mixed::FIELDS,
               &[FieldDescriptor::classify("a", "String", FieldClass::Carried),
                 FieldDescriptor::classify("b", "String", FieldClass::Residual)]);
    assert_eq!(OnlyResidual::FIELDS[1].value_type, "Vec<u32>");
    assert_eq!(WithSchemaName::NAME, "Renamed");
    assert_eq!(Nothing::NAME, "Nothing");
}

#[test]
fn all_carried_yields_empty_artifact() {
    let rec = AllCarried { a: "A".into(),
                           b: "B".into() };
    let carry = rec.carry().expect("carry");
    assert_eq!(carry.names().collect::<Vec<_>>(), vec!["a", "b"]);

    let artifact = rec.derive_artifact().expect("artifact");
    assert!(artifact.is_empty());
    assert!(artifact.is_from::<AllCarried>());
}

#[test]
fn mixed_fields_split_in_two() {
    let rec = Mixed { a: "A".into(),
                      b: "B".into() };
    let carry = rec.carry().expect("carry");
    assert_eq!(carry.get("a"), Some(&json!("A")));
    assert!(!carry.contains("b"));

    let artifact = rec.derive_artifact().expect("artifact");
    assert_eq!(artifact.field_names().collect::<Vec<_>>(), vec!["b"]);
    assert_eq!(artifact.get("b"), Some(&json!("B")));
    assert_eq!(artifact.source_type(), Mixed::schema());
    assert_eq!(artifact.source_type().name(), "Mixed");
}

#[test]
fn only_residual_yields_empty_carry() {
    let rec = OnlyResidual { a: "A".into(),
                             b: vec![1, 2] };
    assert!(rec.carry().expect("carry").is_empty());
    let artifact = rec.derive_artifact().expect("artifact");
    assert_eq!(artifact.len(), 2);
    assert_eq!(artifact.get("b"), Some(&json!([1, 2])));
}

#[test]
fn zero_field_record_is_valid() {
    let (carry, artifact) = Nothing {}.split().expect("split");
    assert!(carry.is_empty());
    assert!(artifact.is_empty());
    assert!(artifact.is_from::<Nothing>());
}

#[test]
fn artifact_decodes_into_typed_view() {
    #[derive(Debug, Deserialize, PartialEq)]
    struct WideResidue {
        score: i64,
        note: Option<String>,
    }

    let rec = Wide { name: "n".into(),
                     score: -4,
                     tags: vec!["x".into()],
                     note: None };
    let view: WideResidue = rec.derive_artifact().expect("artifact").decode().expect("decode");
    assert_eq!(view, WideResidue { score: -4, note: None });
}

#[test]
fn artifact_hash_depends_on_content_and_source() {
    let a = Mixed { a: "A".into(),
                    b: "B".into() }.derive_artifact()
                                    .expect("artifact");
    let same_residue = Mixed { a: "other".into(),
                               b: "B".into() }.derive_artifact()
                                              .expect("artifact");
    let other_residue = Mixed { a: "A".into(),
                                b: "C".into() }.derive_artifact()
                                               .expect("artifact");
    assert_eq!(a.hash(), same_residue.hash());
    assert_ne!(a.hash(), other_residue.hash());
    assert_eq!(a.hash().len(), 64);
}

#[test]
fn carry_builds_the_next_record() {
    let rec = Mixed { a: "A".into(),
                      b: "B".into() };
    let next: AllCarried = rec.carry()
                              .and_then(|c| c.with("b", "new"))
                              .and_then(|c| c.into_record())
                              .expect("next record");
    assert_eq!(next, AllCarried { a: "A".into(), b: "new".into() });

    let carry = rec.carry().expect("carry");
    assert_eq!(carry.get_as::<String>("a").expect("a"), "A");
    assert_eq!(carry.source_type().name(), "Mixed");
    assert!(carry.clone().without("a").is_empty());

    let fields = carry.with("extra", 7).expect("with").into_fields();
    assert_eq!(fields.keys().map(String::as_str).collect::<Vec<_>>(), vec!["a", "extra"]);
    assert_eq!(fields["extra"], json!(7));
}

#[test]
fn incomplete_carry_is_a_decode_error() {
    let carry = Mixed { a: "A".into(),
                        b: "B".into() }.carry()
                                       .expect("carry");
    let err = carry.into_record::<AllCarried>().unwrap_err();
    assert!(matches!(err, CoreEngineError::RecordDecode { schema: "AllCarried", .. }), "{err}");
}

// --- Records declarados a mano (sin macro) -----------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Unclassified {
    a: String,
    hidden: String,
}

impl Record for Unclassified {
    const NAME: &'static str = "Unclassified";
    const FIELDS: &'static [FieldDescriptor] = &[FieldDescriptor::carried("a", "String")];
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Duplicated {
    a: String,
}

impl Record for Duplicated {
    const NAME: &'static str = "Duplicated";
    const FIELDS: &'static [FieldDescriptor] =
        &[FieldDescriptor::carried("a", "String"), FieldDescriptor::residual("a", "String")];
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Phantom {
    a: String,
}

impl Record for Phantom {
    const NAME: &'static str = "Phantom";
    const FIELDS: &'static [FieldDescriptor] =
        &[FieldDescriptor::carried("a", "String"), FieldDescriptor::residual("ghost", "u8")];
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Scalar(u32);

impl Record for Scalar {
    const NAME: &'static str = "Scalar";
    const FIELDS: &'static [FieldDescriptor] = &[];
}

#[test]
fn unclassified_field_is_malformed() {
    let err = Unclassified { a: "A".into(),
                             hidden: "h".into() }.derive_artifact()
                                                 .unwrap_err();
    match err {
        CoreEngineError::MalformedSchema { schema, reason } => {
            assert_eq!(schema, "Unclassified");
            assert!(reason.contains("hidden"), "{reason}");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn duplicated_declaration_is_malformed_without_instance() {
    assert!(matches!(Duplicated::validate_schema(), Err(CoreEngineError::MalformedSchema { schema: "Duplicated", .. })));
}

#[test]
fn missing_declared_field_is_malformed() {
    let err = Phantom { a: "A".into() }.carry().unwrap_err();
    assert!(err.to_string().contains("ghost"), "{err}");
}

#[test]
fn non_object_record_is_malformed() {
    let err = Scalar(3).split().unwrap_err();
    assert!(matches!(err, CoreEngineError::MalformedSchema { schema: "Scalar", .. }));
}

record! {
    struct RenamedResidual {
        a: String => Carried,
        #[serde(rename = "B")]
        b: String => Residual,
    }
}

record! {
    struct SkippedField {
        a: String => Carried,
        #[serde(skip)]
        b: String => Residual,
    }
}

record! {
    struct Flattened {
        a: String => Carried,
        #[serde(flatten)]
        extra: std::collections::HashMap<String, String> => Residual,
    }
}

#[test]
fn renamed_field_is_malformed_without_instance() {
    match RenamedResidual::validate_schema() {
        Err(CoreEngineError::MalformedSchema { schema, reason }) => {
            assert_eq!(schema, "RenamedResidual");
            assert!(reason.contains("`B`"), "{reason}");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn skipped_field_is_malformed_without_instance() {
    let err = SkippedField::validate_schema().unwrap_err();
    assert!(err.to_string().contains("`b`"), "{err}");
}

#[test]
fn flattened_field_is_malformed_without_instance() {
    let err = Flattened::validate_schema().unwrap_err();
    assert!(err.to_string().contains("a map"), "{err}");
}

#[test]
fn well_formed_records_pass_static_validation() {
    assert!(Mixed::validate_schema().is_ok());
    assert!(Wide::validate_schema().is_ok());
    assert!(Nothing::validate_schema().is_ok());
    assert!(Unclassified::validate_schema().is_err());
    assert!(Phantom::validate_schema().is_err());
    assert!(Scalar::validate_schema().is_err());
}

proptest! {
    #[test]
    fn carry_and_artifact_are_complementary(name in ".*", score in any::<i64>(),
                                            tags in proptest::collection::vec(".*", 0..4),
                                            note in proptest::option::of(".*")) {
        let rec = Wide { name, score, tags, note };
        let all = names(rec.to_fields().expect("fields").into_keys());
        let (carry, artifact) = rec.split().expect("split");
        let carried = names(carry.names().map(str::to_string));
        let residual = names(artifact.field_names().map(str::to_string));

        prop_assert!(carried.is_disjoint(&residual));
        prop_assert_eq!(carried.union(&residual).cloned().collect::<BTreeSet<_>>(), all);
        prop_assert!(artifact.is_from::<Wide>());
        prop_assert_eq!(rec.carry().expect("carry"), carry);
    }
}
