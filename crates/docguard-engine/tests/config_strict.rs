#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use docguard_engine::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
collections:
  - name: "exercises"
    fields:
      userId: { kind: string, requird: true } # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "INVALID_CONFIG");
}

#[test]
fn unknown_kind_fails() {
    let bad = r#"
version: 1
collections:
  - name: "exercises"
    fields:
      userId: { kind: uuid }
"#;
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn version_must_be_one() {
    let bad = r#"
version: 2
collections:
  - name: "exercises"
    fields:
      userId: { kind: string }
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn collections_required_and_unique() {
    let empty = "version: 1\n";
    assert!(config::load_from_str(empty).is_err());

    let dup = r#"
version: 1
collections:
  - name: a
    fields: { userId: { kind: string } }
  - name: a
    fields: { userId: { kind: string } }
"#;
    let err = config::load_from_str(dup).expect_err("must fail");
    assert!(err.to_string().contains("duplicate collection"));
}

#[test]
fn owner_field_must_be_declared() {
    let bad = r#"
version: 1
collections:
  - name: exercises
    owner_field: ownerId
    fields:
      userId: { kind: string }
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(err.to_string().contains("ownerId"));
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
collections:
  - name: "exercises"
    fields:
      userId: { kind: string }
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    let c = &cfg.collections[0];
    assert_eq!(c.name, "exercises");
    assert_eq!(c.owner_field, "userId");
    assert_eq!(c.unknown_fields, docguard_core::UnknownFields::Reject);
    assert_eq!(c.fields["userId"].presence, docguard_core::Presence::Required);
}

#[test]
fn shipped_config_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../docguard.yaml");
    let cfg = config::load_from_file(path).expect("shipped config");
    let engine = docguard_engine::PolicyEngine::new(&cfg).expect("compiles");
    assert_eq!(engine.collection_names(), vec!["exercises"]);
}
