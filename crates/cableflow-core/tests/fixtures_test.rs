#![allow(clippy::unwrap_used)]
// FixtureStore loading from a real directory tree.

use std::fs;

use pretty_assertions::assert_eq;

use cableflow_core::{CoreError, FixtureKind, FixtureStore};

#[test]
fn test_load_scans_recursively_for_extension() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("cmts");
    fs::create_dir(&nested).unwrap();

    fs::write(
        dir.path().join("voice.json"),
        r#"{"flow": {"flow-name": "voice"}}"#,
    )
    .unwrap();
    fs::write(
        nested.join("edge.json"),
        r#"{"packetcable-cmts:cmts-node": {"address": "10.1.1.1"}}"#,
    )
    .unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
    fs::write(dir.path().join("broken.json"), "{").unwrap();

    let store = FixtureStore::load(dir.path(), "json").unwrap();
    let names: Vec<&str> = store.names().collect();
    assert_eq!(names, vec!["broken", "edge", "voice"]);

    let catalogue = store.catalogue();
    assert_eq!(catalogue[0].kind, FixtureKind::Invalid);
    assert_eq!(
        catalogue[1].kind,
        FixtureKind::Cmts {
            address: "10.1.1.1".into()
        }
    );
    assert_eq!(catalogue[2].letter, "c");
}

#[test]
fn test_load_accepts_dotted_extension() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.xml"), "<flow/>").unwrap();
    fs::write(dir.path().join("b.json"), "{}").unwrap();

    let store = FixtureStore::load(dir.path(), ".xml").unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.get("a"), Some("<flow/>"));
}

#[test]
fn test_load_missing_root_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = FixtureStore::load(&dir.path().join("absent"), "json").unwrap_err();
    assert!(matches!(err, CoreError::FixtureIo { .. }));
}
