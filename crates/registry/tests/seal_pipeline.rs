use pretty_assertions::assert_eq;
use resonance_catalog::{ArtefactSpec, Catalog, Dimension};
use resonance_registry::{seal_document, stamp_document, Registry, SealError, StampRequest};
use std::fs;
use std::path::PathBuf;

fn catalog() -> Catalog {
    let mut catalog = Catalog::new("pipeline", 4).unwrap();
    for name in ["L", "A", "E"] {
        catalog
            .add_dimension(Dimension {
                name: name.to_string(),
                label: name.to_string(),
                description: String::new(),
            })
            .unwrap();
    }
    for (id, scores) in [
        ("e1", vec![("L", 4u32)]),
        ("e2", vec![("A", 4)]),
        ("e4", vec![("L", 4), ("A", 4)]),
    ] {
        catalog
            .add_artefact(ArtefactSpec {
                id: id.to_string(),
                name: id.to_string(),
                kind: "text".to_string(),
                scores_raw: scores
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v))
                    .collect(),
                ..Default::default()
            })
            .unwrap();
    }
    catalog.define_field(vec!["e1".to_string()]).unwrap();
    catalog
}

fn request(id: &str) -> StampRequest {
    StampRequest {
        artefact_id: id.to_string(),
        session_id: "2026-01-05_session-001".to_string(),
        field_id: "S01".to_string(),
        kind: "text".to_string(),
    }
}

fn write_doc(dir: &tempfile::TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn stamp_then_seal_commits_a_witness_record() {
    let dir = tempfile::tempdir().unwrap();
    let doc = write_doc(&dir, "fruit.md", "# A fruit\n\nripened here\n");
    let registry = Registry::new(dir.path().join("registry/sealed.jsonl"));
    let catalog = catalog();

    let outcome = stamp_document(&catalog, &doc, &request("e1")).unwrap();
    assert_eq!(outcome.phi, 1.0);

    let record = seal_document(&catalog, &doc, &registry).unwrap();
    assert_eq!(record.artefact_id, "e1");
    assert_eq!(record.document_name, "fruit.md");
    assert_eq!(record.session_id, "2026-01-05_session-001");
    assert_eq!(record.field_id, "S01");
    assert_eq!(record.phi, 1.0);
    assert_eq!(
        record.dimension_names,
        vec!["L".to_string(), "A".to_string(), "E".to_string()]
    );
    assert_eq!(record.hash10, outcome.hash10);
    assert!(record.is_witness, "phi 1.0 > 0.95 must flag a witness");
    assert_eq!(record.witness_id, None);

    assert_eq!(registry.load().unwrap(), vec![record]);
}

#[test]
fn sealing_below_the_witness_threshold_is_not_a_witness() {
    let dir = tempfile::tempdir().unwrap();
    let doc = write_doc(&dir, "fruit.md", "body\n");
    let registry = Registry::new(dir.path().join("sealed.jsonl"));
    let catalog = catalog();

    // e4 sits at 45 degrees to the field: phi = 0.5.
    let outcome = stamp_document(&catalog, &doc, &request("e4")).unwrap();
    assert_eq!(outcome.phi, 0.5);

    let record = seal_document(&catalog, &doc, &registry).unwrap();
    assert!(!record.is_witness);
}

#[test]
fn tampered_body_fails_and_appends_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let doc = write_doc(&dir, "fruit.md", "original body\n");
    let registry = Registry::new(dir.path().join("sealed.jsonl"));
    let catalog = catalog();

    stamp_document(&catalog, &doc, &request("e1")).unwrap();

    // Edit the body after stamping without re-stamping.
    let text = fs::read_to_string(&doc).unwrap();
    fs::write(&doc, text.replace("original body", "edited body")).unwrap();

    let err = seal_document(&catalog, &doc, &registry).unwrap_err();
    assert!(matches!(err, SealError::IntegrityMismatch { .. }));
    assert_eq!(registry.load().unwrap(), Vec::new());
}

#[test]
fn changed_field_fails_the_score_check_and_appends_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let doc = write_doc(&dir, "fruit.md", "body\n");
    let registry = Registry::new(dir.path().join("sealed.jsonl"));
    let mut catalog = catalog();

    stamp_document(&catalog, &doc, &request("e1")).unwrap();

    // Redefine the field after stamping; phi for e1 drops from 1.0 to 0.0.
    catalog.define_field(vec!["e2".to_string()]).unwrap();

    let err = seal_document(&catalog, &doc, &registry).unwrap_err();
    match err {
        SealError::ScoreMismatch { stored, computed } => {
            assert_eq!(stored, 1.0);
            assert_eq!(computed, 0.0);
        }
        other => panic!("expected ScoreMismatch, got {other}"),
    }
    assert_eq!(registry.load().unwrap(), Vec::new());
}

#[test]
fn unstamped_document_cannot_be_sealed() {
    let dir = tempfile::tempdir().unwrap();
    let doc = write_doc(&dir, "bare.md", "no front matter here\n");
    let registry = Registry::new(dir.path().join("sealed.jsonl"));

    let err = seal_document(&catalog(), &doc, &registry).unwrap_err();
    assert!(matches!(err, SealError::MissingMetadata));
}

#[test]
fn missing_document_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let registry = Registry::new(dir.path().join("sealed.jsonl"));

    let err = seal_document(&catalog(), dir.path().join("absent.md"), &registry).unwrap_err();
    assert!(matches!(err, SealError::DocumentNotFound(_)));
}

#[test]
fn all_missing_fields_are_reported_together() {
    let dir = tempfile::tempdir().unwrap();
    let doc = write_doc(&dir, "partial.md", "---\nid: e1\nphi: 1.0\n---\n\nbody\n");
    let registry = Registry::new(dir.path().join("sealed.jsonl"));

    let err = seal_document(&catalog(), &doc, &registry).unwrap_err();
    match err {
        SealError::MissingFields(missing) => {
            assert_eq!(
                missing,
                vec![
                    "session_id".to_string(),
                    "field_id".to_string(),
                    "dimension_names".to_string(),
                    "hash10".to_string(),
                ]
            );
        }
        other => panic!("expected MissingFields, got {other}"),
    }
    assert_eq!(registry.load().unwrap(), Vec::new());
}

#[test]
fn stored_phi_within_tolerance_still_seals() {
    let dir = tempfile::tempdir().unwrap();
    let doc = write_doc(&dir, "fruit.md", "body\n");
    let registry = Registry::new(dir.path().join("sealed.jsonl"));
    let catalog = catalog();

    stamp_document(&catalog, &doc, &request("e4")).unwrap();

    // Nudge the stored phi by less than the tolerance.
    let text = fs::read_to_string(&doc).unwrap();
    fs::write(&doc, text.replace("phi: 0.5", "phi: 0.50005")).unwrap();

    let record = seal_document(&catalog, &doc, &registry).unwrap();
    assert_eq!(record.phi, 0.50005);
}
