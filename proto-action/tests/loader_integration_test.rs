//! Loader Integration Tests
//!
//! Keypoint JSON directories on disk -> sequences -> prototype bank -> label.

use proto_action::loader::{load_labeled_examples, load_sequence_from_dir, LoaderConfig};
use proto_action::synthetic::{demo_examples, make_sequence, DemoConfig, MotionKind};
use proto_action::{ActionClassifier, Error, PrototypeBuilder, SkeletonSequence};
use serde_json::json;
use std::path::Path;
use tempfile::TempDir;

// ============================================================================
// Helper Functions
// ============================================================================

/// Write one frame file per frame; a low-confidence distractor sits beside the subject
fn write_sequence(dir: &Path, seq: &SkeletonSequence) {
    std::fs::create_dir_all(dir).expect("Failed to create clip dir");
    for (t, frame) in seq.frames().iter().enumerate() {
        let body = json!({
            "image_path": format!("frames/{:04}.jpg", t),
            "persons": [
                {
                    "bbox": [[0.0, 0.0, 5.0, 5.0]],
                    "keypoints": [[9.0, 9.0], [9.5, 9.5]],
                    "keypoint_scores": [0.1, 0.2],
                },
                {
                    "bbox": [[0.0, 0.0, 100.0, 200.0]],
                    "keypoints": frame.to_vec(),
                    "keypoint_scores": vec![0.95; 17],
                },
            ]
        });
        std::fs::write(dir.join(format!("{:04}.json", t)), body.to_string())
            .expect("Failed to write frame");
    }
}

fn synthetic(kind: MotionKind) -> SkeletonSequence {
    make_sequence(16, kind, &DemoConfig::default()).unwrap()
}

// ============================================================================
// Sequence Loading
// ============================================================================

#[test]
fn test_sequence_survives_disk_roundtrip() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let original = synthetic(MotionKind::Walk);
    write_sequence(temp_dir.path(), &original);

    let loaded = load_sequence_from_dir(temp_dir.path(), &LoaderConfig::default()).unwrap();
    assert_eq!(loaded.shape(), [16, 17, 2]);

    for (a, b) in original.frames().iter().zip(loaded.frames()) {
        for (p, q) in a.iter().zip(b.iter()) {
            assert!((p[0] - q[0]).abs() < 1e-12);
            assert!((p[1] - q[1]).abs() < 1e-12);
        }
    }
}

#[test]
fn test_frames_without_persons_are_skipped() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_sequence(temp_dir.path(), &synthetic(MotionKind::Run));
    std::fs::write(temp_dir.path().join("0100.json"), r#"{"persons": []}"#).unwrap();
    std::fs::write(temp_dir.path().join("0101.json"), r#"{"image_path": "x.jpg"}"#).unwrap();
    std::fs::write(temp_dir.path().join("notes.txt"), "not a frame").unwrap();

    let loaded = load_sequence_from_dir(temp_dir.path(), &LoaderConfig::default()).unwrap();
    assert_eq!(loaded.len(), 16);
}

#[test]
fn test_missing_and_empty_directories() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = LoaderConfig::default();

    let result = load_sequence_from_dir(temp_dir.path(), &config);
    assert!(matches!(result, Err(Error::NoInputFiles(_))));

    std::fs::write(temp_dir.path().join("0000.json"), r#"{"persons": []}"#).unwrap();
    let result = load_sequence_from_dir(temp_dir.path(), &config);
    assert!(matches!(result, Err(Error::NoValidDetections(_))));

    let result = load_sequence_from_dir(&temp_dir.path().join("absent"), &config);
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_custom_extension() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_sequence(temp_dir.path(), &synthetic(MotionKind::Idle));

    let config = LoaderConfig {
        extension: "keypoints".to_string(),
    };
    let result = load_sequence_from_dir(temp_dir.path(), &config);
    assert!(matches!(result, Err(Error::NoInputFiles(_))));
}

// ============================================================================
// Example Trees
// ============================================================================

#[test]
fn test_classify_against_example_tree() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path().join("examples");

    write_sequence(&root.join("run").join("clip_a"), &synthetic(MotionKind::Run));
    write_sequence(&root.join("run").join("clip_b"), &synthetic(MotionKind::Jitter));
    write_sequence(&root.join("walk"), &synthetic(MotionKind::Walk));
    write_sequence(&root.join("idle").join("clip_a"), &synthetic(MotionKind::Idle));
    std::fs::create_dir_all(root.join("jump")).unwrap();

    let config = LoaderConfig::default();
    let examples = load_labeled_examples(&root, &config).unwrap();
    let labels: Vec<&str> = examples.keys().map(|k| k.as_str()).collect();
    assert_eq!(labels, vec!["idle", "jump", "run", "walk"]);
    assert_eq!(examples["run"].len(), 2);
    assert_eq!(examples["walk"].len(), 1);
    assert!(examples["jump"].is_empty());

    let bank = PrototypeBuilder::new().build(&examples);
    assert_eq!(bank.len(), 4);
    assert_eq!(bank.prototype_count(), 4);

    let query_dir = temp_dir.path().join("input_json");
    write_sequence(&query_dir, &synthetic(MotionKind::Run));
    let query = load_sequence_from_dir(&query_dir, &config).unwrap();

    let result = ActionClassifier::new().classify(&query, &bank).unwrap();
    assert_eq!(result.label, "run");
    assert!((result.score("run").unwrap() - 1.0).abs() < 1e-9);
    assert_eq!(result.score("jump"), Some(0.0));
}

#[test]
fn test_loaded_bank_matches_synthetic_bank() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let demo = demo_examples(&DemoConfig::default()).unwrap();

    for (label, clips) in &demo {
        for (i, clip) in clips.iter().enumerate() {
            write_sequence(&temp_dir.path().join(label).join(format!("clip_{}", i)), clip);
        }
    }

    let builder = PrototypeBuilder::new();
    let from_disk = builder.build(&load_labeled_examples(temp_dir.path(), &LoaderConfig::default()).unwrap());
    let in_memory = builder.build(&demo);

    assert_eq!(from_disk.labels().collect::<Vec<_>>(), in_memory.labels().collect::<Vec<_>>());
    for (label, prototypes) in in_memory.iter() {
        let loaded = from_disk.get(label).unwrap();
        assert_eq!(loaded.len(), prototypes.len());
        for (a, b) in loaded.iter().zip(prototypes) {
            for (x, y) in a.as_slice().iter().zip(b.as_slice()) {
                assert!((x - y).abs() < 1e-9);
            }
        }
    }
}

#[test]
fn test_broken_frame_file_is_reported() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_sequence(temp_dir.path(), &synthetic(MotionKind::Run));
    std::fs::write(temp_dir.path().join("0005.json"), "{ not json").unwrap();

    let result = load_sequence_from_dir(temp_dir.path(), &LoaderConfig::default());
    match result {
        Err(Error::Loader(msg)) => assert!(msg.contains("0005.json")),
        other => panic!("Expected loader error, got {:?}", other),
    }
}
