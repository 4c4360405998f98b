//! Labeled example trees.
//!
//! ```text
//! <root>/
//!   run/
//!     clip_a/frame_000.json ...
//!     clip_b/frame_000.json ...
//!   walk/
//!     frame_000.json ...        <- frames directly under a label: one clip
//!   idle/                       <- no clips: label kept with no examples
//! ```

use super::mmpose::{frame_files, load_sequence_from_dir, LoaderConfig};
use crate::prototype::LabeledExamples;
use crate::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

fn sorted_subdirs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(dirs)
}

/// Load every clip under a labeled example tree
pub fn load_labeled_examples(root: &Path, config: &LoaderConfig) -> Result<LabeledExamples> {
    let mut examples = LabeledExamples::new();

    for label_dir in sorted_subdirs(root)? {
        let Some(label) = label_dir.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            continue;
        };

        let clip_dirs = sorted_subdirs(&label_dir)?;
        let mut clips = Vec::with_capacity(clip_dirs.len());

        if clip_dirs.is_empty() {
            if !frame_files(&label_dir, config)?.is_empty() {
                clips.push(load_sequence_from_dir(&label_dir, config)?);
            }
        } else {
            for clip_dir in &clip_dirs {
                clips.push(load_sequence_from_dir(clip_dir, config)?);
            }
        }

        debug!(label = %label, clips = clips.len(), "Loaded labeled examples");
        examples.insert(label, clips);
    }

    info!(root = %root.display(), labels = examples.len(), "Loaded example tree");
    Ok(examples)
}
