//! mmpose Frame Directories
//!
//! One JSON file per frame, frames ordered by file name:
//!
//! ```json
//! {
//!   "image_path": "...",
//!   "persons": [
//!     { "bbox": [[x1, y1, x2, y2]],
//!       "keypoints": [[x, y], ...],
//!       "keypoint_scores": [s, ...] }
//!   ]
//! }
//! ```
//!
//! Per frame the person with the highest mean keypoint score is kept and
//! their keypoints are coerced to exactly 17 points. Frames without a
//! usable person are skipped.

use crate::skeleton::{SkeletonFrame, SkeletonSequence, COORDS, NUM_JOINTS};
use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Loader configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Frame file extension (without the dot)
    pub extension: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            extension: "json".to_string(),
        }
    }
}

/// Detections in one frame file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FrameDetections {
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub persons: Vec<PersonDetection>,
}

/// Treat an explicit `null` list the same as a missing one
fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// One detected person
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonDetection {
    /// Keypoints as [x, y]; null or missing coordinates become NaN
    #[serde(default, deserialize_with = "null_as_empty")]
    pub keypoints: Vec<Vec<Option<f64>>>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub keypoint_scores: Vec<f64>,
}

impl PersonDetection {
    /// Mean keypoint confidence, 0.0 when no scores are present
    pub fn mean_score(&self) -> f64 {
        if self.keypoint_scores.is_empty() {
            return 0.0;
        }
        self.keypoint_scores.iter().sum::<f64>() / self.keypoint_scores.len() as f64
    }

    /// Coerce keypoints to a 17-joint frame.
    ///
    /// Extra points are dropped and a short list is padded by repeating its
    /// last point. Returns None when there are no keypoints at all.
    pub fn to_frame(&self) -> Option<SkeletonFrame> {
        let last = self.keypoints.last()?;

        let mut frame = [[f64::NAN; COORDS]; NUM_JOINTS];
        for (j, point) in frame.iter_mut().enumerate() {
            let source = self.keypoints.get(j).unwrap_or(last);
            for (c, value) in point.iter_mut().enumerate() {
                *value = source.get(c).copied().flatten().unwrap_or(f64::NAN);
            }
        }
        Some(frame)
    }
}

impl FrameDetections {
    /// Person with the highest mean keypoint score; the first one wins ties.
    /// Persons without keypoints are never selected.
    pub fn best_person(&self) -> Option<&PersonDetection> {
        let mut best: Option<(&PersonDetection, f64)> = None;
        for person in self.persons.iter().filter(|p| !p.keypoints.is_empty()) {
            let score = person.mean_score();
            let is_better = match best {
                None => true,
                Some((_, best_score)) => score > best_score,
            };
            if is_better {
                best = Some((person, score));
            }
        }
        best.map(|(p, _)| p)
    }
}

/// Parse a single frame file
pub fn load_frame_file(path: &Path) -> Result<FrameDetections> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| Error::Loader(format!("Parse error in {}: {}", path.display(), e)))
}

/// Frame files in a directory, sorted by file name
pub(crate) fn frame_files(dir: &Path, config: &LoaderConfig) -> Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .filter(|p| {
            p.extension()
                .map(|ext| ext == config.extension.as_str())
                .unwrap_or(false)
        })
        .collect();

    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

/// Load a (T, 17, 2) sequence from a directory of frame files
pub fn load_sequence_from_dir(dir: &Path, config: &LoaderConfig) -> Result<SkeletonSequence> {
    let paths = frame_files(dir, config)?;
    if paths.is_empty() {
        return Err(Error::NoInputFiles(dir.to_path_buf()));
    }

    let mut frames = Vec::with_capacity(paths.len());
    let mut skipped = 0usize;

    for path in &paths {
        let detections = load_frame_file(path)?;
        match detections.best_person().and_then(|p| p.to_frame()) {
            Some(frame) => frames.push(frame),
            None => {
                debug!(path = %path.display(), "No usable person in frame, skipping");
                skipped += 1;
            }
        }
    }

    if frames.is_empty() {
        return Err(Error::NoValidDetections(dir.to_path_buf()));
    }
    if skipped > 0 {
        warn!(dir = %dir.display(), skipped, "Skipped frames without detections");
    }

    info!(dir = %dir.display(), frames = frames.len(), "Loaded keypoint sequence");
    SkeletonSequence::from_frames(frames)
}
