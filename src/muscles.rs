//! Exercise to muscle-group lookup
//!
//! The table is loaded once by the host and handed to the statistics
//! aggregator by reference. Names are matched case-insensitively.

use crate::error::{InputError, LiftError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Group assigned to exercises missing from the table
pub const OTHER_GROUP: &str = "Other";

/// Built-in catalogue of common lifts and their primary muscle groups
const BUILTIN_ENTRIES: &[(&str, &[&str])] = &[
    ("bench press", &["Chest", "Triceps", "Shoulders"]),
    ("incline bench press", &["Chest", "Shoulders", "Triceps"]),
    ("dumbbell bench press", &["Chest", "Triceps", "Shoulders"]),
    ("incline dumbbell press", &["Chest", "Shoulders"]),
    ("chest fly", &["Chest"]),
    ("push up", &["Chest", "Triceps"]),
    ("dip", &["Chest", "Triceps"]),
    ("squat", &["Quads", "Glutes"]),
    ("front squat", &["Quads", "Glutes"]),
    ("leg press", &["Quads", "Glutes"]),
    ("lunge", &["Quads", "Glutes"]),
    ("bulgarian split squat", &["Quads", "Glutes"]),
    ("leg extension", &["Quads"]),
    ("deadlift", &["Back", "Hamstrings", "Glutes"]),
    ("romanian deadlift", &["Hamstrings", "Glutes"]),
    ("leg curl", &["Hamstrings"]),
    ("hip thrust", &["Glutes"]),
    ("calf raise", &["Calves"]),
    ("overhead press", &["Shoulders", "Triceps"]),
    ("dumbbell shoulder press", &["Shoulders", "Triceps"]),
    ("lateral raise", &["Shoulders"]),
    ("face pull", &["Shoulders", "Back"]),
    ("barbell row", &["Back", "Biceps"]),
    ("dumbbell row", &["Back", "Biceps"]),
    ("seated cable row", &["Back", "Biceps"]),
    ("lat pulldown", &["Back", "Biceps"]),
    ("pull up", &["Back", "Biceps"]),
    ("chin up", &["Back", "Biceps"]),
    ("barbell curl", &["Biceps"]),
    ("dumbbell curl", &["Biceps"]),
    ("hammer curl", &["Biceps", "Forearms"]),
    ("tricep pushdown", &["Triceps"]),
    ("skull crusher", &["Triceps"]),
    ("plank", &["Core"]),
    ("hanging leg raise", &["Core"]),
    ("cable crunch", &["Core"]),
];

/// Lookup from lowercased exercise name to its primary muscle groups
#[derive(Debug, Clone)]
pub struct ExerciseMuscleMap {
    entries: HashMap<String, Vec<String>>,
    fallback: Vec<String>,
}

impl ExerciseMuscleMap {
    /// Create an empty map; every exercise resolves to "Other"
    pub fn new() -> Self {
        ExerciseMuscleMap {
            entries: HashMap::new(),
            fallback: vec![OTHER_GROUP.to_string()],
        }
    }

    /// Build a map from (exercise name, muscle groups) pairs
    pub fn from_entries<I, N, G>(entries: I) -> Self
    where
        I: IntoIterator<Item = (N, G)>,
        N: AsRef<str>,
        G: IntoIterator,
        G::Item: Into<String>,
    {
        let mut map = Self::new();
        for (name, groups) in entries {
            map.insert(name.as_ref(), groups.into_iter().map(Into::into).collect());
        }
        map
    }

    /// The catalogue shipped with the crate
    pub fn builtin() -> Self {
        Self::from_entries(
            BUILTIN_ENTRIES
                .iter()
                .map(|(name, groups)| (*name, groups.iter().copied())),
        )
    }

    /// Parse a JSON object of `{ "exercise name": ["Group", ...] }`
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: HashMap<String, Vec<String>> = serde_json::from_str(json)?;
        Ok(Self::from_entries(raw))
    }

    /// Load a JSON muscle map from disk
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(InputError::FileNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }

        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content).map_err(|err| match err {
            LiftError::Json(json_err) => InputError::InvalidContents {
                path: path.to_path_buf(),
                reason: json_err.to_string(),
            }
            .into(),
            other => other,
        })
    }

    /// Add or replace an exercise. Empty group lists are ignored so the
    /// exercise keeps resolving to "Other".
    pub fn insert(&mut self, exercise_name: &str, muscle_groups: Vec<String>) {
        if muscle_groups.is_empty() {
            return;
        }
        self.entries
            .insert(exercise_name.trim().to_lowercase(), muscle_groups);
    }

    /// Muscle groups for an exercise, `["Other"]` when unknown
    pub fn muscle_groups(&self, exercise_name: &str) -> &[String] {
        self.entries
            .get(&exercise_name.trim().to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(self.fallback.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ExerciseMuscleMap {
    fn default() -> Self {
        Self::new()
    }
}
