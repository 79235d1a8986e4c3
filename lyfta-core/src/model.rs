//! Data model for workouts and templates.
//!
//! Field names are pinned with serde renames so payloads round-trip
//! losslessly against the backend (`restTime`, `isExpanded`, `isCompleted`,
//! `saveAsTemplate`, `previousData`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Rest seconds assigned to a freshly added exercise.
pub const DEFAULT_REST_TIME: u32 = 90;

/// Weight placed on the first set of a freshly added exercise.
pub const DEFAULT_SET_WEIGHT: f64 = 1.0;

/// One weight x reps unit within an exercise.
///
/// `id` is assigned sequentially at creation and stays stable when earlier
/// sets are removed; it is never a recomputed array index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSet {
    pub id: u64,
    pub weight: f64,
    pub reps: u32,
    #[serde(rename = "isCompleted")]
    pub is_completed: bool,
}

impl ExerciseSet {
    pub fn new(id: u64, weight: f64, reps: u32) -> Self {
        Self {
            id,
            weight,
            reps,
            is_completed: false,
        }
    }
}

/// Read-only snapshot of a prior session's sets for the same exercise,
/// supplied by the backend for display next to the current ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviousData {
    pub date: String,
    pub sets: Vec<PreviousSet>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviousSet {
    pub weight: f64,
    pub reps: u32,
}

/// One movement within a workout, with its own ordered sets and rest time.
///
/// Invariant: `sets` is never empty while the exercise exists. The engine
/// rejects removal of the last set and heals empty payloads on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: u64,
    pub name: String,
    #[serde(rename = "restTime")]
    pub rest_time: u32,
    #[serde(rename = "isExpanded")]
    pub is_expanded: bool,
    pub sets: Vec<ExerciseSet>,
    #[serde(rename = "previousData", default)]
    pub previous_data: Option<PreviousData>,
}

impl Exercise {
    /// New exercise carrying exactly one default set, as the builder
    /// creates it from the library.
    pub fn from_library(id: u64, name: String) -> Self {
        Self {
            id,
            name,
            rest_time: DEFAULT_REST_TIME,
            is_expanded: true,
            sets: vec![ExerciseSet::new(0, DEFAULT_SET_WEIGHT, 0)],
            previous_data: None,
        }
    }

    pub fn set(&self, set_id: u64) -> Option<&ExerciseSet> {
        self.sets.iter().find(|s| s.id == set_id)
    }

    pub fn set_mut(&mut self, set_id: u64) -> Option<&mut ExerciseSet> {
        self.sets.iter_mut().find(|s| s.id == set_id)
    }

    /// Next stable set id: one past the current maximum, 0 when empty.
    pub fn next_set_id(&self) -> u64 {
        self.sets.iter().map(|s| s.id).max().map_or(0, |m| m + 1)
    }
}

/// The live, in-progress editable representation of one workout.
///
/// Owned by exactly one [`crate::builder::WorkoutBuilder`] for the duration
/// of an editing session and mutated only through dispatched actions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkoutState {
    pub name: String,
    pub description: String,
    #[serde(rename = "saveAsTemplate")]
    pub save_as_template: bool,
    pub timer: u64,
    pub exercises: Vec<Exercise>,
}

impl WorkoutState {
    pub fn exercise(&self, exercise_id: u64) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == exercise_id)
    }

    pub fn exercise_mut(&mut self, exercise_id: u64) -> Option<&mut Exercise> {
        self.exercises.iter_mut().find(|e| e.id == exercise_id)
    }
}

/// The persisted, addressable form of a [`WorkoutState`].
///
/// A workout becomes a template the moment it is saved; locally created
/// templates carry a v4 UUID until the server assigns its own id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub user_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub is_template: bool,
    #[serde(flatten)]
    pub workout: WorkoutState,
}

impl Template {
    /// Snapshot the current builder state into a locally addressable
    /// template with a freshly minted id.
    pub fn from_workout(workout: WorkoutState) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: None,
            created_at: Some(Utc::now()),
            updated_at: None,
            is_template: workout.save_as_template,
            workout,
        }
    }

    /// Key under which the template lives in the local store. Names key
    /// the store because pre-sync templates have no server id yet.
    pub fn key(&self) -> &str {
        &self.workout.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_template() -> Template {
        let workout = WorkoutState {
            name: "Push Day".into(),
            description: "Chest and triceps".into(),
            save_as_template: true,
            timer: 1800,
            exercises: vec![Exercise {
                id: 1,
                name: "Bench Press".into(),
                rest_time: 120,
                is_expanded: false,
                sets: vec![ExerciseSet::new(0, 60.0, 10)],
                previous_data: Some(PreviousData {
                    date: "2026-08-21".into(),
                    sets: vec![PreviousSet {
                        weight: 57.5,
                        reps: 10,
                    }],
                }),
            }],
        };
        Template::from_workout(workout)
    }

    #[test]
    fn wire_names_match_backend() {
        let json = serde_json::to_value(sample_template()).unwrap();

        assert!(json.get("saveAsTemplate").is_some());
        assert!(json.get("is_template").is_some());
        assert!(json.get("user_id").is_some());

        let exercise = &json["exercises"][0];
        assert!(exercise.get("restTime").is_some());
        assert!(exercise.get("isExpanded").is_some());
        assert!(exercise.get("previousData").is_some());
        assert!(exercise["sets"][0].get("isCompleted").is_some());
    }

    #[test]
    fn template_round_trips() {
        let template = sample_template();
        let json = serde_json::to_string(&template).unwrap();
        let back: Template = serde_json::from_str(&json).unwrap();
        assert_eq!(back, template);
    }

    #[test]
    fn from_workout_mints_unique_ids() {
        let a = Template::from_workout(WorkoutState::default());
        let b = Template::from_workout(WorkoutState::default());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn next_set_id_skips_past_gaps() {
        let mut exercise = Exercise::from_library(1, "Squat".into());
        exercise.sets.push(ExerciseSet::new(4, 100.0, 5));
        assert_eq!(exercise.next_set_id(), 5);
    }
}
