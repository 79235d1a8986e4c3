use crate::model::Template;

/// Direction for reordering an exercise within the workout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// Numeric field of a set addressed by [`Action::UpdateSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetField {
    Weight,
    Reps,
}

/// Every mutation of the builder state, one variant per operation.
///
/// Dispatched through [`super::WorkoutBuilder::dispatch`]; payload shapes
/// mirror what the UI layer sends.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetName(String),
    SetDescription(String),
    SetSaveAsTemplate(bool),
    /// The clock is owned by the caller; the engine only records the value.
    SetTimer(u64),
    AddExerciseFromLibrary {
        name: String,
    },
    RemoveExercise {
        exercise_id: u64,
    },
    MoveExercise {
        exercise_id: u64,
        direction: MoveDirection,
    },
    DuplicateExercise {
        exercise_id: u64,
    },
    ToggleExerciseExpanded {
        exercise_id: u64,
    },
    UpdateExerciseName {
        exercise_id: u64,
        name: String,
    },
    UpdateRestTime {
        exercise_id: u64,
        seconds: i64,
    },
    AddSet {
        exercise_id: u64,
    },
    RemoveSet {
        exercise_id: u64,
        set_id: u64,
    },
    UpdateSet {
        exercise_id: u64,
        set_id: u64,
        field: SetField,
        value: f64,
    },
    ToggleSetCompletion {
        exercise_id: u64,
        set_id: u64,
    },
    /// Replace the whole state with a fetched template or session.
    LoadWorkout(Box<Template>),
}
