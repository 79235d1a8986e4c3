use crate::builder::{Action, MoveDirection, SetField};
use crate::model::{DEFAULT_SET_WEIGHT, Exercise, ExerciseSet, Template, WorkoutState};

/// In-memory state machine for one workout-in-progress.
///
/// Exercise ids come from a counter scoped to the builder rather than from
/// max-over-current-exercises, so removing the highest-id exercise can
/// never cause a later id collision within the session.
#[derive(Debug, Clone, Default)]
pub struct WorkoutBuilder {
    state: WorkoutState,
    next_exercise_id: u64,
}

impl WorkoutBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hydrate a builder from a fetched template, applying the same
    /// normalization as [`Action::LoadWorkout`].
    pub fn from_template(template: Template) -> Self {
        let mut builder = Self::new();
        builder.dispatch(Action::LoadWorkout(Box::new(template)));
        builder
    }

    pub fn state(&self) -> &WorkoutState {
        &self.state
    }

    pub fn into_state(self) -> WorkoutState {
        self.state
    }

    /// Apply one action. Total over all states: unknown ids and
    /// invariant-violating requests are no-ops, never errors.
    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::SetName(name) => self.state.name = name,
            Action::SetDescription(description) => self.state.description = description,
            Action::SetSaveAsTemplate(save) => self.state.save_as_template = save,
            Action::SetTimer(seconds) => self.state.timer = seconds,
            Action::AddExerciseFromLibrary { name } => self.add_exercise(name),
            Action::RemoveExercise { exercise_id } => {
                self.state.exercises.retain(|e| e.id != exercise_id);
            }
            Action::MoveExercise {
                exercise_id,
                direction,
            } => self.move_exercise(exercise_id, direction),
            Action::DuplicateExercise { exercise_id } => self.duplicate_exercise(exercise_id),
            Action::ToggleExerciseExpanded { exercise_id } => {
                if let Some(exercise) = self.state.exercise_mut(exercise_id) {
                    exercise.is_expanded = !exercise.is_expanded;
                }
            }
            Action::UpdateExerciseName { exercise_id, name } => {
                if let Some(exercise) = self.state.exercise_mut(exercise_id) {
                    exercise.name = name;
                }
            }
            Action::UpdateRestTime {
                exercise_id,
                seconds,
            } => {
                if let Some(exercise) = self.state.exercise_mut(exercise_id) {
                    exercise.rest_time = seconds.max(0) as u32;
                }
            }
            Action::AddSet { exercise_id } => self.add_set(exercise_id),
            Action::RemoveSet {
                exercise_id,
                set_id,
            } => self.remove_set(exercise_id, set_id),
            Action::UpdateSet {
                exercise_id,
                set_id,
                field,
                value,
            } => self.update_set(exercise_id, set_id, field, value),
            Action::ToggleSetCompletion {
                exercise_id,
                set_id,
            } => {
                if let Some(set) = self
                    .state
                    .exercise_mut(exercise_id)
                    .and_then(|e| e.set_mut(set_id))
                {
                    set.is_completed = !set.is_completed;
                }
            }
            Action::LoadWorkout(template) => self.load_workout(*template),
        }
    }

    fn mint_exercise_id(&mut self) -> u64 {
        let id = self.next_exercise_id;
        self.next_exercise_id += 1;
        id
    }

    fn add_exercise(&mut self, name: String) {
        if name.is_empty() {
            return;
        }
        let id = self.mint_exercise_id();
        self.state.exercises.push(Exercise::from_library(id, name));
    }

    fn move_exercise(&mut self, exercise_id: u64, direction: MoveDirection) {
        let Some(index) = self.state.exercises.iter().position(|e| e.id == exercise_id) else {
            return;
        };
        match direction {
            MoveDirection::Up if index > 0 => self.state.exercises.swap(index - 1, index),
            MoveDirection::Down if index + 1 < self.state.exercises.len() => {
                self.state.exercises.swap(index, index + 1);
            }
            _ => {}
        }
    }

    fn duplicate_exercise(&mut self, exercise_id: u64) {
        let Some(index) = self.state.exercises.iter().position(|e| e.id == exercise_id) else {
            return;
        };
        let mut copy = self.state.exercises[index].clone();
        copy.id = self.mint_exercise_id();
        for (new_id, set) in copy.sets.iter_mut().enumerate() {
            set.id = new_id as u64;
            set.is_completed = false;
        }
        self.state.exercises.insert(index + 1, copy);
    }

    fn add_set(&mut self, exercise_id: u64) {
        let Some(exercise) = self.state.exercise_mut(exercise_id) else {
            return;
        };
        let id = exercise.next_set_id();
        // Convenience default: carry the previous set's numbers forward.
        let (weight, reps) = exercise
            .sets
            .last()
            .map_or((DEFAULT_SET_WEIGHT, 0), |s| (s.weight, s.reps));
        exercise.sets.push(ExerciseSet::new(id, weight, reps));
    }

    fn remove_set(&mut self, exercise_id: u64, set_id: u64) {
        let Some(exercise) = self.state.exercise_mut(exercise_id) else {
            return;
        };
        // Set floor: an exercise keeps at least one set while it exists.
        if exercise.sets.len() <= 1 {
            return;
        }
        exercise.sets.retain(|s| s.id != set_id);
    }

    fn update_set(&mut self, exercise_id: u64, set_id: u64, field: SetField, value: f64) {
        let Some(set) = self
            .state
            .exercise_mut(exercise_id)
            .and_then(|e| e.set_mut(set_id))
        else {
            return;
        };
        let value = value.max(0.0);
        match field {
            SetField::Weight => set.weight = value,
            SetField::Reps => set.reps = value as u32,
        }
    }

    fn load_workout(&mut self, template: Template) {
        let mut state = template.workout;
        // Loaded sessions are edited fresh, not re-saved as templates.
        state.save_as_template = false;
        for exercise in &mut state.exercises {
            if exercise.sets.is_empty() {
                exercise.sets.push(ExerciseSet::new(0, DEFAULT_SET_WEIGHT, 0));
            }
        }
        self.next_exercise_id = state
            .exercises
            .iter()
            .map(|e| e.id)
            .max()
            .map_or(0, |m| m + 1);
        self.state = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder_with(names: &[&str]) -> WorkoutBuilder {
        let mut builder = WorkoutBuilder::new();
        for name in names {
            builder.dispatch(Action::AddExerciseFromLibrary {
                name: (*name).to_string(),
            });
        }
        builder
    }

    #[test]
    fn add_exercise_from_library_defaults() {
        let builder = builder_with(&["Bench Press"]);
        let state = builder.state();

        assert_eq!(state.exercises.len(), 1);
        let exercise = &state.exercises[0];
        assert_eq!(exercise.name, "Bench Press");
        assert_eq!(exercise.rest_time, 90);
        assert!(exercise.is_expanded);
        assert_eq!(exercise.sets.len(), 1);
        let set = &exercise.sets[0];
        assert_eq!((set.id, set.weight, set.reps, set.is_completed), (0, 1.0, 0, false));
    }

    #[test]
    fn empty_exercise_name_is_rejected() {
        let mut builder = WorkoutBuilder::new();
        builder.dispatch(Action::AddExerciseFromLibrary {
            name: String::new(),
        });
        assert!(builder.state().exercises.is_empty());
    }

    #[test]
    fn unknown_ids_are_noops() {
        let builder = builder_with(&["Squat"]);
        let before = builder.state().clone();

        let actions = [
            Action::RemoveExercise { exercise_id: 99 },
            Action::ToggleExerciseExpanded { exercise_id: 99 },
            Action::UpdateExerciseName {
                exercise_id: 99,
                name: "x".into(),
            },
            Action::UpdateRestTime {
                exercise_id: 99,
                seconds: 60,
            },
            Action::AddSet { exercise_id: 99 },
            Action::RemoveSet {
                exercise_id: 0,
                set_id: 99,
            },
            Action::UpdateSet {
                exercise_id: 0,
                set_id: 99,
                field: SetField::Weight,
                value: 100.0,
            },
            Action::ToggleSetCompletion {
                exercise_id: 0,
                set_id: 99,
            },
            Action::DuplicateExercise { exercise_id: 99 },
            Action::MoveExercise {
                exercise_id: 99,
                direction: MoveDirection::Down,
            },
        ];
        for action in actions {
            let mut builder = builder.clone();
            builder.dispatch(action.clone());
            assert_eq!(builder.state(), &before, "expected no-op for {action:?}");
        }
    }

    #[test]
    fn removing_the_last_set_is_rejected() {
        let mut builder = builder_with(&["Deadlift"]);
        let before = builder.state().clone();

        builder.dispatch(Action::RemoveSet {
            exercise_id: 0,
            set_id: 0,
        });
        assert_eq!(builder.state(), &before);
    }

    #[test]
    fn add_set_copies_previous_and_extends_ids() {
        let mut builder = builder_with(&["Row"]);
        builder.dispatch(Action::UpdateSet {
            exercise_id: 0,
            set_id: 0,
            field: SetField::Weight,
            value: 60.0,
        });
        builder.dispatch(Action::UpdateSet {
            exercise_id: 0,
            set_id: 0,
            field: SetField::Reps,
            value: 10.0,
        });
        builder.dispatch(Action::AddSet { exercise_id: 0 });
        builder.dispatch(Action::UpdateSet {
            exercise_id: 0,
            set_id: 1,
            field: SetField::Weight,
            value: 65.0,
        });
        builder.dispatch(Action::UpdateSet {
            exercise_id: 0,
            set_id: 1,
            field: SetField::Reps,
            value: 8.0,
        });
        builder.dispatch(Action::AddSet { exercise_id: 0 });

        let sets = &builder.state().exercises[0].sets;
        assert_eq!(sets.len(), 3);
        assert_eq!(sets[2].id, 2);
        assert_eq!(sets[2].weight, 65.0);
        assert_eq!(sets[2].reps, 8);
        assert!(!sets[2].is_completed);
    }

    #[test]
    fn add_then_remove_set_restores_sequence() {
        let mut builder = builder_with(&["Press"]);
        builder.dispatch(Action::AddSet { exercise_id: 0 });
        let before = builder.state().clone();

        builder.dispatch(Action::AddSet { exercise_id: 0 });
        let new_id = builder.state().exercises[0].sets.last().unwrap().id;
        builder.dispatch(Action::RemoveSet {
            exercise_id: 0,
            set_id: new_id,
        });

        assert_eq!(builder.state(), &before);
    }

    #[test]
    fn boundary_moves_are_noops() {
        let mut builder = builder_with(&["A", "B", "C"]);
        let before = builder.state().clone();

        builder.dispatch(Action::MoveExercise {
            exercise_id: 0,
            direction: MoveDirection::Up,
        });
        builder.dispatch(Action::MoveExercise {
            exercise_id: 2,
            direction: MoveDirection::Down,
        });
        assert_eq!(builder.state(), &before);
    }

    #[test]
    fn move_swaps_neighbors_and_preserves_the_rest() {
        let mut builder = builder_with(&["A", "B", "C"]);
        builder.dispatch(Action::MoveExercise {
            exercise_id: 2,
            direction: MoveDirection::Up,
        });
        let names: Vec<_> = builder
            .state()
            .exercises
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, ["A", "C", "B"]);
    }

    #[test]
    fn duplicate_is_independent_of_the_original() {
        let mut builder = builder_with(&["Curl"]);
        builder.dispatch(Action::ToggleSetCompletion {
            exercise_id: 0,
            set_id: 0,
        });
        builder.dispatch(Action::DuplicateExercise { exercise_id: 0 });

        let copy_id = builder.state().exercises[1].id;
        assert_ne!(copy_id, 0);
        // Completion flags reset on the copy.
        assert!(builder.state().exercises[0].sets[0].is_completed);
        assert!(!builder.state().exercises[1].sets[0].is_completed);

        builder.dispatch(Action::UpdateSet {
            exercise_id: copy_id,
            set_id: 0,
            field: SetField::Weight,
            value: 80.0,
        });
        assert_eq!(builder.state().exercises[0].sets[0].weight, 1.0);
        assert_eq!(builder.state().exercises[1].sets[0].weight, 80.0);
    }

    #[test]
    fn exercise_ids_never_collide_after_removal() {
        let mut builder = builder_with(&["A", "B"]);
        builder.dispatch(Action::RemoveExercise { exercise_id: 1 });
        builder.dispatch(Action::AddExerciseFromLibrary { name: "C".into() });

        let ids: Vec<_> = builder.state().exercises.iter().map(|e| e.id).collect();
        assert_eq!(ids, [0, 2]);
    }

    #[test]
    fn negative_values_clamp_to_zero() {
        let mut builder = builder_with(&["Fly"]);
        builder.dispatch(Action::UpdateSet {
            exercise_id: 0,
            set_id: 0,
            field: SetField::Weight,
            value: -5.0,
        });
        builder.dispatch(Action::UpdateRestTime {
            exercise_id: 0,
            seconds: -30,
        });

        let exercise = &builder.state().exercises[0];
        assert_eq!(exercise.sets[0].weight, 0.0);
        assert_eq!(exercise.rest_time, 0);
    }

    #[test]
    fn load_workout_normalizes_the_payload() {
        let mut template = Template::from_workout(WorkoutState {
            name: "Leg Day".into(),
            save_as_template: true,
            ..WorkoutState::default()
        });
        template.workout.exercises.push(Exercise {
            id: 7,
            name: "Lunge".into(),
            rest_time: 60,
            is_expanded: false,
            sets: Vec::new(),
            previous_data: None,
        });

        let mut builder = WorkoutBuilder::from_template(template);
        let state = builder.state();
        assert!(!state.save_as_template);
        assert_eq!(state.exercises[0].sets.len(), 1);

        // Counter resumes past the loaded ids.
        builder.dispatch(Action::AddExerciseFromLibrary {
            name: "Calf Raise".into(),
        });
        assert_eq!(builder.state().exercises[1].id, 8);
    }

    #[test]
    fn timer_is_replaced_wholesale() {
        let mut builder = WorkoutBuilder::new();
        builder.dispatch(Action::SetTimer(12));
        builder.dispatch(Action::SetTimer(13));
        assert_eq!(builder.state().timer, 13);
    }
}
