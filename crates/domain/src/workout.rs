use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use derive_more::Deref;
use uuid::Uuid;

use crate::{
    CreateError, DeleteError, Difficulty, ExerciseID, MuscleGroup, Name, ReadError, UpdateError,
};

/// Assumed time per set when estimating the length of a workout.
pub const SECONDS_PER_SET: u32 = 45;

pub const MAX_SETS: u32 = 20;
pub const MAX_REPS: u32 = 500;
/// Upper bound for the duration of a set and for rests, in seconds.
pub const MAX_SECONDS: u32 = 3600;

#[allow(async_fn_in_trait)]
pub trait WorkoutRepository {
    async fn read_workouts(&self) -> Result<Vec<Workout>, ReadError>;
    async fn create_workout(&self, workout: Workout) -> Result<Workout, CreateError>;
    async fn replace_workout(&self, workout: Workout) -> Result<Workout, UpdateError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait WorkoutService {
    async fn get_workouts(&self) -> Result<Vec<Workout>, ReadError>;
    async fn get_workout(&self, id: WorkoutID) -> Result<Workout, ReadError>;
    async fn save_workout(&self, workout: Workout) -> Result<Workout, CreateError>;
    async fn replace_workout(&self, workout: Workout) -> Result<Workout, UpdateError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: WorkoutID,
    pub name: Name,
    pub description: String,
    pub exercises: Vec<WorkoutExercise>,
    /// Planned length in minutes.
    pub duration: u32,
    pub difficulty: Difficulty,
    pub target_muscle_groups: BTreeSet<MuscleGroup>,
    pub created_at: DateTime<Utc>,
    pub kind: WorkoutKind,
}

impl Workout {
    #[must_use]
    pub fn total_sets(&self) -> u32 {
        self.exercises
            .iter()
            .fold(0_u32, |total, e| total.saturating_add(e.sets))
    }

    #[must_use]
    pub fn total_rest(&self) -> u32 {
        self.exercises.iter().fold(0_u32, |total, e| {
            total.saturating_add(e.sets.saturating_mul(e.rest))
        })
    }

    /// Estimated length in minutes, rounded up.
    #[must_use]
    pub fn estimated_duration(&self) -> u32 {
        self.total_sets()
            .saturating_mul(SECONDS_PER_SET)
            .saturating_add(self.total_rest())
            .div_ceil(60)
    }

    #[must_use]
    pub fn exercises(&self) -> BTreeSet<ExerciseID> {
        self.exercises.iter().map(|e| e.exercise_id).collect()
    }

    /// Checks that the workout can be run as a session.
    pub fn validate(&self) -> Result<(), WorkoutError> {
        if self.exercises.is_empty() {
            return Err(WorkoutError::NoExercises);
        }
        for (idx, exercise) in self.exercises.iter().enumerate() {
            exercise
                .validate()
                .map_err(|err| WorkoutError::InvalidExercise(idx, err))?;
        }
        Ok(())
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutID(Uuid);

impl WorkoutID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for WorkoutID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WorkoutID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkoutKind {
    Preset,
    Generated,
    Custom,
}

/// A line of a workout plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutExercise {
    pub exercise_id: ExerciseID,
    pub sets: u32,
    /// Zero for purely timed exercises.
    pub reps: u32,
    /// Seconds per set for timed exercises.
    pub duration: Option<u32>,
    /// Seconds of rest after each set.
    pub rest: u32,
}

impl WorkoutExercise {
    pub fn new(
        exercise_id: ExerciseID,
        sets: u32,
        reps: u32,
        duration: Option<u32>,
        rest: u32,
    ) -> Result<Self, WorkoutExerciseError> {
        let exercise = Self {
            exercise_id,
            sets,
            reps,
            duration,
            rest,
        };
        exercise.validate()?;
        Ok(exercise)
    }

    pub fn validate(&self) -> Result<(), WorkoutExerciseError> {
        if self.sets == 0 {
            return Err(WorkoutExerciseError::NoSets);
        }
        if self.sets > MAX_SETS {
            return Err(WorkoutExerciseError::TooManySets);
        }
        if self.reps == 0 && self.duration.unwrap_or_default() == 0 {
            return Err(WorkoutExerciseError::NoRepsOrDuration);
        }
        if self.reps > MAX_REPS {
            return Err(WorkoutExerciseError::TooManyReps);
        }
        if self.duration.unwrap_or_default() > MAX_SECONDS || self.rest > MAX_SECONDS {
            return Err(WorkoutExerciseError::TooLong);
        }
        Ok(())
    }

    /// Countdown for a working set, zero if the set is self-paced.
    #[must_use]
    pub fn set_time(&self) -> u32 {
        self.duration.unwrap_or_default()
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkoutExerciseError {
    #[error("At least one set is required")]
    NoSets,
    #[error("Either reps or a duration is required")]
    NoRepsOrDuration,
    #[error("At most 20 sets are allowed")]
    TooManySets,
    #[error("At most 500 reps are allowed")]
    TooManyReps,
    #[error("Set duration and rest must not exceed one hour")]
    TooLong,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkoutError {
    #[error("Workout contains no exercises")]
    NoExercises,
    #[error("Invalid exercise at index {0}: {1}")]
    InvalidExercise(usize, WorkoutExerciseError),
}
