use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use derive_more::{Deref, Display};
use uuid::Uuid;

use crate::{
    CreateError, ExerciseID, Name, ReadError, SessionError, UserID, WorkoutID, WorkoutSession,
};

#[allow(async_fn_in_trait)]
pub trait WorkoutLogRepository {
    async fn read_workout_logs(&self, user_id: UserID) -> Result<Vec<WorkoutLog>, ReadError>;
    async fn create_workout_log(&self, workout_log: WorkoutLog) -> Result<WorkoutLog, CreateError>;
}

#[allow(async_fn_in_trait)]
pub trait WorkoutLogService {
    async fn get_workout_logs(&self, user_id: UserID) -> Result<Vec<WorkoutLog>, ReadError>;
    async fn add_workout_log(&self, workout_log: WorkoutLog) -> Result<WorkoutLog, CreateError>;
}

/// Record of a completed workout session.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutLog {
    pub id: WorkoutLogID,
    pub workout_id: WorkoutID,
    pub workout_name: Name,
    pub user_id: UserID,
    pub completed_at: DateTime<Utc>,
    pub exercises: Vec<CompletedExercise>,
    /// Seconds.
    pub duration: u32,
    pub calories: u32,
    pub feedback: Option<Feedback>,
}

impl WorkoutLog {
    pub fn new(
        session: &WorkoutSession,
        user_id: UserID,
        completed_at: DateTime<Utc>,
        feedback: Option<Feedback>,
        calories_per_minute: u32,
    ) -> Result<Self, SessionError> {
        let summary = session.summary(calories_per_minute)?;
        let workout = session.workout();
        let exercises = workout
            .exercises
            .iter()
            .zip(session.completed_sets())
            .zip(session.completed_exercises())
            .map(|((e, completed_sets), completed)| CompletedExercise {
                exercise_id: e.exercise_id,
                completed_sets: *completed_sets,
                reps: e.reps,
                duration: e.duration,
                completed: *completed,
            })
            .collect();

        Ok(Self {
            id: Uuid::new_v4().into(),
            workout_id: workout.id,
            workout_name: workout.name.clone(),
            user_id,
            completed_at,
            exercises,
            duration: summary.elapsed,
            calories: summary.calories,
            feedback,
        })
    }

    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.completed_at.date_naive()
    }

    /// Duration rounded up to full minutes.
    #[must_use]
    pub fn minutes(&self) -> u32 {
        self.duration.div_ceil(60)
    }

    #[must_use]
    pub fn completed_exercises(&self) -> BTreeSet<ExerciseID> {
        self.exercises
            .iter()
            .filter(|e| e.completed)
            .map(|e| e.exercise_id)
            .collect()
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutLogID(Uuid);

impl WorkoutLogID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for WorkoutLogID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WorkoutLogID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedExercise {
    pub exercise_id: ExerciseID,
    pub completed_sets: u32,
    pub reps: u32,
    pub duration: Option<u32>,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub energy: Rating,
    pub difficulty: Rating,
    pub enjoyment: Rating,
    pub notes: String,
}

#[derive(Deref, Display, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: Rating = Rating(1);
    pub const MAX: Rating = Rating(5);
}

impl TryFrom<u8> for Rating {
    type Error = RatingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Self::MIN.0..=Self::MAX.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RatingError::OutOfRange)
        }
    }
}

impl From<Rating> for u8 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RatingError {
    #[error("Rating must be in the range 1 to 5")]
    OutOfRange,
}
