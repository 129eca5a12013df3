use std::collections::VecDeque;

use chrono::{DateTime, NaiveDate, Utc};
use log::debug;
use repfit_app as app;
use serde::{Deserialize, Serialize};
use strum::AsRefStr;
use uuid::Uuid;

use crate::{KeyValueStore, StoreError, domain};

/// Repository storing all data as JSON values in a key-value store.
pub struct KeyValue<S> {
    store: S,
}

impl<S> KeyValue<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: KeyValueStore> KeyValue<S> {
    fn read_workout_dtos(&self) -> Result<Vec<Workout>, StoreError> {
        Ok(self.store.get(Key::Workouts.as_ref())?.unwrap_or_default())
    }

    fn read_workout_log_dtos(&self, user_id: domain::UserID) -> Result<Vec<WorkoutLog>, StoreError> {
        Ok(self
            .store
            .get(&workout_logs_key(user_id))?
            .unwrap_or_default())
    }
}

#[derive(AsRefStr)]
pub enum Key {
    #[strum(serialize = "workouts")]
    Workouts,
    #[strum(serialize = "ongoing workout")]
    OngoingWorkout,
    #[strum(serialize = "user")]
    User,
    #[strum(serialize = "workout logs")]
    WorkoutLogs,
    #[strum(serialize = "settings")]
    Settings,
    #[strum(serialize = "log")]
    Log,
}

fn workout_logs_key(user_id: domain::UserID) -> String {
    format!("{} {}", Key::WorkoutLogs.as_ref(), *user_id)
}

impl<S: KeyValueStore> domain::WorkoutRepository for KeyValue<S> {
    async fn read_workouts(&self) -> Result<Vec<domain::Workout>, domain::ReadError> {
        self.read_workout_dtos()?
            .into_iter()
            .map(|w| domain::Workout::try_from(w).map_err(|err| domain::ReadError::Other(err.into())))
            .collect()
    }

    async fn create_workout(
        &self,
        workout: domain::Workout,
    ) -> Result<domain::Workout, domain::CreateError> {
        let mut workouts = self.read_workout_dtos()?;
        if workouts.iter().any(|w| w.id == *workout.id) {
            return Err(domain::CreateError::Conflict);
        }
        workouts.push(Workout::from(&workout));
        self.store.set(Key::Workouts.as_ref(), &workouts)?;
        Ok(workout)
    }

    async fn replace_workout(
        &self,
        workout: domain::Workout,
    ) -> Result<domain::Workout, domain::UpdateError> {
        let mut workouts = self.read_workout_dtos()?;
        let entry = workouts
            .iter_mut()
            .find(|w| w.id == *workout.id)
            .ok_or(domain::UpdateError::NotFound)?;
        *entry = Workout::from(&workout);
        self.store.set(Key::Workouts.as_ref(), &workouts)?;
        Ok(workout)
    }

    async fn delete_workout(
        &self,
        id: domain::WorkoutID,
    ) -> Result<domain::WorkoutID, domain::DeleteError> {
        let mut workouts = self.read_workout_dtos()?;
        let len = workouts.len();
        workouts.retain(|w| w.id != *id);
        if workouts.len() == len {
            return Err(domain::DeleteError::NotFound);
        }
        self.store.set(Key::Workouts.as_ref(), &workouts)?;
        Ok(id)
    }
}

impl<S: KeyValueStore> domain::WorkoutLogRepository for KeyValue<S> {
    async fn read_workout_logs(
        &self,
        user_id: domain::UserID,
    ) -> Result<Vec<domain::WorkoutLog>, domain::ReadError> {
        self.read_workout_log_dtos(user_id)?
            .into_iter()
            .map(|l| {
                domain::WorkoutLog::try_from(l).map_err(|err| domain::ReadError::Other(err.into()))
            })
            .collect()
    }

    async fn create_workout_log(
        &self,
        workout_log: domain::WorkoutLog,
    ) -> Result<domain::WorkoutLog, domain::CreateError> {
        let mut workout_logs = self.read_workout_log_dtos(workout_log.user_id)?;
        if workout_logs.iter().any(|l| l.id == *workout_log.id) {
            return Err(domain::CreateError::Conflict);
        }
        workout_logs.push(WorkoutLog::from(&workout_log));
        self.store
            .set(&workout_logs_key(workout_log.user_id), &workout_logs)?;
        Ok(workout_log)
    }
}

impl<S: KeyValueStore> domain::UserRepository for KeyValue<S> {
    async fn read_user(&self) -> Result<Option<domain::User>, domain::ReadError> {
        self.store
            .get::<User>(Key::User.as_ref())?
            .map(domain::User::try_from)
            .transpose()
            .map_err(|err| domain::ReadError::Other(err.into()))
    }

    async fn create_user(
        &self,
        name: domain::Name,
        age_group: domain::AgeGroup,
        fitness_level: domain::Difficulty,
    ) -> Result<domain::User, domain::CreateError> {
        if self.store.get::<User>(Key::User.as_ref())?.is_some() {
            return Err(domain::CreateError::Conflict);
        }
        let user = domain::User::new(Uuid::new_v4().into(), name, age_group, fitness_level);
        self.store.set(Key::User.as_ref(), &User::from(&user))?;
        debug!("created user {}", *user.id);
        Ok(user)
    }

    async fn replace_user(&self, user: domain::User) -> Result<domain::User, domain::UpdateError> {
        match self.store.get::<User>(Key::User.as_ref())? {
            Some(stored) if stored.id == *user.id => {
                self.store.set(Key::User.as_ref(), &User::from(&user))?;
                Ok(user)
            }
            _ => Err(domain::UpdateError::NotFound),
        }
    }

    async fn delete_user(&self) -> Result<(), domain::DeleteError> {
        if self.store.get::<User>(Key::User.as_ref())?.is_none() {
            return Err(domain::DeleteError::NotFound);
        }
        self.store.remove(Key::User.as_ref())?;
        Ok(())
    }
}

impl<S: KeyValueStore> domain::OngoingWorkoutRepository for KeyValue<S> {
    async fn read_ongoing_workout(
        &self,
    ) -> Result<Option<domain::WorkoutSession>, domain::ReadError> {
        self.store
            .get::<OngoingWorkout>(Key::OngoingWorkout.as_ref())?
            .map(domain::WorkoutSession::try_from)
            .transpose()
            .map_err(|err| domain::ReadError::Other(err.into()))
    }

    async fn write_ongoing_workout(
        &self,
        session: Option<&domain::WorkoutSession>,
    ) -> Result<(), domain::UpdateError> {
        match session {
            Some(session) => self
                .store
                .set(Key::OngoingWorkout.as_ref(), &OngoingWorkout::from(session))?,
            None => self.store.remove(Key::OngoingWorkout.as_ref())?,
        }
        Ok(())
    }
}

impl<S: KeyValueStore> app::SettingsRepository for KeyValue<S> {
    async fn read_settings(&self) -> Result<app::Settings, domain::ReadError> {
        Ok(self
            .store
            .get(Key::Settings.as_ref())?
            .unwrap_or_default())
    }

    async fn write_settings(&self, settings: app::Settings) -> Result<(), domain::UpdateError> {
        Ok(self.store.set(Key::Settings.as_ref(), &settings)?)
    }
}

impl<S: KeyValueStore + Send + Sync + 'static> app::log::Repository for KeyValue<S> {
    fn read_entries(&self) -> Result<VecDeque<app::log::Entry>, app::log::Error> {
        self.store
            .get(Key::Log.as_ref())
            .map(Option::unwrap_or_default)
            .map_err(|err| app::log::Error::Unknown(err.to_string()))
    }

    fn write_entry(&self, entry: app::log::Entry) -> Result<(), app::log::Error> {
        let mut entries = self.read_entries()?;
        entries.push_front(entry);
        entries.truncate(app::log::CAPACITY);
        self.store
            .set(Key::Log.as_ref(), &entries)
            .map_err(|err| app::log::Error::Unknown(err.to_string()))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Workout {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub exercises: Vec<WorkoutExercise>,
    pub duration: u32,
    pub difficulty: String,
    pub target_muscle_groups: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub kind: WorkoutKind,
}

impl From<&domain::Workout> for Workout {
    fn from(value: &domain::Workout) -> Self {
        Self {
            id: *value.id,
            name: value.name.to_string(),
            description: value.description.clone(),
            exercises: value.exercises.iter().map(WorkoutExercise::from).collect(),
            duration: value.duration,
            difficulty: value.difficulty.to_string(),
            target_muscle_groups: value
                .target_muscle_groups
                .iter()
                .map(ToString::to_string)
                .collect(),
            created_at: value.created_at,
            kind: value.kind.into(),
        }
    }
}

impl From<domain::Workout> for Workout {
    fn from(value: domain::Workout) -> Self {
        Self::from(&value)
    }
}

impl TryFrom<Workout> for domain::Workout {
    type Error = WorkoutError;

    fn try_from(value: Workout) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            description: value.description,
            exercises: value
                .exercises
                .into_iter()
                .map(domain::WorkoutExercise::from)
                .collect(),
            duration: value.duration,
            difficulty: domain::Difficulty::try_from(value.difficulty.as_str())?,
            target_muscle_groups: value
                .target_muscle_groups
                .iter()
                .map(|m| domain::MuscleGroup::try_from(m.as_str()))
                .collect::<Result<_, _>>()?,
            created_at: value.created_at,
            kind: value.kind.into(),
        })
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WorkoutError {
    #[error(transparent)]
    InvalidName(#[from] domain::NameError),
    #[error(transparent)]
    InvalidDifficulty(#[from] domain::DifficultyError),
    #[error(transparent)]
    InvalidMuscleGroup(#[from] domain::MuscleGroupError),
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Preset,
    Generated,
    Custom,
}

impl From<domain::WorkoutKind> for WorkoutKind {
    fn from(value: domain::WorkoutKind) -> Self {
        match value {
            domain::WorkoutKind::Preset => WorkoutKind::Preset,
            domain::WorkoutKind::Generated => WorkoutKind::Generated,
            domain::WorkoutKind::Custom => WorkoutKind::Custom,
        }
    }
}

impl From<WorkoutKind> for domain::WorkoutKind {
    fn from(value: WorkoutKind) -> Self {
        match value {
            WorkoutKind::Preset => domain::WorkoutKind::Preset,
            WorkoutKind::Generated => domain::WorkoutKind::Generated,
            WorkoutKind::Custom => domain::WorkoutKind::Custom,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WorkoutExercise {
    pub exercise_id: Uuid,
    pub sets: u32,
    pub reps: u32,
    pub duration: Option<u32>,
    pub rest: u32,
}

impl From<&domain::WorkoutExercise> for WorkoutExercise {
    fn from(value: &domain::WorkoutExercise) -> Self {
        Self {
            exercise_id: *value.exercise_id,
            sets: value.sets,
            reps: value.reps,
            duration: value.duration,
            rest: value.rest,
        }
    }
}

impl From<WorkoutExercise> for domain::WorkoutExercise {
    fn from(value: WorkoutExercise) -> Self {
        Self {
            exercise_id: value.exercise_id.into(),
            sets: value.sets,
            reps: value.reps,
            duration: value.duration,
            rest: value.rest,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WorkoutLog {
    pub id: Uuid,
    pub workout_id: Uuid,
    pub workout_name: String,
    pub user_id: Uuid,
    pub completed_at: DateTime<Utc>,
    pub exercises: Vec<CompletedExercise>,
    pub duration: u32,
    pub calories: u32,
    pub feedback: Option<Feedback>,
}

impl From<&domain::WorkoutLog> for WorkoutLog {
    fn from(value: &domain::WorkoutLog) -> Self {
        Self {
            id: *value.id,
            workout_id: *value.workout_id,
            workout_name: value.workout_name.to_string(),
            user_id: *value.user_id,
            completed_at: value.completed_at,
            exercises: value
                .exercises
                .iter()
                .map(|e| CompletedExercise {
                    exercise_id: *e.exercise_id,
                    completed_sets: e.completed_sets,
                    reps: e.reps,
                    duration: e.duration,
                    completed: e.completed,
                })
                .collect(),
            duration: value.duration,
            calories: value.calories,
            feedback: value.feedback.as_ref().map(|f| Feedback {
                energy: f.energy.into(),
                difficulty: f.difficulty.into(),
                enjoyment: f.enjoyment.into(),
                notes: f.notes.clone(),
            }),
        }
    }
}

impl TryFrom<WorkoutLog> for domain::WorkoutLog {
    type Error = WorkoutLogError;

    fn try_from(value: WorkoutLog) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            workout_id: value.workout_id.into(),
            workout_name: domain::Name::new(&value.workout_name)?,
            user_id: value.user_id.into(),
            completed_at: value.completed_at,
            exercises: value
                .exercises
                .into_iter()
                .map(|e| domain::CompletedExercise {
                    exercise_id: e.exercise_id.into(),
                    completed_sets: e.completed_sets,
                    reps: e.reps,
                    duration: e.duration,
                    completed: e.completed,
                })
                .collect(),
            duration: value.duration,
            calories: value.calories,
            feedback: value
                .feedback
                .map(|f| -> Result<domain::Feedback, domain::RatingError> {
                    Ok(domain::Feedback {
                        energy: f.energy.try_into()?,
                        difficulty: f.difficulty.try_into()?,
                        enjoyment: f.enjoyment.try_into()?,
                        notes: f.notes,
                    })
                })
                .transpose()?,
        })
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WorkoutLogError {
    #[error(transparent)]
    InvalidName(#[from] domain::NameError),
    #[error(transparent)]
    InvalidRating(#[from] domain::RatingError),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CompletedExercise {
    pub exercise_id: Uuid,
    pub completed_sets: u32,
    pub reps: u32,
    pub duration: Option<u32>,
    pub completed: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub energy: u8,
    pub difficulty: u8,
    pub enjoyment: u8,
    pub notes: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub age_group: String,
    pub fitness_level: String,
    pub streak: u32,
    pub completed_workouts: u32,
    pub workout_days: Vec<NaiveDate>,
}

impl From<&domain::User> for User {
    fn from(value: &domain::User) -> Self {
        Self {
            id: *value.id,
            name: value.name.to_string(),
            age_group: value.age_group.to_string(),
            fitness_level: value.fitness_level.to_string(),
            streak: value.streak,
            completed_workouts: value.completed_workouts,
            workout_days: value.workout_days.iter().copied().collect(),
        }
    }
}

impl TryFrom<User> for domain::User {
    type Error = UserError;

    fn try_from(value: User) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            age_group: domain::AgeGroup::try_from(value.age_group.as_str())?,
            fitness_level: domain::Difficulty::try_from(value.fitness_level.as_str())?,
            streak: value.streak,
            completed_workouts: value.completed_workouts,
            workout_days: value.workout_days.into_iter().collect(),
        })
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum UserError {
    #[error(transparent)]
    InvalidName(#[from] domain::NameError),
    #[error(transparent)]
    InvalidAgeGroup(#[from] domain::PreferencesError),
    #[error(transparent)]
    InvalidFitnessLevel(#[from] domain::DifficultyError),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OngoingWorkout {
    pub workout: Workout,
    pub exercise_idx: usize,
    pub set_idx: usize,
    pub resting: bool,
    pub remaining: u32,
    pub paused: bool,
    pub elapsed: u32,
    pub completed_sets: Vec<u32>,
    pub completed_exercises: Vec<bool>,
    pub completed: bool,
    pub rest_between_exercises: bool,
}

impl From<&domain::WorkoutSession> for OngoingWorkout {
    fn from(value: &domain::WorkoutSession) -> Self {
        let snapshot = value.snapshot();
        Self {
            workout: Workout::from(value.workout()),
            exercise_idx: snapshot.exercise_idx,
            set_idx: snapshot.set_idx,
            resting: snapshot.phase == domain::Phase::Resting,
            remaining: snapshot.remaining,
            paused: snapshot.paused,
            elapsed: snapshot.elapsed,
            completed_sets: snapshot.completed_sets,
            completed_exercises: snapshot.completed_exercises,
            completed: snapshot.status == domain::Status::Completed,
            rest_between_exercises: value.config().rest_between_exercises,
        }
    }
}

impl TryFrom<OngoingWorkout> for domain::WorkoutSession {
    type Error = OngoingWorkoutError;

    fn try_from(value: OngoingWorkout) -> Result<Self, Self::Error> {
        Ok(domain::WorkoutSession::restore(
            domain::Workout::try_from(value.workout)?,
            domain::SessionSnapshot {
                exercise_idx: value.exercise_idx,
                set_idx: value.set_idx,
                phase: if value.resting {
                    domain::Phase::Resting
                } else {
                    domain::Phase::Working
                },
                remaining: value.remaining,
                paused: value.paused,
                elapsed: value.elapsed,
                completed_sets: value.completed_sets,
                completed_exercises: value.completed_exercises,
                status: if value.completed {
                    domain::Status::Completed
                } else {
                    domain::Status::Active
                },
            },
            domain::SessionConfig {
                rest_between_exercises: value.rest_between_exercises,
            },
        )?)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum OngoingWorkoutError {
    #[error(transparent)]
    InvalidWorkout(#[from] WorkoutError),
    #[error(transparent)]
    InvalidSession(#[from] domain::SessionError),
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use repfit_app::{SettingsRepository, log::Repository as _};
    use rstest::rstest;
    use serde_json::json;

    use crate::{
        MemoryStore,
        domain::{
            OngoingWorkoutRepository, UserRepository, WorkoutLogRepository, WorkoutRepository,
        },
        tests::data::{USER, WORKOUT, WORKOUT_2, WORKOUT_LOG, WORKOUT_LOG_2, session},
    };

    use super::*;

    fn repository() -> KeyValue<MemoryStore> {
        KeyValue::new(MemoryStore::new())
    }

    fn repository_with_user() -> KeyValue<MemoryStore> {
        let repository = repository();
        repository
            .store()
            .set(Key::User.as_ref(), &User::from(&*USER))
            .unwrap();
        repository
    }

    #[test]
    fn test_workout_try_from() {
        assert_eq!(
            domain::Workout::try_from(Workout::from(&*WORKOUT)),
            Ok(WORKOUT.clone())
        );
    }

    #[test]
    fn test_workout_serde() {
        assert_eq!(
            json!(Workout::from(&*WORKOUT_2)),
            json!({
                "id": "00000000-0000-0000-0000-000000000002",
                "name": "Intense 5-Minute Legs/Abs Workout",
                "description": "",
                "exercises": [
                    {
                        "exercise_id": "00000000-0000-0000-0000-000000000015",
                        "sets": 3,
                        "reps": 0,
                        "duration": 30,
                        "rest": 20,
                    },
                ],
                "duration": 5,
                "difficulty": "advanced",
                "target_muscle_groups": ["abs", "legs"],
                "created_at": "2020-02-03T08:00:00Z",
                "kind": "generated",
            })
        );
    }

    #[rstest]
    #[case("expert", "legs")]
    #[case("advanced", "core")]
    fn test_workout_try_from_invalid(#[case] difficulty: &str, #[case] muscle_group: &str) {
        let workout = Workout {
            difficulty: difficulty.to_string(),
            target_muscle_groups: vec![muscle_group.to_string()],
            ..Workout::from(&*WORKOUT_2)
        };

        assert!(domain::Workout::try_from(workout).is_err());
    }

    #[test]
    fn test_workout_log_try_from() {
        assert_eq!(
            domain::WorkoutLog::try_from(WorkoutLog::from(&*WORKOUT_LOG)),
            Ok(WORKOUT_LOG.clone())
        );
        assert_eq!(
            domain::WorkoutLog::try_from(WorkoutLog::from(&*WORKOUT_LOG_2)),
            Ok(WORKOUT_LOG_2.clone())
        );
    }

    #[test]
    fn test_workout_log_try_from_invalid_rating() {
        let mut workout_log = WorkoutLog::from(&*WORKOUT_LOG);
        if let Some(feedback) = workout_log.feedback.as_mut() {
            feedback.enjoyment = 6;
        }

        assert_eq!(
            domain::WorkoutLog::try_from(workout_log),
            Err(WorkoutLogError::InvalidRating(
                domain::RatingError::OutOfRange
            ))
        );
    }

    #[test]
    fn test_user_try_from() {
        assert_eq!(domain::User::try_from(User::from(&*USER)), Ok(USER.clone()));
    }

    #[test]
    fn test_user_serde() {
        assert_eq!(
            json!(User::from(&*USER)),
            json!({
                "id": "00000000-0000-0000-0000-000000000001",
                "name": "Alice",
                "age_group": "adult",
                "fitness_level": "beginner",
                "streak": 2,
                "completed_workouts": 3,
                "workout_days": ["2020-02-02", "2020-02-03"],
            })
        );
    }

    #[test]
    fn test_ongoing_workout_try_from() {
        let session = session();

        assert_eq!(
            domain::WorkoutSession::try_from(OngoingWorkout::from(&session)),
            Ok(session)
        );
    }

    #[test]
    fn test_ongoing_workout_try_from_invalid_cursor() {
        let ongoing_workout = OngoingWorkout {
            exercise_idx: 5,
            ..OngoingWorkout::from(&session())
        };

        assert_eq!(
            domain::WorkoutSession::try_from(ongoing_workout),
            Err(OngoingWorkoutError::InvalidSession(
                domain::SessionError::InvalidSnapshot
            ))
        );
    }

    #[test]
    fn test_workouts() {
        let repository = repository();

        assert!(block_on(repository.read_workouts()).unwrap().is_empty());
        assert_eq!(
            block_on(repository.create_workout(WORKOUT.clone())).unwrap(),
            WORKOUT.clone()
        );
        assert_eq!(
            block_on(repository.create_workout(WORKOUT_2.clone())).unwrap(),
            WORKOUT_2.clone()
        );
        assert!(matches!(
            block_on(repository.create_workout(WORKOUT.clone())),
            Err(domain::CreateError::Conflict)
        ));
        assert_eq!(
            block_on(repository.read_workouts()).unwrap(),
            vec![WORKOUT.clone(), WORKOUT_2.clone()]
        );

        let replaced = domain::Workout {
            description: "Updated".to_string(),
            ..WORKOUT.clone()
        };
        assert_eq!(
            block_on(repository.replace_workout(replaced.clone())).unwrap(),
            replaced
        );
        assert!(matches!(
            block_on(repository.replace_workout(domain::Workout {
                id: 9.into(),
                ..WORKOUT.clone()
            })),
            Err(domain::UpdateError::NotFound)
        ));

        assert_eq!(
            block_on(repository.delete_workout(WORKOUT_2.id)).unwrap(),
            WORKOUT_2.id
        );
        assert!(matches!(
            block_on(repository.delete_workout(WORKOUT_2.id)),
            Err(domain::DeleteError::NotFound)
        ));
        assert_eq!(block_on(repository.read_workouts()).unwrap(), vec![replaced]);
    }

    #[test]
    fn test_workout_logs() {
        let repository = repository();

        assert_eq!(
            block_on(repository.create_workout_log(WORKOUT_LOG.clone())).unwrap(),
            WORKOUT_LOG.clone()
        );
        assert_eq!(
            block_on(repository.create_workout_log(WORKOUT_LOG_2.clone())).unwrap(),
            WORKOUT_LOG_2.clone()
        );
        assert!(matches!(
            block_on(repository.create_workout_log(WORKOUT_LOG.clone())),
            Err(domain::CreateError::Conflict)
        ));
        assert_eq!(
            block_on(repository.read_workout_logs(USER.id)).unwrap(),
            vec![WORKOUT_LOG.clone(), WORKOUT_LOG_2.clone()]
        );
        assert!(
            block_on(repository.read_workout_logs(2.into()))
                .unwrap()
                .is_empty()
        );
        assert_eq!(
            repository.store().keys(),
            vec![format!(
                "workout logs {}",
                Uuid::from_u128(1).hyphenated()
            )]
        );
    }

    #[test]
    fn test_user() {
        let repository = repository();

        assert_eq!(block_on(repository.read_user()).unwrap(), None);
        assert!(matches!(
            block_on(repository.replace_user(USER.clone())),
            Err(domain::UpdateError::NotFound)
        ));
        assert!(matches!(
            block_on(repository.delete_user()),
            Err(domain::DeleteError::NotFound)
        ));

        let user = block_on(repository.create_user(
            domain::Name::new("Bob").unwrap(),
            domain::AgeGroup::Senior,
            domain::Difficulty::Intermediate,
        ))
        .unwrap();

        assert!(!user.id.is_nil());
        assert_eq!(user.streak, 0);
        assert!(matches!(
            block_on(repository.create_user(
                domain::Name::new("Bob").unwrap(),
                domain::AgeGroup::Senior,
                domain::Difficulty::Intermediate,
            )),
            Err(domain::CreateError::Conflict)
        ));
        assert_eq!(block_on(repository.read_user()).unwrap(), Some(user.clone()));

        let mut updated = user.clone();
        updated.record_workout(NaiveDate::from_ymd_opt(2020, 2, 2).unwrap());
        assert_eq!(
            block_on(repository.replace_user(updated.clone())).unwrap(),
            updated
        );
        assert_eq!(block_on(repository.read_user()).unwrap(), Some(updated));

        block_on(repository.delete_user()).unwrap();
        assert_eq!(block_on(repository.read_user()).unwrap(), None);
    }

    #[test]
    fn test_replace_user_with_other_id() {
        let repository = repository_with_user();

        assert!(matches!(
            block_on(repository.replace_user(domain::User {
                id: 2.into(),
                ..USER.clone()
            })),
            Err(domain::UpdateError::NotFound)
        ));
    }

    #[test]
    fn test_ongoing_workout() {
        let repository = repository();
        let session = session();

        assert_eq!(block_on(repository.read_ongoing_workout()).unwrap(), None);
        block_on(repository.write_ongoing_workout(Some(&session))).unwrap();
        assert_eq!(
            block_on(repository.read_ongoing_workout()).unwrap(),
            Some(session)
        );
        block_on(repository.write_ongoing_workout(None)).unwrap();
        assert_eq!(block_on(repository.read_ongoing_workout()).unwrap(), None);
        assert!(repository.store().keys().is_empty());
    }

    #[test]
    fn test_ongoing_workout_corrupted() {
        let repository = repository();
        repository
            .store()
            .set(Key::OngoingWorkout.as_ref(), &json!({ "workout": 1 }))
            .unwrap();

        assert!(matches!(
            block_on(repository.read_ongoing_workout()),
            Err(domain::ReadError::Storage(domain::StorageError::Other(_)))
        ));
    }

    #[test]
    fn test_settings() {
        let repository = repository();
        let settings = app::Settings {
            rest_between_exercises: true,
            calories_per_minute: 10,
            ..app::Settings::default()
        };

        assert_eq!(
            block_on(repository.read_settings()).unwrap(),
            app::Settings::default()
        );
        block_on(repository.write_settings(settings)).unwrap();
        assert_eq!(block_on(repository.read_settings()).unwrap(), settings);
    }

    #[test]
    fn test_log() {
        let repository = repository();

        for i in 0..=app::log::CAPACITY {
            repository
                .write_entry(app::log::Entry {
                    time: "Feb 02 10:00:00".to_string(),
                    level: ::log::Level::Info,
                    message: i.to_string(),
                })
                .unwrap();
        }

        let entries = repository.read_entries().unwrap();
        assert_eq!(entries.len(), app::log::CAPACITY);
        assert_eq!(
            entries.front().map(|e| e.message.as_str()),
            Some(app::log::CAPACITY.to_string().as_str())
        );
        assert_eq!(entries.back().map(|e| e.message.as_str()), Some("1"));
    }
}
