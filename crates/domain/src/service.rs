use chrono::{DateTime, Utc};
use log::{debug, error};

use crate::{
    AgeGroup, CreateError, DeleteError, Difficulty, Feedback, Name, OngoingWorkoutRepository,
    OngoingWorkoutService, ReadError, SessionError, UpdateError, User, UserID, UserRepository,
    UserService, Workout, WorkoutID, WorkoutLog, WorkoutLogRepository, WorkoutLogService,
    WorkoutRepository, WorkoutService, WorkoutSession, WorkoutStats,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::Unavailable) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R> Service<R>
where
    R: WorkoutLogRepository + UserRepository + OngoingWorkoutRepository,
{
    /// Records a completed session in the history of the user.
    ///
    /// The ongoing workout is cleared once the log and the user progress have
    /// been stored.
    pub async fn finish_workout(
        &self,
        session: &WorkoutSession,
        feedback: Option<Feedback>,
        completed_at: DateTime<Utc>,
        calories_per_minute: u32,
    ) -> Result<(WorkoutLog, User), FinishError> {
        let mut user = log_on_error!(self.repository.read_user(), ReadError, "get", "user")?
            .ok_or(FinishError::NoUser)?;
        let workout_log = WorkoutLog::new(
            session,
            user.id,
            completed_at,
            feedback,
            calories_per_minute,
        )?;
        let workout_log = log_on_error!(
            self.repository.create_workout_log(workout_log),
            CreateError,
            "create",
            "workout log"
        )?;

        user.record_workout(workout_log.date());
        let user = log_on_error!(
            self.repository.replace_user(user),
            UpdateError,
            "replace",
            "user"
        )?;

        log_on_error!(
            self.repository.write_ongoing_workout(None),
            UpdateError,
            "clear",
            "ongoing workout"
        )?;

        debug!(
            "finished workout {} with streak {}",
            *workout_log.workout_id, user.streak
        );

        Ok((workout_log, user))
    }
}

impl<R: OngoingWorkoutRepository> Service<R> {
    /// Abandons the session without touching the workout history.
    pub async fn quit_workout(&self, session: WorkoutSession) -> Result<Workout, UpdateError> {
        let workout = session.quit();
        log_on_error!(
            self.repository.write_ongoing_workout(None),
            UpdateError,
            "clear",
            "ongoing workout"
        )?;
        Ok(workout)
    }
}

impl<R: WorkoutLogRepository> Service<R> {
    pub async fn get_workout_stats(&self, user_id: UserID) -> Result<WorkoutStats, ReadError> {
        Ok(WorkoutStats::new(&self.get_workout_logs(user_id).await?))
    }
}

impl<R: WorkoutRepository> WorkoutService for Service<R> {
    async fn get_workouts(&self) -> Result<Vec<Workout>, ReadError> {
        log_on_error!(
            self.repository.read_workouts(),
            ReadError,
            "get",
            "workouts"
        )
    }

    async fn get_workout(&self, id: WorkoutID) -> Result<Workout, ReadError> {
        self.get_workouts()
            .await?
            .into_iter()
            .find(|w| w.id == id)
            .ok_or(ReadError::NotFound)
    }

    async fn save_workout(&self, workout: Workout) -> Result<Workout, CreateError> {
        log_on_error!(
            self.repository.create_workout(workout),
            CreateError,
            "save",
            "workout"
        )
    }

    async fn replace_workout(&self, workout: Workout) -> Result<Workout, UpdateError> {
        log_on_error!(
            self.repository.replace_workout(workout),
            UpdateError,
            "replace",
            "workout"
        )
    }

    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError> {
        log_on_error!(
            self.repository.delete_workout(id),
            DeleteError,
            "delete",
            "workout"
        )
    }
}

impl<R: WorkoutLogRepository> WorkoutLogService for Service<R> {
    async fn get_workout_logs(&self, user_id: UserID) -> Result<Vec<WorkoutLog>, ReadError> {
        log_on_error!(
            self.repository.read_workout_logs(user_id),
            ReadError,
            "get",
            "workout logs"
        )
    }

    async fn add_workout_log(&self, workout_log: WorkoutLog) -> Result<WorkoutLog, CreateError> {
        log_on_error!(
            self.repository.create_workout_log(workout_log),
            CreateError,
            "add",
            "workout log"
        )
    }
}

impl<R: UserRepository> UserService for Service<R> {
    async fn get_user(&self) -> Result<Option<User>, ReadError> {
        log_on_error!(self.repository.read_user(), ReadError, "get", "user")
    }

    async fn create_user(
        &self,
        name: Name,
        age_group: AgeGroup,
        fitness_level: Difficulty,
    ) -> Result<User, CreateError> {
        log_on_error!(
            self.repository.create_user(name, age_group, fitness_level),
            CreateError,
            "create",
            "user"
        )
    }

    async fn replace_user(&self, user: User) -> Result<User, UpdateError> {
        log_on_error!(
            self.repository.replace_user(user),
            UpdateError,
            "replace",
            "user"
        )
    }

    async fn delete_user(&self) -> Result<(), DeleteError> {
        log_on_error!(self.repository.delete_user(), DeleteError, "delete", "user")
    }
}

impl<R: OngoingWorkoutRepository> OngoingWorkoutService for Service<R> {
    async fn get_ongoing_workout(&self) -> Result<Option<WorkoutSession>, ReadError> {
        log_on_error!(
            self.repository.read_ongoing_workout(),
            ReadError,
            "get",
            "ongoing workout"
        )
    }

    async fn set_ongoing_workout(
        &self,
        session: Option<&WorkoutSession>,
    ) -> Result<(), UpdateError> {
        log_on_error!(
            self.repository.write_ongoing_workout(session),
            UpdateError,
            "set",
            "ongoing workout"
        )
    }
}

#[derive(thiserror::Error, Debug)]
pub enum FinishError {
    #[error("no user profile")]
    NoUser,
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error(transparent)]
    Create(#[from] CreateError),
    #[error(transparent)]
    Update(#[from] UpdateError),
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, collections::BTreeSet};

    use chrono::{NaiveDate, TimeZone};
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use crate::{MuscleGroup, SessionConfig, StorageError, WorkoutExercise, WorkoutKind};

    use super::*;

    #[derive(Default)]
    struct FakeRepository {
        workouts: RefCell<Vec<Workout>>,
        workout_logs: RefCell<Vec<WorkoutLog>>,
        user: RefCell<Option<User>>,
        ongoing_workout: RefCell<Option<WorkoutSession>>,
        unavailable: bool,
    }

    impl FakeRepository {
        fn check(&self) -> Result<(), StorageError> {
            if self.unavailable {
                Err(StorageError::Unavailable)
            } else {
                Ok(())
            }
        }
    }

    impl WorkoutRepository for FakeRepository {
        async fn read_workouts(&self) -> Result<Vec<Workout>, ReadError> {
            self.check()?;
            Ok(self.workouts.borrow().clone())
        }

        async fn create_workout(&self, workout: Workout) -> Result<Workout, CreateError> {
            self.check()?;
            if self.workouts.borrow().iter().any(|w| w.id == workout.id) {
                return Err(CreateError::Conflict);
            }
            self.workouts.borrow_mut().push(workout.clone());
            Ok(workout)
        }

        async fn replace_workout(&self, workout: Workout) -> Result<Workout, UpdateError> {
            self.check()?;
            let mut workouts = self.workouts.borrow_mut();
            let w = workouts
                .iter_mut()
                .find(|w| w.id == workout.id)
                .ok_or(UpdateError::NotFound)?;
            *w = workout.clone();
            Ok(workout)
        }

        async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError> {
            self.check()?;
            let mut workouts = self.workouts.borrow_mut();
            let len = workouts.len();
            workouts.retain(|w| w.id != id);
            if workouts.len() == len {
                Err(DeleteError::NotFound)
            } else {
                Ok(id)
            }
        }
    }

    impl WorkoutLogRepository for FakeRepository {
        async fn read_workout_logs(&self, user_id: UserID) -> Result<Vec<WorkoutLog>, ReadError> {
            self.check()?;
            Ok(self
                .workout_logs
                .borrow()
                .iter()
                .filter(|l| l.user_id == user_id)
                .cloned()
                .collect())
        }

        async fn create_workout_log(
            &self,
            workout_log: WorkoutLog,
        ) -> Result<WorkoutLog, CreateError> {
            self.check()?;
            self.workout_logs.borrow_mut().push(workout_log.clone());
            Ok(workout_log)
        }
    }

    impl UserRepository for FakeRepository {
        async fn read_user(&self) -> Result<Option<User>, ReadError> {
            self.check()?;
            Ok(self.user.borrow().clone())
        }

        async fn create_user(
            &self,
            name: Name,
            age_group: AgeGroup,
            fitness_level: Difficulty,
        ) -> Result<User, CreateError> {
            self.check()?;
            let user = User::new(1.into(), name, age_group, fitness_level);
            *self.user.borrow_mut() = Some(user.clone());
            Ok(user)
        }

        async fn replace_user(&self, user: User) -> Result<User, UpdateError> {
            self.check()?;
            *self.user.borrow_mut() = Some(user.clone());
            Ok(user)
        }

        async fn delete_user(&self) -> Result<(), DeleteError> {
            self.check()?;
            *self.user.borrow_mut() = None;
            Ok(())
        }
    }

    impl OngoingWorkoutRepository for FakeRepository {
        async fn read_ongoing_workout(&self) -> Result<Option<WorkoutSession>, ReadError> {
            self.check()?;
            Ok(self.ongoing_workout.borrow().clone())
        }

        async fn write_ongoing_workout(
            &self,
            session: Option<&WorkoutSession>,
        ) -> Result<(), UpdateError> {
            self.check()?;
            *self.ongoing_workout.borrow_mut() = session.cloned();
            Ok(())
        }
    }

    fn workout(id: u128) -> Workout {
        Workout {
            id: id.into(),
            name: Name::new("Quick Workout").unwrap(),
            description: String::new(),
            exercises: vec![
                WorkoutExercise::new(1.into(), 1, 10, None, 0).unwrap(),
                WorkoutExercise::new(2.into(), 1, 10, None, 0).unwrap(),
            ],
            duration: 5,
            difficulty: Difficulty::Beginner,
            target_muscle_groups: BTreeSet::from([MuscleGroup::FullBody]),
            created_at: Utc.with_ymd_and_hms(2020, 2, 2, 10, 0, 0).unwrap(),
            kind: WorkoutKind::Custom,
        }
    }

    fn service_with_user() -> Service<FakeRepository> {
        let service = Service::new(FakeRepository::default());
        block_on(service.create_user(
            Name::new("Alice").unwrap(),
            AgeGroup::Adult,
            Difficulty::Beginner,
        ))
        .unwrap();
        service
    }

    fn completed_session() -> WorkoutSession {
        let mut session = WorkoutSession::start(workout(1), SessionConfig::default()).unwrap();
        for _ in 0..90 {
            session.tick();
        }
        session.complete_set().unwrap();
        session.complete_set().unwrap();
        session
    }

    #[test]
    fn test_finish_workout() {
        let service = service_with_user();
        let session = completed_session();
        block_on(service.set_ongoing_workout(Some(&session))).unwrap();

        let (workout_log, user) = block_on(service.finish_workout(
            &session,
            None,
            Utc.with_ymd_and_hms(2020, 2, 3, 7, 0, 0).unwrap(),
            8,
        ))
        .unwrap();

        assert_eq!(workout_log.user_id, user.id);
        assert_eq!(workout_log.duration, 90);
        assert_eq!(workout_log.calories, 16);
        assert_eq!(user.streak, 1);
        assert_eq!(user.completed_workouts, 1);
        assert_eq!(
            user.workout_days,
            BTreeSet::from([NaiveDate::from_ymd_opt(2020, 2, 3).unwrap()])
        );
        assert_eq!(
            block_on(service.get_workout_logs(user.id)).unwrap(),
            vec![workout_log]
        );
        assert_eq!(block_on(service.get_user()).unwrap(), Some(user));
        assert_eq!(block_on(service.get_ongoing_workout()).unwrap(), None);
    }

    #[test]
    fn test_finish_workout_on_consecutive_days() {
        let service = service_with_user();

        for day in 3..=5 {
            block_on(service.finish_workout(
                &completed_session(),
                None,
                Utc.with_ymd_and_hms(2020, 2, day, 7, 0, 0).unwrap(),
                8,
            ))
            .unwrap();
        }

        let user = block_on(service.get_user()).unwrap().unwrap();
        assert_eq!(user.streak, 3);
        assert_eq!(user.completed_workouts, 3);

        let stats = block_on(service.get_workout_stats(user.id)).unwrap();
        assert_eq!(stats.total_workouts, 3);
        assert_eq!(stats.current_streak, 3);
        assert_eq!(stats.total_calories, 48);
    }

    #[test]
    fn test_finish_workout_active_session() {
        let service = service_with_user();
        let session = WorkoutSession::start(workout(1), SessionConfig::default()).unwrap();

        assert!(matches!(
            block_on(service.finish_workout(&session, None, Utc::now(), 8)),
            Err(FinishError::Session(SessionError::NotCompleted))
        ));
        assert!(
            block_on(service.get_workout_logs(1.into()))
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_finish_workout_without_user() {
        let service = Service::new(FakeRepository::default());

        assert!(matches!(
            block_on(service.finish_workout(&completed_session(), None, Utc::now(), 8)),
            Err(FinishError::NoUser)
        ));
    }

    #[test]
    fn test_finish_workout_storage_unavailable() {
        let service = Service::new(FakeRepository {
            unavailable: true,
            ..FakeRepository::default()
        });

        assert!(matches!(
            block_on(service.finish_workout(&completed_session(), None, Utc::now(), 8)),
            Err(FinishError::Read(ReadError::Storage(
                StorageError::Unavailable
            )))
        ));
    }

    #[test]
    fn test_quit_workout() {
        let service = service_with_user();
        let mut session = WorkoutSession::start(workout(1), SessionConfig::default()).unwrap();
        session.complete_set().unwrap();
        block_on(service.set_ongoing_workout(Some(&session))).unwrap();

        assert_eq!(block_on(service.quit_workout(session)).unwrap(), workout(1));
        assert_eq!(block_on(service.get_ongoing_workout()).unwrap(), None);
        assert!(
            block_on(service.get_workout_logs(1.into()))
                .unwrap()
                .is_empty()
        );

        let user = block_on(service.get_user()).unwrap().unwrap();
        assert_eq!(user.streak, 0);
        assert_eq!(user.completed_workouts, 0);
    }

    #[test]
    fn test_workouts() {
        let service = Service::new(FakeRepository::default());

        assert_eq!(block_on(service.save_workout(workout(1))).unwrap(), workout(1));
        assert!(matches!(
            block_on(service.save_workout(workout(1))),
            Err(CreateError::Conflict)
        ));
        assert_eq!(block_on(service.get_workout(1.into())).unwrap(), workout(1));
        assert!(matches!(
            block_on(service.get_workout(2.into())),
            Err(ReadError::NotFound)
        ));
        assert!(matches!(
            block_on(service.replace_workout(workout(2))),
            Err(UpdateError::NotFound)
        ));
        assert_eq!(
            block_on(service.delete_workout(1.into())).unwrap(),
            WorkoutID::from(1)
        );
        assert!(block_on(service.get_workouts()).unwrap().is_empty());
    }
}
