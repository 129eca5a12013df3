use std::collections::BTreeSet;

use chrono::NaiveDate;
use derive_more::Deref;
use uuid::Uuid;

use crate::{AgeGroup, CreateError, DeleteError, Difficulty, Name, ReadError, UpdateError};

#[allow(async_fn_in_trait)]
pub trait UserService {
    async fn get_user(&self) -> Result<Option<User>, ReadError>;
    async fn create_user(
        &self,
        name: Name,
        age_group: AgeGroup,
        fitness_level: Difficulty,
    ) -> Result<User, CreateError>;
    async fn replace_user(&self, user: User) -> Result<User, UpdateError>;
    async fn delete_user(&self) -> Result<(), DeleteError>;
}

/// Storage of the profile of the local user.
#[allow(async_fn_in_trait)]
pub trait UserRepository {
    async fn read_user(&self) -> Result<Option<User>, ReadError>;
    async fn create_user(
        &self,
        name: Name,
        age_group: AgeGroup,
        fitness_level: Difficulty,
    ) -> Result<User, CreateError>;
    async fn replace_user(&self, user: User) -> Result<User, UpdateError>;
    async fn delete_user(&self) -> Result<(), DeleteError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserID,
    pub name: Name,
    pub age_group: AgeGroup,
    pub fitness_level: Difficulty,
    /// Consecutive days with a workout up to the last workout day.
    pub streak: u32,
    pub completed_workouts: u32,
    pub workout_days: BTreeSet<NaiveDate>,
}

impl User {
    #[must_use]
    pub fn new(id: UserID, name: Name, age_group: AgeGroup, fitness_level: Difficulty) -> Self {
        Self {
            id,
            name,
            age_group,
            fitness_level,
            streak: 0,
            completed_workouts: 0,
            workout_days: BTreeSet::new(),
        }
    }

    /// Counts a workout on the given day.
    ///
    /// Days may be recorded out of order. The streak is the run of consecutive
    /// days ending on the last workout day.
    pub fn record_workout(&mut self, date: NaiveDate) {
        self.completed_workouts = self.completed_workouts.saturating_add(1);

        if !self.workout_days.insert(date) {
            return;
        }

        self.streak = self.last_workout_day().map_or(0, |last| {
            let run = std::iter::successors(Some(last), NaiveDate::pred_opt)
                .take_while(|day| self.workout_days.contains(day))
                .count();
            u32::try_from(run).unwrap_or(u32::MAX)
        });
    }

    #[must_use]
    pub fn last_workout_day(&self) -> Option<NaiveDate> {
        self.workout_days.last().copied()
    }

    /// Streak as seen on the given day, zero if it has already been broken.
    #[must_use]
    pub fn current_streak(&self, today: NaiveDate) -> u32 {
        match self.last_workout_day() {
            Some(last) if last == today || Some(last) == today.pred_opt() => self.streak,
            _ => 0,
        }
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct UserID(Uuid);

impl UserID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for UserID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for UserID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}
