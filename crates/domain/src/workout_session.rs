use log::debug;

use crate::{ReadError, UpdateError, Workout, WorkoutError, WorkoutExercise};

#[allow(async_fn_in_trait)]
pub trait OngoingWorkoutRepository {
    async fn read_ongoing_workout(&self) -> Result<Option<WorkoutSession>, ReadError>;
    async fn write_ongoing_workout(
        &self,
        session: Option<&WorkoutSession>,
    ) -> Result<(), UpdateError>;
}

#[allow(async_fn_in_trait)]
pub trait OngoingWorkoutService {
    async fn get_ongoing_workout(&self) -> Result<Option<WorkoutSession>, ReadError>;
    async fn set_ongoing_workout(&self, session: Option<&WorkoutSession>)
    -> Result<(), UpdateError>;
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Rest after the last set of an exercise before the next exercise starts.
    pub rest_between_exercises: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Working,
    Resting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Active,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A working set of the current exercise has started.
    Work,
    Rest,
    NextExercise,
    Completed,
}

/// A workout being performed.
///
/// While the session is active, the exercise index always points to an
/// exercise of the workout and the set index to a set of that exercise. Both
/// cursors stay on the last set when the session completes.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutSession {
    workout: Workout,
    config: SessionConfig,
    exercise_idx: usize,
    set_idx: usize,
    phase: Phase,
    remaining: u32,
    paused: bool,
    elapsed: u32,
    completed_sets: Vec<u32>,
    completed_exercises: Vec<bool>,
    status: Status,
}

impl WorkoutSession {
    pub fn start(workout: Workout, config: SessionConfig) -> Result<Self, SessionError> {
        workout.validate()?;

        let len = workout.exercises.len();
        let remaining = workout.exercises[0].set_time();

        debug!(
            "start session of workout {} with {len} exercises",
            *workout.id
        );

        Ok(Self {
            workout,
            config,
            exercise_idx: 0,
            set_idx: 0,
            phase: Phase::Working,
            remaining,
            paused: false,
            elapsed: 0,
            completed_sets: vec![0; len],
            completed_exercises: vec![false; len],
            status: Status::Active,
        })
    }

    pub fn restore(
        workout: Workout,
        snapshot: SessionSnapshot,
        config: SessionConfig,
    ) -> Result<Self, SessionError> {
        workout.validate()?;

        let len = workout.exercises.len();
        if snapshot.completed_sets.len() != len || snapshot.completed_exercises.len() != len {
            return Err(SessionError::InvalidSnapshot);
        }
        match workout.exercises.get(snapshot.exercise_idx) {
            Some(exercise) if snapshot.set_idx < exercise.sets as usize => {}
            _ => return Err(SessionError::InvalidSnapshot),
        }
        if workout
            .exercises
            .iter()
            .zip(&snapshot.completed_sets)
            .any(|(exercise, completed)| *completed > exercise.sets)
        {
            return Err(SessionError::InvalidSnapshot);
        }

        Ok(Self {
            workout,
            config,
            exercise_idx: snapshot.exercise_idx,
            set_idx: snapshot.set_idx,
            phase: snapshot.phase,
            remaining: snapshot.remaining,
            paused: snapshot.paused,
            elapsed: snapshot.elapsed,
            completed_sets: snapshot.completed_sets,
            completed_exercises: snapshot.completed_exercises,
            status: snapshot.status,
        })
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            exercise_idx: self.exercise_idx,
            set_idx: self.set_idx,
            phase: self.phase,
            remaining: self.remaining,
            paused: self.paused,
            elapsed: self.elapsed,
            completed_sets: self.completed_sets.clone(),
            completed_exercises: self.completed_exercises.clone(),
            status: self.status,
        }
    }

    /// Advances the session clock by one second.
    ///
    /// Returns the transition caused by an elapsed countdown.
    pub fn tick(&mut self) -> Option<Transition> {
        if self.paused || self.is_completed() {
            return None;
        }

        self.elapsed = self.elapsed.saturating_add(1);

        if self.remaining == 0 {
            return None;
        }

        self.remaining -= 1;

        if self.remaining == 0 {
            Some(self.advance(true))
        } else {
            None
        }
    }

    pub fn complete_set(&mut self) -> Result<Transition, SessionError> {
        if self.is_completed() {
            return Err(SessionError::Completed);
        }
        Ok(self.advance(true))
    }

    pub fn skip(&mut self) -> Result<Transition, SessionError> {
        if self.is_completed() {
            return Err(SessionError::Completed);
        }
        Ok(self.advance(false))
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Abandons the session and hands back the workout.
    #[must_use]
    pub fn quit(self) -> Workout {
        debug!(
            "quit session of workout {} after {} s",
            *self.workout.id, self.elapsed
        );
        self.workout
    }

    /// Share of sets passed so far, between 0 and 1.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f32 {
        if self.is_completed() {
            return 1.0;
        }

        let total = self.workout.total_sets();
        let passed = self.workout.exercises[..self.exercise_idx]
            .iter()
            .fold(0_u32, |passed, e| passed.saturating_add(e.sets))
            .saturating_add(u32::try_from(self.set_idx).unwrap_or(u32::MAX));

        if total == 0 {
            0.0
        } else {
            passed as f32 / total as f32
        }
    }

    pub fn summary(&self, calories_per_minute: u32) -> Result<SessionSummary, SessionError> {
        if !self.is_completed() {
            return Err(SessionError::NotCompleted);
        }

        let minutes = self.elapsed.div_ceil(60);

        Ok(SessionSummary {
            elapsed: self.elapsed,
            minutes,
            calories: minutes.saturating_mul(calories_per_minute),
            completed_exercises: self.completed_exercises.iter().filter(|c| **c).count(),
            total_exercises: self.workout.exercises.len(),
            completed_sets: self
                .completed_sets
                .iter()
                .fold(0, |total, sets| total.saturating_add(*sets)),
        })
    }

    #[must_use]
    pub fn workout(&self) -> &Workout {
        &self.workout
    }

    #[must_use]
    pub fn config(&self) -> SessionConfig {
        self.config
    }

    #[must_use]
    pub fn exercise_idx(&self) -> usize {
        self.exercise_idx
    }

    #[must_use]
    pub fn set_idx(&self) -> usize {
        self.set_idx
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Remaining seconds of the current countdown.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Seconds the session has been running, pauses excluded.
    #[must_use]
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == Status::Completed
    }

    #[must_use]
    pub fn current_exercise(&self) -> &WorkoutExercise {
        &self.workout.exercises[self.exercise_idx]
    }

    #[must_use]
    pub fn next_exercise(&self) -> Option<&WorkoutExercise> {
        self.workout.exercises.get(self.exercise_idx + 1)
    }

    /// Number of completed sets per exercise.
    #[must_use]
    pub fn completed_sets(&self) -> &[u32] {
        &self.completed_sets
    }

    #[must_use]
    pub fn completed_exercises(&self) -> &[bool] {
        &self.completed_exercises
    }

    fn advance(&mut self, completed: bool) -> Transition {
        debug_assert!(self.exercise_idx < self.workout.exercises.len());
        debug_assert!(self.set_idx < self.workout.exercises[self.exercise_idx].sets as usize);

        let WorkoutExercise { sets, rest, .. } = self.workout.exercises[self.exercise_idx];

        if self.phase == Phase::Resting {
            self.work();
            return Transition::Work;
        }

        if completed {
            self.completed_sets[self.exercise_idx] += 1;
        }

        if self.set_idx + 1 < sets as usize {
            self.set_idx += 1;
            return if rest > 0 {
                self.rest(rest);
                Transition::Rest
            } else {
                self.work();
                Transition::Work
            };
        }

        if completed {
            self.completed_exercises[self.exercise_idx] = true;
        }

        if self.exercise_idx + 1 < self.workout.exercises.len() {
            self.exercise_idx += 1;
            self.set_idx = 0;
            if self.config.rest_between_exercises && rest > 0 {
                self.rest(rest);
            } else {
                self.work();
            }
            return Transition::NextExercise;
        }

        self.status = Status::Completed;
        self.remaining = 0;
        debug!(
            "completed session of workout {} in {} s",
            *self.workout.id, self.elapsed
        );
        Transition::Completed
    }

    fn work(&mut self) {
        self.phase = Phase::Working;
        self.remaining = self.workout.exercises[self.exercise_idx].set_time();
    }

    fn rest(&mut self, seconds: u32) {
        self.phase = Phase::Resting;
        self.remaining = seconds;
    }
}

/// Serialisable state of a session, used to resume it later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub exercise_idx: usize,
    pub set_idx: usize,
    pub phase: Phase,
    pub remaining: u32,
    pub paused: bool,
    pub elapsed: u32,
    pub completed_sets: Vec<u32>,
    pub completed_exercises: Vec<bool>,
    pub status: Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    /// Seconds.
    pub elapsed: u32,
    /// Elapsed time rounded up to full minutes.
    pub minutes: u32,
    pub calories: u32,
    pub completed_exercises: usize,
    pub total_exercises: usize,
    pub completed_sets: u32,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    InvalidWorkout(#[from] WorkoutError),
    #[error("Session is already completed")]
    Completed,
    #[error("Session is not completed")]
    NotCompleted,
    #[error("Session state does not match workout")]
    InvalidSnapshot,
}
