use chrono::Utc;
use log::debug;
use rand::Rng;

use crate::{
    AgeGroup, Difficulty, Exercise, ExerciseCatalog, Name, NameError, Property, Workout,
    WorkoutExercise, WorkoutID, WorkoutKind, WorkoutPreferences,
};

/// Below this pool size the next-lower difficulty tier is added.
const MIN_POOL_SIZE_PER_TIER: usize = 5;
/// Below this pool size matching exercises of any difficulty are added.
const MIN_POOL_SIZE: usize = 4;

/// Sets, reps and rest assigned to every exercise of a generated workout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prescription {
    pub sets: u32,
    pub reps: u32,
    pub rest: u32,
}

impl Prescription {
    #[must_use]
    pub fn new(difficulty: Difficulty, age_group: AgeGroup) -> Self {
        let (mut sets, mut reps, mut rest): (u32, u32, u32) = match difficulty {
            Difficulty::Beginner => (2, 8, 45),
            Difficulty::Intermediate => (3, 10, 30),
            Difficulty::Advanced => (4, 12, 20),
        };

        match age_group {
            AgeGroup::Senior => {
                sets = sets.saturating_sub(1).max(2);
                reps = reps.saturating_sub(2).max(6);
                rest += 15;
            }
            AgeGroup::Teen => {
                if difficulty == Difficulty::Advanced {
                    sets = sets.min(3);
                }
            }
            AgeGroup::Adult => {}
        }

        Self { sets, reps, rest }
    }
}

pub struct Generator<'a, C: ?Sized> {
    catalog: &'a C,
}

impl<'a, C: ExerciseCatalog + ?Sized> Generator<'a, C> {
    pub fn new(catalog: &'a C) -> Self {
        Self { catalog }
    }

    /// Builds a workout from a random selection of matching exercises.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        preferences: &WorkoutPreferences,
        rng: &mut R,
    ) -> Result<Workout, GenerateError> {
        let mut pool = self.pool(preferences);
        let mut selected = self
            .catalog
            .exercises()
            .iter()
            .filter(|e| {
                preferences.included_exercises.contains(&e.id)
                    && !preferences.excluded_exercises.contains(&e.id)
            })
            .collect::<Vec<_>>();
        pool.retain(|e| !selected.iter().any(|s| s.id == e.id));

        let count = preferences
            .duration
            .exercise_count()
            .min(pool.len() + selected.len());
        selected.truncate(count);

        while selected.len() < count && !pool.is_empty() {
            selected.push(pool.remove(rng.gen_range(0..pool.len())));
        }

        if selected.is_empty() {
            return Err(GenerateError::NoMatchingExercises);
        }

        let prescription = Prescription::new(preferences.difficulty, preferences.age_group);
        let exercises = selected
            .iter()
            .map(|e| WorkoutExercise {
                exercise_id: e.id,
                sets: prescription.sets,
                reps: prescription.reps,
                duration: e.duration,
                rest: prescription.rest,
            })
            .collect::<Vec<_>>();

        let mut id = [0u8; 16];
        rng.fill(&mut id);

        debug!(
            "generated workout with {} of {} requested exercises",
            exercises.len(),
            preferences.duration.exercise_count()
        );

        Ok(Workout {
            id: WorkoutID::from(uuid::Builder::from_random_bytes(id).into_uuid()),
            name: Name::new(&name(preferences))?,
            description: description(preferences),
            exercises,
            duration: preferences.duration.minutes(),
            difficulty: preferences.difficulty,
            target_muscle_groups: preferences.target_muscle_groups().clone(),
            created_at: Utc::now(),
            kind: WorkoutKind::Generated,
        })
    }

    /// Exercises eligible for a workout with the given preferences.
    #[must_use]
    pub fn pool(&self, preferences: &WorkoutPreferences) -> Vec<&'a Exercise> {
        let available = self
            .catalog
            .exercises()
            .iter()
            .filter(|e| !preferences.excluded_exercises.contains(&e.id))
            .collect::<Vec<_>>();
        let target_muscle_groups = preferences.target_muscle_groups();

        let mut pool = available
            .iter()
            .filter(|e| e.difficulty == preferences.difficulty)
            .copied()
            .collect::<Vec<_>>();

        if pool.len() < MIN_POOL_SIZE_PER_TIER {
            if let Some(lower) = preferences.difficulty.lower() {
                pool.extend(available.iter().filter(|e| e.difficulty == lower));
            }
        }

        if !preferences.is_full_body() {
            pool.retain(|e| e.targets(target_muscle_groups));
        }

        if pool.len() < MIN_POOL_SIZE {
            let additional = available
                .iter()
                .filter(|e| e.targets(target_muscle_groups) && !pool.iter().any(|p| p.id == e.id))
                .copied()
                .collect::<Vec<_>>();
            pool.extend(additional);
        }

        pool
    }
}

fn muscle_group_names(preferences: &WorkoutPreferences) -> String {
    preferences
        .target_muscle_groups()
        .iter()
        .map(|m| m.name())
        .collect::<Vec<_>>()
        .join("/")
}

fn name(preferences: &WorkoutPreferences) -> String {
    let intensity = match preferences.difficulty {
        Difficulty::Beginner => "Essential",
        Difficulty::Intermediate => "Effective",
        Difficulty::Advanced => "Intense",
    };
    format!(
        "{intensity} {}-Minute {} Workout",
        preferences.duration.minutes(),
        muscle_group_names(preferences)
    )
}

fn description(preferences: &WorkoutPreferences) -> String {
    format!(
        "A {}-level workout designed for {}s, focusing on {} for {} minutes.",
        preferences.difficulty.name(),
        preferences.age_group.name(),
        if preferences.is_full_body() {
            "full body training".to_string()
        } else {
            muscle_group_names(preferences)
        },
        preferences.duration.minutes()
    )
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error("No exercises match the selected preferences")]
    NoMatchingExercises,
    #[error(transparent)]
    Name(#[from] NameError),
}
