use std::{collections::BTreeSet, fmt, slice::Iter};

use crate::{Difficulty, ExerciseID, MuscleGroup, Property};

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum AgeGroup {
    Teen,
    #[default]
    Adult,
    Senior,
}

impl AgeGroup {
    #[must_use]
    pub fn from_age(age: u32) -> Self {
        match age {
            0..=17 => AgeGroup::Teen,
            18..=45 => AgeGroup::Adult,
            _ => AgeGroup::Senior,
        }
    }
}

impl Property for AgeGroup {
    fn iter() -> Iter<'static, AgeGroup> {
        static AGE_GROUP: [AgeGroup; 3] = [AgeGroup::Teen, AgeGroup::Adult, AgeGroup::Senior];
        AGE_GROUP.iter()
    }

    fn name(self) -> &'static str {
        match self {
            AgeGroup::Teen => "Teen",
            AgeGroup::Adult => "Adult",
            AgeGroup::Senior => "Senior",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name().to_lowercase())
    }
}

impl TryFrom<&str> for AgeGroup {
    type Error = PreferencesError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        AgeGroup::iter()
            .find(|age_group| age_group.to_string() == value)
            .copied()
            .ok_or_else(|| PreferencesError::InvalidAgeGroup(value.to_string()))
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum WorkoutDuration {
    Five,
    Ten,
    #[default]
    Twenty,
    Thirty,
    FortyFive,
}

impl WorkoutDuration {
    #[must_use]
    pub fn minutes(self) -> u32 {
        match self {
            WorkoutDuration::Five => 5,
            WorkoutDuration::Ten => 10,
            WorkoutDuration::Twenty => 20,
            WorkoutDuration::Thirty => 30,
            WorkoutDuration::FortyFive => 45,
        }
    }

    /// Number of exercises a generated workout of this length aims for.
    #[must_use]
    pub fn exercise_count(self) -> usize {
        match self {
            WorkoutDuration::Five => 4,
            WorkoutDuration::Ten => 6,
            WorkoutDuration::Twenty => 8,
            WorkoutDuration::Thirty => 10,
            WorkoutDuration::FortyFive => 12,
        }
    }
}

impl Property for WorkoutDuration {
    fn iter() -> Iter<'static, WorkoutDuration> {
        static DURATION: [WorkoutDuration; 5] = [
            WorkoutDuration::Five,
            WorkoutDuration::Ten,
            WorkoutDuration::Twenty,
            WorkoutDuration::Thirty,
            WorkoutDuration::FortyFive,
        ];
        DURATION.iter()
    }

    fn name(self) -> &'static str {
        match self {
            WorkoutDuration::Five => "5 min",
            WorkoutDuration::Ten => "10 min",
            WorkoutDuration::Twenty => "20 min",
            WorkoutDuration::Thirty => "30 min",
            WorkoutDuration::FortyFive => "45 min",
        }
    }
}

impl TryFrom<u32> for WorkoutDuration {
    type Error = PreferencesError;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        WorkoutDuration::iter()
            .find(|d| d.minutes() == minutes)
            .copied()
            .ok_or(PreferencesError::InvalidDuration(minutes))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutPreferences {
    pub duration: WorkoutDuration,
    pub difficulty: Difficulty,
    pub age_group: AgeGroup,
    target_muscle_groups: BTreeSet<MuscleGroup>,
    pub included_exercises: BTreeSet<ExerciseID>,
    pub excluded_exercises: BTreeSet<ExerciseID>,
}

impl WorkoutPreferences {
    /// A selection containing full body is reduced to exactly full body.
    pub fn new(
        duration: WorkoutDuration,
        difficulty: Difficulty,
        age_group: AgeGroup,
        target_muscle_groups: impl IntoIterator<Item = MuscleGroup>,
    ) -> Result<Self, PreferencesError> {
        let mut target_muscle_groups = target_muscle_groups.into_iter().collect::<BTreeSet<_>>();

        if target_muscle_groups.is_empty() {
            return Err(PreferencesError::EmptyMuscleGroups);
        }

        if target_muscle_groups.contains(&MuscleGroup::FullBody) {
            target_muscle_groups = BTreeSet::from([MuscleGroup::FullBody]);
        }

        Ok(Self {
            duration,
            difficulty,
            age_group,
            target_muscle_groups,
            included_exercises: BTreeSet::new(),
            excluded_exercises: BTreeSet::new(),
        })
    }

    #[must_use]
    pub fn with_included(mut self, ids: impl IntoIterator<Item = ExerciseID>) -> Self {
        self.included_exercises.extend(ids);
        self
    }

    #[must_use]
    pub fn with_excluded(mut self, ids: impl IntoIterator<Item = ExerciseID>) -> Self {
        self.excluded_exercises.extend(ids);
        self
    }

    #[must_use]
    pub fn target_muscle_groups(&self) -> &BTreeSet<MuscleGroup> {
        &self.target_muscle_groups
    }

    #[must_use]
    pub fn is_full_body(&self) -> bool {
        self.target_muscle_groups.contains(&MuscleGroup::FullBody)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PreferencesError {
    #[error("At least one target muscle group must be selected")]
    EmptyMuscleGroups,
    #[error("Unsupported workout duration: {0} min")]
    InvalidDuration(u32),
    #[error("Invalid age group: {0}")]
    InvalidAgeGroup(String),
}
