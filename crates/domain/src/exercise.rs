use std::{
    collections::{BTreeSet, HashSet},
    fmt,
    slice::Iter,
};

use derive_more::Deref;
use uuid::Uuid;

use crate::Name;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub name: Name,
    pub description: String,
    pub muscle_groups: BTreeSet<MuscleGroup>,
    pub difficulty: Difficulty,
    /// Fixed duration in seconds for timed moves.
    pub duration: Option<u32>,
    pub instructions: String,
    pub modifications: Modifications,
}

impl Exercise {
    #[must_use]
    pub fn targets(&self, muscle_groups: &BTreeSet<MuscleGroup>) -> bool {
        muscle_groups.contains(&MuscleGroup::FullBody)
            || self
                .muscle_groups
                .iter()
                .any(|group| muscle_groups.contains(group))
    }

    #[must_use]
    pub fn is_timed(&self) -> bool {
        self.duration.is_some()
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Modifications {
    pub easier: Option<String>,
    pub harder: Option<String>,
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseID(Uuid);

impl ExerciseID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for ExerciseID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ExerciseID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum MuscleGroup {
    FullBody,
    Abs,
    Legs,
    Arms,
    Chest,
    Back,
    Shoulders,
}

impl Property for MuscleGroup {
    fn iter() -> Iter<'static, MuscleGroup> {
        static MUSCLE_GROUPS: [MuscleGroup; 7] = [
            MuscleGroup::FullBody,
            MuscleGroup::Abs,
            MuscleGroup::Legs,
            MuscleGroup::Arms,
            MuscleGroup::Chest,
            MuscleGroup::Back,
            MuscleGroup::Shoulders,
        ];
        MUSCLE_GROUPS.iter()
    }

    fn name(self) -> &'static str {
        match self {
            MuscleGroup::FullBody => "Full Body",
            MuscleGroup::Abs => "Abs",
            MuscleGroup::Legs => "Legs",
            MuscleGroup::Arms => "Arms",
            MuscleGroup::Chest => "Chest",
            MuscleGroup::Back => "Back",
            MuscleGroup::Shoulders => "Shoulders",
        }
    }
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                MuscleGroup::FullBody => "full-body",
                MuscleGroup::Abs => "abs",
                MuscleGroup::Legs => "legs",
                MuscleGroup::Arms => "arms",
                MuscleGroup::Chest => "chest",
                MuscleGroup::Back => "back",
                MuscleGroup::Shoulders => "shoulders",
            }
        )
    }
}

impl TryFrom<&str> for MuscleGroup {
    type Error = MuscleGroupError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        MuscleGroup::iter()
            .find(|group| group.to_string() == value)
            .copied()
            .ok_or_else(|| MuscleGroupError::Invalid(value.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum MuscleGroupError {
    #[error("Invalid muscle group: {0}")]
    Invalid(String),
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// The next easier tier, if any.
    #[must_use]
    pub fn lower(self) -> Option<Difficulty> {
        match self {
            Difficulty::Beginner => None,
            Difficulty::Intermediate => Some(Difficulty::Beginner),
            Difficulty::Advanced => Some(Difficulty::Intermediate),
        }
    }
}

impl Property for Difficulty {
    fn iter() -> Iter<'static, Difficulty> {
        static DIFFICULTY: [Difficulty; 3] = [
            Difficulty::Beginner,
            Difficulty::Intermediate,
            Difficulty::Advanced,
        ];
        DIFFICULTY.iter()
    }

    fn name(self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name().to_lowercase())
    }
}

impl TryFrom<&str> for Difficulty {
    type Error = DifficultyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Difficulty::iter()
            .find(|difficulty| difficulty.to_string() == value)
            .copied()
            .ok_or_else(|| DifficultyError::Invalid(value.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum DifficultyError {
    #[error("Invalid difficulty: {0}")]
    Invalid(String),
}

#[derive(Default, PartialEq)]
pub struct ExerciseFilter {
    pub text: String,
    pub muscle_groups: HashSet<MuscleGroup>,
    pub difficulties: HashSet<Difficulty>,
}

impl ExerciseFilter {
    #[must_use]
    pub fn exercises<'a>(
        &self,
        exercises: impl Iterator<Item = &'a Exercise>,
    ) -> Vec<&'a Exercise> {
        let text = self.text.trim().to_lowercase();
        exercises
            .filter(|e| {
                (e.name.as_ref().to_lowercase().contains(&text)
                    || e.description.to_lowercase().contains(&text))
                    && (self.muscle_groups.is_empty()
                        || self.muscle_groups.contains(&MuscleGroup::FullBody)
                        || e.muscle_groups
                            .iter()
                            .any(|m| self.muscle_groups.contains(m)))
                    && (self.difficulties.is_empty() || self.difficulties.contains(&e.difficulty))
            })
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.muscle_groups.is_empty() && self.difficulties.is_empty()
    }

    #[must_use]
    pub fn muscle_group_list(&self) -> Vec<(MuscleGroup, bool)> {
        MuscleGroup::iter()
            .map(|m| (*m, self.muscle_groups.contains(m)))
            .collect::<Vec<_>>()
    }

    #[must_use]
    pub fn difficulty_list(&self) -> Vec<(Difficulty, bool)> {
        Difficulty::iter()
            .map(|d| (*d, self.difficulties.contains(d)))
            .collect::<Vec<_>>()
    }

    pub fn toggle_muscle_group(&mut self, muscle_group: MuscleGroup) {
        if self.muscle_groups.contains(&muscle_group) {
            self.muscle_groups.remove(&muscle_group);
        } else {
            if muscle_group == MuscleGroup::FullBody {
                self.muscle_groups.clear();
            } else {
                self.muscle_groups.remove(&MuscleGroup::FullBody);
            }
            self.muscle_groups.insert(muscle_group);
        }
    }

    pub fn toggle_difficulty(&mut self, difficulty: Difficulty) {
        if self.difficulties.contains(&difficulty) {
            self.difficulties.remove(&difficulty);
        } else {
            self.difficulties.insert(difficulty);
        }
    }
}

pub trait Property: Clone + Copy + Sized {
    fn iter() -> Iter<'static, Self>;
    fn name(self) -> &'static str;
}
