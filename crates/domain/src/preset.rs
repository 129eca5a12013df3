use std::{collections::BTreeSet, sync::LazyLock};

use chrono::{DateTime, Weekday};

use crate::{
    AgeGroup, Difficulty, MuscleGroup, Name, Workout, WorkoutExercise, WorkoutID, WorkoutKind,
};

/// Read-only source of ready-made workouts.
pub trait PresetWorkouts {
    fn workouts(&self) -> &[Workout];
    fn plans(&self) -> &[PlannedWorkout];

    fn workout(&self, id: WorkoutID) -> Option<&Workout> {
        self.workouts()
            .iter()
            .chain(self.plans().iter().map(|p| &p.workout))
            .find(|w| w.id == id)
    }

    /// All preset workouts if no difficulty is given.
    fn workouts_by_difficulty(&self, difficulty: Option<Difficulty>) -> Vec<&Workout> {
        self.workouts()
            .iter()
            .filter(|w| difficulty.is_none_or(|d| w.difficulty == d))
            .collect()
    }

    /// Planned workouts of an age group, starting with Monday.
    fn weekly_plan(&self, age_group: AgeGroup) -> Vec<&PlannedWorkout> {
        let mut plan = self
            .plans()
            .iter()
            .filter(|p| p.age_group == age_group)
            .collect::<Vec<_>>();
        plan.sort_by_key(|p| p.weekday.num_days_from_monday());
        plan
    }

    fn planned_workout(&self, age_group: AgeGroup, weekday: Weekday) -> Option<&Workout> {
        self.plans()
            .iter()
            .find(|p| p.age_group == age_group && p.weekday == weekday)
            .map(|p| &p.workout)
    }
}

/// Workout scheduled for a weekday in the plan of an age group.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedWorkout {
    pub age_group: AgeGroup,
    pub weekday: Weekday,
    pub workout: Workout,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Presets {
    workouts: Vec<Workout>,
    plans: Vec<PlannedWorkout>,
}

impl Presets {
    #[must_use]
    pub fn new(workouts: Vec<Workout>, plans: Vec<PlannedWorkout>) -> Self {
        Self { workouts, plans }
    }

    /// The bundled preset workouts and weekly plans.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(WORKOUTS.clone(), PLANS.clone())
    }
}

impl PresetWorkouts for Presets {
    fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    fn plans(&self) -> &[PlannedWorkout] {
        &self.plans
    }
}

/// Exercise ID, sets, reps, set duration and rest.
type Line = (u128, u32, u32, Option<u32>, u32);

struct Entry {
    id: u128,
    name: &'static str,
    description: &'static str,
    difficulty: Difficulty,
    /// Minutes, estimated from the exercises if zero.
    duration: u32,
    muscle_groups: &'static [MuscleGroup],
    exercises: &'static [Line],
}

struct PlanEntry {
    age_group: AgeGroup,
    weekday: Weekday,
    workout: Entry,
}

// 2024-03-01T00:00:00Z
const CREATED_AT: i64 = 1_709_251_200;

fn workout(entry: &Entry) -> Option<Workout> {
    let mut workout = Workout {
        id: entry.id.into(),
        name: Name::new(entry.name).ok()?,
        description: entry.description.to_string(),
        exercises: entry
            .exercises
            .iter()
            .map(|(id, sets, reps, duration, rest)| WorkoutExercise {
                exercise_id: (*id).into(),
                sets: *sets,
                reps: *reps,
                duration: *duration,
                rest: *rest,
            })
            .collect(),
        duration: entry.duration,
        difficulty: entry.difficulty,
        target_muscle_groups: entry.muscle_groups.iter().copied().collect::<BTreeSet<_>>(),
        created_at: DateTime::from_timestamp(CREATED_AT, 0)?,
        kind: WorkoutKind::Preset,
    };
    if workout.duration == 0 {
        workout.duration = workout.estimated_duration();
    }
    Some(workout)
}

static WORKOUTS: LazyLock<Vec<Workout>> =
    LazyLock::new(|| WORKOUT_ENTRIES.iter().filter_map(workout).collect());

static PLANS: LazyLock<Vec<PlannedWorkout>> = LazyLock::new(|| {
    PLAN_ENTRIES
        .iter()
        .filter_map(|p| {
            Some(PlannedWorkout {
                age_group: p.age_group,
                weekday: p.weekday,
                workout: workout(&p.workout)?,
            })
        })
        .collect()
});

static WORKOUT_ENTRIES: [Entry; 6] = [
    Entry {
        id: 101,
        name: "Morning Energizer",
        description: "Start your day with this invigorating full-body workout that will boost your energy levels.",
        difficulty: Difficulty::Beginner,
        duration: 20,
        muscle_groups: &[MuscleGroup::FullBody],
        exercises: &[
            (8, 3, 0, Some(30), 30),
            (2, 2, 0, Some(30), 20),
            (3, 3, 15, None, 45),
            (4, 3, 12, None, 30),
        ],
    },
    Entry {
        id: 102,
        name: "Core Crusher",
        description: "An intense core workout focusing on building strength and definition in your midsection.",
        difficulty: Difficulty::Intermediate,
        duration: 30,
        muscle_groups: &[MuscleGroup::Abs],
        exercises: &[
            (5, 3, 0, Some(45), 45),
            (16, 3, 20, None, 30),
            (15, 3, 0, Some(30), 30),
            (9, 3, 12, None, 30),
        ],
    },
    Entry {
        id: 103,
        name: "Power Push",
        description: "Challenge yourself with this advanced upper body workout focusing on push exercises.",
        difficulty: Difficulty::Advanced,
        duration: 45,
        muscle_groups: &[MuscleGroup::Chest, MuscleGroup::Shoulders, MuscleGroup::Arms],
        exercises: &[
            (19, 4, 12, None, 60),
            (12, 4, 10, None, 60),
            (24, 3, 8, None, 60),
            (13, 4, 15, None, 45),
            (20, 3, 5, None, 90),
        ],
    },
    Entry {
        id: 104,
        name: "Leg Day Blast",
        description: "A challenging lower body workout to build strength and endurance in your legs.",
        difficulty: Difficulty::Intermediate,
        duration: 35,
        muscle_groups: &[MuscleGroup::Legs],
        exercises: &[
            (3, 4, 15, None, 45),
            (14, 4, 12, None, 45),
            (22, 3, 12, None, 60),
            (6, 3, 0, Some(45), 45),
            (4, 4, 20, None, 30),
        ],
    },
    Entry {
        id: 105,
        name: "Senior Mobility & Strength",
        description: "A gentle but effective workout to improve mobility and maintain strength.",
        difficulty: Difficulty::Beginner,
        duration: 25,
        muscle_groups: &[MuscleGroup::FullBody],
        exercises: &[
            (10, 2, 10, None, 60),
            (3, 2, 10, None, 60),
            (2, 2, 0, Some(30), 30),
            (4, 2, 10, None, 45),
        ],
    },
    Entry {
        id: 106,
        name: "Teen Fitness Fundamentals",
        description: "A fun workout to build strength and improve coordination.",
        difficulty: Difficulty::Beginner,
        duration: 30,
        muscle_groups: &[MuscleGroup::FullBody],
        exercises: &[
            (8, 3, 0, Some(30), 30),
            (1, 3, 10, None, 45),
            (3, 3, 15, None, 45),
            (5, 3, 0, Some(30), 30),
            (7, 3, 0, Some(20), 30),
        ],
    },
];

static PLAN_ENTRIES: [PlanEntry; 9] = [
    PlanEntry {
        age_group: AgeGroup::Teen,
        weekday: Weekday::Mon,
        workout: Entry {
            id: 201,
            name: "Teen Beginner Full Body",
            description: "A balanced full-body workout for teens new to fitness.",
            difficulty: Difficulty::Beginner,
            duration: 0,
            muscle_groups: &[MuscleGroup::FullBody],
            exercises: &[
                (8, 3, 0, Some(30), 30),
                (1, 3, 8, None, 60),
                (3, 3, 15, None, 60),
                (5, 3, 0, Some(30), 45),
                (4, 3, 15, None, 30),
            ],
        },
    },
    PlanEntry {
        age_group: AgeGroup::Teen,
        weekday: Weekday::Wed,
        workout: Entry {
            id: 202,
            name: "Teen Upper Body Focus",
            description: "Build upper body strength with bodyweight exercises.",
            difficulty: Difficulty::Beginner,
            duration: 0,
            muscle_groups: &[MuscleGroup::Chest, MuscleGroup::Arms, MuscleGroup::Shoulders],
            exercises: &[
                (1, 3, 12, None, 45),
                (13, 3, 10, None, 60),
                (2, 3, 0, Some(30), 30),
                (10, 3, 15, None, 45),
            ],
        },
    },
    PlanEntry {
        age_group: AgeGroup::Teen,
        weekday: Weekday::Fri,
        workout: Entry {
            id: 203,
            name: "Teen Core Strengthener",
            description: "Develop core strength and stability.",
            difficulty: Difficulty::Beginner,
            duration: 0,
            muscle_groups: &[MuscleGroup::Abs],
            exercises: &[
                (5, 3, 0, Some(30), 45),
                (16, 3, 20, None, 30),
                (9, 3, 12, None, 30),
                (7, 3, 0, Some(20), 30),
            ],
        },
    },
    PlanEntry {
        age_group: AgeGroup::Adult,
        weekday: Weekday::Mon,
        workout: Entry {
            id: 204,
            name: "Adult Full Body Circuit",
            description: "A comprehensive circuit to challenge your entire body.",
            difficulty: Difficulty::Intermediate,
            duration: 0,
            muscle_groups: &[MuscleGroup::FullBody],
            exercises: &[
                (17, 4, 10, None, 45),
                (11, 4, 15, None, 60),
                (22, 4, 15, None, 60),
                (15, 4, 0, Some(30), 45),
                (16, 4, 30, None, 45),
            ],
        },
    },
    PlanEntry {
        age_group: AgeGroup::Adult,
        weekday: Weekday::Wed,
        workout: Entry {
            id: 205,
            name: "Adult Upper Power",
            description: "Build upper body strength and definition.",
            difficulty: Difficulty::Intermediate,
            duration: 0,
            muscle_groups: &[MuscleGroup::Chest, MuscleGroup::Arms, MuscleGroup::Shoulders],
            exercises: &[
                (19, 4, 12, None, 60),
                (11, 4, 12, None, 60),
                (12, 4, 10, None, 60),
                (13, 4, 15, None, 45),
            ],
        },
    },
    PlanEntry {
        age_group: AgeGroup::Adult,
        weekday: Weekday::Fri,
        workout: Entry {
            id: 206,
            name: "Adult Lower Body Blast",
            description: "Strengthen your legs and glutes.",
            difficulty: Difficulty::Intermediate,
            duration: 0,
            muscle_groups: &[MuscleGroup::Legs],
            exercises: &[
                (22, 4, 15, None, 60),
                (14, 4, 12, None, 45),
                (4, 4, 20, None, 45),
                (6, 3, 0, Some(45), 60),
            ],
        },
    },
    PlanEntry {
        age_group: AgeGroup::Senior,
        weekday: Weekday::Mon,
        workout: Entry {
            id: 207,
            name: "Senior Mobility & Strength",
            description: "Gentle strength work for everyday movements.",
            difficulty: Difficulty::Beginner,
            duration: 0,
            muscle_groups: &[MuscleGroup::FullBody],
            exercises: &[
                (3, 2, 10, None, 60),
                (1, 2, 8, None, 60),
                (2, 2, 0, Some(30), 30),
                (4, 2, 10, None, 30),
            ],
        },
    },
    PlanEntry {
        age_group: AgeGroup::Senior,
        weekday: Weekday::Wed,
        workout: Entry {
            id: 208,
            name: "Senior Balance & Core",
            description: "Improve balance and core stability.",
            difficulty: Difficulty::Beginner,
            duration: 0,
            muscle_groups: &[MuscleGroup::Abs],
            exercises: &[
                (5, 2, 0, Some(20), 60),
                (9, 2, 8, None, 30),
                (7, 2, 0, Some(20), 30),
                (4, 2, 10, None, 30),
            ],
        },
    },
    PlanEntry {
        age_group: AgeGroup::Senior,
        weekday: Weekday::Fri,
        workout: Entry {
            id: 209,
            name: "Senior Joint Mobility",
            description: "Keep shoulders and back moving freely.",
            difficulty: Difficulty::Beginner,
            duration: 0,
            muscle_groups: &[MuscleGroup::Shoulders, MuscleGroup::Back],
            exercises: &[
                (2, 2, 0, Some(30), 30),
                (10, 2, 10, None, 30),
                (7, 2, 0, Some(15), 30),
                (18, 2, 8, None, 30),
            ],
        },
    },
];
