use std::collections::BTreeSet;

use crate::{
    Difficulty, Exercise, ExerciseFilter, ExerciseID, Modifications, MuscleGroup, Name,
};

/// Read-only source of exercises.
pub trait ExerciseCatalog {
    fn exercises(&self) -> &[Exercise];

    fn exercise(&self, id: ExerciseID) -> Option<&Exercise> {
        self.exercises().iter().find(|e| e.id == id)
    }

    fn filter(&self, filter: &ExerciseFilter) -> Vec<&Exercise> {
        filter.exercises(self.exercises().iter())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    exercises: Vec<Exercise>,
}

impl Catalog {
    #[must_use]
    pub fn new(exercises: Vec<Exercise>) -> Self {
        Self { exercises }
    }

    /// The bundled bodyweight exercise library.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(EXERCISES.clone())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }
}

impl ExerciseCatalog for Catalog {
    fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }
}

struct Entry {
    id: u128,
    name: &'static str,
    description: &'static str,
    muscle_groups: &'static [MuscleGroup],
    difficulty: Difficulty,
    duration: Option<u32>,
    instructions: &'static str,
    easier: Option<&'static str>,
    harder: Option<&'static str>,
}

impl Entry {
    const fn default() -> Self {
        Self {
            id: 0,
            name: "",
            description: "",
            muscle_groups: &[],
            difficulty: Difficulty::Beginner,
            duration: None,
            instructions: "",
            easier: None,
            harder: None,
        }
    }
}

pub(crate) static EXERCISES: std::sync::LazyLock<Vec<Exercise>> = std::sync::LazyLock::new(|| {
    ENTRIES
        .iter()
        .filter_map(|e| {
            Some(Exercise {
                id: e.id.into(),
                name: Name::new(e.name).ok()?,
                description: e.description.to_string(),
                muscle_groups: e.muscle_groups.iter().copied().collect::<BTreeSet<_>>(),
                difficulty: e.difficulty,
                duration: e.duration,
                instructions: e.instructions.to_string(),
                modifications: Modifications {
                    easier: e.easier.map(str::to_string),
                    harder: e.harder.map(str::to_string),
                },
            })
        })
        .collect()
});

static ENTRIES: [Entry; 25] = [
    Entry {
        id: 1,
        name: "Incline Push-ups",
        description: "Push-up variation with the hands on an elevated surface.",
        muscle_groups: &[MuscleGroup::Chest, MuscleGroup::Arms],
        instructions: "Place your hands on a bench or step. Keep your body straight while lowering your chest to the edge, then push back up.",
        harder: Some("Push-ups"),
        ..Entry::default()
    },
    Entry {
        id: 2,
        name: "Arm Circles",
        description: "Shoulder warm-up with small to large circles.",
        muscle_groups: &[MuscleGroup::Shoulders],
        duration: Some(30),
        instructions: "Extend your arms at shoulder height and draw circles, gradually increasing their size.",
        ..Entry::default()
    },
    Entry {
        id: 3,
        name: "Bodyweight Squats",
        description: "Basic squat without additional load.",
        muscle_groups: &[MuscleGroup::Legs],
        instructions: "Stand with feet shoulder-width apart. Lower your hips back and down until your thighs are parallel to the floor, then stand up.",
        easier: Some("Squat to a chair"),
        harder: Some("Jump Squats"),
        ..Entry::default()
    },
    Entry {
        id: 4,
        name: "Glute Bridges",
        description: "Hip extension lying on the back.",
        muscle_groups: &[MuscleGroup::Legs, MuscleGroup::Back],
        instructions: "Lie on your back with bent knees. Drive through your heels to lift your hips, squeeze at the top and lower slowly.",
        harder: Some("Single-leg glute bridges"),
        ..Entry::default()
    },
    Entry {
        id: 5,
        name: "Plank",
        description: "Static hold on forearms and toes.",
        muscle_groups: &[MuscleGroup::Abs],
        duration: Some(30),
        instructions: "Rest on your forearms and toes, keep your body in a straight line and brace your core.",
        easier: Some("Knee plank"),
        harder: Some("Hollow Body Hold"),
        ..Entry::default()
    },
    Entry {
        id: 6,
        name: "Wall Sit",
        description: "Static squat against a wall.",
        muscle_groups: &[MuscleGroup::Legs],
        duration: Some(30),
        instructions: "Lean against a wall and slide down until your knees are at a right angle. Hold the position.",
        ..Entry::default()
    },
    Entry {
        id: 7,
        name: "Superman Hold",
        description: "Static back extension lying face down.",
        muscle_groups: &[MuscleGroup::Back],
        duration: Some(20),
        instructions: "Lie face down, lift your arms, chest and legs off the floor and hold.",
        ..Entry::default()
    },
    Entry {
        id: 8,
        name: "Jumping Jacks",
        description: "Classic full body warm-up.",
        muscle_groups: &[MuscleGroup::FullBody],
        duration: Some(30),
        instructions: "Jump your feet out while raising your arms overhead, then jump back to the starting position.",
        easier: Some("Step jacks"),
        ..Entry::default()
    },
    Entry {
        id: 9,
        name: "Dead Bug",
        description: "Core stability exercise lying on the back.",
        muscle_groups: &[MuscleGroup::Abs],
        instructions: "Lie on your back with arms up and knees bent. Lower the opposite arm and leg while keeping your lower back on the floor.",
        ..Entry::default()
    },
    Entry {
        id: 10,
        name: "Wall Push-ups",
        description: "Standing push-up against a wall.",
        muscle_groups: &[MuscleGroup::Chest, MuscleGroup::Arms, MuscleGroup::Shoulders],
        instructions: "Stand an arm's length from a wall, place your palms on it and bend your elbows to bring your chest to the wall.",
        harder: Some("Incline Push-ups"),
        ..Entry::default()
    },
    Entry {
        id: 11,
        name: "Push-ups",
        description: "Standard push-up from the floor.",
        muscle_groups: &[MuscleGroup::Chest, MuscleGroup::Arms, MuscleGroup::Shoulders],
        difficulty: Difficulty::Intermediate,
        instructions: "Start in a plank with hands shoulder-width apart. Lower until your chest nearly touches the floor, then push back up.",
        easier: Some("Incline Push-ups"),
        harder: Some("Diamond Push-ups"),
        ..Entry::default()
    },
    Entry {
        id: 12,
        name: "Pike Push-ups",
        description: "Push-up in an inverted V position.",
        muscle_groups: &[MuscleGroup::Shoulders, MuscleGroup::Arms],
        difficulty: Difficulty::Intermediate,
        instructions: "Form an inverted V with your body. Lower your head towards the floor and push back up.",
        harder: Some("Handstand Push-ups"),
        ..Entry::default()
    },
    Entry {
        id: 13,
        name: "Triceps Dips",
        description: "Dips using a chair or bench.",
        muscle_groups: &[MuscleGroup::Arms, MuscleGroup::Chest],
        difficulty: Difficulty::Intermediate,
        instructions: "Place your hands on the edge of a chair, lower your body by bending the elbows and push back up.",
        ..Entry::default()
    },
    Entry {
        id: 14,
        name: "Reverse Lunges",
        description: "Alternating lunges stepping backwards.",
        muscle_groups: &[MuscleGroup::Legs],
        difficulty: Difficulty::Intermediate,
        instructions: "Step back with one leg and lower until both knees are bent at a right angle. Return and switch sides.",
        ..Entry::default()
    },
    Entry {
        id: 15,
        name: "Mountain Climbers",
        description: "Running knees to chest in a plank.",
        muscle_groups: &[MuscleGroup::Abs, MuscleGroup::FullBody],
        difficulty: Difficulty::Intermediate,
        duration: Some(30),
        instructions: "From a high plank, drive your knees towards your chest in quick alternation.",
        ..Entry::default()
    },
    Entry {
        id: 16,
        name: "Bicycle Crunches",
        description: "Alternating elbow to knee crunches.",
        muscle_groups: &[MuscleGroup::Abs],
        difficulty: Difficulty::Intermediate,
        instructions: "Lie on your back, lift your shoulders and bring the opposite elbow to the knee while extending the other leg.",
        ..Entry::default()
    },
    Entry {
        id: 17,
        name: "Burpees",
        description: "Squat thrust with a jump.",
        muscle_groups: &[MuscleGroup::FullBody],
        difficulty: Difficulty::Intermediate,
        instructions: "Drop into a squat, kick your feet back into a plank, return and jump up with your arms overhead.",
        easier: Some("Step-back burpees"),
        ..Entry::default()
    },
    Entry {
        id: 18,
        name: "Reverse Snow Angels",
        description: "Arm sweeps lying face down.",
        muscle_groups: &[MuscleGroup::Back, MuscleGroup::Shoulders],
        difficulty: Difficulty::Intermediate,
        instructions: "Lie face down with arms by your sides. Lift your chest slightly and sweep your arms overhead and back.",
        ..Entry::default()
    },
    Entry {
        id: 19,
        name: "Diamond Push-ups",
        description: "Push-up with the hands close together.",
        muscle_groups: &[MuscleGroup::Arms, MuscleGroup::Chest],
        difficulty: Difficulty::Advanced,
        instructions: "Form a diamond with your hands under your chest and keep your elbows close while lowering and pushing up.",
        easier: Some("Push-ups"),
        ..Entry::default()
    },
    Entry {
        id: 20,
        name: "Handstand Push-ups",
        description: "Vertical push-up against a wall.",
        muscle_groups: &[MuscleGroup::Shoulders, MuscleGroup::Arms],
        difficulty: Difficulty::Advanced,
        instructions: "Kick up into a handstand against a wall, lower your head towards the floor and press back up.",
        easier: Some("Pike Push-ups"),
        ..Entry::default()
    },
    Entry {
        id: 21,
        name: "Pistol Squats",
        description: "Single-leg squat.",
        muscle_groups: &[MuscleGroup::Legs],
        difficulty: Difficulty::Advanced,
        instructions: "Stand on one leg with the other extended forward, squat down as low as possible and stand back up.",
        easier: Some("Reverse Lunges"),
        ..Entry::default()
    },
    Entry {
        id: 22,
        name: "Jump Squats",
        description: "Explosive squat with a jump.",
        muscle_groups: &[MuscleGroup::Legs, MuscleGroup::FullBody],
        difficulty: Difficulty::Advanced,
        instructions: "Lower into a squat and jump as high as possible. Land softly and go straight into the next repetition.",
        easier: Some("Bodyweight Squats"),
        ..Entry::default()
    },
    Entry {
        id: 23,
        name: "V-ups",
        description: "Simultaneous leg and torso raise.",
        muscle_groups: &[MuscleGroup::Abs],
        difficulty: Difficulty::Advanced,
        instructions: "Lie flat, then raise your legs and torso at the same time to touch your toes. Lower with control.",
        ..Entry::default()
    },
    Entry {
        id: 24,
        name: "Archer Push-ups",
        description: "Wide push-up shifting the weight to one arm.",
        muscle_groups: &[MuscleGroup::Chest, MuscleGroup::Arms, MuscleGroup::Back],
        difficulty: Difficulty::Advanced,
        instructions: "With hands wide, lower towards one hand while the other arm stays straight. Alternate sides.",
        ..Entry::default()
    },
    Entry {
        id: 25,
        name: "Hollow Body Hold",
        description: "Gymnastic core hold.",
        muscle_groups: &[MuscleGroup::Abs],
        difficulty: Difficulty::Advanced,
        duration: Some(30),
        instructions: "Lie on your back, press your lower back into the floor and lift arms and legs into a shallow banana shape.",
        easier: Some("Plank"),
        ..Entry::default()
    },
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;

    use crate::Property;

    use super::*;

    #[test]
    fn test_builtin_catalog_complete() {
        assert_eq!(Catalog::builtin().len(), ENTRIES.len());
    }

    #[test]
    fn test_builtin_catalog_unique() {
        let catalog = Catalog::builtin();
        let ids = catalog.exercises().iter().map(|e| e.id).collect::<HashSet<_>>();
        let names = catalog
            .exercises()
            .iter()
            .map(|e| e.name.clone())
            .collect::<HashSet<_>>();
        assert_eq!(ids.len(), catalog.len());
        assert_eq!(names.len(), catalog.len());
    }

    #[test]
    fn test_builtin_catalog_coverage() {
        let catalog = Catalog::builtin();
        for difficulty in Difficulty::iter() {
            assert!(
                catalog
                    .exercises()
                    .iter()
                    .filter(|e| e.difficulty == *difficulty)
                    .count()
                    >= 6,
                "{difficulty}"
            );
        }
        for group in MuscleGroup::iter() {
            assert!(
                catalog
                    .exercises()
                    .iter()
                    .any(|e| e.muscle_groups.contains(group)),
                "{group}"
            );
        }
        assert!(catalog.exercises().iter().all(|e| !e.muscle_groups.is_empty()));
        assert!(catalog.exercises().iter().all(|e| e.duration != Some(0)));
    }

    #[test]
    fn test_catalog_exercise() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.exercise(11.into()).map(|e| e.name.to_string()),
            Some("Push-ups".to_string())
        );
        assert_eq!(catalog.exercise(999.into()), None);
    }

    #[test]
    fn test_catalog_filter() {
        let catalog = Catalog::builtin();
        let filter = ExerciseFilter {
            text: "push-ups".to_string(),
            difficulties: HashSet::from([Difficulty::Advanced]),
            ..ExerciseFilter::default()
        };
        assert_eq!(
            catalog
                .filter(&filter)
                .iter()
                .map(|e| e.name.to_string())
                .collect::<Vec<_>>(),
            vec!["Diamond Push-ups", "Handstand Push-ups", "Archer Push-ups"]
        );
    }

    #[test]
    fn test_catalog_empty() {
        let catalog = Catalog::default();
        assert!(catalog.is_empty());
        assert!(catalog.filter(&ExerciseFilter::default()).is_empty());
    }
}
