use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};

use crate::{ExerciseID, WorkoutLog};

/// Aggregated figures over the workout history of a user.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WorkoutStats {
    pub total_workouts: usize,
    pub total_exercises: usize,
    pub total_minutes: u32,
    pub total_calories: u32,
    /// Number of workouts per weekday, starting with Monday.
    pub workouts_by_weekday: [u32; 7],
    /// Most frequently completed exercise and its count.
    pub favorite_exercise: Option<(ExerciseID, u32)>,
    /// Consecutive workout days up to the last workout day.
    pub current_streak: u32,
    pub longest_streak: u32,
}

impl WorkoutStats {
    #[must_use]
    pub fn new(logs: &[WorkoutLog]) -> Self {
        let mut stats = WorkoutStats {
            total_workouts: logs.len(),
            ..WorkoutStats::default()
        };
        let mut exercise_counts: BTreeMap<ExerciseID, u32> = BTreeMap::new();

        for log in logs {
            stats.total_minutes = stats.total_minutes.saturating_add(log.minutes());
            stats.total_calories = stats.total_calories.saturating_add(log.calories);
            stats.total_exercises += log.exercises.len();
            stats.workouts_by_weekday[log.date().weekday().num_days_from_monday() as usize] += 1;

            for exercise_id in log.completed_exercises() {
                *exercise_counts.entry(exercise_id).or_default() += 1;
            }
        }

        // Ties are resolved in favor of the lowest ID.
        stats.favorite_exercise = exercise_counts
            .into_iter()
            .rev()
            .max_by_key(|(_, count)| *count);

        let days = logs.iter().map(WorkoutLog::date).collect::<BTreeSet<_>>();
        let streaks = streaks(&days);
        stats.current_streak = streaks.last().copied().unwrap_or_default();
        stats.longest_streak = streaks.iter().copied().max().unwrap_or_default();

        stats
    }

    #[must_use]
    pub fn average_minutes(&self) -> Option<f32> {
        if self.total_workouts == 0 {
            None
        } else {
            #[allow(clippy::cast_precision_loss)]
            Some(self.total_minutes as f32 / self.total_workouts as f32)
        }
    }
}

/// Lengths of the runs of consecutive days in chronological order.
fn streaks(days: &BTreeSet<NaiveDate>) -> Vec<u32> {
    let mut result: Vec<u32> = vec![];
    let mut previous: Option<NaiveDate> = None;

    for day in days {
        match (previous, result.last_mut()) {
            (Some(p), Some(length)) if p.succ_opt() == Some(*day) => *length += 1,
            _ => result.push(1),
        }
        previous = Some(*day);
    }

    result
}
