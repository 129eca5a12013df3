use repfit_domain::{ReadError, SessionConfig, UpdateError, WorkoutDuration};
use serde::{Deserialize, Deserializer, Serialize, de::Error};

pub const MAX_CALORIES_PER_MINUTE: u32 = 100;

#[allow(async_fn_in_trait)]
pub trait SettingsService {
    async fn get_settings(&self) -> Result<Settings, ReadError>;
    async fn set_settings(&self, settings: Settings) -> Result<(), UpdateError>;
}

/// Storage of the settings, returning the defaults if nothing was stored yet.
#[allow(async_fn_in_trait)]
pub trait SettingsRepository {
    async fn read_settings(&self) -> Result<Settings, ReadError>;
    async fn write_settings(&self, settings: Settings) -> Result<(), UpdateError>;
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub beep_volume: u8,
    pub notifications: bool,
    pub rest_between_exercises: bool,
    /// Used to estimate the calories of a workout.
    #[serde(deserialize_with = "deserialize_calories_per_minute")]
    pub calories_per_minute: u32,
    #[serde(with = "minutes")]
    pub workout_duration: WorkoutDuration,
}

impl Settings {
    #[must_use]
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            rest_between_exercises: self.rest_between_exercises,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            beep_volume: 80,
            notifications: false,
            rest_between_exercises: false,
            calories_per_minute: 8,
            workout_duration: WorkoutDuration::default(),
        }
    }
}

fn deserialize_calories_per_minute<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<u32, D::Error> {
    let value = u32::deserialize(deserializer)?;
    if value > MAX_CALORIES_PER_MINUTE {
        return Err(D::Error::custom(format!(
            "Calories per minute must not exceed {MAX_CALORIES_PER_MINUTE}"
        )));
    }
    Ok(value)
}

mod minutes {
    use repfit_domain::WorkoutDuration;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(
        duration: &WorkoutDuration,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(duration.minutes())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<WorkoutDuration, D::Error> {
        WorkoutDuration::try_from(u32::deserialize(deserializer)?).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();

        assert_eq!(settings.calories_per_minute, 8);
        assert_eq!(settings.workout_duration, WorkoutDuration::Twenty);
        assert_eq!(settings.session_config(), SessionConfig::default());
    }

    #[test]
    fn test_settings_session_config() {
        assert_eq!(
            Settings {
                rest_between_exercises: true,
                ..Settings::default()
            }
            .session_config(),
            SessionConfig {
                rest_between_exercises: true
            }
        );
    }

    #[test]
    fn test_settings_serde() {
        let settings = Settings {
            beep_volume: 50,
            notifications: true,
            rest_between_exercises: true,
            calories_per_minute: 10,
            workout_duration: WorkoutDuration::FortyFive,
        };
        let value = json!({
            "beep_volume": 50,
            "notifications": true,
            "rest_between_exercises": true,
            "calories_per_minute": 10,
            "workout_duration": 45,
        });

        assert_eq!(serde_json::to_value(settings).unwrap(), value);
        assert_eq!(serde_json::from_value::<Settings>(value).unwrap(), settings);
    }

    #[test]
    fn test_settings_deserialize_missing_fields() {
        assert_eq!(
            serde_json::from_value::<Settings>(json!({ "beep_volume": 20 })).unwrap(),
            Settings {
                beep_volume: 20,
                ..Settings::default()
            }
        );
    }

    #[rstest]
    #[case(100, true)]
    #[case(101, false)]
    #[case(4_000_000_000, false)]
    fn test_settings_deserialize_calories_per_minute(#[case] value: u32, #[case] valid: bool) {
        let result = serde_json::from_value::<Settings>(json!({ "calories_per_minute": value }));

        if valid {
            assert_eq!(result.unwrap().calories_per_minute, value);
        } else {
            assert_eq!(
                result.unwrap_err().to_string(),
                "Calories per minute must not exceed 100"
            );
        }
    }

    #[rstest]
    #[case(15)]
    #[case(0)]
    fn test_settings_deserialize_invalid_duration(#[case] minutes: u32) {
        let error =
            serde_json::from_value::<Settings>(json!({ "workout_duration": minutes })).unwrap_err();

        assert_eq!(
            error.to_string(),
            format!("Unsupported workout duration: {minutes} min")
        );
    }
}
