// Movement tuning for the locomotion state machine

use serde::Deserialize;

/// Movement settings - speeds, jump shape, and the timing windows that make
/// the controller feel forgiving instead of frame-perfect.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MovementSettings {
    /// Walk speed in units/second
    pub walk_speed: f32,
    /// Run speed in units/second (run modifier held)
    pub run_speed: f32,
    /// Apex height of a jump in units
    pub jump_height: f32,
    /// Gravity in units/second² (negative, pulls down)
    pub gravity: f32,
    /// Angular rate for turning toward the move direction
    pub rotation_speed: f32,

    /// Window during which an early jump press is remembered
    pub jump_buffer_time: f32,
    /// Grace window after leaving the ground during which a jump still succeeds
    pub coyote_time: f32,

    /// Fastest allowed fall speed (negative floor for vertical velocity)
    pub terminal_fall_speed: f32,
    /// Small downward velocity held while grounded so the ground probe stays
    /// engaged (never zero, never positive)
    pub grounded_stick_velocity: f32,

    /// Length of the disambiguation ray used when the primary and secondary
    /// ground probes disagree
    pub ground_check_distance: f32,
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            walk_speed: 2.0,
            run_speed: 5.0,
            jump_height: 2.0,
            gravity: -9.81,
            rotation_speed: 10.0,
            jump_buffer_time: 0.1,
            coyote_time: 0.15,
            terminal_fall_speed: -20.0,
            grounded_stick_velocity: -2.0,
            ground_check_distance: 0.2,
        }
    }
}

impl MovementSettings {
    /// Validate the configuration. A bad value here would not crash - it
    /// would silently produce a controller that cannot jump or never falls,
    /// which is worse. Fail setup instead.
    pub fn validate(&self) -> Result<(), String> {
        if self.walk_speed <= 0.0 || self.run_speed <= 0.0 {
            return Err(format!(
                "movement speeds must be > 0 (walk {}, run {})",
                self.walk_speed, self.run_speed
            ));
        }
        if self.jump_height <= 0.0 {
            return Err(format!("jump_height must be > 0, got {}", self.jump_height));
        }
        if self.gravity >= 0.0 {
            return Err(format!("gravity must be negative, got {}", self.gravity));
        }
        if self.jump_buffer_time < 0.0 || self.coyote_time < 0.0 {
            return Err(format!(
                "timing windows must be >= 0 (buffer {}, coyote {})",
                self.jump_buffer_time, self.coyote_time
            ));
        }
        if self.terminal_fall_speed >= 0.0 {
            return Err(format!(
                "terminal_fall_speed must be negative, got {}",
                self.terminal_fall_speed
            ));
        }
        if self.grounded_stick_velocity >= 0.0 {
            return Err(format!(
                "grounded_stick_velocity must be negative, got {}",
                self.grounded_stick_velocity
            ));
        }
        if self.ground_check_distance <= 0.0 {
            return Err(format!(
                "ground_check_distance must be > 0, got {}",
                self.ground_check_distance
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(MovementSettings::default().validate().is_ok());
    }

    #[test]
    fn test_positive_gravity_rejected() {
        let settings = MovementSettings {
            gravity: 9.81,
            ..MovementSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_zero_stick_velocity_rejected() {
        // Exactly zero would disengage the ground probe every other tick
        let settings = MovementSettings {
            grounded_stick_velocity: 0.0,
            ..MovementSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_negative_timing_window_rejected() {
        let settings = MovementSettings {
            coyote_time: -0.1,
            ..MovementSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_settings_from_toml() {
        let settings: MovementSettings = toml::from_str(
            r#"
            walk_speed = 3.0
            run_speed = 7.5
            "#,
        )
        .unwrap();
        assert_eq!(settings.walk_speed, 3.0);
        assert_eq!(settings.run_speed, 7.5);
        // Unspecified fields fall back to defaults
        assert_eq!(settings.gravity, -9.81);
    }
}
