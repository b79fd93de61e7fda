use serde::Deserialize;

use crate::error::ConfigError;

/// What happens to windows and doors when their host wall is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrphanPolicy {
    /// Openings stay in the plan with their geometry; their wall reference is cleared.
    #[default]
    Detach,
    /// Openings are deleted together with the wall.
    Cascade,
    /// The wall cannot be deleted while it hosts openings.
    Reject,
}

/// Tunable thresholds of the editing engine.
///
/// All distances are in internal plan units (1 unit = 10 mm).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Radius within which a point snaps onto an existing wall endpoint.
    pub snap_distance: f64,
    /// Radius within which a coordinate locks to a horizontal or vertical axis.
    pub axis_snap_distance: f64,
    /// Two clicks closer together than this (milliseconds) are a double click.
    pub double_click_ms: u64,
    /// Thickness given to newly drawn walls.
    pub wall_thickness: f64,
    /// Maximum pointer distance from a wall for a window or door to be placed on it.
    pub wall_hit_threshold: f64,
    pub window_half_length: f64,
    pub door_half_length: f64,
    /// Openings can never be resized below this length.
    pub min_opening_length: f64,
    /// Wall endpoints closer than this share one vertex.
    pub vertex_tolerance: f64,
    pub furniture_snap_threshold: f64,
    /// Clearance left between a snapped furniture edge and the wall.
    pub furniture_wall_gap: f64,
    /// Keep windows and doors entirely inside their host wall when placing or dragging.
    pub clip_openings_to_wall: bool,
    pub orphan_policy: OrphanPolicy,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            snap_distance: 20.0,
            axis_snap_distance: 15.0,
            double_click_ms: 300,
            wall_thickness: 10.0,
            wall_hit_threshold: 30.0,
            window_half_length: 100.0,
            door_half_length: 90.0,
            min_opening_length: 20.0,
            vertex_tolerance: 5.0,
            furniture_snap_threshold: 50.0,
            furniture_wall_gap: 10.0,
            clip_openings_to_wall: false,
            orphan_policy: OrphanPolicy::Detach,
        }
    }
}

impl EditorConfig {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed JSON and
    /// `ConfigError::Invalid` if a value fails [`EditorConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every threshold is usable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("snap_distance", self.snap_distance),
            ("axis_snap_distance", self.axis_snap_distance),
            ("wall_thickness", self.wall_thickness),
            ("wall_hit_threshold", self.wall_hit_threshold),
            ("window_half_length", self.window_half_length),
            ("door_half_length", self.door_half_length),
            ("min_opening_length", self.min_opening_length),
            ("vertex_tolerance", self.vertex_tolerance),
            ("furniture_snap_threshold", self.furniture_snap_threshold),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        if !self.furniture_wall_gap.is_finite() || self.furniture_wall_gap < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "furniture_wall_gap must not be negative, got {}",
                self.furniture_wall_gap
            )));
        }
        if self.vertex_tolerance >= self.snap_distance {
            return Err(ConfigError::Invalid(
                "vertex_tolerance must be smaller than snap_distance".to_owned(),
            ));
        }
        Ok(())
    }
}
