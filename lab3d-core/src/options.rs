//! Tunable camera and scene settings, loadable from TOML.
//!
//! Every field has a default matching the classic lab setup, so a partial
//! file only needs the values it overrides.

use std::path::Path;

use log::warn;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::camera::{MAX_ZOOM, MIN_ZOOM};
use crate::error::Lab3dError;

/// Camera placement and control parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraOptions {
    pub position: Point3<f32>,
    pub look_at: Point3<f32>,
    pub up: Vector3<f32>,
    /// World units per second.
    pub movement_speed: f32,
    /// Degrees of look per unit of mouse offset.
    pub mouse_sensitivity: f32,
    /// Degrees per second for keyboard rotation.
    pub rotation_speed: f32,
    /// Vertical field of view in degrees.
    pub zoom: f32,
    /// Near clipping plane distance.
    pub near: f32,
    /// Far clipping plane distance.
    pub far: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            position: Point3::new(3.0, 3.0, 3.0),
            look_at: Point3::origin(),
            up: Vector3::y(),
            movement_speed: 2.5,
            mouse_sensitivity: 0.1,
            rotation_speed: 45.0,
            zoom: MAX_ZOOM,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Animation settings for the preset scenes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneOptions {
    /// Fan rotor speed in degrees per second.
    pub fan_speed: f32,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self { fan_speed: 90.0 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    pub camera: CameraOptions,
    pub scene: SceneOptions,
}

impl Options {
    pub fn from_toml_str(content: &str) -> Result<Self, Lab3dError> {
        let options: Self =
            toml::from_str(content).map_err(|e| Lab3dError::OptionsParse(e.to_string()))?;
        Ok(options.sanitized())
    }

    pub fn load(path: &Path) -> Result<Self, Lab3dError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String, Lab3dError> {
        toml::to_string_pretty(self).map_err(|e| Lab3dError::OptionsParse(e.to_string()))
    }

    /// Replace values that would break camera invariants.
    pub fn sanitized(mut self) -> Self {
        let defaults = CameraOptions::default();
        let cam = &mut self.camera;

        if !(MIN_ZOOM..=MAX_ZOOM).contains(&cam.zoom) {
            let clamped = if cam.zoom.is_nan() {
                defaults.zoom
            } else {
                cam.zoom.clamp(MIN_ZOOM, MAX_ZOOM)
            };
            warn!("camera.zoom {} outside [{MIN_ZOOM}, {MAX_ZOOM}], using {clamped}", cam.zoom);
            cam.zoom = clamped;
        }
        for (name, value, fallback) in [
            ("movement_speed", &mut cam.movement_speed, defaults.movement_speed),
            ("mouse_sensitivity", &mut cam.mouse_sensitivity, defaults.mouse_sensitivity),
            ("rotation_speed", &mut cam.rotation_speed, defaults.rotation_speed),
        ] {
            if !(*value > 0.0 && value.is_finite()) {
                warn!("camera.{name} must be positive, got {value}; using {fallback}");
                *value = fallback;
            }
        }
        if cam.up.try_normalize(1e-6).is_none() {
            warn!("camera.up is degenerate; using +Y");
            cam.up = defaults.up;
        }
        if !(cam.near > 0.0 && cam.far > cam.near) {
            warn!("camera clip planes near={} far={} are invalid; using defaults", cam.near, cam.far);
            cam.near = defaults.near;
            cam.far = defaults.far;
        }
        if !self.scene.fan_speed.is_finite() {
            warn!("scene.fan_speed is not finite; using default");
            self.scene.fan_speed = SceneOptions::default().fan_speed;
        }
        self
    }
}
