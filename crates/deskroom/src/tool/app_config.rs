use anyhow::{Context, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::content::SceneSettings;
use crate::engine::CameraSettings;

const APP_CONFIG_FILE: &str = "config.ron";

/// Optional settings read from `config.ron` in the working directory. Missing fields fall
/// back to their defaults.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub vsync: bool,
    pub mouse_sensitivity: f32,
    pub camera_speed: f32,
    pub field_of_view_degrees: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub clear_color: [f32; 4],
    pub light_position: [f32; 3],
    pub light_color: [f32; 3],
    pub sphere_sectors: u32,
    pub sphere_stacks: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_title: "Deskroom".to_string(),
            window_width: 800,
            window_height: 600,
            vsync: true,
            mouse_sensitivity: 0.1,
            camera_speed: 2.5,
            field_of_view_degrees: 45.0,
            z_near: 0.1,
            z_far: 100.0,
            clear_color: [0.1, 0.1, 0.1, 1.0],
            light_position: [1.2, 1.0, 2.0],
            light_color: [1.0, 1.0, 1.0],
            sphere_sectors: 36,
            sphere_stacks: 18,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        if let Ok(config_str) = std::fs::read_to_string(APP_CONFIG_FILE) {
            info!("Loading {APP_CONFIG_FILE}");
            Self::parse(&config_str).with_context(|| format!("Failed to parse {APP_CONFIG_FILE}"))
        } else {
            debug!("No {APP_CONFIG_FILE}, using defaults");
            Ok(Self::default())
        }
    }

    pub fn parse(config_str: &str) -> Result<Self> {
        let config: Self = ron::de::from_str(config_str)?;
        Ok(config)
    }

    pub fn camera_settings(&self) -> CameraSettings {
        CameraSettings {
            mouse_sensitivity: self.mouse_sensitivity,
            speed: self.camera_speed,
            field_of_view: self.field_of_view_degrees.to_radians(),
            z_near: self.z_near,
            z_far: self.z_far,
        }
    }

    pub fn scene_settings(&self) -> SceneSettings {
        SceneSettings {
            sphere_sectors: self.sphere_sectors,
            sphere_stacks: self.sphere_stacks,
            light_position: Vec3::from(self.light_position),
        }
    }

    pub fn clear_color(&self) -> wgpu::Color {
        let [r, g, b, a] = self.clear_color.map(f64::from);
        wgpu::Color { r, g, b, a }
    }
}
