use crate::core::color::{DEFAULT_BACKGROUND, UNIFORM_BACKGROUND};
use crate::core::rasterizer::CullMode;
use crate::io::error::LoadError;
use crate::pipeline::shaders::phong::ShadingMode;
use crate::scene::context::RasterizerMode;
use crate::scene::texture::SampleFilter;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub scene: SceneConfig,
    #[serde(default)]
    pub toggles: ToggleConfig,
}

#[derive(Debug, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    #[serde(default = "default_output")]
    pub output: String,
    /// Frames rendered in headless mode before the image is written.
    #[serde(default = "default_frames")]
    pub frames: u32,
    #[serde(default = "default_fixed_timestep")]
    pub fixed_timestep: f32,
    #[serde(default = "default_background")]
    pub background: [f32; 3],
    #[serde(default = "default_uniform_background")]
    pub uniform_background: [f32; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            output: default_output(),
            frames: default_frames(),
            fixed_timestep: default_fixed_timestep(),
            background: default_background(),
            uniform_background: default_uniform_background(),
        }
    }
}

fn default_width() -> usize {
    640
}
fn default_height() -> usize {
    480
}
fn default_output() -> String {
    "output.png".to_string()
}
fn default_frames() -> u32 {
    1
}
fn default_fixed_timestep() -> f32 {
    1.0 / 60.0
}
fn default_background() -> [f32; 3] {
    DEFAULT_BACKGROUND
}
fn default_uniform_background() -> [f32; 3] {
    UNIFORM_BACKGROUND
}
fn default_false() -> bool {
    false
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct CameraConfig {
    #[serde(default)]
    pub origin: [f32; 3],
    /// Vertical field of view in degrees.
    #[serde(default = "default_fov")]
    pub fov: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
    #[serde(default = "default_movement_speed")]
    pub movement_speed: f32,
    #[serde(default = "default_boost_speed")]
    pub boost_speed: f32,
    #[serde(default = "default_rotation_speed")]
    pub rotation_speed: f32,
    #[serde(default = "default_vertical_speed")]
    pub vertical_speed: f32,
    #[serde(default)]
    pub max_vertical_step: Option<f32>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            origin: [0.0, 0.0, 0.0],
            fov: default_fov(),
            near: default_near(),
            far: default_far(),
            movement_speed: default_movement_speed(),
            boost_speed: default_boost_speed(),
            rotation_speed: default_rotation_speed(),
            vertical_speed: default_vertical_speed(),
            max_vertical_step: None,
        }
    }
}

fn default_fov() -> f32 {
    45.0
}
fn default_near() -> f32 {
    0.1
}
fn default_far() -> f32 {
    100.0
}
fn default_movement_speed() -> f32 {
    15.0
}
fn default_boost_speed() -> f32 {
    40.0
}
fn default_rotation_speed() -> f32 {
    0.005
}
fn default_vertical_speed() -> f32 {
    10.0
}

#[derive(Debug, Deserialize)]
pub struct SceneConfig {
    #[serde(default = "default_vehicle_mesh")]
    pub vehicle_mesh: String,
    #[serde(default = "default_vehicle_diffuse")]
    pub vehicle_diffuse: String,
    #[serde(default = "default_vehicle_normal")]
    pub vehicle_normal: String,
    #[serde(default = "default_vehicle_gloss")]
    pub vehicle_gloss: Option<String>,
    #[serde(default = "default_vehicle_specular")]
    pub vehicle_specular: Option<String>,
    #[serde(default = "default_fire_mesh")]
    pub fire_mesh: String,
    #[serde(default = "default_fire_diffuse")]
    pub fire_diffuse: String,
    /// World position shared by both meshes.
    #[serde(default = "default_translation")]
    pub translation: [f32; 3],
    #[serde(default = "default_scale")]
    pub scale: [f32; 3],
    /// Rotation speed in degrees per second.
    #[serde(default = "default_spin_speed")]
    pub spin_speed: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            vehicle_mesh: default_vehicle_mesh(),
            vehicle_diffuse: default_vehicle_diffuse(),
            vehicle_normal: default_vehicle_normal(),
            vehicle_gloss: default_vehicle_gloss(),
            vehicle_specular: default_vehicle_specular(),
            fire_mesh: default_fire_mesh(),
            fire_diffuse: default_fire_diffuse(),
            translation: default_translation(),
            scale: default_scale(),
            spin_speed: default_spin_speed(),
        }
    }
}

fn default_vehicle_mesh() -> String {
    "assets/vehicle.obj".to_string()
}
fn default_vehicle_diffuse() -> String {
    "assets/vehicle_diffuse.png".to_string()
}
fn default_vehicle_normal() -> String {
    "assets/vehicle_normal.png".to_string()
}
fn default_vehicle_gloss() -> Option<String> {
    Some("assets/vehicle_gloss.png".to_string())
}
fn default_vehicle_specular() -> Option<String> {
    Some("assets/vehicle_specular.png".to_string())
}
fn default_fire_mesh() -> String {
    "assets/fireFX.obj".to_string()
}
fn default_fire_diffuse() -> String {
    "assets/fireFX_diffuse.png".to_string()
}
fn default_translation() -> [f32; 3] {
    [0.0, 0.0, 50.0]
}
fn default_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}
fn default_spin_speed() -> f32 {
    45.0
}

/// Initial state of every runtime toggle.
#[derive(Debug, Deserialize)]
pub struct ToggleConfig {
    #[serde(default)]
    pub rasterizer_mode: RasterizerMode,
    #[serde(default)]
    pub shading_mode: ShadingMode,
    #[serde(default)]
    pub cull_mode: CullMode,
    #[serde(default)]
    pub filter: SampleFilter,
    #[serde(default = "default_true")]
    pub normal_map: bool,
    #[serde(default = "default_false")]
    pub depth_view: bool,
    #[serde(default = "default_false")]
    pub bounding_box_view: bool,
    #[serde(default = "default_false")]
    pub uniform_background: bool,
    #[serde(default = "default_true")]
    pub rotation: bool,
    #[serde(default = "default_false")]
    pub show_fire: bool,
}

impl Default for ToggleConfig {
    fn default() -> Self {
        Self {
            rasterizer_mode: RasterizerMode::default(),
            shading_mode: ShadingMode::default(),
            cull_mode: CullMode::default(),
            filter: SampleFilter::default(),
            normal_map: true,
            depth_view: false,
            bounding_box_view: false,
            uniform_background: false,
            rotation: true,
            show_fire: false,
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LoadError::NotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path).map_err(|e| LoadError::Io(path.to_path_buf(), e))?;
        Self::parse(&content).map_err(|e| LoadError::Config(path.to_path_buf(), e))
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
