use crate::core::rasterizer::{CullMode, DebugView};
use crate::core::timer::FrameTimer;
use crate::io::config::ToggleConfig;
use crate::pipeline::shaders::phong::ShadingMode;
use crate::scene::camera::{Camera, CameraInput};
use crate::scene::light::DirectionalLight;
use crate::scene::scene_object::SceneObject;
use crate::scene::texture::SampleFilter;
use log::{info, warn};
use nalgebra::Vector3;
use serde::Deserialize;

/// Which renderer draws the frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RasterizerMode {
    #[default]
    Software,
    /// GPU path. Not part of this build; the software path keeps drawing.
    Hardware,
}

/// Runtime flags read by the render passes every frame.
#[derive(Debug, Clone)]
pub struct RenderSettings {
    pub rasterizer_mode: RasterizerMode,
    pub shading_mode: ShadingMode,
    pub cull_mode: CullMode,
    pub filter: SampleFilter,
    pub normal_map: bool,
    pub depth_view: bool,
    pub bounding_box_view: bool,
    pub uniform_background: bool,
    pub rotation: bool,
    pub show_fire: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self::from(&ToggleConfig::default())
    }
}

impl From<&ToggleConfig> for RenderSettings {
    fn from(t: &ToggleConfig) -> Self {
        Self {
            rasterizer_mode: t.rasterizer_mode,
            shading_mode: t.shading_mode,
            cull_mode: t.cull_mode,
            filter: t.filter,
            normal_map: t.normal_map,
            depth_view: t.depth_view,
            bounding_box_view: t.bounding_box_view,
            uniform_background: t.uniform_background,
            rotation: t.rotation,
            show_fire: t.show_fire,
        }
    }
}

impl RenderSettings {
    /// Bounding-box view wins over depth view when both are on.
    pub fn debug_view(&self) -> DebugView {
        if self.bounding_box_view {
            DebugView::BoundingBox
        } else if self.depth_view {
            DebugView::Depth
        } else {
            DebugView::Shaded
        }
    }

    pub fn toggle_rasterizer_mode(&mut self) {
        self.rasterizer_mode = match self.rasterizer_mode {
            RasterizerMode::Software => RasterizerMode::Hardware,
            RasterizerMode::Hardware => RasterizerMode::Software,
        };
        info!("Rasterizer mode: {:?}", self.rasterizer_mode);
        if self.rasterizer_mode == RasterizerMode::Hardware {
            warn!("Hardware rasterizer is not available in this build; drawing in software.");
        }
    }

    pub fn toggle_rotation(&mut self) {
        self.rotation = !self.rotation;
        info!("Rotation: {}", on_off(self.rotation));
    }

    pub fn toggle_fire(&mut self) {
        self.show_fire = !self.show_fire;
        info!("Fire mesh: {}", on_off(self.show_fire));
    }

    pub fn cycle_filter(&mut self) {
        self.filter = self.filter.next();
        info!("Sample filter: {:?}", self.filter);
    }

    pub fn cycle_shading_mode(&mut self) {
        self.shading_mode = self.shading_mode.next();
        info!("Shading mode: {:?}", self.shading_mode);
    }

    pub fn toggle_normal_map(&mut self) {
        self.normal_map = !self.normal_map;
        info!("Normal map: {}", on_off(self.normal_map));
    }

    pub fn toggle_depth_view(&mut self) {
        self.depth_view = !self.depth_view;
        info!("Depth buffer view: {}", on_off(self.depth_view));
    }

    pub fn toggle_bounding_box_view(&mut self) {
        self.bounding_box_view = !self.bounding_box_view;
        info!("Bounding box view: {}", on_off(self.bounding_box_view));
    }

    pub fn cycle_cull_mode(&mut self) {
        self.cull_mode = self.cull_mode.next();
        info!("Cull mode: {:?}", self.cull_mode);
    }

    pub fn toggle_uniform_background(&mut self) {
        self.uniform_background = !self.uniform_background;
        info!("Uniform background: {}", on_off(self.uniform_background));
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "ON" } else { "OFF" }
}

/// Holds all scene resources and runtime state required for rendering.
pub struct RenderContext {
    pub camera: Camera,
    pub light: DirectionalLight,
    pub vehicle: SceneObject,
    pub fire: SceneObject,
    pub settings: RenderSettings,
    pub background: Vector3<f32>,
    pub uniform_background: Vector3<f32>,
    /// Mesh rotation speed in radians per second.
    pub spin_speed: f32,
    /// Current mesh rotation in radians.
    pub spin_angle: f32,
}

impl RenderContext {
    /// Advances camera and animation by one frame.
    pub fn update(&mut self, timer: &FrameTimer, input: &CameraInput) {
        let dt = timer.elapsed();
        self.camera.update(dt, input);

        if self.settings.rotation {
            self.spin_angle += self.spin_speed * dt;
            self.vehicle.set_yaw(self.spin_angle);
            self.fire.set_yaw(self.spin_angle);
        }
        self.fire.visible = self.settings.show_fire;
    }

    pub fn clear_color(&self) -> Vector3<f32> {
        if self.settings.uniform_background {
            self.uniform_background
        } else {
            self.background
        }
    }

    /// Objects in draw order.
    pub fn visible_objects(&self) -> impl Iterator<Item = &SceneObject> {
        [&self.vehicle, &self.fire]
            .into_iter()
            .filter(|object| object.visible)
    }
}
