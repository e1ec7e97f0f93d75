use crate::io::config::Config;
use crate::io::error::LoadError;
use crate::io::obj_loader::load_obj;
use crate::scene::camera::Camera;
use crate::scene::context::{RenderContext, RenderSettings};
use crate::scene::light::DirectionalLight;
use crate::scene::material::{FlatMaterial, Material, PhongMaterial};
use crate::scene::mesh::Mesh;
use crate::scene::scene_object::SceneObject;
use crate::scene::texture::Texture;
use log::{error, info, warn};
use nalgebra::{Point3, Vector3};
use std::sync::Arc;

const MISSING_TEXTURE: [f32; 3] = [1.0, 0.0, 1.0];
const FLAT_NORMAL: [f32; 3] = [0.5, 0.5, 1.0];

fn mesh_or_cube(path: &str) -> Mesh {
    match load_obj(path) {
        Ok(mesh) => mesh,
        Err(e) => {
            error!("Error loading model '{}': {}. Using fallback cube.", path, e);
            Mesh::create_cube(1.0)
        }
    }
}

fn texture_or(path: &str, kind: &str, fallback: [f32; 3]) -> Arc<Texture> {
    match Texture::load(path) {
        Ok(tex) => Arc::new(tex),
        Err(e) => {
            warn!("Failed to load {} texture: {}. Using a solid fallback.", kind, e);
            Arc::new(Texture::solid(Vector3::from(fallback)))
        }
    }
}

/// Optional maps stay absent when the path is unset or the file fails to load.
fn optional_texture(path: Option<&str>, kind: &str) -> Option<Arc<Texture>> {
    let path = path?;
    match Texture::load(path) {
        Ok(tex) => Some(Arc::new(tex)),
        Err(LoadError::NotFound(p)) => {
            warn!("No {} texture at {:?}; continuing without it.", kind, p);
            None
        }
        Err(e) => {
            warn!("Failed to load {} texture: {}", kind, e);
            None
        }
    }
}

/// Initial resource loading (Heavy I/O). Returns a RenderContext.
///
/// Never fails: every missing or broken asset is replaced by a procedural
/// stand-in, so the render loop only ever sees complete data.
pub fn init_scene_resources(config: &Config) -> RenderContext {
    // 1. Camera
    let cam = &config.camera;
    let aspect_ratio = config.render.width as f32 / config.render.height.max(1) as f32;
    let mut camera = Camera::new(
        Point3::from(cam.origin),
        cam.fov.to_radians(),
        aspect_ratio,
        cam.near,
        cam.far,
    );
    camera.movement_speed = cam.movement_speed;
    camera.boost_speed = cam.boost_speed;
    camera.rotation_speed = cam.rotation_speed;
    camera.vertical_speed = cam.vertical_speed;
    camera.max_vertical_step = cam.max_vertical_step;

    // 2. Meshes & materials
    let scene = &config.scene;
    let translation = Vector3::from(scene.translation);
    let scale = Vector3::from(scene.scale);

    let vehicle_material = PhongMaterial {
        diffuse_texture: texture_or(&scene.vehicle_diffuse, "diffuse", MISSING_TEXTURE),
        normal_texture: texture_or(&scene.vehicle_normal, "normal", FLAT_NORMAL),
        gloss_texture: optional_texture(scene.vehicle_gloss.as_deref(), "gloss"),
        specular_texture: optional_texture(scene.vehicle_specular.as_deref(), "specular"),
        ..Default::default()
    };
    let vehicle = SceneObject::new(
        "vehicle",
        mesh_or_cube(&scene.vehicle_mesh),
        Material::Phong(vehicle_material),
        translation,
        scale,
    );

    let fire_material = FlatMaterial {
        diffuse_texture: texture_or(&scene.fire_diffuse, "fire diffuse", MISSING_TEXTURE),
    };
    let mut fire = SceneObject::new(
        "fire",
        mesh_or_cube(&scene.fire_mesh),
        Material::Flat(fire_material),
        translation,
        scale,
    );

    let settings = RenderSettings::from(&config.toggles);
    fire.visible = settings.show_fire;

    info!(
        "Scene initialized: vehicle {} triangles, fire {} triangles.",
        vehicle.mesh.triangle_count(),
        fire.mesh.triangle_count()
    );

    RenderContext {
        camera,
        light: DirectionalLight::default(),
        vehicle,
        fire,
        settings,
        background: Vector3::from(config.render.background),
        uniform_background: Vector3::from(config.render.uniform_background),
        spin_speed: scene.spin_speed.to_radians(),
        spin_angle: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector2;
    use crate::scene::texture::SampleFilter;

    #[test]
    fn test_missing_assets_fall_back() {
        let mut config = Config::default();
        config.scene.vehicle_mesh = "missing/vehicle.obj".into();
        config.scene.vehicle_diffuse = "missing/diffuse.png".into();
        config.scene.vehicle_normal = "missing/normal.png".into();
        config.scene.vehicle_gloss = Some("missing/gloss.png".into());
        config.scene.vehicle_specular = None;
        config.scene.fire_mesh = "missing/fire.obj".into();
        config.scene.fire_diffuse = "missing/fire.png".into();

        let ctx = init_scene_resources(&config);
        assert_eq!(ctx.vehicle.mesh.triangle_count(), 12);
        assert!(ctx.vehicle.mesh.validate().is_ok());
        assert!(!ctx.fire.visible);

        let Material::Phong(material) = &ctx.vehicle.material else {
            panic!("vehicle should use the lit technique");
        };
        let uv = Vector2::new(0.5, 0.5);
        assert_eq!(
            material.diffuse_texture.sample(uv, SampleFilter::Point),
            Vector3::new(1.0, 0.0, 1.0)
        );
        let normal = material.normal_texture.sample(uv, SampleFilter::Point);
        assert!((normal - Vector3::new(0.5, 0.5, 1.0)).norm() < 0.01);
        assert!(material.gloss_texture.is_none());
        assert!(material.specular_texture.is_none());
    }

    #[test]
    fn test_config_values_reach_the_context() {
        let mut config = Config::default();
        config.camera.origin = [1.0, 2.0, 3.0];
        config.camera.max_vertical_step = Some(0.25);
        config.scene.spin_speed = 90.0;
        config.toggles.show_fire = true;

        let ctx = init_scene_resources(&config);
        assert_eq!(ctx.camera.origin, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(ctx.camera.max_vertical_step, Some(0.25));
        assert!((ctx.spin_speed - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert!(ctx.fire.visible);
        assert!(matches!(ctx.fire.material, Material::Flat(_)));
        assert_eq!(ctx.vehicle.translation, Vector3::new(0.0, 0.0, 50.0));
    }
}
