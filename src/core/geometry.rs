use nalgebra::{Point3, Vector2, Vector3, Vector4};
use std::ops::{Add, Mul};

/// Represents a single mesh vertex in object space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in local object space.
    pub position: Point3<f32>,
    /// Vertex color, multiplied into the sampled diffuse color.
    pub color: Vector3<f32>,
    /// Texture coordinates (UV).
    pub texcoord: Vector2<f32>,
    /// Normal vector for lighting calculations.
    pub normal: Vector3<f32>,
    /// Tangent vector (xyz) for Normal Mapping.
    pub tangent: Vector3<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>, normal: Vector3<f32>, texcoord: Vector2<f32>) -> Self {
        Self {
            position,
            color: Vector3::new(1.0, 1.0, 1.0),
            texcoord,
            normal,
            tangent: Vector3::zeros(),
        }
    }

    pub fn with_tangent(mut self, tangent: Vector3<f32>) -> Self {
        self.tangent = tangent;
        self
    }

}

/// Attributes carried from the vertex stage to the shading stage.
/// Interpolated across the triangle surface with perspective-correct weights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Varyings {
    pub color: Vector3<f32>,
    pub uv: Vector2<f32>,
    /// World-space normal, not normalized.
    pub normal: Vector3<f32>,
    /// World-space tangent, not normalized.
    pub tangent: Vector3<f32>,
    /// Camera-to-vertex direction in world space, not normalized.
    pub view_direction: Vector3<f32>,
}

impl Add for Varyings {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            color: self.color + other.color,
            uv: self.uv + other.uv,
            normal: self.normal + other.normal,
            tangent: self.tangent + other.tangent,
            view_direction: self.view_direction + other.view_direction,
        }
    }
}

impl Mul<f32> for Varyings {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            color: self.color * scalar,
            uv: self.uv * scalar,
            normal: self.normal * scalar,
            tangent: self.tangent * scalar,
            view_direction: self.view_direction * scalar,
        }
    }
}

/// A vertex after the vertex stage.
///
/// `position` holds screen x/y in pixels, NDC depth in z, and the clip-space
/// `w` which the rasterizer needs for perspective correction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformedVertex {
    pub position: Vector4<f32>,
    pub varyings: Varyings,
}

impl TransformedVertex {
    #[inline]
    pub fn screen(&self) -> nalgebra::Point2<f32> {
        nalgebra::Point2::new(self.position.x, self.position.y)
    }

    #[inline]
    pub fn depth(&self) -> f32 {
        self.position.z
    }

    #[inline]
    pub fn w(&self) -> f32 {
        self.position.w
    }
}

/// A covered pixel ready for shading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fragment {
    pub x: usize,
    pub y: usize,
    /// Interpolated depth, as stored in the depth buffer.
    pub depth: f32,
    pub varyings: Varyings,
}
