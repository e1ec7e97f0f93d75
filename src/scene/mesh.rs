use crate::core::geometry::Vertex;
use crate::io::error::LoadError;
use nalgebra::{Point3, Vector2, Vector3};

/// A collection of vertices and indices representing a 3D object.
#[derive(Debug, Clone)]
pub struct Mesh {
    /// List of vertices.
    pub vertices: Vec<Vertex>,
    /// List of indices defining triangles (3 indices per triangle), in draw order.
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Checks the arrays the renderer relies on: a whole number of triangles
    /// and every index in range.
    pub fn validate(&self) -> Result<(), LoadError> {
        if self.indices.len() % 3 != 0 {
            return Err(LoadError::MalformedMesh(format!(
                "index count {} is not a multiple of 3",
                self.indices.len()
            )));
        }
        if let Some(bad) = self
            .indices
            .iter()
            .find(|&&i| i as usize >= self.vertices.len())
        {
            return Err(LoadError::MalformedMesh(format!(
                "index {} out of range for {} vertices",
                bad,
                self.vertices.len()
            )));
        }
        Ok(())
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Axis-aligned cube centered on the origin, used as a stand-in mesh.
    ///
    /// Every face is wound clockwise when seen from outside (the front-face
    /// winding), with UV (0, 0) at the face's top-left and the tangent along +U.
    pub fn create_cube(half_extent: f32) -> Self {
        let faces: [(Vector3<f32>, Vector3<f32>); 6] = [
            (Vector3::new(0.0, 0.0, -1.0), Vector3::y()),
            (Vector3::new(0.0, 0.0, 1.0), Vector3::y()),
            (Vector3::new(1.0, 0.0, 0.0), Vector3::y()),
            (Vector3::new(-1.0, 0.0, 0.0), Vector3::y()),
            (Vector3::new(0.0, 1.0, 0.0), Vector3::z()),
            (Vector3::new(0.0, -1.0, 0.0), -Vector3::z()),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);

        for (normal, up) in faces {
            let right = normal.cross(&up);
            let center = normal * half_extent;
            let corners = [
                (center + (up - right) * half_extent, Vector2::new(0.0, 0.0)),
                (center + (up + right) * half_extent, Vector2::new(1.0, 0.0)),
                (center + (right - up) * half_extent, Vector2::new(1.0, 1.0)),
                (center - (up + right) * half_extent, Vector2::new(0.0, 1.0)),
            ];

            let base = vertices.len() as u32;
            for (position, uv) in corners {
                vertices.push(Vertex::new(Point3::from(position), normal, uv).with_tangent(right));
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self::new(vertices, indices)
    }
}
