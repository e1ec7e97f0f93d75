use crate::core::geometry::Vertex;
use crate::io::error::LoadError;
use crate::scene::mesh::Mesh;
use crate::scene::utils::compute_tangents;
use log::{info, warn};
use nalgebra::{Point3, Vector2, Vector3};
use std::path::Path;

/// Loads an OBJ file and returns a unified Mesh in the left-handed render
/// convention.
///
/// OBJ data is right-handed with V pointing up, so z is negated on positions
/// and normals, V is flipped and each triangle's winding is reversed.
/// Vertex colors are white and tangents are generated from the UVs.
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Mesh, LoadError> {
    let path_obj = path.as_ref();
    if !path_obj.exists() {
        return Err(LoadError::NotFound(path_obj.to_path_buf()));
    }

    info!("Loading OBJ file: {:?}", path_obj);

    let load_options = tobj::LoadOptions {
        triangulate: true,
        single_index: true, // Important: Unifies indices for Position/Normal/UV
        ..Default::default()
    };

    // Materials come from the scene config, not from MTL files.
    let (models, _materials) = tobj::load_obj(path_obj, &load_options)
        .map_err(|e| LoadError::Obj(path_obj.to_path_buf(), e))?;

    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    let mut index_offset = 0u32;

    for model in models {
        let mesh = &model.mesh;
        let num_vertices = mesh.positions.len() / 3;

        let has_normals = mesh.normals.len() == mesh.positions.len();
        let has_texcoords = mesh.texcoords.len() / 2 == num_vertices;

        if !has_normals {
            warn!(
                "Mesh '{}' is missing normals. Using default (0, 1, 0).",
                model.name
            );
        }
        if !has_texcoords {
            warn!("Mesh '{}' is missing texture coordinates.", model.name);
        }

        for i in 0..num_vertices {
            let position = Point3::new(
                mesh.positions[i * 3],
                mesh.positions[i * 3 + 1],
                -mesh.positions[i * 3 + 2],
            );
            let normal = if has_normals {
                Vector3::new(
                    mesh.normals[i * 3],
                    mesh.normals[i * 3 + 1],
                    -mesh.normals[i * 3 + 2],
                )
            } else {
                Vector3::y()
            };
            let texcoord = if has_texcoords {
                Vector2::new(mesh.texcoords[i * 2], 1.0 - mesh.texcoords[i * 2 + 1])
            } else {
                Vector2::zeros()
            };

            vertices.push(Vertex::new(position, normal, texcoord));
        }

        // Merged sub-meshes need their indices offset; mirroring z flips the
        // winding, so swap the last two indices back.
        for tri in mesh.indices.chunks_exact(3) {
            indices.extend_from_slice(&[
                tri[0] + index_offset,
                tri[2] + index_offset,
                tri[1] + index_offset,
            ]);
        }

        index_offset += num_vertices as u32;
    }

    compute_tangents(&mut vertices, &indices);

    let mesh = Mesh::new(vertices, indices);
    mesh.validate()?;

    info!(
        "OBJ loaded successfully. Total vertices: {}, Total indices: {}",
        mesh.vertices.len(),
        mesh.indices.len()
    );

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const QUAD: &str = "\
v -1.0 -1.0 0.0
v 1.0 -1.0 0.0
v 1.0 1.0 0.0
v -1.0 1.0 0.0
vt 0.0 0.0
vt 1.0 0.0
vt 1.0 1.0
vt 0.0 1.0
vn 0.0 0.0 1.0
f 1/1/1 2/2/1 3/3/1 4/4/1
";

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_obj_is_converted_to_left_handed() {
        let path = write_temp("dual_rasterizer_quad.obj", QUAD);
        let mesh = load_obj(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.triangle_count(), 2);

        for v in &mesh.vertices {
            // +Z normal in OBJ faces the viewer, which is -Z here.
            assert_eq!(v.normal, Vector3::new(0.0, 0.0, -1.0));
            assert_eq!(v.color, Vector3::new(1.0, 1.0, 1.0));
            assert!((v.tangent - Vector3::x()).norm() < 1e-5);
        }

        // OBJ V = 0 is the bottom row, which is V = 1 after flipping.
        let bottom_left = mesh
            .vertices
            .iter()
            .find(|v| v.position == Point3::new(-1.0, -1.0, 0.0))
            .unwrap();
        assert_eq!(bottom_left.texcoord, Vector2::new(0.0, 1.0));

        // Counter-clockwise in OBJ becomes clockwise: the edge cross product
        // runs along the (converted) normal.
        for tri in mesh.indices.chunks(3) {
            let p = |i: u32| mesh.vertices[i as usize].position;
            let cross = (p(tri[1]) - p(tri[0])).cross(&(p(tri[2]) - p(tri[0])));
            assert!(cross.dot(&Vector3::new(0.0, 0.0, -1.0)) > 0.0);
        }
    }

    #[test]
    fn test_missing_obj_is_not_found() {
        let err = load_obj("no/such/model.obj").unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
    }

    #[test]
    fn test_missing_normals_default_up() {
        let path = write_temp(
            "dual_rasterizer_tri.obj",
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n",
        );
        let mesh = load_obj(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert!(mesh.vertices.iter().all(|v| v.normal == Vector3::y()));
        assert!(mesh.validate().is_ok());
    }
}
