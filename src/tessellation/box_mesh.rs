use crate::math::{Point2, Point3, Vector3, TOLERANCE};

use super::{Aabb, BoxMesh, MaterialSlot, SubMesh};

// Face order in the vertex buffer, four vertices each.
const BACK: u32 = 0;
const FRONT: u32 = 1;
const BOTTOM: u32 = 2;
const TOP: u32 = 3;
const LEFT: u32 = 4;
const RIGHT: u32 = 5;

/// Ground corners of a box, all at the box's base elevation.
#[derive(Debug, Clone, Copy)]
pub struct BoxFootprint {
    pub front_start: Point3,
    pub front_end: Point3,
    pub back_start: Point3,
    pub back_end: Point3,
}

/// Builds a box mesh by extruding a footprint straight up.
///
/// Every face gets its own four vertices, so normals stay flat and each face
/// maps the full unit UV square.
pub struct MakeBoxMesh {
    footprint: BoxFootprint,
    height: f64,
}

impl MakeBoxMesh {
    /// Creates a new `MakeBoxMesh` operation.
    #[must_use]
    pub fn new(footprint: BoxFootprint, height: f64) -> Self {
        Self { footprint, height }
    }

    /// Executes the operation.
    #[must_use]
    pub fn execute(&self) -> BoxMesh {
        let up = Vector3::y() * self.height;
        let p0 = self.footprint.front_start;
        let p1 = self.footprint.front_end;
        let p2 = self.footprint.back_end;
        let p3 = self.footprint.back_start;
        let p4 = p0 + up;
        let p5 = p1 + up;
        let p6 = p2 + up;
        let p7 = p3 + up;

        #[rustfmt::skip]
        let vertices = vec![
            p6, p7, p3, p2, // back
            p4, p5, p1, p0, // front
            p0, p1, p2, p3, // bottom
            p7, p6, p5, p4, // top
            p7, p4, p0, p3, // left
            p5, p6, p2, p1, // right
        ];

        let quad_uv = [
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
        ];
        let uvs = (0..6).flat_map(|_| quad_uv).collect();

        let submeshes = vec![
            SubMesh {
                material: MaterialSlot::Back,
                indices: face_triangles(&[BACK]),
            },
            SubMesh {
                material: MaterialSlot::Front,
                indices: face_triangles(&[FRONT]),
            },
            SubMesh {
                material: MaterialSlot::Sides,
                indices: face_triangles(&[RIGHT, LEFT]),
            },
            SubMesh {
                material: MaterialSlot::Caps,
                indices: face_triangles(&[TOP, BOTTOM]),
            },
        ];

        let normals = vertex_normals(&vertices, &submeshes);
        let bounds = Aabb::enclosing(&vertices).unwrap_or(Aabb { min: p0, max: p0 });

        BoxMesh {
            vertices,
            normals,
            uvs,
            submeshes,
            bounds,
        }
    }
}

fn face_triangles(faces: &[u32]) -> Vec<[u32; 3]> {
    faces
        .iter()
        .flat_map(|&face| {
            let b = face * 4;
            [[b + 3, b + 1, b], [b + 3, b + 2, b + 1]]
        })
        .collect()
}

/// Area-weighted vertex normals. Vertices of zero-area faces keep a zero normal.
fn vertex_normals(vertices: &[Point3], submeshes: &[SubMesh]) -> Vec<Vector3> {
    let mut normals = vec![Vector3::zeros(); vertices.len()];
    for tri in submeshes.iter().flat_map(|s| &s.indices) {
        let [a, b, c] = tri.map(|i| vertices[i as usize]);
        let n = (b - a).cross(&(c - a));
        for &i in tri {
            normals[i as usize] += n;
        }
    }
    for n in &mut normals {
        let len = n.norm();
        if len > TOLERANCE {
            *n /= len;
        }
    }
    normals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slab(height: f64) -> BoxMesh {
        MakeBoxMesh::new(
            BoxFootprint {
                front_start: Point3::new(0.0, 0.0, 0.0),
                front_end: Point3::new(4.0, 0.0, 0.0),
                back_start: Point3::new(0.0, 0.0, -0.1),
                back_end: Point3::new(4.0, 0.0, -0.1),
            },
            height,
        )
        .execute()
    }

    fn face_normal(mesh: &BoxMesh, face: u32) -> Vector3 {
        mesh.normals[(face * 4) as usize]
    }

    #[test]
    fn box_has_unshared_faces() {
        let mesh = slab(2.5);
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.normals.len(), 24);
        assert_eq!(mesh.uvs.len(), 24);
        assert_eq!(mesh.triangle_count(), 12);
    }

    #[test]
    fn faces_grouped_into_four_materials() {
        let mesh = slab(2.5);
        assert_eq!(mesh.submeshes.len(), 4);
        assert_eq!(mesh.triangles(MaterialSlot::Back).len(), 2);
        assert_eq!(mesh.triangles(MaterialSlot::Front).len(), 2);
        assert_eq!(mesh.triangles(MaterialSlot::Sides).len(), 4);
        assert_eq!(mesh.triangles(MaterialSlot::Caps).len(), 4);
    }

    #[test]
    fn normals_point_outward() {
        let mesh = slab(2.5);
        let expected = [
            (BACK, Vector3::new(0.0, 0.0, -1.0)),
            (FRONT, Vector3::new(0.0, 0.0, 1.0)),
            (BOTTOM, Vector3::new(0.0, -1.0, 0.0)),
            (TOP, Vector3::new(0.0, 1.0, 0.0)),
            (LEFT, Vector3::new(-1.0, 0.0, 0.0)),
            (RIGHT, Vector3::new(1.0, 0.0, 0.0)),
        ];
        for (face, normal) in expected {
            for k in 0..4 {
                let n = mesh.normals[(face * 4 + k) as usize];
                assert!((n - normal).norm() < 1e-9, "face {face} vertex {k}: {n:?}");
            }
        }
    }

    #[test]
    fn every_face_maps_unit_uv_square() {
        let mesh = slab(1.0);
        for face in mesh.uvs.chunks(4) {
            assert_eq!(face[0], Point2::new(1.0, 1.0));
            assert_eq!(face[2], Point2::new(0.0, 0.0));
        }
    }

    #[test]
    fn bounds_cover_extrusion() {
        let mesh = slab(2.5);
        assert!((mesh.bounds.min - Point3::new(0.0, 0.0, -0.1)).norm() < 1e-12);
        assert!((mesh.bounds.max - Point3::new(4.0, 2.5, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn zero_height_box_keeps_finite_normals() {
        let mesh = slab(0.0);
        assert!(mesh.normals.iter().all(|n| n.iter().all(|c| c.is_finite())));
        assert!(face_normal(&mesh, FRONT).norm() < TOLERANCE);
        assert!((face_normal(&mesh, TOP).norm() - 1.0).abs() < 1e-9);
    }
}
