mod box_mesh;
mod tessellate_wall;

pub use box_mesh::{BoxFootprint, MakeBoxMesh};
pub use tessellate_wall::{tessellate_wall, OpeningFootprint, TessellateWall, WallFrame};

use crate::math::{Point2, Point3, Vector3};

/// Material group of a box face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialSlot {
    /// Outer face, `thickness` away from the centerline.
    Back,
    /// Face on the centerline.
    Front,
    /// Left and right end faces.
    Sides,
    /// Top and bottom faces.
    Caps,
}

/// Triangles that share one material.
#[derive(Debug, Clone)]
pub struct SubMesh {
    pub material: MaterialSlot,
    /// Triangle indices into the owning mesh's vertex list.
    pub indices: Vec<[u32; 3]>,
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl Aabb {
    /// Smallest box containing all `points`, or `None` if there are none.
    #[must_use]
    pub fn enclosing(points: &[Point3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bounds = Self {
            min: *first,
            max: *first,
        };
        for p in rest {
            bounds.min = bounds.min.inf(p);
            bounds.max = bounds.max.sup(p);
        }
        Some(bounds)
    }
}

/// A six-faced box with unshared per-face vertices.
#[derive(Debug, Clone)]
pub struct BoxMesh {
    /// Vertex positions, four per face.
    pub vertices: Vec<Point3>,
    /// Per-vertex normals.
    pub normals: Vec<Vector3>,
    /// UV coordinates, a full unit quad per face.
    pub uvs: Vec<Point2>,
    /// Triangles grouped by material.
    pub submeshes: Vec<SubMesh>,
    pub bounds: Aabb,
}

impl BoxMesh {
    /// Triangles of the given material, empty if the slot is unused.
    #[must_use]
    pub fn triangles(&self, material: MaterialSlot) -> &[[u32; 3]] {
        self.submeshes
            .iter()
            .find(|s| s.material == material)
            .map(|s| s.indices.as_slice())
            .unwrap_or_default()
    }

    /// Total triangle count over all materials.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.submeshes.iter().map(|s| s.indices.len()).sum()
    }
}

/// Whether a segment spans the full wall height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// Floor to wall top, between or around openings.
    FullWall,
    /// Below or above an opening.
    PartialWall,
}

impl SegmentKind {
    /// Tag handed to the renderer for this segment.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            SegmentKind::FullWall => "fullWallSegment",
            SegmentKind::PartialWall => "partialWallSegment",
        }
    }
}

/// One tagged box of a tessellated wall.
#[derive(Debug, Clone)]
pub struct WallSegment {
    pub kind: SegmentKind,
    pub mesh: BoxMesh,
}
