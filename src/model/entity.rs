use crate::error::ModelError;
use crate::math::{ground_distance, Point3, Vector3};
use crate::tessellation::WallSegment;

use super::{OpeningId, OpeningKind, RoomStore, VertexId, VertexKind, WallId};

/// Any entity a host application can put on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Vertex(VertexId),
    Wall(WallId),
    Opening(OpeningId),
}

/// Render-ready description of an entity.
#[derive(Debug, Clone)]
pub enum Materialized<'a> {
    /// A point marker.
    Marker { position: Point3, kind: VertexKind },
    /// The wall's current tagged segments.
    Wall(&'a [WallSegment]),
    /// Where to place a door or window model.
    Opening(OpeningPlacement),
}

/// Pose and extent of an opening model.
#[derive(Debug, Clone, Copy)]
pub struct OpeningPlacement {
    pub kind: OpeningKind,
    /// Midpoint of the opening edge, raised to `floor + sill`.
    pub center: Point3,
    /// Rotation about the up axis, in degrees.
    pub yaw_degrees: f64,
    pub width: f64,
    pub height: f64,
    /// Thickness of the owning wall.
    pub depth: f64,
}

impl OpeningPlacement {
    /// Scale to apply to the kind's reference model: width and height relative
    /// to [`OpeningKind::reference_size`], depth as the wall thickness.
    #[must_use]
    pub fn scale(&self) -> Vector3 {
        let (ref_width, ref_height) = self.kind.reference_size();
        Vector3::new(self.width / ref_width, self.height / ref_height, self.depth)
    }
}

impl Entity {
    /// Resolves the entity into something a renderer can consume.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity, or an entity it depends on, is missing.
    pub fn materialize(self, store: &RoomStore) -> Result<Materialized<'_>, ModelError> {
        match self {
            Entity::Vertex(id) => {
                let v = store.vertex(id)?;
                Ok(Materialized::Marker {
                    position: v.point,
                    kind: v.kind,
                })
            }
            Entity::Wall(id) => Ok(Materialized::Wall(store.segments(id)?)),
            Entity::Opening(id) => {
                let opening = store.opening(id)?;
                let wall = store.wall(opening.wall)?;
                let start = store.vertex(opening.start)?.point;
                let end = store.vertex(opening.end)?.point;
                let floor_y = store.floor_elevation(wall.location)?;

                let mid = nalgebra::center(&start, &end);
                let dir = end - start;
                Ok(Materialized::Opening(OpeningPlacement {
                    kind: opening.kind,
                    center: Point3::new(mid.x, floor_y + opening.sill, mid.z),
                    yaw_degrees: 180.0 - dir.z.atan2(dir.x).to_degrees(),
                    width: ground_distance(&start, &end),
                    height: opening.height,
                    depth: wall.thickness,
                }))
            }
        }
    }
}
