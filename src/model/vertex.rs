use crate::math::Point3;

slotmap::new_key_type! {
    /// Unique identifier for a vertex in the room store.
    pub struct VertexId;
}

/// What role a captured vertex plays in the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexKind {
    /// A corner of the wall loop.
    Wall,
    /// Floor elevation marker.
    Floor,
    /// Ceiling elevation marker.
    Ceiling,
    /// Ground-projected edge of a door or window.
    Opening,
}

/// Data associated with a vertex. Vertices are never mutated after insertion.
#[derive(Debug, Clone)]
pub struct VertexData {
    /// The 3D position of the vertex.
    pub point: Point3,
    /// The role of the vertex.
    pub kind: VertexKind,
}

impl VertexData {
    /// Creates a new vertex at the given point.
    #[must_use]
    pub fn new(point: Point3, kind: VertexKind) -> Self {
        Self { point, kind }
    }
}
