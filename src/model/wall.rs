use crate::tessellation::WallSegment;

use super::location::LocationId;
use super::opening::OpeningId;
use super::vertex::VertexId;

slotmap::new_key_type! {
    /// Unique identifier for a wall in the room store.
    pub struct WallId;
}

/// A straight vertical partition between two floor-level vertices.
///
/// The height is not stored; it is always the owning location's
/// ceiling-to-floor distance.
#[derive(Debug, Clone)]
pub struct WallData {
    pub start: VertexId,
    pub end: VertexId,
    /// Owning location.
    pub location: LocationId,
    pub thickness: f64,
    /// Openings in insertion order. The tessellator re-sorts them.
    pub openings: Vec<OpeningId>,
    /// Last successful tessellation.
    pub segments: Vec<WallSegment>,
}

impl WallData {
    /// Creates a wall with no openings and no segments yet.
    #[must_use]
    pub fn new(location: LocationId, start: VertexId, end: VertexId, thickness: f64) -> Self {
        Self {
            start,
            end,
            location,
            thickness,
            openings: Vec::new(),
            segments: Vec::new(),
        }
    }
}
