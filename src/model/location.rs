use super::vertex::VertexId;
use super::wall::WallId;

slotmap::new_key_type! {
    /// Unique identifier for a location in the room store.
    pub struct LocationId;
}

/// A captured room: floor and ceiling elevation plus one loop of walls.
#[derive(Debug, Clone, Default)]
pub struct LocationData {
    /// Floor elevation marker, once captured.
    pub floor: Option<VertexId>,
    /// Ceiling elevation marker, once captured.
    pub ceiling: Option<VertexId>,
    /// Walls in capture order.
    pub walls: Vec<WallId>,
}

impl LocationData {
    /// Creates an empty location.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
