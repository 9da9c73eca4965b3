use crate::math::Point3;

use super::vertex::VertexId;
use super::wall::WallId;

slotmap::new_key_type! {
    /// Unique identifier for an opening in the room store.
    pub struct OpeningId;
}

/// Kind of cutout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpeningKind {
    Door,
    Window,
}

impl OpeningKind {
    /// Native `(width, height)` of the model placed for this kind.
    #[must_use]
    pub fn reference_size(self) -> (f64, f64) {
        match self {
            OpeningKind::Door => (1.2, 2.1),
            OpeningKind::Window => (1.5, 0.8),
        }
    }
}

/// A door or window cut into exactly one wall.
#[derive(Debug, Clone)]
pub struct OpeningData {
    pub kind: OpeningKind,
    /// Ground-projected start of the cutout edge.
    pub start: VertexId,
    /// Ground-projected end of the cutout edge.
    pub end: VertexId,
    /// Vertical offset of the bottom edge.
    pub sill: f64,
    /// Vertical extent of the cutout.
    pub height: f64,
    /// Owning wall.
    pub wall: WallId,
}

/// An opening that has not been inserted yet.
///
/// [`RoomStore::attach_opening`](super::RoomStore::attach_opening) creates the
/// two edge vertices from `start`/`end`.
#[derive(Debug, Clone, Copy)]
pub struct OpeningDraft {
    pub kind: OpeningKind,
    pub start: Point3,
    pub end: Point3,
    pub sill: f64,
    pub height: f64,
}
