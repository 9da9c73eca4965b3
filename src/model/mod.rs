pub mod entity;
pub mod location;
pub mod opening;
pub mod vertex;
pub mod wall;

pub use entity::{Entity, Materialized, OpeningPlacement};
pub use location::{LocationData, LocationId};
pub use opening::{OpeningData, OpeningDraft, OpeningId, OpeningKind};
pub use vertex::{VertexData, VertexId, VertexKind};
pub use wall::{WallData, WallId};

use slotmap::SlotMap;
use tracing::{debug, warn};

use crate::error::{ModelError, Result};
use crate::tessellation::{TessellateWall, WallSegment};

/// Central arena that owns every captured entity.
///
/// Entities reference each other via typed IDs (generational indices). An
/// opening stores its wall's ID and a wall stores its openings' IDs, so there
/// are no reference cycles.
#[derive(Debug, Default)]
pub struct RoomStore {
    vertices: SlotMap<VertexId, VertexData>,
    walls: SlotMap<WallId, WallData>,
    openings: SlotMap<OpeningId, OpeningData>,
    locations: SlotMap<LocationId, LocationData>,
}

impl RoomStore {
    /// Creates a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Vertex operations ---

    /// Inserts a vertex and returns its ID.
    pub fn add_vertex(&mut self, data: VertexData) -> VertexId {
        self.vertices.insert(data)
    }

    /// Returns a reference to the vertex data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn vertex(&self, id: VertexId) -> std::result::Result<&VertexData, ModelError> {
        self.vertices
            .get(id)
            .ok_or(ModelError::EntityNotFound("vertex"))
    }

    // --- Location operations ---

    /// Inserts a location and returns its ID.
    pub fn add_location(&mut self, data: LocationData) -> LocationId {
        self.locations.insert(data)
    }

    /// Returns a reference to the location data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn location(&self, id: LocationId) -> std::result::Result<&LocationData, ModelError> {
        self.locations
            .get(id)
            .ok_or(ModelError::EntityNotFound("location"))
    }

    /// Returns a mutable reference to the location data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn location_mut(
        &mut self,
        id: LocationId,
    ) -> std::result::Result<&mut LocationData, ModelError> {
        self.locations
            .get_mut(id)
            .ok_or(ModelError::EntityNotFound("location"))
    }

    /// Elevation of the location's floor marker.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::MissingElevation`] if no floor has been captured.
    pub fn floor_elevation(&self, id: LocationId) -> std::result::Result<f64, ModelError> {
        let floor = self
            .location(id)?
            .floor
            .ok_or(ModelError::MissingElevation("floor"))?;
        Ok(self.vertex(floor)?.point.y)
    }

    /// Ceiling-to-floor distance of the location.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::MissingElevation`] if floor or ceiling is missing.
    pub fn location_height(&self, id: LocationId) -> std::result::Result<f64, ModelError> {
        let ceiling = self
            .location(id)?
            .ceiling
            .ok_or(ModelError::MissingElevation("ceiling"))?;
        let ceiling_y = self.vertex(ceiling)?.point.y;
        Ok(ceiling_y - self.floor_elevation(id)?)
    }

    /// Distinct wall vertices of a location, in first-seen order.
    ///
    /// # Errors
    ///
    /// Returns an error if the location or one of its walls is missing.
    pub fn location_vertices(
        &self,
        id: LocationId,
    ) -> std::result::Result<Vec<VertexId>, ModelError> {
        let mut vertices = Vec::new();
        for &wall_id in &self.location(id)?.walls {
            let wall = self.wall(wall_id)?;
            for v in [wall.start, wall.end] {
                if !vertices.contains(&v) {
                    vertices.push(v);
                }
            }
        }
        Ok(vertices)
    }

    // --- Wall operations ---

    /// Inserts a wall, registers it on its location and returns its ID.
    ///
    /// No segments are generated; call [`Self::retessellate`] afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall's location or one of its vertices is missing.
    pub fn add_wall(&mut self, data: WallData) -> std::result::Result<WallId, ModelError> {
        self.vertex(data.start)?;
        self.vertex(data.end)?;
        let location = data.location;
        self.location(location)?;
        let id = self.walls.insert(data);
        self.location_mut(location)?.walls.push(id);
        Ok(id)
    }

    /// Returns a reference to the wall data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn wall(&self, id: WallId) -> std::result::Result<&WallData, ModelError> {
        self.walls.get(id).ok_or(ModelError::EntityNotFound("wall"))
    }

    /// Returns a mutable reference to the wall data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn wall_mut(&mut self, id: WallId) -> std::result::Result<&mut WallData, ModelError> {
        self.walls
            .get_mut(id)
            .ok_or(ModelError::EntityNotFound("wall"))
    }

    /// Height of a wall, derived from its location.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is missing or its location lacks elevation.
    pub fn wall_height(&self, id: WallId) -> std::result::Result<f64, ModelError> {
        self.location_height(self.wall(id)?.location)
    }

    /// Segments produced by the wall's last successful tessellation.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is not found.
    pub fn segments(&self, id: WallId) -> std::result::Result<&[WallSegment], ModelError> {
        Ok(&self.wall(id)?.segments)
    }

    /// Rebuilds the wall's segments from scratch.
    ///
    /// On failure the previous segments are left untouched.
    ///
    /// # Errors
    ///
    /// Returns the tessellation error for invalid wall or opening geometry.
    pub fn retessellate(&mut self, id: WallId) -> Result<&[WallSegment]> {
        let segments = TessellateWall::new(id).execute(self)?;
        debug!(wall = ?id, segments = segments.len(), "wall tessellated");
        let wall = self.wall_mut(id)?;
        wall.segments = segments;
        Ok(&wall.segments)
    }

    /// Removes a wall together with its openings and their vertices.
    ///
    /// The wall's end vertices stay, since neighbouring walls share them.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is not found.
    pub fn remove_wall(&mut self, id: WallId) -> std::result::Result<WallData, ModelError> {
        let wall = self
            .walls
            .remove(id)
            .ok_or(ModelError::EntityNotFound("wall"))?;
        if let Some(location) = self.locations.get_mut(wall.location) {
            location.walls.retain(|&w| w != id);
        }
        for &opening_id in &wall.openings {
            self.discard_opening(opening_id);
        }
        Ok(wall)
    }

    // --- Opening operations ---

    /// Returns a reference to the opening data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn opening(&self, id: OpeningId) -> std::result::Result<&OpeningData, ModelError> {
        self.openings
            .get(id)
            .ok_or(ModelError::EntityNotFound("opening"))
    }

    /// Appends an opening to a wall and re-tessellates the wall.
    ///
    /// Both steps happen as one unit: if the new opening makes the wall
    /// geometry invalid, the opening and its vertices are removed again and
    /// the wall keeps its previous segments.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is missing or the tessellation fails.
    pub fn attach_opening(&mut self, wall: WallId, draft: OpeningDraft) -> Result<OpeningId> {
        self.wall(wall)?;
        let start = self.add_vertex(VertexData::new(draft.start, VertexKind::Opening));
        let end = self.add_vertex(VertexData::new(draft.end, VertexKind::Opening));
        let id = self.openings.insert(OpeningData {
            kind: draft.kind,
            start,
            end,
            sill: draft.sill,
            height: draft.height,
            wall,
        });
        self.wall_mut(wall)?.openings.push(id);

        match TessellateWall::new(wall).execute(self) {
            Ok(segments) => {
                debug!(
                    wall = ?wall,
                    opening = ?id,
                    kind = ?draft.kind,
                    segments = segments.len(),
                    "opening attached"
                );
                self.wall_mut(wall)?.segments = segments;
                Ok(id)
            }
            Err(err) => {
                warn!(wall = ?wall, kind = ?draft.kind, %err, "opening rejected");
                self.wall_mut(wall)?.openings.retain(|&o| o != id);
                self.discard_opening(id);
                Err(err)
            }
        }
    }

    fn discard_opening(&mut self, id: OpeningId) {
        if let Some(opening) = self.openings.remove(id) {
            self.vertices.remove(opening.start);
            self.vertices.remove(opening.end);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{GeometryError, RoomshotError};
    use crate::math::Point3;

    fn room(store: &mut RoomStore, height: f64) -> LocationId {
        let floor = store.add_vertex(VertexData::new(Point3::origin(), VertexKind::Floor));
        let ceiling = store.add_vertex(VertexData::new(
            Point3::new(0.0, height, 0.0),
            VertexKind::Ceiling,
        ));
        store.add_location(LocationData {
            floor: Some(floor),
            ceiling: Some(ceiling),
            walls: Vec::new(),
        })
    }

    fn wall(store: &mut RoomStore, location: LocationId, a: Point3, b: Point3) -> WallId {
        let start = store.add_vertex(VertexData::new(a, VertexKind::Wall));
        let end = store.add_vertex(VertexData::new(b, VertexKind::Wall));
        store
            .add_wall(WallData::new(location, start, end, 0.1))
            .unwrap()
    }

    fn door(x0: f64, x1: f64) -> OpeningDraft {
        OpeningDraft {
            kind: OpeningKind::Door,
            start: Point3::new(x0, 0.0, 0.0),
            end: Point3::new(x1, 0.0, 0.0),
            sill: 0.0,
            height: 2.0,
        }
    }

    #[test]
    fn wall_height_tracks_location() {
        let mut store = RoomStore::new();
        let loc = room(&mut store, 2.5);
        let w = wall(&mut store, loc, Point3::origin(), Point3::new(4.0, 0.0, 0.0));
        assert!((store.wall_height(w).unwrap() - 2.5).abs() < 1e-12);
        assert_eq!(store.location(loc).unwrap().walls, vec![w]);
    }

    #[test]
    fn missing_ceiling_is_reported() {
        let mut store = RoomStore::new();
        let loc = store.add_location(LocationData::new());
        assert!(matches!(
            store.location_height(loc),
            Err(ModelError::MissingElevation("ceiling"))
        ));
    }

    #[test]
    fn attach_opening_regenerates_segments() {
        let mut store = RoomStore::new();
        let loc = room(&mut store, 2.5);
        let w = wall(&mut store, loc, Point3::origin(), Point3::new(4.0, 0.0, 0.0));
        assert_eq!(store.retessellate(w).unwrap().len(), 1);

        let o = store.attach_opening(w, door(1.0, 2.0)).unwrap();
        assert_eq!(store.wall(w).unwrap().openings, vec![o]);
        assert_eq!(store.segments(w).unwrap().len(), 4);
        assert_eq!(store.opening(o).unwrap().wall, w);
    }

    #[test]
    fn rejected_opening_rolls_back() {
        let mut store = RoomStore::new();
        let loc = room(&mut store, 2.5);
        let w = wall(&mut store, loc, Point3::origin(), Point3::new(4.0, 0.0, 0.0));
        store.retessellate(w).unwrap();
        let vertex_count = store.vertices.len();

        let mut too_tall = door(1.0, 2.0);
        too_tall.height = 3.0;
        let err = store.attach_opening(w, too_tall).unwrap_err();
        assert!(matches!(
            err,
            RoomshotError::Geometry(GeometryError::OpeningOutOfBounds { .. })
        ));

        let data = store.wall(w).unwrap();
        assert!(data.openings.is_empty());
        assert_eq!(data.segments.len(), 1);
        assert_eq!(store.vertices.len(), vertex_count);
        assert!(store.openings.is_empty());
    }

    #[test]
    fn failed_retessellation_keeps_previous_segments() {
        let mut store = RoomStore::new();
        let loc = room(&mut store, 2.5);
        let w = wall(&mut store, loc, Point3::origin(), Point3::new(4.0, 0.0, 0.0));
        store.retessellate(w).unwrap();
        store.wall_mut(w).unwrap().thickness = 0.0;
        assert!(store.retessellate(w).is_err());
        assert_eq!(store.segments(w).unwrap().len(), 1);
    }

    #[test]
    fn location_vertices_are_distinct() {
        let mut store = RoomStore::new();
        let loc = room(&mut store, 2.5);
        let a = store.add_vertex(VertexData::new(Point3::origin(), VertexKind::Wall));
        let b = store.add_vertex(VertexData::new(Point3::new(4.0, 0.0, 0.0), VertexKind::Wall));
        let c = store.add_vertex(VertexData::new(Point3::new(4.0, 0.0, 4.0), VertexKind::Wall));
        for (s, e) in [(a, b), (b, c), (c, a)] {
            store.add_wall(WallData::new(loc, s, e, 0.1)).unwrap();
        }
        assert_eq!(store.location_vertices(loc).unwrap(), vec![a, b, c]);
    }

    #[test]
    fn remove_wall_detaches_openings() {
        let mut store = RoomStore::new();
        let loc = room(&mut store, 2.5);
        let w = wall(&mut store, loc, Point3::origin(), Point3::new(4.0, 0.0, 0.0));
        let o = store.attach_opening(w, door(1.0, 2.0)).unwrap();

        store.remove_wall(w).unwrap();
        assert!(store.location(loc).unwrap().walls.is_empty());
        assert!(store.opening(o).is_err());
        assert!(store.wall(w).is_err());
    }
}
