use tracing::{debug, warn};

use crate::config::CaptureConfig;
use crate::error::{CaptureError, GeometryError, ModelError, Result, RoomshotError};
use crate::math::{ground_distance, Point3, TOLERANCE};
use crate::model::{
    LocationData, LocationId, RoomStore, VertexData, VertexId, VertexKind, WallData, WallId,
};

/// Progress of the wall-loop capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerimeterState {
    /// No vertex placed yet.
    NoAnchor,
    /// The chain has started at `anchor` and is open at `current`.
    Anchored { anchor: VertexId, current: VertexId },
    /// The closing wall back to `anchor` exists.
    Closed { anchor: VertexId },
}

/// A point handed to the perimeter capture.
#[derive(Debug, Clone, Copy)]
pub enum PerimeterInput {
    /// Ordinary capture: closes the loop only if close enough to the anchor.
    Point(Point3),
    /// The caller wants this point to close the loop.
    Close(Point3),
}

/// What an accepted perimeter input produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerimeterEvent {
    /// The first vertex of the loop.
    AnchorPlaced(VertexId),
    /// A new corner and the wall leading to it.
    WallPlaced { vertex: VertexId, wall: WallId },
    /// The wall from the last corner back to the anchor.
    LoopClosed(WallId),
}

impl PerimeterState {
    /// Applies one input, creating vertices and walls on `location`.
    ///
    /// Only the distance to the anchor is checked for closing; intermediate
    /// vertices are never compared against. Points are dropped to the floor
    /// elevation once a floor has been captured.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::LoopNotClosed`] for a `Close` input too far from
    /// the anchor, [`CaptureError::NothingToClose`] when closing without a wall
    /// to close with, and [`CaptureError::LoopAlreadyClosed`] after closing.
    /// A point on top of the previous corner would make a zero-length wall and
    /// is rejected with [`GeometryError::ZeroLengthWall`].
    /// The store is left unchanged on error.
    pub fn transition(
        self,
        input: PerimeterInput,
        store: &mut RoomStore,
        location: LocationId,
        config: &CaptureConfig,
    ) -> Result<(PerimeterState, PerimeterEvent)> {
        store.location(location)?;
        let (raw, must_close) = match input {
            PerimeterInput::Point(p) => (p, false),
            PerimeterInput::Close(p) => (p, true),
        };
        let point = match store.floor_elevation(location) {
            Ok(y) => Point3::new(raw.x, y, raw.z),
            Err(_) => raw,
        };

        match self {
            PerimeterState::Closed { .. } => Err(CaptureError::LoopAlreadyClosed.into()),
            PerimeterState::NoAnchor => {
                if must_close {
                    return Err(CaptureError::NothingToClose.into());
                }
                let v = store.add_vertex(VertexData::new(point, VertexKind::Wall));
                debug!(vertex = ?v, x = point.x, z = point.z, "anchor placed");
                Ok((
                    PerimeterState::Anchored {
                        anchor: v,
                        current: v,
                    },
                    PerimeterEvent::AnchorPlaced(v),
                ))
            }
            PerimeterState::Anchored { anchor, current } => {
                let distance = ground_distance(&point, &store.vertex(anchor)?.point);
                let closes = distance < config.closing_epsilon;

                if closes || must_close {
                    if !closes {
                        warn!(distance, "close rejected");
                        return Err(CaptureError::LoopNotClosed { distance }.into());
                    }
                    if current == anchor {
                        return Err(CaptureError::NothingToClose.into());
                    }
                    let wall = place_wall(store, location, current, anchor, config)?;
                    debug!(wall = ?wall, distance, "loop closed");
                    return Ok((
                        PerimeterState::Closed { anchor },
                        PerimeterEvent::LoopClosed(wall),
                    ));
                }

                if ground_distance(&point, &store.vertex(current)?.point) <= TOLERANCE {
                    warn!(x = point.x, z = point.z, "duplicate corner rejected");
                    return Err(GeometryError::ZeroLengthWall.into());
                }
                let vertex = store.add_vertex(VertexData::new(point, VertexKind::Wall));
                let wall = place_wall(store, location, current, vertex, config)?;
                debug!(vertex = ?vertex, wall = ?wall, x = point.x, z = point.z, "wall placed");
                Ok((
                    PerimeterState::Anchored {
                        anchor,
                        current: vertex,
                    },
                    PerimeterEvent::WallPlaced { vertex, wall },
                ))
            }
        }
    }
}

fn place_wall(
    store: &mut RoomStore,
    location: LocationId,
    start: VertexId,
    end: VertexId,
    config: &CaptureConfig,
) -> Result<WallId> {
    let wall = store.add_wall(WallData::new(location, start, end, config.wall_thickness))?;
    match store.retessellate(wall) {
        Ok(_) => {}
        Err(RoomshotError::Model(ModelError::MissingElevation(which))) => {
            debug!(wall = ?wall, which, "segments deferred until elevations exist");
        }
        Err(err) => warn!(wall = ?wall, %err, "wall left without segments"),
    }
    Ok(wall)
}

/// Captures a room's wall loop and elevations point by point.
#[derive(Debug)]
pub struct PerimeterCapture {
    location: LocationId,
    state: PerimeterState,
    config: CaptureConfig,
}

impl PerimeterCapture {
    /// Starts a capture on a fresh, empty location.
    pub fn new(store: &mut RoomStore, config: CaptureConfig) -> Self {
        Self {
            location: store.add_location(LocationData::new()),
            state: PerimeterState::NoAnchor,
            config,
        }
    }

    /// Abandons the current location and starts over on a fresh one.
    pub fn init(&mut self, store: &mut RoomStore) {
        self.location = store.add_location(LocationData::new());
        self.state = PerimeterState::NoAnchor;
        debug!(location = ?self.location, "perimeter capture reset");
    }

    /// The location being captured.
    #[must_use]
    pub fn location(&self) -> LocationId {
        self.location
    }

    #[must_use]
    pub fn state(&self) -> PerimeterState {
        self.state
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self.state, PerimeterState::Closed { .. })
    }

    /// Feeds one picked point.
    ///
    /// # Errors
    ///
    /// See [`PerimeterState::transition`].
    pub fn submit_point(&mut self, store: &mut RoomStore, point: Point3) -> Result<PerimeterEvent> {
        self.apply(store, PerimeterInput::Point(point))
    }

    /// Closes the loop with `point`, returning the closing wall.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::LoopNotClosed`] if `point` is not within the
    /// closing distance of the first vertex.
    pub fn close(&mut self, store: &mut RoomStore, point: Point3) -> Result<WallId> {
        match self.apply(store, PerimeterInput::Close(point))? {
            PerimeterEvent::LoopClosed(wall) => Ok(wall),
            // Close inputs only ever succeed by closing.
            PerimeterEvent::AnchorPlaced(_) | PerimeterEvent::WallPlaced { .. } => {
                Err(CaptureError::NothingToClose.into())
            }
        }
    }

    /// Records the floor elevation. Only `point.y` is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the location no longer exists.
    pub fn submit_floor(&mut self, store: &mut RoomStore, point: Point3) -> Result<VertexId> {
        let v = store.add_vertex(VertexData::new(
            Point3::new(0.0, point.y, 0.0),
            VertexKind::Floor,
        ));
        store.location_mut(self.location)?.floor = Some(v);
        debug!(y = point.y, "floor captured");
        self.refresh_walls(store)?;
        Ok(v)
    }

    /// Records the ceiling elevation. Only `point.y` is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the location no longer exists.
    pub fn submit_ceiling(&mut self, store: &mut RoomStore, point: Point3) -> Result<VertexId> {
        let v = store.add_vertex(VertexData::new(
            Point3::new(0.0, point.y, 0.0),
            VertexKind::Ceiling,
        ));
        store.location_mut(self.location)?.ceiling = Some(v);
        debug!(y = point.y, "ceiling captured");
        self.refresh_walls(store)?;
        Ok(v)
    }

    fn apply(&mut self, store: &mut RoomStore, input: PerimeterInput) -> Result<PerimeterEvent> {
        let (next, event) = self
            .state
            .transition(input, store, self.location, &self.config)?;
        self.state = next;
        Ok(event)
    }

    /// Wall heights follow the elevations, so existing walls are rebuilt.
    fn refresh_walls(&self, store: &mut RoomStore) -> Result<()> {
        let walls = store.location(self.location)?.walls.clone();
        for wall in walls {
            if let Err(err) = store.retessellate(wall) {
                warn!(wall = ?wall, %err, "wall not rebuilt after elevation change");
            }
        }
        Ok(())
    }
}
