use tracing::{debug, trace};

use crate::error::Result;
use crate::math::Point3;
use crate::model::{OpeningDraft, OpeningId, OpeningKind, RoomStore, WallId};

/// Which edge of the opening the next picked point marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeSlot {
    Left,
    Top,
    Right,
    Bottom,
}

impl EdgeSlot {
    /// The slot after this one, wrapping from `Bottom` to `Left`.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            EdgeSlot::Left => EdgeSlot::Top,
            EdgeSlot::Top => EdgeSlot::Right,
            EdgeSlot::Right => EdgeSlot::Bottom,
            EdgeSlot::Bottom => EdgeSlot::Left,
        }
    }

    /// The slot whose point completes an opening of `kind`.
    ///
    /// Doors stand on the floor, so they finish at `Right` without a bottom edge.
    #[must_use]
    pub fn terminal(kind: OpeningKind) -> Self {
        match kind {
            OpeningKind::Door => EdgeSlot::Right,
            OpeningKind::Window => EdgeSlot::Bottom,
        }
    }

    fn index(self) -> usize {
        match self {
            EdgeSlot::Left => 0,
            EdgeSlot::Top => 1,
            EdgeSlot::Right => 2,
            EdgeSlot::Bottom => 3,
        }
    }
}

/// One picked point aimed at an opening edge.
#[derive(Debug, Clone, Copy)]
pub struct EdgeShot {
    pub point: Point3,
    pub kind: OpeningKind,
    /// Wall the opening goes into. The one given with the final point wins.
    pub wall: WallId,
}

/// What an edge shot produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    /// The point was stored; the capture now waits for this slot.
    Recorded { next: EdgeSlot },
    /// The sequence completed and the opening was attached to its wall.
    OpeningCreated(OpeningId),
}

/// Points collected so far for the opening being captured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpeningShotState {
    slot: EdgeSlot,
    points: [Option<Point3>; 4],
    kind: Option<OpeningKind>,
    wall: Option<WallId>,
}

impl Default for OpeningShotState {
    fn default() -> Self {
        Self {
            slot: EdgeSlot::Left,
            points: [None; 4],
            kind: None,
            wall: None,
        }
    }
}

impl OpeningShotState {
    /// The slot the next point will fill.
    #[must_use]
    pub fn slot(&self) -> EdgeSlot {
        self.slot
    }

    /// The point recorded for `slot` in the current sequence, if any.
    #[must_use]
    pub fn point(&self, slot: EdgeSlot) -> Option<Point3> {
        self.points[slot.index()]
    }

    /// Records one point; on the terminal slot, builds and attaches the opening.
    ///
    /// The returned state after a completed opening is the empty state.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall or its floor elevation is missing, or if
    /// the wall rejects the opening's geometry. The caller should discard the
    /// sequence in that case.
    pub fn transition(
        mut self,
        shot: EdgeShot,
        store: &mut RoomStore,
    ) -> Result<(OpeningShotState, ShotOutcome)> {
        let terminal = self.slot == EdgeSlot::terminal(shot.kind);
        self.points[self.slot.index()] = Some(shot.point);
        self.kind = Some(shot.kind);
        self.wall = Some(shot.wall);

        if !terminal {
            self.slot = self.slot.next();
            trace!(next = ?self.slot, kind = ?shot.kind, "edge recorded");
            return Ok((self, ShotOutcome::Recorded { next: self.slot }));
        }

        let location = store.wall(shot.wall)?.location;
        let floor_y = store.floor_elevation(location)?;
        let draft = self.draft(shot.kind, floor_y);
        let opening = store.attach_opening(shot.wall, draft)?;
        debug!(
            opening = ?opening,
            kind = ?shot.kind,
            sill = draft.sill,
            height = draft.height,
            "opening captured"
        );
        Ok((OpeningShotState::default(), ShotOutcome::OpeningCreated(opening)))
    }

    /// Builds the opening from the recorded slots.
    ///
    /// Unrecorded slots read as a point on the floor. The sill and height
    /// formulas differ per kind: a window's sill is the raw bottom elevation,
    /// not measured from the floor.
    fn draft(&self, kind: OpeningKind, floor_y: f64) -> OpeningDraft {
        let on_floor = Point3::new(0.0, floor_y, 0.0);
        let at = |slot: EdgeSlot| self.point(slot).unwrap_or(on_floor);
        let (left, top, right, bottom) = (
            at(EdgeSlot::Left),
            at(EdgeSlot::Top),
            at(EdgeSlot::Right),
            at(EdgeSlot::Bottom),
        );

        let (sill, height) = match kind {
            OpeningKind::Door => (bottom.y - floor_y, top.y - floor_y),
            OpeningKind::Window => (bottom.y, top.y - bottom.y),
        };
        OpeningDraft {
            kind,
            start: Point3::new(left.x, floor_y, left.z),
            end: Point3::new(right.x, floor_y, right.z),
            sill,
            height,
        }
    }
}

/// Captures doors and windows edge by edge.
///
/// Points cycle through left, top, right and bottom. A door completes on its
/// third point, a window on its fourth.
#[derive(Debug, Default)]
pub struct OpeningCapture {
    state: OpeningShotState,
}

impl OpeningCapture {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &OpeningShotState {
        &self.state
    }

    /// Drops any partially captured opening.
    pub fn reset(&mut self) {
        self.state = OpeningShotState::default();
    }

    /// Feeds one picked point for an opening of `kind` in `wall`.
    ///
    /// # Errors
    ///
    /// See [`OpeningShotState::transition`]. A failed final point discards
    /// the whole sequence.
    pub fn shot_edge(
        &mut self,
        store: &mut RoomStore,
        point: Point3,
        kind: OpeningKind,
        wall: WallId,
    ) -> Result<ShotOutcome> {
        match self.state.transition(EdgeShot { point, kind, wall }, store) {
            Ok((next, outcome)) => {
                self.state = next;
                Ok(outcome)
            }
            Err(err) => {
                self.reset();
                Err(err)
            }
        }
    }
}
