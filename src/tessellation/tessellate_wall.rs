use std::cmp::Ordering;
use std::f64::consts::FRAC_PI_2;

use crate::error::{GeometryError, Result};
use crate::math::intersect_2d::circle_circle_intersect_2d;
use crate::math::polar_2d::{edge_angle_radians, polar_to_cartesian};
use crate::math::{ground, ground_distance, lift, Point2, Point3, Vector2, TOLERANCE};
use crate::model::{RoomStore, WallId};

use super::{BoxFootprint, MakeBoxMesh, SegmentKind, WallSegment};

/// Resolved geometry of a wall.
#[derive(Debug, Clone, Copy)]
pub struct WallFrame {
    /// Start of the centerline.
    pub start: Point3,
    /// End of the centerline.
    pub end: Point3,
    pub thickness: f64,
    pub height: f64,
}

/// Resolved geometry of an opening.
#[derive(Debug, Clone, Copy)]
pub struct OpeningFootprint {
    pub start: Point3,
    pub end: Point3,
    pub sill: f64,
    pub height: f64,
}

/// Tessellates a stored wall and its openings into tagged box segments.
pub struct TessellateWall {
    wall: WallId,
}

impl TessellateWall {
    /// Creates a new `TessellateWall` operation.
    #[must_use]
    pub fn new(wall: WallId) -> Self {
        Self { wall }
    }

    /// Executes the tessellation. The store is not modified.
    ///
    /// # Errors
    ///
    /// Returns a model error if the wall, its vertices, its openings or its
    /// location's elevation are missing, and a [`GeometryError`] if the
    /// geometry is invalid.
    pub fn execute(&self, store: &RoomStore) -> Result<Vec<WallSegment>> {
        let wall = store.wall(self.wall)?;
        let frame = WallFrame {
            start: store.vertex(wall.start)?.point,
            end: store.vertex(wall.end)?.point,
            thickness: wall.thickness,
            height: store.wall_height(self.wall)?,
        };

        let mut openings = Vec::with_capacity(wall.openings.len());
        for &id in &wall.openings {
            let opening = store.opening(id)?;
            openings.push(OpeningFootprint {
                start: store.vertex(opening.start)?.point,
                end: store.vertex(opening.end)?.point,
                sill: opening.sill,
                height: opening.height,
            });
        }

        Ok(tessellate_wall(&frame, &openings)?)
    }
}

/// An opening placed on the wall, with its points on both faces.
struct Cutout {
    /// Inner edge point closer to the wall start.
    near: Point2,
    /// Inner edge point farther from the wall start.
    far: Point2,
    outer_near: Point2,
    outer_far: Point2,
    /// Position of `far` along the wall.
    far_t: f64,
    sill: f64,
    height: f64,
}

/// Splits a wall into boxes around its openings.
///
/// With no openings the result is one full-height box. With `n` openings it
/// is `3n + 1` boxes: for each opening, in order of distance from the wall
/// start, a full-height box up to the opening, a box below it and a box above
/// it; then a final full-height box to the wall end.
///
/// # Errors
///
/// Returns a [`GeometryError`] for a zero-length wall, a non-positive
/// thickness or height, a zero-length opening, an opening outside the wall
/// (along it, above it, or farther from its line than its thickness), or
/// overlapping openings. No partial output is produced.
pub fn tessellate_wall(
    wall: &WallFrame,
    openings: &[OpeningFootprint],
) -> std::result::Result<Vec<WallSegment>, GeometryError> {
    if !is_positive(wall.thickness) {
        return Err(GeometryError::NonPositiveThickness(wall.thickness));
    }
    if !is_positive(wall.height) {
        return Err(GeometryError::NonPositiveHeight(wall.height));
    }
    let length = ground_distance(&wall.start, &wall.end);
    if !is_positive(length) {
        return Err(GeometryError::ZeroLengthWall);
    }

    let start = ground(&wall.start);
    let end = ground(&wall.end);
    let angle = edge_angle_radians(&start, &end);
    let back_start = polar_to_cartesian(&start, angle - FRAC_PI_2, wall.thickness);
    let back_end = polar_to_cartesian(&end, angle - FRAC_PI_2, wall.thickness);

    if openings.is_empty() {
        let footprint = BoxFootprint {
            front_start: wall.start,
            front_end: wall.end,
            back_start: lift(&back_start, wall.start.y),
            back_end: lift(&back_end, wall.end.y),
        };
        return Ok(vec![full(footprint, wall.height)]);
    }

    let cutouts = place_cutouts(wall, length, openings)?;
    let base_y = wall.start.y;
    let at_base = |p: &Point2| lift(p, base_y);

    let mut segments = Vec::with_capacity(3 * cutouts.len() + 1);
    let mut front = wall.start;
    let mut back = lift(&back_start, base_y);
    for cut in &cutouts {
        segments.push(full(
            BoxFootprint {
                front_start: front,
                front_end: at_base(&cut.near),
                back_start: back,
                back_end: at_base(&cut.outer_near),
            },
            wall.height,
        ));

        segments.push(partial(cut, base_y, cut.sill));

        let top = cut.sill + cut.height;
        segments.push(partial(cut, base_y + top, wall.height - top));

        front = at_base(&cut.far);
        back = at_base(&cut.outer_far);
    }
    segments.push(full(
        BoxFootprint {
            front_start: front,
            front_end: wall.end,
            back_start: back,
            back_end: lift(&back_end, wall.end.y),
        },
        wall.height,
    ));

    Ok(segments)
}

fn full(footprint: BoxFootprint, height: f64) -> WallSegment {
    WallSegment {
        kind: SegmentKind::FullWall,
        mesh: MakeBoxMesh::new(footprint, height).execute(),
    }
}

fn partial(cut: &Cutout, y: f64, height: f64) -> WallSegment {
    let footprint = BoxFootprint {
        front_start: lift(&cut.near, y),
        front_end: lift(&cut.far, y),
        back_start: lift(&cut.outer_near, y),
        back_end: lift(&cut.outer_far, y),
    };
    WallSegment {
        kind: SegmentKind::PartialWall,
        mesh: MakeBoxMesh::new(footprint, height).execute(),
    }
}

/// Sorts, validates and offsets the openings.
///
/// Openings are ordered by the ground distance of their start from the wall
/// start; ties fall back to end distance, sill and height so the order depends
/// only on geometry. Each opening's edge is oriented along the wall, so the
/// outer points always land on the wall's back face and adjacent segments
/// share their seams.
fn place_cutouts(
    wall: &WallFrame,
    length: f64,
    openings: &[OpeningFootprint],
) -> std::result::Result<Vec<Cutout>, GeometryError> {
    let mut sorted: Vec<&OpeningFootprint> = openings.iter().collect();
    let key = |o: &OpeningFootprint| {
        (
            ground_distance(&o.start, &wall.start),
            ground_distance(&o.end, &wall.start),
            o.sill,
            o.height,
        )
    };
    sorted.sort_by(|a, b| {
        let (ka, kb) = (key(*a), key(*b));
        ka.0.total_cmp(&kb.0)
            .then(ka.1.total_cmp(&kb.1))
            .then(ka.2.total_cmp(&kb.2))
            .then(ka.3.total_cmp(&kb.3))
    });

    let origin = ground(&wall.start);
    let dir: Vector2 = (ground(&wall.end) - origin) / length;
    let along = |p: &Point2| (*p - origin).dot(&dir);
    let offset = |p: &Point2| dir.perp(&(*p - origin)).abs();

    let mut cutouts: Vec<Cutout> = Vec::with_capacity(sorted.len());
    for opening in sorted {
        check_range("sill", opening.sill, 0.0, wall.height)?;
        check_range("height", opening.height, 0.0, wall.height)?;
        check_range("sill + height", opening.sill + opening.height, 0.0, wall.height)?;

        let a = ground(&opening.start);
        let b = ground(&opening.end);
        let span = nalgebra::distance(&a, &b);
        if !is_positive(span) {
            return Err(GeometryError::ZeroLengthOpening);
        }
        let (near, far) = match along(&a).partial_cmp(&along(&b)) {
            Some(Ordering::Greater) => (b, a),
            _ => (a, b),
        };
        let near_t = along(&near);
        let far_t = along(&far);
        check_range("start", near_t, 0.0, length)?;
        check_range("end", far_t, 0.0, length)?;
        check_range("offset", offset(&near), 0.0, wall.thickness)?;
        check_range("offset", offset(&far), 0.0, wall.thickness)?;

        if let Some(prev) = cutouts.last() {
            if prev.far_t > near_t + TOLERANCE {
                return Err(GeometryError::OverlappingOpenings {
                    end: prev.far_t,
                    next_start: near_t,
                });
            }
        }

        let diagonal = wall.thickness.hypot(span);
        cutouts.push(Cutout {
            outer_near: circle_circle_intersect_2d(&near, wall.thickness, &far, diagonal, false),
            outer_far: circle_circle_intersect_2d(&far, wall.thickness, &near, diagonal, true),
            near,
            far,
            far_t,
            sill: opening.sill,
            height: opening.height,
        });
    }
    Ok(cutouts)
}

/// False for NaN as well as for values at or below the tolerance.
fn is_positive(value: f64) -> bool {
    value > TOLERANCE
}

fn check_range(
    what: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> std::result::Result<(), GeometryError> {
    if value >= min - TOLERANCE && value <= max + TOLERANCE {
        Ok(())
    } else {
        Err(GeometryError::OpeningOutOfBounds {
            what,
            value,
            min,
            max,
        })
    }
}
