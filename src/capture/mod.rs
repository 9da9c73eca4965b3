//! Interactive capture of room structure from picked 3D points.
//!
//! [`PerimeterCapture`] turns points into the wall loop of a location, and
//! [`OpeningCapture`] turns points into doors and windows on those walls.
//! Both hold an explicit state value and thread the [`RoomStore`] through
//! every call.
//!
//! [`RoomStore`]: crate::model::RoomStore

mod opening;
mod perimeter;

pub use opening::{EdgeShot, EdgeSlot, OpeningCapture, OpeningShotState, ShotOutcome};
pub use perimeter::{PerimeterCapture, PerimeterEvent, PerimeterInput, PerimeterState};

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::config::CaptureConfig;
    use crate::math::Point3;
    use crate::model::{Entity, Materialized, OpeningKind, RoomStore};
    use crate::tessellation::SegmentKind;

    #[test]
    fn room_with_door_end_to_end() {
        let mut store = RoomStore::new();
        let mut perimeter = PerimeterCapture::new(&mut store, CaptureConfig::default());
        perimeter
            .submit_floor(&mut store, Point3::new(0.3, 0.0, 0.2))
            .unwrap();
        perimeter
            .submit_ceiling(&mut store, Point3::new(0.1, 2.5, 0.4))
            .unwrap();

        let mut walls = Vec::new();
        for p in [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
            Point3::new(4.0, 0.0, 4.0),
            Point3::new(0.0, 0.0, 4.0),
            Point3::new(0.1, 0.0, 0.05),
        ] {
            match perimeter.submit_point(&mut store, p).unwrap() {
                PerimeterEvent::WallPlaced { wall, .. } | PerimeterEvent::LoopClosed(wall) => {
                    walls.push(wall);
                }
                PerimeterEvent::AnchorPlaced(_) => {}
            }
        }
        assert!(perimeter.is_closed());
        assert_eq!(walls.len(), 4);

        let front = walls[0];
        let mut openings = OpeningCapture::new();
        for p in [
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 2.0, 0.0),
            Point3::new(2.0, 1.05, 0.0),
        ] {
            openings
                .shot_edge(&mut store, p, OpeningKind::Door, front)
                .unwrap();
        }

        let Materialized::Wall(segments) = Entity::Wall(front).materialize(&store).unwrap() else {
            panic!("expected wall segments");
        };
        let kinds: Vec<_> = segments.iter().map(|s| s.kind.tag()).collect();
        assert_eq!(
            kinds,
            [
                "fullWallSegment",
                "partialWallSegment",
                "partialWallSegment",
                "fullWallSegment"
            ]
        );
        assert_eq!(segments[0].kind, SegmentKind::FullWall);
        assert_relative_eq!(segments[0].mesh.bounds.max.x, 1.0, epsilon = 1e-9);
        let below = &segments[1].mesh.bounds;
        assert_relative_eq!(below.max.y - below.min.y, 0.0, epsilon = 1e-9);
        let above = &segments[2].mesh.bounds;
        assert_relative_eq!(above.min.y, 2.0, epsilon = 1e-9);
        assert_relative_eq!(above.max.y - above.min.y, 0.5, epsilon = 1e-9);
        assert_relative_eq!(segments[3].mesh.bounds.min.x, 2.0, epsilon = 1e-9);
        assert_relative_eq!(segments[3].mesh.bounds.max.x, 4.0, epsilon = 1e-9);

        for &other in &walls[1..] {
            assert_eq!(store.segments(other).unwrap().len(), 1);
        }
    }
}
