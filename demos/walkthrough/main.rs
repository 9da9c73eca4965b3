//! Roomshot walkthrough: captures a small room with a door and a window.
//!
//! Usage:
//! ```text
//! cargo run --example walkthrough
//! RUST_LOG=roomshot=debug cargo run --example walkthrough
//! ```

use roomshot::capture::{OpeningCapture, PerimeterCapture, PerimeterEvent};
use roomshot::math::Point3;
use roomshot::model::{OpeningKind, RoomStore};
use roomshot::{CaptureConfig, RoomshotError};

fn main() -> Result<(), RoomshotError> {
    // Default: WARN for everything, INFO for roomshot.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("walkthrough=info".parse().unwrap_or_default())
        .add_directive("roomshot=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut store = RoomStore::new();
    let mut perimeter = PerimeterCapture::new(&mut store, CaptureConfig::default());
    perimeter.submit_floor(&mut store, Point3::new(1.2, 0.0, 0.7))?;
    perimeter.submit_ceiling(&mut store, Point3::new(0.9, 2.6, 1.1))?;

    let corners = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(5.0, 0.0, 0.0),
        Point3::new(5.0, 0.0, 3.5),
        Point3::new(0.0, 0.0, 3.5),
        Point3::new(0.08, 0.0, -0.05),
    ];
    let mut walls = Vec::new();
    for p in corners {
        match perimeter.submit_point(&mut store, p)? {
            PerimeterEvent::WallPlaced { wall, .. } | PerimeterEvent::LoopClosed(wall) => {
                walls.push(wall);
            }
            PerimeterEvent::AnchorPlaced(_) => {}
        }
    }
    tracing::info!(walls = walls.len(), closed = perimeter.is_closed(), "perimeter done");

    let mut openings = OpeningCapture::new();
    let front = walls[0];
    for p in [
        Point3::new(0.8, 0.1, 0.0),
        Point3::new(1.0, 2.1, 0.0),
        Point3::new(1.7, 1.0, 0.0),
    ] {
        openings.shot_edge(&mut store, p, OpeningKind::Door, front)?;
    }
    for p in [
        Point3::new(2.6, 1.4, 0.0),
        Point3::new(3.2, 2.0, 0.0),
        Point3::new(4.2, 1.5, 0.0),
        Point3::new(3.4, 0.9, 0.0),
    ] {
        openings.shot_edge(&mut store, p, OpeningKind::Window, front)?;
    }

    for (i, &wall) in walls.iter().enumerate() {
        let segments = store.segments(wall)?;
        println!("wall {i}: {} segments", segments.len());
        for s in segments {
            let b = s.mesh.bounds;
            println!(
                "  {:<18} x [{:.2}, {:.2}] y [{:.2}, {:.2}] z [{:.2}, {:.2}]",
                s.kind.tag(),
                b.min.x,
                b.max.x,
                b.min.y,
                b.max.y,
                b.min.z,
                b.max.z
            );
        }
    }
    Ok(())
}
