use thiserror::Error;

/// Top-level error type for room capture and wall tessellation.
#[derive(Debug, Error)]
pub enum RoomshotError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Capture(#[from] CaptureError),
}

/// Structurally invalid wall or opening geometry.
///
/// Raised by the wall tessellator; the wall's previous segments stay in place.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("wall has zero ground length")]
    ZeroLengthWall,

    #[error("wall thickness must be positive, got {0}")]
    NonPositiveThickness(f64),

    #[error("wall height must be positive, got {0}")]
    NonPositiveHeight(f64),

    #[error("opening has zero ground length")]
    ZeroLengthOpening,

    #[error("opening {what} = {value} is outside [{min}, {max}]")]
    OpeningOutOfBounds {
        what: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("openings overlap along the wall: one ends at {end}, the next starts at {next_start}")]
    OverlappingOpenings { end: f64, next_start: f64 },
}

/// Errors related to the entity store.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("entity not found: {0}")]
    EntityNotFound(&'static str),

    #[error("location has no {0} elevation yet")]
    MissingElevation(&'static str),
}

/// Observable rejections from the capture state machines.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("point is {distance} away from the first vertex, too far to close the loop")]
    LoopNotClosed { distance: f64 },

    #[error("the wall loop is already closed")]
    LoopAlreadyClosed,

    #[error("there is no wall to close the loop with yet")]
    NothingToClose,
}

/// Convenience type alias for results using [`RoomshotError`].
pub type Result<T> = std::result::Result<T, RoomshotError>;
