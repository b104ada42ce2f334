use thiserror::Error;

/// Failures surfaced by the maze engine.
///
/// Every failure here is local and synchronous. None of them occur when the
/// engine is driven correctly end-to-end; they indicate malformed external
/// input (a corrupted maze file) or a misbehaving policy, so each one is
/// surfaced to the immediate caller instead of retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MazeError {
    /// Grid construction with a zero dimension.
    #[error("invalid maze dimensions {width}x{height}")]
    InvalidDimension { width: u16, height: u16 },

    /// Coordinate outside the grid.
    #[error("coordinate {coord:?} is outside the grid")]
    OutOfBounds { coord: (u16, u16) },

    /// Wall-open attempted between two cells that do not share an edge.
    #[error("cells {a:?} and {b:?} are not adjacent")]
    NotAdjacent { a: (u16, u16), b: (u16, u16) },

    /// A direction label that is not one of NORTH/SOUTH/EAST/WEST.
    #[error("unrecognized direction label {0:?}")]
    InvalidDirection(String),

    /// No path exists between two cells. Cannot happen on a generated maze
    /// (the open walls form a spanning tree); loaded grids can get here.
    #[error("no path from {from:?} to {to:?}")]
    Unreachable { from: (u16, u16), to: (u16, u16) },
}
