use super::{PixelPoint, Position, Source, TileId};

/// Structural errors
///
/// An invalid board is not an error, it is reported by `Validator` and
/// `Session::is_valid`.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("the tile bank is empty")]
    EmptyBank,

    #[error("no cell is centered on pixel {0}")]
    UnknownCell(PixelPoint),

    #[error("position {0} is outside of the board")]
    OffBoard(Position),

    #[error("tile {0} is neither on the board nor on the bench")]
    NotInPlay(TileId),

    #[error("tile {0} is not on the {1}")]
    NotFound(TileId, Source),

    #[error("tile {0} is moved twice in the same drop")]
    DuplicateTile(TileId),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("dictionary error: {0}")]
    Dictionary(#[from] fst::Error),
}
