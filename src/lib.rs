
pub mod error;
pub mod grid;
pub mod bank;
pub mod board;
pub mod dictionary;
pub mod validator;
pub mod session;

use std::fmt;
use std::hash::{Hash, Hasher};

pub use error::GameError;
pub use grid::{Grid, Cell, PixelPoint};
pub use bank::Bank;
pub use board::Board;
pub use validator::{Validator, Rules, Report};
pub use session::Session;

// letters are stored as uppercase ascii bytes
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Letter(pub u8);

impl Letter {
    /// None if `c` is not an ascii letter
    pub fn from_char(c: char) -> Option<Self> {
        if c.is_ascii_alphabetic() {
            Some(Letter(c.to_ascii_uppercase() as u8))
        } else {
            None
        }
    }

    pub fn as_char(self) -> char {
        self.0 as char
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
         write!(f, "{}", (self.0 as char).escape_default())
    }
}
impl fmt::Debug for Letter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
         write!(f, "{}", self)
    }
}

/// Identity of a physical tile, two tiles with the same letter have different ids
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u32);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One game piece
///
/// Equality and hashing only look at `id`, the letter and the recorded position
/// are ignored.
#[derive(Debug, Copy, Clone)]
pub struct Tile {
    pub id: TileId,
    pub letter: Letter,
    /// Where the tile sits on the board, None while in the bank or on the bench
    pub position: Option<Position>,
}

impl Tile {
    pub fn new(id: TileId, letter: Letter) -> Self {
        Self { id, letter, position: None }
    }
}

impl PartialEq for Tile {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for Tile {}

impl Hash for Tile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.letter, self.id)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Square {
    Empty,
    Filled(Tile),
}

impl Square {
    pub fn tile(&self) -> Option<&Tile> {
        match self {
            Square::Filled(tile) => Some(tile),
            Square::Empty => None
        }
    }
    pub fn is_filled(&self) -> bool {
        self.tile().is_some()
    }
}

impl Default for Square {
    fn default() -> Self {
        Square::Empty
    }
}

/// Where a tile is taken from when it leaves the player's hands
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Source {
    Board,
    Bench,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Source::Board => write!(f, "board"),
            Source::Bench => write!(f, "bench"),
        }
    }
}

impl std::str::FromStr for Source {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "board" => Ok(Source::Board),
            "bench" => Ok(Source::Bench),
            other => Err(format!("unknown source {:?}, expected board or bench", other)),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Vertical,
    Horizontal,
}

impl Direction {
    pub fn perp(self) -> Self {
        match self {
            Self::Vertical => Self::Horizontal,
            Self::Horizontal => Self::Vertical,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The up to four positions sharing an edge with this one
    ///
    /// Positions past the bottom/right edge are not filtered, `Table::get` does it
    pub fn neighbours(self) -> impl Iterator<Item=Position> {
        let Position { row, col } = self;
        let up = row.checked_sub(1).map(|row| Position { row, col });
        let left = col.checked_sub(1).map(|col| Position { row, col });
        let down = Some(Position { row: row.saturating_add(1), col });
        let right = Some(Position { row, col: col.saturating_add(1) });
        vec![up, left, down, right].into_iter().flatten()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl std::ops::Index<Direction> for Position {
    type Output = usize;
    /// The coordinate that changes in that direction
    fn index(&self, dir: Direction) -> &Self::Output {
        match dir {
            Direction::Vertical => &self.row,
            Direction::Horizontal => &self.col,
        }
    }
}

impl std::ops::IndexMut<Direction> for Position {
    /// The coordinate that changes in that direction
    fn index_mut(&mut self, dir: Direction) -> &mut Self::Output {
        match dir {
            Direction::Vertical => &mut self.row,
            Direction::Horizontal => &mut self.col,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Placement(pub Position, pub Direction);

impl Placement {
    pub fn next(mut self) -> Self {
        self.0[self.1] = self.0[self.1].saturating_add(1);
        self
    }

    /// Stepping back from row or column 0 wraps to `usize::MAX`, which is
    /// never inside a `Table`
    pub fn back(mut self) -> Self {
        self.0[self.1] = self.0[self.1].wrapping_sub(1);
        self
    }

    /// A placement at the same position, but different direction
    pub fn perp(self) -> Self {
        Self(self.0, self.1.perp())
    }
}

#[derive(Debug, Clone)]
pub struct Table<T> {
    squares: Vec<Vec<T>>,
    cols: usize,
}

impl<T> Table<T> {
    pub fn fill_with(rows: usize, cols: usize, el: T) -> Self where T: Clone {
        Self {
            squares: vec![vec![el; cols]; rows],
            cols,
        }
    }

    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(Position) -> T) -> Self {
        let squares = (0..rows).map(|row|
            (0..cols).map(|col| f(Position { row, col })).collect()
        ).collect();
        Self { squares, cols }
    }

    pub fn rows(&self) -> usize {
        self.squares.len()
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows() && pos.col < self.cols
    }

    pub fn get(&self, pos: Position) -> Option<&T> {
        self.squares.get(pos.row)?.get(pos.col)
    }
    pub fn get_mut(&mut self, pos: Position) -> Option<&mut T> {
        self.squares.get_mut(pos.row)?.get_mut(pos.col)
    }
    pub fn set(&mut self, pos: Position, val: T) {
        self.squares[pos.row][pos.col] = val
    }

    /// Row major iteration
    pub fn iter(&self) -> impl Iterator<Item=(Position, &T)> {
        self.squares.iter().enumerate().flat_map(|(row, line)|
            line.iter().enumerate().map(move |(col, el)| (Position { row, col }, el))
        )
    }
}


#[test]
fn tile_identity() {
    use std::collections::HashSet;

    let e1 = Tile::new(TileId(1), Letter(b'E'));
    let e2 = Tile::new(TileId(2), Letter(b'E'));
    let mut moved = e1;
    moved.position = Some(Position::new(3, 4));

    assert_ne!(e1, e2);
    assert_eq!(e1, moved);

    let set: HashSet<Tile> = vec![e1, e2, moved].into_iter().collect();
    assert_eq!(set.len(), 2);
}

#[test]
fn placement_steps() {
    let corner = Placement(Position::new(0, 0), Direction::Horizontal);
    let table = Table::fill_with(3, 3, Square::Empty);

    assert_eq!(corner.next().0, Position::new(0, 1));
    assert_eq!(corner.perp().next().0, Position::new(1, 0));
    // stepping off the edge is outside of any table
    assert!(table.get(corner.back().0).is_none());
    assert!(table.get(corner.perp().back().0).is_none());
    assert!(table.get(Position::new(0, 3)).is_none());
}

#[test]
fn neighbours_at_corner() {
    let mut around: Vec<_> = Position::new(0, 0).neighbours().collect();
    around.sort();
    assert_eq!(around, vec![Position::new(0, 1), Position::new(1, 0)]);
    assert_eq!(Position::new(2, 2).neighbours().count(), 4);
}

#[test]
fn table_shape() {
    let table = Table::from_fn(2, 3, |pos| pos.row * 10 + pos.col);
    assert_eq!(table.rows(), 2);
    assert_eq!(table.cols(), 3);
    assert_eq!(table.get(Position::new(1, 2)), Some(&12));
    assert_eq!(table.iter().map(|(_, v)| *v).collect::<Vec<_>>(), vec![0, 1, 2, 10, 11, 12]);

    let degenerate: Table<u8> = Table::from_fn(0, 4, |_| 0);
    assert_eq!(degenerate.rows(), 0);
    assert_eq!(degenerate.cols(), 4);
    assert!(!degenerate.contains(Position::new(0, 0)));
}

#[test]
fn source_from_str() {
    assert_eq!("board".parse::<Source>(), Ok(Source::Board));
    assert_eq!("bench".parse::<Source>(), Ok(Source::Bench));
    assert!("bank".parse::<Source>().is_err());
}
