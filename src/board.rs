use std::fmt;

use super::{GameError, Letter, Position, Square, Table, Tile, TileId};

/// The placed tiles, and the slots they occupy
///
/// The tiles' own `position` is the reference, the slot table is rebuilt from
/// it after every change.
#[derive(Debug, Clone)]
pub struct Board {
    table: Table<Square>,
    placed: Vec<Tile>,
}

impl Board {
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            table: Table::fill_with(rows, cols, Square::Empty),
            placed: vec![],
        }
    }

    pub fn table(&self) -> &Table<Square> {
        &self.table
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.placed
    }

    pub fn len(&self) -> usize {
        self.placed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    pub fn contains(&self, id: TileId) -> bool {
        self.placed.iter().any(|t| t.id == id)
    }

    pub fn tile_at(&self, position: Position) -> Option<&Tile> {
        self.table.get(position)?.tile()
    }

    /// Puts `tile` on `position`, moving it if it is already on the board
    ///
    /// Whatever was on `position` is lifted off and returned
    pub fn place(&mut self, mut tile: Tile, position: Position) -> Result<Option<Tile>, GameError> {
        if !self.table.contains(position) {
            return Err(GameError::OffBoard(position))
        }

        tile.position = Some(position);
        self.placed.retain(|t| t.id != tile.id);

        let displaced = self.placed.iter()
            .position(|t| t.position == Some(position))
            .map(|i| {
                let mut t = self.placed.remove(i);
                t.position = None;
                t
            });

        log::debug!("{} placed at {}", tile, position);
        self.placed.push(tile);
        self.rebuild();

        Ok(displaced)
    }

    /// Lifts a tile off the board
    pub fn take(&mut self, id: TileId) -> Option<Tile> {
        let i = self.placed.iter().position(|t| t.id == id)?;
        let mut tile = self.placed.remove(i);
        tile.position = None;
        self.rebuild();
        Some(tile)
    }

    fn rebuild(&mut self) {
        let mut table = Table::fill_with(self.table.rows(), self.table.cols(), Square::Empty);
        for tile in &self.placed {
            if let Some(pos) = tile.position {
                table.set(pos, Square::Filled(*tile));
            }
        }
        self.table = table;
    }

    /// Builds a board from one line per row
    ///
    /// Letters are tiles, spaces, underscores and dots are empty. Tiles are
    /// numbered from 0 in reading order. The board is sized to fit the text.
    pub fn parse(text: &str) -> Self {
        let lines: Vec<&str> = text.lines().collect();
        let rows = lines.len();
        let cols = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);

        let mut board = Self::empty(rows, cols);
        for (row, line) in lines.iter().enumerate() {
            for (col, c) in line.chars().enumerate() {
                if let Some(letter) = Letter::from_char(c) {
                    let mut tile = Tile::new(TileId(board.placed.len() as u32), letter);
                    tile.position = Some(Position { row, col });
                    board.placed.push(tile);
                } else if c != ' ' && c != '_' && c != '.' {
                    log::warn!("a character in the given board is neither a letter or empty ( _.): {:?}", c);
                }
            }
        }
        board.rebuild();
        board
    }

    /// Smallest rectangle holding every placed tile, None for an empty board
    pub fn bounds(&self) -> Option<(Position, Position)> {
        let positions = self.placed.iter().filter_map(|t| t.position);
        positions.fold(None, |acc, p| match acc {
            None => Some((p, p)),
            Some((min, max)) => Some((
                Position::new(min.row.min(p.row), min.col.min(p.col)),
                Position::new(max.row.max(p.row), max.col.max(p.col)),
            )),
        })
    }
}

impl fmt::Display for Board {
    /// The occupied area, with `.` for empty slots
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (min, max) = match self.bounds() {
            Some(b) => b,
            None => return Ok(()),
        };
        for row in min.row..=max.row {
            for col in min.col..=max.col {
                match self.tile_at(Position { row, col }) {
                    Some(tile) => write!(f, "{}", tile.letter)?,
                    None => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}


#[test]
fn place_and_move() {
    let mut board = Board::empty(4, 4);
    let tile = Tile::new(TileId(9), Letter(b'K'));

    assert_eq!(board.place(tile, Position::new(1, 1)).unwrap(), None);
    assert_eq!(board.tile_at(Position::new(1, 1)), Some(&tile));

    // moving clears the old slot
    board.place(tile, Position::new(2, 3)).unwrap();
    assert_eq!(board.tile_at(Position::new(1, 1)), None);
    assert_eq!(board.tile_at(Position::new(2, 3)).unwrap().position, Some(Position::new(2, 3)));
    assert_eq!(board.len(), 1);
}

#[test]
fn place_on_occupied_slot() {
    let mut board = Board::empty(2, 2);
    let a = Tile::new(TileId(0), Letter(b'A'));
    let b = Tile::new(TileId(1), Letter(b'B'));

    board.place(a, Position::new(0, 0)).unwrap();
    let displaced = board.place(b, Position::new(0, 0)).unwrap().unwrap();
    assert_eq!(displaced, a);
    assert_eq!(displaced.position, None);
    assert_eq!(board.tiles(), &[b]);
}

#[test]
fn place_off_board() {
    let mut board = Board::empty(2, 2);
    let a = Tile::new(TileId(0), Letter(b'A'));
    assert!(matches!(board.place(a, Position::new(2, 0)), Err(GameError::OffBoard(_))));
    assert!(board.is_empty());
}

#[test]
fn take_restores_slots() {
    let mut board = Board::parse("CAT\n");
    let before: Vec<_> = board.table().iter().map(|(_, s)| s.is_filled()).collect();

    let extra = Tile::new(TileId(100), Letter(b'S'));
    board.place(extra, Position::new(0, 2)).unwrap();
    assert_eq!(board.len(), 3);
    board.place(Tile::new(TileId(2), Letter(b'T')), Position::new(0, 2)).unwrap();
    assert_eq!(board.take(TileId(100)), None);

    let after: Vec<_> = board.table().iter().map(|(_, s)| s.is_filled()).collect();
    assert_eq!(before, after);
    assert!(board.take(TileId(0)).is_some());
    assert_eq!(board.tile_at(Position::new(0, 0)), None);
}

#[test]
fn parse_and_display() {
    let board = Board::parse("  B\n_AN\n..D\n");
    assert_eq!(board.len(), 4);
    assert_eq!(board.table().rows(), 3);
    assert_eq!(board.table().cols(), 3);
    assert_eq!(board.tile_at(Position::new(1, 2)).unwrap().letter, Letter(b'N'));
    assert_eq!(board.bounds(), Some((Position::new(0, 1), Position::new(2, 2))));
    assert_eq!(board.to_string(), ".B\nAN\n.D\n");
}
