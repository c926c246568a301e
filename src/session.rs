use std::io;

use super::bank::EXCHANGE_SIZE;
use super::{
    Bank,
    Board,
    GameError,
    Grid,
    PixelPoint,
    Position,
    Report,
    Source,
    Tile,
    TileId,
    Validator,
};

/// What a drop on the board did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceOutcome {
    /// The validity flag after the drop
    pub valid: bool,
    /// Tiles pushed off their slot and sent back to the bench
    pub displaced: Vec<Tile>,
    /// Tile drawn because the bench became empty on a valid board
    pub peeled: Option<Tile>,
}

/// What happened to a dumped tile
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exchange {
    /// The tile went to the bank, and these tiles came to the bench
    Dumped { returned: Tile, drawn: Vec<Tile> },
    /// The bank could not pay for the exchange, the tile is back on the bench
    Kept(Tile),
}

/// One player's game: the bank, the bench, the board and its validity
///
/// Every tile is in exactly one of the bank, the bench, and the board.
pub struct Session<DictionaryStorage: AsRef<[u8]>> {
    grid: Grid,
    validator: Validator<DictionaryStorage>,
    bank: Bank,
    bench: Vec<Tile>,
    board: Board,
    valid: bool,
}

impl<DictionaryStorage: AsRef<[u8]>> Session<DictionaryStorage> {
    pub fn new(grid: Grid, validator: Validator<DictionaryStorage>, bank: Bank) -> Self {
        let board = Board::empty(grid.rows(), grid.cols());
        Self {
            grid,
            validator,
            bank,
            bench: vec![],
            board,
            valid: true,
        }
    }

    /// Draws the starting hand
    pub fn initialize(&mut self, count: usize) -> Result<(), GameError> {
        for _ in 0..count {
            self.peel()?;
        }
        log::info!("starting with {} tiles, {} left in the bank", self.bench.len(), self.bank.len());
        Ok(())
    }

    /// Draws one tile onto the bench
    pub fn peel(&mut self) -> Result<Tile, GameError> {
        let tile = self.bank.draw()?;
        log::info!("peeled {}, {} left in the bank", tile, self.bank.len());
        self.bench.push(tile);
        Ok(tile)
    }

    pub fn place(&mut self, id: TileId, position: Position) -> Result<PlaceOutcome, GameError> {
        self.place_group(&[(id, position)])
    }

    /// Places a tile dropped at the exact center of a cell
    pub fn place_at_pixel(&mut self, id: TileId, point: PixelPoint) -> Result<PlaceOutcome, GameError> {
        let position = self.grid.lookup(point).ok_or(GameError::UnknownCell(point))?;
        self.place(id, position)
    }

    /// Places several tiles as one drop, with a single validation at the end
    ///
    /// Nothing is changed if any of the moves is rejected. A tile already in a
    /// target slot, and not moved elsewhere by the same drop, goes back to the bench.
    pub fn place_group(&mut self, moves: &[(TileId, Position)]) -> Result<PlaceOutcome, GameError> {
        if moves.is_empty() {
            return Ok(PlaceOutcome { valid: self.valid, displaced: vec![], peeled: None })
        }
        for (i, &(id, position)) in moves.iter().enumerate() {
            if moves[..i].iter().any(|&(other, _)| other == id) {
                return Err(GameError::DuplicateTile(id))
            }
            if !self.grid.contains(position) {
                return Err(GameError::OffBoard(position))
            }
            if !self.board.contains(id) && !self.bench.iter().any(|t| t.id == id) {
                return Err(GameError::NotInPlay(id))
            }
        }

        let mut displaced = vec![];
        for &(id, position) in moves {
            let tile = match self.bench.iter().position(|t| t.id == id) {
                Some(i) => self.bench.remove(i),
                None => match self.board.tiles().iter().find(|t| t.id == id) {
                    Some(&tile) => tile,
                    None => return Err(GameError::NotInPlay(id)),
                },
            };
            if let Some(out) = self.board.place(tile, position)? {
                log::debug!("{} pushed back to the bench", out);
                self.bench.push(out);
                displaced.push(out);
            }
        }
        displaced.retain(|t| !self.board.contains(t.id));

        self.revalidate();
        self.log_board();

        let peeled = if self.bench.is_empty() && self.valid && !self.bank.is_empty() {
            Some(self.peel()?)
        } else {
            None
        };

        Ok(PlaceOutcome {
            valid: self.valid,
            displaced,
            peeled,
        })
    }

    /// Dumps a tile, three new tiles come in exchange when the bank has enough
    pub fn remove(&mut self, id: TileId, source: Source) -> Result<Exchange, GameError> {
        let tile = match source {
            Source::Bench => {
                let i = self.bench.iter().position(|t| t.id == id)
                    .ok_or(GameError::NotFound(id, source))?;
                self.bench.remove(i)
            },
            Source::Board => {
                let tile = self.board.take(id).ok_or(GameError::NotFound(id, source))?;
                self.revalidate();
                tile
            },
        };

        if self.bank.can_exchange() {
            self.bank.return_and_reshuffle(tile);
            let drawn = (0..EXCHANGE_SIZE)
                .map(|_| self.bank.draw())
                .collect::<Result<Vec<_>, _>>()?;
            self.bench.extend(drawn.iter().copied());
            log::info!("dumped {} for {:?}, {} left in the bank", tile, drawn, self.bank.len());
            Ok(Exchange::Dumped { returned: tile, drawn })
        } else {
            log::info!("only {} tiles left in the bank, {} stays on the bench", self.bank.len(), tile);
            self.bench.push(tile);
            Ok(Exchange::Kept(tile))
        }
    }

    fn revalidate(&mut self) {
        self.valid = self.validator.is_valid(self.board.table());
        log::debug!("board with {} tiles is {}", self.board.len(), if self.valid { "valid" } else { "invalid" });
    }

    fn log_board(&self) {
        if log::log_enabled!(log::Level::Debug) {
            for tile in self.board.tiles() {
                if let Some(position) = tile.position {
                    log::debug!("  {} {}", tile.letter, position);
                }
            }
        }
    }

    /// The placed tiles with their slot, one per line
    pub fn write_dump(&self, mut out: impl io::Write) -> io::Result<()> {
        for tile in self.board.tiles() {
            if let Some(Position { row, col }) = tile.position {
                writeln!(out, "{} {} {}", tile.letter, row, col)?;
            }
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Every word of the board with its verdict
    pub fn report(&self) -> Report {
        self.validator.check(self.board.table())
    }

    /// Nothing left to draw or to place, and the board holds
    pub fn is_complete(&self) -> bool {
        self.bank.is_empty() && self.bench.is_empty() && self.valid
    }

    pub fn bench(&self) -> &[Tile] {
        &self.bench
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn bank(&self) -> &Bank {
        &self.bank
    }

    pub fn bank_len(&self) -> usize {
        self.bank.len()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }
}


#[cfg(test)]
use super::{Letter, Rules};

#[cfg(test)]
fn fixture(words: &[&str], distribution: &[(u8, usize)], seed: u64) -> Session<Vec<u8>> {
    let dictionary = crate::dictionary::from_words(words.iter()).unwrap();
    let validator = Validator::new(Rules { dictionary, require_connected: true });
    let bank = Bank::from_distribution(distribution.iter().map(|&(l, n)| (Letter(l), n)), Some(seed));
    Session::new(Grid::build(300, 300, 30), validator, bank)
}

#[cfg(test)]
fn on_bench(session: &Session<Vec<u8>>, letter: u8) -> TileId {
    session.bench().iter().find(|t| t.letter == Letter(letter)).expect("letter on the bench").id
}

#[test]
fn spell_cat() {
    let mut session = fixture(&["cat"], &[(b'C', 1), (b'A', 1), (b'T', 1)], 1);
    session.initialize(3).unwrap();
    assert_eq!(session.bank_len(), 0);

    let c = on_bench(&session, b'C');
    let a = on_bench(&session, b'A');
    let t = on_bench(&session, b'T');

    assert!(session.place(c, Position::new(2, 2)).unwrap().valid);
    // "CA" is not a word
    assert!(!session.place(a, Position::new(2, 3)).unwrap().valid);
    let outcome = session.place(t, Position::new(2, 4)).unwrap();
    assert!(outcome.valid);
    assert_eq!(outcome.peeled, None);
    assert!(session.is_complete());
    assert_eq!(session.report().runs.len(), 1);
}

#[test]
fn auto_peel_on_valid_board() {
    let mut session = fixture(&["aa"], &[(b'A', 10)], 2);
    session.initialize(2).unwrap();
    let first = session.bench()[0].id;
    let second = session.bench()[1].id;

    let outcome = session.place(first, Position::new(0, 0)).unwrap();
    assert!(outcome.valid);
    assert_eq!(outcome.peeled, None);
    assert_eq!(session.bench().len(), 1);

    let outcome = session.place(second, Position::new(0, 1)).unwrap();
    assert!(outcome.valid);
    assert!(outcome.peeled.is_some());
    assert_eq!(session.bench().len(), 1);
    assert_eq!(session.bank_len(), 7);
}

#[test]
fn no_peel_on_invalid_board() {
    let mut session = fixture(&["aa"], &[(b'A', 10)], 3);
    session.initialize(2).unwrap();
    let first = session.bench()[0].id;
    let second = session.bench()[1].id;

    session.place(first, Position::new(0, 0)).unwrap();
    let outcome = session.place(second, Position::new(4, 4)).unwrap();
    assert!(!outcome.valid);
    assert!(!session.is_valid());
    assert_eq!(outcome.peeled, None);
    assert!(session.bench().is_empty());
    assert_eq!(session.bank_len(), 8);
}

#[test]
fn place_then_remove_restores_board() {
    let mut session = fixture(&["aa"], &[(b'A', 10)], 4);
    session.initialize(3).unwrap();
    let ids: Vec<_> = session.bench().iter().map(|t| t.id).collect();
    session.place(ids[0], Position::new(1, 1)).unwrap();
    session.place(ids[1], Position::new(1, 2)).unwrap();

    let before: Vec<_> = session.board().table().iter().map(|(_, s)| s.is_filled()).collect();
    session.place(ids[2], Position::new(1, 3)).unwrap();
    let exchange = session.remove(ids[2], Source::Board).unwrap();
    let after: Vec<_> = session.board().table().iter().map(|(_, s)| s.is_filled()).collect();

    assert_eq!(before, after);
    match exchange {
        Exchange::Dumped { returned, drawn } => {
            assert_eq!(returned.id, ids[2]);
            assert_eq!(drawn.len(), 3);
        },
        Exchange::Kept(_) => panic!("the bank had enough tiles"),
    }
    assert_eq!(session.bench().len(), 3);
    assert_eq!(session.bank_len(), 5);
}

#[test]
fn dump_without_enough_tiles() {
    let mut session = fixture(&[], &[(b'Z', 4)], 5);
    session.initialize(2).unwrap();
    let id = session.bench()[0].id;

    match session.remove(id, Source::Bench).unwrap() {
        Exchange::Kept(tile) => assert_eq!(tile.id, id),
        other => panic!("unexpected exchange {:?}", other),
    }
    assert_eq!(session.bench().len(), 2);
    assert_eq!(session.bank_len(), 2);

    assert!(matches!(session.remove(id, Source::Board), Err(GameError::NotFound(_, Source::Board))));
}

#[test]
fn tiles_are_conserved() {
    let dictionary = crate::dictionary::from_words(vec!["at", "ta"]).unwrap();
    let validator = Validator::new(Rules { dictionary, require_connected: true });
    let mut session = Session::new(Grid::build(600, 600, 30), validator, Bank::standard(Some(11)));
    session.initialize(21).unwrap();

    let ids: Vec<_> = session.bench().iter().map(|t| t.id).collect();
    for (i, &id) in ids.iter().take(8).enumerate() {
        session.place(id, Position::new(i, i)).unwrap();
    }
    session.place(ids[0], Position::new(10, 10)).unwrap();
    session.remove(ids[1], Source::Board).unwrap();
    session.remove(ids[12], Source::Bench).unwrap();
    session.peel().unwrap();

    let all = session.bank().tiles().iter()
        .chain(session.bench())
        .chain(session.board().tiles())
        .collect::<Vec<_>>();
    assert_eq!(all.len(), 144);
    for &(l, n) in crate::bank::STANDARD_DISTRIBUTION.iter() {
        assert_eq!(all.iter().filter(|t| t.letter == Letter(l)).count(), n);
    }
    let unique: std::collections::HashSet<_> = all.into_iter().collect();
    assert_eq!(unique.len(), 144);
}

#[test]
fn drop_on_pixels() {
    let mut session = fixture(&[], &[(b'O', 5)], 6);
    session.initialize(2).unwrap();
    let id = session.bench()[0].id;

    assert!(matches!(
        session.place_at_pixel(id, PixelPoint::new(16, 15)),
        Err(GameError::UnknownCell(_))
    ));
    assert!(session.board().is_empty());
    assert_eq!(session.bench().len(), 2);

    session.place_at_pixel(id, PixelPoint::new(45, 75)).unwrap();
    assert_eq!(session.board().tile_at(Position::new(2, 1)).map(|t| t.id), Some(id));
}

#[test]
fn drop_on_occupied_slot() {
    let mut session = fixture(&[], &[(b'O', 5)], 7);
    session.initialize(2).unwrap();
    let first = session.bench()[0].id;
    let second = session.bench()[1].id;

    session.place(first, Position::new(0, 0)).unwrap();
    let outcome = session.place(second, Position::new(0, 0)).unwrap();
    assert_eq!(outcome.displaced.iter().map(|t| t.id).collect::<Vec<_>>(), vec![first]);
    assert_eq!(session.bench().iter().map(|t| t.id).collect::<Vec<_>>(), vec![first]);
    assert_eq!(session.board().len(), 1);
}

#[test]
fn group_drop_is_atomic() {
    let mut session = fixture(&["no", "on"], &[(b'N', 1), (b'O', 1), (b'X', 5)], 8);
    session.initialize(7).unwrap();
    let n = on_bench(&session, b'N');
    let o = on_bench(&session, b'O');

    assert!(matches!(
        session.place_group(&[(n, Position::new(0, 0)), (o, Position::new(0, 10))]),
        Err(GameError::OffBoard(_))
    ));
    assert!(matches!(
        session.place_group(&[(n, Position::new(0, 0)), (n, Position::new(0, 1))]),
        Err(GameError::DuplicateTile(_))
    ));
    assert!(matches!(
        session.place_group(&[(TileId(999), Position::new(0, 0))]),
        Err(GameError::NotInPlay(_))
    ));
    assert!(session.board().is_empty());
    assert_eq!(session.bench().len(), 7);

    let outcome = session.place_group(&[(n, Position::new(3, 3)), (o, Position::new(3, 4))]).unwrap();
    assert!(outcome.valid);
    assert_eq!(session.board().to_string(), "NO\n");

    // swap them in one move, each one lands where the other was
    let outcome = session.place_group(&[(o, Position::new(3, 3)), (n, Position::new(3, 4))]).unwrap();
    assert!(outcome.valid);
    assert!(outcome.displaced.is_empty());
    assert_eq!(session.board().to_string(), "ON\n");
    assert_eq!(session.bench().len(), 5);
}

#[test]
fn dump_listing() {
    let mut session = fixture(&["cat"], &[(b'C', 1), (b'A', 1), (b'T', 1)], 9);
    session.initialize(3).unwrap();
    let a = on_bench(&session, b'A');
    session.place(a, Position::new(4, 7)).unwrap();

    let mut out = vec![];
    session.write_dump(&mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "A 4 7\n");
}

#[test]
fn empty_drop_changes_nothing() {
    let mut session = fixture(&[], &[(b'E', 4)], 10);
    session.initialize(0).unwrap();

    let outcome = session.place_group(&[]).unwrap();
    assert!(outcome.valid);
    assert_eq!(outcome.peeled, None);
    assert!(outcome.displaced.is_empty());
    assert!(session.bench().is_empty());
    assert_eq!(session.bank_len(), 4);
}
