use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::{GameError, Letter, Tile, TileId};

/// The 144 tiles of a standard game
pub const STANDARD_DISTRIBUTION: [(u8, usize); 26] = [
    (b'A', 13),
    (b'B', 3),
    (b'C', 3),
    (b'D', 6),
    (b'E', 18),
    (b'F', 3),
    (b'G', 4),
    (b'H', 3),
    (b'I', 12),
    (b'J', 2),
    (b'K', 2),
    (b'L', 5),
    (b'M', 3),
    (b'N', 8),
    (b'O', 11),
    (b'P', 3),
    (b'Q', 2),
    (b'R', 9),
    (b'S', 6),
    (b'T', 9),
    (b'U', 6),
    (b'V', 3),
    (b'W', 3),
    (b'X', 2),
    (b'Y', 3),
    (b'Z', 2),
];

/// Number of tiles handed out in exchange for a dumped one
pub const EXCHANGE_SIZE: usize = 3;

/// The undrawn tiles
pub struct Bank {
    tiles: Vec<Tile>,
    rng: StdRng,
}

impl Bank {
    /// A shuffled standard bank, `seed` makes the draws reproducible
    pub fn standard(seed: Option<u64>) -> Self {
        let distribution = STANDARD_DISTRIBUTION.iter().map(|&(l, n)| (Letter(l), n));
        Self::from_distribution(distribution, seed)
    }

    /// Tiles get their ids in the order of `distribution`, starting from 0
    pub fn from_distribution(distribution: impl IntoIterator<Item=(Letter, usize)>, seed: Option<u64>) -> Self {
        let mut tiles = vec![];
        for (letter, amount) in distribution {
            for _ in 0..amount {
                tiles.push(Tile::new(TileId(tiles.len() as u32), letter));
            }
        }
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        tiles.shuffle(&mut rng);
        Self { tiles, rng }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Whether a dump can be honoured
    pub fn can_exchange(&self) -> bool {
        self.tiles.len() >= EXCHANGE_SIZE
    }

    /// Removes a uniformly chosen tile
    pub fn draw(&mut self) -> Result<Tile, GameError> {
        if self.tiles.is_empty() {
            return Err(GameError::EmptyBank)
        }
        let idx = self.rng.gen_range(0..self.tiles.len());
        let mut tile = self.tiles.swap_remove(idx);
        tile.position = None;
        Ok(tile)
    }

    /// Puts `tile` back and reshuffles everything so the insertion point does not bias later draws
    pub fn return_and_reshuffle(&mut self, mut tile: Tile) {
        tile.position = None;
        self.tiles.push(tile);
        self.tiles.shuffle(&mut self.rng);
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }
}


#[test]
fn standard_counts() {
    let bank = Bank::standard(Some(7));
    assert_eq!(bank.len(), 144);

    let count = |c: u8| bank.tiles().iter().filter(|t| t.letter == Letter(c)).count();
    assert_eq!(count(b'E'), 18);
    assert_eq!(count(b'A'), 13);
    assert_eq!(count(b'Z'), 2);

    let mut ids: Vec<_> = bank.tiles().iter().map(|t| t.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 144);
}

#[test]
fn draw_until_empty() {
    let mut bank = Bank::from_distribution(vec![(Letter(b'A'), 2), (Letter(b'B'), 1)], Some(1));
    let mut drawn = vec![];
    while !bank.is_empty() {
        drawn.push(bank.draw().unwrap());
    }
    assert_eq!(drawn.len(), 3);
    assert!(matches!(bank.draw(), Err(GameError::EmptyBank)));

    let mut letters: Vec<_> = drawn.iter().map(|t| t.letter.as_char()).collect();
    letters.sort();
    assert_eq!(letters, vec!['A', 'A', 'B']);
}

#[test]
fn return_tile() {
    let mut bank = Bank::from_distribution(vec![(Letter(b'Q'), 4)], Some(3));
    assert!(bank.can_exchange());
    let mut tile = bank.draw().unwrap();
    let _ = bank.draw().unwrap();
    assert_eq!(bank.len(), 2);
    assert!(!bank.can_exchange());

    tile.position = Some(super::Position::new(1, 1));
    bank.return_and_reshuffle(tile);
    assert_eq!(bank.len(), 3);
    assert!(bank.tiles().iter().any(|t| *t == tile && t.position.is_none()));
}

#[test]
fn seeded_draws_repeat() {
    let mut a = Bank::standard(Some(42));
    let mut b = Bank::standard(Some(42));
    for _ in 0..20 {
        assert_eq!(a.draw().unwrap().id, b.draw().unwrap().id);
    }
}
