
pub mod runs;
pub mod connectivity;

use fst::Set;

use super::{Direction, Letter, Placement, Position, Square, Table};

use runs::{find_runs, Run};

/// What makes a board valid
pub struct Rules<DictionaryStorage: AsRef<[u8]>> {
    /// The words that can be formed, stored uppercase
    pub dictionary: Set<DictionaryStorage>,

    /// Whether all the tiles must form a single group
    ///
    /// When false, only the words are checked
    pub require_connected: bool,
}

/// Full outcome of a validation, for feedback rather than a single flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Every run of the board with whether it is in the dictionary
    pub runs: Vec<(Run, bool)>,
    /// Number of separate groups of tiles
    pub groups: usize,
    /// Tiles touching no other tile, only filled when there is more than one tile
    pub isolated: Vec<Position>,
    pub require_connected: bool,
}

impl Report {
    pub fn is_valid(&self) -> bool {
        self.runs.iter().all(|(_, ok)| *ok)
            && (!self.require_connected || self.groups <= 1)
    }

    pub fn invalid_words(&self) -> impl Iterator<Item=&Run> {
        self.runs.iter().filter(|(_, ok)| !ok).map(|(run, _)| run)
    }
}

/// Checks boards against a dictionary loaded once
pub struct Validator<DictionaryStorage: AsRef<[u8]>> {
    rules: Rules<DictionaryStorage>,
}

impl<DictionaryStorage: AsRef<[u8]>> Validator<DictionaryStorage> {
    pub fn new(rules: Rules<DictionaryStorage>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &Rules<DictionaryStorage> {
        &self.rules
    }

    /// Case insensitive
    pub fn is_word(&self, word: &[u8]) -> bool {
        let upper = word.to_ascii_uppercase();
        self.rules.dictionary.contains(upper)
    }

    fn run_is_word(&self, run: &Run) -> bool {
        let ok = self.is_word(&run.bytes());
        log::trace!("{:?} at {} {:?}: {}", run.word(), run.start.0, run.start.1, if ok { "ok" } else { "not a word" });
        ok
    }

    /// Stops at the first run that is not a word
    pub fn is_valid(&self, table: &Table<Square>) -> bool {
        if !find_runs(table).all(|run| self.run_is_word(&run)) {
            return false
        }
        !self.rules.require_connected || connectivity::is_connected(table)
    }

    /// Checks everything, even once the board is known to be invalid
    pub fn check(&self, table: &Table<Square>) -> Report {
        let runs = find_runs(table)
            .map(|run| {
                let ok = self.run_is_word(&run);
                (run, ok)
            })
            .collect();
        Report {
            runs,
            groups: connectivity::groups(table).len(),
            isolated: connectivity::isolated_tiles(table),
            require_connected: self.rules.require_connected,
        }
    }
}


#[cfg(test)]
fn fixture(require_connected: bool) -> Validator<Vec<u8>> {
    let dictionary = crate::dictionary::from_words(vec![
        "cat", "car", "banana", "ban", "ba", "an", "at", "ta", "nab",
    ]).unwrap();
    Validator::new(Rules { dictionary, require_connected })
}

#[test]
fn single_tile_is_valid() {
    use crate::Board;

    let validator = fixture(true);
    assert!(validator.is_valid(Board::parse("....\n..Q.\n").table()));
    assert!(validator.is_valid(Board::parse("").table()));
}

#[test]
fn cat_and_cxt() {
    use crate::Board;

    let validator = fixture(true);
    assert!(validator.is_valid(Board::parse("..CAT..\n").table()));
    assert!(!validator.is_valid(Board::parse("..CXT..\n").table()));
    assert!(validator.is_word(b"cat"));
}

#[test]
fn crossing_words() {
    use crate::Board;

    let validator = fixture(true);
    let board = Board::parse(concat!(
        "BANANA\n",
        "A.....\n",
        "N.....\n",
    ));
    assert!(validator.is_valid(board.table()));

    let board = Board::parse(concat!(
        "BANANA\n",
        "AT....\n",
        "N.....\n",
    ));
    // AT in the second row and in the second column
    assert!(validator.is_valid(board.table()));

    let board = Board::parse(concat!(
        "BANANA\n",
        "AX....\n",
    ));
    let report = validator.check(board.table());
    assert!(!report.is_valid());
    let bad: Vec<_> = report.invalid_words().map(|r| r.word()).collect();
    assert_eq!(bad, vec!["AX", "AX"]);
}

#[test]
fn disconnected_groups() {
    use crate::Board;

    let board = Board::parse("CAT...\n......\n...CAR\n");

    let strict = fixture(true);
    assert!(!strict.is_valid(board.table()));
    let report = strict.check(board.table());
    assert_eq!(report.groups, 2);
    assert_eq!(report.invalid_words().count(), 0);
    assert!(!report.is_valid());

    let lenient = fixture(false);
    assert!(lenient.is_valid(board.table()));
    assert!(lenient.check(board.table()).is_valid());
}

#[test]
fn isolated_extra_tile() {
    use crate::Board;

    let board = Board::parse("CAT\n...\n..Z\n");
    assert!(!fixture(true).is_valid(board.table()));
    assert_eq!(fixture(true).check(board.table()).isolated, vec![Position::new(2, 2)]);
}
