use super::{Direction, Letter, Placement, Position, Square, Table};

/// A maximal line of at least two adjacent tiles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    /// Top/left tile of the run, and the direction it goes
    pub start: Placement,
    pub letters: Vec<Letter>,
}

impl Run {
    pub fn word(&self) -> String {
        self.letters.iter().map(|l| l.as_char()).collect()
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.letters.iter().map(|l| l.0).collect()
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn positions(&self) -> impl Iterator<Item=Position> + '_ {
        std::iter::successors(Some(self.start), |p| Some(p.next()))
            .take(self.letters.len())
            .map(|p| p.0)
    }
}

fn is_filled(table: &Table<Square>, place: Placement) -> bool {
    table.get(place.0).map_or(false, Square::is_filled)
}

/// A run starts on a tile with nothing before it and a tile after it
fn is_start(table: &Table<Square>, place: Placement) -> bool {
    !is_filled(table, place.back()) && is_filled(table, place.next())
}

/// Every run of the table, each exactly once
///
/// Row major order of the starting tile, the horizontal run before the
/// vertical one when both start on the same tile. Lone tiles give nothing.
pub fn find_runs(table: &Table<Square>) -> impl Iterator<Item=Run> + '_ {
    table.iter()
        .filter(|(_, square)| square.is_filled())
        .flat_map(|(pos, _)| {
            std::iter::once(Placement(pos, Direction::Horizontal))
                .chain(std::iter::once(Placement(pos, Direction::Vertical)))
        })
        .filter(move |&place| is_start(table, place))
        .map(move |start| {
            let mut letters = vec![];
            let mut head = start;
            while let Some(Square::Filled(tile)) = table.get(head.0) {
                letters.push(tile.letter);
                head = head.next();
            }
            Run { start, letters }
        })
}


#[test]
fn single_scan_per_run() {
    use crate::Board;

    let board = Board::parse("BANANA\n");
    let runs: Vec<_> = find_runs(board.table()).collect();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].word(), "BANANA");
    assert_eq!(runs[0].start, Placement(Position::new(0, 0), Direction::Horizontal));
    assert_eq!(
        runs[0].positions().collect::<Vec<_>>(),
        (0..6).map(|col| Position::new(0, col)).collect::<Vec<_>>(),
    );
}

#[test]
fn crossing_runs() {
    use crate::Board;

    let board = Board::parse(concat!(
        ".C..\n",
        "CAT.\n",
        ".R.A\n",
        ".....\n",
        "..XY\n",
    ));
    let words: Vec<_> = find_runs(board.table())
        .map(|r| (r.word(), r.start.1))
        .collect();
    assert_eq!(words, vec![
        ("CAR".to_string(), Direction::Vertical),
        ("CAT".to_string(), Direction::Horizontal),
        ("XY".to_string(), Direction::Horizontal),
    ]);
}

#[test]
fn lone_tiles_make_no_run() {
    use crate::Board;

    let board = Board::parse("A.B\n...\nC..\n");
    assert_eq!(find_runs(board.table()).count(), 0);
}

#[test]
fn run_touching_edges() {
    use crate::Board;

    let board = Board::parse("..O\n..N\n..E\n");
    let runs: Vec<_> = find_runs(board.table()).collect();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].word(), "ONE");
    assert_eq!(runs[0].start.0, Position::new(0, 2));
}
