use std::collections::VecDeque;

use super::{Position, Square, Table};

fn filled(table: &Table<Square>, pos: Position) -> bool {
    table.get(pos).map_or(false, Square::is_filled)
}

/// The 4-connected groups of tiles, each sorted, in row major order of their first tile
pub fn groups(table: &Table<Square>) -> Vec<Vec<Position>> {
    let mut visited = Table::fill_with(table.rows(), table.cols(), false);
    let mut groups = vec![];
    let mut queue = VecDeque::new();

    for (start, square) in table.iter() {
        if !square.is_filled() || visited.get(start) == Some(&true) {
            continue
        }
        let mut group = vec![];
        visited.set(start, true);
        queue.push_back(start);
        while let Some(pos) = queue.pop_front() {
            group.push(pos);
            for neighbour in pos.neighbours() {
                if filled(table, neighbour) && visited.get(neighbour) == Some(&false) {
                    visited.set(neighbour, true);
                    queue.push_back(neighbour);
                }
            }
        }
        group.sort_unstable();
        groups.push(group);
    }
    groups
}

/// An empty board counts as connected
pub fn is_connected(table: &Table<Square>) -> bool {
    groups(table).len() <= 1
}

/// Tiles without any neighbour, unless it is the only tile on the board
pub fn isolated_tiles(table: &Table<Square>) -> Vec<Position> {
    let filled_count = table.iter().filter(|(_, s)| s.is_filled()).count();
    if filled_count <= 1 {
        return vec![]
    }
    table.iter()
        .filter(|(pos, square)| {
            square.is_filled() && !pos.neighbours().any(|n| filled(table, n))
        })
        .map(|(pos, _)| pos)
        .collect()
}


#[test]
fn two_groups() {
    use crate::Board;

    let board = Board::parse("AB..\n...C\n...D\n");
    let found = groups(board.table());
    assert_eq!(found, vec![
        vec![Position::new(0, 0), Position::new(0, 1)],
        vec![Position::new(1, 3), Position::new(2, 3)],
    ]);
    assert!(!is_connected(board.table()));
    // no single tile is alone, the groups still do not touch
    assert!(isolated_tiles(board.table()).is_empty());
}

#[test]
fn winding_group() {
    use crate::Board;

    let board = Board::parse("S...\nPEAR\n...E\n..ED\n");
    assert_eq!(groups(board.table()).len(), 1);
    assert!(is_connected(board.table()));
}

#[test]
fn lone_tiles() {
    use crate::Board;

    assert!(is_connected(Board::parse("").table()));
    assert!(isolated_tiles(Board::parse("..\n.Q\n").table()).is_empty());

    let board = Board::parse("OX.\n...\n..I\n");
    assert_eq!(isolated_tiles(board.table()), vec![Position::new(2, 2)]);
    assert_eq!(groups(board.table()).len(), 2);
}
