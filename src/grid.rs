use std::collections::HashMap;
use std::fmt;

use super::{Position, Table};

/// A point in the UI's pixel space
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PixelPoint {
    pub x: i64,
    pub y: i64,
}

impl PixelPoint {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for PixelPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One slot of the coordinate grid, never changes after the grid is built
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Cell {
    pub position: Position,
    /// Top left corner
    pub origin: PixelPoint,
    pub size: u32,
}

impl Cell {
    /// Rounded down when `size` is odd
    pub fn center(&self) -> PixelPoint {
        let half = i64::from(self.size / 2);
        PixelPoint {
            x: self.origin.x + half,
            y: self.origin.y + half,
        }
    }

    pub fn contains(&self, point: PixelPoint) -> bool {
        let size = i64::from(self.size);
        point.x >= self.origin.x && point.x < self.origin.x + size
            && point.y >= self.origin.y && point.y < self.origin.y + size
    }
}

/// The fixed set of cells covering the board area
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Table<Cell>,
    cell_size: u32,
    centers: HashMap<PixelPoint, Position>,
}

impl Grid {
    /// `floor(width / cell_size)` columns and `floor(height / cell_size)` rows
    ///
    /// A board smaller than one cell, or a zero `cell_size`, gives an empty grid
    pub fn build(pixel_width: u32, pixel_height: u32, cell_size: u32) -> Self {
        let cols = pixel_width.checked_div(cell_size).unwrap_or(0) as usize;
        let rows = pixel_height.checked_div(cell_size).unwrap_or(0) as usize;
        if rows == 0 || cols == 0 {
            log::warn!("{}x{} pixels with cells of {} gives an empty grid", pixel_width, pixel_height, cell_size);
        }

        let size = i64::from(cell_size);
        let cells = Table::from_fn(rows, cols, |position| Cell {
            position,
            origin: PixelPoint {
                x: position.col as i64 * size,
                y: position.row as i64 * size,
            },
            size: cell_size,
        });

        let centers = cells.iter()
            .map(|(position, cell)| (cell.center(), position))
            .collect();

        Self {
            cells,
            cell_size,
            centers,
        }
    }

    pub fn rows(&self) -> usize {
        self.cells.rows()
    }
    pub fn cols(&self) -> usize {
        self.cells.cols()
    }
    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }
    pub fn contains(&self, position: Position) -> bool {
        self.cells.contains(position)
    }

    pub fn cell(&self, position: Position) -> Option<&Cell> {
        self.cells.get(position)
    }

    pub fn cells(&self) -> impl Iterator<Item=&Cell> {
        self.cells.iter().map(|(_, cell)| cell)
    }

    /// The cell whose center is exactly `point`
    pub fn lookup(&self, point: PixelPoint) -> Option<Position> {
        self.centers.get(&point).copied()
    }

    /// The cell containing `point`, for snapping a drop before calling `lookup`
    pub fn cell_at(&self, point: PixelPoint) -> Option<Position> {
        if point.x < 0 || point.y < 0 || self.cell_size == 0 {
            return None
        }
        let size = i64::from(self.cell_size);
        let position = Position {
            row: (point.y / size) as usize,
            col: (point.x / size) as usize,
        };
        if self.contains(position) {
            Some(position)
        } else {
            None
        }
    }
}


#[test]
fn dimensions() {
    let grid = Grid::build(1200, 650, 30);
    assert_eq!(grid.cols(), 40);
    assert_eq!(grid.rows(), 21);

    let last = grid.cell(Position::new(20, 39)).unwrap();
    assert_eq!(last.origin, PixelPoint::new(39 * 30, 20 * 30));
    assert_eq!(last.center(), PixelPoint::new(39 * 30 + 15, 20 * 30 + 15));
    assert_eq!(grid.cells().count(), 40 * 21);
}

#[test]
fn degenerate() {
    let grid = Grid::build(20, 100, 30);
    assert_eq!(grid.cols(), 0);
    assert_eq!(grid.rows(), 3);
    assert_eq!(grid.cells().count(), 0);

    let grid = Grid::build(100, 100, 0);
    assert_eq!(grid.cells().count(), 0);
    assert_eq!(grid.cell_at(PixelPoint::new(1, 1)), None);
}

#[test]
fn center_lookup() {
    let grid = Grid::build(3, 3, 1);
    let center = grid.cell(Position::new(1, 1)).unwrap().center();
    assert_eq!(grid.lookup(center), Some(Position::new(1, 1)));
    assert_eq!(grid.lookup(PixelPoint::new(7, 1)), None);

    let grid = Grid::build(90, 60, 30);
    assert_eq!(grid.lookup(PixelPoint::new(45, 15)), Some(Position::new(0, 1)));
    assert_eq!(grid.lookup(PixelPoint::new(44, 15)), None);
    assert_eq!(grid.lookup(PixelPoint::new(30, 30)), None);
}

#[test]
fn snapping() {
    let grid = Grid::build(90, 60, 30);
    assert_eq!(grid.cell_at(PixelPoint::new(31, 59)), Some(Position::new(1, 1)));
    assert_eq!(grid.cell_at(PixelPoint::new(0, 0)), Some(Position::new(0, 0)));
    assert_eq!(grid.cell_at(PixelPoint::new(90, 10)), None);
    assert_eq!(grid.cell_at(PixelPoint::new(-1, 10)), None);

    let cell = grid.cell(Position::new(1, 2)).unwrap();
    assert!(cell.contains(PixelPoint::new(60, 30)));
    assert!(!cell.contains(PixelPoint::new(90, 30)));
}
