//! The Sudoku data model: cell coordinates, the grid itself, and the
//! candidate domains derived from it.

use std::fmt;

use im::OrdSet;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Side length of the grid.
pub const GRID_SIDE: usize = 9;
/// Side length of one box.
pub const BOX_SIDE: usize = 3;

/// The wire format for a whole grid: a 9×9 matrix of digits, `0` meaning an
/// empty cell. Puzzle loaders and serialized puzzles use this shape directly.
pub type CellMatrix = [[u8; GRID_SIDE]; GRID_SIDE];

const EMPTY: u8 = 0;

/// A (row, column) cell address, both components in `0..9`.
///
/// Row, column, and box membership are computed from the address rather than
/// stored anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Index of the 3×3 box containing this cell, numbered row-major `0..9`.
    pub fn box_index(self) -> usize {
        (self.row / BOX_SIDE) * BOX_SIDE + self.col / BOX_SIDE
    }

    /// Top-left cell of the 3×3 box containing this cell.
    pub fn box_origin(self) -> Coord {
        Coord {
            row: (self.row / BOX_SIDE) * BOX_SIDE,
            col: (self.col / BOX_SIDE) * BOX_SIDE,
        }
    }

    /// All 81 cell addresses in row-major order.
    ///
    /// This is the scan order both engines use, so it is part of their
    /// observable contract: it fixes the cascade order within a propagation
    /// pass and which solution the search reaches first.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..GRID_SIDE).flat_map(|row| (0..GRID_SIDE).map(move |col| Coord { row, col }))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.row, self.col)
    }
}

/// A 9×9 Sudoku grid.
///
/// Cells hold either a digit `1..=9` or nothing. Construction validates cell
/// values (including through serde, via the [`CellMatrix`] wire form) but
/// deliberately does *not* check row/column/box consistency: a loaded puzzle
/// with pre-existing duplicates is accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CellMatrix", into = "CellMatrix")]
pub struct Grid {
    cells: CellMatrix,
}

impl Grid {
    /// Creates a grid with every cell empty.
    pub fn empty() -> Self {
        Self {
            cells: [[EMPTY; GRID_SIDE]; GRID_SIDE],
        }
    }

    /// Builds a grid from a digit matrix, `0` meaning empty.
    pub fn from_rows(rows: CellMatrix) -> Result<Self> {
        for (row, cells) in rows.iter().enumerate() {
            for (col, &value) in cells.iter().enumerate() {
                if value > 9 {
                    return Err(Error::InvalidCellValue { row, col, value });
                }
            }
        }
        Ok(Self { cells: rows })
    }

    /// Parses a grid from 81 significant characters: digits `1-9` for givens,
    /// `.` or `0` for empty cells. Whitespace (including newlines between
    /// rows) is ignored.
    pub fn parse(text: &str) -> Result<Self> {
        let mut cells = [[EMPTY; GRID_SIDE]; GRID_SIDE];
        let mut index = 0;
        for c in text.chars().filter(|c| !c.is_whitespace()) {
            if index >= GRID_SIDE * GRID_SIDE {
                return Err(Error::PuzzleTextLength { found: index + 1 });
            }
            let value = match c {
                '.' | '0' => EMPTY,
                '1'..='9' => c as u8 - b'0',
                other => return Err(Error::UnexpectedCharacter(other)),
            };
            cells[index / GRID_SIDE][index % GRID_SIDE] = value;
            index += 1;
        }
        if index != GRID_SIDE * GRID_SIDE {
            return Err(Error::PuzzleTextLength { found: index });
        }
        Ok(Self { cells })
    }

    /// The digit at `at`, or `None` for an empty cell.
    pub fn value(&self, at: Coord) -> Option<u8> {
        match self.cells[at.row][at.col] {
            EMPTY => None,
            digit => Some(digit),
        }
    }

    pub fn is_empty_at(&self, at: Coord) -> bool {
        self.cells[at.row][at.col] == EMPTY
    }

    pub(crate) fn set(&mut self, at: Coord, digit: u8) {
        debug_assert!((1..=9).contains(&digit));
        self.cells[at.row][at.col] = digit;
    }

    pub(crate) fn clear_cell(&mut self, at: Coord) {
        self.cells[at.row][at.col] = EMPTY;
    }

    /// The first empty cell in row-major order, if any.
    pub fn first_empty(&self) -> Option<Coord> {
        Coord::all().find(|&at| self.is_empty_at(at))
    }

    /// Number of empty cells remaining.
    pub fn empty_count(&self) -> usize {
        Coord::all().filter(|&at| self.is_empty_at(at)).count()
    }

    /// The completion check: `true` iff no cell is empty.
    ///
    /// This does *not* verify row/column/box correctness: a full grid with a
    /// duplicated digit still reports complete. Callers wanting validity must
    /// check it themselves; the solver engines rely only on this emptiness
    /// test.
    pub fn is_filled(&self) -> bool {
        self.first_empty().is_none()
    }

    /// Copies the grid out in wire form.
    pub fn rows(&self) -> CellMatrix {
        self.cells
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty()
    }
}

impl TryFrom<CellMatrix> for Grid {
    type Error = Error;

    fn try_from(rows: CellMatrix) -> Result<Self> {
        Self::from_rows(rows)
    }
}

impl From<Grid> for CellMatrix {
    fn from(grid: Grid) -> Self {
        grid.cells
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..GRID_SIDE {
            if row % BOX_SIDE == 0 && row != 0 {
                writeln!(f, "- - - + - - - + - - -")?;
            }
            for col in 0..GRID_SIDE {
                if col % BOX_SIDE == 0 && col != 0 {
                    write!(f, "| ")?;
                }
                match self.cells[row][col] {
                    EMPTY => write!(f, ". ")?,
                    digit => write!(f, "{} ", digit)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// The candidate set of a cell: the digits `1..=9` not present anywhere in
/// the cell's row, column, or 3×3 box.
///
/// Backed by an ordered set, so iteration always yields candidates in
/// ascending order, which is the order the search engine tries them in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain(OrdSet<u8>);

impl Domain {
    /// Computes the domain of `at` against the current grid.
    ///
    /// Pure function of the grid: scans the 27 peer cells and returns the
    /// digits none of them holds. When the addressed cell is itself filled,
    /// its value is excluded like any other peer value; the filled-cell
    /// "empty by convention" rule is applied by [`DomainMatrix::refresh`],
    /// not here.
    pub fn for_cell(grid: &Grid, at: Coord) -> Domain {
        let mut taken = [false; 10];
        for k in 0..GRID_SIDE {
            if let Some(digit) = grid.value(Coord::new(at.row, k)) {
                taken[digit as usize] = true;
            }
            if let Some(digit) = grid.value(Coord::new(k, at.col)) {
                taken[digit as usize] = true;
            }
        }
        let origin = at.box_origin();
        for row in origin.row..origin.row + BOX_SIDE {
            for col in origin.col..origin.col + BOX_SIDE {
                if let Some(digit) = grid.value(Coord::new(row, col)) {
                    taken[digit as usize] = true;
                }
            }
        }
        Domain((1..=9u8).filter(|&d| !taken[d as usize]).collect())
    }

    /// The empty domain, used for filled cells.
    pub fn none() -> Domain {
        Domain(OrdSet::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_singleton(&self) -> bool {
        self.0.len() == 1
    }

    /// If the domain holds exactly one candidate, returns it.
    pub fn singleton_value(&self) -> Option<u8> {
        if self.is_singleton() {
            self.0.get_min().copied()
        } else {
            None
        }
    }

    pub fn contains(&self, digit: u8) -> bool {
        self.0.contains(&digit)
    }

    /// Candidates in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.iter().copied()
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits: Vec<String> = self.0.iter().map(|d| d.to_string()).collect();
        write!(f, "{{ {} }}", digits.join(", "))
    }
}

/// Derived candidate state for every cell.
///
/// Kept consistent with a [`Grid`] only by wholesale recomputation via
/// [`DomainMatrix::refresh`]; there is no incremental update, so it is
/// always safe to discard and rebuild, never safe to assume fresh after the
/// grid has changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainMatrix {
    domains: [[Domain; GRID_SIDE]; GRID_SIDE],
}

impl DomainMatrix {
    /// Builds the matrix for the given grid.
    pub fn for_grid(grid: &Grid) -> Self {
        let mut matrix = Self {
            domains: std::array::from_fn(|_| std::array::from_fn(|_| Domain::none())),
        };
        matrix.refresh(grid);
        matrix
    }

    /// Recomputes every cell's domain from the current grid state: empty
    /// cells get their computed candidates, filled cells the empty domain.
    pub fn refresh(&mut self, grid: &Grid) {
        for at in Coord::all() {
            self.domains[at.row][at.col] = if grid.is_empty_at(at) {
                Domain::for_cell(grid, at)
            } else {
                Domain::none()
            };
        }
    }

    pub fn domain(&self, at: Coord) -> &Domain {
        &self.domains[at.row][at.col]
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::testutil::CLASSIC;

    fn reference_domain(grid: &Grid, at: Coord) -> Vec<u8> {
        let mut present = std::collections::HashSet::new();
        for other in Coord::all() {
            let peer = other.row == at.row
                || other.col == at.col
                || other.box_index() == at.box_index();
            if peer {
                if let Some(digit) = grid.value(other) {
                    present.insert(digit);
                }
            }
        }
        (1..=9).filter(|d| !present.contains(d)).collect()
    }

    #[test]
    fn box_index_covers_the_grid_row_major() {
        assert_eq!(Coord::new(0, 0).box_index(), 0);
        assert_eq!(Coord::new(1, 5).box_index(), 1);
        assert_eq!(Coord::new(2, 8).box_index(), 2);
        assert_eq!(Coord::new(4, 4).box_index(), 4);
        assert_eq!(Coord::new(8, 0).box_index(), 6);
        assert_eq!(Coord::new(8, 8).box_index(), 8);
    }

    #[test]
    fn domain_matches_peer_scan_on_every_cell() {
        let grid = Grid::from_rows(CLASSIC).unwrap();
        for at in Coord::all() {
            let domain: Vec<u8> = Domain::for_cell(&grid, at).iter().collect();
            assert_eq!(domain, reference_domain(&grid, at), "cell {}", at);
        }
    }

    #[test]
    fn domain_of_empty_grid_cell_is_full() {
        let grid = Grid::empty();
        let domain: Vec<u8> = Domain::for_cell(&grid, Coord::new(4, 4)).iter().collect();
        assert_eq!(domain, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn from_rows_rejects_out_of_range_values() {
        let mut rows = [[0u8; 9]; 9];
        rows[3][7] = 10;
        match Grid::from_rows(rows) {
            Err(Error::InvalidCellValue { row: 3, col: 7, value: 10 }) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn parse_accepts_dots_zeros_and_whitespace() {
        let text = "\
            53..7....\n\
            6..195...\n\
            .98....6.\n\
            8...6...3\n\
            4..8.3..1\n\
            7...2...6\n\
            .6....28.\n\
            ...419..5\n\
            ....8..79";
        let grid = Grid::parse(text).unwrap();
        assert_eq!(grid, Grid::from_rows(CLASSIC).unwrap());
    }

    #[test]
    fn parse_rejects_bad_characters_and_wrong_lengths() {
        assert!(matches!(
            Grid::parse(&"x".repeat(81)),
            Err(Error::UnexpectedCharacter('x'))
        ));
        assert!(matches!(
            Grid::parse(&"1".repeat(80)),
            Err(Error::PuzzleTextLength { found: 80 })
        ));
        assert!(matches!(
            Grid::parse(&"1".repeat(82)),
            Err(Error::PuzzleTextLength { found: 82 })
        ));
    }

    #[test]
    fn is_filled_ignores_duplicates() {
        // Every row is 1..9 shifted, then one cell is overwritten with a
        // duplicate: still "complete" because completion only counts empties.
        let mut rows = [[0u8; 9]; 9];
        for (r, row) in rows.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = ((r + c) % 9) as u8 + 1;
            }
        }
        rows[0][0] = rows[0][1];
        let grid = Grid::from_rows(rows).unwrap();
        assert!(grid.is_filled());
    }

    #[test]
    fn first_empty_scans_row_major() {
        let mut grid = Grid::from_rows(CLASSIC).unwrap();
        assert_eq!(grid.first_empty(), Some(Coord::new(0, 2)));
        grid.set(Coord::new(0, 2), 4);
        assert_eq!(grid.first_empty(), Some(Coord::new(0, 3)));
    }

    #[test]
    fn refresh_is_idempotent() {
        let grid = Grid::from_rows(CLASSIC).unwrap();
        let mut once = DomainMatrix::for_grid(&grid);
        let twice = once.clone();
        once.refresh(&grid);
        assert_eq!(once, twice);
    }

    #[test]
    fn refresh_empties_domains_of_filled_cells() {
        let grid = Grid::from_rows(CLASSIC).unwrap();
        let matrix = DomainMatrix::for_grid(&grid);
        assert!(matrix.domain(Coord::new(0, 0)).is_empty());
        assert!(!matrix.domain(Coord::new(0, 2)).is_empty());
    }

    #[test]
    fn grid_serde_round_trips_through_the_wire_matrix() {
        let grid = Grid::from_rows(CLASSIC).unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        assert!(json.starts_with("[[5,3,0,"));
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);
    }

    #[test]
    fn grid_deserialization_validates_cell_values() {
        let mut rows = [[0u8; 9]; 9];
        rows[1][1] = 42;
        let json = serde_json::to_string(&rows).unwrap();
        assert!(serde_json::from_str::<Grid>(&json).is_err());
    }

    #[test]
    fn display_draws_box_separators() {
        let rendered = Grid::from_rows(CLASSIC).unwrap().to_string();
        assert!(rendered.contains("- - - + - - - + - - -"));
        assert!(rendered.starts_with("5 3 . "));
    }
}
