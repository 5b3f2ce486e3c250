//! # World Representation
//!
//! The map grid, its cell classification, and the player's fog-of-war record.

use crate::game::Position;
use crate::{DimlightError, DimlightResult};
use serde::{Deserialize, Serialize};

/// Classification of a single map cell.
///
/// The only runtime transition is `Note -> Floor` when a note is picked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Wall,
    Floor,
    Altar,
    Note,
}

impl CellKind {
    /// Whether the player and entities may stand on this cell.
    pub fn is_passable(self) -> bool {
        match self {
            CellKind::Wall => false,
            CellKind::Floor | CellKind::Altar | CellKind::Note => true,
        }
    }
}

/// A fixed-size map of cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<CellKind>,
}

impl Grid {
    /// Creates a grid where every cell is a wall.
    ///
    /// # Examples
    ///
    /// ```
    /// use dimlight::{CellKind, Grid, Position};
    ///
    /// let grid = Grid::new(7, 5);
    /// assert_eq!(grid.get(Position::new(3, 2)), Some(CellKind::Wall));
    /// assert_eq!(grid.get(Position::new(7, 0)), None);
    /// ```
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![CellKind::Wall; width * height],
        }
    }

    /// Builds a grid from text rows: `#` wall, `.` floor, `A` altar, `?` note.
    ///
    /// Mostly useful for hand-made maps in tests.
    ///
    /// # Examples
    ///
    /// ```
    /// use dimlight::{CellKind, Grid, Position};
    ///
    /// let grid = Grid::from_rows(&["#####", "#.A?#", "#####"]).unwrap();
    /// assert_eq!(grid.get(Position::new(2, 1)), Some(CellKind::Altar));
    /// ```
    pub fn from_rows(rows: &[&str]) -> DimlightResult<Self> {
        let height = rows.len();
        let width = rows.first().map(|row| row.chars().count()).unwrap_or(0);
        let mut cells = Vec::with_capacity(width * height);

        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(DimlightError::InvalidState(format!(
                    "row {} has {} cells, expected {}",
                    y,
                    row.chars().count(),
                    width
                )));
            }
            for ch in row.chars() {
                let kind = match ch {
                    '#' => CellKind::Wall,
                    '.' => CellKind::Floor,
                    'A' => CellKind::Altar,
                    '?' => CellKind::Note,
                    other => {
                        return Err(DimlightError::InvalidState(format!(
                            "unknown cell character {:?}",
                            other
                        )))
                    }
                };
                cells.push(kind);
            }
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Checks if a position lies inside the grid.
    pub fn in_bounds(&self, pos: Position) -> bool {
        self.index(pos).is_some()
    }

    fn index(&self, pos: Position) -> Option<usize> {
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Gets the cell at a position, or None when out of bounds.
    pub fn get(&self, pos: Position) -> Option<CellKind> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// Sets the cell at a position.
    pub fn set(&mut self, pos: Position, kind: CellKind) -> DimlightResult<()> {
        let idx = self.index(pos).ok_or_else(|| {
            DimlightError::InvalidState(format!("position {:?} is outside the grid", pos))
        })?;
        self.cells[idx] = kind;
        Ok(())
    }

    /// Turns a note at `pos` into floor. Returns whether there was one.
    pub fn consume_note(&mut self, pos: Position) -> bool {
        match self.index(pos) {
            Some(idx) if self.cells[idx] == CellKind::Note => {
                self.cells[idx] = CellKind::Floor;
                true
            }
            _ => false,
        }
    }

    /// Whether a position is in bounds and not a wall.
    pub fn is_passable(&self, pos: Position) -> bool {
        self.get(pos).map(CellKind::is_passable).unwrap_or(false)
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width).map(move |x| Position::new(x as i32, y as i32))
        })
    }

    /// All positions holding `kind`, in row-major order.
    pub fn positions_of(&self, kind: CellKind) -> Vec<Position> {
        self.positions()
            .filter(|&pos| self.get(pos) == Some(kind))
            .collect()
    }

    /// Number of cells holding `kind`.
    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|&&cell| cell == kind).count()
    }

    /// The first floor cell in row-major order, where the player starts.
    pub fn first_floor(&self) -> Option<Position> {
        self.positions()
            .find(|&pos| self.get(pos) == Some(CellKind::Floor))
    }
}

/// Per-cell record of whether the player has ever seen a cell.
///
/// Cells are only ever marked, never cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredMap {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl DiscoveredMap {
    /// Creates a map with nothing discovered.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    fn index(&self, pos: Position) -> Option<usize> {
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Marks a cell as discovered. Out-of-bounds positions are ignored.
    pub fn mark(&mut self, pos: Position) {
        if let Some(idx) = self.index(pos) {
            self.cells[idx] = true;
        }
    }

    pub fn is_discovered(&self, pos: Position) -> bool {
        self.index(pos).map(|idx| self.cells[idx]).unwrap_or(false)
    }

    /// Number of discovered cells.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&seen| seen).count()
    }

    /// Discovered positions in row-major order.
    pub fn discovered_positions(&self) -> Vec<Position> {
        (0..self.cells.len())
            .filter(|&idx| self.cells[idx])
            .map(|idx| Position::new((idx % self.width) as i32, (idx / self.width) as i32))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_all_wall() {
        let grid = Grid::new(9, 7);
        assert_eq!(grid.width(), 9);
        assert_eq!(grid.height(), 7);
        assert_eq!(grid.count(CellKind::Wall), 63);
        assert!(grid.first_floor().is_none());
    }

    #[test]
    fn test_bounds_checks() {
        let grid = Grid::new(5, 5);
        assert!(grid.in_bounds(Position::new(0, 0)));
        assert!(grid.in_bounds(Position::new(4, 4)));
        assert!(!grid.in_bounds(Position::new(-1, 0)));
        assert!(!grid.in_bounds(Position::new(5, 0)));
        assert!(!grid.in_bounds(Position::new(0, 5)));
        assert_eq!(grid.get(Position::new(0, -1)), None);
    }

    #[test]
    fn test_set_and_passability() {
        let mut grid = Grid::new(5, 5);
        let pos = Position::new(2, 2);
        assert!(!grid.is_passable(pos));

        grid.set(pos, CellKind::Note).unwrap();
        assert!(grid.is_passable(pos));
        assert_eq!(grid.positions_of(CellKind::Note), vec![pos]);

        assert!(grid.set(Position::new(9, 9), CellKind::Floor).is_err());
    }

    #[test]
    fn test_consume_note_only_once() {
        let mut grid = Grid::from_rows(&["#####", "#.?.#", "#####"]).unwrap();
        let pos = Position::new(2, 1);

        assert!(grid.consume_note(pos));
        assert_eq!(grid.get(pos), Some(CellKind::Floor));
        assert!(!grid.consume_note(pos));
        assert!(!grid.consume_note(Position::new(1, 1)));
        assert!(!grid.consume_note(Position::new(-3, 1)));
    }

    #[test]
    fn test_from_rows() {
        let grid = Grid::from_rows(&["#####", "#.?A#", "#####"]).unwrap();
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.first_floor(), Some(Position::new(1, 1)));
        assert_eq!(grid.get(Position::new(2, 1)), Some(CellKind::Note));
        assert_eq!(grid.get(Position::new(3, 1)), Some(CellKind::Altar));

        assert!(Grid::from_rows(&["###", "##"]).is_err());
        assert!(Grid::from_rows(&["#x#"]).is_err());
    }

    #[test]
    fn test_first_floor_skips_specials() {
        let grid = Grid::from_rows(&["#####", "#A?.#", "#####"]).unwrap();
        assert_eq!(grid.first_floor(), Some(Position::new(3, 1)));
    }

    #[test]
    fn test_discovered_map_marks() {
        let mut map = DiscoveredMap::new(4, 3);
        assert_eq!(map.count(), 0);

        map.mark(Position::new(1, 2));
        map.mark(Position::new(1, 2));
        map.mark(Position::new(-1, 0));
        map.mark(Position::new(4, 0));

        assert_eq!(map.count(), 1);
        assert!(map.is_discovered(Position::new(1, 2)));
        assert!(!map.is_discovered(Position::new(2, 1)));
        assert_eq!(map.discovered_positions(), vec![Position::new(1, 2)]);
    }
}
