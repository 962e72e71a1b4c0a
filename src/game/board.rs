use crate::game::{Piece, Shape};
use crate::game::piece::matrix_cells;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Filled(Shape),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    pub width: usize,
    pub height: usize,
    cells: Vec<Cell>,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn get(&self, x: usize, y: usize) -> Cell {
        self.cells[self.idx(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, value: Cell) {
        let idx = self.idx(x, y);
        self.cells[idx] = value;
    }

    pub fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| *c == Cell::Empty)
    }

    /// True if the matrix anchored at (x, y) leaves the well sideways, sinks through
    /// the floor, or overlaps a locked cell. Rows above the ceiling never collide.
    pub fn collides(&self, matrix: &[Vec<bool>], x: i32, y: i32) -> bool {
        matrix_cells(matrix).any(|(dx, dy)| {
            let (bx, by) = (x + dx, y + dy);
            if bx < 0 || bx >= self.width as i32 || by >= self.height as i32 {
                return true;
            }
            by >= 0 && self.get(bx as usize, by as usize) != Cell::Empty
        })
    }

    /// Writes the piece into the grid. Cells still above the ceiling are dropped.
    /// Returns the board coordinates that were written.
    pub fn lock(&mut self, piece: &Piece) -> Vec<(usize, usize)> {
        let mut written = Vec::with_capacity(4);
        for (x, y) in piece.cells() {
            if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
                let (xu, yu) = (x as usize, y as usize);
                self.set(xu, yu, Cell::Filled(piece.shape));
                written.push((xu, yu));
            }
        }
        written
    }

    pub fn full_rows(&self) -> Vec<usize> {
        (0..self.height)
            .filter(|&y| (0..self.width).all(|x| self.get(x, y) != Cell::Empty))
            .collect()
    }

    /// Removes every full row at once, shifts the rest down and refills the top with
    /// empty rows. Returns how many rows went.
    pub fn clear_full_rows(&mut self) -> usize {
        let full = self.full_rows();
        if full.is_empty() {
            return 0;
        }
        let mut kept = Vec::with_capacity(self.cells.len());
        kept.resize(full.len() * self.width, Cell::Empty);
        for y in (0..self.height).filter(|y| !full.contains(y)) {
            let start = self.idx(0, y);
            kept.extend_from_slice(&self.cells[start..start + self.width]);
        }
        self.cells = kept;
        full.len()
    }

    #[cfg(test)]
    pub fn fill_row_except(&mut self, y: usize, gaps: &[usize], shape: Shape) {
        for x in 0..self.width {
            if !gaps.contains(&x) {
                self.set(x, y, Cell::Filled(shape));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn o_matrix() -> Vec<Vec<bool>> {
        Shape::O.matrix()
    }

    #[test]
    fn cells_above_ceiling_do_not_collide() {
        let board = Board::new(10, 20);
        assert!(!board.collides(&o_matrix(), 4, -1));
        assert!(!board.collides(&o_matrix(), 4, -5));
    }

    #[test]
    fn walls_and_floor_collide() {
        let board = Board::new(10, 20);
        assert!(board.collides(&o_matrix(), -1, 0));
        assert!(board.collides(&o_matrix(), 9, 0));
        assert!(board.collides(&o_matrix(), 4, 19));
        assert!(!board.collides(&o_matrix(), 8, 18));
    }

    #[test]
    fn occupied_cells_collide() {
        let mut board = Board::new(10, 20);
        board.set(5, 10, Cell::Filled(Shape::Z));
        assert!(board.collides(&o_matrix(), 4, 9));
        assert!(!board.collides(&o_matrix(), 6, 9));
    }

    #[test]
    fn lock_skips_cells_above_ceiling() {
        let mut board = Board::new(10, 20);
        let mut piece = Piece::spawn(Shape::O, 10);
        piece.y = -1;
        let written = board.lock(&piece);
        assert_eq!(written.len(), 2);
        assert_eq!(board.get(4, 0), Cell::Filled(Shape::O));
        assert_eq!(board.get(5, 0), Cell::Filled(Shape::O));
    }

    #[test]
    fn clearing_without_full_rows_leaves_board_untouched() {
        let mut board = Board::new(10, 20);
        board.fill_row_except(19, &[3], Shape::T);
        board.set(0, 5, Cell::Filled(Shape::J));
        let before = board.clone();
        assert_eq!(board.clear_full_rows(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn non_adjacent_full_rows_clear_together() {
        let mut board = Board::new(10, 20);
        board.fill_row_except(19, &[], Shape::I);
        board.fill_row_except(18, &[0], Shape::S);
        board.fill_row_except(17, &[], Shape::I);
        board.set(2, 16, Cell::Filled(Shape::L));

        assert_eq!(board.clear_full_rows(), 2);
        assert_eq!(board.width, 10);
        assert_eq!(board.height, 20);
        // partial row 18 drops to the floor, the marker from 16 lands on 18
        assert_eq!(board.get(0, 19), Cell::Empty);
        assert_eq!(board.get(1, 19), Cell::Filled(Shape::S));
        assert_eq!(board.get(2, 18), Cell::Filled(Shape::L));
        assert!((0..10).all(|x| board.get(x, 0) == Cell::Empty));
        assert!((0..10).all(|x| board.get(x, 1) == Cell::Empty));
        assert!(board.full_rows().is_empty());
    }

    #[test]
    fn four_full_rows_clear_to_empty_board() {
        let mut board = Board::new(10, 20);
        for y in 16..20 {
            board.fill_row_except(y, &[], Shape::I);
        }
        assert_eq!(board.clear_full_rows(), 4);
        assert!(board.is_empty());
    }
}
