use crate::game::Shape;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    pub shape: Shape,
    pub matrix: Vec<Vec<bool>>,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    /// New piece in spawn orientation, horizontally centred on a board `board_w` wide.
    pub fn spawn(shape: Shape, board_w: usize) -> Self {
        let matrix = shape.matrix();
        let width = matrix.first().map_or(0, |row| row.len());
        Self {
            shape,
            x: (board_w / 2) as i32 - (width / 2) as i32,
            y: 0,
            matrix,
        }
    }

    /// Board coordinates of every occupied cell.
    pub fn cells(&self) -> Vec<(i32, i32)> {
        matrix_cells(&self.matrix)
            .map(|(dx, dy)| (self.x + dx, self.y + dy))
            .collect()
    }

    /// Same anchor, matrix turned 90° clockwise.
    pub fn rotated(&self) -> Self {
        Self {
            matrix: rotate_cw(&self.matrix),
            ..self.clone()
        }
    }

    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        let mut next = self.clone();
        next.x += dx;
        next.y += dy;
        next
    }
}

/// Offsets of occupied cells inside a matrix, as (column, row).
pub fn matrix_cells(matrix: &[Vec<bool>]) -> impl Iterator<Item = (i32, i32)> + '_ {
    matrix.iter().enumerate().flat_map(|(r, row)| {
        row.iter()
            .enumerate()
            .filter(|(_, filled)| **filled)
            .map(move |(c, _)| (c as i32, r as i32))
    })
}

// rotated[c][r] = m[rows - 1 - r][c]
fn rotate_cw(m: &[Vec<bool>]) -> Vec<Vec<bool>> {
    let rows = m.len();
    let cols = m.first().map_or(0, |row| row.len());
    (0..cols)
        .map(|c| (0..rows).map(|r| m[rows - 1 - r][c]).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_centres_on_board() {
        assert_eq!(Piece::spawn(Shape::I, 10).x, 3);
        assert_eq!(Piece::spawn(Shape::O, 10).x, 4);
        assert_eq!(Piece::spawn(Shape::T, 10).x, 4);
        assert_eq!(Piece::spawn(Shape::T, 10).y, 0);
    }

    #[test]
    fn rotating_i_turns_row_into_column() {
        let piece = Piece::spawn(Shape::I, 10);
        let mut cells = piece.rotated().cells();
        cells.sort();
        assert_eq!(cells, vec![(5, 0), (5, 1), (5, 2), (5, 3)]);
    }

    #[test]
    fn four_rotations_restore_the_matrix() {
        for shape in Shape::ALL {
            let piece = Piece::spawn(shape, 10);
            let back = piece.rotated().rotated().rotated().rotated();
            assert_eq!(back, piece);
        }
    }

    #[test]
    fn o_piece_is_rotation_invariant() {
        let piece = Piece::spawn(Shape::O, 10);
        assert_eq!(piece.rotated().matrix, piece.matrix);
    }

    #[test]
    fn shifted_moves_anchor_only() {
        let piece = Piece::spawn(Shape::L, 10);
        let moved = piece.shifted(-2, 3);
        assert_eq!((moved.x, moved.y), (piece.x - 2, piece.y + 3));
        assert_eq!(moved.matrix, piece.matrix);
    }
}
