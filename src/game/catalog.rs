use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// The seven tetromino types. Doubles as the colour token stored in locked cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl Shape {
    pub const ALL: [Shape; 7] = [
        Shape::I,
        Shape::J,
        Shape::L,
        Shape::O,
        Shape::S,
        Shape::T,
        Shape::Z,
    ];

    /// Spawn-orientation occupancy matrix. Always square: 4x4 for I, 2x2 for O, 3x3 otherwise.
    pub fn matrix(self) -> Vec<Vec<bool>> {
        const I: [[u8; 4]; 4] = [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]];
        const J: [[u8; 3]; 3] = [[1, 0, 0], [1, 1, 1], [0, 0, 0]];
        const L: [[u8; 3]; 3] = [[0, 0, 1], [1, 1, 1], [0, 0, 0]];
        const O: [[u8; 2]; 2] = [[1, 1], [1, 1]];
        const S: [[u8; 3]; 3] = [[0, 1, 1], [1, 1, 0], [0, 0, 0]];
        const T: [[u8; 3]; 3] = [[0, 1, 0], [1, 1, 1], [0, 0, 0]];
        const Z: [[u8; 3]; 3] = [[1, 1, 0], [0, 1, 1], [0, 0, 0]];

        fn rows<const N: usize>(m: &[[u8; N]; N]) -> Vec<Vec<bool>> {
            m.iter()
                .map(|row| row.iter().map(|&c| c != 0).collect())
                .collect()
        }

        match self {
            Shape::I => rows(&I),
            Shape::J => rows(&J),
            Shape::L => rows(&L),
            Shape::O => rows(&O),
            Shape::S => rows(&S),
            Shape::T => rows(&T),
            Shape::Z => rows(&Z),
        }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Shape::I => (0x00, 0xf6, 0xff),
            Shape::J => (0x00, 0x66, 0xff),
            Shape::L => (0xff, 0x99, 0x00),
            Shape::O => (0xff, 0xff, 0x00),
            Shape::S => (0x00, 0xff, 0x00),
            Shape::T => (0x99, 0x00, 0xff),
            Shape::Z => (0xff, 0x00, 0x00),
        }
    }
}

/// Supplies the type of every freshly drawn piece.
pub trait PieceSource {
    fn next_shape(&mut self) -> Shape;
}

/// Uniform random selection over the catalog.
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl PieceSource for RandomSource {
    fn next_shape(&mut self) -> Shape {
        *Shape::ALL.choose(&mut self.rng).unwrap_or(&Shape::I)
    }
}

/// Cycles through a fixed list. Used to script deterministic games.
#[cfg(test)]
pub struct SequenceSource {
    shapes: Vec<Shape>,
    index: usize,
}

#[cfg(test)]
impl SequenceSource {
    pub fn new(shapes: Vec<Shape>) -> Self {
        Self { shapes, index: 0 }
    }
}

#[cfg(test)]
impl PieceSource for SequenceSource {
    fn next_shape(&mut self) -> Shape {
        if self.shapes.is_empty() {
            return Shape::I;
        }
        let shape = self.shapes[self.index % self.shapes.len()];
        self.index += 1;
        shape
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_shape_has_four_cells_in_a_square_matrix() {
        for shape in Shape::ALL {
            let m = shape.matrix();
            assert!(m.iter().all(|row| row.len() == m.len()), "{shape:?}");
            let filled = m.iter().flatten().filter(|&&c| c).count();
            assert_eq!(filled, 4, "{shape:?}");
        }
    }

    #[test]
    fn sequence_source_wraps_around() {
        let mut src = SequenceSource::new(vec![Shape::T, Shape::O]);
        let drawn: Vec<Shape> = (0..5).map(|_| src.next_shape()).collect();
        assert_eq!(drawn, vec![Shape::T, Shape::O, Shape::T, Shape::O, Shape::T]);
    }

    #[test]
    fn seeded_random_source_is_reproducible() {
        let mut a = RandomSource::new(Some(42));
        let mut b = RandomSource::new(Some(42));
        for _ in 0..32 {
            assert_eq!(a.next_shape(), b.next_shape());
        }
    }
}
