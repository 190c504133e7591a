use std::fmt;

use crate::ShapeError;

/// Largest width or height a [`Shape`] may have.
pub const MAX_SHAPE_SIZE: usize = 5;

/// Rectangular binary matrix describing which sub-cells of a piece are filled.
///
/// Each row is stored as a bitmask where bit `dx` is set when the sub-cell at
/// column `dx` is filled. A `Shape` always has at least one row and at least
/// one filled sub-cell; every constructor enforces this, so the rest of the
/// engine never has to check for malformed shapes.
///
/// # Example
///
/// ```
/// use gridblast_engine::Shape;
///
/// let shape = Shape::from_rows(&[&[1, 0], &[1, 1]]).unwrap();
/// assert_eq!(shape.width(), 2);
/// assert_eq!(shape.height(), 2);
/// assert_eq!(shape.cell_count(), 3);
/// assert_eq!(shape.to_string(), "#.\n##");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    width: u8,
    height: u8,
    rows: [u8; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Builds a shape from rows of `0` (empty) and `1` (filled) values.
    ///
    /// All rows must have the same non-zero length, neither dimension may
    /// exceed [`MAX_SHAPE_SIZE`], and at least one value must be `1`.
    #[expect(clippy::cast_possible_truncation)]
    pub const fn from_rows(rows: &[&[u8]]) -> Result<Self, ShapeError> {
        if rows.is_empty() || rows[0].is_empty() {
            return Err(ShapeError::Empty);
        }
        let height = rows.len();
        let width = rows[0].len();
        if height > MAX_SHAPE_SIZE || width > MAX_SHAPE_SIZE {
            return Err(ShapeError::TooLarge);
        }

        let mut masks = [0; MAX_SHAPE_SIZE];
        let mut filled = false;
        let mut dy = 0;
        while dy < height {
            let row = rows[dy];
            if row.len() != width {
                return Err(ShapeError::Ragged);
            }
            let mut dx = 0;
            while dx < width {
                match row[dx] {
                    0 => {}
                    1 => {
                        masks[dy] |= 1 << dx;
                        filled = true;
                    }
                    _ => return Err(ShapeError::InvalidCell),
                }
                dx += 1;
            }
            dy += 1;
        }
        if !filled {
            return Err(ShapeError::NoFilledCell);
        }

        Ok(Self {
            width: width as u8,
            height: height as u8,
            rows: masks,
        })
    }

    /// Catalog constructor; invalid templates fail at compile time.
    const fn template(rows: &[&[u8]]) -> Self {
        match Self::from_rows(rows) {
            Ok(shape) => shape,
            Err(_) => panic!("invalid shape template"),
        }
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width as usize
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height as usize
    }

    /// Returns `true` if the sub-cell at `(dx, dy)` is filled.
    ///
    /// Positions outside the shape's bounding box are reported as empty.
    #[must_use]
    pub const fn is_filled(&self, dx: usize, dy: usize) -> bool {
        dx < self.width() && dy < self.height() && (self.rows[dy] & (1 << dx)) != 0
    }

    /// Number of filled sub-cells.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        let mut count = 0;
        let mut dy = 0;
        while dy < MAX_SHAPE_SIZE {
            count += self.rows[dy].count_ones() as usize;
            dy += 1;
        }
        count
    }

    /// Iterates over the `(dx, dy)` offsets of all filled sub-cells, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.height()).flat_map(move |dy| {
            (0..self.width())
                .filter(move |&dx| self.is_filled(dx, dy))
                .map(move |dx| (dx, dy))
        })
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for dy in 0..self.height() {
            if dy > 0 {
                writeln!(f)?;
            }
            for dx in 0..self.width() {
                let ch = if self.is_filled(dx, dy) { '#' } else { '.' };
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

/// The fixed set of shape templates pieces are drawn from.
///
/// Pieces never rotate, so every orientation of a shape is its own template.
pub const SHAPE_CATALOG: [Shape; 23] = [
    // Single dot
    Shape::template(&[&[1]]),
    // 1x2
    Shape::template(&[&[1, 1]]),
    Shape::template(&[&[1], &[1]]),
    // 1x3
    Shape::template(&[&[1, 1, 1]]),
    Shape::template(&[&[1], &[1], &[1]]),
    // 1x4
    Shape::template(&[&[1, 1, 1, 1]]),
    Shape::template(&[&[1], &[1], &[1], &[1]]),
    // 1x5
    Shape::template(&[&[1, 1, 1, 1, 1]]),
    Shape::template(&[&[1], &[1], &[1], &[1], &[1]]),
    // Squares
    Shape::template(&[&[1, 1], &[1, 1]]),
    Shape::template(&[&[1, 1, 1], &[1, 1, 1], &[1, 1, 1]]),
    // L-shapes
    Shape::template(&[&[1, 0], &[1, 0], &[1, 1]]),
    Shape::template(&[&[0, 1], &[0, 1], &[1, 1]]),
    Shape::template(&[&[1, 1], &[1, 0], &[1, 0]]),
    Shape::template(&[&[1, 1], &[0, 1], &[0, 1]]),
    // Small L-shapes
    Shape::template(&[&[1, 0], &[1, 1]]),
    Shape::template(&[&[0, 1], &[1, 1]]),
    Shape::template(&[&[1, 1], &[1, 0]]),
    Shape::template(&[&[1, 1], &[0, 1]]),
    // T-shapes
    Shape::template(&[&[1, 1, 1], &[0, 1, 0]]),
    Shape::template(&[&[0, 1, 0], &[1, 1, 1]]),
    Shape::template(&[&[1, 0], &[1, 1], &[1, 0]]),
    Shape::template(&[&[0, 1], &[1, 1], &[0, 1]]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_rejects_malformed_shapes() {
        assert_eq!(Shape::from_rows(&[]), Err(ShapeError::Empty));
        assert_eq!(Shape::from_rows(&[&[]]), Err(ShapeError::Empty));
        assert_eq!(
            Shape::from_rows(&[&[1, 1], &[1]]),
            Err(ShapeError::Ragged)
        );
        assert_eq!(
            Shape::from_rows(&[&[0, 0], &[0, 0]]),
            Err(ShapeError::NoFilledCell)
        );
        assert_eq!(
            Shape::from_rows(&[&[1, 1, 1, 1, 1, 1]]),
            Err(ShapeError::TooLarge)
        );
        assert_eq!(Shape::from_rows(&[&[1, 2]]), Err(ShapeError::InvalidCell));
    }

    #[test]
    fn test_cells_are_row_major() {
        let shape = Shape::from_rows(&[&[1, 1, 1], &[0, 1, 0]]).unwrap();
        let cells: Vec<_> = shape.cells().collect();
        assert_eq!(cells, [(0, 0), (1, 0), (2, 0), (1, 1)]);
        assert_eq!(shape.cell_count(), 4);
    }

    #[test]
    fn test_is_filled_outside_bounding_box() {
        let shape = Shape::from_rows(&[&[1]]).unwrap();
        assert!(shape.is_filled(0, 0));
        assert!(!shape.is_filled(1, 0));
        assert!(!shape.is_filled(0, 1));
    }

    #[test]
    fn test_catalog_shapes_are_tight_and_distinct() {
        for (i, shape) in SHAPE_CATALOG.iter().enumerate() {
            assert!(shape.cell_count() > 0);
            assert!(
                (0..shape.height()).any(|dy| shape.is_filled(0, dy)),
                "template {i} has an empty first column:\n{shape}"
            );
            assert!(
                (0..shape.width()).any(|dx| shape.is_filled(dx, 0)),
                "template {i} has an empty first row:\n{shape}"
            );
            for other in &SHAPE_CATALOG[i + 1..] {
                assert_ne!(shape, other, "duplicate template:\n{shape}");
            }
        }
    }

    #[test]
    fn test_catalog_cell_counts() {
        let counts: Vec<_> = SHAPE_CATALOG.iter().map(Shape::cell_count).collect();
        assert_eq!(
            counts,
            [1, 2, 2, 3, 3, 4, 4, 5, 5, 4, 9, 4, 4, 4, 4, 3, 3, 3, 3, 4, 4, 4, 4]
        );
    }
}
