use crate::Energy;
use crate::Point;

/// Uniform `size × size` partition of the unit square with array-backed buckets.
///
/// Point indices are counting-sorted by cell id, so each bucket lists its
/// points in insertion order and enumeration never depends on hashing.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    size: usize,
    offsets: Vec<usize>,
    members: Vec<usize>,
}

impl Grid {
    /// Cells per axis for n points: max(1, ⌊√n / 2⌋).
    pub fn size_for(n: usize) -> usize {
        ((n as Energy).sqrt() / 2.).floor().max(1.) as usize
    }
    pub fn size(&self) -> usize {
        self.size
    }
    /// Cell coordinates of a point, clamped to the grid.
    pub fn cell(&self, point: &Point) -> (usize, usize) {
        (self.axis(point[0]), self.axis(point[1]))
    }
    /// Linearized cell id cx·size + cy.
    pub fn id(&self, (cx, cy): (usize, usize)) -> usize {
        cx * self.size + cy
    }
    /// Points falling in cell (cx, cy).
    pub fn bucket(&self, cell: (usize, usize)) -> &[usize] {
        let id = self.id(cell);
        &self.members[self.offsets[id]..self.offsets[id + 1]]
    }
    /// Points in the 3×3 block around a cell, x-offset major, then y-offset,
    /// each bucket in insertion order.
    pub fn neighborhood(&self, (cx, cy): (usize, usize)) -> impl Iterator<Item = usize> + '_ {
        let size = self.size as isize;
        (-1..=1isize)
            .flat_map(move |dx| (-1..=1isize).map(move |dy| (cx as isize + dx, cy as isize + dy)))
            .filter(move |&(x, y)| x >= 0 && y >= 0 && x < size && y < size)
            .flat_map(move |(x, y)| self.bucket((x as usize, y as usize)).iter().copied())
    }
    fn axis(&self, coordinate: Energy) -> usize {
        let last = self.size as isize - 1;
        ((coordinate * self.size as Energy).floor() as isize).clamp(0, last) as usize
    }
}

impl From<(&[Point], usize)> for Grid {
    fn from((points, size): (&[Point], usize)) -> Self {
        let mut grid = Self {
            size,
            offsets: vec![0; size * size + 1],
            members: vec![0; points.len()],
        };
        let ids = points
            .iter()
            .map(|p| grid.id(grid.cell(p)))
            .collect::<Vec<_>>();
        for &id in ids.iter() {
            grid.offsets[id + 1] += 1;
        }
        for id in 0..size * size {
            grid.offsets[id + 1] += grid.offsets[id];
        }
        let mut cursor = grid.offsets.clone();
        for (i, &id) in ids.iter().enumerate() {
            grid.members[cursor[id]] = i;
            cursor[id] += 1;
        }
        grid
    }
}
