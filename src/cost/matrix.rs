use crate::Energy;
use crate::transport::Measure;
use serde::Deserialize;
use serde::Serialize;
use std::ops::Index;

/// Pairwise transport costs, `C[i][j]` from source atom i to target atom j.
pub type CostMatrix = Matrix;
/// Materialized coupling, `P[i][j]` mass moved from source i to target j.
pub type Plan = Matrix;

/// Dense row-major N×M matrix of non-negative reals.
///
/// Serializes as nested rows, which is how callers hand cost matrices over.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Vec<Energy>>", into = "Vec<Vec<Energy>>")]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Energy>,
}

impl Matrix {
    /// Matrix with every entry set to `value`.
    pub fn filled(rows: usize, cols: usize, value: Energy) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }
    /// Matrix with entry (i, j) computed by `f(i, j)`, row by row.
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> Energy,
    {
        Self {
            rows,
            cols,
            data: (0..rows)
                .flat_map(|i| (0..cols).map(move |j| (i, j)))
                .map(|(i, j)| f(i, j))
                .collect(),
        }
    }
    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }
    /// Contiguous slice of row i.
    pub fn row(&self, i: usize) -> &[Energy] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }
    /// Strided walk down column j.
    pub fn column(&self, j: usize) -> impl Iterator<Item = Energy> + '_ {
        (0..self.rows).map(move |i| self[(i, j)])
    }
    pub fn row_sums(&self) -> Vec<Energy> {
        (0..self.rows).map(|i| self.row(i).iter().sum()).collect()
    }
    pub fn column_sums(&self) -> Vec<Energy> {
        (0..self.cols).map(|j| self.column(j).sum()).collect()
    }
    /// Sum over every entry.
    pub fn total(&self) -> Energy {
        self.data.iter().sum()
    }
    /// Elementwise transform, e.g. the Gibbs kernel exp(-C/ε).
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(Energy) -> Energy,
    {
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().copied().map(f).collect(),
        }
    }
    /// Square n×n copy, new rows and columns filled with `sentinel`.
    pub fn padded(&self, n: usize, sentinel: Energy) -> Self {
        debug_assert!(n >= self.rows && n >= self.cols, "padding cannot shrink");
        Self::from_fn(n, n, |i, j| match i < self.rows && j < self.cols {
            true => self[(i, j)],
            false => sentinel,
        })
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = Energy;
    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        &self.data[i * self.cols + j]
    }
}

impl Measure for Matrix {
    type X = usize;
    type Y = usize;
    fn distance(&self, x: &Self::X, y: &Self::Y) -> Energy {
        self[(*x, *y)]
    }
}

impl From<Vec<Vec<Energy>>> for Matrix {
    fn from(rows: Vec<Vec<Energy>>) -> Self {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        debug_assert!(rows.iter().all(|r| r.len() == cols), "ragged rows");
        Self {
            rows: rows.len(),
            cols,
            data: rows.into_iter().flatten().collect(),
        }
    }
}

impl From<Matrix> for Vec<Vec<Energy>> {
    fn from(matrix: Matrix) -> Self {
        (0..matrix.rows).map(|i| matrix.row(i).to_vec()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexes_row_major() {
        let m = Matrix::from(vec![vec![1., 2., 3.], vec![4., 5., 6.]]);
        assert_eq!(m.rows(), 2);
        assert_eq!(m.cols(), 3);
        assert_eq!(m[(1, 2)], 6.);
        assert_eq!(m.row(1), &[4., 5., 6.]);
        assert_eq!(m.column(1).collect::<Vec<_>>(), vec![2., 5.]);
        assert_eq!(m.distance(&0, &2), 3.);
    }
    #[test]
    fn sums_marginals() {
        let m = Matrix::from(vec![vec![1., 2.], vec![3., 4.]]);
        assert_eq!(m.row_sums(), vec![3., 7.]);
        assert_eq!(m.column_sums(), vec![4., 6.]);
        assert_eq!(m.total(), 10.);
    }
    #[test]
    fn pads_with_sentinel() {
        let m = Matrix::from(vec![vec![0., 1.]]).padded(3, 1e3);
        assert!(m.is_square());
        assert_eq!(m.row(0), &[0., 1., 1e3]);
        assert_eq!(m.row(2), &[1e3, 1e3, 1e3]);
    }
    #[test]
    fn serializes_as_nested_rows() {
        let m = Matrix::from(vec![vec![0.5, 1.], vec![2., 0.]]);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "[[0.5,1.0],[2.0,0.0]]");
        assert_eq!(serde_json::from_str::<Matrix>(&json).unwrap(), m);
    }
}
