use super::matrix::CostMatrix;
use crate::Energy;

/// N×M matrix of squared Euclidean distances between two D-dimensional point sets.
pub fn squared_euclidean<P>(xs: &[P], ys: &[P]) -> CostMatrix
where
    P: AsRef<[Energy]>,
{
    CostMatrix::from_fn(xs.len(), ys.len(), |i, j| {
        let x = xs[i].as_ref();
        let y = ys[j].as_ref();
        debug_assert!(x.len() == y.len(), "dimension mismatch");
        x.iter().zip(y).map(|(a, b)| (a - b) * (a - b)).sum()
    })
}

/// N×M matrix of Euclidean distances between two D-dimensional point sets.
pub fn euclidean<P>(xs: &[P], ys: &[P]) -> CostMatrix
where
    P: AsRef<[Energy]>,
{
    squared_euclidean(xs, ys).map(Energy::sqrt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point;

    #[test]
    fn squared_distances() {
        let xs: Vec<Point> = vec![[0., 0.], [1., 1.]];
        let ys: Vec<Point> = vec![[0., 0.], [3., 4.], [1., 0.]];
        let c = squared_euclidean(&xs, &ys);
        assert_eq!((c.rows(), c.cols()), (2, 3));
        assert_eq!(c.row(0), &[0., 25., 1.]);
        assert_eq!(c.row(1), &[2., 13., 1.]);
    }
    #[test]
    fn euclidean_distances() {
        let xs: Vec<Point> = vec![[0., 0.]];
        let ys: Vec<Point> = vec![[3., 4.], [0., 0.]];
        assert_eq!(euclidean(&xs, &ys).row(0), &[5., 0.]);
    }
    #[test]
    fn arbitrary_dimension() {
        let xs = vec![vec![1., 2., 3.]];
        let ys = vec![vec![1., 0., 0.], vec![1., 2., 3.]];
        assert_eq!(squared_euclidean(&xs, &ys).row(0), &[13., 0.]);
    }
}
