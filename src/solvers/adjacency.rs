/// Per-index candidate partners on the opposite side of the problem.
///
/// Row i lists the target columns considered when balancing source i, and
/// vice versa for columns. Built once per solve, discarded with it.
pub trait Candidates {
    /// Number of indices with a candidate list.
    fn len(&self) -> usize;
    /// Candidate partners of index x, in enumeration order.
    fn candidates(&self, x: usize) -> &[usize];
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Total candidate pairs across every index.
    fn edges(&self) -> usize {
        (0..self.len()).map(|x| self.candidates(x).len()).sum()
    }
}

/// Variable-width adjacency in compressed-row form.
///
/// Lists are appended one index at a time; `offsets[x]..offsets[x + 1]`
/// addresses index x's partners in `indices`.
#[derive(Debug, Clone, PartialEq)]
pub struct Adjacency {
    offsets: Vec<usize>,
    indices: Vec<usize>,
}

impl Adjacency {
    /// Appends the partner list of the next index.
    pub fn push<I>(&mut self, partners: I)
    where
        I: IntoIterator<Item = usize>,
    {
        self.indices.extend(partners);
        self.offsets.push(self.indices.len());
    }
}

impl Default for Adjacency {
    fn default() -> Self {
        Self {
            offsets: vec![0],
            indices: Vec::new(),
        }
    }
}

impl Candidates for Adjacency {
    fn len(&self) -> usize {
        self.offsets.len() - 1
    }
    fn candidates(&self, x: usize) -> &[usize] {
        &self.indices[self.offsets[x]..self.offsets[x + 1]]
    }
}

impl FromIterator<Vec<usize>> for Adjacency {
    fn from_iter<T>(lists: T) -> Self
    where
        T: IntoIterator<Item = Vec<usize>>,
    {
        lists.into_iter().fold(Self::default(), |mut adjacency, list| {
            adjacency.push(list);
            adjacency
        })
    }
}
