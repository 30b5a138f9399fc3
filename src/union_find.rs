/// Disjoint-set forest over point indices with union by size and path compression.
/// Every set is identified by its root, which is one of its own member indices.
#[derive(Debug, Clone)]
pub(crate) struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl UnionFind {
    pub(crate) fn new(n_samples: usize) -> Self {
        UnionFind {
            parent: (0..n_samples).collect(),
            size: vec![1; n_samples],
        }
    }

    /// Merges the sets containing `m` and `n`, returning the root of the merged set. The
    /// larger set's root survives. Ties keep the lower root index.
    pub(crate) fn union(&mut self, m: usize, n: usize) -> usize {
        let mut m = self.find(m);
        let mut n = self.find(n);
        if m == n {
            return m;
        }
        if self.size[m] < self.size[n] || (self.size[m] == self.size[n] && n < m) {
            std::mem::swap(&mut m, &mut n);
        }
        self.parent[n] = m;
        self.size[m] += self.size[n];
        m
    }

    pub(crate) fn find(&mut self, mut n: usize) -> usize {
        let mut root = n;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        while self.parent[n] != root {
            let next = self.parent[n];
            self.parent[n] = root;
            n = next;
        }
        root
    }

    pub(crate) fn len(&self) -> usize {
        self.parent.len()
    }
}
