/// Union-Find (Disjoint Sets) over anchor indices, weighted by set size
pub struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl UnionFind {
    /// Create a new UnionFind with n singleton elements
    pub fn new(n: usize) -> Self {
        let parent = (0..n).collect();
        let size = vec![1; n];
        UnionFind { parent, size }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    pub fn is_root(&self, x: usize) -> bool {
        self.parent[x] == x
    }

    /// Find the root of element x, pointing every node on the path straight at it
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    /// Union the sets whose roots are `a` and `b`.
    ///
    /// The smaller tree goes under the larger root; on equal sizes `a` goes under `b`.
    /// Passing a non-root is a caller bug and panics.
    pub fn union_roots(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        assert!(
            self.is_root(a) && self.is_root(b),
            "union_roots called with non-root elements {a} and {b}"
        );

        if self.size[a] > self.size[b] {
            self.size[a] += self.size[b];
            self.parent[b] = a;
        } else {
            self.size[b] += self.size[a];
            self.parent[a] = b;
        }
    }

    /// Union two sets containing x and y
    #[cfg(test)]
    fn union(&mut self, x: usize, y: usize) {
        let root_x = self.find(x);
        let root_y = self.find(y);
        self.union_roots(root_x, root_y);
    }

    /// Check if two elements are in the same set
    #[cfg(test)]
    fn connected(&mut self, x: usize, y: usize) -> bool {
        self.find(x) == self.find(y)
    }

    /// Number of elements in the set containing x
    #[cfg(test)]
    fn set_size(&mut self, x: usize) -> usize {
        let root = self.find(x);
        self.size[root]
    }
}
