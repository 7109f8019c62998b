use std::cmp::Ordering;
use std::fmt;

/// Exact match between reference and query, as reported by the anchor finder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub start_ref: i64,   // 0-based offset into the reference
    pub start_query: i64, // 0-based offset into the query
    pub length: i64,      // matched positions, always > 0
    pub cluster_id: usize, // assigned by the cluster builder, 0 until then
}

impl Anchor {
    pub fn new(start_ref: i64, start_query: i64, length: i64) -> Self {
        assert!(length > 0, "anchor length must be positive, got {length}");
        assert!(
            start_ref >= 0 && start_query >= 0,
            "anchor coordinates must be non-negative, got ({start_ref}, {start_query})"
        );
        Anchor {
            start_ref,
            start_query,
            length,
            cluster_id: 0,
        }
    }

    /// `start_query - start_ref`, constant along a collinear run
    pub fn diagonal(&self) -> i64 {
        self.start_query - self.start_ref
    }

    pub fn ref_end(&self) -> i64 {
        self.start_ref + self.length
    }

    pub fn query_end(&self) -> i64 {
        self.start_query + self.length
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {}, {})", self.start_ref, self.start_query, self.length)
    }
}

/// Order used by the filter and the chain DP: query start, then reference start
pub fn by_query(a: &Anchor, b: &Anchor) -> Ordering {
    a.start_query
        .cmp(&b.start_query)
        .then_with(|| a.start_ref.cmp(&b.start_ref))
}

/// Order used to regroup anchors after clustering
pub fn by_cluster(a: &Anchor, b: &Anchor) -> Ordering {
    a.cluster_id
        .cmp(&b.cluster_id)
        .then_with(|| by_query(a, b))
}

/// All anchors reported for one query sequence, with the header that introduced them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryBatch {
    pub label: String,
    pub anchors: Vec<Anchor>,
}

impl QueryBatch {
    pub fn new(label: impl Into<String>) -> Self {
        QueryBatch {
            label: label.into(),
            anchors: Vec::new(),
        }
    }

    pub fn with_anchors(label: impl Into<String>, anchors: Vec<Anchor>) -> Self {
        QueryBatch {
            label: label.into(),
            anchors,
        }
    }

    pub fn push(&mut self, anchor: Anchor) {
        self.anchors.push(anchor);
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }
}
