/// Diagonal-proximity clustering of filtered anchors
use crate::anchor::{by_cluster, Anchor};
use crate::config::ChainConfig;
use crate::union_find::UnionFind;

/// Anchors of one connected component, sorted by query then reference position
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    pub id: usize,
    pub anchors: Vec<Anchor>,
}

/// True when `later` may join `earlier` in a cluster: the query gap is within
/// `max_separation` and the diagonal drift within the gap-scaled tolerance.
pub fn is_proximate(earlier: &Anchor, later: &Anchor, config: &ChainConfig) -> bool {
    let sep = later.start_query - earlier.query_end();
    if sep > config.max_separation {
        return false;
    }
    let diag_diff = (later.diagonal() - earlier.diagonal()).abs();
    diag_diff <= config.diagonal_tolerance(sep)
}

/// Assign a `cluster_id` to every anchor.
///
/// `anchors` must be sorted by query position; the scan from each anchor stops at the first
/// candidate whose query gap exceeds `max_separation`.
pub fn assign_clusters(anchors: &mut [Anchor], config: &ChainConfig) {
    let n = anchors.len();
    let mut uf = UnionFind::new(n);

    for i in 0..n {
        let i_end = anchors[i].query_end();
        for j in (i + 1)..n {
            if anchors[j].start_query - i_end > config.max_separation {
                break;
            }
            if is_proximate(&anchors[i], &anchors[j], config) {
                let root_i = uf.find(i);
                let root_j = uf.find(j);
                uf.union_roots(root_i, root_j);
            }
        }
    }

    for (i, anchor) in anchors.iter_mut().enumerate() {
        anchor.cluster_id = uf.find(i);
    }
}

/// Partition query-sorted anchors into clusters, ordered by cluster id.
pub fn build_clusters(mut anchors: Vec<Anchor>, config: &ChainConfig) -> Vec<Cluster> {
    assign_clusters(&mut anchors, config);
    anchors.sort_by(by_cluster);

    anchors
        .chunk_by(|a, b| a.cluster_id == b.cluster_id)
        .map(|group| Cluster {
            id: group[0].cluster_id,
            anchors: group.to_vec(),
        })
        .collect()
}
