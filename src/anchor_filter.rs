/// Redundancy filter for the anchors of one query.
///
/// Anchors that lie on the same diagonal and overlap (or touch) on the query are merged into
/// one span. Anchors sharing a start coordinate with a longer neighbour that covers at least
/// half of them are treated as nested copies from a repeat run and removed. For example, if
/// the reference has 27 As and the query has 20, the first and last matches of the run survive
/// and the ones in the middle are eliminated.
use crate::anchor::{by_query, Anchor};

/// Per-anchor state, valid only within one sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FilterState {
    Live,
    Tentative, // still live, but lost an equal-length contest to an earlier anchor
    Dropped,
}

/// Sort anchors by query position and filter them until a sweep removes nothing.
pub fn filter_anchors(mut anchors: Vec<Anchor>) -> Vec<Anchor> {
    anchors.sort_by(by_query);

    loop {
        let before = anchors.len();
        anchors = filter_sweep(&anchors);
        if anchors.len() == before {
            return anchors;
        }
    }
}

/// One left-to-right sweep over anchors already sorted with `by_query`.
///
/// Returns the survivors in their original order, with merged anchors lengthened. A single
/// sweep is not idempotent: a merge can lengthen an anchor after it was compared with a
/// nested neighbour, so callers wanting a stable result use `filter_anchors`.
pub fn filter_sweep(anchors: &[Anchor]) -> Vec<Anchor> {
    let n = anchors.len();
    let mut work = anchors.to_vec();
    let mut state = vec![FilterState::Live; n];

    for i in 0..n {
        if state[i] == FilterState::Dropped {
            continue;
        }

        let i_diag = work[i].diagonal();
        let mut i_end = work[i].query_end();

        let mut j = i + 1;
        while j < n && work[j].start_query <= i_end {
            debug_assert!(work[i].start_query <= work[j].start_query);

            if state[j] == FilterState::Dropped {
                j += 1;
                continue;
            }

            let a = work[i];
            let b = work[j];

            if b.diagonal() == i_diag {
                let j_extent = b.query_end() - a.start_query;
                if j_extent > a.length {
                    work[i].length = j_extent;
                    i_end = a.start_query + j_extent;
                }
                state[j] = FilterState::Dropped;
                j += 1;
                continue;
            }

            // Overlap is measured on the axis where the two starts differ
            let olap = if a.start_ref == b.start_ref {
                a.query_end() - b.start_query
            } else if a.start_query == b.start_query {
                a.ref_end() - b.start_ref
            } else {
                j += 1;
                continue;
            };

            if a.length < b.length {
                if olap >= a.length / 2 {
                    state[i] = FilterState::Dropped;
                    break;
                }
            } else if b.length < a.length {
                if olap >= b.length / 2 {
                    state[j] = FilterState::Dropped;
                }
            } else if olap >= a.length / 2 {
                // Equal lengths: the later one is marked; an anchor marked twice gives way
                state[j] = FilterState::Tentative;
                if state[i] == FilterState::Tentative {
                    state[i] = FilterState::Dropped;
                    break;
                }
            }

            j += 1;
        }
    }

    work.into_iter()
        .zip(state)
        .filter(|(_, s)| *s != FilterState::Dropped)
        .map(|(anchor, _)| anchor)
        .collect()
}
