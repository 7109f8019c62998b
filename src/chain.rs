/// Chain extraction within one cluster.
///
/// Each round scores every remaining anchor with a longest-path DP over query order, where
/// linking anchor `j` before anchor `i` costs their overlap plus their diagonal drift. The
/// best-scoring path is taken as a chain, emitted if its score reaches the configured minimum,
/// and removed from the working set. Rounds repeat until no anchors remain, so one cluster can
/// yield several disjoint chains.
use crate::anchor::Anchor;
use crate::config::{ChainConfig, ChainScoring};

/// One emitted anchor, trimmed so it does not overlap its predecessor in the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainLink {
    pub ref_pos: i64,
    pub query_pos: i64,
    pub length: i64,
    pub adjustment: Option<i64>, // None when nothing was trimmed
    pub ref_gap: Option<i64>,    // None for the first link
    pub query_gap: Option<i64>,  // None for the first link
}

impl ChainLink {
    pub fn ref_end(&self) -> i64 {
        self.ref_pos + self.length
    }

    pub fn query_end(&self) -> i64 {
        self.query_pos + self.length
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    pub score: i64,
    pub links: Vec<ChainLink>,
}

/// DP state for one anchor during a scoring round
#[derive(Debug, Clone, Copy)]
struct ChainCell {
    score: i64,
    predecessor: Option<usize>,
    adjustment: i64,
}

/// Extract every chain from one cluster; returns the chains meeting `min_output_score` in
/// extraction order. `cluster` must be sorted by query, then reference position.
pub fn select_chains(cluster: &[Anchor], config: &ChainConfig) -> Vec<Chain> {
    let mut remaining = cluster.to_vec();
    let mut chains = Vec::new();

    while !remaining.is_empty() {
        let cells = score_anchors(&remaining);
        let members = trace_back(&cells, best_terminus(&cells));

        let score = chain_score(&remaining, &members, config.scoring);
        if score >= config.min_output_score {
            chains.push(Chain {
                score,
                links: emit_links(&remaining, &cells, &members),
            });
        } else {
            log::trace!(
                "discarding chain of {} anchors with score {score}",
                members.len()
            );
        }

        let mut consumed = vec![false; remaining.len()];
        for &m in &members {
            consumed[m] = true;
        }
        remaining = remaining
            .into_iter()
            .zip(consumed)
            .filter(|(_, used)| !used)
            .map(|(anchor, _)| anchor)
            .collect();
    }

    chains
}

/// Best chain score ending at each anchor
fn score_anchors(anchors: &[Anchor]) -> Vec<ChainCell> {
    let mut cells: Vec<ChainCell> = Vec::with_capacity(anchors.len());

    for (i, a_i) in anchors.iter().enumerate() {
        let mut cell = ChainCell {
            score: a_i.length,
            predecessor: None,
            adjustment: 0,
        };

        for (j, a_j) in anchors[..i].iter().enumerate() {
            let overlap = 0i64
                .max(a_j.ref_end() - a_i.start_ref)
                .max(a_j.query_end() - a_i.start_query);

            let penalty = overlap + (a_i.diagonal() - a_j.diagonal()).abs();
            let candidate = cells[j].score + a_i.length - penalty;
            if candidate > cell.score {
                cell = ChainCell {
                    score: candidate,
                    predecessor: Some(j),
                    adjustment: overlap,
                };
            }
        }

        cells.push(cell);
    }

    cells
}

/// First anchor holding the maximum score
fn best_terminus(cells: &[ChainCell]) -> usize {
    let mut best = 0;
    for (i, cell) in cells.iter().enumerate().skip(1) {
        if cell.score > cells[best].score {
            best = i;
        }
    }
    best
}

/// Chain members ending at `end`, in ascending index order
fn trace_back(cells: &[ChainCell], end: usize) -> Vec<usize> {
    let mut members = vec![end];
    let mut current = end;
    while let Some(prev) = cells[current].predecessor {
        members.push(prev);
        current = prev;
    }
    members.reverse();
    members
}

fn chain_score(anchors: &[Anchor], members: &[usize], scoring: ChainScoring) -> i64 {
    match scoring {
        ChainScoring::MatchedLength => members.iter().map(|&m| anchors[m].length).sum(),
        ChainScoring::Extent => {
            let lo = members.iter().map(|&m| anchors[m].start_ref).min().unwrap_or(0);
            let hi = members.iter().map(|&m| anchors[m].ref_end()).max().unwrap_or(0);
            hi - lo
        }
    }
}

fn emit_links(anchors: &[Anchor], cells: &[ChainCell], members: &[usize]) -> Vec<ChainLink> {
    let mut links = Vec::with_capacity(members.len());
    let mut prev: Option<&Anchor> = None;

    for &m in members {
        let a = &anchors[m];
        let link = match prev {
            None => ChainLink {
                ref_pos: a.start_ref,
                query_pos: a.start_query,
                length: a.length,
                adjustment: None,
                ref_gap: None,
                query_gap: None,
            },
            Some(p) => {
                let adj = cells[m].adjustment;
                ChainLink {
                    ref_pos: a.start_ref + adj,
                    query_pos: a.start_query + adj,
                    length: a.length - adj,
                    adjustment: (adj != 0).then_some(adj),
                    ref_gap: Some(a.start_ref + adj - p.ref_end()),
                    query_gap: Some(a.start_query + adj - p.query_end()),
                }
            }
        };
        links.push(link);
        prev = Some(a);
    }

    links
}
