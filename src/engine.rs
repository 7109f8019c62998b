/// Query driver: filter, cluster and chain the anchors of each query in turn
use anyhow::Result;
use log::{debug, info};
use std::io::Write;

use crate::anchor::QueryBatch;
use crate::anchor_filter::filter_anchors;
use crate::chain::{select_chains, Chain};
use crate::cluster::build_clusters;
use crate::config::ChainConfig;
use crate::format_io::write_report;

/// Everything emitted for one query, plus counts for logging
#[derive(Debug, Clone, PartialEq)]
pub struct QueryReport {
    pub label: String,
    pub chains: Vec<Chain>, // cluster order, then extraction order
    pub input_anchors: usize,
    pub filtered_anchors: usize,
    pub clusters: usize,
}

/// Totals over a whole anchor stream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub queries: usize,
    pub empty_queries: usize, // queries that produced only their label
    pub input_anchors: usize,
    pub filtered_anchors: usize,
    pub clusters: usize,
    pub chains: usize,
}

impl RunStats {
    fn record(&mut self, report: &QueryReport) {
        self.queries += 1;
        if report.chains.is_empty() {
            self.empty_queries += 1;
        }
        self.input_anchors += report.input_anchors;
        self.filtered_anchors += report.filtered_anchors;
        self.clusters += report.clusters;
        self.chains += report.chains.len();
    }
}

pub struct AnchorChainer {
    config: ChainConfig,
}

impl AnchorChainer {
    pub fn new(config: ChainConfig) -> Self {
        AnchorChainer { config }
    }

    /// Run filter → cluster → chain on one query's anchors
    pub fn process_query(&self, batch: QueryBatch) -> QueryReport {
        let QueryBatch { label, anchors } = batch;
        let input_anchors = anchors.len();

        let filtered = filter_anchors(anchors);
        let filtered_anchors = filtered.len();

        let clusters = build_clusters(filtered, &self.config);
        let chains: Vec<Chain> = clusters
            .iter()
            .flat_map(|cluster| select_chains(&cluster.anchors, &self.config))
            .collect();

        debug!(
            "{label}: {input_anchors} anchors, {filtered_anchors} after filter, {} clusters, {} chains",
            clusters.len(),
            chains.len()
        );

        QueryReport {
            label,
            chains,
            input_anchors,
            filtered_anchors,
            clusters: clusters.len(),
        }
    }

    /// Process a stream of query batches, writing each report as soon as it is complete.
    /// Stops at the first input error.
    pub fn run<I, W>(&self, batches: I, out: &mut W) -> Result<RunStats>
    where
        I: IntoIterator<Item = Result<QueryBatch>>,
        W: Write,
    {
        let mut stats = RunStats::default();

        for batch in batches {
            let report = self.process_query(batch?);
            write_report(out, &report)?;
            stats.record(&report);
        }
        out.flush()?;

        info!(
            "Processed {} queries: {} anchors ({} after filtering) in {} clusters, {} chains emitted, {} queries without chains",
            stats.queries,
            stats.input_anchors,
            stats.filtered_anchors,
            stats.clusters,
            stats.chains,
            stats.empty_queries
        );

        Ok(stats)
    }
}
