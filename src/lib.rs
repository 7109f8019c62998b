// Library exports for anchorchain
pub mod anchor;
pub mod anchor_filter;
pub mod chain;
pub mod cluster;
pub mod config;
pub mod engine;
pub mod format_io;
pub mod union_find;

pub use anchor::{Anchor, QueryBatch};
pub use chain::{Chain, ChainLink};
pub use config::{ChainConfig, ChainScoring};
pub use engine::{AnchorChainer, QueryReport, RunStats};
