use anyhow::Result;
use clap::Parser;
use log::info;

use anchorchain::config::{
    parse_metric_number, ChainConfig, ChainScoring, DEFAULT_FIXED_SEPARATION,
    DEFAULT_SEPARATION_FACTOR,
};
use anchorchain::engine::AnchorChainer;
use anchorchain::format_io::{open_anchor_input, open_output, QueryReader};

/// anchorchain - cluster exact-match anchors and chain them into gapped alignments
///
/// Reads a match listing (a `>` header per query followed by `ref_start query_start length`
/// lines), groups anchors by diagonal proximity, and reports the best chains of each group.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Input anchor listing, plain or gzipped ("-" for stdin)
    #[clap(short = 'i', long = "input", default_value = "-")]
    input: String,

    /// Output file ("-" for stdout)
    #[clap(short = 'o', long = "output", default_value = "-")]
    output: String,

    /// Check that every second header is a reverse-strand header
    #[clap(short = 'C', long = "check-labels")]
    check_labels: bool,

    /// Fixed diagonal difference to join matches
    #[clap(short = 'd', long = "diag-diff", default_value_t = DEFAULT_FIXED_SEPARATION)]
    fixed_separation: i64,

    /// Score a cluster by its reference extent instead of the sum of its anchor lengths
    #[clap(short = 'e', long = "extent")]
    use_extent: bool,

    /// Fraction of separation tolerated as diagonal difference
    #[clap(short = 'f', long = "diag-factor", default_value_t = DEFAULT_SEPARATION_FACTOR)]
    separation_factor: f64,

    /// Minimum score of a reported cluster
    #[clap(short = 'l', long = "min-score", default_value = "200", value_parser = parse_metric_number)]
    min_output_score: i64,

    /// Maximum separation between matches in a cluster
    #[clap(short = 's', long = "max-separation", default_value = "1000", value_parser = parse_metric_number)]
    max_separation: i64,

    /// Quiet mode (warnings and errors only)
    #[clap(long = "quiet")]
    quiet: bool,
}

impl Args {
    fn chain_config(&self) -> ChainConfig {
        ChainConfig {
            fixed_separation: self.fixed_separation,
            max_separation: self.max_separation,
            min_output_score: self.min_output_score,
            separation_factor: self.separation_factor,
            scoring: if self.use_extent {
                ChainScoring::Extent
            } else {
                ChainScoring::MatchedLength
            },
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    // No input file and nothing piped in: show usage instead of waiting on the terminal
    if args.input == "-" {
        use std::io::IsTerminal;
        if std::io::stdin().is_terminal() {
            use clap::CommandFactory;
            Args::command().print_help()?;
            std::process::exit(0);
        }
    }

    let config = args.chain_config();
    info!(
        "Clustering with diagonal difference {}, factor {}, max separation {}, min score {} ({:?})",
        config.fixed_separation,
        config.separation_factor,
        config.max_separation,
        config.min_output_score,
        config.scoring
    );

    let reader = QueryReader::new(open_anchor_input(&args.input)?).with_label_check(args.check_labels);
    let mut output = open_output(&args.output)?;

    AnchorChainer::new(config).run(reader, &mut output)?;

    Ok(())
}
