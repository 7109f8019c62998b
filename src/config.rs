//! Engine configuration, passed explicitly into every stage

pub const DEFAULT_FIXED_SEPARATION: i64 = 5;
pub const DEFAULT_MAX_SEPARATION: i64 = 1000;
pub const DEFAULT_MIN_OUTPUT_SCORE: i64 = 200;
pub const DEFAULT_SEPARATION_FACTOR: f64 = 0.05;

/// How a finished chain is scored against the output threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChainScoring {
    #[default]
    MatchedLength, // sum of anchor lengths
    Extent,        // reference end minus reference start of the chain
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChainConfig {
    pub fixed_separation: i64,  // -d: diagonal drift always tolerated
    pub max_separation: i64,    // -s: largest query gap between clustered anchors
    pub min_output_score: i64,  // -l: chains scoring below this are not emitted
    pub separation_factor: f64, // -f: extra drift tolerated per unit of gap
    pub scoring: ChainScoring,  // -e switches to Extent
}

impl Default for ChainConfig {
    fn default() -> Self {
        ChainConfig {
            fixed_separation: DEFAULT_FIXED_SEPARATION,
            max_separation: DEFAULT_MAX_SEPARATION,
            min_output_score: DEFAULT_MIN_OUTPUT_SCORE,
            separation_factor: DEFAULT_SEPARATION_FACTOR,
            scoring: ChainScoring::MatchedLength,
        }
    }
}

impl ChainConfig {
    /// Largest diagonal difference allowed between two anchors `sep` apart on the query.
    /// The product is truncated toward zero before comparing with the fixed floor.
    pub fn diagonal_tolerance(&self, sep: i64) -> i64 {
        let scaled = (self.separation_factor * sep as f64) as i64;
        self.fixed_separation.max(scaled)
    }
}

/// Parse a number that may have metric suffix (k/K=1000, m/M=1e6, g/G=1e9)
pub fn parse_metric_number(s: &str) -> Result<i64, String> {
    if s.is_empty() {
        return Err("Empty string".to_string());
    }

    let (num_part, suffix) = match s.chars().last() {
        Some(c) if c.is_ascii_alphabetic() => (&s[..s.len() - c.len_utf8()], Some(c)),
        _ => (s, None),
    };

    let base: f64 = num_part
        .parse()
        .map_err(|e| format!("Invalid number: {e}"))?;

    let multiplier = match suffix {
        Some('k') | Some('K') => 1000.0,
        Some('m') | Some('M') => 1_000_000.0,
        Some('g') | Some('G') => 1_000_000_000.0,
        Some(c) => {
            return Err(format!(
                "Unknown suffix '{c}'. Use k/K (1000), m/M (1e6), or g/G (1e9)"
            ))
        }
        None => 1.0,
    };

    let result = base * multiplier;

    if result < 0.0 {
        return Err(format!("Value {result} must not be negative"));
    }
    if result > i64::MAX as f64 {
        return Err(format!("Value {result} too large"));
    }

    Ok(result as i64)
}
