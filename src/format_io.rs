/// Anchor stream input and cluster report output
///
/// Input is the match listing produced by the anchor finder: a `>` header line per query,
/// followed by one `start_ref start_query length` line per anchor. Output is one block per
/// query in the same fixed-width layout downstream tools already parse.
use anyhow::{anyhow, bail, Context, Result};
use flate2::read::MultiGzDecoder;
use log::trace;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::anchor::{Anchor, QueryBatch};
use crate::chain::ChainLink;
use crate::engine::QueryReport;

/// Open an anchor listing; `-` reads stdin, `.gz`/`.bgz` files are decompressed
pub fn open_anchor_input(path: &str) -> Result<Box<dyn BufRead>> {
    if path == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }

    let file =
        File::open(path).with_context(|| format!("Failed to open anchor file {path}"))?;

    // Check by file extension (faster than reading magic bytes)
    let is_compressed = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz" || ext == "bgz")
        .unwrap_or(false);

    if is_compressed {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Open the report destination; `-` writes stdout
pub fn open_output(path: &str) -> Result<Box<dyn Write>> {
    if path == "-" {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    let file = File::create(path).with_context(|| format!("Failed to create output file {path}"))?;
    Ok(Box::new(BufWriter::new(file)))
}

/// Streams one `QueryBatch` per header line.
///
/// Lines before the first header are ignored, as are lines that do not start with three
/// integers. Negative coordinates, non-positive lengths and ends past `i64::MAX` are input errors.
pub struct QueryReader<R: BufRead> {
    reader: R,
    buf: String,
    line_no: usize,
    headers_seen: usize,
    check_labels: bool,
    current: Option<QueryBatch>,
}

impl<R: BufRead> QueryReader<R> {
    pub fn new(reader: R) -> Self {
        QueryReader {
            reader,
            buf: String::new(),
            line_no: 0,
            headers_seen: 0,
            check_labels: false,
            current: None,
        }
    }

    /// Require every second header to name the reverse strand, as in a forward/reverse
    /// match listing
    pub fn with_label_check(mut self, check: bool) -> Self {
        self.check_labels = check;
        self
    }

    fn check_label(&mut self, label: &str) -> Result<()> {
        self.headers_seen += 1;
        if self.check_labels && self.headers_seen % 2 == 0 && !label.contains("Reverse") {
            bail!(
                "line {}: header {} should be a reverse-strand header but is {label:?}",
                self.line_no,
                self.headers_seen
            );
        }
        Ok(())
    }

    fn anchor_from_line(&self, line: &str) -> Option<Result<Anchor>> {
        let (start_ref, start_query, length) = parse_anchor_fields(line)?;
        if start_ref < 0 || start_query < 0 {
            return Some(Err(anyhow!(
                "line {}: negative anchor coordinate in {line:?}",
                self.line_no
            )));
        }
        if length <= 0 {
            return Some(Err(anyhow!(
                "line {}: anchor length must be positive in {line:?}",
                self.line_no
            )));
        }
        if start_ref.checked_add(length).is_none() || start_query.checked_add(length).is_none() {
            return Some(Err(anyhow!(
                "line {}: anchor end exceeds the coordinate range in {line:?}",
                self.line_no
            )));
        }
        Some(Ok(Anchor::new(start_ref, start_query, length)))
    }
}

impl<R: BufRead> Iterator for QueryReader<R> {
    type Item = Result<QueryBatch>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => return self.current.take().map(Ok),
                Ok(_) => self.line_no += 1,
                Err(e) => return Some(Err(e).context("Failed to read anchor input")),
            }

            let line = self.buf.trim_end_matches(&['\n', '\r'][..]).to_string();

            if line.starts_with('>') {
                if let Err(e) = self.check_label(&line) {
                    return Some(Err(e));
                }
                if let Some(done) = self.current.replace(QueryBatch::new(line)) {
                    return Some(Ok(done));
                }
                continue;
            }

            if self.current.is_none() {
                continue;
            }

            match self.anchor_from_line(&line) {
                Some(Ok(anchor)) => {
                    if let Some(batch) = self.current.as_mut() {
                        batch.push(anchor);
                    }
                }
                Some(Err(e)) => return Some(Err(e)),
                None => trace!("line {}: not an anchor, skipped", self.line_no),
            }
        }
    }
}

/// First three whitespace-separated integers of a line, if it has them
pub fn parse_anchor_fields(line: &str) -> Option<(i64, i64, i64)> {
    let mut fields = line.split_whitespace();
    let start_ref = fields.next()?.parse().ok()?;
    let start_query = fields.next()?.parse().ok()?;
    let length = fields.next()?.parse().ok()?;
    Some((start_ref, start_query, length))
}

/// Render one chain link; the first link of a chain has no gaps and prints placeholders
pub fn format_link(link: &ChainLink) -> String {
    match (link.ref_gap, link.query_gap) {
        (Some(ref_gap), Some(query_gap)) => {
            let adjustment = match link.adjustment {
                Some(adj) => (-adj).to_string(),
                None => "none".to_string(),
            };
            format!(
                "{:>8} {:>8} {:>6} {:>7} {:>6} {:>6}",
                link.ref_pos, link.query_pos, link.length, adjustment, ref_gap, query_gap
            )
        }
        _ => format!(
            "{:>8} {:>8} {:>6}    none      -      -",
            link.ref_pos, link.query_pos, link.length
        ),
    }
}

/// Write one query's block: the label before its first chain, `#` before each later chain,
/// or the label alone when nothing met the threshold
pub fn write_report<W: Write>(out: &mut W, report: &QueryReport) -> io::Result<()> {
    if report.chains.is_empty() {
        return writeln!(out, "{}", report.label);
    }

    for (i, chain) in report.chains.iter().enumerate() {
        let separator = if i == 0 { report.label.as_str() } else { "#" };
        writeln!(out, "{separator}")?;
        for link in &chain.links {
            writeln!(out, "{}", format_link(link))?;
        }
    }
    Ok(())
}
