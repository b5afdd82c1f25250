//! Dense 0/1 adjacency matrices and the readers that produce them.
//!
//! Two on-disk formats are understood:
//!
//! - **TSV edge lists** in the MatrixMarket/KONECT style. Line 1 is a banner
//!   and is skipped. Line 2 is a comment `% … <rows> <cols>`; the last two
//!   integers are the dimensions, so both `% R C` and `% E R C` work. Every
//!   further line that is neither blank nor a `%` comment holds a 1-indexed
//!   `<from> <to>` pair (extra columns such as weights are ignored).
//! - **graph6**, the undirected format of nauty, with or without the
//!   `>>graph6<<` header. The result is symmetric.
//!
//! Parsing is all-or-nothing: a malformed line aborts with
//! [`Error::Parse`] and no partial graph is returned.

use std::path::Path;

use crate::error::{Error, Result};

/// Row-major dense adjacency matrix with entries in `{0, 1}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Adjacency {
    nrows: usize,
    ncols: usize,
    data: Vec<u8>,
}

impl Adjacency {
    /// Validate and wrap a dense buffer of `nrows * ncols` entries.
    ///
    /// Dimensions whose product overflows `usize` are a
    /// [`Error::DimensionMismatch`] against `usize::MAX`.
    pub fn new(nrows: usize, ncols: usize, data: Vec<u8>) -> Result<Self> {
        let expected = nrows.checked_mul(ncols).ok_or(Error::DimensionMismatch {
            what: "adjacency dimensions",
            expected: usize::MAX,
            found: data.len(),
        })?;
        if data.len() != expected {
            return Err(Error::DimensionMismatch {
                what: "adjacency buffer",
                expected,
                found: data.len(),
            });
        }
        if let Some((index, &value)) = data.iter().enumerate().find(|&(_, &v)| v > 1) {
            return Err(Error::InvalidAdjacencyEntry { index, value });
        }
        Ok(Adjacency { nrows, ncols, data })
    }

    /// `n × n` matrix without edges.
    ///
    /// # Panics
    ///
    /// Panics if `n * n` overflows `usize`.
    pub fn empty(n: usize) -> Self {
        let len = match n.checked_mul(n) {
            Some(len) => len,
            None => panic!("adjacency of {} vertices does not fit in memory", n),
        };
        Adjacency {
            nrows: n,
            ncols: n,
            data: vec![0; len],
        }
    }

    /// Square matrix from directed `(from, to)` pairs, 0-indexed.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Result<Self> {
        let mut adj = Self::empty(n);
        for &(from, to) in edges {
            if from >= n || to >= n {
                return Err(Error::DimensionMismatch {
                    what: "edge endpoint",
                    expected: n,
                    found: from.max(to),
                });
            }
            adj.data[from * n + to] = 1;
        }
        Ok(adj)
    }

    /// Undirected path `0 - 1 - … - (n-1)`, stored symmetrically.
    ///
    /// Panics under the same condition as [`Adjacency::empty`].
    pub fn path(n: usize) -> Self {
        let mut adj = Self::empty(n);
        for i in 1..n {
            adj.data[(i - 1) * n + i] = 1;
            adj.data[i * n + i - 1] = 1;
        }
        adj
    }

    /// Number of rows (source vertices).
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns (target vertices).
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Number of vertices, i.e. the number of columns.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.ncols
    }

    /// Row-major entries.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Whether the directed edge `from → to` is present. Out-of-range
    /// endpoints have no edges.
    #[inline]
    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        from < self.nrows && to < self.ncols && self.data[from * self.ncols + to] != 0
    }

    /// Number of stored (directed) edges.
    pub fn num_edges(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }
}

// ══════════════════════════════════════════════
//  TSV edge lists
// ══════════════════════════════════════════════

/// Parse an edge list in the TSV format described in the module docs.
pub fn from_tsv_str(input: &str) -> Result<Adjacency> {
    let mut lines = input.lines().enumerate();

    if lines.next().is_none() {
        return Err(Error::parse(0, "empty input"));
    }
    let (header_no, (nrows, ncols)) = match lines.next() {
        Some((i, header)) => (i + 1, parse_tsv_header(i + 1, header)?),
        None => return Err(Error::parse(0, "missing dimension header on line 2")),
    };

    let len = nrows
        .checked_mul(ncols)
        .ok_or_else(|| Error::parse(header_no, "dimensions too large"))?;
    let mut data = vec![0u8; len];
    for (i, line) in lines {
        let line = line.trim();
        if line.is_empty() || line.starts_with('%') {
            continue;
        }
        let line_no = i + 1;
        let mut fields = line.split_whitespace();
        let from = parse_vertex(line_no, fields.next(), nrows, "source")?;
        let to = parse_vertex(line_no, fields.next(), ncols, "target")?;
        data[from * ncols + to] = 1;
    }

    Adjacency::new(nrows, ncols, data)
}

/// Read and parse a TSV edge list from disk.
pub fn read_tsv<P: AsRef<Path>>(path: P) -> Result<Adjacency> {
    let input = std::fs::read_to_string(path.as_ref())?;
    let adj = from_tsv_str(&input)?;
    tracing::debug!(
        path = %path.as_ref().display(),
        nrows = adj.nrows(),
        ncols = adj.ncols(),
        edges = adj.num_edges(),
        "loaded tsv graph"
    );
    Ok(adj)
}

fn parse_tsv_header(line_no: usize, header: &str) -> Result<(usize, usize)> {
    let rest = header
        .trim()
        .strip_prefix('%')
        .ok_or_else(|| Error::parse(line_no, "dimension header must start with '%'"))?;

    let numbers = rest
        .split_whitespace()
        .map(|tok| {
            tok.parse::<usize>()
                .map_err(|_| Error::parse(line_no, format!("invalid dimension '{}'", tok)))
        })
        .collect::<Result<Vec<_>>>()?;

    match numbers.as_slice() {
        [.., rows, cols] => Ok((*rows, *cols)),
        _ => Err(Error::parse(
            line_no,
            "dimension header needs at least two integers",
        )),
    }
}

fn parse_vertex(line_no: usize, field: Option<&str>, bound: usize, role: &str) -> Result<usize> {
    let tok = field.ok_or_else(|| Error::parse(line_no, format!("missing {} vertex", role)))?;
    let v = tok
        .parse::<usize>()
        .map_err(|_| Error::parse(line_no, format!("invalid {} vertex '{}'", role, tok)))?;
    if v == 0 || v > bound {
        return Err(Error::parse(
            line_no,
            format!("{} vertex {} outside 1..={}", role, v, bound),
        ));
    }
    Ok(v - 1)
}

// ══════════════════════════════════════════════
//  graph6
// ══════════════════════════════════════════════

const GRAPH6_HEADER: &str = ">>graph6<<";

/// Parse a single graph6-encoded graph.
pub fn from_graph6_str(input: &str) -> Result<Adjacency> {
    let body = input.trim();
    let body = body.strip_prefix(GRAPH6_HEADER).unwrap_or(body);
    let bytes = body.as_bytes();

    if let Some(&b) = bytes.iter().find(|&&b| !(63..=126).contains(&b)) {
        return Err(Error::parse(
            1,
            format!("byte {:#04x} is not valid graph6", b),
        ));
    }

    let (n, rest) = match bytes {
        [] => return Err(Error::parse(1, "missing vertex count")),
        [126, 126, ..] => return Err(Error::parse(1, "graphs above 258047 vertices are not supported")),
        [126, a, b, c, rest @ ..] => {
            let n = ((*a as usize - 63) << 12) | ((*b as usize - 63) << 6) | (*c as usize - 63);
            (n, rest)
        }
        [126, ..] => return Err(Error::parse(1, "truncated vertex count")),
        [a, rest @ ..] => (*a as usize - 63, rest),
    };

    let needed_bits = n * n.saturating_sub(1) / 2;
    if rest.len() * 6 < needed_bits {
        return Err(Error::parse(
            1,
            format!(
                "expected {} edge bytes for {} vertices, found {}",
                needed_bits.div_ceil(6),
                n,
                rest.len()
            ),
        ));
    }

    let mut bits = rest
        .iter()
        .flat_map(|&b| (0..6).rev().map(move |shift| ((b - 63) >> shift) & 1));

    // Upper triangle, column by column: x(0,1), x(0,2), x(1,2), x(0,3), ...
    let mut data = vec![0u8; n * n];
    for j in 1..n {
        for i in 0..j {
            if bits.next() == Some(1) {
                data[i * n + j] = 1;
                data[j * n + i] = 1;
            }
        }
    }

    Adjacency::new(n, n, data)
}

/// Read and parse a graph6 file from disk.
pub fn read_graph6<P: AsRef<Path>>(path: P) -> Result<Adjacency> {
    let input = std::fs::read_to_string(path.as_ref())?;
    let adj = from_graph6_str(&input)?;
    tracing::debug!(
        path = %path.as_ref().display(),
        vertices = adj.num_vertices(),
        edges = adj.num_edges(),
        "loaded graph6 graph"
    );
    Ok(adj)
}
