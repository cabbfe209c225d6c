//! Graph test case files.
//!
//! A test case is a plain-text graph description:
//!
//! ```text
//! n m
//! u1 v1
//! ...
//! um vm
//! ```
//!
//! `n` is the vertex count and `m` the number of edge lines that follow. Edge pairs are treated
//! as undirected: `u v` and `v u` describe the same edge.
//!
//! [`edges`] rewrites a case so that every undirected edge is listed once, and [`nodes`] derives
//! the node-list line consumed by solvers that expect an explicit vertex set.

use std::fmt;

use thiserror::Error;

pub mod edges;
pub mod nodes;

/// Vertex identifier as written in a test case.
pub type Vertex = u32;

/// Errors raised while reading a graph test case.
#[derive(Debug, Error)]
pub enum CaseError {
    /// A header or edge line did not hold the expected integers.
    #[error("line {line}: expected `{expected}`, found `{found}`")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What the line should contain.
        expected: &'static str,
        /// The offending line, without its line terminator.
        found: String,
    },
    /// The file ended before the declared edge block did.
    #[error("header declares {declared} edges but only {found} edge lines follow")]
    Truncated { declared: usize, found: usize },
    /// A required header line is missing entirely.
    #[error("missing {expected} header on line {line}")]
    MissingHeader { line: usize, expected: &'static str },
}

/// The `n m` line of a test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Vertex count
    pub vertices: usize,
    /// Declared edge count
    pub edges: usize,
}

impl Header {
    /// Parse an `n m` line. `line` is the 1-based line number used in errors.
    pub fn parse(text: &str, line: usize) -> Result<Self, CaseError> {
        let (vertices, edges) = parse_two(text, line, "<vertices> <edges>")?;
        Ok(Self { vertices, edges })
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.vertices, self.edges)
    }
}

/// An undirected edge, stored as `(min, max)` so both orientations compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge(Vertex, Vertex);

impl Edge {
    pub fn new(u: Vertex, v: Vertex) -> Self {
        if u <= v {
            Self(u, v)
        } else {
            Self(v, u)
        }
    }

    /// Parse a `u v` line. `line` is the 1-based line number used in errors.
    pub fn parse(text: &str, line: usize) -> Result<Self, CaseError> {
        let (u, v) = parse_two(text, line, "<u> <v>")?;
        Ok(Self::new(u, v))
    }

    pub fn endpoints(&self) -> (Vertex, Vertex) {
        (self.0, self.1)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0, self.1)
    }
}

/// Parse a line holding exactly two whitespace-separated integers.
fn parse_two<T: std::str::FromStr>(
    text: &str,
    line: usize,
    expected: &'static str,
) -> Result<(T, T), CaseError> {
    let err = || CaseError::Parse {
        line,
        expected,
        found: text.trim_end_matches(['\r', '\n']).to_owned(),
    };
    let mut fields = text.split_whitespace();
    let (Some(a), Some(b), None) = (fields.next(), fields.next(), fields.next()) else {
        return Err(err());
    };
    match (a.parse(), b.parse()) {
        (Ok(a), Ok(b)) => Ok((a, b)),
        _ => Err(err()),
    }
}
