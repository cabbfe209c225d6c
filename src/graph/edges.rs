//! Undirected edge deduplication.

use std::{collections::BTreeSet, path::Path};

use super::{CaseError, Edge, Header};

/// A set of undirected edges. Iteration is in ascending canonical order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EdgeSet {
    edges: BTreeSet<Edge>,
}

impl EdgeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an edge. Returns `false` if the edge, in either orientation, was already present.
    pub fn insert(&mut self, edge: Edge) -> bool {
        self.edges.insert(edge)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter()
    }
}

impl FromIterator<Edge> for EdgeSet {
    fn from_iter<I: IntoIterator<Item = Edge>>(iter: I) -> Self {
        Self {
            edges: iter.into_iter().collect(),
        }
    }
}

/// A test case reduced to its header and its distinct undirected edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedCase {
    /// Header as read from the input, with the declared edge count
    pub declared: Header,
    pub edges: EdgeSet,
}

impl NormalizedCase {
    /// Read a header followed by exactly `m` edge lines.
    /// Anything after the edge block is ignored.
    pub fn parse(text: &str) -> Result<Self, CaseError> {
        let mut lines = text.lines();
        let Some(first) = lines.next() else {
            return Err(CaseError::MissingHeader {
                line: 1,
                expected: "<vertices> <edges>",
            });
        };
        let declared = Header::parse(first, 1)?;
        let edges = (0..declared.edges)
            .map(|i| match lines.next() {
                Some(line) => Edge::parse(line, i + 2),
                None => Err(CaseError::Truncated {
                    declared: declared.edges,
                    found: i,
                }),
            })
            .collect::<Result<EdgeSet, _>>()?;
        Ok(Self { declared, edges })
    }

    /// The header with the edge count corrected to the number of distinct edges.
    pub fn header(&self) -> Header {
        Header {
            vertices: self.declared.vertices,
            edges: self.edges.len(),
        }
    }

    /// Render the case back into the test case format.
    pub fn render(&self) -> String {
        let mut out = format!("{}\n", self.header());
        for edge in self.edges.iter() {
            out += &format!("{}\n", edge);
        }
        out
    }
}

/// Deduplicate the edges of the test case at `path`, overwriting it in place.
///
/// The file is only rewritten if it parsed completely. No backup is kept.
/// Returns the normalized case so callers can report declared vs. distinct edge counts.
pub fn normalize_file(path: &Path, dry_run: bool) -> anyhow::Result<NormalizedCase> {
    let text = std::fs::read_to_string(path)?;
    let case = NormalizedCase::parse(&text)?;
    if !dry_run {
        std::fs::write(path, case.render())?;
    }
    Ok(case)
}
