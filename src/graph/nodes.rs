//! Node-list derivation.
//!
//! Input layout (one item per line):
//!
//! ```text
//! <opaque header, e.g. the reference answer>
//! n m
//! u1 v1
//! ...
//! um vm
//! <anything else>
//! ```
//!
//! The output repeats the first two lines, inserts the list of distinct vertex ids referenced by
//! the edge block, and then copies everything from the edge block onwards untouched.

use std::{collections::BTreeSet, path::Path};

use super::{CaseError, Edge, Header, Vertex};

/// A test case with its derived node list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeListed<'a> {
    lines: Vec<&'a str>,
    pub header: Header,
    /// Distinct vertex ids of the edge block, ascending.
    pub nodes: BTreeSet<Vertex>,
}

impl<'a> NodeListed<'a> {
    pub fn parse(text: &'a str) -> Result<Self, CaseError> {
        let lines = text.split_inclusive('\n').collect::<Vec<_>>();
        if lines.len() < 2 {
            return Err(CaseError::MissingHeader {
                line: lines.len() + 1,
                expected: if lines.is_empty() {
                    "opaque"
                } else {
                    "<vertices> <edges>"
                },
            });
        }
        let header = Header::parse(lines[1], 2)?;
        let available = lines.len() - 2;
        if available < header.edges {
            return Err(CaseError::Truncated {
                declared: header.edges,
                found: available,
            });
        }
        let mut nodes = BTreeSet::new();
        for (i, line) in lines[2..2 + header.edges].iter().enumerate() {
            let (u, v) = Edge::parse(line, i + 3)?.endpoints();
            nodes.insert(u);
            nodes.insert(v);
        }
        Ok(Self {
            lines,
            header,
            nodes,
        })
    }

    /// The node-list line, e.g. `"1 2 3 \n"`.
    pub fn node_line(&self) -> String {
        let mut line = String::new();
        for node in &self.nodes {
            line += &format!("{} ", node);
        }
        line.push('\n');
        line
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        out += self.lines[0];
        out += self.lines[1];
        if !self.lines[1].ends_with('\n') {
            out.push('\n');
        }
        out += &self.node_line();
        for line in &self.lines[2..] {
            out += line;
        }
        out
    }
}

/// Read the test case at `input` and write it, with its node list inserted, to `output`.
/// `input` and `output` may be the same file.
pub fn transform_file(input: &Path, output: &Path) -> anyhow::Result<usize> {
    let text = std::fs::read_to_string(input)?;
    let case = NodeListed::parse(&text)?;
    std::fs::write(output, case.render())?;
    Ok(case.nodes.len())
}
