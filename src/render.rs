//! Mermaid flowchart rendering of a [`MindMap`].

use std::fmt::Write;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::hierarchy::{CategoryNode, FALLBACK_ROOT, MindMap};

/// Which part of the map to draw.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Part {
    /// Every category node.
    #[default]
    All,
    /// Only the first node with this name.
    Named(String),
}

impl FromStr for Part {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Part::from(s.to_string()))
    }
}

impl From<String> for Part {
    fn from(s: String) -> Self {
        if s.eq_ignore_ascii_case("all") {
            Part::All
        } else {
            Part::Named(s)
        }
    }
}

impl From<Part> for String {
    fn from(part: Part) -> Self {
        match part {
            Part::All => "all".to_string(),
            Part::Named(name) => name,
        }
    }
}

/// Render `map` as a `graph TD` flowchart. A map without nodes renders as the
/// empty string.
pub fn mermaid(map: &MindMap, part: &Part) -> String {
    if map.nodes.is_empty() {
        return String::new();
    }

    let root = if map.root.is_empty() {
        FALLBACK_ROOT
    } else {
        map.root.as_str()
    };

    let mut out = String::from("graph TD\n");
    let _ = write!(out, "R[\"{}\"]", label(root));

    match part {
        Part::All => {
            for (i, node) in map.nodes.iter().enumerate() {
                push_node(&mut out, i, node);
            }
        }
        Part::Named(name) => {
            if let Some(node) = map.nodes.iter().find(|n| &n.name == name) {
                push_node(&mut out, 0, node);
            }
        }
    }
    out
}

fn push_node(out: &mut String, i: usize, node: &CategoryNode) {
    let _ = write!(out, "\nR --> N{i}[\"{}\"]", label(&node.name));
    for (j, child) in node.children.iter().enumerate() {
        let child_id = node_id('C', &[i, j]);
        let _ = write!(out, "\nN{i} --> {child_id}[\"{}\"]", label(&child.name));
        for (k, sub) in child.children.iter().enumerate() {
            let sub_id = node_id('S', &[i, j, k]);
            let _ = write!(out, "\n{child_id} --> {sub_id}[\"{}\"]", label(sub));
        }
    }
}

/// `C01`, `S012` while every index is a single digit; `C0_11` otherwise.
fn node_id(prefix: char, indices: &[usize]) -> String {
    let sep = if indices.iter().all(|&n| n < 10) { "" } else { "_" };
    let parts: Vec<String> = indices.iter().map(usize::to_string).collect();
    format!("{prefix}{}", parts.join(sep))
}

fn label(text: &str) -> String {
    text.replace('"', "#quot;")
}
