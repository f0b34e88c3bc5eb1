//! Text renderings of a snapshot: the completion banner and a Graphviz DOT
//! drawing with visited nodes and traversed edges highlighted.

use std::collections::BTreeSet;
use std::io::{self, Write};

use bfstep_kernel::store::GraphStore;
use bfstep_search::snapshot::Snapshot;

const VISIT_ORDER_SEPARATOR: &str = " → ";

const VISITED_FILL: &str = "red";
const UNVISITED_FILL: &str = "lightgray";
const DISCOVERED_EDGE: &str = "blue";
const PLAIN_EDGE: &str = "gray";

/// Visit order joined with arrows, e.g. `A → B → C`.
#[must_use]
pub fn visit_order_line(snapshot: &Snapshot) -> String {
    snapshot.visited.join(VISIT_ORDER_SEPARATOR)
}

/// The message shown once a traversal is complete; `None` while it is
/// still running.
#[must_use]
pub fn completion_banner(snapshot: &Snapshot) -> Option<String> {
    snapshot
        .is_complete
        .then(|| format!("BFS complete. Visit order: {}", visit_order_line(snapshot)))
}

/// Write `graph` as an undirected DOT graph, styled by `snapshot`.
///
/// Node and edge statements follow the store's declaration order, so the
/// output is byte-stable for a given snapshot.
///
/// # Errors
///
/// Returns any error from `writer`.
pub fn write_dot<W: Write>(
    writer: &mut W,
    graph: &GraphStore,
    snapshot: &Snapshot,
) -> io::Result<()> {
    let discovered: BTreeSet<(&str, &str)> = snapshot
        .discovered_edges
        .iter()
        .flat_map(|e| [(e.from.as_str(), e.to.as_str()), (e.to.as_str(), e.from.as_str())])
        .collect();

    writeln!(writer, "graph bfs {{")?;
    for label in graph.labels() {
        let fill = if snapshot.is_visited(label) {
            VISITED_FILL
        } else {
            UNVISITED_FILL
        };
        let current = if snapshot.current_node.as_deref() == Some(label.as_str()) {
            ", penwidth=3"
        } else {
            ""
        };
        writeln!(
            writer,
            "  {} [style=filled, fillcolor={fill}{current}];",
            quote(label)
        )?;
    }
    for (a, b) in graph.edges() {
        if discovered.contains(&(a, b)) {
            writeln!(
                writer,
                "  {} -- {} [color={DISCOVERED_EDGE}, penwidth=2];",
                quote(a),
                quote(b)
            )?;
        } else {
            writeln!(writer, "  {} -- {} [color={PLAIN_EDGE}];", quote(a), quote(b))?;
        }
    }
    writeln!(writer, "}}")
}

fn quote(label: &str) -> String {
    format!("\"{}\"", label.replace('\\', "\\\\").replace('"', "\\\""))
}
