//! CLI command implementations

use anyhow::{Context, bail};
use rosette_core::NodeId;
use rosette_layout::{LayoutConfig, RootAnchor, TreeMutator};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// One music track — the opaque payload, from the layout engine's point of
/// view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub artist: String,
}

/// One entry of a mutation script.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptOp {
    /// Add a track under `parent`; the first add with no parent creates the
    /// root.
    Add {
        track: Track,
        #[serde(default)]
        parent: Option<u64>,
        tag: String,
    },
    /// Remove a node and its whole subtree.
    Remove { id: u64 },
    /// Discard the tree and restart around a new root track.
    Recenter { track: Track },
    /// Drop every node.
    Clear,
}

/// The script file format: a root anchor plus the ops to replay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub anchor: RootAnchor,
    pub ops: Vec<ScriptOp>,
}

pub fn run(script_path: PathBuf, config_path: Option<PathBuf>, pretty: bool) -> anyhow::Result<()> {
    let raw = fs::read_to_string(&script_path)
        .with_context(|| format!("reading script {}", script_path.display()))?;
    let script: Script = serde_json::from_str(&raw)
        .with_context(|| format!("parsing script {}", script_path.display()))?;

    let config = match config_path {
        Some(path) => {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("reading config {}", path.display()))?;
            toml::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))?
        }
        None => LayoutConfig::default(),
    };

    let mut mutator = TreeMutator::new(config, script.anchor);
    for (index, op) in script.ops.into_iter().enumerate() {
        apply(&mut mutator, op).with_context(|| format!("script op #{index}"))?;
    }

    let snapshot = mutator.snapshot();
    tracing::info!(
        nodes = snapshot.positions.len(),
        connections = snapshot.connections.len(),
        "script replayed"
    );

    let json = if pretty {
        serde_json::to_string_pretty(&snapshot)?
    } else {
        serde_json::to_string(&snapshot)?
    };
    println!("{json}");
    Ok(())
}

fn apply(mutator: &mut TreeMutator<Track>, op: ScriptOp) -> anyhow::Result<()> {
    match op {
        ScriptOp::Add { track, parent, tag } => {
            let added = mutator.add_node(track, parent.map(NodeId), tag)?;
            tracing::debug!(id = %added.id, "added");
        }
        ScriptOp::Remove { id } => {
            if mutator.remove_node(NodeId(id)).is_none() {
                bail!("cannot remove node {id}: unknown id, or root with children");
            }
        }
        ScriptOp::Recenter { track } => {
            mutator.recenter(track)?;
        }
        ScriptOp::Clear => {
            mutator.clear();
        }
    }
    Ok(())
}
