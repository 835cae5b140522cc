//! Rosette Layout — radial positioning, overlap resolution, connection
//! geometry, and the tree mutation surface

pub mod config;
pub mod engine;
pub mod geometry;
pub mod mutator;
pub mod solver;


pub use config::{LayoutConfig, RootAnchor};
pub use engine::{LayoutEngine, LayoutStats};
pub use geometry::{CurveDescriptor, connection_curve};
pub use mutator::{LayoutSnapshot, NodeAdded, NodeRemoved, TreeMutator};
pub use solver::{Placement, PositionSolver};
