pub mod groups;

mod error;
mod partial_sum;
mod segment_tree;

pub use error::{Error, Result};
pub use partial_sum::PartialSumSeries;
pub use segment_tree::{
    LazySegmentTree, Node, Operation, OperationId, OperationRegistry, Tag, ROOT,
};
