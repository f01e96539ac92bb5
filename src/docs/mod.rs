//! Documentation aggregation into the unified SDK tree

pub mod rewrite;
pub mod tree;

pub use rewrite::{FuncExport, ImportRewriter};
pub use tree::{AggregationReport, DocTreeAggregator};
