//! README section merging across package READMEs

pub mod merger;
pub mod section;

pub use merger::{merge_sections, MergedSection, SectionMerger, SourceDocument};
pub use section::{extract_items, splice_region, MarkedRegion, MarkedSection};
