//! Workflow layer between the command line and the release components

pub mod orchestration;

pub use orchestration::{
    run_bump_workflow, run_docs_workflow, run_readme_workflow, BumpOutcome, BumpWorkflowArgs,
    ReadmeOutcome, SectionOutcome,
};
