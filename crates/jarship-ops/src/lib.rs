//! Operations behind the `jarship` commands.
//!
//! [`context::ProjectContext`] gathers everything an invocation needs once;
//! [`pipeline::Pipeline`] runs the task graph against it.

pub mod context;
pub mod ops_assemble;
pub mod ops_clean;
pub mod ops_init;
pub mod ops_properties;
pub mod ops_publish;
pub mod ops_tasks;
pub mod pipeline;
pub mod report;
