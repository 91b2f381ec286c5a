//! Operation: describe the available tasks.

use jarship_core::task::{TaskGraph, TaskId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub depends_on: Vec<&'static str>,
}

/// Lifecycle tasks, or every task when `all` is set, in execution order.
pub fn list_tasks(all: bool) -> Vec<TaskInfo> {
    let graph = TaskGraph::standard();
    TaskId::ALL
        .into_iter()
        .filter(|t| all || t.is_lifecycle())
        .map(|task| TaskInfo {
            name: task.name(),
            description: task.description(),
            depends_on: graph
                .dependencies_of(task)
                .into_iter()
                .map(TaskId::name)
                .collect(),
        })
        .collect()
}
