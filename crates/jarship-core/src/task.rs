//! The task graph: which build steps exist and what each one depends on.
//!
//! Every command runs a *target* task. Its execution plan is the target plus
//! everything it transitively depends on, in dependency order.

use std::collections::{HashMap, HashSet};
use std::fmt;

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;

use jarship_util::errors::JarshipError;

/// A build step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaskId {
    CompileJava,
    ProcessResources,
    Classes,
    Jar,
    SourcesJar,
    Javadoc,
    JavadocJar,
    DocumentJar,
    Assemble,
    GeneratePom,
    SignPublication,
    PublishToMavenLocal,
    PublishToSonatype,
    CloseAndReleaseStagingRepository,
}

impl TaskId {
    pub const ALL: [TaskId; 14] = [
        TaskId::CompileJava,
        TaskId::ProcessResources,
        TaskId::Classes,
        TaskId::Jar,
        TaskId::SourcesJar,
        TaskId::Javadoc,
        TaskId::JavadocJar,
        TaskId::DocumentJar,
        TaskId::Assemble,
        TaskId::GeneratePom,
        TaskId::SignPublication,
        TaskId::PublishToMavenLocal,
        TaskId::PublishToSonatype,
        TaskId::CloseAndReleaseStagingRepository,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::CompileJava => "compileJava",
            Self::ProcessResources => "processResources",
            Self::Classes => "classes",
            Self::Jar => "jar",
            Self::SourcesJar => "sourcesJar",
            Self::Javadoc => "javadoc",
            Self::JavadocJar => "javadocJar",
            Self::DocumentJar => "documentJar",
            Self::Assemble => "assemble",
            Self::GeneratePom => "generatePomFileForMavenJavaPublication",
            Self::SignPublication => "signMavenJavaPublication",
            Self::PublishToMavenLocal => "publishMavenJavaPublicationToMavenLocal",
            Self::PublishToSonatype => "publishMavenJavaPublicationToSonatypeRepository",
            Self::CloseAndReleaseStagingRepository => "closeAndReleaseSonatypeStagingRepository",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::CompileJava => "Compiles main Java source",
            Self::ProcessResources => "Copies main resources into the build directory",
            Self::Classes => "Assembles main classes",
            Self::Jar => "Assembles the primary jar",
            Self::SourcesJar => "Assembles the sources jar",
            Self::Javadoc => "Generates Javadoc API documentation",
            Self::JavadocJar => "Assembles the javadoc jar",
            Self::DocumentJar => "Assembles the documentation (doc) jar",
            Self::Assemble => "Assembles all archives",
            Self::GeneratePom => "Generates the POM of the mavenJava publication",
            Self::SignPublication => "Signs all artifacts of the mavenJava publication",
            Self::PublishToMavenLocal => "Installs the publication into the local Maven repository",
            Self::PublishToSonatype => "Uploads the publication to the Sonatype repository",
            Self::CloseAndReleaseStagingRepository => {
                "Closes and releases the Sonatype staging repository"
            }
        }
    }

    /// Tasks listed by `jarship tasks` without `--all`.
    pub fn is_lifecycle(self) -> bool {
        matches!(
            self,
            Self::Assemble
                | Self::PublishToMavenLocal
                | Self::PublishToSonatype
                | Self::CloseAndReleaseStagingRepository
        )
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Directed graph of tasks; an edge `a -> b` means `a` depends on `b`.
pub struct TaskGraph {
    graph: DiGraph<TaskId, ()>,
    index: HashMap<TaskId, NodeIndex>,
}

impl TaskGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            index: HashMap::new(),
        }
    }

    /// The standard Java library publishing pipeline.
    pub fn standard() -> Self {
        use TaskId::*;
        let mut g = Self::new();
        for task in TaskId::ALL {
            g.add_task(task);
        }
        g.depends_on(Classes, CompileJava);
        g.depends_on(Classes, ProcessResources);
        g.depends_on(Jar, Classes);
        g.depends_on(Javadoc, Classes);
        g.depends_on(JavadocJar, Javadoc);
        g.depends_on(Assemble, Jar);
        g.depends_on(Assemble, SourcesJar);
        g.depends_on(Assemble, JavadocJar);
        g.depends_on(Assemble, DocumentJar);
        g.depends_on(GeneratePom, Assemble);
        g.depends_on(SignPublication, GeneratePom);
        g.depends_on(PublishToMavenLocal, SignPublication);
        g.depends_on(PublishToSonatype, SignPublication);
        g.depends_on(CloseAndReleaseStagingRepository, PublishToSonatype);
        g
    }

    pub fn add_task(&mut self, task: TaskId) -> NodeIndex {
        if let Some(&idx) = self.index.get(&task) {
            return idx;
        }
        let idx = self.graph.add_node(task);
        self.index.insert(task, idx);
        idx
    }

    /// Record that `task` must run after `dependency`.
    pub fn depends_on(&mut self, task: TaskId, dependency: TaskId) {
        let from = self.add_task(task);
        let to = self.add_task(dependency);
        if !self.graph.contains_edge(from, to) {
            self.graph.add_edge(from, to, ());
        }
    }

    /// Direct dependencies of `task`, sorted.
    pub fn dependencies_of(&self, task: TaskId) -> Vec<TaskId> {
        let Some(&idx) = self.index.get(&task) else {
            return Vec::new();
        };
        let mut deps: Vec<TaskId> = self.graph.neighbors(idx).map(|n| self.graph[n]).collect();
        deps.sort();
        deps
    }

    /// Whether `task` (transitively) depends on `dependency`.
    pub fn requires(&self, task: TaskId, dependency: TaskId) -> bool {
        self.reachable(task).contains(&dependency) && task != dependency
    }

    fn reachable(&self, task: TaskId) -> HashSet<TaskId> {
        let mut seen = HashSet::new();
        let Some(&start) = self.index.get(&task) else {
            return seen;
        };
        let mut dfs = Dfs::new(&self.graph, start);
        while let Some(n) = dfs.next(&self.graph) {
            seen.insert(self.graph[n]);
        }
        seen
    }

    /// Tasks to run for `target`, dependencies first, `target` last.
    pub fn execution_plan(&self, target: TaskId) -> Result<Vec<TaskId>, JarshipError> {
        let needed = self.reachable(target);
        let order = toposort(&self.graph, None).map_err(|cycle| JarshipError::Generic {
            message: format!("task graph has a cycle at {}", self.graph[cycle.node_id()]),
        })?;
        // toposort puts dependents before their dependencies.
        Ok(order
            .into_iter()
            .rev()
            .map(|n| self.graph[n])
            .filter(|t| needed.contains(t))
            .collect())
    }
}

impl Default for TaskGraph {
    fn default() -> Self {
        Self::standard()
    }
}
