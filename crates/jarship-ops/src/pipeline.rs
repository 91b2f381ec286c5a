//! Task execution.
//!
//! The execution plan for a target comes from the task graph; tasks run one
//! at a time in that order and hand their outputs to later tasks through
//! the [`Pipeline`] state.

use std::fmt;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use jarship_compiler::jar::JarBuilder;
use jarship_compiler::javac::{CompilationUnit, DiagnosticSeverity, JavaCompiler};
use jarship_compiler::javadoc::{JavadocOptions, JavadocOutcome, JavadocTool};
use jarship_compiler::resources::copy_resources;
use jarship_compiler::collect_java_files;
use jarship_core::duplicates::DuplicatesStrategy;
use jarship_core::publication::{AssembledArchives, PublicationDescriptor, PublishedArtifact};
use jarship_core::signing::SigningDecision;
use jarship_core::task::{TaskGraph, TaskId};
use jarship_maven::download::{build_client, DependencyResolver};
use jarship_maven::local::LocalRepository;
use jarship_maven::metadata;
use jarship_maven::pom::write_pom;
use jarship_maven::publish::RemotePublisher;
use jarship_maven::repository::{MavenRepository, NexusTarget};
use jarship_maven::sign::GpgSigner;
use jarship_maven::staging::{PollSettings, StagingClient};
use jarship_toolchain::compat::Compatibility;
use jarship_toolchain::jdk::{discover_jdk, discover_jdk_for_target, JdkInfo};
use jarship_util::errors::JarshipError;
use jarship_util::progress::{status, status_info, status_warn};

use crate::context::ProjectContext;
use crate::report;

/// How a task ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Executed,
    /// Nothing to process (e.g. no Java sources).
    NoSource,
    Skipped { reason: String },
    /// Failed, but the failure does not stop the build.
    FailedIgnored { reason: String },
    Failed,
}

impl TaskOutcome {
    fn skipped(reason: impl Into<String>) -> Self {
        Self::Skipped {
            reason: reason.into(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Executed => "EXECUTED",
            Self::NoSource => "NO-SOURCE",
            Self::Skipped { .. } => "SKIPPED",
            Self::FailedIgnored { .. } => "FAILED-IGNORED",
            Self::Failed => "FAILED",
        }
    }
}

impl fmt::Display for TaskOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skipped { reason } | Self::FailedIgnored { reason } => {
                write!(f, "{} ({reason})", self.label())
            }
            _ => f.write_str(self.label()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TaskRecord {
    pub task: TaskId,
    pub outcome: TaskOutcome,
    pub duration: Duration,
}

/// What a finished (or failed) run did.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub target: TaskId,
    pub started_at: DateTime<Utc>,
    pub records: Vec<TaskRecord>,
    pub staged_repository: Option<String>,
    pub error: Option<String>,
}

impl RunSummary {
    pub fn success(&self) -> bool {
        self.error.is_none()
    }

    pub fn outcome_of(&self, task: TaskId) -> Option<&TaskOutcome> {
        self.records.iter().find(|r| r.task == task).map(|r| &r.outcome)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    /// Promote the staging repository after closing it.
    pub release: bool,
    pub poll: PollSettings,
    /// Overrides Maven Central for dependency downloads.
    pub dependency_repository: Option<MavenRepository>,
}

/// Run `target` and everything it depends on.
///
/// When the `envIsCi` property is true a run report is written to
/// `build/reports/run.json`, whether or not the run succeeded.
pub async fn execute(
    ctx: &ProjectContext,
    target: TaskId,
    options: PipelineOptions,
) -> miette::Result<RunSummary> {
    let started_at = Utc::now();
    let started = Instant::now();
    let mut pipeline = Pipeline::new(ctx, options);
    let result = pipeline.run(target).await;
    let summary = RunSummary {
        target,
        started_at,
        records: pipeline.records,
        staged_repository: pipeline.staged_repository,
        error: result.as_ref().err().map(|e| e.to_string()),
    };

    if ctx.properties.flag(report::CI_PROPERTY) {
        match report::write(ctx, &summary) {
            Ok(path) => tracing::debug!("run report written to {}", path.display()),
            Err(e) if result.is_err() => tracing::warn!("could not write run report: {e}"),
            Err(e) => return Err(e),
        }
    }

    result?;
    status(
        "Finished",
        &format!("{target} in {:.2}s", started.elapsed().as_secs_f64()),
    );
    Ok(summary)
}

/// The tasks `target` would run, with the reason each known-skipped task
/// will be skipped.
pub fn plan(
    ctx: &ProjectContext,
    target: TaskId,
) -> miette::Result<Vec<(TaskId, Option<String>)>> {
    let plan = TaskGraph::standard().execution_plan(target)?;
    Ok(plan
        .into_iter()
        .map(|task| {
            let reason = match task {
                TaskId::SignPublication => signing_skip_reason(&ctx.signing),
                TaskId::CloseAndReleaseStagingRepository if ctx.coordinates().is_snapshot() => {
                    Some(SNAPSHOT_NOT_STAGED.to_string())
                }
                _ => None,
            };
            (task, reason)
        })
        .collect())
}

const SNAPSHOT_NOT_STAGED: &str = "snapshot versions are not staged";

fn signing_skip_reason(decision: &SigningDecision) -> Option<String> {
    match decision {
        SigningDecision::Sign(_) => None,
        SigningDecision::SkipNoKey => Some("no signing key configured".to_string()),
        SigningDecision::SkipSnapshot => Some("snapshot versions are not signed".to_string()),
    }
}

#[derive(Debug, Default)]
struct Archives {
    jar: Option<PathBuf>,
    sources_jar: Option<PathBuf>,
    javadoc_jar: Option<PathBuf>,
    doc_jar: Option<PathBuf>,
}

pub struct Pipeline<'a> {
    ctx: &'a ProjectContext,
    options: PipelineOptions,
    client: Option<reqwest::Client>,
    jdk: Option<JdkInfo>,
    classpath: Vec<PathBuf>,
    archives: Archives,
    assembled: Option<AssembledArchives>,
    publication: Option<PublicationDescriptor>,
    signatures: Vec<PublishedArtifact>,
    staged_repository: Option<String>,
    records: Vec<TaskRecord>,
}

impl<'a> Pipeline<'a> {
    pub fn new(ctx: &'a ProjectContext, options: PipelineOptions) -> Self {
        Self {
            ctx,
            options,
            client: None,
            jdk: None,
            classpath: Vec::new(),
            archives: Archives::default(),
            assembled: None,
            publication: None,
            signatures: Vec::new(),
            staged_repository: None,
            records: Vec::new(),
        }
    }

    pub fn records(&self) -> &[TaskRecord] {
        &self.records
    }

    pub async fn run(&mut self, target: TaskId) -> miette::Result<()> {
        let plan = TaskGraph::standard().execution_plan(target)?;
        tracing::debug!(
            "execution plan: {}",
            plan.iter().map(|t| t.name()).collect::<Vec<_>>().join(", ")
        );
        for task in plan {
            let start = Instant::now();
            let result = self.execute_task(task).await;
            let outcome = match &result {
                Ok(outcome) => outcome.clone(),
                Err(_) => TaskOutcome::Failed,
            };
            match &outcome {
                TaskOutcome::Skipped { reason } => status_warn("Skipped", &format!("{task} ({reason})")),
                TaskOutcome::FailedIgnored { reason } => {
                    status_warn("Ignored", &format!("{task} failed: {reason}"))
                }
                _ => {}
            }
            tracing::debug!("{task}: {outcome}");
            self.records.push(TaskRecord {
                task,
                outcome,
                duration: start.elapsed(),
            });
            result?;
        }
        Ok(())
    }

    async fn execute_task(&mut self, task: TaskId) -> miette::Result<TaskOutcome> {
        match task {
            TaskId::CompileJava => self.compile_java().await,
            TaskId::ProcessResources => self.process_resources(),
            TaskId::Classes => Ok(TaskOutcome::Executed),
            TaskId::Jar => self.jar(),
            TaskId::SourcesJar => self.sources_jar(),
            TaskId::Javadoc => self.javadoc(),
            TaskId::JavadocJar => self.javadoc_jar(),
            TaskId::DocumentJar => self.document_jar(),
            TaskId::Assemble => self.assemble(),
            TaskId::GeneratePom => self.generate_pom(),
            TaskId::SignPublication => self.sign_publication(),
            TaskId::PublishToMavenLocal => self.publish_to_maven_local(),
            TaskId::PublishToSonatype => self.publish_to_sonatype().await,
            TaskId::CloseAndReleaseStagingRepository => self.close_and_release().await,
        }
    }

    fn client(&mut self) -> miette::Result<reqwest::Client> {
        if let Some(client) = &self.client {
            return Ok(client.clone());
        }
        let client = build_client()?;
        self.client = Some(client.clone());
        Ok(client)
    }

    fn compatibility(&self) -> miette::Result<Compatibility> {
        let java = &self.ctx.manifest.java;
        Ok(Compatibility::resolve(
            &java.source_compatibility,
            &java.target_compatibility,
            &java.encoding,
        )?)
    }

    /// Find a JDK able to produce the target bytecode level.
    fn jdk(&mut self) -> miette::Result<JdkInfo> {
        if let Some(jdk) = &self.jdk {
            return Ok(jdk.clone());
        }
        let compat = self.compatibility()?;
        let configured = self.ctx.config.toolchain.jdk.as_deref();
        let jdk = match discover_jdk_for_target(configured, compat.target.major()) {
            Some(jdk) => jdk,
            None => match discover_jdk(configured) {
                Some(old) => {
                    compat.check(&old)?;
                    old
                }
                None => {
                    return Err(JarshipError::Toolchain {
                        message: "No JDK found".to_string(),
                    }
                    .into())
                }
            },
        };
        tracing::debug!("using JDK {} at {}", jdk.version, jdk.home.display());
        self.jdk = Some(jdk.clone());
        Ok(jdk)
    }

    async fn resolve_classpath(&mut self) -> miette::Result<Vec<PathBuf>> {
        let deps = self.ctx.manifest.runtime_dependencies()?;
        if deps.is_empty() {
            return Ok(Vec::new());
        }
        let client = self.client()?;
        let remote = self
            .options
            .dependency_repository
            .clone()
            .unwrap_or_else(MavenRepository::maven_central);
        let local = LocalRepository::new(self.ctx.config.local_repository());
        let cache = LocalRepository::new(self.ctx.config.cache_dir());
        DependencyResolver {
            client: &client,
            remote: &remote,
            local: &local,
            cache: &cache,
        }
        .resolve(&deps)
        .await
    }

    async fn compile_java(&mut self) -> miette::Result<TaskOutcome> {
        let ctx = self.ctx;
        let layout = &ctx.layout;
        reset_dir(&layout.classes_dir)?;
        let sources = collect_java_files(&ctx.source_dirs()).map_err(JarshipError::Io)?;
        if sources.is_empty() {
            return Ok(TaskOutcome::NoSource);
        }

        self.classpath = self.resolve_classpath().await?;
        let jdk = self.jdk()?;
        let compat = self.compatibility()?;
        let coords = ctx.coordinates();
        status(
            "Compiling",
            &format!("{} v{} ({} files)", coords.artifact_id, coords.version, sources.len()),
        );

        let unit = CompilationUnit {
            sources,
            classpath: self.classpath.clone(),
            output_dir: layout.classes_dir.clone(),
            compiler_args: Vec::new(),
        };
        let work_dir = layout.tmp_dir.join("compileJava");
        let output = JavaCompiler::new(jdk, compat).compile(&unit, &work_dir)?;

        for diag in output
            .diagnostics
            .iter()
            .filter(|d| d.severity == DiagnosticSeverity::Warning)
        {
            tracing::warn!(
                "{}:{}: {}",
                diag.file.as_deref().unwrap_or("?"),
                diag.line.unwrap_or(0),
                diag.message
            );
        }
        if !output.success {
            let errors: Vec<String> = output
                .errors()
                .map(|d| match (&d.file, d.line) {
                    (Some(f), Some(l)) => format!("{f}:{l}: {}", d.message),
                    _ => d.message.clone(),
                })
                .collect();
            return Err(JarshipError::Compilation {
                message: format!("{} error(s)\n{}", errors.len(), errors.join("\n")),
            }
            .into());
        }
        Ok(TaskOutcome::Executed)
    }

    fn process_resources(&mut self) -> miette::Result<TaskOutcome> {
        let dest = &self.ctx.layout.resources_dir;
        reset_dir(dest)?;
        let report = copy_resources(
            &self.ctx.resource_dirs(),
            dest,
            self.ctx.manifest.resources.duplicates,
        )?;
        if report.copied == 0 {
            return Ok(TaskOutcome::NoSource);
        }
        Ok(TaskOutcome::Executed)
    }

    fn jar_builder(&self, name: &str) -> miette::Result<JarBuilder> {
        let archives = &self.ctx.manifest.archives;
        let coords = self.ctx.coordinates();
        Ok(JarBuilder::new(name, archives.duplicates, &archives.exclude)?
            .manifest_attribute("Implementation-Title", &coords.artifact_id)
            .manifest_attribute("Implementation-Version", &coords.version))
    }

    fn write_jar(&self, jar: JarBuilder, classifier: Option<&str>) -> miette::Result<PathBuf> {
        let dest = self.ctx.layout.jar_path(&self.ctx.coordinates(), classifier);
        let summary = jar.write(&dest)?;
        status(
            "Packaging",
            &format!(
                "{} ({} files)",
                dest.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default(),
                summary.files
            ),
        );
        Ok(summary.path)
    }

    fn jar(&mut self) -> miette::Result<TaskOutcome> {
        let mut jar = self.jar_builder("jar")?;
        jar.add_tree(&self.ctx.layout.classes_dir)?;
        jar.add_tree(&self.ctx.layout.resources_dir)?;
        self.archives.jar = Some(self.write_jar(jar, None)?);
        Ok(TaskOutcome::Executed)
    }

    fn sources_jar(&mut self) -> miette::Result<TaskOutcome> {
        let mut jar = self.jar_builder("sourcesJar")?;
        for dir in self.ctx.source_dirs().iter().chain(self.ctx.resource_dirs().iter()) {
            jar.add_tree(dir)?;
        }
        self.archives.sources_jar = Some(self.write_jar(jar, Some("sources"))?);
        Ok(TaskOutcome::Executed)
    }

    fn javadoc(&mut self) -> miette::Result<TaskOutcome> {
        let out_dir = self.ctx.layout.javadoc_dir.clone();
        reset_dir(&out_dir)?;
        let sources = collect_java_files(&self.ctx.source_dirs()).map_err(JarshipError::Io)?;
        if sources.is_empty() {
            return Ok(TaskOutcome::NoSource);
        }

        let java = &self.ctx.manifest.java;
        let options = JavadocOptions {
            encoding: java.encoding.clone(),
            jvm_flags: java.javadoc_flags.clone(),
            fail_on_error: java.javadoc_fail_on_error,
        };
        let jdk = match self.jdk() {
            Ok(jdk) => jdk,
            Err(e) if !options.fail_on_error => {
                return Ok(TaskOutcome::FailedIgnored {
                    reason: e.to_string(),
                })
            }
            Err(e) => return Err(e),
        };

        status("Documenting", &format!("{} files", sources.len()));
        let work_dir = self.ctx.layout.tmp_dir.join("javadoc");
        let outcome = JavadocTool::new(&jdk, options).generate(&sources, &self.classpath, &out_dir, &work_dir)?;
        Ok(match outcome {
            JavadocOutcome::Generated => TaskOutcome::Executed,
            JavadocOutcome::NoSources => TaskOutcome::NoSource,
            JavadocOutcome::Failed { reason } => TaskOutcome::FailedIgnored { reason },
        })
    }

    fn javadoc_jar(&mut self) -> miette::Result<TaskOutcome> {
        let mut jar = self.jar_builder("javadocJar")?;
        jar.add_tree(&self.ctx.layout.javadoc_dir)?;
        self.archives.javadoc_jar = Some(self.write_jar(jar, Some("javadoc"))?);
        Ok(TaskOutcome::Executed)
    }

    fn document_jar(&mut self) -> miette::Result<TaskOutcome> {
        let doc_dir = self.ctx.project_path(&self.ctx.manifest.archives.doc_dir);
        if !doc_dir.is_dir() {
            tracing::warn!("documentation directory {} does not exist", doc_dir.display());
        }
        let mut jar = self.jar_builder("documentJar")?;
        jar.add_tree(&doc_dir)?;
        self.archives.doc_jar = Some(self.write_jar(jar, Some("doc"))?);
        Ok(TaskOutcome::Executed)
    }

    fn assemble(&mut self) -> miette::Result<TaskOutcome> {
        let missing = |name: &str| JarshipError::Archive {
            message: format!("{name} was not built before assemble"),
        };
        let a = &self.archives;
        self.assembled = Some(AssembledArchives {
            jar: a.jar.clone().ok_or_else(|| missing("jar"))?,
            sources_jar: a.sources_jar.clone().ok_or_else(|| missing("sourcesJar"))?,
            javadoc_jar: a.javadoc_jar.clone().ok_or_else(|| missing("javadocJar"))?,
            doc_jar: a.doc_jar.clone().ok_or_else(|| missing("documentJar"))?,
        });
        Ok(TaskOutcome::Executed)
    }

    fn generate_pom(&mut self) -> miette::Result<TaskOutcome> {
        let archives = self.assembled.clone().ok_or_else(|| JarshipError::Archive {
            message: "the publication needs assembled archives".to_string(),
        })?;
        let publication = PublicationDescriptor::compose(&self.ctx.manifest, archives)?;
        let xml = write_pom(&publication)?;
        let path = self.ctx.layout.pom_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(JarshipError::Io)?;
        }
        std::fs::write(&path, xml).map_err(JarshipError::Io)?;
        self.publication = Some(publication);
        Ok(TaskOutcome::Executed)
    }

    fn publication(&self) -> miette::Result<&PublicationDescriptor> {
        self.publication.as_ref().ok_or_else(|| {
            JarshipError::Publish {
                message: "the publication has not been composed".to_string(),
            }
            .into()
        })
    }

    /// The primary artifacts and the POM, without signatures.
    fn signable_files(&self) -> miette::Result<Vec<PublishedArtifact>> {
        let publication = self.publication()?;
        let mut files = publication.artifacts().to_vec();
        files.push(publication.pom_artifact(&self.ctx.layout.pom_path()));
        Ok(files)
    }

    /// Everything that gets published: artifacts, POM and signatures.
    fn publish_files(&self) -> miette::Result<Vec<PublishedArtifact>> {
        let mut files = self.signable_files()?;
        files.extend(self.signatures.iter().cloned());
        Ok(files)
    }

    fn sign_publication(&mut self) -> miette::Result<TaskOutcome> {
        let SigningDecision::Sign(source) = &self.ctx.signing else {
            let reason = signing_skip_reason(&self.ctx.signing).unwrap_or_default();
            return Ok(TaskOutcome::skipped(reason));
        };
        let signer = GpgSigner::prepare(source)?;
        status("Signing", &format!("{} with {}", self.ctx.coordinates(), source.describe()));
        let mut signatures = Vec::new();
        for file in self.signable_files()? {
            let asc = signer.sign(&file.path)?;
            signatures.push(PublishedArtifact {
                path: asc,
                classifier: file.classifier.clone(),
                extension: format!("{}.asc", file.extension),
            });
        }
        self.signatures = signatures;
        Ok(TaskOutcome::Executed)
    }

    fn publish_to_maven_local(&mut self) -> miette::Result<TaskOutcome> {
        let coords = self.ctx.coordinates();
        let repo = LocalRepository::new(self.ctx.config.local_repository());
        for file in self.publish_files()? {
            let name = coords.file_name(file.classifier.as_deref(), &file.extension);
            repo.install_file(&coords, &file.path, &name, DuplicatesStrategy::copy_default())?;
        }
        repo.record_version(&coords, &metadata::last_updated(Utc::now()))?;
        status(
            "Installed",
            &format!("{coords} to {}", repo.artifact_dir(&coords).display()),
        );
        Ok(TaskOutcome::Executed)
    }

    fn nexus_target(&self) -> NexusTarget {
        NexusTarget::configure(&self.ctx.manifest.nexus_or_default(), &self.ctx.properties)
    }

    async fn publish_to_sonatype(&mut self) -> miette::Result<TaskOutcome> {
        let coords = self.ctx.coordinates();
        let files = self.publish_files()?;
        let target = self.nexus_target();
        let client = self.client()?;

        if coords.is_snapshot() {
            let repo = target.snapshot_repository();
            let report = RemotePublisher::new(&client, &repo, &coords)
                .deploy_snapshot(&files, Utc::now())
                .await?;
            status(
                "Uploaded",
                &format!("{coords} ({} files) to {}", report.uploaded.len(), repo.url),
            );
            return Ok(TaskOutcome::Executed);
        }

        let staging = StagingClient::new(&client, &target).with_poll_settings(self.options.poll);
        let id = staging.start(&coords.to_string()).await?;
        let repo = target.staging_deploy_repository(&id);
        let report = RemotePublisher::new(&client, &repo, &coords)
            .deploy_release(&files)
            .await?;
        status(
            "Uploaded",
            &format!("{coords} ({} files) to staging repository {id}", report.uploaded.len()),
        );
        self.staged_repository = Some(id);
        Ok(TaskOutcome::Executed)
    }

    async fn close_and_release(&mut self) -> miette::Result<TaskOutcome> {
        let coords = self.ctx.coordinates();
        if coords.is_snapshot() {
            return Ok(TaskOutcome::skipped(SNAPSHOT_NOT_STAGED));
        }
        let id = self.staged_repository.clone().ok_or_else(|| JarshipError::Publish {
            message: "no staging repository was opened".to_string(),
        })?;
        let target = self.nexus_target();
        let client = self.client()?;
        let staging = StagingClient::new(&client, &target).with_poll_settings(self.options.poll);
        let description = coords.to_string();

        staging.close(&id, &description).await?;
        staging.wait_until_closed(&id).await?;
        status_info("Closed", &format!("staging repository {id}"));
        if self.options.release {
            staging.release(&id, &description).await?;
            status("Released", &format!("{coords} from {id}"));
        }
        Ok(TaskOutcome::Executed)
    }
}

/// Remove and recreate an output directory so stale files never leak into
/// archives.
fn reset_dir(dir: &std::path::Path) -> miette::Result<()> {
    if dir.exists() {
        std::fs::remove_dir_all(dir).map_err(JarshipError::Io)?;
    }
    std::fs::create_dir_all(dir).map_err(JarshipError::Io)?;
    Ok(())
}
