//! Repository provider backed by the `git` command-line tool.

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use std::process::{Output, Stdio};
use std::sync::Arc;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

use crate::config::DEFAULT_TIMEOUT_SECS;
use crate::repository::{
    domain::{BranchQuery, Ref, RefKind, Remote, RepoLocation},
    ports::{ProviderResult, RepositoryProvider, RepositoryProviderError, SourceRepository},
};

const HEADS_PREFIX: &str = "refs/heads/";
const REMOTES_PREFIX: &str = "refs/remotes/";
const TAGS_PREFIX: &str = "refs/tags/";
const REF_FORMAT: &str = "--format=%(refname)%00%(objectname)%00%(symref)";

/// Provider that treats any Git working copy on disk as a known repository.
///
/// A location resolves to the working-copy root reported by
/// `git rev-parse --show-toplevel`; locations outside a working copy are
/// unknown.
#[derive(Debug, Clone)]
pub struct GitCliRepositoryProvider {
    git: Utf8PathBuf,
    timeout: Duration,
}

impl Default for GitCliRepositoryProvider {
    fn default() -> Self {
        Self::new("git", Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}

impl GitCliRepositoryProvider {
    /// Creates a provider that runs `git` with a per-command timeout.
    #[must_use]
    pub fn new(git: impl Into<Utf8PathBuf>, timeout: Duration) -> Self {
        Self {
            git: git.into(),
            timeout,
        }
    }
}

#[async_trait]
impl RepositoryProvider for GitCliRepositoryProvider {
    async fn open_repository(
        &self,
        location: &RepoLocation,
    ) -> ProviderResult<Option<Arc<dyn SourceRepository>>> {
        let output = run_git(
            &self.git,
            self.timeout,
            location.as_path(),
            &["rev-parse", "--show-toplevel"],
        )
        .await?;
        if !output.status.success() {
            debug!(%location, "location is not inside a git working copy");
            return Ok(None);
        }

        let stdout = decode_stdout(output)?;
        let root = RepoLocation::new(stdout.trim())
            .map_err(|err| RepositoryProviderError::InvalidOutput(err.to_string()))?;
        Ok(Some(Arc::new(GitCliRepository {
            git: self.git.clone(),
            timeout: self.timeout,
            root,
        })))
    }
}

/// Working copy resolved by [`GitCliRepositoryProvider`].
#[derive(Debug)]
struct GitCliRepository {
    git: Utf8PathBuf,
    timeout: Duration,
    root: RepoLocation,
}

impl GitCliRepository {
    async fn query(&self, args: &[&str]) -> ProviderResult<String> {
        let output = run_git(&self.git, self.timeout, self.root.as_path(), args).await?;
        if !output.status.success() {
            return Err(RepositoryProviderError::CommandFailed {
                command: command_line(args),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }
        decode_stdout(output)
    }
}

#[async_trait]
impl SourceRepository for GitCliRepository {
    fn root(&self) -> &RepoLocation {
        &self.root
    }

    async fn get_branches(&self, query: BranchQuery) -> ProviderResult<Vec<Ref>> {
        let prefix = if query.is_remote() {
            REMOTES_PREFIX
        } else {
            HEADS_PREFIX
        };
        let listing = self.query(&["for-each-ref", REF_FORMAT, prefix]).await?;
        parse_ref_listing(&listing, query)
    }

    async fn get_remotes(&self) -> ProviderResult<Vec<Remote>> {
        let listing = self.query(&["remote", "-v"]).await?;
        parse_remote_listing(&listing)
    }
}

async fn run_git(
    git: &Utf8Path,
    timeout: Duration,
    cwd: &Utf8Path,
    args: &[&str],
) -> ProviderResult<Output> {
    let child = Command::new(git.as_std_path())
        .arg("-C")
        .arg(cwd.as_std_path())
        .args(args)
        .env("GIT_TERMINAL_PROMPT", "0")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(RepositoryProviderError::backend)?;

    tokio::time::timeout(timeout, child.wait_with_output())
        .await
        .map_err(|_| RepositoryProviderError::Timeout {
            command: command_line(args),
            timeout,
        })?
        .map_err(RepositoryProviderError::backend)
}

fn command_line(args: &[&str]) -> String {
    format!("git {}", args.join(" "))
}

fn decode_stdout(output: Output) -> ProviderResult<String> {
    String::from_utf8(output.stdout)
        .map_err(|err| RepositoryProviderError::InvalidOutput(err.to_string()))
}

/// Parses `git for-each-ref` output produced with [`REF_FORMAT`].
///
/// Symbolic references such as `origin/HEAD` are skipped.
pub(crate) fn parse_ref_listing(listing: &str, query: BranchQuery) -> ProviderResult<Vec<Ref>> {
    let mut refs = Vec::new();
    for line in listing.lines().filter(|line| !line.trim().is_empty()) {
        let mut fields = line.split('\0');
        let (Some(full_name), Some(commit)) = (fields.next(), fields.next()) else {
            return Err(RepositoryProviderError::InvalidOutput(line.to_owned()));
        };
        let symref = fields.next().unwrap_or_default();
        if !symref.is_empty() {
            continue;
        }
        let Some(parsed) = ref_from_full_name(full_name)? else {
            continue;
        };
        let reference = parsed.with_commit(commit.trim());
        if query.matches(&reference) {
            refs.push(reference);
        }
    }
    Ok(refs)
}

fn ref_from_full_name(full_name: &str) -> ProviderResult<Option<Ref>> {
    let invalid = |detail: String| RepositoryProviderError::InvalidOutput(detail);
    if let Some(short) = full_name.strip_prefix(REMOTES_PREFIX) {
        let (remote, branch) = short
            .split_once('/')
            .ok_or_else(|| invalid(format!("remote ref without branch: {full_name}")))?;
        return Ref::remote_head(remote, branch)
            .map(Some)
            .map_err(|err| invalid(err.to_string()));
    }
    let kind_and_name = full_name
        .strip_prefix(HEADS_PREFIX)
        .map(|short| (RefKind::Head, short))
        .or_else(|| {
            full_name
                .strip_prefix(TAGS_PREFIX)
                .map(|short| (RefKind::Tag, short))
        });
    match kind_and_name {
        Some((kind, short)) => Ref::new(short, kind)
            .map(Some)
            .map_err(|err| invalid(err.to_string())),
        None => Ok(None),
    }
}

/// Parses `git remote -v` output into remotes, preserving first-seen order.
pub(crate) fn parse_remote_listing(listing: &str) -> ProviderResult<Vec<Remote>> {
    let mut remotes: Vec<Remote> = Vec::new();
    for line in listing.lines().filter(|line| !line.trim().is_empty()) {
        let (name, rest) = line
            .split_once('\t')
            .ok_or_else(|| RepositoryProviderError::InvalidOutput(line.to_owned()))?;
        let (url, direction) = rest
            .trim()
            .rsplit_once(' ')
            .ok_or_else(|| RepositoryProviderError::InvalidOutput(line.to_owned()))?;

        let position = match remotes.iter().position(|remote| remote.name() == name) {
            Some(position) => position,
            None => {
                let remote = Remote::new(name)
                    .map_err(|err| RepositoryProviderError::InvalidOutput(err.to_string()))?;
                remotes.push(remote);
                remotes.len() - 1
            }
        };
        let Some(slot) = remotes.get_mut(position) else {
            continue;
        };
        let current = slot.clone();
        *slot = match direction {
            "(fetch)" => current.with_fetch_url(url),
            "(push)" => current.with_push_url(url),
            other => {
                return Err(RepositoryProviderError::InvalidOutput(format!(
                    "unknown remote direction {other}"
                )));
            }
        };
    }
    Ok(remotes)
}
