//! Binary resolution.
//!
//! Groups the different ways of getting hold of a usable shellcheck binary:
//! an externally supplied path, a downloaded release archive, or a bundled
//! resource extracted next to the runner. Whatever the strategy, the result
//! is a validated [`BinaryHandle`] or a [`Error::Resolution`] naming the
//! strategy that failed.

mod fetch;

pub use fetch::{ArchiveFetcher, HttpArchiveFetcher};

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use path_absolutize::Absolutize;

use super::error::{Context, Error, ErrorExt, Result};
use super::paths::RunnerPaths;
use super::platform::{platform_key, PlatformVariant};
use super::settings::Settings;

/// All the ways the runner can resolve the shellcheck binary.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResolutionStrategy {
    /// The path to an externally provided binary must be supplied.
    External,
    /// The binary is downloaded from a release archive at execution time.
    Download,
    /// The binary is copied out of the bundled resources.
    Embedded,
}

impl fmt::Display for ResolutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::External => "external",
            Self::Download => "download",
            Self::Embedded => "embedded",
        };
        f.write_str(name)
    }
}

impl FromStr for ResolutionStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "external" => Ok(Self::External),
            "download" => Ok(Self::Download),
            "embedded" => Ok(Self::Embedded),
            other => Err(Error::GenericError(format!(
                "invalid resolution strategy: [{other}]"
            ))),
        }
    }
}

/// An absolute path proven to point at an existing, readable and (on POSIX)
/// executable file.
///
/// Only [`BinaryResolver`] constructs these; the process runner consumes
/// them read-only.
#[derive(Clone, Debug)]
pub struct BinaryHandle {
    path: PathBuf,
}

impl BinaryHandle {
    /// The validated absolute binary path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Resolves the shellcheck binary for one detected platform.
pub struct BinaryResolver<'a, F> {
    settings: &'a Settings,
    fetcher: F,
    os_name: String,
    os_arch: String,
    variant: PlatformVariant,
    paths: RunnerPaths,
}

impl<'a, F: ArchiveFetcher> BinaryResolver<'a, F> {
    /// Creates a resolver for the machine this process runs on.
    pub fn new(settings: &'a Settings, fetcher: F) -> Self {
        Self::for_host(
            settings,
            fetcher,
            std::env::consts::OS,
            std::env::consts::ARCH,
        )
    }

    /// Creates a resolver for an explicit os/arch pair.
    ///
    /// Detection is pure, so tests can exercise any platform from any host.
    pub fn for_host(settings: &'a Settings, fetcher: F, os_name: &str, os_arch: &str) -> Self {
        let variant = PlatformVariant::detect(os_name, os_arch);
        log::debug!(
            "detected platform [{:?}] for key [{}]",
            variant,
            platform_key(os_name, os_arch)
        );

        Self {
            settings,
            fetcher,
            os_name: os_name.to_string(),
            os_arch: os_arch.to_string(),
            variant,
            paths: RunnerPaths::new(settings.output_dir()),
        }
    }

    /// The detected platform variant.
    pub fn variant(&self) -> PlatformVariant {
        self.variant
    }

    /// The normalized `"<os>-<arch>"` key used for URL override lookups.
    pub fn platform_key(&self) -> String {
        platform_key(&self.os_name, &self.os_arch)
    }

    /// Performs binary resolution with the requested strategy.
    pub async fn resolve(&self, strategy: ResolutionStrategy) -> Result<BinaryHandle> {
        match strategy {
            ResolutionStrategy::External => self.resolve_external(),
            ResolutionStrategy::Download => self.resolve_download().await,
            ResolutionStrategy::Embedded => self.resolve_embedded().await,
        }
    }

    /// Validates the externally supplied binary; no filesystem mutation.
    fn resolve_external(&self) -> Result<BinaryHandle> {
        let supplied = self
            .settings
            .external_binary()
            .ok_or_else(|| Error::Resolution {
                strategy: ResolutionStrategy::External,
                reason: "no external binary path was provided".into(),
            })?;

        // a bare program name is resolved through PATH
        let candidate = if supplied.components().count() == 1 && !supplied.exists() {
            which::which(supplied).map_err(|e| Error::Resolution {
                strategy: ResolutionStrategy::External,
                reason: format!("[{}] not found on PATH: {}", supplied.display(), e),
            })?
        } else {
            supplied.to_path_buf()
        };

        self.validate(&candidate, ResolutionStrategy::External)
    }

    /// Downloads the release archive for the current platform and locates
    /// the binary inside the unpacked tree.
    async fn resolve_download(&self) -> Result<BinaryHandle> {
        self.reject_unsupported()?;

        let key = self.platform_key();
        let url = match self.settings.url_overrides().get(&key) {
            Some(url) => url.clone(),
            None => {
                log::debug!("no shellcheck download url override for platform key [{key}]");
                self.variant.default_download_url()?
            }
        };
        log::info!("shellcheck release will be fetched from [{url}]");

        let unpack_dir = self.paths.in_output_dir("release");
        self.fetcher
            .fetch_and_unpack(&url, &unpack_dir)
            .await
            .context("fetching and unpacking the shellcheck release archive")?;

        let candidate = self.locate_unpacked_binary(&unpack_dir)?;
        self.variant.make_executable(&candidate).await?;
        self.validate(&candidate, ResolutionStrategy::Download)
    }

    /// Copies the bundled binary for the current platform into the output
    /// directory.
    async fn resolve_embedded(&self) -> Result<BinaryHandle> {
        self.reject_unsupported()?;

        let resource = self.bundled_resource()?;
        log::debug!("will try to use bundled binary [{}]", resource.display());
        if !resource.is_file() {
            return Err(Error::Resolution {
                strategy: ResolutionStrategy::Embedded,
                reason: format!("no bundled shellcheck binary at [{}]", resource.display()),
            });
        }

        let target = self.paths.in_output_dir(&self.variant.binary_name());
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .fs_context("creating binary target directory", parent)?;
        }
        tokio::fs::copy(&resource, &target)
            .await
            .fs_context("copying bundled binary", &target)?;

        self.variant.make_executable(&target).await?;
        self.validate(&target, ResolutionStrategy::Embedded)
    }

    /// Finds the binary inside an unpacked release tree.
    ///
    /// The variant's declared relative path is tried first; release archives
    /// that do not match it are searched by file name, where anything other
    /// than exactly one candidate signals an unexpected archive layout.
    fn locate_unpacked_binary(&self, unpack_dir: &Path) -> Result<PathBuf> {
        let declared = unpack_dir.join(self.variant.archive_layout()?);
        if declared.is_file() {
            return Ok(declared);
        }

        log::debug!(
            "[{}] not present, searching the unpacked tree by name",
            declared.display()
        );
        self.search_unpacked_binary(unpack_dir)
    }

    fn search_unpacked_binary(&self, unpack_dir: &Path) -> Result<PathBuf> {
        let wanted = self.variant.binary_name();
        let mut candidates: Vec<PathBuf> = walkdir::WalkDir::new(unpack_dir)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| entry.file_name().to_string_lossy() == wanted)
            .map(|entry| entry.into_path())
            .collect();

        match candidates.len() {
            0 => Err(Error::Resolution {
                strategy: ResolutionStrategy::Download,
                reason: format!(
                    "no [{wanted}] candidates found in the unpacked release at [{}]",
                    unpack_dir.display()
                ),
            }),
            1 => Ok(candidates.remove(0)),
            _ => Err(Error::Resolution {
                strategy: ResolutionStrategy::Download,
                reason: format!(
                    "multiple [{wanted}] candidates in the unpacked release: {candidates:?}"
                ),
            }),
        }
    }

    fn bundled_resource(&self) -> Result<PathBuf> {
        let template = self.variant.bundled_resource_path()?;
        let root = match self.settings.resource_root() {
            Some(root) => root.to_path_buf(),
            None => {
                let exe = std::env::current_exe().map_err(|e| {
                    Error::GenericError(format!("cannot determine current executable path: {e}"))
                })?;
                exe.parent()
                    .map(|dir| dir.join("shellcheck-bin"))
                    .ok_or_else(|| {
                        Error::GenericError("current executable path has no parent".into())
                    })?
            }
        };
        Ok(root.join(template))
    }

    /// Shared validation: the candidate must exist, be a readable regular
    /// file, and carry an execute bit on POSIX platforms.
    fn validate(&self, candidate: &Path, strategy: ResolutionStrategy) -> Result<BinaryHandle> {
        let fail = |reason: String| Error::Resolution { strategy, reason };

        let metadata = std::fs::metadata(candidate)
            .map_err(|e| fail(format!("[{}] cannot be found: {}", candidate.display(), e)))?;
        if !metadata.is_file() {
            return Err(fail(format!(
                "[{}] is not a regular file",
                candidate.display()
            )));
        }

        // readability is proven by actually opening the file
        std::fs::File::open(candidate)
            .map_err(|e| fail(format!("[{}] is not readable: {}", candidate.display(), e)))?;

        if self.variant.supports_posix_permissions() && !is_executable(&metadata) {
            return Err(fail(format!(
                "[{}] is not executable",
                candidate.display()
            )));
        }

        let path = candidate
            .absolutize()
            .fs_context("absolutizing binary path", candidate)?
            .into_owned();
        Ok(BinaryHandle { path })
    }

    fn reject_unsupported(&self) -> Result<()> {
        if self.variant == PlatformVariant::Unsupported {
            return Err(Error::UnsupportedPlatform {
                os: self.os_name.clone(),
                arch: self.os_arch.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(unix)]
fn is_executable(metadata: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_metadata: &std::fs::Metadata) -> bool {
    true
}
