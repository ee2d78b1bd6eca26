//! Host platform detection for shellcheck binaries.
//!
//! Just enough os/arch detection to pick the right shellcheck release asset.
//! Every per-variant operation matches exhaustively, so adding a platform is
//! a localized, compile-checked change.

use std::path::{Path, PathBuf};

use url::Url;

use super::error::{Error, ErrorExt, Result};

/// The shellcheck version whose release assets and bundled resources this
/// crate knows how to locate.
pub const SHELLCHECK_VERSION: &str = "0.8.0";

const RELEASE_BASE_URL: &str = "https://github.com/koalaman/shellcheck/releases/download";

/// A supported (OS family, CPU architecture) pair for which a shellcheck
/// binary can be obtained.
///
/// Detection is a pure function of the os-name/cpu-arch strings; unknown
/// combinations degrade to [`PlatformVariant::Unsupported`] rather than
/// failing, and downstream operations reject `Unsupported` explicitly.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PlatformVariant {
    /// x86_64 / AMD64 Linux
    LinuxX86_64,
    /// ARM with hard-float (32-bit) Linux - Raspberry Pi class hardware
    LinuxArm32hf,
    /// AArch64 / ARM64 Linux
    LinuxArm64,
    /// x86_64 macOS (the only published darwin asset)
    MacOsX86_64,
    /// 32/64-bit Windows (a single x86 binary is published)
    WindowsX86,
    /// Anything else - no binary can be obtained
    Unsupported,
}

impl PlatformVariant {
    /// Detects the platform variant from raw os-name/cpu-arch strings.
    ///
    /// The OS name is matched case-insensitively by family substring
    /// ("win", "mac", "nux"); the architecture is then narrowed per family.
    /// Both the JVM-style ("amd64") and Rust-style ("x86_64") architecture
    /// spellings are accepted so callers can pass whichever vocabulary their
    /// environment reports.
    pub fn detect(os_name: &str, os_arch: &str) -> Self {
        let os = os_name.to_lowercase();

        if os.contains("win") {
            if os_arch.contains("amd64") || os_arch.contains("x86") {
                return Self::WindowsX86;
            }
        } else if os.contains("mac") {
            // a single x86_64 asset is published; Apple Silicon runs it
            // through Rosetta
            return Self::MacOsX86_64;
        } else if os.contains("nux") {
            match os_arch {
                "amd64" | "x86_64" => return Self::LinuxX86_64,
                "aarch64" | "arm64" => return Self::LinuxArm64,
                "arm" => return Self::LinuxArm32hf,
                _ => {}
            }
        }

        Self::Unsupported
    }

    /// Detects the variant for the machine this process is running on.
    pub fn host() -> Self {
        Self::detect(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Stable identifier used in bundled-resource directory names.
    pub fn id(self) -> &'static str {
        match self {
            Self::LinuxX86_64 => "linux-x86_64",
            Self::LinuxArm32hf => "linux-armv6hf",
            Self::LinuxArm64 => "linux-aarch64",
            Self::MacOsX86_64 => "darwin-x86_64",
            Self::WindowsX86 => "windows-x86",
            Self::Unsupported => "unsupported",
        }
    }

    /// The idiomatic executable suffix for the variant (`""` or `".exe"`).
    pub fn executable_suffix(self) -> &'static str {
        match self {
            Self::WindowsX86 => ".exe",
            Self::LinuxX86_64
            | Self::LinuxArm32hf
            | Self::LinuxArm64
            | Self::MacOsX86_64
            | Self::Unsupported => "",
        }
    }

    /// File name of the shellcheck binary on this variant.
    pub fn binary_name(self) -> String {
        format!("shellcheck{}", self.executable_suffix())
    }

    /// Whether the variant honors POSIX execute permission bits.
    ///
    /// Windows treats files as executable by extension, so permission
    /// application is a no-op there.
    pub fn supports_posix_permissions(self) -> bool {
        match self {
            Self::WindowsX86 => false,
            Self::LinuxX86_64
            | Self::LinuxArm32hf
            | Self::LinuxArm64
            | Self::MacOsX86_64
            | Self::Unsupported => true,
        }
    }

    /// Relative path of the bundled shellcheck binary under a resource root.
    ///
    /// Windows ships a single `.exe`; the POSIX resources mirror the release
    /// archives and nest the binary under a version-qualified directory.
    pub fn bundled_resource_path(self) -> Result<PathBuf> {
        self.reject_unsupported()?;

        let path = if self == Self::WindowsX86 {
            PathBuf::from(self.id()).join(format!("shellcheck-v{SHELLCHECK_VERSION}.exe"))
        } else {
            PathBuf::from(self.id())
                .join(format!("shellcheck-v{SHELLCHECK_VERSION}"))
                .join("shellcheck")
        };

        Ok(path)
    }

    /// Default release-archive URL for the variant.
    ///
    /// These match the asset names published for the pinned shellcheck
    /// version; an override map consulted before this default lets callers
    /// point at mirrors or newer releases.
    pub fn default_download_url(self) -> Result<Url> {
        self.reject_unsupported()?;

        let asset = match self {
            Self::LinuxX86_64 => format!("shellcheck-v{SHELLCHECK_VERSION}.linux.x86_64.tar.xz"),
            Self::LinuxArm32hf => format!("shellcheck-v{SHELLCHECK_VERSION}.linux.armv6hf.tar.xz"),
            Self::LinuxArm64 => format!("shellcheck-v{SHELLCHECK_VERSION}.linux.aarch64.tar.xz"),
            Self::MacOsX86_64 => format!("shellcheck-v{SHELLCHECK_VERSION}.darwin.x86_64.tar.xz"),
            Self::WindowsX86 => format!("shellcheck-v{SHELLCHECK_VERSION}.zip"),
            Self::Unsupported => unreachable!("rejected above"),
        };

        let url = format!("{RELEASE_BASE_URL}/v{SHELLCHECK_VERSION}/{asset}");
        Url::parse(&url)
            .map_err(|e| Error::GenericError(format!("invalid download url [{url}]: {e}")))
    }

    /// Expected relative path of the binary inside the unpacked release
    /// archive.
    ///
    /// The POSIX tarballs unpack to `shellcheck-vX.Y.Z/shellcheck`; the
    /// Windows zip holds `shellcheck.exe` at its root. When the archive does
    /// not match this declared layout, the resolver falls back to a
    /// name-based search of the unpacked tree.
    pub fn archive_layout(self) -> Result<PathBuf> {
        self.reject_unsupported()?;

        let path = if self == Self::WindowsX86 {
            PathBuf::from("shellcheck.exe")
        } else {
            PathBuf::from(format!("shellcheck-v{SHELLCHECK_VERSION}")).join("shellcheck")
        };

        Ok(path)
    }

    /// Marks the file at `path` executable (mode 0755) on POSIX variants.
    ///
    /// No-op on Windows.
    pub async fn make_executable(self, path: &Path) -> Result<()> {
        self.reject_unsupported()?;

        if !self.supports_posix_permissions() {
            return Ok(());
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
                .await
                .fs_context("marking binary executable", path)?;
        }
        #[cfg(not(unix))]
        let _ = path;

        Ok(())
    }

    fn reject_unsupported(self) -> Result<()> {
        if self == Self::Unsupported {
            return Err(Error::UnsupportedPlatform {
                os: std::env::consts::OS.to_string(),
                arch: std::env::consts::ARCH.to_string(),
            });
        }
        Ok(())
    }
}

/// Normalized `"<os-name>-<cpu-arch>"` key for the current host.
///
/// Used both as a diagnostic identifier and as the lookup key into the
/// caller-supplied download URL override map.
pub fn host_platform_key() -> String {
    platform_key(std::env::consts::OS, std::env::consts::ARCH)
}

/// Normalized platform key for arbitrary os/arch strings.
pub fn platform_key(os_name: &str, os_arch: &str) -> String {
    format!("{os_name}-{os_arch}").replace(' ', "_")
}
