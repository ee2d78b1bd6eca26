//! Platform detection and per-variant data.

use shellcheck_runner::checker::{platform_key, PlatformVariant, SHELLCHECK_VERSION};

#[test]
fn detects_the_supported_matrix() {
    let cases = [
        // JVM-style arch spellings
        ("Linux", "amd64", PlatformVariant::LinuxX86_64),
        ("Linux", "aarch64", PlatformVariant::LinuxArm64),
        ("Linux", "arm", PlatformVariant::LinuxArm32hf),
        ("Windows 10", "amd64", PlatformVariant::WindowsX86),
        ("Windows Server 2019", "x86", PlatformVariant::WindowsX86),
        ("Mac OS X", "x86_64", PlatformVariant::MacOsX86_64),
        // Rust-style spellings as reported by std::env::consts
        ("linux", "x86_64", PlatformVariant::LinuxX86_64),
        ("linux", "arm64", PlatformVariant::LinuxArm64),
        ("windows", "x86_64", PlatformVariant::WindowsX86),
        // macOS needs no arch narrowing
        ("macos", "aarch64", PlatformVariant::MacOsX86_64),
    ];

    for (os, arch, expected) in cases {
        assert_eq!(PlatformVariant::detect(os, arch), expected, "{os}/{arch}");
    }
}

#[test]
fn unknown_combinations_degrade_to_unsupported() {
    let cases = [
        ("solaris", "sparc"),
        ("freebsd", "x86_64"),
        ("linux", "riscv64"),
        ("linux", "mips"),
        ("windows", "arm"),
        ("", ""),
    ];

    for (os, arch) in cases {
        assert_eq!(
            PlatformVariant::detect(os, arch),
            PlatformVariant::Unsupported,
            "{os}/{arch}"
        );
    }
}

#[test]
fn detection_is_deterministic() {
    for _ in 0..3 {
        assert_eq!(
            PlatformVariant::detect("Linux", "amd64"),
            PlatformVariant::LinuxX86_64
        );
        assert_eq!(
            PlatformVariant::detect("plan9", "mystery"),
            PlatformVariant::Unsupported
        );
    }
}

#[test]
fn executable_suffix_is_windows_only() {
    assert_eq!(PlatformVariant::WindowsX86.executable_suffix(), ".exe");
    assert_eq!(PlatformVariant::WindowsX86.binary_name(), "shellcheck.exe");
    assert_eq!(PlatformVariant::LinuxX86_64.executable_suffix(), "");
    assert_eq!(PlatformVariant::MacOsX86_64.binary_name(), "shellcheck");
}

#[test]
fn posix_permission_support_excludes_windows() {
    assert!(!PlatformVariant::WindowsX86.supports_posix_permissions());
    assert!(PlatformVariant::LinuxX86_64.supports_posix_permissions());
    assert!(PlatformVariant::MacOsX86_64.supports_posix_permissions());
}

#[test]
fn download_urls_match_the_release_asset_names() {
    let url = |variant: PlatformVariant| {
        variant
            .default_download_url()
            .expect("supported variant")
            .to_string()
    };

    assert!(url(PlatformVariant::LinuxX86_64)
        .ends_with(&format!("shellcheck-v{SHELLCHECK_VERSION}.linux.x86_64.tar.xz")));
    // the two ARM flavors must not be swapped
    assert!(url(PlatformVariant::LinuxArm32hf)
        .ends_with(&format!("shellcheck-v{SHELLCHECK_VERSION}.linux.armv6hf.tar.xz")));
    assert!(url(PlatformVariant::LinuxArm64)
        .ends_with(&format!("shellcheck-v{SHELLCHECK_VERSION}.linux.aarch64.tar.xz")));
    assert!(url(PlatformVariant::MacOsX86_64)
        .ends_with(&format!("shellcheck-v{SHELLCHECK_VERSION}.darwin.x86_64.tar.xz")));
    assert!(url(PlatformVariant::WindowsX86)
        .ends_with(&format!("shellcheck-v{SHELLCHECK_VERSION}.zip")));
}

#[test]
fn archive_layouts_follow_the_published_structure() {
    assert_eq!(
        PlatformVariant::LinuxX86_64
            .archive_layout()
            .expect("supported variant"),
        std::path::PathBuf::from(format!("shellcheck-v{SHELLCHECK_VERSION}")).join("shellcheck")
    );
    assert_eq!(
        PlatformVariant::WindowsX86
            .archive_layout()
            .expect("supported variant"),
        std::path::PathBuf::from("shellcheck.exe")
    );
}

#[test]
fn unsupported_rejects_every_path_producing_operation() {
    assert!(PlatformVariant::Unsupported.bundled_resource_path().is_err());
    assert!(PlatformVariant::Unsupported.default_download_url().is_err());
    assert!(PlatformVariant::Unsupported.archive_layout().is_err());
}

#[test]
fn platform_keys_replace_spaces_with_underscores() {
    assert_eq!(platform_key("Mac OS X", "x86_64"), "Mac_OS_X-x86_64");
    assert_eq!(platform_key("linux", "x86_64"), "linux-x86_64");
}
