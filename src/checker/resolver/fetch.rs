//! Release-archive acquisition and unpacking.
//!
//! The resolver treats "fetch this URL and unpack it into that directory" as
//! an opaque collaborator behind [`ArchiveFetcher`], so tests can substitute
//! a fixture that lays files down directly.

use std::io::{BufReader, Cursor};
use std::path::Path;

use url::Url;

use crate::bail;
use crate::checker::error::{Error, ErrorExt, Result};

/// Fetches a release archive and unpacks it into a directory.
pub trait ArchiveFetcher {
    /// Fetches the archive at `url` and unpacks its tree into `dest`,
    /// creating `dest` as needed.
    async fn fetch_and_unpack(&self, url: &Url, dest: &Path) -> Result<()>;
}

/// Production fetcher: HTTP download, then format-dispatched extraction.
///
/// The archive format is chosen from the URL's file name; shellcheck
/// publishes `.tar.xz` for the POSIX platforms and `.zip` for Windows, with
/// `.tar.gz` and bare `.tar` accepted for mirrors that repackage.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpArchiveFetcher;

impl HttpArchiveFetcher {
    /// Creates a new HTTP fetcher.
    pub fn new() -> Self {
        Self
    }
}

impl ArchiveFetcher for HttpArchiveFetcher {
    async fn fetch_and_unpack(&self, url: &Url, dest: &Path) -> Result<()> {
        log::info!("downloading {}", url);

        let response = reqwest::get(url.clone()).await?.error_for_status()?;
        let bytes = response.bytes().await?.to_vec();

        tokio::fs::create_dir_all(dest)
            .await
            .fs_context("creating unpack directory", dest)?;

        let file_name = archive_file_name(url);
        let dest = dest.to_path_buf();

        // extraction is blocking CPU/filesystem work
        tokio::task::spawn_blocking(move || unpack(&file_name, &bytes, &dest))
            .await
            .map_err(|e| Error::GenericError(format!("archive unpack task panicked: {e}")))?
    }
}

fn archive_file_name(url: &Url) -> String {
    url.path_segments()
        .and_then(|segments| segments.last())
        .unwrap_or("")
        .to_lowercase()
}

fn unpack(file_name: &str, bytes: &[u8], dest: &Path) -> Result<()> {
    if file_name.ends_with(".zip") {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
        archive.extract(dest)?;
    } else if file_name.ends_with(".tar.xz") || file_name.ends_with(".txz") {
        let mut decompressed = Vec::new();
        lzma_rs::xz_decompress(&mut BufReader::new(Cursor::new(bytes)), &mut decompressed)
            .map_err(|e| Error::GenericError(format!("xz decompression failed: {e:?}")))?;
        let mut archive = tar::Archive::new(Cursor::new(decompressed));
        archive.unpack(dest)?;
    } else if file_name.ends_with(".tar.gz") || file_name.ends_with(".tgz") {
        let mut archive = tar::Archive::new(flate2::read::GzDecoder::new(Cursor::new(bytes)));
        archive.unpack(dest)?;
    } else if file_name.ends_with(".tar") {
        let mut archive = tar::Archive::new(Cursor::new(bytes));
        archive.unpack(dest)?;
    } else {
        bail!("unrecognized release archive format: [{file_name}]");
    }

    Ok(())
}
