//! Module `file_ops`
//!
//! Local side of a transfer: opening the file to upload, staging a
//! download in a `.part` file that is renamed into place on success, and
//! copying bytes between a stream and a file.

use log::{debug, info, warn};
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

const PART_SUFFIX: &str = ".part";

/// Open the local file to upload.
pub async fn open_source(path: &Path) -> io::Result<File> {
    let file = File::open(path).await?;
    debug!("Opened {} for upload", path.display());
    Ok(file)
}

/// Download target staged in a sibling `.part` file.
///
/// Created before any network action so an unwritable destination fails
/// the copy up front.
pub struct LocalSink {
    file: File,
    part_path: PathBuf,
    final_path: PathBuf,
    keep_partial: bool,
}

impl LocalSink {
    pub async fn create(path: &Path, keep_partial: bool) -> io::Result<Self> {
        let part_path = part_path_for(path);
        let file = File::create(&part_path).await?;
        debug!(
            "Staging download for {} in {}",
            path.display(),
            part_path.display()
        );
        Ok(Self {
            file,
            part_path,
            final_path: path.to_path_buf(),
            keep_partial,
        })
    }

    pub fn writer(&mut self) -> &mut File {
        &mut self.file
    }

    /// Flush and move the staged file onto the destination path.
    pub async fn commit(mut self) -> io::Result<()> {
        self.file.flush().await?;
        self.file.sync_all().await?;
        drop(self.file);

        if let Err(e) = fs::rename(&self.part_path, &self.final_path).await {
            let _ = fs::remove_file(&self.part_path).await;
            return Err(e);
        }
        info!("Saved {}", self.final_path.display());
        Ok(())
    }

    /// Drop the partial download, or leave it on disk when configured to.
    pub async fn discard(self) {
        drop(self.file);
        if self.keep_partial {
            warn!("Partial download kept at {}", self.part_path.display());
            return;
        }
        if let Err(e) = fs::remove_file(&self.part_path).await {
            warn!(
                "Failed to remove partial download {}: {}",
                self.part_path.display(),
                e
            );
        }
    }
}

fn part_path_for(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_os_string();
    name.push(PART_SUFFIX);
    PathBuf::from(name)
}

/// Copy `reader` into `writer` chunk by chunk until EOF, in order.
///
/// Returns the number of bytes copied.
pub async fn copy_stream<R, W>(reader: &mut R, writer: &mut W, buffer_size: usize) -> io::Result<u64>
where
    R: AsyncRead + Unpin + ?Sized,
    W: AsyncWrite + Unpin + ?Sized,
{
    let mut buffer = vec![0u8; buffer_size.max(1)];
    let mut total = 0u64;

    loop {
        let n = reader.read(&mut buffer).await?;
        if n == 0 {
            break;
        }
        writer.write_all(&buffer[..n]).await?;
        total += n as u64;
    }

    writer.flush().await?;
    Ok(total)
}
