use crate::models::{ArchiverConfig, ArchiverKind};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs::{self, File};
use std::io;
use std::process::Stdio;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::process::Command;
use tokio::time::timeout;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Errors that can occur while building a `.pak` archive
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Failed to start {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: io::Error,
    },

    #[error("{tool} exited with code {code}: {stderr}")]
    NonZeroExit {
        tool: String,
        code: i32,
        stderr: String,
    },

    #[error("{tool} timed out after {timeout:?}")]
    Timeout { tool: String, timeout: Duration },

    #[error("Failed to create archiver runtime: {0}")]
    Runtime(#[source] io::Error),

    #[error("Archive source has no directory name: {0}")]
    InvalidSource(Utf8PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Failed to walk archive source: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Packs one directory into one zip-compatible, store-only `.pak` file.
///
/// The archive contains the directory itself as its top-level entry, so
/// `Assets/textures` becomes `textures.pak` holding `textures/...`.
/// An existing file at `dest_archive` is replaced.
#[cfg_attr(test, mockall::automock)]
pub trait Archiver {
    fn archive(&self, source_dir: &Utf8Path, dest_archive: &Utf8Path) -> Result<(), ArchiveError>;
}

/// Build the archiver selected in the release config.
pub fn archiver_from_config(config: &ArchiverConfig) -> Result<Box<dyn Archiver>, ArchiveError> {
    match config.kind {
        ArchiverKind::SevenZip => Ok(Box::new(SevenZipArchiver::new(
            config.executable.clone(),
            config.timeout_secs.map(Duration::from_secs),
        )?)),
        ArchiverKind::StoreZip => Ok(Box::new(StoreZipArchiver)),
    }
}

/// Runs the 7-Zip command line tool: `a -r -tzip -mx0 <archive> <dir>`.
///
/// The tool is awaited on a private current-thread runtime so an optional
/// timeout can kill a hung process.
pub struct SevenZipArchiver {
    executable: String,
    timeout: Option<Duration>,
    runtime: tokio::runtime::Runtime,
}

impl SevenZipArchiver {
    pub fn new(executable: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ArchiveError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ArchiveError::Runtime)?;

        Ok(Self {
            executable: executable.into(),
            timeout,
            runtime,
        })
    }

    /// Arguments for: add, recursive, zip container, no compression, output, input.
    pub fn build_args(&self, source_dir: &Utf8Path, dest_archive: &Utf8Path) -> Vec<String> {
        vec![
            "a".to_string(),
            "-r".to_string(),
            "-tzip".to_string(),
            "-mx0".to_string(),
            dest_archive.to_string(),
            source_dir.to_string(),
        ]
    }

    async fn run(&self, args: Vec<String>) -> Result<(), ArchiveError> {
        tracing::info!("Executing: {} {}", self.executable, args.join(" "));
        let start = Instant::now();

        let child = Command::new(&self.executable)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ArchiveError::Spawn {
                tool: self.executable.clone(),
                source,
            })?;

        let output = match self.timeout {
            Some(limit) => timeout(limit, child.wait_with_output())
                .await
                .map_err(|_| {
                    tracing::warn!("{} timed out after {:?}", self.executable, limit);
                    ArchiveError::Timeout {
                        tool: self.executable.clone(),
                        timeout: limit,
                    }
                })??,
            None => child.wait_with_output().await?,
        };

        let exit_code = output.status.code().unwrap_or(-1);
        tracing::debug!(
            "{} completed in {:.2}s with exit code {}",
            self.executable,
            start.elapsed().as_secs_f32(),
            exit_code
        );

        if !output.status.success() {
            return Err(ArchiveError::NonZeroExit {
                tool: self.executable.clone(),
                code: exit_code,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

impl Archiver for SevenZipArchiver {
    fn archive(&self, source_dir: &Utf8Path, dest_archive: &Utf8Path) -> Result<(), ArchiveError> {
        // `7z a` appends to an existing archive
        if dest_archive.exists() {
            fs::remove_file(dest_archive)?;
        }

        let args = self.build_args(source_dir, dest_archive);
        self.runtime.block_on(self.run(args))
    }
}

/// Writes store-only zip archives in-process, no external tool required.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoreZipArchiver;

impl StoreZipArchiver {
    fn options(large_file: bool) -> SimpleFileOptions {
        SimpleFileOptions::default()
            .compression_method(CompressionMethod::Stored)
            .large_file(large_file)
    }
}

impl Archiver for StoreZipArchiver {
    fn archive(&self, source_dir: &Utf8Path, dest_archive: &Utf8Path) -> Result<(), ArchiveError> {
        let root_name = source_dir
            .file_name()
            .ok_or_else(|| ArchiveError::InvalidSource(source_dir.to_path_buf()))?;

        let mut writer = ZipWriter::new(File::create(dest_archive)?);
        let mut entries = 0usize;

        for entry in WalkDir::new(source_dir).sort_by_file_name() {
            let entry = entry?;
            let rel = entry
                .path()
                .strip_prefix(source_dir.as_std_path())
                .map_err(|_| ArchiveError::InvalidSource(source_dir.to_path_buf()))?;

            let mut name = root_name.to_string();
            for component in rel.components() {
                name.push('/');
                name.push_str(&component.as_os_str().to_string_lossy());
            }

            if entry.file_type().is_dir() {
                writer.add_directory(name, Self::options(false))?;
                continue;
            }

            let large_file = entry.metadata()?.len() >= u64::from(u32::MAX);
            writer.start_file(name, Self::options(large_file))?;
            io::copy(&mut File::open(entry.path())?, &mut writer)?;
            entries += 1;
        }

        writer.finish()?;
        tracing::info!("Packed {} files from {} into {}", entries, source_dir, dest_archive);
        Ok(())
    }
}
