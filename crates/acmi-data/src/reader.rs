//! Line source for TacView `.acmi` recordings.
//!
//! A recording is either a plain text file or a ZIP archive whose first
//! member is the text log. Lines are produced lazily; bytes that are not
//! valid UTF-8 are replaced rather than treated as fatal.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use acmi_core::error::{Result, StatsError};
use tracing::{debug, warn};
use zip::ZipArchive;

const UTF8_BOM: char = '\u{feff}';

// ── RecordingSource ───────────────────────────────────────────────────────────

/// An opened recording, ready to yield its lines once.
///
/// The underlying file is closed when the source is dropped, whichever way
/// the pass ends.
#[derive(Debug)]
pub enum RecordingSource {
    Plain {
        path: PathBuf,
        file: File,
    },
    Archive {
        path: PathBuf,
        archive: ZipArchive<File>,
        member: String,
    },
}

impl RecordingSource {
    /// Open `path`, detecting whether it is a ZIP archive.
    ///
    /// Files the `zip` reader rejects are read as plain text. An archive
    /// without members is an error; with several members only the first is
    /// read.
    pub fn open(path: &Path) -> Result<Self> {
        let file = open_file(path)?;

        match ZipArchive::new(file) {
            Ok(mut archive) => {
                if archive.is_empty() {
                    return Err(StatsError::EmptyArchive(path.to_path_buf()));
                }
                let member = archive
                    .by_index(0)
                    .map_err(|source| StatsError::Archive {
                        path: path.to_path_buf(),
                        source,
                    })?
                    .name()
                    .to_string();
                if archive.len() > 1 {
                    warn!(
                        "Archive {} has {} members; reading only {}",
                        path.display(),
                        archive.len(),
                        member
                    );
                }
                debug!("Reading member {} of archive {}", member, path.display());
                Ok(RecordingSource::Archive {
                    path: path.to_path_buf(),
                    archive,
                    member,
                })
            }
            Err(e) => {
                debug!("{} is not a ZIP archive ({}), reading as text", path.display(), e);
                Ok(RecordingSource::Plain {
                    path: path.to_path_buf(),
                    file: open_file(path)?,
                })
            }
        }
    }

    /// Path the source was opened from.
    pub fn path(&self) -> &Path {
        match self {
            RecordingSource::Plain { path, .. } | RecordingSource::Archive { path, .. } => path,
        }
    }

    pub fn is_archive(&self) -> bool {
        matches!(self, RecordingSource::Archive { .. })
    }

    /// Name of the archive member being read, for archived recordings.
    pub fn member_name(&self) -> Option<&str> {
        match self {
            RecordingSource::Plain { .. } => None,
            RecordingSource::Archive { member, .. } => Some(member),
        }
    }

    /// Lazily iterate over the recording's lines.
    pub fn lines(&mut self) -> Result<RecordingLines<'_>> {
        let (reader, path): (Box<dyn BufRead + '_>, &Path) = match self {
            RecordingSource::Plain { path, file } => {
                (Box::new(BufReader::new(&*file)), path.as_path())
            }
            RecordingSource::Archive { path, archive, .. } => {
                let member = archive.by_index(0).map_err(|source| StatsError::Archive {
                    path: path.clone(),
                    source,
                })?;
                (Box::new(BufReader::new(member)), path.as_path())
            }
        };
        Ok(RecordingLines {
            reader,
            path,
            buf: Vec::new(),
            first: true,
            after_cr: false,
        })
    }
}

// ── RecordingLines ────────────────────────────────────────────────────────────

/// Iterator over decoded lines with line terminators removed.
///
/// `\n`, `\r\n` and a lone `\r` all end a line.
pub struct RecordingLines<'a> {
    reader: Box<dyn BufRead + 'a>,
    path: &'a Path,
    buf: Vec<u8>,
    first: bool,
    /// The previous line ended in `\r`; a `\n` right after it belongs to it.
    after_cr: bool,
}

impl RecordingLines<'_> {
    /// Read the next line's bytes into `buf`. Returns `false` at end of input.
    fn read_line(&mut self) -> io::Result<bool> {
        self.buf.clear();
        let mut read_any = false;
        loop {
            let available = match self.reader.fill_buf() {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                return Ok(read_any);
            }

            let mut start = 0;
            if self.after_cr {
                self.after_cr = false;
                if available[0] == b'\n' {
                    start = 1;
                }
            }

            match available[start..]
                .iter()
                .position(|b| matches!(b, b'\n' | b'\r'))
            {
                Some(offset) => {
                    let end = start + offset;
                    self.buf.extend_from_slice(&available[start..end]);
                    self.after_cr = available[end] == b'\r';
                    self.reader.consume(end + 1);
                    return Ok(true);
                }
                None => {
                    let len = available.len();
                    self.buf.extend_from_slice(&available[start..]);
                    read_any |= len > start;
                    self.reader.consume(len);
                }
            }
        }
    }
}

impl Iterator for RecordingLines<'_> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_line() {
            Ok(false) => None,
            Ok(true) => {
                let mut line = String::from_utf8_lossy(&self.buf).into_owned();
                if self.first {
                    self.first = false;
                    if line.starts_with(UTF8_BOM) {
                        line.remove(0);
                    }
                }
                Some(Ok(line))
            }
            Err(source) => Some(Err(StatsError::FileRead {
                path: self.path.to_path_buf(),
                source,
            })),
        }
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| StatsError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
