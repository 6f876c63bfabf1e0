use crate::{MonkeyError, Result};
use std::fs::{File, OpenOptions};
use std::io::{self, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Write side of the scratch file.
///
/// Every block is followed by an fsync so the device, not the page cache,
/// absorbs the write before the caller stops its timer.
pub struct ScratchWriter {
    file: File,
    path: PathBuf,
}

impl ScratchWriter {
    /// Create the scratch file, truncating any existing content
    pub fn create(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(MonkeyError::io(format!(
                "creating scratch file {}",
                path.display()
            )))?;

        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    /// Append a block at the current position and flush it to the device
    pub fn write_block(&mut self, buf: &[u8]) -> io::Result<()> {
        self.file.write_all(buf)?;
        self.file.sync_all()
    }

    /// Current length of the file on disk
    pub fn file_size(&self) -> io::Result<u64> {
        Ok(self.file.metadata()?.len())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Read side of the scratch file
pub struct ScratchReader {
    file: File,
}

impl ScratchReader {
    /// Open an existing scratch file read-only
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .open(path)
            .map_err(MonkeyError::io(format!(
                "opening scratch file {}",
                path.display()
            )))?;

        Ok(Self { file })
    }

    /// Seek to `offset` and read up to `buf.len()` bytes.
    ///
    /// Returns 0 only at end of file.
    pub fn read_block_at(&mut self, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
        self.file.seek(SeekFrom::Start(offset))?;
        fill_buffer(&mut self.file, buf)
    }
}

/// Read until `buf` is full or the reader reports end of file.
///
/// Short reads are continued and `Interrupted` is retried, as
/// `Read::read_exact` does; unlike it, a partial block is not an error.
pub fn fill_buffer<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
