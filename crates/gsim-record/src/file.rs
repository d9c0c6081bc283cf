//! The `.ggr` on-disk format: 4-byte magic `"MMGR"`, 4-byte
//! version, then a sequence of self-delimited length-prefixed records, ended
//! by a `TERMINATE` record.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{RecordError, RecordResult};
use crate::event::RecordEvent;

/// `"MMGR"` as a big-endian u32.
pub const MAGIC: u32 = 0x4D4D_4752;
pub const VERSION: u32 = 0x0000_0001;

/// The writer only accepts paths ending in `.ggr`; a missing extension is
/// appended automatically.
pub fn normalize_ggr_path(path: &Path) -> PathBuf {
    if path.extension().is_some_and(|ext| ext == "ggr") {
        return path.to_path_buf();
    }
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".ggr");
    path.with_file_name(name)
}

pub struct GgrWriter {
    inner: BufWriter<File>,
}

impl GgrWriter {
    /// Create a new recording file. Fails [`RecordError::FileExists`] if the
    /// (normalized) path already exists.
    pub fn create(path: &Path) -> RecordResult<Self> {
        let path = normalize_ggr_path(path);
        if path.exists() {
            return Err(RecordError::FileExists(path));
        }
        let file = File::options().write(true).create_new(true).open(&path)?;
        let mut inner = BufWriter::new(file);
        inner.write_u32::<BigEndian>(MAGIC)?;
        inner.write_u32::<BigEndian>(VERSION)?;
        Ok(Self { inner })
    }

    pub fn write_event(&mut self, event: &RecordEvent) -> RecordResult<()> {
        let bytes = bincode::serialize(event)?;
        self.inner.write_u32::<BigEndian>(bytes.len() as u32)?;
        self.inner.write_all(&bytes)?;
        Ok(())
    }

    pub fn flush(&mut self) -> RecordResult<()> {
        self.inner.flush()?;
        Ok(())
    }
}

pub struct GgrReader {
    inner: BufReader<File>,
    #[allow(dead_code)]
    version: u32,
}

impl GgrReader {
    /// Open a recording file for replay. Version mismatches are tolerated as
    /// long as the magic is correct and every opcode encountered is known;
    /// a bad magic is always a hard failure.
    pub fn open(path: &Path) -> RecordResult<Self> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                RecordError::NotFound(format!("recording file {}", path.display()))
            } else {
                RecordError::Io(e)
            }
        })?;
        let mut inner = BufReader::new(file);
        let magic = inner.read_u32::<BigEndian>()?;
        if magic != MAGIC {
            return Err(RecordError::BadMagic(magic));
        }
        let version = inner.read_u32::<BigEndian>()?;
        Ok(Self { inner, version })
    }

    /// Read the next record, or `Ok(None)` at end of stream.
    pub fn read_event(&mut self) -> RecordResult<Option<RecordEvent>> {
        let len = match self.inner.read_u32::<BigEndian>() {
            Ok(len) => len,
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut buf = vec![0u8; len as usize];
        self.inner.read_exact(&mut buf)?;
        let event: RecordEvent = bincode::deserialize(&buf)?;
        Ok(Some(event))
    }
}
