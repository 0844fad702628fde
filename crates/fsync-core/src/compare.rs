//! Byte-for-byte file comparison
//!
//! Sizes are compared first so files of different length are rejected
//! without being opened. Equal-size files are streamed in fixed-size chunks
//! and compared chunk by chunk, stopping at the first difference.

use std::fs::File;
use std::io::{self, ErrorKind, Read};
use std::path::Path;

use crate::{Error, Result};

/// Default chunk size used when streaming file contents.
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

/// Something whose length is cheap to learn and whose bytes can be streamed.
pub trait ContentSource {
    type Reader: Read;

    /// Location reported in errors.
    fn location(&self) -> &Path;

    fn size(&self) -> io::Result<u64>;

    fn open(&self) -> io::Result<Self::Reader>;
}

impl ContentSource for &Path {
    type Reader = File;

    fn location(&self) -> &Path {
        self
    }

    fn size(&self) -> io::Result<u64> {
        Ok(std::fs::metadata(self)?.len())
    }

    fn open(&self) -> io::Result<File> {
        File::open(self)
    }
}

/// Whether files `a` and `b` hold identical bytes.
pub fn files_equal(a: &Path, b: &Path, chunk_size: usize) -> Result<bool> {
    contents_equal(&a, &b, chunk_size)
}

/// Whether two content sources hold identical bytes.
///
/// Read failures are errors, never a "not equal" answer.
pub fn contents_equal<A, B>(a: &A, b: &B, chunk_size: usize) -> Result<bool>
where
    A: ContentSource,
    B: ContentSource,
{
    let size_a = a.size().map_err(|e| Error::io(a.location(), e))?;
    let size_b = b.size().map_err(|e| Error::io(b.location(), e))?;
    if size_a != size_b {
        return Ok(false);
    }
    if size_a == 0 {
        return Ok(true);
    }

    let mut reader_a = a.open().map_err(|e| Error::io(a.location(), e))?;
    let mut reader_b = b.open().map_err(|e| Error::io(b.location(), e))?;

    let chunk_size = chunk_size.max(1);
    let mut buf_a = vec![0u8; chunk_size];
    let mut buf_b = vec![0u8; chunk_size];

    loop {
        let n_a = fill(&mut reader_a, &mut buf_a).map_err(|e| Error::io(a.location(), e))?;
        let n_b = fill(&mut reader_b, &mut buf_b).map_err(|e| Error::io(b.location(), e))?;

        if buf_a[..n_a] != buf_b[..n_b] {
            return Ok(false);
        }
        if n_a == 0 {
            return Ok(true);
        }
    }
}

/// Read until `buf` is full or the reader is exhausted.
fn fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
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
