//! Upstream byte sources feeding a [`CompressionStream`](crate::CompressionStream).

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Pull-style readable upstream.
///
/// The adapter opens the source once, reads from it whenever its input buffer
/// runs dry, and closes it during teardown. `read` follows the
/// [`Read::read`] contract: `Ok(0)` means the source is exhausted.
pub trait ByteSource {
    /// Prepares the source for reading.
    fn open(&mut self) -> io::Result<()>;

    /// Reads up to `buf.len()` bytes.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Releases the source. Must tolerate repeated calls.
    fn close(&mut self);
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn open(&mut self) -> io::Result<()> {
        (**self).open()
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        (**self).read(buf)
    }

    fn close(&mut self) {
        (**self).close();
    }
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    fn open(&mut self) -> io::Result<()> {
        (**self).open()
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        (**self).read(buf)
    }

    fn close(&mut self) {
        (**self).close();
    }
}

/// Adapts any [`Read`] implementation. Opening and closing are no-ops.
#[derive(Debug)]
pub struct ReaderSource<R> {
    inner: R,
}

impl<R: Read> ReaderSource<R> {
    /// Wraps `reader`.
    pub const fn new(reader: R) -> Self {
        Self { inner: reader }
    }

    /// Returns an immutable reference to the wrapped reader.
    pub const fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Returns a mutable reference to the wrapped reader.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Consumes the source and returns the wrapped reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> ByteSource for ReaderSource<R> {
    fn open(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }

    fn close(&mut self) {}
}

/// File opened lazily on [`ByteSource::open`] and dropped on close.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    file: Option<File>,
}

impl FileSource {
    /// Records `path` without touching the filesystem.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: None,
        }
    }

    /// Returns the path this source reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reports whether the file handle is currently open.
    pub const fn is_open(&self) -> bool {
        self.file.is_some()
    }
}

impl ByteSource for FileSource {
    fn open(&mut self) -> io::Result<()> {
        let file = File::open(&self.path).map_err(|error| {
            io::Error::new(
                error.kind(),
                format!("failed to open {}: {error}", self.path.display()),
            )
        })?;
        self.file = Some(file);
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.file.as_mut() {
            Some(file) => file.read(buf),
            None => Err(io::Error::new(
                io::ErrorKind::NotConnected,
                format!("{} is not open", self.path.display()),
            )),
        }
    }

    fn close(&mut self) {
        self.file = None;
    }
}
