//! Buffered stream copy used when writing archive entries.
//!
//! One [`CopyBuffer`] is allocated per archive and reused for every entry,
//! so packing thousands of small modules does not allocate per file.

use std::io::Read;
use std::io::Write;
use std::io::{self};

use crate::PackError;
use crate::ProgressCallback;

/// Buffer size for I/O operations (64KB).
const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Reusable buffer for copying entry data.
///
/// # Examples
///
/// ```no_run
/// # use pyzip_core::copy::{CopyBuffer, copy_with_buffer};
/// # use pyzip_core::PackError;
/// # fn example() -> Result<(), PackError> {
/// let mut buffer = CopyBuffer::new();
/// let mut input = std::fs::File::open("os.py")?;
/// let mut output = std::fs::File::create("os.py.bak")?;
///
/// let bytes_copied = copy_with_buffer(&mut input, &mut output, &mut buffer)?;
/// println!("Copied {} bytes", bytes_copied);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CopyBuffer {
    buf: Box<[u8]>,
}

impl CopyBuffer {
    /// Creates a new zeroed copy buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: vec![0u8; COPY_BUFFER_SIZE].into_boxed_slice(),
        }
    }

    /// Returns the buffer size in bytes.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.buf.len()
    }
}

impl Default for CopyBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies data from reader to writer using the provided reusable buffer.
///
/// Returns the total number of bytes copied.
///
/// # Errors
///
/// Returns an error if reading or writing fails. Interrupted reads are
/// retried.
#[inline]
pub fn copy_with_buffer<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    buffer: &mut CopyBuffer,
) -> Result<u64, PackError> {
    copy_chunks(reader, writer, buffer, |_| {})
}

/// Like [`copy_with_buffer`], reporting every chunk to `progress`.
///
/// # Errors
///
/// Returns an error if reading or writing fails.
pub fn copy_with_progress<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    buffer: &mut CopyBuffer,
    progress: &mut dyn ProgressCallback,
) -> Result<u64, PackError> {
    copy_chunks(reader, writer, buffer, |n| progress.on_bytes_written(n))
}

fn copy_chunks<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    buffer: &mut CopyBuffer,
    mut on_chunk: impl FnMut(u64),
) -> Result<u64, PackError> {
    let mut total: u64 = 0;

    loop {
        let bytes_read = match reader.read(&mut buffer.buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(PackError::Io(e)),
        };

        writer.write_all(&buffer.buf[..bytes_read])?;
        on_chunk(bytes_read as u64);
        total = total.saturating_add(bytes_read as u64);
    }

    Ok(total)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::path::Path;

    #[derive(Default)]
    struct ByteCounter {
        chunks: usize,
        bytes: u64,
    }

    impl ProgressCallback for ByteCounter {
        fn on_entry_start(&mut self, _path: &Path, _total: usize, _current: usize) {}

        fn on_bytes_written(&mut self, bytes: u64) {
            self.chunks += 1;
            self.bytes += bytes;
        }

        fn on_entry_complete(&mut self, _path: &Path) {}

        fn on_complete(&mut self) {}
    }

    #[test]
    fn test_copy_buffer_size() {
        assert_eq!(CopyBuffer::new().size(), 64 * 1024);
        assert_eq!(CopyBuffer::default().size(), 64 * 1024);
    }

    #[test]
    fn test_copy_empty_source() {
        let mut buffer = CopyBuffer::new();
        let mut input = Cursor::new(Vec::<u8>::new());
        let mut output = Vec::new();

        let copied = copy_with_buffer(&mut input, &mut output, &mut buffer).unwrap();
        assert_eq!(copied, 0);
        assert!(output.is_empty());
    }

    #[test]
    fn test_copy_multiple_chunks() {
        let mut buffer = CopyBuffer::new();
        let input_data = vec![0x55u8; COPY_BUFFER_SIZE * 3 + 1000];
        let mut input = Cursor::new(&input_data);
        let mut output = Vec::new();

        let copied = copy_with_buffer(&mut input, &mut output, &mut buffer).unwrap();
        assert_eq!(copied, input_data.len() as u64);
        assert_eq!(output, input_data);
    }

    #[test]
    fn test_copy_reports_progress() {
        let mut buffer = CopyBuffer::new();
        let input_data = vec![7u8; COPY_BUFFER_SIZE + 10];
        let mut input = Cursor::new(&input_data);
        let mut output = Vec::new();
        let mut counter = ByteCounter::default();

        copy_with_progress(&mut input, &mut output, &mut buffer, &mut counter).unwrap();
        assert_eq!(counter.bytes, input_data.len() as u64);
        assert!(counter.chunks >= 2);
    }

    #[test]
    fn test_copy_with_interrupted_reads() {
        use std::io::Error;
        use std::io::ErrorKind;

        struct InterruptedReader {
            data: Vec<u8>,
            position: usize,
            calls: usize,
        }

        impl Read for InterruptedReader {
            fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
                self.calls += 1;
                if self.calls % 2 == 1 && self.position < self.data.len() {
                    return Err(Error::new(ErrorKind::Interrupted, "interrupted"));
                }
                let remaining = self.data.len() - self.position;
                let to_read = remaining.min(buf.len()).min(100);
                buf[..to_read].copy_from_slice(&self.data[self.position..self.position + to_read]);
                self.position += to_read;
                Ok(to_read)
            }
        }

        let data = vec![0x42u8; 1000];
        let mut reader = InterruptedReader {
            data: data.clone(),
            position: 0,
            calls: 0,
        };
        let mut buffer = CopyBuffer::new();
        let mut output = Vec::new();

        copy_with_buffer(&mut reader, &mut output, &mut buffer).unwrap();
        assert_eq!(output, data);
    }

    #[test]
    fn test_copy_with_write_failure() {
        struct FailingWriter;

        impl Write for FailingWriter {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("disk full"))
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut input = Cursor::new(vec![1u8; 10]);
        let mut buffer = CopyBuffer::new();
        let result = copy_with_buffer(&mut input, &mut FailingWriter, &mut buffer);
        assert!(matches!(result, Err(PackError::Io(_))));
    }
}
