//! Filepath: src/infra/io.rs
//! File primitives consumed by the extraction core:
//! - Whole-file text loading (memory-mapped above 1 MiB)
//! - A line reader that skips blank lines and can be dropped early

use memmap2::Mmap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

const MMAP_THRESHOLD: u64 = 1024 * 1024; // 1 MiB

pub enum FileContent {
    Mapped(Mmap),
    Buffered(Vec<u8>),
}

impl FileContent {
    /// Decode as UTF-8, replacing invalid sequences.
    pub fn into_text(self) -> String {
        match self {
            FileContent::Mapped(mmap) => String::from_utf8_lossy(&mmap).into_owned(),
            FileContent::Buffered(bytes) => match String::from_utf8(bytes) {
                Ok(s) => s,
                Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
            },
        }
    }
}

pub fn read_file_smart<P: AsRef<Path>>(path: P) -> io::Result<FileContent> {
    let path = path.as_ref();
    let metadata = std::fs::metadata(path)?;

    if metadata.len() > MMAP_THRESHOLD {
        let file = File::open(path)?;

        // Safety: the mapping is read-only and dropped before this run ends
        let mmap = unsafe { Mmap::map(&file) }?;

        Ok(FileContent::Mapped(mmap))
    } else {
        Ok(FileContent::Buffered(std::fs::read(path)?))
    }
}

/// Read a whole file as text.
pub fn load_text<P: AsRef<Path>>(path: P) -> io::Result<String> {
    read_file_smart(path).map(FileContent::into_text)
}

/// Line iterator over a reader that splits on `\n`, `\r\n` or a lone `\r`
/// and never yields empty lines. Whitespace-only lines are still yielded.
/// Invalid UTF-8 is replaced, as in `load_text`.
pub struct NonBlankLines<R> {
    reader: R,
    buf: Vec<u8>,
}

impl NonBlankLines<BufReader<File>> {
    /// Open `path` for line-wise reading. The handle closes when the
    /// iterator is dropped, including after an early `break`.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead> NonBlankLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }

    /// Fill `buf` with the bytes up to the next `\n` or `\r`, consuming the
    /// terminator. Returns `Ok(false)` at end of input with nothing read.
    fn read_segment(&mut self) -> io::Result<bool> {
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
            read_any = true;

            // "\r\n" splits twice; the empty segment between is dropped as blank
            match memchr::memchr2(b'\n', b'\r', available) {
                Some(i) => {
                    self.buf.extend_from_slice(&available[..i]);
                    self.reader.consume(i + 1);
                    return Ok(true);
                }
                None => {
                    let n = available.len();
                    self.buf.extend_from_slice(available);
                    self.reader.consume(n);
                }
            }
        }
    }
}

impl<R: BufRead> Iterator for NonBlankLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.read_segment() {
                Ok(false) => return None,
                Ok(true) if self.buf.is_empty() => continue,
                Ok(true) => return Some(Ok(String::from_utf8_lossy(&self.buf).into_owned())),
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
