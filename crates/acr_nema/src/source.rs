//! Byte source with look-ahead
//!
//! The decoder has to look at a record header before deciding whether to consume
//! it (the group-id ceiling and strict-mode errors both stop in front of the
//! record), so any reader is wrapped in a small pushback buffer.

use std::fs::File;
use std::io::{self, ErrorKind, Read};
use std::path::Path;

use crate::error::{AcrError, Result};

const READ_CHUNK: usize = 8 * 1024;

/// Largest single read, so a bogus length does not allocate ahead of the data
const MAX_READ_CHUNK: usize = 1024 * 1024;

/// Sequential reader that can peek ahead without consuming
#[derive(Debug)]
pub struct Source<R> {
    inner: R,
    buf: Vec<u8>,
    pos: usize,
    consumed: u64,
    eof: bool,
}

impl Source<Box<dyn Read>> {
    /// Open a named file, or standard input for `None` and `"-"`
    pub fn open(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) if p.as_os_str() != "-" => {
                let file = File::open(p).map_err(|e| AcrError::open(p, e))?;
                tracing::debug!("Opened {}", p.display());
                Ok(Source::new(Box::new(file) as Box<dyn Read>))
            }
            _ => {
                tracing::debug!("Reading from standard input");
                Ok(Source::new(Box::new(io::stdin()) as Box<dyn Read>))
            }
        }
    }
}

impl<R: Read> Source<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: Vec::new(),
            pos: 0,
            consumed: 0,
            eof: false,
        }
    }

    /// Buffer up to `n` bytes ahead of the read position.
    ///
    /// Returns how many of those `n` bytes are available; fewer than `n` means the
    /// underlying reader reached end of stream.
    pub fn fill(&mut self, n: usize) -> io::Result<usize> {
        while self.available() < n && !self.eof {
            if self.pos > 0 {
                self.buf.drain(..self.pos);
                self.pos = 0;
            }
            let start = self.buf.len();
            let want = (n - start).clamp(READ_CHUNK, MAX_READ_CHUNK);
            self.buf.resize(start + want, 0);
            match self.inner.read(&mut self.buf[start..]) {
                Ok(0) => {
                    self.buf.truncate(start);
                    self.eof = true;
                }
                Ok(read) => self.buf.truncate(start + read),
                Err(e) if e.kind() == ErrorKind::Interrupted => self.buf.truncate(start),
                Err(e) => {
                    self.buf.truncate(start);
                    return Err(e);
                }
            }
        }
        Ok(self.available().min(n))
    }

    /// Bytes buffered ahead of the read position
    pub fn peek(&self) -> &[u8] {
        &self.buf[self.pos..]
    }

    /// Advance the read position by `n` buffered bytes
    pub fn consume(&mut self, n: usize) {
        let n = n.min(self.available());
        self.pos += n;
        self.consumed += n as u64;
        if self.pos == self.buf.len() {
            self.buf.clear();
            self.pos = 0;
        }
    }

    /// Copy out and consume `n` buffered bytes
    pub fn take(&mut self, n: usize) -> Vec<u8> {
        let n = n.min(self.available());
        let bytes = self.buf[self.pos..self.pos + n].to_vec();
        self.consume(n);
        bytes
    }

    /// Total bytes consumed so far
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    fn available(&self) -> usize {
        self.buf.len() - self.pos
    }
}
