//! Bounded-size chunking of the input file list.
//!
//! Operating systems cap the byte length of a command line, so a large file
//! list is split into chunks and the tool is invoked once per chunk.

use super::error::{Error, Result};

/// Lazy iterator yielding chunks of at most `chunk_size` items.
///
/// Single-pass and forward-only: items are pulled from the underlying
/// iterator as each chunk is requested. Order and duplicates are preserved,
/// every chunk except possibly the last is full, and an empty input yields
/// no chunks at all.
pub struct Chunks<I: Iterator> {
    iter: I,
    chunk_size: usize,
}

/// Wraps `items` in a [`Chunks`] iterator.
///
/// Fails if `chunk_size` is zero; no chunk is ever produced in that case.
pub fn chunks<I>(items: I, chunk_size: usize) -> Result<Chunks<I::IntoIter>>
where
    I: IntoIterator,
{
    if chunk_size == 0 {
        return Err(Error::GenericError(format!(
            "chunk size must be positive: [{chunk_size}]"
        )));
    }
    Ok(Chunks {
        iter: items.into_iter(),
        chunk_size,
    })
}

impl<I: Iterator> Iterator for Chunks<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.iter.next()?;

        // cap the pre-allocation so a huge chunk size cannot balloon memory
        let mut chunk = Vec::with_capacity(self.chunk_size.min(2048));
        chunk.push(first);
        while chunk.len() < self.chunk_size {
            match self.iter.next() {
                Some(item) => chunk.push(item),
                None => break,
            }
        }
        Some(chunk)
    }
}
