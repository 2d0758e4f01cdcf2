use crate::error::Result;
use std::io::{self, BufRead};
use std::vec;

/// Scanner on a stream of characters.
///
/// The cursor only moves forward, every character is consumed exactly once.
pub(crate) struct Scanner<I> {
    /// Characters source.
    source: I,

    /// Count of characters consumed so far.
    position: usize,

    /// The source ran out.
    done: bool,
}

impl<I> Scanner<I>
where
    I: Iterator<Item = io::Result<char>>,
{
    pub(crate) fn new(source: I) -> Self {
        Self {
            source,
            position: 0,
            done: false,
        }
    }

    /// Move the position forward and return the character walked through.
    ///
    /// Return `None` if already finished.
    fn next(&mut self) -> Result<Option<char>> {
        if self.done {
            return Ok(None);
        }
        match self.source.next() {
            Some(ch) => {
                let ch = ch?;
                self.position += 1;
                Ok(Some(ch))
            }
            None => {
                self.done = true;
                Ok(None)
            }
        }
    }

    /// Consume characters until `delimiter`.
    ///
    /// Returns the text walked through, excluding the delimiter itself, and whether the delimiter
    /// was found. When the input ends first, the text collected so far is still returned along
    /// with `false`.
    pub(crate) fn advance_to(&mut self, delimiter: char) -> Result<(String, bool)> {
        let mut text = String::new();
        while let Some(ch) = self.next()? {
            if ch == delimiter {
                return Ok((text, true));
            }
            text.push(ch);
        }
        Ok((text, false))
    }

    /// Characters consumed so far, delimiters included.
    pub(crate) fn position(&self) -> usize {
        self.position
    }
}

/// Characters read from a [`BufRead`].
///
/// Input is decoded one line at a time. Lines end on `\n`, which never occurs inside a multi-byte
/// UTF-8 sequence, so characters are never split. Invalid UTF-8 yields an
/// [`io::ErrorKind::InvalidData`] error and ends the iteration.
pub struct ReaderChars<R> {
    reader: R,

    /// Decoded characters of the current line not yet handed out.
    pending: vec::IntoIter<char>,

    finished: bool,
}

impl<R: BufRead> ReaderChars<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: Vec::new().into_iter(),
            finished: false,
        }
    }
}

impl<R: BufRead> Iterator for ReaderChars<R> {
    type Item = io::Result<char>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(ch) = self.pending.next() {
                return Some(Ok(ch));
            }
            if self.finished {
                return None;
            }

            let mut line = vec![];
            match self.reader.read_until(b'\n', &mut line) {
                Ok(0) => {
                    self.finished = true;
                    return None;
                }
                Ok(_) => match String::from_utf8(line) {
                    Ok(line) => self.pending = line.chars().collect::<Vec<_>>().into_iter(),
                    Err(e) => {
                        self.finished = true;
                        return Some(Err(io::Error::new(io::ErrorKind::InvalidData, e)));
                    }
                },
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            }
        }
    }
}
