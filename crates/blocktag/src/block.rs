use crate::error::{BlockTagError, PartialParse, Result};
use crate::scanner::{ReaderChars, Scanner};
use crate::style::{Style, TagStyles};
use crate::tag::{parse_tag, Tag};
use crate::{CLOSE, OPEN};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, BufReader, Read};
use tracing::{debug, trace};

/// One tag occurrence: `[tag attr=value]body[/tag]`, or `[tag]` for [`Style::Single`] tags.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Parsed header of the opening tag.
    pub tag: Tag,

    /// Raw text between the opening and the closing tag.
    ///
    /// Bracketed content that does not close this block is kept verbatim. `None` for
    /// [`Style::Single`] tags.
    pub body: Option<String>,
}

/// Render back into markup.
///
/// Parsing the output with the same [`TagStyles`] gives back an equal block.
impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{OPEN}{}{CLOSE}", self.tag)?;
        if let Some(body) = &self.body {
            write!(f, "{body}{OPEN}/{}{CLOSE}", self.tag.name)?;
        }
        Ok(())
    }
}

/// Extract blocks from bracket markup.
///
/// Only a flat sequence is produced: once a block is open, everything up to its own closing tag
/// is body text, including other tags. Text outside of blocks is dropped.
#[derive(Clone, Copy, Debug)]
pub struct Parser<'a> {
    styles: &'a TagStyles,
}

impl<'a> Parser<'a> {
    /// Parser deciding which tags are self-closing by `styles`.
    pub fn new(styles: &'a TagStyles) -> Self {
        Self { styles }
    }

    /// Parse all blocks in `text`.
    ///
    /// # Errors
    ///
    /// On malformed markup, returns the blocks completed before the error together with it.
    #[tracing::instrument(skip_all)]
    pub fn parse_str(&self, text: &str) -> std::result::Result<Vec<Block>, PartialParse> {
        self.parse_source(text.chars().map(Ok))
    }

    /// Same as [`Parser::parse_str`] on a sequence of characters.
    #[tracing::instrument(skip_all)]
    pub fn parse_chars<I>(&self, chars: I) -> std::result::Result<Vec<Block>, PartialParse>
    where
        I: IntoIterator<Item = char>,
    {
        self.parse_source(chars.into_iter().map(Ok))
    }

    /// Same as [`Parser::parse_str`] on UTF-8 text read from `reader`.
    ///
    /// Read failures and invalid UTF-8 are reported as [`BlockTagError::Io`].
    #[tracing::instrument(skip_all)]
    pub fn parse_reader<R: Read>(
        &self,
        reader: R,
    ) -> std::result::Result<Vec<Block>, PartialParse> {
        self.parse_source(ReaderChars::new(BufReader::new(reader)))
    }

    fn parse_source<I>(&self, source: I) -> std::result::Result<Vec<Block>, PartialParse>
    where
        I: Iterator<Item = io::Result<char>>,
    {
        let mut scanner = Scanner::new(source);
        let mut blocks = vec![];

        loop {
            match self.read_block(&mut scanner) {
                Ok(Some(block)) => blocks.push(block),
                Ok(None) => break,
                Err(error) => {
                    debug!(
                        "parse stopped at character {} after {} blocks: {error}",
                        scanner.position(),
                        blocks.len()
                    );
                    return Err(PartialParse { blocks, error });
                }
            }
        }

        debug!("parsed {} blocks", blocks.len());
        Ok(blocks)
    }

    /// Read the next block.
    ///
    /// Return `None` when the input ends before another `[`.
    fn read_block<I>(&self, scanner: &mut Scanner<I>) -> Result<Option<Block>>
    where
        I: Iterator<Item = io::Result<char>>,
    {
        // Text before the tag is not part of any block.
        let (_, found) = scanner.advance_to(OPEN)?;
        if !found {
            return Ok(None);
        }

        let open = scanner.position() - 1;
        let (_, tag) = read_header(scanner)?;

        if self.styles.style(&tag.name) == Style::Single {
            trace!("single tag {:?}", tag.name);
            return Ok(Some(Block { tag, body: None }));
        }
        trace!("open tag {:?}", tag.name);

        let mut body = String::new();
        loop {
            let (text, found) = scanner.advance_to(OPEN)?;
            body.push_str(&text);
            if !found {
                return Err(BlockTagError::SyntaxError(format!(
                    "tag {:?} opened at character {open} is never closed",
                    tag.name
                )));
            }

            let (header, inner) = read_header(scanner)?;
            if inner.closing_name() == Some(tag.name.as_str()) {
                trace!("close tag {:?}", tag.name);
                return Ok(Some(Block {
                    tag,
                    body: Some(body),
                }));
            }

            // Not ours, keep it as text.
            trace!("pass through [{header}] in tag {:?}", tag.name);
            body.push(OPEN);
            body.push_str(&header);
            body.push(CLOSE);
        }
    }
}

/// Read the header after an already consumed `[`, returning its raw text and the parsed tag.
fn read_header<I>(scanner: &mut Scanner<I>) -> Result<(String, Tag)>
where
    I: Iterator<Item = io::Result<char>>,
{
    let start = scanner.position();
    let (header, found) = scanner.advance_to(CLOSE)?;
    if !found {
        return Err(BlockTagError::SyntaxError(format!(
            "'{OPEN}' at character {} is never closed by '{CLOSE}'",
            start - 1
        )));
    }
    let tag = parse_tag(&header)?;
    Ok((header, tag))
}

/// Parse all blocks in `text`, with every tag requiring a closing tag.
///
/// See [`Parser::parse_str`].
pub fn parse(text: &str) -> std::result::Result<Vec<Block>, PartialParse> {
    Parser::new(&TagStyles::new()).parse_str(text)
}
