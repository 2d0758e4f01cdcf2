use crate::block::Block;
use std::io;

#[derive(Debug, thiserror::Error)]
pub enum BlockTagError {
    /// Tag header has no fields at all, like `[]` or `[   ]`.
    #[error("empty tag")]
    EmptyTag,

    /// Malformed markup.
    ///
    /// * 0: what went wrong.
    #[error("syntax error: {0}")]
    SyntaxError(String),

    /// Failed to read from the input source.
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, BlockTagError>;

/// A parse that stopped on an error.
///
/// Blocks completed before the error are kept in [`PartialParse::blocks`].
#[derive(Debug, thiserror::Error)]
#[error("{error} (complete blocks before error: {count})", count = .blocks.len())]
pub struct PartialParse {
    /// Blocks fully parsed before the failure, in source order.
    pub blocks: Vec<Block>,

    /// The error that stopped the scan.
    #[source]
    pub error: BlockTagError,
}

impl PartialParse {
    /// Split into the partial blocks and the error.
    pub fn into_parts(self) -> (Vec<Block>, BlockTagError) {
        (self.blocks, self.error)
    }
}
