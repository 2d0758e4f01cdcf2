//! Extract flat `[tag attr=value]body[/tag]` blocks from bracket markup.
//!
//! ```
//! use blocktag::{parse, Parser, TagStyles};
//!
//! let blocks = parse("B[info]test[title]xx[/title][/info]E").unwrap();
//! assert_eq!(blocks.len(), 1);
//! assert_eq!(blocks[0].tag.name, "info");
//! assert_eq!(blocks[0].body.as_deref(), Some("test[title]xx[/title]"));
//!
//! let styles = TagStyles::with_single(["hr"]);
//! let blocks = Parser::new(&styles).parse_str("[hr][b]x[/b]").unwrap();
//! assert_eq!(blocks[0].body, None);
//! ```

mod block;
mod error;
mod scanner;
mod style;
mod tag;

pub use block::{parse, Block, Parser};
pub use error::{BlockTagError, PartialParse, Result};
pub use scanner::ReaderChars;
pub use style::{Style, TagStyles};
pub use tag::{parse_tag, Tag, SHORTHAND_KEY};

const OPEN: char = '[';
const CLOSE: char = ']';
