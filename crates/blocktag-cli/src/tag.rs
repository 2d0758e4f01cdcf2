use crate::cmd::TagArgs;
use anyhow::{Context, Result};
use blocktag::parse_tag;

pub fn run_tag_command(args: TagArgs) -> Result<()> {
    let tag = parse_tag(args.header.as_str()).context("invalid tag header")?;
    println!("{}", serde_json::to_string_pretty(&tag)?);
    Ok(())
}
