use crate::cmd::{Format, ParseArgs};
use crate::config::Config;
use anyhow::{Context, Result};
use blocktag::{Block, BlockTagError, Parser};
use std::io;
use tokio::fs;
use tracing::debug;

pub async fn run_parse_command(args: ParseArgs) -> Result<()> {
    let config = match args.config.as_deref() {
        Some(path) => Config::load(path)
            .await
            .context("failed to load config")?,
        None => Config::default(),
    }
    .with_single(&args.single);
    let parser = Parser::new(&config.styles);

    let (blocks, error) = read_blocks(parser, args.file.as_str()).await?;
    debug!("parsed {} blocks from {}", blocks.len(), args.file);

    let blocks = filter_blocks(blocks, args.name.as_deref());
    println!("{}", render_blocks(&blocks, args.format)?);

    match error {
        Some(e) => Err(anyhow::Error::new(e).context("failed to parse content")),
        None => Ok(()),
    }
}

/// Stream blocks out of `file`, `-` for stdin.
///
/// A parse error does not fail here: it comes back next to the blocks completed before it.
async fn read_blocks(
    parser: Parser<'_>,
    file: &str,
) -> Result<(Vec<Block>, Option<BlockTagError>)> {
    let result = if file == "-" {
        parser.parse_reader(io::stdin().lock())
    } else {
        let content = fs::File::open(file)
            .await
            .context("when opening content file")?
            .into_std()
            .await;
        parser.parse_reader(content)
    };

    let ret = match result {
        Ok(blocks) => (blocks, None),
        Err(partial) => {
            let (blocks, error) = partial.into_parts();
            (blocks, Some(error))
        }
    };
    Ok(ret)
}

/// Keep blocks named `name`, or all of them if `None`.
fn filter_blocks(blocks: Vec<Block>, name: Option<&str>) -> Vec<Block> {
    match name {
        Some(name) => blocks.into_iter().filter(|x| x.tag.name == name).collect(),
        None => blocks,
    }
}

fn render_blocks(blocks: &[Block], format: Format) -> Result<String> {
    let output = match format {
        Format::Json => serde_json::to_string_pretty(blocks).context("when serializing blocks")?,
        Format::Debug => format!("{blocks:#?}"),
        Format::Source => blocks
            .iter()
            .map(Block::to_string)
            .collect::<Vec<_>>()
            .join("\n"),
    };
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use blocktag::{parse, TagStyles};

    #[test]
    fn test_filter_blocks() {
        let blocks = parse("[a]1[/a][b]2[/b][a]3[/a]").unwrap();
        let kept = filter_blocks(blocks.clone(), Some("a"));
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|x| x.tag.name == "a"));
        assert_eq!(filter_blocks(blocks, None).len(), 3);
    }

    #[test]
    fn test_render_json() {
        let blocks = parse("x[info uid=1]test[/info]y").unwrap();
        let output = render_blocks(&blocks, Format::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(output.as_str()).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{
                "tag": { "name": "info", "attrs": { "uid": "1" } },
                "body": "test",
            }])
        );
    }

    #[test]
    fn test_render_source() {
        let blocks = parse("[info]test[/info] [code]a[b]c[/code]").unwrap();
        assert_eq!(
            render_blocks(&blocks, Format::Source).unwrap(),
            "[info]test[/info]\n[code]a[b]c[/code]"
        );
    }

    #[tokio::test]
    async fn test_read_blocks_keeps_blocks_before_invalid_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"[a]1[/a]\n[b]\xff[/b]").unwrap();
        let styles = TagStyles::new();
        let (blocks, error) = read_blocks(Parser::new(&styles), file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(blocks, parse("[a]1[/a]").unwrap());
        assert!(matches!(error, Some(BlockTagError::Io(_))));
    }

    #[tokio::test]
    async fn test_read_blocks_missing_file() {
        let styles = TagStyles::new();
        assert!(read_blocks(Parser::new(&styles), "/nonexistent/post.txt")
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_run_parse_command_reports_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"[a]1[/a][b]unclosed").unwrap();
        let args = ParseArgs {
            file: file.path().to_str().unwrap().to_string(),
            config: None,
            single: vec![],
            name: None,
            format: Format::Json,
        };
        assert!(run_parse_command(args).await.is_err());
    }

    #[tokio::test]
    async fn test_run_parse_command() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"[hr][a]1[/a]").unwrap();
        let args = ParseArgs {
            file: file.path().to_str().unwrap().to_string(),
            config: None,
            single: vec!["hr".to_string()],
            name: Some("a".to_string()),
            format: Format::Source,
        };
        run_parse_command(args).await.unwrap();
    }
}
