use std::io::Read;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::warn;

use sab_core::NameKind;

/// Ask the configured chat model for a descriptive file or folder name.
///
/// Configuration comes from `AI_RENAME_*` environment variables (or `.env`).
/// The original name is printed whenever renaming is disabled or fails.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    target: Target,
}

#[derive(Subcommand, Debug)]
enum Target {
    /// Rename a file, keeping its extension.
    File(NameArgs),
    /// Name a folder (e.g. a media group).
    Folder(NameArgs),
}

#[derive(clap::Args, Debug)]
struct NameArgs {
    /// Message text describing the content. Use '-' to read it from stdin.
    #[arg(short, long)]
    text: String,

    /// Original file name, or default folder name.
    name: String,
}

impl Target {
    fn into_parts(self) -> (NameKind, NameArgs) {
        match self {
            Target::File(args) => (NameKind::File, args),
            Target::Folder(args) => (NameKind::Folder, args),
        }
    }
}

fn read_text(text: String) -> anyhow::Result<String> {
    if text != "-" {
        return Ok(text);
    }
    let mut buf = String::new();
    std::io::stdin()
        .lock()
        .read_to_string(&mut buf)
        .context("Failed to read message text from stdin")?;
    Ok(buf.trim_end().to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    sab_core::logging::init("sab")?;

    let (kind, args) = cli.target.into_parts();
    let text = read_text(args.text)?;

    let generator = sab_openai::shared()
        .await
        .context("Failed to set up the name generator")?;

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_signal.cancel();
        }
    });

    let (name, err) = generator
        .generate(kind, &cancel, &text, &args.name)
        .await
        .into_parts();
    if let Some(err) = err {
        warn!("keeping original name: {err}");
    }

    println!("{name}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_file_and_folder_targets() {
        let cli = Cli::try_parse_from(["sab", "file", "--text", "Q3 deck", "deck.pptx"]).unwrap();
        let (kind, args) = cli.target.into_parts();
        assert_eq!(kind, NameKind::File);
        assert_eq!(args.text, "Q3 deck");
        assert_eq!(args.name, "deck.pptx");

        let cli = Cli::try_parse_from(["sab", "folder", "-t", "trip", "album_3"]).unwrap();
        let (kind, _) = cli.target.into_parts();
        assert_eq!(kind, NameKind::Folder);
    }

    #[test]
    fn text_is_required() {
        assert!(Cli::try_parse_from(["sab", "file", "deck.pptx"]).is_err());
    }

    #[test]
    fn literal_text_is_passed_through() {
        assert_eq!(read_text("hello".to_string()).unwrap(), "hello");
    }
}
