use anyhow::{Context, Result};
use livemark_config::{Config, PreviewConfig};
use livemark_engine::{
    Decoration, DecorationKind, Document, LivePreview, NullResolver, Placement, Resolver,
    Transaction, parsing::rope,
};
use std::{env, fs, path::PathBuf, process};

mod notes;

use notes::NotesDir;

const SNIPPET_LEN: usize = 40;

/// One update cycle plus its follow-up, rendered one decoration per line.
fn report<R: Resolver>(
    resolver: R,
    preview: PreviewConfig,
    doc: &Document,
    name: Option<String>,
    cursor: usize,
) -> Vec<String> {
    let mut live = LivePreview::new(resolver, preview);
    live.set_document_name(name);

    live.update(doc, &Transaction::user(cursor));
    if let Some(follow_up) = live.take_follow_up() {
        live.update(doc, &follow_up);
    }

    let mut lines = vec![];
    for decoration in live.inline_decorations() {
        lines.push(describe("inline", decoration, doc));
    }
    for decoration in live.block_decorations() {
        lines.push(describe("block", decoration, doc));
    }
    for span in live.atomic_ranges() {
        lines.push(format!("atomic {}..{}", span.start, span.end));
    }
    lines
}

fn describe(slot: &str, decoration: &Decoration, doc: &Document) -> String {
    let span = decoration.span;
    let source = rope::preview(doc.rope(), span, SNIPPET_LEN);
    let what = match &decoration.kind {
        DecorationKind::Mark { class } => format!("mark {class}"),
        DecorationKind::Replace { widget: None, .. } => "hide".to_string(),
        DecorationKind::Replace {
            widget: Some(widget),
            placement,
        } => {
            let placement = match placement {
                Placement::Inline => "replace",
                Placement::Block => "replace-block",
            };
            format!("{placement} {}", widget.to_html())
        }
    };
    format!("{slot} {}..{} {what} {source:?}", span.start, span.end)
}

fn load_config() -> Config {
    match Config::load() {
        Ok(Some(config)) => config,
        Ok(None) => Config::default(),
        Err(e) => {
            log::warn!("Failed to load config file, using defaults: {e}");
            Config::default()
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();
    if !(2..=3).contains(&args.len()) {
        eprintln!("Usage: {} <markdown-file> [cursor-offset]", args[0]);
        process::exit(1);
    }

    let path = PathBuf::from(&args[1]);
    let cursor = match args.get(2) {
        Some(raw) => raw
            .parse::<usize>()
            .with_context(|| format!("Invalid cursor offset '{raw}'"))?,
        None => 0,
    };

    let bytes = fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    let doc = Document::from_bytes(&bytes)
        .with_context(|| format!("{} is not valid UTF-8", path.display()))?;
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned());

    let config = load_config();
    let lines = match config.notes_path {
        Some(root) => {
            log::info!("Resolving links against {}", root.display());
            report(NotesDir::new(root), config.preview, &doc, name, cursor)
        }
        None => report(NullResolver, config.preview, &doc, name, cursor),
    };

    for line in lines {
        println!("{line}");
    }
    Ok(())
}
