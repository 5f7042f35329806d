use clap::Parser;
use dom::Document;
use dom::debug::outline;
use render::{CustomTags, Node, RenderConfig, Renderer};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "sprout")]
#[command(about = "Render a JSON node tree into a document and print its outline")]
struct Cli {
    /// JSON file to render; reads stdin when omitted
    input: Option<PathBuf>,

    /// Maximum number of outline lines
    #[arg(long, default_value = "200")]
    cap: usize,

    /// Truncate the text of malformed nodes to this many characters
    #[arg(long)]
    malformed_preview: Option<usize>,

    /// Tag used for pending values
    #[arg(long, default_value = "await")]
    await_kind: String,
}

fn read_input(path: Option<&PathBuf>) -> std::io::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    let source = match read_input(cli.input.as_ref()) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Error: failed to read input: {err}");
            return ExitCode::from(2);
        }
    };
    let value: serde_json::Value = match serde_json::from_str(&source) {
        Ok(value) => value,
        Err(err) => {
            eprintln!("Error: input is not JSON: {err}");
            return ExitCode::from(2);
        }
    };

    let config = RenderConfig {
        await_kind: Arc::from(cli.await_kind.as_str()),
        malformed_preview_chars: cli.malformed_preview,
    };
    let tags = CustomTags::with_await(&cli.await_kind);
    let renderer = Renderer::with_config(config).with_tags(tags);

    let mut doc = Document::new();
    let body = doc.body();
    let rendered = match renderer.render_into(&mut doc, Node::from_json(value), body) {
        Ok(rendered) => rendered,
        Err(err) => {
            eprintln!("Error: render failed: {err}");
            return ExitCode::FAILURE;
        }
    };
    log::info!("rendered {} root node(s), {} live nodes", rendered.nodes().len(), doc.live_count());

    match doc.to_tree(doc.root()) {
        Ok(tree) => {
            for line in outline(&tree, cli.cap) {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
