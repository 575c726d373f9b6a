use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use cuetree::Cue as _;

#[derive(Parser, Debug)]
#[command(name = "cuetree", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the visit order of a tree.
    Traverse(TraverseArgs),
    /// Play a scene and print its events as JSON lines.
    Play(PlayArgs),
    /// Seek a scene to a time and print the resulting cue states.
    Seek(SeekArgs),
}

#[derive(Parser, Debug)]
struct TraverseArgs {
    /// Input tree JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Traversal order.
    #[arg(long, value_enum, default_value_t = Order::Bfs)]
    order: Order,

    /// Start vertex (defaults to the root).
    #[arg(long)]
    start: Option<usize>,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Play once even if the scene asks to loop.
    #[arg(long)]
    no_loop: bool,
}

#[derive(Parser, Debug)]
struct SeekArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Scene time to seek to.
    #[arg(long)]
    time: f64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Order {
    Bfs,
    DfsDiscover,
    DfsFinish,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Traverse(args) => cmd_traverse(args),
        Command::Play(args) => cmd_play(args),
        Command::Seek(args) => cmd_seek(args),
    }
}

fn read_to_string(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("open '{}'", path.display()))
}

fn read_scene(path: &Path) -> anyhow::Result<cuetree::BuiltScene> {
    let s = read_to_string(path)?;
    let def = cuetree::SceneDef::from_json_str(&s).with_context(|| "parse scene JSON")?;
    Ok(def.build()?)
}

fn cmd_traverse(args: TraverseArgs) -> anyhow::Result<()> {
    let s = read_to_string(&args.in_path)?;
    let def = cuetree::TreeDef::from_json_str(&s).with_context(|| "parse tree JSON")?;
    let tree = std::sync::Arc::new(def.build()?);
    let start = args.start.map(cuetree::VertexId);

    let order: Vec<usize> = match args.order {
        Order::Bfs => {
            let mut it = cuetree::TreeBfsIterator::with_tree(tree);
            it.set_start_vertex(start);
            it.map(|v| v.0).collect()
        }
        Order::DfsDiscover | Order::DfsFinish => {
            let mode = match args.order {
                Order::DfsFinish => cuetree::DfsMode::Finish,
                _ => cuetree::DfsMode::Discover,
            };
            let mut it = cuetree::TreeDfsIterator::with_mode(mode);
            it.set_tree(Some(tree));
            it.set_start_vertex(start);
            it.map(|v| v.0).collect()
        }
    };

    let line = order
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(",");
    println!("{line}");
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let mut built = read_scene(&args.in_path)?;
    if args.no_loop {
        built.scene.set_loop(false);
    }

    built.scene.add_play_observer(|e| {
        if let Ok(s) = serde_json::to_string(&serde_json::json!({ "scene": e })) {
            println!("{s}");
        }
    });
    for (name, cue) in &built.cues {
        let name = name.clone();
        cue.borrow_mut().add_observer(move |e| {
            if let Ok(mut v) = serde_json::to_value(e) {
                v["cue"] = serde_json::Value::String(name.clone());
                println!("{v}");
            }
        });
    }

    built.scene.play()?;
    Ok(())
}

fn cmd_seek(args: SeekArgs) -> anyhow::Result<()> {
    let mut built = read_scene(&args.in_path)?;
    built.scene.set_animation_time(args.time)?;

    println!("scene: {:?}", built.scene.cue_state());
    for (name, cue) in &built.cues {
        let cue = cue.borrow();
        println!(
            "{name}: {:?} at {}",
            cue.cue_state(),
            cue.core().animation_time()
        );
    }
    Ok(())
}
