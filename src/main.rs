//! Group Cascade CLI
//!
//! Usage:
//!   group-cascade [OPTIONS] [FILE]
//!
//! Options:
//!   -c, --config <FILE>  Cascade configuration (TOML format)
//!   -a, --actions        Print every applied action
//!   --emit-scene         Print the final diagram as a scene TOML document
//!   -v, --verbose        Raise the log level (repeatable)
//!   -h, --help           Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use tracing::Level;

use group_cascade::{format_actions, format_diagram, run_scene, CascadeConfig, Scene};

#[derive(Parser)]
#[command(name = "group-cascade")]
#[command(about = "Replay rotate, resize and move gestures on nested diagram groups")]
struct Cli {
    /// Scene file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Cascade configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print every applied action, grouped by step
    #[arg(short, long)]
    actions: bool,

    /// Print the final diagram as a scene TOML document instead of a tree
    #[arg(long)]
    emit_scene: bool,

    /// Raise the log level: -v info, -vv debug, -vvv trace
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    // If no input file and stdin is a terminal (interactive), show intro help
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    let config = match &cli.config {
        Some(path) => match CascadeConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => CascadeConfig::default(),
    };

    let (source, filename) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let scene = match Scene::from_str(&source) {
        Ok(scene) => scene,
        Err(e) => {
            eprintln!("{}", e.format(&source, &filename));
            std::process::exit(1);
        }
    };

    let result = run_scene(&scene, &config);

    if cli.actions {
        for entry in &result.log {
            println!("# {}", entry.step);
            print!("{}", format_actions(&entry.actions));
        }
        println!();
    }

    if cli.emit_scene {
        match Scene::from_diagram(&result.diagram).to_toml() {
            Ok(text) => print!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        print!("{}", format_diagram(&result.diagram));
    }
}

fn print_intro() {
    println!(
        r#"Group Cascade - transform propagation for nested diagram groups

USAGE:
    group-cascade [OPTIONS] [FILE]
    cat scene.toml | group-cascade

OPTIONS:
    -c, --config <FILE>  Cascade configuration (TOML)
    -a, --actions        Print every applied action
    --emit-scene         Print the final diagram as scene TOML
    -v, --verbose        Raise the log level (repeatable)
    -h, --help           Print help

SCENE FORMAT:
    [[nodes]]
    id = "frame"
    x = 100.0              # center
    y = 100.0
    width = 200.0
    height = 100.0
    rotation = 0.0         # radians, optional

    [nodes.group]          # makes the node a group
    children = ["box"]
    transform_with_container = true
    is_restrict = false

    [[steps]]
    kind = "rotate"        # rotate | rotate_start | rotate_end
    target = "frame"       # resize | move | move_to
    degrees = 90.0         # or radians = ...

STEP FIELDS:
    rotate        radians or degrees
    resize        dx, dy, handle (0-7 clockwise from top-left, default 4)
    move          dx, dy
    move_to       x, y"#
    );
}
