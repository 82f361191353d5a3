//! dictstore CLI
//!
//! Manages tasks in a file-backed store from the command line.

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use dictstore::config::SnapshotSync;
use dictstore::task::{task_filter_factory, Task, TaskPatch};
use dictstore::{
    Config, DictService, FileHandler, JsonCodec, Params, PayloadCodec, PersistentService,
    Result, Service, ServiceBuilder,
};

/// dictstore CLI
#[derive(Parser, Debug)]
#[command(name = "dictstore-cli")]
#[command(about = "CLI for the dictstore task store")]
#[command(version)]
struct Args {
    /// Data directory
    #[arg(short, long, default_value = "./dictstore_data")]
    data_dir: String,

    /// Snapshot file name inside the data directory
    #[arg(long, default_value = "snapshot.dsnp")]
    snapshot_file: String,

    /// fsync every snapshot save
    #[arg(long)]
    sync: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new task
    Create {
        /// Task content
        #[arg(short, long)]
        content: String,
    },

    /// Show a task by key
    Select {
        /// The task key
        key: String,
    },

    /// Replace a task
    Update {
        /// The task key
        key: String,

        /// New content
        #[arg(short, long)]
        content: String,

        /// Mark as done
        #[arg(long)]
        done: bool,
    },

    /// Change some fields of a task
    Modify {
        /// The task key
        key: String,

        /// New content
        #[arg(short, long)]
        content: Option<String>,

        /// New done flag
        #[arg(long)]
        done: Option<bool>,
    },

    /// Remove a task by key
    Remove {
        /// The task key
        key: String,
    },

    /// List tasks
    Browse {
        /// Only tasks with this done flag
        #[arg(long)]
        done: Option<bool>,

        /// Only tasks whose content contains this text
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Delete all matching tasks
    Delete {
        /// Only tasks with this done flag
        #[arg(long)]
        done: Option<bool>,

        /// Only tasks whose content contains this text
        #[arg(short, long)]
        query: Option<String>,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,dictstore=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let sync = if args.sync {
        SnapshotSync::EveryWrite
    } else {
        SnapshotSync::OsBuffered
    };

    let config = Config::builder()
        .data_dir(&args.data_dir)
        .snapshot_file(&args.snapshot_file)
        .snapshot_sync(sync)
        .build();

    if let Err(e) = run(&config, args.command) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(config: &Config, command: Commands) -> Result<()> {
    let capacity = config.initial_capacity;
    let build: ServiceBuilder<Task> = Box::new(move || {
        DictService::with_capacity(task_filter_factory(), JsonCodec, capacity)
    });

    let handler = FileHandler::from_config(config, build)?;
    tracing::debug!("Snapshot file: {}", handler.path().display());

    let mut service = PersistentService::new(handler);
    let codec = JsonCodec;

    match command {
        Commands::Create { content } => {
            let payload = codec.encode(&Task::new(content))?;
            print_json(&service.create(&payload)?)
        }
        Commands::Select { key } => print_json(&service.select(&key)?),
        Commands::Update { key, content, done } => {
            let mut task = Task::new(content);
            task.key = key.clone();
            task.done = done;
            let payload = codec.encode(&task)?;
            print_json(&service.update(&key, &payload)?)
        }
        Commands::Modify { key, content, done } => {
            let patch = TaskPatch {
                content,
                created_at: None,
                done,
            };
            let payload = codec.encode(&patch)?;
            print_json(&service.modify(&key, &payload)?)
        }
        Commands::Remove { key } => print_json(&service.remove(&key)?),
        Commands::Browse { done, query } => {
            print_json(&service.browse(&filter_params(done, query))?)
        }
        Commands::Delete { done, query } => {
            print_json(&service.delete(&filter_params(done, query))?)
        }
    }
}

fn filter_params(done: Option<bool>, query: Option<String>) -> Params {
    let mut params = Params::new();
    if let Some(done) = done {
        params.insert("done", done.to_string());
    }
    if let Some(query) = query {
        params.insert("q", query);
    }
    params
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| dictstore::StoreError::Serialization(e.to_string()))?;
    println!("{}", text);
    Ok(())
}
