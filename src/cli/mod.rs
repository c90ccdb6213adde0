mod output;
mod theme;

use crate::model::{ApplicationPatch, DEFAULT_STATUS, NewApplication};
use crate::store::{ListFilter, Store, StoreError, resolve_store_path, transfer};
use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use std::fs;
use std::io;
use std::path::PathBuf;

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_COMMIT_HASH"), ")");

#[derive(Parser)]
#[command(
    name = "apptrack",
    version,
    long_version = LONG_VERSION,
    about = "Track job applications"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    #[arg(long, env = "APPTRACK_STORE", value_name = "PATH")]
    store_path: Option<PathBuf>,
    #[arg(long, env = "APPTRACK_CLI_CONFIG", value_name = "PATH")]
    cli_config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    Init,
    Add(AddArgs),
    List(ListArgs),
    Update(UpdateArgs),
    Stats,
    Export(ExportArgs),
    Import(ImportArgs),
    Delete(DeleteArgs),
    Completions(CompletionsArgs),
}

#[derive(Args)]
struct AddArgs {
    #[arg(long)]
    company: String,
    #[arg(long)]
    role: String,
    #[arg(long, default_value = "")]
    location: String,
    #[arg(long, default_value = "")]
    date: String,
    #[arg(long, default_value = DEFAULT_STATUS)]
    status: String,
    #[arg(long, default_value = "")]
    source: String,
    #[arg(long, default_value = "")]
    salary: String,
    #[arg(long, default_value = "")]
    notes: String,
}

#[derive(Args)]
struct ListArgs {
    #[arg(long)]
    status: Option<String>,
    #[arg(long)]
    company: Option<String>,
}

#[derive(Args)]
struct UpdateArgs {
    id: i64,
    #[arg(long)]
    company: Option<String>,
    #[arg(long)]
    role: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    date: Option<String>,
    #[arg(long)]
    status: Option<String>,
    #[arg(long)]
    source: Option<String>,
    #[arg(long)]
    salary: Option<String>,
    #[arg(long)]
    notes: Option<String>,
}

#[derive(Args)]
struct ExportArgs {
    #[arg(long, default_value = "applications.csv", value_name = "PATH")]
    file: PathBuf,
}

#[derive(Args)]
struct ImportArgs {
    #[arg(long, value_name = "PATH")]
    file: PathBuf,
}

#[derive(Args)]
struct DeleteArgs {
    id: i64,
}

#[derive(Args)]
struct CompletionsArgs {
    #[arg(value_enum)]
    shell: Shell,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Completions(args)) => {
            generate_completions(args.shell);
            Ok(())
        }
        None => {
            Cli::command()
                .print_help()
                .context("unable to print help")?;
            Ok(())
        }
        Some(command) => {
            let store_path = resolve_store_path(cli.store_path)?;
            let store = Store::new(store_path);

            match command {
                Commands::Init => init_store(&store),
                Commands::Add(args) => add_application(&store, args),
                Commands::List(args) => list_applications(&store, args, cli.cli_config),
                Commands::Update(args) => update_application(&store, args),
                Commands::Stats => show_stats(&store, cli.cli_config),
                Commands::Export(args) => export_applications(&store, args),
                Commands::Import(args) => import_applications(&store, args),
                Commands::Delete(args) => delete_application(&store, args),
                Commands::Completions(_) => unreachable!(),
            }
        }
    }
}

fn init_store(store: &Store) -> Result<()> {
    if let Some(parent) = store.path().parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("unable to create store directory {}", parent.display()))?;
    }
    store.init()?;
    println!("Initialized store at {}", store.path().display());
    Ok(())
}

fn add_application(store: &Store, args: AddArgs) -> Result<()> {
    let application = NewApplication {
        company: args.company,
        role: args.role,
        location: args.location,
        date_applied: args.date,
        status: args.status,
        source: args.source,
        salary: args.salary,
        notes: args.notes,
    };
    match store.add(&application) {
        Ok(id) => {
            println!("Added application {} for {}", id, application.company);
            Ok(())
        }
        Err(StoreError::Validation(message)) => {
            println!("{message}");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

fn list_applications(store: &Store, args: ListArgs, cli_config: Option<PathBuf>) -> Result<()> {
    let filter = ListFilter {
        status: args.status,
        company: args.company,
    };
    let applications = store.list(&filter)?;
    let theme = theme::load_cli_theme(cli_config)?;
    output::print_applications(&applications, &theme);
    Ok(())
}

fn update_application(store: &Store, args: UpdateArgs) -> Result<()> {
    let patch = ApplicationPatch {
        company: args.company,
        role: args.role,
        location: args.location,
        date_applied: args.date,
        status: args.status,
        source: args.source,
        salary: args.salary,
        notes: args.notes,
    };
    match store.update(args.id, &patch) {
        Ok(()) => {
            println!("Updated application {}", args.id);
            Ok(())
        }
        Err(StoreError::NotFound(id)) => {
            println!("No application with id {id}");
            Ok(())
        }
        Err(StoreError::NoChanges) => {
            println!("No updates provided.");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

fn show_stats(store: &Store, cli_config: Option<PathBuf>) -> Result<()> {
    let counts = store.stats()?;
    let theme = theme::load_cli_theme(cli_config)?;
    output::print_stats(&counts, &theme);
    Ok(())
}

fn export_applications(store: &Store, args: ExportArgs) -> Result<()> {
    let written = transfer::export(store, &args.file)?;
    if written == 0 {
        println!("No data to export.");
    } else {
        println!("Exported {} applications to {}", written, args.file.display());
    }
    Ok(())
}

fn import_applications(store: &Store, args: ImportArgs) -> Result<()> {
    let imported = transfer::import(store, &args.file)?;
    println!("Imported {} applications from {}", imported, args.file.display());
    Ok(())
}

fn delete_application(store: &Store, args: DeleteArgs) -> Result<()> {
    store.delete(args.id)?;
    println!("Deleted application {}", args.id);
    Ok(())
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "apptrack", &mut io::stdout());
}
