//! Nota CLI - folder-organized notes from the terminal
//!
//! Wraps the core repository, filter, and image pipeline behind a small
//! command surface with a persisted login gate.

mod cli;
mod commands;
mod error;
#[cfg(test)]
mod tests;

use clap::{CommandFactory, Parser};

use crate::cli::{Cli, Commands, FolderCommands};
use crate::commands::attach::{run_attach, run_detach};
use crate::commands::auth_cmd::{run_login, run_logout, run_status};
use crate::commands::completions::run_completions;
use crate::commands::common::resolve_db_path;
use crate::commands::delete::run_delete;
use crate::commands::edit::run_edit;
use crate::commands::folder_cmd::{run_folder_add, run_folder_delete, run_folder_list};
use crate::commands::init::run_init;
use crate::commands::list::run_list;
use crate::commands::add::run_add;
use crate::commands::search::run_search;
use crate::commands::view::run_view;
use crate::error::CliError;

fn main() {
    if let Err(error) = run() {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("nota=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let db_path = resolve_db_path(cli.db_path);

    match cli.command {
        Some(Commands::Login { username, password }) => run_login(&username, &password, &db_path),
        Some(Commands::Logout) => run_logout(&db_path),
        Some(Commands::Status) => run_status(&db_path),
        Some(Commands::Init { sample_data }) => run_init(sample_data, &db_path),
        Some(Commands::Add {
            title,
            content,
            folder,
        }) => run_add(&title, &content, folder.as_deref(), &db_path),
        Some(Commands::List { folder, json }) => run_list(folder.as_deref(), json, &db_path),
        Some(Commands::Search {
            query,
            folder,
            json,
        }) => run_search(&query, folder.as_deref(), json, &db_path),
        Some(Commands::View { id }) => run_view(&id, &db_path),
        Some(Commands::Edit {
            id,
            title,
            content,
            folder,
            unfile,
        }) => run_edit(
            &id,
            title,
            content,
            folder.as_deref(),
            unfile,
            &db_path,
        ),
        Some(Commands::Delete { id }) => run_delete(&id, &db_path),
        Some(Commands::Folder { command }) => match command {
            FolderCommands::Add { name } => run_folder_add(&name, &db_path),
            FolderCommands::List { json } => run_folder_list(json, &db_path),
            FolderCommands::Delete { id } => run_folder_delete(&id, &db_path),
        },
        Some(Commands::Attach { id, image, region }) => {
            run_attach(&id, &image, region.as_deref(), &db_path)
        }
        Some(Commands::Detach { id }) => run_detach(&id, &db_path),
        Some(Commands::Completions { shell, output }) => {
            run_completions(shell, output.as_deref())
        }
        None => {
            Cli::command().print_help().map_err(CliError::Io)?;
            println!();
            Ok(())
        }
    }
}
