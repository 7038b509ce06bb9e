use std::path::Path;

use nota_core::auth;
use nota_core::db::Repository;

use crate::commands::common::open_store;
use crate::error::CliError;

pub fn run_login(username: &str, password: &str, db_path: &Path) -> Result<(), CliError> {
    let mut store = open_store(db_path)?;
    auth::login(&mut store, username, password)?;
    println!("Logged in as {username}");
    Ok(())
}

pub fn run_logout(db_path: &Path) -> Result<(), CliError> {
    let mut store = open_store(db_path)?;
    auth::logout(&mut store)?;
    println!("Logged out");
    Ok(())
}

pub fn run_status(db_path: &Path) -> Result<(), CliError> {
    let store = open_store(db_path)?;
    let logged_in = auth::is_logged_in(&store)?;
    let repo = Repository::open(store)?;

    println!("Logged in: {}", if logged_in { "yes" } else { "no" });
    println!("Notes:     {}", repo.list_notes().len());
    println!("Folders:   {}", repo.list_folders().len());
    println!("Store:     {}", db_path.display());
    Ok(())
}
