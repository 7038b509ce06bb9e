use std::path::Path;

use nota_core::db::Repository;

use crate::commands::common::open_store;
use crate::error::CliError;

pub fn run_init(sample_data: bool, db_path: &Path) -> Result<(), CliError> {
    let store = open_store(db_path)?;
    let mut repo = Repository::open(store)?;

    if sample_data {
        if repo.seed_sample_data()? {
            println!("Seeded starter folders and notes");
        } else {
            println!("Store already has data; nothing seeded");
        }
    }

    println!("Store ready at {}", db_path.display());
    Ok(())
}
