//! Create the student table without starting the server

use anyhow::{Context, Result};
use gymdesk_server::{ensure_schema, Database};

use super::{resolve_config, DatabaseArgs};

pub async fn run_init(args: DatabaseArgs) -> Result<()> {
    let config = resolve_config(args.database, None)?;
    let db = Database::new(&config.database_path);

    ensure_schema(&db).await.with_context(|| {
        format!(
            "Failed to create student table in {}",
            config.database_path.display()
        )
    })?;

    println!("✅ Student table ready at {}", config.database_path.display());
    Ok(())
}
