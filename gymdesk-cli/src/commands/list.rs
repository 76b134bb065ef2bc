//! Print registered students

use anyhow::{Context, Result};
use clap::Parser;
use gymdesk_core::Student;
use gymdesk_server::{ensure_schema, Database, StudentRepo};

use super::{resolve_config, DatabaseArgs};

#[derive(Parser, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub db: DatabaseArgs,

    /// Output JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub async fn run_list(args: ListArgs) -> Result<()> {
    let config = resolve_config(args.db.database, None)?;
    let db = Database::new(&config.database_path);

    ensure_schema(&db).await.context("Failed to open student store")?;
    let students = StudentRepo::new(&db)
        .list_all()
        .await
        .context("Failed to list students")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&students)?);
    } else if students.is_empty() {
        println!("No students registered yet.");
    } else {
        print!("{}", format_table(&students));
    }

    Ok(())
}

const HEADERS: [&str; 4] = ["ID", "NAME", "BIRTH DATE", "NATIONAL ID"];

fn format_table(students: &[Student]) -> String {
    let rows: Vec<[String; 4]> = students
        .iter()
        .map(|s| {
            [
                s.id.to_string(),
                s.name.clone(),
                s.birth_date.clone(),
                s.national_id.clone(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: [&str; 4]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect();
        padded.join("  ").trim_end().to_string() + "\n"
    };

    let mut out = line(HEADERS);
    for row in &rows {
        out.push_str(&line([
            row[0].as_str(),
            row[1].as_str(),
            row[2].as_str(),
            row[3].as_str(),
        ]));
    }
    out
}
