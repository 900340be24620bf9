use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::DbPool;
use crate::db::migrate::{run_pending_migrations, schema_version};
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        info: show_info,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;

        if *migrate {
            info("Running migrations…");
            run_pending_migrations(&pool.conn)?;
            success("Migration completed.");
        }

        if *show_info {
            println!("Database: {}", cfg.database);
            println!("Schema version: {}", schema_version(&pool.conn)?);
            for table in ["users", "segments", "absences", "cutoff_notices", "log"] {
                let count: i64 =
                    pool.conn
                        .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))?;
                println!("{table:>15}: {count} rows");
            }
        }

        if *check {
            info("Running integrity check…");
            let integrity: String =
                pool.conn
                    .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;
            if integrity == "ok" {
                success("Integrity check passed.");
            } else {
                warning(format!("Integrity check failed: {integrity}"));
            }
        }
    }
    Ok(())
}
