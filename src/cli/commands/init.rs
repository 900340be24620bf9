use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db;
use crate::db::users;
use crate::errors::AppResult;
use crate::ui::messages::success;

/// Create config + database and seed the first user.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.clone(), cli.test)?;
    let pool = db::open(&cfg.database)?;
    users::ensure_default_user(&pool.conn)?;
    db::audit::record(&pool.conn, "init", "", "database initialized")?;

    if !cli.test {
        success(format!("Config file: {:?}", Config::config_file()));
    }
    success(format!("Database:    {}", cfg.database));
    Ok(())
}
