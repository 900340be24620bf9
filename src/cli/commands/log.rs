use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logview::LogView;
use crate::db::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { print } = cmd
        && *print
    {
        let mut pool = DbPool::new(&cfg.database)?;
        LogView::print_log(&mut pool)?;
    }
    Ok(())
}
