use crate::cli::parser::UserAction;
use crate::config::Config;
use crate::core::admin;
use crate::db::{self, users};
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn handle(action: &UserAction, cfg: &Config, user_id: i64) -> AppResult<()> {
    match action {
        UserAction::Add {
            name,
            vacation_days,
        } => {
            let pool = db::open(&cfg.database)?;
            let id = users::insert_user(&pool.conn, name, *vacation_days)?;
            success(format!(
                "User {id} ('{name}') created with {vacation_days} vacation days."
            ));
        }

        UserAction::List => {
            let pool = db::open(&cfg.database)?;
            let all = users::list_users(&pool.conn)?;
            if all.is_empty() {
                info("No users yet.");
                return Ok(());
            }
            for u in all {
                println!("{:>4}: {:<20} {} vacation days", u.id, u.name, u.vacation_days);
            }
        }

        UserAction::Allowance { days } => {
            let mut pool = db::open(&cfg.database)?;
            admin::set_vacation_allowance(&mut pool, user_id, *days)?;
            success(format!("Vacation allowance of user {user_id} set to {days} days."));
        }
    }
    Ok(())
}
