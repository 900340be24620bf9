use crate::cli::parser::AbsenceAction;
use crate::config::Config;
use crate::core::admin;
use crate::db::{self, absences};
use crate::errors::{AppError, AppResult};
use crate::models::absence::AbsenceKind;
use crate::ui::messages::{info, success};
use crate::utils::date::parse_date;

pub fn handle(action: &AbsenceAction, cfg: &Config, user_id: i64) -> AppResult<()> {
    match action {
        AbsenceAction::Add {
            start,
            end,
            kind,
            description,
        } => {
            let start =
                parse_date(start).ok_or_else(|| AppError::InvalidDate(start.clone()))?;
            let end = parse_date(end).ok_or_else(|| AppError::InvalidDate(end.clone()))?;
            let kind = AbsenceKind::from_input(kind)
                .ok_or_else(|| AppError::InvalidAbsenceKind(kind.clone()))?;

            let mut pool = db::open(&cfg.database)?;
            let id = admin::create_absence(&mut pool, user_id, start, end, kind, description)?;
            success(format!("Absence {id} recorded ({start} .. {end})."));
        }

        AbsenceAction::List => {
            let pool = db::open(&cfg.database)?;
            let records = absences::list_absences(&pool.conn, user_id)?;
            if records.is_empty() {
                info("No absences recorded.");
                return Ok(());
            }
            for a in records {
                println!(
                    "{:>4}: {} .. {}  {:<8} {}",
                    a.id,
                    a.start_date,
                    a.end_date,
                    a.kind.to_db_str(),
                    a.description
                );
            }
        }

        AbsenceAction::Del { id } => {
            let mut pool = db::open(&cfg.database)?;
            admin::delete_absence(&mut pool, user_id, *id)?;
            success(format!("Absence {id} deleted."));
        }
    }
    Ok(())
}
