//! Supervisor corrections: insert, edit, delete and list segments with
//! explicit wall-clock times.

use crate::cli::parser::SegmentAction;
use crate::config::Config;
use crate::core::admin;
use crate::core::calculator::worked;
use crate::db;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use crate::utils::date::parse_date;
use crate::utils::time::{format_ms, parse_local_datetime};
use chrono::Utc;

pub fn handle(action: &SegmentAction, cfg: &Config, user_id: i64) -> AppResult<()> {
    match action {
        SegmentAction::Add { start, end, note } => {
            let start = parse_local_datetime(start)?;
            let end = end.as_deref().map(parse_local_datetime).transpose()?;
            let mut pool = db::open(&cfg.database)?;
            let id = admin::add_segment(&mut pool, cfg, user_id, start, end, note)?;
            success(format!("Segment {id} inserted."));
        }

        SegmentAction::Edit {
            id,
            start,
            end,
            note,
        } => {
            let start = start.as_deref().map(parse_local_datetime).transpose()?;
            let end = end.as_deref().map(parse_local_datetime).transpose()?;
            let mut pool = db::open(&cfg.database)?;
            admin::edit_segment(&mut pool, cfg, user_id, *id, start, end, note.as_deref())?;
            success(format!("Segment {id} updated."));
        }

        SegmentAction::Del { id } => {
            let mut pool = db::open(&cfg.database)?;
            admin::delete_segment(&mut pool, user_id, *id)?;
            success(format!("Segment {id} deleted."));
        }

        SegmentAction::List { date } => {
            let day = parse_date(date).ok_or_else(|| AppError::InvalidDate(date.clone()))?;
            let tz = cfg.tz()?;
            let now = Utc::now();
            let pool = db::open(&cfg.database)?;
            let segments = worked::segments_for_day(&pool.conn, user_id, day, tz)?;
            if segments.is_empty() {
                info(format!("No segments on {day}."));
                return Ok(());
            }
            for s in segments {
                let start = s.start_time.with_timezone(&tz).format("%H:%M:%S");
                let end = match s.end_time {
                    Some(e) => e.with_timezone(&tz).format("%H:%M:%S").to_string(),
                    None => "open".to_string(),
                };
                println!(
                    "{:>4}: {start} .. {end:<8} {}  {}",
                    s.id,
                    format_ms(s.duration_ms(now)),
                    s.note
                );
            }
        }
    }
    Ok(())
}
