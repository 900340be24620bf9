use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::{report, vacation};
use crate::db;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;
use crate::utils::date::{month_bounds, parse_date, parse_month};
use crate::utils::time::format_ms;
use chrono::{Datelike, Utc};

pub fn handle_report(cmd: &Commands, cfg: &Config, user_id: i64) -> AppResult<()> {
    if let Commands::Report { month, day, json } = cmd {
        let tz = cfg.tz()?;
        let now = Utc::now();

        let (from, to) = if let Some(d) = day {
            let date = parse_date(d).ok_or_else(|| AppError::InvalidDate(d.clone()))?;
            (date, date)
        } else if let Some(m) = month {
            let first = parse_month(m).ok_or_else(|| AppError::InvalidDate(m.clone()))?;
            month_bounds(first.year(), first.month())
        } else {
            let today = now.with_timezone(&tz).date_naive();
            month_bounds(today.year(), today.month())
        };

        let pool = db::open(&cfg.database)?;
        let entries = report::period_report(
            &pool.conn,
            user_id,
            from,
            to,
            tz,
            cfg.hours_per_vacation_day,
            now,
        )?;

        if *json {
            println!("{}", serde_json::to_string_pretty(&entries)?);
            return Ok(());
        }

        if entries.is_empty() {
            info(format!("No entries between {from} and {to}."));
            return Ok(());
        }

        println!("📅 Report {from} .. {to}:\n");
        let mut total_ms = 0;
        let mut total_vacation = 0;
        for e in &entries {
            let vacation = if e.vacation_hours > 0 {
                format!("  vacation {:>2} h", e.vacation_hours)
            } else {
                String::new()
            };
            println!(
                "{}  worked {}  ({} segment{}){}",
                e.date,
                format_ms(e.worked_ms),
                e.segments.len(),
                if e.segments.len() == 1 { "" } else { "s" },
                vacation
            );
            total_ms += e.worked_ms;
            total_vacation += e.vacation_hours;
        }
        println!();
        info(format!(
            "Total: {} worked, {} vacation hours credited.",
            format_ms(total_ms),
            total_vacation
        ));
    }
    Ok(())
}

pub fn handle_vacation(cmd: &Commands, cfg: &Config, user_id: i64) -> AppResult<()> {
    if let Commands::Vacation { year } = cmd {
        let tz = cfg.tz()?;
        let year = year.unwrap_or_else(|| Utc::now().with_timezone(&tz).year());
        let pool = db::open(&cfg.database)?;
        let remaining = vacation::remaining_vacation_days(
            &pool.conn,
            user_id,
            year,
            cfg.hours_per_vacation_day,
        )?;
        info(format!(
            "Remaining vacation allowance for {year}: {remaining:.1} day(s)."
        ));
    }
    Ok(())
}
