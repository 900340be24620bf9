//! Handlers for the four lifecycle commands: start, pause, end, status.

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::lifecycle;
use crate::db;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::utils::time::format_ms;
use chrono::Utc;

pub fn handle_start(cfg: &Config, user_id: i64) -> AppResult<()> {
    let mut pool = db::open(&cfg.database)?;
    let id = lifecycle::start(&mut pool, cfg, user_id, Utc::now())?;
    success(format!("Segment {id} started."));
    Ok(())
}

pub fn handle_pause(cmd: &Commands, cfg: &Config, user_id: i64) -> AppResult<()> {
    if let Commands::Pause { note } = cmd {
        let mut pool = db::open(&cfg.database)?;
        let outcome = lifecycle::pause(&mut pool, cfg, user_id, note, Utc::now())?;
        if outcome.discarded {
            warning(format!(
                "Segment too short ({} s), discarded.",
                outcome.short_seconds.unwrap_or(0)
            ));
        } else {
            success("Segment closed.");
        }
    }
    Ok(())
}

pub fn handle_end(cmd: &Commands, cfg: &Config, user_id: i64) -> AppResult<()> {
    if let Commands::End { note } = cmd {
        let mut pool = db::open(&cfg.database)?;
        let outcome = lifecycle::end_workday(&mut pool, cfg, user_id, note, Utc::now())?;
        if outcome.nothing_logged {
            warning("Nothing logged yet today.");
        } else if outcome.quota_met() {
            success(format!(
                "Workday complete: {} worked.",
                format_ms(outcome.worked_ms)
            ));
        } else {
            warning(format!(
                "More time required: {} worked, {} missing.",
                format_ms(outcome.worked_ms),
                format_ms(outcome.remaining_ms)
            ));
        }
    }
    Ok(())
}

pub fn handle_status(cmd: &Commands, cfg: &Config, user_id: i64) -> AppResult<()> {
    if let Commands::Status { json } = cmd {
        let mut pool = db::open(&cfg.database)?;
        let report = lifecycle::status(&mut pool, cfg, user_id, Utc::now())?;

        if *json {
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }

        if let Some(msg) = &report.cutoff_message {
            warning(msg);
        }
        info(format!(
            "Worked today: {}",
            format_ms(report.worked_today_ms)
        ));
        match report.open_segment_start {
            Some(start) => {
                let local = start.with_timezone(&cfg.tz()?);
                info(format!("Segment running since {}", local.format("%H:%M:%S")));
            }
            None => info("No segment running."),
        }
    }
    Ok(())
}
