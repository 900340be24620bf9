use crate::db::{DbPool, audit};
use crate::errors::AppResult;
use ansi_term::Colour;

fn strip_ansi(s: &str) -> String {
    let re = regex::Regex::new(r"\x1B\[[0-9;]*[mK]").unwrap();
    re.replace_all(s, "").into_owned()
}

/// ANSI color per audit operation
fn color_for_operation(op: &str) -> Colour {
    match op {
        "start" => Colour::Green,
        "pause" | "end" => Colour::Yellow,
        "cutoff" => Colour::Purple,
        "absence_add" | "absence_del" => Colour::Cyan,
        "allowance" => Colour::Blue,
        "init" => Colour::RGB(255, 153, 51),
        other if other.starts_with("admin_") => Colour::Red,
        _ => Colour::White,
    }
}

pub struct LogView;

impl LogView {
    pub fn print_log(pool: &mut DbPool) -> AppResult<()> {
        let mut entries = Vec::new();
        for row in audit::list(&pool.conn)? {
            let date = chrono::DateTime::parse_from_rfc3339(&row.date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or(row.date);
            let op_target = if row.target.is_empty() {
                row.operation.clone()
            } else {
                format!("{} ({})", row.operation, row.target)
            };
            entries.push((row.id, date, row.operation, op_target, row.message));
        }

        let op_w = entries
            .iter()
            .map(|(_, _, _, op_target, _)| op_target.len())
            .max()
            .unwrap_or(10)
            .min(60);
        let id_w = entries
            .iter()
            .map(|(id, _, _, _, _)| id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries
            .iter()
            .map(|(_, date, _, _, _)| date.len())
            .max()
            .unwrap_or(10);

        println!("📜 Internal log:\n");

        for (id, date, operation, op_target, message) in entries {
            let color = color_for_operation(&operation);
            let colored = if let Some((op, rest)) = op_target.split_once(' ') {
                format!("{} {}", color.paint(op), rest)
            } else {
                color.paint(op_target.as_str()).to_string()
            };
            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&colored).len()));
            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                id,
                date,
                colored,
                padding,
                message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
