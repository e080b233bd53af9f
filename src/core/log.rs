use crate::db::log::load_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;
use regex::Regex;
use std::sync::OnceLock;

const OP_TARGET_MAX: usize = 60;

fn strip_ansi(s: &str) -> String {
    static ANSI: OnceLock<Option<Regex>> = OnceLock::new();
    match ANSI.get_or_init(|| Regex::new(r"\x1B\[[0-9;]*[mK]").ok()) {
        Some(re) => re.replace_all(s, "").into_owned(),
        None => s.to_string(),
    }
}

/// Colour per logged operation.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "change" => Colour::Green,
        "del" => Colour::Red,
        "edit" => Colour::Yellow,
        "import" => Colour::Cyan,
        "export" => Colour::Blue,
        "locations" => Colour::Cyan,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// Truncate to `max` visible characters, ending with "..." when cut.
fn truncate_visible(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &mut DbPool) -> AppResult<()> {
        let lines = load_log(&pool.conn)?;

        let entries: Vec<_> = lines
            .into_iter()
            .map(|line| {
                let date = chrono::DateTime::parse_from_rfc3339(&line.date)
                    .map(|dt| dt.format("%FT%T%:z").to_string())
                    .unwrap_or(line.date);

                let op_target = if line.target.is_empty() {
                    line.operation.clone()
                } else {
                    format!("{} ({})", line.operation, line.target)
                };

                (line.id, date, line.operation, op_target, line.message)
            })
            .collect();

        let op_w = entries
            .iter()
            .map(|(_, _, _, op_target, _)| op_target.chars().count())
            .max()
            .unwrap_or(10)
            .min(OP_TARGET_MAX);
        let id_w = entries
            .iter()
            .map(|(id, ..)| id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries
            .iter()
            .map(|(_, date, ..)| date.len())
            .max()
            .unwrap_or(10);

        for (id, date, operation, op_target, message) in entries {
            let color = color_for_operation(&operation);
            let visible = truncate_visible(&op_target, OP_TARGET_MAX);

            // only the operation word is coloured
            let rendered = match visible.split_once(' ') {
                Some((op_word, rest)) => format!("{} {}", color.paint(op_word), rest),
                None => color.paint(visible.as_str()).to_string(),
            };

            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&rendered).chars().count()));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                id,
                date,
                rendered,
                padding,
                message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
