use crate::db::pool::DbPool;
use crate::db::queries::load_site_changes;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::date::format_internet_datetime;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) COUNTS
    //
    let locations: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM locations", [], |row| row.get(0))?;
    let entries = load_site_changes(&pool.conn)?;
    let active = entries.iter().filter(|e| e.is_active()).count();

    println!(
        "{}• Locations:{} {}{}{}",
        CYAN, RESET, GREEN, locations, RESET
    );
    println!(
        "{}• Site changes:{} {}{}{} ({} active)",
        CYAN,
        RESET,
        GREEN,
        entries.len(),
        RESET,
        active
    );

    //
    // 3) DATE RANGE
    //
    let first = entries.iter().map(|e| e.start_time).min();
    let last = entries.iter().map(|e| e.start_time).max();

    let fmt = |d: Option<chrono::DateTime<chrono::Utc>>| {
        d.map(|d| format_internet_datetime(&d))
            .unwrap_or_else(|| format!("{GREY}--{RESET}"))
    };

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt(first));
    println!("    to:   {}", fmt(last));

    println!();
    Ok(())
}
