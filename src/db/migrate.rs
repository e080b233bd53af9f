use crate::core::location_name::decode_legacy_words;
use crate::ui::messages::notice;
use rusqlite::{Connection, OptionalExtension, Result, params};

const ZONE_COLUMN_VERSION: &str = "20260110_0002_add_location_zone";
const BODY_PARTS_VERSION: &str = "location_body_parts";

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create the `locations` table. `is_custom` is derived from `body_part`
/// and deliberately has no column.
fn create_locations_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS locations (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            body_part   TEXT NOT NULL DEFAULT '',
            sub_area    TEXT,
            side        TEXT CHECK(side IS NULL OR side IN ('left','right')),
            zone        TEXT NOT NULL DEFAULT '',
            is_enabled  INTEGER NOT NULL DEFAULT 1,
            sort_order  INTEGER NOT NULL DEFAULT 0,
            created_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_locations_sort ON locations(sort_order);
        "#,
    )?;
    Ok(())
}

fn create_site_changes_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS site_changes (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            start_time   TEXT NOT NULL,
            end_time     TEXT,
            note         TEXT,
            location_id  INTEGER REFERENCES locations(id) ON DELETE SET NULL
        );

        CREATE INDEX IF NOT EXISTS idx_site_changes_start ON site_changes(start_time);
        CREATE INDEX IF NOT EXISTS idx_site_changes_location ON site_changes(location_id);
        "#,
    )?;
    Ok(())
}

/// Add the `zone` column to location tables created before it existed.
fn migrate_add_zone_column(conn: &Connection) -> Result<()> {
    let version = ZONE_COLUMN_VERSION;

    if is_applied(conn, version)? || table_has_column(conn, "locations", "zone")? {
        return Ok(());
    }

    conn.execute(
        "ALTER TABLE locations ADD COLUMN zone TEXT NOT NULL DEFAULT '';",
        [],
    )?;
    mark_applied(conn, version, "Added zone column to locations")?;

    notice(format!(
        "Migration applied: {} → added 'zone' to locations table",
        version
    ));
    Ok(())
}

/// Rows written by old versions only carry the free-text `zone`
/// ("Front Abdomen"). Split it with the legacy word-order rule.
///
/// Runs once per database. Rows that already hold a sub-area are left
/// alone, since an empty body part is a valid imported identity.
fn migrate_location_body_parts(conn: &Connection) -> Result<()> {
    if is_applied(conn, BODY_PARTS_VERSION)? {
        return Ok(());
    }

    let pending: Vec<(i64, String)> = {
        let mut stmt = conn.prepare(
            "SELECT id, zone FROM locations
             WHERE body_part = '' AND sub_area IS NULL AND TRIM(zone) <> ''",
        )?;
        let rows = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<Vec<_>>>()?;
        rows
    };

    if !pending.is_empty() {
        notice(format!(
            "Found {} location(s) without a body part, rebuilding from zone...",
            pending.len()
        ));
    }

    for (id, zone) in &pending {
        let (body_part, sub_area) = decode_legacy_words(zone);
        conn.execute(
            "UPDATE locations SET body_part = ?1, sub_area = ?2 WHERE id = ?3",
            params![body_part, sub_area, id],
        )?;
    }

    mark_applied(
        conn,
        BODY_PARTS_VERSION,
        &format!("Backfilled {} location(s) from legacy zone", pending.len()),
    )?;

    if !pending.is_empty() {
        notice(format!("Rebuilt body part for {} location(s).", pending.len()));
    }
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        params![version, message],
    )?;
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked every time a `DbPool` is opened.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    if !table_exists(conn, "locations")? {
        create_locations_table(conn)?;
        notice("Created locations table.");
    } else {
        migrate_add_zone_column(conn)?;
    }

    if !table_exists(conn, "site_changes")? {
        create_site_changes_table(conn)?;
        notice("Created site_changes table.");
    }

    migrate_location_body_parts(conn)?;

    Ok(())
}
