use crate::errors::AppError;
use crate::errors::AppResult;
use crate::models::location::{Laterality, Location, LocationIdentity};
use crate::models::site_change::SiteChange;
use crate::utils::date::{format_storage_datetime, parse_internet_datetime};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, Result, Row, params};

fn conversion_error(err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(err))
}

fn parse_stored_time(raw: &str) -> Result<DateTime<Utc>> {
    parse_internet_datetime(raw).ok_or_else(|| conversion_error(AppError::InvalidDate(raw.to_string())))
}

pub fn map_location(row: &Row) -> Result<Location> {
    let side: Option<String> = row.get("side")?;
    let laterality = match side.as_deref() {
        None => None,
        Some(s) => Some(Laterality::from_db_str(s).ok_or_else(|| {
            conversion_error(AppError::InvalidLaterality(s.to_string()))
        })?),
    };

    Ok(Location {
        id: row.get("id")?,
        identity: LocationIdentity {
            body_part: row.get("body_part")?,
            sub_area: row.get("sub_area")?,
            laterality,
        },
        is_enabled: row.get::<_, i32>("is_enabled")? == 1,
        sort_order: row.get("sort_order")?,
    })
}

pub fn map_site_change(row: &Row) -> Result<SiteChange> {
    let start_raw: String = row.get("start_time")?;
    let end_raw: Option<String> = row.get("end_time")?;

    let end_time = match end_raw.as_deref() {
        Some(raw) => Some(parse_stored_time(raw)?),
        None => None,
    };

    Ok(SiteChange {
        id: row.get("id")?,
        start_time: parse_stored_time(&start_raw)?,
        end_time,
        note: row.get("note")?,
        location_id: row.get("location_id")?,
    })
}

/// All locations ordered by `sort_order`.
pub fn load_locations(conn: &Connection) -> AppResult<Vec<Location>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, body_part, sub_area, side, is_enabled, sort_order
         FROM locations
         ORDER BY sort_order ASC, id ASC",
    )?;

    let rows = stmt.query_map([], map_location)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// All site changes, in storage order.
pub fn load_site_changes(conn: &Connection) -> AppResult<Vec<SiteChange>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, start_time, end_time, note, location_id FROM site_changes",
    )?;

    let rows = stmt.query_map([], map_site_change)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn insert_location(
    conn: &Connection,
    identity: &LocationIdentity,
    sort_order: i32,
    is_enabled: bool,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO locations (body_part, sub_area, side, zone, is_enabled, sort_order, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            identity.body_part,
            identity.sub_area,
            identity.laterality.as_ref().map(|s| s.to_db_str()),
            identity.zone(),
            if is_enabled { 1 } else { 0 },
            sort_order,
            format_storage_datetime(&Utc::now()),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_location(conn: &Connection, location: &Location) -> AppResult<()> {
    let identity = &location.identity;
    conn.execute(
        "UPDATE locations
         SET body_part = ?1, sub_area = ?2, side = ?3, zone = ?4, is_enabled = ?5, sort_order = ?6
         WHERE id = ?7",
        params![
            identity.body_part,
            identity.sub_area,
            identity.laterality.as_ref().map(|s| s.to_db_str()),
            identity.zone(),
            if location.is_enabled { 1 } else { 0 },
            location.sort_order,
            location.id,
        ],
    )?;
    Ok(())
}

pub fn insert_site_change(conn: &Connection, entry: &SiteChange) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO site_changes (start_time, end_time, note, location_id)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            format_storage_datetime(&entry.start_time),
            entry.end_time.as_ref().map(format_storage_datetime),
            entry.note,
            entry.location_id,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_site_change(conn: &Connection, entry: &SiteChange) -> AppResult<()> {
    conn.execute(
        "UPDATE site_changes
         SET start_time = ?1, end_time = ?2, note = ?3, location_id = ?4
         WHERE id = ?5",
        params![
            format_storage_datetime(&entry.start_time),
            entry.end_time.as_ref().map(format_storage_datetime),
            entry.note,
            entry.location_id,
            entry.id,
        ],
    )?;
    Ok(())
}

pub fn delete_location(conn: &Connection, id: i64) -> AppResult<()> {
    conn.execute("DELETE FROM locations WHERE id = ?1", [id])?;
    Ok(())
}

pub fn delete_site_change(conn: &Connection, id: i64) -> AppResult<()> {
    conn.execute("DELETE FROM site_changes WHERE id = ?1", [id])?;
    Ok(())
}
