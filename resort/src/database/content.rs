//! Content item storage for the three orderable collections.
//!
//! Every content table shares the lifecycle columns (`sort_order`,
//! `is_active`, `is_deleted`, `deleted_at`, `created_at`) and adds its own
//! field columns, listed by [`ContentKind::field_columns`]. The SQL here is
//! assembled from those lists so one set of helpers serves all three tables.

use std::time::SystemTime;

use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

use crate::content::{ContentFields, ContentItem, ContentKind, ListScope, NewContent};
use crate::error::Result;

use super::connection::Database;
use super::timestamps::{from_unix_millis, from_unix_secs, to_unix_millis, to_unix_secs};

// Column offset of the first field column in SELECT_COLUMNS order
const FIELD_OFFSET: usize = 6;

fn select_columns(kind: ContentKind) -> String {
    format!(
        "id, sort_order, is_active, is_deleted, deleted_at, created_at, {}",
        kind.field_columns().join(", ")
    )
}

fn row_to_item(kind: ContentKind, row: &rusqlite::Row<'_>) -> rusqlite::Result<ContentItem> {
    let deleted_at: Option<i64> = row.get(4)?;
    Ok(ContentItem {
        id: row.get(0)?,
        order: row.get(1)?,
        is_active: row.get(2)?,
        is_deleted: row.get(3)?,
        deleted_at: deleted_at.map(from_unix_millis),
        created_at: from_unix_secs(row.get(5)?),
        fields: ContentFields::from_row(kind, row, FIELD_OFFSET)?,
    })
}

impl Database {
    /// Inserts a new, live content item and returns it with its identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_content(
        conn: &Connection,
        new: &NewContent,
        now: SystemTime,
    ) -> Result<ContentItem> {
        let kind = new.kind();
        let columns = kind.field_columns();
        let created_secs = to_unix_secs(now)?;

        let sql = format!(
            "INSERT INTO {} ({}, sort_order, is_active, is_deleted, created_at) VALUES ({})",
            kind.table(),
            columns.join(", "),
            vec!["?"; columns.len() + 4].join(", ")
        );

        let mut values = new.fields.column_values();
        values.extend([
            Value::Integer(i64::from(new.order)),
            Value::Integer(i64::from(new.is_active)),
            Value::Integer(0),
            Value::Integer(created_secs),
        ]);
        conn.execute(&sql, params_from_iter(values))?;

        Ok(ContentItem {
            id: conn.last_insert_rowid(),
            fields: new.fields.clone(),
            order: new.order,
            is_active: new.is_active,
            is_deleted: false,
            deleted_at: None,
            created_at: from_unix_secs(created_secs),
        })
    }

    /// Looks up any non-purged item by identity, deleted or not.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row cannot be decoded.
    pub fn get_content(conn: &Connection, kind: ContentKind, id: i64) -> Result<Option<ContentItem>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = ?",
            select_columns(kind),
            kind.table()
        );
        Ok(conn
            .query_row(&sql, [id], |row| row_to_item(kind, row))
            .optional()?)
    }

    /// Writes the fields, order and active flag of a live item.
    ///
    /// Returns false if the item does not exist or is in the recycle bin.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_content(conn: &Connection, item: &ContentItem) -> Result<bool> {
        let kind = item.kind();
        let assignments: Vec<String> = kind
            .field_columns()
            .iter()
            .map(|column| format!("{column} = ?"))
            .collect();
        let sql = format!(
            "UPDATE {} SET {}, sort_order = ?, is_active = ? WHERE id = ? AND is_deleted = 0",
            kind.table(),
            assignments.join(", ")
        );

        let mut values = item.fields.column_values();
        values.extend([
            Value::Integer(i64::from(item.order)),
            Value::Integer(i64::from(item.is_active)),
            Value::Integer(item.id),
        ]);
        let rows = conn.execute(&sql, params_from_iter(values))?;
        Ok(rows > 0)
    }

    /// Moves a live item to the recycle bin, stamping `deleted_at`.
    ///
    /// Items already in the bin are left untouched and false is returned,
    /// as it is for unknown identities.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn mark_content_deleted(
        conn: &Connection,
        kind: ContentKind,
        id: i64,
        now: SystemTime,
    ) -> Result<bool> {
        let sql = format!(
            "UPDATE {} SET is_deleted = 1, deleted_at = ? WHERE id = ? AND is_deleted = 0",
            kind.table()
        );
        let rows = conn.execute(&sql, params![to_unix_millis(now)?, id])?;
        Ok(rows > 0)
    }

    /// Highest order among items not in the recycle bin, or 0 if there are none.
    ///
    /// Inactive items count; they still hold a place in the admin ordering.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn max_live_order(conn: &Connection, kind: ContentKind) -> Result<u32> {
        let sql = format!(
            "SELECT COALESCE(MAX(sort_order), 0) FROM {} WHERE is_deleted = 0",
            kind.table()
        );
        Ok(conn.query_row(&sql, [], |row| row.get(0))?)
    }

    /// Removes an item permanently. Returns false if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_content(conn: &Connection, kind: ContentKind, id: i64) -> Result<bool> {
        let sql = format!("DELETE FROM {} WHERE id = ?", kind.table());
        let rows = conn.execute(&sql, [id])?;
        Ok(rows > 0)
    }

    /// Lists the items of a collection in a scope, in that scope's order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded.
    pub fn list_content(
        conn: &Connection,
        kind: ContentKind,
        scope: ListScope,
    ) -> Result<Vec<ContentItem>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} ORDER BY {}",
            select_columns(kind),
            kind.table(),
            scope.predicate(),
            scope.ordering()
        );
        let mut stmt = conn.prepare(&sql)?;
        let items = stmt
            .query_map([], |row| row_to_item(kind, row))?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(items)
    }

    /// Counts the items of a collection in a scope.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_content(conn: &Connection, kind: ContentKind, scope: ListScope) -> Result<i64> {
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE {}",
            kind.table(),
            scope.predicate()
        );
        Ok(conn.query_row(&sql, [], |row| row.get(0))?)
    }
}
