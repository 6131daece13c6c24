//! Item repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over canonical `items` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Insert paths call `ItemDraft::validate()` before SQL mutations; update
//!   paths intentionally do not, so verbatim overwrites stay legal.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Mutation-by-id matches purely on `uuid`; owner scoping is a service
//!   concern.

use crate::db::DbError;
use crate::model::item::{
    DueDatePatch, Item, ItemDraft, ItemId, ItemPatch, ItemValidationError, OwnerId,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const ITEM_SELECT_SQL: &str = "SELECT
    uuid,
    owner,
    text,
    is_complete,
    due_date,
    created_at,
    updated_at
FROM items";

const REQUIRED_ITEM_COLUMNS: &[&str] = &[
    "uuid",
    "owner",
    "text",
    "is_complete",
    "due_date",
    "created_at",
    "updated_at",
];

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for item persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ItemValidationError),
    Db(DbError),
    NotFound(ItemId),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "item not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted item data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; run migrations first"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ItemValidationError> for RepoError {
    fn from(value: ItemValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for item CRUD operations.
///
/// This is the injected persistence seam: the service layer depends on the
/// trait, never on a concrete storage backend.
pub trait ItemRepository {
    /// Persists a validated draft and returns the fully populated stored
    /// item, including the generated id and storage-assigned timestamps.
    fn insert_item(&self, draft: &ItemDraft) -> RepoResult<Item>;

    /// Returns all items belonging to `owner`, due date ascending.
    ///
    /// Rows without a due date sort first: SQLite places NULL before any
    /// value under ascending order, and that backend policy is surfaced
    /// as-is rather than specially bucketed.
    fn list_items_for_owner(&self, owner: &OwnerId) -> RepoResult<Vec<Item>>;

    /// Point read by id, regardless of owner.
    fn get_item(&self, id: ItemId) -> RepoResult<Option<Item>>;

    /// Applies `patch` to the item with the given id.
    ///
    /// Locates purely by id. Returns the updated row, or `Ok(None)` when no
    /// item with that id exists.
    fn update_item(&self, id: ItemId, patch: &ItemPatch) -> RepoResult<Option<Item>>;

    /// Removes the item with the given id and returns its prior
    /// representation. Absence is reported as `NotFound`.
    fn delete_item(&self, id: ItemId) -> RepoResult<Item>;
}

/// SQLite-backed item repository.
pub struct SqliteItemRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteItemRepository<'conn> {
    /// Constructs a repository from a migrated, ready connection.
    ///
    /// Rejects connections whose schema version or `items` shape does not
    /// match what this binary expects.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ItemRepository for SqliteItemRepository<'_> {
    fn insert_item(&self, draft: &ItemDraft) -> RepoResult<Item> {
        draft.validate()?;

        let id = Uuid::new_v4();
        self.conn.execute(
            "INSERT INTO items (uuid, owner, text, is_complete, due_date)
             VALUES (?1, ?2, ?3, 0, ?4);",
            params![
                id.to_string(),
                draft.owner.as_str(),
                draft.text.as_str(),
                draft.due_date,
            ],
        )?;

        // Re-read so the caller sees storage-assigned timestamps.
        self.get_item(id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("inserted item {id} could not be read back"))
        })
    }

    fn list_items_for_owner(&self, owner: &OwnerId) -> RepoResult<Vec<Item>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ITEM_SELECT_SQL}
             WHERE owner = ?1
             ORDER BY due_date ASC, created_at ASC, uuid ASC;"
        ))?;

        let mut rows = stmt.query([owner.as_str()])?;
        let mut items = Vec::new();

        while let Some(row) = rows.next()? {
            items.push(parse_item_row(row)?);
        }

        Ok(items)
    }

    fn get_item(&self, id: ItemId) -> RepoResult<Option<Item>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ITEM_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_item_row(row)?));
        }

        Ok(None)
    }

    fn update_item(&self, id: ItemId, patch: &ItemPatch) -> RepoResult<Option<Item>> {
        let mut sql = String::from(
            "UPDATE items
             SET
                text = ?1,
                is_complete = ?2,
                updated_at = (strftime('%s', 'now') * 1000)",
        );
        let mut bind_values: Vec<Value> = vec![
            Value::Text(patch.text.clone()),
            Value::Integer(bool_to_int(patch.is_complete)),
        ];

        match patch.due_date {
            DueDatePatch::Keep => {}
            DueDatePatch::Set(due) => {
                bind_values.push(Value::Integer(due));
                sql.push_str(&format!(", due_date = ?{}", bind_values.len()));
            }
            DueDatePatch::Clear => {
                sql.push_str(", due_date = NULL");
            }
        }

        bind_values.push(Value::Text(id.to_string()));
        sql.push_str(&format!(" WHERE uuid = ?{};", bind_values.len()));

        let changed = self.conn.execute(&sql, params_from_iter(bind_values))?;
        if changed == 0 {
            return Ok(None);
        }

        self.get_item(id)
    }

    fn delete_item(&self, id: ItemId) -> RepoResult<Item> {
        let item = match self.get_item(id)? {
            Some(item) => item,
            None => return Err(RepoError::NotFound(id)),
        };

        let changed = self
            .conn
            .execute("DELETE FROM items WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(item)
    }
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let expected_version = crate::db::migrations::latest_version();
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table_exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = 'items'
        );",
        [],
        |row| row.get(0),
    )?;
    if table_exists == 0 {
        return Err(RepoError::MissingRequiredTable("items"));
    }

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('items');")?;
    let mut rows = stmt.query([])?;
    let mut present = HashSet::new();
    while let Some(row) = rows.next()? {
        present.insert(row.get::<_, String>(0)?);
    }

    for column in REQUIRED_ITEM_COLUMNS {
        if !present.contains(*column) {
            return Err(RepoError::MissingRequiredColumn {
                table: "items",
                column,
            });
        }
    }

    Ok(())
}

fn parse_item_row(row: &Row<'_>) -> RepoResult<Item> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in items.uuid"))
    })?;

    let is_complete = match row.get::<_, i64>("is_complete")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_complete value `{other}` in items.is_complete"
            )));
        }
    };

    Ok(Item {
        id,
        owner: OwnerId::new(row.get::<_, String>("owner")?),
        text: row.get("text")?,
        is_complete,
        due_date: row.get("due_date")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
