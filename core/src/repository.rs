//! Persistence gateway for to-do items.
//!
//! # Design
//! Every query and mutation goes through `ToDoRepository`. Mutations run in a
//! single transaction each; returning early with `?` drops the transaction,
//! which rolls it back. Write transactions start with `BEGIN IMMEDIATE`, so
//! the write lock is taken before the first read and concurrent writers wait
//! on the busy timeout instead of failing with `SQLITE_BUSY`. Reads hit the
//! pool directly and see whatever is committed at query time. Sorting and
//! filtering are left to SQL.

use sqlx::{Sqlite, SqliteConnection, Transaction};

use crate::error::TodoError;
use crate::model::{ToDo, ToDoInput};
use crate::pool::DbPool;

const INVALID_INPUT_MESSAGE: &str = "Invalid ToDo input!";

/// Repository for to-do CRUD operations.
#[derive(Debug, Clone)]
pub struct ToDoRepository {
    pool: DbPool,
}

impl ToDoRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Validate `input` and store it as a new row.
    ///
    /// Returns the stored item carrying its generated id.
    pub async fn add(&self, input: ToDoInput) -> Result<ToDo, TodoError> {
        let todo = ToDo::try_from(input)?;

        let mut tx = self.begin_write().await?;
        let id = insert(&mut tx, &todo).await?;
        tx.commit().await?;

        Ok(todo.with_id(id))
    }

    /// Merge `patch` into the stored item with `id`.
    ///
    /// All three fields of `patch` overwrite the stored values.
    pub async fn update(&self, id: i64, patch: ToDoInput) -> Result<(), TodoError> {
        check_id(id)?;

        let mut tx = self.begin_write().await?;
        let mut existing = find(&mut tx, id).await?.ok_or(TodoError::NotFound(id))?;
        existing.apply_update(&patch)?;

        sqlx::query("UPDATE todos SET description = ?, deadline = ?, priority = ? WHERE id = ?")
            .bind(existing.description())
            .bind(existing.deadline())
            .bind(existing.priority())
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(())
    }

    /// Delete the item with `id` and store `input` in its place.
    ///
    /// The replacement is a fresh row, so it gets a new id; the old id stops
    /// resolving. The returned item carries the new id.
    pub async fn replace(&self, id: i64, input: ToDoInput) -> Result<ToDo, TodoError> {
        check_id(id)?;
        let replacement = ToDo::try_from(input)?;

        let mut tx = self.begin_write().await?;
        if find(&mut tx, id).await?.is_none() {
            return Err(TodoError::NotFound(id));
        }
        delete(&mut tx, id).await?;
        let new_id = insert(&mut tx, &replacement).await?;
        tx.commit().await?;

        Ok(replacement.with_id(new_id))
    }

    pub async fn remove(&self, id: i64) -> Result<(), TodoError> {
        let mut tx = self.begin_write().await?;
        if delete(&mut tx, id).await? == 0 {
            return Err(TodoError::NotFound(id));
        }
        tx.commit().await?;
        Ok(())
    }

    async fn begin_write(&self) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
        self.pool.inner().begin_with("BEGIN IMMEDIATE").await
    }

    /// Look up a single item.
    ///
    /// Any failure, including a storage fault, is reported as `NotFound`.
    pub async fn get_by_id(&self, id: i64) -> Result<ToDo, TodoError> {
        sqlx::query_as::<_, ToDo>(
            "SELECT id, description, deadline, priority FROM todos WHERE id = ?",
        )
        .bind(id)
        .fetch_one(self.pool.inner())
        .await
        .map_err(|_| TodoError::NotFound(id))
    }

    /// All items, earliest deadline first.
    pub async fn list_all(&self) -> Result<Vec<ToDo>, TodoError> {
        let todos = sqlx::query_as::<_, ToDo>(
            "SELECT id, description, deadline, priority FROM todos ORDER BY deadline",
        )
        .fetch_all(self.pool.inner())
        .await?;
        Ok(todos)
    }

    /// Items whose priority equals `priority`, earliest deadline first.
    ///
    /// `priority` is not range-checked; a value no item can hold simply
    /// matches nothing.
    pub async fn list_by_priority(&self, priority: i32) -> Result<Vec<ToDo>, TodoError> {
        let todos = sqlx::query_as::<_, ToDo>(
            r#"
            SELECT id, description, deadline, priority
            FROM todos
            WHERE priority = ?
            ORDER BY deadline
            "#,
        )
        .bind(priority)
        .fetch_all(self.pool.inner())
        .await?;
        Ok(todos)
    }
}

fn check_id(id: i64) -> Result<(), TodoError> {
    if id < 0 {
        return Err(TodoError::validation(INVALID_INPUT_MESSAGE));
    }
    Ok(())
}

async fn find(conn: &mut SqliteConnection, id: i64) -> Result<Option<ToDo>, sqlx::Error> {
    sqlx::query_as::<_, ToDo>("SELECT id, description, deadline, priority FROM todos WHERE id = ?")
        .bind(id)
        .fetch_optional(conn)
        .await
}

async fn insert(conn: &mut SqliteConnection, todo: &ToDo) -> Result<i64, sqlx::Error> {
    let result = sqlx::query("INSERT INTO todos (description, deadline, priority) VALUES (?, ?, ?)")
        .bind(todo.description())
        .bind(todo.deadline())
        .bind(todo.priority())
        .execute(conn)
        .await?;
    Ok(result.last_insert_rowid())
}

async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM todos WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn repo() -> ToDoRepository {
        ToDoRepository::new(DbPool::in_memory().await.unwrap())
    }

    #[tokio::test]
    async fn add_assigns_distinct_ids() {
        let repo = repo().await;
        let a = repo.add(ToDoInput::new("Feed cats.", date(2023, 11, 3), 3)).await.unwrap();
        let b = repo.add(ToDoInput::new("Do laundry.", date(2023, 11, 5), 2)).await.unwrap();
        assert!(a.id().is_some());
        assert!(b.id().is_some());
        assert_ne!(a.id(), b.id());
    }

    #[tokio::test]
    async fn add_then_get_returns_equal_fields() {
        let repo = repo().await;
        let created = repo
            .add(ToDoInput::new("Buy football tickets.", date(2023, 11, 12), 3))
            .await
            .unwrap();

        let fetched = repo.get_by_id(created.id().unwrap()).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.description(), Some("Buy football tickets."));
        assert_eq!(fetched.deadline(), Some(date(2023, 11, 12)));
        assert_eq!(fetched.priority(), 3);
    }

    #[tokio::test]
    async fn add_without_description_or_deadline() {
        let repo = repo().await;
        let input = ToDoInput {
            description: None,
            deadline: None,
            priority: 1,
        };
        let created = repo.add(input).await.unwrap();
        let fetched = repo.get_by_id(created.id().unwrap()).await.unwrap();
        assert_eq!(fetched.description(), None);
        assert_eq!(fetched.deadline(), None);
    }

    #[tokio::test]
    async fn add_with_invalid_priority_writes_nothing() {
        let repo = repo().await;
        for priority in [0, 4] {
            let err = repo
                .add(ToDoInput::new("Wash car.", date(2023, 11, 4), priority))
                .await
                .unwrap_err();
            assert!(err.is_validation());
        }
        assert!(repo.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_remove() {
        let repo = repo().await;
        let first = repo.add(ToDoInput::new("A", date(2023, 1, 1), 1)).await.unwrap();
        repo.remove(first.id().unwrap()).await.unwrap();
        let second = repo.add(ToDoInput::new("B", date(2023, 1, 1), 1)).await.unwrap();
        assert!(second.id().unwrap() > first.id().unwrap());
    }

    #[tokio::test]
    async fn update_rejects_negative_id() {
        let repo = repo().await;
        let err = repo
            .update(-1, ToDoInput::new("Iron suit.", date(2023, 10, 16), 2))
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn update_with_invalid_priority_keeps_stored_item() {
        let repo = repo().await;
        let created = repo.add(ToDoInput::new("Feed cats.", date(2023, 11, 3), 3)).await.unwrap();
        let id = created.id().unwrap();

        let err = repo
            .update(id, ToDoInput::new("Iron suit.", date(2023, 10, 16), 9))
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(repo.get_by_id(id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn replace_rejects_negative_id_and_invalid_input() {
        let repo = repo().await;
        let created = repo.add(ToDoInput::new("Feed cats.", date(2023, 11, 3), 3)).await.unwrap();

        let err = repo
            .replace(-5, ToDoInput::new("X", date(2023, 1, 1), 1))
            .await
            .unwrap_err();
        assert!(err.is_validation());

        let err = repo
            .replace(created.id().unwrap(), ToDoInput::new("X", date(2023, 1, 1), 0))
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(repo.list_all().await.unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn remove_missing_is_not_found() {
        let repo = repo().await;
        assert!(matches!(repo.remove(12).await, Err(TodoError::NotFound(12))));
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let repo = repo().await;
        assert!(matches!(repo.get_by_id(1).await, Err(TodoError::NotFound(1))));
        assert!(matches!(repo.get_by_id(-3).await, Err(TodoError::NotFound(-3))));
    }

    #[tokio::test]
    async fn get_collapses_storage_faults_into_not_found() {
        let repo = repo().await;
        repo.pool().close().await;
        assert!(matches!(repo.get_by_id(1).await, Err(TodoError::NotFound(1))));
    }

    #[tokio::test]
    async fn list_reports_storage_faults() {
        let repo = repo().await;
        repo.pool().close().await;
        assert!(matches!(repo.list_all().await, Err(TodoError::Storage(_))));
    }
}
