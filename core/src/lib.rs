//! Domain model and persistence for the to-do service.
//!
//! # Overview
//! `ToDoRepository` is the only way to read or write stored to-do items. It
//! enforces the priority range on every write, keeps listings ordered by
//! deadline, and reports missing ids as `TodoError::NotFound`.
//!
//! # Design
//! - `ToDo` can only hold a priority in `1..=3`; `ToDoInput` carries the raw
//!   request value until the repository validates it.
//! - Storage is SQLite through `sqlx`, with migrations embedded at compile
//!   time and applied on connect.
//! - Each mutation is one transaction. Reads are not transactional.
//! - The HTTP layer lives in `todo-server`; nothing here knows about status
//!   codes.

pub mod error;
pub mod model;
pub mod pool;
pub mod repository;
pub mod seed;

pub use error::TodoError;
pub use model::{ToDo, ToDoInput, PRIORITY_MAX, PRIORITY_MIN};
pub use pool::DbPool;
pub use repository::ToDoRepository;
