//! Relationship patterns on SQLite.
//!
//! # Intention
//!
//! - Show one-to-many, many-to-one, one-to-one, many-to-many and
//!   association-object relationships as short, linear walkthroughs.
//! - Keep the mapping layer small: typed records ([`relation::Model`]),
//!   relationship descriptors, and a [`session::Session`] over `rusqlite`.
//!
//! # Architectural Boundaries
//!
//! - Only SQLite/database code belongs here.
//! - Failures are not retried or translated; SQLite's own errors surface.
//! - Each walkthrough in [`demos`] owns its database for the length of one
//!   run. Nothing is shared between them.

pub mod demos;
pub mod error;
pub mod logging;
pub mod models;
pub mod record;
pub mod relation;
pub mod schema;
pub mod session;
pub mod sqlite;

pub use error::{Error, Result};
pub use record::{FromValue, Record};
pub use relation::{BelongsTo, HasMany, HasOne, Link, ManyToMany, Model};
pub use schema::{
    ColumnConstraint, ColumnDefinition, DataType, DefaultValue, ForeignKey, ForeignKeyAction,
    IndexDefinition, Schema, TableDefinition,
};
pub use session::Session;
pub use sqlite::{Database, Query, QueryOperator, SqliteConfig, Value};
