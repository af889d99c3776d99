//! Mapped records and the relationships between them.
//!
//! Relationships are descriptors: they hold the key column names and issue a
//! query when asked, so nothing is cached on the records themselves.
//!
//! | Descriptor        | Key lives on     | Loads            |
//! |-------------------|------------------|------------------|
//! | [`HasMany`]       | child            | `Vec<Child>`     |
//! | [`BelongsTo`]     | child            | `Option<Parent>` |
//! | [`HasOne`]        | dependent        | `Option<Dep>`    |
//! | [`ManyToMany`]    | join table       | `Vec<Other>`     |

use std::marker::PhantomData;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::record::Record;
use crate::schema::{ColumnDefinition, DataType, ForeignKey, ForeignKeyAction, TableDefinition};
use crate::session::Session;
use crate::sqlite::{
    CreateOperation, CrudOperation, DeleteOperation, Params, Query, ReadOperation, SqlQuery, Value,
};

/// A record type stored in one table with an integer `id` key.
pub trait Model: Sized {
    const TABLE: &'static str;

    /// The table this record is stored in.
    fn definition() -> TableDefinition;

    /// `None` until the record has been added to a session.
    fn id(&self) -> Option<i64>;

    fn set_id(&mut self, id: i64);

    /// Column values to write, excluding `id`.
    fn values(&self) -> Vec<(&'static str, Value)>;

    fn from_record(record: &Record) -> Result<Self>;

    fn require_id(&self) -> Result<i64> {
        self.id().ok_or(Error::Transient { table: Self::TABLE })
    }
}

/// Whether a foreign key column may be left empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    Optional,
    Required,
}

impl Link {
    pub fn column(self, name: &str) -> ColumnDefinition {
        let column = ColumnDefinition::new(name, DataType::Integer);
        match self {
            Link::Optional => column,
            Link::Required => column.not_null(),
        }
    }
}

/// One-to-many: children of `C` point at the parent through `foreign_key`.
pub struct HasMany<C> {
    foreign_key: &'static str,
    _child: PhantomData<fn() -> C>,
}

impl<C: Model> HasMany<C> {
    pub const fn new(foreign_key: &'static str) -> Self {
        Self {
            foreign_key,
            _child: PhantomData,
        }
    }

    pub fn foreign_key(&self) -> &'static str {
        self.foreign_key
    }

    pub fn load(&self, session: &Session<'_>, parent_id: i64) -> Result<Vec<C>> {
        session.find(Query::eq(self.foreign_key, parent_id))
    }
}

/// Many-to-one: the owning side of a [`HasMany`].
pub struct BelongsTo<P> {
    foreign_key: &'static str,
    _parent: PhantomData<fn() -> P>,
}

impl<P: Model> BelongsTo<P> {
    pub const fn new(foreign_key: &'static str) -> Self {
        Self {
            foreign_key,
            _parent: PhantomData,
        }
    }

    pub fn foreign_key(&self) -> &'static str {
        self.foreign_key
    }

    /// An empty key loads nothing.
    pub fn load(&self, session: &Session<'_>, key: Option<i64>) -> Result<Option<P>> {
        match key {
            Some(id) => session.get(id),
            None => Ok(None),
        }
    }
}

/// One-to-one: at most one dependent `C` per parent, exposed as a single
/// reference instead of a collection.
pub struct HasOne<C> {
    foreign_key: &'static str,
    _dependent: PhantomData<fn() -> C>,
}

impl<C: Model> HasOne<C> {
    pub const fn new(foreign_key: &'static str) -> Self {
        Self {
            foreign_key,
            _dependent: PhantomData,
        }
    }

    pub fn foreign_key(&self) -> &'static str {
        self.foreign_key
    }

    pub fn load(&self, session: &Session<'_>, parent_id: i64) -> Result<Option<C>> {
        let mut found: Vec<C> = session.find(Query::eq(self.foreign_key, parent_id))?;
        if found.len() > 1 {
            warn!(
                table = C::TABLE,
                parent_id,
                count = found.len(),
                "one-to-one relationship has several dependents, using the first"
            );
        }
        Ok(if found.is_empty() {
            None
        } else {
            Some(found.swap_remove(0))
        })
    }
}

/// Many-to-many between `L` and `R` through a join table that holds only the
/// two keys.
pub struct ManyToMany<L, R> {
    table: &'static str,
    left: &'static str,
    right: &'static str,
    _sides: PhantomData<fn() -> (L, R)>,
}

impl<L: Model, R: Model> ManyToMany<L, R> {
    pub const fn new(table: &'static str, left: &'static str, right: &'static str) -> Self {
        Self {
            table,
            left,
            right,
            _sides: PhantomData,
        }
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    /// Join table; deleting either side removes its pairs.
    pub fn definition(&self) -> TableDefinition {
        TableDefinition::new(self.table)
            .with_column(Link::Optional.column(self.left))
            .with_column(Link::Optional.column(self.right))
            .with_foreign_key(
                ForeignKey::new(self.left, L::TABLE, "id").on_delete(ForeignKeyAction::Cascade),
            )
            .with_foreign_key(
                ForeignKey::new(self.right, R::TABLE, "id").on_delete(ForeignKeyAction::Cascade),
            )
    }

    pub fn link(&self, session: &Session<'_>, left: &L, right: &R) -> Result<()> {
        let op = CreateOperation::new(self.table)
            .with_value(self.left, left.require_id()?)
            .with_value(self.right, right.require_id()?);
        session.execute(&CrudOperation::Create(op))?;
        Ok(())
    }

    pub fn link_all(&self, session: &Session<'_>, left: &L, rights: &[R]) -> Result<()> {
        for right in rights {
            self.link(session, left, right)?;
        }
        Ok(())
    }

    /// Remove a single pair. Other pairs for either side are untouched, even
    /// a duplicate of the same pair.
    pub fn unlink(&self, session: &Session<'_>, left: &L, right: &R) -> Result<usize> {
        let pair = Query::eq(self.left, left.require_id()?).and_eq(self.right, right.require_id()?);
        let read = ReadOperation::new(self.table)
            .with_fields(&["rowid AS link_rowid"])
            .with_query(pair)
            .order_by("rowid", true)
            .with_limit(1);
        let Some(row) = session.execute(&CrudOperation::Read(read))?.into_rows().pop() else {
            return Ok(0);
        };
        let rowid: i64 = row.get("link_rowid")?;
        let op = DeleteOperation::new(self.table, Query::eq("rowid", rowid));
        let removed = session.execute(&CrudOperation::Delete(op))?.affected();
        debug!(table = self.table, rowid, "unlinked pair");
        Ok(removed)
    }

    /// Right-hand records linked to `left_id`, in link order.
    pub fn related(&self, session: &Session<'_>, left_id: i64) -> Result<Vec<R>> {
        self.across(session, R::TABLE, self.right, self.left, left_id)
    }

    /// Left-hand records linked to `right_id`, in link order.
    pub fn reverse(&self, session: &Session<'_>, right_id: i64) -> Result<Vec<L>> {
        self.across(session, L::TABLE, self.left, self.right, right_id)
    }

    fn across<M: Model>(
        &self,
        session: &Session<'_>,
        target: &str,
        target_key: &str,
        source_key: &str,
        source_id: i64,
    ) -> Result<Vec<M>> {
        let statement = format!(
            "SELECT {target}.* FROM {target} \
             JOIN {join} ON {join}.{target_key} = {target}.id \
             WHERE {join}.{source_key} = :source ORDER BY {join}.rowid",
            join = self.table,
        );
        let params = Params::new().with_value("source", source_id);
        session.select(&SqlQuery::new(&statement).with_params(params))
    }

    /// Raw `(left, right)` rows of the join table.
    pub fn pairs(&self, session: &Session<'_>) -> Result<Vec<(Option<i64>, Option<i64>)>> {
        session
            .rows(self.table)?
            .iter()
            .map(|row| -> Result<(Option<i64>, Option<i64>)> {
                Ok((row.get(self.left)?, row.get(self.right)?))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Cat, Human};

    #[test]
    fn link_controls_nullability() {
        assert!(Link::Optional.column("person_id").is_nullable());
        assert!(!Link::Required.column("person_id").is_nullable());
    }

    #[test]
    fn join_table_cascades_both_sides() {
        let table = Human::CATS.definition();
        assert_eq!(table.name, "hc_mapper");
        assert!(table.primary_key.is_empty());
        assert_eq!(table.foreign_keys.len(), 2);
        assert!(table
            .foreign_keys
            .iter()
            .all(|fk| fk.on_delete == ForeignKeyAction::Cascade));
        assert_eq!(table.foreign_keys[1].foreign_table, Cat::TABLE);
        assert!(table
            .create_sql()
            .contains("FOREIGN KEY (human_id) REFERENCES humans (id) ON DELETE CASCADE"));
    }
}
