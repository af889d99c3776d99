//! Sessions: a batch of reads and writes against one [`Database`].
//!
//! A session begins a transaction lazily, right before its first statement,
//! so every read sees the session's own earlier writes. [`Session::commit`]
//! ends the transaction and leaves the session usable; the next statement
//! starts a new one. [`Session::close`] (or dropping the session) rolls back
//! whatever was not committed.
//!
//! Sessions of one database share its connection. A session only commits or
//! rolls back a transaction it began itself; statements issued while another
//! session's transaction is open run inside that transaction.
//!
//! [`Database`]: crate::sqlite::Database

use std::cell::Cell;

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::record::Record;
use crate::relation::Model;
use crate::sqlite::{
    CreateOperation, CrudOperation, CrudResult, DeleteOperation, Executor, Query, ReadOperation,
    SqlQuery, UpdateOperation,
};

pub struct Session<'db> {
    exec: Executor<'db>,
    began: Cell<bool>,
    closed: bool,
}

impl<'db> Session<'db> {
    pub(crate) fn new(exec: Executor<'db>) -> Self {
        Self {
            exec,
            began: Cell::new(false),
            closed: false,
        }
    }

    /// True while this session's own transaction is open.
    pub fn in_transaction(&self) -> bool {
        self.began.get() && !self.exec.connection().is_autocommit()
    }

    fn begin(&self) -> Result<()> {
        if self.exec.connection().is_autocommit() {
            debug!("session autobegin");
            self.exec.execute_batch("BEGIN")?;
            self.began.set(true);
        }
        Ok(())
    }

    /// Finish this session's transaction with `COMMIT` or `ROLLBACK`.
    fn finish(&self, statement: &str) -> Result<bool> {
        let owned = self.in_transaction();
        self.began.set(false);
        if owned {
            self.exec.execute_batch(statement)?;
        }
        Ok(owned)
    }

    pub fn execute(&self, op: &CrudOperation) -> Result<CrudResult> {
        self.begin()?;
        self.exec.execute_crud(op)
    }

    pub fn execute_sql(&self, query: &SqlQuery) -> Result<Vec<Record>> {
        self.begin()?;
        self.exec.execute_sql(query)
    }

    /// Run a raw SELECT and map each row onto `M`.
    pub fn select<M: Model>(&self, query: &SqlQuery) -> Result<Vec<M>> {
        self.execute_sql(query)?
            .into_iter()
            .map(|mut record| {
                record.table = M::TABLE.to_string();
                M::from_record(&record)
            })
            .collect()
    }

    /// Insert a new record and store its generated id, or write back the
    /// columns of one that already has an id.
    pub fn add<M: Model>(&self, model: &mut M) -> Result<i64> {
        if let Some(id) = model.id() {
            self.update(model)?;
            return Ok(id);
        }

        let mut op = CreateOperation::new(M::TABLE);
        for (column, value) in model.values() {
            op = op.with_value(column, value);
        }
        let id = self
            .execute(&CrudOperation::Create(op))?
            .inserted_id()
            .unwrap_or_default();
        model.set_id(id);
        debug!(table = M::TABLE, id, "added record");
        Ok(id)
    }

    pub fn add_all<M: Model>(&self, models: &mut [M]) -> Result<()> {
        for model in models.iter_mut() {
            self.add(model)?;
        }
        Ok(())
    }

    /// Rows of `M` matching `query`, in id order.
    pub fn find<M: Model>(&self, query: Query) -> Result<Vec<M>> {
        let op = ReadOperation::new(M::TABLE)
            .with_query(query)
            .order_by("id", true);
        self.execute(&CrudOperation::Read(op))?
            .into_rows()
            .iter()
            .map(M::from_record)
            .collect()
    }

    pub fn all<M: Model>(&self) -> Result<Vec<M>> {
        self.find(Query::new())
    }

    /// Lowest-id row matching `query`, if any.
    pub fn first<M: Model>(&self, query: Query) -> Result<Option<M>> {
        let op = ReadOperation::new(M::TABLE)
            .with_query(query)
            .order_by("id", true)
            .with_limit(1);
        self.execute(&CrudOperation::Read(op))?
            .into_rows()
            .first()
            .map(M::from_record)
            .transpose()
    }

    /// Like [`Session::first`], but a missing row is an error.
    pub fn one<M: Model>(&self, query: Query) -> Result<M> {
        let filter = format!("{:?}", query.conditions);
        self.first(query)?.ok_or(Error::NotFound {
            table: M::TABLE,
            filter,
        })
    }

    pub fn get<M: Model>(&self, id: i64) -> Result<Option<M>> {
        self.first(Query::eq("id", id))
    }

    /// Reload a record's columns, picking up database defaults.
    pub fn refresh<M: Model>(&self, model: &mut M) -> Result<()> {
        let id = model.require_id()?;
        *model = self.one(Query::eq("id", id))?;
        Ok(())
    }

    pub fn update<M: Model>(&self, model: &M) -> Result<usize> {
        let id = model.require_id()?;
        let mut op = UpdateOperation::new(M::TABLE, Query::eq("id", id));
        for (column, value) in model.values() {
            op = op.with_value(column, value);
        }
        Ok(self.execute(&CrudOperation::Update(op))?.affected())
    }

    pub fn delete<M: Model>(&self, model: &M) -> Result<usize> {
        let id = model.require_id()?;
        let op = DeleteOperation::new(M::TABLE, Query::eq("id", id));
        let removed = self.execute(&CrudOperation::Delete(op))?.affected();
        debug!(table = M::TABLE, id, removed, "deleted record");
        Ok(removed)
    }

    /// Every row of any table, in rowid order. Useful for bare join tables
    /// that have no model of their own.
    pub fn rows(&self, table: &str) -> Result<Vec<Record>> {
        let op = ReadOperation::new(table).order_by("rowid", true);
        Ok(self.execute(&CrudOperation::Read(op))?.into_rows())
    }

    pub fn commit(&self) -> Result<()> {
        if self.finish("COMMIT")? {
            info!("session committed");
        }
        Ok(())
    }

    pub fn rollback(&self) -> Result<()> {
        if self.finish("ROLLBACK")? {
            info!("session rolled back");
        }
        Ok(())
    }

    /// Discard uncommitted work and end the session.
    pub fn close(mut self) -> Result<()> {
        self.closed = true;
        self.rollback()
    }
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(err) = self.finish("ROLLBACK") {
            warn!(%err, "rollback on drop failed");
        }
    }
}
