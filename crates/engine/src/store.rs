//! Persistence adapter over the embedded SQLite database.
//!
//! Three primitives, usable with a plain connection or inside a transaction:
//! [`fetch_all`], [`fetch_one`] and [`execute`]. Statements are either raw SQL
//! with positional parameters ([`raw`]) or sea-query builders ([`build`]).

use sea_orm::{ConnectionTrait, FromQueryResult, Statement, StatementBuilder, Value};

use crate::ResultEngine;

/// Row metadata returned by a mutating statement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Execution {
    /// Rowid assigned by the last `INSERT`, `0` for other statements.
    pub inserted_id: u64,
    /// `0` tells "not found" apart from "found and changed".
    pub rows_affected: u64,
}

impl Execution {
    /// Inserted id narrowed to the integer type used by primary keys.
    pub fn inserted_key(&self) -> ResultEngine<i32> {
        i32::try_from(self.inserted_id).map_err(|_| {
            crate::EngineError::InvalidField(format!(
                "inserted id {} out of range",
                self.inserted_id
            ))
        })
    }
}

pub(crate) fn raw<C: ConnectionTrait>(db: &C, sql: &str, values: Vec<Value>) -> Statement {
    Statement::from_sql_and_values(db.get_database_backend(), sql, values)
}

pub(crate) fn build<C, S>(db: &C, statement: &S) -> Statement
where
    C: ConnectionTrait,
    S: StatementBuilder,
{
    db.get_database_backend().build(statement)
}

/// Run a query and map every row.
pub(crate) async fn fetch_all<T, C>(db: &C, statement: Statement) -> ResultEngine<Vec<T>>
where
    T: FromQueryResult,
    C: ConnectionTrait,
{
    Ok(T::find_by_statement(statement).all(db).await?)
}

/// Run a query and map the first row, if any. An empty result is not an error.
pub(crate) async fn fetch_one<T, C>(db: &C, statement: Statement) -> ResultEngine<Option<T>>
where
    T: FromQueryResult,
    C: ConnectionTrait,
{
    Ok(T::find_by_statement(statement).one(db).await?)
}

/// Run a mutating statement.
pub(crate) async fn execute<C>(db: &C, statement: Statement) -> ResultEngine<Execution>
where
    C: ConnectionTrait,
{
    let result = db.execute(statement).await?;
    Ok(Execution {
        inserted_id: result.last_insert_id(),
        rows_affected: result.rows_affected(),
    })
}
