use sea_orm::DatabaseConnection;

use crate::{EngineError, ResultEngine};

mod access;
mod houses;
mod items;
mod meals;
mod people;
mod purchases;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
///
/// The body must only talk to the database through `$tx`.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

/// Trim a required text field and reject it when empty.
fn normalize_required_text(value: &str, field: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidField(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

fn ensure_non_negative_count(count: i64) -> ResultEngine<()> {
    if count < 0 {
        return Err(EngineError::NegativeCount(count));
    }
    Ok(())
}

fn ensure_unit_cost(cost_per_ct: f64) -> ResultEngine<()> {
    if !cost_per_ct.is_finite() || cost_per_ct < 0.0 {
        return Err(EngineError::InvalidField(
            "cost_per_ct must be a non-negative number".to_string(),
        ));
    }
    Ok(())
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
        })
    }
}
