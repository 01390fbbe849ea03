//! Bind values for built queries.

use sqlx::postgres::PgArguments;
use sqlx::Arguments;

/// A value that can be bound to a PostgreSQL query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BindValue {
    Text(String),
    BigInt(i64),
}

/// Encode params in placeholder order ($1, $2, ...).
pub fn to_arguments(params: &[BindValue]) -> Result<PgArguments, sqlx::Error> {
    let mut args = PgArguments::default();
    for p in params {
        let added = match p {
            BindValue::Text(s) => args.add(s.clone()),
            BindValue::BigInt(n) => args.add(*n),
        };
        added.map_err(sqlx::Error::Encode)?;
    }
    Ok(args)
}
