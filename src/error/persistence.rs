use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Cannot insert into `{table}`: required foreign key `{field}` is missing")]
    MissingForeignKey { table: String, field: &'static str },
    #[error("Unknown field `{field}` for table `{table}`")]
    UnknownField { table: String, field: String },
    #[error("Database did not report an id for the row inserted into `{0}`")]
    MissingInsertId(String),
}
