use thiserror::Error;

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("payload does not match sensor reading grammar: {line}")]
    Grammar { line: String },
    #[error("invalid {field}: {value}")]
    Field { field: &'static str, value: String },
}
