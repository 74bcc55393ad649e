use thiserror::Error;

use crate::domain::TokenField;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("missing required fields: {}", join_labels(.0))]
    MissingFields(Vec<TokenField>),
}

fn join_labels(fields: &[TokenField]) -> String {
    fields
        .iter()
        .map(|field| field.label())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("address '{0}' is missing the 0x prefix")]
    MissingPrefix(String),
    #[error("address must have {expected} hex characters, got {actual}")]
    WrongLength { expected: usize, actual: usize },
    #[error("address contains non-lowercase-hex character '{0}'")]
    InvalidChar(char),
}
