use std::boxed::Box;
use std::env;
use std::marker::{Send, Sync};
use std::result::Result as DefaultResult;

use crate::error::{AppError, AppErrorCode};

pub trait AbstractConfidentiality: Send + Sync {
    // read-only interface to fetch user-defined private data
    fn try_get_payload(&self, id_: &str) -> DefaultResult<String, AppError>;
}

/// gateway credentials are supplied through process environment variables,
/// they must never be written to any config file or response payload
pub struct EnvVarConfidentiality;

impl AbstractConfidentiality for EnvVarConfidentiality {
    fn try_get_payload(&self, id_: &str) -> DefaultResult<String, AppError> {
        match env::var(id_) {
            Ok(v) if !v.is_empty() => Ok(v),
            _others => Err(AppError {
                code: AppErrorCode::MissingSecret,
                detail: Some(id_.to_string()),
            }),
        }
    }
}

pub fn build_context() -> Box<dyn AbstractConfidentiality> {
    Box::new(EnvVarConfidentiality)
}
