mod app_error;
mod conversions;
mod db_mapping;

pub use app_error::{AppError, AppResult, ValidationIssue};
