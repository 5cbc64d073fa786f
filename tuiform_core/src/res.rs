//! Results and errors.

use compact_str::CompactString;

// anyhow {

/// [`anyhow::Error`]
pub type AnyErr = anyhow::Error;

/// [`anyhow::Result`] with `T` if ok, [`AnyErr`]([`anyhow::Error`]) if error.
pub type AnyResult<T> = anyhow::Result<T>;

// anyhow }

// std::io {

/// [`std::io::Error`]
pub type IoErr = std::io::Error;

/// [`std::io::ErrorKind`]
pub type IoErrKind = std::io::ErrorKind;

/// [`std::io::Result`] with `T` if ok.
pub type IoResult<T> = std::io::Result<T>;

// std::io }

// thiserror {

#[derive(Debug, Clone, thiserror::Error)]
/// Host-observable form errors.
pub enum FormError {
  #[error("Unknown widget type {0:?}")]
  UnknownWidgetType(CompactString),
}

/// [`Result`] with `T` if ok, [`FormError`] if error.
pub type FormResult<T> = Result<T, FormError>;

// thiserror }
