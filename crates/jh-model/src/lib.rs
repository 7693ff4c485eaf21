//! Domain types shared by the job-history tool service.
//!
//! The crate has no I/O: it describes what a log retrieval asks for
//! ([`LogRequest`], [`LogRange`], [`LogType`]), what it resolves to
//! ([`ResolvedLocation`]) and what it produces ([`LogResult`]).

mod domain;
pub use domain::*;

mod kind;
pub use kind::*;

mod error;
pub use error::ModelError;
