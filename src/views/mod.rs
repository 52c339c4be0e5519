//! Read-side computations over the in-memory snapshot.

pub mod dashboard;
pub mod list;
