//! Trait definitions for Grafana operations.
//!
//! Each entity type implements the traits it supports, encapsulating
//! endpoint differences in the implementations. Every operation is scoped
//! to an organization and issues exactly one request.

mod create;
mod delete;
mod get;
mod list;
mod update;

pub use create::Create;
pub use delete::Delete;
pub use get::Get;
pub use list::List;
pub use update::Update;
