//! Trait definitions for PSA operations.
//!
//! Every resource type is a marker struct implementing [`Entity`], which
//! names its endpoint path. The capability traits (`Create`, `Get`,
//! `Update`, `Patch`, `Delete`, `List`) provide their method bodies, so an
//! entity opts into an operation with an empty impl. This mirrors the
//! vendor's per-resource capability matrix without repeating any request
//! shaping code.

mod create;
mod delete;
mod get;
mod list;
mod patch;
mod update;

pub use create::Create;
pub use delete::Delete;
pub use get::Get;
pub use list::List;
pub use patch::Patch;
pub use update::Update;

/// A REST resource exposed by the PSA API.
pub trait Entity {
    /// Collection endpoint path, relative to the base URL
    /// (e.g. `"Appointments"`).
    const ENDPOINT: &'static str;
}
