//! Core traits for the API client and its file collaborator.

mod api;
mod file_io;

pub use api::EntityApi;
pub use file_io::FileIo;
