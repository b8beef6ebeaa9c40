//! Domain logic for the blog backend.
//!
//! This crate has no I/O of its own: repositories in `blog-db` and handlers
//! in `blog-api` feed it rows and act on its results.

pub mod category;
pub mod comment;
pub mod datetime;
pub mod error;
pub mod pagination;
pub mod retention;
pub mod roles;
pub mod tree;
pub mod types;
