//! Shared model for the ThinkCyber admin workspace.
//!
//! Both the `backend` proxy and the `frontend` admin UI depend on this crate, so the page
//! document that the canvas edits is the same value the backend forwards and persists.

pub mod dashboard;
pub mod model;
pub mod requests;
