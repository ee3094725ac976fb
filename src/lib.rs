//! Session-scoped todo lists.
//!
//! The domain model lives in [`models`] and [`sort`]; [`session`] and [`db`]
//! carry it across requests, and [`api`] exposes it over HTTP.

pub mod api;
pub mod db;
pub mod models;
pub mod session;
pub mod sort;
