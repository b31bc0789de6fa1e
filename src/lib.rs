//! portfolio-counter - view, click and visit counters for a portfolio site
//!
//! A thin HTTP-to-SQL layer: each route runs one upsert or read against a
//! shared PostgreSQL pool and answers with a small JSON envelope.

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod storage;
