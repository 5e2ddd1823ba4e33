//! Casedesk: court case status lookup
//!
//! A single SQLite table of case records, a seeding routine for the sample
//! data set, a lookup service that shapes a case for display, and the HTTP
//! services (search page, JSON API, gateway) on top of them.

pub mod cli;
pub mod core;
pub mod web;
