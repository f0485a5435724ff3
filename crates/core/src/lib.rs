//! Validation core for the user-management dashboard.
//!
//! Holds the Chilean RUT checksum validator and the rules applied to the
//! user create/edit forms before they are submitted. Everything here is
//! pure logic with no I/O besides reading configuration from the
//! environment.

pub mod config;
pub mod error;
pub mod rut;
pub mod users;
