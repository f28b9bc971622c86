//! Mortgage-versus-cash simulator: compares buying a property with a loan
//! while investing the unborrowed capital against paying the full price up
//! front.
//!
//! [`core`] holds the pure numeric engine; [`api`] is the command line and
//! HTTP surface built on top of it.

pub mod api;
pub mod core;
