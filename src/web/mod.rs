//! Server-rendered web pages.

pub mod handlers;
