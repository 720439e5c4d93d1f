//! Integration tests for the ziplift CLI

pub mod check;
pub mod common;
pub mod config;
pub mod inspect;
pub mod upload;
