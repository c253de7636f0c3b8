// Allow some clippy lints
#![allow(clippy::module_inception)]
#![allow(clippy::new_without_default)]

pub mod access;
pub mod asset;
pub mod config;
pub mod controller;
pub mod crypto;
pub mod event;
pub mod shared;
