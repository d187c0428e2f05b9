//! Copy-mapping synchronizer.
//!
//! Copies files and directory trees that installed packages declare in
//! their `copy-mapping` extra configuration into the project, and deletes
//! them again when a package is uninstalled.  Each package picks an
//! overwrite strategy (`simple` keeps existing files, `force` replaces
//! them) and a destination root.
//!
//! The public API is organised into layers:
//!
//! - **[`config`]**: merge and validate `extra` blocks into an [`config::EffectiveConfig`]
//! - **[`resources`]**: plan and apply one mapping pair on the filesystem
//! - **[`sync`]**: the [`sync::Synchronizer`] driving every package
//! - **[`host`]**: traits a package manager implements to drive the synchronizer
//! - **[`composer`]**: a [`host::PackageRegistry`] over a Composer project on disk
//! - **[`commands`]**: top-level subcommand orchestration (`sync`, `remove`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod composer;
pub mod config;
pub mod error;
pub mod host;
pub mod logging;
pub mod resources;
pub mod sync;
