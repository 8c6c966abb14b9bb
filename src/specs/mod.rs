// src/specs/mod.rs
//! # Scraping “specs” module
//!
//! Page-specific knowledge of the upstream site lives here: which selectors mark the
//! data, what the in-page reader returns, and how a raw reading becomes a record.
//!
//! ## What lives here
//! - **Selectors** for one page, bundled in a spec struct so deployments can override them
//!   when the site shifts its markup (see `config::file`).
//! - **The in-page reader**: a script that turns live DOM rows into plain JSON view models.
//! - **Pure projection** from view models to `data` records. No browser, no I/O.
//!
//! ## What does **not** live here
//! - Launching or closing browsers (`browser`), navigation and waiting (`navigator`).
//! - Validation, error collapsing and session discipline (`schedule`).
//! - HTTP and filtering concerns (`server`, `data::ArrivalFilter`).
//!
//! ## Typical call chain
//! ```text
//! server / cli → schedule::ScheduleService::fetch
//!                  → navigator::navigate → navigator::wait_for_board
//!                  → specs::stop_board::read_board → project_rows
//! ```
//!
//! ## Known gap
//! If the site renames its classes, selectors quietly match nothing and a stop reads as an
//! empty board. The service logs a warning in that case but still answers with `[]`.
pub mod stop_board;
