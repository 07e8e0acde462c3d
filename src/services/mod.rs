//! # Business Logic Services
//!
//! This module contains the core business logic services for the Velora
//! application. Services encapsulate domain-specific functionality and
//! provide clean interfaces for use by HTTP handlers and other application
//! components.
//!
//! ## Available Services
//!
//! - **Availability** (`availability`) - Orchestrates schedule reads/writes
//!   and per-date resolution over the repository
//! - **Repository** (`repository`) - Availability document storage with
//!   Postgres and in-memory implementations

pub mod availability;
pub mod repository;
