//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate resolution, repositories, and policies into use-case APIs.
//! - Keep UI layers decoupled from storage and resolution details.

pub mod area_service;
