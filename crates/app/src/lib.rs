//! # smarthome-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `DeviceRepository`: the device record store
//!   - `AutomationRepository`: CRUD for automation rules
//! - Define **driving/inbound ports** as use-case structs:
//!   - `DeviceService`: register, list, get, update, delete, control
//!   - `AutomationService`: CRUD for automation rules
//! - Orchestrate domain objects without knowing *how* persistence works
//!
//! ## Dependency rule
//! Depends on `smarthome-domain` only. Never imports adapter crates.
//! Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
