//! # smarthome-domain
//!
//! Pure domain model for the smarthome control API.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Devices** and their status vocabulary
//! - Define the **Device type registry** (allowed actions, default command,
//!   and the attribute effect of each action)
//! - **Control**: validate a control request and compute the resulting device
//! - Define **Automation rules** (stored, not evaluated)
//! - Define **Appliance commands** for cameras, TVs and smart doors
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod appliance;
pub mod automation;
pub mod control;
pub mod device;
pub mod device_type;
pub mod status;
