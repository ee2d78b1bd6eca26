//! Configuration for a checker execution.
//!
//! A [`Settings`] value bundles everything one execution needs: the file
//! list, the binary resolution inputs, the invocation splitting policy, and
//! the failure policy. Construct it via [`SettingsBuilder`].

mod builder;
mod core;

pub use builder::SettingsBuilder;
pub use core::Settings;
