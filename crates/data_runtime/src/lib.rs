//! data_runtime: configuration schemas and loaders for the headless host.
//!
//! Files live under the workspace `data/config/` directory; every loader
//! falls back to defaults when its file is missing and then applies env
//! overrides.

pub mod configs;
