//! Core building blocks: ordered options, locators, the command builder and
//! serde job parameters. The high-level `api` module is built on top of these.
pub mod command;
pub mod locator;
pub mod options;
pub mod params;
