//! Turns a project's `.env` file into compile-time definitions for firmware builds.
//!
//! ```no_run
//! use env_defines::{loader, DefineSet};
//!
//! let mut defines = DefineSet::new();
//! loader::load(std::path::Path::new("."), &mut defines);
//! for define in &defines {
//!     println!("{define}");
//! }
//! ```

pub mod define;
pub mod env;
pub mod error;
pub mod loader;
pub mod render;

pub use define::{Define, DefineSet, DefineSink};
pub use env::EnvTable;
pub use error::{Error, Result};
pub use loader::EnvDefineLoader;
