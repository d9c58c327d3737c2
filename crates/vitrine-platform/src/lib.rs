//! Platform runners.
//!
//! - `headless`: composes into HTML documents with manual time; used for the
//!   static export and for end-to-end tests.
//! - `web` (wasm32): mounts into a DOM element, backed by `localStorage`,
//!   `matchMedia` and `setInterval`.

pub mod headless;
pub mod store;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use headless::{Headless, HeadlessOptions, STATE_DIR_VAR};
pub use store::{COLOR_SCHEME_VAR, EnvColorScheme, JsonFileStore, PREFERENCES_FILE};
#[cfg(target_arch = "wasm32")]
pub use web::{WebOptions, run_web_app};
