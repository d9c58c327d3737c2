//! # State, Scopes, and Timers
//!
//! Vitrine pages are plain functions that build a `View` tree every frame.
//! Anything that has to outlive a single frame lives in one of these:
//!
//! - `Signal<T>`: observable value; writes notify subscribers.
//! - `remember*`: storage bound to the composer, by slot or by key.
//! - `Scope`: owner of cleanups; disposing it runs every registered disposer.
//! - `Interval`: owned recurring timer; dropping it cancels the timer.
//!
//! ## Signals
//!
//! ```rust
//! use vitrine_core::*;
//!
//! let count = signal(0);
//! count.set(1);
//! count.update(|v| *v += 1);
//! assert_eq!(count.get(), 2);
//! ```
//!
//! ## Effects and cleanup
//!
//! `disposable_effect` runs once per key and registers its `Dispose` on the
//! current scope, so the cleanup runs when the key changes or the scope that
//! owns the view goes away (e.g. a navigation entry is popped):
//!
//! ```rust
//! use vitrine_core::*;
//!
//! let scope = Scope::new();
//! scope.run(|| {
//!     disposable_effect("ticker", 3usize, || {
//!         let interval = set_interval(std::time::Duration::from_secs(4), || {});
//!         on_unmount(move || interval.cancel())
//!     });
//! });
//! scope.dispose();
//! ```
//!
//! ## Theme preference
//!
//! `ThemePreference` resolves light/dark once per page load (stored value
//! first, then the host's color-scheme signal), applies it to the styling
//! root, and persists every toggle. Hand it to views with `with_local`.

pub mod animation;
pub mod color;
pub mod document;
pub mod effects;
pub mod effects_ext;
pub mod error;
pub mod input;
pub mod locals;
pub mod modifier;
pub mod prelude;
pub mod runtime;
pub mod scope;
pub mod semantics;
pub mod signal;
pub mod tests;
pub mod theme;
pub mod timer;
pub mod view;

pub use animation::*;
pub use color::*;
pub use document::*;
pub use effects::*;
pub use effects_ext::*;
pub use error::*;
pub use input::*;
pub use locals::*;
pub use modifier::*;
pub use runtime::*;
pub use scope::*;
pub use semantics::*;
pub use signal::*;
pub use theme::*;
pub use timer::*;
pub use view::*;
