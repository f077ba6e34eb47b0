//! A loadable value: the state of something fetched asynchronously, which is
//! either not requested yet, in flight, loaded, or failed.
//!
//! [`Loadable`] carries the transformations (`map_loaded`, `map_error`,
//! recovery, [`combine`]) as plain functions. [`LoadableStreamExt`] applies them
//! to every state of a stream, and [`LoadableStore`] keeps the current state of
//! one request behind a signal.

mod combine;
mod into_loadable;
mod loadable;
mod loadable_error;
mod loadable_store;
mod signal;
mod status;
mod stream_ext;

#[cfg(test)]
mod unit_tests;

pub use combine::*;
pub use into_loadable::*;
pub use loadable::*;
pub use loadable_error::*;
pub use loadable_store::*;
pub use signal::*;
pub use status::*;
pub use stream_ext::*;

/// Bounds for values and errors kept in a [`LoadableStore`].
pub trait Payload: Clone + Send + Sync + 'static {}

impl<T: Clone + Send + Sync + 'static> Payload for T {}
