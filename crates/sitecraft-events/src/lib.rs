//! Event plumbing shared by the Sitecraft crates.
//!
//! - [`ListenerSet`]: ordered listeners with per-listener failure isolation
//! - [`EventBus`]: named events over listener sets, with debounced dispatch
//! - [`Debouncer`]: trailing-edge coalescing against an explicit clock
//!
//! Everything here is single-threaded (`Rc`/`RefCell`); handles are cheap
//! to clone and share one registry.

mod bus;
mod debounce;
mod listener;

pub use bus::EventBus;
pub use debounce::{Debouncer, FRAME_INTERVAL};
pub use listener::{
    DispatchReport, Listener, ListenerError, ListenerResult, ListenerSet, Subscription, listener,
};
