//! Tienda Storefront library.
//!
//! Client-side storefront behavior re-expressed as a data/service layer with
//! a thin view adapter:
//!
//! - [`storage`] - key-value persistence split into a durable scope and a
//!   session scope (the browsing-session analogue)
//! - [`stores`] - theme, session, and cart state on top of storage
//! - [`flows`] - UI controllers (auth, cart panel, checkout summary, profile)
//!   that talk to declared view ports instead of querying a document
//! - [`views`] - the port traits and view models, bound once at startup
//! - [`app`] - the page-session controller wiring everything together
//!
//! Everything is single-threaded and event-driven: flow methods are the
//! event callbacks a view adapter invokes. Shared state uses `Rc`/`RefCell`,
//! so none of these types are `Send`.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod config;
pub mod error;
pub mod flows;
pub mod models;
pub mod storage;
pub mod stores;
pub mod views;
