//! KopiKU Storefront library.
//!
//! Everything the KopiKU app does besides rendering screens: fetching the
//! coffee menu from the remote catalog, keeping the cart in sync with
//! durable local storage, the demo sign-in session, and the checkout flow.
//! A UI shell (the bundled CLI, or any other front end) constructs these
//! pieces explicitly and passes them where needed - there is no process
//! global.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod storage;
