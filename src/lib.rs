//! Matcha
//!
//! Client core for a café pre-order flow: load the menu from the café's REST
//! backend, build a cart of customised drinks and dishes, and submit it as a
//! pre-order to be paid at the counter.

pub mod api;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod cli;
pub mod config;
pub mod context;
pub mod items;
pub mod logging;
pub mod prelude;
pub mod pricing;
pub mod products;
