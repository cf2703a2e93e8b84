//! reviewbot: relays homework review status changes to Telegram.
//!
//! The [`agent::ReviewPoller`] polls a [`review::ReviewSource`] on a fixed
//! interval, interprets the answer and forwards the result through a
//! [`channels::Notifier`].

pub mod agent;
pub mod channels;
pub mod config;
pub mod error;
pub mod review;
