//! # Hotel Menu Telegram Bot
//!
//! A Telegram bot for Bisrat Hotel that lets customers browse the menu as a
//! paged image carousel, look up the hotel's bank accounts and send feedback
//! that is relayed to the staff group chat.

pub mod bot;
pub mod carousel;
pub mod catalog;
pub mod config;
pub mod gateway;
pub mod localization;
pub mod logging;
pub mod session;
