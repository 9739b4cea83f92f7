//! Terminal chat front-end: a landing screen and a chat screen.

mod app;
mod event_loop;
pub mod markdown;
pub mod view;

pub use app::{App, Screen};
pub use event_loop::run;
