mod gemini_client;
mod http;
mod proxy_client;
mod scripted_client;

pub use gemini_client::*;
pub use proxy_client::*;
pub use scripted_client::*;
