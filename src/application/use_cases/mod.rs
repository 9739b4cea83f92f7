mod build_prompt;
mod conversation;

pub use build_prompt::*;
pub use conversation::*;
