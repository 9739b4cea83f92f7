mod credential;
mod generate_content;
mod message;
mod transcript;

pub use credential::*;
pub use generate_content::*;
pub use message::*;
pub use transcript::*;
