pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    build_prompt, ConversationController, GenerativeClient, UpstreamReply, EMPTY_REPLY_FALLBACK,
    SYSTEM_INSTRUCTION, TRANSPORT_FAILURE_FALLBACK,
};

pub use cli::Commands;

pub use connector::{
    build_router, serve, Container, ContainerConfig, GeminiClient, GeminiConfig, ProxyClient,
    ScriptedClient, CHAT_ROUTE,
};

pub use domain::{
    ApiKey, Content, DomainError, GenerateContentRequest, GenerateContentResponse, Message, Part,
    Role, Transcript, WELCOME_MESSAGE,
};
