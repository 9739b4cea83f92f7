pub mod chat_controller;
