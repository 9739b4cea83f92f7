use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::application::ConversationController;
use crate::domain::{DomainError, GenerateContentRequest, GenerateContentResponse};

const PAGE: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Landing,
    Chat,
}

/// Everything the terminal front-end shows, plus the key bindings that
/// mutate it. Drawing lives in [`super::view`].
#[derive(Debug)]
pub struct App {
    screen: Screen,
    conversation: ConversationController,
    /// Lines scrolled back from the newest message.
    scroll_back: u16,
    should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            screen: Screen::Landing,
            conversation: ConversationController::new(),
            scroll_back: 0,
            should_quit: false,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn conversation(&self) -> &ConversationController {
        &self.conversation
    }

    pub fn scroll_back(&self) -> u16 {
        self.scroll_back
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Apply a key press. Returns the prompt envelope when the key started
    /// a send; the caller is responsible for delivering the outcome to
    /// [`App::on_reply`].
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<GenerateContentRequest> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return None;
        }

        match self.screen {
            Screen::Landing => {
                match key.code {
                    KeyCode::Enter => self.screen = Screen::Chat,
                    KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
                    _ => {}
                }
                None
            }
            Screen::Chat => self.handle_chat_key(key),
        }
    }

    fn handle_chat_key(&mut self, key: KeyEvent) -> Option<GenerateContentRequest> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('r') && self.conversation.reset() {
                self.scroll_back = 0;
            }
            return None;
        }

        match key.code {
            KeyCode::Enter => {
                let text = self.conversation.input().to_string();
                let request = self.conversation.begin_send(&text);
                if request.is_some() {
                    self.scroll_back = 0;
                }
                return request;
            }
            KeyCode::Char(c) => self.conversation.push_char(c),
            KeyCode::Backspace => self.conversation.pop_char(),
            KeyCode::Up => self.scroll_back = self.scroll_back.saturating_add(1),
            KeyCode::Down => self.scroll_back = self.scroll_back.saturating_sub(1),
            KeyCode::PageUp => self.scroll_back = self.scroll_back.saturating_add(PAGE),
            KeyCode::PageDown => self.scroll_back = self.scroll_back.saturating_sub(PAGE),
            KeyCode::Esc => self.screen = Screen::Landing,
            _ => {}
        }
        None
    }

    pub fn on_reply(&mut self, outcome: Result<GenerateContentResponse, DomainError>) {
        self.conversation.complete(outcome);
        self.scroll_back = 0;
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
