use std::sync::Arc;

use anyhow::Result;
use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::application::GenerativeClient;
use crate::domain::{DomainError, GenerateContentRequest, GenerateContentResponse};

use super::app::App;
use super::view;

type Outcome = Result<GenerateContentResponse, DomainError>;

/// Take over the terminal and run the chat UI until the user quits.
pub async fn run(client: Arc<dyn GenerativeClient>) -> Result<()> {
    let mut terminal = ratatui::try_init()?;
    let result = run_loop(&mut terminal, client).await;
    ratatui::restore();
    result
}

async fn run_loop(terminal: &mut DefaultTerminal, client: Arc<dyn GenerativeClient>) -> Result<()> {
    let mut app = App::new();
    let mut events = EventStream::new();
    let (tx, mut rx) = mpsc::unbounded_channel::<Outcome>();

    info!("Chat UI started");

    loop {
        terminal.draw(|frame| view::draw(frame, &app))?;
        if app.should_quit() {
            break;
        }

        tokio::select! {
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) => {
                    if let Some(request) = app.handle_key(key) {
                        dispatch(Arc::clone(&client), request, tx.clone());
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
            Some(outcome) = rx.recv() => app.on_reply(outcome),
        }
    }

    info!("Chat UI stopped");
    Ok(())
}

/// Run the request off the UI loop. Exactly one outcome is posted back per
/// request, even if the request task panics, so pending always clears.
fn dispatch(
    client: Arc<dyn GenerativeClient>,
    request: GenerateContentRequest,
    tx: mpsc::UnboundedSender<Outcome>,
) {
    debug!("Dispatching request with {} turns", request.contents.len());
    tokio::spawn(async move {
        let outcome = match tokio::spawn(async move { client.generate(&request).await }).await {
            Ok(outcome) => outcome,
            Err(e) => Err(DomainError::internal(format!("request task failed: {e}"))),
        };
        let _ = tx.send(outcome);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::ScriptedClient;

    #[tokio::test]
    async fn test_dispatch_posts_exactly_one_outcome() {
        let client: Arc<dyn GenerativeClient> = Arc::new(ScriptedClient::new().with_reply("ok"));
        let (tx, mut rx) = mpsc::unbounded_channel();

        dispatch(client, crate::application::build_prompt(&[]), tx);

        let outcome = rx.recv().await.expect("outcome posted");
        assert_eq!(outcome.unwrap().reply_text(), Some("ok"));
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_dispatch_posts_failures_too() {
        let client: Arc<dyn GenerativeClient> =
            Arc::new(ScriptedClient::new().with_transport_failure("offline"));
        let (tx, mut rx) = mpsc::unbounded_channel();

        dispatch(client, crate::application::build_prompt(&[]), tx);

        assert!(rx.recv().await.unwrap().unwrap_err().is_transport());
    }
}
