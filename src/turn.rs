use crate::{
    api::Transport,
    chat::MessageId,
    decoder::Utf8StreamDecoder,
    errors::ChatResult,
};
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

/// One submitted question waiting for its answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTurn {
    pub question: String,
    pub bot: MessageId,
}

/// Progress of a turn, applied to the conversation by the UI loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnEvent {
    /// Response headers arrived; the placeholder text is cleared.
    Streaming(MessageId),
    /// The full answer text accumulated so far.
    Progress { id: MessageId, text: String },
    Completed(MessageId),
    Failed(MessageId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Completed(String),
    Failed,
}

/// Runs a turn to completion, reporting progress on `events`.
///
/// Failures never escape: they are logged and reported as [`TurnEvent::Failed`].
/// A closed event channel only means nobody is watching anymore.
pub async fn run_turn(
    transport: Arc<dyn Transport>,
    turn: PendingTurn,
    events: UnboundedSender<TurnEvent>,
) -> TurnOutcome {
    let id = turn.bot;
    log::debug!("turn {} started", id.index());

    match stream_answer(transport.as_ref(), turn, &events).await {
        Ok(answer) => {
            log::debug!("turn {} completed ({} bytes)", id.index(), answer.len());
            let _ = events.send(TurnEvent::Completed(id));
            TurnOutcome::Completed(answer)
        }
        Err(e) => {
            log::error!("turn {} failed: {}", id.index(), e);
            let _ = events.send(TurnEvent::Failed(id));
            TurnOutcome::Failed
        }
    }
}

async fn stream_answer(
    transport: &dyn Transport,
    turn: PendingTurn,
    events: &UnboundedSender<TurnEvent>,
) -> ChatResult<String> {
    let id = turn.bot;
    let mut stream = transport.ask(turn.question).await?;
    let _ = events.send(TurnEvent::Streaming(id));

    let mut decoder = Utf8StreamDecoder::new();
    let mut answer = String::new();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        answer.push_str(&decoder.decode(&chunk));
        let _ = events.send(TurnEvent::Progress {
            id,
            text: answer.clone(),
        });
    }

    let tail = decoder.finish();
    if !tail.is_empty() {
        answer.push_str(&tail);
        let _ = events.send(TurnEvent::Progress {
            id,
            text: answer.clone(),
        });
    }

    Ok(answer)
}
