// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use nowhere_core::{Filter, FindQuery, NowhereError, ProviderMessage, SortDirection};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{Agency, non_blank};
use crate::counter::CounterName;
use crate::entities::{
    CHAT_MESSAGES, CHAT_SESSIONS, ChatMessage, ChatMessageCreate, ChatSession, from_document,
};
use crate::pagination::{CHAT_HISTORY_PAGE, PageParams};

/// Prior exchanges sent to the model as conversation context.
const HISTORY_TURNS: u64 = 20;

/// Reply returned to the chat caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(skip)]
    pub message_id: String,
    #[serde(skip)]
    pub degraded: bool,
}

impl Agency {
    /// Opens a chat session and counts it.
    pub async fn open_chat_session(
        &self,
        user_id: Option<String>,
    ) -> Result<ChatSession, NowhereError> {
        let session = ChatSession::open(non_blank(user_id));
        self.persist(CHAT_SESSIONS, &session).await?;
        info!(session_id = %session.session_id, "chat session opened");

        self.counter.record(CounterName::ChatSessions).await;
        Ok(session)
    }

    /// Answers a chat message and stores the exchange.
    ///
    /// The model is asked first. If persisting afterwards fails, the reply is
    /// lost and the error is returned.
    pub async fn send_chat_message(
        &self,
        message: ChatMessageCreate,
    ) -> Result<ChatReply, NowhereError> {
        message.validate()?;

        let history = match self.conversation_context(&message.session_id).await {
            Ok(history) => history,
            Err(e) => {
                warn!(session_id = %message.session_id, error = %e, "failed to load chat history, replying without context");
                Vec::new()
            }
        };
        let completion = self
            .assistant
            .reply(&message.session_id, history, &message.message)
            .await;

        let record = message.into_record(completion.text);
        self.persist(CHAT_MESSAGES, &record).await?;

        match self
            .store
            .increment(
                CHAT_SESSIONS,
                &Filter::new().eq("session_id", record.session_id.as_str()),
                "total_messages",
                1,
            )
            .await
        {
            Ok(0) => debug!(session_id = %record.session_id, "message for unknown session"),
            Ok(_) => {}
            Err(e) => {
                warn!(session_id = %record.session_id, error = %e, "failed to update session message count")
            }
        }

        Ok(ChatReply {
            response: record.response,
            message_id: record.meta.id,
            degraded: completion.degraded,
        })
    }

    /// Messages of a session, oldest first.
    pub async fn chat_history(
        &self,
        session_id: &str,
        page: PageParams,
    ) -> Result<Vec<ChatMessage>, NowhereError> {
        let (skip, limit) = CHAT_HISTORY_PAGE.resolve(page)?;
        let filter = Filter::new().eq("session_id", session_id);
        let find = FindQuery::new(filter, "created_at", SortDirection::Ascending).page(skip, limit);
        self.list(CHAT_MESSAGES, &find).await
    }

    /// The last [`HISTORY_TURNS`] exchanges as alternating user/assistant
    /// turns, oldest first.
    async fn conversation_context(
        &self,
        session_id: &str,
    ) -> Result<Vec<ProviderMessage>, NowhereError> {
        let filter = Filter::new().eq("session_id", session_id);
        let find = FindQuery::new(filter, "created_at", SortDirection::Descending)
            .page(0, HISTORY_TURNS);
        let mut recent = self
            .store
            .find_many(CHAT_MESSAGES, &find)
            .await?
            .into_iter()
            .map(from_document::<ChatMessage>)
            .collect::<Result<Vec<_>, _>>()?;
        recent.reverse();

        Ok(recent
            .into_iter()
            .flat_map(|m| {
                [
                    ProviderMessage::user(m.message),
                    ProviderMessage::assistant(m.response),
                ]
            })
            .collect())
    }
}
