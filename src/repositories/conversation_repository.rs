use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{info, instrument};

use super::latency::SimulatedLatency;
use super::seed;
use crate::models::{Conversation, Message, Recipient, RepositoryError, RepositoryResult};

/// Inbox storage: conversations, their messages and the people one can write to
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    async fn find_all(&self) -> RepositoryResult<Vec<Conversation>>;

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Conversation>>;

    /// Conversation held with the given participant, if any
    async fn find_by_participant(
        &self,
        participant_id: &str,
    ) -> RepositoryResult<Option<Conversation>>;

    /// Store a new conversation together with its opening message
    async fn create(
        &self,
        conversation: Conversation,
        first_message: Message,
    ) -> RepositoryResult<Conversation>;

    /// Clear the unread marker of a conversation and return it
    async fn mark_read(&self, id: &str) -> RepositoryResult<Conversation>;

    /// Messages of a conversation in storage order
    async fn messages(&self, conversation_id: &str) -> RepositoryResult<Vec<Message>>;

    /// Add a message to its thread and make it the conversation's last message
    async fn append_message(&self, message: Message) -> RepositoryResult<Message>;

    async fn find_recipient(&self, id: &str) -> RepositoryResult<Option<Recipient>>;
}

#[derive(Default)]
struct Inbox {
    conversations: Vec<Conversation>,
    messages: HashMap<String, Vec<Message>>,
}

pub struct InMemoryConversationRepository {
    inbox: RwLock<Inbox>,
    recipients: Vec<Recipient>,
    latency: SimulatedLatency,
}

impl InMemoryConversationRepository {
    pub fn new(latency: SimulatedLatency) -> Self {
        Self::seeded_at(Utc::now(), latency)
    }

    /// Mock inbox whose relative timestamps are computed from `now`
    pub fn seeded_at(now: DateTime<Utc>, latency: SimulatedLatency) -> Self {
        let conversations = seed::conversations(now);
        let messages = conversations
            .iter()
            .map(|c| (c.id.clone(), seed::conversation_messages(c, now)))
            .collect();

        Self {
            inbox: RwLock::new(Inbox {
                conversations,
                messages,
            }),
            recipients: seed::recipients(),
            latency,
        }
    }

    pub fn empty(latency: SimulatedLatency) -> Self {
        Self {
            inbox: RwLock::new(Inbox::default()),
            recipients: seed::recipients(),
            latency,
        }
    }
}

#[async_trait]
impl ConversationRepository for InMemoryConversationRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> RepositoryResult<Vec<Conversation>> {
        self.latency.before_read().await;
        Ok(self.inbox.read().await.conversations.clone())
    }

    #[instrument(skip(self), fields(conversation_id = %id))]
    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Conversation>> {
        self.latency.before_read().await;
        let inbox = self.inbox.read().await;
        Ok(inbox.conversations.iter().find(|c| c.id == id).cloned())
    }

    #[instrument(skip(self), fields(participant_id = %participant_id))]
    async fn find_by_participant(
        &self,
        participant_id: &str,
    ) -> RepositoryResult<Option<Conversation>> {
        self.latency.before_read().await;
        let inbox = self.inbox.read().await;
        Ok(inbox
            .conversations
            .iter()
            .find(|c| c.participant.id == participant_id)
            .cloned())
    }

    #[instrument(skip(self, conversation, first_message), fields(conversation_id = %conversation.id))]
    async fn create(
        &self,
        conversation: Conversation,
        first_message: Message,
    ) -> RepositoryResult<Conversation> {
        self.latency.before_write().await;
        let mut inbox = self.inbox.write().await;
        if inbox.messages.contains_key(&conversation.id) {
            return Err(RepositoryError::ConstraintViolation {
                message: format!("conversation {} already exists", conversation.id),
            });
        }
        // Newest conversations are listed first
        inbox.conversations.insert(0, conversation.clone());
        inbox
            .messages
            .insert(conversation.id.clone(), vec![first_message]);
        info!("Conversation started");
        Ok(conversation)
    }

    #[instrument(skip(self), fields(conversation_id = %id))]
    async fn mark_read(&self, id: &str) -> RepositoryResult<Conversation> {
        self.latency.before_write().await;
        let mut inbox = self.inbox.write().await;
        let conversation = inbox
            .conversations
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(RepositoryError::NotFound)?;
        conversation.mark_read();
        Ok(conversation.clone())
    }

    #[instrument(skip(self), fields(conversation_id = %conversation_id))]
    async fn messages(&self, conversation_id: &str) -> RepositoryResult<Vec<Message>> {
        self.latency.before_read().await;
        let inbox = self.inbox.read().await;
        inbox
            .messages
            .get(conversation_id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    #[instrument(skip(self, message), fields(conversation_id = %message.conversation_id))]
    async fn append_message(&self, message: Message) -> RepositoryResult<Message> {
        self.latency.before_write().await;
        let mut inbox = self.inbox.write().await;
        let inbox = &mut *inbox;
        let conversation = inbox
            .conversations
            .iter_mut()
            .find(|c| c.id == message.conversation_id)
            .ok_or(RepositoryError::NotFound)?;
        let thread = inbox
            .messages
            .get_mut(&message.conversation_id)
            .ok_or(RepositoryError::NotFound)?;

        thread.push(message.clone());
        // A slower send never replaces a newer last message
        if message.timestamp >= conversation.last_message.timestamp {
            conversation.record_sent(&message);
        }
        info!("Message stored");
        Ok(message)
    }

    #[instrument(skip(self), fields(recipient_id = %id))]
    async fn find_recipient(&self, id: &str) -> RepositoryResult<Option<Recipient>> {
        self.latency.before_read().await;
        Ok(self.recipients.iter().find(|r| r.id == id).cloned())
    }
}
