use chrono::Utc;
use std::sync::Arc;
use tracing::instrument;

use crate::models::{
    Conversation, ConversationThread, Message, Recipient, RepositoryError, ServiceError,
    ServiceResult, ValidationError,
};
use crate::repositories::ConversationRepository;

/// Inbox operations for the signed-in user
pub struct MessageService {
    repository: Arc<dyn ConversationRepository>,
}

impl MessageService {
    pub fn new(repository: Arc<dyn ConversationRepository>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self))]
    pub async fn list_conversations(&self, query: Option<&str>) -> ServiceResult<Vec<Conversation>> {
        let conversations = self.repository.find_all().await?;
        let query = query.map(str::trim).filter(|q| !q.is_empty());

        Ok(conversations
            .into_iter()
            .filter(|c| query.map_or(true, |q| c.matches_participant(q)))
            .collect())
    }

    /// Messages of a conversation, oldest first; opening it marks it read
    #[instrument(skip(self), fields(conversation_id = %id))]
    pub async fn open_conversation(&self, id: &str) -> ServiceResult<ConversationThread> {
        let mut conversation = self.find(id).await?;
        let mut messages = self.repository.messages(id).await?;
        messages.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

        if conversation.unread_count > 0 || !conversation.last_message.is_read {
            conversation = self.repository.mark_read(id).await?;
        }

        Ok(ConversationThread {
            conversation,
            messages,
        })
    }

    #[instrument(skip(self, text), fields(conversation_id = %id))]
    pub async fn send_message(&self, id: &str, text: &str) -> ServiceResult<Message> {
        let text = required_text(text)?;

        let message = Message::from_current_user(id, text, Utc::now());
        let message = match self.repository.append_message(message).await {
            Ok(message) => message,
            Err(RepositoryError::NotFound) => {
                crate::warn_with_trace!(conversation_id = %id, "Conversation not found");
                return Err(ServiceError::ConversationNotFound { id: id.to_string() });
            }
            Err(e) => return Err(e.into()),
        };

        crate::info_with_trace!(message_id = %message.id, "Message sent");
        Ok(message)
    }

    #[instrument(skip(self), fields(recipient_id = %id))]
    pub async fn get_recipient(&self, id: &str) -> ServiceResult<Recipient> {
        self.repository
            .find_recipient(id)
            .await?
            .ok_or_else(|| ServiceError::RecipientNotFound { id: id.to_string() })
    }

    /// Write to a recipient, reusing the existing conversation with them when there is one
    #[instrument(skip(self, text), fields(recipient_id = %recipient_id))]
    pub async fn start_conversation(
        &self,
        recipient_id: &str,
        text: &str,
    ) -> ServiceResult<ConversationThread> {
        let text = required_text(text)?;
        let recipient = self.get_recipient(recipient_id).await?;

        let conversation = match self.repository.find_by_participant(&recipient.id).await? {
            Some(existing) => {
                self.send_message(&existing.id, text).await?;
                existing
            }
            None => {
                let opening = Message::from_current_user("", text, Utc::now());
                let conversation = Conversation::with_recipient(&recipient, &opening);
                let opening = Message {
                    conversation_id: conversation.id.clone(),
                    ..opening
                };
                crate::info_with_trace!(conversation_id = %conversation.id, "Starting conversation");
                self.repository.create(conversation, opening).await?
            }
        };

        self.open_conversation(&conversation.id).await
    }

    async fn find(&self, id: &str) -> ServiceResult<Conversation> {
        match self.repository.find_by_id(id).await? {
            Some(conversation) => Ok(conversation),
            None => {
                crate::warn_with_trace!(conversation_id = %id, "Conversation not found");
                Err(ServiceError::ConversationNotFound { id: id.to_string() })
            }
        }
    }
}

fn required_text(text: &str) -> ServiceResult<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::RequiredField {
            field: "text".to_string(),
        }
        .into());
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CURRENT_USER_ID;
    use crate::repositories::{seed, InMemoryConversationRepository, SimulatedLatency};
    use async_trait::async_trait;
    use mockall::mock;

    mock! {
        TestConversationRepository {}

        #[async_trait]
        impl ConversationRepository for TestConversationRepository {
            async fn find_all(&self) -> Result<Vec<Conversation>, RepositoryError>;
            async fn find_by_id(&self, id: &str) -> Result<Option<Conversation>, RepositoryError>;
            async fn find_by_participant(&self, participant_id: &str) -> Result<Option<Conversation>, RepositoryError>;
            async fn create(&self, conversation: Conversation, first_message: Message) -> Result<Conversation, RepositoryError>;
            async fn mark_read(&self, id: &str) -> Result<Conversation, RepositoryError>;
            async fn messages(&self, conversation_id: &str) -> Result<Vec<Message>, RepositoryError>;
            async fn append_message(&self, message: Message) -> Result<Message, RepositoryError>;
            async fn find_recipient(&self, id: &str) -> Result<Option<Recipient>, RepositoryError>;
        }
    }

    fn inbox() -> Vec<Conversation> {
        seed::conversations(Utc::now())
    }

    #[tokio::test]
    async fn test_list_conversations_filters_by_name() {
        let mut mock_repo = MockTestConversationRepository::new();
        mock_repo.expect_find_all().returning(|| Ok(inbox()));

        let service = MessageService::new(Arc::new(mock_repo));

        let all = service.list_conversations(None).await.unwrap();
        assert_eq!(all.len(), 5);

        let filtered = service.list_conversations(Some("MILLER")).await.unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].participant.id, "user-4");
    }

    #[tokio::test]
    async fn test_open_conversation_marks_read() {
        let mut mock_repo = MockTestConversationRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(|id| Ok(inbox().into_iter().find(|c| c.id == id)));
        mock_repo.expect_messages().times(1).returning(|id| {
            let now = Utc::now();
            let conversation = seed::conversations(now)
                .into_iter()
                .find(|c| c.id == id)
                .ok_or(RepositoryError::NotFound)?;
            let mut messages = seed::conversation_messages(&conversation, now);
            messages.reverse();
            Ok(messages)
        });
        mock_repo
            .expect_mark_read()
            .with(mockall::predicate::eq("conv-1".to_string()))
            .times(1)
            .returning(|id| {
                let mut conversation = inbox()
                    .into_iter()
                    .find(|c| c.id == id)
                    .ok_or(RepositoryError::NotFound)?;
                conversation.mark_read();
                Ok(conversation)
            });

        let service = MessageService::new(Arc::new(mock_repo));
        let thread = service.open_conversation("conv-1").await.unwrap();

        assert_eq!(thread.conversation.unread_count, 0);
        assert_eq!(thread.messages.len(), 8);
        assert!(thread
            .messages
            .windows(2)
            .all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[tokio::test]
    async fn test_open_conversation_not_found() {
        let mut mock_repo = MockTestConversationRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));
        mock_repo.expect_messages().never();

        let service = MessageService::new(Arc::new(mock_repo));
        let result = service.open_conversation("conv-404").await;

        assert!(matches!(result, Err(ServiceError::ConversationNotFound { .. })));
    }

    #[tokio::test]
    async fn test_send_message_updates_last_message() {
        let mut mock_repo = MockTestConversationRepository::new();
        mock_repo
            .expect_append_message()
            .times(1)
            .withf(|m| m.conversation_id == "conv-2" && m.text == "See you tomorrow")
            .returning(Ok);

        let service = MessageService::new(Arc::new(mock_repo));
        let message = service
            .send_message("conv-2", "  See you tomorrow ")
            .await
            .unwrap();

        assert_eq!(message.text, "See you tomorrow");
        assert_eq!(message.sender.id, CURRENT_USER_ID);
        assert!(!message.is_read);
    }

    #[tokio::test]
    async fn test_send_empty_message_is_rejected() {
        let mock_repo = MockTestConversationRepository::new();
        let service = MessageService::new(Arc::new(mock_repo));

        let result = service.send_message("conv-1", "   ").await;
        assert!(matches!(result, Err(ServiceError::ValidationError { .. })));
    }

    #[tokio::test]
    async fn test_start_conversation_with_new_recipient() {
        let mut mock_repo = MockTestConversationRepository::new();
        mock_repo
            .expect_find_recipient()
            .returning(|id| Ok(seed::recipients().into_iter().find(|r| r.id == id)));
        mock_repo
            .expect_find_by_participant()
            .times(1)
            .returning(|_| Ok(None));
        mock_repo
            .expect_create()
            .times(1)
            .withf(|c, m| c.id == m.conversation_id && m.text == "Hello Robert")
            .returning(|c, _| Ok(c));
        mock_repo
            .expect_find_by_id()
            .returning(|id| {
                let opening = Message::from_current_user(id, "Hello Robert", Utc::now());
                let recipient = seed::recipients().remove(2);
                let mut conversation = Conversation::with_recipient(&recipient, &opening);
                conversation.id = id.to_string();
                Ok(Some(conversation))
            });
        mock_repo.expect_messages().returning(|id| {
            Ok(vec![Message::from_current_user(id, "Hello Robert", Utc::now())])
        });
        mock_repo.expect_mark_read().returning(|id| {
            let opening = Message::from_current_user(id, "Hello Robert", Utc::now());
            let recipient = seed::recipients().remove(2);
            let mut conversation = Conversation::with_recipient(&recipient, &opening);
            conversation.id = id.to_string();
            conversation.mark_read();
            Ok(conversation)
        });

        let service = MessageService::new(Arc::new(mock_repo));
        let thread = service.start_conversation("103", "Hello Robert").await.unwrap();

        assert_eq!(thread.conversation.participant.name, "Robert Johnson");
        assert_eq!(thread.messages.len(), 1);
    }

    #[tokio::test]
    async fn test_start_conversation_unknown_recipient() {
        let mut mock_repo = MockTestConversationRepository::new();
        mock_repo.expect_find_recipient().returning(|_| Ok(None));

        let service = MessageService::new(Arc::new(mock_repo));
        let result = service.start_conversation("999", "Hi").await;

        assert!(matches!(result, Err(ServiceError::RecipientNotFound { .. })));
    }

    #[tokio::test]
    async fn test_send_to_unknown_conversation() {
        let mut mock_repo = MockTestConversationRepository::new();
        mock_repo
            .expect_append_message()
            .returning(|_| Err(RepositoryError::NotFound));

        let service = MessageService::new(Arc::new(mock_repo));
        let result = service.send_message("conv-404", "Hello?").await;

        assert!(matches!(result, Err(ServiceError::ConversationNotFound { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_open_and_send_keep_both_changes() {
        let repository = Arc::new(InMemoryConversationRepository::new(
            SimulatedLatency::from_millis(20, 50),
        ));
        let service = MessageService::new(repository.clone());
        let before = repository.messages("conv-1").await.unwrap().len();

        let (opened, first, second) = tokio::join!(
            service.open_conversation("conv-1"),
            service.send_message("conv-1", "First follow-up"),
            service.send_message("conv-1", "Second follow-up"),
        );
        opened.unwrap();
        let first = first.unwrap();
        let second = second.unwrap();

        assert_eq!(
            repository.messages("conv-1").await.unwrap().len(),
            before + 2
        );

        let conversation = repository.find_by_id("conv-1").await.unwrap().unwrap();
        assert_eq!(conversation.unread_count, 0);
        let latest = if second.timestamp >= first.timestamp {
            &second
        } else {
            &first
        };
        assert_eq!(conversation.last_message.timestamp, latest.timestamp);
    }
}
