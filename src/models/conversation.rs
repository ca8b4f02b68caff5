use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const CURRENT_USER_ID: &str = "current-user";
pub const CURRENT_USER_NAME: &str = "You";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub online: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastMessage {
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub is_read: bool,
}

/// A message thread with one other participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub participant: Participant,
    pub last_message: LastMessage,
    pub unread_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageSender {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub conversation_id: String,
    pub sender: MessageSender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub is_read: bool,
}

/// Someone a new conversation can be started with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipient {
    pub id: String,
    pub name: String,
    pub title: String,
    pub online: bool,
}

/// A conversation opened together with its messages
#[derive(Debug, Clone, Serialize)]
pub struct ConversationThread {
    pub conversation: Conversation,
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartConversationRequest {
    pub recipient_id: String,
    #[serde(default)]
    pub text: String,
}

impl Conversation {
    /// Open a thread with `recipient` that has no read state yet.
    pub fn with_recipient(recipient: &Recipient, first_message: &Message) -> Self {
        Self {
            id: format!("conv-{}", &Uuid::new_v4().simple().to_string()[..8]),
            participant: Participant {
                id: recipient.id.clone(),
                name: recipient.name.clone(),
                online: recipient.online,
            },
            last_message: LastMessage {
                text: first_message.text.clone(),
                timestamp: first_message.timestamp,
                is_read: first_message.is_read,
            },
            unread_count: 0,
        }
    }

    pub fn matches_participant(&self, query: &str) -> bool {
        self.participant
            .name
            .to_lowercase()
            .contains(&query.to_lowercase())
    }

    pub fn mark_read(&mut self) {
        self.unread_count = 0;
        self.last_message.is_read = true;
    }

    pub fn record_sent(&mut self, message: &Message) {
        self.last_message = LastMessage {
            text: message.text.clone(),
            timestamp: message.timestamp,
            is_read: message.is_read,
        };
    }
}

impl Message {
    /// A message written by the signed-in user; unread until the other side opens it.
    pub fn from_current_user(conversation_id: &str, text: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: format!("msg-new-{}", Uuid::new_v4().simple()),
            conversation_id: conversation_id.to_string(),
            sender: MessageSender {
                id: CURRENT_USER_ID.to_string(),
                name: CURRENT_USER_NAME.to_string(),
            },
            text: text.to_string(),
            timestamp: now,
            is_read: false,
        }
    }
}
