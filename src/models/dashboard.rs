use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AccountType, ActivityType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmountPoint {
    pub date: NaiveDate,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderStats {
    pub balance: Decimal,
    pub active_orders: u32,
    pub completed_orders: u32,
    pub total_earnings: Decimal,
    pub pending_reviews: u32,
    pub average_rating: Decimal,
    pub review_count: u32,
    pub profile_views: u32,
    pub response_rate: u8,
    pub recent_income: Vec<AmountPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientStats {
    pub active_orders: u32,
    pub completed_orders: u32,
    pub total_spent: Decimal,
    pub pending_reviews: u32,
    pub favorite_providers: u32,
    pub saved_services: u32,
    pub recent_spending: Vec<AmountPoint>,
}

/// An entry of the recent activity feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub link: String,
}

/// Everything the dashboard can show, for both account types
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub provider: ProviderStats,
    pub client: ClientStats,
    pub activity: Vec<Activity>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum DashboardStats {
    Provider(ProviderStats),
    Client(ClientStats),
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    pub account_type: AccountType,
    pub stats: DashboardStats,
    pub recent_activity: Vec<Activity>,
}

impl DashboardSnapshot {
    /// Stats for `account_type` with the activity feed newest first
    pub fn for_account(self, account_type: AccountType) -> DashboardResponse {
        let mut recent_activity = self.activity;
        recent_activity.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        let stats = match account_type {
            AccountType::Provider => DashboardStats::Provider(self.provider),
            AccountType::Client => DashboardStats::Client(self.client),
        };

        DashboardResponse {
            account_type,
            stats,
            recent_activity,
        }
    }
}
