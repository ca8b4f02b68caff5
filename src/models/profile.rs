use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Public profile of a marketplace member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub title: String,
    pub location: String,
    pub member_since: String,
    pub last_active: String,
    pub languages: Vec<String>,
    pub skills: Vec<String>,
    pub about: String,
    pub education: Vec<Education>,
    pub work_history: Vec<WorkEntry>,
    pub stats: ProfileStats,
    pub services: Vec<ProfileService>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub years: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkEntry {
    pub company: String,
    pub position: String,
    pub years: String,
    pub description: String,
}

/// Percentages are whole numbers from 0 to 100
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileStats {
    pub completed_projects: u32,
    pub on_time_delivery: u8,
    pub on_budget: u8,
    pub repeat_clients: u8,
    pub rating: Decimal,
    pub total_reviews: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileService {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub rating: Decimal,
    pub review_count: u32,
}
