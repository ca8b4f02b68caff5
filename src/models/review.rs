use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ReviewTab, CURRENT_USER_ID, CURRENT_USER_NAME};

/// A rating left by a client on a seller's service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub order_id: Option<String>,
    pub service_id: String,
    pub service_name: String,
    pub client_id: String,
    pub client_name: String,
    pub seller_id: String,
    pub seller_name: String,
    pub rating: u8,
    pub comment: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub anonymous: bool,
}

/// A completed order still waiting for the client's review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingReview {
    pub id: String,
    pub order_id: String,
    pub service_id: String,
    pub service_name: String,
    pub seller_id: String,
    pub seller_name: String,
    pub completed_date: DateTime<Utc>,
}

/// Submitted state of the review form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewForm {
    /// Stars from 1 to 5; 0 when nothing was selected
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub anonymous: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReviewCounts {
    pub received: usize,
    pub given: usize,
    pub pending: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ReviewEntries {
    Reviews(Vec<Review>),
    Pending(Vec<PendingReview>),
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewListResponse {
    pub tab: ReviewTab,
    pub entries: ReviewEntries,
    pub counts: ReviewCounts,
    /// Mean of received ratings, two decimal places
    pub average_rating: Option<Decimal>,
}

impl Review {
    /// The review the signed-in client leaves for a pending order
    pub fn for_pending(pending: &PendingReview, form: &ReviewForm, now: DateTime<Utc>) -> Self {
        Self {
            id: format!("rev-{}", &Uuid::new_v4().simple().to_string()[..8]),
            order_id: Some(pending.order_id.clone()),
            service_id: pending.service_id.clone(),
            service_name: pending.service_name.clone(),
            client_id: CURRENT_USER_ID.to_string(),
            client_name: CURRENT_USER_NAME.to_string(),
            seller_id: pending.seller_id.clone(),
            seller_name: pending.seller_name.clone(),
            rating: form.rating,
            comment: form.comment.trim().to_string(),
            date: now,
            anonymous: form.anonymous,
        }
    }
}

pub fn average_rating(reviews: &[Review]) -> Option<Decimal> {
    if reviews.is_empty() {
        return None;
    }
    let total: Decimal = reviews.iter().map(|r| Decimal::from(r.rating)).sum();
    Some(
        (total / Decimal::from(reviews.len()))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn review(rating: u8) -> Review {
        Review {
            id: format!("r{}", rating),
            order_id: None,
            service_id: "srvc1".to_string(),
            service_name: "Professional Logo Design".to_string(),
            client_id: "client-1".to_string(),
            client_name: "Sarah Johnson".to_string(),
            seller_id: CURRENT_USER_ID.to_string(),
            seller_name: CURRENT_USER_NAME.to_string(),
            rating,
            comment: "Excellent communication".to_string(),
            date: Utc::now(),
            anonymous: false,
        }
    }

    #[test]
    fn test_average_rating() {
        assert_eq!(average_rating(&[]), None);
        assert_eq!(
            average_rating(&[review(5), review(4), review(5)]),
            Some(dec!(4.67))
        );
    }

    #[test]
    fn test_for_pending_copies_order_details() {
        let pending = PendingReview {
            id: "p1".to_string(),
            order_id: "ord123".to_string(),
            service_id: "srvc789".to_string(),
            service_name: "Social Media Strategy".to_string(),
            seller_id: "user901".to_string(),
            seller_name: "James Thompson".to_string(),
            completed_date: Utc::now(),
        };
        let form = ReviewForm {
            rating: 4,
            comment: "  Solid strategy and clear reporting.  ".to_string(),
            anonymous: true,
        };

        let review = Review::for_pending(&pending, &form, Utc::now());

        assert_eq!(review.order_id.as_deref(), Some("ord123"));
        assert_eq!(review.seller_name, "James Thompson");
        assert_eq!(review.client_id, CURRENT_USER_ID);
        assert_eq!(review.comment, "Solid strategy and clear reporting.");
        assert!(review.anonymous);
        assert!(review.id.starts_with("rev-"));
    }
}
