use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{OrderAction, OrderStatus, OrderTab, ServiceError, ServiceResult, ValidationError};

/// A client's purchase of a service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub service_id: String,
    pub service_name: String,
    pub service_description: Option<String>,
    pub seller_id: String,
    pub seller_name: String,
    pub price: Decimal,
    pub status: OrderStatus,
    pub progress: Option<u8>,
    pub due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancel_reason: Option<String>,
    #[serde(default)]
    pub has_review: bool,
    pub review_id: Option<String>,
    #[serde(default)]
    pub messages: u32,
    #[serde(default)]
    pub timeline: Vec<TimelineEvent>,
    #[serde(default)]
    pub deliverables: Vec<String>,
    pub revisions: Option<u32>,
    pub additional_info: Option<String>,
}

/// One entry of an order's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub date: DateTime<Utc>,
    pub event: String,
    pub description: String,
}

/// Request body for changing an order's status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub action: OrderAction,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrderCounts {
    pub active: usize,
    pub completed: usize,
    pub cancelled: usize,
}

/// Orders shown on one tab, with the size of every tab
#[derive(Debug, Clone, Serialize)]
pub struct OrderListResponse {
    pub tab: OrderTab,
    pub orders: Vec<OrderView>,
    pub counts: OrderCounts,
}

/// An order together with its countdown label
#[derive(Debug, Clone, Serialize)]
pub struct OrderView {
    #[serde(flatten)]
    pub order: Order,
    pub time_left: Option<String>,
}

impl OrderCounts {
    pub fn tally<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Self {
        orders
            .into_iter()
            .fold(OrderCounts::default(), |mut counts, order| {
                match order.status {
                    OrderStatus::InProgress | OrderStatus::AwaitingDelivery => counts.active += 1,
                    OrderStatus::Completed => counts.completed += 1,
                    OrderStatus::Cancelled => counts.cancelled += 1,
                }
                counts
            })
    }
}

impl Order {
    /// Case-insensitive match on service name, seller name or order id
    pub fn matches_query(&self, query: &str) -> bool {
        let query_lower = query.to_lowercase();
        self.service_name.to_lowercase().contains(&query_lower)
            || self.seller_name.to_lowercase().contains(&query_lower)
            || self.id.to_lowercase().contains(&query_lower)
    }

    pub fn view(self, now: DateTime<Utc>) -> OrderView {
        let time_left = if self.status.is_open() {
            Some(time_left(self.due_date, now))
        } else {
            None
        };
        OrderView {
            order: self,
            time_left,
        }
    }

    /// Apply `action`, recording it on the timeline.
    pub fn apply_action(
        &mut self,
        action: OrderAction,
        reason: Option<&str>,
        now: DateTime<Utc>,
    ) -> ServiceResult<()> {
        let next = action.target_status();
        if !self.status.can_transition_to(next) {
            return Err(ServiceError::InvalidStatusTransition {
                order_id: self.id.clone(),
                from: self.status,
                to: next,
            });
        }

        let event = match action {
            OrderAction::Deliver => TimelineEvent {
                date: now,
                event: "Delivery Submitted".to_string(),
                description: format!("{} delivered the order for review", self.seller_name),
            },
            OrderAction::Complete => {
                self.completed_at = Some(now);
                self.progress = Some(100);
                TimelineEvent {
                    date: now,
                    event: "Order Completed".to_string(),
                    description: "All deliverables submitted and order marked as complete"
                        .to_string(),
                }
            }
            OrderAction::Cancel => {
                let reason = reason
                    .map(str::trim)
                    .filter(|r| !r.is_empty())
                    .ok_or_else(|| ValidationError::RequiredField {
                        field: "reason".to_string(),
                    })?;
                self.cancelled_at = Some(now);
                self.cancel_reason = Some(reason.to_string());
                TimelineEvent {
                    date: now,
                    event: "Order Cancelled".to_string(),
                    description: format!("You cancelled the order: {}", reason),
                }
            }
        };

        self.status = next;
        self.timeline.push(event);
        Ok(())
    }
}

/// Countdown label for a due date, counting partial days as whole ones
pub fn time_left(due: DateTime<Utc>, now: DateTime<Utc>) -> String {
    const DAY_MS: i64 = 24 * 60 * 60 * 1000;

    let diff_ms = (due - now).num_milliseconds();
    // Integer division truncates toward zero, which is the ceiling for negatives.
    let days = if diff_ms > 0 {
        (diff_ms + DAY_MS - 1) / DAY_MS
    } else {
        diff_ms / DAY_MS
    };

    match days {
        d if d < 0 => "Overdue".to_string(),
        0 => "Due today".to_string(),
        1 => "1 day left".to_string(),
        d => format!("{} days left", d),
    }
}
