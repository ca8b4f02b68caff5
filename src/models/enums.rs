use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sort orders available to the service search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceSort {
    #[default]
    Recommended,
    PriceLow,
    PriceHigh,
    Rating,
    Newest,
    #[serde(alias = "deliveryTime")]
    DeliveryTime,
}

impl fmt::Display for ServiceSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceSort::Recommended => write!(f, "recommended"),
            ServiceSort::PriceLow => write!(f, "price_low"),
            ServiceSort::PriceHigh => write!(f, "price_high"),
            ServiceSort::Rating => write!(f, "rating"),
            ServiceSort::Newest => write!(f, "newest"),
            ServiceSort::DeliveryTime => write!(f, "delivery_time"),
        }
    }
}

impl FromStr for ServiceSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "recommended" => Ok(ServiceSort::Recommended),
            "price_low" => Ok(ServiceSort::PriceLow),
            "price_high" => Ok(ServiceSort::PriceHigh),
            "rating" => Ok(ServiceSort::Rating),
            "newest" => Ok(ServiceSort::Newest),
            "delivery_time" | "deliverytime" => Ok(ServiceSort::DeliveryTime),
            _ => Err(format!("Invalid sort order: {}", s)),
        }
    }
}

/// Lifecycle of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Awaiting Delivery")]
    AwaitingDelivery,
    #[serde(rename = "Completed")]
    Completed,
    #[serde(rename = "Cancelled")]
    Cancelled,
}

impl OrderStatus {
    /// Legal moves: In Progress -> Awaiting Delivery -> Completed, and
    /// cancellation from either open state.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::InProgress, OrderStatus::AwaitingDelivery)
                | (OrderStatus::AwaitingDelivery, OrderStatus::Completed)
                | (OrderStatus::InProgress, OrderStatus::Cancelled)
                | (OrderStatus::AwaitingDelivery, OrderStatus::Cancelled)
        )
    }

    pub fn is_open(&self) -> bool {
        matches!(self, OrderStatus::InProgress | OrderStatus::AwaitingDelivery)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::InProgress => write!(f, "In Progress"),
            OrderStatus::AwaitingDelivery => write!(f, "Awaiting Delivery"),
            OrderStatus::Completed => write!(f, "Completed"),
            OrderStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// Tabs of the order list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderTab {
    #[default]
    Active,
    Completed,
    Cancelled,
}

impl OrderTab {
    pub fn includes(&self, status: OrderStatus) -> bool {
        match self {
            OrderTab::Active => status.is_open(),
            OrderTab::Completed => status == OrderStatus::Completed,
            OrderTab::Cancelled => status == OrderStatus::Cancelled,
        }
    }
}

impl fmt::Display for OrderTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderTab::Active => write!(f, "active"),
            OrderTab::Completed => write!(f, "completed"),
            OrderTab::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl FromStr for OrderTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(OrderTab::Active),
            "completed" => Ok(OrderTab::Completed),
            "cancelled" => Ok(OrderTab::Cancelled),
            _ => Err(format!("Invalid order tab: {}", s)),
        }
    }
}

/// Status changes a user can request on an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderAction {
    Deliver,
    Complete,
    Cancel,
}

impl OrderAction {
    pub fn target_status(&self) -> OrderStatus {
        match self {
            OrderAction::Deliver => OrderStatus::AwaitingDelivery,
            OrderAction::Complete => OrderStatus::Completed,
            OrderAction::Cancel => OrderStatus::Cancelled,
        }
    }
}

impl fmt::Display for OrderAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderAction::Deliver => write!(f, "deliver"),
            OrderAction::Complete => write!(f, "complete"),
            OrderAction::Cancel => write!(f, "cancel"),
        }
    }
}

/// Tabs of the review list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewTab {
    #[default]
    Received,
    Given,
    Pending,
}

impl fmt::Display for ReviewTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewTab::Received => write!(f, "received"),
            ReviewTab::Given => write!(f, "given"),
            ReviewTab::Pending => write!(f, "pending"),
        }
    }
}

impl FromStr for ReviewTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "received" => Ok(ReviewTab::Received),
            "given" => Ok(ReviewTab::Given),
            "pending" => Ok(ReviewTab::Pending),
            _ => Err(format!("Invalid review tab: {}", s)),
        }
    }
}

/// Which side of the marketplace a dashboard is rendered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    #[default]
    Provider,
    Client,
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountType::Provider => write!(f, "provider"),
            AccountType::Client => write!(f, "client"),
        }
    }
}

impl FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "provider" => Ok(AccountType::Provider),
            "client" => Ok(AccountType::Client),
            _ => Err(format!("Invalid account type: {}", s)),
        }
    }
}

/// Kinds of entries in the dashboard activity feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    OrderProgress,
    Message,
    Review,
    OrderCompleted,
    Payment,
}
