use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::SearchCriteria;

/// A listed offering by a provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub subcategory: String,
    pub price: Decimal,
    pub rating: Decimal,
    pub review_count: u32,
    pub seller_name: String,
    pub seller_level: Option<String>,
    /// Free text in the form "<N> days"
    pub delivery_time: String,
    pub location: String,
    pub image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub revisions: Option<u32>,
    pub created_at: DateTime<Utc>,
    /// Pricing tiers, cheapest first; empty when the listing has a single price
    #[serde(default)]
    pub packages: Vec<ServicePackage>,
    #[serde(default)]
    pub faqs: Vec<Faq>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageTier {
    Basic,
    Standard,
    Premium,
}

/// One pricing tier of a service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServicePackage {
    pub tier: PackageTier,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub delivery_time: String,
    /// `None` means unlimited
    pub revisions: Option<u32>,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

/// Submitted state of the service creation form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
    #[serde(default)]
    pub description: String,
    /// Raw input; numbers and strings are both accepted
    #[serde(default, deserialize_with = "deserialize_form_number")]
    pub price: String,
    #[serde(default = "default_delivery_days")]
    pub delivery_time: u32,
    #[serde(default = "default_revisions")]
    pub revisions: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// A category with the subcategories offered under it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub subcategories: &'static [&'static str],
}

/// Search results along with their count and the criteria that produced them
#[derive(Debug, Clone, Serialize)]
pub struct ServiceListResponse {
    pub services: Vec<Service>,
    pub total_count: usize,
    pub criteria: SearchCriteria,
}

impl Default for ServiceForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            category: String::new(),
            subcategory: String::new(),
            description: String::new(),
            price: String::new(),
            delivery_time: default_delivery_days(),
            revisions: default_revisions(),
            tags: Vec::new(),
            images: Vec::new(),
        }
    }
}

pub(crate) fn default_delivery_days() -> u32 {
    7
}

pub(crate) fn default_revisions() -> u32 {
    3
}

fn deserialize_form_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

impl Service {
    /// Build a new listing from a validated form
    pub fn from_form(form: ServiceForm, price: Decimal, seller_name: &str) -> Self {
        let short_id = Uuid::new_v4().simple().to_string();
        Self {
            id: format!("service-{}", &short_id[..8]),
            title: form.title.trim().to_string(),
            description: form.description.trim().to_string(),
            category: form.category,
            subcategory: form.subcategory,
            price,
            rating: Decimal::ZERO,
            review_count: 0,
            seller_name: seller_name.to_string(),
            seller_level: None,
            delivery_time: format_delivery_days(form.delivery_time),
            location: "Online".to_string(),
            image: form.images.first().cloned(),
            tags: form.tags.iter().map(|tag| tag.trim().to_string()).collect(),
            revisions: Some(form.revisions),
            created_at: Utc::now(),
            packages: Vec::new(),
            faqs: Vec::new(),
        }
    }

    pub fn package(&self, tier: PackageTier) -> Option<&ServicePackage> {
        self.packages.iter().find(|package| package.tier == tier)
    }

    /// Tier preselected on the service page: standard when offered
    pub fn default_package(&self) -> Option<&ServicePackage> {
        self.package(PackageTier::Standard)
            .or_else(|| self.packages.first())
    }

    /// Leading integer of the delivery time, if it has one
    pub fn delivery_days(&self) -> Option<u32> {
        parse_leading_days(&self.delivery_time)
    }

    /// Ranking score for the default sort
    pub fn recommended_score(&self) -> Decimal {
        self.rating * Decimal::from(self.review_count)
    }

    pub fn is_online(&self) -> bool {
        self.location == "Online"
    }
}

/// Parse the integer that starts a string such as "7 days"
pub fn parse_leading_days(value: &str) -> Option<u32> {
    let digits: String = value
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

pub fn format_delivery_days(days: u32) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", days)
    }
}

static CATEGORIES: &[CategoryInfo] = &[
    CategoryInfo {
        id: "design",
        name: "Design",
        subcategories: &[
            "Logo Design",
            "Web Design",
            "Graphic Design",
            "UI/UX Design",
            "Art & Illustration",
            "Animation",
        ],
    },
    CategoryInfo {
        id: "development",
        name: "Development",
        subcategories: &[
            "Web Development",
            "Mobile Apps",
            "Software Development",
            "Game Development",
            "Wordpress",
            "E-commerce",
        ],
    },
    CategoryInfo {
        id: "marketing",
        name: "Marketing",
        subcategories: &[
            "Social Media",
            "SEO",
            "Content Marketing",
            "Email Marketing",
            "SEM",
            "Analytics",
        ],
    },
    CategoryInfo {
        id: "writing",
        name: "Writing",
        subcategories: &[
            "Content Writing",
            "Copywriting",
            "Translation",
            "Technical Writing",
            "Creative Writing",
            "Resumes & Cover Letters",
        ],
    },
    CategoryInfo {
        id: "video",
        name: "Video",
        subcategories: &[
            "Video Editing",
            "Animation",
            "Video Production",
            "Explainer Videos",
            "Intros & Outros",
            "Visual Effects",
        ],
    },
    CategoryInfo {
        id: "business",
        name: "Business",
        subcategories: &[
            "Business Planning",
            "Financial Consulting",
            "Legal Consulting",
            "Market Research",
            "Career Advice",
            "Presentations",
        ],
    },
];

/// Categories offered by the service creation form
pub fn service_categories() -> &'static [CategoryInfo] {
    CATEGORIES
}
