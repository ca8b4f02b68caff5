use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use super::{parse_leading_days, Service, ServiceSort};

/// Raw search parameters as they arrive on the query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    #[serde(alias = "query")]
    pub q: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    #[serde(alias = "minPrice")]
    pub min_price: Option<String>,
    #[serde(alias = "maxPrice")]
    pub max_price: Option<String>,
    #[serde(alias = "minRating")]
    pub min_rating: Option<String>,
    #[serde(alias = "deliveryTime")]
    pub delivery_time: Option<String>,
    pub location: Option<String>,
    #[serde(alias = "onlineOnly")]
    pub online_only: Option<String>,
    #[serde(alias = "sort_by", alias = "sortBy")]
    pub sort: Option<String>,
}

/// Typed search criteria; `None` means the filter is inactive
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub query: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub min_rating: Option<Decimal>,
    pub delivery_days: Option<u32>,
    pub location: Option<String>,
    #[serde(default)]
    pub online_only: bool,
    #[serde(default)]
    pub sort_by: ServiceSort,
}

impl SearchCriteria {
    /// Convert raw parameters, skipping anything empty, a sentinel, or unparsable.
    pub fn from_params(params: &SearchParams) -> Self {
        Self {
            query: non_empty(&params.q),
            category: non_sentinel(&params.category, "all"),
            subcategory: non_sentinel(&params.subcategory, "all"),
            min_price: parse_decimal(&params.min_price),
            max_price: parse_decimal(&params.max_price),
            min_rating: parse_decimal(&params.min_rating).filter(|r| !r.is_zero()),
            delivery_days: non_sentinel(&params.delivery_time, "any")
                .and_then(|d| parse_leading_days(&d))
                .filter(|d| *d > 0),
            location: non_empty(&params.location),
            online_only: params
                .online_only
                .as_deref()
                .map(|v| matches!(v.trim().to_lowercase().as_str(), "true" | "1" | "on" | "yes"))
                .unwrap_or(false),
            sort_by: params
                .sort
                .as_deref()
                .and_then(|s| ServiceSort::from_str(s).ok())
                .unwrap_or_default(),
        }
    }

    /// Select a category; the subcategory no longer applies and is cleared.
    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category.filter(|c| !c.is_empty() && c != "all");
        self.subcategory = None;
        self
    }

    /// Selecting the active minimum rating again clears it.
    pub fn toggle_min_rating(mut self, rating: Decimal) -> Self {
        self.min_rating = if self.min_rating == Some(rating) || rating.is_zero() {
            None
        } else {
            Some(rating)
        };
        self
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.trim().is_empty()).cloned()
}

fn non_sentinel(value: &Option<String>, sentinel: &str) -> Option<String> {
    non_empty(value).filter(|v| !v.eq_ignore_ascii_case(sentinel))
}

fn parse_decimal(value: &Option<String>) -> Option<Decimal> {
    value
        .as_deref()
        .and_then(|v| Decimal::from_str(v.trim()).ok())
}

impl Service {
    /// Check the listing against every active filter
    pub fn matches_criteria(&self, criteria: &SearchCriteria) -> bool {
        if let Some(query) = &criteria.query {
            let query_lower = query.to_lowercase();
            if !self.title.to_lowercase().contains(&query_lower)
                && !self.seller_name.to_lowercase().contains(&query_lower)
                && !self.category.to_lowercase().contains(&query_lower)
                && !self.subcategory.to_lowercase().contains(&query_lower)
            {
                return false;
            }
        }

        if let Some(category) = &criteria.category {
            if &self.category != category {
                return false;
            }
        }

        if let Some(subcategory) = &criteria.subcategory {
            if &self.subcategory != subcategory {
                return false;
            }
        }

        if let Some(min_price) = &criteria.min_price {
            if &self.price < min_price {
                return false;
            }
        }

        if let Some(max_price) = &criteria.max_price {
            if &self.price > max_price {
                return false;
            }
        }

        if let Some(min_rating) = &criteria.min_rating {
            if &self.rating < min_rating {
                return false;
            }
        }

        if let Some(max_days) = criteria.delivery_days {
            match self.delivery_days() {
                Some(days) if days <= max_days => {}
                _ => return false,
            }
        }

        if let Some(location) = &criteria.location {
            if !self
                .location
                .to_lowercase()
                .contains(&location.to_lowercase())
            {
                return false;
            }
        }

        if criteria.online_only && !self.is_online() {
            return false;
        }

        true
    }
}

/// Comparator behind each sort order
pub fn compare_services(a: &Service, b: &Service, sort: ServiceSort) -> Ordering {
    match sort {
        ServiceSort::PriceLow => a.price.cmp(&b.price),
        ServiceSort::PriceHigh => b.price.cmp(&a.price),
        ServiceSort::Rating => b.rating.cmp(&a.rating),
        ServiceSort::Newest => b.id.cmp(&a.id),
        ServiceSort::DeliveryTime => match (a.delivery_days(), b.delivery_days()) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        ServiceSort::Recommended => b.recommended_score().cmp(&a.recommended_score()),
    }
}

/// Filter `services` by every active criterion, then order them by `sort_by`.
///
/// The sort is stable, so ties keep their input order.
pub fn filter_and_sort(services: &[Service], criteria: &SearchCriteria) -> Vec<Service> {
    let mut results: Vec<Service> = services
        .iter()
        .filter(|service| service.matches_criteria(criteria))
        .cloned()
        .collect();

    results.sort_by(|a, b| compare_services(a, b, criteria.sort_by));
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::seed;
    use rust_decimal_macros::dec;

    fn ids(services: &[Service]) -> Vec<&str> {
        services.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn test_design_category_sorted_by_price() {
        let services = seed::advanced_search_services();
        let criteria = SearchCriteria {
            category: Some("design".to_string()),
            sort_by: ServiceSort::PriceLow,
            ..Default::default()
        };

        let results = filter_and_sort(&services, &criteria);

        assert!(results.iter().all(|s| s.category == "design"));
        assert!(results.windows(2).all(|w| w[0].price <= w[1].price));
        assert_eq!(ids(&results), vec!["service-2"]);
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let services = seed::services();
        let criteria = SearchCriteria {
            min_price: Some(dec!(150)),
            max_price: Some(dec!(300)),
            ..Default::default()
        };

        let results = filter_and_sort(&services, &criteria);

        assert!(!results.is_empty());
        assert!(results
            .iter()
            .all(|s| s.price >= dec!(150) && s.price <= dec!(300)));
        assert!(results.iter().any(|s| s.price == dec!(150)));
        assert!(results.iter().any(|s| s.price == dec!(300)));
    }

    #[test]
    fn test_query_matches_any_text_field() {
        let services = seed::services();

        let by_title = SearchCriteria {
            query: Some("LOGO".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_and_sort(&services, &by_title)), vec!["service-2"]);

        let by_seller = SearchCriteria {
            query: Some("garcia".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_and_sort(&services, &by_seller)), vec!["service-5"]);

        let by_subcategory = SearchCriteria {
            query: Some("hvac".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_and_sort(&services, &by_subcategory)), vec!["service-6"]);
    }

    #[test]
    fn test_query_is_anded_with_other_filters() {
        let services = seed::services();
        let criteria = SearchCriteria {
            query: Some("design".to_string()),
            max_price: Some(dec!(200)),
            ..Default::default()
        };

        let results = filter_and_sort(&services, &criteria);
        assert_eq!(ids(&results), vec!["service-2"]);
    }

    #[test]
    fn test_delivery_time_filter_and_sort() {
        let services = seed::advanced_search_services();
        let criteria = SearchCriteria {
            delivery_days: Some(3),
            sort_by: ServiceSort::DeliveryTime,
            ..Default::default()
        };

        let results = filter_and_sort(&services, &criteria);
        assert_eq!(ids(&results), vec!["service-6", "service-4", "service-2"]);
    }

    #[test]
    fn test_unparsable_delivery_time_is_dropped_by_filter_and_sorted_last() {
        let mut services = seed::advanced_search_services();
        services[0].delivery_time = "to be agreed".to_string();

        let filtered = filter_and_sort(
            &services,
            &SearchCriteria {
                delivery_days: Some(60),
                ..Default::default()
            },
        );
        assert!(!ids(&filtered).contains(&"service-1"));

        let sorted = filter_and_sort(
            &services,
            &SearchCriteria {
                sort_by: ServiceSort::DeliveryTime,
                ..Default::default()
            },
        );
        assert_eq!(sorted.last().map(|s| s.id.as_str()), Some("service-1"));
    }

    #[test]
    fn test_location_and_online_only() {
        let services = seed::advanced_search_services();

        let in_usa = SearchCriteria {
            location: Some("usa".to_string()),
            ..Default::default()
        };
        assert_eq!(filter_and_sort(&services, &in_usa).len(), 5);

        let online = SearchCriteria {
            online_only: true,
            ..Default::default()
        };
        assert_eq!(ids(&filter_and_sort(&services, &online)), vec!["service-4"]);
    }

    #[test]
    fn test_min_rating() {
        let services = seed::advanced_search_services();
        let criteria = SearchCriteria {
            min_rating: Some(dec!(4.8)),
            sort_by: ServiceSort::Rating,
            ..Default::default()
        };

        let results = filter_and_sort(&services, &criteria);
        assert_eq!(ids(&results), vec!["service-1", "service-5", "service-2"]);
    }

    #[test]
    fn test_recommended_is_default_sort() {
        let services = seed::advanced_search_services();
        let results = filter_and_sort(&services, &SearchCriteria::default());

        // rating * review_count: 607.6, 427.2, 263.2, 244.4, 189.0, 171.5
        assert_eq!(
            ids(&results),
            vec!["service-1", "service-2", "service-3", "service-6", "service-4", "service-5"]
        );
    }

    #[test]
    fn test_newest_sorts_ids_descending() {
        let services = seed::services();
        let criteria = SearchCriteria {
            sort_by: ServiceSort::Newest,
            ..Default::default()
        };

        let results = filter_and_sort(&services, &criteria);
        assert_eq!(results.first().map(|s| s.id.as_str()), Some("service-8"));
        assert_eq!(results.last().map(|s| s.id.as_str()), Some("service-1"));
    }

    #[test]
    fn test_price_high_keeps_ties_in_input_order() {
        let mut services = seed::advanced_search_services();
        services[2].price = dec!(500);

        let criteria = SearchCriteria {
            sort_by: ServiceSort::PriceHigh,
            ..Default::default()
        };
        let results = filter_and_sort(&services, &criteria);
        assert_eq!(&ids(&results)[..3], &["service-5", "service-1", "service-3"]);
    }

    #[test]
    fn test_from_params_skips_sentinels_and_garbage() {
        let params = SearchParams {
            q: Some(String::new()),
            category: Some("all".to_string()),
            subcategory: Some("all".to_string()),
            min_price: Some("abc".to_string()),
            max_price: Some("300".to_string()),
            min_rating: Some("0".to_string()),
            delivery_time: Some("any".to_string()),
            location: Some("  ".to_string()),
            online_only: None,
            sort: Some("bogus".to_string()),
        };

        let criteria = SearchCriteria::from_params(&params);

        assert_eq!(
            criteria,
            SearchCriteria {
                max_price: Some(dec!(300)),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_from_params_parses_active_filters() {
        let params = SearchParams {
            q: Some("web".to_string()),
            category: Some("development".to_string()),
            delivery_time: Some("7".to_string()),
            min_rating: Some("4.5".to_string()),
            online_only: Some("true".to_string()),
            sort: Some("deliveryTime".to_string()),
            ..Default::default()
        };

        let criteria = SearchCriteria::from_params(&params);

        assert_eq!(criteria.query.as_deref(), Some("web"));
        assert_eq!(criteria.category.as_deref(), Some("development"));
        assert_eq!(criteria.delivery_days, Some(7));
        assert_eq!(criteria.min_rating, Some(dec!(4.5)));
        assert!(criteria.online_only);
        assert_eq!(criteria.sort_by, ServiceSort::DeliveryTime);
    }

    #[test]
    fn test_category_change_resets_subcategory() {
        let criteria = SearchCriteria {
            category: Some("design".to_string()),
            subcategory: Some("logo".to_string()),
            ..Default::default()
        }
        .with_category(Some("marketing".to_string()));

        assert_eq!(criteria.category.as_deref(), Some("marketing"));
        assert_eq!(criteria.subcategory, None);
    }

    #[test]
    fn test_toggle_min_rating() {
        let criteria = SearchCriteria::default().toggle_min_rating(dec!(4));
        assert_eq!(criteria.min_rating, Some(dec!(4)));

        let criteria = criteria.toggle_min_rating(dec!(4));
        assert_eq!(criteria.min_rating, None);
    }
}
