use chrono::Utc;
use std::sync::Arc;
use tracing::instrument;

use crate::models::{
    average_rating, PendingReview, RepositoryError, Review, ReviewCounts, ReviewEntries,
    ReviewForm, ReviewListResponse, ReviewTab, ServiceError, ServiceResult, Validate,
};
use crate::repositories::ReviewRepository;

pub struct ReviewService {
    repository: Arc<dyn ReviewRepository>,
}

impl ReviewService {
    pub fn new(repository: Arc<dyn ReviewRepository>) -> Self {
        Self { repository }
    }

    /// Entries of one tab plus the counts of all three and the received average
    #[instrument(skip(self), fields(tab = %tab))]
    pub async fn list_reviews(&self, tab: ReviewTab) -> ServiceResult<ReviewListResponse> {
        let received = self.repository.received().await?;
        let given = self.repository.given().await?;
        let pending = self.repository.pending().await?;

        let counts = ReviewCounts {
            received: received.len(),
            given: given.len(),
            pending: pending.len(),
        };
        let average = average_rating(&received);

        let entries = match tab {
            ReviewTab::Received => ReviewEntries::Reviews(received),
            ReviewTab::Given => ReviewEntries::Reviews(given),
            ReviewTab::Pending => ReviewEntries::Pending(pending),
        };

        Ok(ReviewListResponse {
            tab,
            entries,
            counts,
            average_rating: average,
        })
    }

    /// Order details shown above the review form
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn pending_for_order(&self, order_id: &str) -> ServiceResult<PendingReview> {
        match self.repository.find_pending_by_order(order_id).await? {
            Some(pending) => Ok(pending),
            None => {
                crate::warn_with_trace!("No pending review for order");
                Err(ServiceError::OrderNotFound {
                    id: order_id.to_string(),
                })
            }
        }
    }

    #[instrument(skip(self, form), fields(order_id = %order_id, rating = form.rating))]
    pub async fn submit_review(&self, order_id: &str, form: ReviewForm) -> ServiceResult<Review> {
        form.validate()?;

        let pending = self
            .repository
            .find_pending_by_order(order_id)
            .await?
            .ok_or_else(|| ServiceError::ReviewNotPending {
                order_id: order_id.to_string(),
            })?;

        let review = Review::for_pending(&pending, &form, Utc::now());
        let review = match self.repository.submit(order_id, review).await {
            Ok(review) => review,
            // Another submission for this order got there first
            Err(RepositoryError::NotFound) => {
                crate::warn_with_trace!("Order was reviewed concurrently");
                return Err(ServiceError::ReviewNotPending {
                    order_id: order_id.to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        crate::info_with_trace!(review_id = %review.id, "Review submitted");
        Ok(review)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{seed, InMemoryReviewRepository, SimulatedLatency};
    use async_trait::async_trait;
    use mockall::mock;
    use rust_decimal_macros::dec;

    mock! {
        TestReviewRepository {}

        #[async_trait]
        impl ReviewRepository for TestReviewRepository {
            async fn received(&self) -> Result<Vec<Review>, RepositoryError>;
            async fn given(&self) -> Result<Vec<Review>, RepositoryError>;
            async fn pending(&self) -> Result<Vec<PendingReview>, RepositoryError>;
            async fn find_pending_by_order(&self, order_id: &str) -> Result<Option<PendingReview>, RepositoryError>;
            async fn submit(&self, order_id: &str, review: Review) -> Result<Review, RepositoryError>;
        }
    }

    fn seeded_repo() -> MockTestReviewRepository {
        let mut mock_repo = MockTestReviewRepository::new();
        mock_repo
            .expect_received()
            .returning(|| Ok(seed::received_reviews()));
        mock_repo.expect_given().returning(|| Ok(seed::given_reviews()));
        mock_repo
            .expect_pending()
            .returning(|| Ok(seed::pending_reviews()));
        mock_repo
    }

    #[tokio::test]
    async fn test_list_received_with_average() {
        let service = ReviewService::new(Arc::new(seeded_repo()));
        let response = service.list_reviews(ReviewTab::Received).await.unwrap();

        assert_eq!(response.counts.received, 3);
        assert_eq!(response.counts.given, 2);
        assert_eq!(response.counts.pending, 1);
        assert_eq!(response.average_rating, Some(dec!(4.67)));
        assert!(matches!(response.entries, ReviewEntries::Reviews(ref r) if r.len() == 3));
    }

    #[tokio::test]
    async fn test_list_pending_tab() {
        let service = ReviewService::new(Arc::new(seeded_repo()));
        let response = service.list_reviews(ReviewTab::Pending).await.unwrap();

        match response.entries {
            ReviewEntries::Pending(pending) => assert_eq!(pending[0].order_id, "ord123"),
            other => panic!("expected pending entries, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_submit_review_removes_pending() {
        let mut mock_repo = MockTestReviewRepository::new();
        mock_repo
            .expect_find_pending_by_order()
            .with(mockall::predicate::eq("ord123".to_string()))
            .times(1)
            .returning(|_| Ok(seed::pending_reviews().pop()));
        mock_repo
            .expect_submit()
            .with(
                mockall::predicate::eq("ord123".to_string()),
                mockall::predicate::always(),
            )
            .times(1)
            .returning(|_, review| Ok(review));

        let service = ReviewService::new(Arc::new(mock_repo));
        let review = service
            .submit_review(
                "ord123",
                ReviewForm {
                    rating: 5,
                    comment: "Great work, highly recommended!".to_string(),
                    anonymous: false,
                },
            )
            .await
            .unwrap();

        assert_eq!(review.rating, 5);
        assert_eq!(review.seller_name, "James Thompson");
        assert_eq!(review.order_id.as_deref(), Some("ord123"));
    }

    #[tokio::test]
    async fn test_submit_invalid_review_never_touches_repository() {
        let mut mock_repo = MockTestReviewRepository::new();
        mock_repo.expect_find_pending_by_order().never();

        let service = ReviewService::new(Arc::new(mock_repo));
        let result = service
            .submit_review(
                "ord123",
                ReviewForm {
                    rating: 0,
                    comment: String::new(),
                    anonymous: false,
                },
            )
            .await;

        match result {
            Err(ServiceError::InvalidFields { fields }) => {
                assert!(fields.contains("rating"));
                assert!(fields.contains("comment"));
            }
            other => panic!("expected field errors, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_submit_review_for_unknown_order() {
        let mut mock_repo = MockTestReviewRepository::new();
        mock_repo
            .expect_find_pending_by_order()
            .returning(|_| Ok(None));
        mock_repo.expect_submit().never();

        let service = ReviewService::new(Arc::new(mock_repo));
        let result = service
            .submit_review(
                "order-120",
                ReviewForm {
                    rating: 4,
                    comment: "Nice job overall, thanks.".to_string(),
                    anonymous: true,
                },
            )
            .await;

        assert!(matches!(result, Err(ServiceError::ReviewNotPending { .. })));
    }

    fn five_star() -> ReviewForm {
        ReviewForm {
            rating: 5,
            comment: "Clear strategy and great communication.".to_string(),
            anonymous: false,
        }
    }

    #[tokio::test]
    async fn test_review_cleared_between_lookup_and_submit() {
        let mut mock_repo = MockTestReviewRepository::new();
        mock_repo
            .expect_find_pending_by_order()
            .returning(|_| Ok(seed::pending_reviews().pop()));
        mock_repo
            .expect_submit()
            .returning(|_, _| Err(RepositoryError::NotFound));

        let service = ReviewService::new(Arc::new(mock_repo));
        let result = service.submit_review("ord123", five_star()).await;

        assert!(matches!(result, Err(ServiceError::ReviewNotPending { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_submits_store_one_review() {
        let repository = Arc::new(InMemoryReviewRepository::new(
            SimulatedLatency::from_millis(20, 50),
        ));
        let service = ReviewService::new(repository.clone());

        let (first, second) = tokio::join!(
            service.submit_review("ord123", five_star()),
            service.submit_review("ord123", five_star()),
        );

        let results = [first, second];
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(
            results
                .iter()
                .filter(|r| matches!(r, Err(ServiceError::ReviewNotPending { .. })))
                .count(),
            1
        );
        assert_eq!(repository.given().await.unwrap().len(), 3);
        assert!(repository.pending().await.unwrap().is_empty());
    }
}
