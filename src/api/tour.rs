use crate::client::{Client, RequestOptions};
use crate::error::ApiResult;
use crate::models::organizer::{ListBlogResponse, OrganizerProfile};
use crate::models::tour::*;
use async_trait::async_trait;

/// Public browsing API methods (no credential required)
#[async_trait]
pub trait TourApi {
    /// List tours matching a filter
    async fn list_tours(&self, params: &ListTourService) -> ApiResult<ListTourResponse>;

    /// Get a single tour by ID
    async fn get_tour(&self, tour_id: &str) -> ApiResult<Tour>;

    /// List all destinations
    async fn list_destinations(&self) -> ApiResult<Vec<Destination>>;

    /// Get an organizer's public profile
    async fn get_organizer(&self, organizer_id: &str) -> ApiResult<OrganizerProfile>;

    /// List published blog posts
    async fn list_blog_posts(
        &self,
        page: Option<i32>,
        page_size: Option<i32>,
    ) -> ApiResult<ListBlogResponse>;
}

#[async_trait]
impl TourApi for Client {
    async fn list_tours(&self, params: &ListTourService) -> ApiResult<ListTourResponse> {
        self.post("/tour/list", params, RequestOptions::new().no_credential())
            .await
    }

    async fn get_tour(&self, tour_id: &str) -> ApiResult<Tour> {
        self.get(
            &format!("/tour/{}", urlencoding::encode(tour_id)),
            RequestOptions::new().no_credential(),
        )
        .await
    }

    async fn list_destinations(&self) -> ApiResult<Vec<Destination>> {
        self.get("/destination/list", RequestOptions::new().no_credential())
            .await
    }

    async fn get_organizer(&self, organizer_id: &str) -> ApiResult<OrganizerProfile> {
        self.get(
            &format!("/organizer/{}", urlencoding::encode(organizer_id)),
            RequestOptions::new().no_credential(),
        )
        .await
    }

    async fn list_blog_posts(
        &self,
        page: Option<i32>,
        page_size: Option<i32>,
    ) -> ApiResult<ListBlogResponse> {
        // Build query string
        let mut query_params = vec![];
        if let Some(page) = page {
            query_params.push(format!("page={}", page));
        }
        if let Some(page_size) = page_size {
            query_params.push(format!("page_size={}", page_size));
        }

        let query = if query_params.is_empty() {
            String::new()
        } else {
            format!("?{}", query_params.join("&"))
        };

        self.get(
            &format!("/blog/list{}", query),
            RequestOptions::new().no_credential(),
        )
        .await
    }
}
