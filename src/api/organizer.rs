use crate::client::{Client, RequestOptions};
use crate::error::ApiResult;
use crate::models::organizer::*;
use crate::models::tour::*;
use async_trait::async_trait;

/// Organizer dashboard API methods (all require authentication)
#[async_trait]
pub trait OrganizerApi {
    /// List the authenticated organizer's own tours
    async fn list_my_tours(&self, params: &ListTourService) -> ApiResult<ListTourResponse>;

    /// Create a new tour listing
    async fn create_tour(&self, request: &UpsertTourService) -> ApiResult<Tour>;

    /// Update an existing tour listing
    async fn update_tour(&self, request: &UpsertTourService) -> ApiResult<Tour>;

    /// Delete a tour listing
    async fn delete_tour(&self, tour_id: &str) -> ApiResult<()>;

    /// Get the authenticated organizer's profile
    async fn get_profile(&self) -> ApiResult<OrganizerProfile>;

    /// Update the authenticated organizer's profile
    async fn update_profile(&self, request: &UpdateProfileService) -> ApiResult<OrganizerProfile>;

    /// Create a blog post
    async fn create_blog_post(&self, request: &UpsertBlogPostService) -> ApiResult<BlogPost>;

    /// Update a blog post
    async fn update_blog_post(&self, request: &UpsertBlogPostService) -> ApiResult<BlogPost>;

    /// Delete a blog post
    async fn delete_blog_post(&self, post_id: &str) -> ApiResult<()>;
}

#[async_trait]
impl OrganizerApi for Client {
    async fn list_my_tours(&self, params: &ListTourService) -> ApiResult<ListTourResponse> {
        self.post("/admin/tour/list", params, RequestOptions::new())
            .await
    }

    async fn create_tour(&self, request: &UpsertTourService) -> ApiResult<Tour> {
        self.post("/admin/tour/create", request, RequestOptions::new())
            .await
    }

    async fn update_tour(&self, request: &UpsertTourService) -> ApiResult<Tour> {
        self.post("/admin/tour/update", request, RequestOptions::new())
            .await
    }

    async fn delete_tour(&self, tour_id: &str) -> ApiResult<()> {
        self.delete::<serde_json::Value>(
            &format!("/admin/tour/{}", urlencoding::encode(tour_id)),
            RequestOptions::new(),
        )
        .await
        .map(|_| ())
    }

    async fn get_profile(&self) -> ApiResult<OrganizerProfile> {
        self.get("/admin/profile", RequestOptions::new()).await
    }

    async fn update_profile(&self, request: &UpdateProfileService) -> ApiResult<OrganizerProfile> {
        self.post("/admin/profile/update", request, RequestOptions::new())
            .await
    }

    async fn create_blog_post(&self, request: &UpsertBlogPostService) -> ApiResult<BlogPost> {
        self.post("/admin/blog/create", request, RequestOptions::new())
            .await
    }

    async fn update_blog_post(&self, request: &UpsertBlogPostService) -> ApiResult<BlogPost> {
        self.post("/admin/blog/update", request, RequestOptions::new())
            .await
    }

    async fn delete_blog_post(&self, post_id: &str) -> ApiResult<()> {
        self.delete::<serde_json::Value>(
            &format!("/admin/blog/{}", urlencoding::encode(post_id)),
            RequestOptions::new(),
        )
        .await
        .map(|_| ())
    }
}
