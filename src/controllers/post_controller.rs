use std::sync::Arc;

use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::post_dto::{CreatePostRequest, PostDetail, PostSummary, UpdatePostRequest};
use crate::models::blog_post::BlogPost;
use crate::repositories::PostStore;
use crate::services::clock::Clock;
use crate::services::presentation::{related_posts, RELATED_POSTS};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppResult};
use crate::utils::slug::{allocate_slug, slugify};
use crate::utils::validation::non_blank;

const MAX_PAGE: i64 = 100;

pub struct PostController {
    store: Arc<dyn PostStore>,
    clock: Arc<dyn Clock>,
}

impl PostController {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.posts.clone(),
            clock: state.clock.clone(),
        }
    }

    pub async fn list_published(&self, limit: Option<i64>) -> AppResult<Vec<PostSummary>> {
        let posts = self
            .store
            .list_published(limit.map(|l| l.clamp(1, MAX_PAGE)))
            .await?;
        Ok(posts.iter().map(PostSummary::from).collect())
    }

    /// Article with rendered blocks and the most recent other posts
    pub async fn get_public(&self, slug: &str) -> AppResult<PostDetail> {
        let post = self
            .store
            .find_by_slug(slug)
            .await?
            .filter(|p| p.is_published)
            .ok_or_else(|| not_found_error("Post", slug))?;

        let published = self.store.list_published(None).await?;
        let related = related_posts(&published, &post.slug, RELATED_POSTS)
            .into_iter()
            .map(PostSummary::from)
            .collect();

        Ok(PostDetail::new(&post, related))
    }

    pub async fn list_all(&self) -> AppResult<Vec<BlogPost>> {
        self.store.list_all().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<BlogPost> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Post", &id.to_string()))
    }

    pub async fn create(&self, request: CreatePostRequest) -> AppResult<BlogPost> {
        request.validate()?;

        let store = self.store.clone();
        let slug = allocate_slug("Post", request.slug.as_deref(), &request.title, |slug| {
            let store = store.clone();
            async move { store.slug_exists(&slug).await }
        })
        .await?;

        let now = self.clock.now();
        let post = BlogPost {
            id: Uuid::new_v4(),
            slug,
            title: request.title.trim().to_string(),
            excerpt: request.excerpt.trim().to_string(),
            body: request.body,
            cover_image: non_blank(request.cover_image),
            author: request.author.trim().to_string(),
            is_published: request.is_published,
            created_at: now,
            updated_at: now,
        };

        let post = self.store.insert(post).await?;
        info!("📰 Post created: {} (published: {})", post.slug, post.is_published);
        Ok(post)
    }

    pub async fn update(&self, id: Uuid, request: UpdatePostRequest) -> AppResult<BlogPost> {
        request.validate()?;
        let mut post = self.get_by_id(id).await?;

        if let Some(raw) = request.slug.as_deref() {
            if slugify(raw) != post.slug {
                let store = self.store.clone();
                post.slug = allocate_slug("Post", Some(raw), &post.title, |slug| {
                    let store = store.clone();
                    async move { store.slug_exists(&slug).await }
                })
                .await?;
            }
        }

        if let Some(title) = request.title {
            post.title = title.trim().to_string();
        }
        if let Some(excerpt) = request.excerpt {
            post.excerpt = excerpt.trim().to_string();
        }
        if let Some(body) = request.body {
            post.body = body;
        }
        if let Some(cover_image) = request.cover_image {
            post.cover_image = non_blank(cover_image);
        }
        if let Some(author) = request.author {
            post.author = author.trim().to_string();
        }
        if let Some(is_published) = request.is_published {
            post.is_published = is_published;
        }
        post.updated_at = self.clock.now();

        let post = self
            .store
            .update(post)
            .await?
            .ok_or_else(|| not_found_error("Post", &id.to_string()))?;
        info!("📰 Post updated: {}", post.slug);
        Ok(post)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.store.delete(id).await? {
            return Err(not_found_error("Post", &id.to_string()));
        }
        info!("🗑️ Post deleted: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::EnvironmentConfig;
    use crate::repositories::{CatalogSnapshot, MemoryStore};
    use crate::services::clock::FixedClock;
    use crate::utils::errors::AppError;

    fn controller() -> PostController {
        let store = Arc::new(MemoryStore::from_snapshot(CatalogSnapshot::bundled().unwrap()));
        let state = AppState::in_memory(store, EnvironmentConfig::development(String::new()))
            .with_clock(Arc::new(FixedClock::on(2026, 1, 1)));
        PostController::new(&state)
    }

    #[tokio::test]
    async fn test_drafts_are_hidden_publicly() {
        let controller = controller();
        let posts = controller.list_published(None).await.unwrap();
        assert!(posts.iter().all(|p| p.slug != "eid-travel-schedule"));
        assert!(matches!(
            controller.get_public("eid-travel-schedule").await,
            Err(AppError::NotFound(_))
        ));
        assert_eq!(controller.list_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_delete_removes_post() {
        let controller = controller();
        let post = controller
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .find(|p| p.slug == "corporate-rentals-explained")
            .unwrap();

        controller.delete(post.id).await.unwrap();
        assert!(matches!(controller.get_by_id(post.id).await, Err(AppError::NotFound(_))));
        assert!(matches!(
            controller.get_public("corporate-rentals-explained").await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(controller.delete(post.id).await, Err(AppError::NotFound(_))));
        assert_eq!(controller.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_detail_excludes_itself_from_related() {
        let detail = controller()
            .get_public("tips-for-renting-a-car-in-dhaka")
            .await
            .unwrap();
        assert!(!detail.blocks.is_empty());
        assert!(detail.summary.reading_time_minutes >= 1);
        assert!(detail
            .related
            .iter()
            .all(|p| p.slug != "tips-for-renting-a-car-in-dhaka"));
        assert_eq!(detail.related.len(), 1);
    }

    #[tokio::test]
    async fn test_create_and_publish() {
        let controller = controller();
        let request: CreatePostRequest = serde_json::from_value(serde_json::json!({
            "title": "Airport Transfers Made Simple",
            "author": "Fleet Desk",
            "body": "## Booking\nCall us a day ahead."
        }))
        .unwrap();

        let draft = controller.create(request).await.unwrap();
        assert_eq!(draft.slug, "airport-transfers-made-simple");
        assert!(controller.get_public(&draft.slug).await.is_err());

        let patch: UpdatePostRequest = serde_json::from_str(r#"{"is_published": true}"#).unwrap();
        controller.update(draft.id, patch).await.unwrap();
        assert!(controller.get_public(&draft.slug).await.is_ok());
    }

    #[tokio::test]
    async fn test_limit_is_applied() {
        let posts = controller().list_published(Some(1)).await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "corporate-rentals-explained");
    }
}
