use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::double_option;
use crate::models::blog_post::BlogPost;
use crate::services::presentation::{parse_content, reading_time_minutes, ContentBlock};

// Request to create a post
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 3, max = 200))]
    pub title: String,

    /// Generated from `title` when absent
    pub slug: Option<String>,

    #[serde(default)]
    #[validate(length(max = 500))]
    pub excerpt: String,

    #[serde(default)]
    pub body: String,

    pub cover_image: Option<String>,

    #[validate(length(min = 2, max = 100))]
    pub author: String,

    #[serde(default)]
    pub is_published: bool,
}

// Partial update
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(min = 3, max = 200))]
    pub title: Option<String>,
    pub slug: Option<String>,
    #[validate(length(max = 500))]
    pub excerpt: Option<String>,
    pub body: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub cover_image: Option<Option<String>>,
    #[validate(length(min = 2, max = 100))]
    pub author: Option<String>,
    pub is_published: Option<bool>,
}

// Card on the blog index
#[derive(Debug, Clone, Serialize)]
pub struct PostSummary {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub cover_image: Option<String>,
    pub author: String,
    pub reading_time_minutes: u32,
    pub published_at: DateTime<Utc>,
}

// Article page
#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub summary: PostSummary,
    pub updated_at: DateTime<Utc>,
    pub blocks: Vec<ContentBlock>,
    pub related: Vec<PostSummary>,
}

impl From<&BlogPost> for PostSummary {
    fn from(post: &BlogPost) -> Self {
        Self {
            id: post.id,
            slug: post.slug.clone(),
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            cover_image: post.cover_image.clone(),
            author: post.author.clone(),
            reading_time_minutes: reading_time_minutes(&post.body),
            published_at: post.created_at,
        }
    }
}

impl PostDetail {
    pub fn new(post: &BlogPost, related: Vec<PostSummary>) -> Self {
        Self {
            summary: PostSummary::from(post),
            updated_at: post.updated_at,
            blocks: parse_content(&post.body),
            related,
        }
    }
}
