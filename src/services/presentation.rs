//! Presentation adapter
//!
//! Pure functions that turn stored catalog rows into what the public pages
//! render: price labels, category colors, content blocks, reading time and
//! related posts.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::models::blog_post::BlogPost;
use crate::models::vehicle::VehicleCategory;

pub const CURRENCY_SYMBOL: &str = "৳";
pub const PRICE_ON_REQUEST: &str = "Contact for pricing";
pub const WORDS_PER_MINUTE: usize = 200;
pub const RELATED_POSTS: usize = 3;

/// `৳3,500 per day`, or the on-request label when there is no price
pub fn format_price(amount: Option<Decimal>, label: &str) -> String {
    match amount {
        None => PRICE_ON_REQUEST.to_string(),
        Some(amount) => {
            let money = format_amount(amount);
            let label = label.trim();
            if label.is_empty() {
                money
            } else {
                format!("{} {}", money, label)
            }
        }
    }
}

/// Currency symbol, thousands separators, decimals only when non-zero
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let whole = rounded.trunc();
    let cents = ((rounded - whole).abs() * Decimal::from(100)).trunc();

    let digits = whole.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    if cents.is_zero() {
        format!("{}{}{}", sign, CURRENCY_SYMBOL, grouped)
    } else {
        format!("{}{}{}.{:0>2}", sign, CURRENCY_SYMBOL, grouped, cents.to_string())
    }
}

/// Badge color used by the listing cards
pub fn category_color(category: VehicleCategory) -> &'static str {
    match category {
        VehicleCategory::Economy => "emerald",
        VehicleCategory::Luxury => "amber",
        VehicleCategory::Bus => "sky",
    }
}

/// One rendered line of a post body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum ContentBlock {
    Heading2(String),
    Heading3(String),
    Bullet(String),
    Paragraph(String),
    Break,
}

/// Line-oriented marker grammar: `## `, `### `, `- `, blank line, paragraph.
pub fn parse_content(body: &str) -> Vec<ContentBlock> {
    body.lines()
        .map(|line| {
            let line = line.trim_end();
            if let Some(text) = line.strip_prefix("### ") {
                ContentBlock::Heading3(text.trim().to_string())
            } else if let Some(text) = line.strip_prefix("## ") {
                ContentBlock::Heading2(text.trim().to_string())
            } else if let Some(text) = line.strip_prefix("- ") {
                ContentBlock::Bullet(text.trim().to_string())
            } else if line.trim().is_empty() {
                ContentBlock::Break
            } else {
                ContentBlock::Paragraph(line.trim().to_string())
            }
        })
        .collect()
}

/// Minutes at `WORDS_PER_MINUTE`, rounded up, never below one
pub fn reading_time_minutes(body: &str) -> u32 {
    let words = body.split_whitespace().count();
    words.div_ceil(WORDS_PER_MINUTE).max(1) as u32
}

/// Most recent published posts other than `current_slug`
pub fn related_posts<'a>(posts: &'a [BlogPost], current_slug: &str, limit: usize) -> Vec<&'a BlogPost> {
    let mut related: Vec<&BlogPost> = posts
        .iter()
        .filter(|p| p.is_published && p.slug != current_slug)
        .collect();
    related.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    related.truncate(limit);
    related
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn post(slug: &str, published: bool, age_days: i64) -> BlogPost {
        let created = Utc::now() - Duration::days(age_days);
        BlogPost {
            id: Uuid::new_v4(),
            slug: slug.to_string(),
            title: slug.to_string(),
            excerpt: String::new(),
            body: String::new(),
            cover_image: None,
            author: "Fleet Desk".to_string(),
            is_published: published,
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(Some(Decimal::new(3500, 0)), "per day"), "৳3,500 per day");
        assert_eq!(format_price(Some(Decimal::new(150000, 0)), ""), "৳150,000");
        assert_eq!(format_price(Some(Decimal::new(99950, 2)), "per hour"), "৳999.50 per hour");
        assert_eq!(format_price(None, "per day"), PRICE_ON_REQUEST);
    }

    #[test]
    fn test_format_amount_small_and_zero() {
        assert_eq!(format_amount(Decimal::ZERO), "৳0");
        assert_eq!(format_amount(Decimal::new(999, 0)), "৳999");
        assert_eq!(format_amount(Decimal::new(1_000_000, 0)), "৳1,000,000");
    }

    #[test]
    fn test_category_colors_are_distinct() {
        let colors = [
            category_color(VehicleCategory::Economy),
            category_color(VehicleCategory::Luxury),
            category_color(VehicleCategory::Bus),
        ];
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
    }

    #[test]
    fn test_parse_content_markers() {
        let body = "## Before you book\n### Documents\n- National ID\n\nCall us first.";
        assert_eq!(
            parse_content(body),
            vec![
                ContentBlock::Heading2("Before you book".to_string()),
                ContentBlock::Heading3("Documents".to_string()),
                ContentBlock::Bullet("National ID".to_string()),
                ContentBlock::Break,
                ContentBlock::Paragraph("Call us first.".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_content_requires_marker_space() {
        assert_eq!(
            parse_content("##NoSpace\n-dash"),
            vec![
                ContentBlock::Paragraph("##NoSpace".to_string()),
                ContentBlock::Paragraph("-dash".to_string()),
            ]
        );
    }

    #[test]
    fn test_content_block_serialization() {
        let value = serde_json::to_value(ContentBlock::Bullet("GPS".to_string())).unwrap();
        assert_eq!(value["type"], "bullet");
        assert_eq!(value["text"], "GPS");
        let value = serde_json::to_value(ContentBlock::Break).unwrap();
        assert_eq!(value["type"], "break");
    }

    #[test]
    fn test_reading_time() {
        assert_eq!(reading_time_minutes(&"word ".repeat(400)), 2);
        assert_eq!(reading_time_minutes("word"), 1);
        assert_eq!(reading_time_minutes(&"word ".repeat(401)), 3);
        assert_eq!(reading_time_minutes(""), 1);
    }

    #[test]
    fn test_related_posts() {
        let posts = vec![
            post("current", true, 1),
            post("older", true, 10),
            post("newest", true, 0),
            post("draft", false, 0),
            post("oldest", true, 30),
        ];
        let related: Vec<&str> = related_posts(&posts, "current", 2)
            .into_iter()
            .map(|p| p.slug.as_str())
            .collect();
        assert_eq!(related, vec!["newest", "older"]);
    }
}
