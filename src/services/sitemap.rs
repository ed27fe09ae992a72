//! XML sitemap for the public site. Only active vehicles and published posts
//! are listed.

use chrono::{DateTime, Utc};

use crate::models::blog_post::BlogPost;
use crate::models::vehicle::Vehicle;

/// Pages that always exist, relative to the site root
pub const STATIC_PAGES: [&str; 6] = ["/", "/fleet", "/services", "/blog", "/about", "/contact"];

struct Entry {
    loc: String,
    lastmod: Option<DateTime<Utc>>,
}

pub fn render_sitemap(site_url: &str, vehicles: &[Vehicle], posts: &[BlogPost]) -> String {
    let base = site_url.trim_end_matches('/');

    let entries = STATIC_PAGES
        .iter()
        .map(|path| Entry {
            loc: format!("{}{}", base, path),
            lastmod: None,
        })
        .chain(vehicles.iter().filter(|v| v.is_active).map(|v| Entry {
            loc: format!("{}/fleet/{}", base, v.slug),
            lastmod: Some(v.created_at),
        }))
        .chain(posts.iter().filter(|p| p.is_published).map(|p| Entry {
            loc: format!("{}/blog/{}", base, p.slug),
            lastmod: Some(p.updated_at),
        }));

    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape(&entry.loc)));
        if let Some(lastmod) = entry.lastmod {
            xml.push_str(&format!("    <lastmod>{}</lastmod>\n", lastmod.format("%Y-%m-%d")));
        }
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::CatalogSnapshot;

    #[test]
    fn test_sitemap_respects_visibility() {
        let snapshot = CatalogSnapshot::bundled().unwrap();
        let xml = render_sitemap("https://example.com/", &snapshot.vehicles, &snapshot.posts);

        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<loc>https://example.com/</loc>"));
        assert!(xml.contains("<loc>https://example.com/fleet/toyota-axio</loc>"));
        assert!(xml.contains("<loc>https://example.com/blog/corporate-rentals-explained</loc>"));
        assert!(xml.contains("<lastmod>2025-04-12</lastmod>"));
        assert!(!xml.contains("nissan-sunny"));
        assert!(!xml.contains("eid-travel-schedule"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a&b<c>"), "a&amp;b&lt;c&gt;");
    }
}
