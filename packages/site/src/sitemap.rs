use crate::dialogs::canonical_paths;
use crate::routing::build_localized_path;
use crate::types::Lang;

/// XML sitemap listing every canonical path in every language, each with
/// `hreflang` alternates.
pub fn generate_sitemap(site_url: &str) -> String {
    let base = site_url.trim_end_matches('/');
    let mut urls = String::new();

    for path in canonical_paths() {
        let priority = if path == "/" { "1.0" } else { "0.8" };
        for lang in Lang::ALL {
            urls.push_str("\n  <url>\n");
            urls.push_str(&format!(
                "    <loc>{base}{}</loc>\n",
                build_localized_path(lang, path)
            ));
            for alt in Lang::ALL {
                urls.push_str(&format!(
                    "    <xhtml:link rel=\"alternate\" hreflang=\"{}\" href=\"{base}{}\" />\n",
                    alt.code(),
                    build_localized_path(alt, path)
                ));
            }
            urls.push_str("    <changefreq>monthly</changefreq>\n");
            urls.push_str(&format!("    <priority>{priority}</priority>\n"));
            urls.push_str("  </url>");
        }
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\" xmlns:xhtml=\"http://www.w3.org/1999/xhtml\">\
         {urls}\n</urlset>\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_path_in_every_language() {
        let xml = generate_sitemap("https://example.com/");
        assert_eq!(xml.matches("<url>").count(), 8);
        assert!(xml.contains("<loc>https://example.com/en</loc>"));
        assert!(xml.contains("<loc>https://example.com/de/privacy</loc>"));
        assert!(xml.contains(
            "hreflang=\"de\" href=\"https://example.com/de/imprint\""
        ));
    }

    #[test]
    fn root_has_highest_priority() {
        let xml = generate_sitemap("https://example.com");
        let root = xml.split("</url>").next().unwrap();
        assert!(root.contains("<loc>https://example.com/de</loc>"));
        assert!(root.contains("<priority>1.0</priority>"));
        assert_eq!(xml.matches("<priority>0.8</priority>").count(), 6);
    }
}
