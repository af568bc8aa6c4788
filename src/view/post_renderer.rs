use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::lang::t;
use crate::post::Post;
use crate::text_utils::format_date;

#[derive(ramhorns::Content)]
struct ViewTag<'a> {
    tag: &'a str,
}

#[derive(ramhorns::Content)]
struct ViewItem<'a> {
    lang: &'a str,
    title: &'a str,
    date: &'a str,
    description: &'a str,
    tags: Vec<ViewTag<'a>>,
    has_tags: bool,
    content: &'a str,
    posted_on_label: &'a str,
    tags_label: &'a str,
    home_label: &'a str,
    og_image: &'a str,
    has_alternate: bool,
    alternate_url: &'a str,
    alternate_label: &'a str,
    has_cover: bool,
    cover: &'a str,
    cover_alt: &'a str,
}

pub struct PostRenderer<'a> {
    pub template: Template<'a>,
}

impl PostRenderer<'_> {
    pub fn new(view_tpl_src: &str) -> io::Result<PostRenderer> {
        let template = match Template::new(view_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing post view template: {}", e)));
            }
        };

        Ok(PostRenderer {
            template,
        })
    }

    /// `content` is the already rendered HTML body; `alternate_url` links to
    /// the translation counterpart when one exists
    pub fn render(&self, post: &Post, content: &str, alternate_url: Option<&str>) -> String {
        let tags: Vec<ViewTag> = post.tags.iter().map(|t| ViewTag { tag: t.as_str() }).collect();
        let date = format_date(&post.date);
        let og_image = format!("/og/{}/{}.png", post.lang, post.slug);

        self.template.render(&ViewItem {
            lang: post.lang.as_str(),
            title: post.title.as_str(),
            date: date.as_str(),
            description: post.description.as_str(),
            has_tags: !tags.is_empty(),
            tags,
            content,
            posted_on_label: t(post.lang, "postedOn"),
            tags_label: t(post.lang, "tags"),
            home_label: t(post.lang, "home"),
            og_image: og_image.as_str(),
            has_alternate: alternate_url.is_some(),
            alternate_url: alternate_url.unwrap_or(""),
            alternate_label: post.lang.switch_label(),
            has_cover: post.cover.is_some(),
            cover: post.cover.as_deref().unwrap_or(""),
            cover_alt: post.cover_alt.as_deref().unwrap_or(""),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::lang::Lang;
    use crate::text_utils::parse_iso_date;

    use super::*;

    #[test]
    fn render_view() {
        let template_src = r##"
LANG=[{{lang}}]
TITLE=[{{title}}]
DATE=[{{date}}]
TAGS=[{{#tags}}({{tag}}){{/tags}}]
OG=[{{og_image}}]
ALT=[{{#has_alternate}}{{alternate_url}} {{alternate_label}}{{/has_alternate}}]
CONTENT=[{{{content}}}]
"##;
        let post_renderer = PostRenderer::new(template_src).unwrap();
        let post = Post {
            file_name: PathBuf::from("posts/hello-world.ja.md"),
            slug: "hello-world".to_string(),
            lang: Lang::Ja,
            title: "こんにちは".to_string(),
            date: parse_iso_date("2024-01-02T03:04:05Z").unwrap(),
            description: "desc".to_string(),
            tags: vec!["<rust>".to_string(), "blog".to_string()],
            cover: None,
            cover_alt: None,
            body: "".to_string(),
        };
        let res = post_renderer.render(&post, "<p>body</p>", Some("/en/posts/hello-world/"));
        assert_eq!(res, r##"
LANG=[ja]
TITLE=[こんにちは]
DATE=[2024-01-02]
TAGS=[(&lt;rust&gt;)(blog)]
OG=[/og/ja/hello-world.png]
ALT=[/en/posts/hello-world/ English]
CONTENT=[<p>body</p>]"##);
    }

    #[test]
    fn render_view_without_alternate() {
        let template_src = "{{#has_alternate}}ALT{{/has_alternate}}-";
        let post_renderer = PostRenderer::new(template_src).unwrap();
        let post = Post {
            file_name: PathBuf::from("posts/solo.en.md"),
            slug: "solo".to_string(),
            lang: Lang::En,
            title: "Solo".to_string(),
            date: parse_iso_date("2024-01-02").unwrap(),
            description: "d".to_string(),
            tags: vec![],
            cover: None,
            cover_alt: None,
            body: "".to_string(),
        };
        let res = post_renderer.render(&post, "", None);
        assert_eq!(res, "-");
    }
}
