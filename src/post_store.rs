use spdlog::warn;

use crate::lang::Lang;
use crate::post::Post;

/// All posts of the site, held in memory for one build pass.
/// Kept sorted by descending date after `sort()`.
pub struct PostStore {
    posts: Vec<Post>,
}

impl PostStore {
    pub fn new() -> PostStore {
        PostStore { posts: vec![] }
    }

    pub fn add(&mut self, post: Post) {
        if let Some(file_lang) = post.file_lang() {
            if file_lang != post.lang {
                warn!("Frontmatter lang {} disagrees with file name {} - using frontmatter",
                      post.lang, post.file_name.display());
            }
        }

        // At most one post per (slug, lang) is expected. Not enforced, the
        // first match by date wins in lookups.
        if self.find(&post.slug, post.lang).is_some() {
            warn!("Duplicate post for slug={} lang={}", post.slug, post.lang);
        }

        self.posts.push(post);
    }

    pub fn sort(&mut self) {
        self.posts.sort_by(|a, b| b.date.cmp(&a.date));
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Every post, in the store's order (descending date after sort)
    pub fn all(&self) -> &[Post] {
        &self.posts
    }

    pub fn by_lang(&self, lang: Lang) -> Vec<&Post> {
        self.posts.iter().filter(|p| p.lang == lang).collect()
    }

    pub fn find(&self, slug: &str, lang: Lang) -> Option<&Post> {
        self.posts.iter().find(|p| p.slug == slug && p.lang == lang)
    }

    /// The translation counterpart: same slug, the other language
    pub fn alternate(&self, slug: &str, lang: Lang) -> Option<&Post> {
        self.find(slug, lang.other())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::post::Post;
    use crate::text_utils::parse_iso_date;

    use super::*;

    fn make_post(slug: &str, lang: Lang, date: &str) -> Post {
        Post {
            file_name: PathBuf::from(format!("posts/{}.{}.md", slug, lang)),
            slug: slug.to_string(),
            lang,
            title: format!("title-{}-{}", slug, lang),
            date: parse_iso_date(date).unwrap(),
            description: format!("desc-{}", slug),
            tags: vec![],
            cover: None,
            cover_alt: None,
            body: "body".to_string(),
        }
    }

    fn make_store() -> PostStore {
        let mut store = PostStore::new();
        store.add(make_post("oldest", Lang::En, "2023-01-01"));
        store.add(make_post("hello-world", Lang::Ja, "2024-01-02"));
        store.add(make_post("hello-world", Lang::En, "2024-01-03"));
        store.add(make_post("ja-only", Lang::Ja, "2024-02-01"));
        store.sort();
        store
    }

    #[test]
    fn test_all_sorted_desc() {
        let store = make_store();
        let slugs: Vec<_> = store.all().iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["ja-only", "hello-world", "hello-world", "oldest"]);
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_by_lang_filters_and_sorts() {
        let store = make_store();
        let ja = store.by_lang(Lang::Ja);
        assert!(ja.iter().all(|p| p.lang == Lang::Ja));
        let slugs: Vec<_> = ja.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["ja-only", "hello-world"]);

        let en = store.by_lang(Lang::En);
        let slugs: Vec<_> = en.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["hello-world", "oldest"]);
    }

    #[test]
    fn test_find() {
        let store = make_store();
        assert!(store.find("hello-world", Lang::Ja).is_some());
        assert!(store.find("ja-only", Lang::En).is_none());
        assert!(store.find("missing", Lang::Ja).is_none());
    }

    #[test]
    fn test_alternate_pairing() {
        let store = make_store();

        let alt = store.alternate("hello-world", Lang::Ja).unwrap();
        assert_eq!(alt.lang, Lang::En);
        assert_eq!(alt.slug, "hello-world");

        // No counterpart in the other language
        assert!(store.alternate("ja-only", Lang::Ja).is_none());
        // Same-language post is never its own alternate
        assert!(store.alternate("oldest", Lang::En).is_none());
    }
}
