use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{fs, io};

use anyhow::{Context, Result};
use spdlog::info;

use crate::config::Config;
use crate::lang::{Lang, SUPPORTED_LANGS};
use crate::markdown_render::render_markdown;
use crate::og_image::OgImage;
use crate::post::Post;
use crate::post_list::PostList;
use crate::post_store::PostStore;
use crate::view::index_renderer::IndexRenderer;
use crate::view::list_renderer::ListRenderer;
use crate::view::post_renderer::PostRenderer;
use crate::view::rss_renderer::RssChannel;

/// Netlify/Cloudflare style headers file. OG cards are content-addressed by
/// (lang, slug), so they can be cached forever.
const HEADERS_FILE: &str = "/og/*\n  Cache-Control: public, max-age=31536000, immutable\n";

/// Prefix applied to relative image URLs inside post bodies. The matching
/// files from the posts directory land in {output}/assets/
const ASSETS_PREFIX: &str = "/assets";

pub struct SiteBuilder {
    config: Config,
    store: PostStore,
}

impl SiteBuilder {
    pub fn new(config: Config) -> SiteBuilder {
        SiteBuilder {
            config,
            store: PostStore::new(),
        }
    }

    /// Runs one full build pass: collect posts, then write pages, feeds,
    /// OG images and static assets under the output directory.
    pub fn build(mut self) -> Result<()> {
        self.collect_posts()?;

        let out_dir = self.config.paths.output_dir.clone();
        fs::create_dir_all(&out_dir)
            .with_context(|| format!("Error creating output dir {}", out_dir.display()))?;

        self.write_index(&out_dir)?;
        self.write_lists(&out_dir)?;
        self.write_posts(&out_dir)?;
        self.write_feeds(&out_dir)?;
        self.write_og_images(&out_dir)?;
        self.copy_post_assets(&out_dir)?;
        self.copy_public(&out_dir)?;

        fs::write(out_dir.join("_headers"), HEADERS_FILE)?;

        info!("Build finished: {} posts -> {}", self.store.len(), out_dir.display());
        Ok(())
    }

    fn collect_posts(&mut self) -> Result<()> {
        let post_list = PostList {
            root_dir: self.config.paths.posts_dir.clone(),
        };
        let files = post_list.retrieve_files()
            .with_context(|| format!("Error listing posts in {}", self.config.paths.posts_dir.display()))?;

        for file in files {
            let post = Post::from(&file)
                .with_context(|| format!("Error reading post {}", file.display()))?;
            info!("Post: {} ({})", post.slug, post.lang);
            self.store.add(post);
        }
        self.store.sort();

        Ok(())
    }

    fn read_template(&self, file_name: &str) -> io::Result<String> {
        let full_path = self.config.paths.template_dir.join(file_name);
        fs::read_to_string(&full_path).map_err(|e| {
            io::Error::new(e.kind(), format!("Error loading template {}: {}", full_path.display(), e))
        })
    }

    fn write_index(&self, out_dir: &Path) -> Result<()> {
        let tpl_src = self.read_template("index.tpl")?;
        let renderer = IndexRenderer::new(&tpl_src)?;
        let html = renderer.render(
            &self.config.site.title,
            &self.config.site.description,
            &self.store,
        );
        fs::write(out_dir.join("index.html"), html)?;
        Ok(())
    }

    fn write_lists(&self, out_dir: &Path) -> Result<()> {
        let tpl_src = self.read_template("postlist.tpl")?;
        let renderer = ListRenderer::new(&tpl_src)?;

        for lang in SUPPORTED_LANGS {
            let posts = self.store.by_lang(lang);
            let html = renderer.render(&self.config.site.title, lang, &posts);
            let lang_dir = out_dir.join(lang.as_str());
            fs::create_dir_all(&lang_dir)?;
            fs::write(lang_dir.join("index.html"), html)?;
        }
        Ok(())
    }

    fn write_posts(&self, out_dir: &Path) -> Result<()> {
        let tpl_src = self.read_template("view.tpl")?;
        let renderer = PostRenderer::new(&tpl_src)?;

        for post in self.store.all() {
            let content = render_markdown(&post.body, Some(ASSETS_PREFIX))
                .with_context(|| format!("Error rendering post {}", post.file_name.display()))?;

            let alternate_url = self.store
                .alternate(&post.slug, post.lang)
                .map(|alt| format!("/{}/posts/{}/", alt.lang, alt.slug));

            let html = renderer.render(post, &content, alternate_url.as_deref());

            let post_dir = out_dir
                .join(post.lang.as_str())
                .join("posts")
                .join(&post.slug);
            fs::create_dir_all(&post_dir)?;
            fs::write(post_dir.join("index.html"), html)?;
        }
        Ok(())
    }

    fn write_feeds(&self, out_dir: &Path) -> Result<()> {
        let site = &self.config.site;

        // Combined feed with every post
        let all: Vec<&Post> = self.store.all().iter().collect();
        let channel = RssChannel {
            ch_title: &site.title,
            ch_link: &site.url,
            ch_desc: &site.description,
        };
        let xml = channel.render(&all)
            .map_err(|e| io::Error::new(ErrorKind::InvalidData, format!("Error rendering feed: {}", e)))?;
        fs::write(out_dir.join("rss.xml"), xml)?;

        // One feed per language
        for lang in SUPPORTED_LANGS {
            let posts = self.store.by_lang(lang);
            let title = format!("{} ({})", site.title, lang_feed_label(lang));
            let channel = RssChannel {
                ch_title: &title,
                ch_link: &site.url,
                ch_desc: &site.description,
            };
            let xml = channel.render(&posts)
                .map_err(|e| io::Error::new(ErrorKind::InvalidData, format!("Error rendering {} feed: {}", lang, e)))?;
            let lang_dir = out_dir.join(lang.as_str());
            fs::create_dir_all(&lang_dir)?;
            fs::write(lang_dir.join("rss.xml"), xml)?;
        }
        Ok(())
    }

    fn write_og_images(&self, out_dir: &Path) -> Result<()> {
        if self.store.is_empty() {
            return Ok(());
        }

        let og = OgImage::new(self.config.paths.font_file.clone())?;
        let label = self.config.site.og_label();

        for post in self.store.all() {
            let png = og.render_png(&post.title, &label)
                .with_context(|| format!("Error rendering OG image for {}", post.slug))?;
            let og_dir = out_dir.join("og").join(post.lang.as_str());
            fs::create_dir_all(&og_dir)?;
            fs::write(og_dir.join(format!("{}.png", post.slug)), png)?;
        }
        Ok(())
    }

    /// Non-markdown files next to the posts (covers, inline images) are
    /// published once under /assets/
    fn copy_post_assets(&self, out_dir: &Path) -> Result<()> {
        let posts_dir = &self.config.paths.posts_dir;
        let assets_dir = out_dir.join("assets");

        let entries = fs::read_dir(posts_dir)?;
        let mut copied = false;
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else { continue };
            if name.ends_with(".md") || name.starts_with('.') {
                continue;
            }
            if !copied {
                fs::create_dir_all(&assets_dir)?;
                copied = true;
            }
            fs::copy(entry.path(), assets_dir.join(name))?;
        }
        Ok(())
    }

    fn copy_public(&self, out_dir: &Path) -> Result<()> {
        let public_dir = &self.config.paths.public_dir;
        if !public_dir.is_dir() {
            return Ok(());
        }
        copy_dir(public_dir, &out_dir.to_path_buf())
    }
}

fn lang_feed_label(lang: Lang) -> &'static str {
    match lang {
        Lang::Ja => "日本語",
        Lang::En => "English",
    }
}

fn copy_dir(from: &PathBuf, to: &PathBuf) -> Result<()> {
    fs::create_dir_all(to)?;
    let entries = fs::read_dir(from)?;
    for entry in entries {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), target)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::io::Write;

    use crate::config::{Paths, Site};

    use super::*;

    fn write_file(path: &Path, content: &str) {
        let mut f = File::create(path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
    }

    fn make_config(base: &Path) -> Config {
        Config {
            site: Site {
                title: "my blog".to_string(),
                url: "https://blog.example.net".to_string(),
                description: "about things".to_string(),
                default_lang: None,
                og_label: None,
            },
            paths: Paths {
                posts_dir: base.join("posts"),
                template_dir: base.join("template"),
                public_dir: base.join("public"),
                output_dir: base.join("dist"),
                font_file: None,
            },
            log: None,
        }
    }

    fn seed_site(base: &Path) {
        fs::create_dir_all(base.join("posts")).unwrap();
        fs::create_dir_all(base.join("template")).unwrap();
        fs::create_dir_all(base.join("public")).unwrap();

        write_file(&base.join("posts/hello-world.ja.md"), "+++\ntitle = \"こんにちは\"\ndate = \"2024-01-02\"\ndescription = \"最初の記事\"\nlang = \"ja\"\n+++\n\n本文。\n");
        write_file(&base.join("posts/hello-world.en.md"), "+++\ntitle = \"Hello\"\ndate = \"2024-01-03\"\ndescription = \"First post\"\nlang = \"en\"\n+++\n\nBody.\n");
        write_file(&base.join("posts/ja-only.ja.md"), "+++\ntitle = \"単独\"\ndate = \"2024-02-01\"\ndescription = \"対訳なし\"\nlang = \"ja\"\n+++\n\n本文。\n");
        write_file(&base.join("posts/diagram.png"), "not-really-a-png");

        write_file(&base.join("template/index.tpl"), "{{site_title}}:{{#languages}}{{code}}={{post_count}};{{/languages}}");
        write_file(&base.join("template/postlist.tpl"), "{{lang}}:{{#post_list}}{{link}};{{/post_list}}");
        write_file(&base.join("template/view.tpl"), "{{title}}|{{#has_alternate}}{{alternate_url}}{{/has_alternate}}|{{{content}}}");
        write_file(&base.join("public/style.css"), "body {}");
    }

    // OG rasterization needs fonts from the host, so the build test stops
    // short of it and exercises the page/feed/asset passes.
    #[test]
    fn test_build_pages_and_feeds() {
        let base = std::env::temp_dir().join("futaba-site-builder-test");
        let _ = fs::remove_dir_all(&base);
        seed_site(&base);

        let config = make_config(&base);
        let mut builder = SiteBuilder::new(config);
        builder.collect_posts().unwrap();

        let out_dir = builder.config.paths.output_dir.clone();
        fs::create_dir_all(&out_dir).unwrap();
        builder.write_index(&out_dir).unwrap();
        builder.write_lists(&out_dir).unwrap();
        builder.write_posts(&out_dir).unwrap();
        builder.write_feeds(&out_dir).unwrap();
        builder.copy_post_assets(&out_dir).unwrap();
        builder.copy_public(&out_dir).unwrap();
        fs::write(out_dir.join("_headers"), HEADERS_FILE).unwrap();

        let index = fs::read_to_string(out_dir.join("index.html")).unwrap();
        assert_eq!(index, "my blog:ja=2;en=1;");

        let ja_list = fs::read_to_string(out_dir.join("ja/index.html")).unwrap();
        assert_eq!(ja_list, "ja:/ja/posts/ja-only/;/ja/posts/hello-world/;");

        let ja_post = fs::read_to_string(out_dir.join("ja/posts/hello-world/index.html")).unwrap();
        assert!(ja_post.starts_with("こんにちは|/en/posts/hello-world/|"));
        let solo = fs::read_to_string(out_dir.join("ja/posts/ja-only/index.html")).unwrap();
        assert!(solo.starts_with("単独||"));

        let combined = fs::read_to_string(out_dir.join("rss.xml")).unwrap();
        assert_eq!(combined.matches("<item>").count(), 3);
        let ja_feed = fs::read_to_string(out_dir.join("ja/rss.xml")).unwrap();
        assert_eq!(ja_feed.matches("<item>").count(), 2);
        assert!(ja_feed.contains("my blog (日本語)"));
        let en_feed = fs::read_to_string(out_dir.join("en/rss.xml")).unwrap();
        assert_eq!(en_feed.matches("<item>").count(), 1);

        assert!(out_dir.join("assets/diagram.png").is_file());
        assert!(out_dir.join("style.css").is_file());
        assert!(fs::read_to_string(out_dir.join("_headers")).unwrap().contains("immutable"));

        fs::remove_dir_all(&base).unwrap();
    }
}
