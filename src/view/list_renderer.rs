use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::lang::{t, Lang};
use crate::post::Post;
use crate::text_utils::format_date;

#[derive(ramhorns::Content)]
struct ListPage<'a> {
    lang: &'a str,
    site_title: &'a str,
    heading: &'a str,
    rss_url: String,
    rss_label: &'a str,
    home_label: &'a str,
    switch_url: String,
    switch_label: &'a str,
    post_list: Vec<PostItem>,
}

#[derive(ramhorns::Content)]
struct PostItem {
    date: String,
    link: String,
    title: String,
    description: String,
}

pub struct ListRenderer<'a> {
    pub template: Template<'a>,
}

impl ListRenderer<'_> {
    pub fn new(list_tpl_src: &str) -> io::Result<ListRenderer> {
        let template = match Template::new(list_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing list template: {}", e)));
            }
        };

        Ok(ListRenderer {
            template,
        })
    }

    pub fn render(&self, site_title: &str, lang: Lang, posts: &[&Post]) -> String {
        let mut post_list = vec![];
        for post in posts {
            post_list.push(PostItem {
                date: format_date(&post.date),
                link: format!("/{}/posts/{}/", lang, post.slug),
                title: post.title.clone(),
                description: post.description.clone(),
            });
        }

        self.template.render(&ListPage {
            lang: lang.as_str(),
            site_title,
            heading: t(lang, "allPosts"),
            rss_url: format!("/{}/rss.xml", lang),
            rss_label: t(lang, "rss"),
            home_label: t(lang, "home"),
            switch_url: format!("/{}/", lang.other()),
            switch_label: lang.switch_label(),
            post_list,
        })
    }
}
