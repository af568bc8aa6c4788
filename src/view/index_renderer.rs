use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::lang::{t, SUPPORTED_LANGS};
use crate::post_store::PostStore;

#[derive(ramhorns::Content)]
struct IndexPage<'a> {
    site_title: &'a str,
    site_description: &'a str,
    languages: Vec<LangEntry<'a>>,
}

#[derive(ramhorns::Content)]
struct LangEntry<'a> {
    code: &'a str,
    url: String,
    label: &'a str,
    post_count: usize,
}

/// Landing page: one link per language with its post count
pub struct IndexRenderer<'a> {
    pub template: Template<'a>,
}

impl IndexRenderer<'_> {
    pub fn new(index_tpl_src: &str) -> io::Result<IndexRenderer> {
        let template = match Template::new(index_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing index template: {}", e)));
            }
        };

        Ok(IndexRenderer {
            template,
        })
    }

    pub fn render(&self, site_title: &str, site_description: &str, store: &PostStore) -> String {
        let languages = SUPPORTED_LANGS.iter().map(|&lang| LangEntry {
            code: lang.as_str(),
            url: format!("/{}/", lang),
            label: t(lang, "posts"),
            post_count: store.by_lang(lang).len(),
        }).collect();

        self.template.render(&IndexPage {
            site_title,
            site_description,
            languages,
        })
    }
}
