use std::io::ErrorKind;
use std::path::PathBuf;
use std::str::FromStr;
use std::{fmt, fs, io};

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::lang::Lang;
use crate::text_utils::parse_iso_date;

const FRONTMATTER_FENCE: &str = "+++";

/// Frontmatter block as written in the post file, before date parsing
#[derive(Deserialize)]
struct FrontMatter {
    title: String,
    date: String,
    description: String,
    #[serde(default)]
    tags: Vec<String>,
    lang: Lang,
    cover: Option<String>,
    cover_alt: Option<String>,
}

pub struct Post {
    pub file_name: PathBuf,
    pub slug: String,
    pub lang: Lang,
    pub title: String,
    pub date: NaiveDateTime,
    pub description: String,
    pub tags: Vec<String>,
    pub cover: Option<String>,
    pub cover_alt: Option<String>,
    pub body: String,
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slug={}, lang={}, date={}\ntitle={}",
               self.slug, self.lang, self.date, self.title)
    }
}

/// Example of post file (hello-world.ja.md)
/// +++
/// title = "こんにちは"
/// date = "2024-01-02T03:04:05Z"
/// description = "最初の記事"
/// tags = ["life"]
/// lang = "ja"
/// +++
///
/// 本文はここから始まります。
impl Post {
    pub fn from(file_name: &PathBuf) -> io::Result<Post> {
        let raw = fs::read_to_string(file_name)?;
        Self::from_string(file_name, &raw)
    }

    pub fn from_string(file_name: &PathBuf, raw: &str) -> io::Result<Post> {
        let (fm_block, body) = split_frontmatter(raw).map_err(|e| {
            io::Error::new(ErrorKind::InvalidData,
                           format!("{} - file={}", e, file_name.display()))
        })?;

        let fm: FrontMatter = toml::from_str(fm_block).map_err(|e| {
            io::Error::new(ErrorKind::InvalidData,
                           format!("Error parsing frontmatter: {} - file={}", e, file_name.display()))
        })?;

        let date = parse_iso_date(&fm.date).map_err(|e| {
            io::Error::new(ErrorKind::InvalidData,
                           format!("{} - file={}", e, file_name.display()))
        })?;

        let id = match file_name.file_name().and_then(|f| f.to_str()) {
            Some(id) => id,
            None => return Err(io::Error::new(ErrorKind::InvalidInput,
                                              format!("Invalid post path {}", file_name.display()))),
        };
        let slug = slug_from_id(id);

        Ok(Post {
            file_name: file_name.clone(),
            slug,
            lang: fm.lang,
            title: fm.title,
            date,
            description: fm.description,
            tags: fm.tags,
            cover: fm.cover,
            cover_alt: fm.cover_alt,
            body: body.to_string(),
        })
    }

    /// Language encoded in the file name suffix, when present.
    /// "hello-world.ja.md" -> Some(Ja), "about.md" -> None
    pub fn file_lang(&self) -> Option<Lang> {
        let id = self.file_name.file_name()?.to_str()?;
        let without_ext = id.strip_suffix(".md").unwrap_or(id);
        let tag = without_ext.rsplit('.').next()?;
        if tag == without_ext {
            return None;
        }
        Lang::from_str(tag).ok()
    }
}

/// Derives the language-independent slug from a post file name.
/// "hello-world.ja.md" -> "hello-world". A trailing tag that is not a
/// recognized language stays part of the slug: "v1.2-notes.md" -> "v1.2-notes"
pub fn slug_from_id(id: &str) -> String {
    let without_ext = id.strip_suffix(".md").unwrap_or(id);
    let parts: Vec<&str> = without_ext.split('.').collect();
    if parts.len() >= 2 {
        let lang_part = parts[parts.len() - 1];
        if Lang::from_str(lang_part).is_ok() {
            return parts[..parts.len() - 1].join(".");
        }
    }
    without_ext.to_string()
}

fn split_frontmatter(raw: &str) -> Result<(&str, &str), String> {
    let rest = raw.trim_start_matches('\u{feff}');
    let rest = rest.trim_start();
    let Some(rest) = rest.strip_prefix(FRONTMATTER_FENCE) else {
        return Err("Missing frontmatter opening fence".to_string());
    };

    match rest.find(&format!("\n{}", FRONTMATTER_FENCE)) {
        Some(end) => {
            let block = &rest[..end];
            let body = &rest[end + 1 + FRONTMATTER_FENCE.len()..];
            Ok((block, body.trim_start_matches('\n')))
        }
        None => Err("Missing frontmatter closing fence".to_string()),
    }
}
