use std::fmt;
use std::fmt::Display;
use std::str::FromStr;

use serde::Deserialize;

pub const SUPPORTED_LANGS: [Lang; 2] = [Lang::Ja, Lang::En];
pub const DEFAULT_LANG: Lang = Lang::En;

#[derive(Deserialize, Copy, Clone, Debug, Eq, Hash, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    Ja,
    En,
}

impl Lang {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lang::Ja => "ja",
            Lang::En => "en",
        }
    }

    /// The counterpart language, used to pair translations
    pub fn other(&self) -> Lang {
        match self {
            Lang::Ja => Lang::En,
            Lang::En => Lang::Ja,
        }
    }

    /// Label shown on the language switch link, in the target language
    pub fn switch_label(&self) -> &'static str {
        match self {
            Lang::Ja => "English",
            Lang::En => "日本語",
        }
    }
}

impl Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Lang {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ja" => Ok(Lang::Ja),
            "en" => Ok(Lang::En),
            other => Err(format!("Unsupported language: {}", other)),
        }
    }
}

pub fn is_valid_lang(s: &str) -> bool {
    Lang::from_str(s).is_ok()
}

/// Extracts the language from the first segment of an absolute site path.
/// "/ja/posts/hello/" -> Ja. Paths without a recognized language segment
/// resolve to the default language.
pub fn lang_from_path(path: &str) -> Lang {
    let first = path.trim_start_matches('/').split('/').next().unwrap_or("");
    Lang::from_str(first).unwrap_or(DEFAULT_LANG)
}

fn lookup(lang: Lang, key: &str) -> Option<&'static str> {
    let text = match (lang, key) {
        (Lang::Ja, "posts") => "記事一覧",
        (Lang::Ja, "rss") => "RSS",
        (Lang::Ja, "home") => "ホーム",
        (Lang::Ja, "readMore") => "続きを読む",
        (Lang::Ja, "postedOn") => "投稿日:",
        (Lang::Ja, "tags") => "タグ:",
        (Lang::Ja, "allPosts") => "すべての記事",
        (Lang::En, "posts") => "Posts",
        (Lang::En, "rss") => "RSS",
        (Lang::En, "home") => "Home",
        (Lang::En, "readMore") => "Read more",
        (Lang::En, "postedOn") => "Posted on:",
        (Lang::En, "tags") => "Tags:",
        (Lang::En, "allPosts") => "All Posts",
        _ => return None,
    };
    Some(text)
}

/// UI string lookup. Falls back to the default language, then to the key
/// itself, so a missing translation never breaks a template.
pub fn t<'a>(lang: Lang, key: &'a str) -> &'a str {
    match lookup(lang, key) {
        Some(text) => text,
        None => lookup(DEFAULT_LANG, key).unwrap_or(key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_flips() {
        assert_eq!(Lang::Ja.other(), Lang::En);
        assert_eq!(Lang::En.other(), Lang::Ja);
        assert_eq!(Lang::En.other().other(), Lang::En);
    }

    #[test]
    fn test_from_str() {
        assert_eq!(Lang::from_str("ja"), Ok(Lang::Ja));
        assert_eq!(Lang::from_str("en"), Ok(Lang::En));
        assert!(Lang::from_str("fr").is_err());
        assert!(Lang::from_str("JA").is_err());
        assert!(is_valid_lang("ja"));
        assert!(!is_valid_lang("jp"));
    }

    #[test]
    fn test_lang_from_path() {
        assert_eq!(lang_from_path("/ja/posts/hello-world/"), Lang::Ja);
        assert_eq!(lang_from_path("/en/"), Lang::En);
        assert_eq!(lang_from_path("/posts/hello-world/"), DEFAULT_LANG);
        assert_eq!(lang_from_path("/"), DEFAULT_LANG);
    }

    #[test]
    fn test_t_lookup() {
        assert_eq!(t(Lang::Ja, "posts"), "記事一覧");
        assert_eq!(t(Lang::En, "posts"), "Posts");
    }

    #[test]
    fn test_t_falls_back_to_key() {
        assert_eq!(t(Lang::Ja, "no-such-key"), "no-such-key");
        assert_eq!(t(Lang::En, "no-such-key"), "no-such-key");
    }

    #[test]
    fn test_deserialize() {
        #[derive(Deserialize)]
        struct Holder {
            lang: Lang,
        }
        let holder: Holder = toml::from_str(r#"lang = "ja""#).unwrap();
        assert_eq!(holder.lang, Lang::Ja);
    }
}
