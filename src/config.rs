use std::io::ErrorKind;
use std::path::PathBuf;
use std::{env, fs, io};

use serde::Deserialize;

use crate::lang::{Lang, DEFAULT_LANG};

#[derive(Deserialize)]
pub struct Site {
    pub title: String,
    pub url: String,
    pub description: String,
    pub default_lang: Option<Lang>,
    /// Caption on generated OG cards. Defaults to the site host
    pub og_label: Option<String>,
}

impl Site {
    pub fn default_lang(&self) -> Lang {
        self.default_lang.unwrap_or(DEFAULT_LANG)
    }

    pub fn og_label(&self) -> String {
        if let Some(ref label) = self.og_label {
            return label.clone();
        }
        let stripped = self.url
            .trim_start_matches("https://")
            .trim_start_matches("http://");
        stripped.trim_end_matches('/').to_string()
    }
}

#[derive(Deserialize)]
pub struct Paths {
    pub posts_dir: PathBuf,
    pub template_dir: PathBuf,
    pub public_dir: PathBuf,
    pub output_dir: PathBuf,
    pub font_file: Option<PathBuf>,
}

#[derive(Deserialize)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize)]
pub struct Config {
    pub site: Site,
    pub paths: Paths,
    pub log: Option<Log>,
}

fn parse_path(path: PathBuf) -> PathBuf {
    if path.starts_with("${exe_dir}") {
        let cur_exe = env::current_exe().unwrap();
        let exe_dir = cur_exe.parent().unwrap().to_str().unwrap();
        let str_path = path.to_str().unwrap();
        PathBuf::from(str_path.replace("${exe_dir}", exe_dir))
    } else {
        path
    }
}

pub fn read_config(cfg_path: &PathBuf) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    let mut cfg: Config = match toml::from_str::<Config>(cfg_content.as_str()) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths = Paths {
        posts_dir: parse_path(cfg.paths.posts_dir),
        template_dir: parse_path(cfg.paths.template_dir),
        public_dir: parse_path(cfg.paths.public_dir),
        output_dir: parse_path(cfg.paths.output_dir),
        font_file: cfg.paths.font_file.map(parse_path),
    };

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG_SRC: &str = r#"
[site]
title = "my blog"
url = "https://blog.example.net/"
description = "about things"
default_lang = "en"

[paths]
posts_dir = "posts"
template_dir = "res/template"
public_dir = "res/public"
output_dir = "dist"
"#;

    #[test]
    fn test_parse_config() {
        let cfg: Config = toml::from_str(CONFIG_SRC).unwrap();
        assert_eq!(cfg.site.title, "my blog");
        assert_eq!(cfg.site.default_lang(), Lang::En);
        assert_eq!(cfg.site.og_label(), "blog.example.net");
        assert_eq!(cfg.paths.posts_dir, PathBuf::from("posts"));
        assert!(cfg.paths.font_file.is_none());
        assert!(cfg.log.is_none());
    }

    #[test]
    fn test_og_label_override() {
        let site = Site {
            title: "t".to_string(),
            url: "https://blog.example.net".to_string(),
            description: "d".to_string(),
            default_lang: None,
            og_label: Some("elsewhere.net".to_string()),
        };
        assert_eq!(site.og_label(), "elsewhere.net");
        assert_eq!(site.default_lang(), DEFAULT_LANG);
    }
}
