use std::fmt::Write;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::Utc;
use unidecode::unidecode;

use futaba::lang::Lang;

use crate::PostArgs;

fn render_frontmatter(title: &str, date: &str, lang: Lang) -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf, "+++");
    let _ = writeln!(&mut buf, "title = \"{}\"", title.replace('"', "\\\""));
    let _ = writeln!(&mut buf, "date = \"{}\"", date);
    let _ = writeln!(&mut buf, "description = \"Replace with a short description\"");
    let _ = writeln!(&mut buf, "tags = []");
    let _ = writeln!(&mut buf, "lang = \"{}\"", lang);
    let _ = writeln!(&mut buf, "+++");

    buf
}

fn render_body() -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf, "This is a body example");
    let _ = writeln!(&mut buf, "Please remove it and replace with your content");

    buf
}

/// Builds the language-independent slug from a title. Non-latin characters
/// are transliterated first, so a ja title still yields a usable file name
fn slug_from_title(title: &str) -> String {
    let ascii = unidecode(title);
    let alpha_chars: String = ascii.chars()
        .filter(|&c| c.is_alphanumeric() || c == ' ')
        .map(|c| if c == ' ' { '-' } else { c })
        .map(|c| c.to_ascii_lowercase())
        .collect();

    let mut slug = String::new();
    let mut prev_char = None;

    for c in alpha_chars.chars() {
        if c != '-' || prev_char != Some('-') {
            slug.push(c);
        }
        prev_char = Some(c);
    }

    slug.trim_matches('-').to_string()
}

pub fn post_cmd(args: PostArgs) {
    let lang = match Lang::from_str(&args.lang) {
        Ok(lang) => lang,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };

    let date = Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
    let content = format!("{}\n{}", render_frontmatter(&args.title, &date, lang), render_body());

    match args.out_dir {
        None => println!("{}", content),
        Some(out_dir) => {
            let slug = slug_from_title(&args.title);
            let file_path = PathBuf::from(out_dir).join(format!("{}.{}.md", slug, lang));
            if file_path.exists() {
                eprintln!("Post already exists: {}", file_path.display());
                return;
            }
            match fs::write(&file_path, content) {
                Ok(()) => println!("Created {}", file_path.display()),
                Err(e) => eprintln!("Error writing {}: {}", file_path.display(), e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_frontmatter() {
        let fm = render_frontmatter("This is a title", "2024-02-27T06:20:53Z", Lang::En);
        assert_eq!(fm, "+++
title = \"This is a title\"
date = \"2024-02-27T06:20:53Z\"
description = \"Replace with a short description\"
tags = []
lang = \"en\"
+++
");
    }

    #[test]
    fn test_slug_from_title() {
        assert_eq!(slug_from_title("Post title of mine ábaco - dir2"), "post-title-of-mine-abaco-dir2");
        assert_eq!(slug_from_title("  Spaces   everywhere  "), "spaces-everywhere");
        assert_eq!(slug_from_title("こんにちは 世界"), "konnichiha-shi-jie");
    }
}
