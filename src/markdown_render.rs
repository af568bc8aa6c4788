use std::io;
use std::io::ErrorKind;

use markdown::Options;

/// Renders a post body to HTML. Relative image URLs get `img_prefix`
/// prepended so they resolve from the generated post directory.
pub fn render_markdown(md_text: &str, img_prefix: Option<&str>) -> io::Result<String> {
    let buf = if let Some(img_prefix) = img_prefix {
        change_images(img_prefix, md_text)
    } else {
        md_text.to_string()
    };
    match markdown::to_html_with_options(buf.as_str(), &Options::gfm()) {
        Ok(x) => Ok(x),
        Err(e) => Err(io::Error::new(ErrorKind::InvalidInput, e.reason.as_str())),
    }
}

fn change_images(prefix: &str, md_post: &str) -> String {
    let mut parsed_string = String::new();
    let mut remaining_input = md_post;

    while let Some(text_start) = remaining_input.find("![") {
        let text_end = text_start + 2;

        // Append the text before the ![ pattern
        parsed_string.push_str(&remaining_input[0..text_end]);
        remaining_input = &remaining_input[text_end..];

        // Look for the closing bracket of the link text
        if let Some(link_end) = remaining_input.find("](") {
            let link_text = &remaining_input[..link_end];
            let url_start = link_end + 2; // For ](

            let url_start_slice = &remaining_input[url_start..];
            if let Some(url_end) = url_start_slice.find(')') {
                let url = &remaining_input[url_start..url_end + url_start];
                let prefixed_url = if url.contains("://") || url.starts_with('/') {
                    url.to_string()
                } else if prefix.ends_with('/') {
                    format!("{}{}", prefix, url)
                } else {
                    format!("{}/{}", prefix, url)
                };

                parsed_string.push_str(link_text);
                parsed_string.push_str("](");
                parsed_string.push_str(&prefixed_url);
                parsed_string.push(')');

                remaining_input = &url_start_slice[url_end + 1..];
            }
        }
    }

    parsed_string.push_str(remaining_input);

    parsed_string
}
