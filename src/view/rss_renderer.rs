use std::io::Cursor;

use chrono::{TimeZone, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::post::Post;

/* Example
<?xml version="1.0" encoding="UTF-8" ?>
<rss version="2.0">

<channel>
  <title>kenfdev's Blog (日本語)</title>
  <link>https://blog.example.net</link>
  <description>A personal blog about web development</description>
  <item>
    <title>こんにちは、世界</title>
    <link>https://blog.example.net/ja/posts/hello-world/</link>
    <description>最初の記事です</description>
    <pubDate>Tue, 2 Jan 2024 03:04:05 +0000</pubDate>
  </item>
</channel>

</rss>
*/

pub struct RssChannel<'a> {
    pub ch_title: &'a str,
    pub ch_link: &'a str,
    pub ch_desc: &'a str,
}

impl<'a> RssChannel<'a> {
    pub fn render(&self, posts: &[&Post]) -> quick_xml::Result<Vec<u8>> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));

        // <?xml version="1.0" encoding="UTF-8" ?>
        let decl = Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None));
        writer.write_event(decl)?;

        // <rss version="2.0">
        let mut rss = BytesStart::new("rss");
        rss.push_attribute(("version", "2.0"));
        writer.write_event(Event::Start(rss))?;

        // <channel>
        writer.write_event(Event::Start(BytesStart::new("channel")))?;

        push_text(&mut writer, "title", self.ch_title)?;
        push_text(&mut writer, "link", self.ch_link)?;
        push_text(&mut writer, "description", self.ch_desc)?;

        for post in posts {
            // <item>
            writer.write_event(Event::Start(BytesStart::new("item")))?;

            push_text(&mut writer, "title", post.title.as_str())?;

            // <link>https://blog.example.net/ja/posts/hello-world/</link>
            let link = post_link(self.ch_link, post);
            push_text(&mut writer, "link", link.as_str())?;

            push_text(&mut writer, "description", post.description.as_str())?;

            // <pubDate>Tue, 2 Jan 2024 03:04:05 +0000</pubDate>
            let dt = TimeZone::from_utc_datetime(Utc::now().offset(), &post.date);
            push_text(&mut writer, "pubDate", &dt.to_rfc2822())?;

            // </item>
            writer.write_event(Event::End(BytesEnd::new("item")))?;
        }

        // </channel>
        writer.write_event(Event::End(BytesEnd::new("channel")))?;
        // </rss>
        writer.write_event(Event::End(BytesEnd::new("rss")))?;

        Ok(writer.into_inner().into_inner())
    }
}

fn post_link(base_url: &str, post: &Post) -> String {
    let base_url = base_url.trim_end_matches('/');
    format!("{}/{}/posts/{}/", base_url, post.lang, post.slug)
}

fn push_text(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}
