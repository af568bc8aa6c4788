#[cfg(test)]
pub const POST_DATA_JA: &str = r#"+++
title = "こんにちは、世界"
date = "2024-01-02T03:04:05Z"
description = "最初の記事です"
tags = ["life", "blog"]
lang = "ja"
+++

本文はここから始まります。

![図](diagram.png)

続きの段落。
"#;

#[cfg(test)]
pub const POST_DATA_EN: &str = r#"+++
title = "Hello, world"
date = "2024-01-03"
description = "The first post"
lang = "en"
cover = "cover.png"
cover_alt = "A sunrise"
+++

The body starts here.

More text after a blank line.
"#;
