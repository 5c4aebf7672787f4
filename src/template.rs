//! The fixed prompt sent alongside the article HTML.

/// Final user line, asking for the reply.
pub const REQUEST_LINE: &str = "Provide news summary, image URL, and source";

/// Wrap the page HTML in a fenced block.
pub fn fenced_html(html: &str) -> String {
    format!("```\n{html}\n```")
}

/// Build the instruction for a page from `source`.
///
/// The reply format block is what [`crate::models::ParsedReply::parse`] reads
/// back, so the prefixes here must stay in sync with the ones defined there.
pub fn news_prompt(source: &str) -> String {
    format!(
        "Please summarize the news content above into a maximum of 200 characters and find a usable image URL \
from the HTML elements. The news source is {source}. Summarize briefly, concisely, and make it eye-catching \
or clickbait like creating a news headline\n\
Avoid using Emojis and use Content Language as Language example Indonesia\n\
Format the response as:\n\
```\n\
Summary: {{Summary}}\n\
URL Image: {{Image URL from HTML Element}}\n\
Source: {source}\n\
Caption: {{Caption for social media post}}\n\
```"
    )
}
