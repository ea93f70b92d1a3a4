use scraper::{Html, Selector};

/// Plain-text view of one corpus document plus the two metadata fields the
/// result list needs.
#[derive(Debug, Clone)]
pub struct ExtractedDoc {
    pub text: String,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Extract visible text, title, and meta description from raw HTML.
///
/// Best-effort: malformed markup is repaired by the parser rather than
/// rejected, so this never fails.
pub fn extract(html: &str) -> ExtractedDoc {
    let doc = Html::parse_document(html);
    let title_sel = Selector::parse("title").expect("valid selector");
    let desc_sel = Selector::parse(r#"meta[name="description"]"#).expect("valid selector");

    let text = doc.root_element().text().collect::<Vec<_>>().join(" ");
    let title = doc
        .select(&title_sel)
        .next()
        .map(|node| node.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty());
    let description = doc
        .select(&desc_sel)
        .next()
        .and_then(|node| node.value().attr("content"))
        .map(|content| content.trim().to_string())
        .filter(|d| !d.is_empty());

    ExtractedDoc {
        text,
        title,
        description,
    }
}
