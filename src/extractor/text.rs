//! Text helpers over `scraper` element trees

use scraper::ElementRef;

/// Text nodes under `element`, each trimmed, empties dropped, joined by `sep`
pub(super) fn stripped_text(element: ElementRef<'_>, sep: &str) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

/// Raw concatenated text of `element`, untrimmed
pub(super) fn raw_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Heading level for `h1`..`h6`, `None` for everything else
pub(super) fn heading_level(tag: &str) -> Option<u8> {
    match tag {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

pub(super) fn has_class(element: ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

/// Element siblings following `element`, in document order
pub(super) fn following_elements<'a>(
    element: ElementRef<'a>,
) -> impl Iterator<Item = ElementRef<'a>> {
    element.next_siblings().filter_map(ElementRef::wrap)
}

/// Direct element children of `element`
pub(super) fn child_elements<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    element.children().filter_map(ElementRef::wrap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    #[test]
    fn test_stripped_text_joins_trimmed_pieces() {
        let doc = Html::parse_fragment("<p>  米 <b> 2合 </b>\n<i>  </i>水</p>");
        let sel = Selector::parse("p").unwrap();
        let p = doc.select(&sel).next().unwrap();
        assert_eq!(stripped_text(p, ""), "米2合水");
        assert_eq!(stripped_text(p, " "), "米 2合 水");
    }

    #[test]
    fn test_heading_level() {
        assert_eq!(heading_level("h2"), Some(2));
        assert_eq!(heading_level("h4"), Some(4));
        assert_eq!(heading_level("ul"), None);
    }
}
