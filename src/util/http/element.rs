use scraper::{ElementRef, Html, Selector};

use crate::error::FetchError;

/// Extracts the text value of an element, with surrounding whitespace trimmed.
pub fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// A structure that represents the information needed to extract text from a particular HTML element.
#[derive(Debug, Clone, Copy)]
pub struct GetOneElementText<'a> {
    /// Stock symbol, only used for error reporting.
    pub stock_symbol: &'a str,
    /// The URL the document was fetched from.
    pub url: &'a str,
    /// The CSS selector string that is used to identify and locate the desired HTML element.
    pub selector: &'a str,
    pub document: &'a Html,
}

/// Returns the text of the first element matching `target.selector`.
///
/// # Errors
///
/// * [`FetchError::InvalidSelector`] when the selector cannot be parsed.
/// * [`FetchError::ElementNotFound`] when nothing in the document matches.
pub fn get_one_element(target: GetOneElementText<'_>) -> Result<String, FetchError> {
    let selector = Selector::parse(target.selector).map_err(|why| FetchError::InvalidSelector {
        selector: target.selector.to_string(),
        reason: format!("{:?}", why),
    })?;

    target
        .document
        .select(&selector)
        .next()
        .map(|element| element_text(&element))
        .ok_or_else(|| FetchError::ElementNotFound {
            selector: target.selector.to_string(),
            url: format!("{} ({})", target.url, target.stock_symbol),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HTML: &str = r#"
<html><body>
  <div class="quote">
    <span data-field="name">Acme Corp</span>
    <span data-field="price">
      1,024.50
    </span>
  </div>
</body></html>"#;

    fn target<'a>(document: &'a Html, selector: &'a str) -> GetOneElementText<'a> {
        GetOneElementText {
            stock_symbol: "ACME",
            url: "http://localhost/quote/ACME",
            selector,
            document,
        }
    }

    #[test]
    fn test_get_one_element() {
        let document = Html::parse_document(HTML);
        let text = get_one_element(target(&document, r#"span[data-field="price"]"#)).unwrap();
        assert_eq!(text, "1,024.50");
    }

    #[test]
    fn test_get_one_element_not_found() {
        let document = Html::parse_document(HTML);
        let result = get_one_element(target(&document, r#"span[data-field="volume"]"#));
        match result {
            Err(FetchError::ElementNotFound { selector, url }) => {
                assert_eq!(selector, r#"span[data-field="volume"]"#);
                assert!(url.contains("ACME"));
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_get_one_element_invalid_selector() {
        let document = Html::parse_document(HTML);
        let result = get_one_element(target(&document, "span[[["));
        assert!(matches!(result, Err(FetchError::InvalidSelector { .. })));
    }
}
