//! Locator-to-selector compilation.
//!
//! WebDriver only understands CSS and XPath, so the higher-level
//! strategies (role+name, label, placeholder, text) are compiled here.
//! The mapping targets what the recruitment app's markup actually
//! exposes: native controls, `aria-label`, and `<label for>` wiring.

use hirecheck_core::Strategy;

/// An owned selector ready to hand to fantoccini.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Compiled {
    Css(String),
    XPath(String),
}

impl Compiled {
    pub fn as_fantoccini(&self) -> fantoccini::Locator<'_> {
        match self {
            Compiled::Css(s) => fantoccini::Locator::Css(s),
            Compiled::XPath(s) => fantoccini::Locator::XPath(s),
        }
    }
}

pub fn compile(strategy: &Strategy) -> Compiled {
    match strategy {
        Strategy::Css { selector } => Compiled::Css(selector.clone()),
        Strategy::Placeholder { text } => {
            Compiled::Css(format!("[placeholder={}]", css_string(text)))
        }
        Strategy::Role { role, name } => Compiled::XPath(role_xpath(role, name)),
        Strategy::Label { text } => Compiled::XPath(label_xpath(text)),
        Strategy::Text { text } => Compiled::XPath(text_xpath(text)),
    }
}

fn role_xpath(role: &str, name: &str) -> String {
    let s = xpath_string(name);
    match role {
        "button" => format!(
            "//button[normalize-space(.)={s} or @aria-label={s}] \
             | //input[(@type='submit' or @type='button') and @value={s}] \
             | //*[@role='button'][normalize-space(.)={s} or @aria-label={s}]",
        ),
        "link" => format!(
            "//a[normalize-space(.)={s} or @aria-label={s}] \
             | //*[@role='link'][normalize-space(.)={s}]",
        ),
        "heading" => format!(
            "//*[self::h1 or self::h2 or self::h3 or self::h4 or self::h5 or self::h6]\
             [normalize-space(.)={s}] \
             | //*[@role='heading'][normalize-space(.)={s}]",
        ),
        other => {
            let r = xpath_string(other);
            format!("//*[@role={r}][normalize-space(.)={s} or @aria-label={s}]")
        }
    }
}

/// Controls reached through their `<label>`: either `for`/`id` wiring or
/// a control nested inside the label element.
fn label_xpath(text: &str) -> String {
    let s = xpath_string(text);
    format!(
        "//*[@id=//label[normalize-space(.)={s}]/@for] \
         | //label[normalize-space(.)={s}]//input \
         | //label[normalize-space(.)={s}]//textarea \
         | //label[normalize-space(.)={s}]//select",
    )
}

/// Deepest element whose rendered text contains the fragment. Without
/// the depth restriction every ancestor up to `<body>` would match too.
fn text_xpath(text: &str) -> String {
    let s = xpath_string(text);
    format!(
        "//*[contains(normalize-space(.), {s})]\
         [not(.//*[contains(normalize-space(.), {s})])]",
    )
}

/// Quote a string for use inside an XPath expression. XPath 1.0 has no
/// escaping, so strings holding both quote kinds fall back to concat().
fn xpath_string(value: &str) -> String {
    if !value.contains('\'') {
        format!("'{}'", value)
    } else if !value.contains('"') {
        format!("\"{}\"", value)
    } else {
        let parts: Vec<String> = value
            .split('\'')
            .map(|part| format!("'{}'", part))
            .collect();
        format!("concat({})", parts.join(", \"'\", "))
    }
}

/// Quote a string for a CSS attribute selector.
fn css_string(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
