use serde::{Deserialize, Serialize};
use std::fmt;

/// How a step addresses its target element on the page.
///
/// Strategies mirror what the target application actually exposes:
/// accessible role + name, label text, placeholder text, rendered text,
/// or a raw CSS selector as the escape hatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", rename_all = "snake_case")]
pub enum Strategy {
    /// Accessible role plus accessible name, e.g. button "Entrar".
    Role { role: String, name: String },
    /// Text of an associated `<label>` element.
    Label { text: String },
    /// `placeholder` attribute of an input or textarea.
    Placeholder { text: String },
    /// Literal rendered text content.
    Text { text: String },
    /// Raw CSS selector.
    Css { selector: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locator {
    #[serde(flatten)]
    pub strategy: Strategy,
    /// Take the first match instead of requiring a unique one.
    #[serde(default)]
    pub first: bool,
}

impl Locator {
    pub fn role(role: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            strategy: Strategy::Role {
                role: role.into(),
                name: name.into(),
            },
            first: false,
        }
    }

    pub fn label(text: impl Into<String>) -> Self {
        Self {
            strategy: Strategy::Label { text: text.into() },
            first: false,
        }
    }

    pub fn placeholder(text: impl Into<String>) -> Self {
        Self {
            strategy: Strategy::Placeholder { text: text.into() },
            first: false,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            strategy: Strategy::Text { text: text.into() },
            first: false,
        }
    }

    pub fn css(selector: impl Into<String>) -> Self {
        Self {
            strategy: Strategy::Css {
                selector: selector.into(),
            },
            first: false,
        }
    }

    /// Opt into first-match resolution. Without this, resolving to more
    /// than one element is a failure.
    pub fn first(mut self) -> Self {
        self.first = true;
        self
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.strategy {
            Strategy::Role { role, name } => write!(f, "{} \"{}\"", role, name)?,
            Strategy::Label { text } => write!(f, "label \"{}\"", text)?,
            Strategy::Placeholder { text } => write!(f, "placeholder \"{}\"", text)?,
            Strategy::Text { text } => write!(f, "text \"{}\"", text)?,
            Strategy::Css { selector } => write!(f, "css \"{}\"", selector)?,
        }
        if self.first {
            write!(f, " (first)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_includes_strategy_and_value() {
        assert_eq!(
            Locator::role("button", "Enviar Inscrição").to_string(),
            "button \"Enviar Inscrição\""
        );
        assert_eq!(Locator::label("Senha").to_string(), "label \"Senha\"");
        assert_eq!(
            Locator::css(".job-card").first().to_string(),
            "css \".job-card\" (first)"
        );
    }

    #[test]
    fn yaml_roundtrip() {
        let loc = Locator::placeholder("seuemail@exemplo.com");
        let yaml = serde_yaml::to_string(&loc).unwrap();
        let back: Locator = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(loc, back);
    }

    #[test]
    fn first_defaults_to_false_in_yaml() {
        let loc: Locator = serde_yaml::from_str("by: text\ntext: Vagas\n").unwrap();
        assert!(!loc.first);
        assert_eq!(loc, Locator::text("Vagas"));
    }
}
