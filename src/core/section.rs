//! Marketing page sections - schema-validated content for the layout tool.
//!
//! A layout is a JSON array of `{ "component": ..., "content": {...} }`
//! entries. Content is checked once, here, against its component's schema;
//! everything downstream works with [`SectionContent`] only.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single feature tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureItem {
    /// Short heading
    pub title: String,
    /// One or two sentences
    pub description: String,
    /// Optional icon name
    #[serde(default)]
    pub icon: Option<String>,
}

/// A customer quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    /// The quote itself
    pub quote: String,
    /// Who said it
    pub author: String,
    /// Their role or company
    #[serde(default)]
    pub role: Option<String>,
}

/// Typed content of one page section, tagged by component name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "component", content = "content", rename_all = "kebab-case")]
pub enum SectionContent {
    /// Page header with an optional call to action
    Hero {
        /// Main heading
        title: String,
        /// Secondary line
        #[serde(default)]
        subtitle: Option<String>,
        /// Button text
        #[serde(default)]
        cta_label: Option<String>,
        /// Button target
        #[serde(default)]
        cta_href: Option<String>,
    },
    /// Grid of feature tiles
    Features {
        /// Optional section heading
        #[serde(default)]
        title: Option<String>,
        /// At least one tile
        items: Vec<FeatureItem>,
    },
    /// Customer quotes
    Testimonials {
        /// At least one quote
        items: Vec<Testimonial>,
    },
    /// Closing banner with a single button
    CallToAction {
        /// Banner heading
        title: String,
        /// Button text
        button_label: String,
        /// Button target
        button_href: String,
    },
}

impl SectionContent {
    /// Component name as stored in layouts.
    #[must_use]
    pub const fn component(&self) -> &'static str {
        match self {
            Self::Hero { .. } => "hero",
            Self::Features { .. } => "features",
            Self::Testimonials { .. } => "testimonials",
            Self::CallToAction { .. } => "call-to-action",
        }
    }

    fn validate(self) -> Result<Self> {
        let problem = match &self {
            Self::Hero {
                title,
                cta_label,
                cta_href,
                ..
            } => {
                if title.trim().is_empty() {
                    Some("hero title cannot be empty")
                } else if cta_label.is_some() != cta_href.is_some() {
                    Some("hero call to action needs both a label and a link")
                } else {
                    None
                }
            }
            Self::Features { items, .. } if items.is_empty() => {
                Some("features section needs at least one item")
            }
            Self::Features { items, .. } if items.iter().any(|i| i.title.trim().is_empty()) => {
                Some("feature title cannot be empty")
            }
            Self::Testimonials { items } if items.is_empty() => {
                Some("testimonials section needs at least one quote")
            }
            Self::CallToAction {
                title,
                button_label,
                button_href,
            } if title.trim().is_empty()
                || button_label.trim().is_empty()
                || button_href.trim().is_empty() =>
            {
                Some("call to action needs a title, a label and a link")
            }
            _ => None,
        };

        match problem {
            Some(message) => Err(Error::InvalidSection {
                message: message.to_string(),
            }),
            None => Ok(self),
        }
    }
}

/// Validates one section given its component name and raw content.
///
/// # Errors
/// Returns [`Error::InvalidSection`] for an unknown component, content that
/// does not match the component's shape, or content that is empty where it
/// must not be.
pub fn parse_section(component: &str, content: &Value) -> Result<SectionContent> {
    let tagged = serde_json::json!({ "component": component, "content": content });
    serde_json::from_value::<SectionContent>(tagged)
        .map_err(|e| Error::InvalidSection {
            message: format!("{component}: {e}"),
        })?
        .validate()
}

/// Validates a whole layout document.
///
/// # Errors
/// Returns [`Error::InvalidSection`] naming the first failing section.
pub fn parse_layout(json: &str) -> Result<Vec<SectionContent>> {
    let raw: Vec<Value> = serde_json::from_str(json).map_err(|e| Error::InvalidSection {
        message: format!("layout is not a JSON array: {e}"),
    })?;

    raw.iter()
        .enumerate()
        .map(|(index, entry)| {
            let component = entry
                .get("component")
                .and_then(Value::as_str)
                .ok_or_else(|| Error::InvalidSection {
                    message: format!("section {index} has no component name"),
                })?;
            let content = entry.get("content").unwrap_or(&Value::Null);
            parse_section(component, content).map_err(|e| Error::InvalidSection {
                message: format!("section {index}: {e}"),
            })
        })
        .collect()
}
