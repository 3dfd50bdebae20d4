//! Links and images.
//!
//! An image is a link with the embed marker set; it always renders in
//! the `![label](target)` form.

use std::collections::HashMap;
use std::ops::Add;

use markdown_loom_syntax::{SpecPart, parse_spec};

use crate::template::{self, FormatError};
use crate::textutil::escape;
use crate::urlnorm;
use crate::value::Value;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Link {
    pub label: Value,
    pub url: String,
    pub title: String,
    pub embed: bool,
}

impl Link {
    pub fn new(label: Value, url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            label,
            url: url.into(),
            title: title.into(),
            embed: false,
        }
    }

    /// A bare link: the single argument is the target, the label stays
    /// empty so the autolink form is used.
    pub fn bare(url: impl Into<String>) -> Self {
        Self::new(Value::default(), url, "")
    }

    pub fn image(label: Value, url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            embed: true,
            ..Self::new(label, url, title)
        }
    }

    pub fn render(&self) -> String {
        let target = urlnorm::normalize(&self.url);
        let label = self.label.to_text();

        let title_part = if self.title.is_empty() {
            String::new()
        } else {
            format!(" \"{}\"", escape(&self.title, "()\""))
        };

        if self.embed {
            return format!("![{label}]({target}{title_part})");
        }

        if !label.is_empty() {
            format!("[{label}]({target}{title_part})")
        } else if !self.title.is_empty() {
            // No label: the raw target doubles as the visible text.
            format!("[{}]({target}{title_part})", self.url)
        } else {
            format!("<{target}>")
        }
    }

    /// Link directive interpretation. Bare parts fill the first empty
    /// slot in label → title → target order; `label=`/`title=`/`link=`
    /// pairs assign directly. Part values are themselves templates with
    /// `link` and `title` bound, so `title=copy of {link}` works.
    pub fn format_with_spec(&self, spec: &str) -> Result<String, FormatError> {
        let mut link = self.clone();

        for part in parse_spec(spec) {
            let bindings: HashMap<String, Value> = [
                ("link".to_string(), Value::Str(link.url.clone())),
                ("title".to_string(), Value::Str(link.title.clone())),
            ]
            .into();

            match part {
                SpecPart::Name(text) => {
                    if link.label.to_text().is_empty() {
                        link.label = Value::Str(link.url.clone());
                        link.url = template::format(&text, &bindings)?;
                    } else if link.title.is_empty() {
                        link.title = template::format(&text, &bindings)?;
                    } else {
                        link.url = template::format(&text, &bindings)?;
                    }
                }
                SpecPart::Pair(key, value) => match key.as_str() {
                    "link" => {
                        if link.label.to_text().is_empty() {
                            link.label = Value::Str(link.url.clone());
                        }
                        link.url = template::format(&value.to_text(), &bindings)?;
                    }
                    "label" => {
                        link.label = Value::Str(template::format(&value.to_text(), &bindings)?);
                    }
                    "title" => {
                        link.title = template::format(&value.to_text(), &bindings)?;
                    }
                    _ => {}
                },
            }
        }

        Ok(link.render())
    }
}

impl Add<&str> for Link {
    type Output = Link;

    /// Concatenates the label, keeping the target.
    fn add(self, rhs: &str) -> Link {
        Link {
            label: Value::Str(format!("{}{rhs}", self.label.to_text())),
            ..self
        }
    }
}

impl Add<Link> for Link {
    type Output = Link;

    fn add(self, rhs: Link) -> Link {
        let rhs_label = rhs.label.to_text();
        self + rhs_label.as_str()
    }
}
