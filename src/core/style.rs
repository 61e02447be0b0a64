//! Style property vocabulary and change sets.
//!
//! Style writes go through a closed set of known CSS properties rather than
//! arbitrary property strings. A [`StyleChangeSet`] is the unit applied to an
//! element in one batch by a transition.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while building style change sets from untyped input.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StyleError {
    #[error("Unknown style property '{0}'")]
    UnknownProperty(String),

    #[error("Invalid style change set: {0}")]
    InvalidChangeSet(String),
}

/// A CSS property the toolkit knows how to read and write.
///
/// Serialized as its kebab-case CSS name. Parsing also accepts the camelCase
/// form used by DOM style objects (`backgroundColor`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleProperty {
    Opacity,
    Left,
    Top,
    Right,
    Bottom,
    Width,
    Height,
    MaxWidth,
    MaxHeight,
    Margin,
    Padding,
    Transform,
    Color,
    BackgroundColor,
    BorderColor,
    BorderRadius,
    BoxShadow,
    Filter,
    FontSize,
    LetterSpacing,
    LineHeight,
    Display,
    Visibility,
    ZIndex,
    Transition,
}

impl StyleProperty {
    /// Every known property, in declaration order.
    pub const ALL: [StyleProperty; 25] = [
        Self::Opacity,
        Self::Left,
        Self::Top,
        Self::Right,
        Self::Bottom,
        Self::Width,
        Self::Height,
        Self::MaxWidth,
        Self::MaxHeight,
        Self::Margin,
        Self::Padding,
        Self::Transform,
        Self::Color,
        Self::BackgroundColor,
        Self::BorderColor,
        Self::BorderRadius,
        Self::BoxShadow,
        Self::Filter,
        Self::FontSize,
        Self::LetterSpacing,
        Self::LineHeight,
        Self::Display,
        Self::Visibility,
        Self::ZIndex,
        Self::Transition,
    ];

    /// The kebab-case CSS name, as accepted by `setProperty`.
    pub fn css_name(self) -> &'static str {
        match self {
            Self::Opacity => "opacity",
            Self::Left => "left",
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Width => "width",
            Self::Height => "height",
            Self::MaxWidth => "max-width",
            Self::MaxHeight => "max-height",
            Self::Margin => "margin",
            Self::Padding => "padding",
            Self::Transform => "transform",
            Self::Color => "color",
            Self::BackgroundColor => "background-color",
            Self::BorderColor => "border-color",
            Self::BorderRadius => "border-radius",
            Self::BoxShadow => "box-shadow",
            Self::Filter => "filter",
            Self::FontSize => "font-size",
            Self::LetterSpacing => "letter-spacing",
            Self::LineHeight => "line-height",
            Self::Display => "display",
            Self::Visibility => "visibility",
            Self::ZIndex => "z-index",
            Self::Transition => "transition",
        }
    }

    /// Look up a property by CSS (kebab-case) or DOM (camelCase) name.
    pub fn from_name(name: &str) -> Option<Self> {
        let kebab = camel_to_kebab(name.trim());
        Self::ALL.into_iter().find(|p| p.css_name() == kebab)
    }
}

impl fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_name())
    }
}

impl FromStr for StyleProperty {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| StyleError::UnknownProperty(s.to_string()))
    }
}

fn camel_to_kebab(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Target style values applied to one element as a single batch.
///
/// Iteration order is the property order, which carries no meaning: every
/// changed property animates independently.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleChangeSet {
    changes: BTreeMap<StyleProperty, String>,
}

impl StyleChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a change, consuming and returning the set.
    ///
    /// ```rust
    /// use segue::core::{StyleChangeSet, StyleProperty};
    ///
    /// let changes = StyleChangeSet::new()
    ///     .with(StyleProperty::Opacity, "0.5")
    ///     .with(StyleProperty::Left, "40px");
    /// assert_eq!(changes.len(), 2);
    /// assert_eq!(changes.get(StyleProperty::Left), Some("40px"));
    /// ```
    pub fn with(mut self, property: StyleProperty, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    /// Insert or replace the target value for `property`.
    pub fn set(&mut self, property: StyleProperty, value: impl Into<String>) {
        self.changes.insert(property, value.into());
    }

    pub fn get(&self, property: StyleProperty) -> Option<&str> {
        self.changes.get(&property).map(String::as_str)
    }

    pub fn contains(&self, property: StyleProperty) -> bool {
        self.changes.contains_key(&property)
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StyleProperty, &str)> {
        self.changes.iter().map(|(p, v)| (*p, v.as_str()))
    }

    /// Build a change set from untyped `(name, value)` pairs.
    ///
    /// Fails on the first name outside the known vocabulary.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, StyleError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        pairs
            .into_iter()
            .map(|(name, value)| Ok((name.parse::<StyleProperty>()?, value.to_string())))
            .collect()
    }

    /// Parse a JSON object such as `{"opacity": "0", "backgroundColor": "#fff"}`.
    ///
    /// Numbers are accepted and converted to their string form.
    pub fn from_json(json: &str) -> Result<Self, StyleError> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| StyleError::InvalidChangeSet(e.to_string()))?;
        let serde_json::Value::Object(map) = value else {
            return Err(StyleError::InvalidChangeSet(
                "expected a JSON object".to_string(),
            ));
        };

        let mut changes = Self::new();
        for (name, value) in map {
            let property = name.parse::<StyleProperty>()?;
            let value = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Number(n) => n.to_string(),
                other => {
                    return Err(StyleError::InvalidChangeSet(format!(
                        "value for '{name}' must be a string or number, got {other}"
                    )))
                }
            };
            changes.set(property, value);
        }
        Ok(changes)
    }
}

impl FromIterator<(StyleProperty, String)> for StyleChangeSet {
    fn from_iter<T: IntoIterator<Item = (StyleProperty, String)>>(iter: T) -> Self {
        Self {
            changes: iter.into_iter().collect(),
        }
    }
}
