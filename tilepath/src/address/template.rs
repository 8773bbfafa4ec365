//! Path templates and the placeholder-substituting formatter.
//!
//! A template such as `/{Z}/{X}/{Y}.png` is parsed once, when a tile source is
//! built, into literal fragments and placeholders:
//!
//! | Placeholder | Substituted with |
//! |-------------|------------------|
//! | `{X}`       | tile column      |
//! | `{Y}`       | tile row         |
//! | `{Z}`       | zoom level       |
//!
//! Any other brace content, and unbalanced or nested braces, is rejected at
//! parse time so that formatting never has to fail.

use std::fmt;
use std::str::FromStr;

use super::TileAddressFormatter;
use crate::coord::TileCoord;
use crate::source::{TileSourceConfig, TileSourceError};

/// One piece of a parsed path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSegment {
    /// Text emitted verbatim.
    Literal(String),
    /// `{X}`
    Column,
    /// `{Y}`
    Row,
    /// `{Z}`
    Zoom,
}

impl TemplateSegment {
    fn placeholder(name: &str) -> Option<Self> {
        match name {
            "X" => Some(Self::Column),
            "Y" => Some(Self::Row),
            "Z" => Some(Self::Zoom),
            _ => None,
        }
    }
}

/// A validated path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileTemplate {
    raw: String,
    segments: Vec<TemplateSegment>,
}

impl TileTemplate {
    /// Parses a template string.
    ///
    /// # Errors
    ///
    /// Returns [`TileSourceError::InvalidConfiguration`] for an empty
    /// template, an unknown placeholder, or unbalanced braces.
    pub fn parse(template: &str) -> Result<Self, TileSourceError> {
        if template.is_empty() {
            return Err(TileSourceError::invalid("tile path template is empty"));
        }

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = template.char_indices();

        while let Some((pos, c)) = chars.next() {
            match c {
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, inner) in chars.by_ref() {
                        match inner {
                            '}' => {
                                closed = true;
                                break;
                            }
                            '{' => {
                                return Err(TileSourceError::invalid(format!(
                                    "nested '{{' in tile path template '{}' at byte {}",
                                    template, pos
                                )));
                            }
                            other => name.push(other),
                        }
                    }
                    if !closed {
                        return Err(TileSourceError::invalid(format!(
                            "unclosed '{{' in tile path template '{}' at byte {}",
                            template, pos
                        )));
                    }
                    let segment = TemplateSegment::placeholder(&name).ok_or_else(|| {
                        TileSourceError::invalid(format!(
                            "unknown placeholder '{{{}}}' in tile path template '{}' (expected X, Y or Z)",
                            name, template
                        ))
                    })?;
                    if !literal.is_empty() {
                        segments.push(TemplateSegment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(segment);
                }
                '}' => {
                    return Err(TileSourceError::invalid(format!(
                        "unmatched '}}' in tile path template '{}' at byte {}",
                        template, pos
                    )));
                }
                other => literal.push(other),
            }
        }

        if !literal.is_empty() {
            segments.push(TemplateSegment::Literal(literal));
        }

        Ok(Self {
            raw: template.to_string(),
            segments,
        })
    }

    /// The template string as given.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[TemplateSegment] {
        &self.segments
    }

    /// The trailing literal fragment, typically a file extension.
    ///
    /// Empty when the template ends with a placeholder.
    pub fn suffix(&self) -> &str {
        match self.segments.last() {
            Some(TemplateSegment::Literal(text)) => text,
            _ => "",
        }
    }
}

impl FromStr for TileTemplate {
    type Err = TileSourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TileTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Substitutes tile coordinates into the source's path template.
///
/// Coordinates pass through the source's
/// [`AddressProjection`](super::AddressProjection) first, so a source with a
/// different numbering convention reuses this formatter unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TemplateFormatter;

impl TileAddressFormatter for TemplateFormatter {
    fn format(&self, config: &TileSourceConfig, tile: &TileCoord) -> String {
        let projection = config.projection();
        let mut out = String::with_capacity(config.template().as_str().len() + 16);

        for segment in config.template().segments() {
            match segment {
                TemplateSegment::Literal(text) => out.push_str(text),
                TemplateSegment::Column => out.push_str(&projection.column(tile).to_string()),
                TemplateSegment::Row => out.push_str(&projection.row(tile).to_string()),
                TemplateSegment::Zoom => out.push_str(&projection.zoom(tile).to_string()),
            }
        }

        out
    }
}
