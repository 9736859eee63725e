//! Parsing and rendering of `{field}` placeholders.
//!
//! `{{` and `}}` produce literal braces. Every placeholder is checked against
//! the template's allowed fields when the template is parsed.

use super::error::{TemplateError, TemplateResult};
use super::names::{Field, TemplateName};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Field(Field),
}

/// A parsed template.
#[derive(Debug, Clone)]
pub struct Template {
    name: TemplateName,
    segments: Vec<Segment>,
}

/// Values to substitute when rendering.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    values: HashMap<Field, String>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.values.insert(field, value.into());
        self
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }
}

impl Template {
    pub fn parse(name: TemplateName, source: &str, allowed: &[Field]) -> TemplateResult<Self> {
        let mut segments = Vec::new();
        let mut text = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((offset, c)) = chars.next() {
            match c {
                '{' if matches!(chars.peek(), Some((_, '{'))) => {
                    chars.next();
                    text.push('{');
                }
                '}' if matches!(chars.peek(), Some((_, '}'))) => {
                    chars.next();
                    text.push('}');
                }
                '}' => return Err(TemplateError::UnbalancedBrace { name, offset }),
                '{' => {
                    let mut placeholder = String::new();
                    loop {
                        match chars.next() {
                            Some((_, '}')) => break,
                            Some((_, '{')) | None => {
                                return Err(TemplateError::UnbalancedBrace { name, offset })
                            }
                            Some((_, ch)) => placeholder.push(ch),
                        }
                    }
                    let field: Field = placeholder.parse().map_err(|_| {
                        TemplateError::UnknownField {
                            name,
                            placeholder: placeholder.clone(),
                        }
                    })?;
                    if !allowed.contains(&field) {
                        return Err(TemplateError::DisallowedField { name, field });
                    }
                    if !text.is_empty() {
                        segments.push(Segment::Text(std::mem::take(&mut text)));
                    }
                    segments.push(Segment::Field(field));
                }
                _ => text.push(c),
            }
        }
        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }

        Ok(Self { name, segments })
    }

    pub fn name(&self) -> TemplateName {
        self.name
    }

    /// Fields referenced by this template, in order of appearance.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Field(field) => Some(*field),
            Segment::Text(_) => None,
        })
    }

    pub fn render(&self, bindings: &Bindings) -> TemplateResult<String> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Field(field) => {
                    let value = bindings.get(*field).ok_or(TemplateError::Unbound {
                        name: self.name,
                        field: *field,
                    })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }

    /// Text of a template that takes no placeholders.
    pub fn text(&self) -> TemplateResult<String> {
        self.render(&Bindings::new())
    }
}
