//! CanonicalTemplate entity - the source document every artifact derives from
//!
//! A canonical template is an HTML (or any text) document authored for one
//! concrete module. It may mark named regions so substitution rules can be
//! confined to part of the document:
//!
//! ```text
//! <!-- scaffold:region hero -->
//! <p class="lead">Servicio primary de atención</p>
//! <!-- scaffold:endregion -->
//! ```
//!
//! Markers are stripped from rendered output. When a marker is the only
//! thing on its line the whole line goes with it. Regions do not nest.

use thiserror::Error;

const MARKER_OPEN: &str = "<!-- scaffold:";
const MARKER_CLOSE: &str = "-->";

/// Problems found while parsing region markers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("line {line}: region '{inner}' opened inside region '{outer}' (regions cannot nest)")]
    NestedRegion {
        outer: String,
        inner: String,
        line: usize,
    },

    #[error("region '{name}' opened on line {line} is never closed")]
    UnclosedRegion { name: String, line: usize },

    #[error("line {line}: endregion without an open region")]
    UnexpectedEndRegion { line: usize },

    #[error("line {line}: endregion '{found}' closes region '{open}'")]
    MismatchedEndRegion {
        open: String,
        found: String,
        line: usize,
    },

    #[error("line {line}: malformed scaffold marker '{marker}'")]
    MalformedMarker { marker: String, line: usize },

    #[error("line {line}: region '{name}' is declared twice")]
    DuplicateRegion { name: String, line: usize },
}

/// A run of template text, optionally inside a named region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSegment {
    pub text: String,
    pub region: Option<String>,
}

/// Parsed canonical template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalTemplate {
    source: String,
    segments: Vec<TemplateSegment>,
    regions: Vec<String>,
}

enum Marker {
    Open(String),
    Close(Option<String>),
}

impl CanonicalTemplate {
    /// Parse template text, resolving region markers
    pub fn parse(source: impl Into<String>) -> Result<Self, TemplateError> {
        let source = source.into();
        let mut segments = Vec::new();
        let mut regions: Vec<String> = Vec::new();
        let mut open: Option<(String, usize)> = None;
        let mut cursor = 0;
        let mut search_from = 0;

        while let Some(rel) = source[search_from..].find(MARKER_OPEN) {
            let start = search_from + rel;
            let line = line_of(&source, start);
            let body_start = start + MARKER_OPEN.len();
            let Some(close_rel) = source[body_start..].find(MARKER_CLOSE) else {
                return Err(TemplateError::MalformedMarker {
                    marker: source[start..].lines().next().unwrap_or_default().to_string(),
                    line,
                });
            };
            let end = body_start + close_rel + MARKER_CLOSE.len();
            let marker = parse_marker(&source[body_start..body_start + close_rel]).ok_or_else(
                || TemplateError::MalformedMarker {
                    marker: source[start..end].to_string(),
                    line,
                },
            )?;

            let (cut_start, cut_end) = removal_span(&source, start, end);
            push_segment(
                &mut segments,
                &source[cursor..cut_start],
                open.as_ref().map(|(name, _)| name.clone()),
            );
            cursor = cut_end;
            search_from = cut_end;

            match marker {
                Marker::Open(name) => {
                    if let Some((outer, _)) = &open {
                        return Err(TemplateError::NestedRegion {
                            outer: outer.clone(),
                            inner: name,
                            line,
                        });
                    }
                    if regions.contains(&name) {
                        return Err(TemplateError::DuplicateRegion { name, line });
                    }
                    regions.push(name.clone());
                    open = Some((name, line));
                }
                Marker::Close(found) => {
                    let Some((name, _)) = open.take() else {
                        return Err(TemplateError::UnexpectedEndRegion { line });
                    };
                    if let Some(found) = found {
                        if found != name {
                            return Err(TemplateError::MismatchedEndRegion {
                                open: name,
                                found,
                                line,
                            });
                        }
                    }
                }
            }
        }

        if let Some((name, line)) = open {
            return Err(TemplateError::UnclosedRegion { name, line });
        }
        push_segment(&mut segments, &source[cursor..], None);

        Ok(Self {
            source,
            segments,
            regions,
        })
    }

    /// Original text, markers included
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Text runs with markers removed, in document order
    pub fn segments(&self) -> &[TemplateSegment] {
        &self.segments
    }

    /// Declared region names, in document order
    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    pub fn has_region(&self, name: &str) -> bool {
        self.regions.iter().any(|r| r == name)
    }

    /// Document text with markers removed and no substitution applied
    pub fn body(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

fn parse_marker(body: &str) -> Option<Marker> {
    let mut words = body.split_whitespace();
    let marker = match words.next()? {
        "region" => Marker::Open(words.next()?.to_string()),
        "endregion" => Marker::Close(words.next().map(str::to_string)),
        _ => return None,
    };
    if words.next().is_some() {
        return None;
    }
    Some(marker)
}

/// Extend a marker's span to its whole line when nothing else shares it
fn removal_span(source: &str, start: usize, end: usize) -> (usize, usize) {
    let line_start = source[..start].rfind('\n').map(|i| i + 1).unwrap_or(0);
    if !source[line_start..start].trim().is_empty() {
        return (start, end);
    }
    let rest = &source[end..];
    let trailing_ws = rest.len() - rest.trim_start_matches([' ', '\t']).len();
    let after_ws = &rest[trailing_ws..];
    if after_ws.starts_with("\r\n") {
        (line_start, end + trailing_ws + 2)
    } else if after_ws.starts_with('\n') {
        (line_start, end + trailing_ws + 1)
    } else if after_ws.is_empty() {
        (line_start, source.len())
    } else {
        (start, end)
    }
}

fn push_segment(segments: &mut Vec<TemplateSegment>, text: &str, region: Option<String>) {
    if text.is_empty() {
        return;
    }
    segments.push(TemplateSegment {
        text: text.to_string(),
        region,
    });
}

fn line_of(source: &str, offset: usize) -> usize {
    source[..offset].bytes().filter(|b| *b == b'\n').count() + 1
}
