//! Palette value object - the finite set of accepted color tokens

use serde::{Deserialize, Serialize};

/// Bootstrap theme colors, the default palette
pub const BOOTSTRAP_PALETTE: [&str; 8] = [
    "primary",
    "secondary",
    "success",
    "danger",
    "warning",
    "info",
    "light",
    "dark",
];

/// Enumerated color tokens a module descriptor may use
///
/// Tokens are opaque to the generator; they only need to be members of the
/// palette. Order is preserved for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette(Vec<String>);

impl Palette {
    /// Build a palette from explicit tokens (duplicates collapse)
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for token in tokens {
            let token = token.into();
            if !out.contains(&token) {
                out.push(token);
            }
        }
        Self(out)
    }

    /// The Bootstrap theme palette
    pub fn bootstrap() -> Self {
        Self::new(BOOTSTRAP_PALETTE)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.iter().any(|t| t == token)
    }

    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::bootstrap()
    }
}
