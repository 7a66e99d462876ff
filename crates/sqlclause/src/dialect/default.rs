use crate::dialect::{Dialect, quote_ident};

/// Generic dialect: `?` placeholders, `"` quoting, ANSI rules.
#[derive(Debug, Clone, Default)]
pub struct DefaultDialect {
    escaping: bool,
}

impl DefaultDialect {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable identifier quoting.
    pub fn with_escaping(mut self, escaping: bool) -> Self {
        self.escaping = escaping;
        self
    }

    pub fn escaping(&self) -> bool {
        self.escaping
    }
}

impl Dialect for DefaultDialect {
    fn name(&self) -> &'static str {
        "default"
    }

    fn escape(&self, ident: &str) -> String {
        if self.escaping {
            quote_ident(ident, '"')
        } else {
            ident.to_string()
        }
    }

    fn placeholder(&mut self) -> String {
        "?".to_string()
    }
}
