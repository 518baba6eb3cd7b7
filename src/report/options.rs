/// Default number of rows per page in HTML reports.
pub const DEFAULT_PAGINATION_LIMIT: usize = 100;

/// Per-format rendering switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintOptions {
    pub no_headers: bool,
    pub show_footers: bool,
    pub decode_uri: bool,
    pub pagination_limit: usize,
}

impl PrintOptions {
    #[must_use]
    pub const fn new(
        no_headers: bool,
        show_footers: bool,
        decode_uri: bool,
        pagination_limit: usize,
    ) -> Self {
        Self {
            no_headers,
            show_footers,
            decode_uri,
            pagination_limit,
        }
    }
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self::new(false, false, false, DEFAULT_PAGINATION_LIMIT)
    }
}
