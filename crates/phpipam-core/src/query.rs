//! Builder for HTTP query parameters.
//!
//! phpIPAM encodes boolean filters as `1`/`0`; [`QueryParams::push_flag`]
//! takes care of that so client code can pass plain `bool`s.

/// Builder for assembling query parameter pairs.
#[derive(Debug, Default, Clone)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    /// Create a new, empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Append a boolean flag encoded as `1` or `0`.
    pub fn push_flag(&mut self, key: &'static str, value: bool) {
        self.pairs.push((key, if value { "1" } else { "0" }.to_string()));
    }

    /// Return the collected key/value pairs.
    #[must_use]
    pub fn into_pairs(self) -> Vec<(&'static str, String)> {
        self.pairs
    }
}
