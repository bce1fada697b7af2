use std::collections::HashMap;

/// Sequential invoice numbers of the form `{prefix}-{year}-{seq:03}`.
///
/// The sequence restarts at 1 every calendar year.
#[derive(Debug, Clone)]
pub struct InvoiceNumbering {
    prefix: String,
    last_issued: HashMap<i32, u32>,
}

impl InvoiceNumbering {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            last_issued: HashMap::new(),
        }
    }

    /// The number `next` would return, without consuming it.
    pub fn peek(&self, year: i32) -> String {
        let seq = self.last_issued.get(&year).copied().unwrap_or(0) + 1;
        self.format(year, seq)
    }

    pub fn next(&mut self, year: i32) -> String {
        let seq = self.last_issued.entry(year).or_insert(0);
        *seq += 1;
        let seq = *seq;
        self.format(year, seq)
    }

    fn format(&self, year: i32, seq: u32) -> String {
        format!("{}-{}-{:03}", self.prefix, year, seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_per_year() {
        let mut numbering = InvoiceNumbering::new("DN");
        assert_eq!(numbering.peek(2026), "DN-2026-001");
        assert_eq!(numbering.next(2026), "DN-2026-001");
        assert_eq!(numbering.next(2026), "DN-2026-002");
        assert_eq!(numbering.next(2027), "DN-2027-001");
        assert_eq!(numbering.peek(2026), "DN-2026-003");
    }

    #[test]
    fn test_wide_sequence_not_truncated() {
        let mut numbering = InvoiceNumbering::new("SC");
        for _ in 0..1000 {
            numbering.next(2026);
        }
        assert_eq!(numbering.next(2026), "SC-2026-1001");
    }
}
