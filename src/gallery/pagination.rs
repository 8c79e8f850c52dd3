//! Page arithmetic for the image feed.

/// Default 1-based page number.
pub const DEFAULT_PAGE: i64 = 1;

/// Default page size.
pub const DEFAULT_LIMIT: i64 = 30;

/// A requested page of the feed.
///
/// Values are kept signed and unvalidated: a page below 1 or a negative limit
/// simply selects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number
    pub page: i64,

    /// Page size
    pub limit: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    pub fn new(page: i64, limit: i64) -> Self {
        Self { page, limit }
    }

    /// Build a request from raw query values.
    ///
    /// Each value is read up to its first non-digit, so `"2abc"` is page 2
    /// and `"12.7"` is 12. Missing values and values without leading digits
    /// fall back to the defaults. Page 0 is treated as the first page; a zero
    /// limit is kept and selects nothing.
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        let page = match parse_or(page, DEFAULT_PAGE) {
            0 => DEFAULT_PAGE,
            page => page,
        };

        Self {
            page,
            limit: parse_or(limit, DEFAULT_LIMIT),
        }
    }

    /// Index range selected by this request within a collection of `len` items.
    pub fn bounds(&self, len: usize) -> std::ops::Range<usize> {
        if self.page < 1 || self.limit <= 0 {
            return 0..0;
        }

        let start = (self.page - 1).saturating_mul(self.limit);
        let start = usize::try_from(start).unwrap_or(usize::MAX).min(len);
        let limit = usize::try_from(self.limit).unwrap_or(usize::MAX);
        let end = start.saturating_add(limit).min(len);

        start..end
    }

    /// Copy out the items selected by this request.
    pub fn slice<T: Clone>(&self, items: &[T]) -> Vec<T> {
        items[self.bounds(items.len())].to_vec()
    }
}

fn parse_or(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(leading_integer).unwrap_or(default)
}

/// Parse an optional sign and the digits that follow it, ignoring the rest.
///
/// Returns `None` when no digit follows the sign. Magnitudes beyond `i64`
/// saturate.
fn leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }

    let magnitude = rest[..end].bytes().fold(0i64, |acc, digit| {
        acc.saturating_mul(10)
            .saturating_add(i64::from(digit - b'0'))
    });

    Some(if negative { -magnitude } else { magnitude })
}
