use std::fmt;

/// Grouping dimension for impression breakdowns.
///
/// The set of dimensions is closed: each variant maps to exactly one
/// reporting endpoint and one engine column, so an unsupported breakdown is
/// unrepresentable rather than rejected at query time. Adding a new
/// breakdown to the API starts with a new variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Breakdown by broadcast channel (groups on the `channel_id` column)
    Channel,
    /// Breakdown by viewer region (groups on the `region_code` column)
    Region,
}

impl Dimension {
    /// All supported dimensions, in reporting order.
    pub const ALL: [Dimension; 2] = [Dimension::Channel, Dimension::Region];

    /// Returns the engine column this dimension groups by.
    pub fn column(&self) -> &'static str {
        match self {
            Dimension::Channel => "channel_id",
            Dimension::Region => "region_code",
        }
    }

    /// Returns the Korean entity label used in response messages.
    ///
    /// For example, a channel breakdown of 3 rows is summarized as
    /// "3 개 채널의 노출량을 조회했습니다.".
    pub fn entity_label(&self) -> &'static str {
        match self {
            Dimension::Channel => "채널",
            Dimension::Region => "지역",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column())
    }
}
