const PER_PAGE: u32 = 50;

/// Popularity ordering applied to repository search results.
///
/// Mirrors the star-order toggle button: each variant carries its button
/// label and accent color alongside the query parameters it contributes to a
/// search request. Exactly one variant is active per search session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StarOrder {
    #[default]
    Default,
    Descending,
    Ascending,
}

/// RGB accent color attached to an ordering, consumed by the presentation
/// layer when restyling the toggle button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccentColor {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

const LIGHT_GRAY: AccentColor = AccentColor {
    red: 0.6666667,
    green: 0.6666667,
    blue: 0.6666667,
};

const DARK_PURPLE: AccentColor = AccentColor {
    red: 0.1634489,
    green: 0.13128185,
    blue: 0.28821814,
};

impl StarOrder {
    /// Button label shown for this ordering.
    pub const fn label(&self) -> &'static str {
        match self {
            StarOrder::Default => "☆ Star数 ",
            StarOrder::Descending => "☆ Star数 ⍋",
            StarOrder::Ascending => "☆ Star数 ⍒",
        }
    }

    /// Accent color shown for this ordering.
    pub const fn accent(&self) -> AccentColor {
        match self {
            StarOrder::Default => LIGHT_GRAY,
            StarOrder::Descending | StarOrder::Ascending => DARK_PURPLE,
        }
    }

    /// Next ordering in the toggle cycle:
    /// Default → Descending → Ascending → Default.
    pub const fn next(&self) -> StarOrder {
        match self {
            StarOrder::Default => StarOrder::Descending,
            StarOrder::Descending => StarOrder::Ascending,
            StarOrder::Ascending => StarOrder::Default,
        }
    }

    /// Query parameters this ordering contributes for `keyword`.
    ///
    /// Pure: an empty keyword still yields a list with an empty `q` value;
    /// rejecting empty keywords is the caller's responsibility.
    pub fn query_parameters(&self, keyword: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![("q", keyword.to_string())];
        match self {
            StarOrder::Default => {}
            StarOrder::Descending => {
                params.push(("sort", "stars".to_string()));
                params.push(("order", "desc".to_string()));
            }
            StarOrder::Ascending => {
                params.push(("sort", "stars".to_string()));
                params.push(("order", "asc".to_string()));
            }
        }
        params.push(("per_page", PER_PAGE.to_string()));
        params
    }
}
