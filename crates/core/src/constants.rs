/// Record id of the financial configuration singleton.
pub const FINANCIAL_CONFIG_ID: &str = "financial";

/// Default page size for "load more" listings.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Upper bound a caller can request per page.
pub const MAX_PAGE_SIZE: i64 = 100;
