pub mod categories;
pub mod hosts;
pub mod neighbourhoods;
pub mod normalize;
pub mod reviewed;
pub mod reviewers;
pub mod waterways;

pub use categories::{category_summaries, property_category, CategorySummary, PropertyCategory};
pub use hosts::{host_type_counts, host_types, host_types_by_neighbourhood, HostType, HostTypeCounts};
pub use neighbourhoods::{
    coverage_gaps, summarize_groups, summarize_neighbourhoods, GroupSummary, NeighbourhoodSummary,
    NeighbourhoodTable,
};
pub use normalize::{normalize_listing, normalize_listings, normalize_review, normalize_reviews, parse_price};
pub use reviewed::{in_neighbourhood, reviewed_listings};
pub use waterways::largest_waterways;
