//! Derived dashboard metrics.
//!
//! DESIGN
//! ======
//! Every function here is a pure reduction over a slice of records. Nothing
//! is cached; callers recompute on each request since the datasets are small
//! and static.

pub mod aggregate;
pub mod district;
pub mod ranking;
pub mod view;

pub use aggregate::{Summary, summarize};
pub use district::{DistrictBucket, group_by_district, rank_districts};
pub use ranking::{PeriodComparison, compare_periods, top_performer, worst_performer};
pub use view::{DashboardView, dashboard_view};
