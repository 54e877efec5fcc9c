//! Training-Time Feature Schema

/// Number of features the model was trained on
pub const FEATURE_DIMENSION: usize = 10;

/// Feature columns in training order.
///
/// The discriminant of each variant is its position in the model input
/// row. Every stage that touches a feature row (assembly, clipping,
/// standardization, inference) iterates `Column::ALL`, so the positional
/// contract with the loaded artifacts cannot drift silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Subscribers,
    TotalViews,
    CountryCode,
    ChannelAgeYears,
    ViewsLast30Days,
    SubscribersLast30Days,
    EstimatedTotalUsers,
    Population2022,
    RecentViewsRatio,
    SubscriberGrowthRate,
}

impl Column {
    /// All columns in training order
    pub const ALL: [Column; FEATURE_DIMENSION] = [
        Column::Subscribers,
        Column::TotalViews,
        Column::CountryCode,
        Column::ChannelAgeYears,
        Column::ViewsLast30Days,
        Column::SubscribersLast30Days,
        Column::EstimatedTotalUsers,
        Column::Population2022,
        Column::RecentViewsRatio,
        Column::SubscriberGrowthRate,
    ];

    /// Column name as written in the artifact files
    pub fn name(&self) -> &'static str {
        match self {
            Column::Subscribers => "subscribers",
            Column::TotalViews => "total_views",
            Column::CountryCode => "country_code",
            Column::ChannelAgeYears => "channel_age_years",
            Column::ViewsLast30Days => "views_last_30_days",
            Column::SubscribersLast30Days => "subscribers_last_30_days",
            Column::EstimatedTotalUsers => "estimated_total_users",
            Column::Population2022 => "population_2022",
            Column::RecentViewsRatio => "recent_views_ratio",
            Column::SubscriberGrowthRate => "subscriber_growth_rate",
        }
    }

    /// Resolve an artifact column name back to the schema
    pub fn from_name(name: &str) -> Option<Column> {
        Column::ALL.iter().copied().find(|c| c.name() == name)
    }

    /// Position in the model input row
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Whether the column is winsorized and standardized. Channel age is
    /// fed to the model in raw years.
    pub fn is_scaled(&self) -> bool {
        !matches!(self, Column::ChannelAgeYears)
    }

    /// All column names in training order
    pub fn names() -> Vec<&'static str> {
        Column::ALL.iter().map(|c| c.name()).collect()
    }
}
