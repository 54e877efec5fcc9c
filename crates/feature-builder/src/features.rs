//! Feature Vector Assembly

use crate::{FeatureError, RawInput};
use artifact_store::{ArtifactStore, Column, FEATURE_DIMENSION};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Single-row feature vector in the exact training-time column order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    values: Vec<f64>,
}

impl FeatureVector {
    /// Wrap a pre-built row; `values` must already be in training order.
    /// Returns None if the row is not exactly FEATURE_DIMENSION wide.
    pub fn from_values(values: Vec<f64>) -> Option<Self> {
        (values.len() == FEATURE_DIMENSION).then_some(Self { values })
    }

    /// The row in training order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value of one column
    pub fn get(&self, column: Column) -> f64 {
        self.values[column.index()]
    }
}

/// Builds model-ready feature rows from raw channel statistics.
/// Deterministic and pure given the loaded artifacts.
pub struct FeatureBuilder {
    store: Arc<ArtifactStore>,
}

impl FeatureBuilder {
    pub fn new(store: Arc<ArtifactStore>) -> Self {
        Self { store }
    }

    /// Build the model input row for one request: country lookup,
    /// derived ratios, label encoding, assembly in schema order, then
    /// clamping and standardization of every column except channel age.
    pub fn build(&self, raw: &RawInput) -> Result<FeatureVector, FeatureError> {
        let stats = self
            .store
            .countries()
            .get(&raw.country)
            .ok_or_else(|| FeatureError::UnknownCountry(raw.country.clone()))?;
        let country_code = self
            .store
            .encoder()
            .encode(&raw.country)
            .ok_or_else(|| FeatureError::UnseenCategory(raw.country.clone()))? as f64;

        let recent_views_ratio = recent_views_ratio(raw);
        let subscriber_growth_rate = subscriber_growth_rate(raw);

        debug!(
            country = %raw.country,
            country_code,
            recent_views_ratio,
            subscriber_growth_rate,
            "derived features computed"
        );

        let mut values = vec![0.0; FEATURE_DIMENSION];
        for column in Column::ALL {
            values[column.index()] = match column {
                Column::Subscribers => raw.subscribers as f64,
                Column::TotalViews => raw.total_views as f64,
                Column::CountryCode => country_code,
                Column::ChannelAgeYears => f64::from(raw.channel_age_years),
                Column::ViewsLast30Days => raw.views_last_30_days as f64,
                Column::SubscribersLast30Days => raw.subscribers_last_30_days as f64,
                Column::EstimatedTotalUsers => stats.estimated_total_users,
                Column::Population2022 => stats.population_2022,
                Column::RecentViewsRatio => recent_views_ratio,
                Column::SubscriberGrowthRate => subscriber_growth_rate,
            };
        }

        // Clamp outliers to the training-time bounds, then standardize.
        // Channel age carries neither artifact and passes through in raw
        // years.
        for column in Column::ALL {
            let idx = column.index();
            if let Some(bounds) = self.store.winsor_limits().bounds(column) {
                values[idx] = bounds.clamp(values[idx]);
            }
            if let Some(affine) = self.store.feature_scaler().affine(column) {
                values[idx] = affine.standardize(values[idx]);
            }
        }

        Ok(FeatureVector { values })
    }
}

/// Share of lifetime views gathered in the last 30 days. A channel with
/// no views at all gets 0, not a divide-by-zero error.
fn recent_views_ratio(raw: &RawInput) -> f64 {
    if raw.total_views != 0 {
        raw.views_last_30_days as f64 / raw.total_views as f64
    } else {
        0.0
    }
}

/// Average subscribers gained per month of channel life. A brand-new
/// channel (age 0) gets 0 rather than an error or infinity.
fn subscriber_growth_rate(raw: &RawInput) -> f64 {
    if raw.channel_age_years != 0 {
        raw.subscribers_last_30_days as f64 / (f64::from(raw.channel_age_years) * 12.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artifact_store::{
        Affine, ClipBounds, CountryEncoder, CountryReference, CountryStats, LinearModel, Model,
        StandardScaler, TargetScaler, WinsorLimits,
    };

    fn pass_through_store() -> Arc<ArtifactStore> {
        let scaled: Vec<(Column, Affine)> = Column::ALL
            .iter()
            .copied()
            .filter(Column::is_scaled)
            .map(|c| {
                (
                    c,
                    Affine {
                        mean: 0.0,
                        scale: 1.0,
                    },
                )
            })
            .collect();
        let bounds: Vec<(Column, ClipBounds)> = Column::ALL
            .iter()
            .copied()
            .filter(Column::is_scaled)
            .map(|c| {
                (
                    c,
                    ClipBounds {
                        lower: f64::MIN,
                        upper: f64::MAX,
                    },
                )
            })
            .collect();
        let encoder = CountryEncoder::new(vec![
            "Brazil".to_string(),
            "India".to_string(),
            "United States".to_string(),
        ]);
        let countries = CountryReference::from_rows(vec![
            (
                "Brazil".to_string(),
                CountryStats {
                    population_2022: 215_313_498.0,
                    estimated_total_users: 142_000_000.0,
                },
            ),
            (
                "India".to_string(),
                CountryStats {
                    population_2022: 1_417_173_173.0,
                    estimated_total_users: 467_000_000.0,
                },
            ),
            (
                "United States".to_string(),
                CountryStats {
                    population_2022: 333_287_557.0,
                    estimated_total_users: 246_000_000.0,
                },
            ),
        ]);
        let model = Model::linear(LinearModel {
            coefficients: vec![0.0; FEATURE_DIMENSION],
            intercept: 0.0,
        });
        Arc::new(
            ArtifactStore::from_parts(
                StandardScaler::from_entries(&scaled),
                TargetScaler {
                    mean: 0.0,
                    scale: 1.0,
                },
                WinsorLimits::from_entries(&bounds),
                encoder,
                countries,
                model,
            )
            .unwrap(),
        )
    }

    fn brazil_input() -> RawInput {
        RawInput {
            subscribers: 100_000,
            total_views: 10_000_000,
            country: "Brazil".to_string(),
            channel_age_years: 5,
            views_last_30_days: 500_000,
            subscribers_last_30_days: 2_000,
        }
    }

    #[test]
    fn test_brazil_scenario_derived_features() {
        let builder = FeatureBuilder::new(pass_through_store());
        let features = builder.build(&brazil_input()).unwrap();

        assert_eq!(features.values().len(), FEATURE_DIMENSION);
        assert_eq!(features.get(Column::RecentViewsRatio), 0.05);
        assert!((features.get(Column::SubscriberGrowthRate) - 2_000.0 / 60.0).abs() < 1e-9);
        assert_eq!(features.get(Column::CountryCode), 0.0);
        assert_eq!(features.get(Column::Population2022), 215_313_498.0);
        assert_eq!(features.get(Column::EstimatedTotalUsers), 142_000_000.0);
        assert_eq!(features.get(Column::ChannelAgeYears), 5.0);
    }

    #[test]
    fn test_zero_total_views_yields_zero_ratio() {
        let builder = FeatureBuilder::new(pass_through_store());
        let mut input = brazil_input();
        input.total_views = 0;
        input.views_last_30_days = 0;
        let features = builder.build(&input).unwrap();
        assert_eq!(features.get(Column::RecentViewsRatio), 0.0);
    }

    #[test]
    fn test_zero_channel_age_yields_zero_growth_rate() {
        let builder = FeatureBuilder::new(pass_through_store());
        let mut input = brazil_input();
        input.channel_age_years = 0;
        let features = builder.build(&input).unwrap();
        assert_eq!(features.get(Column::SubscriberGrowthRate), 0.0);
    }

    #[test]
    fn test_unknown_country_fails_without_a_vector() {
        let builder = FeatureBuilder::new(pass_through_store());
        let mut input = brazil_input();
        input.country = "Atlantis".to_string();
        let err = builder.build(&input).unwrap_err();
        assert!(matches!(err, FeatureError::UnknownCountry(name) if name == "Atlantis"));
    }

    #[test]
    fn test_every_known_country_builds_a_full_vector() {
        let store = pass_through_store();
        let builder = FeatureBuilder::new(Arc::clone(&store));
        for country in store.countries().sorted_names() {
            let mut input = brazil_input();
            input.country = country;
            let features = builder.build(&input).unwrap();
            assert_eq!(features.values().len(), FEATURE_DIMENSION);
            assert!(features.values().iter().all(|v| v.is_finite()));
        }
    }

    #[test]
    fn test_winsor_clamps_before_scaling() {
        // Subscribers clamped to [1_000, 50_000] then standardized with
        // mean 10_000 / scale 2_000
        let mut scaled: Vec<(Column, Affine)> = Column::ALL
            .iter()
            .copied()
            .filter(Column::is_scaled)
            .map(|c| {
                (
                    c,
                    Affine {
                        mean: 0.0,
                        scale: 1.0,
                    },
                )
            })
            .collect();
        let subs_entry = scaled
            .iter()
            .position(|(c, _)| *c == Column::Subscribers)
            .unwrap();
        scaled[subs_entry] = (
            Column::Subscribers,
            Affine {
                mean: 10_000.0,
                scale: 2_000.0,
            },
        );
        let mut bounds: Vec<(Column, ClipBounds)> = Column::ALL
            .iter()
            .copied()
            .filter(Column::is_scaled)
            .map(|c| {
                (
                    c,
                    ClipBounds {
                        lower: f64::MIN,
                        upper: f64::MAX,
                    },
                )
            })
            .collect();
        let subs_bounds = bounds
            .iter()
            .position(|(c, _)| *c == Column::Subscribers)
            .unwrap();
        bounds[subs_bounds] = (
            Column::Subscribers,
            ClipBounds {
                lower: 1_000.0,
                upper: 50_000.0,
            },
        );
        let encoder = CountryEncoder::new(vec!["Brazil".to_string()]);
        let countries = CountryReference::from_rows(vec![(
            "Brazil".to_string(),
            CountryStats {
                population_2022: 1.0,
                estimated_total_users: 1.0,
            },
        )]);
        let store = Arc::new(
            ArtifactStore::from_parts(
                StandardScaler::from_entries(&scaled),
                TargetScaler {
                    mean: 0.0,
                    scale: 1.0,
                },
                WinsorLimits::from_entries(&bounds),
                encoder,
                countries,
                Model::linear(LinearModel {
                    coefficients: vec![0.0; FEATURE_DIMENSION],
                    intercept: 0.0,
                }),
            )
            .unwrap(),
        );
        let builder = FeatureBuilder::new(store);

        let mut input = brazil_input();
        input.subscribers = 1_000_000; // above the upper bound
        let features = builder.build(&input).unwrap();
        // clamped to 50_000, then (50_000 - 10_000) / 2_000
        assert_eq!(features.get(Column::Subscribers), 20.0);
    }

    #[test]
    fn test_channel_age_is_never_transformed() {
        let builder = FeatureBuilder::new(pass_through_store());
        let mut input = brazil_input();
        input.channel_age_years = 19;
        let features = builder.build(&input).unwrap();
        assert_eq!(features.get(Column::ChannelAgeYears), 19.0);
    }

    #[test]
    fn test_build_is_deterministic() {
        let builder = FeatureBuilder::new(pass_through_store());
        let input = brazil_input();
        assert_eq!(builder.build(&input).unwrap(), builder.build(&input).unwrap());
    }

    #[test]
    fn test_from_values_enforces_dimension() {
        assert!(FeatureVector::from_values(vec![0.0; FEATURE_DIMENSION]).is_some());
        assert!(FeatureVector::from_values(vec![0.0; 3]).is_none());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn zero_denominators_never_error(
                subscribers in 0u64..300_000_000,
                subscribers_last_30_days in 0u64..30_000_000,
            ) {
                let builder = FeatureBuilder::new(pass_through_store());
                let input = RawInput {
                    subscribers,
                    total_views: 0,
                    country: "India".to_string(),
                    channel_age_years: 0,
                    views_last_30_days: 0,
                    subscribers_last_30_days,
                };
                let features = builder.build(&input).unwrap();
                prop_assert_eq!(features.get(Column::RecentViewsRatio), 0.0);
                prop_assert_eq!(features.get(Column::SubscriberGrowthRate), 0.0);
            }

            #[test]
            fn vector_is_always_full_width(
                subscribers in 0u64..300_000_000,
                total_views in 0u64..100_000_000_000,
                channel_age_years in 0u32..20,
                views_last_30_days in 0u64..3_000_000_000,
                subscribers_last_30_days in 0u64..30_000_000,
            ) {
                let builder = FeatureBuilder::new(pass_through_store());
                let input = RawInput {
                    subscribers,
                    total_views,
                    country: "United States".to_string(),
                    channel_age_years,
                    views_last_30_days,
                    subscribers_last_30_days,
                };
                let features = builder.build(&input).unwrap();
                prop_assert_eq!(features.values().len(), FEATURE_DIMENSION);
                prop_assert!(features.values().iter().all(|v| v.is_finite()));
            }
        }
    }
}
