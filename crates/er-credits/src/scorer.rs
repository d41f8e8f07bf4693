//! The green-credit scorer.

use tracing::debug;

use er_core::{CreditConfig, CreditScheme};
use er_routing::{RouteResult, RouteVariant};

/// Scores route variants against the fastest one.
#[derive(Clone, Debug, Default)]
pub struct GreenCreditScorer {
    config: CreditConfig,
}

impl GreenCreditScorer {
    pub fn new(config: CreditConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CreditConfig {
        &self.config
    }

    /// Credits earned by taking `candidate` instead of `fastest`.
    ///
    /// Always finite and `>= 0`.  Under the default scheme the result is `0`
    /// whenever the candidate emits at least as much as the fastest route.
    pub fn score(&self, fastest: &RouteResult, candidate: &RouteResult, passengers: u32) -> f64 {
        let credits = match self.config.scheme {
            CreditScheme::RelativeEmissions => self.relative_emissions(fastest, candidate, passengers),
            CreditScheme::DistanceCarbon    => self.distance_carbon(fastest, candidate),
        };
        if credits.is_finite() { credits.max(0.0) } else { 0.0 }
    }

    fn relative_emissions(&self, fastest: &RouteResult, candidate: &RouteResult, passengers: u32) -> f64 {
        let saved = fastest.total_emissions_g - candidate.total_emissions_g;
        if saved <= 0.0 || fastest.total_emissions_g <= 0.0 {
            return 0.0;
        }
        let time_cost = candidate.total_time_min - fastest.total_time_min;
        self.config.base_points
            * (saved / fastest.total_emissions_g)
            * (1.0 / time_cost.max(1.0))
            * f64::from(passengers)
    }

    fn distance_carbon(&self, fastest: &RouteResult, candidate: &RouteResult) -> f64 {
        let c = &self.config;
        let (distance_pct, carbon_pct) = match candidate.variant {
            RouteVariant::Fastest  => return 0.0,
            RouteVariant::Eco      => (c.eco_distance_pct, c.eco_carbon_pct),
            RouteVariant::Balanced => (c.balanced_distance_pct, c.balanced_carbon_pct),
        };
        let saved_kg = ((fastest.total_emissions_g - candidate.total_emissions_g) / 1000.0).max(0.0);
        candidate.total_distance_km * c.credits_per_km * distance_pct
            + saved_kg * c.credits_per_kg_co2 * carbon_pct
    }

    /// Score every route against the fastest variant among `routes` and sort
    /// by descending credits.
    ///
    /// The sort is stable, so equal scores keep their input order.  If no
    /// fastest variant is present every route scores `0`.
    pub fn award(&self, routes: Vec<RouteResult>, passengers: u32) -> Vec<RouteResult> {
        let fastest = routes.iter().find(|r| r.variant == RouteVariant::Fastest).cloned();
        let mut scored: Vec<RouteResult> = routes
            .into_iter()
            .map(|r| {
                let credits = fastest.as_ref().map_or(0.0, |f| self.score(f, &r, passengers));
                r.with_credits(credits)
            })
            .collect();
        scored.sort_by(|a, b| b.green_credits.total_cmp(&a.green_credits));

        for r in &scored {
            debug!(variant = %r.variant, credits = r.green_credits, "credits awarded");
        }
        scored
    }
}
