//! Fluent builder for constructing a [`RoutePlanner`].

use tracing::info;

use er_agent::{model_for, AlphaModel};
use er_core::EngineConfig;
use er_credits::GreenCreditScorer;
use er_network::RoadNetwork;
use er_routing::{DijkstraPathfinder, Pathfinder};
use er_traffic::TrafficSimulator;

use crate::{PlanError, PlanResult, PlannerStats, RemoteOptimizer, RoutePlanner};

/// Fluent builder for [`RoutePlanner<P>`].
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default                                   |
/// |---------------------|-------------------------------------------|
/// | `.config(c)`        | `EngineConfig::default()`                 |
/// | `.pathfinder(p)`    | [`DijkstraPathfinder`]                    |
/// | `.alpha_model(m)`   | the model named by `config.alpha.model`   |
/// | `.remote(r)`        | none: every request is planned locally    |
///
/// # Example
///
/// ```rust,ignore
/// let planner = PlannerBuilder::new(pune_network()?)
///     .config(EngineConfig::load(path)?)
///     .build()?;
/// let response = planner.plan(&request, &mut rng, &mut ledger)?;
/// ```
pub struct PlannerBuilder<P: Pathfinder = DijkstraPathfinder> {
    network:     RoadNetwork,
    config:      EngineConfig,
    pathfinder:  P,
    alpha_model: Option<Box<dyn AlphaModel>>,
    remote:      Option<Box<dyn RemoteOptimizer>>,
}

impl PlannerBuilder<DijkstraPathfinder> {
    pub fn new(network: RoadNetwork) -> Self {
        Self {
            network,
            config:      EngineConfig::default(),
            pathfinder:  DijkstraPathfinder,
            alpha_model: None,
            remote:      None,
        }
    }
}

impl<P: Pathfinder> PlannerBuilder<P> {
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the path search implementation.
    pub fn pathfinder<Q: Pathfinder>(self, pathfinder: Q) -> PlannerBuilder<Q> {
        PlannerBuilder {
            network:     self.network,
            config:      self.config,
            pathfinder,
            alpha_model: self.alpha_model,
            remote:      self.remote,
        }
    }

    /// Use `model` instead of the one named in the configuration.
    pub fn alpha_model(mut self, model: impl AlphaModel + 'static) -> Self {
        self.alpha_model = Some(Box::new(model));
        self
    }

    /// Try `remote` first for every [`plan`][RoutePlanner::plan] call.
    pub fn remote(mut self, remote: impl RemoteOptimizer + 'static) -> Self {
        self.remote = Some(Box::new(remote));
        self
    }

    /// Validate the configuration and return a ready planner.
    pub fn build(self) -> PlanResult<RoutePlanner<P>> {
        self.config.validate()?;
        if self.network.is_empty() {
            return Err(PlanError::Config("road network has no nodes".into()));
        }

        let alpha_model = self.alpha_model.unwrap_or_else(|| model_for(self.config.alpha.model));
        info!(
            nodes = self.network.node_count(),
            links = self.network.link_count(),
            alpha_model = alpha_model.name(),
            remote = self.remote.is_some(),
            "route planner ready"
        );

        Ok(RoutePlanner {
            simulator: TrafficSimulator::new(self.config.traffic.clone()),
            scorer:    GreenCreditScorer::new(self.config.credits.clone()),
            network:   self.network,
            config:    self.config,
            pathfinder: self.pathfinder,
            alpha_model,
            remote:    self.remote,
            stats:     PlannerStats::default(),
        })
    }
}
