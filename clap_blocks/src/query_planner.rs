//! Configuration for the request planner, flattenable into any binary's
//! `run` subcommand the way `CompactorConfig`/`CatalogDsnConfig` are.

/// Operator-tunable defaults for [`query_planner::QueryPlanner`].
///
/// Every field here is also an explicit argument on
/// `QueryPlanner::plan`/`plan()`; this block only supplies the default a
/// caller gets if it doesn't override the value for a particular call.
#[derive(Debug, Clone, clap::Parser)]
pub struct QueryPlannerConfig {
    /// Default maximum data points used to decide archive density when a
    /// caller doesn't specify one explicitly.
    #[clap(
        long = "query-planner-default-mdp",
        env = "QUERY_PLANNER_DEFAULT_MDP",
        default_value = "800"
    )]
    pub default_plan_mdp: u32,

    /// Soft limit on total points fetched per plan call; `0` disables the
    /// check. Breaching it triggers the reduction pass rather than failing
    /// the call.
    #[clap(
        long = "query-planner-soft-limit",
        env = "QUERY_PLANNER_SOFT_LIMIT",
        default_value = "1000000"
    )]
    pub soft_limit: u64,

    /// Hard limit on total points fetched per plan call; `0` disables the
    /// check. Breaching it fails the call with `TooManyPoints`.
    #[clap(
        long = "query-planner-hard-limit",
        env = "QUERY_PLANNER_HARD_LIMIT",
        default_value = "10000000"
    )]
    pub hard_limit: u64,
}

impl Default for QueryPlannerConfig {
    fn default() -> Self {
        Self {
            default_plan_mdp: 800,
            soft_limit: 1_000_000,
            hard_limit: 10_000_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parses_with_defaults_from_empty_args() {
        let config = QueryPlannerConfig::parse_from(["program"]);
        assert_eq!(config.default_plan_mdp, 800);
        assert_eq!(config.soft_limit, 1_000_000);
        assert_eq!(config.hard_limit, 10_000_000);
    }

    #[test]
    fn overrides_via_long_flag() {
        let config =
            QueryPlannerConfig::parse_from(["program", "--query-planner-default-mdp", "200"]);
        assert_eq!(config.default_plan_mdp, 200);
    }
}
