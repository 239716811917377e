//! Route diversification: turn a directions backend that usually answers
//! with a single path into exactly three distinct candidates.

use crate::{
    cancel::CancelToken,
    directions::{fetch_candidates, DirectionsBackend},
    error::PlanError,
    geo::haversine_km,
    models::{Coordinate, PlanRouteRequest, RouteCandidate, TravelMode},
    via::{ViaStep, DEFAULT_LARGE_STEPS, DEFAULT_SMALL_STEPS},
};

pub const TARGET_ROUTE_COUNT: usize = 3;
pub const DEDUP_THRESHOLD_M: f64 = 20.0;
/// Longest straight-line span accepted for walking or cycling.
pub const MAX_DISTANCE_KM: f64 = 15.0;
const DIRECT_ALTERNATIVES: u8 = 2;
const VIA_ALTERNATIVES: u8 = 0;

#[derive(Debug, Clone)]
pub struct DiversifyConfig {
    pub target_count: usize,
    /// Two candidates whose lengths differ by less than this are the same route.
    pub dedup_threshold_m: f64,
    pub max_distance_km: f64,
    /// Via steps in the order they are tried. Small detours come first so
    /// large ones are only reached when the small sweep fell short.
    pub via_plan: Vec<ViaStep>,
}

impl Default for DiversifyConfig {
    fn default() -> Self {
        Self {
            target_count: TARGET_ROUTE_COUNT,
            dedup_threshold_m: DEDUP_THRESHOLD_M,
            max_distance_km: MAX_DISTANCE_KM,
            via_plan: DEFAULT_SMALL_STEPS
                .iter()
                .chain(DEFAULT_LARGE_STEPS.iter())
                .copied()
                .collect(),
        }
    }
}

/// A validated planning request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoutePlan {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub mode: TravelMode,
}

impl RoutePlan {
    pub fn straight_line_km(&self) -> f64 {
        haversine_km(self.origin, self.destination)
    }
}

impl TryFrom<&PlanRouteRequest> for RoutePlan {
    type Error = PlanError;

    fn try_from(req: &PlanRouteRequest) -> Result<Self, Self::Error> {
        let fields = [
            ("startLat", req.start_lat, 90.0),
            ("startLng", req.start_lng, 180.0),
            ("endLat", req.end_lat, 90.0),
            ("endLng", req.end_lng, 180.0),
        ];
        for (name, value, limit) in fields {
            if !value.is_finite() || value.abs() > limit {
                return Err(PlanError::Validation(format!(
                    "{name} must be a finite number within ±{limit}"
                )));
            }
        }

        Ok(Self {
            origin: req.origin(),
            destination: req.destination(),
            mode: req.mode,
        })
    }
}

/// Collect `config.target_count` candidates between the plan's endpoints.
///
/// Endpoints further apart than `config.max_distance_km` are rejected as
/// [`PlanError::Validation`] before the backend is asked anything.
///
/// # Algorithm
/// 1. **Direct**: `[origin, destination]` with alternatives. No candidate at
///    all is terminal ([`PlanError::NoRoute`]).
/// 2. **Seed**: direct candidates sorted by distance, near-duplicates dropped.
/// 3. **Sweep**: for each via step until the target is reached, fetch through
///    a displaced via point, keep the shortest answer and accept it only if no
///    collected route is within `dedup_threshold_m`. Failed or empty fetches
///    are skipped.
/// 4. **Pad** with copies of the shortest route, then truncate.
///
/// The result is sorted ascending by distance. Calls are strictly
/// sequential; once `cancel` fires no further call is issued and nothing is
/// returned.
pub async fn diversify<B: DirectionsBackend>(
    backend: &B,
    config: &DiversifyConfig,
    plan: &RoutePlan,
    cancel: &CancelToken,
) -> Result<Vec<RouteCandidate>, PlanError> {
    let span_km = plan.straight_line_km();
    if span_km > config.max_distance_km {
        return Err(PlanError::Validation(format!(
            "route distance {span_km:.1} km exceeds the {} km limit for walking/cycling",
            config.max_distance_km
        )));
    }

    let direct = cancel
        .run(fetch_candidates(
            backend,
            &[plan.origin, plan.destination],
            plan.mode,
            DIRECT_ALTERNATIVES,
        ))
        .await
        .ok_or(PlanError::Cancelled)?;
    if direct.is_empty() {
        tracing::warn!(
            "no direct route between {:?} and {:?}",
            plan.origin,
            plan.destination
        );
        return Err(PlanError::NoRoute);
    }

    let mut routes: Vec<RouteCandidate> = Vec::with_capacity(config.target_count);
    for candidate in sorted_by_distance(direct) {
        if is_new_route(&routes, &candidate, config.dedup_threshold_m) {
            routes.push(candidate);
        }
    }
    tracing::debug!("seeded with {} direct route(s)", routes.len());

    for (index, step) in config.via_plan.iter().enumerate() {
        if cancel.is_cancelled() {
            return Err(PlanError::Cancelled);
        }
        if routes.len() >= config.target_count {
            break;
        }

        let sequence = step.sequence(plan.origin, plan.destination);
        let candidates = cancel
            .run(fetch_candidates(backend, &sequence, plan.mode, VIA_ALTERNATIVES))
            .await
            .ok_or(PlanError::Cancelled)?;

        let Some(representative) = shortest(candidates) else {
            tracing::debug!(
                "via step #{index} ({:?}, t={}, scale={}) produced nothing",
                step.tier,
                step.fraction,
                step.scale
            );
            continue;
        };
        if !is_new_route(&routes, &representative, config.dedup_threshold_m) {
            tracing::debug!(
                "via step #{index} duplicate: {:.0} m already collected",
                representative.distance_m
            );
            continue;
        }

        tracing::info!(
            "accepted route #{} from via step #{index} ({:?}): {:.0} m",
            routes.len() + 1,
            step.tier,
            representative.distance_m
        );
        routes.push(representative);
        routes.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
    }

    if cancel.is_cancelled() {
        return Err(PlanError::Cancelled);
    }

    pad_routes(&mut routes, config.target_count);
    routes.truncate(config.target_count);
    Ok(routes)
}

fn sorted_by_distance(mut routes: Vec<RouteCandidate>) -> Vec<RouteCandidate> {
    routes.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
    routes
}

fn shortest(candidates: Vec<RouteCandidate>) -> Option<RouteCandidate> {
    candidates
        .into_iter()
        .min_by(|a, b| a.distance_m.total_cmp(&b.distance_m))
}

/// Length-only equality: geometry is never compared.
pub fn is_new_route(routes: &[RouteCandidate], candidate: &RouteCandidate, threshold_m: f64) -> bool {
    !routes
        .iter()
        .any(|existing| (existing.distance_m - candidate.distance_m).abs() < threshold_m)
}

/// Duplicate the shortest route until `target` entries exist, keeping the
/// list sorted. Never pads an empty list.
pub fn pad_routes(routes: &mut Vec<RouteCandidate>, target: usize) {
    let Some(best) = routes.first().cloned() else {
        return;
    };
    while routes.len() < target {
        routes.insert(1, best.clone());
    }
}
