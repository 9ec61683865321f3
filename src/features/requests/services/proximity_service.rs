use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::requests::models::{HelpRequest, NearbyRequest, RequestStatus};
use crate::shared::constants::{
    DEFAULT_NEARBY_AMOUNT, DEFAULT_NEARBY_RADIUS_METERS, MAX_NEARBY_AMOUNT,
};
use crate::shared::geo::{haversine_distance, BoundingBox, Coordinate};

/// Validated input for a nearby search: center point, radius in meters and
/// result cap. Never persisted.
#[derive(Debug, Clone, Copy)]
pub struct ProximityQuery {
    center: Coordinate,
    radius_meters: f64,
    max_results: i64,
}

impl ProximityQuery {
    pub fn new(center: Coordinate, radius_meters: f64, max_results: i64) -> Result<Self> {
        if !radius_meters.is_finite() || radius_meters <= 0.0 {
            return Err(AppError::Validation(
                "Search radius must be a positive number of meters".to_string(),
            ));
        }
        if max_results <= 0 {
            return Err(AppError::Validation(
                "Result limit must be a positive integer".to_string(),
            ));
        }

        Ok(Self {
            center,
            radius_meters,
            max_results: max_results.min(MAX_NEARBY_AMOUNT),
        })
    }

    #[allow(dead_code)]
    pub fn with_defaults(center: Coordinate) -> Result<Self> {
        Self::new(center, DEFAULT_NEARBY_RADIUS_METERS, DEFAULT_NEARBY_AMOUNT)
    }

    pub fn center(&self) -> Coordinate {
        self.center
    }

    pub fn radius_meters(&self) -> f64 {
        self.radius_meters
    }

    pub fn max_results(&self) -> i64 {
        self.max_results
    }
}

/// Service that finds the open requests nearest to a point.
///
/// Read-only: every call ranks a snapshot of the open requests and never
/// mutates them. A request may leave the open state between the fetch and
/// the response; callers get best-effort proximity, not a transactional view.
pub struct ProximityService {
    pool: PgPool,
}

impl ProximityService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Return open requests within the query radius, closest first, capped
    /// at the query's result limit. An empty result is a valid outcome.
    pub async fn find_nearby(&self, query: &ProximityQuery) -> Result<Vec<NearbyRequest>> {
        let bbox = BoundingBox::around(&query.center(), query.radius_meters());
        let candidates = self.fetch_open_in_box(&bbox).await?;

        Ok(rank_by_distance(
            candidates,
            &query.center(),
            query.radius_meters(),
            query.max_results() as usize,
        ))
    }

    /// Bounding-box pre-filter over open requests. The box is oversized, so
    /// the exact Haversine check in `rank_by_distance` makes the final call.
    async fn fetch_open_in_box(&self, bbox: &BoundingBox) -> Result<Vec<HelpRequest>> {
        sqlx::query_as::<_, HelpRequest>(
            "SELECT id, requestor_id, acceptor_id, topic, description, status, \
                    latitude, longitude, created_at, updated_at \
             FROM requests \
             WHERE status = 'open' \
               AND latitude BETWEEN $1 AND $2 \
               AND longitude BETWEEN $3 AND $4",
        )
        .bind(bbox.min_lat)
        .bind(bbox.max_lat)
        .bind(bbox.min_lon)
        .bind(bbox.max_lon)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch nearby request candidates: {:?}", e);
            AppError::Database(e)
        })
    }
}

/// Rank candidates by Haversine distance from the center.
///
/// Keeps open requests within `radius_meters` (boundary inclusive), sorts
/// ascending by distance with creation time and then id as tie-breakers,
/// and truncates to `limit`.
pub(crate) fn rank_by_distance(
    candidates: Vec<HelpRequest>,
    center: &Coordinate,
    radius_meters: f64,
    limit: usize,
) -> Vec<NearbyRequest> {
    let mut nearby: Vec<NearbyRequest> = candidates
        .into_iter()
        .filter(|r| r.status == RequestStatus::Open)
        .map(|r| {
            let distance_meters =
                haversine_distance(center.latitude(), center.longitude(), r.latitude, r.longitude);
            NearbyRequest {
                request: r,
                distance_meters,
            }
        })
        .filter(|n| n.distance_meters <= radius_meters)
        .collect();

    nearby.sort_by(|a, b| {
        a.distance_meters
            .partial_cmp(&b.distance_meters)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.request.created_at.cmp(&b.request.created_at))
            .then_with(|| a.request.id.cmp(&b.request.id))
    });
    nearby.truncate(limit);

    nearby
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use uuid::Uuid;

    // Berlin, Alexanderplatz-ish
    const CENTER: (f64, f64) = (52.5200, 13.4050);

    fn center() -> Coordinate {
        Coordinate::new(CENTER.0, CENTER.1).unwrap()
    }

    fn created(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn candidate(id: i64, lat: f64, lon: f64, status: RequestStatus) -> HelpRequest {
        HelpRequest {
            id,
            requestor_id: Uuid::nil(),
            acceptor_id: None,
            topic: format!("request {}", id),
            description: "needs a hand".to_string(),
            status,
            latitude: lat,
            longitude: lon,
            created_at: created(id),
            updated_at: created(id),
        }
    }

    #[test]
    fn test_query_rejects_non_positive_radius() {
        assert!(ProximityQuery::new(center(), -5.0, 10).is_err());
        assert!(ProximityQuery::new(center(), 0.0, 10).is_err());
        assert!(ProximityQuery::new(center(), f64::NAN, 10).is_err());
    }

    #[test]
    fn test_query_rejects_non_positive_limit() {
        assert!(ProximityQuery::new(center(), 2000.0, 0).is_err());
        assert!(ProximityQuery::new(center(), 2000.0, -1).is_err());
    }

    #[test]
    fn test_query_defaults() {
        let query = ProximityQuery::with_defaults(center()).unwrap();
        assert_eq!(query.max_results(), 10);
        assert!((query.radius_meters() - 2000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_query_limit_clamped() {
        let query = ProximityQuery::new(center(), 2000.0, 100_000).unwrap();
        assert_eq!(query.max_results(), MAX_NEARBY_AMOUNT);
    }

    #[test]
    fn test_ranking_filters_sorts_and_excludes_pending() {
        // Offsets chosen so the open candidates sit ~500m / ~1500m / ~2500m
        // north of the center and the pending one ~100m away.
        let candidates = vec![
            candidate(3, 52.5335, 13.4050, RequestStatus::Open), // ~1500m
            candidate(1, 52.5245, 13.4050, RequestStatus::Open), // ~500m
            candidate(4, 52.5425, 13.4050, RequestStatus::Open), // ~2500m
            candidate(2, 52.5209, 13.4050, RequestStatus::Pending), // ~100m
        ];

        let result = rank_by_distance(candidates, &center(), 2000.0, 10);

        let ids: Vec<i64> = result.iter().map(|n| n.request.id).collect();
        assert_eq!(ids, vec![1, 3]);

        assert!(result[0].distance_meters > 400.0 && result[0].distance_meters < 600.0);
        assert!(result[1].distance_meters > 1400.0 && result[1].distance_meters < 1600.0);
        assert!(result[0].distance_meters <= result[1].distance_meters);
    }

    #[test]
    fn test_candidate_exactly_on_boundary_included() {
        let on_edge = candidate(1, 52.5335, 13.4050, RequestStatus::Open);
        let exact_distance = haversine_distance(CENTER.0, CENTER.1, 52.5335, 13.4050);

        let result = rank_by_distance(vec![on_edge], &center(), exact_distance, 10);

        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_ties_break_by_creation_time_then_id() {
        // Same coordinates, so identical distance
        let mut older = candidate(7, 52.5245, 13.4050, RequestStatus::Open);
        older.created_at = created(0);
        let mut newer = candidate(2, 52.5245, 13.4050, RequestStatus::Open);
        newer.created_at = created(60);
        let mut same_instant = candidate(5, 52.5245, 13.4050, RequestStatus::Open);
        same_instant.created_at = created(0);

        let result = rank_by_distance(
            vec![newer, same_instant, older],
            &center(),
            2000.0,
            10,
        );

        let ids: Vec<i64> = result.iter().map(|n| n.request.id).collect();
        assert_eq!(ids, vec![5, 7, 2]);
    }

    #[test]
    fn test_result_truncated_to_limit() {
        let candidates = vec![
            candidate(1, 52.5245, 13.4050, RequestStatus::Open),
            candidate(2, 52.5260, 13.4050, RequestStatus::Open),
            candidate(3, 52.5275, 13.4050, RequestStatus::Open),
        ];

        let result = rank_by_distance(candidates, &center(), 2000.0, 2);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].request.id, 1);
    }

    #[test]
    fn test_no_candidates_is_empty_success() {
        let result = rank_by_distance(Vec::new(), &center(), 2000.0, 10);
        assert!(result.is_empty());
    }

    #[test]
    fn test_ranking_is_deterministic() {
        let build = || {
            vec![
                candidate(3, 52.5335, 13.4050, RequestStatus::Open),
                candidate(1, 52.5245, 13.4050, RequestStatus::Open),
                candidate(2, 52.5260, 13.4050, RequestStatus::Open),
            ]
        };

        let first: Vec<i64> = rank_by_distance(build(), &center(), 2000.0, 10)
            .iter()
            .map(|n| n.request.id)
            .collect();
        let second: Vec<i64> = rank_by_distance(build(), &center(), 2000.0, 10)
            .iter()
            .map(|n| n.request.id)
            .collect();

        assert_eq!(first, second);
    }
}
