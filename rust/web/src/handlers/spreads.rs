use arcana_engine::{SpreadDefinition, SpreadRegistry};
use serde::Serialize;
use warp::reply::Json;

#[derive(Serialize)]
struct SpreadsBody<'a> {
    spreads: &'a [SpreadDefinition],
}

/// `GET /v1/spreads`: every registered spread with its ordered positions.
pub fn list_spreads(registry: &SpreadRegistry) -> Json {
    warp::reply::json(&SpreadsBody {
        spreads: registry.list(),
    })
}
