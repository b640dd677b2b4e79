use either::{Either, Left, Right};
use rocket::http::Status as HttpStatus;
use rocket::response::status::{Created, Custom, NotFound};
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket::State;
use rocket_okapi::{openapi, JsonSchema};

use super::action_log::MatchLogEntry;
use super::matchmaking::{MatchmakingQueue, QueueStatus};
use super::{MatchAction, MatchError, MatchRegistry, MatchResource};
use crate::card::Lineup;
use crate::config::ServerConfig;
use crate::status_messages::{new_status, Status};

type Rejection = Either<NotFound<Json<Status>>, Custom<Json<Status>>>;

fn reject(error: MatchError) -> Rejection {
    let message = error.to_string();
    match error {
        MatchError::NotFound(_) => Left(NotFound(new_status(message))),
        MatchError::NotYourTurn => Right(Custom(HttpStatus::Forbidden, new_status(message))),
        MatchError::MatchFull => Right(Custom(HttpStatus::Conflict, new_status(message))),
        MatchError::NotParticipant
        | MatchError::NotInProgress(_)
        | MatchError::WaitingForOpponent
        | MatchError::Setup(_) => Right(Custom(HttpStatus::BadRequest, new_status(message))),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct CreateMatchRequest {
    pub user_id: String,
    pub lineup: Lineup,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct JoinMatchRequest {
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct ActionRequest {
    pub user_id: String,
    pub action: MatchAction,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct QueueRequest {
    pub user_id: String,
    pub lineup: Lineup,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct MatchLogResponse {
    pub entries: Vec<MatchLogEntry>,
    pub next_seq: Option<u64>,
    pub limit: usize,
}

/// Open a match and take the first seat. A malformed lineup is refused
/// here rather than at `Init`.
#[openapi]
#[post("/matches", format = "json", data = "<request>")]
pub async fn create_match(
    request: Json<CreateMatchRequest>,
    registry: &State<MatchRegistry>,
) -> Result<Created<Json<MatchResource>>, Rejection> {
    let request = request.0;
    let resource = registry
        .create(&request.user_id, request.lineup)
        .await
        .map_err(reject)?;
    Ok(Created::new(format!("/matches/{}", resource.id)).body(Json(resource)))
}

/// Take the second seat of a waiting match.
#[openapi]
#[post("/matches/<match_id>/join", format = "json", data = "<request>")]
pub async fn join_match(
    match_id: u64,
    request: Json<JoinMatchRequest>,
    registry: &State<MatchRegistry>,
) -> Result<Json<MatchResource>, Rejection> {
    registry
        .join(match_id, &request.user_id)
        .await
        .map(Json)
        .map_err(reject)
}

/// Current canonical state, for polling.
#[openapi]
#[get("/matches/<match_id>")]
pub async fn get_match(
    match_id: u64,
    registry: &State<MatchRegistry>,
) -> Result<Json<MatchResource>, Rejection> {
    registry.get(match_id).await.map(Json).map_err(reject)
}

/// Submit `Init` or a battle action as `user_id`.
#[openapi]
#[post("/matches/<match_id>/action", format = "json", data = "<request>")]
pub async fn submit_action(
    match_id: u64,
    request: Json<ActionRequest>,
    registry: &State<MatchRegistry>,
) -> Result<Json<MatchResource>, Rejection> {
    let request = request.0;
    registry
        .submit(match_id, &request.user_id, request.action)
        .await
        .map(Json)
        .map_err(reject)
}

/// End the current turn on behalf of its owner. Called by whatever runs
/// the turn clock.
#[openapi]
#[post("/matches/<match_id>/expire-turn")]
pub async fn expire_turn(
    match_id: u64,
    registry: &State<MatchRegistry>,
) -> Result<Json<MatchResource>, Rejection> {
    registry.expire_turn(match_id).await.map(Json).map_err(reject)
}

#[openapi]
#[get("/matches/<match_id>/actions?<from_seq>&<limit>")]
pub async fn list_match_actions(
    match_id: u64,
    from_seq: Option<u64>,
    limit: Option<usize>,
    registry: &State<MatchRegistry>,
    config: &State<ServerConfig>,
) -> Result<Json<MatchLogResponse>, Rejection> {
    let max = limit.unwrap_or(config.log_page_limit);
    let (entries, next_seq) = registry
        .actions(match_id, from_seq, max)
        .await
        .map_err(reject)?;
    Ok(Json(MatchLogResponse {
        entries,
        next_seq,
        limit: max,
    }))
}

#[openapi]
#[post("/matchmaking", format = "json", data = "<request>")]
pub async fn join_queue(
    request: Json<QueueRequest>,
    queue: &State<MatchmakingQueue>,
    registry: &State<MatchRegistry>,
) -> Result<Json<QueueStatus>, Rejection> {
    let request = request.0;
    queue
        .join(&request.user_id, request.lineup, registry)
        .await
        .map(Json)
        .map_err(reject)
}

#[openapi]
#[get("/matchmaking?<user_id>")]
pub async fn poll_queue(user_id: String, queue: &State<MatchmakingQueue>) -> Json<QueueStatus> {
    Json(queue.poll(&user_id).await)
}

#[openapi]
#[delete("/matchmaking?<user_id>")]
pub async fn leave_queue(user_id: String, queue: &State<MatchmakingQueue>) -> Json<QueueStatus> {
    Json(queue.leave(&user_id).await)
}
