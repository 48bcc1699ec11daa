use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;

use crate::api::handlers::SearchQuery;
use crate::api::session::DbSession;
use crate::logic::{teams, Listing, ServiceError};
use crate::model::{Id, Team, TeamCreate, TeamReadWithHeroes, TeamUpdate};
use crate::store::Store;

pub async fn list_teams<S: Store>(
    DbSession(mut session): DbSession<S>,
    params: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Listing<Team>>, ServiceError> {
    let Query(params) = params?;
    let listing = teams::list_teams(&mut session, params.query.as_deref()).await?;
    Ok(Json(listing))
}

pub async fn get_team<S: Store>(
    DbSession(mut session): DbSession<S>,
    team_id: Result<Path<Id>, PathRejection>,
) -> Result<Json<Team>, ServiceError> {
    let Path(team_id) = team_id?;
    Ok(Json(teams::get_team(&mut session, team_id).await?))
}

pub async fn get_team_with_heroes<S: Store>(
    DbSession(mut session): DbSession<S>,
    team_id: Result<Path<Id>, PathRejection>,
) -> Result<Json<TeamReadWithHeroes>, ServiceError> {
    let Path(team_id) = team_id?;
    Ok(Json(teams::get_team_with_heroes(&mut session, team_id).await?))
}

pub async fn create_team<S: Store>(
    State(store): State<Arc<S>>,
    payload: Result<Json<TeamCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<Team>), ServiceError> {
    let Json(team) = payload?;
    let session = store.begin().await?;
    let team = teams::create_team(session, team).await?;
    Ok((StatusCode::CREATED, Json(team)))
}

pub async fn update_team<S: Store>(
    State(store): State<Arc<S>>,
    team_id: Result<Path<Id>, PathRejection>,
    payload: Result<Json<TeamUpdate>, JsonRejection>,
) -> Result<Json<Team>, ServiceError> {
    let Path(team_id) = team_id?;
    let Json(update) = payload?;
    let session = store.begin().await?;
    Ok(Json(teams::update_team(session, team_id, update).await?))
}

pub async fn delete_team<S: Store>(
    DbSession(session): DbSession<S>,
    team_id: Result<Path<Id>, PathRejection>,
) -> Result<StatusCode, ServiceError> {
    let Path(team_id) = team_id?;
    teams::delete_team(session, team_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
