use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;

use crate::api::handlers::{SearchQuery, ShowTeamQuery};
use crate::api::session::DbSession;
use crate::logic::{heroes, Listing, ServiceError};
use crate::model::{Hero, HeroCreate, HeroResponse, Id};
use crate::store::Store;

pub async fn list_heroes<S: Store>(
    DbSession(mut session): DbSession<S>,
    params: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Listing<Hero>>, ServiceError> {
    let Query(params) = params?;
    let listing = heroes::list_heroes(&mut session, params.query.as_deref()).await?;
    Ok(Json(listing))
}

pub async fn get_hero<S: Store>(
    DbSession(mut session): DbSession<S>,
    hero_id: Result<Path<Id>, PathRejection>,
) -> Result<Json<Hero>, ServiceError> {
    let Path(hero_id) = hero_id?;
    Ok(Json(heroes::get_hero(&mut session, hero_id).await?))
}

pub async fn get_hero_with_team<S: Store>(
    DbSession(mut session): DbSession<S>,
    hero_id: Result<Path<Id>, PathRejection>,
    params: Result<Query<ShowTeamQuery>, QueryRejection>,
) -> Result<Json<HeroResponse>, ServiceError> {
    let Path(hero_id) = hero_id?;
    let Query(params) = params?;
    let hero = heroes::get_hero_with_team(&mut session, hero_id, params.show_team).await?;
    Ok(Json(hero))
}

pub async fn create_hero<S: Store>(
    State(store): State<Arc<S>>,
    payload: Result<Json<HeroCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<Hero>), ServiceError> {
    let Json(hero) = payload?;
    let session = store.begin().await?;
    let hero = heroes::create_hero(session, hero).await?;
    Ok((StatusCode::CREATED, Json(hero)))
}

pub async fn delete_hero<S: Store>(
    DbSession(session): DbSession<S>,
    hero_id: Result<Path<Id>, PathRejection>,
) -> Result<StatusCode, ServiceError> {
    let Path(hero_id) = hero_id?;
    heroes::delete_hero(session, hero_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
