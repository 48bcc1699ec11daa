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
use crate::logic::{cities, Listing, ServiceError};
use crate::model::{City, CityCreate, CityPatchCapital, CityPatchName, Id};
use crate::store::Store;

pub async fn list_cities<S: Store>(
    DbSession(mut session): DbSession<S>,
    params: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Listing<City>>, ServiceError> {
    let Query(params) = params?;
    let listing = cities::list_cities(&mut session, params.query.as_deref()).await?;
    Ok(Json(listing))
}

pub async fn get_city<S: Store>(
    DbSession(mut session): DbSession<S>,
    city_id: Result<Path<Id>, PathRejection>,
) -> Result<Json<City>, ServiceError> {
    let Path(city_id) = city_id?;
    Ok(Json(cities::get_city(&mut session, city_id).await?))
}

pub async fn create_city<S: Store>(
    State(store): State<Arc<S>>,
    payload: Result<Json<CityCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<City>), ServiceError> {
    let Json(city) = payload?;
    let session = store.begin().await?;
    let city = cities::create_city(session, city).await?;
    Ok((StatusCode::CREATED, Json(city)))
}

pub async fn patch_city_name<S: Store>(
    State(store): State<Arc<S>>,
    city_id: Result<Path<Id>, PathRejection>,
    payload: Result<Json<CityPatchName>, JsonRejection>,
) -> Result<Json<City>, ServiceError> {
    let Path(city_id) = city_id?;
    let Json(patch) = payload?;
    let session = store.begin().await?;
    Ok(Json(cities::patch_city(session, city_id, patch.into()).await?))
}

pub async fn patch_city_capital<S: Store>(
    State(store): State<Arc<S>>,
    city_id: Result<Path<Id>, PathRejection>,
    payload: Result<Json<CityPatchCapital>, JsonRejection>,
) -> Result<Json<City>, ServiceError> {
    let Path(city_id) = city_id?;
    let Json(patch) = payload?;
    let session = store.begin().await?;
    Ok(Json(cities::patch_city(session, city_id, patch.into()).await?))
}

pub async fn delete_city<S: Store>(
    DbSession(session): DbSession<S>,
    city_id: Result<Path<Id>, PathRejection>,
) -> Result<StatusCode, ServiceError> {
    let Path(city_id) = city_id?;
    cities::delete_city(session, city_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
