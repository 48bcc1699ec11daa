use axum::{
    routing::{get, patch},
    Router,
};
use std::sync::Arc;

use crate::api::{city_handlers, handlers, hero_handlers, team_handlers};
use crate::store::traits::Store;

pub fn create_router<S: Store>() -> Router<Arc<S>> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Cities
        .route(
            "/cities",
            get(city_handlers::list_cities::<S>).post(city_handlers::create_city::<S>),
        )
        .route(
            "/cities/",
            get(city_handlers::list_cities::<S>).post(city_handlers::create_city::<S>),
        )
        .route(
            "/cities/:city_id",
            get(city_handlers::get_city::<S>).delete(city_handlers::delete_city::<S>),
        )
        .route(
            "/cities/:city_id/name",
            patch(city_handlers::patch_city_name::<S>),
        )
        .route(
            "/cities/:city_id/capital",
            patch(city_handlers::patch_city_capital::<S>),
        )
        // Heroes
        .route(
            "/heroes",
            get(hero_handlers::list_heroes::<S>).post(hero_handlers::create_hero::<S>),
        )
        .route(
            "/heroes/",
            get(hero_handlers::list_heroes::<S>).post(hero_handlers::create_hero::<S>),
        )
        .route(
            "/heroes/:hero_id",
            get(hero_handlers::get_hero::<S>).delete(hero_handlers::delete_hero::<S>),
        )
        .route(
            "/heroes/:hero_id/teams",
            get(hero_handlers::get_hero_with_team::<S>),
        )
        // Teams
        .route(
            "/teams",
            get(team_handlers::list_teams::<S>).post(team_handlers::create_team::<S>),
        )
        .route(
            "/teams/",
            get(team_handlers::list_teams::<S>).post(team_handlers::create_team::<S>),
        )
        .route(
            "/teams/:team_id",
            get(team_handlers::get_team::<S>)
                .put(team_handlers::update_team::<S>)
                .delete(team_handlers::delete_team::<S>),
        )
        .route(
            "/teams/:team_id/heroes",
            get(team_handlers::get_team_with_heroes::<S>),
        )
}
