use crate::logic::{on_conflict, Listing, ServiceError};
use crate::model::{
    check_len_range, Hero, HeroCreate, HeroReadWithTeam, HeroResponse, Id, Validate,
};
use crate::store::{HeroStore, Session, StoreError, TeamStore};

/// Accepted length of the `query` search parameter
pub const QUERY_MIN_LEN: usize = 2;
pub const QUERY_MAX_LEN: usize = 25;

fn not_found(id: Id) -> ServiceError {
    ServiceError::NotFound(format!("Hero with ID = {} not found", id))
}

/// All heroes, or the first hero whose name equals `query`
pub async fn list_heroes<S: HeroStore>(
    session: &mut S,
    query: Option<&str>,
) -> Result<Listing<Hero>, ServiceError> {
    let Some(query) = query else {
        return Ok(Listing::All(session.list_heroes().await?));
    };

    check_len_range("query", query, QUERY_MIN_LEN, QUERY_MAX_LEN)?;
    session
        .find_heroes_by_name(query)
        .await?
        .into_iter()
        .next()
        .map(Listing::Match)
        .ok_or_else(|| ServiceError::NotFound(format!("Hero with name = {} not found", query)))
}

pub async fn get_hero<S: HeroStore>(session: &mut S, id: Id) -> Result<Hero, ServiceError> {
    session.get_hero(id).await?.ok_or_else(|| not_found(id))
}

/// The hero, with its team resolved through `team_id` when `show_team` is set
pub async fn get_hero_with_team<S: HeroStore + TeamStore>(
    session: &mut S,
    id: Id,
    show_team: bool,
) -> Result<HeroResponse, ServiceError> {
    let hero = get_hero(session, id).await?;
    if !show_team {
        return Ok(HeroResponse::Plain(hero));
    }

    let team = match hero.team_id {
        Some(team_id) => session.get_team(team_id).await?,
        None => None,
    };
    Ok(HeroResponse::WithTeam(HeroReadWithTeam { hero, team }))
}

pub async fn create_hero<S: Session>(
    mut session: S,
    hero: HeroCreate,
) -> Result<Hero, ServiceError> {
    hero.validate()?;

    let (name, team_id) = (hero.name.clone(), hero.team_id);
    let stored = session.insert_hero(hero).await.map_err(|e| match e {
        StoreError::ForeignKeyViolation(_) => ServiceError::Validation(format!(
            "Team with ID = {} does not exist",
            team_id.unwrap_or_default()
        )),
        other => on_conflict(other, || format!("Hero with name = {} already exists", name)),
    })?;
    session.commit().await?;

    log::debug!("Created hero {} ({})", stored.id, stored.name);
    Ok(stored)
}

pub async fn delete_hero<S: Session>(mut session: S, id: Id) -> Result<(), ServiceError> {
    if !session.delete_hero(id).await? {
        return Err(not_found(id));
    }
    session.commit().await?;

    log::debug!("Deleted hero {}", id);
    Ok(())
}
