use crate::logic::{on_conflict, Listing, ServiceError};
use crate::model::{Id, Team, TeamCreate, TeamReadWithHeroes, TeamUpdate, Validate};
use crate::store::{Session, TeamStore};

fn not_found(id: Id) -> ServiceError {
    ServiceError::NotFound(format!("Team with ID = {} not found", id))
}

/// All teams, or the first team whose name equals `query`. An empty query lists everything.
pub async fn list_teams<S: TeamStore>(
    session: &mut S,
    query: Option<&str>,
) -> Result<Listing<Team>, ServiceError> {
    let query = match query {
        Some(query) if !query.is_empty() => query,
        _ => return Ok(Listing::All(session.list_teams().await?)),
    };

    session
        .find_teams_by_name(query)
        .await?
        .into_iter()
        .next()
        .map(Listing::Match)
        .ok_or_else(|| {
            ServiceError::NotFound(format!("Team with query name = {} not found", query))
        })
}

pub async fn get_team<S: TeamStore>(session: &mut S, id: Id) -> Result<Team, ServiceError> {
    session.get_team(id).await?.ok_or_else(|| not_found(id))
}

/// The team and every hero whose `team_id` points at it
pub async fn get_team_with_heroes<S: TeamStore>(
    session: &mut S,
    id: Id,
) -> Result<TeamReadWithHeroes, ServiceError> {
    let team = get_team(session, id).await?;
    let heroes = session.list_team_heroes(id).await?;
    Ok(TeamReadWithHeroes { team, heroes })
}

pub async fn create_team<S: Session>(
    mut session: S,
    team: TeamCreate,
) -> Result<Team, ServiceError> {
    team.validate()?;

    let name = team.name.clone();
    let stored = session
        .insert_team(team)
        .await
        .map_err(|e| on_conflict(e, || format!("Team with name = {} already exists", name)))?;
    session.commit().await?;

    log::debug!("Created team {} ({})", stored.id, stored.name);
    Ok(stored)
}

/// Write the fields the caller sent; omitted fields keep their stored value
pub async fn update_team<S: Session>(
    mut session: S,
    id: Id,
    update: TeamUpdate,
) -> Result<Team, ServiceError> {
    update.validate()?;

    let name = update.name.clone().unwrap_or_default();
    let updated = session
        .update_team(id, update)
        .await
        .map_err(|e| on_conflict(e, || format!("Team with name = {} already exists", name)))?
        .ok_or_else(|| not_found(id))?;
    session.commit().await?;
    Ok(updated)
}

/// Remove the team. Heroes assigned to it stay, without a team.
pub async fn delete_team<S: Session>(mut session: S, id: Id) -> Result<(), ServiceError> {
    if !session.delete_team(id).await? {
        return Err(not_found(id));
    }
    session.commit().await?;

    log::debug!("Deleted team {}", id);
    Ok(())
}
