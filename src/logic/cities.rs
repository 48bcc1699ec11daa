use crate::logic::{on_conflict, Listing, ServiceError};
use crate::model::{check_len_range, City, CityCreate, CityPatch, Id, Validate};
use crate::store::{CityStore, Session};

/// Accepted length of the `query` search parameter
pub const QUERY_MIN_LEN: usize = 3;
pub const QUERY_MAX_LEN: usize = 25;

fn not_found(id: Id) -> ServiceError {
    ServiceError::NotFound(format!("City with ID = {} was not found", id))
}

/// All cities, or the first city whose name equals `query`
pub async fn list_cities<S: CityStore>(
    session: &mut S,
    query: Option<&str>,
) -> Result<Listing<City>, ServiceError> {
    let Some(query) = query else {
        return Ok(Listing::All(session.list_cities().await?));
    };

    check_len_range("query", query, QUERY_MIN_LEN, QUERY_MAX_LEN)?;
    session
        .find_cities_by_name(query)
        .await?
        .into_iter()
        .next()
        .map(Listing::Match)
        .ok_or_else(|| ServiceError::NotFound(format!("City with name = {} not found", query)))
}

pub async fn get_city<S: CityStore>(session: &mut S, id: Id) -> Result<City, ServiceError> {
    session.get_city(id).await?.ok_or_else(|| not_found(id))
}

pub async fn create_city<S: Session>(
    mut session: S,
    city: CityCreate,
) -> Result<City, ServiceError> {
    city.validate()?;

    let (name, capital_city) = (city.name.clone(), city.capital_city.clone());
    let stored = session.insert_city(city).await.map_err(|e| {
        on_conflict(e, || {
            format!(
                "City with name = {} or capital = {} already exists",
                name, capital_city
            )
        })
    })?;
    session.commit().await?;

    log::debug!("Created city {} ({})", stored.id, stored.name);
    Ok(stored)
}

fn patch_conflict(patch: &CityPatch) -> String {
    match (&patch.name, &patch.capital_city) {
        (Some(name), Some(capital_city)) => format!(
            "City with name = {} or capital = {} already exists",
            name, capital_city
        ),
        (Some(name), None) => format!("City with name = {} already exists", name),
        (None, Some(capital_city)) => format!("City with capital = {} already exists", capital_city),
        (None, None) => "City already exists".to_string(),
    }
}

/// Write the fields set in `patch`; the others keep whatever value is stored at commit time
pub async fn patch_city<S: Session>(
    mut session: S,
    id: Id,
    patch: CityPatch,
) -> Result<City, ServiceError> {
    patch.validate()?;

    let conflict = patch_conflict(&patch);
    let updated = session
        .update_city(id, patch)
        .await
        .map_err(|e| on_conflict(e, || conflict))?
        .ok_or_else(|| not_found(id))?;
    session.commit().await?;
    Ok(updated)
}

pub async fn delete_city<S: Session>(mut session: S, id: Id) -> Result<(), ServiceError> {
    if !session.delete_city(id).await? {
        return Err(not_found(id));
    }
    session.commit().await?;

    log::debug!("Deleted city {}", id);
    Ok(())
}
