use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::model::{City, CityCreate, CityPatch, Hero, HeroCreate, Id, Team, TeamCreate, TeamUpdate};
use crate::store::traits::{CityStore, HeroStore, Session, Store, TeamStore};
use crate::store::{StoreError, StoreResult};

#[derive(Debug, Clone, Default)]
struct Tables {
    cities: BTreeMap<Id, City>,
    heroes: BTreeMap<Id, Hero>,
    teams: BTreeMap<Id, Team>,
    last_city_id: Id,
    last_hero_id: Id,
    last_team_id: Id,
}

/// In-process store with the same constraints as the PostgreSQL schema:
/// unique names (and capitals), `heroes.team_id` must reference a team,
/// and deleting a team detaches its heroes.
///
/// Sessions are serialised: each one holds the lock for its whole lifetime
/// and works on a staged copy that only replaces the shared tables on commit.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl Store for MemoryStore {
    type Session = MemorySession;

    async fn begin(&self) -> StoreResult<MemorySession> {
        let guard = self.tables.clone().lock_owned().await;
        let staged = Tables::clone(&guard);
        Ok(MemorySession { guard, staged })
    }

    async fn migrate(&self) -> StoreResult<()> {
        Ok(())
    }
}

pub struct MemorySession {
    guard: OwnedMutexGuard<Tables>,
    staged: Tables,
}

impl MemorySession {
    fn check_city_unique(&self, id: Option<Id>, name: &str, capital_city: &str) -> StoreResult<()> {
        for other in self.staged.cities.values() {
            if Some(other.id) == id {
                continue;
            }
            if other.name == name {
                return Err(StoreError::UniqueViolation("cities_name_key".to_string()));
            }
            if other.capital_city == capital_city {
                return Err(StoreError::UniqueViolation(
                    "cities_capital_city_key".to_string(),
                ));
            }
        }
        Ok(())
    }

    fn check_team_unique(&self, id: Option<Id>, name: &str) -> StoreResult<()> {
        let taken = self
            .staged
            .teams
            .values()
            .any(|other| Some(other.id) != id && other.name == name);
        if taken {
            return Err(StoreError::UniqueViolation("teams_name_key".to_string()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl CityStore for MemorySession {
    async fn get_city(&mut self, id: Id) -> StoreResult<Option<City>> {
        Ok(self.staged.cities.get(&id).cloned())
    }

    async fn list_cities(&mut self) -> StoreResult<Vec<City>> {
        Ok(self.staged.cities.values().cloned().collect())
    }

    async fn find_cities_by_name(&mut self, name: &str) -> StoreResult<Vec<City>> {
        Ok(self
            .staged
            .cities
            .values()
            .filter(|city| city.name == name)
            .cloned()
            .collect())
    }

    async fn insert_city(&mut self, city: CityCreate) -> StoreResult<City> {
        self.check_city_unique(None, &city.name, &city.capital_city)?;

        self.staged.last_city_id += 1;
        let stored = City {
            id: self.staged.last_city_id,
            name: city.name,
            capital_city: city.capital_city,
        };
        self.staged.cities.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update_city(&mut self, id: Id, patch: CityPatch) -> StoreResult<Option<City>> {
        let Some(mut city) = self.staged.cities.get(&id).cloned() else {
            return Ok(None);
        };
        city.apply(patch);
        self.check_city_unique(Some(id), &city.name, &city.capital_city)?;

        self.staged.cities.insert(id, city.clone());
        Ok(Some(city))
    }

    async fn delete_city(&mut self, id: Id) -> StoreResult<bool> {
        Ok(self.staged.cities.remove(&id).is_some())
    }
}

#[async_trait::async_trait]
impl HeroStore for MemorySession {
    async fn get_hero(&mut self, id: Id) -> StoreResult<Option<Hero>> {
        Ok(self.staged.heroes.get(&id).cloned())
    }

    async fn list_heroes(&mut self) -> StoreResult<Vec<Hero>> {
        Ok(self.staged.heroes.values().cloned().collect())
    }

    async fn find_heroes_by_name(&mut self, name: &str) -> StoreResult<Vec<Hero>> {
        Ok(self
            .staged
            .heroes
            .values()
            .filter(|hero| hero.name == name)
            .cloned()
            .collect())
    }

    async fn insert_hero(&mut self, hero: HeroCreate) -> StoreResult<Hero> {
        if self.staged.heroes.values().any(|other| other.name == hero.name) {
            return Err(StoreError::UniqueViolation("heroes_name_key".to_string()));
        }
        if let Some(team_id) = hero.team_id {
            if !self.staged.teams.contains_key(&team_id) {
                return Err(StoreError::ForeignKeyViolation(
                    "heroes_team_id_fkey".to_string(),
                ));
            }
        }

        self.staged.last_hero_id += 1;
        let stored = Hero {
            id: self.staged.last_hero_id,
            name: hero.name,
            secret_name: hero.secret_name,
            age: hero.age,
            team_id: hero.team_id,
        };
        self.staged.heroes.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn delete_hero(&mut self, id: Id) -> StoreResult<bool> {
        Ok(self.staged.heroes.remove(&id).is_some())
    }
}

#[async_trait::async_trait]
impl TeamStore for MemorySession {
    async fn get_team(&mut self, id: Id) -> StoreResult<Option<Team>> {
        Ok(self.staged.teams.get(&id).cloned())
    }

    async fn list_teams(&mut self) -> StoreResult<Vec<Team>> {
        Ok(self.staged.teams.values().cloned().collect())
    }

    async fn find_teams_by_name(&mut self, name: &str) -> StoreResult<Vec<Team>> {
        Ok(self
            .staged
            .teams
            .values()
            .filter(|team| team.name == name)
            .cloned()
            .collect())
    }

    async fn insert_team(&mut self, team: TeamCreate) -> StoreResult<Team> {
        self.check_team_unique(None, &team.name)?;

        self.staged.last_team_id += 1;
        let stored = Team {
            id: self.staged.last_team_id,
            name: team.name,
            headquarters: team.headquarters,
        };
        self.staged.teams.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update_team(&mut self, id: Id, update: TeamUpdate) -> StoreResult<Option<Team>> {
        let Some(mut team) = self.staged.teams.get(&id).cloned() else {
            return Ok(None);
        };
        team.apply(update);
        self.check_team_unique(Some(id), &team.name)?;

        self.staged.teams.insert(id, team.clone());
        Ok(Some(team))
    }

    async fn list_team_heroes(&mut self, team_id: Id) -> StoreResult<Vec<Hero>> {
        Ok(self
            .staged
            .heroes
            .values()
            .filter(|hero| hero.team_id == Some(team_id))
            .cloned()
            .collect())
    }

    async fn delete_team(&mut self, id: Id) -> StoreResult<bool> {
        if self.staged.teams.remove(&id).is_none() {
            return Ok(false);
        }
        for hero in self.staged.heroes.values_mut() {
            if hero.team_id == Some(id) {
                hero.team_id = None;
            }
        }
        Ok(true)
    }
}

#[async_trait::async_trait]
impl Session for MemorySession {
    async fn commit(self) -> StoreResult<()> {
        let MemorySession { mut guard, staged } = self;
        *guard = staged;
        Ok(())
    }
}
