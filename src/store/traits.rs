use crate::model::{City, CityCreate, CityPatch, Hero, HeroCreate, Id, Team, TeamCreate, TeamUpdate};
use crate::store::StoreResult;

#[async_trait::async_trait]
pub trait CityStore: Send {
    async fn get_city(&mut self, id: Id) -> StoreResult<Option<City>>;
    async fn list_cities(&mut self) -> StoreResult<Vec<City>>;
    /// Cities whose name equals `name` exactly, ordered by id
    async fn find_cities_by_name(&mut self, name: &str) -> StoreResult<Vec<City>>;
    /// Insert and return the stored row, including its generated id
    async fn insert_city(&mut self, city: CityCreate) -> StoreResult<City>;
    /// Write only the fields set in `patch`; `None` when no city has that id
    async fn update_city(&mut self, id: Id, patch: CityPatch) -> StoreResult<Option<City>>;
    async fn delete_city(&mut self, id: Id) -> StoreResult<bool>;
}

#[async_trait::async_trait]
pub trait HeroStore: Send {
    async fn get_hero(&mut self, id: Id) -> StoreResult<Option<Hero>>;
    async fn list_heroes(&mut self) -> StoreResult<Vec<Hero>>;
    /// Heroes whose name equals `name` exactly, ordered by id
    async fn find_heroes_by_name(&mut self, name: &str) -> StoreResult<Vec<Hero>>;
    /// Insert and return the stored row, including its generated id
    async fn insert_hero(&mut self, hero: HeroCreate) -> StoreResult<Hero>;
    async fn delete_hero(&mut self, id: Id) -> StoreResult<bool>;
}

#[async_trait::async_trait]
pub trait TeamStore: Send {
    async fn get_team(&mut self, id: Id) -> StoreResult<Option<Team>>;
    async fn list_teams(&mut self) -> StoreResult<Vec<Team>>;
    /// Teams whose name equals `name` exactly, ordered by id
    async fn find_teams_by_name(&mut self, name: &str) -> StoreResult<Vec<Team>>;
    /// Insert and return the stored row, including its generated id
    async fn insert_team(&mut self, team: TeamCreate) -> StoreResult<Team>;
    /// Write only the fields set in `update`; `None` when no team has that id
    async fn update_team(&mut self, id: Id, update: TeamUpdate) -> StoreResult<Option<Team>>;
    /// Heroes that reference `team_id`, ordered by id
    async fn list_team_heroes(&mut self, team_id: Id) -> StoreResult<Vec<Hero>>;
    /// Remove the team; heroes that referenced it are left without a team
    async fn delete_team(&mut self, id: Id) -> StoreResult<bool>;
}

/// One transactional scope. Nothing is persisted until [`Session::commit`];
/// dropping the session discards every pending change.
#[async_trait::async_trait]
pub trait Session: CityStore + HeroStore + TeamStore + Send {
    async fn commit(self) -> StoreResult<()>;
}

#[async_trait::async_trait]
pub trait Store: Send + Sync + 'static {
    type Session: Session + 'static;

    /// Open a new transactional scope
    async fn begin(&self) -> StoreResult<Self::Session>;

    /// Create every table and index that does not exist yet
    async fn migrate(&self) -> StoreResult<()>;
}
