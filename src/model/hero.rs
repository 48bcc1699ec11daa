use crate::model::{check_max_len, Id, Team, Validate, ValidationError, MAX_NAME_LEN};
use serde::{Deserialize, Serialize};

fn default_age() -> Option<i32> {
    Some(1)
}

/// A row of the `heroes` table. `team_id` is a nullable foreign key into `teams`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub id: Id,
    pub name: String,
    pub secret_name: String,
    pub age: Option<i32>,
    pub team_id: Option<Id>,
}

/// Input model for creating a new hero
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroCreate {
    pub name: String,
    pub secret_name: String,
    /// Omitted means 1; an explicit `null` is kept as no age.
    #[serde(default = "default_age")]
    pub age: Option<i32>,
    #[serde(default)]
    pub team_id: Option<Id>,
}

impl Validate for HeroCreate {
    fn validate(&self) -> Result<(), ValidationError> {
        check_max_len("name", &self.name, MAX_NAME_LEN)
    }
}

/// Hero with its team resolved, `team` is `None` for unassigned heroes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroReadWithTeam {
    #[serde(flatten)]
    pub hero: Hero,
    pub team: Option<Team>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HeroResponse {
    Plain(Hero),
    WithTeam(HeroReadWithTeam),
}
