use crate::model::{check_max_len, Hero, Id, Validate, ValidationError, MAX_NAME_LEN};
use serde::{Deserialize, Serialize};

/// A row of the `teams` table. Heroes point at a team through `heroes.team_id`;
/// the team itself holds no back-pointer and its members are always queried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: Id,
    pub name: String,
    pub headquarters: String,
}

impl Team {
    /// Copy the fields present in `update` onto this record, leaving the rest untouched
    pub fn apply(&mut self, update: TeamUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(headquarters) = update.headquarters {
            self.headquarters = headquarters;
        }
    }
}

/// Input model for creating a new team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamCreate {
    pub name: String,
    pub headquarters: String,
}

impl Validate for TeamCreate {
    fn validate(&self) -> Result<(), ValidationError> {
        check_max_len("name", &self.name, MAX_NAME_LEN)
    }
}

/// Body of `PUT /teams/{id}`. Declares every mutable field, but only the
/// ones the caller actually sent are written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headquarters: Option<String>,
}

impl Validate for TeamUpdate {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            check_max_len("name", name, MAX_NAME_LEN)?;
        }
        Ok(())
    }
}

/// Team together with the heroes currently assigned to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamReadWithHeroes {
    #[serde(flatten)]
    pub team: Team,
    pub heroes: Vec<Hero>,
}
