use crate::model::{check_max_len, Id, Validate, ValidationError, MAX_NAME_LEN};
use serde::{Deserialize, Serialize};

/// A row of the `cities` table. Both `name` and `capital_city` are unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: Id,
    pub name: String,
    pub capital_city: String,
}

impl City {
    /// Copy the fields present in `patch` onto this record, leaving the rest untouched
    pub fn apply(&mut self, patch: CityPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(capital_city) = patch.capital_city {
            self.capital_city = capital_city;
        }
    }
}

/// Input model for creating a new city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityCreate {
    pub name: String,
    pub capital_city: String,
}

impl Validate for CityCreate {
    fn validate(&self) -> Result<(), ValidationError> {
        check_max_len("name", &self.name, MAX_NAME_LEN)?;
        check_max_len("capital_city", &self.capital_city, MAX_NAME_LEN)
    }
}

/// Body of `PATCH /cities/{id}/name`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityPatchName {
    pub name: String,
}

/// Body of `PATCH /cities/{id}/capital`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityPatchCapital {
    pub capital_city: String,
}

/// Partial city mutation; `None` fields are left as stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CityPatch {
    pub name: Option<String>,
    pub capital_city: Option<String>,
}

impl Validate for CityPatch {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            check_max_len("name", name, MAX_NAME_LEN)?;
        }
        if let Some(capital_city) = &self.capital_city {
            check_max_len("capital_city", capital_city, MAX_NAME_LEN)?;
        }
        Ok(())
    }
}

impl From<CityPatchName> for CityPatch {
    fn from(patch: CityPatchName) -> Self {
        Self {
            name: Some(patch.name),
            capital_city: None,
        }
    }
}

impl From<CityPatchCapital> for CityPatch {
    fn from(patch: CityPatchCapital) -> Self {
        Self {
            name: None,
            capital_city: Some(patch.capital_city),
        }
    }
}
