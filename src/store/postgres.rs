use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, postgres::PgRow, PgPool, Postgres, Row, Transaction};

use crate::model::{City, CityCreate, CityPatch, Hero, HeroCreate, Id, Team, TeamCreate, TeamUpdate};
use crate::store::traits::{CityStore, HeroStore, Session, Store, TeamStore};
use crate::store::{StoreError, StoreResult};

/// Idempotent schema, executed statement by statement at startup.
/// `teams` comes first because `heroes.team_id` references it.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS teams (
        id SERIAL PRIMARY KEY,
        name VARCHAR(50) NOT NULL UNIQUE,
        headquarters TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS cities (
        id SERIAL PRIMARY KEY,
        name VARCHAR(50) NOT NULL UNIQUE,
        capital_city VARCHAR(50) NOT NULL UNIQUE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS heroes (
        id SERIAL PRIMARY KEY,
        name VARCHAR(50) NOT NULL UNIQUE,
        secret_name TEXT NOT NULL,
        age INTEGER,
        team_id INTEGER REFERENCES teams (id) ON DELETE SET NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS ix_heroes_secret_name ON heroes (secret_name)",
    "CREATE INDEX IF NOT EXISTS ix_heroes_age ON heroes (age)",
    "CREATE INDEX IF NOT EXISTS ix_heroes_team_id ON heroes (team_id)",
];

#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new PostgreSQL store with the given database URL
    pub async fn new(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("Failed to create PostgreSQL connection pool")?;

        Ok(Self { pool })
    }
}

#[async_trait::async_trait]
impl Store for PostgresStore {
    type Session = PgSession;

    async fn begin(&self) -> StoreResult<PgSession> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::from_sqlx(e, "Failed to begin transaction"))?;
        Ok(PgSession { tx })
    }

    async fn migrate(&self) -> StoreResult<()> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| StoreError::from_sqlx(e, "Failed to initialize schema"))?;
        }
        log::info!("Schema ready: teams, cities, heroes");
        Ok(())
    }
}

/// A request-scoped transaction. Dropping it without committing rolls back.
pub struct PgSession {
    tx: Transaction<'static, Postgres>,
}

fn city_from_row(row: &PgRow) -> City {
    City {
        id: row.get("id"),
        name: row.get("name"),
        capital_city: row.get("capital_city"),
    }
}

fn hero_from_row(row: &PgRow) -> Hero {
    Hero {
        id: row.get("id"),
        name: row.get("name"),
        secret_name: row.get("secret_name"),
        age: row.get("age"),
        team_id: row.get("team_id"),
    }
}

fn team_from_row(row: &PgRow) -> Team {
    Team {
        id: row.get("id"),
        name: row.get("name"),
        headquarters: row.get("headquarters"),
    }
}

#[async_trait::async_trait]
impl CityStore for PgSession {
    async fn get_city(&mut self, id: Id) -> StoreResult<Option<City>> {
        let row = sqlx::query("SELECT id, name, capital_city FROM cities WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| StoreError::from_sqlx(e, "Failed to fetch city"))?;

        Ok(row.as_ref().map(city_from_row))
    }

    async fn list_cities(&mut self) -> StoreResult<Vec<City>> {
        let rows = sqlx::query("SELECT id, name, capital_city FROM cities ORDER BY id")
            .fetch_all(&mut *self.tx)
            .await
            .map_err(|e| StoreError::from_sqlx(e, "Failed to list cities"))?;

        Ok(rows.iter().map(city_from_row).collect())
    }

    async fn find_cities_by_name(&mut self, name: &str) -> StoreResult<Vec<City>> {
        let rows =
            sqlx::query("SELECT id, name, capital_city FROM cities WHERE name = $1 ORDER BY id")
                .bind(name)
                .fetch_all(&mut *self.tx)
                .await
                .map_err(|e| StoreError::from_sqlx(e, "Failed to search cities"))?;

        Ok(rows.iter().map(city_from_row).collect())
    }

    async fn insert_city(&mut self, city: CityCreate) -> StoreResult<City> {
        let row = sqlx::query(
            "INSERT INTO cities (name, capital_city) VALUES ($1, $2) RETURNING id, name, capital_city",
        )
        .bind(&city.name)
        .bind(&city.capital_city)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| StoreError::from_sqlx(e, "Failed to insert city"))?;

        Ok(city_from_row(&row))
    }

    async fn update_city(&mut self, id: Id, patch: CityPatch) -> StoreResult<Option<City>> {
        // Unset fields keep the column value current at write time
        let row = sqlx::query(
            r#"
            UPDATE cities
            SET name = COALESCE($2, name), capital_city = COALESCE($3, capital_city)
            WHERE id = $1
            RETURNING id, name, capital_city
            "#,
        )
        .bind(id)
        .bind(patch.name)
        .bind(patch.capital_city)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| StoreError::from_sqlx(e, "Failed to update city"))?;

        Ok(row.as_ref().map(city_from_row))
    }

    async fn delete_city(&mut self, id: Id) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM cities WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| StoreError::from_sqlx(e, "Failed to delete city"))?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait::async_trait]
impl HeroStore for PgSession {
    async fn get_hero(&mut self, id: Id) -> StoreResult<Option<Hero>> {
        let row = sqlx::query(
            "SELECT id, name, secret_name, age, team_id FROM heroes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| StoreError::from_sqlx(e, "Failed to fetch hero"))?;

        Ok(row.as_ref().map(hero_from_row))
    }

    async fn list_heroes(&mut self) -> StoreResult<Vec<Hero>> {
        let rows = sqlx::query("SELECT id, name, secret_name, age, team_id FROM heroes ORDER BY id")
            .fetch_all(&mut *self.tx)
            .await
            .map_err(|e| StoreError::from_sqlx(e, "Failed to list heroes"))?;

        Ok(rows.iter().map(hero_from_row).collect())
    }

    async fn find_heroes_by_name(&mut self, name: &str) -> StoreResult<Vec<Hero>> {
        let rows = sqlx::query(
            "SELECT id, name, secret_name, age, team_id FROM heroes WHERE name = $1 ORDER BY id",
        )
        .bind(name)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(|e| StoreError::from_sqlx(e, "Failed to search heroes"))?;

        Ok(rows.iter().map(hero_from_row).collect())
    }

    async fn insert_hero(&mut self, hero: HeroCreate) -> StoreResult<Hero> {
        let row = sqlx::query(
            r#"
            INSERT INTO heroes (name, secret_name, age, team_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, secret_name, age, team_id
            "#,
        )
        .bind(&hero.name)
        .bind(&hero.secret_name)
        .bind(hero.age)
        .bind(hero.team_id)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| StoreError::from_sqlx(e, "Failed to insert hero"))?;

        Ok(hero_from_row(&row))
    }

    async fn delete_hero(&mut self, id: Id) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM heroes WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| StoreError::from_sqlx(e, "Failed to delete hero"))?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait::async_trait]
impl TeamStore for PgSession {
    async fn get_team(&mut self, id: Id) -> StoreResult<Option<Team>> {
        let row = sqlx::query("SELECT id, name, headquarters FROM teams WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| StoreError::from_sqlx(e, "Failed to fetch team"))?;

        Ok(row.as_ref().map(team_from_row))
    }

    async fn list_teams(&mut self) -> StoreResult<Vec<Team>> {
        let rows = sqlx::query("SELECT id, name, headquarters FROM teams ORDER BY id")
            .fetch_all(&mut *self.tx)
            .await
            .map_err(|e| StoreError::from_sqlx(e, "Failed to list teams"))?;

        Ok(rows.iter().map(team_from_row).collect())
    }

    async fn find_teams_by_name(&mut self, name: &str) -> StoreResult<Vec<Team>> {
        let rows =
            sqlx::query("SELECT id, name, headquarters FROM teams WHERE name = $1 ORDER BY id")
                .bind(name)
                .fetch_all(&mut *self.tx)
                .await
                .map_err(|e| StoreError::from_sqlx(e, "Failed to search teams"))?;

        Ok(rows.iter().map(team_from_row).collect())
    }

    async fn insert_team(&mut self, team: TeamCreate) -> StoreResult<Team> {
        let row = sqlx::query(
            "INSERT INTO teams (name, headquarters) VALUES ($1, $2) RETURNING id, name, headquarters",
        )
        .bind(&team.name)
        .bind(&team.headquarters)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| StoreError::from_sqlx(e, "Failed to insert team"))?;

        Ok(team_from_row(&row))
    }

    async fn update_team(&mut self, id: Id, update: TeamUpdate) -> StoreResult<Option<Team>> {
        let row = sqlx::query(
            r#"
            UPDATE teams
            SET name = COALESCE($2, name), headquarters = COALESCE($3, headquarters)
            WHERE id = $1
            RETURNING id, name, headquarters
            "#,
        )
        .bind(id)
        .bind(update.name)
        .bind(update.headquarters)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| StoreError::from_sqlx(e, "Failed to update team"))?;

        Ok(row.as_ref().map(team_from_row))
    }

    async fn list_team_heroes(&mut self, team_id: Id) -> StoreResult<Vec<Hero>> {
        let rows = sqlx::query(
            "SELECT id, name, secret_name, age, team_id FROM heroes WHERE team_id = $1 ORDER BY id",
        )
        .bind(team_id)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(|e| StoreError::from_sqlx(e, "Failed to list team heroes"))?;

        Ok(rows.iter().map(hero_from_row).collect())
    }

    async fn delete_team(&mut self, id: Id) -> StoreResult<bool> {
        // heroes.team_id is ON DELETE SET NULL
        let result = sqlx::query("DELETE FROM teams WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| StoreError::from_sqlx(e, "Failed to delete team"))?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait::async_trait]
impl Session for PgSession {
    async fn commit(self) -> StoreResult<()> {
        self.tx
            .commit()
            .await
            .map_err(|e| StoreError::from_sqlx(e, "Failed to commit transaction"))
    }
}
