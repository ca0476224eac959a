use std::error::Error;

use async_trait::async_trait;
use directory::database::{CafeRepo, CandidateQuery, Database, Result};
use model::{cafe::Cafe, WithId};
use utility::env::{self, EnvError};

pub mod data_model;
pub mod queries;

pub struct DatabaseConnectionInfo {
    pub username: String,
    pub password: String,
    pub hostname: String,
    pub port: u16,
    pub database: String,
}

impl DatabaseConnectionInfo {
    pub fn from_env() -> std::result::Result<Self, EnvError> {
        Ok(Self {
            username: env::var("DATABASE_USER")?,
            password: env::var("DATABASE_PASSWORD")?,
            hostname: env::var("DATABASE_HOST")?,
            port: env::parse_var("DATABASE_PORT")?,
            database: env::var("DATABASE_NAME")?,
        })
    }

    pub(self) fn postgres_url(self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.hostname, self.port, self.database
        )
    }
}

#[derive(Debug, Clone)]
pub struct PgDatabase {
    connection: sqlx::PgPool,
}

pub struct PgDatabaseAutocommit {
    pool: sqlx::PgPool,
}

impl PgDatabase {
    /// Connects the pool and brings the schema up to date.
    pub async fn connect(
        database_connection_info: DatabaseConnectionInfo,
    ) -> std::result::Result<Self, Box<dyn Error>> {
        let hostname = database_connection_info.hostname.clone();
        let url = database_connection_info.postgres_url();
        let pool = sqlx::postgres::PgPool::connect(&url).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        log::info!("connected to database at {}", hostname);

        Ok(Self { connection: pool })
    }
}

impl Database for PgDatabase {
    type Autocommit = PgDatabaseAutocommit;

    fn auto(&self) -> Self::Autocommit {
        PgDatabaseAutocommit {
            pool: self.connection.clone(),
        }
    }
}

#[async_trait]
impl CafeRepo for PgDatabaseAutocommit {
    async fn find_candidates(
        &mut self,
        query: &CandidateQuery,
    ) -> Result<Vec<WithId<Cafe>>> {
        queries::cafe::find_candidates(&self.pool, query).await
    }
}
