use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{info, warn};

use crate::api::middleware::auth::TokenService;
use crate::api::router::AppState;
use crate::application::{
    ports::{CompanyRepository, JobRepository},
    use_cases::{
        CreateCompanyUseCase, CreateJobUseCase, DeleteCompanyUseCase, DeleteJobUseCase,
        FindCompanyByNameUseCase, GetCompanyUseCase, GetJobByTitleUseCase, ListCompaniesUseCase,
        ListJobsUseCase, SearchCompaniesUseCase, SearchJobsUseCase, UpdateCompanyUseCase,
        UpdateJobUseCase,
    },
};
use crate::config::Config;
use crate::infrastructure::persistence::{PostgresCompanyRepository, PostgresJobRepository};

/// Connection attempts before startup gives up
const CONNECT_ATTEMPTS: u32 = 4;

/// Wires config, the store pool and both repositories into [`AppState`].
///
/// Production startup goes `with_database` then `with_infrastructure`; tests
/// hand in their own pool and repositories through `with_parts`.
pub struct ApplicationBuilder {
    config: Config,
    pool: Option<PgPool>,
    company_repo: Option<Arc<dyn CompanyRepository>>,
    job_repo: Option<Arc<dyn JobRepository>>,
}

impl ApplicationBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            pool: None,
            company_repo: None,
            job_repo: None,
        }
    }

    fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.config.db_max_connections)
            .min_connections(self.config.db_min_connections)
            .acquire_timeout(Duration::from_secs(self.config.db_acquire_timeout_secs))
            .idle_timeout(Some(Duration::from_secs(self.config.db_idle_timeout_secs)))
            .max_lifetime(Some(Duration::from_secs(self.config.db_max_lifetime_secs)))
    }

    /// Connect with exponential backoff, doubling from one second
    async fn connect_with_retry(&self) -> Result<PgPool, sqlx::Error> {
        let mut backoff = Duration::from_secs(1);
        let mut attempt = 1;

        loop {
            match self.pool_options().connect(&self.config.database_url).await {
                Ok(pool) => return Ok(pool),
                Err(e) if attempt < CONNECT_ATTEMPTS => {
                    warn!(
                        attempt,
                        max_attempts = CONNECT_ATTEMPTS,
                        error = %e,
                        "Store unreachable, retrying in {:?}",
                        backoff
                    );
                    tokio::time::sleep(backoff).await;
                    backoff *= 2;
                    attempt += 1;
                }
                Err(e) => {
                    tracing::error!(attempts = attempt, error = %e, "Giving up on the store");
                    return Err(e);
                }
            }
        }
    }

    /// Connect to PostgreSQL and bring the schema up to date
    pub async fn with_database(mut self) -> Result<Self, Box<dyn std::error::Error>> {
        info!(
            max = self.config.db_max_connections,
            min = self.config.db_min_connections,
            "Connecting to the store"
        );
        let pool = self.connect_with_retry().await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("Migrations applied");

        self.pool = Some(pool);
        Ok(self)
    }

    /// PostgreSQL-backed repositories over the connected pool
    pub fn with_infrastructure(mut self) -> Result<Self, Box<dyn std::error::Error>> {
        let pool = self
            .pool
            .clone()
            .ok_or("with_database must run before with_infrastructure")?;

        self.company_repo = Some(Arc::new(PostgresCompanyRepository::new(pool.clone())));
        self.job_repo = Some(Arc::new(PostgresJobRepository::new(pool)));
        Ok(self)
    }

    /// Use an existing pool and repositories; no connection or migration happens
    pub fn with_parts(
        mut self,
        pool: PgPool,
        company_repo: Arc<dyn CompanyRepository>,
        job_repo: Arc<dyn JobRepository>,
    ) -> Self {
        self.pool = Some(pool);
        self.company_repo = Some(company_repo);
        self.job_repo = Some(job_repo);
        self
    }

    pub fn build(self) -> Result<AppState, Box<dyn std::error::Error>> {
        let (Some(pool), Some(companies), Some(jobs)) =
            (self.pool, self.company_repo, self.job_repo)
        else {
            return Err("pool and repositories must be set before build".into());
        };

        let tokens = TokenService::new(&self.config.secret_key, self.config.token_ttl_secs);

        let state = AppState {
            pool: Arc::new(pool),
            tokens,
            create_company_use_case: Arc::new(CreateCompanyUseCase::new(companies.clone())),
            list_companies_use_case: Arc::new(ListCompaniesUseCase::new(companies.clone())),
            get_company_use_case: Arc::new(GetCompanyUseCase::new(companies.clone())),
            find_company_by_name_use_case: Arc::new(FindCompanyByNameUseCase::new(
                companies.clone(),
            )),
            update_company_use_case: Arc::new(UpdateCompanyUseCase::new(companies.clone())),
            delete_company_use_case: Arc::new(DeleteCompanyUseCase::new(companies.clone())),
            search_companies_use_case: Arc::new(SearchCompaniesUseCase::new(companies)),
            create_job_use_case: Arc::new(CreateJobUseCase::new(jobs.clone())),
            list_jobs_use_case: Arc::new(ListJobsUseCase::new(jobs.clone())),
            get_job_use_case: Arc::new(GetJobByTitleUseCase::new(jobs.clone())),
            update_job_use_case: Arc::new(UpdateJobUseCase::new(jobs.clone())),
            delete_job_use_case: Arc::new(DeleteJobUseCase::new(jobs.clone())),
            search_jobs_use_case: Arc::new(SearchJobsUseCase::new(jobs)),
            config: self.config,
        };

        info!("Application state built");
        Ok(state)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
