//! Shared test fixtures: in-memory repositories that follow the PostgreSQL
//! repositories' semantics, and a router built on top of them.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::Router;
use sqlx::postgres::PgPoolOptions;

use jobly::{
    api::create_router,
    application::{
        dto::{CompanyFilter, JobFilter, UpdateCompanyRequest, UpdateJobRequest},
        errors::QueryError,
        ports::{CompanyRepository, JobRepository, RepositoryError},
    },
    entities::{Company, Job, NewJob},
    ApplicationBuilder, Config,
};

#[derive(Default)]
pub struct Store {
    pub companies: Vec<Company>,
    pub jobs: Vec<Job>,
    next_job_id: i32,
}

pub type SharedStore = Arc<Mutex<Store>>;

pub struct InMemoryCompanyRepository {
    store: SharedStore,
}

pub struct InMemoryJobRepository {
    store: SharedStore,
}

fn equity_value(equity: &Option<String>) -> f64 {
    equity
        .as_deref()
        .and_then(|e| e.parse().ok())
        .unwrap_or_default()
}

#[async_trait]
impl CompanyRepository for InMemoryCompanyRepository {
    async fn insert(&self, company: &Company) -> Result<Option<Company>, RepositoryError> {
        let mut store = self.store.lock().unwrap();
        if store.companies.iter().any(|c| c.handle == company.handle) {
            return Ok(None);
        }
        store.companies.push(company.clone());
        Ok(Some(company.clone()))
    }

    async fn find_all(&self) -> Result<Vec<Company>, RepositoryError> {
        let store = self.store.lock().unwrap();
        let mut companies = store.companies.clone();
        companies.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(companies)
    }

    async fn find_by_handle(&self, handle: &str) -> Result<Option<Company>, RepositoryError> {
        let store = self.store.lock().unwrap();
        Ok(store.companies.iter().find(|c| c.handle == handle).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Company>, RepositoryError> {
        let store = self.store.lock().unwrap();
        let mut matches: Vec<_> = store
            .companies
            .iter()
            .filter(|c| c.name.to_lowercase() == name.to_lowercase())
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.handle.cmp(&b.handle));
        Ok(matches.into_iter().next())
    }

    async fn find_jobs(&self, handle: &str) -> Result<Vec<Job>, RepositoryError> {
        let store = self.store.lock().unwrap();
        let mut jobs: Vec<_> = store
            .jobs
            .iter()
            .filter(|j| j.company_handle == handle)
            .cloned()
            .collect();
        jobs.sort_by_key(|j| j.id);
        Ok(jobs)
    }

    async fn update(
        &self,
        handle: &str,
        patch: &UpdateCompanyRequest,
    ) -> Result<Option<Company>, RepositoryError> {
        if patch.is_empty() {
            return Err(QueryError::NoFieldsProvided.into());
        }

        let mut store = self.store.lock().unwrap();
        let Some(company) = store.companies.iter_mut().find(|c| c.handle == handle) else {
            return Ok(None);
        };

        if let Some(name) = &patch.name {
            company.name = name.clone();
        }
        if let Some(description) = &patch.description {
            company.description = description.clone();
        }
        if let Some(num_employees) = patch.num_employees {
            company.num_employees = Some(num_employees);
        }
        if let Some(logo_url) = &patch.logo_url {
            company.logo_url = Some(logo_url.clone());
        }
        Ok(Some(company.clone()))
    }

    async fn delete(&self, handle: &str) -> Result<bool, RepositoryError> {
        let mut store = self.store.lock().unwrap();
        let before = store.companies.len();
        store.companies.retain(|c| c.handle != handle);
        let deleted = store.companies.len() < before;
        if deleted {
            store.jobs.retain(|j| j.company_handle != handle);
        }
        Ok(deleted)
    }

    async fn filter(&self, filter: &CompanyFilter) -> Result<Vec<Company>, RepositoryError> {
        filter.check_range()?;

        let store = self.store.lock().unwrap();
        let mut companies: Vec<_> = store
            .companies
            .iter()
            .filter(|c| match filter.min {
                Some(min) => c.num_employees.is_some_and(|n| n >= min),
                None => true,
            })
            .filter(|c| match filter.max {
                Some(max) => c.num_employees.is_some_and(|n| n <= max),
                None => true,
            })
            .filter(|c| match &filter.name {
                Some(prefix) => c.name.to_lowercase().starts_with(&prefix.to_lowercase()),
                None => true,
            })
            .cloned()
            .collect();

        if filter.name.is_some() {
            companies.sort_by(|a, b| a.name.cmp(&b.name));
        } else {
            // NULLs last, as in an ascending SQL sort
            companies.sort_by_key(|c| (c.num_employees.is_none(), c.num_employees));
        }
        Ok(companies)
    }
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    async fn insert(&self, job: &NewJob) -> Result<Option<Job>, RepositoryError> {
        let mut store = self.store.lock().unwrap();
        if !store
            .companies
            .iter()
            .any(|c| c.handle == job.company_handle())
        {
            return Err(RepositoryError::MissingReference(
                "jobs_company_handle_fkey".to_string(),
            ));
        }
        if store
            .jobs
            .iter()
            .any(|j| j.title == job.title() && j.company_handle == job.company_handle())
        {
            return Ok(None);
        }

        store.next_job_id += 1;
        let created = Job {
            id: store.next_job_id,
            title: job.title().to_string(),
            salary: job.salary(),
            equity: job.equity().map(|e| e.to_string()),
            company_handle: job.company_handle().to_string(),
        };
        store.jobs.push(created.clone());
        Ok(Some(created))
    }

    async fn find_all(&self) -> Result<Vec<Job>, RepositoryError> {
        let store = self.store.lock().unwrap();
        let mut jobs = store.jobs.clone();
        jobs.sort_by_key(|j| j.id);
        Ok(jobs)
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Job>, RepositoryError> {
        let store = self.store.lock().unwrap();
        Ok(store
            .jobs
            .iter()
            .filter(|j| j.title == title)
            .min_by_key(|j| j.id)
            .cloned())
    }

    async fn update(
        &self,
        id: i32,
        patch: &UpdateJobRequest,
    ) -> Result<Option<Job>, RepositoryError> {
        if patch.is_empty() {
            return Err(QueryError::NoFieldsProvided.into());
        }

        let mut store = self.store.lock().unwrap();
        let Some(handle) = store
            .jobs
            .iter()
            .find(|j| j.id == id)
            .map(|j| j.company_handle.clone())
        else {
            return Ok(None);
        };

        if let Some(title) = &patch.title {
            if store
                .jobs
                .iter()
                .any(|j| j.id != id && &j.title == title && j.company_handle == handle)
            {
                return Err(RepositoryError::Conflict(
                    "jobs_title_company_handle_key".to_string(),
                ));
            }
        }

        let job = store
            .jobs
            .iter_mut()
            .find(|j| j.id == id)
            .expect("job located above");
        if let Some(title) = &patch.title {
            job.title = title.clone();
        }
        if let Some(salary) = patch.salary {
            job.salary = salary;
        }
        if let Some(equity) = &patch.equity {
            job.equity = equity.as_ref().map(|e| e.to_string());
        }
        Ok(Some(job.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, RepositoryError> {
        let mut store = self.store.lock().unwrap();
        let before = store.jobs.len();
        store.jobs.retain(|j| j.id != id);
        Ok(store.jobs.len() < before)
    }

    async fn filter(&self, filter: &JobFilter) -> Result<Vec<Job>, RepositoryError> {
        filter.check_not_empty()?;

        let store = self.store.lock().unwrap();
        let mut jobs: Vec<_> = store
            .jobs
            .iter()
            .filter(|j| match &filter.title {
                Some(title) => j.title.to_lowercase().contains(&title.to_lowercase()),
                None => true,
            })
            .filter(|j| match filter.min_salary {
                Some(min) => j.salary.is_some_and(|s| s >= min),
                None => true,
            })
            .filter(|j| filter.has_equity != Some(true) || equity_value(&j.equity) > 0.0)
            .cloned()
            .collect();
        jobs.sort_by_key(|j| j.id);
        Ok(jobs)
    }
}

/// Three companies `c1..c3` and three jobs `j1..j3` posted by `c1`
pub fn seeded_store() -> SharedStore {
    let mut store = Store::default();
    for (n, logo) in [(1, Some("http://c1.img")), (2, Some("http://c2.img")), (3, None)] {
        store.companies.push(Company {
            handle: format!("c{}", n),
            name: format!("C{}", n),
            description: format!("Desc{}", n),
            num_employees: Some(n),
            logo_url: logo.map(str::to_string),
        });
    }
    for (n, salary, equity) in [
        (1, Some(100), Some("0.1")),
        (2, Some(200), Some("0.2")),
        (3, Some(300), Some("0")),
    ] {
        store.next_job_id += 1;
        store.jobs.push(Job {
            id: store.next_job_id,
            title: format!("j{}", n),
            salary,
            equity: equity.map(str::to_string),
            company_handle: "c1".to_string(),
        });
    }
    Arc::new(Mutex::new(store))
}

pub struct TestApp {
    pub router: Router,
    pub store: SharedStore,
    pub admin_token: String,
    pub user_token: String,
}

/// Router over the seeded in-memory store. The pool is lazy and never used.
pub fn test_app() -> TestApp {
    let store = seeded_store();
    let config = Config::default();
    let pool = PgPoolOptions::new()
        .connect_lazy(&config.database_url)
        .expect("lazy pool");

    let state = ApplicationBuilder::new(config)
        .with_parts(
            pool,
            Arc::new(InMemoryCompanyRepository {
                store: Arc::clone(&store),
            }),
            Arc::new(InMemoryJobRepository {
                store: Arc::clone(&store),
            }),
        )
        .build()
        .expect("state");

    let admin_token = state.tokens.issue("u1", true).expect("admin token");
    let user_token = state.tokens.issue("u2", false).expect("user token");

    TestApp {
        router: create_router(state),
        store,
        admin_token,
        user_token,
    }
}

pub fn request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    match body {
        Some(data) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&data).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
