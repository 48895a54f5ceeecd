pub mod companies;
pub mod health;
pub mod jobs;

pub use companies::{
    create_company_handler, delete_company_handler, find_company_by_name_handler,
    get_company_handler, list_companies_handler, update_company_handler, CompanyListState,
};
pub use health::{health_handler, readiness_handler};
pub use jobs::{
    create_job_handler, delete_job_handler, get_job_handler, list_jobs_handler,
    update_job_handler, JobListState,
};
