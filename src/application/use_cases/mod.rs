mod companies;
mod jobs;

pub use companies::{
    CreateCompanyUseCase, DeleteCompanyUseCase, FindCompanyByNameUseCase, GetCompanyUseCase,
    ListCompaniesUseCase, SearchCompaniesUseCase, UpdateCompanyUseCase,
};
pub use jobs::{
    CreateJobUseCase, DeleteJobUseCase, GetJobByTitleUseCase, ListJobsUseCase, SearchJobsUseCase,
    UpdateJobUseCase,
};
