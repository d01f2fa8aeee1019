//! HTTP client for the 10,000ft API.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{
    config::{max_retries_from_env, Environment, RetryPolicy, AUTH_HEADER},
    errors::PaginationError,
    fetch::{Fetcher, RequestSpec, ResponseOutcome},
    paginate::{fetch_all, ASSIGNMENT_PAGE, LARGE_PAGE, REFERENCE_PAGE},
    query::ListOptions,
    types::{
        absorb, Assignment, BillRate, Collection, LeaveType, Phase, PlaceholderResource, Project,
        ProjectID, Role, User, UserID, Writable,
    },
    Error,
};

/// HTTP client for the 10,000ft API.
///
/// Every request carries the account token in the `auth` header and is
/// retried up to `max_retries` times on a non-success response. Settings are
/// fixed once the client is built.
#[derive(Clone, Debug)]
pub struct Client {
    base_api_url: String,
    token: String,
    max_retries: u32,
    fetcher: Fetcher,
}

impl Client {
    /// Creates a client for `env`.
    ///
    /// The retry budget comes from `TENKFT_MAX_RETRIES` (default 0) and the
    /// backoff from `TENKFT_RATE_LIMIT_BACKOFF_SECS` / `TENKFT_ERROR_BACKOFF_SECS`.
    pub fn new(token: &str, env: Environment) -> Result<Self, Error> {
        Ok(Self {
            base_api_url: env.base_url().to_string(),
            token: token.to_string(),
            max_retries: max_retries_from_env(),
            fetcher: Fetcher::new(RetryPolicy::from_env())?,
        })
    }

    /// Creates a client with a custom base URL. Used for testing with wiremock.
    ///
    /// Starts with no retries and the default backoff.
    pub fn with_base_url(base_url: &str, token: &str) -> Result<Self, Error> {
        let base_api_url = base_url.trim_end_matches('/');
        if base_api_url.is_empty() {
            return Err(Error::Config("base URL cannot be empty".to_string()));
        }
        url::Url::parse(base_api_url)
            .map_err(|e| Error::Config(format!("invalid base URL {:?}: {}", base_url, e)))?;
        Ok(Self {
            base_api_url: base_api_url.to_string(),
            token: token.to_string(),
            max_retries: 0,
            fetcher: Fetcher::new(RetryPolicy::default())?,
        })
    }

    /// Sets how many times a failed request is re-sent.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.fetcher = self.fetcher.with_policy(policy);
        self
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        opts: Option<&ListOptions>,
    ) -> Result<RequestSpec, Error> {
        let url = format!("{}{}", self.base_api_url, path);
        let url = match opts {
            Some(opts) => opts.add_to_url(&url),
            None => url,
        };
        Ok(RequestSpec::new(method, &url)?
            .with_header(AUTH_HEADER, &self.token)
            .with_max_retries(self.max_retries))
    }

    async fn send(&self, spec: &RequestSpec) -> Result<ResponseOutcome, Error> {
        self.fetcher.execute(spec).await
    }

    async fn get<T>(&self, path: &str, opts: &ListOptions) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let spec = self.request(Method::GET, path, Some(opts))?;
        self.send(&spec).await?.json()
    }

    /// Sends the write view of `entity` and merges the echoed record back into it.
    async fn write<E>(&self, method: Method, path: &str, entity: &mut E) -> Result<(), Error>
    where
        E: Writable + Serialize + DeserializeOwned,
    {
        let body = serde_json::to_string(&entity.write_view()).map_err(Error::Encode)?;
        let spec = self.request(method, path, None)?.with_body(body);
        let echoed = self.send(&spec).await?.json()?;
        absorb(entity, echoed)
    }

    // -- Projects --

    /// Fetches one page of projects.
    pub async fn get_projects(&self, opts: &ListOptions) -> Result<Collection<Project>, Error> {
        self.get("/projects", opts).await
    }

    /// Fetches every project, following pagination.
    pub async fn get_all_projects(
        &self,
        opts: &ListOptions,
    ) -> Result<Collection<Project>, PaginationError<Project>> {
        fetch_all(opts, LARGE_PAGE, |page| async move {
            self.get_projects(&page).await
        })
        .await
    }

    /// Fetches a single project by ID.
    pub async fn get_project(&self, id: ProjectID, opts: &ListOptions) -> Result<Project, Error> {
        self.get(&format!("/projects/{}", id), opts).await
    }

    /// Creates `project`, filling in its server-assigned fields.
    pub async fn create_project(&self, project: &mut Project) -> Result<(), Error> {
        self.write(Method::POST, "/projects", project).await
    }

    /// Sends the writable fields of `project` and refreshes it from the response.
    pub async fn update_project(&self, project: &mut Project) -> Result<(), Error> {
        let path = format!("/projects/{}", project.id);
        self.write(Method::PUT, &path, project).await
    }

    /// Archives `project`. The API has no hard delete.
    pub async fn delete_project(&self, project: &mut Project) -> Result<(), Error> {
        project.archived = true;
        self.update_project(project).await
    }

    /// Creates each of the project's tags, one request per tag.
    ///
    /// Stops at the first failure; tags created before it stay created.
    pub async fn create_project_tags(&self, project: &mut Project) -> Result<(), Error> {
        let path = format!("/projects/{}/tags", project.id);
        for tag in project.tags.data.iter_mut() {
            self.write(Method::POST, &path, tag).await?;
        }
        Ok(())
    }

    pub async fn get_project_users(
        &self,
        project_id: ProjectID,
        opts: &ListOptions,
    ) -> Result<Collection<User>, Error> {
        self.get(&format!("/projects/{}/users", project_id), opts)
            .await
    }

    pub async fn get_project_assignments(
        &self,
        project_id: ProjectID,
        opts: &ListOptions,
    ) -> Result<Collection<Assignment>, Error> {
        self.get(&format!("/projects/{}/assignments", project_id), opts)
            .await
    }

    pub async fn get_project_phases(
        &self,
        project_id: ProjectID,
        opts: &ListOptions,
    ) -> Result<Collection<Phase>, Error> {
        self.get(&format!("/projects/{}/phases", project_id), opts)
            .await
    }

    /// Creates `phase` under the given project.
    pub async fn create_project_phase(
        &self,
        project_id: ProjectID,
        phase: &mut Phase,
    ) -> Result<(), Error> {
        let path = format!("/projects/{}/phases", project_id);
        self.write(Method::POST, &path, phase).await
    }

    pub async fn get_project_bill_rates(
        &self,
        project_id: ProjectID,
        opts: &ListOptions,
    ) -> Result<Collection<BillRate>, Error> {
        self.get(&format!("/projects/{}/bill_rates", project_id), opts)
            .await
    }

    pub async fn get_all_project_bill_rates(
        &self,
        project_id: ProjectID,
        opts: &ListOptions,
    ) -> Result<Collection<BillRate>, PaginationError<BillRate>> {
        fetch_all(opts, REFERENCE_PAGE, |page| async move {
            self.get_project_bill_rates(project_id, &page).await
        })
        .await
    }

    // -- Users --

    /// Fetches one page of users.
    pub async fn get_users(&self, opts: &ListOptions) -> Result<Collection<User>, Error> {
        self.get("/users", opts).await
    }

    /// Fetches every user, following pagination.
    pub async fn get_all_users(
        &self,
        opts: &ListOptions,
    ) -> Result<Collection<User>, PaginationError<User>> {
        fetch_all(opts, LARGE_PAGE, |page| async move { self.get_users(&page).await }).await
    }

    /// Refreshes `user` in place from `/users/<id>`.
    pub async fn get_user(&self, user: &mut User, opts: &ListOptions) -> Result<(), Error> {
        let echoed = self
            .get::<serde_json::Value>(&format!("/users/{}", user.id), opts)
            .await?;
        absorb(user, echoed)
    }

    pub async fn create_user(&self, user: &mut User) -> Result<(), Error> {
        self.write(Method::POST, "/users", user).await
    }

    pub async fn update_user(&self, user: &mut User) -> Result<(), Error> {
        let path = format!("/users/{}", user.id);
        self.write(Method::PUT, &path, user).await
    }

    /// Archives `user`. The API has no hard delete.
    pub async fn delete_user(&self, user: &mut User) -> Result<(), Error> {
        user.archived = true;
        self.update_user(user).await
    }

    /// Creates each of the user's tags, one request per tag.
    ///
    /// Stops at the first failure; tags created before it stay created.
    pub async fn create_user_tags(&self, user: &mut User) -> Result<(), Error> {
        let path = format!("/users/{}/tags", user.id);
        for tag in user.tags.data.iter_mut() {
            self.write(Method::POST, &path, tag).await?;
        }
        Ok(())
    }

    // -- Assignments --

    pub async fn get_user_assignments(
        &self,
        user_id: UserID,
        opts: &ListOptions,
    ) -> Result<Collection<Assignment>, Error> {
        self.get(&format!("/users/{}/assignments", user_id), opts)
            .await
    }

    pub async fn get_all_user_assignments(
        &self,
        user_id: UserID,
        opts: &ListOptions,
    ) -> Result<Collection<Assignment>, PaginationError<Assignment>> {
        fetch_all(opts, ASSIGNMENT_PAGE, |page| async move {
            self.get_user_assignments(user_id, &page).await
        })
        .await
    }

    /// Creates `assignment` for its `user_id`.
    pub async fn create_user_assignment(&self, assignment: &mut Assignment) -> Result<(), Error> {
        let path = format!("/users/{}/assignments", assignment.user_id);
        self.write(Method::POST, &path, assignment).await
    }

    // -- Reference data --

    pub async fn get_leave_types(&self, opts: &ListOptions) -> Result<Collection<LeaveType>, Error> {
        self.get("/leave_types", opts).await
    }

    pub async fn get_all_leave_types(
        &self,
        opts: &ListOptions,
    ) -> Result<Collection<LeaveType>, PaginationError<LeaveType>> {
        fetch_all(opts, REFERENCE_PAGE, |page| async move {
            self.get_leave_types(&page).await
        })
        .await
    }

    pub async fn get_roles(&self, opts: &ListOptions) -> Result<Collection<Role>, Error> {
        self.get("/roles", opts).await
    }

    pub async fn get_all_roles(
        &self,
        opts: &ListOptions,
    ) -> Result<Collection<Role>, PaginationError<Role>> {
        fetch_all(opts, REFERENCE_PAGE, |page| async move { self.get_roles(&page).await }).await
    }

    pub async fn get_placeholder_resources(
        &self,
        opts: &ListOptions,
    ) -> Result<Collection<PlaceholderResource>, Error> {
        self.get("/placeholder_resources", opts).await
    }

    pub async fn get_all_placeholder_resources(
        &self,
        opts: &ListOptions,
    ) -> Result<Collection<PlaceholderResource>, PaginationError<PlaceholderResource>> {
        fetch_all(opts, REFERENCE_PAGE, |page| async move {
            self.get_placeholder_resources(&page).await
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_carry_query_only_when_present() {
        let client = Client::with_base_url("https://example.com/api/v1/", "t").unwrap();
        let spec = client
            .request(Method::GET, "/projects", Some(&ListOptions::new()))
            .unwrap();
        assert_eq!(spec.url.as_str(), "https://example.com/api/v1/projects");

        let spec = client
            .request(Method::GET, "/projects", Some(&ListOptions::new().with_page(2)))
            .unwrap();
        assert_eq!(spec.url.as_str(), "https://example.com/api/v1/projects?page=2");
    }

    #[test]
    fn requests_carry_token_and_budget() {
        let client = Client::with_base_url("https://example.com", "secret")
            .unwrap()
            .with_max_retries(3);
        let spec = client.request(Method::GET, "/roles", None).unwrap();
        assert_eq!(spec.headers.get(AUTH_HEADER).map(String::as_str), Some("secret"));
        assert_eq!(spec.max_retries, 3);
    }

    #[test]
    fn empty_base_url_is_rejected() {
        assert!(matches!(
            Client::with_base_url("", "t"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn production_and_staging_targets() {
        let client = Client::new("t", Environment::Production).unwrap();
        assert_eq!(client.base_url(), crate::config::PRODUCTION);
        let client = Client::new("t", Environment::Staging).unwrap();
        assert_eq!(client.base_url(), crate::config::STAGING);
    }
}
