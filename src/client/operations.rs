//! Generic CRUD operations over the resource table.
//!
//! Each operation comes as a `build_*_request` function that only constructs the request,
//! and a dispatching method that sends it. Parent ids are passed parent-first as an array
//! whose length is fixed by the resource:
//!
//! ```no_run
//! # use prixfixe_client::{Context, PrixfixeClient};
//! # use prixfixe_client::models::{RecipeStepProduct, ValidIngredient};
//! # async fn example(client: PrixfixeClient) -> Result<(), prixfixe_client::ClientError> {
//! let ctx = Context::background();
//! let garlic = client.search::<ValidIngredient>(&ctx, [], "garlic", 5).await?;
//! let product = client.get::<RecipeStepProduct>(&ctx, [7, 3], 12).await?;
//! # Ok(())
//! # }
//! ```

use reqwest::{Method, Request};
use url::Url;

use crate::client::codec::build_data_request;
use crate::client::error::ClientResult;
use crate::client::resources::{Creatable, Existable, ParentIds, Resource, Searchable, Updatable};
use crate::client::{PrixfixeClient, QueryValues};
use crate::context::Context;
use crate::models::QueryFilter;

const SEARCH_QUERY_KEY: &str = "q";
const SEARCH_LIMIT_KEY: &str = "limit";

impl PrixfixeClient {
    fn resource_url<R: Resource>(
        &self,
        parents: R::Parents,
        tail: &[String],
        query: Option<&QueryValues>,
    ) -> ClientResult<Url> {
        let segments = R::ENDPOINT.segments(parents.ids(), tail);

        if R::ENDPOINT.versioned {
            self.build_url(query, segments)
        } else {
            self.build_versionless_url(query, segments)
        }
    }

    pub fn build_exists_request<R: Existable>(&self, parents: R::Parents, id: u64) -> ClientResult<Request> {
        let url = self.resource_url::<R>(parents, &[id.to_string()], None)?;
        Ok(Request::new(Method::HEAD, url))
    }

    /// `Ok(true)` iff the server answers 200.
    pub async fn exists<R: Existable>(&self, ctx: &Context, parents: R::Parents, id: u64) -> ClientResult<bool> {
        let request = self.build_exists_request::<R>(parents, id)?;
        self.check_existence(ctx, request).await
    }

    pub fn build_get_request<R: Resource>(&self, parents: R::Parents, id: u64) -> ClientResult<Request> {
        let url = self.resource_url::<R>(parents, &[id.to_string()], None)?;
        Ok(Request::new(Method::GET, url))
    }

    pub async fn get<R: Resource>(&self, ctx: &Context, parents: R::Parents, id: u64) -> ClientResult<R> {
        let request = self.build_get_request::<R>(parents, id)?;
        self.retrieve(ctx, request).await
    }

    /// Only the filter fields that are set become query parameters.
    pub fn build_list_request<R: Resource>(
        &self,
        parents: R::Parents,
        filter: Option<&QueryFilter>,
    ) -> ClientResult<Request> {
        let query = filter.map(QueryFilter::to_values);
        let url = self.resource_url::<R>(parents, &[], query.as_ref())?;
        Ok(Request::new(Method::GET, url))
    }

    pub async fn list<R: Resource>(
        &self,
        ctx: &Context,
        parents: R::Parents,
        filter: Option<&QueryFilter>,
    ) -> ClientResult<R::List> {
        let request = self.build_list_request::<R>(parents, filter)?;
        self.execute_and_decode(ctx, request).await
    }

    pub fn build_search_request<R: Searchable>(
        &self,
        parents: R::Parents,
        query: &str,
        limit: u8,
    ) -> ClientResult<Request> {
        let mut values = QueryValues::new();
        values.insert(SEARCH_QUERY_KEY.to_string(), vec![query.to_string()]);
        values.insert(SEARCH_LIMIT_KEY.to_string(), vec![limit.to_string()]);

        let url = self.resource_url::<R>(parents, &["search".to_string()], Some(&values))?;
        Ok(Request::new(Method::GET, url))
    }

    pub async fn search<R: Searchable>(
        &self,
        ctx: &Context,
        parents: R::Parents,
        query: &str,
        limit: u8,
    ) -> ClientResult<Vec<R>> {
        let request = self.build_search_request::<R>(parents, query, limit)?;
        self.execute_and_decode(ctx, request).await
    }

    pub fn build_create_request<R: Creatable>(
        &self,
        parents: R::Parents,
        input: &R::CreationInput,
    ) -> ClientResult<Request> {
        let url = self.resource_url::<R>(parents, &[], None)?;
        build_data_request(Method::POST, url, input)
    }

    pub async fn create<R: Creatable>(
        &self,
        ctx: &Context,
        parents: R::Parents,
        input: &R::CreationInput,
    ) -> ClientResult<R> {
        let request = self.build_create_request::<R>(parents, input)?;
        self.execute_and_decode(ctx, request).await
    }

    pub fn build_update_request<R: Updatable>(&self, parents: R::Parents, value: &R) -> ClientResult<Request> {
        let url = self.resource_url::<R>(parents, &[value.id().to_string()], None)?;
        build_data_request(Method::PUT, url, value)
    }

    /// PUTs `value` and replaces it with what the server returns.
    pub async fn update<R: Updatable>(&self, ctx: &Context, parents: R::Parents, value: &mut R) -> ClientResult<()> {
        let request = self.build_update_request::<R>(parents, value)?;
        *value = self.execute_and_decode(ctx, request).await?;
        Ok(())
    }

    pub fn build_archive_request<R: Resource>(&self, parents: R::Parents, id: u64) -> ClientResult<Request> {
        let url = self.resource_url::<R>(parents, &[id.to_string()], None)?;
        Ok(Request::new(Method::DELETE, url))
    }

    pub async fn archive<R: Resource>(&self, ctx: &Context, parents: R::Parents, id: u64) -> ClientResult<()> {
        let request = self.build_archive_request::<R>(parents, id)?;
        self.execute(ctx, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::*;
    use pretty_assertions::assert_eq;

    fn client() -> PrixfixeClient {
        PrixfixeClient::new_simple(Url::parse("https://prixfixe.app").unwrap()).unwrap()
    }

    #[test]
    fn methods_and_paths_follow_the_operation() {
        let c = client();

        let exists = c.build_exists_request::<Recipe>([], 4).unwrap();
        assert_eq!(exists.method(), Method::HEAD);
        assert_eq!(exists.url().path(), "/api/v1/recipes/4");

        let get = c.build_get_request::<RecipeTag>([4], 2).unwrap();
        assert_eq!(get.method(), Method::GET);
        assert_eq!(get.url().path(), "/api/v1/recipes/4/recipe_tags/2");

        let archive = c.build_archive_request::<IterationMedia>([1, 2], 3).unwrap();
        assert_eq!(archive.method(), Method::DELETE);
        assert_eq!(archive.url().path(), "/api/v1/recipes/1/recipe_iterations/2/iteration_medias/3");
    }

    #[test]
    fn list_without_filter_has_no_query() {
        let request = client().build_list_request::<Webhook>([], None).unwrap();
        assert_eq!(request.url().as_str(), "https://prixfixe.app/api/v1/webhooks");
    }

    #[test]
    fn list_renders_set_filter_fields() {
        let filter = QueryFilter::default().page(2).limit(10);
        let request = client().build_list_request::<Report>([], Some(&filter)).unwrap();

        assert_eq!(request.url().query(), Some("limit=10&page=2"));
    }

    #[test]
    fn search_carries_q_and_limit() {
        let request = client()
            .build_search_request::<ValidPreparation>([], "sear", 20)
            .unwrap();

        assert_eq!(
            request.url().as_str(),
            "https://prixfixe.app/api/v1/valid_preparations/search?limit=20&q=sear"
        );
    }

    #[test]
    fn update_targets_the_value_id() {
        let step = RecipeStep {
            id: 11,
            belongs_to_recipe: 5,
            ..Default::default()
        };
        let request = client().build_update_request::<RecipeStep>([5], &step).unwrap();

        assert_eq!(request.method(), Method::PUT);
        assert_eq!(request.url().path(), "/api/v1/recipes/5/recipe_steps/11");
    }

    #[test]
    fn users_and_oauth2_clients_paths() {
        let c = client();

        let user = c.build_get_request::<User>([], 8).unwrap();
        assert_eq!(user.url().path(), "/users/8");

        let oauth = c.build_list_request::<OAuth2Client>([], None).unwrap();
        assert_eq!(oauth.url().path(), "/api/v1/oauth2/clients");
    }
}
