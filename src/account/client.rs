//! Accounts resource client.
//!
//! # Responsibilities
//! - Build resource URLs (`<base>`, `<base>/<id>`, `<base>/<id>?version=<n>`)
//! - Validate accounts before create; nothing is sent for a rejected account
//! - Encode and decode the `{ "data": ... }` envelope
//!
//! # Design Decisions
//! - Retries, timeouts and status handling are delegated to the executor
//! - Errors keep their origin (config, validation, request, codec) so callers
//!   can branch on not-found without string matching

use url::Url;

use crate::account::error::AccountError;
use crate::account::model::{AccountData, Envelope};
use crate::account::rules::{RuleSet, StandardRules};
use crate::account::validation::{ValidatedAccount, ValidationEngine};
use crate::config::validation::{check_base_url, validate_config};
use crate::config::{ClientConfig, ConfigError};
use crate::http::{ExecError, Method, Request, RequestExecutor, ReqwestTransport, Transport};
use crate::resilience::timeouts::CancelToken;

/// Client for the accounts resource.
#[derive(Debug, Clone)]
pub struct AccountClient<T = ReqwestTransport, R = StandardRules> {
    base_url: Url,
    executor: RequestExecutor<T>,
    engine: ValidationEngine<R>,
}

impl AccountClient {
    /// Client over `reqwest` with standard rules, built from a validated config.
    pub fn from_config(config: &ClientConfig) -> Result<Self, AccountError> {
        validate_config(config).map_err(ConfigError::Validation)?;
        let executor = RequestExecutor::new(config.retry_options()).map_err(ExecError::from)?;
        Ok(Self::new(&config.base_url, executor, ValidationEngine::new())?)
    }
}

impl<T: Transport, R: RuleSet> AccountClient<T, R> {
    pub fn new(
        base_url: &str,
        executor: RequestExecutor<T>,
        engine: ValidationEngine<R>,
    ) -> Result<Self, ConfigError> {
        if base_url.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        let base_url = check_base_url(base_url).map_err(|reason| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        })?;

        Ok(Self {
            base_url,
            executor,
            engine,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub fn executor(&self) -> &RequestExecutor<T> {
        &self.executor
    }

    /// Run validation only.
    pub fn validate(&self, account: &AccountData) -> Result<ValidatedAccount, AccountError> {
        Ok(self.engine.validate(account)?)
    }

    /// Validate and create `account`, returning the stored record.
    pub async fn create(&self, account: &AccountData) -> Result<AccountData, AccountError> {
        self.create_with_cancel(account, &CancelToken::new()).await
    }

    pub async fn create_with_cancel(
        &self,
        account: &AccountData,
        cancel: &CancelToken,
    ) -> Result<AccountData, AccountError> {
        let validated = self.engine.validate(account)?.into_inner();
        let body = serde_json::to_vec(&Envelope { data: &validated })
            .map_err(AccountError::Encode)?;

        let request = Request::new(Method::POST, self.base_url.as_str()).json_body(body);
        let resp = self.executor.execute_with_cancel(request, cancel).await?;

        if resp.is_empty() {
            tracing::debug!(account_id = %validated.id, status = resp.status, "Created without body");
            return Ok(validated);
        }
        let created: Envelope<AccountData> = resp.json().map_err(AccountError::Decode)?;

        tracing::info!(account_id = %created.data.id, "Account created");
        Ok(created.data)
    }

    /// Fetch the account with `account_id`.
    pub async fn fetch(&self, account_id: &str) -> Result<AccountData, AccountError> {
        self.fetch_with_cancel(account_id, &CancelToken::new()).await
    }

    pub async fn fetch_with_cancel(
        &self,
        account_id: &str,
        cancel: &CancelToken,
    ) -> Result<AccountData, AccountError> {
        let url = self.resource_url(account_id)?;
        let resp = self
            .executor
            .execute_with_cancel(Request::get(url), cancel)
            .await?;

        if resp.is_empty() {
            return Err(AccountError::EmptyResponse {
                status: resp.status,
            });
        }
        let envelope: Envelope<AccountData> = resp.json().map_err(AccountError::Decode)?;
        Ok(envelope.data)
    }

    /// Delete version `version` of the account with `account_id`.
    pub async fn delete(&self, account_id: &str, version: i64) -> Result<(), AccountError> {
        self.delete_with_cancel(account_id, version, &CancelToken::new())
            .await
    }

    pub async fn delete_with_cancel(
        &self,
        account_id: &str,
        version: i64,
        cancel: &CancelToken,
    ) -> Result<(), AccountError> {
        let mut url = self.resource_url(account_id)?;
        url.query_pairs_mut()
            .append_pair("version", &version.to_string());

        self.executor
            .execute_with_cancel(Request::delete(url), cancel)
            .await?;

        tracing::info!(account_id, version, "Account deleted");
        Ok(())
    }

    /// `<base>/<id>` with the id encoded as a single path segment.
    fn resource_url(&self, account_id: &str) -> Result<Url, AccountError> {
        if account_id.is_empty() {
            return Err(AccountError::EmptyAccountId);
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ConfigError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: "cannot carry path segments".into(),
            })?
            .pop_if_empty()
            .push(account_id);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::model::Attributes;
    use crate::http::{Response, TransportError};
    use crate::resilience::retries::RetryOptions;
    use std::sync::{Arc, Mutex};

    const ID: &str = "ad27e265-9605-4b4b-a0e5-3003ea9cc4dc";
    const ORG: &str = "eb0bd6f5-c3f5-44b2-b677-acd23cdde73c";

    /// Records requests and answers with a fixed response.
    #[derive(Debug)]
    struct Recorder {
        status: u16,
        body: String,
        seen: Mutex<Vec<Request>>,
    }

    impl Recorder {
        fn new(status: u16, body: &str) -> Arc<Self> {
            Arc::new(Self {
                status,
                body: body.to_string(),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn seen(&self) -> Vec<Request> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl Transport for Recorder {
        async fn send(&self, request: &Request) -> Result<Response, TransportError> {
            self.seen.lock().unwrap().push(request.clone());
            Ok(Response::new(self.status, self.body.clone()))
        }
    }

    fn client(transport: Arc<Recorder>) -> AccountClient<Arc<Recorder>> {
        let executor = RequestExecutor::with_transport(transport, RetryOptions::default());
        AccountClient::new(
            "http://localhost:8080/v1/organisation/accounts",
            executor,
            ValidationEngine::new(),
        )
        .unwrap()
    }

    fn gb_account() -> AccountData {
        AccountData::new(
            ID,
            ORG,
            Attributes {
                bank_id: "400300".into(),
                bank_id_code: "GBDSC".into(),
                bic: "NWBKGB22".into(),
                ..Attributes::new("GB", ["John"])
            },
        )
    }

    #[test]
    fn test_new_rejects_bad_base_url() {
        let executor = RequestExecutor::with_transport(Recorder::new(200, ""), RetryOptions::default());
        let err = AccountClient::new("", executor.clone(), ValidationEngine::new()).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyBaseUrl));

        let err = AccountClient::new("localhost:8080", executor, ValidationEngine::new()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn test_from_config_requires_base_url() {
        let err = AccountClient::from_config(&ClientConfig::default()).unwrap_err();
        assert!(matches!(err, AccountError::Config(ConfigError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_posts_validated_envelope() {
        let transport = Recorder::new(204, "");
        let client = client(transport.clone());

        let created = client.create(&gb_account()).await.unwrap();
        assert_eq!(created.attributes.as_ref().unwrap().base_currency, "GBP");

        let seen = transport.seen();
        assert_eq!(seen.len(), 1);
        let request = &seen[0];
        assert_eq!(request.method, reqwest::Method::POST);
        assert_eq!(request.url, "http://localhost:8080/v1/organisation/accounts");
        assert_eq!(request.headers["content-type"], "application/json");

        let sent: Envelope<AccountData> =
            serde_json::from_slice(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(sent.data, created);
    }

    #[tokio::test]
    async fn test_invalid_account_sends_nothing() {
        let transport = Recorder::new(201, "");
        let client = client(transport.clone());

        let account = AccountData {
            attributes: None,
            ..gb_account()
        };
        let err = client.create(&account).await.unwrap_err();

        assert!(matches!(err, AccountError::Validation(_)));
        assert!(transport.seen().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_url_and_decode() {
        let body = format!(
            r#"{{"data":{{"id":"{ID}","organisation_id":"{ORG}","type":"accounts","version":0,"attributes":{{"country":"GB","name":["John"]}}}}}}"#
        );
        let transport = Recorder::new(200, &body);
        let client = client(transport.clone());

        let account = client.fetch(ID).await.unwrap();
        assert_eq!(account.id, ID);
        assert_eq!(account.version, Some(0));
        assert_eq!(
            transport.seen()[0].url,
            format!("http://localhost:8080/v1/organisation/accounts/{ID}")
        );
    }

    #[tokio::test]
    async fn test_fetch_bad_payload() {
        let client = client(Recorder::new(200, "not json"));
        assert!(matches!(
            client.fetch(ID).await.unwrap_err(),
            AccountError::Decode(_)
        ));
    }

    #[tokio::test]
    async fn test_fetch_without_body() {
        for status in [200, 204] {
            let client = client(Recorder::new(status, ""));
            assert!(matches!(
                client.fetch(ID).await.unwrap_err(),
                AccountError::EmptyResponse { status: s } if s == status
            ));
        }
    }

    #[tokio::test]
    async fn test_not_found_is_distinguishable() {
        let client = client(Recorder::new(404, ""));
        let err = client.fetch(ID).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_url() {
        let transport = Recorder::new(204, "");
        let client = client(transport.clone());

        client.delete(ID, 3).await.unwrap();
        let seen = transport.seen();
        assert_eq!(seen[0].method, reqwest::Method::DELETE);
        assert_eq!(
            seen[0].url,
            format!("http://localhost:8080/v1/organisation/accounts/{ID}?version=3")
        );
        assert!(seen[0].body.is_none());
    }

    #[tokio::test]
    async fn test_empty_account_id() {
        let transport = Recorder::new(200, "");
        let client = client(transport.clone());

        assert!(matches!(
            client.fetch("").await.unwrap_err(),
            AccountError::EmptyAccountId
        ));
        assert!(matches!(
            client.delete("", 0).await.unwrap_err(),
            AccountError::EmptyAccountId
        ));
        assert!(transport.seen().is_empty());
    }

    #[tokio::test]
    async fn test_trailing_slash_base() {
        let transport = Recorder::new(204, "");
        let executor = RequestExecutor::with_transport(transport.clone(), RetryOptions::default());
        let client = AccountClient::new(
            "http://localhost:8080/v1/organisation/accounts/",
            executor,
            ValidationEngine::new(),
        )
        .unwrap();

        client.delete(ID, 0).await.unwrap();
        assert_eq!(
            transport.seen()[0].url,
            format!("http://localhost:8080/v1/organisation/accounts/{ID}?version=0")
        );
    }
}
