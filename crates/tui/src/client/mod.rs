use api_types::{
    category::Category,
    expense::{Expense, ExpenseNew},
};
use reqwest::{StatusCode, Url};

use crate::error::{AppError, Result};

/// Failures surfaced by the backend client.
///
/// `Status` and `Transport` are the network failure shapes (non-2xx
/// response, connection failure); `Decode` means the backend answered 2xx
/// with a body this client could not parse. The backend sends no structured
/// error detail, so a failed status carries only the code.
#[derive(Debug)]
pub enum ClientError {
    Status(StatusCode),
    Transport(reqwest::Error),
    Decode(reqwest::Error),
}

impl ClientError {
    fn from_body_error(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err)
        } else {
            Self::Transport(err)
        }
    }
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    http: reqwest::Client,
}

impl Client {
    /// Builds a client for the given backend root address.
    ///
    /// The base URL is injected here so each environment gets its own
    /// client; nothing else in the crate knows the backend address.
    pub fn new(base_url: &str) -> Result<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|err| AppError::Terminal(format!("invalid base_url: {err}")))?;

        let mut base_url = parsed.to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    pub async fn categories_list(&self) -> std::result::Result<Vec<Category>, ClientError> {
        let res = self
            .http
            .get(self.endpoint("api/categorias"))
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if !res.status().is_success() {
            return Err(ClientError::Status(res.status()));
        }

        res.json::<Vec<Category>>()
            .await
            .map_err(ClientError::from_body_error)
    }

    pub async fn expense_create(
        &self,
        expense: &ExpenseNew,
    ) -> std::result::Result<(), ClientError> {
        let res = self
            .http
            .post(self.endpoint("api/gastos/registrar"))
            .json(expense)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if !res.status().is_success() {
            return Err(ClientError::Status(res.status()));
        }

        Ok(())
    }

    pub async fn expenses_list(&self) -> std::result::Result<Vec<Expense>, ClientError> {
        let res = self
            .http
            .get(self.endpoint("api/gastos"))
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if !res.status().is_success() {
            return Err(ClientError::Status(res.status()));
        }

        res.json::<Vec<Expense>>()
            .await
            .map_err(ClientError::from_body_error)
    }

    pub async fn expense_delete(&self, id: &str) -> std::result::Result<(), ClientError> {
        let res = self
            .http
            .delete(self.endpoint(&format!("api/gastos/eliminar/{id}")))
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if !res.status().is_success() {
            return Err(ClientError::Status(res.status()));
        }

        Ok(())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}
