use api_types::{
    account::Account,
    tag::{Tag, TagAssociate, TagNew},
    transaction::{Category, CategoryUpdate, CommentUpdate, Transaction},
};
use reqwest::{Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use effects::execute;

mod effects;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid base_url: {0}")]
    InvalidBaseUrl(String),
    #[error("http error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {0}")]
    Status(StatusCode),
    /// A non-2xx answer whose body was read for the user.
    #[error("server returned {status}: {message}")]
    Rejected { status: StatusCode, message: String },
}

/// HTTP client for the ledger backend's `/api` routes.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url =
            Url::parse(base_url).map_err(|err| ClientError::InvalidBaseUrl(err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let res = self.http.get(self.endpoint(segments)?).send().await?;
        Ok(ensure_success(res)?.json::<T>().await?)
    }

    pub async fn transactions(&self) -> Result<Vec<Transaction>> {
        self.get_json(&["transactions"]).await
    }

    pub async fn accounts(&self) -> Result<Vec<Account>> {
        self.get_json(&["accounts"]).await
    }

    pub async fn tags(&self) -> Result<Vec<Tag>> {
        self.get_json(&["tags"]).await
    }

    /// Fetches transactions and accounts concurrently; both must succeed.
    pub async fn load_ledger(&self) -> Result<(Vec<Transaction>, Vec<Account>)> {
        let (transactions, accounts) = tokio::join!(self.transactions(), self.accounts());
        Ok((transactions?, accounts?))
    }

    /// `PATCH /api/transactions/{id}` with `{category}`. The response body is
    /// not read.
    pub async fn update_category(&self, transaction_id: &str, category: Category) -> Result<()> {
        let res = self
            .http
            .patch(self.endpoint(&["transactions", transaction_id])?)
            .json(&CategoryUpdate { category })
            .send()
            .await?;
        ensure_success(res)?;
        Ok(())
    }

    /// `PATCH /api/transactions/{id}` with `{comment}`; returns the server's
    /// copy of the whole record.
    pub async fn update_comment(&self, transaction_id: &str, comment: &str) -> Result<Transaction> {
        let res = self
            .http
            .patch(self.endpoint(&["transactions", transaction_id])?)
            .json(&CommentUpdate {
                comment: comment.to_string(),
            })
            .send()
            .await?;
        Ok(ensure_success(res)?.json::<Transaction>().await?)
    }

    /// `POST /api/tags` with `{name}`; returns the stored tag.
    ///
    /// If the backend rejects the create, `/api/tags` is consulted and an
    /// existing tag with exactly this name is returned instead. Otherwise the
    /// original rejection is reported.
    pub async fn ensure_tag_exists(&self, name: &str) -> Result<Tag> {
        let res = self
            .http
            .post(self.endpoint(&["tags"])?)
            .json(&TagNew {
                name: name.to_string(),
            })
            .send()
            .await?;
        let err = match ensure_accepted(res).await {
            Ok(res) => return Ok(res.json::<Tag>().await?),
            Err(err @ ClientError::Rejected { .. }) => err,
            Err(err) => return Err(err),
        };
        match self.tags().await {
            Ok(tags) => match tags.into_iter().find(|tag| tag.name == name) {
                Some(tag) => {
                    tracing::debug!("tag {name:?} already exists as {}", tag.id);
                    Ok(tag)
                }
                None => Err(err),
            },
            Err(lookup) => {
                tracing::warn!("tag lookup after rejected create failed: {lookup}");
                Err(err)
            }
        }
    }

    /// `POST /api/transactions/{id}/tags` with `{tagId}`.
    pub async fn associate_tag(&self, transaction_id: &str, tag_id: &str) -> Result<()> {
        let res = self
            .http
            .post(self.endpoint(&["transactions", transaction_id, "tags"])?)
            .json(&TagAssociate {
                tag_id: tag_id.to_string(),
            })
            .send()
            .await?;
        ensure_accepted(res).await?;
        Ok(())
    }
}

fn ensure_success(res: Response) -> Result<Response> {
    let status = res.status();
    if status.is_success() {
        Ok(res)
    } else {
        Err(ClientError::Status(status))
    }
}

/// Like [`ensure_success`], but keeps the response text of a failure.
async fn ensure_accepted(res: Response) -> Result<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let message = res.text().await.unwrap_or_default();
    Err(ClientError::Rejected { status, message })
}
