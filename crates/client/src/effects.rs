use ledger::{Action, Command, TagFailure};

use crate::{Client, ClientError};

/// Runs one reducer command against the backend and reports the outcome as
/// actions to dispatch.
pub async fn execute(client: &Client, command: Command) -> Vec<Action> {
    match command {
        Command::LoadLedger => match client.load_ledger().await {
            Ok((transactions, accounts)) => {
                tracing::debug!(
                    transactions = transactions.len(),
                    accounts = accounts.len(),
                    "ledger loaded"
                );
                vec![Action::LedgerLoaded {
                    transactions,
                    accounts,
                }]
            }
            Err(err) => vec![Action::LoadFailed(err.to_string())],
        },
        Command::LoadVocabulary => match client.tags().await {
            Ok(tags) => vec![Action::VocabularyLoaded(tags)],
            Err(err) => vec![Action::VocabularyLoadFailed(err.to_string())],
        },
        Command::UpdateCategory {
            transaction_id,
            category,
        } => match client.update_category(&transaction_id, category).await {
            Ok(()) => vec![Action::CategoryUpdated {
                transaction_id,
                category,
            }],
            Err(err) => {
                tracing::error!("failed to update category of {transaction_id}: {err}");
                vec![Action::CategoryUpdateFailed(err.to_string())]
            }
        },
        Command::CreateTag {
            transaction_id,
            name,
        } => {
            let tag = match client.ensure_tag_exists(&name).await {
                Ok(tag) => tag,
                Err(err) => {
                    tracing::error!("failed to create tag {name:?}: {err}");
                    return vec![Action::TagAddFailed(tag_failure(err))];
                }
            };
            match client.associate_tag(&transaction_id, &tag.id).await {
                Ok(()) => vec![Action::TagAdded {
                    transaction_id,
                    tag,
                }],
                Err(err) => {
                    tracing::error!("created tag {name:?} but could not attach it: {err}");
                    vec![Action::TagCreated(tag), Action::TagAddFailed(tag_failure(err))]
                }
            }
        }
        Command::AttachTag {
            transaction_id,
            tag,
        } => match client.associate_tag(&transaction_id, &tag.id).await {
            Ok(()) => vec![Action::TagAdded {
                transaction_id,
                tag,
            }],
            Err(err) => {
                tracing::error!("failed to attach tag {:?}: {err}", tag.name);
                vec![Action::TagAddFailed(tag_failure(err))]
            }
        },
        Command::UpdateComment {
            transaction_id,
            comment,
        } => match client.update_comment(&transaction_id, &comment).await {
            Ok(transaction) => vec![Action::CommentSaved {
                transaction_id,
                transaction,
            }],
            Err(err) => {
                tracing::error!("failed to update comment of {transaction_id}: {err}");
                vec![Action::CommentSaveFailed(err.to_string())]
            }
        },
    }
}

fn tag_failure(err: ClientError) -> TagFailure {
    match err {
        ClientError::Rejected { message, .. } => TagFailure::Rejected(message),
        ClientError::Status(status) => TagFailure::Rejected(status.to_string()),
        ClientError::Transport(_) | ClientError::InvalidBaseUrl(_) => TagFailure::Unreachable,
    }
}
