use std::collections::HashMap;

use api_types::{
    account::Account,
    tag::Tag,
    transaction::{Category, Transaction},
};

/// Normalized client-side copy of the server data.
///
/// Transactions are keyed by id and keep the order the backend returned them
/// in. This is the only place transaction data lives after a fetch; every
/// successful mutation is applied here.
#[derive(Debug, Clone, Default)]
pub struct Store {
    order: Vec<String>,
    transactions: HashMap<String, Transaction>,
    accounts: Vec<Account>,
    vocabulary: Vec<Tag>,
}

impl Store {
    /// Replaces transactions and accounts with a fresh fetch.
    ///
    /// The vocabulary is left alone: it only ever grows during a session.
    pub fn load(&mut self, transactions: Vec<Transaction>, accounts: Vec<Account>) {
        self.order.clear();
        self.transactions.clear();
        for tx in transactions {
            if !self.transactions.contains_key(&tx.id) {
                self.order.push(tx.id.clone());
            }
            self.transactions.insert(tx.id.clone(), tx);
        }
        self.accounts = accounts;
    }

    /// Transactions in fetch order.
    pub fn transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.order.iter().filter_map(|id| self.transactions.get(id))
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.transactions.get(id)
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn account_name(&self, id: &str) -> Option<&str> {
        self.accounts
            .iter()
            .find(|account| account.id == id)
            .map(|account| account.name.as_str())
    }

    /// Sets the category of one transaction. Returns `false` if unknown.
    pub fn set_category(&mut self, id: &str, category: Category) -> bool {
        match self.transactions.get_mut(id) {
            Some(tx) => {
                tx.category = category;
                true
            }
            None => false,
        }
    }

    /// Replaces the whole record with the server's version.
    ///
    /// The record keeps its position even if the server answered with a
    /// different id.
    pub fn replace(&mut self, id: &str, transaction: Transaction) -> bool {
        let Some(pos) = self.order.iter().position(|known| known == id) else {
            return false;
        };
        self.transactions.remove(id);
        if transaction.id != id {
            if self.transactions.contains_key(&transaction.id) {
                self.order.remove(pos);
            } else {
                self.order[pos] = transaction.id.clone();
            }
        }
        self.transactions.insert(transaction.id.clone(), transaction);
        true
    }

    /// Appends a tag to a transaction unless it already carries it.
    pub fn attach_tag(&mut self, id: &str, tag: Tag) -> bool {
        let Some(tx) = self.transactions.get_mut(id) else {
            return false;
        };
        if tx
            .tags
            .iter()
            .any(|known| known.id == tag.id || known.name == tag.name)
        {
            return false;
        }
        tx.tags.push(tag);
        true
    }

    pub fn vocabulary(&self) -> &[Tag] {
        &self.vocabulary
    }

    pub fn find_tag(&self, name: &str) -> Option<&Tag> {
        self.vocabulary.iter().find(|tag| tag.name == name)
    }

    /// Adds a tag to the vocabulary. Names collapse with set semantics.
    pub fn merge_tag(&mut self, tag: Tag) {
        if self.find_tag(&tag.name).is_none() {
            self.vocabulary.push(tag);
        }
    }

    pub fn merge_vocabulary(&mut self, tags: impl IntoIterator<Item = Tag>) {
        for tag in tags {
            self.merge_tag(tag);
        }
    }
}
