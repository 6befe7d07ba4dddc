//! Summarizes a flat list of transaction descriptors into ranked profile,
//! currency, and tag usage counts.
//!
//! This is a pure, single-pass aggregation: it never fails, performs no I/O,
//! and builds fresh accumulators per call, so it is safe to run from
//! concurrent request handlers.

use std::cmp::Reverse;
use std::collections::HashMap;

use serde::Serialize;

use crate::transaction::TransactionKind;

/// The per-transaction input to [summarize_catalog].
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    /// The budgeting profile the transaction was recorded under. May be blank.
    pub profile: String,
    /// The currency code of the transaction, in any casing. May be blank.
    pub currency: String,
    /// Whether the transaction is an expense or income.
    pub kind: TransactionKind,
    /// The tag names attached to the transaction.
    pub tags: Vec<String>,
}

/// How often a profile name appears across the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileUsage {
    /// The trimmed profile name.
    pub name: String,
    /// The number of transactions recorded under the profile.
    pub count: usize,
}

/// How often a currency code appears across the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrencyUsage {
    /// The trimmed, uppercased currency code.
    pub code: String,
    /// The number of transactions denominated in the currency.
    pub count: usize,
}

/// How often a tag appears for one profile and transaction kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagUsage {
    /// The profile the tag was used under.
    pub profile: String,
    /// The trimmed tag name.
    pub name: String,
    /// The transaction kind the tag was used with.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// The number of times this (profile, tag, kind) combination appears.
    pub count: usize,
}

/// The ranked summaries produced by [summarize_catalog].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSummary {
    /// The total number of input transactions, including those with a blank
    /// profile or currency.
    pub transaction_count: usize,
    /// Profiles by usage count, most used first.
    pub profiles: Vec<ProfileUsage>,
    /// Currencies by usage count, most used first.
    pub currencies: Vec<CurrencyUsage>,
    /// Tag usage broken down by profile and transaction kind, most used first.
    pub tags: Vec<TagUsage>,
}

/// The grouping key for tag usage.
///
/// Tags group jointly on (profile, name, kind): the same tag name under a
/// different profile or transaction kind is a distinct entry.
#[derive(Debug, PartialEq, Eq, Hash)]
struct TagKey {
    profile: String,
    name: String,
    kind: TransactionKind,
}

/// Summarize transaction descriptors into ranked profile, currency, and tag
/// usage counts plus a total transaction count.
///
/// Blank (empty or whitespace-only) profiles, currencies, and tags contribute
/// to no grouping, but every entry counts toward
/// [CatalogSummary::transaction_count]. A blank profile also suppresses the
/// entry's tags. Currency codes are uppercased before grouping, so "usd" and
/// "USD" merge; profile names group case-sensitively.
///
/// Each output sequence is sorted by descending count, tie-broken by
/// ascending label (profile name, currency code, or tag name), so the result
/// does not depend on input order.
pub fn summarize_catalog(entries: &[CatalogEntry]) -> CatalogSummary {
    let mut profile_counts: HashMap<String, usize> = HashMap::new();
    let mut currency_counts: HashMap<String, usize> = HashMap::new();
    let mut tag_counts: HashMap<TagKey, usize> = HashMap::new();

    for entry in entries {
        let profile = entry.profile.trim();
        if !profile.is_empty() {
            *profile_counts.entry(profile.to_owned()).or_insert(0) += 1;
        }

        let currency = entry.currency.trim().to_uppercase();
        if !currency.is_empty() {
            *currency_counts.entry(currency).or_insert(0) += 1;
        }

        if profile.is_empty() {
            continue;
        }

        for tag in &entry.tags {
            let name = tag.trim();
            if name.is_empty() {
                continue;
            }

            let key = TagKey {
                profile: profile.to_owned(),
                name: name.to_owned(),
                kind: entry.kind,
            };
            *tag_counts.entry(key).or_insert(0) += 1;
        }
    }

    let mut profiles: Vec<ProfileUsage> = profile_counts
        .into_iter()
        .map(|(name, count)| ProfileUsage { name, count })
        .collect();
    profiles.sort_by(|a, b| (Reverse(a.count), &a.name).cmp(&(Reverse(b.count), &b.name)));

    let mut currencies: Vec<CurrencyUsage> = currency_counts
        .into_iter()
        .map(|(code, count)| CurrencyUsage { code, count })
        .collect();
    currencies.sort_by(|a, b| (Reverse(a.count), &a.code).cmp(&(Reverse(b.count), &b.code)));

    let mut tags: Vec<TagUsage> = tag_counts
        .into_iter()
        .map(|(key, count)| TagUsage {
            profile: key.profile,
            name: key.name,
            kind: key.kind,
            count,
        })
        .collect();
    // The primary tie-break is the tag name; profile and kind only keep the
    // order deterministic when the same name appears in several groups.
    tags.sort_by(|a, b| {
        (Reverse(a.count), &a.name, &a.profile, a.kind)
            .cmp(&(Reverse(b.count), &b.name, &b.profile, b.kind))
    });

    CatalogSummary {
        // The raw input length, not the sum of any group: entries with a
        // blank profile or currency still count.
        transaction_count: entries.len(),
        profiles,
        currencies,
        tags,
    }
}
