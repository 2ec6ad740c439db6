use log::debug;
use std::collections::HashMap;

use crate::directory::{DirectoryApi, NamedRef, Squad};
use crate::errors::DirectoryError;

/// Outcome of looking a typed name up in the snapshot
#[derive(Debug, Clone, PartialEq)]
pub enum NameLookup {
    /// Exactly one directory entry matched
    Match(NamedRef),
    /// No directory entry matched
    Missing,
    /// More than one directory entry matched after normalization
    Ambiguous,
}

/// Read-only bundle of directory reference data, fetched once per validation
/// pass so a batch of any size costs a fixed number of remote calls.
///
/// Names are matched case-insensitively and whitespace-trimmed against the
/// canonical directory spelling; nothing fuzzier. Two canonical names that
/// normalize to the same key make that key ambiguous, which resolution
/// rejects rather than guesses.
#[derive(Debug, Default)]
pub struct DirectorySnapshot {
    /// Normalized squad name -> matching squads
    squads: HashMap<String, Vec<NamedRef>>,
    /// Squad id -> normalized member name -> matching members
    members: HashMap<i64, HashMap<String, Vec<NamedRef>>>,
    /// Normalized log type name -> matching types
    log_types: HashMap<String, Vec<NamedRef>>,
    /// Normalized category name -> matching categories
    categories: HashMap<String, Vec<NamedRef>>,
}

impl DirectorySnapshot {
    /// Build a snapshot from already-fetched directory listings
    pub fn new(squads: Vec<Squad>, log_types: Vec<NamedRef>, categories: Vec<NamedRef>) -> Self {
        let mut snapshot = DirectorySnapshot::default();

        for squad in squads {
            let roster = snapshot.members.entry(squad.id).or_default();
            for member in &squad.members {
                roster
                    .entry(Self::normalize(&member.name))
                    .or_default()
                    .push(member.clone());
            }
            snapshot
                .squads
                .entry(Self::normalize(&squad.name))
                .or_default()
                .push(NamedRef {
                    id: squad.id,
                    name: squad.name,
                });
        }

        for log_type in log_types {
            snapshot
                .log_types
                .entry(Self::normalize(&log_type.name))
                .or_default()
                .push(log_type);
        }

        for category in categories {
            snapshot
                .categories
                .entry(Self::normalize(&category.name))
                .or_default()
                .push(category);
        }

        snapshot
    }

    /// Fetch all reference data from the service in one pass.
    ///
    /// Any fetch failure aborts the whole snapshot: a partial snapshot would
    /// misclassify valid names as unresolved.
    pub async fn fetch(api: &dyn DirectoryApi) -> Result<Self, DirectoryError> {
        let squads = api.fetch_squads().await?;
        let log_types = api.fetch_log_types().await?;
        let categories = api.fetch_categories().await?;

        debug!(
            "Directory snapshot fetched: {} squads, {} log types, {} categories",
            squads.len(),
            log_types.len(),
            categories.len()
        );

        Ok(Self::new(squads, log_types, categories))
    }

    /// Look up a squad by typed name
    pub fn lookup_squad(&self, name: &str) -> NameLookup {
        Self::lookup(&self.squads, name)
    }

    /// Look up a person within a squad's roster by typed name
    pub fn lookup_member(&self, squad_id: i64, name: &str) -> NameLookup {
        match self.members.get(&squad_id) {
            Some(roster) => Self::lookup(roster, name),
            None => NameLookup::Missing,
        }
    }

    /// Look up a log type by typed name
    pub fn lookup_log_type(&self, name: &str) -> NameLookup {
        Self::lookup(&self.log_types, name)
    }

    /// Look up a category by typed name
    pub fn lookup_category(&self, name: &str) -> NameLookup {
        Self::lookup(&self.categories, name)
    }

    /// Case-insensitive, whitespace-trimmed key for exact matching
    fn normalize(name: &str) -> String {
        name.trim().to_lowercase()
    }

    fn lookup(table: &HashMap<String, Vec<NamedRef>>, name: &str) -> NameLookup {
        match table.get(&Self::normalize(name)) {
            Some(matches) if matches.len() == 1 => NameLookup::Match(matches[0].clone()),
            Some(matches) if matches.len() > 1 => NameLookup::Ambiguous,
            _ => NameLookup::Missing,
        }
    }
}
