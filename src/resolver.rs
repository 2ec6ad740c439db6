use crate::app_config::InputConfig;
use crate::directory::snapshot::{DirectorySnapshot, NameLookup};
use crate::entry::{FieldTag, LogEntry};
use crate::errors::FieldError;

// @module: Resolution of typed names against the directory snapshot

/// Resolves the human-readable names on a candidate entry to directory ids.
///
/// Matching is exact after trimming and case folding; ambiguity is rejected,
/// never guessed. On success the entry's display names are rewritten to the
/// directory's canonical spelling and the `*_id` fields are filled, in place.
/// The resolver reads only the snapshot it is given; it performs no I/O.
#[derive(Debug, Clone)]
pub struct DirectoryResolver {
    /// Person-field words meaning "the whole squad"
    team_sentinels: Vec<String>,
}

impl Default for DirectoryResolver {
    fn default() -> Self {
        Self::new(&InputConfig::default())
    }
}

impl DirectoryResolver {
    /// Create a resolver from the input-format configuration
    pub fn new(input: &InputConfig) -> Self {
        DirectoryResolver {
            team_sentinels: input
                .team_sentinels
                .iter()
                .map(|s| s.to_lowercase())
                .collect(),
        }
    }

    /// Resolve every directory-backed field of one entry.
    ///
    /// All failing fields are collected; on `Err` the entry keeps whatever
    /// partial resolution succeeded so a later single-field fix does not
    /// throw that work away.
    pub fn resolve(
        &self,
        entry: &mut LogEntry,
        snapshot: &DirectorySnapshot,
    ) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if let Some(error) = self.resolve_dates(entry) {
            errors.push(error);
        }

        match self.resolve_squad(entry, snapshot) {
            // Person scope depends on the squad, so only attempt it when the
            // squad itself resolved
            None => {
                if let Some(error) = self.resolve_person(entry, snapshot) {
                    errors.push(error);
                }
            }
            Some(error) => errors.push(error),
        }

        if let Some(error) = self.resolve_log_type(entry, snapshot) {
            errors.push(error);
        }

        errors.extend(self.resolve_categories(entry, snapshot));

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Resolve only the given field, for post-edit revalidation.
    ///
    /// Editing the squad re-resolves the person as well, since the person
    /// roster is scoped to the squad. No other field triggers a second
    /// field's resolution.
    pub fn resolve_field(
        &self,
        entry: &mut LogEntry,
        field: FieldTag,
        snapshot: &DirectorySnapshot,
    ) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        match field {
            FieldTag::Squad => {
                match self.resolve_squad(entry, snapshot) {
                    None => {
                        if let Some(error) = self.resolve_person(entry, snapshot) {
                            errors.push(error);
                        }
                    }
                    Some(error) => errors.push(error),
                }
            }
            FieldTag::Person => {
                if let Some(error) = self.resolve_person(entry, snapshot) {
                    errors.push(error);
                }
            }
            FieldTag::Type => {
                if let Some(error) = self.resolve_log_type(entry, snapshot) {
                    errors.push(error);
                }
            }
            FieldTag::Categories => {
                errors.extend(self.resolve_categories(entry, snapshot));
            }
            FieldTag::Dates => {
                if let Some(error) = self.resolve_dates(entry) {
                    errors.push(error);
                }
            }
            // Description has no directory counterpart
            FieldTag::Description => {}
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn resolve_squad(
        &self,
        entry: &mut LogEntry,
        snapshot: &DirectorySnapshot,
    ) -> Option<FieldError> {
        match snapshot.lookup_squad(&entry.squad_name) {
            NameLookup::Match(squad) => {
                entry.squad_id = Some(squad.id);
                entry.squad_name = squad.name;
                None
            }
            NameLookup::Missing => Some(FieldError::NotFound {
                line: entry.source_line_number,
                field: FieldTag::Squad,
                value: entry.squad_name.clone(),
            }),
            NameLookup::Ambiguous => Some(FieldError::Ambiguous {
                line: entry.source_line_number,
                field: FieldTag::Squad,
                value: entry.squad_name.clone(),
            }),
        }
    }

    fn resolve_person(
        &self,
        entry: &mut LogEntry,
        snapshot: &DirectorySnapshot,
    ) -> Option<FieldError> {
        if self.is_team_sentinel(&entry.person_name) {
            entry.for_whole_squad = true;
            entry.person_id = None;
            return None;
        }

        let squad_id = match entry.squad_id {
            Some(id) => id,
            // Squad unresolved; a scoped person lookup would be misleading
            None => {
                return Some(FieldError::NotFound {
                    line: entry.source_line_number,
                    field: FieldTag::Person,
                    value: entry.person_name.clone(),
                });
            }
        };

        match snapshot.lookup_member(squad_id, &entry.person_name) {
            NameLookup::Match(person) => {
                entry.person_id = Some(person.id);
                entry.person_name = person.name;
                entry.for_whole_squad = false;
                None
            }
            NameLookup::Missing => Some(FieldError::NotFound {
                line: entry.source_line_number,
                field: FieldTag::Person,
                value: entry.person_name.clone(),
            }),
            NameLookup::Ambiguous => Some(FieldError::Ambiguous {
                line: entry.source_line_number,
                field: FieldTag::Person,
                value: entry.person_name.clone(),
            }),
        }
    }

    fn resolve_log_type(
        &self,
        entry: &mut LogEntry,
        snapshot: &DirectorySnapshot,
    ) -> Option<FieldError> {
        match snapshot.lookup_log_type(&entry.log_type_name) {
            NameLookup::Match(log_type) => {
                entry.log_type_id = Some(log_type.id);
                entry.log_type_name = log_type.name;
                None
            }
            NameLookup::Missing => Some(FieldError::NotFound {
                line: entry.source_line_number,
                field: FieldTag::Type,
                value: entry.log_type_name.clone(),
            }),
            NameLookup::Ambiguous => Some(FieldError::Ambiguous {
                line: entry.source_line_number,
                field: FieldTag::Type,
                value: entry.log_type_name.clone(),
            }),
        }
    }

    /// Resolve the category list; ids are only committed to the entry when
    /// every category resolved, keeping `category_ids` parallel to the names
    fn resolve_categories(
        &self,
        entry: &mut LogEntry,
        snapshot: &DirectorySnapshot,
    ) -> Vec<FieldError> {
        let mut errors = Vec::new();
        let mut ids = Vec::with_capacity(entry.category_names.len());
        let mut canonical = Vec::with_capacity(entry.category_names.len());

        for name in &entry.category_names {
            match snapshot.lookup_category(name) {
                NameLookup::Match(category) => {
                    ids.push(category.id);
                    canonical.push(category.name);
                }
                NameLookup::Missing => errors.push(FieldError::NotFound {
                    line: entry.source_line_number,
                    field: FieldTag::Categories,
                    value: name.clone(),
                }),
                NameLookup::Ambiguous => errors.push(FieldError::Ambiguous {
                    line: entry.source_line_number,
                    field: FieldTag::Categories,
                    value: name.clone(),
                }),
            }
        }

        if errors.is_empty() {
            entry.category_names = canonical;
            entry.category_ids = Some(ids);
        } else {
            entry.category_ids = None;
        }

        errors
    }

    /// Dates were parsed up front; resolution only reports a pending error
    fn resolve_dates(&self, entry: &LogEntry) -> Option<FieldError> {
        entry.date_error.as_ref().map(|raw| FieldError::InvalidDate {
            line: entry.source_line_number,
            value: raw.clone(),
        })
    }

    fn is_team_sentinel(&self, name: &str) -> bool {
        let normalized = name.trim().to_lowercase();
        self.team_sentinels.iter().any(|s| s == &normalized)
    }
}
