/// Domain models for Meeting Mailer
///
/// These models represent the values flowing through the summary pipeline and are
/// transport-agnostic.
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Kind of an uploaded file, decided by its extension
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FileKind {
    #[serde(rename = "transcript")]
    Transcript,
    #[serde(rename = "contacts")]
    ContactList,
}

impl FileKind {
    /// Classifies a file name by its extension (case-insensitive)
    ///
    /// Returns `None` for anything that is neither a transcript nor a contact list.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let extension = std::path::Path::new(name)
            .extension()?
            .to_str()?
            .to_ascii_lowercase();

        match extension.as_str() {
            "txt" => Some(FileKind::Transcript),
            "csv" => Some(FileKind::ContactList),
            _ => None,
        }
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileKind::Transcript => write!(f, "transcript"),
            FileKind::ContactList => write!(f, "contacts"),
        }
    }
}

/// Extracted content of an uploaded file
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum FilePayload {
    Text(String),
    Contacts(Vec<ContactRecord>),
}

/// A classified upload, discarded once the request completes
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UploadedFile {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FileKind,
    #[serde(rename = "content")]
    pub payload: FilePayload,
}

impl UploadedFile {
    /// Creates a transcript upload
    pub fn transcript(name: String, text: String) -> Self {
        Self {
            name,
            kind: FileKind::Transcript,
            payload: FilePayload::Text(text),
        }
    }

    /// Creates a contact list upload
    pub fn contacts(name: String, rows: Vec<ContactRecord>) -> Self {
        Self {
            name,
            kind: FileKind::ContactList,
            payload: FilePayload::Contacts(rows),
        }
    }
}

/// One row of a contact list, keyed by header column name
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ContactRecord(BTreeMap<String, String>);

impl ContactRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a column value, replacing any previous value for the same column
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.0.insert(column.into(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.0.get(column).map(String::as_str)
    }

    /// The `email` column, if the row has a non-empty one
    pub fn email(&self) -> Option<&str> {
        self.get("email").filter(|e| !e.trim().is_empty())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ContactRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A task extracted from a transcript
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionItem {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub item: String,

    /// Empty when the model did not name anyone
    #[serde(default, deserialize_with = "null_as_empty")]
    pub owner: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<String>,
}

impl ActionItem {
    pub fn new(item: impl Into<String>, owner: impl Into<String>, timeline: Option<String>) -> Self {
        Self {
            item: item.into(),
            owner: owner.into(),
            timeline,
        }
    }
}

/// Structured output of the summary generator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResult {
    pub summary: String,
    #[serde(default)]
    pub action_items: Vec<ActionItem>,
}

/// An email recipient as sent by clients: a bare address or a contact-like object
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Recipient {
    Address(String),
    Record(AddressRecord),
}

/// Object form of a recipient; any fields besides `email` are kept verbatim
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AddressRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_json::Value>,
}

impl Recipient {
    /// Normalizes the recipient to the string shown in the email banner
    ///
    /// Records without a non-blank `email` are shown as their compact JSON form.
    pub fn display_name(&self) -> String {
        match self {
            Recipient::Address(address) => address.clone(),
            Recipient::Record(record) => match &record.email {
                Some(email) if !email.trim().is_empty() => email.clone(),
                _ => serde_json::to_string(record).unwrap_or_default(),
            },
        }
    }

    /// The address mail can actually be delivered to
    pub fn address(&self) -> Option<&str> {
        let address = match self {
            Recipient::Address(address) => address.as_str(),
            Recipient::Record(record) => record.email.as_deref()?,
        };

        let address = address.trim();
        (!address.is_empty()).then_some(address)
    }
}

impl From<ContactRecord> for Recipient {
    fn from(contact: ContactRecord) -> Self {
        let email = contact.email().map(str::to_string);
        let fields = contact
            .0
            .into_iter()
            .filter(|(column, _)| column != "email")
            .map(|(column, value)| (column, serde_json::Value::String(value)))
            .collect();

        Recipient::Record(AddressRecord { email, fields })
    }
}

/// Rendered HTML email body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailDocument(String);

impl EmailDocument {
    pub(crate) fn new(html: String) -> Self {
        Self(html)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for EmailDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
