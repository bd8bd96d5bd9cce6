//! Records decoded from `calibredb list --for-machine`.
//!
//! calibredb is inconsistent about multi-valued columns: depending on the
//! version and the `--fields` selection, `authors` arrives as `"A & B"` or
//! `["A", "B"]`, and tags/formats/languages as comma lists or arrays. Both
//! shapes decode into `Vec<String>`.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Book {
    pub id: i64,
    #[serde(deserialize_with = "null_as_empty", skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(
        deserialize_with = "authors_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub authors: Vec<String>,
    #[serde(deserialize_with = "null_as_empty", skip_serializing_if = "String::is_empty")]
    pub author_sort: String,
    #[serde(deserialize_with = "null_as_empty", skip_serializing_if = "String::is_empty")]
    pub comments: String,
    #[serde(deserialize_with = "null_as_empty", skip_serializing_if = "String::is_empty")]
    pub cover: String,
    #[serde(deserialize_with = "comma_list", skip_serializing_if = "Vec::is_empty")]
    pub formats: Vec<String>,
    #[serde(deserialize_with = "null_as_empty", skip_serializing_if = "BTreeMap::is_empty")]
    pub identifiers: BTreeMap<String, String>,
    #[serde(deserialize_with = "null_as_empty", skip_serializing_if = "String::is_empty")]
    pub isbn: String,
    #[serde(deserialize_with = "comma_list", skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,
    #[serde(deserialize_with = "null_as_empty", skip_serializing_if = "String::is_empty")]
    pub last_modified: String,
    #[serde(deserialize_with = "null_as_empty", skip_serializing_if = "String::is_empty")]
    pub pubdate: String,
    #[serde(deserialize_with = "null_as_empty", skip_serializing_if = "String::is_empty")]
    pub publisher: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(deserialize_with = "null_as_empty", skip_serializing_if = "String::is_empty")]
    pub series: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series_index: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(deserialize_with = "comma_list", skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "null_as_empty", skip_serializing_if = "String::is_empty")]
    pub template: String,
    #[serde(deserialize_with = "null_as_empty", skip_serializing_if = "String::is_empty")]
    pub timestamp: String,
    #[serde(deserialize_with = "null_as_empty", skip_serializing_if = "String::is_empty")]
    pub uuid: String,
}

/// Decode the JSON array printed by `list --for-machine`.
/// Empty output (an empty library on some versions) is an empty list.
pub fn parse_books(text: &str) -> Result<Vec<Book>, serde_json::Error> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(text)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrList {
    One(String),
    Many(Vec<String>),
    Null(()),
}

fn split_list<'de, D>(deserializer: D, sep: &str) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StringOrList::deserialize(deserializer)? {
        StringOrList::One(s) => s
            .split(sep)
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect(),
        StringOrList::Many(v) => v,
        StringOrList::Null(()) => Vec::new(),
    })
}

/// `null` decodes as the empty value, like an absent column.
fn null_as_empty<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(d).map(Option::unwrap_or_default)
}

fn authors_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    split_list(d, " & ")
}

fn comma_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    split_list(d, ",")
}
