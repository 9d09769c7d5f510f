#![allow(unused_imports)]
use serde::{ Deserialize, Serialize };
use chrono::{ DateTime, TimeZone, Utc };

use crate::utils::*;

/// @Term("A person")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    #[serde(
        rename = "$class",
    )]
    pub _class: String,
    #[serde(
        rename = "name",
    )]
    pub name: String,
    #[serde(
        rename = "dob",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_datetime_option",
        deserialize_with = "deserialize_datetime_option",
        default,
    )]
    pub dob: Option<DateTime<Utc>>,
    #[serde(
        rename = "created",
        serialize_with = "serialize_datetime",
        deserialize_with = "deserialize_datetime",
    )]
    pub created: DateTime<Utc>,
    #[serde(
        rename = "visits",
        skip_serializing_if = "Option::is_none",
    )]
    pub visits: Option<Vec<DateTime<Utc>>>,
    #[serde(
        rename = "favoriteColor",
        skip_serializing_if = "Option::is_none",
    )]
    pub favorite_color: Option<Color>,
}

impl Person {
    pub const CLASS: &str = "org.acme.Person";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum Color {
    RED,
    #[serde(rename = "light-blue")]
    light_blue,
}
