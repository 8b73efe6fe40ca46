use super::{flexible_id, null_as_default};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Flat reference entity (faculty, career, campus, space, category, type).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    #[serde(deserialize_with = "flexible_id::deserialize")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Faculty of a career, campus of a space.
    #[serde(
        default,
        alias = "facultyId",
        alias = "campusId",
        deserialize_with = "flexible_id::option::deserialize"
    )]
    pub parent_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CatalogKind {
    Faculties,
    Careers,
    Campuses,
    Spaces,
    Categories,
    EventTypes,
}

impl CatalogKind {
    pub fn path(&self) -> &'static str {
        match self {
            CatalogKind::Faculties => "/faculty/getallfaculties",
            CatalogKind::Careers => "/career/getallcareers",
            CatalogKind::Campuses => "/campus/getallcampus",
            CatalogKind::Spaces => "/space/getallspaces",
            CatalogKind::Categories => "/eventcategory/getallcategories",
            CatalogKind::EventTypes => "/eventtype/getalltypes",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            CatalogKind::Faculties => "Faculties",
            CatalogKind::Careers => "Careers",
            CatalogKind::Campuses => "Campuses",
            CatalogKind::Spaces => "Spaces",
            CatalogKind::Categories => "Event categories",
            CatalogKind::EventTypes => "Event types",
        }
    }

    /// Header of the parent column, for kinds that have one.
    pub fn parent_label(&self) -> Option<&'static str> {
        match self {
            CatalogKind::Careers => Some("faculty"),
            CatalogKind::Spaces => Some("campus"),
            _ => None,
        }
    }
}
