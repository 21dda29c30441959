use diesel::prelude::*;

use crate::domain::creative::{
    CreativeCategory, CreativeTemplate as DomainCreativeTemplate,
    NewCreativeTemplate as DomainNewCreativeTemplate,
};
use crate::domain::types::{CreativeTemplateId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::creative_templates)]
/// Diesel model for [`crate::domain::creative::CreativeTemplate`].
pub struct CreativeTemplate {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub active: bool,
    pub category: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::creative_templates)]
pub struct NewCreativeTemplate<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub active: bool,
    pub category: Option<String>,
}

impl TryFrom<CreativeTemplate> for DomainCreativeTemplate {
    type Error = TypeConstraintError;

    fn try_from(template: CreativeTemplate) -> Result<Self, Self::Error> {
        let category = match template.category.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<CreativeCategory>()?),
        };

        Ok(Self {
            id: CreativeTemplateId::try_from(template.id)?,
            name: template.name,
            description: template.description,
            active: template.active,
            category,
        })
    }
}

impl<'a> From<&'a DomainNewCreativeTemplate> for NewCreativeTemplate<'a> {
    fn from(template: &'a DomainNewCreativeTemplate) -> Self {
        Self {
            name: template.name.as_str(),
            description: template.description.as_str(),
            active: template.active,
            category: template.category.map(|c| c.to_string()),
        }
    }
}
