use diesel::prelude::*;

use crate::domain::creative::{CreativeTemplate, NewCreativeTemplate};
use crate::models::creative_template::{
    CreativeTemplate as DbCreativeTemplate, NewCreativeTemplate as DbNewCreativeTemplate,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CreativeTemplateReader, CreativeTemplateWriter, DieselRepository};
use crate::schema::creative_templates;

impl CreativeTemplateReader for DieselRepository {
    fn list_creative_templates(&self) -> RepositoryResult<Vec<CreativeTemplate>> {
        let mut conn = self.conn()?;

        let templates = creative_templates::table
            .order(creative_templates::id.asc())
            .load::<DbCreativeTemplate>(&mut conn)?;

        templates
            .into_iter()
            .map(|template| CreativeTemplate::try_from(template).map_err(RepositoryError::from))
            .collect()
    }
}

impl CreativeTemplateWriter for DieselRepository {
    fn create_creative_template(
        &self,
        new_template: &NewCreativeTemplate,
    ) -> RepositoryResult<CreativeTemplate> {
        let mut conn = self.conn()?;

        let insertable: DbNewCreativeTemplate = new_template.into();
        let template = diesel::insert_into(creative_templates::table)
            .values(&insertable)
            .get_result::<DbCreativeTemplate>(&mut conn)?;

        Ok(CreativeTemplate::try_from(template)?)
    }
}
