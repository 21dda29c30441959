use diesel::prelude::*;

use crate::domain::client::{Client, NewClient};
use crate::domain::types::ClientId;
use crate::models::client::{Client as DbClient, NewClient as DbNewClient};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ClientReader, ClientWriter, DieselRepository};
use crate::schema::clients;

impl ClientReader for DieselRepository {
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>> {
        let mut conn = self.conn()?;

        let client = clients::table
            .find(id.get())
            .first::<DbClient>(&mut conn)
            .optional()?;

        match client {
            Some(client) => Ok(Some(Client::try_from(client)?)),
            None => Ok(None),
        }
    }

    fn list_clients(&self) -> RepositoryResult<Vec<Client>> {
        let mut conn = self.conn()?;

        let clients = clients::table
            .order(clients::name.asc())
            .then_order_by(clients::id.asc())
            .load::<DbClient>(&mut conn)?;

        clients
            .into_iter()
            .map(|client| Client::try_from(client).map_err(RepositoryError::from))
            .collect()
    }
}

impl ClientWriter for DieselRepository {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client> {
        let mut conn = self.conn()?;

        let insertable: DbNewClient = new_client.into();
        let client = diesel::insert_into(clients::table)
            .values(&insertable)
            .get_result::<DbClient>(&mut conn)?;

        Ok(Client::try_from(client)?)
    }
}
