//! Shared helpers for integration tests.

#![allow(dead_code)]

use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use pushkind_board::db::{DbPool, establish_connection_pool};
use pushkind_board::domain::client::{Client, NewClient};
use pushkind_board::domain::creative::{CreativeCategory, CreativeTemplate, NewCreativeTemplate};
use pushkind_board::domain::proposal::{NewProposal, Proposal};
use pushkind_board::domain::types::ProposalId;
use pushkind_board::repository::{
    ClientWriter, CreativeTemplateWriter, DieselRepository, ProposalWriter,
};
use tempfile::TempDir;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Temporary SQLite database with all migrations applied. The file is
/// removed when the value is dropped.
pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name);
        let database_url = path.to_str().expect("utf-8 temp path").to_string();

        let pool = establish_connection_pool(&database_url).expect("create pool");
        let mut conn = pool.get().expect("get connection");
        run_migrations(&mut conn);

        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}

fn run_migrations(conn: &mut SqliteConnection) {
    conn.run_pending_migrations(MIGRATIONS)
        .expect("run migrations");
}

/// Catalog used across tests: a video template, a static template and a
/// retired one.
pub fn seed_templates(repo: &DieselRepository) -> Vec<CreativeTemplate> {
    [
        ("Instagram Reel", None, true),
        ("Static Banner Set", None, true),
        ("Storyboard Motion Graphics", Some(CreativeCategory::Static), false),
    ]
    .into_iter()
    .map(|(name, category, active)| {
        repo.create_creative_template(&NewCreativeTemplate {
            name: name.to_string(),
            description: String::new(),
            active,
            category,
        })
        .expect("create template")
    })
    .collect()
}

pub fn seed_proposal(repo: &DieselRepository, creatives_target: u32, videos_target: u32) -> Proposal {
    repo.create_proposal(&NewProposal {
        lead_assign_id: None,
        creatives_target,
        videos_target,
        amount: 1000.0,
        gst_percentage: 18.0,
        is_accepted: true,
    })
    .expect("create proposal")
}

pub fn seed_client(repo: &DieselRepository, name: &str, proposal_id: Option<ProposalId>) -> Client {
    repo.create_client(&NewClient::new(
        name.to_string(),
        format!("{name} LLC"),
        proposal_id,
    ))
    .expect("create client")
}
