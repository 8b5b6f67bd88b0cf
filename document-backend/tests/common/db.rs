// tests/common/db.rs
//
// 使い捨ての PostgreSQL コンテナにマイグレーションを適用し、
// SeaORM 版の DocumentStore を組み立てる

use document_backend::store::SeaOrmDocumentStore;
use migration::Migrator;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::time::Duration;
use testcontainers_modules::{
    postgres::Postgres,
    testcontainers::{runners::AsyncRunner, ContainerAsync, ImageExt},
};
use uuid::Uuid;

const PG_USER: &str = "postgres";
const PG_PASSWORD: &str = "postgres";

pub struct TestDatabase {
    // drop でコンテナが止まるので保持しておく
    _container: ContainerAsync<Postgres>,
    pub connection: DatabaseConnection,
}

impl TestDatabase {
    pub async fn new() -> Self {
        let db_name = format!("documents_{}", Uuid::new_v4().simple());

        let container = Postgres::default()
            .with_env_var("POSTGRES_USER", PG_USER)
            .with_env_var("POSTGRES_PASSWORD", PG_PASSWORD)
            .with_env_var("POSTGRES_DB", &db_name)
            .start()
            .await
            .expect("postgres container should start");
        let port = container
            .get_host_port_ipv4(5432)
            .await
            .expect("postgres port should be mapped");

        let mut options = ConnectOptions::new(format!(
            "postgres://{}:{}@localhost:{}/{}",
            PG_USER, PG_PASSWORD, port, db_name
        ));
        options
            .max_connections(5)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        let connection = Database::connect(options)
            .await
            .expect("test database should accept connections");
        Migrator::up(&connection, None)
            .await
            .expect("document migrations should apply");

        Self {
            _container: container,
            connection,
        }
    }

    pub fn store(&self) -> SeaOrmDocumentStore {
        SeaOrmDocumentStore::new(self.connection.clone())
    }
}
