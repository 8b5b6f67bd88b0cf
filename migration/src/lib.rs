// migration/src/lib.rs
pub use sea_orm_migration::prelude::*;

// 参照先テーブル
mod m20250801_000001_create_projects_table;
mod m20250801_000002_create_document_folders_table;

// ドキュメント本体とバージョン
mod m20250801_000003_create_documents_table;
mod m20250801_000004_create_document_versions_table;

// 承認ワークフロー
mod m20250801_000005_create_approval_workflows_table;
mod m20250801_000006_create_document_approvals_table;

// 共有・アクセスログ
mod m20250801_000007_create_document_shares_table;
mod m20250801_000008_create_document_access_logs_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            // 1. 依存関係のないテーブル
            Box::new(m20250801_000001_create_projects_table::Migration),
            Box::new(m20250801_000002_create_document_folders_table::Migration),
            // 2. ドキュメント（projects / document_folders に依存）
            Box::new(m20250801_000003_create_documents_table::Migration),
            Box::new(m20250801_000004_create_document_versions_table::Migration),
            // 3. 承認（documents / approval_workflows に依存）
            Box::new(m20250801_000005_create_approval_workflows_table::Migration),
            Box::new(m20250801_000006_create_document_approvals_table::Migration),
            // 4. 共有とアクセスログ
            Box::new(m20250801_000007_create_document_shares_table::Migration),
            Box::new(m20250801_000008_create_document_access_logs_table::Migration),
        ]
    }
}
