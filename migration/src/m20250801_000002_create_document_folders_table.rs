use sea_orm_migration::prelude::*;

use super::m20250801_000001_create_projects_table::Projects;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DocumentFolders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DocumentFolders::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DocumentFolders::Name).string().not_null())
                    .col(ColumnDef::new(DocumentFolders::Description).text().null())
                    .col(ColumnDef::new(DocumentFolders::ParentId).uuid().null())
                    // 親フォルダ作成時点のスナップショット
                    .col(ColumnDef::new(DocumentFolders::Path).text().not_null())
                    .col(ColumnDef::new(DocumentFolders::ProjectId).uuid().null())
                    .col(ColumnDef::new(DocumentFolders::CreatedBy).string().not_null())
                    .col(
                        ColumnDef::new(DocumentFolders::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP"),
                    )
                    .col(
                        ColumnDef::new(DocumentFolders::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_document_folders_parent")
                            .from(DocumentFolders::Table, DocumentFolders::ParentId)
                            .to(DocumentFolders::Table, DocumentFolders::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_document_folders_project")
                            .from(DocumentFolders::Table, DocumentFolders::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_document_folders_parent_id")
                    .table(DocumentFolders::Table)
                    .col(DocumentFolders::ParentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DocumentFolders::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum DocumentFolders {
    Table,
    Id,
    Name,
    Description,
    ParentId,
    Path,
    ProjectId,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}
