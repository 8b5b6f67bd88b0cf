use sea_orm_migration::prelude::*;

use super::m20250801_000001_create_projects_table::Projects;
use super::m20250801_000002_create_document_folders_table::DocumentFolders;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Documents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Documents::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Documents::Title).string().not_null())
                    .col(ColumnDef::new(Documents::Description).text().null())
                    .col(
                        ColumnDef::new(Documents::DocumentType)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Documents::Category).string_len(64).null())
                    .col(
                        ColumnDef::new(Documents::Tags)
                            .json_binary()
                            .not_null()
                            .extra("DEFAULT '[]'::jsonb"),
                    )
                    .col(
                        ColumnDef::new(Documents::AccessLevel)
                            .string_len(32)
                            .not_null()
                            .default("INTERNAL"),
                    )
                    .col(
                        ColumnDef::new(Documents::AccessGroups)
                            .json_binary()
                            .not_null()
                            .extra("DEFAULT '[]'::jsonb"),
                    )
                    .col(
                        ColumnDef::new(Documents::RelatedEntities)
                            .json_binary()
                            .not_null()
                            .extra("DEFAULT '[]'::jsonb"),
                    )
                    .col(
                        ColumnDef::new(Documents::CustomFields)
                            .json_binary()
                            .not_null()
                            .extra("DEFAULT '{}'::jsonb"),
                    )
                    .col(ColumnDef::new(Documents::FileUrl).text().null())
                    .col(ColumnDef::new(Documents::FileName).string().null())
                    .col(ColumnDef::new(Documents::FileSize).big_integer().null())
                    .col(ColumnDef::new(Documents::FileType).string_len(128).null())
                    .col(
                        ColumnDef::new(Documents::Version)
                            .string_len(32)
                            .not_null()
                            .default("1.0"),
                    )
                    .col(
                        ColumnDef::new(Documents::Status)
                            .string_len(32)
                            .not_null()
                            .default("DRAFT"),
                    )
                    .col(ColumnDef::new(Documents::ProjectId).uuid().null())
                    .col(ColumnDef::new(Documents::FolderId).uuid().null())
                    .col(ColumnDef::new(Documents::CreatedBy).string().not_null())
                    .col(
                        ColumnDef::new(Documents::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP"),
                    )
                    .col(ColumnDef::new(Documents::UpdatedBy).string().not_null())
                    .col(
                        ColumnDef::new(Documents::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP"),
                    )
                    .col(
                        ColumnDef::new(Documents::ExpirationDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_documents_project")
                            .from(Documents::Table, Documents::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_documents_folder")
                            .from(Documents::Table, Documents::FolderId)
                            .to(DocumentFolders::Table, DocumentFolders::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_documents_folder_id")
                    .table(Documents::Table)
                    .col(Documents::FolderId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_documents_project_id")
                    .table(Documents::Table)
                    .col(Documents::ProjectId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_documents_status")
                    .table(Documents::Table)
                    .col(Documents::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Documents::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Documents {
    Table,
    Id,
    Title,
    Description,
    DocumentType,
    Category,
    Tags,
    AccessLevel,
    AccessGroups,
    RelatedEntities,
    CustomFields,
    FileUrl,
    FileName,
    FileSize,
    FileType,
    Version,
    Status,
    ProjectId,
    FolderId,
    CreatedBy,
    CreatedAt,
    UpdatedBy,
    UpdatedAt,
    ExpirationDate,
}
