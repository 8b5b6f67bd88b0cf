use sea_orm_migration::prelude::*;

use super::m20250801_000003_create_documents_table::Documents;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DocumentVersions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DocumentVersions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DocumentVersions::DocumentId).uuid().not_null())
                    .col(
                        ColumnDef::new(DocumentVersions::Version)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(DocumentVersions::FileUrl).text().null())
                    .col(ColumnDef::new(DocumentVersions::FileName).string().null())
                    .col(
                        ColumnDef::new(DocumentVersions::FileSize)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(DocumentVersions::FileType)
                            .string_len(128)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(DocumentVersions::ChangeDescription)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(DocumentVersions::Status)
                            .string_len(32)
                            .not_null()
                            .default("ACTIVE"),
                    )
                    .col(ColumnDef::new(DocumentVersions::CreatedBy).string().not_null())
                    .col(
                        ColumnDef::new(DocumentVersions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_document_versions_document")
                            .from(DocumentVersions::Table, DocumentVersions::DocumentId)
                            .to(Documents::Table, Documents::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_document_versions_document_created")
                    .table(DocumentVersions::Table)
                    .col(DocumentVersions::DocumentId)
                    .col(DocumentVersions::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // ドキュメントごとにACTIVEなバージョンは高々1つ
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS uq_document_versions_active \
                 ON document_versions (document_id) WHERE status = 'ACTIVE'",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DocumentVersions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum DocumentVersions {
    Table,
    Id,
    DocumentId,
    Version,
    FileUrl,
    FileName,
    FileSize,
    FileType,
    ChangeDescription,
    Status,
    CreatedBy,
    CreatedAt,
}
