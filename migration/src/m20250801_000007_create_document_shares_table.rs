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
                    .table(DocumentShares::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DocumentShares::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DocumentShares::DocumentId).uuid().not_null())
                    .col(
                        ColumnDef::new(DocumentShares::DocumentVersion)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DocumentShares::ShareType)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DocumentShares::RecipientType)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(DocumentShares::RecipientId).string().null())
                    .col(
                        ColumnDef::new(DocumentShares::AccessLevel)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DocumentShares::ShareToken)
                            .string()
                            .null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(DocumentShares::ShareLink).text().null())
                    .col(
                        ColumnDef::new(DocumentShares::ExpirationDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(DocumentShares::PasswordHash).string().null())
                    .col(
                        ColumnDef::new(DocumentShares::Status)
                            .string_len(32)
                            .not_null()
                            .default("ACTIVE"),
                    )
                    .col(
                        ColumnDef::new(DocumentShares::AccessCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(DocumentShares::LastAccessed)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(DocumentShares::CreatedBy).string().not_null())
                    .col(
                        ColumnDef::new(DocumentShares::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_document_shares_document")
                            .from(DocumentShares::Table, DocumentShares::DocumentId)
                            .to(Documents::Table, Documents::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_document_shares_document_version")
                    .table(DocumentShares::Table)
                    .col(DocumentShares::DocumentId)
                    .col(DocumentShares::DocumentVersion)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DocumentShares::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum DocumentShares {
    Table,
    Id,
    DocumentId,
    DocumentVersion,
    ShareType,
    RecipientType,
    RecipientId,
    AccessLevel,
    ShareToken,
    ShareLink,
    ExpirationDate,
    PasswordHash,
    Status,
    AccessCount,
    LastAccessed,
    CreatedBy,
    CreatedAt,
}
