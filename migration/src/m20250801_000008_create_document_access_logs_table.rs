use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 追記専用のため外部キーは張らない（ドキュメント削除後も履歴を残す）
        manager
            .create_table(
                Table::create()
                    .table(DocumentAccessLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DocumentAccessLogs::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DocumentAccessLogs::DocumentId).uuid().not_null())
                    .col(
                        ColumnDef::new(DocumentAccessLogs::DocumentVersion)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(DocumentAccessLogs::UserId).string().null())
                    .col(
                        ColumnDef::new(DocumentAccessLogs::Action)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(DocumentAccessLogs::Details).json_binary().null())
                    .col(
                        ColumnDef::new(DocumentAccessLogs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP"),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_document_access_logs_document_created")
                    .table(DocumentAccessLogs::Table)
                    .col(DocumentAccessLogs::DocumentId)
                    .col(DocumentAccessLogs::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DocumentAccessLogs::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum DocumentAccessLogs {
    Table,
    Id,
    DocumentId,
    DocumentVersion,
    UserId,
    Action,
    Details,
    CreatedAt,
}
