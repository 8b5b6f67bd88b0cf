use sea_orm_migration::prelude::*;

use super::m20250801_000003_create_documents_table::Documents;
use super::m20250801_000005_create_approval_workflows_table::ApprovalWorkflows;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DocumentApprovals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DocumentApprovals::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DocumentApprovals::DocumentId).uuid().not_null())
                    .col(
                        ColumnDef::new(DocumentApprovals::DocumentVersion)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(DocumentApprovals::WorkflowId).uuid().not_null())
                    .col(
                        ColumnDef::new(DocumentApprovals::Approvers)
                            .json_binary()
                            .not_null()
                            .extra("DEFAULT '[]'::jsonb"),
                    )
                    .col(
                        ColumnDef::new(DocumentApprovals::CurrentStep)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(DocumentApprovals::Status)
                            .string_len(32)
                            .not_null()
                            .default("PENDING"),
                    )
                    .col(
                        ColumnDef::new(DocumentApprovals::IsSequential)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(DocumentApprovals::InitiatedBy).string().not_null())
                    .col(
                        ColumnDef::new(DocumentApprovals::StartDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DocumentApprovals::DueDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(DocumentApprovals::CompletionDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(DocumentApprovals::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP"),
                    )
                    .col(
                        ColumnDef::new(DocumentApprovals::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_document_approvals_document")
                            .from(DocumentApprovals::Table, DocumentApprovals::DocumentId)
                            .to(Documents::Table, Documents::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_document_approvals_workflow")
                            .from(DocumentApprovals::Table, DocumentApprovals::WorkflowId)
                            .to(ApprovalWorkflows::Table, ApprovalWorkflows::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_document_approvals_document_version")
                    .table(DocumentApprovals::Table)
                    .col(DocumentApprovals::DocumentId)
                    .col(DocumentApprovals::DocumentVersion)
                    .to_owned(),
            )
            .await?;

        // 同一バージョンで進行中の承認は1件のみ（並行startの直列化）
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS uq_document_approvals_active \
                 ON document_approvals (document_id, document_version) \
                 WHERE status IN ('PENDING', 'IN_PROGRESS')",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DocumentApprovals::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum DocumentApprovals {
    Table,
    Id,
    DocumentId,
    DocumentVersion,
    WorkflowId,
    Approvers,
    CurrentStep,
    Status,
    IsSequential,
    InitiatedBy,
    StartDate,
    DueDate,
    CompletionDate,
    CreatedAt,
    UpdatedAt,
}
