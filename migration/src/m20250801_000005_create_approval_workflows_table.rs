use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ApprovalWorkflows::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ApprovalWorkflows::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ApprovalWorkflows::Name).string().not_null())
                    .col(ColumnDef::new(ApprovalWorkflows::Description).text().null())
                    .col(
                        ColumnDef::new(ApprovalWorkflows::Steps)
                            .json_binary()
                            .not_null()
                            .extra("DEFAULT '[]'::jsonb"),
                    )
                    .col(
                        ColumnDef::new(ApprovalWorkflows::IsSequential)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(ApprovalWorkflows::DefaultDueDays)
                            .integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ApprovalWorkflows::DocumentTypes)
                            .json_binary()
                            .not_null()
                            .extra("DEFAULT '[]'::jsonb"),
                    )
                    .col(ColumnDef::new(ApprovalWorkflows::CreatedBy).string().not_null())
                    .col(
                        ColumnDef::new(ApprovalWorkflows::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP"),
                    )
                    .col(
                        ColumnDef::new(ApprovalWorkflows::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP"),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ApprovalWorkflows::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum ApprovalWorkflows {
    Table,
    Id,
    Name,
    Description,
    Steps,
    IsSequential,
    DefaultDueDays,
    DocumentTypes,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}
