use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create securities table first (no dependencies)
        manager
            .create_table(
                Table::create()
                    .table(Securities::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Securities::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Securities::Code).string().not_null().unique_key())
                    .col(ColumnDef::new(Securities::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        // Daily records: composite primary key carries the one-record-per
        // (security, trade date) invariant
        manager
            .create_table(
                Table::create()
                    .table(DailyRecords::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(DailyRecords::SecurityId).uuid().not_null())
                    .col(ColumnDef::new(DailyRecords::TradeDate).date().not_null())
                    .col(ColumnDef::new(DailyRecords::Code).string().not_null())
                    .col(ColumnDef::new(DailyRecords::Volume).big_integer().null())
                    .col(ColumnDef::new(DailyRecords::Value).decimal_len(20, 4).null())
                    .col(ColumnDef::new(DailyRecords::Open).decimal_len(12, 4).null())
                    .col(ColumnDef::new(DailyRecords::High).decimal_len(12, 4).null())
                    .col(ColumnDef::new(DailyRecords::Low).decimal_len(12, 4).null())
                    .col(ColumnDef::new(DailyRecords::Close).decimal_len(12, 4).null())
                    .col(ColumnDef::new(DailyRecords::Change).decimal_len(12, 4).null())
                    .col(ColumnDef::new(DailyRecords::Transactions).big_integer().null())
                    .primary_key(
                        Index::create()
                            .col(DailyRecords::SecurityId)
                            .col(DailyRecords::TradeDate),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_daily_records_security")
                            .from(DailyRecords::Table, DailyRecords::SecurityId)
                            .to(Securities::Table, Securities::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // The read API looks records up by exchange code
        manager
            .create_index(
                Index::create()
                    .name("idx_daily_records_code")
                    .table(DailyRecords::Table)
                    .col(DailyRecords::Code)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order
        manager
            .drop_table(Table::drop().table(DailyRecords::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Securities::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Securities {
    Table,
    Id,
    Code,
    Name,
}

#[derive(DeriveIden)]
enum DailyRecords {
    Table,
    SecurityId,
    TradeDate,
    Code,
    Volume,
    Value,
    Open,
    High,
    Low,
    Close,
    Change,
    Transactions,
}
